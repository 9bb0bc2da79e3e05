use fnv::FnvHashSet;

use super::Assignments;
use crate::engine::variables::Literal;

/// The literal block distance of a clause: the number of distinct decision
/// levels among its (assigned) literals. Lower is better.
pub(crate) fn calculate_lbd(literals: &[Literal], assignments: &Assignments) -> u32 {
    let levels: FnvHashSet<usize> = literals
        .iter()
        .filter(|literal| assignments.is_literal_assigned(**literal))
        .map(|literal| assignments.get_variable_decision_level(literal.get_variable()))
        .collect();
    levels.len() as u32
}
