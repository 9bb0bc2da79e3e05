use fnv::FnvHashSet;

use crate::engine::sat::Assignments;
use crate::engine::variables::Literal;
use crate::symsat_assert_simple;

#[derive(Debug, Copy, Clone)]
pub(crate) struct Preprocessor;

impl Preprocessor {
    /// Normalise a clause at the root level: duplicate literals and literals
    /// that are false at the root are removed, and a clause that is satisfied
    /// at the root (or a tautology) collapses to a unit clause with one of its
    /// satisfied literals.
    ///
    /// The returned clause is empty exactly when the input is infeasible at
    /// the root.
    pub(crate) fn preprocess_clause(
        literals: Vec<Literal>,
        assignments: &Assignments,
    ) -> Vec<Literal> {
        symsat_assert_simple!(assignments.is_at_the_root_level());

        let mut seen: FnvHashSet<Literal> = FnvHashSet::default();
        let mut processed = Vec::with_capacity(literals.len());

        for literal in &literals {
            if assignments.is_literal_assigned_true(*literal) {
                return vec![*literal];
            }
            if seen.contains(&!*literal) {
                // a tautology is kept verbatim; it can never become unit so
                // watching it is harmless
                return literals;
            }
            if assignments.is_literal_assigned_false(*literal) || seen.contains(literal) {
                continue;
            }
            let _ = seen.insert(*literal);
            processed.push(*literal);
        }

        processed
    }
}
