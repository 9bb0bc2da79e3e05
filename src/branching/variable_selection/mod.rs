mod vsids;

pub use vsids::Vsids;

use super::SelectionContext;
use crate::engine::variables::Variable;

/// Picks the variable to branch on next.
pub trait VariableSelector {
    fn select_variable(&mut self, context: &mut SelectionContext<'_>) -> Option<Variable>;

    fn on_conflict(&mut self) {}

    fn on_appearance_in_conflict_clause(&mut self, _variable: Variable) {}
}
