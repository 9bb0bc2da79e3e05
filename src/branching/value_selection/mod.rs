mod phase_saving;

pub use phase_saving::PhaseSaving;

use super::SelectionContext;
use crate::engine::variables::Literal;
use crate::engine::variables::Variable;

/// Picks the polarity for a variable chosen by a
/// [`VariableSelector`](crate::branching::VariableSelector).
pub trait ValueSelector {
    fn select_value(&mut self, context: &mut SelectionContext<'_>, variable: Variable) -> Literal;

    fn on_unassign_literal(&mut self, _literal: Literal) {}
}
