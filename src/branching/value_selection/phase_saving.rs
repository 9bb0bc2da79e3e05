use super::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::variables::Literal;
use crate::engine::variables::Variable;

/// Re-assigns a variable the polarity it last had. Fresh variables start out
/// negative, which biases the search towards sparse graphs when the variables
/// encode edges.
#[derive(Clone, Debug)]
pub struct PhaseSaving {
    saved_polarities: Vec<bool>,
}

impl PhaseSaving {
    pub fn new(num_variables: usize) -> PhaseSaving {
        PhaseSaving {
            saved_polarities: vec![false; num_variables],
        }
    }
}

impl ValueSelector for PhaseSaving {
    fn select_value(&mut self, _context: &mut SelectionContext<'_>, variable: Variable) -> Literal {
        Literal::new(variable, self.saved_polarities[variable.index()])
    }

    fn on_unassign_literal(&mut self, literal: Literal) {
        self.saved_polarities[literal.get_variable().index()] = literal.is_positive();
    }
}
