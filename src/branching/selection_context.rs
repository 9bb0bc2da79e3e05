use rand::rngs::SmallRng;

use crate::basic_types::TruthValue;
use crate::engine::sat::Assignments;
use crate::engine::variables::Variable;

/// Read access to the current assignment for branchers, together with the
/// solver's random generator for randomised selection strategies.
#[derive(Debug)]
pub struct SelectionContext<'a> {
    assignments: &'a Assignments,
    random_generator: &'a mut SmallRng,
}

impl<'a> SelectionContext<'a> {
    pub(crate) fn new(
        assignments: &'a Assignments,
        random_generator: &'a mut SmallRng,
    ) -> SelectionContext<'a> {
        SelectionContext {
            assignments,
            random_generator,
        }
    }

    pub fn num_variables(&self) -> usize {
        self.assignments.num_variables()
    }

    pub fn is_variable_unassigned(&self, variable: Variable) -> bool {
        !self.assignments.is_variable_assigned(variable)
    }

    pub fn truth_value(&self, variable: Variable) -> TruthValue {
        self.assignments.truth_value(variable)
    }

    pub fn random(&mut self) -> &mut SmallRng {
        self.random_generator
    }
}
