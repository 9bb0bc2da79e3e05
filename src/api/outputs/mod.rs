use crate::engine::variables::Literal;
use crate::engine::variables::Variable;

/// A satisfying assignment: one literal per variable, in variable order.
#[derive(Clone, Debug)]
pub struct Solution {
    literals: Vec<Literal>,
}

impl Solution {
    pub(crate) fn new(literals: Vec<Literal>) -> Solution {
        Solution { literals }
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn is_variable_true(&self, variable: Variable) -> bool {
        self.literals[variable.index()].is_positive()
    }

    pub fn contains(&self, literal: Literal) -> bool {
        self.literals[literal.get_variable().index()] == literal
    }
}

/// The outcome of a satisfaction call.
#[derive(Clone, Debug)]
pub enum SatisfactionResult {
    Satisfiable(Solution),
    Unsatisfiable,
    Unknown,
}
