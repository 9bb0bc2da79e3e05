use crate::basic_types::TruthValue;
use crate::engine::variables::Literal;
use crate::engine::variables::Variable;
use crate::symsat_assert_eq_simple;
use crate::symsat_assert_simple;

/// The propagator's own copy of the truth assignment, fed exclusively by
/// solver notifications.
///
/// A variable that has been reported as fixed stays assigned across
/// backtracking for the rest of the search.
#[derive(Clone, Debug)]
pub struct TruthStore {
    values: Vec<TruthValue>,
    is_fixed: Vec<bool>,
    fixed_literals: Vec<Literal>,
}

impl TruthStore {
    pub fn new(num_variables: usize) -> TruthStore {
        TruthStore {
            values: vec![TruthValue::Unknown; num_variables],
            is_fixed: vec![false; num_variables],
            fixed_literals: Vec::new(),
        }
    }

    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    pub fn value(&self, variable: Variable) -> TruthValue {
        self.values[variable.index()]
    }

    pub fn is_literal_satisfied(&self, literal: Literal) -> bool {
        self.value(literal.get_variable()) == TruthValue::from_polarity(literal.is_positive())
    }

    pub fn is_literal_falsified(&self, literal: Literal) -> bool {
        self.value(literal.get_variable()) == !TruthValue::from_polarity(literal.is_positive())
    }

    pub fn assign(&mut self, literal: Literal) {
        self.values[literal.get_variable().index()] =
            TruthValue::from_polarity(literal.is_positive());
    }

    /// Forget the value of a variable unless it is fixed.
    pub fn unassign(&mut self, variable: Variable) {
        if !self.is_fixed[variable.index()] {
            self.values[variable.index()] = TruthValue::Unknown;
        }
    }

    pub fn is_fixed(&self, variable: Variable) -> bool {
        self.is_fixed[variable.index()]
    }

    pub fn mark_fixed(&mut self, literal: Literal) {
        let index = literal.get_variable().index();
        if !self.is_fixed[index] {
            self.is_fixed[index] = true;
            self.fixed_literals.push(literal);
        }
    }

    pub fn fixed_literals(&self) -> &[Literal] {
        &self.fixed_literals
    }
}

/// The decision-level structure of the assignment as seen by the propagator:
/// one ordered list of variables per level, level 0 being the root.
#[derive(Clone, Debug)]
pub struct Trail {
    levels: Vec<Vec<Variable>>,
}

impl Default for Trail {
    fn default() -> Trail {
        Trail {
            levels: vec![Vec::new()],
        }
    }
}

impl Trail {
    /// `num_levels() == decision level + 1` at all times.
    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn push_level(&mut self) {
        self.levels.push(Vec::new());
    }

    pub fn pop_level(&mut self) -> Vec<Variable> {
        symsat_assert_simple!(self.levels.len() > 1);
        self.levels.pop().unwrap()
    }

    pub fn record(&mut self, variable: Variable) {
        self.levels.last_mut().unwrap().push(variable);
    }

    pub fn levels(&self) -> impl Iterator<Item = &[Variable]> + '_ {
        self.levels.iter().map(|level| level.as_slice())
    }

    pub fn num_assigned(&self) -> usize {
        self.levels.iter().map(|level| level.len()).sum()
    }

    /// Drop back to `new_level`, handing every popped variable to `unassign`.
    pub fn backtrack(&mut self, new_level: usize, mut unassign: impl FnMut(Variable)) {
        while self.levels.len() > new_level + 1 {
            for variable in self.pop_level() {
                unassign(variable);
            }
        }
        symsat_assert_eq_simple!(self.levels.len(), new_level + 1);
    }
}
