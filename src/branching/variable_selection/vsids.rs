use super::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::variables::Variable;

const MAX_ACTIVITY: f64 = 1e100;

/// Variable State Independent Decaying Sum: variables appearing in recent
/// conflicts get a higher activity; the unassigned variable with the highest
/// activity is branched on. Ties go to the smallest variable index so that
/// the selection is deterministic.
#[derive(Clone, Debug)]
pub struct Vsids {
    activities: Vec<f64>,
    increment: f64,
    decay_factor: f64,
}

impl Vsids {
    pub fn new(num_variables: usize) -> Vsids {
        Vsids {
            activities: vec![0.0; num_variables],
            increment: 1.0,
            decay_factor: 0.95,
        }
    }

    fn rescale_if_needed(&mut self) {
        if self.increment >= MAX_ACTIVITY {
            for activity in &mut self.activities {
                *activity /= MAX_ACTIVITY;
            }
            self.increment /= MAX_ACTIVITY;
        }
    }
}

impl VariableSelector for Vsids {
    fn select_variable(&mut self, context: &mut SelectionContext<'_>) -> Option<Variable> {
        let mut best: Option<Variable> = None;
        for index in 0..context.num_variables() {
            let variable = Variable::new(index as u32);
            if !context.is_variable_unassigned(variable) {
                continue;
            }
            match best {
                Some(current) if self.activities[current.index()] >= self.activities[index] => {}
                _ => best = Some(variable),
            }
        }
        best
    }

    fn on_conflict(&mut self) {
        self.increment /= self.decay_factor;
        self.rescale_if_needed();
    }

    fn on_appearance_in_conflict_clause(&mut self, variable: Variable) {
        self.activities[variable.index()] += self.increment;
    }
}
