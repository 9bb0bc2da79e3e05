use crate::basic_types::ConstraintReference;
use crate::basic_types::TruthValue;
use crate::engine::variables::Literal;
use crate::engine::variables::Variable;
use crate::symsat_assert_moderate;
use crate::symsat_assert_simple;

/// One assignment on the trail: the literal that became true and the reason it
/// was enqueued (`None` for decisions and root-level facts).
#[derive(Clone, Copy, Debug)]
pub(crate) struct TrailEntry {
    pub(crate) literal: Literal,
    pub(crate) reason: Option<ConstraintReference>,
}

/// Tracks the truth assignment of all propositional variables together with
/// the trail that records in which order, at which decision level, and for
/// which reason they were assigned.
#[derive(Clone, Debug, Default)]
pub(crate) struct Assignments {
    truth_values: Vec<TruthValue>,
    decision_levels: Vec<usize>,
    reasons: Vec<Option<ConstraintReference>>,
    trail: Vec<TrailEntry>,
    trail_delimiters: Vec<usize>,
    current_decision_level: usize,
}

impl Assignments {
    pub(crate) fn grow(&mut self) -> Variable {
        let variable = Variable::new(self.truth_values.len() as u32);
        self.truth_values.push(TruthValue::Unknown);
        self.decision_levels.push(0);
        self.reasons.push(None);
        variable
    }

    pub(crate) fn num_variables(&self) -> usize {
        self.truth_values.len()
    }

    pub(crate) fn num_trail_entries(&self) -> usize {
        self.trail.len()
    }

    pub(crate) fn get_trail_entry(&self, index: usize) -> TrailEntry {
        self.trail[index]
    }

    pub(crate) fn get_decision_level(&self) -> usize {
        self.current_decision_level
    }

    pub(crate) fn is_at_the_root_level(&self) -> bool {
        self.current_decision_level == 0
    }

    pub(crate) fn truth_value(&self, variable: Variable) -> TruthValue {
        self.truth_values[variable.index()]
    }

    pub(crate) fn is_variable_assigned(&self, variable: Variable) -> bool {
        self.truth_values[variable.index()].is_known()
    }

    pub(crate) fn is_literal_assigned(&self, literal: Literal) -> bool {
        self.is_variable_assigned(literal.get_variable())
    }

    pub(crate) fn is_literal_unassigned(&self, literal: Literal) -> bool {
        !self.is_literal_assigned(literal)
    }

    pub(crate) fn is_literal_assigned_true(&self, literal: Literal) -> bool {
        self.truth_value(literal.get_variable())
            == TruthValue::from_polarity(literal.is_positive())
    }

    pub(crate) fn is_literal_assigned_false(&self, literal: Literal) -> bool {
        self.is_literal_assigned(literal) && !self.is_literal_assigned_true(literal)
    }

    pub(crate) fn get_variable_decision_level(&self, variable: Variable) -> usize {
        symsat_assert_moderate!(self.is_variable_assigned(variable));
        self.decision_levels[variable.index()]
    }

    pub(crate) fn get_reason(&self, variable: Variable) -> Option<ConstraintReference> {
        self.reasons[variable.index()]
    }

    pub(crate) fn increase_decision_level(&mut self) {
        self.current_decision_level += 1;
        self.trail_delimiters.push(self.trail.len());
    }

    /// Enqueue a decision (or assumption) literal. The literal must be
    /// unassigned.
    pub(crate) fn enqueue_decision_literal(&mut self, literal: Literal) {
        symsat_assert_simple!(self.is_literal_unassigned(literal));
        self.make_assignment(literal, None);
    }

    /// Enqueue a propagated literal. Returns `false` if the literal is already
    /// falsified, in which case the assignment is not recorded and the caller
    /// owns the conflict.
    #[must_use]
    pub(crate) fn enqueue_propagated_literal(
        &mut self,
        literal: Literal,
        reason: ConstraintReference,
    ) -> bool {
        if self.is_literal_assigned_true(literal) {
            return true;
        }
        if self.is_literal_assigned_false(literal) {
            return false;
        }
        self.make_assignment(literal, Some(reason));
        true
    }

    fn make_assignment(&mut self, literal: Literal, reason: Option<ConstraintReference>) {
        let variable = literal.get_variable();
        self.truth_values[variable.index()] = TruthValue::from_polarity(literal.is_positive());
        self.decision_levels[variable.index()] = self.current_decision_level;
        self.reasons[variable.index()] = reason;
        self.trail.push(TrailEntry { literal, reason });
    }

    /// Backtrack to `new_level`, unassigning every variable set at a higher
    /// level. The unassigned literals are returned in the order they were
    /// assigned so branchers can be informed.
    pub(crate) fn synchronise(&mut self, new_level: usize) -> Vec<Literal> {
        symsat_assert_simple!(new_level <= self.current_decision_level);
        if new_level == self.current_decision_level {
            return Vec::new();
        }

        let new_trail_len = self.trail_delimiters[new_level];
        let unassigned: Vec<Literal> = self.trail[new_trail_len..]
            .iter()
            .map(|entry| entry.literal)
            .collect();

        for literal in &unassigned {
            self.truth_values[literal.get_variable().index()] = TruthValue::Unknown;
            self.reasons[literal.get_variable().index()] = None;
        }

        self.trail.truncate(new_trail_len);
        self.trail_delimiters.truncate(new_level);
        self.current_decision_level = new_level;

        unassigned
    }

    /// The full model once every variable is assigned: one literal per
    /// variable, with the assigned polarity.
    pub(crate) fn extract_model(&self) -> Vec<Literal> {
        symsat_assert_simple!(self.truth_values.iter().all(|value| value.is_known()));
        self.truth_values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                Literal::new(Variable::new(index as u32), *value == TruthValue::True)
            })
            .collect()
    }

    pub(crate) fn root_assignments(&self) -> impl Iterator<Item = Literal> + '_ {
        let root_end = self
            .trail_delimiters
            .first()
            .copied()
            .unwrap_or(self.trail.len());
        self.trail[..root_end].iter().map(|entry| entry.literal)
    }
}
