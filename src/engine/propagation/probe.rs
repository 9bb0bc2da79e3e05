use crate::engine::sat::Assignments;
use crate::engine::sat::ClausalPropagator;
use crate::engine::sat::ClauseAllocator;
use crate::engine::variables::Literal;
use crate::engine::variables::Variable;
use crate::symsat_assert_moderate;

/// A view of the solver handed to [`decide`] which allows a propagator to
/// temporarily assume a literal, run clausal propagation, and retract again.
///
/// Probing never consults the external propagator and never produces
/// notifications, so the propagator's own state is untouched by it.
///
/// [`decide`]: crate::engine::propagation::ExternalPropagator::decide
#[derive(Debug)]
pub struct Probe<'a> {
    assignments: &'a mut Assignments,
    clausal_propagator: &'a mut ClausalPropagator,
    clause_allocator: &'a mut ClauseAllocator,
}

impl<'a> Probe<'a> {
    pub(crate) fn new(
        assignments: &'a mut Assignments,
        clausal_propagator: &'a mut ClausalPropagator,
        clause_allocator: &'a mut ClauseAllocator,
    ) -> Probe<'a> {
        Probe {
            assignments,
            clausal_propagator,
            clause_allocator,
        }
    }

    pub fn decision_level(&self) -> usize {
        self.assignments.get_decision_level()
    }

    pub fn num_variables(&self) -> usize {
        self.assignments.num_variables()
    }

    pub fn is_variable_unassigned(&self, variable: Variable) -> bool {
        !self.assignments.is_variable_assigned(variable)
    }

    /// Assume `literal`, propagate to fixed point, count how many assignments
    /// that produced (the assumption included), and retract everything.
    ///
    /// Returns `None` if the assumption leads to a conflict, in which case the
    /// opposite literal is implied at the current level.
    pub fn probe(&mut self, literal: Literal) -> Option<usize> {
        symsat_assert_moderate!(self.assignments.is_literal_unassigned(literal));
        symsat_assert_moderate!(self
            .clausal_propagator
            .is_propagation_complete(self.assignments.num_trail_entries()));

        let level = self.assignments.get_decision_level();
        let trail_size = self.assignments.num_trail_entries();

        self.assignments.increase_decision_level();
        self.assignments.enqueue_decision_literal(literal);
        let outcome = self
            .clausal_propagator
            .propagate(self.assignments, self.clause_allocator);
        let num_propagated = self.assignments.num_trail_entries() - trail_size;

        let _ = self.assignments.synchronise(level);
        self.clausal_propagator
            .synchronise(self.assignments.num_trail_entries());

        outcome.ok().map(|_| num_propagated)
    }
}
