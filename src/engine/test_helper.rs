#![cfg(any(test, doc))]
//! Helpers that aid testing of propagator behaviour against the raw engine
//! pieces, without driving a full search.

use super::propagation::Probe;
use super::sat::Assignments;
use super::sat::ClausalPropagator;
use super::sat::ClauseAllocator;
use crate::engine::variables::Literal;

/// A container for the propositional state, which can be used to set up
/// specific scenarios under which to test propagator operations.
#[derive(Debug, Default)]
pub(crate) struct TestSolver {
    pub(crate) assignments: Assignments,
    pub(crate) clausal_propagator: ClausalPropagator,
    pub(crate) clause_allocator: ClauseAllocator,
}

impl TestSolver {
    pub(crate) fn with_variables(num_variables: usize) -> TestSolver {
        let mut solver = TestSolver::default();
        for _ in 0..num_variables {
            let _ = solver.assignments.grow();
            solver.clausal_propagator.grow();
        }
        solver
    }

    pub(crate) fn add_clause(&mut self, dimacs: &[i32]) {
        let literals = dimacs.iter().map(|&value| Literal::from_dimacs(value)).collect();
        self.clausal_propagator
            .add_permanent_clause(literals, &mut self.assignments, &mut self.clause_allocator)
            .expect("Expected the clause to be consistent at the root");
    }

    pub(crate) fn set_decision(&mut self, dimacs: i32) {
        self.assignments.increase_decision_level();
        self.assignments
            .enqueue_decision_literal(Literal::from_dimacs(dimacs));
        self.clausal_propagator
            .propagate(&mut self.assignments, &mut self.clause_allocator)
            .expect("Expected the decision not to conflict");
    }

    pub(crate) fn probe(&mut self) -> Probe<'_> {
        Probe::new(
            &mut self.assignments,
            &mut self.clausal_propagator,
            &mut self.clause_allocator,
        )
    }
}
