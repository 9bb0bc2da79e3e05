use crate::branching::Brancher;
use crate::engine::propagation::ExternalPropagator;
use crate::engine::sat::Assignments;
use crate::engine::sat::ClauseAllocator;
use crate::engine::sat::ExplanationClauseManager;

/// The parts of the solver that conflict analysis operates on.
///
/// The external propagator is part of the context because reason clauses for
/// its propagations only exist on demand; the analyser materialises them
/// through the [`ExplanationClauseManager`] while resolving.
pub(crate) struct ConflictAnalysisContext<'a> {
    pub(crate) assignments: &'a Assignments,
    pub(crate) clause_allocator: &'a mut ClauseAllocator,
    pub(crate) explanation_clause_manager: &'a mut ExplanationClauseManager,
    pub(crate) external_propagator: &'a mut dyn ExternalPropagator,
    pub(crate) brancher: &'a mut dyn Brancher,
}
