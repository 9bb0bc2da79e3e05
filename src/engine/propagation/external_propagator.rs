use super::Probe;
use crate::engine::variables::Literal;
#[cfg(doc)]
use crate::engine::SatisfactionSolver;

/// The callback surface through which the [`SatisfactionSolver`] consults a
/// theory plugin during search.
///
/// The solver owns the master trail and the clause database; the propagator
/// mirrors the parts of the assignment it cares about via the `notify_*`
/// family and influences the search through the remaining callbacks. A
/// propagator must uphold two contracts:
///
/// - assignment notifications for a decision level are always delivered
///   before any notification that creates or crosses that level, and
/// - after [`ExternalPropagator::propagate`] returns a literal, the
///   propagator can produce the clause that justifies it on demand through
///   [`ExternalPropagator::add_reason_clause_literal`] until the solver
///   backtracks past the propagation.
///
/// Clause and reason literals are streamed one literal per call; `None` plays
/// the role of the terminating zero of the usual solver wire formats.
pub trait ExternalPropagator {
    /// A short name used in logs.
    fn name(&self) -> &str;

    /// One or more literals became true on the solver trail.
    fn notify_assignments(&mut self, _literals: &[Literal]) {}

    /// The solver pushed a new decision level.
    fn notify_new_decision_level(&mut self) {}

    /// The solver backtracked; every non-fixed assignment above `new_level`
    /// is gone.
    fn notify_backtrack(&mut self, _new_level: usize) {}

    /// A literal became permanent (assigned at the root level).
    fn notify_fixed_assignment(&mut self, _literal: Literal) {}

    /// The solver found a full assignment satisfying the clause database.
    /// Returning `false` rejects the model; in that case the propagator must
    /// have a pending clause excluding it.
    fn check_found_model(&mut self, _model: &[Literal]) -> bool {
        true
    }

    /// Whether a clause is ready to be handed over; `Some(is_forgettable)`
    /// if so.
    fn has_external_clause(&mut self) -> Option<bool> {
        None
    }

    /// Stream the next literal of the announced clause; `None` terminates the
    /// clause and drops it.
    fn add_external_clause_literal(&mut self) -> Option<Literal> {
        None
    }

    /// Pick the next decision literal, or `None` to let the solver's own
    /// brancher decide. The [`Probe`] context allows assumption probing.
    fn decide(&mut self, _probe: &mut Probe<'_>) -> Option<Literal> {
        None
    }

    /// Propagate a single literal that is implied by the current partial
    /// assignment, or `None`. A propagated literal requires a reason clause
    /// on demand.
    fn propagate(&mut self) -> Option<Literal> {
        None
    }

    /// Stream the reason clause for a literal previously returned by
    /// [`ExternalPropagator::propagate`], terminated by `None`; afterwards the
    /// stored reason is consumed.
    fn add_reason_clause_literal(&mut self, _propagated: Literal) -> Option<Literal> {
        None
    }
}
