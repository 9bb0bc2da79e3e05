use thiserror::Error;

/// The outcome of a single search of the satisfaction solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverExecutionFlag {
    Feasible,
    Infeasible,
    Timeout,
}

/// Errors related to adding constraints to the solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConstraintOperationError {
    #[error("adding the clause failed because the solver is in an infeasible state")]
    InfeasibleState,
    #[error("adding the clause failed because it is infeasible at the root")]
    InfeasibleClause,
}
