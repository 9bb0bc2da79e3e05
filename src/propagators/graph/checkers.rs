use super::AdjacencyMatrix;
use crate::engine::variables::Literal;

/// A clause that rules out (an extension of) the current partial graph.
/// The literals already carry the excluding polarity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockingClause {
    pub literals: Vec<Literal>,
}

pub type GraphCheckResult = Result<(), BlockingClause>;

/// A check that runs on partially defined adjacency matrices during search.
///
/// Returning `Err` means the current partial graph (and all its extensions)
/// is excluded by the given clause; `Ok` means nothing could be concluded at
/// this point, which is not an error.
pub trait PartiallyDefinedGraphCheck {
    fn name(&self) -> &str;

    /// Only run this check every `frequency()`-th propagation round. The
    /// gating is bypassed once the matrix is fully defined.
    fn frequency(&self) -> u64 {
        1
    }

    /// Clauses of this checker must never be dropped by clause-database
    /// cleanup.
    fn must_persist(&self) -> bool {
        false
    }

    fn check(&mut self, matrix: &AdjacencyMatrix) -> GraphCheckResult;
}

/// A check that runs once every edge variable is decided, with access to the
/// full model.
pub trait FullyDefinedGraphCheck {
    fn name(&self) -> &str;

    fn must_persist(&self) -> bool {
        false
    }

    /// Whether every literal in the clauses of this checker is over observed
    /// (edge) variables. Checkers that introduce other literals force the
    /// solver to verify models through the incremental clause interface.
    fn adds_only_observed_literals(&self) -> bool {
        true
    }

    fn check(&mut self, matrix: &AdjacencyMatrix, model: &[Literal]) -> GraphCheckResult;
}
