//! # symsat
//! A SAT solver for combinatorial search over graphs with dynamic symmetry
//! breaking.
//!
//! Boolean variables `1..=E` encode the edges of a graph with a fixed number
//! of vertices; the remaining variables are free for the problem encoding.
//! During search, a propagator watches the partial assignment as a partial
//! adjacency matrix and excludes assignments whose graph is not the canonical
//! representative of its isomorphism class, so only one graph per class
//! survives. The propagator can also partition the search space into cubes
//! and pick decisions by lookahead probing.
//!
//! # Using the solver
//! A problem is a CNF formula over the edge variables (and any auxiliary
//! variables), solved under a [`SolverConfig`]:
//! ```rust
//! use symsat::engine::termination::Indefinite;
//! use symsat::results::SatisfactionResult;
//! use symsat::GraphSolver;
//! use symsat::SolverConfig;
//!
//! // every graph on 3 vertices, one per isomorphism class
//! let mut config = SolverConfig::new(3);
//! config.all_models = true;
//! config.hide_graphs = true;
//!
//! let mut solver = GraphSolver::new(config).unwrap();
//! let result = solver.satisfy(&mut Indefinite);
//!
//! // the space is exhausted after the canonical representatives
//! assert!(matches!(result, SatisfactionResult::Unsatisfiable));
//! assert_eq!(solver.num_models(), 4);
//! ```
//!
//! Custom graph properties plug in as checkers over the adjacency matrix,
//! see [`propagators::graph::PartiallyDefinedGraphCheck`] and
//! [`propagators::graph::FullyDefinedGraphCheck`].

pub(crate) mod asserts;
pub(crate) mod basic_types;
pub mod branching;
pub mod engine;
pub mod io;
pub mod options;
pub mod propagators;
pub mod runner;
pub mod statistics;

// We declare a private module with public use, so that all exports from API
// are exports directly from the crate.
mod api;

pub use api::*;

pub use crate::basic_types::ClauseBuffer;
pub use crate::basic_types::CnfFormula;
pub use crate::basic_types::ConstraintOperationError;
pub use crate::basic_types::PendingClause;
pub use crate::basic_types::SolverExecutionFlag;
pub use crate::basic_types::TruthValue;
pub use crate::engine::variables::Literal;
pub use crate::engine::variables::Variable;
pub use crate::options::SolverConfig;

/// The outcome types of the solver API.
pub mod results {
    pub use crate::api::SatisfactionResult;
    pub use crate::api::Solution;
}

pub(crate) mod tests;
