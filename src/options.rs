use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

/// How the assignment score driving cube emission is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum AssignmentScoring {
    /// Each assigned edge variable counts once.
    #[default]
    Count,
    /// An edge variable assigned at decision level `l` counts `l` times;
    /// root-level assignments count once.
    WeightedByLevel,
}

/// The scoring function used to rank lookahead candidates from their
/// propagation counts `(p_pos, p_neg)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LookaheadHeuristic {
    /// `p_pos * p_neg + p_pos + p_neg`
    #[default]
    Product,
    /// `p_pos + p_neg`
    Sum,
    /// `min(p_pos, p_neg)`
    Minimum,
}

impl LookaheadHeuristic {
    pub fn score(&self, p_pos: usize, p_neg: usize) -> u64 {
        let (p_pos, p_neg) = (p_pos as u64, p_neg as u64);
        match self {
            LookaheadHeuristic::Product => p_pos * p_neg + p_pos + p_neg,
            LookaheadHeuristic::Sum => p_pos + p_neg,
            LookaheadHeuristic::Minimum => p_pos.min(p_neg),
        }
    }
}

/// The configuration surface of the graph solver.
///
/// A fresh config describes an ordinary SAT frontend over a two-vertex graph;
/// symmetry breaking only activates for larger graphs.
#[derive(Clone, Debug)]
pub struct SolverConfig {
    pub vertices: usize,
    pub directed: bool,

    /// Run the minimality check every this many propagation rounds.
    pub frequency: u64,
    /// Budget on the number of nodes the permutation search may expand per
    /// call; 0 means unlimited.
    pub cutoff: u64,
    /// `initial_partition[v]` marks vertex `v` as the first vertex of a
    /// partition cell; permutations only move vertices within their cell. An
    /// empty vector means a single cell over all vertices.
    pub initial_partition: Vec<bool>,
    /// The orders in which the permutation search tries candidate vertices.
    /// Empty means the natural vertex order.
    pub vertex_orderings: Vec<Vec<usize>>,
    pub turn_off_symmetry_breaking: bool,

    /// Emit a cube once the assignment score reaches this; 0 disables cubing.
    pub assignment_cutoff: usize,
    /// Number of propagation rounds before cube emission activates.
    pub assignment_cutoff_prerun: u64,
    /// Wall-clock warmup before cube emission activates.
    pub assignment_cutoff_prerun_time: Duration,
    pub assignment_scoring: AssignmentScoring,

    pub lookahead: bool,
    /// Probe all variables rather than only edge variables.
    pub lookahead_all: bool,
    pub lookahead_heuristic: LookaheadHeuristic,

    /// Run the graph checkers inside the model-acceptance callback; when off,
    /// checks run after search through the incremental clause interface.
    pub check_solution_in_prop: bool,
    /// Force unit consequences of pending clauses through the propagation
    /// callback instead of surfacing the clauses directly.
    pub propagate_literals: bool,
    /// The default forgettable tag for checker clauses.
    pub forgettable_clauses: bool,

    pub all_models: bool,
    pub hide_graphs: bool,

    /// Per-solve (per-cube) wall-clock budget.
    pub timeout: Option<Duration>,

    pub symmetry_clauses_path: Option<PathBuf>,
    pub added_clauses_path: Option<PathBuf>,
    pub learned_clauses_path: Option<PathBuf>,
    pub simplified_cnf_path: Option<PathBuf>,
    /// Learned clauses up to this size are kept in the simplified CNF dump.
    pub simplified_max_learned_size: usize,
}

pub const DEFAULT_FREQUENCY: u64 = 20;

impl SolverConfig {
    /// A config for searching over graphs with `vertices` vertices. With two
    /// vertices there is a single edge and nothing to break symmetry over, so
    /// symmetry breaking is turned off.
    pub fn new(vertices: usize) -> SolverConfig {
        assert!(vertices >= 2, "a graph needs at least two vertices");
        SolverConfig {
            vertices,
            directed: false,
            frequency: DEFAULT_FREQUENCY,
            cutoff: 0,
            initial_partition: Vec::new(),
            vertex_orderings: Vec::new(),
            turn_off_symmetry_breaking: vertices == 2,
            assignment_cutoff: 0,
            assignment_cutoff_prerun: 0,
            assignment_cutoff_prerun_time: Duration::ZERO,
            assignment_scoring: AssignmentScoring::default(),
            lookahead: false,
            lookahead_all: false,
            lookahead_heuristic: LookaheadHeuristic::default(),
            check_solution_in_prop: true,
            propagate_literals: false,
            forgettable_clauses: false,
            all_models: false,
            hide_graphs: false,
            timeout: None,
            symmetry_clauses_path: None,
            added_clauses_path: None,
            learned_clauses_path: None,
            simplified_cnf_path: None,
            simplified_max_learned_size: 0,
        }
    }
}

impl Default for SolverConfig {
    fn default() -> SolverConfig {
        SolverConfig::new(2)
    }
}
