//! The graph propagator: mirrors the solver's assignment as an adjacency
//! matrix over the edge variables, runs the registered graph checks on every
//! change, and feeds the resulting clauses, forced literals, cubes and
//! decisions back to the solver.

pub mod adjacency;
pub mod checkers;
pub mod cubes;
pub mod lookahead;
pub mod minimality;
pub mod reason_index;
pub mod trail;

use std::time::Duration;
use std::time::Instant;

pub use adjacency::AdjacencyMatrix;
pub use adjacency::EdgeEncoding;
pub use checkers::BlockingClause;
pub use checkers::FullyDefinedGraphCheck;
pub use checkers::GraphCheckResult;
pub use checkers::PartiallyDefinedGraphCheck;
pub use cubes::CubeEmitter;
pub use lookahead::LookaheadDriver;
pub use minimality::MinimalityChecker;
pub use reason_index::ReasonIndex;
pub use trail::Trail;
pub use trail::TruthStore;

use log::info;
use log::warn;

use crate::basic_types::ClauseBuffer;
use crate::basic_types::TruthValue;
use crate::engine::propagation::ExternalPropagator;
use crate::engine::propagation::Probe;
use crate::engine::variables::Literal;
use crate::engine::variables::Variable;
use crate::engine::SatisfactionSolver;
use crate::io::ClauseLog;
use crate::options::SolverConfig;
use crate::statistics::log_statistic;
use crate::symsat_assert_simple;

/// The theory plugin connecting graph reasoning to the satisfaction solver.
pub struct GraphPropagator {
    config: SolverConfig,
    encoding: EdgeEncoding,

    truth_store: TruthStore,
    trail: Trail,
    clause_buffer: ClauseBuffer,
    reason_index: ReasonIndex,
    /// Whether an assignment arrived since the last round of checks.
    trail_changed: bool,
    /// While verifying a model through the incremental interface, clauses are
    /// staged for direct addition instead of entering the buffer.
    incremental_mode: bool,
    staged_incremental_clauses: Vec<Vec<Literal>>,

    partially_defined_checkers: Vec<Box<dyn PartiallyDefinedGraphCheck>>,
    fully_defined_checkers: Vec<Box<dyn FullyDefinedGraphCheck>>,

    lookahead: LookaheadDriver,
    cube_emitter: CubeEmitter,
    in_prerun_state: bool,
    prerun_started: Instant,

    num_models: u64,
    counters: PropagatorCounters,

    symmetry_clause_log: Option<ClauseLog>,
    added_clause_log: Option<ClauseLog>,
}

impl std::fmt::Debug for GraphPropagator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphPropagator")
            .field("config", &self.config)
            .field("num_pending_clauses", &self.clause_buffer.len())
            .field("num_models", &self.num_models)
            .field("counters", &self.counters)
            .finish()
    }
}

impl GraphPropagator {
    /// Create the propagator for `config` over a solver with `num_variables`
    /// variables. Unless symmetry breaking is turned off, the minimality
    /// check is installed as the first partially defined check.
    pub fn new(config: SolverConfig, num_variables: usize) -> std::io::Result<GraphPropagator> {
        let encoding = EdgeEncoding::new(config.vertices, config.directed);
        symsat_assert_simple!(num_variables >= encoding.num_edge_variables());

        let mut partially_defined_checkers: Vec<Box<dyn PartiallyDefinedGraphCheck>> = Vec::new();
        if !config.turn_off_symmetry_breaking {
            partially_defined_checkers.push(Box::new(MinimalityChecker::new(
                encoding.clone(),
                config.frequency,
                &config.initial_partition,
                config.vertex_orderings.clone(),
                config.cutoff,
            )));
        }

        let symmetry_clause_log = config
            .symmetry_clauses_path
            .as_deref()
            .map(ClauseLog::create)
            .transpose()?;
        let added_clause_log = config
            .added_clauses_path
            .as_deref()
            .map(ClauseLog::create)
            .transpose()?;

        let lookahead = LookaheadDriver::new(
            config.lookahead,
            config.lookahead_all,
            config.lookahead_heuristic,
        );
        let cube_emitter = CubeEmitter::new(config.assignment_cutoff, config.assignment_scoring);
        let in_prerun_state = config.assignment_cutoff_prerun > 0
            || !config.assignment_cutoff_prerun_time.is_zero();

        Ok(GraphPropagator {
            encoding,
            truth_store: TruthStore::new(num_variables),
            trail: Trail::default(),
            clause_buffer: ClauseBuffer::default(),
            reason_index: ReasonIndex::new(num_variables),
            trail_changed: true,
            incremental_mode: false,
            staged_incremental_clauses: Vec::new(),
            partially_defined_checkers,
            fully_defined_checkers: Vec::new(),
            lookahead,
            cube_emitter,
            in_prerun_state,
            prerun_started: Instant::now(),
            num_models: 0,
            counters: PropagatorCounters::default(),
            symmetry_clause_log,
            added_clause_log,
            config,
        })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn encoding(&self) -> &EdgeEncoding {
        &self.encoding
    }

    pub fn truth_store(&self) -> &TruthStore {
        &self.truth_store
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn num_models(&self) -> u64 {
        self.num_models
    }

    pub fn num_cubes_emitted(&self) -> u64 {
        self.cube_emitter.num_cubes_emitted()
    }

    pub fn add_partially_defined_checker(
        &mut self,
        checker: Box<dyn PartiallyDefinedGraphCheck>,
    ) {
        self.partially_defined_checkers.push(checker);
    }

    pub fn add_fully_defined_checker(&mut self, checker: Box<dyn FullyDefinedGraphCheck>) {
        if !checker.adds_only_observed_literals() {
            warn!(
                "checker '{}' adds unobserved literals; models will be verified through the incremental interface",
                checker.name()
            );
            self.config.check_solution_in_prop = false;
        }
        self.fully_defined_checkers.push(checker);
    }

    /// The adjacency matrix of the current partial assignment.
    pub fn adjacency_matrix(&self) -> AdjacencyMatrix {
        let mut matrix = AdjacencyMatrix::new(
            self.encoding.num_vertices(),
            self.encoding.is_directed(),
        );
        for (index, (i, j)) in self.encoding.edges().enumerate() {
            matrix.set(i, j, self.truth_store.value(Variable::new(index as u32)));
        }
        matrix
    }

    /// The adjacency matrix encoded by a full model.
    pub fn matrix_from_model(&self, model: &[Literal]) -> AdjacencyMatrix {
        let mut matrix = AdjacencyMatrix::new(
            self.encoding.num_vertices(),
            self.encoding.is_directed(),
        );
        for (index, (i, j)) in self.encoding.edges().enumerate() {
            let literal = model[index];
            symsat_assert_simple!(literal.get_variable().index() == index);
            matrix.set(i, j, TruthValue::from_polarity(literal.is_positive()));
        }
        matrix
    }

    pub(crate) fn enqueue_clause(&mut self, literals: Vec<Literal>, is_forgettable: bool) {
        self.counters.clauses_added += 1;
        if let Some(log) = &mut self.added_clause_log {
            log.log_clause(&literals);
        }
        if self.incremental_mode {
            self.staged_incremental_clauses.push(literals);
        } else {
            self.clause_buffer.push(literals, is_forgettable);
        }
    }

    fn update_prerun_state(&mut self) {
        if !self.in_prerun_state {
            return;
        }
        let still_in_prerun = self.counters.calls_propagator
            <= self.config.assignment_cutoff_prerun
            || self.prerun_started.elapsed() < self.config.assignment_cutoff_prerun_time;
        if !still_in_prerun {
            self.in_prerun_state = false;
            info!(
                "prerun finished after {} propagation rounds",
                self.counters.calls_propagator
            );
        }
    }

    /// One round of checks over the current partial assignment: partially
    /// defined checks first (first emitter wins), fully defined checks once
    /// every edge is decided, cube emission last.
    fn run_checks(&mut self) {
        let start = Instant::now();
        self.counters.calls_propagator += 1;
        self.update_prerun_state();

        let matrix = self.adjacency_matrix();
        let fully_defined = matrix.is_fully_defined();

        let mut emitted = self.run_partially_defined_checks(&matrix, fully_defined);

        if !emitted
            && fully_defined
            && self.config.check_solution_in_prop
            && !self.fully_defined_checkers.is_empty()
        {
            let model = self.assigned_literals();
            let check_start = Instant::now();
            emitted = self.run_fully_defined_checks(&matrix, &model);
            self.counters.time_checking_full_graphs += check_start.elapsed();
        }

        if !emitted
            && self.cube_emitter.is_enabled()
            && !self.in_prerun_state
            && !self.lookahead.is_probing()
        {
            let outcome = self.cube_emitter.try_emit_cube(
                &self.encoding,
                &self.truth_store,
                &self.trail,
                &mut std::io::stdout().lock(),
            );
            match outcome {
                Ok(Some(blocking_clause)) => self.enqueue_clause(blocking_clause, false),
                Ok(None) => {}
                Err(error) => warn!("failed to write cube: {error}"),
            }
        }

        self.counters.time_in_propagator += start.elapsed();
    }

    fn run_partially_defined_checks(
        &mut self,
        matrix: &AdjacencyMatrix,
        fully_defined: bool,
    ) -> bool {
        let mut checkers = std::mem::take(&mut self.partially_defined_checkers);
        let mut emitted = false;

        for checker in &mut checkers {
            // amortise expensive checks over rounds, but never skip them on a
            // fully defined matrix
            if !fully_defined
                && checker.frequency() > 1
                && self.counters.calls_propagator % checker.frequency() != 0
            {
                continue;
            }

            if let Err(blocking) = checker.check(matrix) {
                let is_forgettable = self.config.forgettable_clauses && !checker.must_persist();
                if let Some(log) = &mut self.symmetry_clause_log {
                    log.log_clause(&blocking.literals);
                }
                self.enqueue_clause(blocking.literals, is_forgettable);
                emitted = true;
                // first emitter wins; the remaining checkers run next round
                break;
            }
        }

        self.partially_defined_checkers = checkers;
        emitted
    }

    fn run_fully_defined_checks(&mut self, matrix: &AdjacencyMatrix, model: &[Literal]) -> bool {
        let mut checkers = std::mem::take(&mut self.fully_defined_checkers);
        let mut emitted = false;

        for checker in &mut checkers {
            if let Err(blocking) = checker.check(matrix, model) {
                let is_forgettable = self.config.forgettable_clauses && !checker.must_persist();
                self.enqueue_clause(blocking.literals, is_forgettable);
                emitted = true;
                break;
            }
        }

        self.fully_defined_checkers = checkers;
        emitted
    }

    /// Verify a full model against the fully defined checks, then either
    /// accept it or exclude it. Printing and all-models blocking happen here.
    fn check_current_graph(&mut self, model: &[Literal]) -> bool {
        self.counters.calls_check += 1;
        let start = Instant::now();

        let matrix = self.matrix_from_model(model);
        let rejected = self.run_fully_defined_checks(&matrix, model);
        self.counters.time_checking_full_graphs += start.elapsed();

        if rejected {
            return false;
        }

        self.num_models += 1;
        if !self.config.hide_graphs {
            let edges = matrix
                .present_edges()
                .iter()
                .map(|(i, j)| format!("({i},{j})"))
                .collect::<Vec<_>>()
                .join(" ");
            println!("solution {}: {}", self.num_models, edges);
        }

        if self.config.all_models {
            // exclude this graph and keep searching
            let blocking_clause = self.graph_blocking_clause(&matrix);
            self.enqueue_clause(blocking_clause, false);
            return false;
        }

        true
    }

    /// The clause stating "not exactly this graph": every edge entry flipped.
    fn graph_blocking_clause(&self, matrix: &AdjacencyMatrix) -> Vec<Literal> {
        self.encoding
            .edges()
            .map(|(i, j)| {
                self.encoding
                    .edge_literal(i, j, matrix.get(i, j) != TruthValue::True)
            })
            .collect()
    }

    /// Model verification through the incremental interface, for
    /// configurations where checks do not run inside the model callback. The
    /// solver must be at the root level so staged clauses can be added
    /// directly.
    pub fn verify_solution(
        &mut self,
        solver: &mut SatisfactionSolver,
        model: &[Literal],
    ) -> bool {
        if self.config.check_solution_in_prop {
            return true;
        }

        self.incremental_mode = true;
        let accepted = self.check_current_graph(model);
        self.incremental_mode = false;

        for clause in std::mem::take(&mut self.staged_incremental_clauses) {
            if solver.add_clause(clause).is_err() {
                // the exclusion empties the search space; the next solve
                // reports infeasibility
                break;
            }
        }

        accepted
    }

    fn assigned_literals(&self) -> Vec<Literal> {
        (0..self.truth_store.num_variables())
            .filter_map(|index| {
                let variable = Variable::new(index as u32);
                match self.truth_store.value(variable) {
                    TruthValue::True => Some(Literal::new(variable, true)),
                    TruthValue::False => Some(Literal::new(variable, false)),
                    TruthValue::Unknown => None,
                }
            })
            .collect()
    }

    pub fn log_statistics(&self) {
        self.counters.log_statistics();
        log_statistic("modelsFound", self.num_models);
        log_statistic("cubesEmitted", self.cube_emitter.num_cubes_emitted());
        self.lookahead.log_statistics();
    }
}

impl ExternalPropagator for GraphPropagator {
    fn name(&self) -> &str {
        "graph"
    }

    fn notify_assignments(&mut self, literals: &[Literal]) {
        for literal in literals {
            let variable = literal.get_variable();
            if variable.index() >= self.truth_store.num_variables() {
                continue;
            }
            self.trail_changed = true;
            self.truth_store.assign(*literal);
            self.trail.record(variable);
        }
    }

    fn notify_new_decision_level(&mut self) {
        self.trail.push_level();
    }

    fn notify_backtrack(&mut self, new_level: usize) {
        let GraphPropagator {
            trail, truth_store, ..
        } = self;
        trail.backtrack(new_level, |variable| truth_store.unassign(variable));
        self.lookahead.reset();
    }

    fn notify_fixed_assignment(&mut self, literal: Literal) {
        if literal.get_variable().index() < self.truth_store.num_variables() {
            self.truth_store.mark_fixed(literal);
        }
    }

    fn check_found_model(&mut self, model: &[Literal]) -> bool {
        // never accept while an excluding clause is still queued
        if !self.clause_buffer.is_empty() {
            return false;
        }
        if self.config.check_solution_in_prop {
            self.check_current_graph(model)
        } else {
            true
        }
    }

    fn has_external_clause(&mut self) -> Option<bool> {
        if self.clause_buffer.is_empty() && self.trail_changed && !self.config.propagate_literals
        {
            self.trail_changed = false;
            self.run_checks();
        }
        self.clause_buffer.peek_forgettable()
    }

    fn add_external_clause_literal(&mut self) -> Option<Literal> {
        self.clause_buffer.next_literal()
    }

    fn decide(&mut self, probe: &mut Probe<'_>) -> Option<Literal> {
        if !self.lookahead.is_enabled() {
            return None;
        }
        self.lookahead.decide(probe, &self.encoding)
    }

    fn propagate(&mut self) -> Option<Literal> {
        if !self.config.propagate_literals {
            return None;
        }

        if self.trail_changed {
            self.trail_changed = false;
            self.run_checks();
        }

        let literals = self.clause_buffer.peek_literals()?;
        let mut num_unknown = 0;
        let mut unassigned = None;
        for literal in literals {
            if self.truth_store.is_literal_satisfied(*literal) {
                // already satisfied; the clause is surfaced as a clause
                return None;
            }
            if !self.truth_store.value(literal.get_variable()).is_known() {
                num_unknown += 1;
                unassigned = Some(*literal);
            }
        }

        if num_unknown == 1 {
            let literal = unassigned.unwrap();
            let clause = self.clause_buffer.pop().unwrap();
            self.reason_index.store(literal, clause.literals);
            return Some(literal);
        }

        None
    }

    fn add_reason_clause_literal(&mut self, propagated: Literal) -> Option<Literal> {
        self.reason_index.next_literal(propagated)
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct PropagatorCounters {
    calls_propagator: u64,
    calls_check: u64,
    clauses_added: u64,
    time_in_propagator: Duration,
    time_checking_full_graphs: Duration,
}

impl PropagatorCounters {
    fn log_statistics(&self) {
        log_statistic("propagatorCalls", self.calls_propagator);
        log_statistic("fullGraphChecks", self.calls_check);
        log_statistic("propagatorClauses", self.clauses_added);
        log_statistic(
            "timeInPropagatorInMilliseconds",
            self.time_in_propagator.as_millis(),
        );
        log_statistic(
            "timeCheckingFullGraphsInMilliseconds",
            self.time_checking_full_graphs.as_millis(),
        );
    }
}
