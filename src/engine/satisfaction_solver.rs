//! Houses the solver which drives the CDCL search and consults the connected
//! external propagator on every relevant state change.

use std::io::Write;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::conflict_analysis::ConflictAnalysisContext;
use super::conflict_analysis::ResolutionConflictAnalyser;
use super::propagation::ExternalPropagator;
use super::propagation::Probe;
use super::sat::calculate_lbd;
use super::sat::Assignments;
use super::sat::ClausalPropagator;
use super::sat::ClauseAllocator;
use super::sat::ExplanationClauseManager;
use super::termination::TerminationCondition;
use super::variables::Literal;
use super::variables::Variable;
use crate::basic_types::ClauseReference;
use crate::basic_types::ConflictInfo;
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::ConstraintReference;
use crate::basic_types::SolverExecutionFlag;
use crate::basic_types::TruthValue;
use crate::branching::Brancher;
use crate::branching::SelectionContext;
use crate::statistics::log_statistic;
use crate::symsat_assert_moderate;
use crate::symsat_assert_simple;

/// Options which determine how the [`SatisfactionSolver`] behaves.
#[derive(Debug)]
pub struct SatisfactionSolverOptions {
    /// A random generator which is used by the solver, passing it as an
    /// argument allows seeding of the randomization.
    pub random_generator: SmallRng,
    /// Learned clauses are reduced every this many conflicts.
    pub conflicts_between_reductions: u64,
    /// Learned clauses with an LBD above this survive a reduction.
    pub lbd_threshold: u32,
}

impl Default for SatisfactionSolverOptions {
    fn default() -> Self {
        SatisfactionSolverOptions {
            random_generator: SmallRng::seed_from_u64(42),
            conflicts_between_reductions: 2000,
            lbd_threshold: 6,
        }
    }
}

/// A CDCL solver over propositional clauses which treats a connected
/// [`ExternalPropagator`] as a theory: the propagator is notified of every
/// assignment, decision level and backtrack, may force assignments, inject
/// clauses, override decisions, and veto models.
///
/// The solver owns the master trail and the clause database; clause learning
/// uses 1UIP resolution. Clauses handed in by the propagator are either
/// permanent or forgettable; only forgettable (and learned) clauses are
/// candidates for clause-database reduction.
pub struct SatisfactionSolver {
    /// The solver continuously changes states during the search.
    /// The state helps track additional information and contributes to making
    /// the code clearer.
    state: SolverState,
    /// Tracks information related to the assignments of variables.
    assignments: Assignments,
    /// Responsible for clausal propagation based on the two-watched scheme.
    clausal_propagator: ClausalPropagator,
    /// Tracks information about all allocated clauses. All clause allocation
    /// goes exclusively through the clause allocator.
    clause_allocator: ClauseAllocator,
    /// Holds the assumptions when the solver is queried to solve under
    /// assumptions.
    assumptions: Vec<Literal>,
    /// Computes the learned clause after a conflict.
    conflict_analyser: ResolutionConflictAnalyser,
    /// Holds reason clauses streamed from the external propagator for the
    /// duration of one conflict analysis.
    explanation_clause_manager: ExplanationClauseManager,
    /// The next trail entry the external propagator has not been told about.
    notified_trail_index: usize,
    /// A set of counters updated during the search.
    counters: Counters,
    /// Miscellaneous constant parameters used by the solver.
    internal_parameters: SatisfactionSolverOptions,
}

impl Default for SatisfactionSolver {
    fn default() -> Self {
        SatisfactionSolver::new(SatisfactionSolverOptions::default())
    }
}

impl std::fmt::Debug for SatisfactionSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SatisfactionSolver")
            .field("state", &self.state)
            .field("num_variables", &self.assignments.num_variables())
            .field("counters", &self.counters)
            .finish()
    }
}

// methods that offer basic functionality
impl SatisfactionSolver {
    pub fn new(solver_options: SatisfactionSolverOptions) -> Self {
        SatisfactionSolver {
            state: SolverState::default(),
            assignments: Assignments::default(),
            clausal_propagator: ClausalPropagator::default(),
            clause_allocator: ClauseAllocator::default(),
            assumptions: Vec::default(),
            conflict_analyser: ResolutionConflictAnalyser::default(),
            explanation_clause_manager: ExplanationClauseManager::default(),
            notified_trail_index: 0,
            counters: Counters::default(),
            internal_parameters: solver_options,
        }
    }

    pub fn create_new_variable(&mut self) -> Variable {
        let variable = self.assignments.grow();
        self.clausal_propagator.grow();
        variable
    }

    /// Grow the solver to `num_variables` variables.
    pub fn ensure_variables(&mut self, num_variables: usize) {
        while self.assignments.num_variables() < num_variables {
            let _ = self.create_new_variable();
        }
    }

    pub fn num_variables(&self) -> usize {
        self.assignments.num_variables()
    }

    pub fn literal_value(&self, literal: Literal) -> TruthValue {
        match self.assignments.truth_value(literal.get_variable()) {
            TruthValue::Unknown => TruthValue::Unknown,
            value if literal.is_positive() => value,
            value => !value,
        }
    }

    pub fn get_decision_level(&self) -> usize {
        self.assignments.get_decision_level()
    }

    pub fn is_infeasible(&self) -> bool {
        self.state.is_infeasible()
    }

    pub fn is_infeasible_under_assumptions(&self) -> bool {
        self.state.is_infeasible_under_assumptions()
    }

    /// The model of the last feasible search: one literal per variable with
    /// its assigned polarity.
    pub fn extract_model(&self) -> Vec<Literal> {
        symsat_assert_simple!(self.state.has_solution());
        self.assignments.extract_model()
    }

    pub fn log_statistics(&self) {
        self.counters.log_statistics()
    }

    pub fn restore_state_at_root(
        &mut self,
        brancher: &mut impl Brancher,
        propagator: &mut dyn ExternalPropagator,
    ) {
        if !self.assignments.is_at_the_root_level() {
            self.backtrack(0, brancher, propagator);
            self.state.declare_ready();
        } else if self.state.has_solution()
            || self.state.timeout()
            || self.state.is_infeasible_under_assumptions()
        {
            self.state.declare_ready();
        }
    }

    /// Creates a clause from `literals` and adds it to the current formula.
    ///
    /// If the formula becomes trivially unsatisfiable, a
    /// [`ConstraintOperationError`] will be returned. Subsequent calls to this
    /// method will always return an error, and no modification of the solver
    /// will take place.
    pub fn add_clause(
        &mut self,
        literals: impl IntoIterator<Item = Literal>,
    ) -> Result<(), ConstraintOperationError> {
        symsat_assert_simple!(self.assignments.is_at_the_root_level());

        if self.state.is_infeasible() {
            return Err(ConstraintOperationError::InfeasibleState);
        }

        let literals: Vec<Literal> = literals.into_iter().collect();

        let result = self.clausal_propagator.add_permanent_clause(
            literals,
            &mut self.assignments,
            &mut self.clause_allocator,
        );

        if result.is_err() {
            self.state.declare_infeasible();
            return Err(ConstraintOperationError::InfeasibleClause);
        }

        if self
            .clausal_propagator
            .propagate(&mut self.assignments, &mut self.clause_allocator)
            .is_err()
        {
            self.state.declare_infeasible();
            return Err(ConstraintOperationError::InfeasibleClause);
        }

        Ok(())
    }
}

// methods that serve as the main building blocks of the search
impl SatisfactionSolver {
    pub fn solve(
        &mut self,
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
        propagator: &mut dyn ExternalPropagator,
    ) -> SolverExecutionFlag {
        let dummy_assumptions: Vec<Literal> = vec![];
        self.solve_under_assumptions(&dummy_assumptions, termination, brancher, propagator)
    }

    pub fn solve_under_assumptions(
        &mut self,
        assumptions: &[Literal],
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
        propagator: &mut dyn ExternalPropagator,
    ) -> SolverExecutionFlag {
        if self.state.is_infeasible() {
            return SolverExecutionFlag::Infeasible;
        }

        let start_time = Instant::now();

        self.restore_state_at_root(brancher, propagator);
        self.state.declare_solving();
        assumptions.clone_into(&mut self.assumptions);

        let result = self.solve_internal(termination, brancher, propagator);

        self.counters.time_spent_in_solver += start_time.elapsed().as_millis() as u64;

        result
    }

    fn solve_internal(
        &mut self,
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
        propagator: &mut dyn ExternalPropagator,
    ) -> SolverExecutionFlag {
        loop {
            if termination.should_stop() {
                self.state.declare_timeout();
                return SolverExecutionFlag::Timeout;
            }

            self.propagate_enqueued(brancher, propagator);

            if self.state.is_infeasible() {
                return SolverExecutionFlag::Infeasible;
            }

            if self.state.no_conflict() {
                self.declare_new_decision_level(propagator);

                let branching_result = self.enqueue_next_decision(brancher, propagator);
                if let Err(flag) = branching_result {
                    return flag;
                }
            } else {
                if !self.resolve_conflict(brancher, propagator) {
                    self.state.declare_infeasible();
                    return SolverExecutionFlag::Infeasible;
                }

                brancher.on_conflict();
            }
        }
    }

    fn declare_new_decision_level(&mut self, propagator: &mut dyn ExternalPropagator) {
        self.notify_propagator_of_new_assignments(propagator);
        self.assignments.increase_decision_level();
        propagator.notify_new_decision_level();
    }

    fn enqueue_next_decision(
        &mut self,
        brancher: &mut impl Brancher,
        propagator: &mut dyn ExternalPropagator,
    ) -> Result<(), SolverExecutionFlag> {
        if let Some(assumption_literal) = self.peek_next_assumption_literal() {
            let success = self.enqueue_assumption_literal(assumption_literal);
            if !success {
                return Err(SolverExecutionFlag::Infeasible);
            }
            return Ok(());
        }

        let external_decision = {
            let mut probe = Probe::new(
                &mut self.assignments,
                &mut self.clausal_propagator,
                &mut self.clause_allocator,
            );
            propagator.decide(&mut probe)
        };
        if let Some(decision) = external_decision {
            symsat_assert_moderate!(self.assignments.is_literal_unassigned(decision));
            self.counters.num_decisions += 1;
            self.assignments.enqueue_decision_literal(decision);
            return Ok(());
        }

        let decision = brancher.next_decision(&mut SelectionContext::new(
            &self.assignments,
            &mut self.internal_parameters.random_generator,
        ));

        match decision {
            Some(literal) => {
                self.counters.num_decisions += 1;
                self.assignments.enqueue_decision_literal(literal);
                Ok(())
            }
            None => {
                // every variable is assigned; the clause database is satisfied
                // unless the external propagator vetoes the model
                let model = self.assignments.extract_model();
                if propagator.check_found_model(&model) {
                    self.state.declare_solution_found();
                    Err(SolverExecutionFlag::Feasible)
                } else {
                    // the propagator has pending clauses excluding this model;
                    // the next propagation round picks them up
                    Ok(())
                }
            }
        }
    }

    /// Returns true if the assumption was successfully enqueued, and false
    /// otherwise
    fn enqueue_assumption_literal(&mut self, assumption_literal: Literal) -> bool {
        // Case 1: the assumption is unassigned, assign it
        if self.assignments.is_literal_unassigned(assumption_literal) {
            self.assignments
                .enqueue_decision_literal(assumption_literal);
            true
        // Case 2: the assumption has already been set to true
        //  this happens when other assumptions propagated the literal
        //  or the assumption is already set to true at the root level
        } else if self.assignments.is_literal_assigned_true(assumption_literal) {
            // in this case, do nothing
            //  note that the solver will then increase the decision level
            // without enqueuing a decision literal  this is necessary because
            // by convention the solver will try to assign the i-th assumption
            // literal at decision level i+1
            true
        }
        // Case 3: the assumption literal is in conflict with the input
        // assumptions, which means the instance is infeasible under the
        // current assumptions
        else {
            self.state
                .declare_infeasible_under_assumptions(assumption_literal);
            false
        }
    }

    fn are_all_assumptions_assigned(&self) -> bool {
        self.assignments.get_decision_level() > self.assumptions.len()
    }

    fn peek_next_assumption_literal(&self) -> Option<Literal> {
        if self.are_all_assumptions_assigned() {
            None
        } else {
            // the convention is that at decision level i, the (i-1)th
            // assumption is set; note that the decision level is increased
            // before branching, hence the minus one
            Some(self.assumptions[self.assignments.get_decision_level() - 1])
        }
    }

    /// Main propagation loop: clausal propagation to fixed point, then the
    /// external propagator is consulted for forced literals and clauses, until
    /// neither has anything left or a conflict arises.
    fn propagate_enqueued(
        &mut self,
        brancher: &mut impl Brancher,
        propagator: &mut dyn ExternalPropagator,
    ) {
        let num_assigned_variables_old = self.assignments.num_trail_entries();

        loop {
            let propagation_status = self
                .clausal_propagator
                .propagate(&mut self.assignments, &mut self.clause_allocator);

            // assignments are announced before any callback can observe them,
            // and in particular before any conflict is resolved
            self.notify_propagator_of_new_assignments(propagator);

            if let Err(conflict_info) = propagation_status {
                self.state.declare_conflict(conflict_info);
                break;
            }

            if let Some(literal) = propagator.propagate() {
                if self.assignments.is_literal_assigned_true(literal) {
                    continue;
                }
                if !self
                    .assignments
                    .enqueue_propagated_literal(literal, ConstraintReference::external_propagation())
                {
                    // the propagation is already falsified; its reason clause
                    // is the conflicting clause
                    let conflicting_clause = self.materialise_external_reason(literal, propagator);
                    self.state.declare_conflict(ConflictInfo {
                        conflicting_clause,
                    });
                    break;
                }
                continue;
            }

            if let Some(is_forgettable) = propagator.has_external_clause() {
                let mut literals = Vec::new();
                while let Some(literal) = propagator.add_external_clause_literal() {
                    literals.push(literal);
                }
                // the buffer streams in reverse order
                literals.reverse();

                self.counters.num_external_clauses += 1;
                self.ingest_external_clause(literals, is_forgettable, brancher, propagator);
                if self.state.no_conflict() && !self.state.is_infeasible() {
                    continue;
                }
                break;
            }

            break;
        }

        self.counters.num_propagations +=
            (self.assignments.num_trail_entries() - num_assigned_variables_old) as u64;
    }

    /// Hand an externally produced clause to the clause database. The clause
    /// may be in any state with respect to the current assignment: satisfied,
    /// unresolved, unit, or falsified. A falsified clause forces a backjump to
    /// the highest decision level among its literals and then becomes the
    /// conflicting clause.
    fn ingest_external_clause(
        &mut self,
        literals: Vec<Literal>,
        is_forgettable: bool,
        brancher: &mut impl Brancher,
        propagator: &mut dyn ExternalPropagator,
    ) {
        if literals.is_empty() {
            self.state.declare_infeasible();
            return;
        }

        if literals.len() == 1 {
            // a unit clause is a permanent fact; it lives on the trail rather
            // than in the clause database
            let literal = literals[0];
            if self.assignments.get_decision_level() > 0 {
                self.backtrack(0, brancher, propagator);
            }
            if self.assignments.is_literal_assigned_false(literal) {
                self.state.declare_infeasible();
            } else if self.assignments.is_literal_unassigned(literal) {
                self.assignments.enqueue_decision_literal(literal);
            }
            return;
        }

        // watched literals must be the two literals that became false last,
        // so non-false literals come first and false literals are ordered by
        // decreasing decision level
        let mut literals = literals;
        literals.sort_by_key(|literal| {
            if self.assignments.is_literal_assigned_false(*literal) {
                usize::MAX
                    - self
                        .assignments
                        .get_variable_decision_level(literal.get_variable())
            } else {
                0
            }
        });

        let num_non_false = literals
            .iter()
            .filter(|literal| !self.assignments.is_literal_assigned_false(**literal))
            .count();

        if num_non_false == 0 {
            let conflict_level = self
                .assignments
                .get_variable_decision_level(literals[0].get_variable());
            if conflict_level == 0 {
                self.state.declare_infeasible();
                return;
            }
            if conflict_level < self.assignments.get_decision_level() {
                self.backtrack(conflict_level, brancher, propagator);
            }
            let reference = self.clausal_propagator.add_clause_unchecked(
                literals,
                is_forgettable,
                &mut self.clause_allocator,
            );
            self.state.declare_conflict(ConflictInfo {
                conflicting_clause: reference,
            });
            return;
        }

        let propagated = (num_non_false == 1
            && self.assignments.is_literal_unassigned(literals[0]))
        .then(|| literals[0]);

        let reference = self.clausal_propagator.add_clause_unchecked(
            literals,
            is_forgettable,
            &mut self.clause_allocator,
        );

        if let Some(literal) = propagated {
            let enqueued = self
                .assignments
                .enqueue_propagated_literal(literal, ConstraintReference::from_clause(reference));
            symsat_assert_moderate!(enqueued);
        }
    }

    /// Announce all trail entries the propagator has not seen yet, root-level
    /// entries additionally as fixed assignments.
    fn notify_propagator_of_new_assignments(&mut self, propagator: &mut dyn ExternalPropagator) {
        if self.notified_trail_index == self.assignments.num_trail_entries() {
            return;
        }

        let new_literals: Vec<Literal> = (self.notified_trail_index
            ..self.assignments.num_trail_entries())
            .map(|index| self.assignments.get_trail_entry(index).literal)
            .collect();
        self.notified_trail_index = self.assignments.num_trail_entries();

        propagator.notify_assignments(&new_literals);
        for literal in new_literals {
            if self
                .assignments
                .get_variable_decision_level(literal.get_variable())
                == 0
            {
                propagator.notify_fixed_assignment(literal);
            }
        }
    }

    /// Resolve the current conflict by learning a 1UIP clause and backjumping.
    /// Returns false when the conflict proves infeasibility.
    fn resolve_conflict(
        &mut self,
        brancher: &mut impl Brancher,
        propagator: &mut dyn ExternalPropagator,
    ) -> bool {
        symsat_assert_moderate!(self.state.conflicting());
        self.counters.num_conflicts += 1;

        let conflict_info = self.state.get_conflict_info();

        // the conflicting clause may live entirely below the current decision
        // level (external clauses can do that); analysis requires the solver
        // to be at the level of the conflict
        let conflict_level = self
            .clause_allocator
            .get_clause(conflict_info.conflicting_clause)
            .get_literal_slice()
            .iter()
            .map(|literal| {
                self.assignments
                    .get_variable_decision_level(literal.get_variable())
            })
            .max()
            .unwrap_or(0);

        if conflict_level == 0 {
            return false;
        }
        if conflict_level < self.assignments.get_decision_level() {
            self.backtrack(conflict_level, brancher, propagator);
        }

        let mut context = ConflictAnalysisContext {
            assignments: &self.assignments,
            clause_allocator: &mut self.clause_allocator,
            explanation_clause_manager: &mut self.explanation_clause_manager,
            external_propagator: &mut *propagator,
            brancher: &mut *brancher,
        };
        let analysis_result = self.conflict_analyser.compute_1uip(conflict_info, &mut context);

        self.explanation_clause_manager
            .clean_up_explanation_clauses(&mut self.clause_allocator);

        self.counters
            .average_learned_clause_length
            .add_term(analysis_result.learned_literals.len() as u64);
        self.counters.average_backtrack_amount.add_term(
            (self.assignments.get_decision_level() - analysis_result.backjump_level) as u64,
        );

        self.backtrack(analysis_result.backjump_level, brancher, propagator);

        if analysis_result.learned_literals.len() == 1 {
            self.counters.num_unit_clauses_learned += 1;
            self.assignments
                .enqueue_decision_literal(analysis_result.learned_literals[0]);
        } else {
            let lbd = calculate_lbd(&analysis_result.learned_literals, &self.assignments);
            let reference = self.clausal_propagator.add_asserting_learned_clause(
                analysis_result.learned_literals,
                &mut self.assignments,
                &mut self.clause_allocator,
            );
            self.clause_allocator.get_clause_mut(reference).update_lbd(lbd);
            self.counters.num_learned_clauses += 1;
        }

        if self.counters.num_conflicts % self.internal_parameters.conflicts_between_reductions == 0
        {
            self.reduce_learned_clauses();
        }

        self.state.declare_solving();
        true
    }

    /// Remove unhelpful learned clauses from the database. A clause survives
    /// if it is permanent, currently acts as a reason on the trail, or has a
    /// low LBD.
    fn reduce_learned_clauses(&mut self) {
        let lbd_threshold = self.internal_parameters.lbd_threshold;
        let mut to_delete = Vec::new();

        for (reference, clause) in self.clause_allocator.live_clauses() {
            if !clause.is_learned() || clause.lbd() <= lbd_threshold {
                continue;
            }

            let first = clause.get_literal_slice()[0];
            let is_locked = self.assignments.is_literal_assigned_true(first)
                && self.assignments.get_reason(first.get_variable())
                    == Some(ConstraintReference::from_clause(reference));
            if !is_locked {
                to_delete.push(reference);
            }
        }

        for reference in to_delete {
            self.clause_allocator.delete_clause(reference);
        }
    }

    fn materialise_external_reason(
        &mut self,
        literal: Literal,
        propagator: &mut dyn ExternalPropagator,
    ) -> ClauseReference {
        let mut reason_literals = Vec::new();
        while let Some(reason_literal) = propagator.add_reason_clause_literal(literal) {
            reason_literals.push(reason_literal);
        }
        self.explanation_clause_manager
            .add_explanation_clause_unchecked(reason_literals, &mut self.clause_allocator)
    }

    fn backtrack(
        &mut self,
        backtrack_level: usize,
        brancher: &mut impl Brancher,
        propagator: &mut dyn ExternalPropagator,
    ) {
        symsat_assert_simple!(backtrack_level < self.assignments.get_decision_level());

        // everything assigned so far must have been announced before the
        // backtrack crosses it
        self.notify_propagator_of_new_assignments(propagator);

        let unassigned_literals = self.assignments.synchronise(backtrack_level);
        for literal in unassigned_literals {
            brancher.on_unassign_literal(literal);
        }

        self.clausal_propagator
            .synchronise(self.assignments.num_trail_entries());
        self.notified_trail_index = self
            .notified_trail_index
            .min(self.assignments.num_trail_entries());

        propagator.notify_backtrack(backtrack_level);
    }
}

// methods for writing the clause database out
impl SatisfactionSolver {
    /// Write the current formula in DIMACS format: root-level facts as unit
    /// clauses, all permanent clauses, and learned clauses of length at most
    /// `max_learned_size`.
    pub fn write_dimacs(
        &self,
        writer: &mut impl Write,
        max_learned_size: usize,
    ) -> std::io::Result<()> {
        let included: Vec<&[Literal]> = self
            .clause_allocator
            .live_clauses()
            .filter(|(_, clause)| {
                !clause.is_learned() || clause.len() <= max_learned_size
            })
            .map(|(_, clause)| clause.get_literal_slice())
            .collect();

        let num_units = self.assignments.root_assignments().count();
        writeln!(
            writer,
            "p cnf {} {}",
            self.assignments.num_variables(),
            included.len() + num_units
        )?;

        for literal in self.assignments.root_assignments() {
            writeln!(writer, "{} 0", literal.to_dimacs())?;
        }
        for clause in included {
            writeln!(writer, "{}", crate::basic_types::format_clause(clause))?;
        }
        Ok(())
    }

    /// Write the clauses learned so far: root-level facts plus short learned
    /// clauses.
    pub fn write_learned_clauses(&self, writer: &mut impl Write) -> std::io::Result<()> {
        const MAX_LEARNED_CLAUSE_SIZE: usize = 5;

        for literal in self.assignments.root_assignments() {
            writeln!(writer, "{} 0", literal.to_dimacs())?;
        }
        for (_, clause) in self.clause_allocator.live_clauses() {
            if clause.is_learned() && clause.len() <= MAX_LEARNED_CLAUSE_SIZE {
                writeln!(
                    writer,
                    "{}",
                    crate::basic_types::format_clause(clause.get_literal_slice())
                )?;
            }
        }
        Ok(())
    }
}

#[derive(Default, Debug, Copy, Clone)]
struct CumulativeMovingAverage {
    sum: u64,
    num_terms: u64,
}

impl CumulativeMovingAverage {
    fn add_term(&mut self, new_term: u64) {
        self.sum += new_term;
        self.num_terms += 1
    }

    fn value(&self) -> f64 {
        if self.num_terms > 0 {
            (self.sum as f64) / (self.num_terms as f64)
        } else {
            0.0
        }
    }
}

/// Structure responsible for storing several statistics of the solving process
/// of the [`SatisfactionSolver`].
#[derive(Default, Debug, Copy, Clone)]
struct Counters {
    num_decisions: u64,
    num_conflicts: u64,
    num_propagations: u64,
    num_learned_clauses: u64,
    num_unit_clauses_learned: u64,
    num_external_clauses: u64,
    average_learned_clause_length: CumulativeMovingAverage,
    time_spent_in_solver: u64,
    average_backtrack_amount: CumulativeMovingAverage,
}

impl Counters {
    fn log_statistics(&self) {
        log_statistic("numberOfDecisions", self.num_decisions);
        log_statistic("numberOfConflicts", self.num_conflicts);
        log_statistic("numberOfPropagations", self.num_propagations);
        log_statistic("numberOfLearnedClauses", self.num_learned_clauses);
        log_statistic("numberOfLearnedUnitClauses", self.num_unit_clauses_learned);
        log_statistic("numberOfExternalClauses", self.num_external_clauses);
        log_statistic(
            "averageLearnedClauseLength",
            self.average_learned_clause_length.value(),
        );
        log_statistic("timeSpentInSolverInMilliseconds", self.time_spent_in_solver);
        log_statistic(
            "averageBacktrackAmount",
            self.average_backtrack_amount.value(),
        );
    }
}

#[derive(Default, Debug)]
enum SolverStateInternal {
    #[default]
    Ready,
    Solving,
    ContainsSolution,
    Conflict {
        conflict_info: ConflictInfo,
    },
    Infeasible,
    InfeasibleUnderAssumptions {
        #[allow(unused)]
        violated_assumption: Literal,
    },
    Timeout,
}

#[derive(Default, Debug)]
struct SolverState {
    internal_state: SolverStateInternal,
}

impl SolverState {
    fn is_ready(&self) -> bool {
        matches!(self.internal_state, SolverStateInternal::Ready)
    }

    fn no_conflict(&self) -> bool {
        !self.conflicting()
    }

    fn conflicting(&self) -> bool {
        matches!(
            self.internal_state,
            SolverStateInternal::Conflict { conflict_info: _ }
        )
    }

    fn is_infeasible(&self) -> bool {
        matches!(self.internal_state, SolverStateInternal::Infeasible)
    }

    fn is_infeasible_under_assumptions(&self) -> bool {
        matches!(
            self.internal_state,
            SolverStateInternal::InfeasibleUnderAssumptions {
                violated_assumption: _
            }
        )
    }

    fn timeout(&self) -> bool {
        matches!(self.internal_state, SolverStateInternal::Timeout)
    }

    fn has_solution(&self) -> bool {
        matches!(self.internal_state, SolverStateInternal::ContainsSolution)
    }

    fn get_conflict_info(&self) -> ConflictInfo {
        if let SolverStateInternal::Conflict { conflict_info } = &self.internal_state {
            *conflict_info
        } else {
            panic!("Cannot extract conflict info if solver is not in a conflict.");
        }
    }

    fn declare_ready(&mut self) {
        self.internal_state = SolverStateInternal::Ready;
    }

    fn declare_solving(&mut self) {
        symsat_assert_simple!((self.is_ready() || self.conflicting()) && !self.is_infeasible());
        self.internal_state = SolverStateInternal::Solving;
    }

    fn declare_infeasible(&mut self) {
        self.internal_state = SolverStateInternal::Infeasible;
    }

    fn declare_conflict(&mut self, conflict_info: ConflictInfo) {
        symsat_assert_simple!(!self.conflicting());
        self.internal_state = SolverStateInternal::Conflict { conflict_info };
    }

    fn declare_solution_found(&mut self) {
        symsat_assert_simple!(!self.is_infeasible());
        self.internal_state = SolverStateInternal::ContainsSolution;
    }

    fn declare_timeout(&mut self) {
        symsat_assert_simple!(!self.is_infeasible());
        self.internal_state = SolverStateInternal::Timeout;
    }

    fn declare_infeasible_under_assumptions(&mut self, violated_assumption: Literal) {
        symsat_assert_simple!(!self.is_infeasible());
        self.internal_state = SolverStateInternal::InfeasibleUnderAssumptions {
            violated_assumption,
        }
    }
}
