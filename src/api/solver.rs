use std::fs::File;
use std::io::BufWriter;

use super::SatisfactionResult;
use super::Solution;
use crate::basic_types::CnfFormula;
use crate::basic_types::SolverExecutionFlag;
use crate::branching::DefaultBrancher;
use crate::branching::IndependentVariableValueBrancher;
use crate::branching::PhaseSaving;
use crate::branching::Vsids;
use crate::engine::termination::TerminationCondition;
use crate::engine::variables::Literal;
use crate::engine::SatisfactionSolver;
use crate::options::SolverConfig;
use crate::propagators::graph::EdgeEncoding;
use crate::propagators::graph::FullyDefinedGraphCheck;
use crate::propagators::graph::PartiallyDefinedGraphCheck;
use crate::propagators::GraphPropagator;

/// The user-facing solver: a [`SatisfactionSolver`] with a connected
/// [`GraphPropagator`] and a default brancher.
///
/// Models rejected by the graph checks never surface; the search continues
/// until a model survives every check, the space is exhausted, or the
/// termination condition fires.
#[derive(Debug)]
pub struct GraphSolver {
    solver: SatisfactionSolver,
    propagator: GraphPropagator,
    brancher: DefaultBrancher,
}

impl GraphSolver {
    pub fn new(config: SolverConfig) -> std::io::Result<GraphSolver> {
        GraphSolver::with_formula(config, &CnfFormula::new())
    }

    /// Build a solver over `cnf`. Variables beyond the formula are created
    /// for the edge encoding when the formula does not mention them all.
    pub fn with_formula(config: SolverConfig, cnf: &CnfFormula) -> std::io::Result<GraphSolver> {
        let num_edge_variables =
            EdgeEncoding::new(config.vertices, config.directed).num_edge_variables();
        let num_variables = cnf.num_variables().max(num_edge_variables);

        let mut solver = SatisfactionSolver::default();
        solver.ensure_variables(num_variables);
        for clause in cnf.clauses() {
            // an inconsistent formula latches the infeasible state; solving
            // will report it
            if solver.add_clause(clause.to_vec()).is_err() {
                break;
            }
        }

        let propagator = GraphPropagator::new(config, num_variables)?;
        let brancher = IndependentVariableValueBrancher::new(
            Vsids::new(num_variables),
            PhaseSaving::new(num_variables),
        );

        Ok(GraphSolver {
            solver,
            propagator,
            brancher,
        })
    }

    pub fn config(&self) -> &SolverConfig {
        self.propagator.config()
    }

    pub fn add_partially_defined_checker(
        &mut self,
        checker: Box<dyn PartiallyDefinedGraphCheck>,
    ) {
        self.propagator.add_partially_defined_checker(checker);
    }

    pub fn add_fully_defined_checker(&mut self, checker: Box<dyn FullyDefinedGraphCheck>) {
        self.propagator.add_fully_defined_checker(checker);
    }

    /// Add a clause to the formula. Returns false when the formula thereby
    /// becomes trivially unsatisfiable.
    pub fn add_clause(&mut self, literals: impl IntoIterator<Item = Literal>) -> bool {
        self.solver.add_clause(literals).is_ok()
    }

    pub fn satisfy(&mut self, termination: &mut impl TerminationCondition) -> SatisfactionResult {
        self.satisfy_under_assumptions(&[], termination)
    }

    pub fn satisfy_under_assumptions(
        &mut self,
        assumptions: &[Literal],
        termination: &mut impl TerminationCondition,
    ) -> SatisfactionResult {
        loop {
            let flag = self.solver.solve_under_assumptions(
                assumptions,
                termination,
                &mut self.brancher,
                &mut self.propagator,
            );

            match flag {
                SolverExecutionFlag::Feasible => {
                    let model = self.solver.extract_model();
                    self.solver
                        .restore_state_at_root(&mut self.brancher, &mut self.propagator);

                    if !self.propagator.verify_solution(&mut self.solver, &model) {
                        continue;
                    }
                    return SatisfactionResult::Satisfiable(Solution::new(model));
                }
                SolverExecutionFlag::Infeasible => return SatisfactionResult::Unsatisfiable,
                SolverExecutionFlag::Timeout => return SatisfactionResult::Unknown,
            }
        }
    }

    /// The edges of the graph a solution encodes.
    pub fn solution_graph(&self, solution: &Solution) -> Vec<(usize, usize)> {
        self.propagator
            .matrix_from_model(solution.literals())
            .present_edges()
    }

    /// Number of models accepted so far (only counted by all-models
    /// enumeration and model checking).
    pub fn num_models(&self) -> u64 {
        self.propagator.num_models()
    }

    pub fn num_cubes_emitted(&self) -> u64 {
        self.propagator.num_cubes_emitted()
    }

    pub fn log_statistics(&self) {
        self.solver.log_statistics();
        self.propagator.log_statistics();
    }

    /// Dump the simplified formula and the learned clauses to the files named
    /// by the configuration, where set.
    pub fn write_configured_dumps(&self) -> std::io::Result<()> {
        let config = self.propagator.config();

        if let Some(path) = &config.simplified_cnf_path {
            let mut writer = BufWriter::new(File::create(path)?);
            self.solver
                .write_dimacs(&mut writer, config.simplified_max_learned_size)?;
        }

        if let Some(path) = &config.learned_clauses_path {
            let mut writer = BufWriter::new(File::create(path)?);
            self.solver.write_learned_clauses(&mut writer)?;
        }

        Ok(())
    }
}
