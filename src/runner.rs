//! The command-line frontend: DIMACS input, the configuration surface, the
//! outer cube/bound loop, and result reporting.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use crate::basic_types::CnfFormula;
use crate::engine::termination::SignalInterrupt;
use crate::engine::termination::TimeBudget;
use crate::engine::variables::Literal;
use crate::io::cube_file::parse_cubes;
use crate::io::dimacs::parse_dimacs;
use crate::io::dimacs::write_model;
use crate::options::AssignmentScoring;
use crate::options::LookaheadHeuristic;
use crate::options::SolverConfig;
use crate::options::DEFAULT_FREQUENCY;
use crate::results::SatisfactionResult;
use crate::statistics;
use crate::GraphSolver;

/// Exit codes in the SAT solver convention.
pub const EXIT_SATISFIABLE: i32 = 10;
pub const EXIT_UNSATISFIABLE: i32 = 20;
pub const EXIT_INDETERMINATE: i32 = 0;

#[derive(Debug, Parser)]
#[command(
    name = "symsat",
    about = "SAT solving over graphs with dynamic symmetry breaking"
)]
pub struct Cli {
    /// The DIMACS CNF instance.
    pub instance: PathBuf,

    /// The number of vertices of the graph encoded by the edge variables.
    /// With 2 vertices the solver behaves as a plain SAT frontend.
    #[arg(short = 'v', long, default_value_t = 2)]
    pub vertices: usize,

    /// Interpret the edge variables as a directed graph.
    #[arg(long)]
    pub directed: bool,

    /// Run the minimality check every N propagation rounds.
    #[arg(long, default_value_t = DEFAULT_FREQUENCY)]
    pub frequency: u64,

    /// Node budget for each run of the permutation search (0 = unlimited).
    #[arg(long, default_value_t = 0)]
    pub cutoff: u64,

    /// Emit a cube once this many edge variables are assigned (0 = off).
    #[arg(long, default_value_t = 0)]
    pub assignment_cutoff: usize,

    /// Number of propagation rounds before cube emission activates.
    #[arg(long, default_value_t = 0)]
    pub assignment_cutoff_prerun: u64,

    /// Seconds of warmup before cube emission activates.
    #[arg(long, default_value_t = 0)]
    pub assignment_cutoff_prerun_time: u64,

    /// How the assignment score is computed.
    #[arg(long, value_enum, default_value_t)]
    pub assignment_scoring: AssignmentScoring,

    /// Pick decisions by probing edge variables.
    #[arg(long)]
    pub lookahead: bool,

    /// Pick decisions by probing all variables.
    #[arg(long)]
    pub lookahead_all: bool,

    /// The scoring function for lookahead probing.
    #[arg(long, value_enum, default_value_t)]
    pub lookahead_heuristic: LookaheadHeuristic,

    /// Verify models inside the propagator; when disabled, models are
    /// verified afterwards through the incremental clause interface.
    #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
    pub check_solution_in_prop: bool,

    /// Force unit consequences of propagator clauses as propagated literals.
    #[arg(long)]
    pub propagate_literals: bool,

    /// Allow clause-database cleanup to drop propagator clauses.
    #[arg(long)]
    pub forgettable_clauses: bool,

    /// Disable symmetry breaking entirely.
    #[arg(long)]
    pub no_symmetry_breaking: bool,

    /// Enumerate all models up to the symmetry breaking instead of stopping
    /// at the first one.
    #[arg(long)]
    pub all_models: bool,

    /// Do not print accepted graphs.
    #[arg(long)]
    pub hide_graphs: bool,

    /// Wall-clock budget in seconds, per cube when cubes are given.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// A file of `a <lits> 0` lines; each line is solved as one assumption
    /// set.
    #[arg(long)]
    pub cube_file: Option<PathBuf>,

    /// First cube index to solve; earlier cubes are blocked.
    #[arg(long, default_value_t = 0)]
    pub from_bound: usize,

    /// Last cube index to solve; later cubes are blocked.
    #[arg(long)]
    pub to_bound: Option<usize>,

    /// Log symmetry-breaking clauses to this file.
    #[arg(long)]
    pub symmetry_clauses_file: Option<PathBuf>,

    /// Log every clause the propagator hands to the solver to this file.
    #[arg(long)]
    pub added_clauses_file: Option<PathBuf>,

    /// Write root-level facts and short learned clauses to this file.
    #[arg(long)]
    pub learned_clauses_file: Option<PathBuf>,

    /// Write the simplified formula to this file after solving.
    #[arg(long)]
    pub simplified_cnf_file: Option<PathBuf>,

    /// Keep learned clauses up to this size in the simplified formula.
    #[arg(long, default_value_t = 0)]
    pub simplified_max_learned_size: usize,

    /// Print solver statistics.
    #[arg(long)]
    pub print_stats: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<(SolverConfig, CliRun)> {
        anyhow::ensure!(self.vertices >= 2, "a graph needs at least two vertices");

        let mut config = SolverConfig::new(self.vertices);
        config.directed = self.directed;
        config.frequency = self.frequency.max(1);
        config.cutoff = self.cutoff;
        config.turn_off_symmetry_breaking |= self.no_symmetry_breaking;
        config.assignment_cutoff = self.assignment_cutoff;
        config.assignment_cutoff_prerun = self.assignment_cutoff_prerun;
        config.assignment_cutoff_prerun_time =
            Duration::from_secs(self.assignment_cutoff_prerun_time);
        config.assignment_scoring = self.assignment_scoring;
        config.lookahead = self.lookahead;
        config.lookahead_all = self.lookahead_all;
        config.lookahead_heuristic = self.lookahead_heuristic;
        config.check_solution_in_prop = self.check_solution_in_prop;
        config.propagate_literals = self.propagate_literals;
        config.forgettable_clauses = self.forgettable_clauses;
        config.all_models = self.all_models;
        config.hide_graphs = self.hide_graphs;
        config.timeout = self.timeout.map(Duration::from_secs);
        config.symmetry_clauses_path = self.symmetry_clauses_file;
        config.added_clauses_path = self.added_clauses_file;
        config.learned_clauses_path = self.learned_clauses_file;
        config.simplified_cnf_path = self.simplified_cnf_file;
        config.simplified_max_learned_size = self.simplified_max_learned_size;

        let run = CliRun {
            instance: self.instance,
            cube_file: self.cube_file,
            from_bound: self.from_bound,
            to_bound: self.to_bound,
            print_stats: self.print_stats,
            all_models: self.all_models,
        };

        Ok((config, run))
    }
}

#[derive(Debug)]
struct CliRun {
    instance: PathBuf,
    cube_file: Option<PathBuf>,
    from_bound: usize,
    to_bound: Option<usize>,
    print_stats: bool,
    all_models: bool,
}

pub(crate) enum SearchOutcome {
    Satisfiable(Option<Vec<Literal>>),
    Unsatisfiable,
    Indeterminate,
}

pub fn run() -> anyhow::Result<i32> {
    env_logger::init();

    let (config, run) = Cli::parse().into_config()?;
    statistics::configure(run.print_stats, "%% ");

    let file = File::open(&run.instance)
        .with_context(|| format!("Error reading {}", run.instance.display()))?;
    let cnf = parse_dimacs(BufReader::new(file))
        .with_context(|| format!("Failed to parse DIMACS from {}", run.instance.display()))?;

    let interrupt_flag = Arc::new(AtomicBool::new(false));
    for signal in [signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM] {
        let _ = signal_hook::flag::register(signal, Arc::clone(&interrupt_flag))
            .context("failed to install signal handler")?;
    }
    let interrupt = SignalInterrupt::new(interrupt_flag);

    let timeout = config.timeout;
    let mut solver = GraphSolver::with_formula(config, &cnf)?;

    let outcome = match &run.cube_file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Error reading {}", path.display()))?;
            let cubes = parse_cubes(BufReader::new(file))
                .with_context(|| format!("Failed to parse cubes from {}", path.display()))?;
            solve_cubes(
                &mut solver,
                &cubes,
                run.from_bound,
                run.to_bound,
                timeout,
                &interrupt,
            )
        }
        None => {
            let mut termination = (
                timeout.map(TimeBudget::starting_now),
                interrupt.clone(),
            );
            match solver.satisfy(&mut termination) {
                SatisfactionResult::Satisfiable(solution) => {
                    SearchOutcome::Satisfiable(Some(solution.literals().to_vec()))
                }
                SatisfactionResult::Unsatisfiable => SearchOutcome::Unsatisfiable,
                SatisfactionResult::Unknown => SearchOutcome::Indeterminate,
            }
        }
    };

    // exhausting the space during enumeration is a success, not an
    // unsatisfiable outcome
    let outcome = match outcome {
        SearchOutcome::Unsatisfiable if run.all_models && solver.num_models() > 0 => {
            println!("solutions found: {}", solver.num_models());
            SearchOutcome::Satisfiable(None)
        }
        other => other,
    };

    if run.print_stats {
        solver.log_statistics();
    }
    solver
        .write_configured_dumps()
        .context("failed to write configured dump files")?;

    let exit_code = match outcome {
        SearchOutcome::Satisfiable(model) => {
            println!("SATISFIABLE");
            if let Some(model) = model {
                write_model(&mut std::io::stdout().lock(), &model)?;
            }
            EXIT_SATISFIABLE
        }
        SearchOutcome::Unsatisfiable => {
            println!("UNSATISFIABLE");
            EXIT_UNSATISFIABLE
        }
        SearchOutcome::Indeterminate => {
            println!("INDETERMINATE");
            EXIT_INDETERMINATE
        }
    };

    Ok(exit_code)
}

/// Two passes over the cube file: first block every out-of-range cube, then
/// solve the selected bounds one by one under their assumptions.
pub(crate) fn solve_cubes(
    solver: &mut GraphSolver,
    cubes: &[Vec<Literal>],
    from_bound: usize,
    to_bound: Option<usize>,
    timeout: Option<Duration>,
    interrupt: &SignalInterrupt,
) -> SearchOutcome {
    let to_bound = to_bound.unwrap_or(cubes.len().saturating_sub(1));

    for (index, cube) in cubes.iter().enumerate() {
        if index < from_bound || index > to_bound {
            let _ = solver.add_clause(cube.iter().map(|literal| !*literal));
        }
    }

    let mut any_indeterminate = false;
    for (index, cube) in cubes.iter().enumerate() {
        if index < from_bound || index > to_bound {
            continue;
        }
        if interrupt.is_raised() {
            any_indeterminate = true;
            break;
        }

        let mut termination = (timeout.map(TimeBudget::starting_now), interrupt.clone());
        match solver.satisfy_under_assumptions(cube, &mut termination) {
            SatisfactionResult::Satisfiable(solution) => {
                return SearchOutcome::Satisfiable(Some(solution.literals().to_vec()));
            }
            SatisfactionResult::Unsatisfiable => {}
            SatisfactionResult::Unknown => {
                log::info!("cube {index} is indeterminate, moving on");
                any_indeterminate = true;
            }
        }
    }

    if any_indeterminate {
        SearchOutcome::Indeterminate
    } else {
        SearchOutcome::Unsatisfiable
    }
}
