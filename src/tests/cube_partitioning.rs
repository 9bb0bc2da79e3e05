//! Cube emission end-to-end and the assumption-driven outer bound loop.

use std::time::Duration;

use super::helpers::lits;
use crate::basic_types::CnfFormula;
use crate::engine::termination::Indefinite;
use crate::options::SolverConfig;
use crate::results::SatisfactionResult;
use crate::runner::solve_cubes;
use crate::GraphSolver;
use crate::Literal;

#[test]
fn cube_emission_partitions_and_exhausts_the_search_space() {
    let mut config = SolverConfig::new(5);
    config.turn_off_symmetry_breaking = true;
    config.assignment_cutoff = 3;
    config.hide_graphs = true;

    let mut solver = GraphSolver::new(config).unwrap();
    let result = solver.satisfy(&mut Indefinite);

    // every branch is cut off and blocked before a model can complete, so
    // the emitted cubes cover the entire space
    assert!(matches!(result, SatisfactionResult::Unsatisfiable));
    assert!(solver.num_cubes_emitted() > 0);
    assert_eq!(solver.num_models(), 0);
}

#[test]
fn an_assignment_cutoff_of_zero_disables_cube_emission() {
    let mut config = SolverConfig::new(3);
    config.hide_graphs = true;

    let mut solver = GraphSolver::new(config).unwrap();
    let result = solver.satisfy(&mut Indefinite);

    assert!(matches!(result, SatisfactionResult::Satisfiable(_)));
    assert_eq!(solver.num_cubes_emitted(), 0);
}

#[test]
fn prerun_suppresses_cube_emission() {
    let mut config = SolverConfig::new(3);
    config.turn_off_symmetry_breaking = true;
    config.assignment_cutoff = 1;
    config.assignment_cutoff_prerun = u64::MAX;
    config.hide_graphs = true;

    let mut solver = GraphSolver::new(config).unwrap();
    let result = solver.satisfy(&mut Indefinite);

    assert!(matches!(result, SatisfactionResult::Satisfiable(_)));
    assert_eq!(solver.num_cubes_emitted(), 0);
}

#[test]
fn bounds_select_which_cubes_are_solved_and_block_the_rest() {
    // ten single-literal cubes over auxiliary variables; cube 3 is
    // unsatisfiable, so the loop moves on to cube 4
    let mut cnf = CnfFormula::new();
    cnf.ensure_variables(11);
    cnf.add_clause(lits(&[-5]));

    let cubes: Vec<Vec<Literal>> = (2..=11).map(|v| lits(&[v])).collect();

    let config = SolverConfig::new(2);
    let mut solver = GraphSolver::with_formula(config, &cnf).unwrap();

    let outcome = solve_cubes(
        &mut solver,
        &cubes,
        3,
        Some(5),
        Some(Duration::from_secs(60)),
        &crate::engine::termination::SignalInterrupt::new(std::sync::Arc::new(
            std::sync::atomic::AtomicBool::new(false),
        )),
    );

    // cube 3 assumes variable 5, which the formula forbids; cube 4 assumes
    // variable 6 and succeeds
    let crate::runner::SearchOutcome::Satisfiable(Some(model)) = outcome else {
        panic!("cube 4 is satisfiable");
    };
    assert!(model.contains(&Literal::from_dimacs(6)));

    // out-of-range cubes had their negations added as permanent clauses
    for blocked in [2, 3, 4, 8, 9, 10, 11] {
        assert!(model.contains(&Literal::from_dimacs(-blocked)));
    }
}
