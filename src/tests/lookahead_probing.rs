//! Lookahead decision selection: probing counts, scoring, failed literals,
//! and a full search with lookahead enabled.

use crate::engine::termination::Indefinite;
use crate::engine::test_helper::TestSolver;
use crate::engine::variables::Literal;
use crate::options::LookaheadHeuristic;
use crate::options::SolverConfig;
use crate::propagators::graph::EdgeEncoding;
use crate::propagators::graph::LookaheadDriver;
use crate::results::SatisfactionResult;
use crate::GraphSolver;

#[test]
fn heuristics_score_propagation_counts() {
    assert_eq!(LookaheadHeuristic::Product.score(3, 1), 7);
    assert_eq!(LookaheadHeuristic::Sum.score(3, 1), 4);
    assert_eq!(LookaheadHeuristic::Minimum.score(3, 1), 1);
}

#[test]
fn the_most_propagating_variable_is_selected() {
    let mut solver = TestSolver::with_variables(3);
    // assuming variable 1 cascades into 2 and 3; everything else is inert
    solver.add_clause(&[-1, 2]);
    solver.add_clause(&[-1, 3]);

    let mut driver = LookaheadDriver::new(true, false, LookaheadHeuristic::Product);
    let encoding = EdgeEncoding::new(3, false);

    let decision = driver.decide(&mut solver.probe(), &encoding);
    assert_eq!(decision, Some(Literal::from_dimacs(1)));
}

#[test]
fn ties_break_towards_the_smallest_variable() {
    let solver_vars = 3;
    let mut solver = TestSolver::with_variables(solver_vars);

    let mut driver = LookaheadDriver::new(true, false, LookaheadHeuristic::Product);
    let encoding = EdgeEncoding::new(3, false);

    // no clauses: every candidate scores identically
    let decision = driver.decide(&mut solver.probe(), &encoding);
    assert_eq!(
        decision.map(|literal| literal.get_variable().index()),
        Some(0)
    );
}

#[test]
fn failed_probes_return_the_forced_opposite_literal() {
    let mut solver = TestSolver::with_variables(3);
    solver.add_clause(&[-1, 2]);
    solver.add_clause(&[-1, -2]);

    let mut driver = LookaheadDriver::new(true, false, LookaheadHeuristic::Product);
    let encoding = EdgeEncoding::new(3, false);

    let decision = driver.decide(&mut solver.probe(), &encoding);
    assert_eq!(decision, Some(Literal::from_dimacs(-1)));
}

#[test]
fn assigned_variables_are_not_candidates() {
    let mut solver = TestSolver::with_variables(3);
    solver.set_decision(1);

    let mut driver = LookaheadDriver::new(true, false, LookaheadHeuristic::Product);
    let encoding = EdgeEncoding::new(3, false);

    let decision = driver.decide(&mut solver.probe(), &encoding);
    assert_ne!(
        decision.map(|literal| literal.get_variable().index()),
        Some(0)
    );
}

#[test]
fn probing_retracts_its_assumptions() {
    let mut solver = TestSolver::with_variables(3);
    solver.add_clause(&[-1, 2]);

    {
        let mut probe = solver.probe();
        // the assumption itself plus the propagated variable 2
        assert_eq!(probe.probe(Literal::from_dimacs(1)), Some(2));
    }

    assert_eq!(solver.assignments.num_trail_entries(), 0);
    assert_eq!(solver.assignments.get_decision_level(), 0);
}

#[test]
fn enumeration_with_lookahead_still_visits_every_class() {
    let mut config = SolverConfig::new(3);
    config.frequency = 1;
    config.all_models = true;
    config.hide_graphs = true;
    config.lookahead = true;

    let mut solver = GraphSolver::new(config).unwrap();
    let result = solver.satisfy(&mut Indefinite);

    assert!(matches!(result, SatisfactionResult::Unsatisfiable));
    assert_eq!(solver.num_models(), 4);
}
