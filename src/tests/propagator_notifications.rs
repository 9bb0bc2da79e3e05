//! The notification surface of the graph propagator: truth store, trail and
//! reason bookkeeping under scripted callback sequences.

use super::helpers::graph_propagator;
use super::helpers::lits;
use crate::basic_types::TruthValue;
use crate::engine::propagation::ExternalPropagator;
use crate::engine::variables::Literal;
use crate::engine::variables::Variable;
use crate::options::SolverConfig;

fn plain_config() -> SolverConfig {
    // two vertices: no symmetry breaking, no graph reasoning in the way
    SolverConfig::new(2)
}

#[test]
fn backtracking_unassigns_levels_above_the_target() {
    let mut propagator = graph_propagator(plain_config(), 4);

    propagator.notify_new_decision_level();
    propagator.notify_assignments(&lits(&[1, 2]));
    propagator.notify_new_decision_level();
    propagator.notify_assignments(&lits(&[3]));
    propagator.notify_backtrack(1);

    let store = propagator.truth_store();
    assert_eq!(store.value(Variable::new(0)), TruthValue::True);
    assert_eq!(store.value(Variable::new(1)), TruthValue::True);
    assert_eq!(store.value(Variable::new(2)), TruthValue::Unknown);
    assert_eq!(propagator.trail().num_levels(), 2);
}

#[test]
fn trail_levels_sum_to_the_number_of_assigned_variables() {
    let mut propagator = graph_propagator(plain_config(), 6);

    propagator.notify_new_decision_level();
    propagator.notify_assignments(&lits(&[1, -2]));
    propagator.notify_new_decision_level();
    propagator.notify_assignments(&lits(&[3, 4, -5]));

    assert_eq!(propagator.trail().num_assigned(), 5);
    propagator.notify_backtrack(1);
    assert_eq!(propagator.trail().num_assigned(), 2);
}

#[test]
fn backtracking_to_the_root_restores_the_initial_state_modulo_fixed() {
    let mut propagator = graph_propagator(plain_config(), 4);

    propagator.notify_assignments(&lits(&[-4]));
    propagator.notify_fixed_assignment(Literal::from_dimacs(-4));

    propagator.notify_new_decision_level();
    propagator.notify_assignments(&lits(&[1]));
    propagator.notify_new_decision_level();
    propagator.notify_assignments(&lits(&[2, -3]));
    propagator.notify_backtrack(0);

    let store = propagator.truth_store();
    for index in 0..3 {
        assert_eq!(store.value(Variable::new(index)), TruthValue::Unknown);
    }
    // the fixed assignment survives every backtrack
    assert_eq!(store.value(Variable::new(3)), TruthValue::False);
    assert_eq!(propagator.trail().num_levels(), 1);
}

#[test]
fn fixed_variables_never_revert_to_unknown() {
    let mut propagator = graph_propagator(plain_config(), 2);

    propagator.notify_new_decision_level();
    propagator.notify_assignments(&lits(&[1]));
    propagator.notify_fixed_assignment(Literal::from_dimacs(1));
    propagator.notify_backtrack(0);

    assert_eq!(
        propagator.truth_store().value(Variable::new(0)),
        TruthValue::True
    );
    assert!(propagator.truth_store().is_fixed(Variable::new(0)));
}

#[test]
fn forced_literals_stream_their_reason_in_reverse() {
    let mut config = plain_config();
    config.propagate_literals = true;
    let mut propagator = graph_propagator(config, 6);

    // variables 2 and 3 are true, so the pending clause is unit in 5
    propagator.notify_new_decision_level();
    propagator.notify_assignments(&lits(&[2, 3]));
    propagator.enqueue_clause(lits(&[5, -2, -3]), false);

    assert_eq!(propagator.propagate(), Some(Literal::from_dimacs(5)));

    let streamed: Vec<_> = std::iter::from_fn(|| {
        propagator.add_reason_clause_literal(Literal::from_dimacs(5))
    })
    .collect();
    assert_eq!(streamed, lits(&[-3, -2, 5]));

    // the reason is consumed once streamed
    assert_eq!(
        propagator.add_reason_clause_literal(Literal::from_dimacs(5)),
        None
    );
}

#[test]
fn satisfied_pending_clauses_are_not_propagated() {
    let mut config = plain_config();
    config.propagate_literals = true;
    let mut propagator = graph_propagator(config, 4);

    propagator.notify_new_decision_level();
    propagator.notify_assignments(&lits(&[2]));
    propagator.enqueue_clause(lits(&[2, 3]), false);

    assert_eq!(propagator.propagate(), None);
    // the clause is still there, surfaced through the clause interface
    assert_eq!(propagator.has_external_clause(), Some(false));
}

#[test]
fn pending_clauses_drain_most_recent_first_in_reverse_literal_order() {
    let mut propagator = graph_propagator(plain_config(), 8);

    propagator.enqueue_clause(lits(&[1, 2]), false);
    propagator.enqueue_clause(lits(&[-3, 4]), true);

    assert_eq!(propagator.has_external_clause(), Some(true));
    assert_eq!(
        propagator.add_external_clause_literal(),
        Some(Literal::from_dimacs(4))
    );
    assert_eq!(
        propagator.add_external_clause_literal(),
        Some(Literal::from_dimacs(-3))
    );
    assert_eq!(propagator.add_external_clause_literal(), None);

    assert_eq!(propagator.has_external_clause(), Some(false));
    assert_eq!(
        propagator.add_external_clause_literal(),
        Some(Literal::from_dimacs(2))
    );
    assert_eq!(
        propagator.add_external_clause_literal(),
        Some(Literal::from_dimacs(1))
    );
    assert_eq!(propagator.add_external_clause_literal(), None);
    assert_eq!(propagator.has_external_clause(), None);
}

#[test]
fn models_are_rejected_while_clauses_are_pending() {
    let mut propagator = graph_propagator(plain_config(), 1);
    propagator.notify_assignments(&lits(&[1]));
    propagator.enqueue_clause(lits(&[-1]), false);

    assert!(!propagator.check_found_model(&lits(&[1])));
}
