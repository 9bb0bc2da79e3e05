//! The satisfaction solver driven against scripted external propagators.

use super::helpers::lits;
use super::helpers::NullPropagator;
use super::helpers::ScriptedClausePropagator;
use super::helpers::ScriptedUnitPropagator;
use crate::basic_types::SolverExecutionFlag;
use crate::basic_types::TruthValue;
use crate::branching::IndependentVariableValueBrancher;
use crate::branching::PhaseSaving;
use crate::branching::Vsids;
use crate::engine::termination::Indefinite;
use crate::engine::variables::Literal;
use crate::engine::SatisfactionSolver;

fn solver_with_clauses(num_variables: usize, clauses: &[&[i32]]) -> SatisfactionSolver {
    let mut solver = SatisfactionSolver::default();
    solver.ensure_variables(num_variables);
    for clause in clauses {
        let _ = solver.add_clause(lits(clause));
    }
    solver
}

fn brancher(num_variables: usize) -> IndependentVariableValueBrancher<Vsids, PhaseSaving> {
    IndependentVariableValueBrancher::new(Vsids::new(num_variables), PhaseSaving::new(num_variables))
}

#[test]
fn a_satisfiable_formula_is_feasible() {
    let mut solver = solver_with_clauses(2, &[&[1, 2]]);
    let mut brancher = brancher(2);

    let flag = solver.solve(&mut Indefinite, &mut brancher, &mut NullPropagator);
    assert_eq!(flag, SolverExecutionFlag::Feasible);

    let model = solver.extract_model();
    assert!(model.contains(&Literal::from_dimacs(1)) || model.contains(&Literal::from_dimacs(2)));
}

#[test]
fn contradicting_units_are_infeasible() {
    let mut solver = solver_with_clauses(1, &[&[1], &[-1]]);
    let mut brancher = brancher(1);

    let flag = solver.solve(&mut Indefinite, &mut brancher, &mut NullPropagator);
    assert_eq!(flag, SolverExecutionFlag::Infeasible);
}

#[test]
fn conflict_learning_exhausts_a_small_unsatisfiable_formula() {
    let mut solver = solver_with_clauses(2, &[&[1, 2], &[1, -2], &[-1, 2], &[-1, -2]]);
    let mut brancher = brancher(2);

    let flag = solver.solve(&mut Indefinite, &mut brancher, &mut NullPropagator);
    assert_eq!(flag, SolverExecutionFlag::Infeasible);
}

#[test]
fn assumptions_conflicting_with_the_formula_are_infeasible() {
    let mut solver = solver_with_clauses(1, &[&[1]]);
    let mut brancher = brancher(1);

    let flag = solver.solve_under_assumptions(
        &lits(&[-1]),
        &mut Indefinite,
        &mut brancher,
        &mut NullPropagator,
    );
    assert_eq!(flag, SolverExecutionFlag::Infeasible);
    assert!(solver.is_infeasible_under_assumptions());

    // without the assumption the formula is fine again
    let flag = solver.solve(&mut Indefinite, &mut brancher, &mut NullPropagator);
    assert_eq!(flag, SolverExecutionFlag::Feasible);
}

#[test]
fn an_external_unit_clause_makes_the_formula_infeasible() {
    let mut solver = solver_with_clauses(1, &[&[1]]);
    let mut brancher = brancher(1);
    let mut propagator =
        ScriptedClausePropagator::new(Literal::from_dimacs(1), vec![(lits(&[-1]), false)]);

    let flag = solver.solve(&mut Indefinite, &mut brancher, &mut propagator);
    assert_eq!(flag, SolverExecutionFlag::Infeasible);
}

#[test]
fn an_external_clause_prunes_the_search() {
    // the propagator insists on variable 2 once variable 1 is true
    let mut solver = solver_with_clauses(2, &[&[1]]);
    let mut brancher = brancher(2);
    let mut propagator =
        ScriptedClausePropagator::new(Literal::from_dimacs(1), vec![(lits(&[-1, 2]), false)]);

    let flag = solver.solve(&mut Indefinite, &mut brancher, &mut propagator);
    assert_eq!(flag, SolverExecutionFlag::Feasible);
    assert_eq!(solver.literal_value(Literal::from_dimacs(2)), TruthValue::True);
}

#[test]
fn externally_propagated_literals_enter_the_model() {
    let mut solver = solver_with_clauses(2, &[&[1]]);
    let mut brancher = brancher(2);
    let mut propagator = ScriptedUnitPropagator::new(
        Literal::from_dimacs(1),
        Literal::from_dimacs(2),
        lits(&[2, -1]),
    );

    let flag = solver.solve(&mut Indefinite, &mut brancher, &mut propagator);
    assert_eq!(flag, SolverExecutionFlag::Feasible);
    assert_eq!(solver.literal_value(Literal::from_dimacs(2)), TruthValue::True);
}

#[test]
fn a_falsified_external_propagation_is_a_conflict() {
    // the formula forces 1 and 3; the propagator then tries to force -3,
    // whose reason clause conflicts at the root
    let mut solver = solver_with_clauses(3, &[&[1], &[3]]);
    let mut brancher = brancher(3);
    let mut propagator = ScriptedUnitPropagator::new(
        Literal::from_dimacs(1),
        Literal::from_dimacs(-3),
        lits(&[-3, -1]),
    );

    let flag = solver.solve(&mut Indefinite, &mut brancher, &mut propagator);
    assert_eq!(flag, SolverExecutionFlag::Infeasible);
}

#[test]
fn forgettable_clauses_may_be_dropped_by_reduction() {
    // behavioural smoke test: a forgettable external clause must still hold
    // while it is present, reduction or not
    let mut solver = solver_with_clauses(2, &[&[1]]);
    let mut brancher = brancher(2);
    let mut propagator =
        ScriptedClausePropagator::new(Literal::from_dimacs(1), vec![(lits(&[-1, 2]), true)]);

    let flag = solver.solve(&mut Indefinite, &mut brancher, &mut propagator);
    assert_eq!(flag, SolverExecutionFlag::Feasible);
    assert_eq!(solver.literal_value(Literal::from_dimacs(2)), TruthValue::True);
}
