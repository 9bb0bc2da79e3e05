//! End-to-end searches over graphs: canonical models, enumeration up to
//! isomorphism, and the plain-SAT boundary case.

use super::helpers::lits;
use crate::basic_types::CnfFormula;
use crate::basic_types::TruthValue;
use crate::engine::termination::Indefinite;
use crate::options::SolverConfig;
use crate::propagators::graph::AdjacencyMatrix;
use crate::propagators::graph::EdgeEncoding;
use crate::propagators::graph::MinimalityChecker;
use crate::propagators::graph::PartiallyDefinedGraphCheck;
use crate::results::SatisfactionResult;
use crate::GraphSolver;

/// One clause per vertex triple forbidding the triangle.
fn triangle_free_cnf(vertices: usize) -> CnfFormula {
    let encoding = EdgeEncoding::new(vertices, false);
    let mut cnf = CnfFormula::new();
    cnf.ensure_variables(encoding.num_edge_variables());

    for i in 0..vertices {
        for j in i + 1..vertices {
            for k in j + 1..vertices {
                cnf.add_clause(vec![
                    encoding.edge_literal(i, j, false),
                    encoding.edge_literal(i, k, false),
                    encoding.edge_literal(j, k, false),
                ]);
            }
        }
    }
    cnf
}

fn matrix_of(solution_edges: &[(usize, usize)], vertices: usize) -> AdjacencyMatrix {
    let mut matrix = AdjacencyMatrix::new(vertices, false);
    for i in 0..vertices {
        for j in i + 1..vertices {
            matrix.set(i, j, TruthValue::False);
        }
    }
    for &(i, j) in solution_edges {
        matrix.set(i, j, TruthValue::True);
    }
    matrix
}

#[test]
fn triangle_free_models_are_triangle_free_and_canonical() {
    let mut config = SolverConfig::new(4);
    config.frequency = 1;
    config.hide_graphs = true;

    let mut solver = GraphSolver::with_formula(config, &triangle_free_cnf(4)).unwrap();
    let SatisfactionResult::Satisfiable(solution) = solver.satisfy(&mut Indefinite) else {
        panic!("triangle-free graphs on 4 vertices exist");
    };

    let edges = solver.solution_graph(&solution);
    for i in 0..4 {
        for j in i + 1..4 {
            for k in j + 1..4 {
                let has = |a, b| edges.contains(&(a, b));
                assert!(
                    !(has(i, j) && has(i, k) && has(j, k)),
                    "the model contains the triangle {i},{j},{k}"
                );
            }
        }
    }

    // the accepted graph is the canonical representative of its class
    let mut checker = MinimalityChecker::new(EdgeEncoding::new(4, false), 1, &[], vec![], 0);
    assert!(checker.check(&matrix_of(&edges, 4)).is_ok());
}

#[test]
fn enumeration_counts_graphs_up_to_isomorphism() {
    let mut config = SolverConfig::new(3);
    config.frequency = 1;
    config.all_models = true;
    config.hide_graphs = true;

    let mut solver = GraphSolver::new(config).unwrap();
    let result = solver.satisfy(&mut Indefinite);

    assert!(matches!(result, SatisfactionResult::Unsatisfiable));
    // empty graph, single edge, path, and triangle
    assert_eq!(solver.num_models(), 4);
}

#[test]
fn enumeration_counts_triangle_free_graphs_up_to_isomorphism() {
    let mut config = SolverConfig::new(4);
    config.frequency = 1;
    config.all_models = true;
    config.hide_graphs = true;

    let mut solver = GraphSolver::with_formula(config, &triangle_free_cnf(4)).unwrap();
    let result = solver.satisfy(&mut Indefinite);

    assert!(matches!(result, SatisfactionResult::Unsatisfiable));
    assert_eq!(solver.num_models(), 7);
}

#[test]
fn two_vertices_behave_as_a_plain_sat_frontend() {
    let mut cnf = CnfFormula::new();
    cnf.add_clause(lits(&[2, 3]));
    cnf.add_clause(lits(&[-2, 3]));

    let config = SolverConfig::new(2);
    assert!(config.turn_off_symmetry_breaking);

    let mut solver = GraphSolver::with_formula(config, &cnf).unwrap();
    let SatisfactionResult::Satisfiable(solution) = solver.satisfy(&mut Indefinite) else {
        panic!("the formula is satisfiable");
    };
    assert!(solution.contains(crate::Literal::from_dimacs(3)));
}

#[test]
fn incremental_model_checking_agrees_with_in_propagator_checking() {
    let mut config = SolverConfig::new(3);
    config.frequency = 1;
    config.all_models = true;
    config.hide_graphs = true;
    config.check_solution_in_prop = false;

    let mut solver = GraphSolver::new(config).unwrap();
    let result = solver.satisfy(&mut Indefinite);

    assert!(matches!(result, SatisfactionResult::Unsatisfiable));
    assert_eq!(solver.num_models(), 4);
}
