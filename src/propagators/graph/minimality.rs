use fnv::FnvHashSet;

use super::checkers::BlockingClause;
use super::checkers::GraphCheckResult;
use super::checkers::PartiallyDefinedGraphCheck;
use super::AdjacencyMatrix;
use super::EdgeEncoding;
use crate::basic_types::TruthValue;
use crate::engine::variables::Variable;
use crate::statistics::log_statistic;
use crate::symsat_assert_simple;

/// Searches for a vertex permutation under which the adjacency matrix becomes
/// lexicographically smaller, and excludes the current partial graph when one
/// is found.
///
/// The permutation is built position by position while the matrix entries are
/// compared in row-major pair order, so a strict difference is only ever
/// reported when all earlier pairs compare equal. Permutations respect the
/// initial ordered partition: a vertex may only move within its cell. An
/// unknown entry ends the current branch, since nothing beyond it can be
/// proven; the check simply runs again once more edges are decided.
#[derive(Debug)]
pub struct MinimalityChecker {
    encoding: EdgeEncoding,
    frequency: u64,
    cutoff: u64,
    /// Cell id per vertex, derived from the partition markers.
    cell_of: Vec<usize>,
    /// Candidate orders for the permutation search; each is a permutation of
    /// the vertices.
    vertex_orderings: Vec<Vec<usize>>,
    num_clauses_emitted: u64,
    num_cutoffs: u64,
}

enum SearchOutcome {
    Witness(BlockingClause),
    NoWitness,
    CutOff,
}

struct SearchState<'a> {
    matrix: &'a AdjacencyMatrix,
    ordering: &'a [usize],
    /// `position -> vertex`; the permuted matrix reads entry `(i, j)` from
    /// `(perm[i], perm[j])`.
    perm: Vec<Option<usize>>,
    used: Vec<bool>,
    /// Pairs compared equal along the current branch: `(i, j, value)` plus
    /// the permuted pre-image.
    path: Vec<(usize, usize, usize, usize, TruthValue)>,
    nodes_expanded: u64,
}

impl MinimalityChecker {
    pub fn new(
        encoding: EdgeEncoding,
        frequency: u64,
        initial_partition: &[bool],
        vertex_orderings: Vec<Vec<usize>>,
        cutoff: u64,
    ) -> MinimalityChecker {
        let vertices = encoding.num_vertices();

        let mut cell_of = vec![0; vertices];
        let mut cell = 0;
        for vertex in 1..vertices {
            if initial_partition.get(vertex).copied().unwrap_or(false) {
                cell += 1;
            }
            cell_of[vertex] = cell;
        }

        let vertex_orderings = if vertex_orderings.is_empty() {
            vec![(0..vertices).collect()]
        } else {
            vertex_orderings
        };
        for ordering in &vertex_orderings {
            symsat_assert_simple!(ordering.len() == vertices);
        }

        MinimalityChecker {
            encoding,
            frequency: frequency.max(1),
            cutoff,
            cell_of,
            vertex_orderings,
            num_clauses_emitted: 0,
            num_cutoffs: 0,
        }
    }

    pub fn log_statistics(&self) {
        log_statistic("minimalityClauses", self.num_clauses_emitted);
        log_statistic("minimalityCutoffs", self.num_cutoffs);
    }

    /// The pairs to compare, in the lexicographic order that defines matrix
    /// minimality.
    fn comparison_pairs(&self) -> Vec<(usize, usize)> {
        let n = self.encoding.num_vertices();
        let mut pairs = Vec::new();
        for i in 0..n {
            for j in 0..n {
                let in_range = if self.encoding.is_directed() {
                    i != j
                } else {
                    i < j
                };
                if in_range {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    fn search(
        &self,
        pairs: &[(usize, usize)],
        pair_index: usize,
        state: &mut SearchState<'_>,
    ) -> SearchOutcome {
        if pair_index == pairs.len() {
            // the permuted matrix equals the original on every decided entry
            return SearchOutcome::NoWitness;
        }

        let (i, j) = pairs[pair_index];

        // both endpoints need an image before the pair can be compared
        for position in [i, j] {
            if state.perm[position].is_some() {
                continue;
            }
            for ordering_index in 0..state.ordering.len() {
                let candidate = state.ordering[ordering_index];
                if state.used[candidate] || self.cell_of[candidate] != self.cell_of[position] {
                    continue;
                }

                state.nodes_expanded += 1;
                if self.cutoff != 0 && state.nodes_expanded > self.cutoff {
                    return SearchOutcome::CutOff;
                }

                state.perm[position] = Some(candidate);
                state.used[candidate] = true;
                let outcome = self.search(pairs, pair_index, state);
                state.perm[position] = None;
                state.used[candidate] = false;

                match outcome {
                    SearchOutcome::NoWitness => continue,
                    decided => return decided,
                }
            }
            return SearchOutcome::NoWitness;
        }

        let pi = state.perm[i].unwrap();
        let pj = state.perm[j].unwrap();
        let original = state.matrix.get(i, j);
        let permuted = state.matrix.get(pi, pj);

        if !original.is_known() || !permuted.is_known() {
            // cannot compare this pair, so no later pair may decide anything
            return SearchOutcome::NoWitness;
        }

        if original == permuted {
            state.path.push((i, j, pi, pj, original));
            let outcome = self.search(pairs, pair_index + 1, state);
            let _ = state.path.pop();
            return outcome;
        }

        // entries compare with a present edge ordered before an absent one,
        // so the canonical representative packs its edges towards the front
        if original == TruthValue::False && permuted == TruthValue::True {
            // all earlier pairs are equal, this one strictly decreases: the
            // permuted matrix is smaller whatever the undecided entries are
            return SearchOutcome::Witness(self.blocking_clause(state, (i, j), (pi, pj)));
        }

        // the permuted matrix is larger on this branch
        SearchOutcome::NoWitness
    }

    /// The clause stating that at least one of the entries which witnessed
    /// non-minimality must change.
    fn blocking_clause(
        &self,
        state: &SearchState<'_>,
        witness: (usize, usize),
        witness_image: (usize, usize),
    ) -> BlockingClause {
        let mut seen: FnvHashSet<Variable> = FnvHashSet::default();
        let mut literals = Vec::new();

        let mut push = |seen: &mut FnvHashSet<Variable>,
                        literals: &mut Vec<_>,
                        i: usize,
                        j: usize,
                        value: TruthValue| {
            let variable = self.encoding.edge_to_variable(i, j);
            if seen.insert(variable) {
                literals.push(
                    self.encoding
                        .edge_literal(i, j, value != TruthValue::True),
                );
            }
        };

        for &(i, j, pi, pj, value) in &state.path {
            push(&mut seen, &mut literals, i, j, value);
            push(&mut seen, &mut literals, pi, pj, value);
        }
        push(
            &mut seen,
            &mut literals,
            witness.0,
            witness.1,
            TruthValue::False,
        );
        push(
            &mut seen,
            &mut literals,
            witness_image.0,
            witness_image.1,
            TruthValue::True,
        );

        BlockingClause { literals }
    }
}

impl PartiallyDefinedGraphCheck for MinimalityChecker {
    fn name(&self) -> &str {
        "Minimality"
    }

    fn frequency(&self) -> u64 {
        self.frequency
    }

    fn must_persist(&self) -> bool {
        true
    }

    fn check(&mut self, matrix: &AdjacencyMatrix) -> GraphCheckResult {
        let vertices = self.encoding.num_vertices();
        let pairs = self.comparison_pairs();

        for ordering_index in 0..self.vertex_orderings.len() {
            let outcome = {
                let mut state = SearchState {
                    matrix,
                    ordering: &self.vertex_orderings[ordering_index],
                    perm: vec![None; vertices],
                    used: vec![false; vertices],
                    path: Vec::new(),
                    nodes_expanded: 0,
                };
                self.search(&pairs, 0, &mut state)
            };

            match outcome {
                SearchOutcome::Witness(clause) => {
                    self.num_clauses_emitted += 1;
                    return Err(clause);
                }
                SearchOutcome::CutOff => {
                    self.num_cutoffs += 1;
                }
                SearchOutcome::NoWitness => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MinimalityChecker;
    use super::PartiallyDefinedGraphCheck;
    use crate::basic_types::TruthValue;
    use crate::propagators::graph::AdjacencyMatrix;
    use crate::propagators::graph::EdgeEncoding;

    fn checker(vertices: usize) -> MinimalityChecker {
        MinimalityChecker::new(EdgeEncoding::new(vertices, false), 1, &[], vec![], 0)
    }

    fn full_matrix(vertices: usize, edges: &[(usize, usize)]) -> AdjacencyMatrix {
        let mut matrix = AdjacencyMatrix::new(vertices, false);
        for i in 0..vertices {
            for j in i + 1..vertices {
                matrix.set(i, j, TruthValue::False);
            }
        }
        for &(i, j) in edges {
            matrix.set(i, j, TruthValue::True);
        }
        matrix
    }

    #[test]
    fn the_empty_graph_is_minimal() {
        let mut checker = checker(4);
        assert!(checker.check(&full_matrix(4, &[])).is_ok());
    }

    #[test]
    fn a_single_late_edge_is_not_minimal() {
        // the edge (2, 3) relabels to (0, 1), which compares smaller
        let mut checker = checker(4);
        let result = checker.check(&full_matrix(4, &[(2, 3)]));
        assert!(result.is_err());
    }

    #[test]
    fn a_single_first_edge_is_minimal() {
        let mut checker = checker(4);
        assert!(checker.check(&full_matrix(4, &[(0, 1)])).is_ok());
    }

    #[test]
    fn the_complete_graph_is_minimal() {
        let mut checker = checker(4);
        let matrix = full_matrix(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        assert!(checker.check(&matrix).is_ok());
    }

    #[test]
    fn blocking_clause_is_falsified_by_the_witnessing_graph() {
        let mut checker = checker(4);
        let matrix = full_matrix(4, &[(1, 2), (0, 3)]);
        let clause = checker
            .check(&matrix)
            .expect_err("{(1,2),(0,3)} relabels to the smaller {(0,1),(2,3)}");

        // every literal of the clause disagrees with the current assignment,
        // so the clause indeed excludes this graph
        let encoding = EdgeEncoding::new(4, false);
        for literal in &clause.literals {
            let (i, j) = encoding.variable_to_edge(literal.get_variable()).unwrap();
            let present = matrix.get(i, j) == TruthValue::True;
            assert_ne!(literal.is_positive(), present);
        }
    }

    #[test]
    fn partition_cells_restrict_relabelings() {
        // vertex 3 forms its own cell, so the lonely edge (0, 3) cannot be
        // relabelled to (0, 1)
        let encoding = EdgeEncoding::new(4, false);
        let mut partition = vec![false; 4];
        partition[3] = true;
        let mut checker = MinimalityChecker::new(encoding, 1, &partition, vec![], 0);
        assert!(checker.check(&full_matrix(4, &[(0, 3)])).is_ok());

        // without the partition the same graph is non-minimal
        let mut free = super::MinimalityChecker::new(EdgeEncoding::new(4, false), 1, &[], vec![], 0);
        assert!(free.check(&full_matrix(4, &[(0, 3)])).is_err());
    }

    #[test]
    fn unknown_entries_are_inconclusive() {
        let mut checker = checker(3);
        let matrix = AdjacencyMatrix::new(3, false);
        assert!(checker.check(&matrix).is_ok());
    }

    #[test]
    fn a_tiny_cutoff_forces_inconclusive_results() {
        let encoding = EdgeEncoding::new(5, false);
        let mut checker = MinimalityChecker::new(encoding, 1, &[], vec![], 1);
        let result = checker.check(&full_matrix(5, &[(3, 4)]));
        assert!(result.is_ok());
    }
}
