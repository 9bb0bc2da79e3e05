use crate::basic_types::TruthValue;
use crate::engine::variables::Literal;
use crate::engine::variables::Variable;
use crate::symsat_assert_simple;

/// The fixed mapping between edge variables and vertex pairs.
///
/// Variable `k` (1-based, DIMACS counting) corresponds to the `k`-th pair in
/// row-major order: over `i < j` for undirected graphs, over `i != j` for
/// directed ones. Variables beyond the edge range are auxiliary and have no
/// graph meaning.
#[derive(Clone, Debug)]
pub struct EdgeEncoding {
    vertices: usize,
    directed: bool,
    pairs: Vec<(usize, usize)>,
    variable_indices: Vec<Vec<usize>>,
}

impl EdgeEncoding {
    pub fn new(vertices: usize, directed: bool) -> EdgeEncoding {
        symsat_assert_simple!(vertices >= 2);

        let mut pairs = Vec::new();
        let mut variable_indices = vec![vec![usize::MAX; vertices]; vertices];
        for i in 0..vertices {
            for j in 0..vertices {
                let in_range = if directed { i != j } else { i < j };
                if !in_range {
                    continue;
                }
                variable_indices[i][j] = pairs.len();
                if !directed {
                    variable_indices[j][i] = pairs.len();
                }
                pairs.push((i, j));
            }
        }

        EdgeEncoding {
            vertices,
            directed,
            pairs,
            variable_indices,
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn num_edge_variables(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_edge_variable(&self, variable: Variable) -> bool {
        variable.index() < self.pairs.len()
    }

    /// The vertex pair a variable encodes, or `None` for auxiliary variables.
    pub fn variable_to_edge(&self, variable: Variable) -> Option<(usize, usize)> {
        self.pairs.get(variable.index()).copied()
    }

    pub fn edge_to_variable(&self, i: usize, j: usize) -> Variable {
        symsat_assert_simple!(i != j && i < self.vertices && j < self.vertices);
        Variable::new(self.variable_indices[i][j] as u32)
    }

    /// The literal stating that edge `(i, j)` is present (or absent).
    pub fn edge_literal(&self, i: usize, j: usize, present: bool) -> Literal {
        Literal::new(self.edge_to_variable(i, j), present)
    }

    /// All vertex pairs in variable order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pairs.iter().copied()
    }
}

/// A three-valued adjacency matrix. The diagonal is always false and the
/// matrix is kept symmetric in the undirected case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    vertices: usize,
    directed: bool,
    values: Vec<TruthValue>,
}

impl AdjacencyMatrix {
    pub fn new(vertices: usize, directed: bool) -> AdjacencyMatrix {
        let mut matrix = AdjacencyMatrix {
            vertices,
            directed,
            values: vec![TruthValue::Unknown; vertices * vertices],
        };
        for i in 0..vertices {
            matrix.values[i * vertices + i] = TruthValue::False;
        }
        matrix
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn get(&self, i: usize, j: usize) -> TruthValue {
        self.values[i * self.vertices + j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: TruthValue) {
        symsat_assert_simple!(i != j);
        self.values[i * self.vertices + j] = value;
        if !self.directed {
            self.values[j * self.vertices + i] = value;
        }
    }

    /// Whether every off-diagonal entry is decided.
    pub fn is_fully_defined(&self) -> bool {
        (0..self.vertices).all(|i| {
            (0..self.vertices).all(|j| i == j || self.get(i, j).is_known())
        })
    }

    /// The present edges, one `(i, j)` pair per edge (with `i < j` in the
    /// undirected case).
    pub fn present_edges(&self) -> Vec<(usize, usize)> {
        let mut edges = Vec::new();
        for i in 0..self.vertices {
            for j in 0..self.vertices {
                let in_range = if self.directed { i != j } else { i < j };
                if in_range && self.get(i, j) == TruthValue::True {
                    edges.push((i, j));
                }
            }
        }
        edges
    }
}

impl std::fmt::Display for AdjacencyMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.vertices {
            for j in 0..self.vertices {
                let symbol = match self.get(i, j) {
                    TruthValue::True => '1',
                    TruthValue::False => '0',
                    TruthValue::Unknown => '*',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
