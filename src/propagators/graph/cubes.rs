use std::io::Write;

use super::trail::Trail;
use super::trail::TruthStore;
use super::EdgeEncoding;
use crate::basic_types::TruthValue;
use crate::engine::variables::Literal;
use crate::options::AssignmentScoring;

/// Partitions the search space: once enough edge variables are assigned, the
/// current partial edge assignment becomes a cube.
///
/// The cube line lists the fixed edge literals followed by the trail-assigned
/// edge literals, all in assigned polarity, in `a <l1> ... <l2> 0` form. The
/// returned blocking clause (the flipped trail literals) excludes the cube
/// from the remaining search.
#[derive(Clone, Debug)]
pub struct CubeEmitter {
    assignment_cutoff: usize,
    scoring: AssignmentScoring,
    num_cubes_emitted: u64,
}

impl CubeEmitter {
    pub fn new(assignment_cutoff: usize, scoring: AssignmentScoring) -> CubeEmitter {
        CubeEmitter {
            assignment_cutoff,
            scoring,
            num_cubes_emitted: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.assignment_cutoff > 0
    }

    pub fn num_cubes_emitted(&self) -> u64 {
        self.num_cubes_emitted
    }

    fn level_weight(&self, level: usize) -> usize {
        match self.scoring {
            AssignmentScoring::Count => 1,
            AssignmentScoring::WeightedByLevel => level.max(1),
        }
    }

    /// Walk the trail level by level; once the assignment score reaches the
    /// cutoff, write the cube and return its blocking clause.
    pub fn try_emit_cube(
        &mut self,
        encoding: &EdgeEncoding,
        truth_store: &TruthStore,
        trail: &Trail,
        output: &mut impl Write,
    ) -> std::io::Result<Option<Vec<Literal>>> {
        let fixed_edge_literals: Vec<Literal> = truth_store
            .fixed_literals()
            .iter()
            .copied()
            .filter(|literal| encoding.is_edge_variable(literal.get_variable()))
            .collect();

        let mut blocking_clause: Vec<Literal> = Vec::new();
        let mut score = fixed_edge_literals.len();

        for (level, variables) in trail.levels().enumerate() {
            for variable in variables {
                if !encoding.is_edge_variable(*variable) || truth_store.is_fixed(*variable) {
                    continue;
                }
                let assigned_positive = truth_store.value(*variable) == TruthValue::True;
                // the clause wants the opposite of the assignment
                blocking_clause.push(Literal::new(*variable, !assigned_positive));
                score += self.level_weight(level);
            }

            if score >= self.assignment_cutoff {
                self.num_cubes_emitted += 1;

                write!(output, "a")?;
                for literal in &fixed_edge_literals {
                    write!(output, " {}", literal.to_dimacs())?;
                }
                for literal in &blocking_clause {
                    write!(output, " {}", (!*literal).to_dimacs())?;
                }
                writeln!(output, " 0")?;

                return Ok(Some(blocking_clause));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::CubeEmitter;
    use crate::engine::variables::Literal;
    use crate::options::AssignmentScoring;
    use crate::propagators::graph::trail::Trail;
    use crate::propagators::graph::trail::TruthStore;
    use crate::propagators::graph::EdgeEncoding;

    fn assign(store: &mut TruthStore, trail: &mut Trail, literal: Literal) {
        store.assign(literal);
        trail.record(literal.get_variable());
    }

    #[test]
    fn a_cube_is_emitted_once_the_cutoff_is_reached() {
        let encoding = EdgeEncoding::new(5, false);
        let mut store = TruthStore::new(encoding.num_edge_variables());
        let mut trail = Trail::default();
        let mut emitter = CubeEmitter::new(3, AssignmentScoring::Count);

        for dimacs in [1, -2, 3] {
            trail.push_level();
            assign(&mut store, &mut trail, Literal::from_dimacs(dimacs));
        }

        let mut output = Vec::new();
        let clause = emitter
            .try_emit_cube(&encoding, &store, &trail, &mut output)
            .unwrap()
            .expect("three assigned edges reach the cutoff");

        assert_eq!(String::from_utf8(output).unwrap(), "a 1 -2 3 0\n");
        assert_eq!(
            clause,
            vec![
                Literal::from_dimacs(-1),
                Literal::from_dimacs(2),
                Literal::from_dimacs(-3),
            ]
        );
        assert_eq!(emitter.num_cubes_emitted(), 1);
    }

    #[test]
    fn fixed_edge_literals_prefix_the_cube_but_not_the_clause() {
        let encoding = EdgeEncoding::new(5, false);
        let mut store = TruthStore::new(encoding.num_edge_variables());
        let mut trail = Trail::default();
        let mut emitter = CubeEmitter::new(2, AssignmentScoring::Count);

        let fixed = Literal::from_dimacs(-4);
        store.assign(fixed);
        store.mark_fixed(fixed);
        trail.record(fixed.get_variable());

        trail.push_level();
        assign(&mut store, &mut trail, Literal::from_dimacs(2));

        let mut output = Vec::new();
        let clause = emitter
            .try_emit_cube(&encoding, &store, &trail, &mut output)
            .unwrap()
            .expect("one fixed and one assigned edge reach the cutoff");

        assert_eq!(String::from_utf8(output).unwrap(), "a -4 2 0\n");
        assert_eq!(clause, vec![Literal::from_dimacs(-2)]);
    }

    #[test]
    fn auxiliary_variables_do_not_count_towards_the_score() {
        let encoding = EdgeEncoding::new(3, false);
        let mut store = TruthStore::new(encoding.num_edge_variables() + 2);
        let mut trail = Trail::default();
        let mut emitter = CubeEmitter::new(2, AssignmentScoring::Count);

        trail.push_level();
        assign(&mut store, &mut trail, Literal::from_dimacs(1));
        // variables beyond the edge range have no graph meaning
        assign(&mut store, &mut trail, Literal::from_dimacs(4));
        assign(&mut store, &mut trail, Literal::from_dimacs(5));

        let mut output = Vec::new();
        let result = emitter
            .try_emit_cube(&encoding, &store, &trail, &mut output)
            .unwrap();
        assert!(result.is_none());
        assert!(output.is_empty());
    }

    #[test]
    fn weighted_scoring_reaches_the_cutoff_deeper_assignments_faster() {
        let encoding = EdgeEncoding::new(5, false);
        let mut store = TruthStore::new(encoding.num_edge_variables());
        let mut trail = Trail::default();
        let mut emitter = CubeEmitter::new(4, AssignmentScoring::WeightedByLevel);

        // two edges at levels 1 and 2 score 1 + 2 under weighting but only
        // 2 under plain counting; a third at level 3 pushes past 4
        trail.push_level();
        assign(&mut store, &mut trail, Literal::from_dimacs(1));
        trail.push_level();
        assign(&mut store, &mut trail, Literal::from_dimacs(2));
        trail.push_level();
        assign(&mut store, &mut trail, Literal::from_dimacs(3));

        let mut output = Vec::new();
        let clause = emitter
            .try_emit_cube(&encoding, &store, &trail, &mut output)
            .unwrap();
        assert!(clause.is_some());
        assert_eq!(String::from_utf8(output).unwrap(), "a 1 2 3 0\n");
    }
}
