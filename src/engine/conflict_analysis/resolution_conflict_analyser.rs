use super::ConflictAnalysisContext;
use crate::basic_types::ClauseReference;
use crate::basic_types::ConflictInfo;
use crate::engine::variables::Literal;
use crate::symsat_assert_moderate;
use crate::symsat_assert_simple;

/// The outcome of clause learning.
#[derive(Clone, Default, Debug)]
pub(crate) struct ConflictAnalysisResult {
    /// The new learned clause with the propagating literal after backjumping
    /// at index 0 and the literal with the next highest decision level at
    /// index 1.
    pub(crate) learned_literals: Vec<Literal>,
    /// The decision level to backtrack to.
    pub(crate) backjump_level: usize,
}

#[derive(Default, Debug)]
pub(crate) struct ResolutionConflictAnalyser {
    seen: Vec<bool>,
}

impl ResolutionConflictAnalyser {
    /// Compute the 1UIP clause for the given conflict. A unit implication
    /// point "represents an alternative decision assignment at the current
    /// decision level that results in the same conflict", so resolving the
    /// conflicting clause backwards along the trail until a single literal of
    /// the current level remains yields an asserting clause.
    ///
    /// Reasons of literals propagated by the external propagator are streamed
    /// out of it on demand and live in the explanation clause manager until
    /// the caller cleans them up.
    pub(crate) fn compute_1uip(
        &mut self,
        conflict: ConflictInfo,
        context: &mut ConflictAnalysisContext<'_>,
    ) -> ConflictAnalysisResult {
        let current_level = context.assignments.get_decision_level();
        symsat_assert_simple!(current_level > 0);

        self.seen.clear();
        self.seen.resize(context.assignments.num_variables(), false);

        // index 0 is reserved for the asserting literal
        let mut learned_literals = vec![Literal::from_dimacs(1)];
        let mut num_unresolved_at_current_level = 0_usize;
        let mut trail_index = context.assignments.num_trail_entries();
        let mut conflicting_clause = conflict.conflicting_clause;
        let mut resolved_literal: Option<Literal> = None;

        loop {
            let clause_literals: Vec<Literal> = context
                .clause_allocator
                .get_clause(conflicting_clause)
                .get_literal_slice()
                .to_vec();

            for literal in clause_literals {
                if Some(literal) == resolved_literal {
                    continue;
                }
                let variable = literal.get_variable();
                if self.seen[variable.index()]
                    || context.assignments.get_variable_decision_level(variable) == 0
                {
                    continue;
                }

                self.seen[variable.index()] = true;
                context.brancher.on_appearance_in_conflict_clause(literal);

                if context.assignments.get_variable_decision_level(variable) >= current_level {
                    num_unresolved_at_current_level += 1;
                } else {
                    learned_literals.push(literal);
                }
            }

            // walk back to the next literal participating in the conflict
            let next_literal = loop {
                trail_index -= 1;
                let entry = context.assignments.get_trail_entry(trail_index);
                if self.seen[entry.literal.get_variable().index()] {
                    break entry.literal;
                }
            };

            self.seen[next_literal.get_variable().index()] = false;
            num_unresolved_at_current_level -= 1;

            if num_unresolved_at_current_level == 0 {
                learned_literals[0] = !next_literal;
                break;
            }

            conflicting_clause = self.get_reason_clause(next_literal, context);
            resolved_literal = Some(next_literal);
        }

        // the literal with the highest remaining decision level moves to
        // index 1; its level is where the learned clause becomes asserting
        let mut backjump_level = 0;
        for index in 1..learned_literals.len() {
            let level = context
                .assignments
                .get_variable_decision_level(learned_literals[index].get_variable());
            if level > backjump_level {
                backjump_level = level;
                learned_literals.swap(1, index);
            }
        }

        ConflictAnalysisResult {
            learned_literals,
            backjump_level,
        }
    }

    /// The clause that justifies the propagation of `literal`. For
    /// propagations of the external propagator the clause is streamed out of
    /// it now and stored as an explanation clause.
    fn get_reason_clause(
        &mut self,
        literal: Literal,
        context: &mut ConflictAnalysisContext<'_>,
    ) -> ClauseReference {
        let reference = context
            .assignments
            .get_reason(literal.get_variable())
            .expect("a propagated literal always carries a reason");

        if !reference.is_external() {
            return reference.as_clause_reference();
        }

        let mut reason_literals = Vec::new();
        while let Some(reason_literal) = context
            .external_propagator
            .add_reason_clause_literal(literal)
        {
            reason_literals.push(reason_literal);
        }
        symsat_assert_moderate!(reason_literals.contains(&literal));

        context
            .explanation_clause_manager
            .add_explanation_clause_unchecked(reason_literals, context.clause_allocator)
    }
}
