use log::warn;

use super::Assignments;
use super::ClauseAllocator;
use crate::basic_types::ClauseReference;
use crate::basic_types::ConflictInfo;
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::ConstraintReference;
use crate::engine::variables::Literal;
use crate::engine::Preprocessor;
use crate::symsat_assert_moderate;
use crate::symsat_assert_simple;

#[derive(Clone, Copy, Debug)]
pub(crate) struct ClauseWatcher {
    clause_reference: ClauseReference,
    /// A literal of the clause that was true when the watcher was last
    /// touched; if it still is, the clause cannot propagate.
    cached_literal: Literal,
}

/// Clausal propagation based on the two-watched-literal scheme.
///
/// The first two literals of every watched clause are its watched literals;
/// propagation maintains the invariant that a watched literal is only false if
/// the other watched literal is true or the clause is unit/conflicting.
#[derive(Debug, Default)]
pub(crate) struct ClausalPropagator {
    pub(crate) watch_lists: Vec<Vec<ClauseWatcher>>,
    pub(crate) next_position_on_trail_to_propagate: usize,
    is_in_infeasible_state: bool,
}

impl ClausalPropagator {
    pub(crate) fn grow(&mut self) {
        // one watch list per polarity
        self.watch_lists.push(vec![]);
        self.watch_lists.push(vec![]);
    }

    pub(crate) fn is_propagation_complete(&self, trail_size: usize) -> bool {
        self.next_position_on_trail_to_propagate == trail_size
    }

    pub(crate) fn synchronise(&mut self, trail_size: usize) {
        self.next_position_on_trail_to_propagate =
            self.next_position_on_trail_to_propagate.min(trail_size);
    }

    pub(crate) fn add_permanent_clause(
        &mut self,
        literals: Vec<Literal>,
        assignments: &mut Assignments,
        clause_allocator: &mut ClauseAllocator,
    ) -> Result<(), ConstraintOperationError> {
        symsat_assert_simple!(assignments.is_at_the_root_level());

        if self.is_in_infeasible_state {
            return Err(ConstraintOperationError::InfeasibleState);
        }

        if literals.is_empty() {
            warn!("Adding empty clause, unusual!");
        }

        let literals = Preprocessor::preprocess_clause(literals, assignments);

        // infeasible at the root? Note that the original clause is not added
        // to the database in this case
        if literals.is_empty() {
            self.is_in_infeasible_state = true;
            return Err(ConstraintOperationError::InfeasibleClause);
        }

        // unit clauses are added as root assignments, rather than as actual
        // clauses
        if literals.len() == 1 {
            if assignments.is_literal_assigned_false(literals[0]) {
                self.is_in_infeasible_state = true;
                return Err(ConstraintOperationError::InfeasibleClause);
            }
            if assignments.is_literal_unassigned(literals[0]) {
                assignments.enqueue_decision_literal(literals[0]);
                if self.propagate(assignments, clause_allocator).is_err() {
                    self.is_in_infeasible_state = true;
                    return Err(ConstraintOperationError::InfeasibleClause);
                }
            }
        } else {
            let _ = self.add_clause_unchecked(literals, false, clause_allocator);
        }

        Ok(())
    }

    /// Add a learned clause whose asserting literal is at index 0 and whose
    /// literal with the second-highest decision level is at index 1, then
    /// enqueue the asserting literal with the new clause as its reason.
    pub(crate) fn add_asserting_learned_clause(
        &mut self,
        literals: Vec<Literal>,
        assignments: &mut Assignments,
        clause_allocator: &mut ClauseAllocator,
    ) -> ClauseReference {
        symsat_assert_simple!(literals.len() >= 2);
        let asserting_literal = literals[0];

        let clause_reference = self.add_clause_unchecked(literals, true, clause_allocator);

        let enqueued = assignments.enqueue_propagated_literal(
            asserting_literal,
            ConstraintReference::from_clause(clause_reference),
        );
        symsat_assert_moderate!(enqueued);

        clause_reference
    }

    pub(crate) fn add_clause_unchecked(
        &mut self,
        literals: Vec<Literal>,
        is_learned: bool,
        clause_allocator: &mut ClauseAllocator,
    ) -> ClauseReference {
        symsat_assert_simple!(literals.len() >= 2);

        let watched = (literals[0], literals[1]);
        let clause_reference = clause_allocator.create_clause(literals, is_learned);

        self.start_watching(watched.0, clause_reference, watched.1);
        self.start_watching(watched.1, clause_reference, watched.0);

        clause_reference
    }

    fn start_watching(
        &mut self,
        literal: Literal,
        clause_reference: ClauseReference,
        cached_literal: Literal,
    ) {
        self.watch_lists[literal.to_u32() as usize].push(ClauseWatcher {
            clause_reference,
            cached_literal,
        });
    }

    /// Propagate every pending trail entry to fixed point, or stop at the
    /// first conflicting clause.
    pub(crate) fn propagate(
        &mut self,
        assignments: &mut Assignments,
        clause_allocator: &mut ClauseAllocator,
    ) -> Result<(), ConflictInfo> {
        while self.next_position_on_trail_to_propagate < assignments.num_trail_entries() {
            let true_literal = assignments
                .get_trail_entry(self.next_position_on_trail_to_propagate)
                .literal;
            self.next_position_on_trail_to_propagate += 1;

            let false_literal = !true_literal;
            let mut watchers =
                std::mem::take(&mut self.watch_lists[false_literal.to_u32() as usize]);

            let mut keep_from = 0;
            let mut conflict = None;

            'watchers: for index in 0..watchers.len() {
                let watcher = watchers[index];

                if assignments.is_literal_assigned_true(watcher.cached_literal) {
                    watchers[keep_from] = watcher;
                    keep_from += 1;
                    continue;
                }

                {
                    let clause = clause_allocator.get_clause_mut(watcher.clause_reference);
                    if clause.is_deleted() {
                        continue;
                    }

                    let literals = clause.get_literal_slice_mut();
                    // the falsified watcher goes to position 1
                    if literals[0] == false_literal {
                        literals.swap(0, 1);
                    }

                    // look for a replacement watch among the other literals
                    for position in 2..literals.len() {
                        if !assignments.is_literal_assigned_false(literals[position]) {
                            literals.swap(1, position);
                            let new_watch = literals[1];
                            let cached_literal = literals[0];
                            self.start_watching(
                                new_watch,
                                watcher.clause_reference,
                                cached_literal,
                            );
                            continue 'watchers;
                        }
                    }
                }

                // unit or conflicting; either way the watcher stays
                watchers[keep_from] = watcher;
                keep_from += 1;

                let propagated = clause_allocator.get_clause(watcher.clause_reference)[0];
                if !assignments.enqueue_propagated_literal(
                    propagated,
                    ConstraintReference::from_clause(watcher.clause_reference),
                ) {
                    // keep the untouched tail of the watch list before
                    // reporting the conflict
                    for tail in index + 1..watchers.len() {
                        watchers[keep_from] = watchers[tail];
                        keep_from += 1;
                    }
                    conflict = Some(ConflictInfo {
                        conflicting_clause: watcher.clause_reference,
                    });
                    break;
                }
            }

            watchers.truncate(keep_from);
            self.watch_lists[false_literal.to_u32() as usize] = watchers;

            if let Some(conflict) = conflict {
                self.next_position_on_trail_to_propagate = assignments.num_trail_entries();
                return Err(conflict);
            }
        }

        Ok(())
    }
}
