use crate::engine::variables::Literal;

/// A clause waiting to be handed over to the solver, tagged with whether the
/// solver's clause-database cleanup is allowed to forget it.
#[derive(Clone, Debug)]
pub struct PendingClause {
    pub literals: Vec<Literal>,
    pub is_forgettable: bool,
}

/// The queue of clauses produced by the graph checkers that the solver has not
/// consumed yet.
///
/// Clauses are surfaced in LIFO order and drained one literal at a time, from
/// the back of the literal list. Draining past the last literal removes the
/// clause from the buffer; that final call plays the role of the terminating
/// zero of the wire format.
#[derive(Clone, Debug, Default)]
pub struct ClauseBuffer {
    pending: Vec<PendingClause>,
}

impl ClauseBuffer {
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn push(&mut self, literals: Vec<Literal>, is_forgettable: bool) {
        self.pending.push(PendingClause {
            literals,
            is_forgettable,
        });
    }

    /// The forgettable tag of the clause that would be drained next.
    pub fn peek_forgettable(&self) -> Option<bool> {
        self.pending.last().map(|clause| clause.is_forgettable)
    }

    /// The literals of the clause that would be drained next.
    pub fn peek_literals(&self) -> Option<&[Literal]> {
        self.pending.last().map(|clause| clause.literals.as_slice())
    }

    /// Remove the clause that would be drained next without streaming it.
    pub fn pop(&mut self) -> Option<PendingClause> {
        self.pending.pop()
    }

    /// Stream the next literal of the top clause, or `None` once the clause is
    /// exhausted (which also drops it from the buffer).
    pub fn next_literal(&mut self) -> Option<Literal> {
        let top = self.pending.last_mut()?;
        match top.literals.pop() {
            Some(literal) => Some(literal),
            None => {
                let _ = self.pending.pop();
                None
            }
        }
    }
}
