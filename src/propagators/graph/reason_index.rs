use crate::engine::variables::Literal;

/// For every literal the propagator has forced, the clause that justified it,
/// held until the solver asks for it.
///
/// Reasons are streamed back one literal at a time from the back of the
/// clause; once a reason has been streamed out it is consumed.
#[derive(Clone, Debug)]
pub struct ReasonIndex {
    positive: Vec<Vec<Literal>>,
    negative: Vec<Vec<Literal>>,
}

impl ReasonIndex {
    pub fn new(num_variables: usize) -> ReasonIndex {
        ReasonIndex {
            positive: vec![Vec::new(); num_variables],
            negative: vec![Vec::new(); num_variables],
        }
    }

    fn slot_mut(&mut self, literal: Literal) -> &mut Vec<Literal> {
        let index = literal.get_variable().index();
        if literal.is_positive() {
            &mut self.positive[index]
        } else {
            &mut self.negative[index]
        }
    }

    pub fn store(&mut self, propagated: Literal, reason: Vec<Literal>) {
        *self.slot_mut(propagated) = reason;
    }

    pub fn has_reason(&self, literal: Literal) -> bool {
        let index = literal.get_variable().index();
        let slot = if literal.is_positive() {
            &self.positive[index]
        } else {
            &self.negative[index]
        };
        !slot.is_empty()
    }

    /// Stream the next literal of the stored reason, `None` once exhausted.
    pub fn next_literal(&mut self, propagated: Literal) -> Option<Literal> {
        self.slot_mut(propagated).pop()
    }
}

#[cfg(test)]
mod tests {
    use super::ReasonIndex;
    use crate::engine::variables::Literal;

    #[test]
    fn reasons_stream_in_reverse_and_are_consumed() {
        let mut index = ReasonIndex::new(8);
        let propagated = Literal::from_dimacs(5);
        index.store(
            propagated,
            vec![
                Literal::from_dimacs(5),
                Literal::from_dimacs(-2),
                Literal::from_dimacs(-3),
            ],
        );

        assert!(index.has_reason(propagated));
        assert_eq!(index.next_literal(propagated), Some(Literal::from_dimacs(-3)));
        assert_eq!(index.next_literal(propagated), Some(Literal::from_dimacs(-2)));
        assert_eq!(index.next_literal(propagated), Some(Literal::from_dimacs(5)));
        assert_eq!(index.next_literal(propagated), None);
        assert!(!index.has_reason(propagated));
    }

    #[test]
    fn polarities_have_independent_reasons() {
        let mut index = ReasonIndex::new(4);
        index.store(Literal::from_dimacs(2), vec![Literal::from_dimacs(2)]);
        assert!(index.has_reason(Literal::from_dimacs(2)));
        assert!(!index.has_reason(Literal::from_dimacs(-2)));
    }
}
