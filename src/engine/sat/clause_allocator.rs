use super::Clause;
use crate::basic_types::ClauseReference;
use crate::engine::variables::Literal;
use crate::symsat_assert_moderate;

/// Owns every allocated clause; all clause storage goes through the
/// allocator so that the rest of the solver only handles [`ClauseReference`]s.
#[derive(Debug, Default)]
pub(crate) struct ClauseAllocator {
    clauses: Vec<Clause>,
}

impl ClauseAllocator {
    pub(crate) fn create_clause(
        &mut self,
        literals: Vec<Literal>,
        is_learned: bool,
    ) -> ClauseReference {
        let reference = ClauseReference::new(self.clauses.len() as u32);
        self.clauses.push(Clause::new(literals, is_learned));
        reference
    }

    pub(crate) fn delete_clause(&mut self, reference: ClauseReference) {
        self.clauses[reference.id() as usize].mark_deleted();
    }

    pub(crate) fn get_clause(&self, reference: ClauseReference) -> &Clause {
        let clause = &self.clauses[reference.id() as usize];
        symsat_assert_moderate!(!clause.is_deleted());
        clause
    }

    pub(crate) fn get_clause_mut(&mut self, reference: ClauseReference) -> &mut Clause {
        &mut self.clauses[reference.id() as usize]
    }

    /// All live clauses, e.g. for clause-database reduction or for writing the
    /// formula out in DIMACS form.
    pub(crate) fn live_clauses(&self) -> impl Iterator<Item = (ClauseReference, &Clause)> + '_ {
        self.clauses
            .iter()
            .enumerate()
            .filter(|(_, clause)| !clause.is_deleted())
            .map(|(id, clause)| (ClauseReference::new(id as u32), clause))
    }
}

impl std::ops::Index<ClauseReference> for ClauseAllocator {
    type Output = Clause;
    fn index(&self, reference: ClauseReference) -> &Clause {
        self.get_clause(reference)
    }
}
