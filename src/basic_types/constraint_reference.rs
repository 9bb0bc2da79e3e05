use bitfield::bitfield;

/// Reference to a clause stored in the
/// [`ClauseAllocator`](crate::engine::sat::ClauseAllocator).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct ClauseReference {
    id: u32,
}

impl ClauseReference {
    pub(crate) fn new(id: u32) -> ClauseReference {
        ClauseReference { id }
    }

    pub(crate) fn id(&self) -> u32 {
        self.id
    }
}

bitfield! {
    /// The reason attached to a propagated literal on the trail. Either an
    /// allocated clause, or the marker for a propagation performed by the
    /// external propagator, whose reason clause is only produced on demand.
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct ConstraintReference(u32);
    impl Debug;
    u32, clause_id, set_clause_id: 30, 0;
    pub is_external, set_is_external: 31;
}

impl ConstraintReference {
    pub(crate) fn from_clause(clause_reference: ClauseReference) -> ConstraintReference {
        let mut reference = ConstraintReference(0);
        reference.set_clause_id(clause_reference.id());
        reference
    }

    pub(crate) fn external_propagation() -> ConstraintReference {
        let mut reference = ConstraintReference(0);
        reference.set_is_external(true);
        reference
    }

    pub(crate) fn as_clause_reference(&self) -> ClauseReference {
        debug_assert!(!self.is_external());
        ClauseReference::new(self.clause_id())
    }
}
