use crate::engine::propagation::ExternalPropagator;
use crate::engine::variables::Literal;
use crate::options::SolverConfig;
use crate::propagators::GraphPropagator;

pub(crate) fn lits(values: &[i32]) -> Vec<Literal> {
    values.iter().map(|&value| Literal::from_dimacs(value)).collect()
}

/// A graph propagator with enough variables for the given config, for tests
/// that drive the notification surface by hand.
pub(crate) fn graph_propagator(config: SolverConfig, num_variables: usize) -> GraphPropagator {
    GraphPropagator::new(config, num_variables).expect("no log files configured")
}

/// A propagator that does nothing, for engine tests that only need the
/// clausal part.
#[derive(Debug)]
pub(crate) struct NullPropagator;

impl ExternalPropagator for NullPropagator {
    fn name(&self) -> &str {
        "null"
    }
}

/// A propagator that emits a fixed set of clauses, one per propagation round,
/// once a trigger literal has been assigned.
#[derive(Debug)]
pub(crate) struct ScriptedClausePropagator {
    pub(crate) trigger: Literal,
    pub(crate) clauses: Vec<(Vec<Literal>, bool)>,
    triggered: bool,
    streaming: Option<(Vec<Literal>, bool)>,
}

impl ScriptedClausePropagator {
    pub(crate) fn new(trigger: Literal, clauses: Vec<(Vec<Literal>, bool)>) -> Self {
        ScriptedClausePropagator {
            trigger,
            clauses,
            triggered: false,
            streaming: None,
        }
    }
}

impl ExternalPropagator for ScriptedClausePropagator {
    fn name(&self) -> &str {
        "scripted-clauses"
    }

    fn notify_assignments(&mut self, literals: &[Literal]) {
        if literals.contains(&self.trigger) {
            self.triggered = true;
        }
    }

    fn has_external_clause(&mut self) -> Option<bool> {
        if !self.triggered {
            return None;
        }
        if self.streaming.is_none() && !self.clauses.is_empty() {
            self.streaming = Some(self.clauses.remove(0));
        }
        self.streaming.as_ref().map(|(_, forgettable)| *forgettable)
    }

    fn add_external_clause_literal(&mut self) -> Option<Literal> {
        let (clause, _) = self.streaming.as_mut()?;
        match clause.pop() {
            Some(literal) => Some(literal),
            None => {
                self.streaming = None;
                None
            }
        }
    }
}

/// A propagator that forces a single literal with a stored reason clause once
/// a trigger literal has been assigned.
#[derive(Debug)]
pub(crate) struct ScriptedUnitPropagator {
    pub(crate) trigger: Literal,
    pub(crate) forced: Literal,
    reason: Vec<Literal>,
    triggered: bool,
    propagated: bool,
}

impl ScriptedUnitPropagator {
    pub(crate) fn new(trigger: Literal, forced: Literal, reason: Vec<Literal>) -> Self {
        ScriptedUnitPropagator {
            trigger,
            forced,
            reason,
            triggered: false,
            propagated: false,
        }
    }
}

impl ExternalPropagator for ScriptedUnitPropagator {
    fn name(&self) -> &str {
        "scripted-unit"
    }

    fn notify_assignments(&mut self, literals: &[Literal]) {
        if literals.contains(&self.trigger) {
            self.triggered = true;
        }
    }

    fn propagate(&mut self) -> Option<Literal> {
        if self.triggered && !self.propagated {
            self.propagated = true;
            Some(self.forced)
        } else {
            None
        }
    }

    fn add_reason_clause_literal(&mut self, propagated: Literal) -> Option<Literal> {
        assert_eq!(propagated, self.forced);
        self.reason.pop()
    }
}
