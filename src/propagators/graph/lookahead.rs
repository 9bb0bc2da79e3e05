use super::EdgeEncoding;
use crate::engine::propagation::Probe;
use crate::engine::variables::Literal;
use crate::engine::variables::Variable;
use crate::options::LookaheadHeuristic;
use crate::statistics::log_statistic;

/// Probing-based decision selection: both polarities of every candidate
/// variable are assumed in turn, the resulting propagations are counted, and
/// the candidate with the best score becomes the next decision.
///
/// A candidate whose assumption immediately conflicts is a failed literal;
/// its opposite polarity is returned right away since it is forced.
#[derive(Debug)]
pub struct LookaheadDriver {
    enabled: bool,
    /// Probe all variables instead of only edge variables.
    all_variables: bool,
    heuristic: LookaheadHeuristic,
    /// True while candidates are being probed; cube emission is suppressed in
    /// this state.
    in_lookahead_state: bool,
    num_probes: u64,
    num_failed_literals: u64,
}

impl LookaheadDriver {
    pub fn new(
        enabled: bool,
        all_variables: bool,
        heuristic: LookaheadHeuristic,
    ) -> LookaheadDriver {
        LookaheadDriver {
            enabled: enabled || all_variables,
            all_variables,
            heuristic,
            in_lookahead_state: false,
            num_probes: 0,
            num_failed_literals: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_probing(&self) -> bool {
        self.in_lookahead_state
    }

    /// Reset transient probing state, e.g. when the solver backtracks past
    /// the level that was being probed.
    pub fn reset(&mut self) {
        self.in_lookahead_state = false;
    }

    pub fn log_statistics(&self) {
        log_statistic("lookaheadProbes", self.num_probes);
        log_statistic("lookaheadFailedLiterals", self.num_failed_literals);
    }

    fn candidates(&self, probe: &Probe<'_>, encoding: &EdgeEncoding) -> Vec<Variable> {
        let num_candidates = if self.all_variables {
            probe.num_variables()
        } else {
            encoding.num_edge_variables().min(probe.num_variables())
        };

        (0..num_candidates)
            .map(|index| Variable::new(index as u32))
            .filter(|variable| probe.is_variable_unassigned(*variable))
            .collect()
    }

    /// Pick the next decision literal, or `None` when lookahead is off or no
    /// candidate is left.
    pub fn decide(&mut self, probe: &mut Probe<'_>, encoding: &EdgeEncoding) -> Option<Literal> {
        if !self.enabled {
            return None;
        }

        let candidates = self.candidates(probe, encoding);
        if candidates.is_empty() {
            return None;
        }

        self.in_lookahead_state = true;

        let mut best: Option<(u64, Variable, bool)> = None;
        for variable in candidates {
            let positive = Literal::new(variable, true);

            self.num_probes += 2;
            let Some(num_positive) = probe.probe(positive) else {
                self.num_failed_literals += 1;
                self.in_lookahead_state = false;
                return Some(!positive);
            };
            let Some(num_negative) = probe.probe(!positive) else {
                self.num_failed_literals += 1;
                self.in_lookahead_state = false;
                return Some(positive);
            };

            let score = self.heuristic.score(num_positive, num_negative);
            // strict improvement keeps ties on the smallest variable
            if best.map_or(true, |(best_score, _, _)| score > best_score) {
                best = Some((score, variable, num_positive >= num_negative));
            }
        }

        self.in_lookahead_state = false;

        best.map(|(_, variable, polarity)| Literal::new(variable, polarity))
    }
}
