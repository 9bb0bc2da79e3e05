use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::TerminationCondition;

/// A [`TerminationCondition`] backed by a flag raised from a signal handler
/// (see [`signal_hook::flag::register`]).
#[derive(Clone, Debug)]
pub struct SignalInterrupt {
    flag: Arc<AtomicBool>,
}

impl SignalInterrupt {
    pub fn new(flag: Arc<AtomicBool>) -> SignalInterrupt {
        SignalInterrupt { flag }
    }

    pub fn is_raised(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

impl TerminationCondition for SignalInterrupt {
    fn should_stop(&mut self) -> bool {
        self.is_raised()
    }
}
