mod external_propagator;
mod probe;

pub use external_propagator::ExternalPropagator;
pub use probe::Probe;
