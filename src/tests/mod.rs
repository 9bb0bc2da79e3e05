#![cfg(test)]

mod cube_partitioning;
mod engine_with_propagator;
mod graph_search;
mod helpers;
mod lookahead_probing;
mod propagator_notifications;
