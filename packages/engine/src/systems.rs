//! Systems - pure behavior over domain data
//!
//! Each system is deterministic given its inputs (config, rng, `now_ms`);
//! the pet core wires them together and owns all mutable state.

pub mod activity;
pub mod input;
pub mod physics;
pub mod scene;
pub mod speech;
