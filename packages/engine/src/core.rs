//! Core - engine-wide plumbing shared by every system
//!
//! - log     - console logging macros (captured in-memory off wasm)
//! - random  - xorshift32 RNG with weighted picks
//! - clock   - host time helpers
//! - timers  - scoped virtual timer registry

#[macro_use]
pub mod log;
pub mod clock;
pub mod random;
pub mod timers;
