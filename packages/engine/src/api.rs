//! Public API - DOM bootstrap for host pages
//!
//! - wasm - `mount_pet()` wires page events, login detection and the frame
//!          driver to a [`Pet`](crate::pet::Pet)

pub mod wasm;

pub use wasm::{mount_pet, PetHandle};
