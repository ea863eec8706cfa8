//! Toast Pet Engine - interaction, physics and activity engine for the
//! classroom desktop pet, compiled to WASM
//!
//! Architecture:
//! - core/     - logging, clock, rng, timer registry
//! - domain/   - pet state, settings, dialogue, config, saved record
//! - systems/  - physics, input, activities, speech, scenes
//! - host/     - `PetView` / `SettingsStore` seams and their DOM + in-memory impls
//! - pet/      - `PetCore` state controller and the `Pet` wasm facade
//! - api/      - DOM bootstrap (`mount_pet`)

// Logging macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod systems;
pub mod host;
pub mod pet;
pub mod api;

use wasm_bindgen::prelude::*;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    pet_log!("Toast pet engine {} initialized", version());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use api::wasm::{mount_pet, PetHandle};
pub use domain::actions::{Action, ActionOutcome, ActivityKind};
pub use domain::config::EngineConfig;
pub use domain::errors::{PetError, PetResult};
pub use domain::state::PetStateKind;
pub use pet::{Motion, Pet, PetCore, TickReport};
