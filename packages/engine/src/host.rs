//! Host seam - everything the core needs from the page, behind traits
//!
//! - view   - `PetView`, the rendering surface
//! - store  - `SettingsStore`, key/value persistence
//! - dom    - `web_sys` implementations of both
//! - memory - in-memory implementations for headless hosts and tests

pub mod dom;
pub mod memory;
pub mod store;
pub mod view;

pub use dom::DomView;
pub use memory::{MemoryStore, RecordingView, ViewCall};
pub use store::{LocalStorageStore, SettingsStore};
pub use view::{PetView, VisualFlag};
