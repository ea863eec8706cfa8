//! Input System - pointer gestures in viewport coordinates
//!
//! - pointer - drag tracking with slop, EMA velocity and release hand-off
//! - menu    - context menu placement around the pet
//! - eyes    - pupil offset toward the pointer

mod eyes;
mod menu;
mod pointer;

pub use eyes::pupil_offset;
pub use menu::menu_position;
pub use pointer::{DragPhase, DragTracker, PointerButton, PointerKind};
