//! Domain - plain data the systems operate on
//!
//! Nothing in here touches the DOM or the clock.

pub mod actions;
pub mod config;
pub mod dialogue;
pub mod errors;
pub mod geometry;
pub mod record;
pub mod scene;
pub mod settings;
pub mod state;
pub mod topping;
