//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key names, pointer clicks)
//! - The wasm-bindgen surface the page script drives

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{Action, InputState};
