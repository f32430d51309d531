//! Particle Field - decorative portfolio background and page effects
//!
//! - `core`: platform-agnostic particle field, frame loop, typing text,
//!   stat counter and page geometry
//! - `web` (feature `wasm`): canvas surface and DOM wiring, exported through
//!   `mount()` / `Portfolio::destroy()`
//! - `preview` (feature `cli`): native egui window running the same field

pub mod config;
pub mod core;
pub mod error;
pub mod time;

#[cfg(feature = "cli")]
pub mod preview;
#[cfg(feature = "cli")]
pub mod theme;

#[cfg(feature = "wasm")]
pub mod web;

pub use config::FieldConfig;
pub use error::{FieldError, Result};
