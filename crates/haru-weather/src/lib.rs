//! Weather lookups for Haru
//!
//! Resolves a place name to a KMA forecast grid cell, fetches the
//! ultra-short-term forecast and renders it as a short Korean report.

pub mod base_time;
pub mod format;
pub mod grid;
pub mod provider;
pub mod types;

pub use base_time::BaseTime;
pub use grid::{resolve_grid, GridCell};
pub use provider::WeatherService;
pub use types::*;
