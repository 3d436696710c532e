//! Flyplot Core
//!
//! Shared building blocks for the flyplot crates: colors, math helpers,
//! hash collections, logging setup and profiling hooks.

pub mod alloc;
pub mod color;
pub mod logging;
pub mod math;
pub mod profiling;

pub use color::Color;
