//! Simulation module
//!
//! All gameplay physics lives here. This module must stay pure:
//! - Caller-supplied frame time only, no clocks
//! - No rendering, audio or platform dependencies
//! - Results are reported, never acted on

pub mod layout;
pub mod physics;

pub use layout::{BrickColor, BrickRow, DEFAULT_ROWS, Layout, LayoutError};
pub use physics::{GameEvent, PaddleZone, Physics, StepResult};
