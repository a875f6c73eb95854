//! Detection and centering core
//!
//! Pure geometry logic plus the per-column state machine. The DOM layer
//! feeds measurements in and applies the plans that come back out.

pub mod centerer;
pub mod detector;
pub mod engine;
pub mod registry;

pub use engine::{ColumnEngine, EngineSnapshot, MarginShift};
