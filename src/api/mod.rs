//! JavaScript-facing WASM API
//!
//! This module provides the JS-facing surface for the column adjuster.
//!
//! # Module Structure
//!
//! - `helpers`: console logging externs and serialization helpers
//! - `core`: attachment entry points, the exported column widget and the
//!   one-shot decoration functions

pub mod core;
pub mod helpers;

// Re-export all public functions to keep the flat API surface
pub use core::*;
