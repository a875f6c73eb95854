//! DOM bindings for the layout core (wasm32 only)
//!
//! Thin layer over web-sys: geometry readers, candidate scanning, event
//! wiring and one-shot decoration. All layout decisions happen in
//! `crate::layout`; this layer only reads measurements and applies the
//! plans that come back.

pub mod column;
pub mod decorate;
pub mod geometry;

use thiserror::Error;

// Re-export commonly used types
pub use column::{ColumnAdjuster, ColumnOptions};

/// Environment failures surfaced from attachment.
///
/// Layout operations themselves never error: a missing column is a skip,
/// centering before detection is an empty plan, and individual DOM write
/// failures inside handlers are ignored.
#[derive(Debug, Clone, Error)]
pub enum DomError {
    /// No `window`/`document` in this environment.
    #[error("window or document is not available")]
    NoDocument,

    /// The id resolved to a node that is not an HTML element.
    #[error("element #{0} is not an HTML element")]
    NotHtml(String),

    /// A DOM call failed while wiring the column.
    #[error("DOM operation failed: {0}")]
    Dom(String),
}
