//! Content-column narrow mode WASM module
//!
//! When a fixed-width content column is switched into narrow mode,
//! direct child elements wider than the column are detected once, cached,
//! and re-centered by shifting their left margin so the overflow reads as
//! balanced instead of clipped. Detection, centering math and the
//! toggle/resize lifecycle live in pure Rust; a thin web-sys layer reads
//! geometry and applies the computed margins.

pub mod layout;
pub mod models;

#[cfg(target_arch = "wasm32")]
pub mod api;
#[cfg(target_arch = "wasm32")]
pub mod dom;

// Re-export commonly used types
pub use layout::{ColumnEngine, EngineSnapshot, MarginShift};
pub use models::*;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("failed to initialize logger");

    log::info!("column adjuster WASM module initialized");
}
