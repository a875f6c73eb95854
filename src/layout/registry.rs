//! WASM-owned engine registry (canonical source of truth)
//!
//! Engines are keyed by column id so both the event closures and the
//! exported API functions reach the same state. DOM handles are not
//! `Send` and stay on the widget side; only the pure engine state lives
//! here.

use std::collections::HashMap;
use std::sync::Mutex;

use lazy_static::lazy_static;

use super::engine::ColumnEngine;

lazy_static! {
    static ref ENGINES: Mutex<HashMap<String, ColumnEngine>> = Mutex::new(HashMap::new());
}

/// Install (or replace) the engine for a column id.
pub fn insert(column_id: &str, engine: ColumnEngine) {
    if let Ok(mut engines) = ENGINES.lock() {
        engines.insert(column_id.to_string(), engine);
    }
}

/// Run `f` against the engine for `column_id`. `None` when no column with
/// that id was ever attached; callers treat that as "nothing to do".
pub fn with_engine<R>(column_id: &str, f: impl FnOnce(&mut ColumnEngine) -> R) -> Option<R> {
    let mut engines = ENGINES.lock().ok()?;
    engines.get_mut(column_id).map(f)
}
