//! WASM API for column attachment and page decoration
//!
//! The attachment entry point wires the whole feature to one column and
//! returns a widget handle; the decoration functions are independent
//! one-shot passes. All of them degrade to a logged no-op when their
//! target is missing, matching the page script they replace.

use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize, log_info, serialize};
use crate::dom::column::{ColumnAdjuster, ColumnOptions};
use crate::dom::decorate;

/// A content column with narrow-mode behavior attached.
///
/// Keeping this handle alive keeps the column's click and resize
/// handlers alive; JavaScript callers should hold on to it.
#[wasm_bindgen]
pub struct ColumnWidget {
    inner: ColumnAdjuster,
}

#[wasm_bindgen]
impl ColumnWidget {
    /// Programmatic equivalent of clicking the expander control.
    pub fn toggle(&self) {
        self.inner.toggle();
    }

    #[wasm_bindgen(js_name = isNarrow)]
    pub fn is_narrow(&self) -> bool {
        self.inner.is_narrow()
    }

    #[wasm_bindgen(js_name = columnId)]
    pub fn column_id(&self) -> String {
        self.inner.column_id().to_string()
    }

    /// Diagnostic snapshot of the layout state (mode, cache status,
    /// cached records, centered keys).
    #[wasm_bindgen(js_name = layoutState)]
    pub fn layout_state(&self) -> Result<JsValue, JsValue> {
        match self.inner.snapshot() {
            Some(snapshot) => serialize(&snapshot, "Failed to serialize layout state"),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// The same snapshot as a JSON string, for logging and bug reports.
    #[wasm_bindgen(js_name = layoutStateJson)]
    pub fn layout_state_json(&self) -> Result<String, JsValue> {
        let Some(snapshot) = self.inner.snapshot() else {
            return Ok(String::new());
        };
        serde_json::to_string(&snapshot)
            .map_err(|e| JsValue::from_str(&format!("Failed to encode layout state: {}", e)))
    }
}

/// Attach narrow-mode behavior to the column with the given id.
///
/// Resolves to `undefined` when the column is missing: the feature is
/// skipped, not an error. `options` may be `undefined`, `null` or a
/// partial object; missing fields take their defaults.
#[wasm_bindgen(js_name = attachColumn)]
pub fn attach_column(column_id: &str, options: JsValue) -> Result<Option<ColumnWidget>, JsValue> {
    let options: ColumnOptions = if options.is_undefined() || options.is_null() {
        ColumnOptions::default()
    } else {
        deserialize(options, "Invalid column options")?
    };
    match ColumnAdjuster::attach(column_id, options) {
        Ok(Some(inner)) => Ok(Some(ColumnWidget { inner })),
        Ok(None) => Ok(None),
        Err(e) => Err(JsValue::from_str(&e.to_string())),
    }
}

/// Append a permalink anchor to every identified heading under the
/// element with the given id.
#[wasm_bindgen(js_name = addHeadingAnchors)]
pub fn add_heading_anchors(root_id: &str, label: &str) -> Result<(), JsValue> {
    let Some((document, root)) = resolve_root(root_id) else {
        log_info(&format!("no #{} on this page, heading anchors skipped", root_id));
        return Ok(());
    };
    decorate::add_heading_anchors(&document, &root, label);
    Ok(())
}

/// Append a permalink anchor to every marker-class element under the
/// element with the given id. `label_template` substitutes `{id}`.
#[wasm_bindgen(js_name = addMarkerAnchors)]
pub fn add_marker_anchors(
    root_id: &str,
    marker_class: &str,
    label_template: &str,
) -> Result<(), JsValue> {
    let Some((document, root)) = resolve_root(root_id) else {
        log_info(&format!("no #{} on this page, marker anchors skipped", root_id));
        return Ok(());
    };
    decorate::add_marker_anchors(&document, &root, marker_class, label_template);
    Ok(())
}

/// Enable expand/collapse on every element in the document carrying the
/// marker class.
#[wasm_bindgen(js_name = enableFolding)]
pub fn enable_folding(
    marker_class: &str,
    start_collapsed: bool,
    skip_links: bool,
) -> Result<(), JsValue> {
    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element());
    let Some(root) = root else {
        return Ok(());
    };
    decorate::enable_folding(&root, marker_class, start_collapsed, skip_links);
    Ok(())
}

fn resolve_root(root_id: &str) -> Option<(web_sys::Document, web_sys::Element)> {
    let document = web_sys::window()?.document()?;
    let root = document.get_element_by_id(root_id)?;
    Some((document, root))
}
