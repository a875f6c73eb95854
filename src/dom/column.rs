//! Column attachment and event wiring
//!
//! Injects the expander control, scans candidates, and wires the
//! click/resize/image-load closures. The engine in the registry is the
//! source of truth; handlers read live geometry, feed it in, and apply
//! the returned margin plans to the element table kept here.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Event, HtmlElement, HtmlImageElement, Window};

use super::{geometry, DomError};
use crate::layout::engine::{ColumnEngine, EngineSnapshot, MarginShift};
use crate::layout::registry;
use crate::models::{CandidateGeometry, DisplayMode, ElementKey};

/// CSS hooks and labels, deserialized from the JS options object.
/// Missing fields take their defaults.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnOptions {
    /// Class toggled on the column in narrow mode.
    pub narrow_class: String,

    /// Marker class on elements that currently carry a centering shift.
    pub centered_class: String,

    /// Id given to the injected expander control.
    pub expander_id: String,
}

impl Default for ColumnOptions {
    fn default() -> Self {
        ColumnOptions {
            narrow_class: "narrow".to_string(),
            centered_class: "col-centered".to_string(),
            expander_id: "col-expander".to_string(),
        }
    }
}

/// Key-to-element table shared between handlers. An [`ElementKey`] is an
/// index into this table; keys are handed out in scan order and image
/// candidates are appended as they are registered.
type ElementTable = Rc<RefCell<Vec<HtmlElement>>>;

/// A content column with narrow-mode behavior attached.
///
/// Holds the click and resize closures so they stay alive for the life of
/// the page; per-image load closures are registered fire-once and leaked,
/// since an image element outlives any reasonable detach point.
pub struct ColumnAdjuster {
    column_id: String,
    column: HtmlElement,
    options: Rc<ColumnOptions>,
    elements: ElementTable,
    _click: Closure<dyn FnMut(Event)>,
    _resize: Closure<dyn FnMut(Event)>,
}

impl ColumnAdjuster {
    /// Wire narrow-mode behavior to the column with the given id.
    ///
    /// `Ok(None)` when no such element exists: the whole feature is
    /// skipped, which is the expected situation on pages without a
    /// content column. If the column's class already encodes narrow mode
    /// (restored markup from a prior session), the activation routine
    /// runs once immediately.
    pub fn attach(column_id: &str, options: ColumnOptions) -> Result<Option<Self>, DomError> {
        let window = web_sys::window().ok_or(DomError::NoDocument)?;
        let document = window.document().ok_or(DomError::NoDocument)?;

        let Some(element) = document.get_element_by_id(column_id) else {
            log::info!("no #{} on this page, column adjustment disabled", column_id);
            return Ok(None);
        };
        let column: HtmlElement = element
            .dyn_into()
            .map_err(|_| DomError::NotHtml(column_id.to_string()))?;

        let initial = if column.class_list().contains(&options.narrow_class) {
            DisplayMode::Narrow
        } else {
            DisplayMode::Normal
        };
        registry::insert(column_id, ColumnEngine::new(initial));

        let options = Rc::new(options);
        let elements: ElementTable = Rc::new(RefCell::new(Vec::new()));

        // Expander control, prepended so it renders at the top of the column.
        let expander = document
            .create_element("span")
            .map_err(|err| DomError::Dom(format!("{err:?}")))?;
        expander.set_id(&options.expander_id);
        column
            .prepend_with_node_1(&expander)
            .map_err(|err| DomError::Dom(format!("{err:?}")))?;

        let click = {
            let column = column.clone();
            let column_id = column_id.to_string();
            let elements = elements.clone();
            let options = options.clone();
            Closure::wrap(Box::new(move |_event: Event| {
                let Some(window) = web_sys::window() else {
                    return;
                };
                toggle_column(&window, &column, &column_id, &elements, &options);
            }) as Box<dyn FnMut(Event)>)
        };
        expander
            .add_event_listener_with_callback("click", click.as_ref().unchecked_ref())
            .map_err(|err| DomError::Dom(format!("{err:?}")))?;

        let resize = {
            let column = column.clone();
            let column_id = column_id.to_string();
            let elements = elements.clone();
            let options = options.clone();
            Closure::wrap(Box::new(move |_event: Event| {
                let narrow =
                    registry::with_engine(&column_id, |engine| engine.is_narrow()).unwrap_or(false);
                if !narrow {
                    return;
                }
                let Some(window) = web_sys::window() else {
                    return;
                };
                activate_column(&window, &column, &column_id, &elements, &options);
            }) as Box<dyn FnMut(Event)>)
        };
        window
            .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
            .map_err(|err| DomError::Dom(format!("{err:?}")))?;

        if initial.is_narrow() {
            activate_column(&window, &column, column_id, &elements, &options);
        }

        log::debug!("column #{} attached ({:?} mode)", column_id, initial);
        Ok(Some(ColumnAdjuster {
            column_id: column_id.to_string(),
            column,
            options,
            elements,
            _click: click,
            _resize: resize,
        }))
    }

    /// Programmatic equivalent of clicking the expander control.
    pub fn toggle(&self) {
        if let Some(window) = web_sys::window() {
            toggle_column(
                &window,
                &self.column,
                &self.column_id,
                &self.elements,
                &self.options,
            );
        }
    }

    pub fn is_narrow(&self) -> bool {
        registry::with_engine(&self.column_id, |engine| engine.is_narrow()).unwrap_or(false)
    }

    pub fn column_id(&self) -> &str {
        &self.column_id
    }

    pub fn snapshot(&self) -> Option<EngineSnapshot> {
        registry::with_engine(&self.column_id, |engine| engine.snapshot())
    }
}

/// Toggle action: flip the narrow class, then run the matching half of
/// the state machine. The class changes before geometry is read so the
/// detection snapshot measures the narrowed column.
fn toggle_column(
    window: &Window,
    column: &HtmlElement,
    column_id: &str,
    elements: &ElementTable,
    options: &Rc<ColumnOptions>,
) {
    let narrow = registry::with_engine(column_id, |engine| engine.is_narrow()).unwrap_or(false);
    if narrow {
        let keys =
            registry::with_engine(column_id, |engine| engine.leave_narrow()).unwrap_or_default();
        let _ = column.class_list().remove_1(&options.narrow_class);
        clear_shifts(elements, options, &keys);
        log::debug!("column #{} back to normal, {} element(s) reset", column_id, keys.len());
    } else {
        let _ = column.class_list().add_1(&options.narrow_class);
        let geometry = geometry::container_geometry(window, column);
        let shifts = registry::with_engine(column_id, |engine| {
            engine.enter_narrow(geometry, || {
                scan_candidates(window, column, column_id, elements, options)
            })
        })
        .unwrap_or_default();
        apply_shifts(elements, options, &shifts);
        log::debug!("column #{} narrowed, {} element(s) centered", column_id, shifts.len());
    }
}

/// Activation routine against live geometry: detect if the cache is
/// empty, then center. Used by the resize handler and the initial
/// already-narrow page load.
fn activate_column(
    window: &Window,
    column: &HtmlElement,
    column_id: &str,
    elements: &ElementTable,
    options: &Rc<ColumnOptions>,
) {
    let geometry = geometry::container_geometry(window, column);
    let shifts = registry::with_engine(column_id, |engine| {
        engine.activate(geometry, || {
            scan_candidates(window, column, column_id, elements, options)
        })
    })
    .unwrap_or_default();
    apply_shifts(elements, options, &shifts);
}

/// One detection scan: direct-child tables and divs, measured now, plus
/// anchor-wrapped paragraph images. Images whose data is already loaded
/// are measured with the batch; the rest get a fire-once load listener
/// that evaluates them against the cached bound when they settle.
fn scan_candidates(
    window: &Window,
    column: &HtmlElement,
    column_id: &str,
    elements: &ElementTable,
    options: &Rc<ColumnOptions>,
) -> Vec<(ElementKey, CandidateGeometry)> {
    let mut candidates = Vec::new();

    let children = column.children();
    for index in 0..children.length() {
        let Some(child) = children.item(index) else {
            continue;
        };
        let tag = child.tag_name();
        if tag != "TABLE" && tag != "DIV" {
            continue;
        }
        let Ok(child) = child.dyn_into::<HtmlElement>() else {
            continue;
        };
        let key = allocate_key(elements, &child);
        candidates.push((key, geometry::candidate_geometry(window, &child)));
    }

    if let Ok(images) = column.query_selector_all(":scope > p > a > img") {
        for index in 0..images.length() {
            let Some(node) = images.item(index) else {
                continue;
            };
            let Ok(image) = node.dyn_into::<HtmlImageElement>() else {
                continue;
            };
            let element: HtmlElement = image.clone().unchecked_into();
            let key = allocate_key(elements, &element);
            register_image_listener(&image, key, column, column_id, elements, options);
            if image.complete() {
                candidates.push((key, geometry::candidate_geometry(window, &element)));
            }
        }
    }

    candidates
}

fn allocate_key(elements: &ElementTable, element: &HtmlElement) -> ElementKey {
    let mut table = elements.borrow_mut();
    table.push(element.clone());
    ElementKey(table.len() - 1)
}

/// Fire-once load listener for an image that was not complete at scan
/// time. The handler runs whenever the image settles, even if the column
/// has gone back to normal by then; any stray shift is cleared by the
/// next reset.
fn register_image_listener(
    image: &HtmlImageElement,
    key: ElementKey,
    column: &HtmlElement,
    column_id: &str,
    elements: &ElementTable,
    options: &Rc<ColumnOptions>,
) {
    let closure = {
        let image: HtmlElement = image.clone().unchecked_into();
        let column = column.clone();
        let column_id = column_id.to_string();
        let elements = elements.clone();
        let options = options.clone();
        Closure::wrap(Box::new(move |_event: Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let geometry_reading = geometry::candidate_geometry(&window, &image);
            let column_left = geometry::document_left(&window, &column);
            let shift = registry::with_engine(&column_id, |engine| {
                engine.image_loaded(key, geometry_reading, column_left)
            })
            .flatten();
            if let Some(shift) = shift {
                apply_shifts(&elements, &options, &[shift]);
            }
        }) as Box<dyn FnMut(Event)>)
    };

    let mut listener_options = AddEventListenerOptions::new();
    listener_options.once(true);
    let _ = image.add_event_listener_with_callback_and_add_event_listener_options(
        "load",
        closure.as_ref().unchecked_ref(),
        &listener_options,
    );
    closure.forget(); // fires at most once, lives as long as the image
}

/// Apply a centering plan: negative left margin plus the marker class.
fn apply_shifts(elements: &ElementTable, options: &ColumnOptions, shifts: &[MarginShift]) {
    let table = elements.borrow();
    for shift in shifts {
        let Some(element) = table.get(shift.key.0) else {
            continue;
        };
        let _ = element
            .style()
            .set_property("margin-left", &format!("{}px", -shift.shift_left));
        let _ = element.class_list().add_1(&options.centered_class);
    }
}

/// Undo a centering plan: drop the margin override and the marker class.
fn clear_shifts(elements: &ElementTable, options: &ColumnOptions, keys: &[ElementKey]) {
    let table = elements.borrow();
    for key in keys {
        let Some(element) = table.get(key.0) else {
            continue;
        };
        let _ = element.style().remove_property("margin-left");
        let _ = element.class_list().remove_1(&options.centered_class);
    }
}
