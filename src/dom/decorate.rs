//! One-shot DOM decoration: section anchors and foldable sections
//!
//! Runs once at page setup and is independent of the centering core;
//! nothing here reads or writes the detection cache.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event};

/// Class given to every injected permalink anchor.
const ANCHOR_CLASS: &str = "section-anchor";

/// Class toggled on a foldable section when it is folded shut.
const COLLAPSED_CLASS: &str = "collapsed";

/// Append a pilcrow permalink to every `h1`-`h6` under `root` that
/// carries a non-empty id. Headings without an id have nothing to link
/// to and are left alone.
pub fn add_heading_anchors(document: &Document, root: &Element, label: &str) {
    let Ok(headings) = root.query_selector_all("h1, h2, h3, h4, h5, h6") else {
        return;
    };
    for index in 0..headings.length() {
        let Some(heading) = headings.item(index).and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        let id = heading.id();
        if id.is_empty() {
            continue;
        }
        append_anchor(document, &heading, &id, label);
    }
}

/// Same permalink affordance for inline elements carrying the marker
/// class, titled from a template with an `{id}` placeholder.
pub fn add_marker_anchors(
    document: &Document,
    root: &Element,
    marker_class: &str,
    label_template: &str,
) {
    let Ok(markers) = root.query_selector_all(&format!(".{}", marker_class)) else {
        return;
    };
    for index in 0..markers.length() {
        let Some(marker) = markers.item(index).and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        let id = marker.id();
        if id.is_empty() {
            continue;
        }
        let label = label_template.replace("{id}", &id);
        append_anchor(document, &marker, &id, &label);
    }
}

fn append_anchor(document: &Document, target: &Element, id: &str, title: &str) {
    let Ok(anchor) = document.create_element("a") else {
        return;
    };
    anchor.set_class_name(ANCHOR_CLASS);
    let _ = anchor.set_attribute("href", &format!("#{}", id));
    let _ = anchor.set_attribute("title", title);
    anchor.set_text_content(Some("\u{00b6}"));
    let _ = target.append_child(&anchor);
}

/// Enable expand/collapse on every element under `root` carrying the
/// marker class. `start_collapsed` folds them all immediately;
/// `skip_links` keeps clicks on links inside a section from folding it,
/// so following a link does not also collapse the content around it.
pub fn enable_folding(root: &Element, foldable_class: &str, start_collapsed: bool, skip_links: bool) {
    let Ok(sections) = root.query_selector_all(&format!(".{}", foldable_class)) else {
        return;
    };
    for index in 0..sections.length() {
        let Some(section) = sections.item(index).and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        if start_collapsed {
            let _ = section.class_list().add_1(COLLAPSED_CLASS);
        }

        let closure = {
            let section = section.clone();
            Closure::wrap(Box::new(move |event: Event| {
                if skip_links {
                    let clicked_link = event
                        .target()
                        .and_then(|target| target.dyn_into::<Element>().ok())
                        .and_then(|target| target.closest("a").ok().flatten())
                        .is_some();
                    if clicked_link {
                        return;
                    }
                }
                let _ = section.class_list().toggle(COLLAPSED_CLASS);
            }) as Box<dyn FnMut(Event)>)
        };
        let _ = section
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget(); // lives as long as the section
    }
}
