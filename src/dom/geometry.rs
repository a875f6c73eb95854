//! Geometry readers over web-sys
//!
//! The contract the layout core needs from the DOM: document-relative
//! left offsets, outer widths including border and padding, and the
//! computed `float`/`position` of a candidate. Everything is readable at
//! arbitrary times; the core decides what to snapshot and what to re-read.

use web_sys::{Element, HtmlElement, Window};

use crate::models::{CandidateGeometry, ContainerGeometry, CssFloat, CssPosition, Px};

/// Document-relative left offset (border box).
pub fn document_left(window: &Window, element: &Element) -> Px {
    let rect = element.get_bounding_client_rect();
    rect.left() + window.page_x_offset().unwrap_or(0.0)
}

/// Rendered width including border and padding.
pub fn outer_width(element: &HtmlElement) -> Px {
    f64::from(element.offset_width())
}

pub fn container_geometry(window: &Window, column: &HtmlElement) -> ContainerGeometry {
    ContainerGeometry {
        outer_width: outer_width(column),
        offset_left: document_left(window, column),
    }
}

/// Measurements for one candidate. A candidate whose computed style is
/// unavailable reads as unstyled (`float: none; position: static`), which
/// keeps it eligible rather than silently dropping it.
pub fn candidate_geometry(window: &Window, element: &HtmlElement) -> CandidateGeometry {
    let (float, position) = match window.get_computed_style(element) {
        Ok(Some(style)) => (
            CssFloat::parse(&style.get_property_value("float").unwrap_or_default()),
            CssPosition::parse(&style.get_property_value("position").unwrap_or_default()),
        ),
        _ => (CssFloat::None, CssPosition::Static),
    };
    CandidateGeometry {
        float,
        position,
        offset_left: document_left(window, element),
        outer_width: outer_width(element),
    }
}
