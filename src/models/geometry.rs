//! Geometry readings consumed by the layout core
//!
//! All values are live DOM measurements in CSS pixels. The DOM layer
//! reads them and passes them in; nothing in this module touches the DOM,
//! so the whole core stays testable off-browser.

use serde::{Deserialize, Serialize};

/// CSS pixel value.
pub type Px = f64;

/// Computed `float` of a candidate, reduced to what detection needs.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CssFloat {
    #[default]
    None,
    /// Any non-`none` computed value (`left`, `right`, `inline-start`, ...).
    Floated,
}

impl CssFloat {
    /// Parse a computed style value. Anything but `none` floats.
    pub fn parse(value: &str) -> Self {
        if value.trim() == "none" {
            CssFloat::None
        } else {
            CssFloat::Floated
        }
    }
}

/// Computed `position` of a candidate.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CssPosition {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

impl CssPosition {
    /// Parse a computed style value; unknown keywords read as `static`.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "relative" => CssPosition::Relative,
            "absolute" => CssPosition::Absolute,
            "fixed" => CssPosition::Fixed,
            "sticky" => CssPosition::Sticky,
            _ => CssPosition::Static,
        }
    }

    /// `absolute` and `fixed` elements are laid out outside the column
    /// flow and are never candidates for centering.
    pub fn escapes_flow(self) -> bool {
        matches!(self, CssPosition::Absolute | CssPosition::Fixed)
    }
}

/// One candidate element's measurements at scan time.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct CandidateGeometry {
    pub float: CssFloat,
    pub position: CssPosition,

    /// Document-relative left offset.
    pub offset_left: Px,

    /// Rendered width including border and padding.
    pub outer_width: Px,
}

/// The column's measurements.
///
/// The width is snapshotted into the cache at detection time; the left
/// offset is read fresh on every centering pass because surrounding
/// reflow can move the column without resizing it.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ContainerGeometry {
    pub outer_width: Px,
    pub offset_left: Px,
}
