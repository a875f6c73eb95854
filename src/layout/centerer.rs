//! Centering math
//!
//! Computes the left shift that visually balances an oversized element's
//! overflow, from its cached record and the column's live left offset.

use crate::models::{OverflowRecord, Px};

/// Left shift (in pixels) for one oversized element.
///
/// When the overflow exceeds the element's own offset inside the column,
/// the part beyond that offset is split evenly between the left and right
/// sides; otherwise the whole excess fits within the existing offset and
/// is shifted as-is. The result is clamped to the column's left offset so
/// the element never moves left of the column's own left edge.
///
/// The caller applies the shift as `margin-left: -shift`.
pub fn shift_left(record: &OverflowRecord, column_left: Px) -> Px {
    let shift = if record.excess > record.rol {
        record.rol + (record.excess - record.rol) / 2.0
    } else {
        record.excess
    };
    shift.min(column_left)
}
