//! Oversize detection
//!
//! Classifies one candidate's geometry against the column bound. Floated
//! and absolutely/fixed-positioned elements sit outside the column flow
//! and are never treated as oversized, whatever their width.

use crate::models::{CandidateGeometry, CssFloat, OverflowRecord, Px};

/// Measure how far a candidate's right edge extends past the column bound.
///
/// Returns a record only for a strictly positive excess: an element whose
/// right edge lands exactly on the bound is not oversized.
pub fn measure_excess(
    candidate: &CandidateGeometry,
    column_left: Px,
    width_bound: Px,
) -> Option<OverflowRecord> {
    if candidate.float != CssFloat::None {
        return None;
    }
    if candidate.position.escapes_flow() {
        return None;
    }
    let rol = candidate.offset_left - column_left;
    let excess = candidate.outer_width + rol - width_bound;
    (excess > 0.0).then_some(OverflowRecord { excess, rol })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CssPosition;

    fn candidate(offset_left: Px, outer_width: Px) -> CandidateGeometry {
        CandidateGeometry {
            float: CssFloat::None,
            position: CssPosition::Static,
            offset_left,
            outer_width,
        }
    }

    #[test]
    fn oversized_candidate_is_recorded() {
        let record = measure_excess(&candidate(50.0, 900.0), 50.0, 800.0).unwrap();
        assert_eq!(record.rol, 0.0);
        assert_eq!(record.excess, 100.0);
    }

    #[test]
    fn offset_inside_the_column_adds_to_the_excess() {
        let record = measure_excess(&candidate(120.0, 850.0), 50.0, 800.0).unwrap();
        assert_eq!(record.rol, 70.0);
        assert_eq!(record.excess, 120.0);
    }

    #[test]
    fn exactly_at_the_bound_is_not_oversized() {
        assert!(measure_excess(&candidate(50.0, 800.0), 50.0, 800.0).is_none());
    }

    #[test]
    fn narrower_than_the_bound_is_not_oversized() {
        assert!(measure_excess(&candidate(50.0, 400.0), 50.0, 800.0).is_none());
    }

    #[test]
    fn floated_candidates_are_skipped_regardless_of_width() {
        let mut wide = candidate(50.0, 5000.0);
        wide.float = CssFloat::Floated;
        assert!(measure_excess(&wide, 50.0, 800.0).is_none());
    }

    #[test]
    fn absolute_and_fixed_candidates_are_skipped() {
        for position in [CssPosition::Absolute, CssPosition::Fixed] {
            let mut wide = candidate(50.0, 5000.0);
            wide.position = position;
            assert!(measure_excess(&wide, 50.0, 800.0).is_none());
        }
    }

    #[test]
    fn relative_and_sticky_candidates_still_count() {
        for position in [CssPosition::Relative, CssPosition::Sticky] {
            let mut wide = candidate(50.0, 900.0);
            wide.position = position;
            assert!(measure_excess(&wide, 50.0, 800.0).is_some());
        }
    }
}
