// Toggle/resize lifecycle of the column engine: one detection pass per
// cache generation, centering on live offsets, reset on leaving narrow.

use std::cell::Cell;

use narrowcol_wasm::layout::{ColumnEngine, MarginShift};
use narrowcol_wasm::models::{
    CacheStatus, CandidateGeometry, ContainerGeometry, CssFloat, CssPosition, DisplayMode,
    ElementKey, Px,
};

fn column(outer_width: Px, offset_left: Px) -> ContainerGeometry {
    ContainerGeometry {
        outer_width,
        offset_left,
    }
}

fn in_flow(offset_left: Px, outer_width: Px) -> CandidateGeometry {
    CandidateGeometry {
        float: CssFloat::None,
        position: CssPosition::Static,
        offset_left,
        outer_width,
    }
}

/// The standard page used below: 800px column sitting 50px from the page
/// edge, one oversized div flush with the column edge (excess 100) and
/// one fitting div.
fn standard_scan() -> Vec<(ElementKey, CandidateGeometry)> {
    vec![
        (ElementKey(0), in_flow(50.0, 900.0)),
        (ElementKey(1), in_flow(50.0, 400.0)),
    ]
}

#[test]
fn entering_narrow_detects_then_centers() {
    let mut engine = ColumnEngine::new(DisplayMode::Normal);
    let shifts = engine.enter_narrow(column(800.0, 50.0), standard_scan);

    assert!(engine.is_narrow());
    assert_eq!(engine.cache_status(), CacheStatus::Populated);
    assert_eq!(
        shifts,
        vec![MarginShift {
            key: ElementKey(0),
            shift_left: 50.0
        }],
        "only the oversized div is centered"
    );
}

#[test]
fn detection_runs_once_per_cache_generation() {
    let mut engine = ColumnEngine::new(DisplayMode::Normal);
    let scans = Cell::new(0);
    let scan = || {
        scans.set(scans.get() + 1);
        standard_scan()
    };

    let first = engine.enter_narrow(column(800.0, 50.0), scan);
    let second = engine.activate(column(800.0, 50.0), || {
        scans.set(scans.get() + 1);
        standard_scan()
    });

    assert_eq!(scans.get(), 1, "second activation must not rescan");
    assert_eq!(first, second, "unchanged geometry yields identical shifts");
}

#[test]
fn leaving_narrow_resets_without_discarding_the_cache() {
    let mut engine = ColumnEngine::new(DisplayMode::Normal);
    engine.enter_narrow(column(800.0, 50.0), standard_scan);

    let reset = engine.leave_narrow();
    assert!(!engine.is_narrow());
    assert_eq!(reset, vec![ElementKey(0)], "every centered element is reset");
    assert_eq!(
        engine.cache_status(),
        CacheStatus::Populated,
        "the cache survives the round trip"
    );

    // Re-entering narrow re-centers from the cache, no rescan.
    let shifts = engine.enter_narrow(column(800.0, 50.0), || {
        panic!("re-activation with a populated cache must not scan")
    });
    assert_eq!(shifts.len(), 1);
}

#[test]
fn reset_before_any_detection_is_a_no_op() {
    let mut engine = ColumnEngine::new(DisplayMode::Narrow);
    assert!(engine.leave_narrow().is_empty());
    assert_eq!(engine.cache_status(), CacheStatus::Empty);
}

#[test]
fn resize_in_normal_mode_does_nothing() {
    let mut engine = ColumnEngine::new(DisplayMode::Normal);
    let shifts = engine.resize(column(800.0, 50.0), || {
        panic!("resize in normal mode must not scan")
    });
    assert!(shifts.is_empty());
    assert_eq!(engine.cache_status(), CacheStatus::Empty);
}

#[test]
fn resize_while_narrow_builds_the_cache_lazily() {
    // A resize can be the first trigger when the page loads already
    // narrow; the activation routine builds the cache then.
    let mut engine = ColumnEngine::new(DisplayMode::Narrow);
    let shifts = engine.resize(column(800.0, 50.0), standard_scan);
    assert_eq!(engine.cache_status(), CacheStatus::Populated);
    assert_eq!(shifts.len(), 1);
}

#[test]
fn resize_recenters_against_the_live_offset() {
    let mut engine = ColumnEngine::new(DisplayMode::Normal);
    let shifts = engine.enter_narrow(column(800.0, 50.0), standard_scan);
    assert_eq!(shifts[0].shift_left, 50.0);

    // Surrounding reflow moved the column to 30px from the page edge;
    // the cached excess stays, the clamp tightens.
    let shifts = engine.resize(column(800.0, 30.0), || {
        panic!("resize with a populated cache must not scan")
    });
    assert_eq!(
        shifts,
        vec![MarginShift {
            key: ElementKey(0),
            shift_left: 30.0
        }]
    );
}

#[test]
fn deferred_image_is_centered_alone() {
    let mut engine = ColumnEngine::new(DisplayMode::Normal);
    engine.enter_narrow(column(800.0, 50.0), standard_scan);
    let before = engine.snapshot();

    // An anchor-wrapped paragraph image finishes loading after the batch
    // pass and turns out 60px too wide.
    let shift = engine
        .image_loaded(ElementKey(2), in_flow(50.0, 860.0), 50.0)
        .expect("an oversized image is centered as soon as it settles");
    assert_eq!(shift.key, ElementKey(2));
    assert_eq!(shift.shift_left, 30.0);

    // Already-cached siblings keep their records untouched.
    let after = engine.snapshot();
    for entry in &before.records {
        assert!(after.records.contains(entry));
    }
    assert_eq!(after.records.len(), before.records.len() + 1);
}

#[test]
fn deferred_image_that_fits_is_ignored() {
    let mut engine = ColumnEngine::new(DisplayMode::Normal);
    engine.enter_narrow(column(800.0, 50.0), standard_scan);

    assert!(engine
        .image_loaded(ElementKey(2), in_flow(50.0, 700.0), 50.0)
        .is_none());
    assert_eq!(engine.snapshot().records.len(), 1);
}

#[test]
fn image_load_before_any_detection_is_a_no_op() {
    let mut engine = ColumnEngine::new(DisplayMode::Normal);
    assert!(engine
        .image_loaded(ElementKey(0), in_flow(50.0, 900.0), 50.0)
        .is_none());
}

#[test]
fn late_image_load_is_cleared_by_the_next_reset() {
    // The load handler fires after the column went back to normal: the
    // shift is still issued, and the next reset clears it.
    let mut engine = ColumnEngine::new(DisplayMode::Normal);
    engine.enter_narrow(column(800.0, 50.0), standard_scan);
    engine.leave_narrow();

    let shift = engine.image_loaded(ElementKey(2), in_flow(50.0, 860.0), 50.0);
    assert!(shift.is_some(), "a settled handler applies even in normal mode");

    engine.enter_narrow(column(800.0, 50.0), || {
        panic!("cache is populated, no rescan")
    });
    let reset = engine.leave_narrow();
    assert!(reset.contains(&ElementKey(2)));
}

#[test]
fn snapshot_reflects_the_state_machine() {
    let mut engine = ColumnEngine::new(DisplayMode::Normal);
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.mode, DisplayMode::Normal);
    assert_eq!(snapshot.cache_status, CacheStatus::Empty);
    assert!(snapshot.records.is_empty());
    assert!(snapshot.centered.is_empty());

    engine.enter_narrow(column(800.0, 50.0), standard_scan);
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.mode, DisplayMode::Narrow);
    assert_eq!(snapshot.width_bound, 800.0);
    assert_eq!(snapshot.centered, vec![ElementKey(0)]);

    // Serializes cleanly for the diagnostic JSON export.
    let encoded = serde_json::to_string(&snapshot).unwrap();
    assert!(encoded.contains("\"narrow\""));
}
