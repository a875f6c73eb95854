//! Per-column layout engine
//!
//! Owns the display-mode state machine, the detection cache and the set
//! of currently centered elements. The engine never reads or writes the
//! DOM: callers pass live measurements in and apply the plans that come
//! back, the same split the display-list layout engine uses between
//! WASM-side computation and browser-side application.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{centerer, detector};
use crate::models::{
    CacheStatus, CandidateGeometry, ContainerGeometry, DisplayMode, ElementKey, OverflowCache,
    Px,
};

/// One margin update for the DOM layer to apply: set
/// `margin-left: -shift_left px` on the element and mark it centered.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct MarginShift {
    pub key: ElementKey,
    pub shift_left: Px,
}

/// One cached record, flattened for diagnostics.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct RecordEntry {
    pub key: ElementKey,
    pub excess: Px,
    pub rol: Px,
}

/// Snapshot of the engine state, serializable across the JS boundary.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EngineSnapshot {
    pub mode: DisplayMode,
    pub cache_status: CacheStatus,
    pub width_bound: Px,
    pub records: Vec<RecordEntry>,
    pub centered: Vec<ElementKey>,
}

/// Layout state machine for one attached column.
#[derive(Clone, Debug, Default)]
pub struct ColumnEngine {
    mode: DisplayMode,
    cache: OverflowCache,
    centered: BTreeSet<ElementKey>,
}

impl ColumnEngine {
    /// The initial mode comes from whatever the column's class already
    /// encodes at attach time.
    pub fn new(initial_mode: DisplayMode) -> Self {
        ColumnEngine {
            mode: initial_mode,
            cache: OverflowCache::default(),
            centered: BTreeSet::new(),
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn is_narrow(&self) -> bool {
        self.mode.is_narrow()
    }

    pub fn cache_status(&self) -> CacheStatus {
        self.cache.status()
    }

    /// Activation routine: detect once if the cache is empty, then center
    /// every cached element against the live column offset.
    ///
    /// The candidate scan is invoked only when detection actually runs,
    /// so repeated activations cost no DOM reads beyond the column's own
    /// geometry.
    pub fn activate<F>(&mut self, column: ContainerGeometry, scan: F) -> Vec<MarginShift>
    where
        F: FnOnce() -> Vec<(ElementKey, CandidateGeometry)>,
    {
        if self.cache.status() == CacheStatus::Empty {
            self.cache.begin(column.outer_width);
            for (key, geometry) in scan() {
                if let Some(record) =
                    detector::measure_excess(&geometry, column.offset_left, self.cache.width_bound())
                {
                    self.cache.insert(key, record);
                }
            }
            log::debug!(
                "detected {} oversized element(s) against bound {}px",
                self.cache.len(),
                self.cache.width_bound()
            );
        }
        self.center_all(column.offset_left)
    }

    /// Enter narrow mode and run the activation routine.
    pub fn enter_narrow<F>(&mut self, column: ContainerGeometry, scan: F) -> Vec<MarginShift>
    where
        F: FnOnce() -> Vec<(ElementKey, CandidateGeometry)>,
    {
        self.mode = DisplayMode::Narrow;
        self.activate(column, scan)
    }

    /// Leave narrow mode. Returns the keys whose margin override must be
    /// cleared; the cache keeps its records for the next activation.
    pub fn leave_narrow(&mut self) -> Vec<ElementKey> {
        self.mode = DisplayMode::Normal;
        self.reset()
    }

    /// Window resize: re-center while narrow (building the cache lazily
    /// if a resize happens to be the first trigger), no-op otherwise.
    pub fn resize<F>(&mut self, column: ContainerGeometry, scan: F) -> Vec<MarginShift>
    where
        F: FnOnce() -> Vec<(ElementKey, CandidateGeometry)>,
    {
        if self.is_narrow() {
            self.activate(column, scan)
        } else {
            Vec::new()
        }
    }

    /// Center every cached element against the given live column offset.
    /// Empty plan when nothing was ever detected.
    pub fn center_all(&mut self, column_left: Px) -> Vec<MarginShift> {
        let shifts: Vec<MarginShift> = self
            .cache
            .iter()
            .map(|(key, record)| MarginShift {
                key,
                shift_left: centerer::shift_left(&record, column_left),
            })
            .collect();
        for shift in &shifts {
            self.centered.insert(shift.key);
        }
        shifts
    }

    /// Deferred evaluation of an image that finished loading after the
    /// batch scan. An oversized image is recorded and centered
    /// immediately, alone; siblings cached earlier are untouched.
    ///
    /// The shift is issued regardless of the current mode: a load handler
    /// registered while narrow may fire after the column went back to
    /// normal, and the stray shift is cleared by the next reset.
    pub fn image_loaded(
        &mut self,
        key: ElementKey,
        geometry: CandidateGeometry,
        column_left: Px,
    ) -> Option<MarginShift> {
        if self.cache.status() == CacheStatus::Empty {
            // No detection pass has run, so there is no width bound to
            // compare against. Nothing to do.
            return None;
        }
        let record = detector::measure_excess(&geometry, column_left, self.cache.width_bound())?;
        self.cache.insert(key, record);
        self.centered.insert(key);
        Some(MarginShift {
            key,
            shift_left: centerer::shift_left(&record, column_left),
        })
    }

    /// Clear the centered markers. Returns the keys to un-shift; empty
    /// when nothing was ever centered.
    pub fn reset(&mut self) -> Vec<ElementKey> {
        let keys: Vec<ElementKey> = self.centered.iter().copied().collect();
        self.centered.clear();
        keys
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            mode: self.mode,
            cache_status: self.cache.status(),
            width_bound: self.cache.width_bound(),
            records: self
                .cache
                .iter()
                .map(|(key, record)| RecordEntry {
                    key,
                    excess: record.excess,
                    rol: record.rol,
                })
                .collect(),
            centered: self.centered.iter().copied().collect(),
        }
    }
}
