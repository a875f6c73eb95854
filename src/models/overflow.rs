//! Cached layout state: oversized-element records and display mode
//!
//! Cached data lives in an explicit side table keyed by [`ElementKey`];
//! nothing is ever attached to DOM nodes. The cache carries an explicit
//! status instead of an uninitialized/initialized distinction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::geometry::Px;

/// Stable identity of a candidate element within one attachment.
///
/// The DOM layer owns the key-to-element table; the layout core only ever
/// sees keys.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct ElementKey(pub usize);

/// Cached measurements of one oversized element, taken at detection time
/// and reused on every centering pass until the cache is rebuilt.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct OverflowRecord {
    /// Pixels the element's right edge extends past the column bound.
    /// Always strictly positive for a cached record.
    pub excess: Px,

    /// Left offset relative to the column at detection time.
    pub rol: Px,
}

/// Whether the cache has been through its detection pass.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    #[default]
    Empty,
    Populated,
}

/// Display mode of the column.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Normal,
    Narrow,
}

impl DisplayMode {
    pub fn is_narrow(self) -> bool {
        self == DisplayMode::Narrow
    }
}

/// Oversized-element cache for one column.
///
/// Populated at most once per attachment. Toggling back to normal keeps
/// the records so the next narrow activation skips re-detection; content
/// added to the column after the detection pass is not picked up.
#[derive(Clone, Debug, Default)]
pub struct OverflowCache {
    status: CacheStatus,
    width_bound: Px,
    records: BTreeMap<ElementKey, OverflowRecord>,
}

impl OverflowCache {
    pub fn status(&self) -> CacheStatus {
        self.status
    }

    /// Column outer width snapshotted when the cache was populated.
    pub fn width_bound(&self) -> Px {
        self.width_bound
    }

    /// Snapshot the column width and mark the cache populated. The
    /// detection pass that follows inserts the records.
    pub fn begin(&mut self, width_bound: Px) {
        self.status = CacheStatus::Populated;
        self.width_bound = width_bound;
        self.records.clear();
    }

    /// Record an oversized element. Re-inserting the same key overwrites
    /// its record, so a candidate evaluated twice is cached once.
    pub fn insert(&mut self, key: ElementKey, record: OverflowRecord) {
        self.records.insert(key, record);
    }

    pub fn get(&self, key: ElementKey) -> Option<&OverflowRecord> {
        self.records.get(&key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cached records in key order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementKey, OverflowRecord)> + '_ {
        self.records.iter().map(|(key, record)| (*key, *record))
    }
}
