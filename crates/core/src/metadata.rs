//! Ordered record of the shapes placed in one image.
//!
//! Entries stay in placement order: an entry drawn later (on top) always comes
//! after the entries it might cover, so a consumer can resolve overlap
//! priority from sequence order alone. Entries are never re-sorted.

use serde::Serialize;

use crate::error::SceneError;
use crate::geometry::BoundingRegion;
use crate::surface::MetadataSink;

/// One placed shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub kind: String,
    pub index: usize,
    pub region: BoundingRegion,
}

/// The metadata of a single image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SceneMetadata {
    entries: Vec<Entry>,
}

impl SceneMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `entry`. No deduplication, no sorting.
    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Returns true if `region` overlaps any stored region.
    pub fn is_overlapping(&self, region: &BoundingRegion) -> bool {
        self.entries.iter().any(|e| e.region.is_overlapping(region))
    }

    /// Hands the ordered entries to `sink` under `name`.
    pub fn save<S: MetadataSink + ?Sized>(&self, name: &str, sink: &mut S) -> Result<(), SceneError> {
        sink.save_metadata(name, &self.entries)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn regions(&self) -> impl Iterator<Item = &BoundingRegion> {
        self.entries.iter().map(|e| &e.region)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
