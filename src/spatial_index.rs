//! Spatial Index Module
//!
//! R-tree over committed item layouts in world coordinates, used to find the
//! item under a pointer without scanning every item.

use crate::types::{ItemKey, Point, Rectangle};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// A canvas item's bounding box plus its stacking order.
#[derive(Debug, Clone)]
pub struct SpatialEntry {
    pub key: ItemKey,
    /// Higher values are drawn on top
    pub z: u64,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl SpatialEntry {
    pub fn new(key: ItemKey, z: u64, rect: &Rectangle) -> Self {
        Self {
            key,
            z,
            min_x: rect.x,
            min_y: rect.y,
            max_x: rect.right(),
            max_y: rect.bottom(),
        }
    }

    #[inline]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

/// Spatial index for canvas items.
///
/// Items keep the stacking order they were first inserted with; updating an
/// item's rectangle does not raise it. The order survives while a rectangle
/// is non-finite and therefore out of the tree.
#[derive(Debug)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<ItemKey, SpatialEntry>,
    stacking: HashMap<ItemKey, u64>,
    next_z: u64,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
            stacking: HashMap::new(),
            next_z: 0,
        }
    }

    /// Insert or move an item. Rectangles with non-finite coordinates are
    /// kept out of the tree (they can never be hit).
    pub fn insert(&mut self, key: &ItemKey, rect: &Rectangle) {
        if let Some(old_entry) = self.entries.remove(key) {
            self.tree.remove(&old_entry);
        }
        let z = match self.stacking.get(key) {
            Some(&z) => z,
            None => {
                self.next_z += 1;
                self.stacking.insert(key.clone(), self.next_z);
                self.next_z
            }
        };

        if !rect.is_finite() {
            return;
        }
        let entry = SpatialEntry::new(key.clone(), z, rect);
        self.tree.insert(entry.clone());
        self.entries.insert(key.clone(), entry);
    }

    /// Forget an item, including its place in the stacking order.
    pub fn remove(&mut self, key: &ItemKey) -> bool {
        let known = self.stacking.remove(key).is_some();
        if let Some(entry) = self.entries.remove(key) {
            self.tree.remove(&entry);
        }
        known
    }

    pub fn update(&mut self, key: &ItemKey, rect: &Rectangle) {
        self.insert(key, rect);
    }

    /// Topmost item containing the world point
    pub fn topmost_at(&self, point: Point) -> Option<ItemKey> {
        let point_envelope = AABB::from_point([point.x, point.y]);

        self.tree
            .locate_in_envelope_intersecting(&point_envelope)
            .filter(|entry| entry.contains_point(point.x, point.y))
            .max_by_key(|entry| entry.z)
            .map(|entry| entry.key.clone())
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
