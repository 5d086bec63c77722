// Copyright 2025 the Polybrush Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Feature storage seen by the brush.
//!
//! The host owns its features. The brush reaches them through the
//! [`FeatureSource`] trait, passed as `&mut S` to every call, and never holds
//! on to the source between events.
//!
//! [`VectorSource`] is a small ordered in-memory implementation that records
//! a [`SourceEvent`] for each change, which is enough for tests and simple
//! hosts. Recorded events accumulate until the host calls
//! [`VectorSource::drain_events`]; hosts that never drain should turn
//! recording off with [`VectorSource::set_event_recording`].
//!
//! ## Minimal example
//!
//! ```
//! use polybrush::source::{FeatureSource, GeometryKind, SourceEvent, VectorSource};
//! use polybrush_geometry::ring::polygon_from_coords;
//!
//! let mut source = VectorSource::new();
//! let id = source.add_polygon(polygon_from_coords(&[(0., 0.), (1., 0.), (1., 1.)]));
//!
//! assert_eq!(source.geometry_kind(id), Some(GeometryKind::Polygon));
//! assert!(source.remove(id).is_some());
//! let events: Vec<_> = source.drain_events().collect();
//! assert_eq!(events, vec![SourceEvent::Added(id), SourceEvent::Removed(id)]);
//! ```

use geo::{Geometry, Polygon};
use hashbrown::HashMap;

/// Stable identifier of a feature within its source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureId(pub u64);

/// Coarse geometry type of a feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    /// Points and multi-points.
    Point,
    /// Lines, line strings and multi-line-strings.
    LineString,
    /// A single polygon (including rects and triangles).
    Polygon,
    /// Multi-polygons.
    MultiPolygon,
    /// Geometry collections.
    Collection,
}

impl GeometryKind {
    /// Classifies a `geo` geometry.
    #[must_use]
    pub fn of(geometry: &Geometry<f64>) -> Self {
        match geometry {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Self::Point,
            Geometry::Line(_) | Geometry::LineString(_) | Geometry::MultiLineString(_) => {
                Self::LineString
            }
            Geometry::Polygon(_) | Geometry::Rect(_) | Geometry::Triangle(_) => Self::Polygon,
            Geometry::MultiPolygon(_) => Self::MultiPolygon,
            Geometry::GeometryCollection(_) => Self::Collection,
        }
    }
}

/// Mutable access to a host's features.
///
/// Only features of kind [`GeometryKind::Polygon`] are ever edited; others
/// are skipped by every brush pass.
pub trait FeatureSource {
    /// Ids of all features, in the source's iteration order.
    fn feature_ids(&self) -> Vec<FeatureId>;

    /// Geometry kind of `id`, or `None` if it does not exist.
    fn geometry_kind(&self, id: FeatureId) -> Option<GeometryKind>;

    /// A copy of the polygon of `id`, or `None` if it is missing or not a
    /// polygon.
    fn polygon(&self, id: FeatureId) -> Option<Polygon<f64>>;

    /// Replaces the geometry of `id`. Returns `false` if it does not exist.
    fn set_polygon(&mut self, id: FeatureId, polygon: Polygon<f64>) -> bool;

    /// Inserts a new polygon feature and returns its id.
    fn add_polygon(&mut self, polygon: Polygon<f64>) -> FeatureId;

    /// Removes `id`, returning its polygon when it was one.
    fn remove(&mut self, id: FeatureId) -> Option<Polygon<f64>>;
}

/// A change recorded by [`VectorSource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceEvent {
    /// A feature was inserted.
    Added(FeatureId),
    /// A feature was removed.
    Removed(FeatureId),
    /// A feature's geometry was replaced.
    Changed(FeatureId),
}

#[derive(Clone, Debug)]
struct Feature {
    id: FeatureId,
    geometry: Geometry<f64>,
}

/// Ordered in-memory feature store.
///
/// Every change is queued as a [`SourceEvent`] until drained. The queue is
/// unbounded, so either drain it after each batch of events or disable
/// recording.
#[derive(Clone, Debug, Default)]
pub struct VectorSource {
    features: Vec<Feature>,
    index: HashMap<FeatureId, usize>,
    next_id: u64,
    events: Vec<SourceEvent>,
    events_muted: bool,
}

impl VectorSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts any geometry and returns its id.
    pub fn add_geometry(&mut self, geometry: impl Into<Geometry<f64>>) -> FeatureId {
        let id = FeatureId(self.next_id);
        self.next_id += 1;
        self.index.insert(id, self.features.len());
        self.features.push(Feature {
            id,
            geometry: geometry.into(),
        });
        self.record(SourceEvent::Added(id));
        id
    }

    /// The geometry of `id`.
    #[must_use]
    pub fn geometry(&self, id: FeatureId) -> Option<&Geometry<f64>> {
        let &slot = self.index.get(&id)?;
        Some(&self.features[slot].geometry)
    }

    /// Returns `true` if `id` is in the source.
    #[must_use]
    pub fn contains(&self, id: FeatureId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns `true` if the source has no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Features in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, &Geometry<f64>)> + '_ {
        self.features.iter().map(|f| (f.id, &f.geometry))
    }

    /// Takes the changes recorded since the last drain.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, SourceEvent> {
        self.events.drain(..)
    }

    /// Turns change recording on or off. Turning it off drops any events
    /// not yet drained.
    pub fn set_event_recording(&mut self, enabled: bool) {
        self.events_muted = !enabled;
        if !enabled {
            self.events = Vec::new();
        }
    }

    /// Returns `true` if changes are being recorded. On by default.
    #[must_use]
    pub fn records_events(&self) -> bool {
        !self.events_muted
    }

    fn record(&mut self, event: SourceEvent) {
        if !self.events_muted {
            self.events.push(event);
        }
    }

    fn reindex_from(&mut self, start: usize) {
        for (slot, feature) in self.features.iter().enumerate().skip(start) {
            self.index.insert(feature.id, slot);
        }
    }
}

impl FeatureSource for VectorSource {
    fn feature_ids(&self) -> Vec<FeatureId> {
        self.features.iter().map(|f| f.id).collect()
    }

    fn geometry_kind(&self, id: FeatureId) -> Option<GeometryKind> {
        self.geometry(id).map(GeometryKind::of)
    }

    fn polygon(&self, id: FeatureId) -> Option<Polygon<f64>> {
        match self.geometry(id)? {
            Geometry::Polygon(p) => Some(p.clone()),
            Geometry::Rect(r) => Some(r.to_polygon()),
            Geometry::Triangle(t) => Some(t.to_polygon()),
            _ => None,
        }
    }

    fn set_polygon(&mut self, id: FeatureId, polygon: Polygon<f64>) -> bool {
        let Some(&slot) = self.index.get(&id) else {
            return false;
        };
        self.features[slot].geometry = Geometry::Polygon(polygon);
        self.record(SourceEvent::Changed(id));
        true
    }

    fn add_polygon(&mut self, polygon: Polygon<f64>) -> FeatureId {
        self.add_geometry(polygon)
    }

    fn remove(&mut self, id: FeatureId) -> Option<Polygon<f64>> {
        let slot = self.index.remove(&id)?;
        let feature = self.features.remove(slot);
        self.reindex_from(slot);
        self.record(SourceEvent::Removed(id));
        match feature.geometry {
            Geometry::Polygon(p) => Some(p),
            Geometry::Rect(r) => Some(r.to_polygon()),
            Geometry::Triangle(t) => Some(t.to_polygon()),
            _ => None,
        }
    }
}

/// An explicit, ordered set of feature ids to edit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeatureCollection {
    ids: Vec<FeatureId>,
}

impl FeatureCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `id` unless it is already present. Returns `true` if added.
    pub fn push(&mut self, id: FeatureId) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Removes `id`. Returns `true` if it was present.
    pub fn remove(&mut self, id: FeatureId) -> bool {
        let Some(pos) = self.ids.iter().position(|&i| i == id) else {
            return false;
        };
        self.ids.remove(pos);
        true
    }

    /// Returns `true` if `id` is in the collection.
    #[must_use]
    pub fn contains(&self, id: FeatureId) -> bool {
        self.ids.contains(&id)
    }

    /// Ids in order.
    pub fn iter(&self) -> impl Iterator<Item = FeatureId> + '_ {
        self.ids.iter().copied()
    }

    /// Number of ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<FeatureId> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = FeatureId>>(iter: I) -> Self {
        let mut collection = Self::new();
        for id in iter {
            collection.push(id);
        }
        collection
    }
}

/// Which features a brush works on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeatureSet {
    /// Every polygon feature of the source passed to each call.
    Source,
    /// Only the listed features. Features created or removed by the brush
    /// are added to or dropped from the collection as well.
    Collection(FeatureCollection),
}

impl FeatureSet {
    /// Candidate ids for one pass, taken before the pass mutates anything.
    pub fn snapshot<S: FeatureSource + ?Sized>(&self, source: &S) -> Vec<FeatureId> {
        match self {
            Self::Source => source.feature_ids(),
            Self::Collection(c) => c.iter().collect(),
        }
    }

    pub(crate) fn track_added(&mut self, id: FeatureId) {
        if let Self::Collection(c) = self {
            c.push(id);
        }
    }

    pub(crate) fn track_removed(&mut self, id: FeatureId) {
        if let Self::Collection(c) = self {
            c.remove(id);
        }
    }

    /// The explicit collection, if any.
    #[must_use]
    pub fn collection(&self) -> Option<&FeatureCollection> {
        match self {
            Self::Source => None,
            Self::Collection(c) => Some(c),
        }
    }
}

impl From<FeatureCollection> for FeatureSet {
    fn from(collection: FeatureCollection) -> Self {
        Self::Collection(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Point, Rect, coord};
    use polybrush_geometry::ring::polygon_from_coords;

    fn triangle() -> Polygon<f64> {
        polygon_from_coords(&[(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)])
    }

    #[test]
    fn ids_are_stable_across_removals() {
        let mut source = VectorSource::new();
        let a = source.add_polygon(triangle());
        let b = source.add_polygon(triangle());
        let c = source.add_polygon(triangle());

        assert!(source.remove(a).is_some());
        assert_eq!(source.feature_ids(), vec![b, c]);
        assert!(source.set_polygon(c, triangle()));
        assert!(source.polygon(c).is_some());
        assert!(!source.contains(a));
        assert_eq!(source.remove(a), None);
    }

    #[test]
    fn geometry_kinds_and_polygon_access() {
        let mut source = VectorSource::new();
        let point = source.add_geometry(Point::new(1.0, 2.0));
        let rect = source.add_geometry(Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 2.0, y: 1.0 }));

        assert_eq!(source.geometry_kind(point), Some(GeometryKind::Point));
        assert_eq!(source.polygon(point), None);
        assert_eq!(source.geometry_kind(rect), Some(GeometryKind::Polygon));
        assert!(source.polygon(rect).is_some());
        assert_eq!(source.geometry_kind(FeatureId(99)), None);
    }

    #[test]
    fn events_are_recorded_and_drained() {
        let mut source = VectorSource::new();
        let a = source.add_polygon(triangle());
        source.set_polygon(a, triangle());
        source.remove(a);

        let events: Vec<_> = source.drain_events().collect();
        assert_eq!(
            events,
            vec![
                SourceEvent::Added(a),
                SourceEvent::Changed(a),
                SourceEvent::Removed(a)
            ]
        );
        assert_eq!(source.drain_events().count(), 0);
    }

    #[test]
    fn recording_can_be_turned_off() {
        let mut source = VectorSource::new();
        assert!(source.records_events());
        let a = source.add_polygon(triangle());

        source.set_event_recording(false);
        assert!(!source.records_events());
        assert_eq!(source.drain_events().count(), 0, "pending events are dropped");
        source.set_polygon(a, triangle());
        source.remove(a);
        assert_eq!(source.drain_events().count(), 0);

        source.set_event_recording(true);
        let b = source.add_polygon(triangle());
        let events: Vec<_> = source.drain_events().collect();
        assert_eq!(events, vec![SourceEvent::Added(b)]);
    }

    #[test]
    fn collection_keeps_order_without_duplicates() {
        let mut c: FeatureCollection = [FeatureId(3), FeatureId(1), FeatureId(3)]
            .into_iter()
            .collect();
        assert_eq!(c.len(), 2);
        assert!(c.remove(FeatureId(3)));
        assert!(!c.remove(FeatureId(3)));
        assert_eq!(c.iter().collect::<Vec<_>>(), vec![FeatureId(1)]);
    }

    #[test]
    fn feature_set_tracks_only_collections() {
        let mut set = FeatureSet::from(FeatureCollection::new());
        set.track_added(FeatureId(7));
        assert_eq!(set.collection().map(FeatureCollection::len), Some(1));
        set.track_removed(FeatureId(7));
        assert_eq!(set.collection().map(FeatureCollection::len), Some(0));

        let mut whole = FeatureSet::Source;
        whole.track_added(FeatureId(1));
        assert!(whole.collection().is_none());
    }
}
