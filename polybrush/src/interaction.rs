// Copyright 2025 the Polybrush Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The brush state machine.
//!
//! One [`BrushInteraction`] serves every mode. Pointer-down starts a gesture
//! whose [`GestureKind`] is fixed by the mode (or, for
//! [`InteractionMode::Conditional`], by the input at that moment). Every
//! pointer event of the gesture then runs one *pass*: the brush polygon is
//! prepared once and combined with the candidate features.
//!
//! - **Drawing** grows a private sketch polygon and inserts it on release.
//! - **Adding** unions the brush into one running target per gesture and
//!   folds any other feature the brush reaches into that target.
//! - **Subtracting** cuts the brush out of every feature it overlaps and
//!   removes features it covers completely.
//! - **Stroke adding** and **stroke subtracting** paint like drawing and
//!   combine the finished stroke with the features on release.
//!
//! Candidates are snapshotted at the start of each pass. Candidates whose
//! bounds miss the brush are skipped before any validation. A candidate
//! that fails to prepare, or whose boolean operation fails, is logged at
//! `debug` and skipped; the pass and the gesture continue.

use core::mem;

use geo::Polygon;
use kurbo::{Circle, Point};
use polybrush_event_state::condition::Condition;
use polybrush_event_state::gesture::GestureState;
use polybrush_event_state::wheel::WheelDelta;
use polybrush_geometry::ring::polygon_area;
use polybrush_geometry::{BooleanAdapter, GeometryError, Precision, PreparedPolygon, Relation};
use tracing::{debug, trace, warn};

use crate::event::{
    BrushEvent, BrushEvents, GestureKind, HandleOutcome, InteractionState, MapEvent, MapEventKind,
};
use crate::options::{BrushOptions, InteractionMode};
use crate::resize::{ResizeController, ResizeOutcome};
use crate::sketch::{BrushSketch, Overlay};
use crate::source::{FeatureId, FeatureSet, FeatureSource, GeometryKind};
use crate::ConfigurationError;

/// How the brush relates to one polygon.
enum Merge {
    /// The polygon should take this geometry.
    Replaced(Polygon<f64>),
    /// The brush lies inside the polygon; nothing to change.
    Inside,
    /// No contact.
    Miss,
}

/// Draw, add and subtract brush for polygon features.
///
/// The host owns both the interaction and the feature source and feeds
/// events in with [`handle_event`](Self::handle_event).
#[derive(Debug)]
pub struct BrushInteraction {
    mode: InteractionMode,
    features: FeatureSet,
    condition: Condition,
    resize_condition: Condition,
    resize: ResizeController,
    adapter: BooleanAdapter,
    sketch: BrushSketch,
    allow_remove: bool,
    create_when_empty: bool,
    split_pieces: bool,
    state: InteractionState,
    gesture: GestureState,
    target: Option<FeatureId>,
    affected: Vec<FeatureId>,
    draw_sketch: Option<Polygon<f64>>,
}

impl BrushInteraction {
    /// Builds an interaction from validated `options`.
    pub fn new(options: BrushOptions) -> Result<Self, ConfigurationError> {
        options.validate()?;
        let BrushOptions {
            mode,
            features,
            brush_radius,
            min_radius,
            condition,
            resize_condition,
            resize_policy,
            allow_remove,
            create_when_empty,
            split_pieces,
            precision,
            sides,
            style,
        } = options;
        let features = features.ok_or(ConfigurationError::MissingFeatures)?;
        let precision = Precision::new(precision)
            .ok_or(ConfigurationError::InvalidPrecision { decimals: precision })?;
        if brush_radius < min_radius {
            warn!(
                brush_radius,
                min_radius, "brush radius is below the minimum; clamping"
            );
        }
        Ok(Self {
            mode,
            features,
            condition,
            resize_condition,
            resize: ResizeController::new(resize_policy, min_radius),
            adapter: BooleanAdapter::new(precision),
            sketch: BrushSketch::new(brush_radius, min_radius, sides).with_style(style),
            allow_remove,
            create_when_empty,
            split_pieces,
            state: InteractionState::Idle,
            gesture: GestureState::default(),
            target: None,
            affected: Vec::new(),
            draw_sketch: None,
        })
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// The configured mode.
    #[must_use]
    pub fn mode(&self) -> &InteractionMode {
        &self.mode
    }

    /// Switches mode. Ignored while a gesture is active.
    pub fn set_mode(&mut self, mode: InteractionMode) -> bool {
        if self.state != InteractionState::Idle {
            return false;
        }
        self.mode = mode;
        true
    }

    /// The features this brush works on.
    #[must_use]
    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    /// Brush radius in device pixels.
    #[must_use]
    pub fn brush_radius(&self) -> f64 {
        self.sketch.pixel_radius()
    }

    /// Sets the brush radius in device pixels, clamped to the minimum.
    /// Returns the radius applied.
    pub fn set_brush_radius(&mut self, radius: f64) -> f64 {
        self.sketch.set_pixel_radius(radius)
    }

    /// The brush footprint in map units, once the pointer has been seen.
    #[must_use]
    pub fn brush(&self) -> Option<Circle> {
        self.sketch.circle()
    }

    /// The brush controller.
    #[must_use]
    pub fn sketch(&self) -> &BrushSketch {
        &self.sketch
    }

    /// The overlay model.
    #[must_use]
    pub fn overlay(&self) -> &Overlay {
        self.sketch.overlay()
    }

    /// Mutable overlay access, for [`Overlay::take_redraw`].
    pub fn overlay_mut(&mut self) -> &mut Overlay {
        self.sketch.overlay_mut()
    }

    /// Rescales the brush after the view resolution changed.
    pub fn handle_resolution_change(&mut self, resolution: f64) {
        trace!(resolution, "view resolution changed");
        self.sketch.set_resolution(resolution);
    }

    /// Processes one event.
    pub fn handle_event<S: FeatureSource + ?Sized>(
        &mut self,
        source: &mut S,
        event: &MapEvent,
    ) -> HandleOutcome {
        trace!(
            kind = ?event.kind,
            x = event.coordinate.x,
            y = event.coordinate.y,
            state = ?self.state,
            "brush event"
        );
        let mut events = BrushEvents::new();
        let consumed = match event.kind {
            MapEventKind::Wheel(delta) => self.on_wheel(event, delta),
            MapEventKind::PointerDown => self.on_pointer_down(source, event, &mut events),
            MapEventKind::PointerMove | MapEventKind::PointerDrag => {
                self.on_pointer_move(source, event, &mut events)
            }
            MapEventKind::PointerUp => self.on_pointer_up(source, event, &mut events),
        };
        HandleOutcome::new(consumed, self.state, events)
    }

    /// Ends an active gesture without committing the painted sketch.
    ///
    /// Modify gestures that already changed features still report them with
    /// [`BrushEvent::ModifyEnd`].
    pub fn abort<S: FeatureSource + ?Sized>(&mut self, source: &mut S) -> BrushEvents {
        let mut events = BrushEvents::new();
        if let InteractionState::Sketching(kind) = self.state {
            let coordinate = self
                .gesture
                .last_pos
                .or_else(|| self.sketch.center())
                .unwrap_or(Point::ZERO);
            debug!(?kind, "gesture aborted");
            self.finish(source, coordinate, kind, false, &mut events);
        }
        events
    }

    /// Drops the brush position and any gesture, leaving features as they are.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
        self.gesture.end();
        self.target = None;
        self.affected.clear();
        self.draw_sketch = None;
        self.sketch.reset();
    }

    fn on_wheel(&mut self, event: &MapEvent, delta: WheelDelta) -> bool {
        let gate = self.resize_condition.evaluate(&event.input);
        match self
            .resize
            .on_scroll(self.sketch.pixel_radius(), delta.delta(), gate)
        {
            ResizeOutcome::PassThrough => false,
            ResizeOutcome::Resized { pixel_radius } => {
                self.sketch.set_resolution(event.resolution);
                let applied = self.sketch.set_pixel_radius(pixel_radius);
                debug!(pixel_radius = applied, "brush resized");
                true
            }
        }
    }

    fn on_pointer_down<S: FeatureSource + ?Sized>(
        &mut self,
        source: &mut S,
        event: &MapEvent,
        events: &mut BrushEvents,
    ) -> bool {
        if self.state != InteractionState::Idle {
            return false;
        }
        self.sketch.set_center(event.coordinate, event.resolution);
        if !self.condition.evaluate(&event.input) {
            return false;
        }
        let Some(kind) = self.mode.gesture_for(&event.input) else {
            return false;
        };

        self.gesture.start(event.coordinate);
        self.state = InteractionState::Sketching(kind);
        self.target = None;
        self.affected.clear();
        self.draw_sketch = None;
        let coordinate = event.coordinate;
        events.push(match kind {
            GestureKind::Drawing => BrushEvent::DrawStart { coordinate },
            GestureKind::Adding
            | GestureKind::Subtracting
            | GestureKind::StrokeAdding
            | GestureKind::StrokeSubtracting => BrushEvent::ModifyStart { coordinate },
        });
        debug!(?kind, x = coordinate.x, y = coordinate.y, "gesture started");

        self.apply(source, coordinate, events);
        true
    }

    fn on_pointer_move<S: FeatureSource + ?Sized>(
        &mut self,
        source: &mut S,
        event: &MapEvent,
        events: &mut BrushEvents,
    ) -> bool {
        self.sketch.set_center(event.coordinate, event.resolution);
        if self.state == InteractionState::Idle {
            return false;
        }
        self.gesture.update(event.coordinate);
        self.apply(source, event.coordinate, events);
        event.kind == MapEventKind::PointerDrag
    }

    fn on_pointer_up<S: FeatureSource + ?Sized>(
        &mut self,
        source: &mut S,
        event: &MapEvent,
        events: &mut BrushEvents,
    ) -> bool {
        let InteractionState::Sketching(kind) = self.state else {
            return false;
        };
        self.sketch.set_center(event.coordinate, event.resolution);
        self.finish(source, event.coordinate, kind, true, events);
        true
    }

    fn finish<S: FeatureSource + ?Sized>(
        &mut self,
        source: &mut S,
        coordinate: Point,
        kind: GestureKind,
        commit: bool,
        events: &mut BrushEvents,
    ) {
        let stroke = self.draw_sketch.take();
        if kind.paints_sketch() {
            self.sketch.overlay_mut().set_sketch(None);
        }
        match (kind, commit.then_some(stroke).flatten()) {
            (GestureKind::Drawing, Some(polygon)) => {
                let feature = source.add_polygon(polygon);
                self.features.track_added(feature);
                debug!(?feature, "drawn feature inserted");
                events.push(BrushEvent::DrawEnd {
                    coordinate,
                    feature,
                });
            }
            (GestureKind::Drawing, None) => {}
            (GestureKind::StrokeAdding | GestureKind::StrokeSubtracting, Some(polygon)) => {
                match self.adapter.prepare(&polygon) {
                    Ok(stroke) if kind == GestureKind::StrokeAdding => {
                        self.commit_stroke_add(source, &stroke, coordinate, events);
                    }
                    Ok(stroke) => self.commit_stroke_subtract(source, &stroke, coordinate, events),
                    Err(err) => debug!(%err, "stroke rejected; features left unchanged"),
                }
                let features = self.take_affected(source);
                events.push(BrushEvent::ModifyEnd {
                    coordinate,
                    features,
                });
            }
            (GestureKind::StrokeAdding | GestureKind::StrokeSubtracting, None) => {}
            (GestureKind::Adding | GestureKind::Subtracting, _) => {
                let features = self.take_affected(source);
                if commit || !features.is_empty() {
                    debug!(count = features.len(), "modify gesture finished");
                    events.push(BrushEvent::ModifyEnd {
                        coordinate,
                        features,
                    });
                }
            }
        }
        self.affected.clear();
        self.target = None;
        self.gesture.end();
        self.state = InteractionState::Idle;
    }

    /// Features touched by the gesture that still exist.
    fn take_affected<S: FeatureSource + ?Sized>(&mut self, source: &S) -> Vec<FeatureId> {
        mem::take(&mut self.affected)
            .into_iter()
            .filter(|&id| source.geometry_kind(id).is_some())
            .collect()
    }

    /// Runs one pass of the active gesture at the current brush position.
    fn apply<S: FeatureSource + ?Sized>(
        &mut self,
        source: &mut S,
        coordinate: Point,
        events: &mut BrushEvents,
    ) {
        let InteractionState::Sketching(kind) = self.state else {
            return;
        };
        let Some(raw) = self.sketch.to_polygon() else {
            return;
        };
        let brush = match self.adapter.prepare(&raw) {
            Ok(brush) => brush,
            Err(err) => {
                debug!(%err, "brush polygon rejected; pass skipped");
                return;
            }
        };
        match kind {
            GestureKind::Drawing | GestureKind::StrokeAdding | GestureKind::StrokeSubtracting => {
                self.draw_pass(&brush);
            }
            GestureKind::Adding => self.add_pass(source, &brush, coordinate, events),
            GestureKind::Subtracting => self.subtract_pass(source, &brush, coordinate, events),
        }
        self.gesture.record_pass();
    }

    fn draw_pass(&mut self, brush: &PreparedPolygon) {
        let next = match self.draw_sketch.take() {
            None => brush.polygon().clone(),
            Some(sketch) => match self
                .adapter
                .prepare(&sketch)
                .and_then(|prepared| self.merge(brush, &prepared))
            {
                Ok(Merge::Replaced(grown)) => grown,
                Ok(Merge::Inside | Merge::Miss) => sketch,
                Err(err) => {
                    debug!(%err, "draw sketch left unchanged");
                    sketch
                }
            },
        };
        self.sketch.overlay_mut().set_sketch(Some(next.clone()));
        self.draw_sketch = Some(next);
    }

    fn add_pass<S: FeatureSource + ?Sized>(
        &mut self,
        source: &mut S,
        brush: &PreparedPolygon,
        coordinate: Point,
        events: &mut BrushEvents,
    ) {
        let first_pass = self.gesture.is_first_pass();
        let candidates = self.features.snapshot(source);
        let mut touched = false;
        // Prepared geometry of the running target, kept in step with the source.
        let mut target_shape: Option<PreparedPolygon> = None;

        if let Some(target) = self.target {
            match source.polygon(target) {
                None => {
                    debug!(?target, "merge target disappeared");
                    self.target = None;
                }
                Some(current) => match self.adapter.prepare(&current) {
                    Ok(current) => match self.merge(brush, &current) {
                        Ok(Merge::Replaced(merged)) => {
                            target_shape = self.store_target(source, target, merged);
                            touched = true;
                        }
                        Ok(Merge::Inside) => {
                            target_shape = Some(current);
                            touched = true;
                        }
                        Ok(Merge::Miss) => target_shape = Some(current),
                        Err(err) => debug!(?target, %err, "merge target skipped"),
                    },
                    Err(err) => debug!(?target, %err, "merge target skipped"),
                },
            }
        }

        for id in candidates {
            if self.target == Some(id) {
                continue;
            }
            let Some(polygon) = self.prepared_candidate(source, id, brush) else {
                continue;
            };
            match self.target {
                None => match self.merge(brush, &polygon) {
                    Ok(Merge::Replaced(merged)) => {
                        self.target = Some(id);
                        target_shape = self.store_target(source, id, merged);
                        touched = true;
                        debug!(?id, "merge target established");
                    }
                    Ok(Merge::Inside) => {
                        self.target = Some(id);
                        target_shape = Some(polygon);
                        touched = true;
                        debug!(?id, "merge target established around the brush");
                    }
                    Ok(Merge::Miss) => {}
                    Err(err) => debug!(?id, %err, "candidate skipped"),
                },
                Some(target) => {
                    let Some(current) = target_shape.as_ref() else {
                        continue;
                    };
                    match self.fold_into_target(brush, current, &polygon) {
                        Ok(Some(merged)) => {
                            target_shape = self.store_target(source, target, merged);
                            self.remove_feature(source, id, polygon.into_polygon(), coordinate, events);
                            touched = true;
                        }
                        Ok(None) => {}
                        Err(err) => debug!(?id, %err, "candidate skipped"),
                    }
                }
            }
        }

        if first_pass && !touched && self.target.is_none() && self.create_when_empty {
            let id = source.add_polygon(brush.polygon().clone());
            self.features.track_added(id);
            self.mark_affected(id);
            self.target = Some(id);
            debug!(?id, "feature created from brush");
        }
    }

    /// Writes the new target geometry and returns it prepared for the rest
    /// of the pass.
    fn store_target<S: FeatureSource + ?Sized>(
        &mut self,
        source: &mut S,
        target: FeatureId,
        merged: Polygon<f64>,
    ) -> Option<PreparedPolygon> {
        let prepared = self.adapter.prepare(&merged);
        source.set_polygon(target, merged);
        self.mark_affected(target);
        match prepared {
            Ok(prepared) => Some(prepared),
            Err(err) => {
                debug!(?target, %err, "merged target cannot take more features this pass");
                None
            }
        }
    }

    fn subtract_pass<S: FeatureSource + ?Sized>(
        &mut self,
        source: &mut S,
        brush: &PreparedPolygon,
        coordinate: Point,
        events: &mut BrushEvents,
    ) {
        for id in self.features.snapshot(source) {
            let Some(polygon) = self.prepared_candidate(source, id, brush) else {
                continue;
            };
            let pieces = match self.adapter.relate(brush, &polygon) {
                Relation::Contains => Vec::new(),
                Relation::Overlapping => self.adapter.difference_pieces(&polygon, brush),
                Relation::Within | Relation::Disjoint => continue,
            };
            let mut pieces = pieces.into_iter();
            let Some(largest) = pieces.next() else {
                if self.allow_remove {
                    self.remove_feature(source, id, polygon.into_polygon(), coordinate, events);
                }
                continue;
            };
            if !self.allow_remove && polygon_area(&largest) < brush.area() {
                debug!(?id, "result smaller than the brush; feature kept");
                continue;
            }
            source.set_polygon(id, largest);
            self.mark_affected(id);
            if self.split_pieces {
                for piece in pieces {
                    self.add_piece(source, id, piece);
                }
            }
        }
    }

    /// Unions the finished stroke with every feature it shares area with.
    ///
    /// The absorbed features are removed and the result is inserted as one
    /// new feature, even when the stroke met nothing.
    fn commit_stroke_add<S: FeatureSource + ?Sized>(
        &mut self,
        source: &mut S,
        stroke: &PreparedPolygon,
        coordinate: Point,
        events: &mut BrushEvents,
    ) {
        let mut merged = stroke.clone();
        let mut absorbed = Vec::new();
        for id in self.features.snapshot(source) {
            let Some(polygon) = self.prepared_candidate(source, id, stroke) else {
                continue;
            };
            if self.adapter.relate(stroke, &polygon) == Relation::Disjoint {
                continue;
            }
            match self
                .adapter
                .union(&merged, &polygon)
                .and_then(|union| self.adapter.prepare(&union))
            {
                Ok(next) => {
                    merged = next;
                    absorbed.push((id, polygon));
                }
                Err(err) => debug!(?id, %err, "candidate skipped"),
            }
        }
        for (id, polygon) in absorbed {
            self.remove_feature(source, id, polygon.into_polygon(), coordinate, events);
        }
        let id = source.add_polygon(merged.into_polygon());
        self.features.track_added(id);
        self.mark_affected(id);
        debug!(?id, "stroke inserted");
    }

    /// Cuts the finished stroke out of every feature it shares area with.
    ///
    /// Features that surround the stroke are left alone. A feature cut in
    /// several pieces is replaced by one new feature per piece.
    fn commit_stroke_subtract<S: FeatureSource + ?Sized>(
        &mut self,
        source: &mut S,
        stroke: &PreparedPolygon,
        coordinate: Point,
        events: &mut BrushEvents,
    ) {
        for id in self.features.snapshot(source) {
            let Some(polygon) = self.prepared_candidate(source, id, stroke) else {
                continue;
            };
            let mut pieces = match self.adapter.relate(stroke, &polygon) {
                Relation::Contains => Vec::new(),
                Relation::Overlapping => self.adapter.difference_pieces(&polygon, stroke),
                Relation::Within | Relation::Disjoint => continue,
            };
            match pieces.len() {
                0 => {
                    if self.allow_remove {
                        self.remove_feature(source, id, polygon.into_polygon(), coordinate, events);
                    }
                }
                1 => {
                    if let Some(piece) = pieces.pop() {
                        source.set_polygon(id, piece);
                        self.mark_affected(id);
                    }
                }
                _ => {
                    self.remove_feature(source, id, polygon.into_polygon(), coordinate, events);
                    for piece in pieces {
                        self.add_piece(source, id, piece);
                    }
                }
            }
        }
    }

    /// Classifies the brush against `polygon`, computing the new geometry
    /// when they combine.
    fn merge(
        &self,
        brush: &PreparedPolygon,
        polygon: &PreparedPolygon,
    ) -> Result<Merge, GeometryError> {
        Ok(match self.adapter.relate(brush, polygon) {
            Relation::Contains => Merge::Replaced(brush.polygon().clone()),
            Relation::Overlapping => Merge::Replaced(self.adapter.union(brush, polygon)?),
            Relation::Within => Merge::Inside,
            Relation::Disjoint => Merge::Miss,
        })
    }

    /// Union of the running target with `candidate`, when the brush reaches
    /// the candidate and the target now connects to it.
    fn fold_into_target(
        &self,
        brush: &PreparedPolygon,
        target: &PreparedPolygon,
        candidate: &PreparedPolygon,
    ) -> Result<Option<Polygon<f64>>, GeometryError> {
        if self.adapter.relate(brush, candidate) == Relation::Disjoint {
            return Ok(None);
        }
        if self.adapter.relate(target, candidate) == Relation::Disjoint {
            debug!("brush reached a feature the target does not touch");
            return Ok(None);
        }
        self.adapter.union(target, candidate).map(Some)
    }

    /// The candidate's polygon, prepared, if it is a polygon near `reach`.
    fn prepared_candidate<S: FeatureSource + ?Sized>(
        &self,
        source: &S,
        id: FeatureId,
        reach: &PreparedPolygon,
    ) -> Option<PreparedPolygon> {
        let polygon = match source.geometry_kind(id) {
            Some(GeometryKind::Polygon) => source.polygon(id)?,
            Some(kind) => {
                trace!(?id, ?kind, "not a polygon; skipped");
                return None;
            }
            None => return None,
        };
        if !self.adapter.bounds_may_touch(reach, &polygon) {
            return None;
        }
        match self.adapter.prepare(&polygon) {
            Ok(prepared) => Some(prepared),
            Err(err) => {
                debug!(?id, %err, "candidate skipped");
                None
            }
        }
    }

    fn add_piece<S: FeatureSource + ?Sized>(
        &mut self,
        source: &mut S,
        from: FeatureId,
        piece: Polygon<f64>,
    ) {
        let piece_id = source.add_polygon(piece);
        self.features.track_added(piece_id);
        self.mark_affected(piece_id);
        debug!(?from, piece = ?piece_id, "split piece added");
    }

    fn remove_feature<S: FeatureSource + ?Sized>(
        &mut self,
        source: &mut S,
        id: FeatureId,
        last_known: Polygon<f64>,
        coordinate: Point,
        events: &mut BrushEvents,
    ) {
        let polygon = source.remove(id).unwrap_or(last_known);
        self.features.track_removed(id);
        self.affected.retain(|&a| a != id);
        if self.target == Some(id) {
            self.target = None;
        }
        debug!(?id, "feature removed");
        events.push(BrushEvent::ModifyRemove {
            coordinate,
            feature: id,
            polygon,
        });
    }

    fn mark_affected(&mut self, id: FeatureId) {
        if !self.affected.contains(&id) {
            self.affected.push(id);
        }
    }
}
