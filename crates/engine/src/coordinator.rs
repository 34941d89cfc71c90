use std::collections::BTreeMap;

use camera::{
    CameraPose, CameraSurface, EaseTo, InteractionEdge, InteractionEvent, InteractionMonitor,
};
use foundation::ids::{LabelId, OverlayId, PoiId};
use foundation::math::{LngLat, Vec2};
use labels::LabelForceSim;
use motion::{IdleSpin, OrbitCinematic};
use overlay::{OverlayRegistry, RevealAnimator, SignalZone, SweepAnimator};
use runtime::{EventBus, Frame, Metrics, MetricsSnapshot};
use visibility::{VisibilityBand, band, is_occluded};

use crate::config::EngineConfig;
use crate::poi::{PoiKind, PoiOverlay, PoiSource, SelectionEvent};

/// Where the current visit is in its choreography.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VisitPhase {
    /// Camera transition in flight.
    Flying,
    /// Overlay reveal animating.
    Revealing,
    /// Reveal done (or declined); sweep and cinematic orbit may run.
    Settled,
}

#[derive(Debug)]
struct Visit {
    poi: PoiId,
    overlay: OverlayId,
    data: PoiOverlay,
    phase: VisitPhase,
    gentle: bool,
}

/// Wires interaction events to the controllers and enforces their mutual
/// exclusion over the camera.
///
/// Ownership of the camera is cooperative but never shared: the idle spin
/// is suspended for the whole lifetime of a visit, and the cinematic
/// orbit only ticks once the visit has settled, which also makes
/// reveal-complete strictly precede orbit start. Everything the
/// coordinator schedules is cancelled in [`Coordinator::teardown`] before
/// render state is released, so no callback can outlive the surface.
pub struct Coordinator {
    config: EngineConfig,
    monitor: InteractionMonitor,
    spin: IdleSpin,
    orbit: OrbitCinematic,
    reveal: RevealAnimator,
    sweep: SweepAnimator,
    labels: LabelForceSim,
    registry: OverlayRegistry,
    label_worlds: BTreeMap<LabelId, LngLat>,
    visit: Option<Visit>,
    selections: Vec<SelectionEvent>,
    last_pose: Option<CameraPose>,
    metrics: Metrics,
    torn_down: bool,
}

impl Coordinator {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            monitor: InteractionMonitor::new(),
            spin: IdleSpin::new(config.spin),
            orbit: OrbitCinematic::new(config.cinematic),
            reveal: RevealAnimator::new(),
            sweep: SweepAnimator::new(config.sweep),
            labels: LabelForceSim::new(config.labels),
            registry: OverlayRegistry::new(),
            label_worlds: BTreeMap::new(),
            visit: None,
            selections: Vec::new(),
            last_pose: None,
            metrics: Metrics::new(),
            torn_down: false,
        }
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn current_visit(&self) -> Option<(PoiId, VisitPhase)> {
        self.visit.as_ref().map(|v| (v.poi, v.phase))
    }

    pub fn is_cinematic_enabled(&self) -> bool {
        self.orbit.is_enabled()
    }

    pub fn overlay_count(&self) -> usize {
        self.registry.len()
    }

    /// Flies the camera to a point of interest and choreographs the
    /// overlay reveal on arrival.
    ///
    /// Returns `false` (with a warning) when the catalog has no overlay
    /// for the id; nothing is animated and no completion ever fires.
    pub fn visit(
        &mut self,
        frame: Frame,
        surface: &mut dyn CameraSurface,
        source: &dyn PoiSource,
        poi: PoiId,
        gentle: bool,
        bus: &mut EventBus,
    ) -> bool {
        if self.torn_down {
            return false;
        }
        let Some(data) = source.overlay(poi) else {
            bus.warn(frame, "visit", format!("{:?} has no overlay, declined", poi));
            self.metrics.inc("visits_declined");
            return false;
        };

        // A new visit destroys the previous cinematic session; overlays
        // already drawn stay alive until zoom evicts them.
        if self.visit.is_some() {
            self.orbit.disable();
        }

        self.spin.suspend();
        let duration_s = if gentle {
            self.config.visit.gentle_fly_duration_s
        } else {
            self.config.visit.fly_duration_s
        };
        surface.ease_to(EaseTo {
            center: data.center,
            zoom: self.config.visit.zoom,
            duration_s,
        });

        bus.trace(frame, "visit", format!("{:?} started", poi));
        self.metrics.inc("visits_started");
        self.visit = Some(Visit {
            poi,
            overlay: OverlayId(poi.0),
            data,
            phase: VisitPhase::Flying,
            gentle,
        });
        true
    }

    /// Ends the current visit: the cinematic session dies with it and the
    /// idle spin becomes eligible again.
    pub fn end_visit(&mut self, frame: Frame, bus: &mut EventBus) {
        if let Some(visit) = self.visit.take() {
            self.orbit.disable();
            self.spin.resume_eligibility();
            bus.trace(frame, "visit", format!("{:?} ended", visit.poi));
        }
    }

    /// Flips cinematic mode; returns whether it is enabled afterwards.
    pub fn toggle_cinematic(&mut self, frame: Frame, bus: &mut EventBus) -> bool {
        if self.torn_down {
            return false;
        }
        self.orbit.toggle(frame, bus)
    }

    /// Feeds one camera-surface interaction signal.
    pub fn on_interaction(
        &mut self,
        frame: Frame,
        surface: &dyn CameraSurface,
        event: InteractionEvent,
        bus: &mut EventBus,
    ) {
        if self.torn_down {
            return;
        }
        match self.monitor.observe(event, frame.now) {
            Some(InteractionEdge::Started) => {
                self.spin.start_interacting(frame, bus);
                self.orbit.on_interaction_start(frame, bus);
            }
            Some(InteractionEdge::Ended) => {
                self.spin.stop_interacting(frame, surface.pose(), bus);
            }
            None => {}
        }
    }

    /// Marker interaction from the surface, normalized for the UI layer.
    pub fn select(&mut self, kind: PoiKind, id: PoiId) {
        self.selections.push(SelectionEvent { kind, id });
        self.metrics.inc("selections");
    }

    pub fn drain_selections(&mut self) -> Vec<SelectionEvent> {
        std::mem::take(&mut self.selections)
    }

    /// Registers a label for collision resolution, anchored at a world
    /// position so camera moves can re-project it.
    pub fn register_label(
        &mut self,
        id: LabelId,
        world: LngLat,
        rest_offset_px: Vec2,
        half_size_px: Vec2,
        surface: &dyn CameraSurface,
    ) {
        let anchor = surface.project(world).unwrap_or(Vec2::ZERO);
        self.label_worlds.insert(id, world);
        self.labels.register(id, anchor, rest_offset_px, half_size_px);
        self.labels.start();
    }

    pub fn label_position(&self, id: LabelId) -> Option<Vec2> {
        self.labels.position(id)
    }

    /// Display band for a marker at `point`, for the host's styling pass.
    /// Occlusion behind the globe wins over any zoom band.
    pub fn marker_band(&self, surface: &dyn CameraSurface, point: LngLat) -> VisibilityBand {
        let pose = surface.pose();
        if is_occluded(point, pose.center, pose.pitch_deg, pose.zoom) {
            return VisibilityBand::Hidden;
        }
        band(pose.zoom)
    }

    /// One cooperative frame for every controller, in a fixed order.
    pub fn tick(&mut self, frame: Frame, surface: &mut dyn CameraSurface, bus: &mut EventBus) {
        if self.torn_down {
            return;
        }
        let pose = surface.pose();

        // Zoom-gated overlay lifecycle first, so later stages never see a
        // stale overlay.
        let evicted = self
            .registry
            .evict_below_zoom(frame, pose.zoom, surface, bus);
        self.metrics.inc_by("overlays_evicted", evicted.len() as u64);

        self.advance_visit(frame, pose, surface.is_easing(), bus);

        let completed = self.reveal.tick(frame, surface, &mut self.registry, bus);
        for id in completed {
            self.metrics.inc("reveals_completed");
            if let Some(visit) = &mut self.visit {
                if visit.overlay == id {
                    visit.phase = VisitPhase::Settled;
                    let _ = self.sweep.start(id, sweep_zones(&visit.data));
                }
            }
        }

        self.sweep.tick(frame, surface, &self.registry, bus);

        // Camera-mutating controllers last, and never both: the spin is
        // suspended for the whole visit, the orbit only runs once settled.
        self.spin.tick(frame, surface, bus);
        if matches!(self.visit, Some(Visit { phase: VisitPhase::Settled, .. })) {
            self.orbit
                .tick(frame, surface, self.monitor.is_interacting(), bus);
        }

        self.tick_labels(frame, surface);

        self.metrics.set_gauge("overlays_alive", self.registry.len() as i64);
        self.last_pose = Some(surface.pose());
    }

    fn advance_visit(&mut self, frame: Frame, pose: CameraPose, easing: bool, bus: &mut EventBus) {
        let Some(visit) = &mut self.visit else {
            return;
        };
        if visit.phase != VisitPhase::Flying || easing {
            return;
        }

        let duration_s = if visit.gentle {
            self.config.reveal.gentle_duration_s
        } else {
            self.config.reveal.duration_s
        };
        let started = self.reveal.start(
            frame,
            pose.zoom,
            &self.registry,
            visit.overlay,
            &visit.data.points,
            visit.data.color,
            self.config.visit.overlay_min_zoom,
            duration_s,
            self.config.reveal,
            bus,
        );

        match started {
            Some(_) => {
                self.metrics.inc("reveals_started");
                visit.phase = VisitPhase::Revealing;
            }
            None if self.registry.contains(visit.overlay) => {
                // Already drawn from an earlier visit: settle immediately.
                visit.phase = VisitPhase::Settled;
                let _ = self.sweep.start(visit.overlay, sweep_zones(&visit.data));
            }
            None => {
                // Unusable geometry; the reveal already warned. The visit
                // settles with nothing to animate.
                self.metrics.inc("reveals_declined");
                visit.phase = VisitPhase::Settled;
            }
        }
    }

    fn tick_labels(&mut self, frame: Frame, surface: &dyn CameraSurface) {
        if let Some(last) = self.last_pose {
            let pose = surface.pose();
            let moved = pose.center != last.center
                || (pose.zoom - last.zoom).abs() > 1e-12
                || pose.bearing_deg != last.bearing_deg
                || pose.pitch_deg != last.pitch_deg;
            if moved {
                for (id, world) in &self.label_worlds {
                    if let Some(anchor) = surface.project(*world) {
                        self.labels.update_anchor(*id, anchor);
                    }
                }
            }
        }
        if self.labels.tick(frame) {
            self.metrics.inc("label_sim_ticks");
        }
    }

    /// Cancels every outstanding animation and timer, then releases all
    /// render state. Idempotent; after teardown the coordinator is inert.
    pub fn teardown(&mut self, frame: Frame, surface: &mut dyn CameraSurface, bus: &mut EventBus) {
        if self.torn_down {
            return;
        }
        self.reveal.cancel_all();
        self.sweep.cancel_all();
        self.spin.cleanup();
        self.orbit.disable();
        self.labels.clear();
        self.label_worlds.clear();
        self.registry.clear(surface);
        self.visit = None;
        self.torn_down = true;
        bus.trace(frame, "engine", "torn down");
    }
}

fn sweep_zones(data: &PoiOverlay) -> Vec<SignalZone> {
    if data.zones.is_empty() {
        vec![SignalZone::new(0.0, 1.0)]
    } else {
        data.zones.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{Coordinator, VisitPhase};
    use crate::config::EngineConfig;
    use crate::poi::{PoiKind, PoiOverlay, StaticPoiSource};
    use camera::{
        CameraPose, CameraSurface, EaseTo, FixtureCamera, InteractionEvent, InteractionKind,
    };
    use foundation::ids::{LabelId, OverlayId, PoiId};
    use foundation::math::{LngLat, Vec2};
    use pretty_assertions::assert_eq;
    use runtime::{EventBus, FrameClock, Severity};

    const DT: f64 = 1.0 / 60.0;

    fn circuit(center: LngLat) -> Vec<LngLat> {
        (0..80)
            .map(|i| {
                let a = i as f64 / 80.0 * std::f64::consts::TAU;
                LngLat::new(center.lng + a.cos() * 0.05, center.lat + a.sin() * 0.05)
            })
            .collect()
    }

    fn source_with(poi: PoiId, center: LngLat) -> StaticPoiSource {
        let mut source = StaticPoiSource::new();
        source.insert(
            poi,
            PoiOverlay {
                center,
                points: circuit(center),
                color: [0.9, 0.1, 0.1, 1.0],
                zones: vec![],
            },
        );
        source
    }

    struct Rig {
        coord: Coordinator,
        cam: FixtureCamera,
        clock: FrameClock,
        bus: EventBus,
    }

    impl Rig {
        fn new() -> Self {
            Self::with_config(EngineConfig::default())
        }

        fn with_config(config: EngineConfig) -> Self {
            Self {
                coord: Coordinator::new(config),
                cam: FixtureCamera::new(LngLat::new(0.0, 0.0), 2.0),
                clock: FrameClock::new(),
                bus: EventBus::new(),
            }
        }

        fn visit(&mut self, source: &StaticPoiSource, poi: PoiId) -> bool {
            let frame = self.clock.advance(DT);
            self.coord
                .visit(frame, &mut self.cam, source, poi, false, &mut self.bus)
        }

        /// Steps camera and coordinator in lockstep for `seconds`.
        fn run(&mut self, seconds: f64) {
            let frames = (seconds / DT).round() as u64;
            for _ in 0..frames {
                self.cam.step(DT);
                let frame = self.clock.advance(DT);
                self.coord.tick(frame, &mut self.cam, &mut self.bus);
            }
        }
    }

    fn counter(rig: &Rig, name: &str) -> u64 {
        rig.coord
            .metrics()
            .counters
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| *v)
            .unwrap_or(0)
    }

    #[test]
    fn visit_flies_reveals_then_settles_with_sweep() {
        let mut rig = Rig::new();
        let poi = PoiId(1);
        let source = source_with(poi, LngLat::new(30.0, 10.0));

        assert!(rig.visit(&source, poi));
        assert_eq!(rig.coord.current_visit(), Some((poi, VisitPhase::Flying)));

        // 2 s flight, 3 s reveal, plus slack.
        rig.run(2.5);
        assert_eq!(rig.coord.current_visit(), Some((poi, VisitPhase::Revealing)));
        rig.run(3.5);

        assert_eq!(rig.coord.current_visit(), Some((poi, VisitPhase::Settled)));
        assert_eq!(rig.coord.overlay_count(), 1);
        assert_eq!(counter(&rig, "reveals_completed"), 1);

        // Camera landed on the target.
        assert!((rig.cam.pose().zoom - 10.0).abs() < 1e-9);
        assert_eq!(rig.cam.pose().center, LngLat::new(30.0, 10.0));

        // The default full-path sweep is pushing pulse levels.
        let path = rig.cam.path(OverlayId(poi.0)).expect("path layer");
        assert!(!path.levels.is_empty());
        assert!(path.levels.iter().any(|&l| l > 0));
    }

    #[test]
    fn orbit_never_rotates_before_reveal_completes() {
        let mut rig = Rig::new();
        let poi = PoiId(3);
        let source = source_with(poi, LngLat::new(-20.0, 40.0));

        rig.visit(&source, poi);
        let frame = rig.clock.advance(DT);
        assert!(rig.coord.toggle_cinematic(frame, &mut rig.bus));

        // Mid-reveal: warm-up elapsed long ago, still no rotation.
        rig.run(4.8);
        assert_eq!(rig.cam.pose().bearing_deg, 0.0);

        rig.run(1.0);
        assert!(rig.cam.pose().bearing_deg > 0.0);

        let reveal_done = rig
            .bus
            .events_of_kind("reveal")
            .find(|e| e.message.contains("complete"))
            .expect("reveal completion event")
            .frame_index;
        let orbit_active = rig
            .bus
            .events_of_kind("orbit")
            .find(|e| e.message == "active")
            .expect("orbit activation event")
            .frame_index;
        assert!(reveal_done <= orbit_active);
    }

    #[test]
    fn visit_without_geometry_is_declined_with_warning() {
        let mut rig = Rig::new();
        let source = StaticPoiSource::new();

        assert!(!rig.visit(&source, PoiId(9)));
        assert_eq!(rig.coord.current_visit(), None);
        assert_eq!(counter(&rig, "visits_declined"), 1);
        assert!(
            rig.bus
                .events_of_kind("visit")
                .any(|e| e.severity == Severity::Warn)
        );

        // Nothing was scheduled; ticking stays inert.
        rig.run(1.0);
        assert_eq!(rig.coord.overlay_count(), 0);
        assert_eq!(rig.cam.path_count(), 0);
    }

    #[test]
    fn degenerate_geometry_still_flies_but_settles_bare() {
        let mut rig = Rig::new();
        let poi = PoiId(11);
        let mut source = StaticPoiSource::new();
        source.insert(
            poi,
            PoiOverlay {
                center: LngLat::new(8.0, 8.0),
                points: vec![LngLat::new(8.0, 8.0)],
                color: [1.0; 4],
                zones: vec![],
            },
        );

        assert!(rig.visit(&source, poi));
        rig.run(3.0);

        // The flight happened; the reveal declined with a warning.
        assert_eq!(rig.cam.pose().center, LngLat::new(8.0, 8.0));
        assert_eq!(rig.coord.current_visit(), Some((poi, VisitPhase::Settled)));
        assert_eq!(rig.coord.overlay_count(), 0);
        assert_eq!(counter(&rig, "reveals_declined"), 1);
        assert!(
            rig.bus
                .events_of_kind("reveal")
                .any(|e| e.severity == Severity::Warn)
        );
    }

    #[test]
    fn spin_parks_for_the_visit_and_returns_after_end() {
        let mut config = EngineConfig::default();
        // Low-zoom visit so the idle spin stays eligible afterwards.
        config.visit.zoom = 2.0;
        config.visit.overlay_min_zoom = 1.0;
        let mut rig = Rig::with_config(config);
        let poi = PoiId(5);
        let source = source_with(poi, LngLat::new(12.0, 0.0));

        rig.visit(&source, poi);
        rig.run(6.0);
        assert_eq!(rig.coord.current_visit(), Some((poi, VisitPhase::Settled)));

        // Suspended while the visit is alive.
        let lng_settled = rig.cam.pose().center.lng;
        rig.run(2.0);
        assert_eq!(rig.cam.pose().center.lng, lng_settled);

        let frame = rig.clock.advance(DT);
        rig.coord.end_visit(frame, &mut rig.bus);
        rig.run(3.0);
        assert!(rig.cam.pose().center.lng > lng_settled);
    }

    #[test]
    fn zooming_out_evicts_the_overlay() {
        let mut rig = Rig::new();
        let poi = PoiId(2);
        let source = source_with(poi, LngLat::new(0.0, 0.0));

        rig.visit(&source, poi);
        rig.run(6.0);
        assert_eq!(rig.coord.overlay_count(), 1);

        // Below the overlay's min zoom the render state is destroyed.
        rig.cam.set_zoom(4.0);
        rig.run(2.0 * DT);
        assert_eq!(rig.coord.overlay_count(), 0);
        assert!(rig.cam.path(OverlayId(poi.0)).is_none());
        assert_eq!(rig.cam.removed_path_count(), 1);
        assert_eq!(counter(&rig, "overlays_evicted"), 1);
    }

    #[test]
    fn interaction_pauses_orbit_and_end_alone_never_resumes() {
        let mut rig = Rig::new();
        let poi = PoiId(4);
        let source = source_with(poi, LngLat::new(50.0, -15.0));

        rig.visit(&source, poi);
        rig.run(6.0);
        let frame = rig.clock.advance(DT);
        rig.coord.toggle_cinematic(frame, &mut rig.bus);
        rig.run(2.0);
        let rotating = rig.cam.pose().bearing_deg;
        assert!(rotating > 0.0);

        let frame = rig.clock.advance(DT);
        rig.coord.on_interaction(
            frame,
            &rig.cam,
            InteractionEvent::Begin(InteractionKind::Drag),
            &mut rig.bus,
        );
        let frame = rig.clock.advance(DT);
        rig.coord.on_interaction(
            frame,
            &rig.cam,
            InteractionEvent::End(InteractionKind::Drag),
            &mut rig.bus,
        );

        // The 30 s idle window holds well past the interaction itself.
        rig.run(5.0);
        assert_eq!(rig.cam.pose().bearing_deg, rotating);
        assert!(rig.coord.is_cinematic_enabled());
    }

    #[test]
    fn labels_separate_and_follow_camera_moves() {
        let mut rig = Rig::new();
        // Above the spin's max zoom, so nothing else moves the camera.
        rig.cam.set_zoom(6.0);
        let half = Vec2::new(30.0, 8.0);
        rig.coord
            .register_label(LabelId(1), LngLat::new(0.0, 0.0), Vec2::ZERO, half, &rig.cam);
        rig.coord
            .register_label(LabelId(2), LngLat::new(0.1, 0.0), Vec2::ZERO, half, &rig.cam);

        rig.run(6.0);
        let a = rig.coord.label_position(LabelId(1)).expect("label 1");
        let b = rig.coord.label_position(LabelId(2)).expect("label 2");
        assert!((a.x - b.x).abs() > 30.0, "separation {}", (a.x - b.x).abs());

        // A camera move re-projects the anchors.
        rig.cam.set_center(LngLat::new(10.0, 0.0));
        rig.run(2.0 * DT);
        let moved = rig.coord.label_position(LabelId(1)).expect("label 1");
        assert!((moved.x - a.x).abs() > 5.0);
    }

    /// Fixture whose projection slides with pitch, the way a tilted
    /// horizon shifts screen space.
    struct TiltedCamera {
        inner: FixtureCamera,
    }

    impl CameraSurface for TiltedCamera {
        fn pose(&self) -> CameraPose {
            self.inner.pose()
        }

        fn set_center(&mut self, center: LngLat) {
            self.inner.set_center(center);
        }

        fn set_bearing(&mut self, bearing_deg: f64) {
            self.inner.set_bearing(bearing_deg);
        }

        fn ease_to(&mut self, target: EaseTo) {
            self.inner.ease_to(target);
        }

        fn is_easing(&self) -> bool {
            self.inner.is_easing()
        }

        fn project(&self, point: LngLat) -> Option<Vec2> {
            let tilt_px = self.inner.pose().pitch_deg * 10.0;
            self.inner.project(point).map(|v| Vec2::new(v.x, v.y + tilt_px))
        }

        fn upsert_path(&mut self, id: OverlayId, points: &[LngLat], color: [f32; 4]) {
            self.inner.upsert_path(id, points, color);
        }

        fn set_path_levels(&mut self, id: OverlayId, levels: &[u8]) {
            self.inner.set_path_levels(id, levels);
        }

        fn remove_path(&mut self, id: OverlayId) {
            self.inner.remove_path(id);
        }
    }

    #[test]
    fn pitch_change_reprojects_label_anchors() {
        let mut coord = Coordinator::new(EngineConfig::default());
        // Above the spin's max zoom, so nothing else moves the camera.
        let mut cam = TiltedCamera {
            inner: FixtureCamera::new(LngLat::new(0.0, 0.0), 6.0),
        };
        let mut clock = FrameClock::new();
        let mut bus = EventBus::new();

        coord.register_label(
            LabelId(1),
            LngLat::new(0.0, 0.0),
            Vec2::ZERO,
            Vec2::new(20.0, 8.0),
            &cam,
        );
        let frame = clock.advance(DT);
        coord.tick(frame, &mut cam, &mut bus);
        let level = coord.label_position(LabelId(1)).expect("label");

        cam.inner.set_pitch(30.0);
        let frame = clock.advance(DT);
        coord.tick(frame, &mut cam, &mut bus);
        let tilted = coord.label_position(LabelId(1)).expect("label");
        assert!(
            (tilted.y - level.y).abs() > 100.0,
            "pitch shift {}",
            (tilted.y - level.y).abs()
        );
    }

    #[test]
    fn marker_band_combines_zoom_and_occlusion() {
        let rig = Rig::new();
        use visibility::VisibilityBand;

        // Zoom 2 is dot territory for a front-facing marker.
        let near = LngLat::new(0.0, 0.0);
        assert_eq!(rig.coord.marker_band(&rig.cam, near), VisibilityBand::Dot);

        // The far side of the globe hides regardless of band.
        let far = LngLat::new(180.0, 0.0);
        assert_eq!(rig.coord.marker_band(&rig.cam, far), VisibilityBand::Hidden);
    }

    #[test]
    fn selection_events_drain_once() {
        let mut rig = Rig::new();
        rig.coord.select(PoiKind::Team, PoiId(7));
        rig.coord.select(PoiKind::Circuit, PoiId(8));

        let drained = rig.coord.drain_selections();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].kind, PoiKind::Team);
        assert!(rig.coord.drain_selections().is_empty());
        assert_eq!(counter(&rig, "selections"), 2);
    }

    #[test]
    fn teardown_releases_everything_and_is_idempotent() {
        let mut rig = Rig::new();
        let poi = PoiId(6);
        let source = source_with(poi, LngLat::new(5.0, 5.0));

        rig.visit(&source, poi);
        rig.run(6.0);
        rig.coord
            .register_label(LabelId(1), LngLat::new(5.0, 5.0), Vec2::ZERO, Vec2::new(20.0, 8.0), &rig.cam);
        assert_eq!(rig.cam.path_count(), 1);

        let frame = rig.clock.advance(DT);
        rig.coord.teardown(frame, &mut rig.cam, &mut rig.bus);
        let frame = rig.clock.advance(DT);
        rig.coord.teardown(frame, &mut rig.cam, &mut rig.bus);

        assert_eq!(rig.cam.path_count(), 0);
        assert_eq!(rig.coord.overlay_count(), 0);
        assert_eq!(rig.coord.current_visit(), None);
        assert_eq!(rig.coord.label_position(LabelId(1)), None);

        // Inert afterwards: no controller touches the camera again.
        let pose = rig.cam.pose();
        rig.run(3.0);
        assert_eq!(rig.cam.pose(), pose);
        assert!(!rig.visit(&source, poi));
    }
}
