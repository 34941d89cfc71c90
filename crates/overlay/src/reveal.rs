use camera::CameraSurface;
use foundation::easing::ease_in_out_cubic;
use foundation::ids::OverlayId;
use foundation::math::LngLat;
use runtime::{AnimationHandle, Animations, EventBus, Frame, TickOutcome};
use serde::{Deserialize, Serialize};

use crate::path::{OverlayPath, densify_for_zoom};
use crate::registry::OverlayRegistry;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Reveal duration for a normal visit.
    #[serde(default = "default_duration")]
    pub duration_s: f64,
    /// Reveal duration when the visit asked to go gently.
    #[serde(default = "default_gentle_duration")]
    pub gentle_duration_s: f64,
    /// Maximum on-screen segment length after densification.
    #[serde(default = "default_budget_px")]
    pub densify_budget_px: f64,
}

fn default_duration() -> f64 {
    3.0
}
fn default_gentle_duration() -> f64 {
    4.5
}
fn default_budget_px() -> f64 {
    12.0
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            duration_s: default_duration(),
            gentle_duration_s: default_gentle_duration(),
            densify_budget_px: default_budget_px(),
        }
    }
}

#[derive(Debug)]
struct RevealTask {
    id: OverlayId,
    /// Densified open polyline; the loop is closed at completion.
    points: Vec<LngLat>,
    color: [f32; 4],
    min_zoom_to_show: f64,
    duration_s: f64,
    elapsed_s: f64,
}

/// Progressive, eased drawing of overlay paths.
///
/// Progress is monotonic per reveal and reaches 1 exactly once; the
/// completed closed path is handed to the [`OverlayRegistry`], which owns
/// it from then on. A reveal for an id that is already drawn or already
/// animating is a no-op.
#[derive(Debug, Default)]
pub struct RevealAnimator {
    active: Animations<RevealTask>,
}

impl RevealAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Starts revealing `points` for `id`.
    ///
    /// Returns `None` without animating when the overlay is already drawn,
    /// already animating, or the geometry is unusable. In the unusable
    /// case a warning is emitted and completion never fires, per the
    /// declined-reveal contract.
    #[allow(clippy::too_many_arguments)]
    pub fn start(
        &mut self,
        frame: Frame,
        zoom: f64,
        registry: &OverlayRegistry,
        id: OverlayId,
        points: &[LngLat],
        color: [f32; 4],
        min_zoom_to_show: f64,
        duration_s: f64,
        config: RevealConfig,
        bus: &mut EventBus,
    ) -> Option<AnimationHandle> {
        if registry.contains(id) {
            bus.trace(frame, "reveal", format!("{:?} already drawn, no-op", id));
            return None;
        }
        if self.active.find(|t| t.id == id).is_some() {
            bus.trace(frame, "reveal", format!("{:?} already animating, no-op", id));
            return None;
        }

        let dense = densify_for_zoom(points, zoom, config.densify_budget_px);
        if dense.len() < 2 {
            bus.warn(frame, "reveal", format!("{:?} has no usable geometry", id));
            return None;
        }

        bus.trace(frame, "reveal", format!("{:?} started", id));
        Some(self.active.schedule(RevealTask {
            id,
            points: dense,
            color,
            min_zoom_to_show,
            duration_s: duration_s.max(1e-6),
            elapsed_s: 0.0,
        }))
    }

    pub fn cancel(&mut self, handle: AnimationHandle) -> bool {
        self.active.cancel(handle)
    }

    pub fn cancel_all(&mut self) {
        self.active.cancel_all();
    }

    /// Advances every active reveal one frame.
    ///
    /// Returns ids that completed this frame, in handle order; the
    /// coordinator uses that to sequence sweep/orbit start strictly after
    /// reveal completion.
    pub fn tick(
        &mut self,
        frame: Frame,
        surface: &mut dyn CameraSurface,
        registry: &mut OverlayRegistry,
        bus: &mut EventBus,
    ) -> Vec<OverlayId> {
        let mut completed: Vec<(OverlayId, OverlayPath)> = Vec::new();

        self.active.run_frame(frame, |frame, task| {
            task.elapsed_s += frame.dt_s;
            let t = (task.elapsed_s / task.duration_s).min(1.0);
            let progress = ease_in_out_cubic(t);

            if t >= 1.0 {
                // Close the circuit and hand the finished path over.
                let mut closed = task.points.clone();
                closed.push(task.points[0]);
                surface.upsert_path(task.id, &closed, task.color);
                completed.push((
                    task.id,
                    OverlayPath {
                        id: task.id,
                        points: closed,
                        reveal_progress: 1.0,
                        color: task.color,
                        min_zoom_to_show: task.min_zoom_to_show,
                    },
                ));
                return TickOutcome::Finished;
            }

            surface.upsert_path(task.id, &visible_prefix(&task.points, progress), task.color);
            TickOutcome::Continue
        });

        let mut ids = Vec::with_capacity(completed.len());
        for (id, path) in completed {
            registry.insert(path);
            bus.trace(frame, "reveal", format!("{:?} complete", id));
            ids.push(id);
        }
        ids
    }
}

/// Prefix of `points` visible at eased `progress`, with sub-point
/// interpolation between the last two points for smoothness near the tip.
fn visible_prefix(points: &[LngLat], progress: f64) -> Vec<LngLat> {
    let n = points.len();
    let pos = progress.clamp(0.0, 1.0) * (n - 1) as f64;
    let i = pos.floor() as usize;
    let frac = pos - i as f64;

    let mut prefix: Vec<LngLat> = points[..=i.min(n - 1)].to_vec();
    if frac > 0.0 && i + 1 < n {
        prefix.push(points[i].lerp(points[i + 1], frac));
    }
    prefix
}
