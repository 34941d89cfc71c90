use camera::CameraSurface;
use foundation::ids::OverlayId;
use foundation::math::circular_distance;
use runtime::{AnimationHandle, Animations, EventBus, Frame, TickOutcome};
use serde::{Deserialize, Serialize};

use crate::registry::OverlayRegistry;

/// Sub-range of a fully revealed path that carries a traveling pulse.
///
/// Fractions are of the whole path; `wraps` marks a zone that crosses the
/// closure point of the circuit. Purely presentational and re-derivable,
/// never persisted.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalZone {
    pub start_fraction: f64,
    pub end_fraction: f64,
    pub wraps: bool,
}

impl SignalZone {
    pub fn new(start_fraction: f64, end_fraction: f64) -> Self {
        Self {
            start_fraction,
            end_fraction,
            wraps: end_fraction < start_fraction,
        }
    }

    /// Zone length as a fraction of the whole path.
    pub fn length(&self) -> f64 {
        if self.wraps {
            1.0 - self.start_fraction + self.end_fraction
        } else {
            self.end_fraction - self.start_fraction
        }
    }

    pub fn contains(&self, fraction: f64) -> bool {
        if self.wraps {
            fraction >= self.start_fraction || fraction <= self.end_fraction
        } else {
            (self.start_fraction..=self.end_fraction).contains(&fraction)
        }
    }
}

/// Pulse intensity at one path point, wire-compatible with
/// [`CameraSurface::set_path_levels`] as `0..=3`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SignalLevel {
    Off,
    Low,
    Mid,
    High,
}

impl SignalLevel {
    pub fn as_u8(self) -> u8 {
        match self {
            SignalLevel::Off => 0,
            SignalLevel::Low => 1,
            SignalLevel::Mid => 2,
            SignalLevel::High => 3,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Seconds per full pulse cycle along a zone.
    #[serde(default = "default_period")]
    pub period_s: f64,
}

fn default_period() -> f64 {
    4.0
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            period_s: default_period(),
        }
    }
}

#[derive(Debug)]
struct SweepTask {
    id: OverlayId,
    zones: Vec<SignalZone>,
    /// Cyclic phase in `[0, 1)`.
    phase: f64,
    paused: bool,
}

/// Traveling pulse along fully revealed overlays.
///
/// A sweep pauses itself (no phase advance, no level pushes) while zoom is
/// below the overlay's `min_zoom_to_show` and resumes automatically once
/// zoom recovers; the check runs every tick, so resumption needs no manual
/// nudge. A sweep whose overlay leaves the registry stops for good.
#[derive(Debug, Default)]
pub struct SweepAnimator {
    config: SweepConfig,
    sweeps: Animations<SweepTask>,
}

impl SweepAnimator {
    pub fn new(config: SweepConfig) -> Self {
        Self {
            config,
            sweeps: Animations::new(),
        }
    }

    pub fn active_count(&self) -> usize {
        self.sweeps.len()
    }

    /// Starts sweeping `zones` over the overlay `id`.
    ///
    /// One sweep per overlay: a second start for the same id is a no-op.
    pub fn start(&mut self, id: OverlayId, zones: Vec<SignalZone>) -> Option<AnimationHandle> {
        if self.sweeps.find(|t| t.id == id).is_some() {
            return None;
        }
        Some(self.sweeps.schedule(SweepTask {
            id,
            zones,
            phase: 0.0,
            paused: false,
        }))
    }

    pub fn cancel(&mut self, handle: AnimationHandle) -> bool {
        self.sweeps.cancel(handle)
    }

    pub fn cancel_for(&mut self, id: OverlayId) -> bool {
        match self.sweeps.find(|t| t.id == id) {
            Some(handle) => self.sweeps.cancel(handle),
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        self.sweeps.cancel_all();
    }

    pub fn tick(
        &mut self,
        frame: Frame,
        surface: &mut dyn CameraSurface,
        registry: &OverlayRegistry,
        bus: &mut EventBus,
    ) {
        let period = self.config.period_s.max(1e-6);
        self.sweeps.run_frame(frame, |frame, task| {
            let Some(path) = registry.get(task.id) else {
                // Overlay evicted under us; drop the sweep with it.
                return TickOutcome::Finished;
            };

            let zoom_visible = surface.pose().zoom >= path.min_zoom_to_show;
            if !zoom_visible {
                if !task.paused {
                    task.paused = true;
                    bus.trace(frame, "sweep", format!("{:?} paused below zoom", task.id));
                }
                return TickOutcome::Continue;
            }
            if task.paused {
                task.paused = false;
                bus.trace(frame, "sweep", format!("{:?} resumed", task.id));
            }

            task.phase = (task.phase + frame.dt_s / period).rem_euclid(1.0);
            let levels: Vec<u8> = signal_levels(path.points.len(), &task.zones, task.phase)
                .into_iter()
                .map(SignalLevel::as_u8)
                .collect();
            surface.set_path_levels(task.id, &levels);
            TickOutcome::Continue
        });
    }
}

/// Intensity per discrete path point for the given pulse phase.
///
/// Each point inside a zone is graded by its circular distance (modulo the
/// zone length) from the pulse position; points outside every zone are
/// `Off`. Grading thresholds are fractions of the zone length, so short
/// and long zones pulse with the same visual proportions.
pub fn signal_levels(point_count: usize, zones: &[SignalZone], phase: f64) -> Vec<SignalLevel> {
    let mut out = vec![SignalLevel::Off; point_count];
    if point_count < 2 {
        return out;
    }

    for zone in zones {
        let len = zone.length();
        if len <= 0.0 {
            continue;
        }
        let pulse = (zone.start_fraction + phase * len).rem_euclid(1.0);

        for (i, level) in out.iter_mut().enumerate() {
            let fraction = i as f64 / (point_count - 1) as f64;
            if !zone.contains(fraction) {
                continue;
            }
            // Distance along the zone cycle, in units of the zone length.
            let d = circular_distance(fraction, pulse).min(len) / len;
            let graded = if d <= 0.05 {
                SignalLevel::High
            } else if d <= 0.12 {
                SignalLevel::Mid
            } else if d <= 0.25 {
                SignalLevel::Low
            } else {
                SignalLevel::Off
            };
            if graded.as_u8() > level.as_u8() {
                *level = graded;
            }
        }
    }
    out
}
