use camera::{CameraPose, CameraSurface};
use foundation::math::LngLat;
use runtime::{EventBus, Frame, TimerId, Timers};
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinConfig {
    /// Seconds for one full revolution at full speed.
    #[serde(default = "default_revolution")]
    pub seconds_per_revolution: f64,
    /// No spinning at or above this zoom.
    #[serde(default = "default_max_spin_zoom")]
    pub max_spin_zoom: f64,
    /// Spin slows linearly between this zoom and `max_spin_zoom`.
    #[serde(default = "default_slow_spin_zoom")]
    pub slow_spin_zoom: f64,
    /// Quiet window required after an interaction before resuming.
    #[serde(default = "default_cooldown")]
    pub resume_cooldown_s: f64,
    /// Spin requires `|bearing| <= eps` and `pitch <= eps`.
    #[serde(default = "default_eps")]
    pub bearing_eps_deg: f64,
    #[serde(default = "default_eps")]
    pub pitch_eps_deg: f64,
}

fn default_revolution() -> f64 {
    240.0
}
fn default_max_spin_zoom() -> f64 {
    5.0
}
fn default_slow_spin_zoom() -> f64 {
    3.0
}
fn default_cooldown() -> f64 {
    2.0
}
fn default_eps() -> f64 {
    0.1
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            seconds_per_revolution: default_revolution(),
            max_spin_zoom: default_max_spin_zoom(),
            slow_spin_zoom: default_slow_spin_zoom(),
            resume_cooldown_s: default_cooldown(),
            bearing_eps_deg: default_eps(),
            pitch_eps_deg: default_eps(),
        }
    }
}

/// Linear slowdown factor as zoom approaches `max` from `slow`.
///
/// 1 at or below `slow`, 0 at or above `max`.
pub fn spin_slowdown(zoom: f64, slow: f64, max: f64) -> f64 {
    if max <= slow {
        return if zoom < max { 1.0 } else { 0.0 };
    }
    ((max - zoom) / (max - slow)).clamp(0.0, 1.0)
}

/// Slow autonomous globe rotation while the viewport is idle and far out.
///
/// Interaction stops the spin immediately and cancels any pending resume;
/// the spin comes back only after a full quiet cooldown, with the
/// eligibility conditions re-validated when the cooldown fires. The
/// coordinator additionally suspends the spin for the duration of a visit
/// so it never fights the orbit controller for the camera.
#[derive(Debug)]
pub struct IdleSpin {
    config: SpinConfig,
    enabled: bool,
    suspended: bool,
    interacting: bool,
    /// False while waiting out a cooldown (or a failed resume recheck).
    ready: bool,
    timers: Timers,
    resume_timer: Option<TimerId>,
}

impl IdleSpin {
    pub fn new(config: SpinConfig) -> Self {
        Self {
            config,
            enabled: true,
            suspended: false,
            interacting: false,
            ready: true,
            timers: Timers::new(),
            resume_timer: None,
        }
    }

    pub fn config(&self) -> SpinConfig {
        self.config
    }

    pub fn is_spinning(&self, pose: CameraPose) -> bool {
        self.enabled
            && !self.suspended
            && !self.interacting
            && self.ready
            && self.conditions_hold(pose)
    }

    fn conditions_hold(&self, pose: CameraPose) -> bool {
        pose.zoom < self.config.max_spin_zoom
            && pose.bearing_deg.abs() <= self.config.bearing_eps_deg
            && pose.pitch_deg <= self.config.pitch_eps_deg
    }

    /// Interaction began: stop the frame loop now and drop any pending
    /// resume.
    pub fn start_interacting(&mut self, frame: Frame, bus: &mut EventBus) {
        if let Some(id) = self.resume_timer.take() {
            self.timers.clear(id);
        }
        if !self.interacting {
            self.interacting = true;
            self.ready = false;
            bus.trace(frame, "spin", "paused by interaction");
        }
    }

    /// Interaction ended: arm the cooldown. Conditions are validated both
    /// here and again when the cooldown fires.
    pub fn stop_interacting(&mut self, frame: Frame, pose: CameraPose, bus: &mut EventBus) {
        self.interacting = false;
        if let Some(id) = self.resume_timer.take() {
            self.timers.clear(id);
        }
        if !self.conditions_hold(pose) {
            bus.trace(frame, "spin", "resume not armed, conditions failed");
            return;
        }
        self.resume_timer = Some(
            self.timers
                .arm_after(frame.now, self.config.resume_cooldown_s),
        );
    }

    /// Visit mutual exclusion: the coordinator parks the spin while a
    /// point of interest is being visited.
    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    pub fn resume_eligibility(&mut self) {
        self.suspended = false;
    }

    /// Cancels every in-flight timer and disables the controller. Safe to
    /// call repeatedly; the camera surface is not touched.
    pub fn cleanup(&mut self) {
        self.timers.clear_all();
        self.resume_timer = None;
        self.enabled = false;
        self.ready = false;
    }

    pub fn tick(&mut self, frame: Frame, surface: &mut dyn CameraSurface, bus: &mut EventBus) {
        for fired in self.timers.fire_due(frame.now) {
            if self.resume_timer == Some(fired) {
                if self.conditions_hold(surface.pose()) {
                    self.resume_timer = None;
                    self.ready = true;
                    bus.trace(frame, "spin", "resumed after cooldown");
                } else {
                    // Keep watching: the camera may come back to level.
                    self.resume_timer = Some(
                        self.timers
                            .arm_after(frame.now, self.config.resume_cooldown_s),
                    );
                    bus.trace(frame, "spin", "resume recheck failed, rearmed");
                }
            }
        }

        let pose = surface.pose();
        if !self.is_spinning(pose) {
            return;
        }

        let slowdown = spin_slowdown(
            pose.zoom,
            self.config.slow_spin_zoom,
            self.config.max_spin_zoom,
        );
        let deg = 360.0 / self.config.seconds_per_revolution.max(1e-6) * frame.dt_s * slowdown;
        surface.set_center(LngLat::new(pose.center.lng + deg, pose.center.lat));
    }
}
