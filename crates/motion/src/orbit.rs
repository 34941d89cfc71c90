use camera::CameraSurface;
use foundation::time::Time;
use runtime::{EventBus, Frame};
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CinematicConfig {
    /// Delay between enabling and the first bearing change.
    #[serde(default = "default_warmup")]
    pub warmup_s: f64,
    /// Quiet window after an interaction before rotation resumes.
    #[serde(default = "default_idle_resume")]
    pub idle_resume_s: f64,
    /// Orbit is viable only at or above this zoom.
    #[serde(default = "default_min_zoom")]
    pub min_orbit_zoom: f64,
    /// Bearing advance rate while active.
    #[serde(default = "default_rate")]
    pub bearing_deg_per_s: f64,
}

fn default_warmup() -> f64 {
    1.0
}
fn default_idle_resume() -> f64 {
    30.0
}
fn default_min_zoom() -> f64 {
    8.0
}
fn default_rate() -> f64 {
    2.0
}

impl Default for CinematicConfig {
    fn default() -> Self {
        Self {
            warmup_s: default_warmup(),
            idle_resume_s: default_idle_resume(),
            min_orbit_zoom: default_min_zoom(),
            bearing_deg_per_s: default_rate(),
        }
    }
}

/// Cinematic orbit session state.
///
/// Deadlines are carried inside the states rather than in side timers, so
/// a transition replaces the old deadline wholesale and a stale one cannot
/// fire: there is nothing left to fire.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CinematicState {
    Disabled,
    /// Warm-up window before the first bearing change.
    Enabling { ready_at: Time },
    Active,
    /// `resume_at` is `None` for a zoom-forced pause, which resumes as
    /// soon as zoom recovers instead of on a timer.
    Paused { resume_at: Option<Time> },
}

/// Everything that can drive a cinematic transition.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CinematicEvent {
    Toggle,
    InteractionStart,
    /// Warm-up deadline reached; `interacting` decides where it lands.
    WarmupElapsed { interacting: bool },
    /// Idle-resume deadline reached with no interaction in progress.
    ResumeElapsed,
    ZoomBelowThreshold,
    ZoomRecovered,
}

/// Pure transition function for the cinematic state machine.
///
/// `toggle` during `Enabling` cancels the pending warm-up cleanly back to
/// `Disabled` rather than being ignored; either way there is never a
/// second concurrent rotation loop because the state is the loop.
pub fn transition(
    state: CinematicState,
    event: CinematicEvent,
    now: Time,
    config: &CinematicConfig,
) -> CinematicState {
    use CinematicEvent as E;
    use CinematicState as S;

    match (state, event) {
        (S::Disabled, E::Toggle) => S::Enabling {
            ready_at: now.after(config.warmup_s),
        },
        (S::Enabling { .. } | S::Active | S::Paused { .. }, E::Toggle) => S::Disabled,

        (S::Enabling { .. }, E::WarmupElapsed { interacting: false }) => S::Active,
        (S::Enabling { .. }, E::WarmupElapsed { interacting: true }) => S::Paused {
            resume_at: Some(now.after(config.idle_resume_s)),
        },

        (S::Active | S::Paused { .. }, E::InteractionStart) => S::Paused {
            resume_at: Some(now.after(config.idle_resume_s)),
        },

        (S::Paused { .. }, E::ResumeElapsed) => S::Active,
        (S::Active, E::ZoomBelowThreshold) => S::Paused { resume_at: None },
        (S::Paused { resume_at: None }, E::ZoomRecovered) => S::Active,

        (state, _) => state,
    }
}

/// User-toggleable slow orbit around the visited point of interest.
///
/// Interaction start pauses rotation and arms the idle-resume window;
/// interaction end on its own never resumes. Zoom dropping below the
/// viable threshold forces a pause regardless of timers.
#[derive(Debug)]
pub struct OrbitCinematic {
    config: CinematicConfig,
    state: CinematicState,
}

impl OrbitCinematic {
    pub fn new(config: CinematicConfig) -> Self {
        Self {
            config,
            state: CinematicState::Disabled,
        }
    }

    pub fn state(&self) -> CinematicState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state != CinematicState::Disabled
    }

    /// Flips the mode. Returns whether the mode is enabled afterwards.
    pub fn toggle(&mut self, frame: Frame, bus: &mut EventBus) -> bool {
        self.state = transition(self.state, CinematicEvent::Toggle, frame.now, &self.config);
        let enabled = self.is_enabled();
        bus.trace(
            frame,
            "orbit",
            if enabled { "enabled" } else { "disabled" },
        );
        enabled
    }

    pub fn on_interaction_start(&mut self, frame: Frame, bus: &mut EventBus) {
        let before = self.state;
        self.state = transition(
            self.state,
            CinematicEvent::InteractionStart,
            frame.now,
            &self.config,
        );
        if before == CinematicState::Active {
            bus.trace(frame, "orbit", "paused by interaction");
        }
    }

    /// Explicit disable used when the visit changes or the session tears
    /// down. Idempotent.
    pub fn disable(&mut self) {
        self.state = CinematicState::Disabled;
    }

    /// Drives deadline transitions and, while active, the bearing.
    pub fn tick(
        &mut self,
        frame: Frame,
        surface: &mut dyn CameraSurface,
        interacting: bool,
        bus: &mut EventBus,
    ) {
        let zoom = surface.pose().zoom;
        let zoom_viable = zoom >= self.config.min_orbit_zoom;

        match self.state {
            CinematicState::Enabling { ready_at } if frame.now >= ready_at => {
                self.state = transition(
                    self.state,
                    CinematicEvent::WarmupElapsed { interacting },
                    frame.now,
                    &self.config,
                );
                if self.state == CinematicState::Active {
                    bus.trace(frame, "orbit", "active");
                }
            }
            CinematicState::Active if !zoom_viable => {
                self.state = transition(
                    self.state,
                    CinematicEvent::ZoomBelowThreshold,
                    frame.now,
                    &self.config,
                );
                bus.trace(frame, "orbit", "paused below zoom");
            }
            CinematicState::Paused {
                resume_at: Some(at),
            } if frame.now >= at && !interacting && zoom_viable => {
                self.state = transition(
                    self.state,
                    CinematicEvent::ResumeElapsed,
                    frame.now,
                    &self.config,
                );
                bus.trace(frame, "orbit", "resumed after idle");
            }
            CinematicState::Paused { resume_at: None } if zoom_viable && !interacting => {
                self.state = transition(
                    self.state,
                    CinematicEvent::ZoomRecovered,
                    frame.now,
                    &self.config,
                );
                bus.trace(frame, "orbit", "resumed after zoom recovery");
            }
            _ => {}
        }

        if self.state == CinematicState::Active && zoom_viable {
            let pose = surface.pose();
            surface.set_bearing(pose.bearing_deg + self.config.bearing_deg_per_s * frame.dt_s);
        }
    }
}
