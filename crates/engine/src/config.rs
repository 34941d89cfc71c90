use labels::ForceConfig;
use motion::{CinematicConfig, SpinConfig};
use overlay::{RevealConfig, SweepConfig};
use serde::{Deserialize, Serialize};

/// Camera transition used when visiting a point of interest.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitConfig {
    /// Target zoom for a visit.
    #[serde(default = "default_visit_zoom")]
    pub zoom: f64,
    #[serde(default = "default_fly_duration")]
    pub fly_duration_s: f64,
    /// Slower transition when the caller asked to go gently.
    #[serde(default = "default_gentle_fly_duration")]
    pub gentle_fly_duration_s: f64,
    /// Overlays created by a visit disappear below this zoom.
    #[serde(default = "default_overlay_min_zoom")]
    pub overlay_min_zoom: f64,
}

fn default_visit_zoom() -> f64 {
    10.0
}
fn default_fly_duration() -> f64 {
    2.0
}
fn default_gentle_fly_duration() -> f64 {
    4.0
}
fn default_overlay_min_zoom() -> f64 {
    6.0
}

impl Default for VisitConfig {
    fn default() -> Self {
        Self {
            zoom: default_visit_zoom(),
            fly_duration_s: default_fly_duration(),
            gentle_fly_duration_s: default_gentle_fly_duration(),
            overlay_min_zoom: default_overlay_min_zoom(),
        }
    }
}

/// Whole-engine configuration, JSON-loadable with per-field defaults so a
/// host can override only what it cares about.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub visit: VisitConfig,
    pub spin: SpinConfig,
    pub cinematic: CinematicConfig,
    pub reveal: RevealConfig,
    pub sweep: SweepConfig,
    pub labels: ForceConfig,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::EngineConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_json_yields_defaults() {
        let config = EngineConfig::from_json("{}").expect("parse");
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config =
            EngineConfig::from_json(r#"{"spin": {"seconds_per_revolution": 120.0}}"#).expect("parse");
        assert_eq!(config.spin.seconds_per_revolution, 120.0);
        assert_eq!(config.spin.max_spin_zoom, EngineConfig::default().spin.max_spin_zoom);
        assert_eq!(config.visit, EngineConfig::default().visit);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(EngineConfig::from_json("{not json").is_err());
    }
}
