/// Discrete display state for markers and overlays, derived purely from
/// zoom. Pure and hysteresis-free: the same zoom always yields the same
/// band, including at exact boundaries.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VisibilityBand {
    /// Far out: collapse to a dot.
    Dot,
    Normal,
    /// First fade step approaching street level.
    Fade1,
    /// Second fade step.
    Fade2,
    Hidden,
}

/// Zoom thresholds dividing the bands. Non-overlapping by construction:
/// each threshold belongs to exactly one side.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BandThresholds {
    /// `zoom <= dot_max` renders as a dot.
    pub dot_max: f64,
    /// `dot_max < zoom < fade1_min` renders normally.
    pub fade1_min: f64,
    /// `fade1_min <= zoom < fade2_min` is the first fade step.
    pub fade2_min: f64,
    /// `fade2_min <= zoom < hidden_min` is the second; `>= hidden_min` hides.
    pub hidden_min: f64,
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            dot_max: 5.5,
            fade1_min: 12.0,
            fade2_min: 13.0,
            hidden_min: 14.0,
        }
    }
}

pub fn band(zoom: f64) -> VisibilityBand {
    band_with(BandThresholds::default(), zoom)
}

pub fn band_with(t: BandThresholds, zoom: f64) -> VisibilityBand {
    if zoom <= t.dot_max {
        VisibilityBand::Dot
    } else if zoom < t.fade1_min {
        VisibilityBand::Normal
    } else if zoom < t.fade2_min {
        VisibilityBand::Fade1
    } else if zoom < t.hidden_min {
        VisibilityBand::Fade2
    } else {
        VisibilityBand::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::{VisibilityBand, band};

    #[test]
    fn zoom_sweep_hits_every_band_in_order() {
        let sweep = [5.4, 5.6, 12.5, 13.5, 14.1];
        let got: Vec<VisibilityBand> = sweep.iter().map(|z| band(*z)).collect();
        assert_eq!(
            got,
            vec![
                VisibilityBand::Dot,
                VisibilityBand::Normal,
                VisibilityBand::Fade1,
                VisibilityBand::Fade2,
                VisibilityBand::Hidden,
            ]
        );
    }

    #[test]
    fn boundaries_are_deterministic() {
        assert_eq!(band(5.5), VisibilityBand::Dot);
        assert_eq!(band(12.0), VisibilityBand::Fade1);
        assert_eq!(band(13.0), VisibilityBand::Fade2);
        assert_eq!(band(14.0), VisibilityBand::Hidden);
    }

    #[test]
    fn same_zoom_same_band_no_flicker() {
        for _ in 0..10 {
            assert_eq!(band(12.0), band(12.0));
        }
    }
}
