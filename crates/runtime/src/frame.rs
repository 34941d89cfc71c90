use foundation::time::Time;

/// Per-frame metadata handed to every controller tick.
///
/// The engine timebase is advanced by the host's frame deltas, so `dt_s`
/// varies frame to frame. `now` is the accumulated engine time at the
/// start of the frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Delta since the previous frame (seconds), clamped by [`FrameClock`].
    pub dt_s: f64,
    /// Engine time at the start of the frame.
    pub now: Time,
}

/// Accumulates host frame deltas into [`Frame`] values.
///
/// Deltas are clamped to `max_dt_s` so a stalled tab or breakpoint does not
/// produce one giant animation jump on resume.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameClock {
    next_index: u64,
    now: Time,
    max_dt_s: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_max_dt(0.1)
    }

    pub fn with_max_dt(max_dt_s: f64) -> Self {
        Self {
            next_index: 0,
            now: Time::ZERO,
            max_dt_s,
        }
    }

    pub fn now(&self) -> Time {
        self.now
    }

    /// Produces the next frame for a host-reported delta.
    pub fn advance(&mut self, dt_s: f64) -> Frame {
        let dt = dt_s.clamp(0.0, self.max_dt_s);
        let frame = Frame {
            index: self.next_index,
            dt_s: dt,
            now: self.now,
        };
        self.next_index += 1;
        self.now = self.now.after(dt);
        frame
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::FrameClock;
    use foundation::time::Time;

    #[test]
    fn accumulates_deltas() {
        let mut clock = FrameClock::new();
        let f0 = clock.advance(0.016);
        let f1 = clock.advance(0.020);
        assert_eq!(f0.index, 0);
        assert_eq!(f0.now, Time::ZERO);
        assert_eq!(f1.index, 1);
        assert!((f1.now.0 - 0.016).abs() < 1e-12);
    }

    #[test]
    fn clamps_stall_deltas() {
        let mut clock = FrameClock::with_max_dt(0.05);
        let f = clock.advance(3.0);
        assert_eq!(f.dt_s, 0.05);
    }

    #[test]
    fn rejects_negative_deltas() {
        let mut clock = FrameClock::new();
        let f = clock.advance(-1.0);
        assert_eq!(f.dt_s, 0.0);
    }
}
