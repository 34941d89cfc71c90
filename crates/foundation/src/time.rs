/// Engine time in seconds since session start.
///
/// Deliberately not wall-clock: the engine timebase is advanced by frame
/// deltas so runs can be recorded and replayed.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Time(pub f64);

impl Time {
    pub const ZERO: Time = Time(0.0);

    pub fn after(self, seconds: f64) -> Time {
        Time(self.0 + seconds)
    }

    /// Seconds elapsed since `earlier`, clamped to zero.
    pub fn since(self, earlier: Time) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}
