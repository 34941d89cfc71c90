use std::collections::BTreeMap;

use foundation::time::Time;

/// Handle to an armed one-shot timer.
///
/// Like [`crate::AnimationHandle`], ids are never reused, so a handle kept
/// past `clear` can only ever miss.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// Deterministic one-shot timers on the engine timebase.
///
/// A cleared timer never fires: `clear` removes the entry outright, so a
/// stale id held by an old closure generation simply refers to nothing.
/// `fire_due` returns due ids in id (arming) order.
#[derive(Debug, Default)]
pub struct Timers {
    next_id: u64,
    armed: BTreeMap<TimerId, Time>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.armed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }

    pub fn arm(&mut self, deadline: Time) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.armed.insert(id, deadline);
        id
    }

    pub fn arm_after(&mut self, now: Time, delay_s: f64) -> TimerId {
        self.arm(now.after(delay_s))
    }

    /// Clears a timer. Idempotent; stale ids are a no-op.
    ///
    /// Returns `true` if the timer was still armed.
    pub fn clear(&mut self, id: TimerId) -> bool {
        self.armed.remove(&id).is_some()
    }

    pub fn clear_all(&mut self) {
        self.armed.clear();
    }

    pub fn is_armed(&self, id: TimerId) -> bool {
        self.armed.contains_key(&id)
    }

    /// Removes and returns every timer whose deadline is at or before `now`.
    pub fn fire_due(&mut self, now: Time) -> Vec<TimerId> {
        let due: Vec<TimerId> = self
            .armed
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(id, _)| *id)
            .collect();
        for id in &due {
            self.armed.remove(id);
        }
        due
    }
}
