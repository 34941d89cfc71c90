use crate::frame::Frame;

/// Handle to a scheduled animation.
///
/// Handles are never reused: ids are allocated from a monotonically
/// increasing counter, so a stale handle can only ever refer to an
/// animation that no longer exists, and cancelling it is a no-op.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimationHandle(pub u64);

/// Outcome of one animation tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Finished,
}

#[derive(Debug)]
struct Item<T> {
    handle: AnimationHandle,
    payload: T,
    canceled: bool,
}

/// Deterministic registry of frame-driven animations.
///
/// Key properties:
/// - Ticking order is ascending handle id (insertion order).
/// - `cancel` is idempotent; a cancelled animation is never ticked again,
///   even within the same `run_frame` pass.
/// - Finished animations are removed before `run_frame` returns.
///
/// Vec-backed on purpose: the engine holds a handful of animations at a
/// time and determinism matters more than asymptotic performance.
#[derive(Debug)]
pub struct Animations<T> {
    next_id: u64,
    items: Vec<Item<T>>,
}

impl<T> Default for Animations<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            items: Vec::new(),
        }
    }
}

impl<T> Animations<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.iter().filter(|i| !i.canceled).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn schedule(&mut self, payload: T) -> AnimationHandle {
        let handle = AnimationHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.items.push(Item {
            handle,
            payload,
            canceled: false,
        });
        handle
    }

    pub fn is_active(&self, handle: AnimationHandle) -> bool {
        self.items
            .iter()
            .any(|i| i.handle == handle && !i.canceled)
    }

    /// Cancels the animation behind `handle`.
    ///
    /// Returns `true` if it was still active. Safe to call repeatedly and
    /// with stale handles.
    pub fn cancel(&mut self, handle: AnimationHandle) -> bool {
        for item in &mut self.items {
            if item.handle == handle && !item.canceled {
                item.canceled = true;
                return true;
            }
        }
        false
    }

    pub fn cancel_all(&mut self) {
        for item in &mut self.items {
            item.canceled = true;
        }
    }

    /// Finds an active payload matching `pred`.
    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<AnimationHandle> {
        self.items
            .iter()
            .find(|i| !i.canceled && pred(&i.payload))
            .map(|i| i.handle)
    }

    /// Ticks every active animation once, in handle order.
    ///
    /// `tick` returning [`TickOutcome::Finished`] removes the animation.
    /// Cancelled entries are compacted away in the same pass.
    pub fn run_frame(&mut self, frame: Frame, mut tick: impl FnMut(Frame, &mut T) -> TickOutcome) {
        for item in &mut self.items {
            if item.canceled {
                continue;
            }
            if tick(frame, &mut item.payload) == TickOutcome::Finished {
                item.canceled = true;
            }
        }
        self.items.retain(|i| !i.canceled);
    }
}

#[cfg(test)]
mod tests {
    use super::{Animations, TickOutcome};
    use crate::frame::Frame;
    use foundation::time::Time;

    fn frame(index: u64) -> Frame {
        Frame {
            index,
            dt_s: 1.0 / 60.0,
            now: Time(index as f64 / 60.0),
        }
    }

    #[test]
    fn ticks_in_handle_order() {
        let mut anims: Animations<&'static str> = Animations::new();
        anims.schedule("b");
        anims.schedule("a");
        let mut seen = Vec::new();
        anims.run_frame(frame(0), |_, name| {
            seen.push(*name);
            TickOutcome::Continue
        });
        assert_eq!(seen, vec!["b", "a"]);
    }

    #[test]
    fn cancel_is_idempotent_and_stops_ticks() {
        let mut anims: Animations<u32> = Animations::new();
        let h = anims.schedule(0);
        assert!(anims.cancel(h));
        assert!(!anims.cancel(h));
        let mut ticked = 0;
        anims.run_frame(frame(0), |_, _| {
            ticked += 1;
            TickOutcome::Continue
        });
        assert_eq!(ticked, 0);
        assert!(anims.is_empty());
    }

    #[test]
    fn stale_handle_cancel_is_a_noop() {
        let mut anims: Animations<u32> = Animations::new();
        let h = anims.schedule(1);
        anims.run_frame(frame(0), |_, _| TickOutcome::Finished);
        assert!(!anims.cancel(h));
    }

    #[test]
    fn finished_animations_are_removed() {
        let mut anims: Animations<u32> = Animations::new();
        anims.schedule(0);
        anims.schedule(1);
        anims.run_frame(frame(0), |_, n| {
            if *n == 0 {
                TickOutcome::Finished
            } else {
                TickOutcome::Continue
            }
        });
        assert_eq!(anims.len(), 1);
    }

    #[test]
    fn handles_are_never_reused() {
        let mut anims: Animations<u32> = Animations::new();
        let h0 = anims.schedule(0);
        anims.cancel(h0);
        let h1 = anims.schedule(1);
        assert_ne!(h0, h1);
        assert!(!anims.is_active(h0));
        assert!(anims.is_active(h1));
    }
}
