use crate::frame::Frame;

/// Event severity. `Warn` marks declined operations and stale signals that a
/// host may want to surface; everything else is trace-level.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Severity {
    Trace,
    Warn,
}

/// Structured traceability event.
///
/// This is the engine's logging surface: controllers emit one event per
/// lifecycle transition, tagged with the frame it happened on, so a replay
/// of the same frames yields the same event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub frame_index: u64,
    pub severity: Severity,
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn trace(&mut self, frame: Frame, kind: &'static str, message: impl Into<String>) {
        self.push(frame, Severity::Trace, kind, message);
    }

    pub fn warn(&mut self, frame: Frame, kind: &'static str, message: impl Into<String>) {
        self.push(frame, Severity::Warn, kind, message);
    }

    fn push(&mut self, frame: Frame, severity: Severity, kind: &'static str, message: impl Into<String>) {
        self.events.push(Event {
            frame_index: frame.index,
            severity,
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn events_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Event> + 'a {
        self.events.iter().filter(move |e| e.kind == kind)
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::{EventBus, Severity};
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
    fn records_frame_index_and_severity() {
        let mut bus = EventBus::new();
        bus.trace(frame(3), "spin", "resumed");
        bus.warn(frame(4), "reveal", "missing geometry");
        assert_eq!(bus.events().len(), 2);
        assert_eq!(bus.events()[0].frame_index, 3);
        assert_eq!(bus.events()[1].severity, Severity::Warn);
    }

    #[test]
    fn filters_by_kind() {
        let mut bus = EventBus::new();
        bus.trace(frame(0), "spin", "paused");
        bus.trace(frame(0), "orbit", "enabled");
        bus.trace(frame(1), "spin", "resumed");
        assert_eq!(bus.events_of_kind("spin").count(), 2);
    }

    #[test]
    fn drain_clears_events() {
        let mut bus = EventBus::new();
        bus.trace(frame(0), "k", "m");
        assert_eq!(bus.drain().len(), 1);
        assert!(bus.events().is_empty());
    }
}
