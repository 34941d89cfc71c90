use foundation::time::Time;

/// Interaction classes reported by the camera surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InteractionKind {
    Drag,
    Pitch,
    Rotate,
    Zoom,
    Touch,
}

const KIND_COUNT: usize = 5;

fn kind_slot(kind: InteractionKind) -> usize {
    match kind {
        InteractionKind::Drag => 0,
        InteractionKind::Pitch => 1,
        InteractionKind::Rotate => 2,
        InteractionKind::Zoom => 3,
        InteractionKind::Touch => 4,
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InteractionEvent {
    Begin(InteractionKind),
    End(InteractionKind),
}

/// Flip of the aggregate interaction flag.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InteractionEdge {
    Started,
    Ended,
}

/// Collapses per-kind begin/end signals into one "is the user currently
/// interacting" flag.
///
/// Overlapping gestures (pinch while dragging) are refcounted per kind;
/// the aggregate flag stays up until every kind has ended. No debouncing
/// here: each consumer applies its own cooldown window.
#[derive(Debug, Default)]
pub struct InteractionMonitor {
    active: [u32; KIND_COUNT],
    last_end: Option<Time>,
}

impl InteractionMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_interacting(&self) -> bool {
        self.active.iter().any(|&n| n > 0)
    }

    pub fn last_end(&self) -> Option<Time> {
        self.last_end
    }

    /// Feeds one camera-surface signal.
    ///
    /// Returns the aggregate edge when the overall flag flips. Unbalanced
    /// End signals saturate at zero rather than going negative.
    pub fn observe(&mut self, event: InteractionEvent, now: Time) -> Option<InteractionEdge> {
        let was = self.is_interacting();
        match event {
            InteractionEvent::Begin(kind) => {
                self.active[kind_slot(kind)] += 1;
            }
            InteractionEvent::End(kind) => {
                let slot = &mut self.active[kind_slot(kind)];
                *slot = slot.saturating_sub(1);
            }
        }
        let is = self.is_interacting();
        match (was, is) {
            (false, true) => Some(InteractionEdge::Started),
            (true, false) => {
                self.last_end = Some(now);
                Some(InteractionEdge::Ended)
            }
            _ => None,
        }
    }
}
