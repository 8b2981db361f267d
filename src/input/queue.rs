use crate::game::{Action, Direction};

/// Holds the direction most recently requested between two ticks
///
/// Only the latest key press counts; earlier ones are overwritten.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectionQueue {
    pending: Option<Direction>,
}

impl DirectionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, direction: Direction) {
        self.pending = Some(direction);
    }

    /// Take the pending request, turning "nothing queued" into `Continue`
    pub fn take(&mut self) -> Action {
        Action::from(self.pending.take())
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}
