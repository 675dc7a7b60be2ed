use std::time::Duration;

use crate::engine::movement::Direction;
use crate::error::Result;

pub(crate) trait EventSource {
    /// Wait up to `timeout` for the next event.
    fn next_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Event {
    UserInput(UserInput),
    Resize,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum UserInput {
    Direction(Direction),
    Undo,
    Quit,
    /// Any key without a binding of its own.
    Other,
}
