/// Input events the session understands, delivered by the host's input
/// collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A finalized line of typed text.
    SubmitText(String),
    /// The pointer/keyboard moved the player to world x.
    PlayerMoved { x: f32 },
    TogglePause,
    /// Tear the current run down and start a fresh one.
    NewGame,
    /// End the current run early.
    Quit,
}

/// A queue of input events.
/// The host pushes events between frames; the runner hands them to the game
/// and drains them after the frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::SubmitText("mao".into()));
        q.push(InputEvent::PlayerMoved { x: 120.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn iter_keeps_events_in_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::TogglePause);
        q.push(InputEvent::SubmitText("ni".into()));
        q.push(InputEvent::Quit);
        let seen: Vec<&InputEvent> = q.iter().collect();
        assert_eq!(seen[0], &InputEvent::TogglePause);
        assert_eq!(seen[1], &InputEvent::SubmitText("ni".into()));
        assert_eq!(seen[2], &InputEvent::Quit);
        assert_eq!(q.len(), 3);
    }
}
