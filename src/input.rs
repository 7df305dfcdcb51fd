//! D-pad style commands
//!
//! Commands are edge-triggered: the host pushes one, the simulation takes at
//! most one per tick, and the latch is empty again afterwards.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Left,
    Right,
    Up,
    Down,
    Start,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Left => "left",
            Command::Right => "right",
            Command::Up => "up",
            Command::Down => "down",
            Command::Start => "start",
        }
    }

    /// Parse a host command name. Unknown names yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "left" | "arrowleft" => Some(Command::Left),
            "right" | "arrowright" => Some(Command::Right),
            "up" | "arrowup" | "jump" => Some(Command::Up),
            "down" | "arrowdown" => Some(Command::Down),
            "start" | "enter" => Some(Command::Start),
            _ => None,
        }
    }
}

/// Single-slot command buffer; a newer command replaces an unconsumed one
#[derive(Debug, Clone, Default)]
pub struct CommandLatch {
    pending: Option<Command>,
}

impl CommandLatch {
    pub fn new() -> Self {
        Self { pending: None }
    }

    pub fn push(&mut self, command: Command) {
        self.pending = Some(command);
    }

    /// Parse and push; returns false (and leaves the latch untouched) for unknown names
    pub fn push_str(&mut self, s: &str) -> bool {
        match Command::parse(s) {
            Some(command) => {
                self.push(command);
                true
            }
            None => {
                log::debug!("ignoring unknown command {:?}", s);
                false
            }
        }
    }

    /// Consume the pending command
    pub fn take(&mut self) -> Option<Command> {
        self.pending.take()
    }

    pub fn peek(&self) -> Option<Command> {
        self.pending
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Command::parse("ArrowLeft"), Some(Command::Left));
        assert_eq!(Command::parse(" jump "), Some(Command::Up));
        assert_eq!(Command::parse("start"), Some(Command::Start));
        assert_eq!(Command::parse("diagonal"), None);
        for c in [
            Command::Left,
            Command::Right,
            Command::Up,
            Command::Down,
            Command::Start,
        ] {
            assert_eq!(Command::parse(c.as_str()), Some(c));
        }
    }

    #[test]
    fn test_latch_is_edge_triggered() {
        let mut latch = CommandLatch::new();
        latch.push(Command::Left);
        assert_eq!(latch.take(), Some(Command::Left));
        assert_eq!(latch.take(), None);
    }

    #[test]
    fn test_latch_keeps_latest() {
        let mut latch = CommandLatch::new();
        latch.push(Command::Left);
        latch.push(Command::Up);
        assert_eq!(latch.peek(), Some(Command::Up));
        latch.clear();
        assert_eq!(latch.peek(), None);
    }

    #[test]
    fn test_unknown_command_ignored() {
        let mut latch = CommandLatch::new();
        latch.push(Command::Right);
        assert!(!latch.push_str("sideways"));
        assert_eq!(latch.take(), Some(Command::Right));
    }
}
