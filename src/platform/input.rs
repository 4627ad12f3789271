//! Keyboard mapping
//!
//! Arrow keys drive the four movement flags; `R` restarts.

use crate::sim::Direction;

/// A key the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Move(Direction),
    Restart,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Key::Move(Direction::Up)),
            "ArrowDown" => Some(Key::Move(Direction::Down)),
            "ArrowLeft" => Some(Key::Move(Direction::Left)),
            "ArrowRight" => Some(Key::Move(Direction::Right)),
            "r" | "R" => Some(Key::Restart),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_key_mapping() {
        assert_eq!(Key::from_dom_key("ArrowLeft"), Some(Key::Move(Direction::Left)));
        assert_eq!(Key::from_dom_key("ArrowUp"), Some(Key::Move(Direction::Up)));
        assert_eq!(Key::from_dom_key("R"), Some(Key::Restart));
        assert_eq!(Key::from_dom_key("r"), Some(Key::Restart));
        assert_eq!(Key::from_dom_key("w"), None);
        assert_eq!(Key::from_dom_key(" "), None);
    }
}
