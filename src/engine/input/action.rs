// Action definitions and default bindings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::game::character::Direction;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,

    // Primary pointer
    Slash,
}

impl Action {
    /// Movement direction for directional actions
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Self::MoveLeft => Some(Direction::Left),
            Self::MoveRight => Some(Direction::Right),
            Self::MoveUp => Some(Direction::Up),
            Self::MoveDown => Some(Direction::Down),
            Self::Slash => None,
        }
    }
}

/// Represents an input source (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button input source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Arrow keys move, left mouse button slashes
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::ArrowLeft), Action::MoveLeft),
        (InputSource::key(KeyCode::ArrowRight), Action::MoveRight),
        (InputSource::key(KeyCode::ArrowUp), Action::MoveUp),
        (InputSource::key(KeyCode::ArrowDown), Action::MoveDown),
        (InputSource::mouse(MouseButton::Left), Action::Slash),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_directions() {
        assert_eq!(Action::MoveLeft.direction(), Some(Direction::Left));
        assert_eq!(Action::MoveDown.direction(), Some(Direction::Down));
        assert_eq!(Action::Slash.direction(), None);
    }

    #[test]
    fn test_input_source_creation() {
        assert_eq!(
            InputSource::key(KeyCode::ArrowUp),
            InputSource::Keyboard(KeyCode::ArrowUp)
        );
        assert_eq!(
            InputSource::mouse(MouseButton::Left),
            InputSource::Mouse(MouseButton::Left)
        );
    }

    #[test]
    fn test_default_bindings_use_left_mouse_for_slash() {
        let bindings = default_bindings();
        let slash = bindings.iter().find(|(_, action)| *action == Action::Slash);
        assert!(matches!(
            slash,
            Some((InputSource::Mouse(MouseButton::Left), _))
        ));
    }

    #[test]
    fn test_no_duplicate_inputs() {
        let mut seen_sources = std::collections::HashSet::new();
        for (source, _) in default_bindings() {
            assert!(seen_sources.insert(source), "Duplicate input source");
        }
    }
}
