// Input manager - translates winit events into character commands

use super::action::{Action, InputSource};
use super::config::InputBindings;
use crate::game::character::CharacterCommand;
use std::collections::HashMap;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Looks up bindings and turns raw key/button events into `CharacterCommand`s
pub struct InputManager {
    bindings: InputBindings,

    /// Sources currently down, with the action they were bound to when pressed
    held: HashMap<InputSource, Action>,
}

impl InputManager {
    pub fn new(bindings: InputBindings) -> Self {
        Self {
            bindings,
            held: HashMap::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) -> Option<CharacterCommand> {
        // Only physical keys are bound
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return None;
        };
        self.process_key(key_code, event.state, event.repeat)
    }

    /// Process a key transition; OS auto-repeat presses are dropped
    pub fn process_key(
        &mut self,
        key_code: KeyCode,
        state: ElementState,
        repeat: bool,
    ) -> Option<CharacterCommand> {
        if repeat && state == ElementState::Pressed {
            return None;
        }
        self.process_source(InputSource::key(key_code), state)
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
    ) -> Option<CharacterCommand> {
        self.process_source(InputSource::mouse(button), state)
    }

    /// Several sources may share an action: the first press and the last
    /// release produce commands, the ones in between are absorbed.
    fn process_source(
        &mut self,
        source: InputSource,
        state: ElementState,
    ) -> Option<CharacterCommand> {
        if state == ElementState::Pressed {
            let action = self.bindings.get_action(source)?;
            let already_held = self.is_pressed(action);
            if self.held.insert(source, action).is_some() || already_held {
                return None;
            }
            return Some(command_for(action, true));
        }

        // Release what was pressed, even if the binding changed meanwhile
        let action = self.held.remove(&source)?;
        if self.is_pressed(action) {
            return None;
        }
        Some(command_for(action, false))
    }

    /// Check if any source bound to an action is currently down
    pub fn is_pressed(&self, action: Action) -> bool {
        self.held.values().any(|held| *held == action)
    }

    /// Forget every held action (e.g. after the window loses focus)
    ///
    /// Returns release commands for everything that was held, so the
    /// character can be brought back to rest.
    pub fn release_all(&mut self) -> Vec<CharacterCommand> {
        let mut released: Vec<Action> = Vec::new();
        for (_, action) in self.held.drain() {
            if !released.contains(&action) {
                released.push(action);
            }
        }
        // Pointer last so a held direction does not restore walk
        released.sort_by_key(|action| action.direction().is_none());
        released
            .into_iter()
            .map(|action| command_for(action, false))
            .collect()
    }

    pub fn bindings(&self) -> &InputBindings {
        &self.bindings
    }
}

fn command_for(action: Action, pressed: bool) -> CharacterCommand {
    match action.direction() {
        Some(direction) => CharacterCommand::Direction { direction, pressed },
        None => CharacterCommand::PrimaryPointer { pressed },
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(InputBindings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::character::Direction;

    #[test]
    fn test_arrow_press_and_release() {
        let mut manager = InputManager::default();

        let cmd = manager.process_key(KeyCode::ArrowRight, ElementState::Pressed, false);
        assert_eq!(
            cmd,
            Some(CharacterCommand::Direction {
                direction: Direction::Right,
                pressed: true
            })
        );
        assert!(manager.is_pressed(Action::MoveRight));

        let cmd = manager.process_key(KeyCode::ArrowRight, ElementState::Released, false);
        assert_eq!(
            cmd,
            Some(CharacterCommand::Direction {
                direction: Direction::Right,
                pressed: false
            })
        );
        assert!(!manager.is_pressed(Action::MoveRight));
    }

    #[test]
    fn test_repeat_presses_dropped() {
        let mut manager = InputManager::default();
        manager.process_key(KeyCode::ArrowUp, ElementState::Pressed, false);
        assert_eq!(
            manager.process_key(KeyCode::ArrowUp, ElementState::Pressed, true),
            None
        );
    }

    #[test]
    fn test_unbound_key_ignored() {
        let mut manager = InputManager::default();
        assert_eq!(
            manager.process_key(KeyCode::KeyQ, ElementState::Pressed, false),
            None
        );
    }

    #[test]
    fn test_left_mouse_is_primary_pointer() {
        let mut manager = InputManager::default();
        assert_eq!(
            manager.process_mouse_button(MouseButton::Left, ElementState::Pressed),
            Some(CharacterCommand::PrimaryPointer { pressed: true })
        );
        assert_eq!(
            manager.process_mouse_button(MouseButton::Left, ElementState::Released),
            Some(CharacterCommand::PrimaryPointer { pressed: false })
        );
    }

    #[test]
    fn test_other_mouse_buttons_ignored() {
        let mut manager = InputManager::default();
        assert_eq!(
            manager.process_mouse_button(MouseButton::Right, ElementState::Pressed),
            None
        );
        assert_eq!(
            manager.process_mouse_button(MouseButton::Middle, ElementState::Pressed),
            None
        );
    }

    fn with_extra_right_key() -> InputManager {
        let mut bindings = InputBindings::default();
        bindings.bind(InputSource::key(KeyCode::KeyD), Action::MoveRight);
        InputManager::new(bindings)
    }

    #[test]
    fn test_rebound_key() {
        let mut manager = with_extra_right_key();

        assert_eq!(
            manager.process_key(KeyCode::KeyD, ElementState::Pressed, false),
            Some(CharacterCommand::Direction {
                direction: Direction::Right,
                pressed: true
            })
        );
    }

    #[test]
    fn test_release_all_puts_pointer_last() {
        let mut manager = InputManager::default();
        manager.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        manager.process_key(KeyCode::ArrowDown, ElementState::Pressed, false);

        let released = manager.release_all();
        assert_eq!(released.len(), 2);
        assert_eq!(
            released[1],
            CharacterCommand::PrimaryPointer { pressed: false }
        );
        assert!(!manager.is_pressed(Action::MoveDown));
        assert!(manager.release_all().is_empty());
    }

    #[test]
    fn test_shared_action_released_by_last_source() {
        let mut manager = with_extra_right_key();

        assert!(manager
            .process_key(KeyCode::ArrowRight, ElementState::Pressed, false)
            .is_some());
        // Second source for a held action adds nothing
        assert_eq!(
            manager.process_key(KeyCode::KeyD, ElementState::Pressed, false),
            None
        );
        assert_eq!(
            manager.process_key(KeyCode::KeyD, ElementState::Released, false),
            None
        );
        assert!(manager.is_pressed(Action::MoveRight));

        assert_eq!(
            manager.process_key(KeyCode::ArrowRight, ElementState::Released, false),
            Some(CharacterCommand::Direction {
                direction: Direction::Right,
                pressed: false
            })
        );
        assert!(!manager.is_pressed(Action::MoveRight));
    }

    #[test]
    fn test_character_keeps_walking_while_other_key_held() {
        use crate::game::character::sprite_set::tests::standard_registry;
        use crate::game::character::{AnimatedCharacter, SpriteKey};
        use glam::Vec2;
        use std::time::Duration;

        let mut manager = with_extra_right_key();
        let mut character =
            AnimatedCharacter::initialize(standard_registry(), Vec2::new(800.0, 600.0), Duration::ZERO);
        let events = [
            (KeyCode::ArrowRight, ElementState::Pressed),
            (KeyCode::KeyD, ElementState::Pressed),
            (KeyCode::KeyD, ElementState::Released),
        ];
        for (key, state) in events {
            if let Some(command) = manager.process_key(key, state, false) {
                character.apply(command, Duration::from_millis(10));
            }
        }

        assert_eq!(character.active_sprite(), SpriteKey::Walk);
        assert!(character.is_walking());
        assert_eq!(character.motion().velocity.x, 3.0);
    }

    #[test]
    fn test_release_all_reports_shared_action_once() {
        let mut manager = with_extra_right_key();
        manager.process_key(KeyCode::ArrowRight, ElementState::Pressed, false);
        manager.process_key(KeyCode::KeyD, ElementState::Pressed, false);

        assert_eq!(
            manager.release_all(),
            vec![CharacterCommand::Direction {
                direction: Direction::Right,
                pressed: false
            }]
        );
    }

    #[test]
    fn test_release_without_press_ignored() {
        let mut manager = InputManager::default();
        assert_eq!(
            manager.process_key(KeyCode::ArrowLeft, ElementState::Released, false),
            None
        );
    }
}
