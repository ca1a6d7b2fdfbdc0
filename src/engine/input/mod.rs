// Input handling system
//
// Keyboard and mouse events from winit are looked up in a binding table and
// turned into commands for the character.
//
// ## Architecture
//
// - `action`: Defines actions and default key bindings
// - `config`: Binding table and remapping
// - `manager`: Translates winit events into `CharacterCommand`s
//
// ## Usage Example
//
// ```rust
// use engine::input::InputManager;
//
// let mut input_manager = InputManager::default();
//
// // In your event loop, process keyboard events
// if let Some(command) = input_manager.process_keyboard_event(&key_event) {
//     character.apply(command, clock.now());
// }
// ```

pub mod action;
pub mod config;
pub mod manager;

// Re-export commonly used types
pub use action::{Action, InputSource};
pub use config::InputBindings;
pub use manager::InputManager;
