// Input handling system
//
// Keyboard input is reduced to discrete `InputEvent`s that the game applies to
// its control state as they arrive.
//
// ## Architecture
//
// - `action`: Defines driving actions and the arrow keys bound to them
// - `manager`: Translates winit key events into driving input events
//
// ## Usage Example
//
// ```rust
// use engine::input::InputManager;
//
// let input = InputManager::default();
//
// // In your event loop, translate keyboard events
// if let Some(event) = input.process_keyboard_event(&key_event) {
//     game.handle_input(event);
// }
// ```

pub mod action;
pub mod manager;

// Re-export commonly used types
pub use action::Action;
pub use manager::{InputEvent, InputManager};
