// Input manager - translates winit key events into driving input events

use super::action::{action_for_key, Action};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// A bound key going down or up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub action: Action,
    pub pressed: bool,
}

/// Resolves physical keys to driving actions
#[derive(Debug, Clone, Copy, Default)]
pub struct InputManager;

impl InputManager {
    /// Process a keyboard event from winit
    ///
    /// OS key repeats are passed through as presses: holding the accelerator
    /// keeps adding speed.
    pub fn process_keyboard_event(&self, event: &KeyEvent) -> Option<InputEvent> {
        match event.physical_key {
            PhysicalKey::Code(key_code) => self.process_key(key_code, event.state),
            PhysicalKey::Unidentified(_) => None,
        }
    }

    /// Translate a key state change; unbound keys yield nothing
    pub fn process_key(&self, key: KeyCode, state: ElementState) -> Option<InputEvent> {
        action_for_key(key).map(|action| InputEvent {
            action,
            pressed: state == ElementState::Pressed,
        })
    }
}
