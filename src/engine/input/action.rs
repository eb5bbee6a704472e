// Driving action definitions and key bindings

use winit::keyboard::KeyCode;

/// Represents all possible driving actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Add forward speed
    Accelerate,
    /// Subtract forward speed
    Brake,
    SteerLeft,
    SteerRight,
}

impl Action {
    /// Whether this is one of the two steering actions
    pub fn is_steering(self) -> bool {
        matches!(self, Action::SteerLeft | Action::SteerRight)
    }
}

/// The action bound to `key`, if any
///
/// Bindings are fixed to the arrow keys.
pub fn action_for_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::ArrowUp => Some(Action::Accelerate),
        KeyCode::ArrowDown => Some(Action::Brake),
        KeyCode::ArrowLeft => Some(Action::SteerLeft),
        KeyCode::ArrowRight => Some(Action::SteerRight),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steering_actions() {
        assert!(Action::SteerLeft.is_steering());
        assert!(Action::SteerRight.is_steering());
        assert!(!Action::Accelerate.is_steering());
        assert!(!Action::Brake.is_steering());
    }

    #[test]
    fn test_arrow_keys_are_bound() {
        assert_eq!(action_for_key(KeyCode::ArrowUp), Some(Action::Accelerate));
        assert_eq!(action_for_key(KeyCode::ArrowDown), Some(Action::Brake));
        assert_eq!(action_for_key(KeyCode::ArrowLeft), Some(Action::SteerLeft));
        assert_eq!(action_for_key(KeyCode::ArrowRight), Some(Action::SteerRight));
    }

    #[test]
    fn test_other_keys_are_unbound() {
        assert_eq!(action_for_key(KeyCode::KeyW), None);
        assert_eq!(action_for_key(KeyCode::Space), None);
        assert_eq!(action_for_key(KeyCode::Escape), None);
    }
}
