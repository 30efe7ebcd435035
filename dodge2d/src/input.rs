use std::collections::HashSet;

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// A single keyboard transition, as delivered by the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub key: KeyCode,
    pub state: ElementState,
    /// Set for auto-repeat events generated while a key is held.
    pub repeat: bool,
}

impl KeyInput {
    pub fn pressed(key: KeyCode) -> Self {
        Self {
            key,
            state: ElementState::Pressed,
            repeat: false,
        }
    }

    pub fn released(key: KeyCode) -> Self {
        Self {
            key,
            state: ElementState::Released,
            repeat: false,
        }
    }

    /// True for the initial key-down of a press, false for repeats and releases.
    pub fn is_press(&self) -> bool {
        self.state == ElementState::Pressed && !self.repeat
    }
}

/// Tracks keyboard state across frames.
///
/// Besides the held/pressed/released sets, every key transition is queued in
/// arrival order until game code drains it with [`InputState::take_key_events`].
/// The queue survives frames in which no fixed update ran, so no press is lost.
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    key_events: Vec<KeyInput>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_pressed: HashSet::new(),
            keys_released: HashSet::new(),
            key_events: Vec::new(),
        }
    }

    /// Clear per-frame pressed/released flags.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    /// Handle a keyboard input event from winit.
    pub fn handle_key(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key) = event.physical_key {
            self.record_key(KeyInput {
                key,
                state: event.state,
                repeat: event.repeat,
            });
        }
    }

    /// Record a key transition.
    pub fn record_key(&mut self, input: KeyInput) {
        match input.state {
            ElementState::Pressed => {
                if !self.keys_down.contains(&input.key) {
                    self.keys_pressed.insert(input.key);
                }
                self.keys_down.insert(input.key);
            }
            ElementState::Released => {
                self.keys_down.remove(&input.key);
                self.keys_released.insert(input.key);
            }
        }
        self.key_events.push(input);
    }

    /// Drain queued key transitions, oldest first.
    pub fn take_key_events(&mut self) -> Vec<KeyInput> {
        std::mem::take(&mut self.key_events)
    }

    /// Returns true if the key is currently held down.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns true if the key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Returns true if the key was released this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release_tracking() {
        let mut input = InputState::new();
        input.record_key(KeyInput::pressed(KeyCode::ArrowLeft));
        assert!(input.is_key_down(KeyCode::ArrowLeft));
        assert!(input.is_key_pressed(KeyCode::ArrowLeft));

        input.begin_frame();
        assert!(input.is_key_down(KeyCode::ArrowLeft));
        assert!(!input.is_key_pressed(KeyCode::ArrowLeft));

        input.record_key(KeyInput::released(KeyCode::ArrowLeft));
        assert!(!input.is_key_down(KeyCode::ArrowLeft));
        assert!(input.is_key_released(KeyCode::ArrowLeft));
    }

    #[test]
    fn test_key_events_keep_arrival_order() {
        let mut input = InputState::new();
        input.record_key(KeyInput::pressed(KeyCode::ArrowLeft));
        input.record_key(KeyInput::released(KeyCode::ArrowLeft));
        input.record_key(KeyInput::pressed(KeyCode::ArrowRight));

        let events = input.take_key_events();
        assert_eq!(
            events,
            vec![
                KeyInput::pressed(KeyCode::ArrowLeft),
                KeyInput::released(KeyCode::ArrowLeft),
                KeyInput::pressed(KeyCode::ArrowRight),
            ]
        );
        assert!(input.take_key_events().is_empty());
    }

    #[test]
    fn test_key_events_survive_frame_boundary() {
        let mut input = InputState::new();
        input.record_key(KeyInput::pressed(KeyCode::ArrowRight));
        input.begin_frame();
        assert_eq!(input.take_key_events().len(), 1);
    }

    #[test]
    fn test_repeat_is_not_a_press() {
        let repeat = KeyInput {
            repeat: true,
            ..KeyInput::pressed(KeyCode::ArrowLeft)
        };
        assert!(!repeat.is_press());
        assert!(!KeyInput::released(KeyCode::ArrowLeft).is_press());
        assert!(KeyInput::pressed(KeyCode::ArrowLeft).is_press());
    }
}
