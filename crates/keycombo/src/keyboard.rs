//! evdev-backed keyboard input source
//!
//! [`KeyboardState`] turns a stream of raw evdev key events into per-frame
//! [`ButtonState`]s. Events can arrive at any time; the host calls
//! [`KeyboardState::update`] once at the top of each frame to sample them.

use std::collections::HashMap;

use evdev::{Device, EventType, InputEvent, Key};

use crate::button::ButtonState;
use crate::error::ComboError;
use crate::input::InputSource;

/// Key event values as reported by the kernel.
pub mod event_value {
    pub const RELEASE: i32 = 0;
    pub const PRESS: i32 = 1;
    pub const REPEAT: i32 = 2;
}

#[derive(Debug, Clone, Copy, Default)]
struct KeySlot {
    down: bool,
    was_down: bool,
    state: ButtonState,
}

/// Frame-sampled state of a fixed set of keys.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    keys: HashMap<Key, KeySlot>,
}

impl KeyboardState {
    /// Track exactly the given keys.
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys
                .into_iter()
                .map(|key| (key, KeySlot::default()))
                .collect(),
        }
    }

    /// Track every key code a standard keyboard can emit (0..256).
    pub fn full_keyboard() -> Self {
        Self::new((0..256u16).map(Key::new))
    }

    /// Track the keys an input device reports as supported.
    pub fn from_device(device: &Device) -> Self {
        match device.supported_keys() {
            Some(keys) => Self::new(keys.iter()),
            None => {
                tracing::warn!(
                    "Device {} reports no keys",
                    device.name().unwrap_or("Unknown")
                );
                Self::default()
            }
        }
    }

    /// Whether `key` is tracked.
    pub fn supports(&self, key: Key) -> bool {
        self.keys.contains_key(&key)
    }

    /// Record a raw input event. Non-key events and untracked keys are
    /// ignored.
    pub fn handle_event(&mut self, event: &InputEvent) {
        if event.event_type() != EventType::KEY {
            return;
        }

        let key = Key::new(event.code());
        let Some(slot) = self.keys.get_mut(&key) else {
            tracing::debug!("Ignoring event for untracked key {:?}", key);
            return;
        };

        match event.value() {
            event_value::PRESS => slot.down = true,
            event_value::RELEASE => slot.down = false,
            event_value::REPEAT => {
                // already down
            }
            other => {
                tracing::debug!("Ignoring {:?} event with value {}", key, other);
            }
        }
    }

    /// Record a batch of raw input events, e.g. from `Device::fetch_events`.
    pub fn handle_events<'a>(&mut self, events: impl IntoIterator<Item = &'a InputEvent>) {
        for event in events {
            self.handle_event(event);
        }
    }

    /// Sample all tracked keys for a new frame.
    ///
    /// A key pressed and released between two updates is not seen.
    pub fn update(&mut self) {
        for slot in self.keys.values_mut() {
            slot.state.step(slot.down, slot.was_down);
            slot.was_down = slot.down;
        }
    }
}

impl InputSource for KeyboardState {
    fn key_state(&self, key: Key) -> Result<ButtonState, ComboError> {
        self.keys
            .get(&key)
            .map(|slot| slot.state)
            .ok_or(ComboError::UnknownKey { key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_event(key: Key, value: i32) -> InputEvent {
        InputEvent::new(EventType::KEY, key.code(), value)
    }

    #[test]
    fn test_press_hold_release_cycle() {
        let mut kb = KeyboardState::new([Key::KEY_A]);

        kb.handle_event(&key_event(Key::KEY_A, event_value::PRESS));
        kb.update();
        assert_eq!(kb.key_state(Key::KEY_A), Ok(ButtonState::PRESSED));

        kb.handle_event(&key_event(Key::KEY_A, event_value::REPEAT));
        kb.update();
        assert_eq!(kb.key_state(Key::KEY_A), Ok(ButtonState::HELD));

        kb.handle_event(&key_event(Key::KEY_A, event_value::RELEASE));
        kb.update();
        assert_eq!(kb.key_state(Key::KEY_A), Ok(ButtonState::RELEASED));

        kb.update();
        assert_eq!(kb.key_state(Key::KEY_A), Ok(ButtonState::default()));
    }

    #[test]
    fn test_state_only_changes_on_update() {
        let mut kb = KeyboardState::new([Key::KEY_A]);
        kb.handle_event(&key_event(Key::KEY_A, event_value::PRESS));
        assert_eq!(kb.key_state(Key::KEY_A), Ok(ButtonState::default()));
    }

    #[test]
    fn test_tap_within_one_frame_is_not_seen() {
        let mut kb = KeyboardState::new([Key::KEY_A]);
        kb.handle_events(&[
            key_event(Key::KEY_A, event_value::PRESS),
            key_event(Key::KEY_A, event_value::RELEASE),
        ]);
        kb.update();
        assert_eq!(kb.key_state(Key::KEY_A), Ok(ButtonState::default()));
    }

    #[test]
    fn test_untracked_key_is_unknown() {
        let mut kb = KeyboardState::new([Key::KEY_A]);
        kb.handle_event(&key_event(Key::KEY_B, event_value::PRESS));
        kb.update();
        assert!(!kb.supports(Key::KEY_B));
        assert_eq!(
            kb.key_state(Key::KEY_B),
            Err(ComboError::UnknownKey { key: Key::KEY_B })
        );
    }

    #[test]
    fn test_non_key_events_ignored() {
        let mut kb = KeyboardState::new([Key::KEY_A]);
        kb.handle_event(&InputEvent::new(
            EventType::SYNCHRONIZATION,
            Key::KEY_A.code(),
            1,
        ));
        kb.update();
        assert_eq!(kb.key_state(Key::KEY_A), Ok(ButtonState::default()));
    }

    #[test]
    fn test_full_keyboard_tracks_standard_keys() {
        let kb = KeyboardState::full_keyboard();
        assert!(kb.supports(Key::KEY_A));
        assert!(kb.supports(Key::KEY_LEFTCTRL));
        assert!(kb.supports(Key::KEY_F24));
    }
}
