//! Host input seam

use std::collections::HashMap;

use evdev::Key;

use crate::button::ButtonState;
use crate::error::ComboError;

/// Per-frame key state provided by the host.
///
/// Implementations must already reflect the current frame when combos are
/// advanced. A key the source knows nothing about is an integration bug and
/// must be reported as [`ComboError::UnknownKey`] rather than read as up.
pub trait InputSource {
    fn key_state(&self, key: Key) -> Result<ButtonState, ComboError>;
}

/// A snapshot table of key states. Keys missing from the map are unknown.
impl InputSource for HashMap<Key, ButtonState> {
    fn key_state(&self, key: Key) -> Result<ButtonState, ComboError> {
        self.get(&key)
            .copied()
            .ok_or(ComboError::UnknownKey { key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_source_returns_known_state() {
        let mut frame = HashMap::new();
        frame.insert(Key::KEY_C, ButtonState::PRESSED);
        assert_eq!(frame.key_state(Key::KEY_C), Ok(ButtonState::PRESSED));
    }

    #[test]
    fn test_map_source_rejects_unknown_key() {
        let frame: HashMap<Key, ButtonState> = HashMap::new();
        assert_eq!(
            frame.key_state(Key::KEY_C),
            Err(ComboError::UnknownKey { key: Key::KEY_C })
        );
    }
}
