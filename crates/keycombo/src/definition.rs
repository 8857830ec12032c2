//! Combo definitions

use std::fmt;
use std::str::FromStr;

use evdev::Key;

use crate::error::ComboError;
use crate::keys::{key_name, parse_key};

/// Most modifier keys a single combo can require.
pub const MAX_MODIFIERS: usize = 4;

/// A key combination such as `Ctrl+C`.
///
/// The combo is active while every modifier is held and the terminal `key`
/// went down after them. Modifiers can be any key, so `A+Space` is as valid
/// as `Ctrl+Shift+Q`. They live in a fixed array so a definition never
/// allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComboDefinition {
    key: Key,
    modifiers: [Key; MAX_MODIFIERS],
    modifier_count: usize,
}

impl ComboDefinition {
    /// A combo triggered by `key` alone.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: [Key::KEY_RESERVED; MAX_MODIFIERS],
            modifier_count: 0,
        }
    }

    /// A combo triggered by `key` while every key in `modifiers` is held.
    ///
    /// Fails with [`ComboError::TooManyModifiers`] when more than
    /// [`MAX_MODIFIERS`] keys are given.
    pub fn with_modifiers(key: Key, modifiers: &[Key]) -> Result<Self, ComboError> {
        if modifiers.len() > MAX_MODIFIERS {
            return Err(ComboError::TooManyModifiers {
                count: modifiers.len(),
                max: MAX_MODIFIERS,
            });
        }

        let mut definition = Self::new(key);
        definition.modifiers[..modifiers.len()].copy_from_slice(modifiers);
        definition.modifier_count = modifiers.len();
        Ok(definition)
    }

    /// The terminal key.
    pub fn key(&self) -> Key {
        self.key
    }

    /// The modifier keys, in the order they were given.
    pub fn modifiers(&self) -> &[Key] {
        &self.modifiers[..self.modifier_count]
    }
}

impl fmt::Display for ComboDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in self.modifiers() {
            write!(f, "{}+", key_name(*modifier))?;
        }
        write!(f, "{}", key_name(self.key))
    }
}

/// Parses `[Modifier+]...Key`, e.g. `"Ctrl+Shift+Q"` or `"Space"`.
///
/// The last component is the terminal key; everything before it is a
/// modifier. Key names follow [`parse_key`].
impl FromStr for ComboDefinition {
    type Err = ComboError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let fail = |reason: String| ComboError::Parse {
            input: input.to_string(),
            reason,
        };

        if input.is_empty() {
            return Err(fail("empty input".to_string()));
        }

        let parts: Vec<&str> = input.split('+').map(str::trim).collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(fail("empty component in combo string".to_string()));
        }

        let mut keys = Vec::with_capacity(parts.len());
        for part in &parts {
            let key = parse_key(part).ok_or_else(|| fail(format!("unknown key: '{}'", part)))?;
            if keys.contains(&key) {
                return Err(fail(format!("duplicate key: '{}'", part)));
            }
            keys.push(key);
        }

        // split('+') always yields at least one part
        let (key, modifiers) = keys
            .split_last()
            .ok_or_else(|| fail("no trigger key".to_string()))?;
        Self::with_modifiers(*key, modifiers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_no_modifiers() {
        let combo = ComboDefinition::new(Key::KEY_SPACE);
        assert_eq!(combo.key(), Key::KEY_SPACE);
        assert!(combo.modifiers().is_empty());
    }

    #[test]
    fn test_with_modifiers_keeps_order() {
        let combo =
            ComboDefinition::with_modifiers(Key::KEY_Q, &[Key::KEY_LEFTSHIFT, Key::KEY_LEFTCTRL])
                .unwrap();
        assert_eq!(combo.modifiers(), &[Key::KEY_LEFTSHIFT, Key::KEY_LEFTCTRL]);
    }

    #[test]
    fn test_with_modifiers_accepts_max() {
        let mods = [Key::KEY_A, Key::KEY_B, Key::KEY_D, Key::KEY_E];
        let combo = ComboDefinition::with_modifiers(Key::KEY_C, &mods).unwrap();
        assert_eq!(combo.modifiers().len(), MAX_MODIFIERS);
    }

    #[test]
    fn test_with_modifiers_rejects_too_many() {
        let mods = [Key::KEY_A, Key::KEY_B, Key::KEY_D, Key::KEY_E, Key::KEY_F];
        let err = ComboDefinition::with_modifiers(Key::KEY_C, &mods).unwrap_err();
        assert_eq!(
            err,
            ComboError::TooManyModifiers {
                count: 5,
                max: MAX_MODIFIERS
            }
        );
    }

    #[test]
    fn test_parse_ctrl_c() {
        let combo: ComboDefinition = "Ctrl+C".parse().unwrap();
        assert_eq!(combo.key(), Key::KEY_C);
        assert_eq!(combo.modifiers(), &[Key::KEY_LEFTCTRL]);
    }

    #[test]
    fn test_parse_single_key() {
        let combo: ComboDefinition = " Space ".parse().unwrap();
        assert_eq!(combo, ComboDefinition::new(Key::KEY_SPACE));
    }

    #[test]
    fn test_parse_non_modifier_modifiers() {
        let combo: ComboDefinition = "A+Space".parse().unwrap();
        assert_eq!(combo.key(), Key::KEY_SPACE);
        assert_eq!(combo.modifiers(), &[Key::KEY_A]);
    }

    #[test]
    fn test_parse_errors() {
        for input in ["", "Ctrl+", "+C", "Ctrl++C", "Ctrl+Bogus", "Ctrl+Ctrl+C"] {
            let err = input.parse::<ComboDefinition>().unwrap_err();
            assert!(
                matches!(err, ComboError::Parse { .. }),
                "expected parse error for {:?}, got {:?}",
                input,
                err
            );
        }
    }

    #[test]
    fn test_parse_too_many_modifiers() {
        let err = "A+B+D+E+F+C".parse::<ComboDefinition>().unwrap_err();
        assert!(matches!(err, ComboError::TooManyModifiers { count: 5, .. }));
    }

    #[test]
    fn test_display_round_trips() {
        let combo: ComboDefinition = "Ctrl+Shift+Q".parse().unwrap();
        assert_eq!(combo.to_string(), "LEFTCTRL+LEFTSHIFT+Q");
        assert_eq!(combo.to_string().parse::<ComboDefinition>().unwrap(), combo);
    }

    #[test]
    fn test_display_round_trips_unnamed_codes() {
        let combo = ComboDefinition::with_modifiers(Key::new(84), &[Key::KEY_LEFTALT]).unwrap();
        assert_eq!(combo.to_string(), "LEFTALT+CODE_84");
        assert_eq!(combo.to_string().parse::<ComboDefinition>().unwrap(), combo);
    }
}
