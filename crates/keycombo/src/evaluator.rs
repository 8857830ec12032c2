//! Per-frame combo evaluation
//!
//! Each registered combo carries a [`ComboTracker`]. Once per frame the
//! tracker samples its keys and moves through the same edge rule as a
//! single key:
//!
//! ```text
//!   active = modifiers all held && (key pressed || (combo held && key held))
//!
//!   inactive --(active rises)--> pressed + held
//!   held     --(active stays)--> held
//!   held     --(active falls)--> released
//! ```
//!
//! The combo can only start on the frame its terminal key goes down with
//! the modifiers already held. Once started it is sustained by the terminal
//! key's held signal, and dropping any modifier ends it.

use crate::button::ButtonState;
use crate::definition::ComboDefinition;
use crate::error::ComboError;
use crate::input::InputSource;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ComboTracker {
    state: ButtonState,
    active_now: bool,
    active_before: bool,
}

impl ComboTracker {
    pub(crate) fn state(&self) -> ButtonState {
        self.state
    }

    /// Advance this combo by one frame.
    ///
    /// Every key is queried before anything is written, so an unknown key
    /// leaves the tracker exactly as it was.
    pub(crate) fn evaluate<I>(
        &mut self,
        definition: &ComboDefinition,
        input: &I,
    ) -> Result<(), ComboError>
    where
        I: InputSource + ?Sized,
    {
        let mut modifiers_held = true;
        for &modifier in definition.modifiers() {
            // no short-circuit: an unknown modifier must surface every frame
            modifiers_held &= input.key_state(modifier)?.held;
        }

        let key = input.key_state(definition.key())?;

        self.active_now = modifiers_held && (key.pressed || (self.state.held && key.held));
        self.state.step(self.active_now, self.active_before);
        self.active_before = self.active_now;

        if self.state.pressed {
            tracing::debug!("Combo {} pressed", definition);
        } else if self.state.released {
            tracing::debug!("Combo {} released", definition);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use evdev::Key;

    use super::*;

    fn ctrl_c() -> ComboDefinition {
        ComboDefinition::with_modifiers(Key::KEY_C, &[Key::KEY_LEFTCTRL]).unwrap()
    }

    fn frame(ctrl: ButtonState, c: ButtonState) -> HashMap<Key, ButtonState> {
        HashMap::from([(Key::KEY_LEFTCTRL, ctrl), (Key::KEY_C, c)])
    }

    #[test]
    fn test_activates_when_key_pressed_under_modifier() {
        let mut tracker = ComboTracker::default();
        tracker
            .evaluate(&ctrl_c(), &frame(ButtonState::HELD, ButtonState::PRESSED))
            .unwrap();
        assert_eq!(tracker.state(), ButtonState::PRESSED);
    }

    #[test]
    fn test_modifier_pressed_same_frame_counts_as_held() {
        let mut tracker = ComboTracker::default();
        tracker
            .evaluate(&ctrl_c(), &frame(ButtonState::PRESSED, ButtonState::PRESSED))
            .unwrap();
        assert_eq!(tracker.state(), ButtonState::PRESSED);
    }

    #[test]
    fn test_key_already_held_before_modifier_does_not_activate() {
        // C went down first, Ctrl joined later: wrong order
        let mut tracker = ComboTracker::default();
        tracker
            .evaluate(&ctrl_c(), &frame(ButtonState::default(), ButtonState::PRESSED))
            .unwrap();
        tracker
            .evaluate(&ctrl_c(), &frame(ButtonState::PRESSED, ButtonState::HELD))
            .unwrap();
        tracker
            .evaluate(&ctrl_c(), &frame(ButtonState::HELD, ButtonState::HELD))
            .unwrap();
        assert_eq!(tracker.state(), ButtonState::default());
    }

    #[test]
    fn test_dropping_modifier_releases() {
        let mut tracker = ComboTracker::default();
        tracker
            .evaluate(&ctrl_c(), &frame(ButtonState::HELD, ButtonState::PRESSED))
            .unwrap();
        tracker
            .evaluate(&ctrl_c(), &frame(ButtonState::RELEASED, ButtonState::HELD))
            .unwrap();
        assert_eq!(tracker.state(), ButtonState::RELEASED);
    }

    #[test]
    fn test_unknown_key_leaves_state_untouched() {
        let mut tracker = ComboTracker::default();
        tracker
            .evaluate(&ctrl_c(), &frame(ButtonState::HELD, ButtonState::PRESSED))
            .unwrap();

        let partial = HashMap::from([(Key::KEY_LEFTCTRL, ButtonState::HELD)]);
        let err = tracker.evaluate(&ctrl_c(), &partial).unwrap_err();
        assert_eq!(err, ComboError::UnknownKey { key: Key::KEY_C });
        assert_eq!(tracker.state(), ButtonState::PRESSED);
    }

    #[test]
    fn test_unknown_modifier_reported_even_when_other_modifier_up() {
        let combo = ComboDefinition::with_modifiers(
            Key::KEY_C,
            &[Key::KEY_LEFTCTRL, Key::KEY_LEFTSHIFT],
        )
        .unwrap();
        let mut tracker = ComboTracker::default();
        let err = tracker
            .evaluate(&combo, &frame(ButtonState::default(), ButtonState::default()))
            .unwrap_err();
        assert_eq!(
            err,
            ComboError::UnknownKey {
                key: Key::KEY_LEFTSHIFT
            }
        );
    }
}
