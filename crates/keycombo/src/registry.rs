//! Combo registration and state lookup

use evdev::Key;

use crate::button::ButtonState;
use crate::definition::ComboDefinition;
use crate::error::ComboError;
use crate::evaluator::ComboTracker;
use crate::input::InputSource;

/// Opaque identifier of a registered combo.
///
/// Handles are issued in registration order starting at 0 and stay valid for
/// the lifetime of the registry that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComboHandle(usize);

impl ComboHandle {
    /// Position of the combo in registration order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl ComboHandle {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    definition: ComboDefinition,
    tracker: ComboTracker,
}

/// Owns every registered combo and advances them once per frame.
///
/// Entries are append-only. Callers only ever hold [`ComboHandle`]s.
///
/// # Example
///
/// ```no_run
/// use std::collections::HashMap;
///
/// use evdev::Key;
/// use keycombo::{ButtonState, ComboRegistry};
///
/// # fn example() -> Result<(), keycombo::ComboError> {
/// let mut registry = ComboRegistry::new();
/// let copy = registry.register_str("Ctrl+C")?;
///
/// let frame = HashMap::from([
///     (Key::KEY_LEFTCTRL, ButtonState::HELD),
///     (Key::KEY_C, ButtonState::PRESSED),
/// ]);
/// registry.advance_frame(&frame)?;
/// assert!(registry.state(copy)?.pressed);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ComboRegistry {
    entries: Vec<Entry>,
}

impl ComboRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a combo and return its handle. The combo starts out up.
    pub fn register(&mut self, definition: ComboDefinition) -> ComboHandle {
        let handle = ComboHandle::from_index(self.entries.len());
        self.entries.push(Entry {
            definition,
            tracker: ComboTracker::default(),
        });
        tracing::debug!("Registered combo {} as handle {}", definition, handle.0);
        handle
    }

    /// Register `key` with `modifiers`, checking the modifier bound first.
    ///
    /// Nothing is added when the definition is rejected.
    pub fn register_keys(
        &mut self,
        key: Key,
        modifiers: &[Key],
    ) -> Result<ComboHandle, ComboError> {
        let definition = ComboDefinition::with_modifiers(key, modifiers)?;
        Ok(self.register(definition))
    }

    /// Register a combo written as e.g. `"Ctrl+Shift+Q"`.
    pub fn register_str(&mut self, combo: &str) -> Result<ComboHandle, ComboError> {
        let definition = combo.parse()?;
        Ok(self.register(definition))
    }

    /// Current state of a combo. Stable until the next [`advance_frame`].
    ///
    /// [`advance_frame`]: Self::advance_frame
    pub fn state(&self, handle: ComboHandle) -> Result<ButtonState, ComboError> {
        self.entry(handle).map(|entry| entry.tracker.state())
    }

    /// Definition a combo was registered with.
    pub fn definition(&self, handle: ComboHandle) -> Result<&ComboDefinition, ComboError> {
        self.entry(handle).map(|entry| &entry.definition)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every handle with its current state, in registration order.
    pub fn states(&self) -> impl Iterator<Item = (ComboHandle, ButtonState)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (ComboHandle::from_index(index), entry.tracker.state()))
    }

    /// Advance every combo by one frame.
    ///
    /// Must run once per frame, after the host has refreshed `input` and
    /// before anything reads combo state. Every combo is advanced even when
    /// some of them reference keys `input` cannot resolve; those keep their
    /// previous state and the first such error is returned.
    pub fn advance_frame<I>(&mut self, input: &I) -> Result<(), ComboError>
    where
        I: InputSource + ?Sized,
    {
        tracing::trace!("Advancing {} combo(s)", self.entries.len());
        let mut first_error = None;
        for entry in &mut self.entries {
            if let Err(e) = entry.tracker.evaluate(&entry.definition, input) {
                tracing::debug!("Combo {} not advanced: {}", entry.definition, e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Per-frame hook: advance every combo, then hand the registry to the
    /// frame's application logic.
    pub fn run_frame<I, F, R>(&mut self, input: &I, logic: F) -> Result<R, ComboError>
    where
        I: InputSource + ?Sized,
        F: FnOnce(&ComboRegistry) -> R,
    {
        self.advance_frame(input)?;
        Ok(logic(self))
    }

    fn entry(&self, handle: ComboHandle) -> Result<&Entry, ComboError> {
        self.entries
            .get(handle.0)
            .ok_or(ComboError::InvalidHandle {
                handle: handle.0,
                len: self.entries.len(),
            })
    }
}
