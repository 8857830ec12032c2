//! Key combination tracking for frame-driven applications
//!
//! Register combos such as `Ctrl+C` with a [`ComboRegistry`], feed it an
//! [`InputSource`] once per frame, and read each combo's
//! pressed/held/released [`ButtonState`] the same way you would a single
//! key. [`KeyboardState`] is a ready-made input source for evdev devices.

mod button;
mod definition;
mod error;
mod evaluator;
mod input;
pub mod keyboard;
mod keys;
mod registry;

pub use button::ButtonState;
pub use definition::{ComboDefinition, MAX_MODIFIERS};
pub use error::ComboError;
pub use input::InputSource;
pub use keyboard::KeyboardState;
pub use keys::{key_name, parse_key};
pub use registry::{ComboHandle, ComboRegistry};

pub use evdev::Key;
