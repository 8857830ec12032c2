use evdev::Key;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ComboError {
    #[error("Combo has {count} modifiers, at most {max} are supported")]
    #[diagnostic(
        code(keycombo::too_many_modifiers),
        help("split the combo or drop a modifier key")
    )]
    TooManyModifiers { count: usize, max: usize },

    #[error("Invalid combo handle {handle} (registry holds {len} combo(s))")]
    #[diagnostic(code(keycombo::invalid_handle))]
    InvalidHandle { handle: usize, len: usize },

    #[error("Unknown key: {key:?}")]
    #[diagnostic(code(keycombo::unknown_key))]
    UnknownKey { key: Key },

    #[error("Failed to parse combo '{input}': {reason}")]
    #[diagnostic(code(keycombo::parse_error))]
    Parse { input: String, reason: String },
}
