//! Key name resolution
//!
//! Names are matched case-insensitively. Anything the alias table does not
//! cover is tried as a kernel key name, first with a `KEY_` prefix added
//! (`C` -> `KEY_C`, `F13` -> `KEY_F13`) and then verbatim (`KEY_LEFTMETA`,
//! `BTN_LEFT`). Codes without a kernel name are spelled `CODE_<n>`.

use std::str::FromStr;

use evdev::Key;

/// Spelling for numeric key codes, e.g. `CODE_84`.
const CODE_PREFIX: &str = "CODE_";

/// Friendly names that do not line up with the kernel's `KEY_*` naming.
const ALIASES: &[(&str, Key)] = &[
    // Modifiers resolve to the left-hand key
    ("CTRL", Key::KEY_LEFTCTRL),
    ("CONTROL", Key::KEY_LEFTCTRL),
    ("LCTRL", Key::KEY_LEFTCTRL),
    ("RCTRL", Key::KEY_RIGHTCTRL),
    ("SHIFT", Key::KEY_LEFTSHIFT),
    ("LSHIFT", Key::KEY_LEFTSHIFT),
    ("RSHIFT", Key::KEY_RIGHTSHIFT),
    ("ALT", Key::KEY_LEFTALT),
    ("LALT", Key::KEY_LEFTALT),
    ("RALT", Key::KEY_RIGHTALT),
    ("SUPER", Key::KEY_LEFTMETA),
    ("META", Key::KEY_LEFTMETA),
    ("WIN", Key::KEY_LEFTMETA),
    ("LMETA", Key::KEY_LEFTMETA),
    ("RMETA", Key::KEY_RIGHTMETA),
    // Special keys
    ("ESCAPE", Key::KEY_ESC),
    ("RETURN", Key::KEY_ENTER),
    ("CAPS", Key::KEY_CAPSLOCK),
    ("CAPS_LOCK", Key::KEY_CAPSLOCK),
    ("NUM_LOCK", Key::KEY_NUMLOCK),
    // Symbols
    ("-", Key::KEY_MINUS),
    ("EQUALS", Key::KEY_EQUAL),
    ("=", Key::KEY_EQUAL),
    ("LBRACE", Key::KEY_LEFTBRACE),
    ("[", Key::KEY_LEFTBRACE),
    ("RBRACE", Key::KEY_RIGHTBRACE),
    ("]", Key::KEY_RIGHTBRACE),
    (";", Key::KEY_SEMICOLON),
    ("'", Key::KEY_APOSTROPHE),
    ("`", Key::KEY_GRAVE),
    ("\\", Key::KEY_BACKSLASH),
    (",", Key::KEY_COMMA),
    ("PERIOD", Key::KEY_DOT),
    (".", Key::KEY_DOT),
    ("/", Key::KEY_SLASH),
    // Arrows and navigation
    ("UPARROW", Key::KEY_UP),
    ("DOWNARROW", Key::KEY_DOWN),
    ("LEFTARROW", Key::KEY_LEFT),
    ("RIGHTARROW", Key::KEY_RIGHT),
    ("PGUP", Key::KEY_PAGEUP),
    ("PGDN", Key::KEY_PAGEDOWN),
    ("PGDOWN", Key::KEY_PAGEDOWN),
    ("INS", Key::KEY_INSERT),
    ("DEL", Key::KEY_DELETE),
    // Numpad operators
    ("KPDECIMAL", Key::KEY_KPDOT),
    ("KPADD", Key::KEY_KPPLUS),
    ("KPSUBTRACT", Key::KEY_KPMINUS),
    ("KPMULTIPLY", Key::KEY_KPASTERISK),
    ("KPDIVIDE", Key::KEY_KPSLASH),
    // Media
    ("XF86BACK", Key::KEY_BACK),
    ("XF86FORWARD", Key::KEY_FORWARD),
];

/// Resolve a key name such as `"Ctrl"`, `"c"`, `"PageUp"` or `"KEY_F13"`.
pub fn parse_key(name: &str) -> Option<Key> {
    let upper = name.trim().to_uppercase();
    if upper.is_empty() {
        return None;
    }

    if let Some((_, key)) = ALIASES.iter().find(|(alias, _)| *alias == upper) {
        return Some(*key);
    }

    // NUMPAD5 / NUMPAD_ENTER are spelled KP5 / KPENTER by the kernel
    let upper = match upper.strip_prefix("NUMPAD") {
        Some(rest) => format!("KP{}", rest.trim_start_matches('_')),
        None => upper,
    };

    if let Ok(key) = Key::from_str(&format!("KEY_{}", upper)) {
        return Some(key);
    }

    // Raw kernel names: KEY_LEFTMETA, BTN_LEFT, ...
    if let Ok(key) = Key::from_str(&upper) {
        return Some(key);
    }

    // Codes the kernel has no name for
    if let Some(code) = upper.strip_prefix(CODE_PREFIX) {
        if let Ok(code) = code.parse::<u16>() {
            return Some(Key::new(code));
        }
    }

    tracing::debug!("Unknown key name: {}", name);
    None
}

/// Display name of a key, without the kernel's `KEY_` prefix.
///
/// Codes without a kernel name are written as `CODE_<n>`. Every name
/// returned here is accepted by [`parse_key`].
pub fn key_name(key: Key) -> String {
    let raw = format!("{:?}", key);
    if Key::from_str(&raw).ok() != Some(key) {
        return format!("{}{}", CODE_PREFIX, key.code());
    }
    match raw.strip_prefix("KEY_") {
        Some(name) => name.to_string(),
        None => raw,
    }
}
