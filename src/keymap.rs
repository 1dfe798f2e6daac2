//! Key-name to scancode table.
//!
//! The table is fixed at compile time and indexed once at first use; key
//! indices are positions in the table and are what control configurations
//! store. Scancodes follow the USB HID usage IDs the driver reports.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// `(name, scancode)` pairs. Names are uppercase; lookups are
/// case-insensitive.
static KEY_TABLE: &[(&str, u16)] = &[
    // Letters
    ("A", 4),
    ("B", 5),
    ("C", 6),
    ("D", 7),
    ("E", 8),
    ("F", 9),
    ("G", 10),
    ("H", 11),
    ("I", 12),
    ("J", 13),
    ("K", 14),
    ("L", 15),
    ("M", 16),
    ("N", 17),
    ("O", 18),
    ("P", 19),
    ("Q", 20),
    ("R", 21),
    ("S", 22),
    ("T", 23),
    ("U", 24),
    ("V", 25),
    ("W", 26),
    ("X", 27),
    ("Y", 28),
    ("Z", 29),
    // Number row
    ("1", 30),
    ("2", 31),
    ("3", 32),
    ("4", 33),
    ("5", 34),
    ("6", 35),
    ("7", 36),
    ("8", 37),
    ("9", 38),
    ("0", 39),
    // Editing and whitespace
    ("RETURN", 40),
    ("ESCAPE", 41),
    ("BACKSPACE", 42),
    ("TAB", 43),
    ("SPACE", 44),
    ("MINUS", 45),
    ("EQUALS", 46),
    ("LEFTBRACKET", 47),
    ("RIGHTBRACKET", 48),
    ("BACKSLASH", 49),
    ("SEMICOLON", 51),
    ("APOSTROPHE", 52),
    ("GRAVE", 53),
    ("COMMA", 54),
    ("PERIOD", 55),
    ("SLASH", 56),
    ("CAPSLOCK", 57),
    // Function keys
    ("F1", 58),
    ("F2", 59),
    ("F3", 60),
    ("F4", 61),
    ("F5", 62),
    ("F6", 63),
    ("F7", 64),
    ("F8", 65),
    ("F9", 66),
    ("F10", 67),
    ("F11", 68),
    ("F12", 69),
    // Navigation
    ("PRINTSCREEN", 70),
    ("SCROLLLOCK", 71),
    ("PAUSE", 72),
    ("INSERT", 73),
    ("HOME", 74),
    ("PAGEUP", 75),
    ("DELETE", 76),
    ("END", 77),
    ("PAGEDOWN", 78),
    ("RIGHT", 79),
    ("LEFT", 80),
    ("DOWN", 81),
    ("UP", 82),
    // Keypad
    ("NUMLOCK", 83),
    ("KEYPADDIVIDE", 84),
    ("KEYPADMULTIPLY", 85),
    ("KEYPADMINUS", 86),
    ("KEYPADPLUS", 87),
    ("KEYPADENTER", 88),
    ("KEYPAD1", 89),
    ("KEYPAD2", 90),
    ("KEYPAD3", 91),
    ("KEYPAD4", 92),
    ("KEYPAD5", 93),
    ("KEYPAD6", 94),
    ("KEYPAD7", 95),
    ("KEYPAD8", 96),
    ("KEYPAD9", 97),
    ("KEYPAD0", 98),
    ("KEYPADPERIOD", 99),
    // Modifiers
    ("LEFTCTRL", 224),
    ("LEFTSHIFT", 225),
    ("LEFTALT", 226),
    ("LEFTWIN", 227),
    ("RIGHTCTRL", 228),
    ("RIGHTSHIFT", 229),
    ("RIGHTALT", 230),
    ("RIGHTWIN", 231),
];

lazy_static! {
    static ref KEY_INDEX: HashMap<&'static str, usize> = KEY_TABLE
        .iter()
        .enumerate()
        .map(|(i, (name, _))| (*name, i))
        .collect();
}

/// Number of named keys.
pub fn num_keys() -> usize {
    KEY_TABLE.len()
}

/// Index of a key name in the table, or `None` if unknown.
pub fn key_index(name: &str) -> Option<usize> {
    let upper = name.to_ascii_uppercase();
    KEY_INDEX.get(upper.as_str()).copied()
}

/// Name of the key at `index`.
pub fn key_name(index: usize) -> Option<&'static str> {
    KEY_TABLE.get(index).map(|(name, _)| *name)
}

/// Scancode of the key at `index`.
pub fn scancode(index: usize) -> Option<u16> {
    KEY_TABLE.get(index).map(|(_, sc)| *sc)
}
