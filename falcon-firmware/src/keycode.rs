//! HID keyboard usage codes as understood by the keypad.
//!
//! The keypad emulates a plain USB boot keyboard, so a [`KeyCode`] is a
//! usage ID from the HID Keyboard/Keypad page (USB HID Usage Tables,
//! section 10). This module owns three lookups:
//!
//! - [`resolve_char`]: printable character to keycode (the `string` binding)
//! - [`key_code_from_name`] / [`key_name`]: names used in bindings files
//! - [`parse_modifier`] / [`Modifiers`]: the modifier bitmask of a program step

use crate::error::ParseKeyError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A single-byte HID keyboard usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub u8);

impl KeyCode {
    /// "No key". Pads unused key positions in a program step.
    pub const NONE: KeyCode = KeyCode(0x00);

    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Canonical name, if the code is in the table.
    pub fn name(self) -> Option<&'static str> {
        key_name(self.0)
    }
}

impl From<u8> for KeyCode {
    fn from(code: u8) -> Self {
        Self(code)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:02X}", self.0),
        }
    }
}

impl FromStr for KeyCode {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            return u8::from_str_radix(hex, 16)
                .map(KeyCode)
                .map_err(|_| ParseKeyError::InvalidLiteral(s.to_string()));
        }
        key_code_from_name(s)
            .map(KeyCode)
            .ok_or_else(|| ParseKeyError::UnknownKey(s.to_string()))
    }
}

// Keys serialize as their canonical name so a written file reads like a
// hand-written one; codes outside the table fall back to a hex literal.
impl Serialize for KeyCode {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for KeyCode {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum KeyRepr {
            /// Raw usage code, e.g. `4`
            Code(u8),
            /// Key name or hex literal, e.g. `"A"` or `"0x04"`
            Name(String),
        }

        match KeyRepr::deserialize(d)? {
            KeyRepr::Code(code) => Ok(KeyCode(code)),
            KeyRepr::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// HID modifier bitmask constants (first byte of a boot keyboard report).
pub mod mods {
    pub const LCTRL: u8 = 0x01;
    pub const LSHIFT: u8 = 0x02;
    pub const LALT: u8 = 0x04;
    pub const LGUI: u8 = 0x08;
    pub const RCTRL: u8 = 0x10;
    pub const RSHIFT: u8 = 0x20;
    pub const RALT: u8 = 0x40;
    pub const RGUI: u8 = 0x80;

    /// Bit to display name, in bit order.
    pub const NAMES: [(u8, &str); 8] = [
        (LCTRL, "LCtrl"),
        (LSHIFT, "LShift"),
        (LALT, "LAlt"),
        (LGUI, "LGUI"),
        (RCTRL, "RCtrl"),
        (RSHIFT, "RShift"),
        (RALT, "RAlt"),
        (RGUI, "RGUI"),
    ];
}

/// Parse a modifier name (case-insensitive) into its bitmask.
pub fn parse_modifier(name: &str) -> Option<u8> {
    match name.trim().to_ascii_lowercase().as_str() {
        "ctrl" | "control" | "lctrl" | "lcontrol" => Some(mods::LCTRL),
        "shift" | "lshift" => Some(mods::LSHIFT),
        "alt" | "lalt" | "option" | "loption" => Some(mods::LALT),
        "gui" | "win" | "super" | "cmd" | "lgui" | "lwin" => Some(mods::LGUI),
        "rctrl" | "rcontrol" => Some(mods::RCTRL),
        "rshift" => Some(mods::RSHIFT),
        "ralt" | "roption" | "altgr" => Some(mods::RALT),
        "rgui" | "rwin" | "rsuper" | "rcmd" => Some(mods::RGUI),
        _ => None,
    }
}

/// Modifier bitmask held during a program step.
///
/// Bindings files may give it as an integer (`modifier = 3`), a single name
/// (`modifier = "Ctrl"`) or a list (`modifier = ["Ctrl", "Shift"]`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const fn bits(self) -> u8 {
        self.0
    }

    pub fn names(self) -> Vec<&'static str> {
        mods::NAMES
            .iter()
            .filter(|(bit, _)| self.0 & bit != 0)
            .map(|&(_, name)| name)
            .collect()
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("-");
        }
        f.write_str(&self.names().join("+"))
    }
}

impl Serialize for Modifiers {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.names().serialize(s)
    }
}

impl<'de> Deserialize<'de> for Modifiers {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ModifiersRepr {
            Mask(u8),
            Name(String),
            Names(Vec<String>),
        }

        let names = match ModifiersRepr::deserialize(d)? {
            ModifiersRepr::Mask(bits) => return Ok(Modifiers(bits)),
            ModifiersRepr::Name(name) => vec![name],
            ModifiersRepr::Names(names) => names,
        };

        let mut bits = 0u8;
        for name in &names {
            bits |= parse_modifier(name).ok_or_else(|| {
                serde::de::Error::custom(ParseKeyError::UnknownModifier(name.clone()))
            })?;
        }
        Ok(Modifiers(bits))
    }
}

/// Resolve the character of a `string` binding to the key that types it.
///
/// A button slot holds one byte with no modifier, so characters that need
/// shift are unsupported. Letters are the exception: `'A'` and `'a'` both
/// resolve to the A key.
pub fn resolve_char(ch: char) -> Option<KeyCode> {
    let code = match ch {
        'a'..='z' => 0x04 + (ch as u8 - b'a'),
        'A'..='Z' => 0x04 + (ch as u8 - b'A'),
        '1'..='9' => 0x1E + (ch as u8 - b'1'),
        '0' => 0x27,
        '\n' => 0x28,
        '\t' => 0x2B,
        ' ' => 0x2C,
        '-' => 0x2D,
        '=' => 0x2E,
        '[' => 0x2F,
        ']' => 0x30,
        '\\' => 0x31,
        ';' => 0x33,
        '\'' => 0x34,
        '`' => 0x35,
        ',' => 0x36,
        '.' => 0x37,
        '/' => 0x38,
        _ => return None,
    };
    Some(KeyCode(code))
}

/// Canonical key names, in usage order.
#[rustfmt::skip]
pub const KEY_NAMES: &[(u8, &str)] = &[
    (0x04, "A"), (0x05, "B"), (0x06, "C"), (0x07, "D"),
    (0x08, "E"), (0x09, "F"), (0x0A, "G"), (0x0B, "H"),
    (0x0C, "I"), (0x0D, "J"), (0x0E, "K"), (0x0F, "L"),
    (0x10, "M"), (0x11, "N"), (0x12, "O"), (0x13, "P"),
    (0x14, "Q"), (0x15, "R"), (0x16, "S"), (0x17, "T"),
    (0x18, "U"), (0x19, "V"), (0x1A, "W"), (0x1B, "X"),
    (0x1C, "Y"), (0x1D, "Z"),
    (0x1E, "1"), (0x1F, "2"), (0x20, "3"), (0x21, "4"),
    (0x22, "5"), (0x23, "6"), (0x24, "7"), (0x25, "8"),
    (0x26, "9"), (0x27, "0"),
    (0x28, "Enter"), (0x29, "Escape"), (0x2A, "Backspace"),
    (0x2B, "Tab"), (0x2C, "Space"), (0x2D, "-"), (0x2E, "="),
    (0x2F, "["), (0x30, "]"), (0x31, "\\"), (0x32, "NonUS#"),
    (0x33, ";"), (0x34, "'"), (0x35, "`"), (0x36, ","),
    (0x37, "."), (0x38, "/"), (0x39, "CapsLock"),
    (0x3A, "F1"), (0x3B, "F2"), (0x3C, "F3"), (0x3D, "F4"),
    (0x3E, "F5"), (0x3F, "F6"), (0x40, "F7"), (0x41, "F8"),
    (0x42, "F9"), (0x43, "F10"), (0x44, "F11"), (0x45, "F12"),
    (0x46, "PrintScr"), (0x47, "ScrollLock"), (0x48, "Pause"),
    (0x49, "Insert"), (0x4A, "Home"), (0x4B, "PageUp"),
    (0x4C, "Delete"), (0x4D, "End"), (0x4E, "PageDown"),
    (0x4F, "Right"), (0x50, "Left"), (0x51, "Down"), (0x52, "Up"),
    (0x53, "NumLock"), (0x54, "KP/"), (0x55, "KP*"), (0x56, "KP-"),
    (0x57, "KP+"), (0x58, "KPEnter"),
    (0x59, "KP1"), (0x5A, "KP2"), (0x5B, "KP3"), (0x5C, "KP4"),
    (0x5D, "KP5"), (0x5E, "KP6"), (0x5F, "KP7"), (0x60, "KP8"),
    (0x61, "KP9"), (0x62, "KP0"), (0x63, "KP."),
    (0x64, "NonUS\\"), (0x65, "App"), (0x66, "Power"), (0x67, "KP="),
    (0x68, "F13"), (0x69, "F14"), (0x6A, "F15"), (0x6B, "F16"),
    (0x6C, "F17"), (0x6D, "F18"), (0x6E, "F19"), (0x6F, "F20"),
    (0x70, "F21"), (0x71, "F22"), (0x72, "F23"), (0x73, "F24"),
    (0x7F, "Mute"), (0x80, "VolumeUp"), (0x81, "VolumeDown"),
    (0xE0, "LCtrl"), (0xE1, "LShift"), (0xE2, "LAlt"), (0xE3, "LGUI"),
    (0xE4, "RCtrl"), (0xE5, "RShift"), (0xE6, "RAlt"), (0xE7, "RGUI"),
];

/// Get the canonical name of a HID keyboard usage code.
pub fn key_name(code: u8) -> Option<&'static str> {
    KEY_NAMES
        .iter()
        .find(|&&(c, _)| c == code)
        .map(|&(_, name)| name)
}

/// Look up a key by name. Case-insensitive, accepts common aliases.
pub fn key_code_from_name(name: &str) -> Option<u8> {
    let lower = name.trim().to_ascii_lowercase();
    let alias = match lower.as_str() {
        "esc" => Some(0x29),
        "return" | "ret" => Some(0x28),
        "bksp" | "bs" => Some(0x2A),
        "spc" => Some(0x2C),
        "minus" => Some(0x2D),
        "equal" | "equals" => Some(0x2E),
        "semicolon" => Some(0x33),
        "quote" | "apostrophe" => Some(0x34),
        "grave" | "backtick" => Some(0x35),
        "comma" => Some(0x36),
        "period" | "dot" => Some(0x37),
        "slash" => Some(0x38),
        "backslash" => Some(0x31),
        "caps" => Some(0x39),
        "prtsc" | "printscreen" => Some(0x46),
        "ins" => Some(0x49),
        "del" => Some(0x4C),
        "pgup" => Some(0x4B),
        "pgdn" | "pgdown" => Some(0x4E),
        "menu" => Some(0x65),
        "ctrl" | "control" => Some(0xE0),
        "shift" => Some(0xE1),
        "alt" => Some(0xE2),
        "win" | "super" | "cmd" | "gui" => Some(0xE3),
        _ => None,
    };
    alias.or_else(|| {
        KEY_NAMES
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(&lower))
            .map(|&(code, _)| code)
    })
}
