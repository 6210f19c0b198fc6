//! Button bindings, in two shapes.
//!
//! [`BindingsSpec`] is what a bindings file deserializes into: every button
//! carries optional `key`, `string` and `program` fields, any combination of
//! which may be present. [`ButtonBindings`] is the checked form the encoder
//! consumes, with exactly one [`ButtonBinding`] variant per button. The only
//! way from one to the other is [`crate::validate`].
//!
//! Looking at the top of the keypad:
//!
//! ```text
//! | 1 | 2 | 3 | 4 |
//! | 5 | 6 | 7 | 8 |
//! ```

use crate::keycode::{KeyCode, Modifiers};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of physical buttons.
pub const BUTTON_COUNT: usize = 8;

/// Keys per program step. A boot keyboard report carries at most six.
pub const MAX_KEYS_PER_STEP: usize = 6;

/// Physical button position, 1-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ButtonId(u8);

impl ButtonId {
    pub fn new(number: u8) -> Option<Self> {
        (1..=BUTTON_COUNT as u8)
            .contains(&number)
            .then_some(Self(number))
    }

    /// Button number as printed on the layout diagram (1-based).
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Zero-based index into per-button tables.
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// All buttons in physical order.
    pub fn all() -> impl Iterator<Item = ButtonId> {
        (1..=BUTTON_COUNT as u8).map(ButtonId)
    }
}

impl fmt::Display for ButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "button {}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Unchecked description
// ---------------------------------------------------------------------------

/// One step of a program as written in a bindings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramSetSpec {
    /// Modifier keys held during this step
    #[serde(default)]
    pub modifier: Modifiers,
    /// Delay before the next step, in milliseconds
    #[serde(default)]
    pub delay_ms: u32,
    /// Keys pressed together in this step
    #[serde(default)]
    pub keys: Vec<KeyCode>,
}

/// A single button as written in a bindings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BindingSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<KeyCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<Vec<ProgramSetSpec>>,
}

impl BindingSpec {
    pub fn key(code: KeyCode) -> Self {
        Self {
            key: Some(code),
            ..Self::default()
        }
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self {
            string: Some(s.into()),
            ..Self::default()
        }
    }

    pub fn program(steps: Vec<ProgramSetSpec>) -> Self {
        Self {
            program: Some(steps),
            ..Self::default()
        }
    }

    /// How many of `key`, `string` and `program` are set.
    pub fn populated(&self) -> usize {
        [
            self.key.is_some(),
            self.string.is_some(),
            self.program.is_some(),
        ]
        .into_iter()
        .filter(|&set| set)
        .count()
    }
}

/// All eight buttons as written in a bindings file.
///
/// A missing `[buttonN]` table deserializes to an empty [`BindingSpec`],
/// which validation rejects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BindingsSpec {
    #[serde(default)]
    pub button1: BindingSpec,
    #[serde(default)]
    pub button2: BindingSpec,
    #[serde(default)]
    pub button3: BindingSpec,
    #[serde(default)]
    pub button4: BindingSpec,
    #[serde(default)]
    pub button5: BindingSpec,
    #[serde(default)]
    pub button6: BindingSpec,
    #[serde(default)]
    pub button7: BindingSpec,
    #[serde(default)]
    pub button8: BindingSpec,
}

impl BindingsSpec {
    pub fn get(&self, button: ButtonId) -> &BindingSpec {
        match button.number() {
            1 => &self.button1,
            2 => &self.button2,
            3 => &self.button3,
            4 => &self.button4,
            5 => &self.button5,
            6 => &self.button6,
            7 => &self.button7,
            _ => &self.button8,
        }
    }

    pub fn get_mut(&mut self, button: ButtonId) -> &mut BindingSpec {
        match button.number() {
            1 => &mut self.button1,
            2 => &mut self.button2,
            3 => &mut self.button3,
            4 => &mut self.button4,
            5 => &mut self.button5,
            6 => &mut self.button6,
            7 => &mut self.button7,
            _ => &mut self.button8,
        }
    }

    /// Buttons in physical order.
    pub fn iter(&self) -> impl Iterator<Item = (ButtonId, &BindingSpec)> {
        ButtonId::all().map(move |b| (b, self.get(b)))
    }
}

// ---------------------------------------------------------------------------
// Checked bindings
// ---------------------------------------------------------------------------

/// One step of a checked program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSet {
    pub modifier: u8,
    pub delay_ms: u8,
    /// At most [`MAX_KEYS_PER_STEP`] keys, none of them reserved.
    pub keys: Vec<KeyCode>,
}

impl From<&ProgramSet> for ProgramSetSpec {
    fn from(step: &ProgramSet) -> Self {
        Self {
            modifier: Modifiers(step.modifier),
            delay_ms: u32::from(step.delay_ms),
            keys: step.keys.clone(),
        }
    }
}

/// What a button does when pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonBinding {
    /// Emit one key.
    Key(KeyCode),
    /// Emit the key that types this character.
    Character(char),
    /// Run a timed macro. Never empty.
    Program(Vec<ProgramSet>),
}

impl fmt::Display for ButtonBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(code) => write!(f, "key {code}"),
            Self::Character(ch) => write!(f, "string {ch:?}"),
            Self::Program(steps) => write!(f, "program ({} steps)", steps.len()),
        }
    }
}

/// Eight validated bindings, in physical order.
///
/// Only [`crate::validate`] constructs this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonBindings {
    buttons: [ButtonBinding; BUTTON_COUNT],
}

impl ButtonBindings {
    pub(crate) fn new(buttons: [ButtonBinding; BUTTON_COUNT]) -> Self {
        Self { buttons }
    }

    pub fn get(&self, button: ButtonId) -> &ButtonBinding {
        &self.buttons[button.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ButtonId, &ButtonBinding)> {
        ButtonId::all().zip(self.buttons.iter())
    }
}
