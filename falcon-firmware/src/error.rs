//! Error types for binding validation and image handling

use crate::binding::ButtonId;
use crate::keycode::KeyCode;
use thiserror::Error;

/// A binding rejected by [`crate::validate`], tagged with the button it came from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{button}: {kind}")]
pub struct ValidationError {
    pub button: ButtonId,
    pub kind: ValidationErrorKind,
}

/// The rule a binding broke.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Zero or several of `key`, `string` and `program` are set.
    #[error("malformed binding: expected exactly one of key, string or program, found {populated}")]
    MalformedBinding { populated: usize },

    /// A key that the device reserves (no-key, program or stop sentinel).
    #[error("key {0} is reserved and cannot be assigned")]
    ReservedKey(KeyCode),

    /// No keycode exists for this character.
    #[error("unsupported character {0:?}")]
    UnsupportedCharacter(char),

    /// `string` must hold exactly one character.
    #[error("string bindings take exactly one character, got {0}")]
    InvalidCharacterCount(usize),

    #[error("program has no steps")]
    EmptyProgram,

    /// A keyboard report carries at most six keys.
    #[error("program step {step} has {count} keys (at most 6 allowed)")]
    TooManyKeysInStep { step: usize, count: usize },

    #[error("program has {steps} steps but the region holds at most {capacity}")]
    ProgramTooLong { steps: usize, capacity: usize },

    #[error("program step {step} delay of {delay} ms exceeds 255 ms")]
    DelayOutOfRange { step: usize, delay: u32 },

    /// The modifier byte shares its position with the stop sentinel.
    #[error("program step {step} modifier 0x{modifier:02X} collides with the stop marker")]
    ReservedModifier { step: usize, modifier: u8 },
}

/// Errors about the firmware image itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FirmwareError {
    /// The image does not reach the last byte the layout refers to.
    #[error("firmware image is {len} bytes but the {layout} layout needs at least {required}")]
    ImageTooSmall {
        layout: &'static str,
        len: usize,
        required: usize,
    },
}

/// Errors from parsing key and modifier names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseKeyError {
    #[error("unknown key: \"{0}\"")]
    UnknownKey(String),

    #[error("unknown modifier: \"{0}\"")]
    UnknownModifier(String),

    #[error("invalid key code literal: \"{0}\"")]
    InvalidLiteral(String),
}
