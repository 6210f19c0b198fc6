//! Button and macro encoding for the MAX Falcon-8 keypad firmware image.
//!
//! The keypad stores its configuration at fixed offsets inside its firmware
//! image. Programming it is a three step affair:
//!
//! 1. describe the eight buttons as a [`BindingsSpec`]
//! 2. [`validate`] it into [`ButtonBindings`] against a [`Layout`]
//! 3. [`encode`] those into the in-memory image, then write it back whole
//!
//! [`decode`] reads the current bindings back out of an image.

pub mod binding;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod keycode;
pub mod layout;
pub mod validate;

pub use binding::{
    BindingSpec, BindingsSpec, ButtonBinding, ButtonBindings, ButtonId, ProgramSet,
    ProgramSetSpec, BUTTON_COUNT, MAX_KEYS_PER_STEP,
};
pub use decoder::{decode, DecodedBinding, DecodedBindings};
pub use encoder::encode;
pub use error::{FirmwareError, ParseKeyError, ValidationError, ValidationErrorKind};
pub use keycode::{KeyCode, Modifiers};
pub use layout::{ButtonSlot, Layout, FALCON_8};
pub use validate::validate;
