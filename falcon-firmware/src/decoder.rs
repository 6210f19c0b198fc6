//! Read bindings back out of a firmware image.
//!
//! The inverse of [`crate::encode`], used to show what a keypad is currently
//! programmed with. A `string` binding cannot be told apart from a direct key
//! once written, so it decodes as [`DecodedBinding::Key`].

use crate::binding::{BindingSpec, BindingsSpec, ButtonId, ProgramSet, BUTTON_COUNT};
use crate::error::FirmwareError;
use crate::keycode::KeyCode;
use crate::layout::{Layout, STEP_HEADER_LEN};
use std::fmt;
use tracing::warn;

/// A button as found in an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedBinding {
    /// Button byte is "no key".
    Unassigned,
    Key(KeyCode),
    Program {
        steps: Vec<ProgramSet>,
        /// No stop marker was found before the end of the region.
        unterminated: bool,
    },
}

impl fmt::Display for DecodedBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unassigned => f.write_str("(unassigned)"),
            Self::Key(code) => write!(f, "{code}"),
            Self::Program {
                steps,
                unterminated,
            } => {
                write!(f, "program, {} steps", steps.len())?;
                if *unterminated {
                    f.write_str(" (no stop marker)")?;
                }
                Ok(())
            }
        }
    }
}

/// All eight buttons as found in an image, in physical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBindings {
    buttons: [DecodedBinding; BUTTON_COUNT],
}

impl DecodedBindings {
    pub fn get(&self, button: ButtonId) -> &DecodedBinding {
        &self.buttons[button.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ButtonId, &DecodedBinding)> {
        ButtonId::all().zip(self.buttons.iter())
    }

    /// Buttons with no key. These have no bindings file form.
    pub fn unassigned(&self) -> Vec<ButtonId> {
        self.iter()
            .filter(|(_, b)| **b == DecodedBinding::Unassigned)
            .map(|(button, _)| button)
            .collect()
    }

    /// Convert to the bindings file form. Unassigned buttons come out empty
    /// and will not validate until they are given a binding.
    pub fn to_spec(&self) -> BindingsSpec {
        let mut spec = BindingsSpec::default();
        for (button, decoded) in self.iter() {
            *spec.get_mut(button) = match decoded {
                DecodedBinding::Unassigned => BindingSpec::default(),
                DecodedBinding::Key(code) => BindingSpec::key(*code),
                DecodedBinding::Program { steps, .. } => {
                    BindingSpec::program(steps.iter().map(Into::into).collect())
                }
            };
        }
        spec
    }
}

/// Decode every button of `image`.
pub fn decode(image: &[u8], layout: &Layout) -> Result<DecodedBindings, FirmwareError> {
    layout.check_image(image)?;

    let buttons = ButtonId::all().map(|button| {
        let slot = layout.slot(button);
        let code = KeyCode(image[slot.offset]);
        if code == slot.program_sentinel {
            let region = &image[slot.program_base..slot.program_base + layout.program_region_size];
            let (steps, unterminated) = read_program(region, layout);
            if unterminated {
                warn!("{button}: program region has no stop marker");
            }
            DecodedBinding::Program {
                steps,
                unterminated,
            }
        } else if code == layout.no_key {
            DecodedBinding::Unassigned
        } else {
            DecodedBinding::Key(code)
        }
    });

    let buttons: Vec<_> = buttons.collect();
    let buttons = buttons
        .try_into()
        .unwrap_or_else(|_| unreachable!("ButtonId::all yields one entry per button"));
    Ok(DecodedBindings { buttons })
}

fn read_program(region: &[u8], layout: &Layout) -> (Vec<ProgramSet>, bool) {
    let mut steps = Vec::new();
    for slot in region.chunks_exact(layout.slot_stride) {
        if slot[0] == layout.stop_sentinel {
            return (steps, false);
        }
        let keys = slot[STEP_HEADER_LEN..]
            .iter()
            .map(|&b| KeyCode(b))
            .filter(|&k| k != layout.no_key)
            .collect();
        steps.push(ProgramSet {
            modifier: slot[0],
            delay_ms: slot[1],
            keys,
        });
    }
    (steps, true)
}
