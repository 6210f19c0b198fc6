//! Fixed firmware image layout per device model.
//!
//! Offsets were found by diffing images written by the vendor programmer;
//! nothing in the image describes them. A new model means a new [`Layout`]
//! value, not new encoder logic.

use crate::binding::{ButtonId, BUTTON_COUNT, MAX_KEYS_PER_STEP};
use crate::error::FirmwareError;
use crate::keycode::KeyCode;

/// Bytes at the start of a program slot before the key window
/// (modifier, delay).
pub const STEP_HEADER_LEN: usize = 2;

/// Where one button lives in the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSlot {
    /// Byte holding the button's keycode.
    pub offset: usize,
    /// Keycode written at `offset` to mean "run this button's program".
    pub program_sentinel: KeyCode,
    /// Start of the button's program region.
    pub program_base: usize,
}

/// Every fixed position the encoder touches for one device model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub name: &'static str,
    /// Indexed by [`ButtonId::index`].
    pub buttons: [ButtonSlot; BUTTON_COUNT],
    /// Size of each program region in bytes.
    pub program_region_size: usize,
    /// Size of one program slot in bytes.
    pub slot_stride: usize,
    /// First byte of the slot after the last step.
    pub stop_sentinel: u8,
    /// Padding for unused key positions.
    pub no_key: KeyCode,
}

/// MAX Falcon-8.
pub const FALCON_8: Layout = Layout {
    name: "Falcon-8",
    buttons: [
        ButtonSlot { offset: 0x5189, program_sentinel: KeyCode(0xD7), program_base: 0x539C },
        ButtonSlot { offset: 0x5181, program_sentinel: KeyCode(0xD8), program_base: 0x56BC },
        ButtonSlot { offset: 0x5179, program_sentinel: KeyCode(0xD9), program_base: 0x59DC },
        ButtonSlot { offset: 0x5149, program_sentinel: KeyCode(0xDA), program_base: 0x5CFC },
        ButtonSlot { offset: 0x518A, program_sentinel: KeyCode(0xDB), program_base: 0x601C },
        ButtonSlot { offset: 0x5182, program_sentinel: KeyCode(0xDC), program_base: 0x633C },
        ButtonSlot { offset: 0x517A, program_sentinel: KeyCode(0xDD), program_base: 0x665C },
        ButtonSlot { offset: 0x514A, program_sentinel: KeyCode(0xDE), program_base: 0x697C },
    ],
    program_region_size: 800,
    slot_stride: 8,
    stop_sentinel: 0xFD,
    no_key: KeyCode::NONE,
};

// A slot must hold the step header plus a full key window, and regions are
// whole slots.
const _: () = assert!(FALCON_8.slot_stride == STEP_HEADER_LEN + MAX_KEYS_PER_STEP);
const _: () = assert!(FALCON_8.program_region_size % FALCON_8.slot_stride == 0);

impl Layout {
    pub fn slot(&self, button: ButtonId) -> &ButtonSlot {
        &self.buttons[button.index()]
    }

    /// Slots per program region, terminator slot included.
    pub const fn slots_per_region(&self) -> usize {
        self.program_region_size / self.slot_stride
    }

    /// Most steps a program may have; one slot is kept for the terminator.
    pub const fn program_capacity(&self) -> usize {
        self.slots_per_region() - 1
    }

    /// Smallest image that contains every byte this layout refers to.
    pub fn required_len(&self) -> usize {
        self.buttons
            .iter()
            .map(|slot| (slot.offset + 1).max(slot.program_base + self.program_region_size))
            .max()
            .unwrap_or(0)
    }

    /// Check once that an image is large enough for every write.
    pub fn check_image(&self, image: &[u8]) -> Result<(), FirmwareError> {
        let required = self.required_len();
        if image.len() < required {
            return Err(FirmwareError::ImageTooSmall {
                layout: self.name,
                len: image.len(),
                required,
            });
        }
        Ok(())
    }

    /// Button whose program sentinel is `code`, if any.
    pub fn program_sentinel_owner(&self, code: KeyCode) -> Option<ButtonId> {
        ButtonId::all().find(|&b| self.slot(b).program_sentinel == code)
    }

    /// Keys that must never be bound: "no key", the program sentinels and
    /// the stop sentinel.
    pub fn is_reserved(&self, code: KeyCode) -> bool {
        code == self.no_key
            || code.raw() == self.stop_sentinel
            || self.program_sentinel_owner(code).is_some()
    }
}
