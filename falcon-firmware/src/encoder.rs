//! Firmware image encoder.
//!
//! Writes validated bindings into an in-memory image at the positions a
//! [`Layout`] names. The caller persists the whole buffer afterwards in one
//! write; the device rejects images patched with scattered seek/write pairs.
//!
//! # Program region format
//!
//! Each button owns a fixed region made of 8-byte slots:
//!
//! ```text
//! slot 0..n-1   [modifier, delay_ms, k1, k2, k3, k4, k5, k6]   one per step,
//!                                                              keys padded with 0x00
//! slot n        [0xFD, 0x00, ...]                              stop marker
//! rest          0x00 ...                                       through end of region
//! ```
//!
//! Zeroing everything after the stop marker scrubs steps left behind by an
//! earlier, longer program.

use crate::binding::{ButtonBinding, ButtonBindings, ProgramSet, MAX_KEYS_PER_STEP};
use crate::keycode;
use crate::layout::{Layout, STEP_HEADER_LEN};
use tracing::{debug, trace};

/// Write `bindings` into `image`.
///
/// # Panics
///
/// Panics if `image` is smaller than [`Layout::required_len`] or if a
/// binding breaks an invariant [`crate::validate`] guarantees. Both mean the
/// caller skipped a check; writing a half-correct image would be worse.
pub fn encode(image: &mut [u8], bindings: &ButtonBindings, layout: &Layout) {
    assert!(
        image.len() >= layout.required_len(),
        "firmware image of {} bytes is too small for the {} layout ({} bytes)",
        image.len(),
        layout.name,
        layout.required_len()
    );

    for (button, binding) in bindings.iter() {
        let slot = layout.slot(button);
        debug!("{button}: {binding} at offset 0x{:04x}", slot.offset);

        match binding {
            ButtonBinding::Key(code) => write_byte(image, slot.offset, code.raw()),
            ButtonBinding::Character(ch) => {
                let Some(code) = keycode::resolve_char(*ch) else {
                    panic!("{button}: validated character {ch:?} has no keycode");
                };
                write_byte(image, slot.offset, code.raw());
            }
            ButtonBinding::Program(steps) => {
                write_byte(image, slot.offset, slot.program_sentinel.raw());
                write_program(image, steps, slot.program_base, layout);
            }
        }
    }
}

fn write_byte(image: &mut [u8], offset: usize, value: u8) {
    trace!("  byte 0x{value:02x} at 0x{offset:04x}");
    image[offset] = value;
}

/// Serialize a program's steps into the region starting at `base`.
fn write_program(image: &mut [u8], steps: &[ProgramSet], base: usize, layout: &Layout) {
    assert!(
        !steps.is_empty() && steps.len() <= layout.program_capacity(),
        "program of {} steps does not fit a region of {} slots",
        steps.len(),
        layout.slots_per_region()
    );

    let region = &mut image[base..base + layout.program_region_size];
    let mut slots = region.chunks_exact_mut(layout.slot_stride);

    for (i, (step, slot)) in steps.iter().zip(&mut slots).enumerate() {
        assert!(step.keys.len() <= MAX_KEYS_PER_STEP, "step {i} has too many keys");
        trace!(
            "  step {i} at 0x{:04x}: mod=0x{:02x} delay={}ms keys={:?}",
            base + i * layout.slot_stride,
            step.modifier,
            step.delay_ms,
            step.keys
        );

        slot[0] = step.modifier;
        slot[1] = step.delay_ms;
        let window = &mut slot[STEP_HEADER_LEN..STEP_HEADER_LEN + MAX_KEYS_PER_STEP];
        for (j, byte) in window.iter_mut().enumerate() {
            *byte = step.keys.get(j).copied().unwrap_or(layout.no_key).raw();
        }
    }

    let stop = steps.len() * layout.slot_stride;
    trace!(
        "  stop marker at 0x{:04x}, zero fill through 0x{:04x}",
        base + stop,
        base + layout.program_region_size
    );
    region[stop] = layout.stop_sentinel;
    region[stop + 1..].fill(0x00);
}
