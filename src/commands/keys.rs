//! Keys command handler.

use super::CommandResult;
use falcon_firmware::keycode::{mods, KEY_NAMES};

/// List every key and modifier name a bindings file accepts
pub fn keys() -> CommandResult {
    println!("Keys (case-insensitive; 0xNN literals also accepted):");
    for chunk in KEY_NAMES.chunks(6) {
        let line: Vec<String> = chunk
            .iter()
            .map(|(code, name)| format!("{name:<10} 0x{code:02X}"))
            .collect();
        println!("  {}", line.join("  "));
    }

    println!();
    println!("Modifiers (program steps):");
    for (bit, name) in mods::NAMES {
        println!("  {name:<8} 0x{bit:02X}");
    }
    Ok(())
}
