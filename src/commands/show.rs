//! Show command handler.

use super::{resolve_path, CommandResult};
use crate::cli::OutputFormat;
use falcon8::{description, FalconConfig, FirmwareImage};
use falcon_firmware::{decode, ButtonId, DecodedBinding, DecodedBindings, FALCON_8};
use std::path::PathBuf;
use tracing::warn;

/// Decode and print the bindings stored in a firmware image
pub fn show(
    config: &FalconConfig,
    firmware: Option<PathBuf>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> CommandResult {
    let firmware_path = resolve_path(
        firmware,
        config.firmware_path.as_ref(),
        "firmware image",
        "--firmware",
    )?;
    let image = FirmwareImage::load(&firmware_path, &FALCON_8)?;
    let decoded = decode(image.data(), &FALCON_8)?;

    let writes_bindings = output.is_some() || format != OutputFormat::Table;
    let unassigned = decoded.unassigned();
    if writes_bindings && !unassigned.is_empty() {
        let names: Vec<String> = unassigned.iter().map(ToString::to_string).collect();
        warn!(
            "{} unassigned; give them a binding before programming this file",
            names.join(", ")
        );
    }

    match format {
        OutputFormat::Table => print_table(&decoded),
        OutputFormat::Toml => print!("{}", description::to_toml(&decoded.to_spec())?),
        OutputFormat::Json => println!("{}", description::to_json(&decoded.to_spec())?),
    }

    if let Some(path) = output {
        description::save(&decoded.to_spec(), &path)?;
        eprintln!("Saved bindings to {}", path.display());
    }
    Ok(())
}

fn print_table(decoded: &DecodedBindings) {
    println!("Falcon-8 Bindings");
    println!("=================");
    print_grid(decoded);
    println!();

    for (button, binding) in decoded.iter() {
        println!("Button {}:  {binding}", button.number());
        if let DecodedBinding::Program { steps, .. } = binding {
            for (i, step) in steps.iter().enumerate() {
                let keys: Vec<String> = step.keys.iter().map(|k| k.to_string()).collect();
                println!(
                    "  {i:>3}  mod={:<14} delay={:>3}ms  keys={}",
                    falcon_firmware::Modifiers(step.modifier).to_string(),
                    step.delay_ms,
                    if keys.is_empty() {
                        "-".to_string()
                    } else {
                        keys.join(" ")
                    }
                );
            }
        }
    }
}

/// Physical 2x4 layout, as seen from above
fn print_grid(decoded: &DecodedBindings) {
    for row in [1u8..=4, 5u8..=8] {
        let cells: Vec<String> = row
            .filter_map(ButtonId::new)
            .map(|b| grid_cell(decoded, b))
            .collect();
        println!("|{}|", cells.join("|"));
    }
}

fn grid_cell(decoded: &DecodedBindings, button: ButtonId) -> String {
    let label = match decoded.get(button) {
        DecodedBinding::Unassigned => "-".to_string(),
        DecodedBinding::Key(code) => code.to_string(),
        DecodedBinding::Program { .. } => format!("prog {}", button.number()),
    };
    format!("{label:^10}")
}
