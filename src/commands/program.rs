//! Program and verify command handlers.

use super::{resolve_path, CommandResult};
use anyhow::Context;
use falcon8::{description, FalconConfig, FirmwareImage};
use falcon_firmware::{validate, FALCON_8};
use std::path::PathBuf;
use tracing::info;

/// Validate a bindings file and, unless `verify_only`, encode it into the
/// firmware image and write the image back
pub fn program(
    config: &FalconConfig,
    bindings: Option<PathBuf>,
    firmware: Option<PathBuf>,
    verify_only: bool,
) -> CommandResult {
    let bindings_path = resolve_path(
        bindings,
        config.bindings_path.as_ref(),
        "bindings file",
        "--bindings",
    )?;
    let spec = description::load(&bindings_path)?;
    let bindings = validate(&spec, &FALCON_8)
        .with_context(|| format!("error verifying button bindings in {}", bindings_path.display()))?;

    for (button, binding) in bindings.iter() {
        info!("{button}: {binding}");
    }

    if verify_only {
        println!("{}: OK", bindings_path.display());
        return Ok(());
    }

    let firmware_path = resolve_path(
        firmware,
        config.firmware_path.as_ref(),
        "firmware image",
        "--firmware",
    )?;
    let mut image = FirmwareImage::load(&firmware_path, &FALCON_8)?;
    info!("Programming {} ({} bytes)", image.path().display(), image.len());
    image.program(&bindings, &FALCON_8);
    let written = image.commit()?;
    println!("Bytes written: {written}");
    Ok(())
}

/// Validate a bindings file only
pub fn verify(config: &FalconConfig, bindings: Option<PathBuf>) -> CommandResult {
    program(config, bindings, None, true)
}
