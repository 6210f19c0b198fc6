//! Config command handlers.

use super::CommandResult;
use falcon8::FalconConfig;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write a config file holding the given default paths
pub fn init(
    config_path: &Path,
    firmware: Option<PathBuf>,
    bindings: Option<PathBuf>,
    force: bool,
) -> CommandResult {
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite it",
            config_path.display()
        );
    }

    let config = FalconConfig {
        firmware_path: firmware,
        bindings_path: bindings,
        ..FalconConfig::default()
    };
    config.save(config_path)?;
    info!("Saved config to {}", config_path.display());
    println!("Wrote {}", config_path.display());
    Ok(())
}

/// Print where the config lives and what it holds
pub fn show(config_path: &Path, config: &FalconConfig) -> CommandResult {
    let state = if config_path.exists() {
        ""
    } else {
        " (not found, using defaults)"
    };
    println!("Config file: {}{state}", config_path.display());
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("falcon8").join("config.toml");

        init(&path, Some(PathBuf::from("/media/FALCON/FIRMWARE.BIN")), None, false).unwrap();

        let config = FalconConfig::load(&path).unwrap();
        assert_eq!(
            config.firmware_path.as_deref(),
            Some(Path::new("/media/FALCON/FIRMWARE.BIN"))
        );
        assert_eq!(config.bindings_path, None);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn init_keeps_existing_config_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "log_level = \"debug\"\n").unwrap();

        let err = init(&path, None, None, false).unwrap_err();
        assert!(err.to_string().contains("--force"), "{err}");
        assert_eq!(FalconConfig::load(&path).unwrap().log_level, "debug");

        init(&path, None, Some(PathBuf::from("b.toml")), true).unwrap();
        let config = FalconConfig::load(&path).unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.bindings_path, Some(PathBuf::from("b.toml")));
    }
}
