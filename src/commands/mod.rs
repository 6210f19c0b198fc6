//! Command handlers for the CLI application.
//!
//! - `program`: validate a bindings file and write it into an image (program, verify)
//! - `show`: decode the bindings stored in an image
//! - `keys`: list accepted key and modifier names
//! - `config`: write or print the config file (init, show)

pub mod config;
pub mod keys;
pub mod program;
pub mod show;

use std::path::PathBuf;

/// Result type for command handlers
pub type CommandResult = anyhow::Result<()>;

/// Pick the path given on the command line, else the configured one.
pub fn resolve_path(
    arg: Option<PathBuf>,
    configured: Option<&PathBuf>,
    what: &str,
    flag: &str,
) -> anyhow::Result<PathBuf> {
    arg.or_else(|| configured.cloned()).ok_or_else(|| {
        anyhow::anyhow!("no {what} given; pass {flag} or set it in the config file")
    })
}
