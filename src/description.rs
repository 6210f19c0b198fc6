//! Bindings files.
//!
//! A bindings file is TOML with one table per button:
//!
//! ```toml
//! [button1]
//! key = "A"              # key name, "0x04" or 4
//!
//! [button2]
//! string = "b"           # exactly one character
//!
//! [[button3.program]]    # one table per step
//! modifier = ["Ctrl"]    # names, one name, or a bitmask
//! delay_ms = 10
//! keys = ["C"]           # up to six keys pressed together
//! ```

use anyhow::Context;
use falcon_firmware::BindingsSpec;
use std::path::Path;
use tracing::debug;

/// Read and parse a bindings file.
pub fn load(path: &Path) -> anyhow::Result<BindingsSpec> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("unable to read {}", path.display()))?;
    let spec = parse(&text).with_context(|| format!("error parsing {}", path.display()))?;
    debug!("Loaded bindings from {}: {:?}", path.display(), spec);
    Ok(spec)
}

pub fn parse(text: &str) -> anyhow::Result<BindingsSpec> {
    Ok(toml::from_str(text)?)
}

pub fn to_toml(spec: &BindingsSpec) -> anyhow::Result<String> {
    Ok(toml::to_string_pretty(spec)?)
}

pub fn to_json(spec: &BindingsSpec) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(spec)?)
}

/// Write a bindings file.
pub fn save(spec: &BindingsSpec, path: &Path) -> anyhow::Result<()> {
    std::fs::write(path, to_toml(spec)?)
        .with_context(|| format!("unable to write {}", path.display()))
}
