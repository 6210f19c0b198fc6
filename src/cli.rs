// CLI definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "falcon8")]
#[command(author, version, about = "Button and macro programmer for the MAX Falcon-8 keypad")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file path (default: ~/.config/falcon8/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show debug messages (same as --log-level debug)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a bindings file and write it into the firmware image
    #[command(visible_alias = "p")]
    Program {
        /// Bindings file (TOML)
        #[arg(short, long, value_name = "FILE")]
        bindings: Option<PathBuf>,

        /// Firmware image on the keypad; modified in place
        #[arg(short, long, value_name = "FILE")]
        firmware: Option<PathBuf>,

        /// Only validate the bindings file, write nothing
        #[arg(long)]
        verify_only: bool,
    },

    /// Validate a bindings file without touching any firmware
    #[command(visible_alias = "check")]
    Verify {
        /// Bindings file (TOML)
        #[arg(value_name = "FILE")]
        bindings: Option<PathBuf>,
    },

    /// Show the bindings stored in a firmware image
    ///
    /// Unassigned buttons come out as empty tables in toml and json output.
    /// Give them a binding before programming that file.
    #[command(visible_aliases = ["dump", "s"])]
    Show {
        /// Firmware image to read
        #[arg(short, long, value_name = "FILE")]
        firmware: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Also save the bindings as a bindings file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List key and modifier names accepted in bindings files
    Keys,

    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a config file with default paths
    Init {
        /// Firmware image to use when --firmware is not given
        #[arg(short, long, value_name = "FILE")]
        firmware: Option<PathBuf>,

        /// Bindings file to use when --bindings is not given
        #[arg(short, long, value_name = "FILE")]
        bindings: Option<PathBuf>,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Print the config file path and its current values
    Show,
}

/// Output format for `show`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Bindings file (TOML)
    Toml,
    /// JSON
    Json,
}
