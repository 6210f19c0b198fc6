// MAX Falcon-8 programmer - shared library
// Bindings files, user config and firmware image file handling around the
// falcon-firmware encoder

pub mod config;
pub mod description;
pub mod firmware;

pub use config::FalconConfig;
pub use firmware::{FirmwareImage, ImageError};
