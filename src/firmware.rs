// Firmware image file handling
//
// The image is read whole, patched in memory and written back with a single
// write from offset 0. Patching the file in place with seek/write pairs
// leaves the keypad with an image it will not accept.

use falcon_firmware::{encode, ButtonBindings, FirmwareError, Layout};
use std::fs::{self, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from reading or writing a firmware image file
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("unable to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("unable to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("{path}: {source}")]
    Layout {
        path: PathBuf,
        source: FirmwareError,
    },
}

/// A firmware image held in memory
#[derive(Debug, Clone)]
pub struct FirmwareImage {
    path: PathBuf,
    data: Vec<u8>,
}

impl FirmwareImage {
    /// Read the whole image and check it covers every offset in `layout`
    pub fn load<P: AsRef<Path>>(path: P, layout: &Layout) -> Result<Self, ImageError> {
        let path = path.as_ref().to_path_buf();
        let data = fs::read(&path).map_err(|source| ImageError::Read {
            path: path.clone(),
            source,
        })?;
        layout
            .check_image(&data)
            .map_err(|source| ImageError::Layout {
                path: path.clone(),
                source,
            })?;
        debug!("Read {} bytes from {}", data.len(), path.display());
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Encode validated bindings into the in-memory image
    pub fn program(&mut self, bindings: &ButtonBindings, layout: &Layout) {
        encode(&mut self.data, bindings, layout);
    }

    /// Write the whole image back in one write and sync it to the device.
    /// Returns the number of bytes written.
    pub fn commit(&self) -> Result<usize, ImageError> {
        let write_err = |source: io::Error| ImageError::Write {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .write(true)
            .open(&self.path)
            .map_err(write_err)?;
        file.seek(SeekFrom::Start(0)).map_err(write_err)?;
        file.write_all(&self.data).map_err(write_err)?;
        file.flush().map_err(write_err)?;
        file.sync_all().map_err(write_err)?;

        info!("Wrote {} bytes to {}", self.data.len(), self.path.display());
        Ok(self.data.len())
    }
}
