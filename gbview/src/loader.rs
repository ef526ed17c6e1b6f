use crate::app::GbViewApp;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} is empty")]
    Empty(PathBuf),
    #[error("{path} is too large ({size} bytes, at most {max})")]
    TooLarge {
        path: PathBuf,
        size: usize,
        max: usize,
    },
}

/// Read a ROM image from disk. The image has to fit into the bus address space.
///
/// # Errors
/// Returns [`LoadError`] if the file cannot be read, is empty or too large.
pub fn load_rom(path: &Path) -> Result<Vec<u8>, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if bytes.is_empty() {
        return Err(LoadError::Empty(path.to_path_buf()));
    }

    if bytes.len() > crate::memory::RAM_SIZE {
        return Err(LoadError::TooLarge {
            path: path.to_path_buf(),
            size: bytes.len(),
            max: crate::memory::RAM_SIZE,
        });
    }

    Ok(bytes)
}

impl GbViewApp {
    /// Replace the ROM with the content of `path` and reset RAM
    pub(crate) fn open_rom(&mut self, path: &Path) {
        match load_rom(path) {
            Ok(rom) => {
                info!("Loaded {} ({} bytes)", path.display(), rom.len());
                self.memory.rom = rom;
                self.memory.clear_ram();
                self.rom_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned());
            }
            Err(err) => {
                self.error.replace(err.to_string());
            }
        }
    }
}
