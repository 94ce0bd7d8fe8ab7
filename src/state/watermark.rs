use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;

/// Last processed event id, kept as a bare decimal in a text file.
#[derive(Debug, Clone)]
pub struct WatermarkStore {
    path: PathBuf,
}

impl WatermarkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the watermark. A missing, unreadable or non-numeric file counts
    /// as 0, which makes the whole fetched page new.
    pub fn load(&self) -> u64 {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No watermark file, starting from 0");
                return 0;
            }
            Err(e) => {
                warn!(path = %self.path.display(), "Watermark unreadable, starting from 0: {e}");
                return 0;
            }
        };

        match raw.trim().parse::<u64>() {
            Ok(v) => v,
            Err(_) => {
                let sample: String = raw.chars().take(40).collect();
                warn!(path = %self.path.display(), "Watermark content {sample:?} is not an integer, starting from 0");
                0
            }
        }
    }

    /// Overwrite the file with `value`. Errors propagate.
    pub fn save(&self, value: u64) -> Result<()> {
        std::fs::write(&self.path, value.to_string())?;
        debug!(path = %self.path.display(), value, "Watermark saved");
        Ok(())
    }
}
