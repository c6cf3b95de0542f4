use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

pub const PREVIEW_PAGE_FILENAME: &str = "preview.html";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    // Writability probe.
    NamedTempFile::new_in(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Writes the rendered preview page via temp file + rename.
#[derive(Debug, Clone)]
pub struct PageWriter {
    dir: PathBuf,
    target: PathBuf,
}

impl PageWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_filename(dir, PREVIEW_PAGE_FILENAME)
    }

    pub fn with_filename(dir: impl Into<PathBuf>, filename: &str) -> Self {
        let dir = dir.into();
        let target = dir.join(filename);
        Self { dir, target }
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn write(&self, html: &str) -> Result<&Path, PersistError> {
        if !self.dir.is_dir() {
            ensure_output_dir(&self.dir)?;
        }

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(html.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.target).map_err(|e| PersistError::Io(e.error))?;
        Ok(&self.target)
    }
}
