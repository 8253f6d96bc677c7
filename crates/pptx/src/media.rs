//! Persistence of media blobs (images, videos, diagram icons).
//!
//! All filenames are derived from stable identifiers (`slide_{order}_{id}`,
//! `sa_{pointId}`), so concurrent extractions of different files never
//! collide: each file writes only under its own `media/<file_id>/`
//! directory.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes blobs under `<output>/media/<file_id>/` and hands back the
/// relative paths content blocks reference them by.
#[derive(Debug)]
pub struct MediaStore {
    dir: PathBuf,
    prefix: String,
}

impl MediaStore {
    /// Create the per-file media directory under the output root.
    pub fn create(output_dir: &Path, file_id: &str) -> std::io::Result<Self> {
        let dir = output_dir.join("media").join(file_id);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            prefix: format!("media/{}", file_id),
        })
    }

    /// Write one blob and return its path relative to the output root.
    pub fn write(&self, filename: &str, bytes: &[u8]) -> std::io::Result<String> {
        let path = self.dir.join(filename);
        let mut file = File::create(&path)?;
        file.write_all(bytes)?;
        Ok(format!("{}/{}", self.prefix, filename))
    }
}
