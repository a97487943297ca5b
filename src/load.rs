//! Document loading
//!
//! Reads a JSON export from disk and deserializes it. Failures here are
//! terminal for the page being rendered: the caller surfaces one error
//! message and stops. There is no retry and no partial-data fallback;
//! per-field absence is handled inside the models instead.

use std::fs;
use std::path::Path;

use crate::model::{AnalysisDocument, MediaKitDocument};

/// Error type for document loading: transport or parse, nothing finer.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "failed to read document: {}", e),
            LoadError::Json(e) => write!(f, "invalid JSON: {}", e),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Json(e)
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;

/// Load the channel analysis export.
pub fn load_analysis<P: AsRef<Path>>(path: P) -> Result<AnalysisDocument> {
    let body = fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&body)?)
}

/// Load the media-kit export.
pub fn load_media_kit<P: AsRef<Path>>(path: P) -> Result<MediaKitDocument> {
    let body = fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&body)?)
}
