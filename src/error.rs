use std::path::PathBuf;

use thiserror::Error;

/// The source file could not be turned into a raster image
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to decode dropped file {name}: {source}")]
    Memory {
        name: String,
        #[source]
        source: image::ImageError,
    },
}

impl LoadError {
    /// Short human readable cause, without the path
    pub fn reason(&self) -> String {
        match self {
            LoadError::Io { source, .. } => source.to_string(),
            LoadError::Decode { source, .. } | LoadError::Memory { source, .. } => source.to_string(),
        }
    }
}

/// Masking or cropping was requested without an image and a complete rectangle.
///
/// Callers treat this as a no-op rather than a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no image or selection to apply")]
pub struct EmptySelectionError;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("nothing to save: make a selection first")]
    NoCrop,
    #[error("nothing to save: the selection is {width}x{height} pixels")]
    EmptyCrop { width: u32, height: u32 },
    #[error("failed to write {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
