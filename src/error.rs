/// Error types for every layer of the application
///
/// Each concern gets its own enum so callers can decide what is fatal:
/// the composition root treats `StoreError` as unrecoverable, while
/// `ExportError` is only logged.

use std::path::PathBuf;
use thiserror::Error;

use crate::filter::Stage;

/// A pipeline stage produced no output
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("{stage} stage rejected radius {radius}")]
    InvalidRadius { stage: Stage, radius: f32 },

    #[error("rasterization failed for {width}x{height} frame")]
    Rasterize { width: u32, height: u32 },

    #[error("source image is empty ({width}x{height})")]
    EmptySource { width: u32, height: u32 },
}

impl PipelineError {
    /// The stage that failed
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::InvalidRadius { stage, .. } => *stage,
            PipelineError::Rasterize { .. } => Stage::Rasterize,
            PipelineError::EmptySource { .. } => Stage::ColorControls,
        }
    }
}

/// Record store failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("record image is empty")]
    EmptyImage,

    #[error("record image is not a recognised raster encoding: {0}")]
    UnknownEncoding(#[source] image::ImageError),

    #[error("timestamp {0} is out of range")]
    BadTimestamp(i64),

    #[error("I/O error preparing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Editor controller failures, reported instead of silently ignored
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("no source image loaded")]
    NoSourceImage,

    #[error("a title is required to post a photo")]
    MissingTitle,

    #[error("full resolution render failed: {0}")]
    Render(#[from] PipelineError),

    #[error("stored post image could not be decoded: {0}")]
    Decode(#[source] image::ImageError),

    #[error("could not encode rendered image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("could not persist post: {0}")]
    Persistence(#[from] StoreError),
}

/// Photo library export failures
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("could not encode photo for export: {0}")]
    Encode(#[source] image::ImageError),

    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("export task was aborted: {0}")]
    Join(String),
}

/// Image picker failures
#[derive(Error, Debug)]
pub enum PickError {
    #[error("could not read image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Configuration loading failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not determine a {0} directory for this platform")]
    NoPlatformDir(&'static str),
}
