/// Photo library export
///
/// Exporting is the one operation that leaves the caller's thread. The
/// editor hands back an `ExportRequest`; whoever drives the UI runs it and
/// decides what to do with the outcome.
use chrono::Utc;
use image::DynamicImage;
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::ExportError;
use crate::raster;

/// Answer to an authorization prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Granted,
    Denied,
}

/// Destination for finished photos
pub trait PhotoLibrary: Send + Sync {
    /// Ask for permission to add photos. May block on a user prompt.
    fn request_authorization(&self) -> Authorization;

    /// Add one photo. Returns an identifier for the saved asset.
    fn save(&self, image: &DynamicImage) -> Result<String, ExportError>;
}

/// How an export finished when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved { asset: String },
    /// The user declined access; nothing was written
    Declined,
}

/// A single-shot export of one rendered photo
pub struct ExportRequest {
    library: Arc<dyn PhotoLibrary>,
    image: Arc<DynamicImage>,
}

impl ExportRequest {
    pub fn new(library: Arc<dyn PhotoLibrary>, image: Arc<DynamicImage>) -> Self {
        Self { library, image }
    }

    /// The frame that will be exported
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Run the export on the blocking thread pool
    pub async fn run(self) -> Result<ExportOutcome, ExportError> {
        tokio::task::spawn_blocking(move || self.run_blocking())
            .await
            .map_err(|e| ExportError::Join(e.to_string()))?
    }

    /// Run the export on the current thread
    pub fn run_blocking(self) -> Result<ExportOutcome, ExportError> {
        if self.library.request_authorization() == Authorization::Denied {
            info!("Photo library access declined, skipping export");
            return Ok(ExportOutcome::Declined);
        }

        let asset = self.library.save(&self.image)?;
        info!("📸 Exported photo to library: {}", asset);
        Ok(ExportOutcome::Saved { asset })
    }
}

impl std::fmt::Debug for ExportRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportRequest")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .finish_non_exhaustive()
    }
}

/// A photo library backed by a folder of JPEG files
#[derive(Debug, Clone)]
pub struct DirectoryPhotoLibrary {
    dir: PathBuf,
}

impl DirectoryPhotoLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// First unused `photo-<timestamp>[-n].jpg` in the folder
    fn next_path(&self) -> PathBuf {
        let stamp = Utc::now().format("%Y%m%d-%H%M%S%3f");
        let mut path = self.dir.join(format!("photo-{}.jpg", stamp));
        let mut n = 1;
        while path.exists() {
            path = self.dir.join(format!("photo-{}-{}.jpg", stamp, n));
            n += 1;
        }
        path
    }
}

impl PhotoLibrary for DirectoryPhotoLibrary {
    /// Access is granted when the folder exists or can be created
    fn request_authorization(&self) -> Authorization {
        match std::fs::create_dir_all(&self.dir) {
            Ok(()) => Authorization::Granted,
            Err(e) => {
                warn!("⚠️  Cannot use {} as photo library: {}", self.dir.display(), e);
                Authorization::Denied
            }
        }
    }

    fn save(&self, image: &DynamicImage) -> Result<String, ExportError> {
        let bytes = raster::encode_jpeg(image).map_err(ExportError::Encode)?;
        let path = self.next_path();
        std::fs::write(&path, bytes).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path.to_string_lossy().to_string())
    }
}
