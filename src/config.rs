/// Application configuration
///
/// Every field has a platform default; a `config.json` in the user's config
/// directory can override any subset of them:
/// - Linux: ~/.config/image-post-filters/config.json
/// - macOS: ~/Library/Application Support/image-post-filters/config.json
/// - Windows: %APPDATA%\image-post-filters\config.json

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::raster::preview::PreviewSize;
use crate::raster::thumbnail::THUMBNAIL_SIZE;

const APP_DIR: &str = "image-post-filters";
const CONFIG_FILE: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// SQLite catalog of posts
    pub database_path: PathBuf,
    /// Folder the photo library export writes into
    pub export_dir: PathBuf,
    /// Display area the live preview is fitted into, in device pixels
    pub preview_width: u32,
    pub preview_height: u32,
    /// Bounding square for list thumbnails
    pub thumbnail_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        let pictures = dirs::picture_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            database_path: data_dir.join(APP_DIR).join("posts.db"),
            export_dir: pictures.join("ImagePostFilters"),
            preview_width: 1280,
            preview_height: 1280,
            thumbnail_size: THUMBNAIL_SIZE,
        }
    }
}

impl Config {
    /// Path of the user config file for this platform
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let mut path = dirs::config_dir().ok_or(ConfigError::NoPlatformDir("config"))?;
        path.push(APP_DIR);
        path.push(CONFIG_FILE);
        Ok(path)
    }

    /// Load the user config file, or defaults if there is none
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Ok(path) if path.exists() => Self::load_from(&path),
            Ok(path) => {
                debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(_) => Ok(Self::default()),
        }
    }

    /// Load a specific config file; missing fields keep their defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("⚙️  Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn preview_size(&self) -> PreviewSize {
        PreviewSize::new(self.preview_width, self.preview_height)
    }
}
