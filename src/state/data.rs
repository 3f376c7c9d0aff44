/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the database layer, the editor and the display layer.

use chrono::{DateTime, Utc};

/// A point on the map
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Represents a single posted photo in the library
///
/// Records are immutable once stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    /// Unique database ID
    pub id: i64,
    /// Encoded raster (PNG when produced by the editor)
    pub image: Vec<u8>,
    /// User-supplied title
    pub title: String,
    pub latitude: f64,
    pub longitude: f64,
    /// When the post was committed
    pub created_at: DateTime<Utc>,
}

impl ImageRecord {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A record that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewImageRecord {
    pub image: Vec<u8>,
    pub title: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl NewImageRecord {
    /// Build a record stamped with the current time
    pub fn now(image: Vec<u8>, title: impl Into<String>, at: Coordinate) -> Self {
        Self {
            image,
            title: title.into(),
            latitude: at.latitude,
            longitude: at.longitude,
            created_at: Utc::now(),
        }
    }
}
