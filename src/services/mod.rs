/// Platform collaborators
///
/// The editor talks to the outside world only through these seams:
/// - Location updates (location.rs)
/// - Photo library export (photos.rs)
/// - Image picking (picker.rs)

pub mod location;
pub mod photos;
pub mod picker;
