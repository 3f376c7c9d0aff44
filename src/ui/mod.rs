/// Read-only views over stored posts
///
/// - gallery.rs - list rows with thumbnails
/// - map.rs - one annotated pin per post

pub mod gallery;
pub mod map;
