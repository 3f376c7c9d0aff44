use image::DynamicImage;

use super::decode;

/// Default size of list thumbnails (square bounds)
pub const THUMBNAIL_SIZE: u32 = 256;

/// Generate a thumbnail that fits inside `size`x`size`.
///
/// Returns None if the stored bytes cannot be decoded.
pub fn make_thumbnail(encoded: &[u8], size: u32) -> Option<DynamicImage> {
    let img = decode(encoded).ok()?;
    Some(img.thumbnail(size, size))
}
