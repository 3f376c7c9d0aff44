/// Raster helpers around the `image` crate
///
/// This module handles:
/// - Scaling a picked photo down to preview resolution
/// - Generating list thumbnails from stored posts
/// - Encoding rendered frames for storage (PNG) and export (JPEG)

pub mod preview;
pub mod thumbnail;

use image::{codecs::jpeg::JpegEncoder, DynamicImage, ImageFormat};
use std::io::Cursor;

/// JPEG quality used for photo library exports
pub const EXPORT_JPEG_QUALITY: u8 = 92;

/// Encode a frame as PNG (lossless, used for stored posts)
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Encode a frame as JPEG. Alpha is dropped since JPEG cannot carry it.
pub fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, EXPORT_JPEG_QUALITY);
    rgb.write_with_encoder(encoder)?;
    Ok(bytes)
}

/// Decode stored bytes, guessing the format from the content
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, image::ImageError> {
    image::load_from_memory(bytes)
}
