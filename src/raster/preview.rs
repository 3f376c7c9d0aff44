/// Preview-resolution copies of picked photos
///
/// The filter pipeline runs on every slider change, so the editor feeds it
/// a copy sized to the on-screen display area instead of the original.
use image::{imageops::FilterType, DynamicImage, GenericImageView};
use log::debug;

/// Size of the display area the preview is fitted into, in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSize {
    pub width: u32,
    pub height: u32,
}

impl PreviewSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Scale `image` to fit inside `bounds`, keeping aspect ratio.
///
/// Images already inside the bounds are returned unchanged; previews are
/// never upscaled.
pub fn scale_to_preview(image: &DynamicImage, bounds: PreviewSize) -> DynamicImage {
    let (width, height) = image.dimensions();
    if width <= bounds.width && height <= bounds.height {
        return image.clone();
    }

    let scaled = image.resize(bounds.width, bounds.height, FilterType::Lanczos3);
    debug!(
        "📐 Preview resolution: {}x{} -> {}x{}",
        width,
        height,
        scaled.width(),
        scaled.height()
    );
    scaled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_images_fit_inside_bounds() {
        let image = DynamicImage::new_rgba8(400, 200);
        let preview = scale_to_preview(&image, PreviewSize::new(100, 100));
        assert_eq!(preview.dimensions(), (100, 50));
    }

    #[test]
    fn test_small_images_are_not_upscaled() {
        let image = DynamicImage::new_rgba8(2, 2);
        let preview = scale_to_preview(&image, PreviewSize::new(100, 100));
        assert_eq!(preview, image);
    }
}
