/// The three-stage filter chain
///
/// source ─▶ color controls ─▶ blur ─▶ bloom ─▶ rasterize ─▶ output
///
/// Work happens on 32-bit float RGBA so intermediate values can leave the
/// 0..1 range; only the final rasterization clamps back to 8 bits.

use cgmath::Vector3;
use image::{DynamicImage, GenericImageView, Rgba, Rgba32FImage, RgbaImage};
use log::debug;

use super::{bloom, blur, Stage};
use crate::color::ColorControls;
use crate::error::PipelineError;
use crate::state::edit::FilterParams;

/// Bloom intensity is not user adjustable
pub const BLOOM_INTENSITY: f32 = 1.0;

/// Render `source` through the pipeline, falling back to an unmodified copy
/// of the source if any stage fails.
///
/// This is the preview path: a slider drag must always produce a frame.
pub fn render(source: &DynamicImage, params: &FilterParams) -> DynamicImage {
    match try_render(source, params) {
        Ok(rendered) => rendered,
        Err(err) => {
            debug!("Pipeline fell back to source ({} stage): {}", err.stage(), err);
            source.clone()
        }
    }
}

/// Render `source` through the pipeline, reporting which stage failed.
///
/// The output always has the exact dimensions of the source.
pub fn try_render(
    source: &DynamicImage,
    params: &FilterParams,
) -> Result<DynamicImage, PipelineError> {
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Err(PipelineError::EmptySource { width, height });
    }

    // Stage 1: color controls. The blur below samples this frame with edge
    // clamping, which stands in for extending it to infinity.
    let adjusted = color_controls(source.to_rgba32f(), params);

    // Stage 2: blur
    let blurred = blur::gaussian_blur(&adjusted, params.blur_radius).ok_or(
        PipelineError::InvalidRadius {
            stage: Stage::Blur,
            radius: params.blur_radius,
        },
    )?;

    // Stage 3: bloom
    let bloomed = bloom::bloom(&blurred, params.bloom_radius, BLOOM_INTENSITY).ok_or(
        PipelineError::InvalidRadius {
            stage: Stage::Bloom,
            radius: params.bloom_radius,
        },
    )?;

    let raster = rasterize(&bloomed, width, height)
        .ok_or(PipelineError::Rasterize { width, height })?;

    Ok(DynamicImage::ImageRgba8(raster))
}

fn color_controls(mut frame: Rgba32FImage, params: &FilterParams) -> Rgba32FImage {
    let controls = ColorControls::new(params.brightness, params.saturation, params.contrast);
    for p in frame.pixels_mut() {
        let rgb = controls.apply(Vector3::new(p[0], p[1], p[2]));
        *p = Rgba([rgb.x, rgb.y, rgb.z, p[3]]);
    }
    frame
}

/// Convert the float frame to 8-bit pixels inside the source extent
fn rasterize(frame: &Rgba32FImage, width: u32, height: u32) -> Option<RgbaImage> {
    if frame.dimensions() != (width, height) {
        return None;
    }

    let bytes: Vec<u8> = frame
        .as_raw()
        .iter()
        .map(|&v| {
            let v = if v.is_finite() { v } else { 0.0 };
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        })
        .collect();

    RgbaImage::from_raw(width, height, bytes)
}
