use cgmath::Vector3;
use image::{Rgba, Rgba32FImage};

use super::blur::gaussian_blur;
use crate::color::luma;

/// Bloom: blur the bright parts of the frame and screen them back on top.
///
/// Each pixel contributes to the glow in proportion to the square of its
/// luma, so shadows stay put while highlights spread by `radius`.
/// At radius 0 nothing spreads, but highlights are still screened over
/// themselves, so bright areas get brighter while black stays black.
/// Returns `None` for a negative or non-finite radius.
pub fn bloom(frame: &Rgba32FImage, radius: f32, intensity: f32) -> Option<Rgba32FImage> {
    let highlights = highlight_pass(frame);
    let glow = gaussian_blur(&highlights, radius)?;

    let mut out = frame.clone();
    for (base, glow) in out.pixels_mut().zip(glow.pixels()) {
        for c in 0..3 {
            let a = base[c].clamp(0.0, 1.0);
            let b = (glow[c] * intensity).clamp(0.0, 1.0);
            base[c] = a + b - a * b;
        }
    }
    Some(out)
}

fn highlight_pass(frame: &Rgba32FImage) -> Rgba32FImage {
    let mut bright = frame.clone();
    for p in bright.pixels_mut() {
        let rgb = Vector3::new(p[0], p[1], p[2]);
        let weight = luma(rgb).clamp(0.0, 1.0).powi(2);
        *p = Rgba([p[0] * weight, p[1] * weight, p[2] * weight, p[3]]);
    }
    bright
}
