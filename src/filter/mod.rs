/// Filter pipeline for live preview and final output
///
/// Architecture:
/// - `pipeline.rs` - the fixed three-stage chain and rasterization
/// - `blur.rs` - separable gaussian blur with clamp-to-edge sampling
/// - `bloom.rs` - highlight glow composited over the blurred frame
///
/// Everything here is a pure function of (image, parameters). No filter
/// objects are kept between calls, so a render can run on any thread.

pub mod bloom;
pub mod blur;
pub mod pipeline;

pub use pipeline::{render, try_render};

use std::fmt;

/// Stages of the pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ColorControls,
    Blur,
    Bloom,
    Rasterize,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ColorControls => "color controls",
            Stage::Blur => "blur",
            Stage::Bloom => "bloom",
            Stage::Rasterize => "rasterize",
        };
        f.write_str(name)
    }
}
