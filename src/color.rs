/// Color control math
///
/// Per-pixel brightness, contrast and saturation as used by the first
/// stage of the filter pipeline. All math is on normalized RGB (0.0..1.0).
///
/// Order matches the classic color-controls filter:
/// 1. Saturation (interpolate toward luma through a 3x3 matrix)
/// 2. Brightness (additive)
/// 3. Contrast (scale around mid-grey)

use cgmath::{Matrix3, Vector3};

/// Rec. 709 luma weights
pub const LUMA_WEIGHTS: [f32; 3] = [0.2125, 0.7154, 0.0721];

/// Build the saturation matrix for a given factor.
///
/// `factor = 0.0` maps every color to its luma, `1.0` is identity,
/// values above 1.0 push colors away from grey.
pub fn saturation_matrix(factor: f32) -> Matrix3<f32> {
    let inv = 1.0 - factor;
    let column = |i: usize| {
        let grey = inv * LUMA_WEIGHTS[i];
        let mut col = Vector3::new(grey, grey, grey);
        col[i] += factor;
        col
    };
    Matrix3::from_cols(column(0), column(1), column(2))
}

/// Luma of a normalized RGB triple
pub fn luma(rgb: Vector3<f32>) -> f32 {
    rgb.x * LUMA_WEIGHTS[0] + rgb.y * LUMA_WEIGHTS[1] + rgb.z * LUMA_WEIGHTS[2]
}

/// Precomputed color controls so the per-pixel loop is one matrix multiply
/// and two fused operations
#[derive(Debug, Clone, Copy)]
pub struct ColorControls {
    matrix: Matrix3<f32>,
    brightness: f32,
    contrast: f32,
}

impl ColorControls {
    pub fn new(brightness: f32, saturation: f32, contrast: f32) -> Self {
        Self {
            matrix: saturation_matrix(saturation),
            brightness,
            contrast,
        }
    }

    /// Apply to one normalized RGB triple. The result is not clamped.
    pub fn apply(&self, rgb: Vector3<f32>) -> Vector3<f32> {
        let saturated = self.matrix * rgb;
        saturated.map(|c| (c + self.brightness - 0.5) * self.contrast + 0.5)
    }
}
