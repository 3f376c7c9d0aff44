/// Filter parameters for the live preview pipeline
///
/// This struct holds the five slider values the editor feeds into the
/// filter pipeline on every change. It can be serialized to JSON so a set of
/// slider positions can be saved and reused as a preset.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// One adjustable slider of the editor
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    Brightness,
    Saturation,
    Contrast,
    BlurRadius,
    BloomRadius,
}

impl Parameter {
    /// Every parameter, in slider order
    pub const ALL: [Parameter; 5] = [
        Parameter::Brightness,
        Parameter::Saturation,
        Parameter::Contrast,
        Parameter::BlurRadius,
        Parameter::BloomRadius,
    ];

    /// Slider range for this parameter
    ///
    /// Values outside the range are accepted by the editor; the pipeline
    /// decides what to do with them.
    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            Parameter::Brightness => -1.0..=1.0,
            Parameter::Saturation => 0.0..=2.0,
            Parameter::Contrast => 0.25..=4.0,
            Parameter::BlurRadius => 0.0..=100.0,
            Parameter::BloomRadius => 0.0..=100.0,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Parameter::Brightness => "brightness",
            Parameter::Saturation => "saturation",
            Parameter::Contrast => "contrast",
            Parameter::BlurRadius => "blur",
            Parameter::BloomRadius => "bloom",
        };
        f.write_str(name)
    }
}

/// All filter parameters for one render
///
/// These values are applied by the filter pipeline in a fixed order:
/// color controls, then blur, then bloom.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct FilterParams {
    // ========== Color Controls ==========

    /// Brightness offset (-1.0 to +1.0)
    /// - Added to every color channel
    /// - 0.0 = no adjustment
    pub brightness: f32,

    /// Saturation factor (0.0 to 2.0)
    /// - 0.0 = grayscale, 1.0 = original, 2.0 = double saturation
    pub saturation: f32,

    /// Contrast factor (0.25 to 4.0)
    /// - Scales each channel around mid-grey
    /// - 1.0 = no adjustment
    pub contrast: f32,

    // ========== Effects ==========

    /// Gaussian blur radius in pixels (0.0 to 100.0)
    /// - 0.0 = sharp
    pub blur_radius: f32,

    /// Bloom glow radius in pixels (0.0 to 100.0)
    /// - Bloom intensity is fixed at 1.0
    pub bloom_radius: f32,
}

impl Default for FilterParams {
    /// Neutral color controls, no blur and the tightest bloom
    fn default() -> Self {
        Self {
            brightness: 0.0,
            saturation: 1.0,
            contrast: 1.0,
            blur_radius: 0.0,
            bloom_radius: 0.0,
        }
    }
}

impl FilterParams {
    /// Read one parameter
    pub fn get(&self, param: Parameter) -> f32 {
        match param {
            Parameter::Brightness => self.brightness,
            Parameter::Saturation => self.saturation,
            Parameter::Contrast => self.contrast,
            Parameter::BlurRadius => self.blur_radius,
            Parameter::BloomRadius => self.bloom_radius,
        }
    }

    /// Update one parameter, leaving the others untouched
    pub fn set(&mut self, param: Parameter, value: f32) {
        let slot = match param {
            Parameter::Brightness => &mut self.brightness,
            Parameter::Saturation => &mut self.saturation,
            Parameter::Contrast => &mut self.contrast,
            Parameter::BlurRadius => &mut self.blur_radius,
            Parameter::BloomRadius => &mut self.bloom_radius,
        };
        *slot = value;
    }

    /// Copy of these parameters with every value pulled into its slider range
    pub fn clamped(&self) -> Self {
        let mut out = *self;
        for param in Parameter::ALL {
            let range = param.range();
            out.set(param, self.get(param).clamp(*range.start(), *range.end()));
        }
        out
    }

    /// Convert to JSON string for preset files
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON string; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check if this represents an unfiltered image (all values at default)
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_neutral() {
        let params = FilterParams::default();
        assert!(params.is_neutral());
        assert_eq!(params.saturation, 1.0);
        assert_eq!(params.contrast, 1.0);
    }

    #[test]
    fn test_set_changes_only_one_parameter() {
        let mut params = FilterParams::default();
        params.set(Parameter::BlurRadius, 4.0);

        assert_eq!(params.blur_radius, 4.0);
        assert_eq!(params.get(Parameter::BlurRadius), 4.0);
        let others = FilterParams { blur_radius: 0.0, ..params };
        assert!(others.is_neutral());
    }

    #[test]
    fn test_preset_json() {
        let mut params = FilterParams::default();
        params.brightness = 0.25;
        params.bloom_radius = 12.0;

        let json = params.to_json().unwrap();
        let restored = FilterParams::from_json(&json).unwrap();
        assert_eq!(params, restored);

        // Partial presets fill the rest from defaults
        let partial = FilterParams::from_json(r#"{ "contrast": 1.5 }"#).unwrap();
        assert_eq!(partial.contrast, 1.5);
        assert_eq!(partial.saturation, 1.0);
    }

    #[test]
    fn test_clamped_pulls_values_into_range() {
        let mut params = FilterParams::default();
        params.set(Parameter::BlurRadius, -3.0);
        params.set(Parameter::Contrast, 10.0);

        let clamped = params.clamped();
        assert_eq!(clamped.blur_radius, 0.0);
        assert_eq!(clamped.contrast, 4.0);
    }
}
