use image::Rgba32FImage;

/// Number of box passes approximating the gaussian
const BOX_PASSES: usize = 3;

/// Below this sigma the blur is skipped entirely
const MIN_SIGMA: f32 = 1e-3;

/// Gaussian blur with `sigma = radius`, approximated by three box passes.
///
/// Each pass keeps a running sum along the row or column, so the cost per
/// pixel does not depend on the radius. Samples outside the frame read the
/// nearest edge pixel, so borders never fade toward transparent black.
/// Returns `None` for a negative or non-finite radius.
pub fn gaussian_blur(frame: &Rgba32FImage, radius: f32) -> Option<Rgba32FImage> {
    if !radius.is_finite() || radius < 0.0 {
        return None;
    }
    if radius < MIN_SIGMA {
        return Some(frame.clone());
    }

    let (width, height) = frame.dimensions();
    let (w, h) = (width as usize, height as usize);

    let mut data = frame.as_raw().clone();
    for r in box_radii(radius) {
        data = box_pass(&data, w, h, r, Axis::Horizontal);
        data = box_pass(&data, w, h, r, Axis::Vertical);
    }

    Rgba32FImage::from_raw(width, height, data)
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Box half-widths whose combined variance is closest to `sigma²`
fn box_radii(sigma: f32) -> [usize; BOX_PASSES] {
    let n = BOX_PASSES as f64;
    let variance = f64::from(sigma) * f64::from(sigma);

    let ideal = (12.0 * variance / n + 1.0).sqrt();
    let mut lower = ideal.floor();
    if lower % 2.0 == 0.0 {
        lower -= 1.0;
    }
    let upper = lower + 2.0;

    // How many passes use the narrower box
    let narrow = ((12.0 * variance - n * lower * lower - 4.0 * n * lower - 3.0 * n)
        / (-4.0 * lower - 4.0))
        .round()
        .clamp(0.0, n) as usize;

    let mut radii = [0; BOX_PASSES];
    for (i, r) in radii.iter_mut().enumerate() {
        let width = if i < narrow { lower } else { upper };
        // `as` saturates, so huge widths land on usize::MAX
        *r = ((width - 1.0) / 2.0) as usize;
    }
    radii
}

/// One clamp-to-edge box pass along `axis`
fn box_pass(src: &[f32], w: usize, h: usize, radius: usize, axis: Axis) -> Vec<f32> {
    let mut out = vec![0.0f32; src.len()];
    let (lines, len, step, line_step) = match axis {
        Axis::Horizontal => (h, w, 4, w * 4),
        Axis::Vertical => (w, h, w * 4, 4),
    };
    if len == 0 {
        return out;
    }

    // A window wider than the line only repeats edge pixels
    let r = radius.min(len) as i64;
    let last = len as i64 - 1;
    let norm = 1.0 / (2 * r + 1) as f64;

    for line in 0..lines {
        let base = line * line_step;
        let at = |i: i64| base + i.clamp(0, last) as usize * step;

        for c in 0..4 {
            let mut sum: f64 = (-r..=r).map(|i| f64::from(src[at(i) + c])).sum();
            for x in 0..=last {
                out[at(x) + c] = (sum * norm) as f32;
                sum += f64::from(src[at(x + r + 1) + c]) - f64::from(src[at(x - r) + c]);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::Rgba;

    #[test]
    fn test_box_radii_match_gaussian_variance() {
        for sigma in [5.0f32, 40.0, 100.0] {
            let variance: f32 = box_radii(sigma)
                .iter()
                .map(|&r| {
                    let width = (2 * r + 1) as f32;
                    (width * width - 1.0) / 12.0
                })
                .sum();
            assert_relative_eq!(variance, sigma * sigma, max_relative = 0.1);
        }
    }

    #[test]
    fn test_huge_radius_is_capped_to_the_frame() {
        let mut frame = Rgba32FImage::from_pixel(2, 2, Rgba([0.2, 0.2, 0.2, 1.0]));
        frame.put_pixel(0, 0, Rgba([1.0, 1.0, 1.0, 1.0]));

        let blurred = gaussian_blur(&frame, 1e19).unwrap();
        assert_eq!(blurred.dimensions(), (2, 2));
        for p in blurred.pixels() {
            assert!(p[0].is_finite());
            assert!(p[0] > 0.2 && p[0] < 1.0);
            assert_relative_eq!(p[3], 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_invalid_radius_yields_nothing() {
        let frame = Rgba32FImage::from_pixel(4, 4, Rgba([0.5, 0.5, 0.5, 1.0]));
        assert!(gaussian_blur(&frame, -1.0).is_none());
        assert!(gaussian_blur(&frame, f32::NAN).is_none());
        assert!(gaussian_blur(&frame, f32::INFINITY).is_none());
    }

    #[test]
    fn test_zero_radius_is_identity() {
        let mut frame = Rgba32FImage::from_pixel(3, 3, Rgba([0.0, 0.0, 0.0, 1.0]));
        frame.put_pixel(1, 1, Rgba([1.0, 1.0, 1.0, 1.0]));
        assert_eq!(gaussian_blur(&frame, 0.0).unwrap(), frame);
    }

    #[test]
    fn test_clamped_edges_keep_flat_frames_flat() {
        // Edge clamping means a uniform frame stays uniform right up to the border
        let frame = Rgba32FImage::from_pixel(5, 3, Rgba([0.8, 0.4, 0.2, 1.0]));
        let blurred = gaussian_blur(&frame, 6.0).unwrap();
        for p in blurred.pixels() {
            assert_relative_eq!(p[0], 0.8, epsilon = 1e-5);
            assert_relative_eq!(p[3], 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_blur_spreads_a_point() {
        let mut frame = Rgba32FImage::from_pixel(7, 7, Rgba([0.0, 0.0, 0.0, 1.0]));
        frame.put_pixel(3, 3, Rgba([1.0, 1.0, 1.0, 1.0]));
        let blurred = gaussian_blur(&frame, 1.0).unwrap();

        assert!(blurred.get_pixel(3, 3)[0] < 1.0);
        assert!(blurred.get_pixel(2, 3)[0] > 0.0);
        assert_relative_eq!(
            blurred.get_pixel(2, 3)[0],
            blurred.get_pixel(4, 3)[0],
            epsilon = 1e-6
        );
    }
}
