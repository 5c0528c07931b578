//! # Post-Resize Enhancement Module
//!
//! Filtri applicati dopo il resize, scelti in base al color mode dell'immagine.
//!
//! ## Filtri:
//! - `autocontrast`: Stretch dell'istogramma per canale, scartando prima il `cutoff`%
//!   dei valori più scuri e più chiari
//! - `sharpen`: Convoluzione 3x3 `[-2 -2 -2; -2 32 -2; -2 -2 -2] / 16`, i pixel del bordo
//!   restano invariati
//!
//! Entrambi lavorano su buffer a 8 bit per canale.

use image::{DynamicImage, RgbaImage};

/// Percentage of darkest/brightest values dropped before stretching
pub const AUTOCONTRAST_CUTOFF: u64 = 2;

const SHARPEN_KERNEL: [i32; 9] = [-2, -2, -2, -2, 32, -2, -2, -2, -2];
const SHARPEN_SCALE: i32 = 16;

/// Apply the mode-dependent enhancement to an already resized image
///
/// - alpha-bearing modes are sharpened (as 8-bit RGBA)
/// - 8-bit grayscale and 8-bit RGB get auto-contrast
/// - everything else is converted to 8-bit RGB, then auto-contrasted
pub fn enhance(img: DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageLuma8(mut buf) => {
            autocontrast(&mut buf, 1, AUTOCONTRAST_CUTOFF);
            DynamicImage::ImageLuma8(buf)
        }
        DynamicImage::ImageRgb8(mut buf) => {
            autocontrast(&mut buf, 3, AUTOCONTRAST_CUTOFF);
            DynamicImage::ImageRgb8(buf)
        }
        DynamicImage::ImageRgba8(buf) => DynamicImage::ImageRgba8(sharpen(&buf)),
        other if other.color().has_alpha() => DynamicImage::ImageRgba8(sharpen(&other.to_rgba8())),
        other => {
            let mut buf = other.to_rgb8();
            autocontrast(&mut buf, 3, AUTOCONTRAST_CUTOFF);
            DynamicImage::ImageRgb8(buf)
        }
    }
}

/// Auto-contrast interleaved 8-bit samples in place, one histogram per channel
pub fn autocontrast(samples: &mut [u8], channels: usize, cutoff_percent: u64) {
    let luts: Vec<[u8; 256]> = (0..channels)
        .map(|channel| {
            let mut histogram = [0u64; 256];
            for &value in samples.iter().skip(channel).step_by(channels) {
                histogram[value as usize] += 1;
            }
            autocontrast_lut(&histogram, cutoff_percent)
        })
        .collect();

    for pixel in samples.chunks_exact_mut(channels) {
        for (value, lut) in pixel.iter_mut().zip(&luts) {
            *value = lut[*value as usize];
        }
    }
}

/// Build the lookup table that stretches one channel's histogram to 0..=255
pub fn autocontrast_lut(histogram: &[u64; 256], cutoff_percent: u64) -> [u8; 256] {
    let mut h = *histogram;

    if cutoff_percent > 0 {
        let total: u64 = h.iter().sum();
        let cut = total * cutoff_percent / 100;
        trim(h.iter_mut(), cut);
        trim(h.iter_mut().rev(), cut);
    }

    let mut lut = [0u8; 256];
    let lo = h.iter().position(|&count| count > 0);
    let hi = h.iter().rposition(|&count| count > 0);

    match (lo, hi) {
        (Some(lo), Some(hi)) if hi > lo => {
            let scale = 255.0 / (hi - lo) as f64;
            let offset = -(lo as f64) * scale;
            for (ix, entry) in lut.iter_mut().enumerate() {
                let value = (ix as f64 * scale + offset) as i64;
                *entry = value.clamp(0, 255) as u8;
            }
        }
        _ => {
            for (ix, entry) in lut.iter_mut().enumerate() {
                *entry = ix as u8;
            }
        }
    }

    lut
}

/// Remove `cut` samples from the histogram, starting from the first bucket yielded
fn trim<'a>(buckets: impl Iterator<Item = &'a mut u64>, mut cut: u64) {
    for count in buckets {
        if cut == 0 {
            break;
        }
        let removed = cut.min(*count);
        *count -= removed;
        cut -= removed;
    }
}

/// Sharpen every channel (alpha included) with the 3x3 kernel
pub fn sharpen(img: &RgbaImage) -> RgbaImage {
    let (width, height) = img.dimensions();
    let mut out = img.clone();

    if width < 3 || height < 3 {
        return out;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut sums = [0i32; 4];
            for (tap, weight) in SHARPEN_KERNEL.iter().enumerate() {
                let px = x + tap as u32 % 3 - 1;
                let py = y + tap as u32 / 3 - 1;
                let pixel = img.get_pixel(px, py);
                for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
                    *sum += weight * channel as i32;
                }
            }

            let target = out.get_pixel_mut(x, y);
            for (channel, sum) in target.0.iter_mut().zip(sums) {
                let value = (sum as f64 / SHARPEN_SCALE as f64).round() as i32;
                *channel = value.clamp(0, 255) as u8;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageBuffer, Luma, Rgb, Rgba};

    #[test]
    fn test_lut_identity_for_flat_histogram() {
        let mut histogram = [0u64; 256];
        histogram[120] = 500;

        let lut = autocontrast_lut(&histogram, AUTOCONTRAST_CUTOFF);

        for (ix, &value) in lut.iter().enumerate() {
            assert_eq!(value as usize, ix);
        }
    }

    #[test]
    fn test_lut_stretches_two_levels() {
        let mut histogram = [0u64; 256];
        histogram[10] = 50;
        histogram[20] = 50;

        let lut = autocontrast_lut(&histogram, AUTOCONTRAST_CUTOFF);

        assert_eq!(lut[0], 0);
        assert_eq!(lut[10], 0);
        assert_eq!(lut[15], 127);
        assert_eq!(lut[20], 255);
        assert_eq!(lut[200], 255);
    }

    #[test]
    fn test_lut_cutoff_discards_outliers() {
        // 1 dark and 1 bright outlier among 100 samples: both fall inside the 2% cut
        let mut histogram = [0u64; 256];
        histogram[0] = 1;
        histogram[100] = 49;
        histogram[150] = 49;
        histogram[255] = 1;

        let lut = autocontrast_lut(&histogram, AUTOCONTRAST_CUTOFF);

        assert_eq!(lut[100], 0);
        assert_eq!(lut[150], 255);
    }

    #[test]
    fn test_autocontrast_gray_image() {
        let mut img = GrayImage::from_fn(6, 6, |x, _| Luma([100 + x as u8 * 17]));
        autocontrast(&mut img, 1, 0);

        let values: Vec<u8> = img.pixels().map(|p| p.0[0]).collect();
        assert_eq!(*values.iter().min().unwrap(), 0);
        assert_eq!(*values.iter().max().unwrap(), 255);
    }

    #[test]
    fn test_autocontrast_channels_are_independent() {
        let mut samples = vec![10, 0, 7, 20, 0, 7];
        autocontrast(&mut samples, 3, 0);

        // red stretched, green and blue flat so left untouched
        assert_eq!(samples, vec![0, 0, 7, 255, 0, 7]);
    }

    #[test]
    fn test_sharpen_uniform_image_unchanged() {
        let img = RgbaImage::from_pixel(8, 8, Rgba([90, 120, 200, 180]));
        assert_eq!(sharpen(&img), img);
    }

    #[test]
    fn test_sharpen_spike_and_border() {
        let mut img = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 1, Rgba([16, 16, 16, 255]));

        let out = sharpen(&img);

        assert_eq!(out.get_pixel(1, 1), &Rgba([32, 32, 32, 255]));
        assert_eq!(out.get_pixel(0, 0), img.get_pixel(0, 0));
        assert_eq!(out.get_pixel(2, 1), img.get_pixel(2, 1));
    }

    #[test]
    fn test_sharpen_tiny_image_is_copy() {
        let img = RgbaImage::from_pixel(2, 1, Rgba([1, 2, 3, 4]));
        assert_eq!(sharpen(&img), img);
    }

    #[test]
    fn test_enhance_preserves_mode() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 4])));
        assert!(matches!(enhance(rgba), DynamicImage::ImageRgba8(_)));

        let rgb = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(4, 4, Rgb([1, 2, 3])));
        assert!(matches!(enhance(rgb), DynamicImage::ImageRgb8(_)));

        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([9])));
        assert!(matches!(enhance(gray), DynamicImage::ImageLuma8(_)));
    }

    #[test]
    fn test_enhance_converts_other_modes() {
        let deep = DynamicImage::ImageRgb16(ImageBuffer::from_pixel(4, 4, Rgb([1000u16, 2000, 3000])));
        assert!(matches!(enhance(deep), DynamicImage::ImageRgb8(_)));

        let gray_alpha = DynamicImage::ImageLumaA8(image::GrayAlphaImage::from_pixel(
            4,
            4,
            image::LumaA([9, 200]),
        ));
        assert!(matches!(enhance(gray_alpha), DynamicImage::ImageRgba8(_)));
    }
}
