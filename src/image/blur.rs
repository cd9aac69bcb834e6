//! Pre-blur filters applied before encoding.
//!
//! The same blur must run on the template and on every live frame, so the
//! kernel size and kind travel inside [`Parameters`](crate::Parameters).
//! Box and Gaussian blurs are separable with replicated borders; the median
//! filter works on the full square window.

use crate::image::{ImageView, OwnedImage};
use crate::util::math::odd_ksize;

/// Smoothing filter used for pre-blur.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlurKind {
    /// Unweighted mean over a square window.
    Box,
    /// Gaussian with sigma derived from the kernel size.
    #[default]
    Gaussian,
    /// Median over a square window.
    Median,
}

/// Blurs `src` with a `ksize x ksize` kernel.
///
/// `ksize <= 1` returns an unmodified copy. Even sizes are rounded up to the
/// next odd size.
pub fn blur(src: ImageView<'_, u8>, ksize: usize, kind: BlurKind) -> OwnedImage<u8> {
    if ksize <= 1 || src.width() == 0 || src.height() == 0 {
        return OwnedImage::from_view(src);
    }
    let ksize = odd_ksize(ksize);
    match kind {
        BlurKind::Box => separable(src, &vec![1.0 / ksize as f32; ksize]),
        BlurKind::Gaussian => separable(src, &gaussian_kernel(ksize)),
        BlurKind::Median => median(src, ksize),
    }
}

/// Normalized 1D Gaussian taps for an odd `ksize`.
pub(crate) fn gaussian_kernel(ksize: usize) -> Vec<f32> {
    let sigma = 0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let half = (ksize / 2) as isize;
    let denom = 2.0 * sigma * sigma;
    let mut taps: Vec<f32> = (-half..=half)
        .map(|i| (-((i * i) as f32) / denom).exp())
        .collect();
    let sum: f32 = taps.iter().sum();
    for tap in taps.iter_mut() {
        *tap /= sum;
    }
    taps
}

fn separable(src: ImageView<'_, u8>, taps: &[f32]) -> OwnedImage<u8> {
    let width = src.width();
    let height = src.height();
    let half = (taps.len() / 2) as isize;

    let mut tmp = vec![0.0f32; width * height];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0f32;
            for (k, &tap) in taps.iter().enumerate() {
                let sx = x as isize + k as isize - half;
                acc += tap * f32::from(src.at_clamped(sx, y as isize));
            }
            tmp[y * width + x] = acc;
        }
    }

    let mut out = OwnedImage::zeros(width, height);
    let dst = out.data_mut();
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0f32;
            for (k, &tap) in taps.iter().enumerate() {
                let sy = (y as isize + k as isize - half).clamp(0, height as isize - 1) as usize;
                acc += tap * tmp[sy * width + x];
            }
            dst[y * width + x] = acc.round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

fn median(src: ImageView<'_, u8>, ksize: usize) -> OwnedImage<u8> {
    let width = src.width();
    let height = src.height();
    let half = (ksize / 2) as isize;
    let mut window = Vec::with_capacity(ksize * ksize);
    let mut out = OwnedImage::zeros(width, height);
    let dst = out.data_mut();

    for y in 0..height as isize {
        for x in 0..width as isize {
            window.clear();
            for dy in -half..=half {
                for dx in -half..=half {
                    window.push(src.at_clamped(x + dx, y + dy));
                }
            }
            let mid = window.len() / 2;
            let (_, value, _) = window.select_nth_unstable(mid);
            dst[y as usize * width + x as usize] = *value;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{blur, gaussian_kernel, BlurKind};
    use crate::image::ImageView;

    #[test]
    fn ksize_one_is_identity() {
        let data: Vec<u8> = (0..25).map(|v| (v * 7) as u8).collect();
        let view = ImageView::from_slice(&data, 5, 5).unwrap();
        for kind in [BlurKind::Box, BlurKind::Gaussian, BlurKind::Median] {
            assert_eq!(blur(view, 1, kind).data(), data.as_slice());
        }
    }

    #[test]
    fn constant_image_is_preserved() {
        let data = vec![93u8; 64];
        let view = ImageView::from_slice(&data, 8, 8).unwrap();
        for kind in [BlurKind::Box, BlurKind::Gaussian, BlurKind::Median] {
            assert!(blur(view, 5, kind).data().iter().all(|&v| v == 93));
        }
    }

    #[test]
    fn median_removes_salt_noise() {
        let mut data = vec![10u8; 49];
        data[3 * 7 + 3] = 255;
        let view = ImageView::from_slice(&data, 7, 7).unwrap();
        let out = blur(view, 3, BlurKind::Median);
        assert_eq!(out.get(3, 3).copied(), Some(10));
    }

    #[test]
    fn box_blur_averages_neighborhood() {
        let mut data = vec![0u8; 25];
        data[12] = 90;
        let view = ImageView::from_slice(&data, 5, 5).unwrap();
        let out = blur(view, 3, BlurKind::Box);
        assert_eq!(out.get(2, 2).copied(), Some(10));
        assert_eq!(out.get(1, 1).copied(), Some(10));
        assert_eq!(out.get(0, 0).copied(), Some(0));
    }

    #[test]
    fn gaussian_kernel_is_normalized_and_symmetric() {
        let taps = gaussian_kernel(7);
        let sum: f32 = taps.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!((taps[0] - taps[6]).abs() < 1e-6);
        assert!(taps[3] > taps[2]);
    }
}
