//! Separable derivative filters for gradient-orientation encoding.

use crate::image::{ImageView, OwnedImage};
use crate::util::math::{binomial_row, odd_ksize};

const MAX_DERIV_KSIZE: usize = 31;

/// Separable derivative filter: `deriv` runs along the differentiated axis,
/// `smooth` along the other one.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivKernel {
    deriv: Vec<f32>,
    smooth: Vec<f32>,
}

impl DerivKernel {
    /// Builds the kernel pair for a gradient kernel size.
    ///
    /// `-1` selects the 3-tap Scharr filter, values `<= 1` a bare central
    /// difference, and odd sizes `>= 3` the binomial Sobel filter of that
    /// size. Even sizes round up; sizes above 31 are capped.
    pub fn from_ksize(ksize: i32) -> Self {
        if ksize == -1 {
            return Self {
                deriv: vec![-1.0, 0.0, 1.0],
                smooth: vec![3.0, 10.0, 3.0],
            };
        }
        if ksize <= 1 {
            return Self {
                deriv: vec![-1.0, 0.0, 1.0],
                smooth: vec![1.0],
            };
        }
        let k = odd_ksize(ksize as usize).min(MAX_DERIV_KSIZE);
        let base = binomial_row(k - 3);
        let mut deriv = vec![0.0f32; k];
        for (i, &b) in base.iter().enumerate() {
            deriv[i] -= b;
            deriv[i + 2] += b;
        }
        Self {
            deriv,
            smooth: binomial_row(k - 1),
        }
    }

    /// Taps along the differentiated axis.
    pub fn deriv(&self) -> &[f32] {
        &self.deriv
    }

    /// Taps along the smoothing axis.
    pub fn smooth(&self) -> &[f32] {
        &self.smooth
    }
}

/// Computes horizontal and vertical derivatives with replicated borders.
///
/// `gx` is positive where intensity grows with the column index, `gy` where it
/// grows with the row index.
pub fn derivatives(src: ImageView<'_, u8>, ksize: i32) -> (OwnedImage<f32>, OwnedImage<f32>) {
    let kernel = DerivKernel::from_ksize(ksize);
    let gx = filter_separable(src, kernel.deriv(), kernel.smooth());
    let gy = filter_separable(src, kernel.smooth(), kernel.deriv());
    (gx, gy)
}

/// Correlates `src` with `row_taps` along x, then `col_taps` along y.
fn filter_separable(src: ImageView<'_, u8>, row_taps: &[f32], col_taps: &[f32]) -> OwnedImage<f32> {
    let width = src.width();
    let height = src.height();
    if width == 0 || height == 0 {
        return OwnedImage::zeros(width, height);
    }
    let rh = (row_taps.len() / 2) as isize;
    let ch = (col_taps.len() / 2) as isize;

    let mut tmp = vec![0.0f32; width * height];
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0f32;
            for (k, &tap) in row_taps.iter().enumerate() {
                if tap != 0.0 {
                    acc += tap * f32::from(src.at_clamped(x as isize + k as isize - rh, y as isize));
                }
            }
            tmp[y * width + x] = acc;
        }
    }

    let mut out = OwnedImage::zeros(width, height);
    let dst = out.data_mut();
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0f32;
            for (k, &tap) in col_taps.iter().enumerate() {
                if tap != 0.0 {
                    let sy = (y as isize + k as isize - ch).clamp(0, height as isize - 1) as usize;
                    acc += tap * tmp[sy * width + x];
                }
            }
            dst[y * width + x] = acc;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{derivatives, DerivKernel};
    use crate::image::ImageView;

    #[test]
    fn sobel_kernels_match_known_taps() {
        let k3 = DerivKernel::from_ksize(3);
        assert_eq!(k3.deriv(), &[-1.0, 0.0, 1.0]);
        assert_eq!(k3.smooth(), &[1.0, 2.0, 1.0]);

        let k5 = DerivKernel::from_ksize(5);
        assert_eq!(k5.deriv(), &[-1.0, -2.0, 0.0, 2.0, 1.0]);
        assert_eq!(k5.smooth(), &[1.0, 4.0, 6.0, 4.0, 1.0]);

        let k7 = DerivKernel::from_ksize(7);
        assert_eq!(k7.deriv(), &[-1.0, -4.0, -5.0, 0.0, 5.0, 4.0, 1.0]);
    }

    #[test]
    fn scharr_and_unit_kernels() {
        assert_eq!(DerivKernel::from_ksize(-1).smooth(), &[3.0, 10.0, 3.0]);
        assert_eq!(DerivKernel::from_ksize(1).smooth(), &[1.0]);
    }

    #[test]
    fn horizontal_ramp_has_only_x_gradient() {
        let width = 8;
        let height = 6;
        let data: Vec<u8> = (0..height)
            .flat_map(|_| (0..width).map(|x| (x * 10) as u8))
            .collect();
        let view = ImageView::from_slice(&data, width, height).unwrap();
        let (gx, gy) = derivatives(view, 3);
        // interior: (20 - 0) * (1 + 2 + 1)
        assert!((gx.get(3, 3).copied().unwrap() - 80.0).abs() < 1e-4);
        assert!(gy.data().iter().all(|v| v.abs() < 1e-4));
    }

    #[test]
    fn vertical_step_points_down() {
        let width = 5;
        let height = 6;
        let data: Vec<u8> = (0..height)
            .flat_map(|y| (0..width).map(move |_| if y >= 3 { 200 } else { 0 }))
            .collect();
        let view = ImageView::from_slice(&data, width, height).unwrap();
        let (gx, gy) = derivatives(view, 3);
        assert!(gy.get(2, 3).copied().unwrap() > 0.0);
        assert!(gx.get(2, 3).copied().unwrap().abs() < 1e-4);
    }
}
