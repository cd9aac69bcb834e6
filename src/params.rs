//! Preprocessing and table-building parameters.
//!
//! A [`Parameters`] value is copied into every [`VoteTable`](crate::VoteTable)
//! so that live frames are preprocessed exactly like the template was.
//! Out-of-range numbers are never rejected; the accessors clamp them.

use crate::image::blur::BlurKind;
use crate::util::math::clamp_or_lo;

/// Smallest accepted offset scale factor.
pub const MIN_SCALE: f64 = 0.1;
/// Largest accepted offset scale factor.
pub const MAX_SCALE: f64 = 10.0;
/// Smallest accepted angle quantization step count.
pub const MIN_ANGLE_STEPS: u32 = 4;
/// Largest accepted angle quantization step count.
pub const MAX_ANGLE_STEPS: u32 = 254;

/// Parameter bundle shared by the encoders and the table builder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parameters {
    /// Pre-blur kernel size; `<= 1` disables blurring.
    pub kblur: usize,
    /// Pre-blur filter.
    pub blur_kind: BlurKind,
    /// Derivative kernel size (`-1` for Scharr, otherwise odd Sobel size).
    pub ksobel: i32,
    /// Offset scale factor applied at table build time.
    pub scale: f64,
    /// Gradient-magnitude threshold as a fraction of the frame maximum.
    pub mag_thr: f64,
    /// Number of angle bins for orientation encoding.
    pub angle_steps: u32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            kblur: 7,
            blur_kind: BlurKind::Gaussian,
            ksobel: 7,
            scale: 1.0,
            mag_thr: 0.1,
            angle_steps: 8,
        }
    }
}

impl Parameters {
    /// Scale factor clamped to `[0.1, 10.0]` (NaN maps to 0.1).
    pub fn scale(&self) -> f64 {
        clamp_or_lo(self.scale, MIN_SCALE, MAX_SCALE)
    }

    /// Angle step count clamped to `[4, 254]`.
    pub fn angle_steps(&self) -> u32 {
        self.angle_steps.clamp(MIN_ANGLE_STEPS, MAX_ANGLE_STEPS)
    }

    /// Magnitude threshold fraction, or `None` when masking is disabled.
    ///
    /// Only values strictly inside `(0, 1)` enable masking.
    pub fn mag_threshold(&self) -> Option<f64> {
        if self.mag_thr > 0.0 && self.mag_thr < 1.0 {
            Some(self.mag_thr)
        } else {
            None
        }
    }

    /// Returns a copy with a different scale factor.
    pub fn with_scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }

    /// Returns a copy with blurring disabled.
    pub fn without_blur(self) -> Self {
        Self { kblur: 1, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::Parameters;

    #[test]
    fn scale_is_clamped() {
        let p = Parameters::default();
        assert_eq!(p.with_scale(0.01).scale(), 0.1);
        assert_eq!(p.with_scale(100.0).scale(), 10.0);
        assert_eq!(p.with_scale(2.5).scale(), 2.5);
        assert_eq!(p.with_scale(f64::NAN).scale(), 0.1);
    }

    #[test]
    fn angle_steps_are_clamped() {
        let mut p = Parameters::default();
        p.angle_steps = 1;
        assert_eq!(p.angle_steps(), 4);
        p.angle_steps = 1000;
        assert_eq!(p.angle_steps(), 254);
    }

    #[test]
    fn mag_threshold_disabled_outside_unit_interval() {
        let mut p = Parameters::default();
        assert_eq!(p.mag_threshold(), Some(0.1));
        p.mag_thr = 1.0;
        assert_eq!(p.mag_threshold(), None);
        p.mag_thr = 0.0;
        assert_eq!(p.mag_threshold(), None);
        p.mag_thr = f64::NAN;
        assert_eq!(p.mag_threshold(), None);
    }
}
