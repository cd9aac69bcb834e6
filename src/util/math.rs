//! Numeric helpers shared by the filters and the encoders.

/// Wraps an angle in degrees to the range [0, 360).
pub(crate) fn wrap_deg_360(angle_deg: f32) -> f32 {
    let wrapped = angle_deg % 360.0;
    if wrapped < 0.0 {
        let shifted = wrapped + 360.0;
        // -tiny + 360.0 rounds to 360.0 in f32
        if shifted >= 360.0 {
            0.0
        } else {
            shifted
        }
    } else {
        wrapped
    }
}

/// Gradient direction in degrees, measured from +x towards +y (image rows).
pub(crate) fn atan2_deg(gy: f32, gx: f32) -> f32 {
    wrap_deg_360(gy.atan2(gx).to_degrees())
}

/// Clamps `value` into `[lo, hi]`, mapping NaN to `lo`.
pub(crate) fn clamp_or_lo(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        lo
    } else {
        value.clamp(lo, hi)
    }
}

/// Row `n` of Pascal's triangle (`n + 1` coefficients).
pub(crate) fn binomial_row(n: usize) -> Vec<f32> {
    let mut row = vec![1.0f32];
    for _ in 0..n {
        let mut next = vec![1.0f32; row.len() + 1];
        for i in 1..row.len() {
            next[i] = row[i - 1] + row[i];
        }
        row = next;
    }
    row
}

/// Rounds a kernel size up to the next odd value.
pub(crate) fn odd_ksize(ksize: usize) -> usize {
    if ksize % 2 == 0 {
        ksize + 1
    } else {
        ksize
    }
}
