#![allow(dead_code)]

pub const BACKGROUND: u8 = 40;
pub const FOREGROUND: u8 = 210;

/// Asymmetric test shape: a rectangle with an L-shaped arm, on a flat
/// background with a margin of at least `margin` pixels.
pub fn make_shape(width: usize, height: usize, margin: usize) -> Vec<u8> {
    let mut data = vec![BACKGROUND; width * height];
    let x_end = width - margin;
    let y_end = height - margin;
    // main body: left two thirds, top half
    let body_x1 = margin + (x_end - margin) * 2 / 3;
    let body_y1 = margin + (y_end - margin) / 2;
    fill(&mut data, width, margin, margin, body_x1, body_y1);
    // arm: narrow column at the right going down
    let arm_x0 = body_x1 - 3;
    fill(&mut data, width, arm_x0, body_y1, x_end, y_end);
    data
}

pub fn fill(data: &mut [u8], width: usize, x0: usize, y0: usize, x1: usize, y1: usize) {
    for y in y0..y1 {
        for x in x0..x1 {
            data[y * width + x] = FOREGROUND;
        }
    }
}

/// Copies `src` into `dst` with its top-left corner at `(x0, y0)`.
pub fn paste(dst: &mut [u8], dst_width: usize, src: &[u8], src_width: usize, x0: usize, y0: usize) {
    let src_height = src.len() / src_width;
    for y in 0..src_height {
        let d = (y0 + y) * dst_width + x0;
        dst[d..d + src_width].copy_from_slice(&src[y * src_width..(y + 1) * src_width]);
    }
}
