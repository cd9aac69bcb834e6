//! Convenience helpers for loading images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{ImageView, OwnedImage};
use crate::util::{BghError, BghResult};
use std::path::Path;

/// Creates a borrowed view from a grayscale image buffer.
pub fn view_from_gray_image(img: &image::GrayImage) -> BghResult<ImageView<'_, u8>> {
    ImageView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Converts any decoded image to an owned 8-bit grayscale image.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> BghResult<OwnedImage<u8>> {
    let gray = img.to_luma8();
    let width = gray.width() as usize;
    let height = gray.height() as usize;
    OwnedImage::from_vec(gray.into_raw(), width, height)
}

/// Loads an image from disk and converts it to grayscale.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> BghResult<OwnedImage<u8>> {
    let img = image::open(path).map_err(|err| BghError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}

/// Saves an accumulator rescaled to 0..=255 as a grayscale PNG/JPEG.
pub fn save_normalized<P: AsRef<Path>>(acc: &OwnedImage<u32>, path: P) -> BghResult<()> {
    let max = acc.data().iter().copied().max().unwrap_or(0).max(1) as f64;
    let pixels: Vec<u8> = acc
        .data()
        .iter()
        .map(|&v| ((v as f64 / max) * 255.0).round() as u8)
        .collect();
    let img = image::GrayImage::from_raw(acc.width() as u32, acc.height() as u32, pixels).ok_or(
        BghError::InvalidDimensions {
            width: acc.width(),
            height: acc.height(),
        },
    )?;
    img.save(path).map_err(|err| BghError::ImageIo {
        reason: err.to_string(),
    })
}
