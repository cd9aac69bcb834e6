//! Image views, owned buffers and preprocessing filters.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit stride.
//! The stride counts elements between the starts of consecutive rows, so a
//! stride larger than the width represents padded rows. `OwnedImage` is the
//! contiguous counterpart returned by every encoder and voting sweep.

use crate::util::{BghError, BghResult};

pub mod blur;
pub mod gradient;
#[cfg(feature = "image-io")]
pub mod io;

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> BghResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> BghResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(BghError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.stride + x)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.stride;
        self.data.get(start..start + self.width)
    }

    /// Returns a zero-copy ROI view into the same backing buffer.
    pub fn roi(&self, x: usize, y: usize, width: usize, height: usize) -> BghResult<Self> {
        if width == 0 || height == 0 {
            return Err(BghError::InvalidDimensions { width, height });
        }
        let out_of_bounds = BghError::RoiOutOfBounds {
            x,
            y,
            width,
            height,
            img_width: self.width,
            img_height: self.height,
        };
        let end_x = x.checked_add(width).ok_or_else(|| out_of_bounds.clone())?;
        let end_y = y.checked_add(height).ok_or_else(|| out_of_bounds.clone())?;
        if end_x > self.width || end_y > self.height {
            return Err(out_of_bounds);
        }

        let start = y * self.stride + x;
        let data = self.data.get(start..).ok_or(BghError::BufferTooSmall {
            needed: start + 1,
            got: self.data.len(),
        })?;
        ImageView::new(data, width, height, self.stride)
    }
}

impl<T: Copy> ImageView<'_, T> {
    /// Reads `(x, y)` clamped into the image, replicating border pixels.
    #[inline]
    pub(crate) fn at_clamped(&self, x: isize, y: isize) -> T {
        let cx = x.clamp(0, self.width as isize - 1) as usize;
        let cy = y.clamp(0, self.height as isize - 1) as usize;
        self.data[cy * self.stride + cx]
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> BghResult<usize> {
    if width == 0 || height == 0 {
        return Err(BghError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(BghError::InvalidStride { width, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(BghError::InvalidDimensions { width, height })
}

/// Owned contiguous row-major image buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedImage<T = u8> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> OwnedImage<T> {
    /// Wraps a contiguous buffer of exactly `width * height` elements.
    pub fn from_vec(data: Vec<T>, width: usize, height: usize) -> BghResult<Self> {
        if width == 0 || height == 0 {
            return Err(BghError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(BghError::InvalidDimensions { width, height })?;
        if data.len() != needed {
            return Err(BghError::LengthMismatch {
                width,
                height,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major pixel buffer.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consumes the image and returns its buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, T> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }

    /// Returns row `y` as a slice.
    pub fn row(&self, y: usize) -> Option<&[T]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.data.get(start..start + self.width)
    }

    /// Returns row `y` as a mutable slice.
    pub fn row_mut(&mut self, y: usize) -> Option<&mut [T]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.data.get_mut(start..start + self.width)
    }

    pub(crate) fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: Copy + Default> OwnedImage<T> {
    /// Allocates a default-filled (zero) image.
    ///
    /// Zero dimensions are allowed here; such images simply hold no pixels.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            data: vec![T::default(); width * height],
            width,
            height,
        }
    }

    /// Copies a possibly strided view into a contiguous buffer.
    pub fn from_view(view: ImageView<'_, T>) -> Self {
        let mut out = Self::zeros(view.width(), view.height());
        for y in 0..view.height() {
            if let (Some(src), Some(dst)) = (view.row(y), out.row_mut(y)) {
                dst.copy_from_slice(src);
            }
        }
        out
    }
}

impl OwnedImage<u8> {
    /// Creates a copy of `src` surrounded by `pad` pixels of `fill`.
    pub fn padded(src: ImageView<'_, u8>, pad: usize, fill: u8) -> Self {
        let width = src.width() + 2 * pad;
        let height = src.height() + 2 * pad;
        let mut out = Self {
            data: vec![fill; width * height],
            width,
            height,
        };
        for y in 0..src.height() {
            if let Some(row) = src.row(y) {
                let start = (y + pad) * width + pad;
                out.data[start..start + row.len()].copy_from_slice(row);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{ImageView, OwnedImage};
    use crate::util::BghError;

    #[test]
    fn owned_image_rejects_length_mismatch() {
        let err = OwnedImage::from_vec(vec![0u8; 5], 2, 2).unwrap_err();
        assert_eq!(
            err,
            BghError::LengthMismatch {
                width: 2,
                height: 2,
                got: 5
            }
        );
    }

    #[test]
    fn from_view_drops_stride_padding() {
        let data: Vec<u8> = (0..12).collect();
        let view = ImageView::new(&data, 3, 3, 4).unwrap();
        let owned = OwnedImage::from_view(view);
        assert_eq!(owned.data(), &[0, 1, 2, 4, 5, 6, 8, 9, 10]);
    }

    #[test]
    fn padded_places_source_in_the_middle() {
        let data = [7u8; 4];
        let view = ImageView::from_slice(&data, 2, 2).unwrap();
        let padded = OwnedImage::padded(view, 1, 0);
        assert_eq!(padded.width(), 4);
        assert_eq!(padded.row(0).unwrap(), &[0, 0, 0, 0]);
        assert_eq!(padded.row(1).unwrap(), &[0, 7, 7, 0]);
        assert_eq!(padded.row(2).unwrap(), &[0, 7, 7, 0]);
    }

    #[test]
    fn clamped_reads_replicate_border() {
        let data: Vec<u8> = (0..9).collect();
        let view = ImageView::from_slice(&data, 3, 3).unwrap();
        assert_eq!(view.at_clamped(-5, -1), 0);
        assert_eq!(view.at_clamped(4, 1), 5);
        assert_eq!(view.at_clamped(1, 9), 7);
    }
}
