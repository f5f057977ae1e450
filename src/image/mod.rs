//! Interleaved 8-bit image buffers.
//!
//! Pixels are stored row-major with `channels` contiguous samples per pixel,
//! so the sample for `(row, col, ch)` lives at
//! `(row * width + col) * channels + ch`. `ImageView` borrows such a buffer;
//! `Image` owns one and is what the warp and blend engines produce.

use crate::util::{MorphError, MorphResult};
use std::fmt;

#[cfg(feature = "image-io")]
pub mod io;

/// Largest supported channel count.
pub const MAX_CHANNELS: usize = 4;

/// Width, height and channel count of an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageShape {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
}

impl ImageShape {
    /// Total number of samples (`width * height * channels`).
    pub fn len(&self) -> usize {
        self.width * self.height * self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for ImageShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.channels)
    }
}

/// Borrowed view of an interleaved image buffer.
#[derive(Copy, Clone)]
pub struct ImageView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    channels: usize,
}

impl<'a> ImageView<'a> {
    /// Creates a view over a contiguous buffer of exactly
    /// `width * height * channels` samples.
    pub fn from_slice(
        data: &'a [u8],
        width: usize,
        height: usize,
        channels: usize,
    ) -> MorphResult<Self> {
        let expected = required_len(width, height, channels)?;
        if data.len() != expected {
            return Err(MorphError::BufferSizeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Samples per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn shape(&self) -> ImageShape {
        ImageShape {
            width: self.width,
            height: self.height,
            channels: self.channels,
        }
    }

    /// Returns the backing slice.
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the samples of pixel `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= height` or `col >= width`.
    #[inline]
    pub fn pixel(&self, row: usize, col: usize) -> &'a [u8] {
        assert!(
            row < self.height && col < self.width,
            "pixel ({row}, {col}) outside {}x{} image",
            self.width,
            self.height
        );
        let start = (row * self.width + col) * self.channels;
        &self.data[start..start + self.channels]
    }

    /// Returns the pixel at `(row, col)` if it is within bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&'a [u8]> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let start = (row * self.width + col) * self.channels;
        self.data.get(start..start + self.channels)
    }

    /// Returns all samples of row `row`.
    pub fn row(&self, row: usize) -> Option<&'a [u8]> {
        if row >= self.height {
            return None;
        }
        let row_len = self.width * self.channels;
        let start = row * row_len;
        self.data.get(start..start + row_len)
    }

    /// Copies the view into an owned image.
    pub fn to_image(&self) -> Image {
        Image {
            data: self.data.to_vec(),
            width: self.width,
            height: self.height,
            channels: self.channels,
        }
    }
}

/// Owned interleaved image buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    data: Vec<u8>,
    width: usize,
    height: usize,
    channels: usize,
}

impl Image {
    /// Wraps a buffer of exactly `width * height * channels` samples.
    pub fn new(data: Vec<u8>, width: usize, height: usize, channels: usize) -> MorphResult<Self> {
        let expected = required_len(width, height, channels)?;
        if data.len() != expected {
            return Err(MorphError::BufferSizeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Allocates a zero-filled image.
    pub fn zeros(width: usize, height: usize, channels: usize) -> MorphResult<Self> {
        let len = required_len(width, height, channels)?;
        Ok(Self {
            data: vec![0; len],
            width,
            height,
            channels,
        })
    }

    /// Builds an image by evaluating `f(row, col, channel)` for every sample.
    pub fn from_fn<F>(width: usize, height: usize, channels: usize, mut f: F) -> MorphResult<Self>
    where
        F: FnMut(usize, usize, usize) -> u8,
    {
        let len = required_len(width, height, channels)?;
        let mut data = Vec::with_capacity(len);
        for row in 0..height {
            for col in 0..width {
                for ch in 0..channels {
                    data.push(f(row, col, ch));
                }
            }
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    pub(crate) fn zeros_like(shape: ImageShape) -> Self {
        Self {
            data: vec![0; shape.len()],
            width: shape.width,
            height: shape.height,
            channels: shape.channels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn shape(&self) -> ImageShape {
        ImageShape {
            width: self.width,
            height: self.height,
            channels: self.channels,
        }
    }

    /// Returns `true` when width, height and channel count match.
    pub fn has_same_dims_as(&self, other: &Image) -> bool {
        self.shape() == other.shape()
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            channels: self.channels,
        }
    }

    /// Returns the samples of pixel `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= height` or `col >= width`.
    pub fn pixel(&self, row: usize, col: usize) -> &[u8] {
        self.view().pixel(row, col)
    }

    /// Mutable samples of pixel `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= height` or `col >= width`.
    pub fn pixel_mut(&mut self, row: usize, col: usize) -> &mut [u8] {
        assert!(
            row < self.height && col < self.width,
            "pixel ({row}, {col}) outside {}x{} image",
            self.width,
            self.height
        );
        let start = (row * self.width + col) * self.channels;
        &mut self.data[start..start + self.channels]
    }

    pub fn row(&self, row: usize) -> Option<&[u8]> {
        self.view().row(row)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the image and returns its samples.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

fn required_len(width: usize, height: usize, channels: usize) -> MorphResult<usize> {
    if width == 0 || height == 0 {
        return Err(MorphError::InvalidDimensions { width, height });
    }
    if channels == 0 || channels > MAX_CHANNELS {
        return Err(MorphError::InvalidChannels { channels });
    }
    width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(channels))
        .ok_or(MorphError::InvalidDimensions { width, height })
}
