//! RGBA8 image buffer.
//!
//! Every image slidefx touches (source, destination, display) uses the
//! same layout: 8 bits per channel, four interleaved channels, row-major,
//! top-to-bottom.
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A ...]  <- Row 1
//!         ...
//! ```
//!
//! # Usage
//!
//! ```rust
//! use slidefx_core::Image;
//!
//! let mut img = Image::new(64, 32);
//! img.set_pixel(10, 5, [255, 128, 0, 255]).unwrap();
//! assert_eq!(img.pixel(10, 5).unwrap(), [255, 128, 0, 255]);
//! ```

use crate::{Error, Result};

/// Channels per pixel.
pub const CHANNELS: u32 = 4;

/// Owned RGBA8 image buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Image {
    /// Creates a new image filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * CHANNELS as usize;
        Self {
            data: vec![0; len],
            width,
            height,
        }
    }

    /// Creates an image filled with one pixel value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * CHANNELS as usize);
        for _ in 0..count {
            data.extend_from_slice(&rgba);
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Creates an image from interleaved RGBA8 data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` is not
    /// `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS as usize;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// `true` if the image has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Size of the pixel buffer in bytes.
    #[inline]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` when both images have the same width and height.
    #[inline]
    pub fn same_dimensions(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Raw pixel data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw pixel data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        Ok((y as usize * self.width as usize + x as usize) * CHANNELS as usize)
    }

    /// Reads the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Result<[u8; 4]> {
        let i = self.offset(x, y)?;
        Ok([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Writes the pixel at `(x, y)`.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> Result<()> {
        let i = self.offset(x, y)?;
        self.data[i..i + 4].copy_from_slice(&rgba);
        Ok(())
    }

    /// Overwrites this image's pixels with `other`'s.
    ///
    /// Both images must have the same dimensions; the buffer is reused.
    pub fn copy_from(&mut self, other: &Self) -> Result<()> {
        if !self.same_dimensions(other) {
            return Err(Error::dimension_mismatch(
                self.dimensions(),
                other.dimensions(),
            ));
        }
        self.data.copy_from_slice(&other.data);
        Ok(())
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("size_bytes", &self.size_bytes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let img = Image::new(4, 3);
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.size_bytes(), 4 * 3 * 4);
        assert!(img.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_from_rgba8_rejects_wrong_length() {
        let err = Image::from_rgba8(2, 2, vec![0; 15]).unwrap_err();
        assert!(err.is_dimension_error());
    }

    #[test]
    fn test_pixel_access() {
        let mut img = Image::filled(3, 3, [1, 2, 3, 4]);
        assert_eq!(img.pixel(2, 2).unwrap(), [1, 2, 3, 4]);
        img.set_pixel(1, 0, [9, 9, 9, 9]).unwrap();
        assert_eq!(img.pixel(1, 0).unwrap(), [9, 9, 9, 9]);
        assert!(img.pixel(3, 0).is_err());
    }

    #[test]
    fn test_copy_from_requires_same_size() {
        let src = Image::filled(2, 2, [7, 7, 7, 255]);
        let mut dst = Image::new(2, 2);
        dst.copy_from(&src).unwrap();
        assert_eq!(dst, src);

        let mut other = Image::new(3, 2);
        assert!(other.copy_from(&src).is_err());
    }
}
