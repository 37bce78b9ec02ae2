//! Pixel source: decoded images as bottom-up RGB grids.
//!
//! Bitmaps store their bottom scanline first, and all index arithmetic in the
//! encoder follows that order. Images decoded by the `image` crate come out
//! top-down, so [`load`] flips them on the way in.

use std::path::Path;

use crate::encode::ConvertError;
use crate::error::AppError;
use crate::palette::Rgb24;

/// A `width × height` grid of RGB samples, row 0 being the bottom scanline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Rgb24>,
}

impl PixelGrid {
    /// Wrap a buffer already in bottom-up order.
    ///
    /// Fails when the buffer holds fewer than `width * height` samples. Extra
    /// trailing samples are dropped.
    pub fn from_bottom_up(width: u32, height: u32, mut pixels: Vec<Rgb24>) -> Result<Self, ConvertError> {
        let expected = width as usize * height as usize;
        if pixels.len() < expected {
            return Err(ConvertError::MalformedPixelSource {
                expected,
                actual: pixels.len(),
            });
        }
        pixels.truncate(expected);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap a buffer in top-down order (row 0 is the top scanline).
    pub fn from_top_down(width: u32, height: u32, pixels: Vec<Rgb24>) -> Result<Self, ConvertError> {
        let expected = width as usize * height as usize;
        if pixels.len() < expected || width == 0 {
            return PixelGrid::from_bottom_up(width, height, pixels);
        }
        let flipped = pixels[..expected]
            .chunks_exact(width as usize)
            .rev()
            .flatten()
            .copied()
            .collect();
        PixelGrid::from_bottom_up(width, height, flipped)
    }

    /// A grid filled with one color.
    pub fn filled(width: u32, height: u32, color: Rgb24) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// All samples in storage (bottom-up) order.
    pub fn pixels(&self) -> &[Rgb24] {
        &self.pixels
    }

    /// Storage index of the pixel at column `x`, row `y` counted from the top.
    pub fn index_of(&self, x: u32, y: u32) -> Result<usize, ConvertError> {
        if x >= self.width || y >= self.height {
            return Err(ConvertError::PixelOutOfBounds { x, y });
        }
        Ok(self.width as usize * (self.height - 1 - y) as usize + x as usize)
    }

    /// Pixel at column `x`, row `y` counted from the top.
    pub fn at(&self, x: u32, y: u32) -> Result<Rgb24, ConvertError> {
        let index = self.index_of(x, y)?;
        self.pixels
            .get(index)
            .copied()
            .ok_or(ConvertError::PixelOutOfBounds { x, y })
    }

    /// Set the pixel at column `x`, row `y` counted from the top.
    ///
    /// Only used while assembling a grid; conversion never mutates its input.
    pub fn set(&mut self, x: u32, y: u32, color: Rgb24) -> Result<(), ConvertError> {
        let index = self.index_of(x, y)?;
        self.pixels[index] = color;
        Ok(())
    }
}

/// Decode an image file (BMP or PNG) into a [`PixelGrid`].
pub fn load(path: &Path) -> Result<PixelGrid, AppError> {
    let image = image::open(path)
        .map_err(|source| AppError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgb8();
    let (width, height) = image.dimensions();
    log::info!("Loaded {} ({}x{})", path.display(), width, height);

    let pixels = image.pixels().map(|p| Rgb24::from(p.0)).collect();
    Ok(PixelGrid::from_top_down(width, height, pixels)?)
}
