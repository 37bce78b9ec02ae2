//! Adaptive palette selection by color frequency.
//!
//! Every pixel is rounded to its 12-bit color, counted in a 4096-slot
//! histogram, and the most frequent colors become the palette. Index 0 is the
//! most frequent color.

use super::{Color12, Palette, PALETTE_SIZE};
use crate::source::PixelGrid;

/// Number of distinct 12-bit colors.
pub const HISTOGRAM_SIZE: usize = 4096;

/// A palette slot together with the number of pixels that rounded to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RankedColor {
    pub color: Color12,
    pub count: u32,
}

/// Builds a palette from the most frequent colors of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteBuilder {
    colors: usize,
}

impl Default for PaletteBuilder {
    fn default() -> Self {
        Self {
            colors: PALETTE_SIZE,
        }
    }
}

impl PaletteBuilder {
    /// Builder keeping at most `colors` entries (clamped to 1..=16).
    pub fn with_colors(colors: usize) -> Self {
        Self {
            colors: colors.clamp(1, PALETTE_SIZE),
        }
    }

    /// Number of palette entries this builder selects.
    pub fn colors(&self) -> usize {
        self.colors
    }

    /// Count pixels per 12-bit color.
    pub fn histogram(grid: &PixelGrid) -> Vec<u32> {
        let mut counts = vec![0u32; HISTOGRAM_SIZE];
        for pixel in grid.pixels() {
            counts[pixel.to_color12().code() as usize] += 1;
        }
        counts
    }

    /// The most frequent colors in descending order of count.
    ///
    /// Always returns exactly `colors` slots. Slots that were never filled keep
    /// a zero count and black color.
    pub fn ranking(&self, grid: &PixelGrid) -> Vec<RankedColor> {
        let histogram = Self::histogram(grid);
        let mut top = vec![RankedColor::default(); self.colors];

        for (code, &count) in histogram.iter().enumerate() {
            // Strict comparison keeps the earlier (lower) code on ties
            if count <= top[self.colors - 1].count {
                continue;
            }
            let position = top
                .iter()
                .position(|slot| count > slot.count)
                .unwrap_or(self.colors - 1);
            top.pop();
            top.insert(
                position,
                RankedColor {
                    color: Color12::from_code(code as u16),
                    count,
                },
            );
        }

        top
    }

    /// Build the palette. Unfilled slots stay zero and are not in use.
    pub fn build(&self, grid: &PixelGrid) -> Palette {
        let colors: Vec<Color12> = self
            .ranking(grid)
            .into_iter()
            .take_while(|slot| slot.count > 0)
            .map(|slot| slot.color)
            .collect();
        let palette = Palette::new(&colors);
        log::debug!(
            "Derived palette with {} of {} colors",
            palette.used(),
            self.colors
        );
        palette
    }
}
