//! Nearest-color search and the per-mode quantization strategies.

use super::{Palette, Rgb24, MONOCHROME_PALETTE, REFERENCE_PALETTE};

/// Manhattan distance between two colors in 8-bit RGB space.
pub fn distance(a: Rgb24, b: Rgb24) -> u32 {
    a.r.abs_diff(b.r) as u32 + a.g.abs_diff(b.g) as u32 + a.b.abs_diff(b.b) as u32
}

/// Index of the palette entry closest to `sample`.
///
/// Only entries in use are searched. The first strict minimum wins, so equal
/// distances resolve to the lowest index.
pub fn nearest(sample: Rgb24, palette: &Palette) -> u8 {
    let mut best = 0usize;
    let mut best_distance = u32::MAX;

    for (index, entry) in palette.active().iter().enumerate() {
        let d = distance(sample, entry.to_rgb24());
        if d < best_distance {
            best_distance = d;
            best = index;
        }
    }

    best as u8
}

/// How source pixels are reduced to palette indices for one conversion.
///
/// Chosen once from the resolution mode and the palette option, then passed
/// into the tile encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantizer {
    /// Nearest match against the fixed hardware colors
    Reference,
    /// Nearest match against a palette derived from the image
    Derived(Palette),
    /// On/off classification: any non-black 12-bit color is on
    Monochrome,
}

impl Quantizer {
    /// Palette index for one pixel.
    ///
    /// For [`Quantizer::Monochrome`] this is 1 for an "on" pixel and 0 otherwise.
    pub fn index(&self, sample: Rgb24) -> u8 {
        match self {
            Quantizer::Reference => nearest(sample, &REFERENCE_PALETTE),
            Quantizer::Derived(palette) => nearest(sample, palette),
            Quantizer::Monochrome => Self::is_on(sample) as u8,
        }
    }

    /// Monochrome threshold on the rounded 12-bit color.
    pub fn is_on(sample: Rgb24) -> bool {
        sample.to_color12().code() != 0
    }

    /// Palette the indices refer to, as uploaded to the display.
    pub fn palette(&self) -> Palette {
        match self {
            Quantizer::Reference => REFERENCE_PALETTE,
            Quantizer::Derived(palette) => *palette,
            Quantizer::Monochrome => MONOCHROME_PALETTE,
        }
    }

    /// Get a human-readable name for the strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Quantizer::Reference => "reference",
            Quantizer::Derived(_) => "derived",
            Quantizer::Monochrome => "monochrome",
        }
    }
}
