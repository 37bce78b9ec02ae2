//! Color types and palettes for the LEM1802 display.
//!
//! The display shows 16 colors at a time, each stored as a 12-bit `0x0RGB`
//! word. Source pixels are 24-bit and get mapped onto a palette by one of the
//! [`Quantizer`] strategies:
//!
//! 1. **Reference** - the fixed hardware colors in [`REFERENCE_PALETTE`]
//! 2. **Derived** - the most frequent colors of the image, see [`PaletteBuilder`]
//! 3. **Monochrome** - an on/off threshold against [`MONOCHROME_PALETTE`]

mod builder;
mod quantize;

pub use builder::{PaletteBuilder, RankedColor, HISTOGRAM_SIZE};
pub use quantize::{distance, nearest, Quantizer};

use std::fmt;

/// Number of entries in every palette.
pub const PALETTE_SIZE: usize = 16;

/// A 24-bit RGB sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb24 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb24 {
    pub const BLACK: Rgb24 = Rgb24::new(0, 0, 0);
    pub const WHITE: Rgb24 = Rgb24::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Round each channel to 4 bits.
    ///
    /// Uses `min((v + 8) / 16, 15)`, so values from 248 up all land on 15.
    pub fn to_color12(self) -> Color12 {
        fn round(v: u8) -> u8 {
            ((v as u16 + 8) / 16).min(15) as u8
        }
        Color12::new(round(self.r), round(self.g), round(self.b))
    }
}

impl From<[u8; 3]> for Rgb24 {
    fn from(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

/// A 4-bit-per-channel color as stored in LEM1802 palette memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Color12(u16);

impl Color12 {
    pub const BLACK: Color12 = Color12(0x000);
    pub const WHITE: Color12 = Color12(0xfff);

    /// Build from three nibbles. Bits above the low four are dropped.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self((((r & 0xf) as u16) << 8) | (((g & 0xf) as u16) << 4) | ((b & 0xf) as u16))
    }

    /// Build from a packed `0x0RGB` code.
    pub const fn from_code(code: u16) -> Self {
        Self(code & 0x0fff)
    }

    /// Packed `0x0RGB` code, also the palette word written to the display.
    pub const fn code(self) -> u16 {
        self.0
    }

    pub const fn r(self) -> u8 {
        ((self.0 >> 8) & 0xf) as u8
    }

    pub const fn g(self) -> u8 {
        ((self.0 >> 4) & 0xf) as u8
    }

    pub const fn b(self) -> u8 {
        (self.0 & 0xf) as u8
    }

    /// Widen to 8 bits per channel (`0xa` becomes `0xaa`).
    pub const fn to_rgb24(self) -> Rgb24 {
        Rgb24::new(self.r() * 17, self.g() * 17, self.b() * 17)
    }
}

impl fmt::Display for Color12 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:03x}", self.0)
    }
}

/// Sixteen palette entries, of which the first `len` are in use.
///
/// Entries past `len` are zero-filled and never chosen by the quantizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    entries: [Color12; PALETTE_SIZE],
    len: usize,
}

impl Palette {
    /// Build a palette from up to 16 colors. Missing entries are zero-filled.
    ///
    /// An empty slice yields a single black entry so that every palette has
    /// something to match against.
    pub fn new(colors: &[Color12]) -> Self {
        let mut entries = [Color12::BLACK; PALETTE_SIZE];
        let len = colors.len().clamp(1, PALETTE_SIZE);
        for (slot, color) in entries.iter_mut().zip(colors) {
            *slot = *color;
        }
        Self { entries, len }
    }

    /// All 16 entries, including zero-filled ones.
    pub fn entries(&self) -> &[Color12; PALETTE_SIZE] {
        &self.entries
    }

    /// Entries a pixel may be mapped to.
    pub fn active(&self) -> &[Color12] {
        &self.entries[..self.len]
    }

    /// Number of entries in use, always between 1 and 16.
    pub fn used(&self) -> usize {
        self.len
    }

    pub fn get(&self, index: usize) -> Option<Color12> {
        self.active().get(index).copied()
    }

    /// Palette words in display order.
    pub fn words(&self) -> Vec<u16> {
        self.entries.iter().map(|c| c.code()).collect()
    }
}

/// The LEM1802 default colors.
pub const REFERENCE_PALETTE: Palette = Palette {
    entries: [
        Color12::from_code(0x000),
        Color12::from_code(0x00a),
        Color12::from_code(0x0a0),
        Color12::from_code(0x0aa),
        Color12::from_code(0xa00),
        Color12::from_code(0xa0a),
        Color12::from_code(0xa50),
        Color12::from_code(0xaaa),
        Color12::from_code(0x555),
        Color12::from_code(0x55f),
        Color12::from_code(0x5f5),
        Color12::from_code(0x5ff),
        Color12::from_code(0xf55),
        Color12::from_code(0xf5f),
        Color12::from_code(0xff5),
        Color12::from_code(0xfff),
    ],
    len: PALETTE_SIZE,
};

/// Black at index 0, white at index 1.
pub const MONOCHROME_PALETTE: Palette = Palette {
    entries: [
        Color12::BLACK,
        Color12::WHITE,
        Color12::BLACK,
        Color12::BLACK,
        Color12::BLACK,
        Color12::BLACK,
        Color12::BLACK,
        Color12::BLACK,
        Color12::BLACK,
        Color12::BLACK,
        Color12::BLACK,
        Color12::BLACK,
        Color12::BLACK,
        Color12::BLACK,
        Color12::BLACK,
        Color12::BLACK,
    ],
    len: 2,
};
