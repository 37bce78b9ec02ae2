//! Tile encoder: pixel blocks to LEM1802 cell and glyph words.
//!
//! A screen cell word is laid out as `ffff bbbb B ccccccc`: foreground palette
//! index, background palette index, blink bit and a 7-bit glyph. Each mode
//! walks its frames block by block in screen order:
//!
//! - **Low-res full** - 1x2 blocks, top pixel as foreground of a half-solid glyph
//! - **High-res full** - 2x4 blocks, one synthesized glyph plus invert flag
//! - **High-res small** - 4x8 blocks, each block becomes its own glyph

mod error;
mod highres;
mod lowres;
mod small;

pub use error::ConvertError;

use crate::font::{CENTER_COLUMNS, CENTER_ROWS, WORDS_PER_GLYPH};
use crate::mode::{ResolutionMode, SCREEN_WORDS};
use crate::palette::{Quantizer, Rgb24};
use crate::source::PixelGrid;

/// Font words per frame in the small high-res mode.
pub const SMALL_FONT_WORDS: usize = (CENTER_COLUMNS * CENTER_ROWS) as usize * WORDS_PER_GLYPH;

/// Pack a cell word from palette indices and a glyph.
pub fn cell_word(foreground: u8, background: u8, glyph: u8) -> u16 {
    ((foreground as u16 & 0xf) << 12) | ((background as u16 & 0xf) << 8) | (glyph as u16 & 0x7f)
}

/// Palette indices used for "on" and "off" pixels of monochrome cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Framing {
    pub on: u8,
    pub off: u8,
}

impl Framing {
    /// White (1) on black (0) with the uploaded monochrome palette.
    pub const MAPPED: Framing = Framing { on: 1, off: 0 };
    /// White (15) on black (0) with the display's default palette.
    pub const LEGACY: Framing = Framing { on: 15, off: 0 };

    /// Cell word for a glyph, swapping colors when inverted.
    pub fn word(&self, glyph: u8, inverted: bool) -> u16 {
        if inverted {
            cell_word(self.off, self.on, glyph)
        } else {
            cell_word(self.on, self.off, glyph)
        }
    }
}

impl Default for Framing {
    fn default() -> Self {
        Self::MAPPED
    }
}

/// One base-size slice of the image.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    grid: &'a PixelGrid,
    index: usize,
    left: u32,
    width: u32,
    height: u32,
}

impl<'a> Frame<'a> {
    /// Frame number, counted from the left.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at column `x`, row `y` from the top of this frame.
    pub fn at(&self, x: u32, y: u32) -> Result<Rgb24, ConvertError> {
        if x >= self.width || y >= self.height {
            return Err(ConvertError::PixelOutOfBounds {
                x: self.left + x,
                y,
            });
        }
        self.grid.at(self.left + x, y)
    }
}

/// Which display table the encoded words belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Screen cell words
    Tiles,
    /// Font glyph words
    Font,
}

/// Encoder output for all frames, concatenated left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFrames {
    pub target: Target,
    pub words: Vec<u16>,
    pub frames: usize,
    pub words_per_frame: usize,
}

impl EncodedFrames {
    /// Words of a single frame.
    pub fn frame(&self, index: usize) -> &[u16] {
        let start = index * self.words_per_frame;
        let end = (start + self.words_per_frame).min(self.words.len());
        &self.words[start.min(end)..end]
    }
}

/// Encodes image blocks for one resolution mode.
#[derive(Debug, Clone, Copy)]
pub struct TileEncoder {
    mode: ResolutionMode,
    quantizer: Quantizer,
    framing: Framing,
}

impl TileEncoder {
    pub fn new(mode: ResolutionMode, quantizer: Quantizer) -> Self {
        Self {
            mode,
            quantizer,
            framing: Framing::default(),
        }
    }

    /// Use different palette indices for monochrome cells.
    pub fn with_framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }

    pub fn mode(&self) -> ResolutionMode {
        self.mode
    }

    pub fn quantizer(&self) -> &Quantizer {
        &self.quantizer
    }

    pub fn framing(&self) -> Framing {
        self.framing
    }

    /// Split the grid into frames, checking it fits this mode.
    pub fn frames<'a>(&self, grid: &'a PixelGrid) -> Result<Vec<Frame<'a>>, ConvertError> {
        let (width, height) = (grid.width(), grid.height());
        let (block_width, block_height) = self.mode.block_size();
        if width % block_width != 0 || height % block_height != 0 {
            return Err(ConvertError::BlockAlignment {
                mode: self.mode,
                width,
                height,
            });
        }

        let (base_width, base_height) = self.mode.base_size();
        if width == 0 || height != base_height || width % base_width != 0 {
            return Err(ConvertError::UnsupportedDimensions { width, height });
        }

        Ok((0..width / base_width)
            .map(|index| Frame {
                grid,
                index: index as usize,
                left: index * base_width,
                width: base_width,
                height: base_height,
            })
            .collect())
    }

    /// Encode every frame of the grid.
    pub fn encode(&self, grid: &PixelGrid) -> Result<EncodedFrames, ConvertError> {
        let frames = self.frames(grid)?;
        let (target, words_per_frame) = match self.mode {
            ResolutionMode::LowResFull | ResolutionMode::HighResFull => (Target::Tiles, SCREEN_WORDS),
            ResolutionMode::HighResSmall => (Target::Font, SMALL_FONT_WORDS),
        };

        let mut words = Vec::with_capacity(frames.len() * words_per_frame);
        for frame in &frames {
            match self.mode {
                ResolutionMode::LowResFull => lowres::encode_frame(frame, &self.quantizer, &mut words)?,
                ResolutionMode::HighResFull => {
                    highres::encode_frame(frame, &self.quantizer, self.framing, &mut words)?
                }
                ResolutionMode::HighResSmall => small::encode_frame(frame, &self.quantizer, &mut words)?,
            }
            log::debug!("Encoded frame {} of {}", frame.index() + 1, frames.len());
        }

        Ok(EncodedFrames {
            target,
            words,
            frames: frames.len(),
            words_per_frame,
        })
    }
}
