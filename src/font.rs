//! Font synthesis for the monochrome and two-color cell encodings.
//!
//! An LEM1802 glyph is 4 columns by 8 rows, stored as two words. Each word
//! holds two columns (high byte first), and bit 0 of a column is its top row.
//!
//! The high-res full mode draws 2x4 logical pixels per cell, so each logical
//! pixel is a 2x2 square and each pair of logical rows is one nibble of a
//! column byte. The four nibble values that fill whole logical rows are the
//! [`INTENSITY_LEVELS`]:
//!
//! ```text
//! 0  = 0b0000  neither row
//! 3  = 0b0011  upper row
//! 12 = 0b1100  lower row
//! 15 = 0b1111  both rows
//! ```

use crate::encode::Framing;
use crate::mode::{ResolutionMode, SCREEN_COLUMNS, SCREEN_ROWS};

/// Nibbles that light whole 2-pixel-tall logical rows.
pub const INTENSITY_LEVELS: [u8; 4] = [0, 3, 12, 15];

/// Glyphs addressable by a 7-bit cell character.
pub const GLYPH_COUNT: usize = 128;

/// Font words per glyph.
pub const WORDS_PER_GLYPH: usize = 2;

/// Glyph 0 of the low-res font: the top four rows of every column are solid.
pub const LOWRES_FONT: [u16; 2] = [0x0f0f, 0x0f0f];

/// Intensity indices for one 4-row column of a 2x4 block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnCode {
    /// Rows 0 and 1 (low nibble of the column byte)
    pub upper: u8,
    /// Rows 2 and 3 (high nibble of the column byte)
    pub lower: u8,
}

/// Quad-bit layout: column pattern (bit `r` set when row `r` is on) to the
/// intensity indices that reproduce it.
pub const QUAD_BIT_TABLE: [ColumnCode; 16] = build_quad_bit_table();

const fn expand_row_pair(bits: u8) -> u8 {
    let mut nibble = 0;
    if bits & 0b01 != 0 {
        nibble |= 0b0011;
    }
    if bits & 0b10 != 0 {
        nibble |= 0b1100;
    }
    nibble
}

const fn level_index(nibble: u8) -> u8 {
    let mut i = 0;
    while i < INTENSITY_LEVELS.len() {
        if INTENSITY_LEVELS[i] == nibble {
            return i as u8;
        }
        i += 1;
    }
    panic!("nibble is not an intensity level");
}

const fn build_quad_bit_table() -> [ColumnCode; 16] {
    let mut table = [ColumnCode { upper: 0, lower: 0 }; 16];
    let mut pattern = 0;
    while pattern < 16 {
        table[pattern] = ColumnCode {
            upper: level_index(expand_row_pair(pattern as u8 & 0b11)),
            lower: level_index(expand_row_pair((pattern as u8 >> 2) & 0b11)),
        };
        pattern += 1;
    }
    table
}

/// Glyph index for the intensity indices of a 2x4 block.
///
/// `i`, `j` are the lower and upper halves of column 0, `k`, `l` those of
/// column 1. `l` only takes 0 or 1 because pixel (1, 1) is always off in a
/// canonical block.
pub fn glyph_index(i: u8, j: u8, k: u8, l: u8) -> u8 {
    32 * i + 8 * j + 2 * k + l
}

/// Glyph and invert flag that draw a 2x4 block.
///
/// `grid[x][y]` is true when the pixel at column `x`, row `y` is on. When pixel
/// (1, 1) is on, the block is complemented and drawn with swapped colors.
pub fn encode_block(grid: [[bool; 4]; 2]) -> (u8, bool) {
    let inverted = grid[1][1];
    let columns = grid.map(|column| {
        let mut pattern = 0usize;
        for (row, &on) in column.iter().enumerate() {
            if on != inverted {
                pattern |= 1 << row;
            }
        }
        QUAD_BIT_TABLE[pattern]
    });

    let glyph = glyph_index(
        columns[0].lower,
        columns[0].upper,
        columns[1].lower,
        columns[1].upper,
    );
    (glyph, inverted)
}

/// The 2x4 block a high-res glyph draws, inverse of [`encode_block`].
///
/// Returns `None` for glyphs outside the 7-bit range.
pub fn decode_block(glyph: u8, inverted: bool) -> Option<[[bool; 4]; 2]> {
    let words = glyph_words(glyph)?;
    let column_bytes = words.map(|word| (word >> 8) as u8);
    let mut grid = [[false; 4]; 2];
    for (x, byte) in column_bytes.iter().enumerate() {
        for y in 0..4 {
            // Logical row y covers physical rows 2y and 2y + 1
            let on = byte & (1 << (2 * y)) != 0;
            grid[x][y] = on != inverted;
        }
    }
    Some(grid)
}

/// The two font words of high-res glyph `32i + 8j + 2k + l`.
///
/// Logical column 0 comes from levels `i` (lower) and `j` (upper), logical
/// column 1 from `k` and `l`. Each logical column fills two physical columns,
/// so each word repeats its byte.
pub fn glyph_words(glyph: u8) -> Option<[u16; 2]> {
    if glyph as usize >= GLYPH_COUNT {
        return None;
    }
    let level = |shift: u8, mask: u8| INTENSITY_LEVELS[((glyph >> shift) & mask) as usize];
    let left = (level(5, 0b11) << 4) | level(3, 0b11);
    let right = (level(1, 0b11) << 4) | level(0, 0b1);
    Some([
        u16::from_be_bytes([left, left]),
        u16::from_be_bytes([right, right]),
    ])
}

/// The 128-glyph high-res font, 256 words, in glyph order.
pub fn synthesize_highres() -> Vec<u16> {
    (0..GLYPH_COUNT as u8)
        .filter_map(glyph_words)
        .flatten()
        .collect()
}

/// Font words a mode needs uploaded before its tiles make sense.
///
/// Returns `None` for [`ResolutionMode::HighResSmall`], whose font is drawn
/// from the image itself by the tile encoder.
pub fn synthesize(mode: ResolutionMode) -> Option<Vec<u16>> {
    match mode {
        ResolutionMode::LowResFull => Some(LOWRES_FONT.to_vec()),
        ResolutionMode::HighResFull => Some(synthesize_highres()),
        ResolutionMode::HighResSmall => None,
    }
}

/// Horizontal blank padding of the small high-res window, in cells.
pub const CENTER_COLUMN_OFFSET: u32 = (SCREEN_COLUMNS - CENTER_COLUMNS) / 2;
/// Vertical blank padding of the small high-res window, in cells.
pub const CENTER_ROW_OFFSET: u32 = (SCREEN_ROWS - CENTER_ROWS) / 2;
/// Width of the small high-res window in cells (64 pixels / 4).
pub const CENTER_COLUMNS: u32 = 16;
/// Height of the small high-res window in cells (64 pixels / 8).
pub const CENTER_ROWS: u32 = 8;

/// Screen layout for the small high-res mode.
///
/// The 16x8 glyph window sits centered on the 32x12 screen, glyph
/// `row * 16 + column` per cell, surrounded by blank `0x0000` cells.
pub fn centered_layout(framing: Framing) -> Vec<u16> {
    let mut words = Vec::with_capacity((SCREEN_COLUMNS * SCREEN_ROWS) as usize);
    for row in 0..SCREEN_ROWS {
        for column in 0..SCREEN_COLUMNS {
            let inside = (CENTER_ROW_OFFSET..CENTER_ROW_OFFSET + CENTER_ROWS).contains(&row)
                && (CENTER_COLUMN_OFFSET..CENTER_COLUMN_OFFSET + CENTER_COLUMNS).contains(&column);
            let word = if inside {
                let glyph = (row - CENTER_ROW_OFFSET) * CENTER_COLUMNS + (column - CENTER_COLUMN_OFFSET);
                framing.word(glyph as u8, false)
            } else {
                0x0000
            };
            words.push(word);
        }
    }
    words
}
