//! High-res small: every 4x8 block of the image becomes its own glyph.

use super::{ConvertError, Frame};
use crate::palette::Quantizer;

/// Bit set in a column byte for each row of the block.
const ROW_WEIGHTS: [u8; 8] = [1, 2, 4, 8, 16, 32, 64, 128];

/// Encode one frame into 128 glyphs (256 font words), one per block.
///
/// Glyphs are numbered row-major over the 16x8 block grid, matching
/// [`crate::font::centered_layout`].
pub(super) fn encode_frame(
    frame: &Frame<'_>,
    quantizer: &Quantizer,
    out: &mut Vec<u16>,
) -> Result<(), ConvertError> {
    for top in (0..frame.height()).step_by(8) {
        for left in (0..frame.width()).step_by(4) {
            let mut columns = [0u8; 4];
            for (dx, byte) in columns.iter_mut().enumerate() {
                for (dy, weight) in ROW_WEIGHTS.iter().enumerate() {
                    let sample = frame.at(left + dx as u32, top + dy as u32)?;
                    if quantizer.index(sample) != 0 {
                        *byte |= weight;
                    }
                }
            }
            out.push(u16::from_be_bytes([columns[0], columns[1]]));
            out.push(u16::from_be_bytes([columns[2], columns[3]]));
        }
    }
    Ok(())
}
