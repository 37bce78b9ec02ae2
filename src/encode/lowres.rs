//! Low-res full color: two stacked pixels per cell.

use super::{cell_word, ConvertError, Frame};
use crate::palette::Quantizer;

/// Glyph whose upper half is solid; see [`crate::font::LOWRES_FONT`].
pub const HALF_BLOCK_GLYPH: u8 = 0;

/// Encode one frame, row pairs from the top, columns left to right.
///
/// The top pixel becomes the foreground (upper half of the glyph) and the
/// bottom pixel the background, so the color byte reads `top << 4 | bottom`.
pub(super) fn encode_frame(
    frame: &Frame<'_>,
    quantizer: &Quantizer,
    out: &mut Vec<u16>,
) -> Result<(), ConvertError> {
    for y in (0..frame.height()).step_by(2) {
        for x in 0..frame.width() {
            let top = quantizer.index(frame.at(x, y)?);
            let bottom = quantizer.index(frame.at(x, y + 1)?);
            out.push(cell_word(top, bottom, HALF_BLOCK_GLYPH));
        }
    }
    Ok(())
}
