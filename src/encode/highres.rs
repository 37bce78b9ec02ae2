//! High-res full: one 2x4 pixel block per cell, drawn with a synthesized glyph.

use super::{ConvertError, Frame, Framing};
use crate::font::encode_block;
use crate::palette::Quantizer;

/// Encode one frame, block rows from the top, block columns left to right.
pub(super) fn encode_frame(
    frame: &Frame<'_>,
    quantizer: &Quantizer,
    framing: Framing,
    out: &mut Vec<u16>,
) -> Result<(), ConvertError> {
    for top in (0..frame.height()).step_by(4) {
        for left in (0..frame.width()).step_by(2) {
            let mut grid = [[false; 4]; 2];
            for (dx, column) in grid.iter_mut().enumerate() {
                for (dy, pixel) in column.iter_mut().enumerate() {
                    let sample = frame.at(left + dx as u32, top + dy as u32)?;
                    *pixel = quantizer.index(sample) != 0;
                }
            }
            let (glyph, inverted) = encode_block(grid);
            out.push(framing.word(glyph, inverted));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::encode::{Framing, TileEncoder};
    use crate::mode::ResolutionMode;
    use crate::palette::{Quantizer, Rgb24};
    use crate::source::PixelGrid;

    fn encode(grid: &PixelGrid) -> Vec<u16> {
        TileEncoder::new(ResolutionMode::HighResFull, Quantizer::Monochrome)
            .encode(grid)
            .unwrap()
            .words
    }

    #[test]
    fn test_black_image_is_glyph_zero() {
        let words = encode(&PixelGrid::filled(64, 48, Rgb24::BLACK));
        assert_eq!(words.len(), 384);
        assert!(words.iter().all(|&w| w == 0x1000));
    }

    #[test]
    fn test_white_image_is_inverted_glyph_zero() {
        let words = encode(&PixelGrid::filled(64, 48, Rgb24::WHITE));
        assert!(words.iter().all(|&w| w == 0x0100));
    }

    #[test]
    fn test_single_pixels() {
        let mut grid = PixelGrid::filled(64, 48, Rgb24::BLACK);
        // Block 0: top-left pixel, j = 1
        grid.set(0, 0, Rgb24::WHITE).unwrap();
        // Block 1: bottom pixel of the left column, i = 2
        grid.set(2, 3, Rgb24::WHITE).unwrap();
        // Block 2: top pixel of the right column, l = 1
        grid.set(5, 0, Rgb24::WHITE).unwrap();
        // Block 32 (second block row): pixel (1, 1) inverts everything else
        grid.set(1, 5, Rgb24::WHITE).unwrap();

        let words = encode(&grid);
        assert_eq!(words[0], 0x1008);
        assert_eq!(words[1], 0x1040);
        assert_eq!(words[2], 0x1001);
        assert_eq!(words[32], 0x017f);
    }

    #[test]
    fn test_legacy_framing() {
        let words = TileEncoder::new(ResolutionMode::HighResFull, Quantizer::Monochrome)
            .with_framing(Framing::LEGACY)
            .encode(&PixelGrid::filled(64, 48, Rgb24::BLACK))
            .unwrap()
            .words;
        assert!(words.iter().all(|&w| w == 0xf000));
    }
}
