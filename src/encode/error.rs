//! Error types for image conversion.

use crate::mode::ResolutionMode;

/// Errors that abort a conversion. No output is produced after any of these.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Image size matches none of the resolution modes
    #[error(
        "Unsupported image size {width}x{height}. Expected 32x24 (color), 64x48 or 64x64 (monochrome), \
         or a multiple of that width for animations"
    )]
    UnsupportedDimensions { width: u32, height: u32 },

    /// Pixel buffer is shorter than width * height
    #[error("Pixel buffer holds {actual} samples, expected {expected}")]
    MalformedPixelSource { expected: usize, actual: usize },

    /// Image size is not a whole number of encoder blocks
    #[error("Image size {width}x{height} is not a multiple of the {mode} block size")]
    BlockAlignment {
        mode: ResolutionMode,
        width: u32,
        height: u32,
    },

    /// A block read a pixel outside the grid
    #[error("Pixel ({x}, {y}) is outside the image")]
    PixelOutOfBounds { x: u32, y: u32 },

    /// The legacy layout writes one static screen
    #[error("Legacy layout cannot animate {frames} frames; use the mapped layout")]
    LegacyAnimation { frames: usize },

    /// Adaptive palettes hold 4 or 16 colors
    #[error("Unsupported palette size {0}; use 4 or 16 colors")]
    InvalidColorCount(usize),

    /// A zero busy-wait count would spin through 65536 iterations
    #[error("Frame delay must be between 1 and 65535, got {0}")]
    InvalidDelay(u16),

    /// Data tables do not fit in DCPU-16 memory next to the program code
    #[error("{frames} frames need {words} data words; at most {limit} fit in memory")]
    ProgramTooLarge {
        frames: usize,
        words: usize,
        limit: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConvertError::UnsupportedDimensions {
            width: 50,
            height: 50,
        };
        assert!(err.to_string().starts_with("Unsupported image size 50x50."));

        let err = ConvertError::MalformedPixelSource {
            expected: 768,
            actual: 10,
        };
        assert_eq!(err.to_string(), "Pixel buffer holds 10 samples, expected 768");

        let err = ConvertError::BlockAlignment {
            mode: ResolutionMode::HighResFull,
            width: 65,
            height: 48,
        };
        assert_eq!(
            err.to_string(),
            "Image size 65x48 is not a multiple of the high-res full (64x48) block size"
        );

        assert_eq!(
            ConvertError::InvalidColorCount(8).to_string(),
            "Unsupported palette size 8; use 4 or 16 colors"
        );

        assert_eq!(
            ConvertError::InvalidDelay(0).to_string(),
            "Frame delay must be between 1 and 65535, got 0"
        );
    }
}
