//! Resolution modes and their detection from image dimensions.

use std::fmt;

use crate::encode::ConvertError;

/// LEM1802 screen width in character cells.
pub const SCREEN_COLUMNS: u32 = 32;
/// LEM1802 screen height in character cells.
pub const SCREEN_ROWS: u32 = 12;
/// Words of screen memory per frame.
pub const SCREEN_WORDS: usize = (SCREEN_COLUMNS * SCREEN_ROWS) as usize;

/// How image pixels map onto the 32x12 character screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionMode {
    /// 32x24 color: each cell shows two stacked pixels
    LowResFull,
    /// 64x48 monochrome: each cell shows a 2x4 pixel block
    HighResFull,
    /// 64x64 monochrome: a 16x8 cell window centered on screen, one 4x8 block per cell
    HighResSmall,
}

/// A detected mode together with the number of animation frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub mode: ResolutionMode,
    pub frames: usize,
}

impl ResolutionMode {
    pub const ALL: [ResolutionMode; 3] = [
        ResolutionMode::LowResFull,
        ResolutionMode::HighResFull,
        ResolutionMode::HighResSmall,
    ];

    /// Pixel size of one frame as `(width, height)`.
    pub fn base_size(&self) -> (u32, u32) {
        match self {
            ResolutionMode::LowResFull => (32, 24),
            ResolutionMode::HighResFull => (64, 48),
            ResolutionMode::HighResSmall => (64, 64),
        }
    }

    /// Pixel size of one encoded block as `(width, height)`.
    pub fn block_size(&self) -> (u32, u32) {
        match self {
            ResolutionMode::LowResFull => (1, 2),
            ResolutionMode::HighResFull => (2, 4),
            ResolutionMode::HighResSmall => (4, 8),
        }
    }

    /// Whether pixels are reduced to on/off instead of palette colors.
    pub fn is_monochrome(&self) -> bool {
        !matches!(self, ResolutionMode::LowResFull)
    }

    /// Detect the mode and frame count from image dimensions.
    ///
    /// The height must match a mode exactly. The width must be the mode's base
    /// width or a multiple of it, each multiple being one animation frame.
    pub fn select(width: u32, height: u32) -> Result<Detection, ConvertError> {
        Self::ALL
            .into_iter()
            .find_map(|mode| {
                let (base_width, base_height) = mode.base_size();
                (height == base_height && width > 0 && width % base_width == 0).then(|| Detection {
                    mode,
                    frames: (width / base_width) as usize,
                })
            })
            .ok_or(ConvertError::UnsupportedDimensions { width, height })
    }

    /// Get a human-readable name for the mode.
    pub fn name(&self) -> &'static str {
        match self {
            ResolutionMode::LowResFull => "low-res full color",
            ResolutionMode::HighResFull => "high-res full",
            ResolutionMode::HighResSmall => "high-res small",
        }
    }
}

impl fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.base_size();
        write!(f, "{} ({}x{})", self.name(), width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_single_frames() {
        assert_eq!(
            ResolutionMode::select(32, 24).unwrap(),
            Detection {
                mode: ResolutionMode::LowResFull,
                frames: 1
            }
        );
        assert_eq!(
            ResolutionMode::select(64, 48).unwrap().mode,
            ResolutionMode::HighResFull
        );
        assert_eq!(
            ResolutionMode::select(64, 64).unwrap().mode,
            ResolutionMode::HighResSmall
        );
    }

    #[test]
    fn test_select_animation_frames() {
        assert_eq!(ResolutionMode::select(96, 24).unwrap().frames, 3);
        // 64 wide and 24 high is two low-res frames, not high-res
        let layout = ResolutionMode::select(64, 24).unwrap();
        assert_eq!(layout.mode, ResolutionMode::LowResFull);
        assert_eq!(layout.frames, 2);
        assert_eq!(ResolutionMode::select(256, 64).unwrap().frames, 4);
    }

    #[test]
    fn test_select_rejects_other_sizes() {
        for (w, h) in [(50, 50), (32, 25), (0, 24), (48, 24), (96, 48), (64, 63)] {
            assert!(
                matches!(
                    ResolutionMode::select(w, h),
                    Err(ConvertError::UnsupportedDimensions { width, height }) if width == w && height == h
                ),
                "{}x{} should be rejected",
                w,
                h
            );
        }
    }

    #[test]
    fn test_base_size_is_block_aligned() {
        for mode in ResolutionMode::ALL {
            let (w, h) = mode.base_size();
            let (bw, bh) = mode.block_size();
            assert_eq!(w % bw, 0);
            assert_eq!(h % bh, 0);
        }
    }

    #[test]
    fn test_monochrome_modes() {
        assert!(!ResolutionMode::LowResFull.is_monochrome());
        assert!(ResolutionMode::HighResFull.is_monochrome());
        assert!(ResolutionMode::HighResSmall.is_monochrome());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", ResolutionMode::HighResFull),
            "high-res full (64x48)"
        );
    }
}
