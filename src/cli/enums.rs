//! CLI enum types for palette and layout options.

use clap::ValueEnum;

use crate::convert::PaletteMode;
use crate::program::Layout;

/// Palette source for color images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PaletteChoice {
    /// LEM1802 default colors
    #[default]
    Fixed,
    /// Most frequent colors in the image
    Adaptive,
}

impl From<PaletteChoice> for PaletteMode {
    fn from(p: PaletteChoice) -> Self {
        match p {
            PaletteChoice::Fixed => PaletteMode::Fixed,
            PaletteChoice::Adaptive => PaletteMode::Adaptive,
        }
    }
}

/// Program layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LayoutChoice {
    /// Find the display and map DAT tables with HWI
    #[default]
    Mapped,
    /// Write straight to 0x8000 screen and 0x8180 font memory
    Legacy,
}

impl From<LayoutChoice> for Layout {
    fn from(l: LayoutChoice) -> Self {
        match l {
            LayoutChoice::Mapped => Layout::Mapped,
            LayoutChoice::Legacy => Layout::Legacy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_choice_to_mode() {
        assert_eq!(PaletteMode::from(PaletteChoice::Fixed), PaletteMode::Fixed);
        assert_eq!(PaletteMode::from(PaletteChoice::Adaptive), PaletteMode::Adaptive);
    }

    #[test]
    fn test_layout_choice_to_layout() {
        assert_eq!(Layout::from(LayoutChoice::Mapped), Layout::Mapped);
        assert_eq!(Layout::from(LayoutChoice::Legacy), Layout::Legacy);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(PaletteChoice::default(), PaletteChoice::Fixed);
        assert_eq!(LayoutChoice::default(), LayoutChoice::Mapped);
    }
}
