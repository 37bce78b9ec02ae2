//! The conversion pipeline: pixel grid in, assembled program out.

use serde::Deserialize;

use crate::encode::{ConvertError, Framing, Target, TileEncoder};
use crate::font;
use crate::mode::{Detection, ResolutionMode};
use crate::palette::{PaletteBuilder, Quantizer};
use crate::program::asm::MAX_DATA_WORDS;
use crate::program::{EmitOptions, Layout, Program, ProgramEmitter, Tables};
use crate::source::PixelGrid;

/// Where low-res colors come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteMode {
    /// The LEM1802 default palette
    #[default]
    Fixed,
    /// The most frequent colors of the image
    Adaptive,
}

/// Adaptive palette sizes the builder accepts.
pub const SUPPORTED_COLOR_COUNTS: [usize; 2] = [4, 16];

/// Settings for one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    pub palette: PaletteMode,
    /// Adaptive palette size
    pub colors: usize,
    pub emit: EmitOptions,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            palette: PaletteMode::Fixed,
            colors: 16,
            emit: EmitOptions::default(),
        }
    }
}

impl ConvertOptions {
    /// Reject settings no conversion could honor.
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.palette == PaletteMode::Adaptive && !SUPPORTED_COLOR_COUNTS.contains(&self.colors) {
            return Err(ConvertError::InvalidColorCount(self.colors));
        }
        if self.emit.delay == 0 {
            return Err(ConvertError::InvalidDelay(self.emit.delay));
        }
        Ok(())
    }

    fn framing(&self) -> Framing {
        match self.emit.layout {
            Layout::Mapped => Framing::MAPPED,
            Layout::Legacy => Framing::LEGACY,
        }
    }
}

/// Detect the resolution mode and frame count of a grid.
pub fn detect(grid: &PixelGrid) -> Result<Detection, ConvertError> {
    ResolutionMode::select(grid.width(), grid.height())
}

/// Pick the quantization strategy for a mode.
///
/// Monochrome modes ignore the palette setting. The legacy layout cannot
/// upload a palette, so it falls back to the fixed colors.
pub fn choose_quantizer(
    mode: ResolutionMode,
    grid: &PixelGrid,
    options: &ConvertOptions,
) -> Quantizer {
    if mode.is_monochrome() {
        return Quantizer::Monochrome;
    }
    match (options.palette, options.emit.layout) {
        (PaletteMode::Fixed, _) => Quantizer::Reference,
        (PaletteMode::Adaptive, Layout::Legacy) => {
            log::warn!("Legacy layout cannot upload a palette; using the fixed colors");
            Quantizer::Reference
        }
        (PaletteMode::Adaptive, Layout::Mapped) => {
            Quantizer::Derived(PaletteBuilder::with_colors(options.colors).build(grid))
        }
    }
}

/// Run every encoding stage and collect the tables the emitter needs.
pub fn build_tables(grid: &PixelGrid, options: &ConvertOptions) -> Result<Tables, ConvertError> {
    options.validate()?;
    let Detection { mode, frames } = detect(grid)?;
    log::info!("Detected {} with {} frame(s)", mode, frames);

    if options.emit.layout == Layout::Legacy && frames > 1 {
        return Err(ConvertError::LegacyAnimation { frames });
    }

    let quantizer = choose_quantizer(mode, grid, options);
    let palette = quantizer.palette();
    log::info!(
        "Using {} palette with {} colors",
        quantizer.name(),
        palette.used()
    );

    let framing = options.framing();
    let encoded = TileEncoder::new(mode, quantizer)
        .with_framing(framing)
        .encode(grid)?;

    let (font, tiles) = match encoded.target {
        Target::Tiles => (font::synthesize(mode).unwrap_or_default(), encoded.words),
        Target::Font => (encoded.words, font::centered_layout(framing)),
    };

    // Font, 16 palette words, tiles, exit flag and display handle
    let words = font.len() + palette.words().len() + tiles.len() + 2;
    if words > MAX_DATA_WORDS {
        return Err(ConvertError::ProgramTooLarge {
            frames: encoded.frames,
            words,
            limit: MAX_DATA_WORDS,
        });
    }

    Ok(Tables {
        mode,
        source_size: (grid.width(), grid.height()),
        frames: encoded.frames,
        font,
        palette,
        tiles,
        animated: encoded.target,
        words_per_frame: encoded.words_per_frame,
        quantizer: quantizer.name(),
    })
}

/// Convert a pixel grid into a complete program.
///
/// Nothing is written here; the caller renders the returned program once
/// every stage has succeeded.
pub fn convert(grid: &PixelGrid, options: &ConvertOptions) -> Result<Program, ConvertError> {
    let tables = build_tables(grid, options)?;
    ProgramEmitter::new(options.emit).emit(&tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::SCREEN_WORDS;
    use crate::palette::{Rgb24, MONOCHROME_PALETTE, REFERENCE_PALETTE};

    fn adaptive(colors: usize) -> ConvertOptions {
        ConvertOptions {
            palette: PaletteMode::Adaptive,
            colors,
            ..Default::default()
        }
    }

    #[test]
    fn test_invalid_color_count() {
        let grid = PixelGrid::filled(32, 24, Rgb24::WHITE);
        assert!(matches!(
            convert(&grid, &adaptive(8)),
            Err(ConvertError::InvalidColorCount(8))
        ));
        // Fixed palettes ignore the count
        let options = ConvertOptions {
            colors: 8,
            ..Default::default()
        };
        assert!(convert(&grid, &options).is_ok());
    }

    #[test]
    fn test_zero_delay_from_config_rejected() {
        let config: crate::config::Config = toml::from_str("[animation]\ndelay = 0").unwrap();
        let options = config.convert_options();
        let grid = PixelGrid::filled(64, 24, Rgb24::BLACK);
        assert!(matches!(
            convert(&grid, &options),
            Err(ConvertError::InvalidDelay(0))
        ));
        // Still rejected when nothing animates
        let grid = PixelGrid::filled(32, 24, Rgb24::BLACK);
        assert!(matches!(
            build_tables(&grid, &options),
            Err(ConvertError::InvalidDelay(0))
        ));
    }

    #[test]
    fn test_smallest_delay_accepted() {
        let mut options = ConvertOptions::default();
        options.emit.delay = 1;
        let grid = PixelGrid::filled(64, 24, Rgb24::BLACK);
        let text = convert(&grid, &options).unwrap().render();
        assert!(text.contains("SET Z, 0x0001\n"));
    }

    #[test]
    fn test_frame_count_bounded_by_memory() {
        // 4 fixed words, 16 palette words, 384 tile words per frame
        let grid = PixelGrid::filled(32 * 170, 24, Rgb24::BLACK);
        assert!(matches!(
            build_tables(&grid, &ConvertOptions::default()),
            Err(ConvertError::ProgramTooLarge {
                frames: 170,
                words: 65300,
                ..
            })
        ));

        let grid = PixelGrid::filled(32 * 169, 24, Rgb24::BLACK);
        let program = convert(&grid, &ConvertOptions::default()).unwrap();
        assert_eq!(program.frames, 169);
        assert!(program.render().contains("SET Y, 0x00a8\n"));
    }

    #[test]
    fn test_small_mode_frame_limit() {
        // 16 palette words, 384 tile words, 2 state words, 256 font words per frame
        let grid = PixelGrid::filled(64 * 253, 64, Rgb24::BLACK);
        assert!(matches!(
            build_tables(&grid, &ConvertOptions::default()),
            Err(ConvertError::ProgramTooLarge { frames: 253, .. })
        ));
        let grid = PixelGrid::filled(64 * 252, 64, Rgb24::BLACK);
        assert_eq!(build_tables(&grid, &ConvertOptions::default()).unwrap().frames, 252);
    }

    #[test]
    fn test_quantizer_choice() {
        let grid = PixelGrid::filled(32, 24, Rgb24::new(10, 200, 30));
        let options = ConvertOptions::default();
        assert_eq!(
            choose_quantizer(ResolutionMode::LowResFull, &grid, &options),
            Quantizer::Reference
        );
        assert_eq!(
            choose_quantizer(ResolutionMode::HighResFull, &grid, &adaptive(16)),
            Quantizer::Monochrome
        );
        match choose_quantizer(ResolutionMode::LowResFull, &grid, &adaptive(4)) {
            Quantizer::Derived(palette) => assert_eq!(palette.used(), 1),
            other => panic!("expected derived palette, got {:?}", other),
        }

        let mut legacy = adaptive(16);
        legacy.emit.layout = Layout::Legacy;
        assert_eq!(
            choose_quantizer(ResolutionMode::LowResFull, &grid, &legacy),
            Quantizer::Reference
        );
    }

    #[test]
    fn test_lowres_tables() {
        let grid = PixelGrid::filled(32, 24, Rgb24::WHITE);
        let tables = build_tables(&grid, &ConvertOptions::default()).unwrap();
        assert_eq!(tables.mode, ResolutionMode::LowResFull);
        assert_eq!(tables.font, vec![0x0f0f, 0x0f0f]);
        assert_eq!(tables.palette, REFERENCE_PALETTE);
        assert_eq!(tables.tiles.len(), SCREEN_WORDS);
        assert!(tables.tiles.iter().all(|&w| w == 0xff00));
    }

    #[test]
    fn test_small_tables_swap_font_and_tiles() {
        let grid = PixelGrid::filled(128, 64, Rgb24::BLACK);
        let tables = build_tables(&grid, &ConvertOptions::default()).unwrap();
        assert_eq!(tables.mode, ResolutionMode::HighResSmall);
        assert_eq!(tables.animated, Target::Font);
        assert_eq!(tables.frames, 2);
        assert_eq!(tables.font.len(), 512);
        assert_eq!(tables.tiles.len(), SCREEN_WORDS);
        assert_eq!(tables.palette, MONOCHROME_PALETTE);
    }

    #[test]
    fn test_legacy_animation_rejected_before_encoding() {
        let grid = PixelGrid::filled(64, 24, Rgb24::BLACK);
        let mut options = ConvertOptions::default();
        options.emit.layout = Layout::Legacy;
        assert!(matches!(
            convert(&grid, &options),
            Err(ConvertError::LegacyAnimation { frames: 2 })
        ));
    }

    #[test]
    fn test_unsupported_dimensions() {
        let grid = PixelGrid::filled(50, 50, Rgb24::BLACK);
        assert!(matches!(
            convert(&grid, &ConvertOptions::default()),
            Err(ConvertError::UnsupportedDimensions {
                width: 50,
                height: 50
            })
        ));
    }
}
