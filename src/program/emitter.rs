//! Builds mapped and legacy programs from encoded tables.

use super::asm::{
    comment, hex, label, nested, set_memory, LEGACY_FONT_BASE, LEGACY_SCREEN_BASE,
    LEM1802_ID, MEM_MAP_FONT, MEM_MAP_PALETTE, MEM_MAP_SCREEN,
};
use super::{DataBlock, EmitOptions, Layout, Program, Tables};
use crate::encode::{ConvertError, Target};

/// Busy-wait iterations between animation frames.
pub const DEFAULT_DELAY: u16 = 0x4000;

/// Display handle before discovery has run.
const NO_DISPLAY: u16 = 0xffff;

pub struct ProgramEmitter {
    options: EmitOptions,
}

impl ProgramEmitter {
    pub fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// Assemble the full program for the configured layout.
    pub fn emit(&self, tables: &Tables) -> Result<Program, ConvertError> {
        let program = match self.options.layout {
            Layout::Mapped => self.emit_mapped(tables),
            Layout::Legacy => self.emit_legacy(tables)?,
        };
        log::debug!(
            "Emitted {} layout: {} setup lines, {} data blocks",
            self.options.layout.name(),
            program.setup.len(),
            program.data.len()
        );
        Ok(program)
    }

    fn header(&self, tables: &Tables) -> Vec<String> {
        if !self.options.comments {
            return Vec::new();
        }
        let (width, height) = tables.source_size;
        vec![
            comment(format!(
                "img2dcpu {}: {}x{} image, {}",
                env!("CARGO_PKG_VERSION"),
                width,
                height,
                tables.mode
            )),
            comment(format!(
                "{} frame(s), {} palette ({} colors), {} layout",
                tables.frames,
                tables.quantizer,
                tables.palette.used(),
                self.options.layout.name()
            )),
        ]
    }

    fn emit_mapped(&self, tables: &Tables) -> Program {
        let mut setup = vec![
            "SET I, 0".to_string(),
            "HWN J".to_string(),
            label("find_display"),
            "IFE I, J".to_string(),
            nested(1, "SET PC, no_display"),
            "HWQ I".to_string(),
            format!("IFE B, {}", hex(LEM1802_ID.0)),
            nested(1, format!("IFE A, {}", hex(LEM1802_ID.1))),
            nested(2, "SET PC, found_display"),
            "ADD I, 1".to_string(),
            "SET PC, find_display".to_string(),
            label("no_display"),
            "SET [exit_flag], 1".to_string(),
            "SUB PC, 1".to_string(),
            label("found_display"),
            "SET [display], I".to_string(),
        ];
        for (code, table) in [
            (MEM_MAP_FONT, "font"),
            (MEM_MAP_PALETTE, "palette"),
            (MEM_MAP_SCREEN, "tiles"),
        ] {
            setup.push(format!("SET A, {}", hex(code)));
            setup.push(format!("SET B, {}", table));
            setup.push("HWI I".to_string());
        }

        let main = if tables.frames > 1 {
            self.animation(tables)
        } else {
            vec![label("halt"), "SUB PC, 1".to_string()]
        };

        Program {
            header: self.header(tables),
            setup,
            main,
            data: vec![
                DataBlock::new("font", tables.font.clone()),
                DataBlock::new("palette", tables.palette.words()),
                DataBlock::new("tiles", tables.tiles.clone()),
            ],
            state: vec![
                DataBlock::new("exit_flag", vec![0x0000]),
                DataBlock::new("display", vec![NO_DISPLAY]),
            ],
            frames: tables.frames,
        }
    }

    /// Loop that remaps the animated table one frame further each pass.
    fn animation(&self, tables: &Tables) -> Vec<String> {
        let (code, table) = match tables.animated {
            Target::Tiles => (MEM_MAP_SCREEN, "tiles"),
            Target::Font => (MEM_MAP_FONT, "font"),
        };
        let last_frame = tables.frames.saturating_sub(1) as u16;
        let stride = tables.words_per_frame as u16;

        vec![
            label("animate"),
            format!("SET X, {}", table),
            format!("SET Y, {}", hex(last_frame)),
            label("show_frame"),
            format!("SET A, {}", hex(code)),
            "SET B, X".to_string(),
            "HWI [display]".to_string(),
            "JSR delay".to_string(),
            "IFE Y, 0".to_string(),
            nested(1, "SET PC, animate"),
            format!("ADD X, {}", hex(stride)),
            "SUB Y, 1".to_string(),
            "SET PC, show_frame".to_string(),
            label("delay"),
            format!("SET Z, {}", hex(self.options.delay)),
            label("delay_loop"),
            "SUB Z, 1".to_string(),
            "IFN Z, 0".to_string(),
            nested(1, "SET PC, delay_loop"),
            "SET PC, POP".to_string(),
        ]
    }

    fn emit_legacy(&self, tables: &Tables) -> Result<Program, ConvertError> {
        if tables.frames > 1 {
            return Err(ConvertError::LegacyAnimation {
                frames: tables.frames,
            });
        }

        let font = tables
            .font
            .iter()
            .enumerate()
            .map(|(offset, &word)| set_memory(LEGACY_FONT_BASE.wrapping_add(offset as u16), word));
        let screen = tables
            .tiles
            .iter()
            .enumerate()
            .map(|(offset, &word)| set_memory(LEGACY_SCREEN_BASE.wrapping_add(offset as u16), word));

        Ok(Program {
            header: self.header(tables),
            setup: font.chain(screen).collect(),
            main: vec!["SUB PC, 1".to_string()],
            data: Vec::new(),
            state: Vec::new(),
            frames: 1,
        })
    }
}
