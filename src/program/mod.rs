//! DCPU-16 program model and text output.
//!
//! A [`Program`] is built in full before anything is written, so a failed
//! conversion never leaves a truncated file behind.

pub mod asm;
mod emitter;

pub use emitter::{ProgramEmitter, DEFAULT_DELAY};

use serde::Deserialize;

use crate::encode::Target;
use crate::mode::ResolutionMode;
use crate::palette::Palette;

/// How the program gets its data onto the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Discover the LEM1802 and map labeled `DAT` tables with `HWI`
    #[default]
    Mapped,
    /// Write font and screen words straight to fixed memory addresses
    Legacy,
}

impl Layout {
    /// Get a human-readable name for the layout.
    pub fn name(&self) -> &'static str {
        match self {
            Layout::Mapped => "mapped",
            Layout::Legacy => "legacy",
        }
    }
}

/// Settings for program emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitOptions {
    pub layout: Layout,
    /// Busy-wait iterations between animation frames
    pub delay: u16,
    /// Emit a descriptive header comment
    pub comments: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            layout: Layout::Mapped,
            delay: DEFAULT_DELAY,
            comments: true,
        }
    }
}

/// Everything the emitter needs from the encoding stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tables {
    pub mode: ResolutionMode,
    /// Source image size in pixels
    pub source_size: (u32, u32),
    pub frames: usize,
    pub font: Vec<u16>,
    pub palette: Palette,
    pub tiles: Vec<u16>,
    /// Table that changes from frame to frame
    pub animated: Target,
    /// Words each frame occupies in the animated table
    pub words_per_frame: usize,
    /// Name of the quantization strategy, for the header
    pub quantizer: &'static str,
}

/// A labeled run of data words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataBlock {
    pub label: &'static str,
    pub words: Vec<u16>,
}

impl DataBlock {
    pub fn new(label: &'static str, words: Vec<u16>) -> Self {
        Self { label, words }
    }

    fn lines(&self) -> Vec<String> {
        let mut lines = vec![asm::label(self.label)];
        lines.extend(asm::dat_lines(&self.words));
        lines
    }
}

/// An emitted program, section by section.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    /// Comment lines describing the source
    pub header: Vec<String>,
    /// Hardware discovery and table uploads
    pub setup: Vec<String>,
    /// Halt, or the animation loop with its delay routine
    pub main: Vec<String>,
    /// Font, palette and tile tables, in that order
    pub data: Vec<DataBlock>,
    /// Exit flag and display handle
    pub state: Vec<DataBlock>,
    /// Number of animation frames
    pub frames: usize,
}

impl Program {
    /// Data block by label.
    pub fn block(&self, label: &str) -> Option<&DataBlock> {
        self.data
            .iter()
            .chain(self.state.iter())
            .find(|block| block.label == label)
    }

    /// All lines in output order.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.extend(self.header.iter().cloned());
        lines.extend(self.setup.iter().cloned());
        lines.extend(self.main.iter().cloned());
        for block in self.data.iter().chain(self.state.iter()) {
            lines.extend(block.lines());
        }
        lines
    }

    /// Newline-terminated program text.
    pub fn render(&self) -> String {
        let mut text = self.lines().join("\n");
        text.push('\n');
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_orders_sections() {
        let program = Program {
            header: vec!["; header".to_string()],
            setup: vec!["SET I, 0".to_string()],
            main: vec!["SUB PC, 1".to_string()],
            data: vec![DataBlock::new("font", vec![0x0f0f])],
            state: vec![DataBlock::new("display", vec![0xffff])],
            frames: 1,
        };
        assert_eq!(
            program.render(),
            "; header\nSET I, 0\nSUB PC, 1\n:font\nDAT 0x0f0f\n:display\nDAT 0xffff\n"
        );
    }

    #[test]
    fn test_block_lookup() {
        let program = Program {
            data: vec![DataBlock::new("tiles", vec![1, 2])],
            state: vec![DataBlock::new("exit_flag", vec![0])],
            ..Default::default()
        };
        assert_eq!(program.block("tiles").map(|b| b.words.len()), Some(2));
        assert!(program.block("exit_flag").is_some());
        assert!(program.block("font").is_none());
    }

    #[test]
    fn test_emit_options_default() {
        let options = EmitOptions::default();
        assert_eq!(options.layout, Layout::Mapped);
        assert_eq!(options.delay, DEFAULT_DELAY);
        assert!(options.comments);
    }
}
