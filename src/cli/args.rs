//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::{LayoutChoice, PaletteChoice};
use crate::convert::{ConvertOptions, SUPPORTED_COLOR_COUNTS};

/// Convert BMP and PNG images into DCPU-16 assembly for the LEM1802 display
#[derive(Parser, Debug)]
#[command(name = "img2dcpu")]
#[command(version, about = "Image to DCPU-16 assembly converter", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert an image into an assembly program
    Convert(ConvertArgs),
    /// Show image size, detected mode and frame count
    Info {
        /// Image file (BMP or PNG)
        input: PathBuf,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    /// Image file (BMP or PNG)
    pub input: PathBuf,

    /// Output file (default: stdout)
    pub output: Option<PathBuf>,

    /// Palette for color images
    #[arg(long)]
    pub palette: Option<PaletteChoice>,

    /// Adaptive palette size (4 or 16)
    #[arg(long, value_parser = parse_colors)]
    pub colors: Option<usize>,

    /// Program layout
    #[arg(long)]
    pub layout: Option<LayoutChoice>,

    /// Busy-wait iterations between animation frames (decimal or 0x hex)
    #[arg(long, value_parser = parse_delay)]
    pub delay: Option<u16>,

    /// Omit the header comment
    #[arg(long)]
    pub no_comments: bool,
}

impl ConvertArgs {
    /// Apply flags on top of configured options.
    pub fn apply(&self, mut options: ConvertOptions) -> ConvertOptions {
        if let Some(palette) = self.palette {
            options.palette = palette.into();
        }
        if let Some(colors) = self.colors {
            options.colors = colors;
        }
        if let Some(layout) = self.layout {
            options.emit.layout = layout.into();
        }
        if let Some(delay) = self.delay {
            options.emit.delay = delay;
        }
        if self.no_comments {
            options.emit.comments = false;
        }
        options
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

/// Parse and validate adaptive palette size (4 or 16)
fn parse_colors(s: &str) -> Result<usize, String> {
    let colors: usize = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if !SUPPORTED_COLOR_COUNTS.contains(&colors) {
        return Err(format!("Palette size must be 4 or 16, got {}", colors));
    }
    Ok(colors)
}

/// Parse and validate frame delay (1-65535, decimal or 0x-prefixed hex)
fn parse_delay(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse(),
    };
    let delay = parsed.map_err(|_| format!("'{}' is not a valid delay (1-65535)", s))?;
    if delay == 0 {
        return Err("Delay must be at least 1".to_string());
    }
    Ok(delay)
}
