//! Subcommand handlers for convert, info and config actions.

use std::path::Path;

use super::args::{ConfigAction, ConvertArgs};
use crate::config::{default_path, Config, DEFAULT_CONFIG};
use crate::convert;
use crate::error::AppError;
use crate::output;
use crate::palette::PaletteBuilder;
use crate::source;

/// Ranked colors listed by `info` for color images.
const INFO_TOP_COLORS: usize = 16;

/// Convert one image and write the program.
pub fn run_convert(args: &ConvertArgs, config_path: Option<&Path>) -> Result<(), AppError> {
    let config = Config::load(config_path)?;
    let options = args.apply(config.convert_options());

    let grid = source::load(&args.input)?;
    let program = convert::convert(&grid, &options)?;
    output::write_program(args.output.as_deref(), &program.render())
}

/// Print size, mode and frame count of an image to stdout.
pub fn show_info(input: &Path) -> Result<(), AppError> {
    let grid = source::load(input)?;
    println!("{}: {}x{}", input.display(), grid.width(), grid.height());

    let detection = convert::detect(&grid)?;
    println!("Mode: {}", detection.mode);
    println!("Frames: {}", detection.frames);

    if !detection.mode.is_monochrome() {
        println!();
        println!("Most frequent colors:");
        let ranking = PaletteBuilder::with_colors(INFO_TOP_COLORS).ranking(&grid);
        for ranked in ranking.iter().filter(|r| r.count > 0) {
            println!("  {}  {}", ranked.color, ranked.count);
        }
    }
    Ok(())
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, config_path: Option<&Path>) -> Result<(), AppError> {
    let path = config_path.map(Path::to_path_buf).unwrap_or_else(default_path);
    match action {
        ConfigAction::Show => {
            let config = Config::load(Some(path.as_path()))?;
            println!("Current configuration:");
            println!("  Palette: {:?}", config.palette.mode);
            println!("  Colors: {}", config.palette.colors);
            println!("  Layout: {}", config.output.layout.name());
            println!("  Comments: {}", if config.output.comments { "yes" } else { "no" });
            println!("  Delay: {}", config.animation.delay);
            println!();

            if path.exists() {
                println!("Config file: {} (exists)", path.display());
            } else {
                println!("Config file: {} (not found)", path.display());
            }
        }
        ConfigAction::Init => {
            if path.exists() {
                return Err(AppError::ConfigExists { path });
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG).map_err(|source| AppError::Write {
                path: path.clone(),
                source,
            })?;

            println!("Created config file: {}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_init_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        handle_config_action(ConfigAction::Init, Some(path.as_path())).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);

    }

    #[test]
    fn test_config_init_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\ncomments = false\n").unwrap();

        let err = handle_config_action(ConfigAction::Init, Some(path.as_path())).unwrap_err();
        assert!(matches!(err, AppError::ConfigExists { .. }));
        assert!(err.to_string().contains("config show"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "[output]\ncomments = false\n"
        );
    }

    #[test]
    fn test_config_show_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[animation]\ndelay = \"slow\"\n").unwrap();
        let err = handle_config_action(ConfigAction::Show, Some(path.as_path())).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
