//! Application-level errors.

use std::path::PathBuf;

use crate::config::ConfigError;
use crate::encode::ConvertError;

/// Anything that stops the binary from producing a program.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to decode image '{}': {}", .path.display(), .source)]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to write '{}': {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(
        "Config file already exists: '{}'. Use 'img2dcpu config show' to view current settings",
        .path.display()
    )]
    ConfigExists { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_error_passes_through() {
        let err: AppError = ConvertError::UnsupportedDimensions {
            width: 50,
            height: 50,
        }
        .into();
        assert!(err.to_string().starts_with("Unsupported image size 50x50."));
    }

    #[test]
    fn test_write_error_names_path() {
        let err = AppError::Write {
            path: PathBuf::from("/tmp/out.dasm"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Failed to write '/tmp/out.dasm': denied");
    }

    #[test]
    fn test_config_exists_names_path() {
        let err = AppError::ConfigExists {
            path: PathBuf::from("/tmp/img2dcpu/config.toml"),
        };
        assert_eq!(
            err.to_string(),
            "Config file already exists: '/tmp/img2dcpu/config.toml'. \
             Use 'img2dcpu config show' to view current settings"
        );
    }
}
