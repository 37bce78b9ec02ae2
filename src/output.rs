//! Writes finished program text.

use std::io::Write;
use std::path::Path;

use crate::error::AppError;

/// Write program text to `path`, or to stdout when no path is given.
///
/// An existing file is truncated.
pub fn write_program(path: Option<&Path>, text: &str) -> Result<(), AppError> {
    match path {
        Some(path) => {
            std::fs::write(path, text).map_err(|source| AppError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            log::info!("Wrote {} lines to {}", text.lines().count(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(text.as_bytes())?;
            handle.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.dasm");
        std::fs::write(&path, "old contents that are longer\n").unwrap();
        write_program(Some(path.as_path()), "SUB PC, 1\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "SUB PC, 1\n");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.dasm");
        let err = write_program(Some(path.as_path()), "SUB PC, 1\n").unwrap_err();
        assert!(matches!(err, AppError::Write { .. }));
    }
}
