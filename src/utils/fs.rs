// File system utilities

use crate::error::{HubError, Result};
use std::path::Path;

/// Ensures a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| {
            HubError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create directory {}: {}", path.display(), e),
            ))
        })?;
    }
    Ok(())
}

/// Writes content to a file atomically by writing to a temp file first
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, content).map_err(|e| {
        HubError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to write to temp file {}: {}", temp_path.display(), e),
        ))
    })?;

    // Rename is atomic on the same filesystem
    std::fs::rename(&temp_path, path).map_err(|e| {
        HubError::Io(std::io::Error::new(
            e.kind(),
            format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            ),
        ))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_write_creates_parent_dirs_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/out.conf");

        atomic_write(&target, "blacklist rtl2832\n").unwrap();

        assert_eq!(
            std::fs::read_to_string(&target).unwrap(),
            "blacklist rtl2832\n"
        );
        assert!(!target.with_extension("tmp").exists());
    }
}
