//! Report output directory

use std::path::Path;

use crate::common::Result;

/// Create the pa11y report directory if it does not exist yet
pub fn ensure_report_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "creating report directory");
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_creates_nested_and_is_idempotent() {
        let root = tempdir().unwrap();
        let dir = root.path().join("reports").join("pa11y");

        ensure_report_dir(&dir).unwrap();
        assert!(dir.is_dir());
        ensure_report_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_blocked_by_file_is_error() {
        let root = tempdir().unwrap();
        let file = root.path().join("reports");
        std::fs::write(&file, "not a dir").unwrap();

        assert!(ensure_report_dir(&file.join("pa11y")).is_err());
    }
}
