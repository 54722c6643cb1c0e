//! Pattern-based file deletion.

use globkit_core::Result;

use crate::fs::{EntryKind, FileSystem};
use crate::Globkit;

impl<F: FileSystem> Globkit<F> {
    /// Deletes every plain file matching `pattern`.
    ///
    /// Returns `Ok(false)` if at least one file could not be deleted; the
    /// remaining matches are still attempted. Directories and symlinks are
    /// skipped. Matching nothing is a success.
    ///
    /// # Errors
    /// [`globkit_core::Error::MissingDirectory`] if the directory part of
    /// the pattern does not exist, [`globkit_core::Error::Pattern`] for an
    /// invalid pattern.
    pub fn remove(&self, pattern: &str) -> Result<bool> {
        self.ensure_pattern_directory(pattern)?;
        self.remove_matches(pattern)
    }

    pub(crate) fn remove_matches(&self, pattern: &str) -> Result<bool> {
        let mut complete = true;

        for path in self.fs.expand(pattern)? {
            if self.fs.kind(&path) != Some(EntryKind::File) {
                continue;
            }
            if let Err(e) = self.fs.remove_file(&path) {
                log::debug!("could not remove {}: {}", path.display(), e);
                complete = false;
            }
        }

        Ok(complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use globkit_core::Error;
    use std::fs;
    use tempfile::TempDir;

    fn pattern(temp: &TempDir, wildcard: &str) -> String {
        format!("{}/{}", temp.path().to_str().unwrap(), wildcard)
    }

    #[test]
    fn test_remove_matching_files_only() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.pyc"), "").unwrap();
        fs::write(temp.path().join("b.pyc"), "").unwrap();
        fs::write(temp.path().join(".c.pyc"), "").unwrap();
        fs::write(temp.path().join("keep.py"), "").unwrap();
        fs::create_dir(temp.path().join("dir.pyc")).unwrap();

        assert!(Globkit::new().remove(&pattern(&temp, "*.pyc")).unwrap());

        assert!(!temp.path().join("a.pyc").exists());
        assert!(!temp.path().join("b.pyc").exists());
        assert!(temp.path().join(".c.pyc").exists());
        assert!(temp.path().join("keep.py").exists());
        assert!(temp.path().join("dir.pyc").is_dir());
    }

    #[test]
    fn test_no_match_is_success() {
        let temp = TempDir::new().unwrap();
        assert!(Globkit::new().remove(&pattern(&temp, "*.nothing")).unwrap());
    }

    #[test]
    fn test_missing_directory_even_without_wildcard() {
        let temp = TempDir::new().unwrap();
        let err = Globkit::new()
            .remove(&pattern(&temp, "gone/file.txt"))
            .unwrap_err();
        assert!(matches!(err, Error::MissingDirectory(_)));
    }

    #[test]
    fn test_existing_directory_pattern_is_left_alone() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("sub");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("inner.txt"), "").unwrap();

        assert!(Globkit::new().remove(dir.to_str().unwrap()).unwrap());
        assert!(dir.join("inner.txt").exists());
    }

    #[test]
    fn test_dot_pattern_removes_only_dot_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".cache"), "").unwrap();
        fs::write(temp.path().join("visible"), "").unwrap();

        assert!(Globkit::new().remove(&pattern(&temp, ".*")).unwrap());
        assert!(!temp.path().join(".cache").exists());
        assert!(temp.path().join("visible").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_sibling_does_not_abort() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        let odd = temp.path().join(OsStr::from_bytes(b"bad\xff.bin"));
        fs::write(temp.path().join("a.log"), "").unwrap();
        fs::write(&odd, "").unwrap();

        assert!(Globkit::new().remove(&pattern(&temp, "*.log")).unwrap());
        assert!(!temp.path().join("a.log").exists());
        assert!(odd.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_skipped() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("target.txt");
        fs::write(&target, "").unwrap();
        std::os::unix::fs::symlink(&target, temp.path().join("link.lnk")).unwrap();

        assert!(Globkit::new().remove(&pattern(&temp, "*.lnk")).unwrap());
        assert!(temp.path().join("link.lnk").symlink_metadata().is_ok());
        assert!(target.exists());
    }
}
