//! Scoped purges of a directory's content.

use std::env;
use std::io;
use std::path::{is_separator, Path, PathBuf};

use globkit_core::{normalize_path, Error, Result};

use crate::config::Scope;
use crate::fs::{EntryKind, FileSystem, TreeOp};
use crate::Globkit;

impl<F: FileSystem> Globkit<F> {
    /// Purges `directory` according to `scope`. The directory itself stays.
    pub fn purge(&self, directory: impl AsRef<Path>, scope: Scope) -> Result<bool> {
        match scope {
            Scope::FilesOnly => self.remove_files(directory),
            Scope::Content => self.remove_content(directory),
        }
    }

    /// Deletes every direct-child file of `directory`, dot-files included.
    /// Subdirectories are not touched. `.` and `..` are valid targets.
    pub fn remove_files(&self, directory: impl AsRef<Path>) -> Result<bool> {
        let directory = directory.as_ref();
        self.ensure_directory(directory)?;

        let prefix = escaped_prefix(directory)?;
        let dot_files = self.remove_matches(&format!("{}/.*", prefix))?;
        let files = self.remove_matches(&format!("{}/*", prefix))?;
        Ok(dot_files && files)
    }

    /// Deletes everything inside `directory`, leaving it empty.
    ///
    /// # Errors
    /// [`Error::MissingDirectory`] if `directory` does not exist,
    /// [`Error::UnsafeTarget`] if it is `..` or a strict ancestor of the
    /// working directory.
    pub fn remove_content(&self, directory: impl AsRef<Path>) -> Result<bool> {
        let directory = directory.as_ref();
        self.ensure_directory(directory)?;
        let cwd = env::current_dir().map_err(|e| Error::io(".", e))?;
        ensure_not_ancestor(directory, &cwd)?;

        let complete = self.purge_content(directory);
        if !complete {
            log::warn!("content of {} was only partially removed", directory.display());
        }
        Ok(complete)
    }

    fn purge_content(&self, directory: &Path) -> bool {
        let children = match self.fs.list_children(directory) {
            Ok(children) => children,
            Err(e) => {
                log::debug!("could not list {}: {}", directory.display(), e);
                return false;
            }
        };

        let mut complete = true;
        for name in children {
            let child = directory.join(&name);

            if self.fs.kind(&child) == Some(EntryKind::Directory) {
                let removed = self
                    .fs
                    .remove_tree(&child, &mut |path: &Path, op: TreeOp, err: &io::Error| {
                        self.retry_writable(path, op, err)
                    });
                if !removed {
                    complete = false;
                    // Salvage what is removable below the stubborn entry
                    self.purge_content(&child);
                    if self.fs.remove_dir(&child).is_ok() {
                        log::debug!("removed {} after salvage", child.display());
                    }
                }
            } else if let Err(e) = self.fs.remove_file(&child) {
                log::debug!("could not remove {}: {}", child.display(), e);
                complete = false;
            }
        }

        complete
    }

    /// Error hook for tree removal: make the entry writable, and its parent
    /// too when access was denied, then retry the failed step once.
    fn retry_writable(&self, path: &Path, op: TreeOp, err: &io::Error) -> bool {
        log::debug!("{:?} failed on {}: {}; retrying writable", op, path.display(), err);

        let parent = path.parent().filter(|_| err.kind() == io::ErrorKind::PermissionDenied);
        for target in std::iter::once(path).chain(parent) {
            if let Err(e) = self.fs.clear_readonly(target) {
                log::debug!("could not clear read-only on {}: {}", target.display(), e);
            }
        }

        match op {
            TreeOp::RemoveFile => self.fs.remove_file(path).is_ok(),
            TreeOp::RemoveDir => self.fs.remove_dir(path).is_ok(),
            TreeOp::ReadDir => false,
        }
    }
}

/// Rejects content purges of `..` and of strict ancestors of `cwd`.
///
/// A relative `target` is resolved against `cwd`. Purging `cwd` itself is
/// allowed.
pub fn ensure_not_ancestor(target: &Path, cwd: &Path) -> Result<()> {
    if normalize_path(&target.to_string_lossy()) == Path::new("..") {
        return Err(Error::UnsafeTarget(target.to_path_buf()));
    }

    let resolved = if target.is_absolute() {
        target.to_path_buf()
    } else {
        cwd.join(target)
    };
    let target_real = canonical_or_lexical(&resolved);
    let cwd_real = canonical_or_lexical(cwd);

    if cwd_real != target_real && cwd_real.starts_with(&target_real) {
        return Err(Error::UnsafeTarget(target.to_path_buf()));
    }
    Ok(())
}

fn canonical_or_lexical(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| normalize_path(&path.to_string_lossy()))
}

/// Glob-escaped directory prefix, without trailing separators.
fn escaped_prefix(directory: &Path) -> Result<String> {
    let text = directory
        .to_str()
        .ok_or_else(|| Error::pattern(&directory.to_string_lossy(), "directory is not valid UTF-8"))?;
    Ok(glob::Pattern::escape(text.trim_end_matches(is_separator)))
}
