//! Idempotent directory creation and removal.

use std::io;
use std::path::{Component, Path, PathBuf};

use globkit_core::{Error, Result};

use crate::config::{CreateOptions, ProvisionSpec, Scope};
use crate::fs::FileSystem;
use crate::Globkit;

impl<F: FileSystem> Globkit<F> {
    /// Creates a single directory unless it already exists.
    ///
    /// See [`Globkit::provision`].
    pub fn make_dir(&self, path: impl AsRef<Path>, purge: Option<Scope>, options: &CreateOptions) -> Result<bool> {
        self.provision(path, false, purge, options)
    }

    /// Creates a directory and any missing parents unless it already
    /// exists.
    ///
    /// See [`Globkit::provision`].
    pub fn make_dirs(&self, path: impl AsRef<Path>, purge: Option<Scope>, options: &CreateOptions) -> Result<bool> {
        self.provision(path, true, purge, options)
    }

    /// Makes sure `path` exists as a directory.
    ///
    /// A missing directory is created (with its parents when `chain` is
    /// set) using `options`. An existing one keeps its permissions and is
    /// purged with `purge` if given, otherwise left as is. Returns the purge
    /// result, or `true` when nothing was purged.
    ///
    /// # Errors
    /// Creation failures other than "already exists", such as a missing
    /// parent without `chain` or a file in the way.
    pub fn provision(
        &self,
        path: impl AsRef<Path>,
        chain: bool,
        purge: Option<Scope>,
        options: &CreateOptions,
    ) -> Result<bool> {
        let path = path.as_ref();

        if !self.fs.is_dir(path) {
            let created = if chain {
                self.fs.create_dir_all(path, options)
            } else {
                self.fs.create_dir(path, options)
            };

            match created {
                Ok(()) => {
                    log::info!("created directory {}", path.display());
                    return Ok(true);
                }
                // Lost a race with another creator; treat as pre-existing
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists && self.fs.is_dir(path) => {}
                Err(e) => return Err(Error::io(path, e)),
            }
        }

        match purge {
            Some(scope) => self.purge(path, scope),
            None => Ok(true),
        }
    }

    /// Applies a [`ProvisionSpec`].
    pub fn apply(&self, spec: &ProvisionSpec) -> Result<bool> {
        self.provision(&spec.path, spec.chain, spec.purge, &spec.create)
    }

    /// Removes an empty directory.
    ///
    /// Returns `Ok(true)` if the directory no longer exists, including
    /// when it never did. A failed removal is an error, or `Ok(false)`
    /// when `silent` is set.
    pub fn remove_dir(&self, path: impl AsRef<Path>, silent: bool) -> Result<bool> {
        let path = path.as_ref();
        if !self.fs.is_dir(path) {
            return Ok(true);
        }

        match self.fs.remove_dir(path) {
            Ok(()) => Ok(true),
            Err(e) if silent => {
                log::debug!("could not remove directory {}: {}", path.display(), e);
                Ok(false)
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }

    /// Removes `root/path`, then each parent of `path` in turn, stopping at
    /// the first one that cannot be removed (usually because it is not
    /// empty). `root` itself is never removed.
    ///
    /// Returns `Ok(true)` if the whole chain is gone. Only the removal of
    /// `root/path` itself honours `silent`; parents are always silent.
    pub fn remove_dir_chain(&self, path: impl AsRef<Path>, root: impl AsRef<Path>, silent: bool) -> Result<bool> {
        let (path, root) = (fold_lexically(path.as_ref()), root.as_ref());
        if !path.components().any(|c| matches!(c, Component::Normal(_))) {
            // Nothing below root to remove
            return Ok(true);
        }

        if !self.remove_dir(root.join(&path), silent)? {
            return Ok(false);
        }

        let mut current = path.parent();
        while let Some(dir) = current.filter(|d| d.file_name().is_some()) {
            if !self.remove_dir(root.join(dir), true)? {
                return Ok(false);
            }
            current = dir.parent();
        }

        Ok(true)
    }
}

/// Resolves `.` and `..` components without touching the filesystem.
/// A `..` with nothing left to climb out of is kept.
fn fold_lexically(path: &Path) -> PathBuf {
    let mut folded = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir if matches!(folded.components().next_back(), Some(Component::Normal(_))) => {
                folded.pop();
            }
            other => folded.push(other),
        }
    }
    folded
}
