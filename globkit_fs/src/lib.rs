//! globkit filesystem operations
//!
//! Glob-filtered bulk deletion, scoped purges and idempotent directory
//! creation/removal. "Already exists", "already absent" and "nothing
//! matched" are successes; a bulk operation never stops at the first
//! failing entry and reports a single aggregate flag instead.
//!
//! ```no_run
//! use globkit_fs::{CreateOptions, Globkit, Scope};
//!
//! let kit = Globkit::new();
//! kit.make_dirs("build/out", Some(Scope::Content), &CreateOptions::default())?;
//! let complete = kit.remove("build/*.o")?;
//! # Ok::<(), globkit_core::Error>(())
//! ```
//!
//! The `globkit_*` C exports in [`ffi`] wrap the same operations for .NET
//! and other P/Invoke callers.

use std::path::Path;

use globkit_core::{split_pattern_with, Error, Result};

pub mod config;
pub mod ffi;
pub mod fs;

mod delete;
mod list;
mod provision;
mod purge;

pub use config::{CreateOptions, ProvisionSpec, Scope};
pub use fs::{EntryKind, FileSystem, OsFs, TreeOp};
pub use globkit_core::{expand_path, extension_of, name_of, path_of, stem_of, GlobkitStatus};
pub use list::{Entry, KindFilter, ListStyle};
pub use purge::ensure_not_ancestor;

/// Stateless entry point for every operation.
///
/// Holds nothing but the filesystem it works against; create one per call
/// site or share it freely.
#[derive(Debug, Clone)]
pub struct Globkit<F: FileSystem = OsFs> {
    fs: F,
}

impl Globkit<OsFs> {
    /// Operates on the host filesystem.
    pub fn new() -> Self {
        Self { fs: OsFs }
    }
}

impl Default for Globkit<OsFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> Globkit<F> {
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    fn ensure_directory(&self, directory: &Path) -> Result<()> {
        if self.fs.is_dir(directory) {
            Ok(())
        } else {
            Err(Error::MissingDirectory(directory.to_path_buf()))
        }
    }

    /// A pattern with a directory part requires that directory to exist.
    fn ensure_pattern_directory(&self, pattern: &str) -> Result<()> {
        let directory = split_pattern_with(pattern, |p| self.fs.is_dir(p)).directory;
        if directory.is_empty() {
            return Ok(());
        }
        self.ensure_directory(Path::new(&directory))
    }
}
