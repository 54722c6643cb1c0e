//! Filesystem primitives the engine is written against.
//!
//! [`OsFs`] is the real implementation: `std::fs` for single-entry calls,
//! `glob` for pattern expansion and `walkdir` for tree removal.

use std::ffi::OsString;
use std::fs::{self, DirBuilder, FileType};
use std::io;
use std::path::{is_separator, Path, PathBuf};

use glob::MatchOptions;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use globkit_core::{Error, Result};

use crate::config::CreateOptions;

/// Options for walking the directories. Hidden names are filtered
/// afterwards, since glob's own leading-dot filter also drops them for
/// patterns that spell the dot out, and panics on non-UTF-8 siblings.
const WALK_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: !cfg!(windows),
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// `*` never matches a leading dot; `.*` only matches dot-names.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    require_literal_leading_dot: true,
    ..WALK_OPTIONS
};

/// Kind of a filesystem entry, probed without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
    Other,
}

impl EntryKind {
    pub fn from_file_type(file_type: FileType) -> Self {
        if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

/// Step of a recursive removal that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeOp {
    ReadDir,
    RemoveFile,
    RemoveDir,
}

/// Called for every failing step of [`FileSystem::remove_tree`]. Returns
/// true if the hook recovered the step.
pub type ErrorHook<'a> = dyn FnMut(&Path, TreeOp, &io::Error) -> bool + 'a;

/// Filesystem and glob collaborators used by [`crate::Globkit`].
pub trait FileSystem {
    /// True for directories and symlinks to directories.
    fn is_dir(&self, path: &Path) -> bool;

    /// Non-following probe; `None` if nothing is there.
    fn kind(&self, path: &Path) -> Option<EntryKind>;

    /// Names of the direct children of `dir`, excluding `.` and `..`.
    fn list_children(&self, dir: &Path) -> io::Result<Vec<OsString>>;

    /// Lazily expands a glob pattern. `.` and `..` are never yielded.
    fn expand(&self, pattern: &str) -> Result<Box<dyn Iterator<Item = PathBuf>>>;

    fn create_dir(&self, path: &Path, options: &CreateOptions) -> io::Result<()>;

    fn create_dir_all(&self, path: &Path, options: &CreateOptions) -> io::Result<()>;

    /// Removes an empty directory.
    fn remove_dir(&self, path: &Path) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Removes `path` and everything below it, reporting each failing step
    /// to `on_error` instead of stopping. Returns true if nothing was left.
    fn remove_tree(&self, path: &Path, on_error: &mut ErrorHook<'_>) -> bool;

    /// Makes `path` writable for its owner.
    fn clear_readonly(&self, path: &Path) -> io::Result<()>;
}

/// The host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl FileSystem for OsFs {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn kind(&self, path: &Path) -> Option<EntryKind> {
        fs::symlink_metadata(path)
            .ok()
            .map(|metadata| EntryKind::from_file_type(metadata.file_type()))
    }

    fn list_children(&self, dir: &Path) -> io::Result<Vec<OsString>> {
        fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect()
    }

    fn expand(&self, pattern: &str) -> Result<Box<dyn Iterator<Item = PathBuf>>> {
        let collapsed = collapse_separators(pattern);
        let paths = glob::glob_with(&collapsed, WALK_OPTIONS).map_err(|e| Error::pattern(pattern, e))?;
        let matcher = glob::Pattern::new(trim_trailing_separators(&collapsed)).map_err(|e| Error::pattern(pattern, e))?;

        Ok(Box::new(paths.filter_map(move |result| match result {
            Ok(path) if !is_self_or_parent(&path) && hidden_rule_allows(&matcher, &path) => Some(path),
            Ok(_) => None,
            Err(e) => {
                log::debug!("skipping unreadable match: {}", e);
                None
            }
        })))
    }

    fn create_dir(&self, path: &Path, options: &CreateOptions) -> io::Result<()> {
        dir_builder(options, false).create(path)
    }

    fn create_dir_all(&self, path: &Path, options: &CreateOptions) -> io::Result<()> {
        dir_builder(options, true).create(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_tree(&self, path: &Path, on_error: &mut ErrorHook<'_>) -> bool {
        let mut complete = true;

        for entry in WalkDir::new(path).follow_links(false).contents_first(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let failed = err.path().unwrap_or(path).to_path_buf();
                    let source = err
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("filesystem loop"));
                    complete &= on_error(&failed, TreeOp::ReadDir, &source);
                    continue;
                }
            };

            let (op, result) = if entry.file_type().is_dir() {
                (TreeOp::RemoveDir, fs::remove_dir(entry.path()))
            } else {
                (TreeOp::RemoveFile, fs::remove_file(entry.path()))
            };

            if let Err(err) = result {
                complete &= on_error(entry.path(), op, &err);
            }
        }

        complete
    }

    fn clear_readonly(&self, path: &Path) -> io::Result<()> {
        let metadata = fs::symlink_metadata(path)?;
        if metadata.file_type().is_symlink() {
            return Ok(());
        }

        let mut permissions = metadata.permissions();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // Directories also need read and search to be emptied
            let owner = if metadata.is_dir() { 0o700 } else { 0o200 };
            permissions.set_mode(permissions.mode() | owner);
        }
        #[cfg(not(unix))]
        permissions.set_readonly(false);

        fs::set_permissions(path, permissions)
    }
}

fn dir_builder(options: &CreateOptions, recursive: bool) -> DirBuilder {
    let mut builder = DirBuilder::new();
    builder.recursive(recursive);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        if let Some(mode) = options.mode {
            builder.mode(mode);
        }
    }
    #[cfg(not(unix))]
    {
        if options.mode.is_some() {
            log::debug!("directory mode is ignored on this platform");
        }
    }

    builder
}

/// Folds runs of separators into one so the pattern lines up with the
/// paths glob yields. Leading separators are kept for UNC roots.
fn collapse_separators(pattern: &str) -> String {
    let body = pattern.trim_start_matches(is_separator);
    let mut out = pattern[..pattern.len() - body.len()].to_string();
    let mut previous_was_separator = false;
    for c in body.chars() {
        let separator = is_separator(c);
        if !(separator && previous_was_separator) {
            out.push(c);
        }
        previous_was_separator = separator;
    }
    out
}

fn trim_trailing_separators(text: &str) -> &str {
    match text.trim_end_matches(is_separator) {
        "" => text,
        trimmed => trimmed,
    }
}

/// Re-checks a walked path with wildcards barred from leading dots.
/// Non-UTF-8 paths can never match a string pattern.
fn hidden_rule_allows(matcher: &glob::Pattern, path: &Path) -> bool {
    path.to_str()
        .is_some_and(|text| matcher.matches_with(trim_trailing_separators(text), MATCH_OPTIONS))
}

/// True for paths whose last segment is `.` or `..`.
fn is_self_or_parent(path: &Path) -> bool {
    let text = path.as_os_str().to_string_lossy();
    let last = text.rsplit(is_separator).next().unwrap_or_default();
    last == "." || last == ".."
}
