//! Pattern listing with optional kind filtering.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use globkit_core::{Error, Result};

use crate::fs::{EntryKind, FileSystem};
use crate::Globkit;

/// A matched path and the kind it had when it was probed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// Narrows listing results to a single kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindFilter {
    Directories,
    Files,
    Symlinks,
}

impl KindFilter {
    pub fn accepts(self, kind: EntryKind) -> bool {
        matches!(
            (self, kind),
            (KindFilter::Directories, EntryKind::Directory)
                | (KindFilter::Files, EntryKind::File)
                | (KindFilter::Symlinks, EntryKind::Symlink)
        )
    }

    /// Decodes the FFI filter code: 0 = none, 1 = directories, 2 = files,
    /// 3 = symlinks.
    pub fn from_code(code: u32) -> std::result::Result<Option<Self>, u32> {
        match code {
            0 => Ok(None),
            1 => Ok(Some(KindFilter::Directories)),
            2 => Ok(Some(KindFilter::Files)),
            3 => Ok(Some(KindFilter::Symlinks)),
            other => Err(other),
        }
    }
}

/// How listed entries are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListStyle {
    /// Final component only
    #[default]
    Name,
    /// Absolute path, without resolving symlinks
    Absolute,
    /// Path as produced by the matcher or directory listing
    Raw,
}

impl ListStyle {
    /// Decodes the FFI style code: 0 = name, 1 = absolute, 2 = raw.
    pub fn from_code(code: u32) -> std::result::Result<Self, u32> {
        match code {
            0 => Ok(ListStyle::Name),
            1 => Ok(ListStyle::Absolute),
            2 => Ok(ListStyle::Raw),
            other => Err(other),
        }
    }

    fn render(self, path: PathBuf) -> Result<PathBuf> {
        match self {
            ListStyle::Name => Ok(path.file_name().map(PathBuf::from).unwrap_or(path)),
            ListStyle::Absolute => std::path::absolute(&path).map_err(|e| Error::io(&path, e)),
            ListStyle::Raw => Ok(path),
        }
    }
}

impl<F: FileSystem> Globkit<F> {
    /// Lists the entries matching `pattern`.
    ///
    /// An existing directory lists its direct children. Anything else is a
    /// glob whose directory part must exist. Order is whatever the
    /// platform produces. Entries that disappear before they can be probed
    /// are dropped.
    pub fn list(&self, pattern: &str, filter: Option<KindFilter>) -> Result<Vec<Entry>> {
        let literal = Path::new(pattern);
        let candidates: Vec<PathBuf> = if !pattern.is_empty() && self.fs.is_dir(literal) {
            self.fs
                .list_children(literal)
                .map_err(|e| Error::io(literal, e))?
                .into_iter()
                .map(|name| literal.join(name))
                .collect()
        } else {
            self.ensure_pattern_directory(pattern)?;
            self.fs.expand(pattern)?.collect()
        };

        Ok(candidates
            .into_iter()
            .filter_map(|path| {
                let kind = self.fs.kind(&path)?;
                filter
                    .map_or(true, |f| f.accepts(kind))
                    .then_some(Entry { path, kind })
            })
            .collect())
    }

    /// Like [`Globkit::list`], rendered according to `style`.
    pub fn list_entries(
        &self,
        pattern: &str,
        style: ListStyle,
        filter: Option<KindFilter>,
    ) -> Result<Vec<PathBuf>> {
        self.list(pattern, filter)?
            .into_iter()
            .map(|entry| style.render(entry.path))
            .collect()
    }
}
