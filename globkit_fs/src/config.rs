//! Configuration types for directory provisioning

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use globkit_core::{Error, Result};

/// Blast radius of a purge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Direct-child files only, dot-files included. Subdirectories stay.
    #[serde(alias = "files")]
    FilesOnly,
    /// Every direct child, recursively. The directory itself stays.
    Content,
}

impl Scope {
    /// Decodes the FFI scope code: 0 = none, 1 = files, 2 = content.
    pub fn from_code(code: u32) -> std::result::Result<Option<Self>, u32> {
        match code {
            0 => Ok(None),
            1 => Ok(Some(Scope::FilesOnly)),
            2 => Ok(Some(Scope::Content)),
            other => Err(other),
        }
    }
}

/// Options applied when a directory is created. Never applied to a
/// directory that already exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOptions {
    /// Permission bits (Unix only, subject to the process umask)
    #[serde(default)]
    pub mode: Option<u32>,
}

impl CreateOptions {
    pub fn with_mode(mode: u32) -> Self {
        Self { mode: Some(mode) }
    }
}

/// A directory to provision, as loaded from JSON.
///
/// ```json
/// { "path": "build/out", "chain": true, "purge": "content", "create": { "mode": 448 } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionSpec {
    pub path: PathBuf,

    /// Create missing parents too
    #[serde(default)]
    pub chain: bool,

    /// Purge applied when the directory already exists
    #[serde(default)]
    pub purge: Option<Scope>,

    #[serde(default)]
    pub create: CreateOptions,
}

impl ProvisionSpec {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            chain: false,
            purge: None,
            create: CreateOptions::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a spec from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&content)
    }

    /// Save the spec to a JSON file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| Error::io(path, e))
    }
}
