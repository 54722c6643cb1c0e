//! Error types and status codes.
//!
//! [`Error`] is what the Rust API returns. [`GlobkitStatus`] is its
//! `#[repr(C)]` projection for FFI callers, where 0 = success.

use std::io;
use std::os::raw::c_char;
use std::path::{Path, PathBuf};

/// Result type for globkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that are reported to the caller instead of being folded into an
/// aggregate `false`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The directory part of a pattern, or a purge target, does not exist.
    #[error("no such directory: '{}'", .0.display())]
    MissingDirectory(PathBuf),

    /// A content purge would remove an ancestor of the working directory.
    #[error("parent directory is not allowed here: '{}'", .0.display())]
    UnsafeTarget(PathBuf),

    #[error("invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Wraps an I/O error together with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn pattern(pattern: &str, message: impl ToString) -> Self {
        Error::Pattern {
            pattern: pattern.to_string(),
            message: message.to_string(),
        }
    }
}

/// Status codes returned across the FFI boundary.
///
/// # C# Mapping
/// ```csharp
/// public enum GlobkitStatus : uint {
///     Success = 0,
///     InvalidArgument = 1,
///     // ...
///     Incomplete = 8,
/// }
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlobkitStatus {
    /// Operation completed successfully
    #[default]
    Success = 0,

    /// Invalid argument provided (e.g., unparsable pattern or scope code)
    InvalidArgument = 1,

    /// Null pointer was passed where a valid pointer was required
    NullPointer = 2,

    /// Invalid UTF-8 encoding in string parameter
    InvalidUtf8 = 3,

    /// Directory does not exist
    PathNotFound = 4,

    /// Permission denied accessing path
    PermissionDenied = 5,

    /// I/O error during file operation
    IoError = 6,

    /// Target directory is an ancestor of the working directory
    UnsafeTarget = 7,

    /// Bulk operation ran to the end but at least one entry was left behind
    Incomplete = 8,

    /// JSON serialization/deserialization error
    JsonError = 12,

    /// Unknown or unclassified error
    Unknown = 255,
}

impl GlobkitStatus {
    #[inline]
    pub fn is_success(self) -> bool {
        self == GlobkitStatus::Success
    }

    #[inline]
    pub fn is_error(self) -> bool {
        self != GlobkitStatus::Success
    }

    /// Maps the aggregate flag of a bulk operation.
    pub fn from_aggregate(complete: bool) -> Self {
        if complete {
            GlobkitStatus::Success
        } else {
            GlobkitStatus::Incomplete
        }
    }

    /// Converts an I/O error kind to the appropriate status code.
    pub fn from_io_error(error: &io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => GlobkitStatus::PathNotFound,
            io::ErrorKind::PermissionDenied => GlobkitStatus::PermissionDenied,
            _ => GlobkitStatus::IoError,
        }
    }

    /// Returns a human-readable description of this status.
    pub fn description(self) -> &'static str {
        self.description_cstr().trim_end_matches('\0')
    }

    fn description_cstr(self) -> &'static str {
        match self {
            GlobkitStatus::Success => "Operation completed successfully\0",
            GlobkitStatus::InvalidArgument => "Invalid argument provided\0",
            GlobkitStatus::NullPointer => "Null pointer provided\0",
            GlobkitStatus::InvalidUtf8 => "Invalid UTF-8 encoding\0",
            GlobkitStatus::PathNotFound => "Directory does not exist\0",
            GlobkitStatus::PermissionDenied => "Permission denied\0",
            GlobkitStatus::IoError => "I/O error\0",
            GlobkitStatus::UnsafeTarget => "Target is an ancestor of the working directory\0",
            GlobkitStatus::Incomplete => "Some entries could not be processed\0",
            GlobkitStatus::JsonError => "JSON serialization error\0",
            GlobkitStatus::Unknown => "Unknown error\0",
        }
    }
}

impl From<&Error> for GlobkitStatus {
    fn from(error: &Error) -> Self {
        match error {
            Error::MissingDirectory(_) => GlobkitStatus::PathNotFound,
            Error::UnsafeTarget(_) => GlobkitStatus::UnsafeTarget,
            Error::Pattern { .. } => GlobkitStatus::InvalidArgument,
            Error::Io { source, .. } => GlobkitStatus::from_io_error(source),
            Error::Serialization(_) => GlobkitStatus::JsonError,
        }
    }
}

impl From<io::Error> for GlobkitStatus {
    fn from(error: io::Error) -> Self {
        GlobkitStatus::from_io_error(&error)
    }
}

/// Returns a human-readable description of a status code.
///
/// # Safety
/// The returned pointer is static. Do not free it.
#[no_mangle]
pub extern "C" fn globkit_status_description(status: GlobkitStatus) -> *const c_char {
    status.description_cstr().as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [GlobkitStatus; 11] = [
        GlobkitStatus::Success,
        GlobkitStatus::InvalidArgument,
        GlobkitStatus::NullPointer,
        GlobkitStatus::InvalidUtf8,
        GlobkitStatus::PathNotFound,
        GlobkitStatus::PermissionDenied,
        GlobkitStatus::IoError,
        GlobkitStatus::UnsafeTarget,
        GlobkitStatus::Incomplete,
        GlobkitStatus::JsonError,
        GlobkitStatus::Unknown,
    ];

    #[test]
    fn test_status_is_success() {
        assert!(GlobkitStatus::Success.is_success());
        assert!(!GlobkitStatus::Incomplete.is_success());
        assert!(GlobkitStatus::Unknown.is_error());
    }

    #[test]
    fn test_status_description_not_empty() {
        for status in ALL {
            assert!(!status.description().is_empty());
            assert!(!status.description().ends_with('\0'));
        }
    }

    #[test]
    fn test_default_is_success() {
        assert_eq!(GlobkitStatus::default(), GlobkitStatus::Success);
    }

    #[test]
    fn test_aggregate_mapping() {
        assert_eq!(GlobkitStatus::from_aggregate(true), GlobkitStatus::Success);
        assert_eq!(GlobkitStatus::from_aggregate(false), GlobkitStatus::Incomplete);
    }

    #[test]
    fn test_error_to_status() {
        let missing = Error::MissingDirectory(PathBuf::from("nope"));
        assert_eq!(GlobkitStatus::from(&missing), GlobkitStatus::PathNotFound);
        assert!(missing.to_string().contains("nope"));

        let denied = Error::io("x", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(GlobkitStatus::from(&denied), GlobkitStatus::PermissionDenied);

        let unsafe_target = Error::UnsafeTarget(PathBuf::from(".."));
        assert_eq!(GlobkitStatus::from(&unsafe_target), GlobkitStatus::UnsafeTarget);

        let bad = Error::pattern("[", "unclosed class");
        assert_eq!(GlobkitStatus::from(&bad), GlobkitStatus::InvalidArgument);
    }
}
