//! C FFI exports for .NET interop.
//!
//! Every call returns a [`GlobkitStatus`]. A bulk operation that ran to the
//! end but left something behind returns `Incomplete`.

use std::os::raw::c_char;

use globkit_core::{c_str_to_str, json_to_buffer, GlobkitStatus, GlobkitStringBuffer, Result};

use crate::config::{CreateOptions, ProvisionSpec, Scope};
use crate::list::{KindFilter, ListStyle};
use crate::Globkit;

fn status_of(result: Result<bool>) -> GlobkitStatus {
    match result {
        Ok(complete) => GlobkitStatus::from_aggregate(complete),
        Err(e) => {
            log::debug!("operation failed: {}", e);
            GlobkitStatus::from(&e)
        }
    }
}

/// Get crate version (returns 1 for v0.1.0)
#[no_mangle]
pub extern "C" fn globkit_fs_version() -> u32 {
    1
}

/// Installs an `env_logger` logger filtered by `GLOBKIT_LOG` (default
/// `warn`). Returns false if a logger was already installed.
#[no_mangle]
pub extern "C" fn globkit_init_logging() -> bool {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("GLOBKIT_LOG", "warn"))
        .try_init()
        .is_ok()
}

/// Deletes the files matching `pattern`.
///
/// # Safety
/// - `pattern` must be a valid null-terminated UTF-8 string
#[no_mangle]
pub unsafe extern "C" fn globkit_remove(pattern: *const c_char) -> GlobkitStatus {
    let pattern = match c_str_to_str(pattern) {
        Ok(s) => s,
        Err(e) => return e,
    };
    status_of(Globkit::new().remove(pattern))
}

/// Purges a directory. `scope`: 1 = files, 2 = content.
///
/// # Safety
/// - `directory` must be a valid null-terminated UTF-8 string
#[no_mangle]
pub unsafe extern "C" fn globkit_purge(directory: *const c_char, scope: u32) -> GlobkitStatus {
    let directory = match c_str_to_str(directory) {
        Ok(s) => s,
        Err(e) => return e,
    };
    let scope = match Scope::from_code(scope) {
        Ok(Some(scope)) => scope,
        _ => return GlobkitStatus::InvalidArgument,
    };
    status_of(Globkit::new().purge(directory, scope))
}

/// Creates a directory unless it exists.
///
/// `purge`: 0 = leave existing content, 1 = files, 2 = content.
/// `mode`: permission bits for a new directory, 0 for the default.
///
/// # Safety
/// - `path` must be a valid null-terminated UTF-8 string
#[no_mangle]
pub unsafe extern "C" fn globkit_make_dir(
    path: *const c_char,
    chain: bool,
    purge: u32,
    mode: u32,
) -> GlobkitStatus {
    let path = match c_str_to_str(path) {
        Ok(s) => s,
        Err(e) => return e,
    };
    let purge = match Scope::from_code(purge) {
        Ok(purge) => purge,
        Err(_) => return GlobkitStatus::InvalidArgument,
    };
    let options = CreateOptions {
        mode: (mode != 0).then_some(mode),
    };
    status_of(Globkit::new().provision(path, chain, purge, &options))
}

/// Provisions a directory from a JSON [`ProvisionSpec`].
///
/// # Safety
/// - `json` must be a valid null-terminated UTF-8 string
#[no_mangle]
pub unsafe extern "C" fn globkit_provision_json(json: *const c_char) -> GlobkitStatus {
    let json = match c_str_to_str(json) {
        Ok(s) => s,
        Err(e) => return e,
    };
    status_of(ProvisionSpec::from_json(json).and_then(|spec| Globkit::new().apply(&spec)))
}

/// Removes an empty directory. Absent directories are a success.
///
/// # Safety
/// - `path` must be a valid null-terminated UTF-8 string
#[no_mangle]
pub unsafe extern "C" fn globkit_remove_dir(path: *const c_char, silent: bool) -> GlobkitStatus {
    let path = match c_str_to_str(path) {
        Ok(s) => s,
        Err(e) => return e,
    };
    status_of(Globkit::new().remove_dir(path, silent))
}

/// Removes `root/path` and then its empty parents up to `root`.
///
/// # Safety
/// - `path` must be a valid null-terminated UTF-8 string
/// - `root` must be null (current directory) or a valid null-terminated
///   UTF-8 string
#[no_mangle]
pub unsafe extern "C" fn globkit_remove_dir_chain(
    path: *const c_char,
    root: *const c_char,
    silent: bool,
) -> GlobkitStatus {
    let path = match c_str_to_str(path) {
        Ok(s) => s,
        Err(e) => return e,
    };
    let root = if root.is_null() {
        ""
    } else {
        match c_str_to_str(root) {
            Ok(s) => s,
            Err(e) => return e,
        }
    };
    status_of(Globkit::new().remove_dir_chain(path, root, silent))
}

/// Lists entries matching `pattern` as a JSON array of strings.
///
/// `style`: 0 = names, 1 = absolute paths, 2 = raw.
/// `filter`: 0 = all, 1 = directories, 2 = files, 3 = symlinks.
///
/// # Safety
/// - `pattern` must be a valid null-terminated UTF-8 string
/// - Caller must free the returned buffer with `globkit_free_string_buffer`
#[no_mangle]
pub unsafe extern "C" fn globkit_list_entries_json(
    pattern: *const c_char,
    style: u32,
    filter: u32,
) -> GlobkitStringBuffer {
    let pattern = match c_str_to_str(pattern) {
        Ok(s) => s,
        Err(e) => return GlobkitStringBuffer::error(e),
    };
    let (style, filter) = match (ListStyle::from_code(style), KindFilter::from_code(filter)) {
        (Ok(style), Ok(filter)) => (style, filter),
        _ => return GlobkitStringBuffer::error(GlobkitStatus::InvalidArgument),
    };

    match Globkit::new().list_entries(pattern, style, filter) {
        Ok(paths) => {
            let paths: Vec<String> = paths
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect();
            json_to_buffer(&paths)
        }
        Err(e) => GlobkitStringBuffer::error(GlobkitStatus::from(&e)),
    }
}
