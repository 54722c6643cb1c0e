//! globkit core - shared types for the globkit filesystem layer
//!
//! Status codes and the error enum, path classification helpers, and the
//! FFI string buffer used by `globkit_fs`.

use std::os::raw::c_char;

pub mod error;
pub mod path;
pub mod string;

pub use error::{Error, GlobkitStatus, Result};
pub use path::{expand_path, extension_of, name_of, normalize_path, path_of, split_pattern, split_pattern_with, stem_of, PatternParts};
pub use string::{c_str_to_str, json_to_buffer, GlobkitStringBuffer};

include!(concat!(env!("OUT_DIR"), "/version.rs"));

#[no_mangle]
pub extern "C" fn globkit_core_version() -> *const c_char {
    VERSION_CSTR.as_ptr() as *const c_char
}
