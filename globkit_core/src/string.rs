//! String buffer utilities for FFI.
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use crate::error::GlobkitStatus;

/// Owned, null-terminated string handed to FFI callers.
///
/// Must be released with `globkit_free_string_buffer`.
#[repr(C)]
#[derive(Debug)]
pub struct GlobkitStringBuffer {
    pub status: GlobkitStatus,
    pub data: *mut c_char,
    pub length: usize,
}

impl GlobkitStringBuffer {
    pub fn from_string(s: &str) -> Self {
        match CString::new(s) {
            Ok(c_string) => {
                let len = c_string.as_bytes().len();
                Self { status: GlobkitStatus::Success, data: c_string.into_raw(), length: len }
            }
            Err(_) => Self::error(GlobkitStatus::InvalidUtf8),
        }
    }

    pub fn error(status: GlobkitStatus) -> Self {
        Self { status, data: std::ptr::null_mut(), length: 0 }
    }

    pub fn is_valid(&self) -> bool {
        self.status.is_success() && !self.data.is_null()
    }

    /// Borrows the buffer contents, if any.
    pub fn as_str(&self) -> Option<&str> {
        if self.data.is_null() {
            return None;
        }
        unsafe { CStr::from_ptr(self.data) }.to_str().ok()
    }
}

/// Releases the data owned by a buffer returned from this library.
#[no_mangle]
pub extern "C" fn globkit_free_string_buffer(buffer: *mut GlobkitStringBuffer) {
    if !buffer.is_null() {
        let buf = unsafe { &mut *buffer };
        if !buf.data.is_null() {
            unsafe {
                let _ = CString::from_raw(buf.data);
            }
            buf.data = std::ptr::null_mut();
            buf.length = 0;
        }
    }
}

/// Borrows a C string as UTF-8.
///
/// # Safety
/// `ptr` must be null or point to a valid null-terminated string that
/// outlives the returned reference.
pub unsafe fn c_str_to_str<'a>(ptr: *const c_char) -> Result<&'a str, GlobkitStatus> {
    if ptr.is_null() {
        return Err(GlobkitStatus::NullPointer);
    }
    CStr::from_ptr(ptr).to_str().map_err(|_| GlobkitStatus::InvalidUtf8)
}

pub fn json_to_buffer<T: serde::Serialize>(value: &T) -> GlobkitStringBuffer {
    match serde_json::to_string(value) {
        Ok(json) => GlobkitStringBuffer::from_string(&json),
        Err(_) => GlobkitStringBuffer::error(GlobkitStatus::JsonError),
    }
}
