//! ### English
//! String marshalling between Rust and GLFW.
//!
//! GLFW takes and returns NUL-terminated UTF-8. Outgoing strings are validated before the native
//! call; incoming strings are copied out immediately because GLFW may reuse the buffer.
//!
//! ### 中文
//! Rust 与 GLFW 之间的字符串编组。
//!
//! GLFW 收发以 NUL 结尾的 UTF-8。传出字符串在原生调用前校验；传入字符串会立即复制，因为 GLFW 可能复用缓冲区。

use std::ffi::{CStr, CString, c_char, c_int};
use std::path::PathBuf;

use super::error::Error;

/// Converts an outgoing string, rejecting interior NUL bytes.
pub(crate) fn to_native(value: &str) -> Result<CString, Error> {
    CString::new(value).map_err(|err| Error::InteriorNul {
        position: err.nul_position(),
    })
}

/// ### English
/// Copies a native string into an owned `String` (lossy UTF-8). NULL yields `None`.
///
/// # Safety
/// `ptr` must be NULL or point to a NUL-terminated string valid for the duration of the call.
///
/// ### 中文
/// 将原生字符串复制为自有 `String`（有损 UTF-8 解码）；NULL 返回 `None`。
///
/// # Safety
/// `ptr` 必须为 NULL，或在本次调用期间指向有效的 NUL 结尾字符串。
pub(crate) unsafe fn from_native(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
}

/// ### English
/// Copies a native `(count, char**)` list. NULL entries are skipped.
///
/// # Safety
/// `list` must be NULL or point to `count` readable string pointers.
///
/// ### 中文
/// 复制原生 `(count, char**)` 列表；NULL 条目会被跳过。
///
/// # Safety
/// `list` 必须为 NULL，或指向 `count` 个可读的字符串指针。
pub(crate) unsafe fn from_native_list(count: c_int, list: *const *const c_char) -> Vec<String> {
    if list.is_null() || count <= 0 {
        return Vec::new();
    }

    let entries = unsafe { std::slice::from_raw_parts(list, count as usize) };
    entries
        .iter()
        .filter_map(|&entry| unsafe { from_native(entry) })
        .collect()
}

/// Same as [`from_native_list`], for dropped file paths.
pub(crate) unsafe fn paths_from_native(count: c_int, list: *const *const c_char) -> Vec<PathBuf> {
    unsafe { from_native_list(count, list) }
        .into_iter()
        .map(PathBuf::from)
        .collect()
}
