//! ### English
//! Per-thread pending error slot fed by the native error callback.
//!
//! GLFW reports errors by invoking its error callback on the thread where the error occurred,
//! synchronously inside the failing call. The trampoline below copies the description into an
//! owned string (the native buffer is only valid during the callback) and parks it in a
//! thread-local slot; every binding call then takes the slot before returning to the caller.
//!
//! ### 中文
//! 由原生错误回调写入的每线程待处理错误槽。
//!
//! GLFW 在发生错误的线程上、在出错的调用内部同步调用错误回调。下面的 trampoline 会把描述字符串
//! 复制为自有字符串（原生缓冲区只在回调期间有效），并放入线程局部槽；每次绑定调用返回调用方前都会取走该槽。

use std::cell::Cell;
use std::ffi::{CStr, c_char, c_int};

use super::error::{Error, ErrorKind};

/// One unconsumed native error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingError {
    pub(crate) code: c_int,
    pub(crate) description: String,
}

impl PendingError {
    /// ### English
    /// Converts into a typed error.
    ///
    /// Panics on a code outside the closed set: that is a binding bug, not a caller error.
    ///
    /// ### 中文
    /// 转换为强类型错误。
    ///
    /// 若错误码不在封闭集合内则 panic：这是绑定层缺陷，而不是调用方错误。
    pub(crate) fn into_error(self) -> Error {
        match ErrorKind::from_code(self.code) {
            Some(kind) => Error::Native {
                kind,
                description: self.description,
            },
            None => unreachable!(
                "GLFW reported unrecognized error code {:#x}: {}",
                self.code, self.description
            ),
        }
    }
}

thread_local! {
    static PENDING: Cell<Option<PendingError>> = const { Cell::new(None) };
}

/// Native-callable error callback installed by `Glfw::init`.
pub(crate) unsafe extern "C" fn error_callback(code: c_int, description: *const c_char) {
    let description = if description.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(description) }
            .to_string_lossy()
            .into_owned()
    };
    tracing::debug!(code = format_args!("{code:#x}"), %description, "GLFW reported an error");

    let error = PendingError { code, description };
    if let Some(dropped) = PENDING.replace(Some(error)) {
        tracing::warn!(
            code = format_args!("{:#x}", dropped.code),
            description = %dropped.description,
            "unconsumed GLFW error overwritten"
        );
    }
}

pub(crate) fn clear() {
    PENDING.set(None);
}

pub(crate) fn take() -> Option<PendingError> {
    PENDING.take()
}

/// ### English
/// Takes the calling thread's pending error, if any.
///
/// ### 中文
/// 取走调用线程的待处理错误（如果有）。
#[inline]
pub(crate) fn check() -> Result<(), Error> {
    match take() {
        Some(pending) => Err(pending.into_error()),
        None => Ok(()),
    }
}

/// Passes `value` through when the call that produced it left no pending error.
#[inline]
pub(crate) fn checked<T>(value: T) -> Result<T, Error> {
    check().map(|()| value)
}
