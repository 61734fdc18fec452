//! ### English
//! Typed errors surfaced by the binding.
//!
//! Native GLFW errors map one-to-one onto [`ErrorKind`]; the remaining [`Error`] variants are
//! raised by the binding itself (validation, loading, lifecycle misuse) before or instead of a
//! native call.
//!
//! ### 中文
//! 绑定层对外暴露的强类型错误。
//!
//! 原生 GLFW 错误与 [`ErrorKind`] 一一对应；其余 [`Error`] 变体由绑定层自身产生
//! （参数校验、加载、生命周期误用），发生在原生调用之前或代替原生调用。

use std::ffi::c_int;
use std::fmt;

use crate::native::{
    GLFW_API_UNAVAILABLE, GLFW_FORMAT_UNAVAILABLE, GLFW_INVALID_ENUM, GLFW_INVALID_VALUE,
    GLFW_NO_CURRENT_CONTEXT, GLFW_NO_WINDOW_CONTEXT, GLFW_NOT_INITIALIZED, GLFW_OUT_OF_MEMORY,
    GLFW_PLATFORM_ERROR, GLFW_VERSION_UNAVAILABLE,
};

/// ### English
/// Closed set of native GLFW error codes.
///
/// ### 中文
/// GLFW 原生错误码的封闭集合。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotInitialized,
    NoCurrentContext,
    InvalidEnum,
    InvalidValue,
    OutOfMemory,
    ApiUnavailable,
    VersionUnavailable,
    PlatformError,
    FormatUnavailable,
    NoWindowContext,
}

/// Who is expected to act on an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The call itself was wrong (bad enum/value/argument).
    Caller,
    /// The host cannot provide what was asked for.
    Environment,
    /// Calls were made in the wrong order or state.
    Lifecycle,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 10] = [
        ErrorKind::NotInitialized,
        ErrorKind::NoCurrentContext,
        ErrorKind::InvalidEnum,
        ErrorKind::InvalidValue,
        ErrorKind::OutOfMemory,
        ErrorKind::ApiUnavailable,
        ErrorKind::VersionUnavailable,
        ErrorKind::PlatformError,
        ErrorKind::FormatUnavailable,
        ErrorKind::NoWindowContext,
    ];

    /// ### English
    /// Maps a native error code to its kind. `None` means the code is outside the known set.
    ///
    /// ### 中文
    /// 将原生错误码映射为错误类型；返回 `None` 表示该错误码不在已知集合内。
    pub fn from_code(code: c_int) -> Option<Self> {
        let kind = match code {
            GLFW_NOT_INITIALIZED => Self::NotInitialized,
            GLFW_NO_CURRENT_CONTEXT => Self::NoCurrentContext,
            GLFW_INVALID_ENUM => Self::InvalidEnum,
            GLFW_INVALID_VALUE => Self::InvalidValue,
            GLFW_OUT_OF_MEMORY => Self::OutOfMemory,
            GLFW_API_UNAVAILABLE => Self::ApiUnavailable,
            GLFW_VERSION_UNAVAILABLE => Self::VersionUnavailable,
            GLFW_PLATFORM_ERROR => Self::PlatformError,
            GLFW_FORMAT_UNAVAILABLE => Self::FormatUnavailable,
            GLFW_NO_WINDOW_CONTEXT => Self::NoWindowContext,
            _ => return None,
        };
        Some(kind)
    }

    pub fn code(self) -> c_int {
        match self {
            Self::NotInitialized => GLFW_NOT_INITIALIZED,
            Self::NoCurrentContext => GLFW_NO_CURRENT_CONTEXT,
            Self::InvalidEnum => GLFW_INVALID_ENUM,
            Self::InvalidValue => GLFW_INVALID_VALUE,
            Self::OutOfMemory => GLFW_OUT_OF_MEMORY,
            Self::ApiUnavailable => GLFW_API_UNAVAILABLE,
            Self::VersionUnavailable => GLFW_VERSION_UNAVAILABLE,
            Self::PlatformError => GLFW_PLATFORM_ERROR,
            Self::FormatUnavailable => GLFW_FORMAT_UNAVAILABLE,
            Self::NoWindowContext => GLFW_NO_WINDOW_CONTEXT,
        }
    }

    pub fn category(self) -> ErrorCategory {
        match self {
            Self::InvalidEnum | Self::InvalidValue => ErrorCategory::Caller,
            Self::OutOfMemory
            | Self::ApiUnavailable
            | Self::VersionUnavailable
            | Self::PlatformError
            | Self::FormatUnavailable => ErrorCategory::Environment,
            Self::NotInitialized | Self::NoCurrentContext | Self::NoWindowContext => {
                ErrorCategory::Lifecycle
            }
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::NotInitialized => "not initialized",
            Self::NoCurrentContext => "no current context",
            Self::InvalidEnum => "invalid enum",
            Self::InvalidValue => "invalid value",
            Self::OutOfMemory => "out of memory",
            Self::ApiUnavailable => "API unavailable",
            Self::VersionUnavailable => "version unavailable",
            Self::PlatformError => "platform error",
            Self::FormatUnavailable => "format unavailable",
            Self::NoWindowContext => "no window context",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by every fallible binding call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error reported by GLFW through its error callback during the call.
    #[error("GLFW error ({kind}): {description}")]
    Native { kind: ErrorKind, description: String },

    #[error("gamma ramp channels differ in length (red {red}, green {green}, blue {blue})")]
    GammaRampMismatch {
        red: usize,
        green: usize,
        blue: usize,
    },

    #[error("gamma ramp has no entries")]
    EmptyGammaRamp,

    #[error("gamma ramp of {0} entries exceeds the native size field")]
    GammaRampTooLarge(usize),

    /// Outgoing string cannot be passed as a C string.
    #[error("string contains an interior NUL byte at offset {position}")]
    InteriorNul { position: usize },

    #[error("GLFW is already initialized in this process")]
    AlreadyInitialized,

    /// The context this handle belongs to was terminated; its native pointer is stale.
    #[error("the GLFW context owning this handle was terminated")]
    Terminated,

    #[error("an embedder GLFW function table is already installed")]
    AlreadyInstalled,

    #[error("glfwInit failed without reporting an error")]
    InitFailed,

    /// A native call returned NULL but left no pending error behind.
    #[error("{0} returned NULL without reporting an error")]
    NullResult(&'static str),

    #[error("GLFW function table entry `{0}` is NULL")]
    MissingSymbol(&'static str),

    #[error("GLFW library {library} is missing symbol `{symbol}`")]
    Symbol {
        library: String,
        symbol: &'static str,
        #[source]
        source: libloading::Error,
    },

    #[error("failed to load GLFW (tried: {tried})")]
    Load { tried: String },
}

impl Error {
    /// Native error kind, if this error came from GLFW.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Native { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Native { kind, .. } => kind.category(),
            Self::GammaRampMismatch { .. }
            | Self::EmptyGammaRamp
            | Self::GammaRampTooLarge(_)
            | Self::InteriorNul { .. } => ErrorCategory::Caller,
            Self::AlreadyInitialized | Self::AlreadyInstalled | Self::Terminated => {
                ErrorCategory::Lifecycle
            }
            Self::InitFailed
            | Self::NullResult(_)
            | Self::MissingSymbol(_)
            | Self::Symbol { .. }
            | Self::Load { .. } => ErrorCategory::Environment,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
