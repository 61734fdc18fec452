//! ### English
//! Where to look for the GLFW shared library.
//!
//! ### 中文
//! GLFW 动态库的查找位置。

use std::env;
use std::ffi::OsStr;
use std::path::PathBuf;

/// Environment variable overriding the default candidates (platform path-list syntax).
pub const GLFW_LIBRARY_ENV: &str = "GLFW_LIBRARY";

#[cfg(windows)]
const DEFAULT_CANDIDATES: &[&str] = &["glfw3.dll", "glfw.dll"];
#[cfg(target_os = "macos")]
const DEFAULT_CANDIDATES: &[&str] = &["libglfw.3.dylib", "libglfw.dylib"];
#[cfg(not(any(windows, target_os = "macos")))]
const DEFAULT_CANDIDATES: &[&str] = &["libglfw.so.3", "libglfw.so"];

/// ### English
/// Ordered list of library paths (or bare names resolved by the OS loader) to try.
///
/// ### 中文
/// 按顺序尝试的库路径列表（或交给系统加载器解析的库名）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibrarySearch {
    candidates: Vec<PathBuf>,
}

impl Default for LibrarySearch {
    fn default() -> Self {
        Self::from_env()
    }
}

impl LibrarySearch {
    /// Exactly `candidates`, in order.
    pub fn new<I>(candidates: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PathBuf>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    /// Platform default names only.
    pub fn platform_default() -> Self {
        Self {
            candidates: DEFAULT_CANDIDATES.iter().map(PathBuf::from).collect(),
        }
    }

    /// ### English
    /// Uses `GLFW_LIBRARY` when set and non-empty, otherwise the platform defaults.
    ///
    /// ### 中文
    /// 若设置了非空的 `GLFW_LIBRARY` 则使用它，否则使用平台默认值。
    pub fn from_env() -> Self {
        match env::var_os(GLFW_LIBRARY_ENV) {
            Some(value) if !value.is_empty() => Self::from_path_list(&value),
            _ => Self::platform_default(),
        }
    }

    fn from_path_list(value: &OsStr) -> Self {
        Self {
            candidates: env::split_paths(value)
                .filter(|path| !path.as_os_str().is_empty())
                .collect(),
        }
    }

    /// Builder-style: tries `path` before every existing candidate.
    pub fn with_candidate(mut self, path: impl Into<PathBuf>) -> Self {
        self.candidates.insert(0, path.into());
        self
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }
}
