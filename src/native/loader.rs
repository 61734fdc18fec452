//! ### English
//! Opens GLFW as a shared library and resolves the function table by name.
//!
//! ### 中文
//! 以动态库方式打开 GLFW，并按名解析函数表。

use libloading::Library;

use super::GlfwApi;
use crate::binding::{Error, LibrarySearch};

/// ### English
/// Tries every candidate in order and returns the table of the first library that opens.
///
/// A library that opens but lacks a symbol is an error on its own (not a reason to keep
/// searching): it means a mismatched GLFW build is on the search path.
///
/// ### 中文
/// 按顺序尝试每个候选路径，返回第一个能打开的库所解析出的函数表。
///
/// 能打开但缺少符号的库会直接报错（不会继续尝试下一个），因为这说明搜索路径上存在不匹配的 GLFW 构建。
pub(super) fn open(search: &LibrarySearch) -> Result<GlfwApi, Error> {
    let mut tried = Vec::with_capacity(search.candidates().len());

    for candidate in search.candidates() {
        let name = candidate.display().to_string();
        match unsafe { Library::new(candidate) } {
            Ok(library) => {
                let api = unsafe { GlfwApi::from_library(library, &name)? };
                tracing::info!(library = %name, "loaded GLFW");
                return Ok(api);
            }
            Err(err) => {
                tracing::debug!(library = %name, error = %err, "GLFW candidate failed to load");
                tried.push(name);
            }
        }
    }

    Err(Error::Load {
        tried: tried.join(", "),
    })
}
