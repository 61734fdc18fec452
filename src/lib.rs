/// ### English
/// `glfw_shim` crate root.
/// The safe binding is re-exported at the root; raw declarations live under `native` and the
/// exported C ABI under `ffi`.
///
/// ### 中文
/// `glfw_shim` 的 crate 根。
/// 安全绑定在根部重新导出；原始声明位于 `native`，导出的 C ABI 位于 `ffi`。
mod binding;
pub mod ffi;
pub mod native;

pub use binding::*;
