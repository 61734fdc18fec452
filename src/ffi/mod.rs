//! ### English
//! C ABI surface for `glfw_shim`.
//!
//! Lets a host that already loaded GLFW (e.g. a JVM through LWJGL) hand its function table to
//! the binding before any `Glfw` context is created. All exported symbols are `extern "C"`
//! functions; structs are `#[repr(C)]`.
//!
//! ### 中文
//! `glfw_shim` 的 C ABI 接口层。
//!
//! 让已经加载了 GLFW 的宿主（例如通过 LWJGL 的 JVM）在创建任何 `Glfw` 上下文之前把函数表交给绑定层。
//! 所有导出符号均为 `extern "C"` 函数；结构体使用 `#[repr(C)]`。
mod abi;
mod glfw;

pub use abi::glfw_shim_abi_version;
pub use glfw::glfw_shim_set_glfw_api;

/// ### English
/// C ABI version of `glfw_shim`. Bumped whenever `EmbedderGlfwApi` changes layout.
///
/// ### 中文
/// `glfw_shim` 的 C ABI 版本号。`EmbedderGlfwApi` 布局变化时递增。
pub const GLFW_SHIM_ABI_VERSION: u32 = 1;
