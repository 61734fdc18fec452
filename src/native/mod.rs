//! ### English
//! Raw GLFW declarations: opaque handles, the gamma-ramp layout, callback signatures and the
//! constants the binding needs. Nothing here checks errors; see the crate root for the safe layer.
//!
//! ### 中文
//! GLFW 原始声明：不透明句柄、gamma ramp 布局、回调签名以及绑定层需要的常量。
//! 这里不做任何错误检查；安全封装见 crate 根。
#![allow(non_camel_case_types)]

mod api;
mod loader;

use std::ffi::{c_char, c_int, c_uint};

pub use api::{EmbedderGlfwApi, GlfwApi, install_embedder_api};

#[repr(C)]
/// ### English
/// Opaque GLFW window type (`GLFWwindow`).
///
/// ### 中文
/// 不透明 GLFW window 类型（`GLFWwindow`）。
pub struct GLFWwindow {
    _private: [u8; 0],
}

#[repr(C)]
/// ### English
/// Opaque GLFW monitor type (`GLFWmonitor`).
///
/// ### 中文
/// 不透明 GLFW monitor 类型（`GLFWmonitor`）。
pub struct GLFWmonitor {
    _private: [u8; 0],
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
/// ### English
/// Native gamma ramp: three channel pointers sharing one element count.
///
/// ### 中文
/// 原生 gamma ramp：三个通道指针共享同一个元素数量。
pub struct GLFWgammaramp {
    pub red: *mut u16,
    pub green: *mut u16,
    pub blue: *mut u16,
    pub size: c_uint,
}

pub type GLFWerrorfun = unsafe extern "C" fn(c_int, *const c_char);
pub type GLFWwindowposfun = unsafe extern "C" fn(*mut GLFWwindow, c_int, c_int);
pub type GLFWwindowsizefun = unsafe extern "C" fn(*mut GLFWwindow, c_int, c_int);
pub type GLFWwindowclosefun = unsafe extern "C" fn(*mut GLFWwindow);
pub type GLFWwindowrefreshfun = unsafe extern "C" fn(*mut GLFWwindow);
pub type GLFWwindowfocusfun = unsafe extern "C" fn(*mut GLFWwindow, c_int);
pub type GLFWwindowiconifyfun = unsafe extern "C" fn(*mut GLFWwindow, c_int);
pub type GLFWframebuffersizefun = unsafe extern "C" fn(*mut GLFWwindow, c_int, c_int);
pub type GLFWkeyfun = unsafe extern "C" fn(*mut GLFWwindow, c_int, c_int, c_int, c_int);
pub type GLFWcharfun = unsafe extern "C" fn(*mut GLFWwindow, c_uint);
pub type GLFWmousebuttonfun = unsafe extern "C" fn(*mut GLFWwindow, c_int, c_int, c_int);
pub type GLFWcursorposfun = unsafe extern "C" fn(*mut GLFWwindow, f64, f64);
pub type GLFWcursorenterfun = unsafe extern "C" fn(*mut GLFWwindow, c_int);
pub type GLFWscrollfun = unsafe extern "C" fn(*mut GLFWwindow, f64, f64);
pub type GLFWdropfun = unsafe extern "C" fn(*mut GLFWwindow, c_int, *mut *const c_char);
pub type GLFWjoystickfun = unsafe extern "C" fn(c_int, c_int);
pub type GLFWmonitorfun = unsafe extern "C" fn(*mut GLFWmonitor, c_int);

pub const GLFW_FALSE: c_int = 0;
pub const GLFW_TRUE: c_int = 1;

pub const GLFW_NO_ERROR: c_int = 0;
pub const GLFW_NOT_INITIALIZED: c_int = 0x0001_0001;
pub const GLFW_NO_CURRENT_CONTEXT: c_int = 0x0001_0002;
pub const GLFW_INVALID_ENUM: c_int = 0x0001_0003;
pub const GLFW_INVALID_VALUE: c_int = 0x0001_0004;
pub const GLFW_OUT_OF_MEMORY: c_int = 0x0001_0005;
pub const GLFW_API_UNAVAILABLE: c_int = 0x0001_0006;
pub const GLFW_VERSION_UNAVAILABLE: c_int = 0x0001_0007;
pub const GLFW_PLATFORM_ERROR: c_int = 0x0001_0008;
pub const GLFW_FORMAT_UNAVAILABLE: c_int = 0x0001_0009;
pub const GLFW_NO_WINDOW_CONTEXT: c_int = 0x0001_000A;

pub const GLFW_RELEASE: c_int = 0;
pub const GLFW_PRESS: c_int = 1;
pub const GLFW_REPEAT: c_int = 2;

pub const GLFW_MOD_SHIFT: c_int = 0x0001;
pub const GLFW_MOD_CONTROL: c_int = 0x0002;
pub const GLFW_MOD_ALT: c_int = 0x0004;
pub const GLFW_MOD_SUPER: c_int = 0x0008;
pub const GLFW_MOD_CAPS_LOCK: c_int = 0x0010;
pub const GLFW_MOD_NUM_LOCK: c_int = 0x0020;

pub const GLFW_CONNECTED: c_int = 0x0004_0001;
pub const GLFW_DISCONNECTED: c_int = 0x0004_0002;

pub const GLFW_FOCUSED: c_int = 0x0002_0001;
pub const GLFW_RESIZABLE: c_int = 0x0002_0003;
pub const GLFW_VISIBLE: c_int = 0x0002_0004;
pub const GLFW_CLIENT_API: c_int = 0x0002_2001;
pub const GLFW_NO_API: c_int = 0;
