//! ### English
//! Owned window handle.
//!
//! ### 中文
//! 自有 window 句柄。

use std::ffi::c_int;
use std::ptr::NonNull;

use super::callbacks;
use super::error::Error;
use super::glfw::Glfw;
use super::input_types::WindowId;
use super::pending;
use super::strings;
use crate::native::{GLFW_FALSE, GLFW_TRUE, GLFWwindow, GlfwApi};

/// ### English
/// A GLFW window, destroyed on drop.
///
/// Holds a clone of the [`Glfw`] context, so the library outlives every window. Handlers
/// registered for the window are forgotten once the native window is gone. After an explicit
/// [`Glfw::terminate`] the native window no longer exists: every method then fails with
/// [`Error::Terminated`] without calling GLFW.
///
/// ### 中文
/// GLFW window，drop 时销毁。
///
/// 持有 [`Glfw`] 上下文的克隆，因此库的生命周期长于所有 window。原生 window 销毁后，为其注册的处理器会被移除。
/// 显式调用 [`Glfw::terminate`] 后原生 window 已不存在：此后所有方法都直接返回 [`Error::Terminated`]，
/// 不再调用 GLFW。
pub struct Window {
    raw: NonNull<GLFWwindow>,
    glfw: Glfw,
}

impl Window {
    pub(crate) fn new(raw: NonNull<GLFWwindow>, glfw: Glfw) -> Self {
        let window = Self { raw, glfw };
        tracing::debug!(window = window.id().key(), "window created");
        window
    }

    pub(crate) fn api(&self) -> &GlfwApi {
        self.glfw.api()
    }

    /// Native pointer for a call into GLFW; fails once the owning context is terminated.
    pub(crate) fn live_ptr(&self) -> Result<*mut GLFWwindow, Error> {
        if self.glfw.is_terminated() {
            return Err(Error::Terminated);
        }
        Ok(self.raw.as_ptr())
    }

    pub fn id(&self) -> WindowId {
        WindowId::from_raw(self.raw.as_ptr())
    }

    /// Native `GLFWwindow*`, for passing to other libraries that take a GLFW window. Dangling
    /// once the context is terminated.
    pub fn as_ptr(&self) -> *mut GLFWwindow {
        self.raw.as_ptr()
    }

    pub fn glfw(&self) -> &Glfw {
        &self.glfw
    }

    pub fn should_close(&self) -> Result<bool, Error> {
        let window = self.live_ptr()?;
        let value = unsafe { (self.api().glfw_window_should_close)(window) };
        pending::checked(value != GLFW_FALSE)
    }

    pub fn set_should_close(&self, value: bool) -> Result<(), Error> {
        let window = self.live_ptr()?;
        let value = if value { GLFW_TRUE } else { GLFW_FALSE };
        unsafe { (self.api().glfw_set_window_should_close)(window, value) };
        pending::check()
    }

    /// Fails with [`Error::InteriorNul`] before calling GLFW if `title` contains a NUL byte.
    pub fn set_title(&self, title: &str) -> Result<(), Error> {
        let window = self.live_ptr()?;
        let title = strings::to_native(title)?;
        unsafe { (self.api().glfw_set_window_title)(window, title.as_ptr()) };
        pending::check()
    }

    /// Size of the content area in screen coordinates.
    pub fn size(&self) -> Result<(i32, i32), Error> {
        let window = self.live_ptr()?;
        let (mut width, mut height): (c_int, c_int) = (0, 0);
        unsafe { (self.api().glfw_get_window_size)(window, &mut width, &mut height) };
        pending::checked((width, height))
    }

    /// ### English
    /// Reads the system clipboard. `None` when it is empty or cannot be converted.
    ///
    /// ### 中文
    /// 读取系统剪贴板；为空或无法转换时返回 `None`。
    pub fn clipboard_string(&self) -> Result<Option<String>, Error> {
        let window = self.live_ptr()?;
        let raw = pending::checked(unsafe { (self.api().glfw_get_clipboard_string)(window) })?;
        Ok(unsafe { strings::from_native(raw) })
    }

    pub fn set_clipboard_string(&self, value: &str) -> Result<(), Error> {
        let window = self.live_ptr()?;
        let value = strings::to_native(value)?;
        unsafe { (self.api().glfw_set_clipboard_string)(window, value.as_ptr()) };
        pending::check()
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        let id = self.id();
        // Terminate already destroyed the window and cleared every slot; a later context may
        // reuse the address.
        if self.glfw.is_terminated() {
            return;
        }

        unsafe { (self.api().glfw_destroy_window)(self.as_ptr()) };
        if let Err(err) = pending::check() {
            tracing::warn!(window = id.key(), error = %err, "glfwDestroyWindow reported an error");
        }
        callbacks::forget_window(id.key());
        tracing::debug!(window = id.key(), "window destroyed");
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window").field("id", &self.id()).finish()
    }
}
