//! ### English
//! Window state callbacks: position, size, close, refresh, focus, iconify, framebuffer size.
//!
//! ### 中文
//! Window 状态回调：位置、尺寸、关闭、刷新、焦点、最小化、帧缓冲尺寸。

use std::ffi::c_int;
use std::sync::Arc;

use super::{CallbackSlot, Previous, dispatch, set_handler};
use crate::binding::error::Error;
use crate::binding::input_types::WindowId;
use crate::binding::window::Window;
use crate::native::{
    GLFW_FALSE, GLFWframebuffersizefun, GLFWwindow, GLFWwindowclosefun, GLFWwindowfocusfun,
    GLFWwindowiconifyfun, GLFWwindowposfun, GLFWwindowrefreshfun, GLFWwindowsizefun,
};

pub type WindowPosHandler = dyn Fn(WindowId, i32, i32) + Send + Sync;
pub type WindowSizeHandler = dyn Fn(WindowId, i32, i32) + Send + Sync;
pub type WindowCloseHandler = dyn Fn(WindowId) + Send + Sync;
pub type WindowRefreshHandler = dyn Fn(WindowId) + Send + Sync;
pub type WindowFocusHandler = dyn Fn(WindowId, bool) + Send + Sync;
pub type WindowIconifyHandler = dyn Fn(WindowId, bool) + Send + Sync;
pub type FramebufferSizeHandler = dyn Fn(WindowId, i32, i32) + Send + Sync;

static WINDOW_POS: CallbackSlot<WindowPosHandler, GLFWwindowposfun> =
    CallbackSlot::new("window_pos", window_pos_trampoline);
static WINDOW_SIZE: CallbackSlot<WindowSizeHandler, GLFWwindowsizefun> =
    CallbackSlot::new("window_size", window_size_trampoline);
static WINDOW_CLOSE: CallbackSlot<WindowCloseHandler, GLFWwindowclosefun> =
    CallbackSlot::new("window_close", window_close_trampoline);
static WINDOW_REFRESH: CallbackSlot<WindowRefreshHandler, GLFWwindowrefreshfun> =
    CallbackSlot::new("window_refresh", window_refresh_trampoline);
static WINDOW_FOCUS: CallbackSlot<WindowFocusHandler, GLFWwindowfocusfun> =
    CallbackSlot::new("window_focus", window_focus_trampoline);
static WINDOW_ICONIFY: CallbackSlot<WindowIconifyHandler, GLFWwindowiconifyfun> =
    CallbackSlot::new("window_iconify", window_iconify_trampoline);
static FRAMEBUFFER_SIZE: CallbackSlot<FramebufferSizeHandler, GLFWframebuffersizefun> =
    CallbackSlot::new("framebuffer_size", framebuffer_size_trampoline);

unsafe extern "C" fn window_pos_trampoline(window: *mut GLFWwindow, x: c_int, y: c_int) {
    let id = WindowId::from_raw(window);
    dispatch(&WINDOW_POS, id.key(), |handler| handler(id, x, y));
}

unsafe extern "C" fn window_size_trampoline(window: *mut GLFWwindow, width: c_int, height: c_int) {
    let id = WindowId::from_raw(window);
    dispatch(&WINDOW_SIZE, id.key(), |handler| handler(id, width, height));
}

unsafe extern "C" fn window_close_trampoline(window: *mut GLFWwindow) {
    let id = WindowId::from_raw(window);
    dispatch(&WINDOW_CLOSE, id.key(), |handler| handler(id));
}

unsafe extern "C" fn window_refresh_trampoline(window: *mut GLFWwindow) {
    let id = WindowId::from_raw(window);
    dispatch(&WINDOW_REFRESH, id.key(), |handler| handler(id));
}

unsafe extern "C" fn window_focus_trampoline(window: *mut GLFWwindow, focused: c_int) {
    let id = WindowId::from_raw(window);
    dispatch(&WINDOW_FOCUS, id.key(), |handler| {
        handler(id, focused != GLFW_FALSE)
    });
}

unsafe extern "C" fn window_iconify_trampoline(window: *mut GLFWwindow, iconified: c_int) {
    let id = WindowId::from_raw(window);
    dispatch(&WINDOW_ICONIFY, id.key(), |handler| {
        handler(id, iconified != GLFW_FALSE)
    });
}

unsafe extern "C" fn framebuffer_size_trampoline(
    window: *mut GLFWwindow,
    width: c_int,
    height: c_int,
) {
    let id = WindowId::from_raw(window);
    dispatch(&FRAMEBUFFER_SIZE, id.key(), |handler| handler(id, width, height));
}

pub(super) fn forget(window: usize) {
    WINDOW_POS.forget(window);
    WINDOW_SIZE.forget(window);
    WINDOW_CLOSE.forget(window);
    WINDOW_REFRESH.forget(window);
    WINDOW_FOCUS.forget(window);
    WINDOW_ICONIFY.forget(window);
    FRAMEBUFFER_SIZE.forget(window);
}

pub(super) fn clear() {
    WINDOW_POS.clear();
    WINDOW_SIZE.clear();
    WINDOW_CLOSE.clear();
    WINDOW_REFRESH.clear();
    WINDOW_FOCUS.clear();
    WINDOW_ICONIFY.clear();
    FRAMEBUFFER_SIZE.clear();
}

impl Window {
    /// ### English
    /// Sets (or with `None`, removes) the window position handler.
    ///
    /// Returns whatever was installed before. All handler setters on `Window` follow this
    /// contract. A handler is kept until it is replaced, the window is dropped or GLFW
    /// terminates, so it should capture a [`WeakGlfw`](crate::WeakGlfw) rather than a `Glfw`.
    ///
    /// ### 中文
    /// 设置（传 `None` 时移除）window 位置处理器。
    ///
    /// 返回之前安装的内容。`Window` 上的所有处理器 setter 都遵循该约定。处理器会一直保留到被替换、
    /// window 被 drop 或 GLFW terminate，因此应捕获 [`WeakGlfw`](crate::WeakGlfw) 而不是 `Glfw`。
    pub fn set_pos_handler(
        &self,
        handler: Option<Arc<WindowPosHandler>>,
    ) -> Result<Previous<WindowPosHandler, GLFWwindowposfun>, Error> {
        let (api, window) = (self.api(), self.live_ptr()?);
        set_handler(&WINDOW_POS, self.id().key(), handler, |raw| unsafe {
            (api.glfw_set_window_pos_callback)(window, raw)
        })
    }

    pub fn set_size_handler(
        &self,
        handler: Option<Arc<WindowSizeHandler>>,
    ) -> Result<Previous<WindowSizeHandler, GLFWwindowsizefun>, Error> {
        let (api, window) = (self.api(), self.live_ptr()?);
        set_handler(&WINDOW_SIZE, self.id().key(), handler, |raw| unsafe {
            (api.glfw_set_window_size_callback)(window, raw)
        })
    }

    pub fn set_close_handler(
        &self,
        handler: Option<Arc<WindowCloseHandler>>,
    ) -> Result<Previous<WindowCloseHandler, GLFWwindowclosefun>, Error> {
        let (api, window) = (self.api(), self.live_ptr()?);
        set_handler(&WINDOW_CLOSE, self.id().key(), handler, |raw| unsafe {
            (api.glfw_set_window_close_callback)(window, raw)
        })
    }

    pub fn set_refresh_handler(
        &self,
        handler: Option<Arc<WindowRefreshHandler>>,
    ) -> Result<Previous<WindowRefreshHandler, GLFWwindowrefreshfun>, Error> {
        let (api, window) = (self.api(), self.live_ptr()?);
        set_handler(&WINDOW_REFRESH, self.id().key(), handler, |raw| unsafe {
            (api.glfw_set_window_refresh_callback)(window, raw)
        })
    }

    pub fn set_focus_handler(
        &self,
        handler: Option<Arc<WindowFocusHandler>>,
    ) -> Result<Previous<WindowFocusHandler, GLFWwindowfocusfun>, Error> {
        let (api, window) = (self.api(), self.live_ptr()?);
        set_handler(&WINDOW_FOCUS, self.id().key(), handler, |raw| unsafe {
            (api.glfw_set_window_focus_callback)(window, raw)
        })
    }

    pub fn set_iconify_handler(
        &self,
        handler: Option<Arc<WindowIconifyHandler>>,
    ) -> Result<Previous<WindowIconifyHandler, GLFWwindowiconifyfun>, Error> {
        let (api, window) = (self.api(), self.live_ptr()?);
        set_handler(&WINDOW_ICONIFY, self.id().key(), handler, |raw| unsafe {
            (api.glfw_set_window_iconify_callback)(window, raw)
        })
    }

    pub fn set_framebuffer_size_handler(
        &self,
        handler: Option<Arc<FramebufferSizeHandler>>,
    ) -> Result<Previous<FramebufferSizeHandler, GLFWframebuffersizefun>, Error> {
        let (api, window) = (self.api(), self.live_ptr()?);
        set_handler(&FRAMEBUFFER_SIZE, self.id().key(), handler, |raw| unsafe {
            (api.glfw_set_framebuffer_size_callback)(window, raw)
        })
    }
}
