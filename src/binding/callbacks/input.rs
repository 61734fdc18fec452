//! ### English
//! Input callbacks: key, character, mouse button, cursor position/enter, scroll and file drop.
//!
//! ### 中文
//! 输入回调：按键、字符、鼠标按键、光标位置/进入、滚轮以及文件拖放。

use std::ffi::{c_char, c_int, c_uint};
use std::path::PathBuf;
use std::sync::Arc;

use super::{CallbackSlot, Previous, dispatch, set_handler};
use crate::binding::error::Error;
use crate::binding::input_types::{Action, Key, Modifiers, MouseButton, WindowId};
use crate::binding::strings;
use crate::binding::window::Window;
use crate::native::{
    GLFW_FALSE, GLFWcharfun, GLFWcursorenterfun, GLFWcursorposfun, GLFWdropfun, GLFWkeyfun,
    GLFWmousebuttonfun, GLFWscrollfun, GLFWwindow,
};

pub type KeyHandler = dyn Fn(WindowId, Key, i32, Action, Modifiers) + Send + Sync;
pub type CharHandler = dyn Fn(WindowId, char) + Send + Sync;
pub type MouseButtonHandler = dyn Fn(WindowId, MouseButton, Action, Modifiers) + Send + Sync;
pub type CursorPosHandler = dyn Fn(WindowId, f64, f64) + Send + Sync;
pub type CursorEnterHandler = dyn Fn(WindowId, bool) + Send + Sync;
pub type ScrollHandler = dyn Fn(WindowId, f64, f64) + Send + Sync;
pub type DropHandler = dyn Fn(WindowId, &[PathBuf]) + Send + Sync;

static KEY: CallbackSlot<KeyHandler, GLFWkeyfun> = CallbackSlot::new("key", key_trampoline);
static CHAR: CallbackSlot<CharHandler, GLFWcharfun> = CallbackSlot::new("char", char_trampoline);
static MOUSE_BUTTON: CallbackSlot<MouseButtonHandler, GLFWmousebuttonfun> =
    CallbackSlot::new("mouse_button", mouse_button_trampoline);
static CURSOR_POS: CallbackSlot<CursorPosHandler, GLFWcursorposfun> =
    CallbackSlot::new("cursor_pos", cursor_pos_trampoline);
static CURSOR_ENTER: CallbackSlot<CursorEnterHandler, GLFWcursorenterfun> =
    CallbackSlot::new("cursor_enter", cursor_enter_trampoline);
static SCROLL: CallbackSlot<ScrollHandler, GLFWscrollfun> =
    CallbackSlot::new("scroll", scroll_trampoline);
static DROP: CallbackSlot<DropHandler, GLFWdropfun> = CallbackSlot::new("drop", drop_trampoline);

unsafe extern "C" fn key_trampoline(
    window: *mut GLFWwindow,
    key: c_int,
    scancode: c_int,
    action: c_int,
    mods: c_int,
) {
    let id = WindowId::from_raw(window);
    let Some(action) = Action::from_raw(action) else {
        tracing::debug!(action, "ignoring key event with unknown action");
        return;
    };
    let mods = Modifiers::from_bits_truncate(mods);
    dispatch(&KEY, id.key(), |handler| {
        handler(id, Key(key), scancode, action, mods)
    });
}

unsafe extern "C" fn char_trampoline(window: *mut GLFWwindow, codepoint: c_uint) {
    let id = WindowId::from_raw(window);
    let Some(ch) = char::from_u32(codepoint) else {
        tracing::debug!(codepoint, "ignoring invalid code point");
        return;
    };
    dispatch(&CHAR, id.key(), |handler| handler(id, ch));
}

unsafe extern "C" fn mouse_button_trampoline(
    window: *mut GLFWwindow,
    button: c_int,
    action: c_int,
    mods: c_int,
) {
    let id = WindowId::from_raw(window);
    let Some(action) = Action::from_raw(action) else {
        tracing::debug!(action, "ignoring mouse button event with unknown action");
        return;
    };
    let mods = Modifiers::from_bits_truncate(mods);
    dispatch(&MOUSE_BUTTON, id.key(), |handler| {
        handler(id, MouseButton(button), action, mods)
    });
}

unsafe extern "C" fn cursor_pos_trampoline(window: *mut GLFWwindow, x: f64, y: f64) {
    let id = WindowId::from_raw(window);
    dispatch(&CURSOR_POS, id.key(), |handler| handler(id, x, y));
}

unsafe extern "C" fn cursor_enter_trampoline(window: *mut GLFWwindow, entered: c_int) {
    let id = WindowId::from_raw(window);
    dispatch(&CURSOR_ENTER, id.key(), |handler| {
        handler(id, entered != GLFW_FALSE)
    });
}

unsafe extern "C" fn scroll_trampoline(window: *mut GLFWwindow, x: f64, y: f64) {
    let id = WindowId::from_raw(window);
    dispatch(&SCROLL, id.key(), |handler| handler(id, x, y));
}

unsafe extern "C" fn drop_trampoline(
    window: *mut GLFWwindow,
    count: c_int,
    paths: *mut *const c_char,
) {
    let id = WindowId::from_raw(window);
    if DROP.handler(id.key()).is_none() {
        return;
    }
    // The path array is only valid for the duration of this call.
    let paths = unsafe { strings::paths_from_native(count, paths) };
    dispatch(&DROP, id.key(), |handler| handler(id, &paths));
}

pub(super) fn forget(window: usize) {
    KEY.forget(window);
    CHAR.forget(window);
    MOUSE_BUTTON.forget(window);
    CURSOR_POS.forget(window);
    CURSOR_ENTER.forget(window);
    SCROLL.forget(window);
    DROP.forget(window);
}

pub(super) fn clear() {
    KEY.clear();
    CHAR.clear();
    MOUSE_BUTTON.clear();
    CURSOR_POS.clear();
    CURSOR_ENTER.clear();
    SCROLL.clear();
    DROP.clear();
}

impl Window {
    pub fn set_key_handler(
        &self,
        handler: Option<Arc<KeyHandler>>,
    ) -> Result<Previous<KeyHandler, GLFWkeyfun>, Error> {
        let (api, window) = (self.api(), self.live_ptr()?);
        set_handler(&KEY, self.id().key(), handler, |raw| unsafe {
            (api.glfw_set_key_callback)(window, raw)
        })
    }

    /// Unicode input; invalid code points reported by the platform are dropped.
    pub fn set_char_handler(
        &self,
        handler: Option<Arc<CharHandler>>,
    ) -> Result<Previous<CharHandler, GLFWcharfun>, Error> {
        let (api, window) = (self.api(), self.live_ptr()?);
        set_handler(&CHAR, self.id().key(), handler, |raw| unsafe {
            (api.glfw_set_char_callback)(window, raw)
        })
    }

    pub fn set_mouse_button_handler(
        &self,
        handler: Option<Arc<MouseButtonHandler>>,
    ) -> Result<Previous<MouseButtonHandler, GLFWmousebuttonfun>, Error> {
        let (api, window) = (self.api(), self.live_ptr()?);
        set_handler(&MOUSE_BUTTON, self.id().key(), handler, |raw| unsafe {
            (api.glfw_set_mouse_button_callback)(window, raw)
        })
    }

    pub fn set_cursor_pos_handler(
        &self,
        handler: Option<Arc<CursorPosHandler>>,
    ) -> Result<Previous<CursorPosHandler, GLFWcursorposfun>, Error> {
        let (api, window) = (self.api(), self.live_ptr()?);
        set_handler(&CURSOR_POS, self.id().key(), handler, |raw| unsafe {
            (api.glfw_set_cursor_pos_callback)(window, raw)
        })
    }

    pub fn set_cursor_enter_handler(
        &self,
        handler: Option<Arc<CursorEnterHandler>>,
    ) -> Result<Previous<CursorEnterHandler, GLFWcursorenterfun>, Error> {
        let (api, window) = (self.api(), self.live_ptr()?);
        set_handler(&CURSOR_ENTER, self.id().key(), handler, |raw| unsafe {
            (api.glfw_set_cursor_enter_callback)(window, raw)
        })
    }

    pub fn set_scroll_handler(
        &self,
        handler: Option<Arc<ScrollHandler>>,
    ) -> Result<Previous<ScrollHandler, GLFWscrollfun>, Error> {
        let (api, window) = (self.api(), self.live_ptr()?);
        set_handler(&SCROLL, self.id().key(), handler, |raw| unsafe {
            (api.glfw_set_scroll_callback)(window, raw)
        })
    }

    /// ### English
    /// Sets the file-drop handler. Paths are copied out before the handler runs.
    ///
    /// ### 中文
    /// 设置文件拖放处理器。路径会在处理器执行前被复制出来。
    pub fn set_drop_handler(
        &self,
        handler: Option<Arc<DropHandler>>,
    ) -> Result<Previous<DropHandler, GLFWdropfun>, Error> {
        let (api, window) = (self.api(), self.live_ptr()?);
        set_handler(&DROP, self.id().key(), handler, |raw| unsafe {
            (api.glfw_set_drop_callback)(window, raw)
        })
    }
}
