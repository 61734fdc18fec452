//! ### English
//! Callback marshalling.
//!
//! GLFW callbacks are plain C function pointers without user data. Each event kind therefore has
//! one static trampoline and one process-wide [`CallbackSlot`] mapping a target (window address,
//! or [`PROCESS_WIDE`] for joystick/monitor events) to the registered Rust handler. Installing a
//! handler installs the trampoline through the native setter; removing it passes NULL.
//!
//! ### 中文
//! 回调编组。
//!
//! GLFW 回调是不带 user data 的 C 函数指针。因此每种事件都有一个静态 trampoline，以及一个进程级
//! [`CallbackSlot`]，把目标（window 地址，或 joystick/monitor 事件使用的 [`PROCESS_WIDE`]）映射到已注册的
//! Rust 处理器。安装处理器时通过原生 setter 安装 trampoline；移除时传入 NULL。

mod device;
mod input;
mod window;

use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;

use super::error::Error;
use super::pending;

pub use device::{JoystickHandler, MonitorHandler};
pub use input::{
    CharHandler, CursorEnterHandler, CursorPosHandler, DropHandler, KeyHandler,
    MouseButtonHandler, ScrollHandler,
};
pub use window::{
    FramebufferSizeHandler, WindowCloseHandler, WindowFocusHandler, WindowIconifyHandler,
    WindowPosHandler, WindowRefreshHandler, WindowSizeHandler,
};

pub(crate) use device::{JOYSTICK, MONITOR};

/// Target key used by slots that are not tied to a window.
pub(crate) const PROCESS_WIDE: usize = 0;

/// ### English
/// A native callback function pointer type.
///
/// ### 中文
/// 原生回调函数指针类型。
pub trait NativeCallback: Copy {
    fn addr(self) -> usize;
}

macro_rules! native_callback {
    ($($ty:ty),* $(,)?) => {
        $(
            impl NativeCallback for $ty {
                #[inline]
                fn addr(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

// One entry per distinct signature: the size/framebuffer-size, refresh, iconify/cursor-enter
// and scroll aliases share these types.
native_callback!(
    crate::native::GLFWwindowposfun,
    crate::native::GLFWwindowclosefun,
    crate::native::GLFWwindowfocusfun,
    crate::native::GLFWkeyfun,
    crate::native::GLFWcharfun,
    crate::native::GLFWmousebuttonfun,
    crate::native::GLFWcursorposfun,
    crate::native::GLFWdropfun,
    crate::native::GLFWjoystickfun,
    crate::native::GLFWmonitorfun,
);

/// ### English
/// What was installed before a handler was replaced.
///
/// ### 中文
/// 替换处理器之前安装的内容。
pub enum Previous<H: ?Sized, F> {
    /// Nothing was installed.
    None,
    /// A handler previously registered through this binding.
    Handler(Arc<H>),
    /// A native function pointer installed by someone else (e.g. the embedder).
    Foreign(F),
}

impl<H: ?Sized, F> Previous<H, F> {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn into_handler(self) -> Option<Arc<H>> {
        match self {
            Self::Handler(handler) => Some(handler),
            _ => None,
        }
    }
}

impl<H: ?Sized, F: std::fmt::Debug> std::fmt::Debug for Previous<H, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Handler(handler) => f
                .debug_tuple("Handler")
                .field(&Arc::as_ptr(handler).cast::<()>())
                .finish(),
            Self::Foreign(raw) => f.debug_tuple("Foreign").field(raw).finish(),
        }
    }
}

/// ### English
/// Handlers registered for one event kind, keyed by target.
///
/// ### 中文
/// 某一事件类型的已注册处理器，按目标索引。
pub(crate) struct CallbackSlot<H: ?Sized, F> {
    /// ### English
    /// Event name used in logs.
    ///
    /// ### 中文
    /// 日志中使用的事件名。
    name: &'static str,
    /// ### English
    /// Static trampoline forwarding native invocations to `handlers`.
    ///
    /// ### 中文
    /// 将原生调用转发到 `handlers` 的静态 trampoline。
    trampoline: F,
    handlers: Mutex<BTreeMap<usize, Arc<H>>>,
}

impl<H: ?Sized, F: NativeCallback> CallbackSlot<H, F> {
    pub(crate) const fn new(name: &'static str, trampoline: F) -> Self {
        Self {
            name,
            trampoline,
            handlers: parking_lot::const_mutex(BTreeMap::new()),
        }
    }

    /// ### English
    /// Replaces the handler for `target`.
    ///
    /// `install` performs the native setter call: it receives the trampoline (or `None` to
    /// uninstall) and returns what the native side had installed. The slot lock is held across
    /// it, so the handler map and the native state change together; if `install` fails the map
    /// is left untouched.
    ///
    /// ### 中文
    /// 替换 `target` 的处理器。
    ///
    /// `install` 执行原生 setter 调用：它接收 trampoline（或 `None` 表示卸载），并返回原生侧之前安装的内容。
    /// 整个过程持有槽锁，因此处理器表与原生状态一起变化；若 `install` 失败，处理器表保持不变。
    pub(crate) fn replace(
        &self,
        target: usize,
        handler: Option<Arc<H>>,
        install: impl FnOnce(Option<F>) -> Result<Option<F>, Error>,
    ) -> Result<Previous<H, F>, Error> {
        let mut handlers = self.handlers.lock();
        let installed = install(handler.as_ref().map(|_| self.trampoline))?;

        let ours = match handler {
            Some(handler) => handlers.insert(target, handler),
            None => handlers.remove(&target),
        };
        tracing::trace!(
            event = self.name,
            target,
            installed = handlers.contains_key(&target),
            "callback replaced"
        );

        Ok(match installed {
            None => {
                if ours.is_some() {
                    tracing::warn!(
                        event = self.name,
                        target,
                        "native callback was cleared outside the binding"
                    );
                }
                Previous::None
            }
            Some(raw) if raw.addr() == self.trampoline.addr() => match ours {
                Some(handler) => Previous::Handler(handler),
                None => Previous::None,
            },
            Some(raw) => Previous::Foreign(raw),
        })
    }

    /// Cloned out so the lock is not held while the handler runs.
    pub(crate) fn handler(&self, target: usize) -> Option<Arc<H>> {
        self.handlers.lock().get(&target).cloned()
    }

    pub(crate) fn forget(&self, target: usize) {
        self.handlers.lock().remove(&target);
    }

    pub(crate) fn clear(&self) {
        self.handlers.lock().clear();
    }
}

/// Runs `call` on the handler registered for `target`, keeping panics on the Rust side.
pub(crate) fn dispatch<H: ?Sized, F: NativeCallback>(
    slot: &CallbackSlot<H, F>,
    target: usize,
    call: impl FnOnce(&H),
) {
    let Some(handler) = slot.handler(target) else {
        return;
    };
    if panic::catch_unwind(AssertUnwindSafe(|| call(&handler))).is_err() {
        tracing::error!(event = slot.name, target, "event handler panicked");
    }
}

/// Installs or removes a handler and checks the native setter for errors.
pub(crate) fn set_handler<H: ?Sized, F: NativeCallback>(
    slot: &CallbackSlot<H, F>,
    target: usize,
    handler: Option<Arc<H>>,
    setter: impl FnOnce(Option<F>) -> Option<F>,
) -> Result<Previous<H, F>, Error> {
    slot.replace(target, handler, |raw| pending::checked(setter(raw)))
}

/// Drops every handler registered for a destroyed window.
pub(crate) fn forget_window(window: usize) {
    window::forget(window);
    input::forget(window);
}

/// Drops every handler (after terminate).
pub(crate) fn clear_all() {
    window::clear();
    input::clear();
    JOYSTICK.clear();
    MONITOR.clear();
}
