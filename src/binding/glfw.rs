//! ### English
//! Library context: initialization, termination and the process-level GLFW calls.
//!
//! Every method follows the same contract: call the native function, then take the calling
//! thread's pending error before returning.
//!
//! ### 中文
//! 库上下文：初始化、终止以及进程级 GLFW 调用。
//!
//! 每个方法都遵循同一约定：调用原生函数，然后在返回前取走调用线程的待处理错误。

use std::ffi::{c_char, c_int};
use std::ptr::{self, NonNull};
use std::sync::{Arc, Weak};
use std::sync::atomic::{AtomicBool, Ordering};

use super::callbacks;
use super::error::Error;
use super::gamma;
use super::input_types::{Key, Monitor};
use super::pending;
use super::strings;
use super::window::Window;
use crate::native::{GLFW_FALSE, GLFW_TRUE, GLFWerrorfun, GlfwApi};

/// At most one live context per process.
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// ### English
/// Handle to an initialized GLFW library.
///
/// Clones share one context; GLFW is terminated when the last clone (including the clones held
/// by windows) is dropped, or explicitly through [`Glfw::terminate`].
///
/// Registered handlers live until terminate. A handler that captures a `Glfw` clone therefore
/// keeps the context alive on its own, and only an explicit [`Glfw::terminate`] ends it.
/// Handlers that need the context should capture a [`WeakGlfw`] from [`Glfw::downgrade`].
///
/// ### 中文
/// 已初始化 GLFW 库的句柄。
///
/// 各克隆共享同一上下文；当最后一个克隆（包括 window 持有的克隆）被 drop 时，或显式调用
/// [`Glfw::terminate`] 时，GLFW 会被终止。
///
/// 已注册的处理器会一直存活到 terminate。因此捕获了 `Glfw` 克隆的处理器会自行维持上下文存活，
/// 只有显式调用 [`Glfw::terminate`] 才能结束它。需要访问上下文的处理器应捕获 [`Glfw::downgrade`]
/// 得到的 [`WeakGlfw`]。
#[derive(Clone)]
pub struct Glfw {
    inner: Arc<Inner>,
}

/// ### English
/// Non-owning handle to a [`Glfw`] context, for capturing in handlers.
///
/// ### 中文
/// 指向 [`Glfw`] 上下文的非持有句柄，供处理器捕获使用。
#[derive(Clone)]
pub struct WeakGlfw {
    inner: Weak<Inner>,
}

impl WeakGlfw {
    /// `None` once the context has been terminated or dropped.
    pub fn upgrade(&self) -> Option<Glfw> {
        let inner = self.inner.upgrade()?;
        if inner.terminated.load(Ordering::Acquire) {
            return None;
        }
        Some(Glfw { inner })
    }
}

struct Inner {
    api: GlfwApi,
    terminated: AtomicBool,
    /// Error callback installed by someone else before init, put back at terminate.
    foreign_error_callback: Option<GLFWerrorfun>,
}

impl Inner {
    fn terminate(&self) -> Result<(), Error> {
        if self.terminated.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        unsafe { (self.api.glfw_terminate)() };
        let result = pending::check();

        // No native callback can fire past this point.
        callbacks::clear_all();
        gamma::release_all();
        if let Some(foreign) = self.foreign_error_callback {
            unsafe { (self.api.glfw_set_error_callback)(Some(foreign)) };
            tracing::debug!("restored the foreign GLFW error callback");
        }
        INITIALIZED.store(false, Ordering::Release);
        tracing::debug!("GLFW terminated");
        result
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Err(err) = self.terminate() {
            tracing::warn!(error = %err, "glfwTerminate reported an error");
        }
    }
}

impl Glfw {
    /// ### English
    /// Initializes GLFW through `api`.
    ///
    /// The binding's error callback is installed before `glfwInit`, so initialization failures
    /// surface as typed errors. On success the calling thread's pending error slot is cleared.
    ///
    /// An error callback installed earlier by someone else receives nothing while the context is
    /// alive. It is reinstalled when the context terminates, or right away if `glfwInit` fails.
    ///
    /// ### 中文
    /// 通过 `api` 初始化 GLFW。
    ///
    /// 绑定层的错误回调会在 `glfwInit` 之前安装，因此初始化失败会以强类型错误返回。
    /// 成功后会清空调用线程的待处理错误槽。
    ///
    /// 此前由他人安装的错误回调在上下文存活期间不会收到任何错误；上下文 terminate 时
    /// （或 `glfwInit` 失败时）会被重新安装。
    pub fn init(api: GlfwApi) -> Result<Self, Error> {
        if INITIALIZED.swap(true, Ordering::AcqRel) {
            return Err(Error::AlreadyInitialized);
        }

        let trampoline: GLFWerrorfun = pending::error_callback;
        let previous = unsafe { (api.glfw_set_error_callback)(Some(trampoline)) };
        let foreign_error_callback =
            previous.filter(|&previous| previous as usize != trampoline as usize);
        if foreign_error_callback.is_some() {
            tracing::debug!("replaced a foreign GLFW error callback");
        }

        if unsafe { (api.glfw_init)() } == GLFW_FALSE {
            let err = pending::take().map_or(Error::InitFailed, |pending| pending.into_error());
            if let Some(foreign) = foreign_error_callback {
                unsafe { (api.glfw_set_error_callback)(Some(foreign)) };
            }
            INITIALIZED.store(false, Ordering::Release);
            return Err(err);
        }
        pending::clear();

        let glfw = Self {
            inner: Arc::new(Inner {
                api,
                terminated: AtomicBool::new(false),
                foreign_error_callback,
            }),
        };
        let (major, minor, revision) = glfw.version();
        tracing::info!(major, minor, revision, "GLFW initialized");
        Ok(glfw)
    }

    /// ### English
    /// Terminates GLFW now, even if other clones are alive.
    ///
    /// Windows still alive afterwards are not destroyed again on drop, and their methods fail
    /// with [`Error::Terminated`]. Registered handlers and tracked gamma ramps are released
    /// after the native call returns.
    ///
    /// ### 中文
    /// 立即终止 GLFW，即使还有其它克隆存活。
    ///
    /// 之后仍存活的 window 在 drop 时不会被再次销毁，其方法会返回 [`Error::Terminated`]。已注册的处理器和跟踪的 gamma ramp 会在原生调用返回后释放。
    pub fn terminate(self) -> Result<(), Error> {
        self.inner.terminate()
    }

    pub fn downgrade(&self) -> WeakGlfw {
        WeakGlfw {
            inner: Arc::downgrade(&self.inner),
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.inner.terminated.load(Ordering::Acquire)
    }

    pub(crate) fn api(&self) -> &GlfwApi {
        &self.inner.api
    }

    /// Version of the loaded library. Never fails.
    pub fn version(&self) -> (i32, i32, i32) {
        let (mut major, mut minor, mut revision): (c_int, c_int, c_int) = (0, 0, 0);
        unsafe { (self.api().glfw_get_version)(&mut major, &mut minor, &mut revision) };
        (major, minor, revision)
    }

    /// Compile-time configuration string of the loaded library. Never fails.
    pub fn version_string(&self) -> String {
        let raw = unsafe { (self.api().glfw_get_version_string)() };
        unsafe { strings::from_native(raw) }.unwrap_or_default()
    }

    pub fn poll_events(&self) -> Result<(), Error> {
        unsafe { (self.api().glfw_poll_events)() };
        pending::check()
    }

    /// Blocks in native code until at least one event arrives.
    pub fn wait_events(&self) -> Result<(), Error> {
        unsafe { (self.api().glfw_wait_events)() };
        pending::check()
    }

    pub fn wait_events_timeout(&self, timeout: f64) -> Result<(), Error> {
        unsafe { (self.api().glfw_wait_events_timeout)(timeout) };
        pending::check()
    }

    pub fn post_empty_event(&self) -> Result<(), Error> {
        unsafe { (self.api().glfw_post_empty_event)() };
        pending::check()
    }

    pub fn default_window_hints(&self) -> Result<(), Error> {
        unsafe { (self.api().glfw_default_window_hints)() };
        pending::check()
    }

    pub fn window_hint(&self, hint: i32, value: i32) -> Result<(), Error> {
        unsafe { (self.api().glfw_window_hint)(hint, value) };
        pending::check()
    }

    /// ### English
    /// Creates a window using the current window hints.
    ///
    /// ### 中文
    /// 使用当前 window hints 创建 window。
    pub fn create_window(
        &self,
        width: i32,
        height: i32,
        title: &str,
        monitor: Option<Monitor>,
        share: Option<&Window>,
    ) -> Result<Window, Error> {
        let title = strings::to_native(title)?;
        let monitor = monitor.map_or(ptr::null_mut(), Monitor::as_ptr);
        let share = share.map(Window::live_ptr).transpose()?.unwrap_or(ptr::null_mut());

        let raw = pending::checked(unsafe {
            (self.api().glfw_create_window)(width, height, title.as_ptr(), monitor, share)
        })?;
        let raw = NonNull::new(raw).ok_or(Error::NullResult("glfwCreateWindow"))?;
        Ok(Window::new(raw, self.clone()))
    }

    pub fn monitors(&self) -> Result<Vec<Monitor>, Error> {
        let mut count: c_int = 0;
        let list = pending::checked(unsafe { (self.api().glfw_get_monitors)(&mut count) })?;
        if list.is_null() || count <= 0 {
            return Ok(Vec::new());
        }
        let raw = unsafe { std::slice::from_raw_parts(list, count as usize) };
        Ok(raw.iter().filter_map(|&monitor| Monitor::from_raw(monitor)).collect())
    }

    /// `None` when no monitor is connected.
    pub fn primary_monitor(&self) -> Result<Option<Monitor>, Error> {
        let raw = pending::checked(unsafe { (self.api().glfw_get_primary_monitor)() })?;
        Ok(Monitor::from_raw(raw))
    }

    pub fn monitor_name(&self, monitor: Monitor) -> Result<Option<String>, Error> {
        let raw = unsafe { (self.api().glfw_get_monitor_name)(monitor.as_ptr()) };
        self.owned_string(raw)
    }

    pub fn joystick_present(&self, jid: i32) -> Result<bool, Error> {
        let present = unsafe { (self.api().glfw_joystick_present)(jid) };
        pending::checked(present == GLFW_TRUE)
    }

    pub fn joystick_name(&self, jid: i32) -> Result<Option<String>, Error> {
        let raw = unsafe { (self.api().glfw_get_joystick_name)(jid) };
        self.owned_string(raw)
    }

    /// Axis values in `-1.0..=1.0`; empty when the joystick is absent.
    pub fn joystick_axes(&self, jid: i32) -> Result<Vec<f32>, Error> {
        let mut count: c_int = 0;
        let axes =
            pending::checked(unsafe { (self.api().glfw_get_joystick_axes)(jid, &mut count) })?;
        if axes.is_null() || count <= 0 {
            return Ok(Vec::new());
        }
        Ok(unsafe { std::slice::from_raw_parts(axes, count as usize) }.to_vec())
    }

    /// Pressed state per button; empty when the joystick is absent.
    pub fn joystick_buttons(&self, jid: i32) -> Result<Vec<bool>, Error> {
        let mut count: c_int = 0;
        let buttons =
            pending::checked(unsafe { (self.api().glfw_get_joystick_buttons)(jid, &mut count) })?;
        if buttons.is_null() || count <= 0 {
            return Ok(Vec::new());
        }
        let raw = unsafe { std::slice::from_raw_parts(buttons, count as usize) };
        Ok(raw.iter().map(|&state| c_int::from(state) != GLFW_FALSE).collect())
    }

    /// Layout-specific printable name of a key, if it has one.
    pub fn key_name(&self, key: Key, scancode: i32) -> Result<Option<String>, Error> {
        let raw = unsafe { (self.api().glfw_get_key_name)(key.0, scancode) };
        self.owned_string(raw)
    }

    /// Checks, then copies a string GLFW owns.
    fn owned_string(&self, raw: *const c_char) -> Result<Option<String>, Error> {
        let raw = pending::checked(raw)?;
        Ok(unsafe { strings::from_native(raw) })
    }
}
