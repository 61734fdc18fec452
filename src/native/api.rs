//! ### English
//! GLFW function table.
//!
//! The table is either handed in by an embedder that already loaded GLFW (raw addresses, see
//! [`EmbedderGlfwApi`]) or resolved by name from a shared library. Both paths produce the same
//! typed [`GlfwApi`].
//!
//! ### 中文
//! GLFW 函数表。
//!
//! 函数表要么由已经加载了 GLFW 的宿主提供（原始地址，见 [`EmbedderGlfwApi`]），
//! 要么从动态库按名解析。两条路径都会得到同样的强类型 [`GlfwApi`]。

use std::ffi::{c_char, c_int};
use std::sync::{Arc, OnceLock};

use libloading::Library;

use super::{
    GLFWcharfun, GLFWcursorenterfun, GLFWcursorposfun, GLFWdropfun, GLFWerrorfun,
    GLFWframebuffersizefun, GLFWgammaramp, GLFWjoystickfun, GLFWkeyfun, GLFWmonitor,
    GLFWmonitorfun, GLFWmousebuttonfun, GLFWscrollfun, GLFWwindow, GLFWwindowclosefun,
    GLFWwindowfocusfun, GLFWwindowiconifyfun, GLFWwindowposfun, GLFWwindowrefreshfun,
    GLFWwindowsizefun,
};
use crate::binding::Error;

macro_rules! glfw_api {
    ($($field:ident => $symbol:literal : $ty:ty;)*) => {
        #[repr(C)]
        #[derive(Clone, Copy, Default, Debug)]
        /// ### English
        /// Function pointer table for GLFW symbols provided by the embedder (e.g. Java/LWJGL).
        ///
        /// All fields are raw addresses (`usize`) and must be non-zero when installing.
        ///
        /// ### 中文
        /// 由宿主（例如 Java/LWJGL）提供的 GLFW 符号函数指针表。
        ///
        /// 所有字段都是原始地址（`usize`），安装时必须全部为非 0。
        pub struct EmbedderGlfwApi {
            $(pub $field: usize,)*
        }

        #[derive(Clone)]
        /// ### English
        /// Typed GLFW entry points used by the binding.
        ///
        /// When resolved from a shared library the library handle is kept alive for as long as
        /// any clone of the table exists.
        ///
        /// ### 中文
        /// 绑定层使用的强类型 GLFW 入口。
        ///
        /// 若从动态库解析，只要函数表的任一副本存在，库句柄就保持存活。
        pub struct GlfwApi {
            $(pub(crate) $field: $ty,)*
            library: Option<Arc<Library>>,
        }

        impl GlfwApi {
            /// ### English
            /// Builds a typed table from embedder-provided addresses.
            ///
            /// Fails with [`Error::MissingSymbol`] naming the first zero entry.
            ///
            /// ### 中文
            /// 用宿主提供的地址构建强类型函数表。
            ///
            /// 若存在为 0 的条目，返回指出第一个此类条目的 [`Error::MissingSymbol`]。
            pub fn from_embedder(api: &EmbedderGlfwApi) -> Result<Self, Error> {
                $(
                    if api.$field == 0 {
                        return Err(Error::MissingSymbol($symbol));
                    }
                )*

                Ok(Self {
                    $($field: unsafe { std::mem::transmute::<usize, $ty>(api.$field) },)*
                    library: None,
                })
            }

            /// # Safety
            /// `library` must be a GLFW 3.3+ build; symbol signatures are trusted, not checked.
            pub(super) unsafe fn from_library(library: Library, name: &str) -> Result<Self, Error> {
                $(
                    let $field: $ty = unsafe {
                        *library
                            .get::<$ty>(concat!($symbol, "\0").as_bytes())
                            .map_err(|source| Error::Symbol {
                                library: name.to_string(),
                                symbol: $symbol,
                                source,
                            })?
                    };
                )*

                Ok(Self {
                    $($field,)*
                    library: Some(Arc::new(library)),
                })
            }
        }
    };
}

glfw_api! {
    glfw_init => "glfwInit": unsafe extern "C" fn() -> c_int;
    glfw_terminate => "glfwTerminate": unsafe extern "C" fn();
    glfw_get_version => "glfwGetVersion": unsafe extern "C" fn(*mut c_int, *mut c_int, *mut c_int);
    glfw_get_version_string => "glfwGetVersionString": unsafe extern "C" fn() -> *const c_char;
    glfw_set_error_callback => "glfwSetErrorCallback":
        unsafe extern "C" fn(Option<GLFWerrorfun>) -> Option<GLFWerrorfun>;

    glfw_default_window_hints => "glfwDefaultWindowHints": unsafe extern "C" fn();
    glfw_window_hint => "glfwWindowHint": unsafe extern "C" fn(c_int, c_int);
    glfw_create_window => "glfwCreateWindow": unsafe extern "C" fn(
        c_int,
        c_int,
        *const c_char,
        *mut GLFWmonitor,
        *mut GLFWwindow,
    ) -> *mut GLFWwindow;
    glfw_destroy_window => "glfwDestroyWindow": unsafe extern "C" fn(*mut GLFWwindow);
    glfw_window_should_close => "glfwWindowShouldClose": unsafe extern "C" fn(*mut GLFWwindow) -> c_int;
    glfw_set_window_should_close => "glfwSetWindowShouldClose": unsafe extern "C" fn(*mut GLFWwindow, c_int);
    glfw_set_window_title => "glfwSetWindowTitle": unsafe extern "C" fn(*mut GLFWwindow, *const c_char);
    glfw_get_window_size => "glfwGetWindowSize":
        unsafe extern "C" fn(*mut GLFWwindow, *mut c_int, *mut c_int);
    glfw_get_clipboard_string => "glfwGetClipboardString":
        unsafe extern "C" fn(*mut GLFWwindow) -> *const c_char;
    glfw_set_clipboard_string => "glfwSetClipboardString":
        unsafe extern "C" fn(*mut GLFWwindow, *const c_char);

    glfw_poll_events => "glfwPollEvents": unsafe extern "C" fn();
    glfw_wait_events => "glfwWaitEvents": unsafe extern "C" fn();
    glfw_wait_events_timeout => "glfwWaitEventsTimeout": unsafe extern "C" fn(f64);
    glfw_post_empty_event => "glfwPostEmptyEvent": unsafe extern "C" fn();

    glfw_get_monitors => "glfwGetMonitors": unsafe extern "C" fn(*mut c_int) -> *mut *mut GLFWmonitor;
    glfw_get_primary_monitor => "glfwGetPrimaryMonitor": unsafe extern "C" fn() -> *mut GLFWmonitor;
    glfw_get_monitor_name => "glfwGetMonitorName": unsafe extern "C" fn(*mut GLFWmonitor) -> *const c_char;
    glfw_set_gamma => "glfwSetGamma": unsafe extern "C" fn(*mut GLFWmonitor, f32);
    glfw_get_gamma_ramp => "glfwGetGammaRamp":
        unsafe extern "C" fn(*mut GLFWmonitor) -> *const GLFWgammaramp;
    glfw_set_gamma_ramp => "glfwSetGammaRamp":
        unsafe extern "C" fn(*mut GLFWmonitor, *const GLFWgammaramp);

    glfw_joystick_present => "glfwJoystickPresent": unsafe extern "C" fn(c_int) -> c_int;
    glfw_get_joystick_name => "glfwGetJoystickName": unsafe extern "C" fn(c_int) -> *const c_char;
    glfw_get_joystick_axes => "glfwGetJoystickAxes": unsafe extern "C" fn(c_int, *mut c_int) -> *const f32;
    glfw_get_joystick_buttons => "glfwGetJoystickButtons":
        unsafe extern "C" fn(c_int, *mut c_int) -> *const u8;
    glfw_get_key_name => "glfwGetKeyName": unsafe extern "C" fn(c_int, c_int) -> *const c_char;

    glfw_set_window_pos_callback => "glfwSetWindowPosCallback":
        unsafe extern "C" fn(*mut GLFWwindow, Option<GLFWwindowposfun>) -> Option<GLFWwindowposfun>;
    glfw_set_window_size_callback => "glfwSetWindowSizeCallback":
        unsafe extern "C" fn(*mut GLFWwindow, Option<GLFWwindowsizefun>) -> Option<GLFWwindowsizefun>;
    glfw_set_window_close_callback => "glfwSetWindowCloseCallback":
        unsafe extern "C" fn(*mut GLFWwindow, Option<GLFWwindowclosefun>) -> Option<GLFWwindowclosefun>;
    glfw_set_window_refresh_callback => "glfwSetWindowRefreshCallback":
        unsafe extern "C" fn(*mut GLFWwindow, Option<GLFWwindowrefreshfun>) -> Option<GLFWwindowrefreshfun>;
    glfw_set_window_focus_callback => "glfwSetWindowFocusCallback":
        unsafe extern "C" fn(*mut GLFWwindow, Option<GLFWwindowfocusfun>) -> Option<GLFWwindowfocusfun>;
    glfw_set_window_iconify_callback => "glfwSetWindowIconifyCallback":
        unsafe extern "C" fn(*mut GLFWwindow, Option<GLFWwindowiconifyfun>) -> Option<GLFWwindowiconifyfun>;
    glfw_set_framebuffer_size_callback => "glfwSetFramebufferSizeCallback":
        unsafe extern "C" fn(*mut GLFWwindow, Option<GLFWframebuffersizefun>) -> Option<GLFWframebuffersizefun>;
    glfw_set_key_callback => "glfwSetKeyCallback":
        unsafe extern "C" fn(*mut GLFWwindow, Option<GLFWkeyfun>) -> Option<GLFWkeyfun>;
    glfw_set_char_callback => "glfwSetCharCallback":
        unsafe extern "C" fn(*mut GLFWwindow, Option<GLFWcharfun>) -> Option<GLFWcharfun>;
    glfw_set_mouse_button_callback => "glfwSetMouseButtonCallback":
        unsafe extern "C" fn(*mut GLFWwindow, Option<GLFWmousebuttonfun>) -> Option<GLFWmousebuttonfun>;
    glfw_set_cursor_pos_callback => "glfwSetCursorPosCallback":
        unsafe extern "C" fn(*mut GLFWwindow, Option<GLFWcursorposfun>) -> Option<GLFWcursorposfun>;
    glfw_set_cursor_enter_callback => "glfwSetCursorEnterCallback":
        unsafe extern "C" fn(*mut GLFWwindow, Option<GLFWcursorenterfun>) -> Option<GLFWcursorenterfun>;
    glfw_set_scroll_callback => "glfwSetScrollCallback":
        unsafe extern "C" fn(*mut GLFWwindow, Option<GLFWscrollfun>) -> Option<GLFWscrollfun>;
    glfw_set_drop_callback => "glfwSetDropCallback":
        unsafe extern "C" fn(*mut GLFWwindow, Option<GLFWdropfun>) -> Option<GLFWdropfun>;
    glfw_set_joystick_callback => "glfwSetJoystickCallback":
        unsafe extern "C" fn(Option<GLFWjoystickfun>) -> Option<GLFWjoystickfun>;
    glfw_set_monitor_callback => "glfwSetMonitorCallback":
        unsafe extern "C" fn(Option<GLFWmonitorfun>) -> Option<GLFWmonitorfun>;
}

static EMBEDDER_GLFW_API: OnceLock<GlfwApi> = OnceLock::new();

/// ### English
/// Installs the embedder-provided GLFW function table for this process.
///
/// This is a one-time installation backed by `OnceLock`; repeated calls fail with
/// [`Error::AlreadyInstalled`].
///
/// ### 中文
/// 为当前进程安装宿主提供的 GLFW 函数表。
///
/// 该安装由 `OnceLock` 保证只执行一次；重复调用返回 [`Error::AlreadyInstalled`]。
pub fn install_embedder_api(api: &EmbedderGlfwApi) -> Result<(), Error> {
    let table = GlfwApi::from_embedder(api)?;
    EMBEDDER_GLFW_API
        .set(table)
        .map_err(|_| Error::AlreadyInstalled)?;
    tracing::info!("embedder GLFW function table installed");
    Ok(())
}

impl GlfwApi {
    /// ### English
    /// Returns the embedder table if one was installed, otherwise opens GLFW from `search`.
    ///
    /// ### 中文
    /// 若宿主已安装函数表则直接返回，否则按 `search` 打开 GLFW 动态库。
    pub fn load(search: &crate::binding::LibrarySearch) -> Result<Self, Error> {
        if let Some(api) = EMBEDDER_GLFW_API.get() {
            return Ok(api.clone());
        }
        super::loader::open(search)
    }

    /// Whether this table keeps a dynamically opened library alive.
    pub fn is_dynamic(&self) -> bool {
        self.library.is_some()
    }
}
