//! ### English
//! Safe binding layer: error translation, callback marshalling, gamma and string marshalling,
//! plus the `Glfw`/`Window` handles that route every native call through them.
//!
//! ### 中文
//! 安全绑定层：错误转换、回调编组、gamma 与字符串编组，以及让所有原生调用都经过它们的
//! `Glfw`/`Window` 句柄。

mod callbacks;
mod config;
mod error;
mod events;
mod gamma;
mod glfw;
mod input_types;
mod pending;
mod strings;
mod window;

pub use callbacks::{
    CharHandler, CursorEnterHandler, CursorPosHandler, DropHandler, FramebufferSizeHandler,
    JoystickHandler, KeyHandler, MonitorHandler, MouseButtonHandler, NativeCallback, Previous,
    ScrollHandler, WindowCloseHandler, WindowFocusHandler, WindowIconifyHandler,
    WindowPosHandler, WindowRefreshHandler, WindowSizeHandler,
};
pub use config::{GLFW_LIBRARY_ENV, LibrarySearch};
pub use error::{Error, ErrorCategory, ErrorKind, Result};
pub use events::WindowEvent;
pub use gamma::GammaRamp;
pub use glfw::{Glfw, WeakGlfw};
pub use input_types::{Action, DeviceEvent, Key, Modifiers, Monitor, MouseButton, WindowId};
pub use window::Window;
