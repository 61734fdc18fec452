//! ### English
//! Small value types passed to event handlers.
//! Raw GLFW integers (key codes, mouse buttons, joystick ids) stay numeric.
//!
//! ### 中文
//! 传给事件处理器的小型值类型。
//! 原始 GLFW 整数（键码、鼠标按键、手柄 id）保持数值形式。

use std::ffi::c_int;
use std::ptr::NonNull;

use bitflags::bitflags;

use crate::native::{
    GLFW_CONNECTED, GLFW_DISCONNECTED, GLFW_MOD_ALT, GLFW_MOD_CAPS_LOCK, GLFW_MOD_CONTROL,
    GLFW_MOD_NUM_LOCK, GLFW_MOD_SHIFT, GLFW_MOD_SUPER, GLFW_PRESS, GLFW_RELEASE, GLFW_REPEAT,
    GLFWmonitor, GLFWwindow,
};

/// ### English
/// Identity of a window as seen by handlers (the native window address).
///
/// ### 中文
/// 处理器看到的 window 标识（原生 window 地址）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(usize);

impl WindowId {
    pub(crate) fn from_raw(window: *mut GLFWwindow) -> Self {
        Self(window as usize)
    }

    pub(crate) fn key(self) -> usize {
        self.0
    }
}

/// ### English
/// Monitor handle. Monitors are owned by GLFW and stay valid until disconnected or terminate.
///
/// ### 中文
/// Monitor 句柄。Monitor 由 GLFW 持有，在断开连接或 terminate 之前保持有效。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Monitor {
    raw: NonNull<GLFWmonitor>,
}

impl Monitor {
    pub(crate) fn from_raw(raw: *mut GLFWmonitor) -> Option<Self> {
        NonNull::new(raw).map(|raw| Self { raw })
    }

    pub fn as_ptr(self) -> *mut GLFWmonitor {
        self.raw.as_ptr()
    }

    pub(crate) fn key(self) -> usize {
        self.raw.as_ptr() as usize
    }
}

/// GLFW key code (`GLFW_KEY_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key(pub i32);

/// GLFW mouse button index (`GLFW_MOUSE_BUTTON_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseButton(pub i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Release,
    Press,
    Repeat,
}

impl Action {
    pub(crate) fn from_raw(action: c_int) -> Option<Self> {
        match action {
            GLFW_RELEASE => Some(Self::Release),
            GLFW_PRESS => Some(Self::Press),
            GLFW_REPEAT => Some(Self::Repeat),
            _ => None,
        }
    }
}

bitflags! {
    /// Modifier key state reported with key and mouse button events.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: i32 {
        const SHIFT = GLFW_MOD_SHIFT;
        const CONTROL = GLFW_MOD_CONTROL;
        const ALT = GLFW_MOD_ALT;
        const SUPER = GLFW_MOD_SUPER;
        const CAPS_LOCK = GLFW_MOD_CAPS_LOCK;
        const NUM_LOCK = GLFW_MOD_NUM_LOCK;
    }
}

/// Joystick or monitor (dis)connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceEvent {
    Connected,
    Disconnected,
}

impl DeviceEvent {
    pub(crate) fn from_raw(event: c_int) -> Option<Self> {
        match event {
            GLFW_CONNECTED => Some(Self::Connected),
            GLFW_DISCONNECTED => Some(Self::Disconnected),
            _ => None,
        }
    }
}
