//! ### English
//! Process-wide device callbacks: joystick and monitor (dis)connection.
//!
//! ### 中文
//! 进程级设备回调：手柄与显示器的连接/断开。

use std::ffi::c_int;
use std::sync::Arc;

use super::{CallbackSlot, PROCESS_WIDE, Previous, dispatch, set_handler};
use crate::binding::error::Error;
use crate::binding::glfw::Glfw;
use crate::binding::input_types::{DeviceEvent, Monitor};
use crate::native::{GLFWjoystickfun, GLFWmonitor, GLFWmonitorfun};

pub type JoystickHandler = dyn Fn(i32, DeviceEvent) + Send + Sync;
pub type MonitorHandler = dyn Fn(Monitor, DeviceEvent) + Send + Sync;

pub(crate) static JOYSTICK: CallbackSlot<JoystickHandler, GLFWjoystickfun> =
    CallbackSlot::new("joystick", joystick_trampoline);
pub(crate) static MONITOR: CallbackSlot<MonitorHandler, GLFWmonitorfun> =
    CallbackSlot::new("monitor", monitor_trampoline);

unsafe extern "C" fn joystick_trampoline(jid: c_int, event: c_int) {
    let Some(event) = DeviceEvent::from_raw(event) else {
        tracing::debug!(jid, event, "ignoring unknown joystick event");
        return;
    };
    dispatch(&JOYSTICK, PROCESS_WIDE, |handler| handler(jid, event));
}

unsafe extern "C" fn monitor_trampoline(monitor: *mut GLFWmonitor, event: c_int) {
    let (Some(monitor), Some(event)) = (Monitor::from_raw(monitor), DeviceEvent::from_raw(event))
    else {
        tracing::debug!(event, "ignoring malformed monitor event");
        return;
    };
    dispatch(&MONITOR, PROCESS_WIDE, |handler| handler(monitor, event));
}

impl Glfw {
    /// ### English
    /// Sets (or with `None`, removes) the process-wide joystick connection handler.
    ///
    /// The handler is kept until terminate. Capturing a clone of `self` in it keeps GLFW alive
    /// past the last user handle; capture [`Glfw::downgrade`] instead.
    ///
    /// ### 中文
    /// 设置（传 `None` 时移除）进程级手柄连接处理器。
    ///
    /// 处理器会保留到 terminate。在其中捕获 `self` 的克隆会让 GLFW 在最后一个用户句柄之后仍然存活；
    /// 应改为捕获 [`Glfw::downgrade`] 的结果。
    pub fn set_joystick_handler(
        &self,
        handler: Option<Arc<JoystickHandler>>,
    ) -> Result<Previous<JoystickHandler, GLFWjoystickfun>, Error> {
        let api = self.api();
        set_handler(&JOYSTICK, PROCESS_WIDE, handler, |raw| unsafe {
            (api.glfw_set_joystick_callback)(raw)
        })
    }

    /// ### English
    /// Sets (or with `None`, removes) the process-wide monitor connection handler. The same
    /// capture rule as [`Glfw::set_joystick_handler`] applies.
    ///
    /// ### 中文
    /// 设置（传 `None` 时移除）进程级显示器连接处理器。捕获规则与 [`Glfw::set_joystick_handler`] 相同。
    pub fn set_monitor_handler(
        &self,
        handler: Option<Arc<MonitorHandler>>,
    ) -> Result<Previous<MonitorHandler, GLFWmonitorfun>, Error> {
        let api = self.api();
        set_handler(&MONITOR, PROCESS_WIDE, handler, |raw| unsafe {
            (api.glfw_set_monitor_callback)(raw)
        })
    }
}
