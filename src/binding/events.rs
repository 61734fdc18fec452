//! ### English
//! Channel-based event delivery.
//!
//! [`Window::events`] installs forwarding handlers for every window and input event of one
//! window and returns the receiving end. It is an alternative to registering closures one by
//! one; it replaces whatever handlers the window had.
//!
//! ### 中文
//! 基于 channel 的事件投递。
//!
//! [`Window::events`] 为某个 window 的所有 window/输入事件安装转发处理器，并返回接收端。
//! 它是逐个注册闭包之外的另一种方式；会替换该 window 已有的处理器。

use std::path::PathBuf;
use std::sync::Arc;

use crossbeam_channel as channel;

use super::error::Error;
use super::input_types::{Action, Key, Modifiers, MouseButton, WindowId};
use super::window::Window;

/// ### English
/// One window or input event, as delivered through [`Window::events`].
///
/// ### 中文
/// 通过 [`Window::events`] 投递的单个 window 或输入事件。
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    Pos(i32, i32),
    Size(i32, i32),
    Close,
    Refresh,
    Focus(bool),
    Iconify(bool),
    FramebufferSize(i32, i32),
    /// Key, platform scancode, action and modifiers.
    Key(Key, i32, Action, Modifiers),
    Char(char),
    MouseButton(MouseButton, Action, Modifiers),
    CursorPos(f64, f64),
    CursorEnter(bool),
    Scroll(f64, f64),
    FileDrop(Vec<PathBuf>),
}

type EventSender = channel::Sender<(WindowId, WindowEvent)>;

/// Disconnected receivers are not an error: the events are simply dropped.
fn forward(tx: &EventSender, id: WindowId, event: WindowEvent) {
    if tx.send((id, event)).is_err() {
        tracing::trace!(window = id.key(), "event receiver dropped");
    }
}

impl Window {
    /// ### English
    /// Routes every window and input event of this window into an unbounded channel.
    ///
    /// Events are sent from inside `poll_events`/`wait_events` on the thread that pumps events.
    /// If a native setter fails, the error is returned and the handlers installed before it stay
    /// in place.
    ///
    /// ### 中文
    /// 将该 window 的所有 window 与输入事件转发到无界 channel。
    ///
    /// 事件在泵事件线程的 `poll_events`/`wait_events` 内部发送。若某个原生 setter 失败，
    /// 返回该错误，之前已安装的处理器保持不变。
    pub fn events(&self) -> Result<channel::Receiver<(WindowId, WindowEvent)>, Error> {
        let (tx, rx) = channel::unbounded();

        let sender = tx.clone();
        self.set_pos_handler(Some(Arc::new(move |id, x, y| {
            forward(&sender, id, WindowEvent::Pos(x, y))
        })))?;
        let sender = tx.clone();
        self.set_size_handler(Some(Arc::new(move |id, width, height| {
            forward(&sender, id, WindowEvent::Size(width, height))
        })))?;
        let sender = tx.clone();
        self.set_close_handler(Some(Arc::new(move |id| {
            forward(&sender, id, WindowEvent::Close)
        })))?;
        let sender = tx.clone();
        self.set_refresh_handler(Some(Arc::new(move |id| {
            forward(&sender, id, WindowEvent::Refresh)
        })))?;
        let sender = tx.clone();
        self.set_focus_handler(Some(Arc::new(move |id, focused| {
            forward(&sender, id, WindowEvent::Focus(focused))
        })))?;
        let sender = tx.clone();
        self.set_iconify_handler(Some(Arc::new(move |id, iconified| {
            forward(&sender, id, WindowEvent::Iconify(iconified))
        })))?;
        let sender = tx.clone();
        self.set_framebuffer_size_handler(Some(Arc::new(move |id, width, height| {
            forward(&sender, id, WindowEvent::FramebufferSize(width, height))
        })))?;

        let sender = tx.clone();
        self.set_key_handler(Some(Arc::new(move |id, key, scancode, action, mods| {
            forward(&sender, id, WindowEvent::Key(key, scancode, action, mods))
        })))?;
        let sender = tx.clone();
        self.set_char_handler(Some(Arc::new(move |id, ch| {
            forward(&sender, id, WindowEvent::Char(ch))
        })))?;
        let sender = tx.clone();
        self.set_mouse_button_handler(Some(Arc::new(move |id, button, action, mods| {
            forward(&sender, id, WindowEvent::MouseButton(button, action, mods))
        })))?;
        let sender = tx.clone();
        self.set_cursor_pos_handler(Some(Arc::new(move |id, x, y| {
            forward(&sender, id, WindowEvent::CursorPos(x, y))
        })))?;
        let sender = tx.clone();
        self.set_cursor_enter_handler(Some(Arc::new(move |id, entered| {
            forward(&sender, id, WindowEvent::CursorEnter(entered))
        })))?;
        let sender = tx.clone();
        self.set_scroll_handler(Some(Arc::new(move |id, x, y| {
            forward(&sender, id, WindowEvent::Scroll(x, y))
        })))?;
        self.set_drop_handler(Some(Arc::new(move |id, paths: &[PathBuf]| {
            forward(&tx, id, WindowEvent::FileDrop(paths.to_vec()))
        })))?;

        Ok(rx)
    }
}
