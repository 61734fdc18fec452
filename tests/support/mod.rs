//! In-process stand-in for GLFW, handed to the binding as an embedder table.
//!
//! All stub state is process-global (the native API has no user data), so every test takes
//! [`serial`] first, which also resets the stub.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::ffi::{CStr, CString, c_char, c_int, c_uint};
use std::mem;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use glfw_shim::native::*;
use parking_lot::{Mutex, MutexGuard};

static SERIAL: Mutex<()> = parking_lot::const_mutex(());

/// Serializes tests within one binary and resets the stub.
pub fn serial() -> MutexGuard<'static, ()> {
    let guard = SERIAL.lock();
    reset();
    guard
}

pub fn api() -> GlfwApi {
    GlfwApi::from_embedder(&table()).unwrap()
}

pub fn table() -> EmbedderGlfwApi {
    EmbedderGlfwApi {
        glfw_init: init as usize,
        glfw_terminate: terminate as usize,
        glfw_get_version: get_version as usize,
        glfw_get_version_string: get_version_string as usize,
        glfw_set_error_callback: set_error_callback as usize,
        glfw_default_window_hints: default_window_hints as usize,
        glfw_window_hint: window_hint as usize,
        glfw_create_window: create_window as usize,
        glfw_destroy_window: destroy_window as usize,
        glfw_window_should_close: window_should_close as usize,
        glfw_set_window_should_close: set_window_should_close as usize,
        glfw_set_window_title: set_window_title as usize,
        glfw_get_window_size: get_window_size as usize,
        glfw_get_clipboard_string: get_clipboard_string as usize,
        glfw_set_clipboard_string: set_clipboard_string as usize,
        glfw_poll_events: poll_events as usize,
        glfw_wait_events: wait_events as usize,
        glfw_wait_events_timeout: wait_events_timeout as usize,
        glfw_post_empty_event: post_empty_event as usize,
        glfw_get_monitors: get_monitors as usize,
        glfw_get_primary_monitor: get_primary_monitor as usize,
        glfw_get_monitor_name: get_monitor_name as usize,
        glfw_set_gamma: set_gamma as usize,
        glfw_get_gamma_ramp: get_gamma_ramp as usize,
        glfw_set_gamma_ramp: set_gamma_ramp as usize,
        glfw_joystick_present: joystick_present as usize,
        glfw_get_joystick_name: get_joystick_name as usize,
        glfw_get_joystick_axes: get_joystick_axes as usize,
        glfw_get_joystick_buttons: get_joystick_buttons as usize,
        glfw_get_key_name: get_key_name as usize,
        glfw_set_window_pos_callback: set_window_pos_callback as usize,
        glfw_set_window_size_callback: set_window_size_callback as usize,
        glfw_set_window_close_callback: set_window_close_callback as usize,
        glfw_set_window_refresh_callback: set_window_refresh_callback as usize,
        glfw_set_window_focus_callback: set_window_focus_callback as usize,
        glfw_set_window_iconify_callback: set_window_iconify_callback as usize,
        glfw_set_framebuffer_size_callback: set_framebuffer_size_callback as usize,
        glfw_set_key_callback: set_key_callback as usize,
        glfw_set_char_callback: set_char_callback as usize,
        glfw_set_mouse_button_callback: set_mouse_button_callback as usize,
        glfw_set_cursor_pos_callback: set_cursor_pos_callback as usize,
        glfw_set_cursor_enter_callback: set_cursor_enter_callback as usize,
        glfw_set_scroll_callback: set_scroll_callback as usize,
        glfw_set_drop_callback: set_drop_callback as usize,
        glfw_set_joystick_callback: set_joystick_callback as usize,
        glfw_set_monitor_callback: set_monitor_callback as usize,
    }
}

// ---------------------------------------------------------------------------------------------
// Error reporting

static ERROR_CALLBACK: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static FAIL_NEXT: RefCell<Option<(c_int, String)>> = const { RefCell::new(None) };
}

/// Makes the next fallible stub call on this thread report `code` and fail.
pub fn fail_next(code: c_int, description: &str) {
    FAIL_NEXT.with(|slot| *slot.borrow_mut() = Some((code, description.to_string())));
}

/// Invokes the installed error callback on the calling thread, as GLFW would.
pub fn report(code: c_int, description: &str) {
    let addr = ERROR_CALLBACK.load(Ordering::SeqCst);
    assert_ne!(addr, 0, "no error callback installed");
    let callback: GLFWerrorfun = unsafe { mem::transmute::<usize, GLFWerrorfun>(addr) };
    let description = CString::new(description).unwrap();
    unsafe { callback(code, description.as_ptr()) };
}

/// Pretends someone else installed `callback` as the error callback before the binding.
pub fn install_foreign_error_callback(callback: GLFWerrorfun) {
    ERROR_CALLBACK.store(callback as usize, Ordering::SeqCst);
}

/// Address of the error callback currently installed natively, 0 when none.
pub fn error_callback() -> usize {
    ERROR_CALLBACK.load(Ordering::SeqCst)
}

fn take_failure() -> bool {
    match FAIL_NEXT.with(|slot| slot.borrow_mut().take()) {
        Some((code, description)) => {
            report(code, &description);
            true
        }
        None => false,
    }
}

// ---------------------------------------------------------------------------------------------
// Shared state

struct StubWindow {
    title: CString,
    should_close: bool,
    width: c_int,
    height: c_int,
}

struct StubRamp {
    red: Vec<u16>,
    green: Vec<u16>,
    blue: Vec<u16>,
    view: GLFWgammaramp,
}

// Raw pointers only ever point into the vectors owned by the same value.
unsafe impl Send for StubRamp {}

impl StubRamp {
    fn boxed(red: Vec<u16>, green: Vec<u16>, blue: Vec<u16>) -> Box<Self> {
        let mut ramp = Box::new(Self {
            red,
            green,
            blue,
            view: GLFWgammaramp {
                red: std::ptr::null_mut(),
                green: std::ptr::null_mut(),
                blue: std::ptr::null_mut(),
                size: 0,
            },
        });
        ramp.view = GLFWgammaramp {
            red: ramp.red.as_mut_ptr(),
            green: ramp.green.as_mut_ptr(),
            blue: ramp.blue.as_mut_ptr(),
            size: ramp.red.len() as c_uint,
        };
        ramp
    }
}

#[derive(Default)]
struct State {
    /// Installed callback address per (event, target); targets are window addresses or 0.
    callbacks: HashMap<(&'static str, usize), usize>,
    /// Every successful setter call: (event, target, installed non-NULL).
    installs: Vec<(&'static str, usize, bool)>,
    windows: HashSet<usize>,
    destroyed: Vec<usize>,
    ramps: HashMap<usize, Box<StubRamp>>,
    gamma: Option<(usize, f32)>,
    clipboard: Option<CString>,
    hints: Vec<(c_int, c_int)>,
    queued: Vec<Box<dyn FnOnce() + Send>>,
    initialized: bool,
    terminations: usize,
}

static STATE: Mutex<Option<State>> = parking_lot::const_mutex(None);
static SET_GAMMA_RAMP_CALLS: AtomicUsize = AtomicUsize::new(0);

fn with_state<R>(f: impl FnOnce(&mut State) -> R) -> R {
    let mut state = STATE.lock();
    f(state.get_or_insert_with(State::default))
}

fn reset() {
    let previous = STATE.lock().take();
    if let Some(state) = previous {
        for window in state.windows {
            drop(unsafe { Box::from_raw(window as *mut StubWindow) });
        }
    }
    SET_GAMMA_RAMP_CALLS.store(0, Ordering::SeqCst);
    ERROR_CALLBACK.store(0, Ordering::SeqCst);
    FAIL_NEXT.with(|slot| slot.borrow_mut().take());
}

/// Address of the callback currently installed natively for `(event, target)`.
pub fn installed(event: &'static str, target: usize) -> usize {
    with_state(|state| state.callbacks.get(&(event, target)).copied().unwrap_or(0))
}

/// Typed view of [`installed`].
pub fn installed_fn<F: Copy>(event: &'static str, target: usize) -> Option<F> {
    assert_eq!(mem::size_of::<F>(), mem::size_of::<usize>());
    let addr = installed(event, target);
    (addr != 0).then(|| unsafe { mem::transmute_copy::<usize, F>(&addr) })
}

/// Pretends someone else installed `callback` for `(event, target)`.
pub fn install_foreign<F: Copy>(event: &'static str, target: usize, callback: F) {
    let addr = unsafe { mem::transmute_copy::<F, usize>(&callback) };
    with_state(|state| state.callbacks.insert((event, target), addr));
}

pub fn installs() -> Vec<(&'static str, usize, bool)> {
    with_state(|state| state.installs.clone())
}

pub fn destroyed() -> Vec<usize> {
    with_state(|state| state.destroyed.clone())
}

pub fn live_windows() -> usize {
    with_state(|state| state.windows.len())
}

pub fn terminations() -> usize {
    with_state(|state| state.terminations)
}

pub fn hints() -> Vec<(c_int, c_int)> {
    with_state(|state| state.hints.clone())
}

pub fn last_gamma() -> Option<(usize, f32)> {
    with_state(|state| state.gamma)
}

pub fn set_gamma_ramp_calls() -> usize {
    SET_GAMMA_RAMP_CALLS.load(Ordering::SeqCst)
}

pub fn window_title(window: *mut GLFWwindow) -> String {
    let window = unsafe { &*(window as *const StubWindow) };
    window.title.to_string_lossy().into_owned()
}

pub fn resize(window: *mut GLFWwindow, width: c_int, height: c_int) {
    let window = unsafe { &mut *(window as *mut StubWindow) };
    window.width = width;
    window.height = height;
}

/// Runs `event` during the next `poll_events`/`wait_events`, like a platform event.
pub fn queue(event: impl FnOnce() + Send + 'static) {
    with_state(|state| state.queued.push(Box::new(event)));
}

/// Queues a platform event for `(event, target)`. It is delivered through whatever callback is
/// installed natively when events are pumped.
pub fn emit<F: Copy + Send + 'static>(
    event: &'static str,
    target: usize,
    deliver: impl FnOnce(F) + Send + 'static,
) {
    queue(move || {
        if let Some(callback) = installed_fn::<F>(event, target) {
            deliver(callback);
        }
    });
}

fn pump() {
    // Callbacks may call back into the stub, so run them without the state lock.
    let queued = with_state(|state| mem::take(&mut state.queued));
    for event in queued {
        event();
    }
}

// ---------------------------------------------------------------------------------------------
// Monitors and joysticks

#[repr(C)]
struct StubMonitor {
    name: &'static CStr,
}

static MONITORS: [StubMonitor; 2] = [
    StubMonitor { name: c"Stub Primary" },
    StubMonitor { name: c"Stub Secondary" },
];

pub fn monitor_ptr(index: usize) -> *mut GLFWmonitor {
    &MONITORS[index] as *const StubMonitor as *mut GLFWmonitor
}

fn monitor_list() -> &'static [usize] {
    static LIST: OnceLock<Vec<usize>> = OnceLock::new();
    LIST.get_or_init(|| (0..MONITORS.len()).map(|index| monitor_ptr(index) as usize).collect())
}

pub const DEFAULT_RAMP: [u16; 4] = [0, 21845, 43690, 65535];

fn default_ramp() -> Box<StubRamp> {
    StubRamp::boxed(DEFAULT_RAMP.to_vec(), DEFAULT_RAMP.to_vec(), DEFAULT_RAMP.to_vec())
}

pub const STUB_JOYSTICK: c_int = 0;
pub const STUB_JOYSTICK_NAME: &str = "Stub Pad";
static AXES: [f32; 2] = [0.5, -1.0];
static BUTTONS: [u8; 3] = [1, 0, 1];

// ---------------------------------------------------------------------------------------------
// Native entry points

unsafe extern "C" fn init() -> c_int {
    if take_failure() {
        return GLFW_FALSE;
    }
    with_state(|state| state.initialized = true);
    GLFW_TRUE
}

unsafe extern "C" fn terminate() {
    let windows = with_state(|state| {
        state.initialized = false;
        state.terminations += 1;
        state.callbacks.clear();
        state.ramps.clear();
        mem::take(&mut state.windows)
    });
    for window in windows {
        drop(unsafe { Box::from_raw(window as *mut StubWindow) });
    }
    take_failure();
}

unsafe extern "C" fn get_version(major: *mut c_int, minor: *mut c_int, revision: *mut c_int) {
    unsafe {
        *major = 3;
        *minor = 4;
        *revision = 0;
    }
}

unsafe extern "C" fn get_version_string() -> *const c_char {
    c"3.4.0 Stub".as_ptr()
}

unsafe extern "C" fn set_error_callback(callback: Option<GLFWerrorfun>) -> Option<GLFWerrorfun> {
    let new = callback.map_or(0, |callback| callback as usize);
    let old = ERROR_CALLBACK.swap(new, Ordering::SeqCst);
    (old != 0).then(|| unsafe { mem::transmute::<usize, GLFWerrorfun>(old) })
}

unsafe extern "C" fn default_window_hints() {
    if take_failure() {
        return;
    }
    with_state(|state| state.hints.clear());
}

unsafe extern "C" fn window_hint(hint: c_int, value: c_int) {
    if take_failure() {
        return;
    }
    with_state(|state| state.hints.push((hint, value)));
}

unsafe extern "C" fn create_window(
    width: c_int,
    height: c_int,
    title: *const c_char,
    _monitor: *mut GLFWmonitor,
    _share: *mut GLFWwindow,
) -> *mut GLFWwindow {
    if take_failure() {
        return std::ptr::null_mut();
    }
    let window = Box::into_raw(Box::new(StubWindow {
        title: unsafe { CStr::from_ptr(title) }.to_owned(),
        should_close: false,
        width,
        height,
    }));
    with_state(|state| state.windows.insert(window as usize));
    window.cast()
}

unsafe extern "C" fn destroy_window(window: *mut GLFWwindow) {
    let address = window as usize;
    let owned = with_state(|state| {
        state.callbacks.retain(|&(_, target), _| target != address);
        state.destroyed.push(address);
        state.windows.remove(&address)
    });
    assert!(owned, "destroying unknown window {address:#x}");
    drop(unsafe { Box::from_raw(window as *mut StubWindow) });
}

unsafe extern "C" fn window_should_close(window: *mut GLFWwindow) -> c_int {
    if take_failure() {
        return GLFW_FALSE;
    }
    let window = unsafe { &*(window as *const StubWindow) };
    if window.should_close { GLFW_TRUE } else { GLFW_FALSE }
}

unsafe extern "C" fn set_window_should_close(window: *mut GLFWwindow, value: c_int) {
    if take_failure() {
        return;
    }
    let window = unsafe { &mut *(window as *mut StubWindow) };
    window.should_close = value != GLFW_FALSE;
}

unsafe extern "C" fn set_window_title(window: *mut GLFWwindow, title: *const c_char) {
    if take_failure() {
        return;
    }
    let window = unsafe { &mut *(window as *mut StubWindow) };
    window.title = unsafe { CStr::from_ptr(title) }.to_owned();
}

unsafe extern "C" fn get_window_size(
    window: *mut GLFWwindow,
    width: *mut c_int,
    height: *mut c_int,
) {
    if take_failure() {
        return;
    }
    let window = unsafe { &*(window as *const StubWindow) };
    unsafe {
        *width = window.width;
        *height = window.height;
    }
}

unsafe extern "C" fn get_clipboard_string(_window: *mut GLFWwindow) -> *const c_char {
    if take_failure() {
        return std::ptr::null();
    }
    with_state(|state| {
        state
            .clipboard
            .as_ref()
            .map_or(std::ptr::null(), |value| value.as_ptr())
    })
}

unsafe extern "C" fn set_clipboard_string(_window: *mut GLFWwindow, value: *const c_char) {
    if take_failure() {
        return;
    }
    let value = unsafe { CStr::from_ptr(value) }.to_owned();
    with_state(|state| state.clipboard = Some(value));
}

unsafe extern "C" fn poll_events() {
    if take_failure() {
        return;
    }
    pump();
}

unsafe extern "C" fn wait_events() {
    if take_failure() {
        return;
    }
    pump();
}

unsafe extern "C" fn wait_events_timeout(_timeout: f64) {
    if take_failure() {
        return;
    }
    pump();
}

unsafe extern "C" fn post_empty_event() {
    take_failure();
}

unsafe extern "C" fn get_monitors(count: *mut c_int) -> *mut *mut GLFWmonitor {
    if take_failure() {
        unsafe { *count = 0 };
        return std::ptr::null_mut();
    }
    let list = monitor_list();
    unsafe { *count = list.len() as c_int };
    list.as_ptr() as *mut *mut GLFWmonitor
}

unsafe extern "C" fn get_primary_monitor() -> *mut GLFWmonitor {
    if take_failure() {
        return std::ptr::null_mut();
    }
    monitor_ptr(0)
}

unsafe extern "C" fn get_monitor_name(monitor: *mut GLFWmonitor) -> *const c_char {
    if take_failure() {
        return std::ptr::null();
    }
    let monitor = unsafe { &*(monitor as *const StubMonitor) };
    monitor.name.as_ptr()
}

unsafe extern "C" fn set_gamma(monitor: *mut GLFWmonitor, gamma: f32) {
    if take_failure() {
        return;
    }
    with_state(|state| state.gamma = Some((monitor as usize, gamma)));
}

unsafe extern "C" fn get_gamma_ramp(monitor: *mut GLFWmonitor) -> *const GLFWgammaramp {
    if take_failure() {
        return std::ptr::null();
    }
    with_state(|state| {
        let ramp = state
            .ramps
            .entry(monitor as usize)
            .or_insert_with(default_ramp);
        &ramp.view as *const GLFWgammaramp
    })
}

unsafe extern "C" fn set_gamma_ramp(monitor: *mut GLFWmonitor, ramp: *const GLFWgammaramp) {
    SET_GAMMA_RAMP_CALLS.fetch_add(1, Ordering::SeqCst);
    if take_failure() {
        return;
    }
    // GLFW copies the ramp; so does the stub.
    let ramp = unsafe { &*ramp };
    let size = ramp.size as usize;
    let copy = |channel: *mut u16| unsafe { std::slice::from_raw_parts(channel, size) }.to_vec();
    let stored = StubRamp::boxed(copy(ramp.red), copy(ramp.green), copy(ramp.blue));
    with_state(|state| state.ramps.insert(monitor as usize, stored));
}

unsafe extern "C" fn joystick_present(jid: c_int) -> c_int {
    if take_failure() {
        return GLFW_FALSE;
    }
    if jid == STUB_JOYSTICK { GLFW_TRUE } else { GLFW_FALSE }
}

unsafe extern "C" fn get_joystick_name(jid: c_int) -> *const c_char {
    if take_failure() || jid != STUB_JOYSTICK {
        return std::ptr::null();
    }
    c"Stub Pad".as_ptr()
}

unsafe extern "C" fn get_joystick_axes(jid: c_int, count: *mut c_int) -> *const f32 {
    unsafe { *count = 0 };
    if take_failure() || jid != STUB_JOYSTICK {
        return std::ptr::null();
    }
    unsafe { *count = AXES.len() as c_int };
    AXES.as_ptr()
}

unsafe extern "C" fn get_joystick_buttons(jid: c_int, count: *mut c_int) -> *const u8 {
    unsafe { *count = 0 };
    if take_failure() || jid != STUB_JOYSTICK {
        return std::ptr::null();
    }
    unsafe { *count = BUTTONS.len() as c_int };
    BUTTONS.as_ptr()
}

/// `GLFW_KEY_A`.
pub const KEY_A: c_int = 65;

unsafe extern "C" fn get_key_name(key: c_int, _scancode: c_int) -> *const c_char {
    if take_failure() || key != KEY_A {
        return std::ptr::null();
    }
    c"a".as_ptr()
}

// ---------------------------------------------------------------------------------------------
// Callback setters

fn swap_callback<F: Copy>(event: &'static str, target: usize, callback: Option<F>) -> Option<F> {
    if take_failure() {
        return None;
    }
    let new = callback.map_or(0, |callback| unsafe { mem::transmute_copy::<F, usize>(&callback) });
    let old = with_state(|state| {
        state.installs.push((event, target, new != 0));
        if new == 0 {
            state.callbacks.remove(&(event, target))
        } else {
            state.callbacks.insert((event, target), new)
        }
    });
    old.map(|old| unsafe { mem::transmute_copy::<usize, F>(&old) })
}

macro_rules! window_setters {
    ($($name:ident => $event:literal : $ty:ty;)*) => {
        $(
            unsafe extern "C" fn $name(window: *mut GLFWwindow, callback: Option<$ty>) -> Option<$ty> {
                swap_callback($event, window as usize, callback)
            }
        )*
    };
}

window_setters! {
    set_window_pos_callback => "window_pos": GLFWwindowposfun;
    set_window_size_callback => "window_size": GLFWwindowsizefun;
    set_window_close_callback => "window_close": GLFWwindowclosefun;
    set_window_refresh_callback => "window_refresh": GLFWwindowrefreshfun;
    set_window_focus_callback => "window_focus": GLFWwindowfocusfun;
    set_window_iconify_callback => "window_iconify": GLFWwindowiconifyfun;
    set_framebuffer_size_callback => "framebuffer_size": GLFWframebuffersizefun;
    set_key_callback => "key": GLFWkeyfun;
    set_char_callback => "char": GLFWcharfun;
    set_mouse_button_callback => "mouse_button": GLFWmousebuttonfun;
    set_cursor_pos_callback => "cursor_pos": GLFWcursorposfun;
    set_cursor_enter_callback => "cursor_enter": GLFWcursorenterfun;
    set_scroll_callback => "scroll": GLFWscrollfun;
    set_drop_callback => "drop": GLFWdropfun;
}

unsafe extern "C" fn set_joystick_callback(
    callback: Option<GLFWjoystickfun>,
) -> Option<GLFWjoystickfun> {
    swap_callback("joystick", 0, callback)
}

unsafe extern "C" fn set_monitor_callback(
    callback: Option<GLFWmonitorfun>,
) -> Option<GLFWmonitorfun> {
    swap_callback("monitor", 0, callback)
}
