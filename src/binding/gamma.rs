//! ### English
//! Gamma ramp marshalling.
//!
//! [`GammaRamp`] is an owned, length-matched triple of channels. Setting a ramp copies the
//! channels into binding-owned buffers that are tracked per monitor until they are replaced or
//! GLFW terminates; reading a ramp copies out of GLFW-owned memory without taking ownership.
//!
//! ### 中文
//! Gamma ramp 编组。
//!
//! [`GammaRamp`] 是长度一致的三通道自有数据。设置时会把通道复制到绑定层持有的缓冲区，并按 monitor 跟踪，
//! 直到被替换或 GLFW terminate；读取时从 GLFW 持有的内存中复制出来，不接管其所有权。

use std::collections::BTreeMap;
use std::ffi::c_uint;

use parking_lot::Mutex;

use super::error::Error;
use super::glfw::Glfw;
use super::input_types::Monitor;
use super::pending;
use crate::native::GLFWgammaramp;

/// ### English
/// Red/green/blue response curves of equal length.
///
/// ### 中文
/// 长度相同的红/绿/蓝响应曲线。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GammaRamp {
    pub red: Vec<u16>,
    pub green: Vec<u16>,
    pub blue: Vec<u16>,
}

impl GammaRamp {
    /// Builds a ramp, failing when the channels are empty or differ in length.
    pub fn new(red: Vec<u16>, green: Vec<u16>, blue: Vec<u16>) -> Result<Self, Error> {
        let ramp = Self { red, green, blue };
        ramp.validate()?;
        Ok(ramp)
    }

    /// Number of entries per channel.
    pub fn len(&self) -> usize {
        self.red.len()
    }

    pub fn is_empty(&self) -> bool {
        self.red.is_empty()
    }

    /// ### English
    /// Checks the ramp can be passed to GLFW. Runs before any native call.
    ///
    /// ### 中文
    /// 检查该 ramp 能否传给 GLFW。在任何原生调用之前执行。
    pub fn validate(&self) -> Result<(), Error> {
        let (red, green, blue) = (self.red.len(), self.green.len(), self.blue.len());
        if red != green || red != blue {
            return Err(Error::GammaRampMismatch { red, green, blue });
        }
        if red == 0 {
            return Err(Error::EmptyGammaRamp);
        }
        if c_uint::try_from(red).is_err() {
            return Err(Error::GammaRampTooLarge(red));
        }
        Ok(())
    }

    /// ### English
    /// Copies a native ramp. The native buffers are not taken over. A NULL channel with a
    /// non-zero size fails with [`Error::NullResult`].
    ///
    /// # Safety
    /// Every non-NULL channel pointer must be readable for `ramp.size` elements.
    ///
    /// ### 中文
    /// 复制原生 ramp；不接管原生缓冲区。`size` 非零但某通道为 NULL 时返回 [`Error::NullResult`]。
    ///
    /// # Safety
    /// 每个非 NULL 通道指针都必须可读 `ramp.size` 个元素。
    unsafe fn from_native(ramp: &GLFWgammaramp) -> Result<Self, Error> {
        let size = ramp.size as usize;
        let copy = |channel: *mut u16| -> Result<Vec<u16>, Error> {
            if size == 0 {
                Ok(Vec::new())
            } else if channel.is_null() {
                Err(Error::NullResult("glfwGetGammaRamp"))
            } else {
                Ok(unsafe { std::slice::from_raw_parts(channel, size) }.to_vec())
            }
        };
        Ok(Self {
            red: copy(ramp.red)?,
            green: copy(ramp.green)?,
            blue: copy(ramp.blue)?,
        })
    }
}

/// Binding-owned channel buffers handed to `glfwSetGammaRamp`.
struct NativeRamp {
    red: Box<[u16]>,
    green: Box<[u16]>,
    blue: Box<[u16]>,
}

impl NativeRamp {
    fn copy_of(ramp: &GammaRamp) -> Self {
        Self {
            red: ramp.red.clone().into_boxed_slice(),
            green: ramp.green.clone().into_boxed_slice(),
            blue: ramp.blue.clone().into_boxed_slice(),
        }
    }

    fn as_native(&mut self) -> GLFWgammaramp {
        GLFWgammaramp {
            red: self.red.as_mut_ptr(),
            green: self.green.as_mut_ptr(),
            blue: self.blue.as_mut_ptr(),
            size: self.red.len() as c_uint,
        }
    }
}

/// Ramps this binding installed, keyed by monitor address.
static INSTALLED_RAMPS: Mutex<BTreeMap<usize, NativeRamp>> =
    parking_lot::const_mutex(BTreeMap::new());

/// Frees every tracked ramp (after terminate).
pub(crate) fn release_all() {
    INSTALLED_RAMPS.lock().clear();
}

impl Glfw {
    /// ### English
    /// Generates and sets a ramp from an exponent (checked pass-through).
    ///
    /// ### 中文
    /// 按指数生成并设置 ramp（带错误检查的直通调用）。
    pub fn set_gamma(&self, monitor: Monitor, gamma: f32) -> Result<(), Error> {
        unsafe { (self.api().glfw_set_gamma)(monitor.as_ptr(), gamma) };
        pending::check()
    }

    /// ### English
    /// Reads the current ramp of `monitor` into owned channels.
    ///
    /// ### 中文
    /// 将 `monitor` 当前的 ramp 读取为自有通道数据。
    pub fn gamma_ramp(&self, monitor: Monitor) -> Result<GammaRamp, Error> {
        let raw =
            pending::checked(unsafe { (self.api().glfw_get_gamma_ramp)(monitor.as_ptr()) })?;
        if raw.is_null() {
            return Err(Error::NullResult("glfwGetGammaRamp"));
        }
        unsafe { GammaRamp::from_native(&*raw) }
    }

    /// ### English
    /// Validates and installs `ramp` on `monitor`.
    ///
    /// The previously installed binding-owned buffers for this monitor are released only after
    /// the new ramp is accepted; on error they are kept and the new copy is dropped.
    ///
    /// ### 中文
    /// 校验并在 `monitor` 上安装 `ramp`。
    ///
    /// 该 monitor 之前由绑定层持有的缓冲区只会在新 ramp 被接受后释放；出错时保留旧缓冲区并丢弃新副本。
    pub fn set_gamma_ramp(&self, monitor: Monitor, ramp: &GammaRamp) -> Result<(), Error> {
        ramp.validate()?;

        let mut native = NativeRamp::copy_of(ramp);
        let raw = native.as_native();

        let mut installed = INSTALLED_RAMPS.lock();
        unsafe { (self.api().glfw_set_gamma_ramp)(monitor.as_ptr(), &raw) };
        pending::check()?;

        if installed.insert(monitor.key(), native).is_some() {
            tracing::trace!(monitor = monitor.key(), "released previous gamma ramp");
        }
        Ok(())
    }
}
