#[unsafe(no_mangle)]
/// ### English
/// Returns the C ABI version, so a host can check `EmbedderGlfwApi` layout compatibility.
///
/// ### 中文
/// 返回 C ABI 版本号，供宿主检查 `EmbedderGlfwApi` 布局是否兼容。
pub extern "C" fn glfw_shim_abi_version() -> u32 {
    super::GLFW_SHIM_ABI_VERSION
}
