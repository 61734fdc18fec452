use crate::native::{EmbedderGlfwApi, install_embedder_api};

#[unsafe(no_mangle)]
/// ### English
/// Installs an embedder-provided GLFW function table.
///
/// Once installed, `GlfwApi::load` returns this table instead of opening a GLFW library by
/// name. Must be called before the first `Glfw::init`. Every address must be non-zero and all
/// of them must come from the same GLFW library instance.
///
/// Returns `true` on success; `false` for NULL, a zero entry, or a second install.
///
/// # Safety
/// `api` must be NULL or point to a readable `EmbedderGlfwApi`.
///
/// ### 中文
/// 安装由宿主提供的 GLFW 函数表。
///
/// 安装后，`GlfwApi::load` 会直接返回该表，而不是按名字打开 GLFW 动态库。必须在第一次
/// `Glfw::init` 之前调用。所有地址必须非 0，且必须来自同一个 GLFW 库实例。
///
/// 成功返回 `true`；NULL、存在为 0 的条目或重复安装时返回 `false`。
///
/// # Safety
/// `api` 必须为 NULL，或指向可读的 `EmbedderGlfwApi`。
pub unsafe extern "C" fn glfw_shim_set_glfw_api(api: *const EmbedderGlfwApi) -> bool {
    if api.is_null() {
        return false;
    }

    let api = unsafe { *api };
    match install_embedder_api(&api) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "rejected embedder GLFW function table");
            false
        }
    }
}
