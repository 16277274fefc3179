use ash::{ext, vk, Entry, Instance};
use tracing::instrument;
use winit::{raw_window_handle::HasDisplayHandle, window::Window};

use crate::VulkanError;

use super::Error;

const VALIDATION_LAYER: &std::ffi::CStr = c"VK_LAYER_KHRONOS_validation";

/// Creates the instance with the extensions the window's display system
/// requires, plus debug utils when validating.
#[instrument("acquire_instance", skip_all, err)]
pub fn acquire_instance(
    entry: &Entry,
    window: &Window,
    enable_validation: bool,
) -> Result<Instance, Error> {
    let display_handle = window.display_handle()?;

    let mut extensions =
        ash_window::enumerate_required_extensions(display_handle.as_raw())
            .map_err(|e| VulkanError::VkResult(e, "enumerating required extensions"))?
            .to_vec();

    let mut layers = vec![];

    if enable_validation {
        if !validation_layer_available(entry)? {
            return Err(Error::ValidationLayersUnavailable);
        }

        extensions.push(ext::debug_utils::NAME.as_ptr());
        layers.push(VALIDATION_LAYER.as_ptr());
    }

    let app_info = vk::ApplicationInfo::default()
        .application_name(c"vk-triangle")
        .application_version(vk::make_api_version(0, 0, 1, 0))
        .engine_name(c"vk-triangle")
        .engine_version(vk::make_api_version(0, 0, 1, 0))
        .api_version(vk::API_VERSION_1_0);

    let create_info = vk::InstanceCreateInfo::default()
        .application_info(&app_info)
        .enabled_extension_names(&extensions)
        .enabled_layer_names(&layers);

    let instance = unsafe { entry.create_instance(&create_info, None) }
        .map_err(|e| VulkanError::VkResult(e, "creating the instance"))?;

    Ok(instance)
}

fn validation_layer_available(entry: &Entry) -> Result<bool, Error> {
    let layers = unsafe { entry.enumerate_instance_layer_properties() }
        .map_err(|e| VulkanError::VkResult(e, "enumerating instance layers"))?;

    let available = layers.iter().any(|layer| {
        layer
            .layer_name_as_c_str()
            .is_ok_and(|name| name == VALIDATION_LAYER)
    });

    Ok(available)
}
