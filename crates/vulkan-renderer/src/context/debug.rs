use std::ffi::{c_void, CStr};

use ash::{ext::debug_utils, vk, Entry, Instance};
use tracing::{debug, error, info, warn};

use crate::VulkanError;

use super::Error;

pub fn setup_debug(
    entry: &Entry,
    instance: &Instance,
) -> Result<(debug_utils::Instance, vk::DebugUtilsMessengerEXT), Error> {
    let loader = debug_utils::Instance::new(entry, instance);

    let create_info = vk::DebugUtilsMessengerCreateInfoEXT::default()
        .message_severity(
            vk::DebugUtilsMessageSeverityFlagsEXT::VERBOSE
                | vk::DebugUtilsMessageSeverityFlagsEXT::INFO
                | vk::DebugUtilsMessageSeverityFlagsEXT::WARNING
                | vk::DebugUtilsMessageSeverityFlagsEXT::ERROR,
        )
        .message_type(
            vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
                | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
                | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
        )
        .pfn_user_callback(Some(debug_callback));

    let messenger = unsafe { loader.create_debug_utils_messenger(&create_info, None) }
        .map_err(|e| VulkanError::VkResult(e, "creating the debug messenger"))?;

    Ok((loader, messenger))
}

/// Routes validation layer output into the tracing pipeline.
unsafe extern "system" fn debug_callback(
    severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    _message_type: vk::DebugUtilsMessageTypeFlagsEXT,
    callback_data: *const vk::DebugUtilsMessengerCallbackDataEXT<'_>,
    _user_data: *mut c_void,
) -> vk::Bool32 {
    let message = if callback_data.is_null() {
        String::from("(no message)")
    } else {
        let data = *callback_data;
        if data.p_message.is_null() {
            String::from("(no message)")
        } else {
            CStr::from_ptr(data.p_message).to_string_lossy().into_owned()
        }
    };

    match severity {
        vk::DebugUtilsMessageSeverityFlagsEXT::ERROR => error!("{message}"),
        vk::DebugUtilsMessageSeverityFlagsEXT::WARNING => warn!("{message}"),
        vk::DebugUtilsMessageSeverityFlagsEXT::INFO => info!("{message}"),
        _ => debug!("{message}"),
    }

    vk::FALSE
}
