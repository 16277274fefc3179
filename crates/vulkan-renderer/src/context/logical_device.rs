use ash::{khr::swapchain, vk, Device, Instance};
use tracing::instrument;

use crate::VulkanError;

use super::{Error, QueueFamilyIndices};

/// Creates the logical device with one queue per unique family.
#[instrument("get_logical_device", skip_all, err)]
pub fn get_logical_device(
    instance: &Instance,
    physical_device: vk::PhysicalDevice,
    indices: QueueFamilyIndices,
) -> Result<(Device, vk::Queue, vk::Queue), Error> {
    let queue_priorities = [1.0];

    let queue_create_infos: Vec<_> = indices
        .unique()
        .into_iter()
        .map(|family| {
            vk::DeviceQueueCreateInfo::default()
                .queue_family_index(family)
                .queue_priorities(&queue_priorities)
        })
        .collect();

    let extensions = [swapchain::NAME.as_ptr()];
    let features = vk::PhysicalDeviceFeatures::default();

    let create_info = vk::DeviceCreateInfo::default()
        .queue_create_infos(&queue_create_infos)
        .enabled_extension_names(&extensions)
        .enabled_features(&features);

    let device = unsafe { instance.create_device(physical_device, &create_info, None) }
        .map_err(|e| VulkanError::VkResult(e, "creating the logical device"))?;

    let graphics_queue = unsafe { device.get_device_queue(indices.graphics, 0) };
    let present_queue = unsafe { device.get_device_queue(indices.present, 0) };

    Ok((device, graphics_queue, present_queue))
}
