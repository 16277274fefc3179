use ash::{
    khr::{surface, swapchain},
    vk, Instance,
};
use tracing::{info, instrument};

use crate::{swapchain::SurfaceCaps, VulkanError};

use super::{Error, QueueFamilyIndices};

/// Selects the first enumerated device that can render to the surface.
#[instrument("get_physical_device", skip_all, err)]
pub fn get_physical_device(
    instance: &Instance,
    surface: vk::SurfaceKHR,
    surface_loader: &surface::Instance,
) -> Result<(vk::PhysicalDevice, QueueFamilyIndices), Error> {
    let devices = unsafe { instance.enumerate_physical_devices() }
        .map_err(|e| VulkanError::VkResult(e, "enumerating physical devices"))?;

    if devices.is_empty() {
        return Err(Error::NoDevices);
    }

    for device in devices {
        let Some(indices) =
            find_queue_family_indices(instance, device, surface, surface_loader)?
        else {
            continue;
        };

        if !supports_swapchain_extension(instance, device)? {
            continue;
        }

        let caps = SurfaceCaps::query(device, surface, surface_loader)?;
        if caps.formats.is_empty() || caps.present_modes.is_empty() {
            continue;
        }

        let properties = unsafe { instance.get_physical_device_properties(device) };
        let name = properties
            .device_name_as_c_str()
            .map_or_else(|_| String::from("unknown"), |n| n.to_string_lossy().into_owned());
        info!("Using physical device '{name}'");

        return Ok((device, indices));
    }

    Err(Error::NoSuitableDevices)
}

/// Finds a graphics-capable family and a surface-capable family, preferring
/// the lowest index for each independently.
pub fn find_queue_family_indices(
    instance: &Instance,
    device: vk::PhysicalDevice,
    surface: vk::SurfaceKHR,
    surface_loader: &surface::Instance,
) -> Result<Option<QueueFamilyIndices>, Error> {
    let families = unsafe { instance.get_physical_device_queue_family_properties(device) };

    let mut graphics = None;
    let mut present = None;

    for (index, family) in families.iter().enumerate() {
        let index = index as u32;

        if graphics.is_none() && family.queue_flags.contains(vk::QueueFlags::GRAPHICS) {
            graphics = Some(index);
        }

        if present.is_none() {
            let supported = unsafe {
                surface_loader.get_physical_device_surface_support(device, index, surface)
            }
            .map_err(|e| VulkanError::VkResult(e, "querying surface support"))?;

            if supported {
                present = Some(index);
            }
        }

        if let (Some(graphics), Some(present)) = (graphics, present) {
            return Ok(Some(QueueFamilyIndices { graphics, present }));
        }
    }

    Ok(None)
}

fn supports_swapchain_extension(
    instance: &Instance,
    device: vk::PhysicalDevice,
) -> Result<bool, Error> {
    let extensions = unsafe { instance.enumerate_device_extension_properties(device) }
        .map_err(|e| VulkanError::VkResult(e, "enumerating device extensions"))?;

    let supported = extensions.iter().any(|extension| {
        extension
            .extension_name_as_c_str()
            .is_ok_and(|name| name == swapchain::NAME)
    });

    Ok(supported)
}
