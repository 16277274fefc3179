mod debug;
mod drop;
mod instance;
mod logical_device;
mod physical_device;
mod surface;

use std::sync::Arc;

use ash::{
    ext::debug_utils,
    khr,
    vk::{self, DebugUtilsMessengerEXT, PhysicalDevice, Queue, SurfaceKHR},
    Device, Entry, LoadingError,
};
use instance::acquire_instance;
use logical_device::get_logical_device;
use physical_device::get_physical_device;
use thiserror::Error;
use tracing::{info, instrument};
use winit::{raw_window_handle::HandleError, window::Window};

use crate::VulkanError;

/// The queue families the renderer submits to. Graphics and present may be
/// the same family on most hardware, but nothing relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFamilyIndices {
    pub graphics: u32,
    pub present: u32,
}

impl QueueFamilyIndices {
    /// The deduplicated set of family indices, one entry when graphics and
    /// present coincide.
    pub fn unique(&self) -> Vec<u32> {
        if self.graphics == self.present {
            vec![self.graphics]
        } else {
            vec![self.graphics, self.present]
        }
    }
}

/// Bundled device-level objects required to work with Vulkan.
///
/// Must outlive everything created from it; the renderer guarantees this by
/// declaring its context field last.
pub struct Context {
    pub entry: Entry,
    pub instance: ash::Instance,

    pub physical_device: PhysicalDevice,
    pub device: Arc<Device>,

    pub queue_family_indices: QueueFamilyIndices,
    pub graphics_queue: Queue,
    pub present_queue: Queue,

    pub surface_loader: khr::surface::Instance,
    pub surface: SurfaceKHR,

    debug_utils: Option<(debug_utils::Instance, DebugUtilsMessengerEXT)>,
}

impl Context {
    #[instrument("Context::new", skip_all, err)]
    pub fn new(window: &Window, enable_validation: bool) -> Result<Self, Error> {
        // Load vk library
        let entry = unsafe { Entry::load()? };

        {
            let api_version = unsafe { entry.try_enumerate_instance_version() }
                .map_err(|e| VulkanError::VkResult(e, "enumerating instance version"))?
                .unwrap_or(vk::make_api_version(0, 1, 0, 0));

            let major = vk::api_version_major(api_version);
            let minor = vk::api_version_minor(api_version);
            let patch = vk::api_version_patch(api_version);
            info!("Vulkan API v{major}.{minor}.{patch}");
        }

        let instance = acquire_instance(&entry, window, enable_validation)?;

        let debug_utils = if enable_validation {
            Some(debug::setup_debug(&entry, &instance)?)
        } else {
            None
        };

        let (surface, surface_loader) = surface::create_surface(&entry, &instance, window)?;

        let (physical_device, queue_family_indices) =
            get_physical_device(&instance, surface, &surface_loader)?;

        let (device, graphics_queue, present_queue) =
            get_logical_device(&instance, physical_device, queue_family_indices)?;

        Ok(Self {
            entry,
            instance,

            physical_device,
            device: Arc::new(device),

            queue_family_indices,
            graphics_queue,
            present_queue,

            surface_loader,
            surface,

            debug_utils,
        })
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to load vulkan library:\n{0}")]
    LoadLibrary(#[from] LoadingError),

    #[error("Failed to get window/display handle:\n{0}")]
    GetHandle(#[from] HandleError),

    #[error(transparent)]
    Vulkan(#[from] VulkanError),

    #[error("Validation layers were requested but are not available")]
    ValidationLayersUnavailable,

    #[error("No Vulkan capable devices were found")]
    NoDevices,

    #[error("No suitable devices")]
    NoSuitableDevices,
}

#[cfg(test)]
mod tests {
    use super::QueueFamilyIndices;

    #[test]
    fn unique_deduplicates_shared_family() {
        let indices = QueueFamilyIndices {
            graphics: 0,
            present: 0,
        };
        assert_eq!(indices.unique(), vec![0]);
    }

    #[test]
    fn unique_keeps_distinct_families() {
        let indices = QueueFamilyIndices {
            graphics: 0,
            present: 2,
        };
        assert_eq!(indices.unique(), vec![0, 2]);
    }
}
