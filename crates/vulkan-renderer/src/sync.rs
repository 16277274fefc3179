use std::sync::Arc;

use ash::{vk, Device};

use crate::VulkanError;

/// The two semaphores that order a frame: acquire → draw → present.
///
/// Created once and reused for every frame; nothing here is per-image.
pub struct FrameSync {
    device: Arc<Device>,

    pub image_acquired: vk::Semaphore,
    pub rendering_finished: vk::Semaphore,
}

impl FrameSync {
    pub fn new(device: Arc<Device>) -> Result<Self, VulkanError> {
        let create_info = vk::SemaphoreCreateInfo::default();

        let image_acquired = unsafe { device.create_semaphore(&create_info, None) }
            .map_err(|e| VulkanError::VkResult(e, "creating the image acquired semaphore"))?;

        let rendering_finished = match unsafe { device.create_semaphore(&create_info, None) } {
            Ok(semaphore) => semaphore,
            Err(e) => {
                unsafe { device.destroy_semaphore(image_acquired, None) };
                return Err(VulkanError::VkResult(
                    e,
                    "creating the rendering finished semaphore",
                ));
            }
        };

        Ok(Self {
            device,

            image_acquired,
            rendering_finished,
        })
    }
}

impl Drop for FrameSync {
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_semaphore(self.image_acquired, None);
            self.device.destroy_semaphore(self.rendering_finished, None);
        }
    }
}
