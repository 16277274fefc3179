use std::sync::Arc;

use ash::{vk, Device};

use crate::VulkanError;

/// One framebuffer per swapchain image view. Torn down and rebuilt alongside
/// the swapchain.
pub struct Framebuffers {
    device: Arc<Device>,

    pub framebuffers: Vec<vk::Framebuffer>,
}

impl Framebuffers {
    pub fn new(
        device: Arc<Device>,
        render_pass: vk::RenderPass,
        image_views: &[vk::ImageView],
        extent: vk::Extent2D,
    ) -> Result<Self, VulkanError> {
        let mut framebuffers = Vec::with_capacity(image_views.len());

        for &view in image_views {
            let attachments = [view];

            let create_info = vk::FramebufferCreateInfo::default()
                .render_pass(render_pass)
                .attachments(&attachments)
                .width(extent.width)
                .height(extent.height)
                .layers(1);

            let framebuffer = match unsafe { device.create_framebuffer(&create_info, None) } {
                Ok(framebuffer) => framebuffer,
                Err(e) => {
                    for framebuffer in framebuffers {
                        unsafe { device.destroy_framebuffer(framebuffer, None) };
                    }
                    return Err(VulkanError::VkResult(e, "creating a framebuffer"));
                }
            };

            framebuffers.push(framebuffer);
        }

        Ok(Self {
            device,
            framebuffers,
        })
    }

    /// Destroys the framebuffers, leaving the container reusable during
    /// swapchain recreation.
    pub fn clear(&mut self) {
        for framebuffer in self.framebuffers.drain(..) {
            unsafe { self.device.destroy_framebuffer(framebuffer, None) };
        }
    }
}

impl Drop for Framebuffers {
    fn drop(&mut self) {
        self.clear();
    }
}
