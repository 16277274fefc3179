use std::sync::Arc;

use ash::{vk, Device};
use tracing::instrument;

use crate::{framebuffers::Framebuffers, pipeline::Pipeline, vertex_buffer::VertexBuffer, VulkanError};

/// The command pool and one pre-recorded buffer per swapchain image.
///
/// Buffers are recorded with `SIMULTANEOUS_USE` so a buffer may be submitted
/// again while a previous submission is still in flight. Without per-frame
/// fences this trades strict frame pacing for simplicity; the presentation
/// engine is the only throttle.
pub struct Commands {
    device: Arc<Device>,

    pool: vk::CommandPool,
    buffers: Vec<vk::CommandBuffer>,
}

impl Commands {
    pub fn new(device: Arc<Device>, queue_family_index: u32) -> Result<Self, VulkanError> {
        let create_info =
            vk::CommandPoolCreateInfo::default().queue_family_index(queue_family_index);

        let pool = unsafe { device.create_command_pool(&create_info, None) }
            .map_err(|e| VulkanError::VkResult(e, "creating the command pool"))?;

        Ok(Self {
            device,

            pool,
            buffers: vec![],
        })
    }

    /// Allocates and records one draw command buffer per framebuffer. Any
    /// previously recorded buffers must have been freed first.
    #[instrument("Commands::record", skip_all, err)]
    pub fn record(
        &mut self,
        framebuffers: &Framebuffers,
        pipeline: &Pipeline,
        vertex_buffer: &VertexBuffer,
        extent: vk::Extent2D,
    ) -> Result<(), VulkanError> {
        debug_assert!(self.buffers.is_empty());

        let allocate_info = vk::CommandBufferAllocateInfo::default()
            .command_pool(self.pool)
            .level(vk::CommandBufferLevel::PRIMARY)
            .command_buffer_count(framebuffers.framebuffers.len() as u32);

        self.buffers = unsafe { self.device.allocate_command_buffers(&allocate_info) }
            .map_err(|e| VulkanError::VkResult(e, "allocating the command buffers"))?;

        let clear_values = [vk::ClearValue {
            color: vk::ClearColorValue {
                float32: [0.0, 0.2, 0.6, 1.0],
            },
        }];

        for (&buffer, &framebuffer) in self.buffers.iter().zip(&framebuffers.framebuffers) {
            let begin_info = vk::CommandBufferBeginInfo::default()
                .flags(vk::CommandBufferUsageFlags::SIMULTANEOUS_USE);

            unsafe { self.device.begin_command_buffer(buffer, &begin_info) }
                .map_err(|e| VulkanError::VkResult(e, "beginning a command buffer"))?;

            let render_pass_begin = vk::RenderPassBeginInfo::default()
                .render_pass(pipeline.render_pass)
                .framebuffer(framebuffer)
                .render_area(vk::Rect2D::default().extent(extent))
                .clear_values(&clear_values);

            unsafe {
                self.device.cmd_begin_render_pass(
                    buffer,
                    &render_pass_begin,
                    vk::SubpassContents::INLINE,
                );

                self.device.cmd_bind_pipeline(
                    buffer,
                    vk::PipelineBindPoint::GRAPHICS,
                    pipeline.handle,
                );

                self.device
                    .cmd_bind_vertex_buffers(buffer, 0, &[vertex_buffer.buffer], &[0]);

                self.device
                    .cmd_draw(buffer, vertex_buffer.vertex_count, 1, 0, 0);

                self.device.cmd_end_render_pass(buffer);
            }

            unsafe { self.device.end_command_buffer(buffer) }
                .map_err(|e| VulkanError::VkResult(e, "ending a command buffer"))?;
        }

        Ok(())
    }

    /// The recorded buffer for the given swapchain image.
    pub fn buffer(&self, image_index: u32) -> vk::CommandBuffer {
        self.buffers[image_index as usize]
    }

    /// Returns the buffers to the pool ahead of swapchain recreation. The
    /// caller must have waited for the device to go idle.
    pub fn free_buffers(&mut self) {
        if self.buffers.is_empty() {
            return;
        }

        unsafe { self.device.free_command_buffers(self.pool, &self.buffers) };
        self.buffers.clear();
    }
}

impl Drop for Commands {
    fn drop(&mut self) {
        unsafe { self.device.destroy_command_pool(self.pool, None) };
    }
}
