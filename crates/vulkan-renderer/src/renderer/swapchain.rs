use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    framebuffers::Framebuffers, pipeline::Pipeline, swapchain::Swapchain, VulkanError,
};

use super::{Error, Renderer};

impl Renderer {
    /// Tears down everything derived from the swapchain and rebuilds it for
    /// the current surface state.
    ///
    /// The old chain is passed to the new one's create info before being
    /// dropped, so the driver can reuse its resources.
    #[instrument("Renderer::recreate_swapchain", skip_all, err)]
    pub(super) fn recreate_swapchain(&mut self, window_size: [u32; 2]) -> Result<(), Error> {
        unsafe { self.context.device.device_wait_idle() }
            .map_err(|e| VulkanError::VkResult(e, "waiting for the device to idle"))?;

        self.commands.free_buffers();
        self.framebuffers.clear();

        let swapchain = Swapchain::new(&self.context, window_size, Some(&self.swapchain))?;
        let old_swapchain = std::mem::replace(&mut self.swapchain, swapchain);
        std::mem::drop(old_swapchain);

        self.pipeline = Pipeline::new(
            Arc::clone(&self.context.device),
            self.swapchain.format,
            self.swapchain.extent,
            &self.vertex_shader,
            &self.fragment_shader,
        )?;

        self.framebuffers = Framebuffers::new(
            Arc::clone(&self.context.device),
            self.pipeline.render_pass,
            &self.swapchain.image_views,
            self.swapchain.extent,
        )?;

        self.commands.record(
            &self.framebuffers,
            &self.pipeline,
            &self.vertex_buffer,
            self.swapchain.extent,
        )?;

        info!(
            "Swapchain rebuilt at {}x{}",
            self.swapchain.extent.width, self.swapchain.extent.height
        );

        Ok(())
    }
}
