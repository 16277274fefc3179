use std::sync::Arc;

use tracing::{info, instrument};
use winit::window::Window;

use crate::{
    commands::Commands,
    context::Context,
    framebuffers::Framebuffers,
    pipeline::{Pipeline, ShaderModule},
    swapchain::Swapchain,
    sync::FrameSync,
    vertex,
    vertex_buffer::VertexBuffer,
};

use super::{Error, Renderer};

impl Renderer {
    /// Builds the entire object graph for a window, ready to render.
    #[instrument("Renderer::new", skip_all, err)]
    pub fn new(
        window: &Window,
        enable_validation: bool,
        vertex_spirv: &[u8],
        fragment_spirv: &[u8],
    ) -> Result<Self, Error> {
        let context = Context::new(window, enable_validation)?;

        let size = window.inner_size();
        let swapchain = Swapchain::new(&context, [size.width, size.height], None)?;

        let vertex_shader = ShaderModule::new(Arc::clone(&context.device), vertex_spirv)?;
        let fragment_shader = ShaderModule::new(Arc::clone(&context.device), fragment_spirv)?;

        let pipeline = Pipeline::new(
            Arc::clone(&context.device),
            swapchain.format,
            swapchain.extent,
            &vertex_shader,
            &fragment_shader,
        )?;

        let framebuffers = Framebuffers::new(
            Arc::clone(&context.device),
            pipeline.render_pass,
            &swapchain.image_views,
            swapchain.extent,
        )?;

        let memory_properties = unsafe {
            context
                .instance
                .get_physical_device_memory_properties(context.physical_device)
        };
        let vertex_buffer = VertexBuffer::new(
            Arc::clone(&context.device),
            &memory_properties,
            &vertex::TRIANGLE_PAIR,
        )?;

        let mut commands = Commands::new(
            Arc::clone(&context.device),
            context.queue_family_indices.graphics,
        )?;
        commands.record(&framebuffers, &pipeline, &vertex_buffer, swapchain.extent)?;

        let sync = FrameSync::new(Arc::clone(&context.device))?;

        info!(
            "Renderer ready, {} swapchain images at {}x{}",
            swapchain.images.len(),
            swapchain.extent.width,
            swapchain.extent.height
        );

        Ok(Self {
            commands,
            framebuffers,
            pipeline,
            swapchain,
            sync,
            vertex_buffer,
            vertex_shader,
            fragment_shader,

            recreate_swapchain: false,

            context,
        })
    }
}
