mod drop;
mod new;
mod render;
mod swapchain;

use ash::vk;
use thiserror::Error;

use crate::{
    commands::Commands,
    context::{self, Context},
    framebuffers::Framebuffers,
    pipeline::{Pipeline, ShaderError, ShaderModule},
    swapchain::Swapchain,
    sync::FrameSync,
    vertex_buffer::VertexBuffer,
    VulkanError,
};

pub use render::{interpret_acquire, interpret_present, AcquireAction};

/// Owns the full rendering object graph and drives the frame loop.
///
/// Field order is load-bearing: everything above `context` borrows the device
/// and must be destroyed before the device is.
pub struct Renderer {
    commands: Commands,
    framebuffers: Framebuffers,
    pipeline: Pipeline,
    swapchain: Swapchain,
    sync: FrameSync,
    vertex_buffer: VertexBuffer,
    vertex_shader: ShaderModule,
    fragment_shader: ShaderModule,

    recreate_swapchain: bool,

    context: Context,
}

impl Renderer {
    /// Flags the swapchain for recreation before the next frame.
    pub fn surface_resized(&mut self) {
        self.recreate_swapchain = true;
    }

    /// The swapchain's current pixel extent.
    pub fn surface_extent(&self) -> vk::Extent2D {
        self.swapchain.extent
    }
}

/// What happened to a requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame was submitted and queued for presentation.
    Drawn,
    /// The swapchain was stale; it has been rebuilt and the frame skipped.
    SkippedOutOfDate,
    /// The window has no area, nothing to do.
    SkippedZeroSize,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to set up the rendering context:\n{0}")]
    Context(#[from] context::Error),

    #[error(transparent)]
    Vulkan(#[from] VulkanError),

    #[error("Failed to build a shader module:\n{0}")]
    Shader(#[from] ShaderError),

    #[error("Failed to acquire a swapchain image:\n{0}")]
    Acquire(#[source] vk::Result),

    #[error("Failed to submit the frame:\n{0}")]
    Submit(#[source] vk::Result),

    #[error("Failed to present the frame:\n{0}")]
    Present(#[source] vk::Result),
}
