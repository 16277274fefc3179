//! Explicit Vulkan resource management for a minimal triangle renderer.
//!
//! The [`renderer::Renderer`] owns the whole object graph, from instance to
//! semaphores, and drives the acquire → submit → present loop including
//! swapchain invalidation recovery. Every wrapper is a move-only owner whose
//! `Drop` performs the matching destroy call exactly once; struct fields are
//! declared so that drop order mirrors reverse creation order.

pub mod commands;
pub mod context;
pub mod framebuffers;
pub mod pipeline;
pub mod renderer;
pub mod swapchain;
pub mod sync;
pub mod vertex;
pub mod vertex_buffer;

pub use renderer::{FrameOutcome, Renderer};

use ash::vk;
use thiserror::Error;

/// Errors shared by every component that talks to the device.
#[derive(Debug, Error)]
pub enum VulkanError {
    #[error("Vulkan error while {1}:\n{0}")]
    VkResult(#[source] vk::Result, &'static str),

    #[error("No suitable memory types are available for the allocation")]
    NoSuitableMemoryType,
}
