use std::{io, sync::Arc};

use ash::{util::read_spv, vk, Device};
use thiserror::Error;

use crate::VulkanError;

/// Owns a shader module built from a SPIR-V blob.
pub struct ShaderModule {
    device: Arc<Device>,

    pub handle: vk::ShaderModule,
}

impl ShaderModule {
    pub fn new(device: Arc<Device>, spirv_bytes: &[u8]) -> Result<Self, Error> {
        let code = read_spv(&mut io::Cursor::new(spirv_bytes))?;

        let create_info = vk::ShaderModuleCreateInfo::default().code(&code);

        let handle = unsafe { device.create_shader_module(&create_info, None) }
            .map_err(|e| VulkanError::VkResult(e, "creating a shader module"))?;

        Ok(Self { device, handle })
    }
}

impl Drop for ShaderModule {
    fn drop(&mut self) {
        unsafe { self.device.destroy_shader_module(self.handle, None) };
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid SPIR-V:\n{0}")]
    InvalidSpirV(#[from] io::Error),

    #[error(transparent)]
    Vulkan(#[from] VulkanError),
}
