use std::sync::Arc;

use ash::{util::Align, vk, Device};
use tracing::instrument;

use crate::{vertex::Vertex, VulkanError};

/// Host-visible vertex buffer with its backing allocation. The contents are
/// written once at creation and never touched again.
pub struct VertexBuffer {
    device: Arc<Device>,

    pub buffer: vk::Buffer,
    memory: vk::DeviceMemory,
    pub vertex_count: u32,
}

impl VertexBuffer {
    #[instrument("VertexBuffer::new", skip_all, err)]
    pub fn new(
        device: Arc<Device>,
        memory_properties: &vk::PhysicalDeviceMemoryProperties,
        vertices: &[Vertex],
    ) -> Result<Self, VulkanError> {
        let size = std::mem::size_of_val(vertices) as vk::DeviceSize;

        let buffer = {
            let create_info = vk::BufferCreateInfo::default()
                .size(size)
                .usage(vk::BufferUsageFlags::VERTEX_BUFFER)
                .sharing_mode(vk::SharingMode::EXCLUSIVE);

            unsafe { device.create_buffer(&create_info, None) }
                .map_err(|e| VulkanError::VkResult(e, "creating the vertex buffer"))?
        };

        let requirements = unsafe { device.get_buffer_memory_requirements(buffer) };

        let memory = {
            let memory_type_index = match find_memory_type_index(
                memory_properties,
                &requirements,
                vk::MemoryPropertyFlags::HOST_VISIBLE | vk::MemoryPropertyFlags::HOST_COHERENT,
            ) {
                Some(index) => index,
                None => {
                    unsafe { device.destroy_buffer(buffer, None) };
                    return Err(VulkanError::NoSuitableMemoryType);
                }
            };

            let allocate_info = vk::MemoryAllocateInfo::default()
                .allocation_size(requirements.size)
                .memory_type_index(memory_type_index);

            match unsafe { device.allocate_memory(&allocate_info, None) } {
                Ok(memory) => memory,
                Err(e) => {
                    unsafe { device.destroy_buffer(buffer, None) };
                    return Err(VulkanError::VkResult(e, "allocating the vertex buffer"));
                }
            }
        };

        let result: Result<(), VulkanError> = (|| {
            unsafe { device.bind_buffer_memory(buffer, memory, 0) }
                .map_err(|e| VulkanError::VkResult(e, "binding the vertex buffer memory"))?;

            let pointer =
                unsafe { device.map_memory(memory, 0, size, vk::MemoryMapFlags::empty()) }
                    .map_err(|e| VulkanError::VkResult(e, "mapping the vertex buffer memory"))?;

            let mut align = unsafe {
                Align::<Vertex>::new(pointer, align_of::<Vertex>() as vk::DeviceSize, size)
            };
            align.copy_from_slice(vertices);

            unsafe { device.unmap_memory(memory) };

            Ok(())
        })();

        if let Err(e) = result {
            unsafe {
                device.destroy_buffer(buffer, None);
                device.free_memory(memory, None);
            }
            return Err(e);
        }

        Ok(Self {
            device,

            buffer,
            memory,
            vertex_count: vertices.len() as u32,
        })
    }
}

/// Finds the lowest-index memory type that the requirements allow and that
/// carries at least the requested properties.
pub fn find_memory_type_index(
    memory_properties: &vk::PhysicalDeviceMemoryProperties,
    requirements: &vk::MemoryRequirements,
    required_properties: vk::MemoryPropertyFlags,
) -> Option<u32> {
    memory_properties.memory_types[..memory_properties.memory_type_count as usize]
        .iter()
        .enumerate()
        .position(|(index, memory_type)| {
            requirements.memory_type_bits & (1 << index) != 0
                && memory_type.property_flags.contains(required_properties)
        })
        .map(|index| index as u32)
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_buffer(self.buffer, None);
            self.device.free_memory(self.memory, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn properties(flags: &[vk::MemoryPropertyFlags]) -> vk::PhysicalDeviceMemoryProperties {
        let mut properties = vk::PhysicalDeviceMemoryProperties::default();
        properties.memory_type_count = flags.len() as u32;
        for (index, &flags) in flags.iter().enumerate() {
            properties.memory_types[index].property_flags = flags;
        }
        properties
    }

    fn requirements(memory_type_bits: u32) -> vk::MemoryRequirements {
        let mut requirements = vk::MemoryRequirements::default();
        requirements.memory_type_bits = memory_type_bits;
        requirements
    }

    #[test]
    fn first_matching_type_wins() {
        let properties = properties(&[
            vk::MemoryPropertyFlags::DEVICE_LOCAL,
            vk::MemoryPropertyFlags::HOST_VISIBLE | vk::MemoryPropertyFlags::HOST_COHERENT,
            vk::MemoryPropertyFlags::HOST_VISIBLE | vk::MemoryPropertyFlags::HOST_COHERENT,
        ]);

        let index = find_memory_type_index(
            &properties,
            &requirements(0b111),
            vk::MemoryPropertyFlags::HOST_VISIBLE | vk::MemoryPropertyFlags::HOST_COHERENT,
        );

        assert_eq!(index, Some(1));
    }

    #[test]
    fn type_bits_exclude_candidates() {
        let properties = properties(&[
            vk::MemoryPropertyFlags::HOST_VISIBLE | vk::MemoryPropertyFlags::HOST_COHERENT,
            vk::MemoryPropertyFlags::HOST_VISIBLE | vk::MemoryPropertyFlags::HOST_COHERENT,
        ]);

        let index = find_memory_type_index(
            &properties,
            &requirements(0b10),
            vk::MemoryPropertyFlags::HOST_VISIBLE,
        );

        assert_eq!(index, Some(1));
    }

    #[test]
    fn superset_of_properties_is_accepted() {
        let properties = properties(&[vk::MemoryPropertyFlags::HOST_VISIBLE
            | vk::MemoryPropertyFlags::HOST_COHERENT
            | vk::MemoryPropertyFlags::HOST_CACHED]);

        let index = find_memory_type_index(
            &properties,
            &requirements(0b1),
            vk::MemoryPropertyFlags::HOST_VISIBLE | vk::MemoryPropertyFlags::HOST_COHERENT,
        );

        assert_eq!(index, Some(0));
    }

    #[test]
    fn no_match_yields_none() {
        let properties = properties(&[vk::MemoryPropertyFlags::DEVICE_LOCAL]);

        let index = find_memory_type_index(
            &properties,
            &requirements(0b1),
            vk::MemoryPropertyFlags::HOST_VISIBLE,
        );

        assert_eq!(index, None);
    }
}
