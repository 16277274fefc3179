use ash::vk;
use bytemuck::{Pod, Zeroable};
use std::mem::offset_of;

/// Interleaved position and color, matching the pipeline's vertex input.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 3],
}

impl Vertex {
    pub fn binding_description() -> vk::VertexInputBindingDescription {
        vk::VertexInputBindingDescription::default()
            .binding(0)
            .stride(size_of::<Self>() as u32)
            .input_rate(vk::VertexInputRate::VERTEX)
    }

    pub fn attribute_descriptions() -> [vk::VertexInputAttributeDescription; 2] {
        [
            vk::VertexInputAttributeDescription::default()
                .location(0)
                .binding(0)
                .format(vk::Format::R32G32_SFLOAT)
                .offset(offset_of!(Self, position) as u32),
            vk::VertexInputAttributeDescription::default()
                .location(1)
                .binding(0)
                .format(vk::Format::R32G32B32_SFLOAT)
                .offset(offset_of!(Self, color) as u32),
        ]
    }
}

/// Two triangles sharing the horizontal midline, one color per corner.
pub const TRIANGLE_PAIR: [Vertex; 6] = [
    Vertex {
        position: [0.0, -0.5],
        color: [1.0, 0.0, 0.0],
    },
    Vertex {
        position: [-0.5, 0.0],
        color: [0.0, 1.0, 0.0],
    },
    Vertex {
        position: [0.5, 0.0],
        color: [0.0, 0.0, 1.0],
    },
    Vertex {
        position: [0.5, 0.0],
        color: [1.0, 1.0, 0.0],
    },
    Vertex {
        position: [-0.5, 0.0],
        color: [1.0, 0.0, 1.0],
    },
    Vertex {
        position: [0.0, 0.5],
        color: [0.0, 1.0, 1.0],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_attribute_descriptions() {
        let binding = Vertex::binding_description();
        assert_eq!(binding.stride, 20);

        let [position, color] = Vertex::attribute_descriptions();
        assert_eq!(position.offset, 0);
        assert_eq!(color.offset, 8);
    }

    #[test]
    fn fixture_is_two_triangles() {
        assert_eq!(TRIANGLE_PAIR.len(), 6);
        assert_eq!(TRIANGLE_PAIR[0].position, [0.0, -0.5]);
        assert_eq!(TRIANGLE_PAIR[5].position, [0.0, 0.5]);
    }
}
