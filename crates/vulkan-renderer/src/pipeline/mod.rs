mod shader;

use std::sync::Arc;

use ash::{vk, Device};
use tracing::instrument;

use crate::{vertex::Vertex, VulkanError};

pub use shader::{Error as ShaderError, ShaderModule};

/// Render pass, pipeline layout, and the graphics pipeline itself. Rebuilt
/// together whenever the swapchain format or extent changes.
pub struct Pipeline {
    device: Arc<Device>,

    pub render_pass: vk::RenderPass,
    pub layout: vk::PipelineLayout,
    pub handle: vk::Pipeline,
}

impl Pipeline {
    #[instrument("Pipeline::new", skip_all, err)]
    pub fn new(
        device: Arc<Device>,
        format: vk::Format,
        extent: vk::Extent2D,
        vertex_shader: &ShaderModule,
        fragment_shader: &ShaderModule,
    ) -> Result<Self, VulkanError> {
        let render_pass = create_render_pass(&device, format)?;

        let layout = {
            let create_info = vk::PipelineLayoutCreateInfo::default();

            unsafe { device.create_pipeline_layout(&create_info, None) }.map_err(|e| {
                unsafe { device.destroy_render_pass(render_pass, None) };
                VulkanError::VkResult(e, "creating the pipeline layout")
            })?
        };

        let handle = match create_pipeline(
            &device,
            render_pass,
            layout,
            extent,
            vertex_shader,
            fragment_shader,
        ) {
            Ok(handle) => handle,
            Err(e) => {
                unsafe {
                    device.destroy_pipeline_layout(layout, None);
                    device.destroy_render_pass(render_pass, None);
                }
                return Err(e);
            }
        };

        Ok(Self {
            device,

            render_pass,
            layout,
            handle,
        })
    }
}

/// Single color attachment, cleared on load and left ready for presentation.
/// The external dependency delays color output until the acquired image is
/// actually available.
fn create_render_pass(device: &Device, format: vk::Format) -> Result<vk::RenderPass, VulkanError> {
    let attachments = [vk::AttachmentDescription::default()
        .format(format)
        .samples(vk::SampleCountFlags::TYPE_1)
        .load_op(vk::AttachmentLoadOp::CLEAR)
        .store_op(vk::AttachmentStoreOp::STORE)
        .stencil_load_op(vk::AttachmentLoadOp::DONT_CARE)
        .stencil_store_op(vk::AttachmentStoreOp::DONT_CARE)
        .initial_layout(vk::ImageLayout::UNDEFINED)
        .final_layout(vk::ImageLayout::PRESENT_SRC_KHR)];

    let color_attachments = [vk::AttachmentReference::default()
        .attachment(0)
        .layout(vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL)];

    let subpasses = [vk::SubpassDescription::default()
        .pipeline_bind_point(vk::PipelineBindPoint::GRAPHICS)
        .color_attachments(&color_attachments)];

    let dependencies = [vk::SubpassDependency::default()
        .src_subpass(vk::SUBPASS_EXTERNAL)
        .dst_subpass(0)
        .src_stage_mask(vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT)
        .src_access_mask(vk::AccessFlags::empty())
        .dst_stage_mask(vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT)
        .dst_access_mask(
            vk::AccessFlags::COLOR_ATTACHMENT_READ | vk::AccessFlags::COLOR_ATTACHMENT_WRITE,
        )];

    let create_info = vk::RenderPassCreateInfo::default()
        .attachments(&attachments)
        .subpasses(&subpasses)
        .dependencies(&dependencies);

    unsafe { device.create_render_pass(&create_info, None) }
        .map_err(|e| VulkanError::VkResult(e, "creating the render pass"))
}

fn create_pipeline(
    device: &Device,
    render_pass: vk::RenderPass,
    layout: vk::PipelineLayout,
    extent: vk::Extent2D,
    vertex_shader: &ShaderModule,
    fragment_shader: &ShaderModule,
) -> Result<vk::Pipeline, VulkanError> {
    let stages = [
        vk::PipelineShaderStageCreateInfo::default()
            .stage(vk::ShaderStageFlags::VERTEX)
            .module(vertex_shader.handle)
            .name(c"main"),
        vk::PipelineShaderStageCreateInfo::default()
            .stage(vk::ShaderStageFlags::FRAGMENT)
            .module(fragment_shader.handle)
            .name(c"main"),
    ];

    let vertex_bindings = [Vertex::binding_description()];
    let vertex_attributes = Vertex::attribute_descriptions();

    let vertex_input_state = vk::PipelineVertexInputStateCreateInfo::default()
        .vertex_binding_descriptions(&vertex_bindings)
        .vertex_attribute_descriptions(&vertex_attributes);

    let input_assembly_state = vk::PipelineInputAssemblyStateCreateInfo::default()
        .topology(vk::PrimitiveTopology::TRIANGLE_LIST);

    let viewports = [vk::Viewport::default()
        .width(extent.width as f32)
        .height(extent.height as f32)
        .max_depth(1.0)];

    let scissors = [vk::Rect2D::default().extent(extent)];

    let viewport_state = vk::PipelineViewportStateCreateInfo::default()
        .viewports(&viewports)
        .scissors(&scissors);

    let rasterization_state = vk::PipelineRasterizationStateCreateInfo::default()
        .polygon_mode(vk::PolygonMode::FILL)
        .cull_mode(vk::CullModeFlags::BACK)
        .front_face(vk::FrontFace::COUNTER_CLOCKWISE)
        .line_width(1.0);

    let multisample_state = vk::PipelineMultisampleStateCreateInfo::default()
        .rasterization_samples(vk::SampleCountFlags::TYPE_1);

    let blend_attachments = [vk::PipelineColorBlendAttachmentState::default()
        .color_write_mask(vk::ColorComponentFlags::RGBA)];

    let color_blend_state =
        vk::PipelineColorBlendStateCreateInfo::default().attachments(&blend_attachments);

    let create_infos = [vk::GraphicsPipelineCreateInfo::default()
        .stages(&stages)
        .vertex_input_state(&vertex_input_state)
        .input_assembly_state(&input_assembly_state)
        .viewport_state(&viewport_state)
        .rasterization_state(&rasterization_state)
        .multisample_state(&multisample_state)
        .color_blend_state(&color_blend_state)
        .layout(layout)
        .render_pass(render_pass)
        .subpass(0)];

    let pipelines = unsafe {
        device.create_graphics_pipelines(vk::PipelineCache::null(), &create_infos, None)
    }
    .map_err(|(_, e)| VulkanError::VkResult(e, "creating the graphics pipeline"))?;

    Ok(pipelines[0])
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_pipeline(self.handle, None);
            self.device.destroy_pipeline_layout(self.layout, None);
            self.device.destroy_render_pass(self.render_pass, None);
        }
    }
}
