mod plan;

use std::sync::Arc;

use ash::{
    khr::{surface, swapchain},
    vk, Device,
};
use tracing::instrument;

use crate::{context::Context, VulkanError};

pub use plan::{
    choose_extent, choose_image_count, choose_present_mode, choose_surface_format,
    plan_swapchain, SwapchainPlan,
};

/// Snapshot of what the surface supports on a given device. Re-queried on
/// every swapchain build because the capabilities track the surface state.
pub struct SurfaceCaps {
    pub capabilities: vk::SurfaceCapabilitiesKHR,
    pub formats: Vec<vk::SurfaceFormatKHR>,
    pub present_modes: Vec<vk::PresentModeKHR>,
}

impl SurfaceCaps {
    pub fn query(
        physical_device: vk::PhysicalDevice,
        surface: vk::SurfaceKHR,
        surface_loader: &surface::Instance,
    ) -> Result<Self, VulkanError> {
        let capabilities = unsafe {
            surface_loader.get_physical_device_surface_capabilities(physical_device, surface)
        }
        .map_err(|e| VulkanError::VkResult(e, "querying surface capabilities"))?;

        let formats = unsafe {
            surface_loader.get_physical_device_surface_formats(physical_device, surface)
        }
        .map_err(|e| VulkanError::VkResult(e, "querying surface formats"))?;

        let present_modes = unsafe {
            surface_loader.get_physical_device_surface_present_modes(physical_device, surface)
        }
        .map_err(|e| VulkanError::VkResult(e, "querying surface present modes"))?;

        Ok(Self {
            capabilities,
            formats,
            present_modes,
        })
    }
}

/// The swapchain, its images, and one view per image.
pub struct Swapchain {
    device: Arc<Device>,

    pub loader: swapchain::Device,
    pub handle: vk::SwapchainKHR,
    pub format: vk::Format,
    pub extent: vk::Extent2D,
    pub images: Vec<vk::Image>,
    pub image_views: Vec<vk::ImageView>,
}

impl Swapchain {
    /// Builds a swapchain for the surface. `old` lets the driver carry over
    /// resources from a retired chain during recreation; the caller drops the
    /// old chain afterwards.
    #[instrument("Swapchain::new", skip_all, err)]
    pub fn new(
        context: &Context,
        window_size: [u32; 2],
        old: Option<&Self>,
    ) -> Result<Self, VulkanError> {
        let caps = SurfaceCaps::query(
            context.physical_device,
            context.surface,
            &context.surface_loader,
        )?;

        let plan = plan_swapchain(&caps, window_size, &context.queue_family_indices.unique());

        let mut create_info = vk::SwapchainCreateInfoKHR::default()
            .surface(context.surface)
            .min_image_count(plan.image_count)
            .image_format(plan.surface_format.format)
            .image_color_space(plan.surface_format.color_space)
            .image_extent(plan.extent)
            .image_array_layers(1)
            .image_usage(vk::ImageUsageFlags::COLOR_ATTACHMENT)
            .image_sharing_mode(plan.sharing_mode)
            .pre_transform(caps.capabilities.current_transform)
            .composite_alpha(vk::CompositeAlphaFlagsKHR::OPAQUE)
            .present_mode(plan.present_mode)
            .clipped(true)
            .old_swapchain(old.map_or(vk::SwapchainKHR::null(), |old| old.handle));

        if plan.sharing_mode == vk::SharingMode::CONCURRENT {
            create_info = create_info.queue_family_indices(&plan.queue_family_indices);
        }

        let loader = swapchain::Device::new(&context.instance, &context.device);

        let handle = unsafe { loader.create_swapchain(&create_info, None) }
            .map_err(|e| VulkanError::VkResult(e, "creating the swapchain"))?;

        let images = unsafe { loader.get_swapchain_images(handle) }
            .map_err(|e| VulkanError::VkResult(e, "getting the swapchain images"))?;

        let image_views = images
            .iter()
            .map(|&image| create_image_view(&context.device, image, plan.surface_format.format))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            device: Arc::clone(&context.device),

            loader,
            handle,
            format: plan.surface_format.format,
            extent: plan.extent,
            images,
            image_views,
        })
    }
}

fn create_image_view(
    device: &Device,
    image: vk::Image,
    format: vk::Format,
) -> Result<vk::ImageView, VulkanError> {
    let create_info = vk::ImageViewCreateInfo::default()
        .image(image)
        .view_type(vk::ImageViewType::TYPE_2D)
        .format(format)
        .components(vk::ComponentMapping::default())
        .subresource_range(
            vk::ImageSubresourceRange::default()
                .aspect_mask(vk::ImageAspectFlags::COLOR)
                .base_mip_level(0)
                .level_count(1)
                .base_array_layer(0)
                .layer_count(1),
        );

    unsafe { device.create_image_view(&create_info, None) }
        .map_err(|e| VulkanError::VkResult(e, "creating a swapchain image view"))
}

impl Drop for Swapchain {
    fn drop(&mut self) {
        unsafe {
            for &view in &self.image_views {
                self.device.destroy_image_view(view, None);
            }

            self.loader.destroy_swapchain(self.handle, None);
        }
    }
}
