use ash::vk;

use super::SurfaceCaps;

/// Everything decided ahead of the `vkCreateSwapchainKHR` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapchainPlan {
    pub surface_format: vk::SurfaceFormatKHR,
    pub present_mode: vk::PresentModeKHR,
    pub extent: vk::Extent2D,
    pub image_count: u32,
    pub sharing_mode: vk::SharingMode,
    pub queue_family_indices: Vec<u32>,
}

pub fn plan_swapchain(
    caps: &SurfaceCaps,
    window_size: [u32; 2],
    queue_families: &[u32],
) -> SwapchainPlan {
    let sharing_mode = if queue_families.len() > 1 {
        vk::SharingMode::CONCURRENT
    } else {
        vk::SharingMode::EXCLUSIVE
    };

    SwapchainPlan {
        surface_format: choose_surface_format(&caps.formats),
        present_mode: choose_present_mode(&caps.present_modes),
        extent: choose_extent(&caps.capabilities, window_size),
        image_count: choose_image_count(&caps.capabilities),
        sharing_mode,
        queue_family_indices: queue_families.to_vec(),
    }
}

const PREFERRED_FORMAT: vk::SurfaceFormatKHR = vk::SurfaceFormatKHR {
    format: vk::Format::B8G8R8A8_UNORM,
    color_space: vk::ColorSpaceKHR::SRGB_NONLINEAR,
};

/// A lone `UNDEFINED` entry means the surface has no preference, so the
/// preferred pair is used outright. Otherwise the preferred pair is taken if
/// listed, falling back to whatever the surface lists first.
pub fn choose_surface_format(formats: &[vk::SurfaceFormatKHR]) -> vk::SurfaceFormatKHR {
    if formats.len() == 1 && formats[0].format == vk::Format::UNDEFINED {
        return PREFERRED_FORMAT;
    }

    formats
        .iter()
        .copied()
        .find(|format| *format == PREFERRED_FORMAT)
        .unwrap_or(formats[0])
}

/// Lowest-latency mode available: mailbox, then immediate, then fifo.
/// Fifo is the only mode the surface is required to support.
pub fn choose_present_mode(present_modes: &[vk::PresentModeKHR]) -> vk::PresentModeKHR {
    [
        vk::PresentModeKHR::MAILBOX,
        vk::PresentModeKHR::IMMEDIATE,
    ]
    .into_iter()
    .find(|mode| present_modes.contains(mode))
    .unwrap_or(vk::PresentModeKHR::FIFO)
}

/// The surface dictates the extent unless its current extent carries the
/// `u32::MAX` sentinel, in which case the window size is clamped into the
/// supported range.
pub fn choose_extent(
    capabilities: &vk::SurfaceCapabilitiesKHR,
    window_size: [u32; 2],
) -> vk::Extent2D {
    if capabilities.current_extent.width != u32::MAX {
        return capabilities.current_extent;
    }

    vk::Extent2D {
        width: window_size[0].clamp(
            capabilities.min_image_extent.width,
            capabilities.max_image_extent.width,
        ),
        height: window_size[1].clamp(
            capabilities.min_image_extent.height,
            capabilities.max_image_extent.height,
        ),
    }
}

/// One above the minimum so acquire rarely blocks on the driver, capped by
/// the maximum when the surface has one (zero means unbounded).
pub fn choose_image_count(capabilities: &vk::SurfaceCapabilitiesKHR) -> u32 {
    let mut count = capabilities.min_image_count + 1;

    if capabilities.max_image_count != 0 && count > capabilities.max_image_count {
        count = capabilities.max_image_count;
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(format: vk::Format, color_space: vk::ColorSpaceKHR) -> vk::SurfaceFormatKHR {
        vk::SurfaceFormatKHR {
            format,
            color_space,
        }
    }

    #[test]
    fn undefined_only_format_yields_preferred_pair() {
        let formats = [format(vk::Format::UNDEFINED, vk::ColorSpaceKHR::SRGB_NONLINEAR)];
        assert_eq!(choose_surface_format(&formats), PREFERRED_FORMAT);
    }

    #[test]
    fn preferred_format_is_picked_when_listed() {
        let formats = [
            format(vk::Format::R8G8B8A8_SRGB, vk::ColorSpaceKHR::SRGB_NONLINEAR),
            format(vk::Format::B8G8R8A8_UNORM, vk::ColorSpaceKHR::SRGB_NONLINEAR),
        ];
        assert_eq!(choose_surface_format(&formats), PREFERRED_FORMAT);
    }

    #[test]
    fn first_format_wins_without_preferred() {
        let formats = [
            format(vk::Format::R8G8B8A8_SRGB, vk::ColorSpaceKHR::SRGB_NONLINEAR),
            format(vk::Format::R16G16B16A16_SFLOAT, vk::ColorSpaceKHR::SRGB_NONLINEAR),
        ];
        assert_eq!(choose_surface_format(&formats), formats[0]);
    }

    #[test]
    fn mailbox_beats_immediate_and_fifo() {
        let modes = [
            vk::PresentModeKHR::FIFO,
            vk::PresentModeKHR::IMMEDIATE,
            vk::PresentModeKHR::MAILBOX,
        ];
        assert_eq!(choose_present_mode(&modes), vk::PresentModeKHR::MAILBOX);
    }

    #[test]
    fn immediate_beats_fifo() {
        let modes = [vk::PresentModeKHR::FIFO, vk::PresentModeKHR::IMMEDIATE];
        assert_eq!(choose_present_mode(&modes), vk::PresentModeKHR::IMMEDIATE);
    }

    #[test]
    fn fifo_is_the_fallback() {
        let modes = [vk::PresentModeKHR::FIFO];
        assert_eq!(choose_present_mode(&modes), vk::PresentModeKHR::FIFO);
    }

    #[test]
    fn fixed_current_extent_is_authoritative() {
        let mut capabilities = vk::SurfaceCapabilitiesKHR::default();
        capabilities.current_extent = vk::Extent2D {
            width: 1280,
            height: 720,
        };

        let extent = choose_extent(&capabilities, [99, 99]);
        assert_eq!(extent.width, 1280);
        assert_eq!(extent.height, 720);
    }

    #[test]
    fn sentinel_extent_clamps_window_size() {
        let mut capabilities = vk::SurfaceCapabilitiesKHR::default();
        capabilities.current_extent = vk::Extent2D {
            width: u32::MAX,
            height: u32::MAX,
        };
        capabilities.min_image_extent = vk::Extent2D {
            width: 100,
            height: 100,
        };
        capabilities.max_image_extent = vk::Extent2D {
            width: 2000,
            height: 2000,
        };

        let extent = choose_extent(&capabilities, [50, 4000]);
        assert_eq!(extent.width, 100);
        assert_eq!(extent.height, 2000);

        let extent = choose_extent(&capabilities, [800, 600]);
        assert_eq!(extent.width, 800);
        assert_eq!(extent.height, 600);
    }

    #[test]
    fn image_count_is_one_above_minimum() {
        let mut capabilities = vk::SurfaceCapabilitiesKHR::default();
        capabilities.min_image_count = 2;
        capabilities.max_image_count = 8;
        assert_eq!(choose_image_count(&capabilities), 3);
    }

    #[test]
    fn image_count_respects_maximum() {
        let mut capabilities = vk::SurfaceCapabilitiesKHR::default();
        capabilities.min_image_count = 3;
        capabilities.max_image_count = 3;
        assert_eq!(choose_image_count(&capabilities), 3);
    }

    #[test]
    fn zero_maximum_means_unbounded() {
        let mut capabilities = vk::SurfaceCapabilitiesKHR::default();
        capabilities.min_image_count = 4;
        capabilities.max_image_count = 0;
        assert_eq!(choose_image_count(&capabilities), 5);
    }

    #[test]
    fn plan_covers_a_minimal_fifo_surface() {
        let mut capabilities = vk::SurfaceCapabilitiesKHR::default();
        capabilities.min_image_count = 1;
        capabilities.max_image_count = 0;
        capabilities.current_extent = vk::Extent2D {
            width: u32::MAX,
            height: u32::MAX,
        };
        capabilities.min_image_extent = vk::Extent2D { width: 1, height: 1 };
        capabilities.max_image_extent = vk::Extent2D {
            width: 4096,
            height: 4096,
        };

        let caps = SurfaceCaps {
            capabilities,
            formats: vec![format(
                vk::Format::B8G8R8A8_UNORM,
                vk::ColorSpaceKHR::SRGB_NONLINEAR,
            )],
            present_modes: vec![vk::PresentModeKHR::FIFO],
        };

        let plan = plan_swapchain(&caps, [800, 600], &[0]);

        assert_eq!(plan.surface_format, PREFERRED_FORMAT);
        assert_eq!(plan.present_mode, vk::PresentModeKHR::FIFO);
        assert_eq!(plan.extent, vk::Extent2D { width: 800, height: 600 });
        assert_eq!(plan.image_count, 2);
        assert_eq!(plan.sharing_mode, vk::SharingMode::EXCLUSIVE);
    }

    #[test]
    fn plan_covers_a_typical_surface() {
        let mut capabilities = vk::SurfaceCapabilitiesKHR::default();
        capabilities.min_image_count = 2;
        capabilities.max_image_count = 0;
        capabilities.current_extent = vk::Extent2D {
            width: u32::MAX,
            height: u32::MAX,
        };
        capabilities.min_image_extent = vk::Extent2D { width: 1, height: 1 };
        capabilities.max_image_extent = vk::Extent2D {
            width: 4096,
            height: 4096,
        };

        let caps = SurfaceCaps {
            capabilities,
            formats: vec![format(
                vk::Format::B8G8R8A8_UNORM,
                vk::ColorSpaceKHR::SRGB_NONLINEAR,
            )],
            present_modes: vec![vk::PresentModeKHR::FIFO, vk::PresentModeKHR::MAILBOX],
        };

        let plan = plan_swapchain(&caps, [800, 600], &[0]);

        assert_eq!(plan.surface_format, PREFERRED_FORMAT);
        assert_eq!(plan.present_mode, vk::PresentModeKHR::MAILBOX);
        assert_eq!(plan.extent, vk::Extent2D { width: 800, height: 600 });
        assert_eq!(plan.image_count, 3);
        assert_eq!(plan.sharing_mode, vk::SharingMode::EXCLUSIVE);

        let plan = plan_swapchain(&caps, [800, 600], &[0, 1]);
        assert_eq!(plan.sharing_mode, vk::SharingMode::CONCURRENT);
        assert_eq!(plan.queue_family_indices, vec![0, 1]);
    }
}
