use ash::{khr::surface, vk, Entry, Instance};
use winit::{
    raw_window_handle::{HasDisplayHandle, HasWindowHandle},
    window::Window,
};

use crate::VulkanError;

use super::Error;

pub fn create_surface(
    entry: &Entry,
    instance: &Instance,
    window: &Window,
) -> Result<(vk::SurfaceKHR, surface::Instance), Error> {
    let display_handle = window.display_handle()?;
    let window_handle = window.window_handle()?;

    let surface = unsafe {
        ash_window::create_surface(
            entry,
            instance,
            display_handle.as_raw(),
            window_handle.as_raw(),
            None,
        )
    }
    .map_err(|e| VulkanError::VkResult(e, "creating the surface"))?;

    let loader = surface::Instance::new(entry, instance);

    Ok((surface, loader))
}
