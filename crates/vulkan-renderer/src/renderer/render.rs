use ash::vk;
use tracing::instrument;

use super::{Error, FrameOutcome, Renderer};

/// What to do with the result of an image acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireAction {
    /// Render to the image. `rebuild_after` is set when the chain is
    /// suboptimal; the frame is still usable and presented first.
    Draw {
        image_index: u32,
        rebuild_after: bool,
    },
    /// The chain is out of date, nothing was acquired. Rebuild and retry on
    /// the next frame.
    Rebuild,
}

/// Maps `vkAcquireNextImageKHR` results onto the frame loop's choices.
pub fn interpret_acquire(
    result: Result<(u32, bool), vk::Result>,
) -> Result<AcquireAction, Error> {
    match result {
        Ok((image_index, suboptimal)) => Ok(AcquireAction::Draw {
            image_index,
            rebuild_after: suboptimal,
        }),
        Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => Ok(AcquireAction::Rebuild),
        Err(e) => Err(Error::Acquire(e)),
    }
}

/// Maps `vkQueuePresentKHR` results onto a rebuild decision. Out of date and
/// suboptimal both schedule a rebuild; the frame itself was still delivered
/// in the suboptimal case.
pub fn interpret_present(result: Result<bool, vk::Result>) -> Result<bool, Error> {
    match result {
        Ok(suboptimal) => Ok(suboptimal),
        Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => Ok(true),
        Err(e) => Err(Error::Present(e)),
    }
}

impl Renderer {
    /// Renders and presents one frame.
    ///
    /// Handles the zero-size window case, pending resizes, and swapchain
    /// invalidation reported by acquire or present. An invalidated chain is
    /// rebuilt here and the frame skipped; the caller just asks again.
    #[instrument("Renderer::render", skip_all, err)]
    pub fn render(&mut self, window_size: [u32; 2]) -> Result<FrameOutcome, Error> {
        if window_size.contains(&0) {
            return Ok(FrameOutcome::SkippedZeroSize);
        }

        if self.recreate_swapchain {
            self.recreate_swapchain(window_size)?;
            self.recreate_swapchain = false;
        }

        let acquire_result = unsafe {
            self.swapchain.loader.acquire_next_image(
                self.swapchain.handle,
                u64::MAX,
                self.sync.image_acquired,
                vk::Fence::null(),
            )
        };

        let (image_index, rebuild_after) = match interpret_acquire(acquire_result)? {
            AcquireAction::Draw {
                image_index,
                rebuild_after,
            } => (image_index, rebuild_after),
            AcquireAction::Rebuild => {
                self.recreate_swapchain(window_size)?;
                return Ok(FrameOutcome::SkippedOutOfDate);
            }
        };

        let wait_semaphores = [self.sync.image_acquired];
        let wait_stages = [vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT];
        let command_buffers = [self.commands.buffer(image_index)];
        let signal_semaphores = [self.sync.rendering_finished];

        let submit_info = vk::SubmitInfo::default()
            .wait_semaphores(&wait_semaphores)
            .wait_dst_stage_mask(&wait_stages)
            .command_buffers(&command_buffers)
            .signal_semaphores(&signal_semaphores);

        unsafe {
            self.context.device.queue_submit(
                self.context.graphics_queue,
                &[submit_info],
                vk::Fence::null(),
            )
        }
        .map_err(Error::Submit)?;

        let swapchains = [self.swapchain.handle];
        let image_indices = [image_index];

        let present_info = vk::PresentInfoKHR::default()
            .wait_semaphores(&signal_semaphores)
            .swapchains(&swapchains)
            .image_indices(&image_indices);

        let present_result = unsafe {
            self.swapchain
                .loader
                .queue_present(self.context.present_queue, &present_info)
        };

        if interpret_present(present_result)? || rebuild_after {
            self.recreate_swapchain = true;
        }

        Ok(FrameOutcome::Drawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_success_draws() {
        let action = interpret_acquire(Ok((2, false))).unwrap();
        assert_eq!(
            action,
            AcquireAction::Draw {
                image_index: 2,
                rebuild_after: false,
            }
        );
    }

    #[test]
    fn acquire_suboptimal_draws_then_rebuilds() {
        let action = interpret_acquire(Ok((0, true))).unwrap();
        assert_eq!(
            action,
            AcquireAction::Draw {
                image_index: 0,
                rebuild_after: true,
            }
        );
    }

    #[test]
    fn acquire_out_of_date_rebuilds_without_drawing() {
        let action = interpret_acquire(Err(vk::Result::ERROR_OUT_OF_DATE_KHR)).unwrap();
        assert_eq!(action, AcquireAction::Rebuild);
    }

    #[test]
    fn acquire_device_lost_is_fatal() {
        let error = interpret_acquire(Err(vk::Result::ERROR_DEVICE_LOST)).unwrap_err();
        assert!(matches!(error, Error::Acquire(vk::Result::ERROR_DEVICE_LOST)));
    }

    #[test]
    fn present_out_of_date_requests_rebuild() {
        assert!(interpret_present(Err(vk::Result::ERROR_OUT_OF_DATE_KHR)).unwrap());
    }

    #[test]
    fn present_suboptimal_requests_rebuild() {
        assert!(interpret_present(Ok(true)).unwrap());
    }

    #[test]
    fn present_clean_requests_nothing() {
        assert!(!interpret_present(Ok(false)).unwrap());
    }

    #[test]
    fn present_surface_lost_is_fatal() {
        let error = interpret_present(Err(vk::Result::ERROR_SURFACE_LOST_KHR)).unwrap_err();
        assert!(matches!(
            error,
            Error::Present(vk::Result::ERROR_SURFACE_LOST_KHR)
        ));
    }
}
