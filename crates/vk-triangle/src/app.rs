use thiserror::Error;
use tracing::{error, info, warn};
use vulkan_renderer::{renderer, FrameOutcome, Renderer};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::config::Config;

/// Window plus everything rendering into it. Field order drops the renderer
/// before the window it draws to.
struct ActiveApp {
    renderer: Renderer,
    window: Window,
}

/// The winit application. Rendering state only exists between `resumed` and
/// suspension; a failure during a frame stops the loop.
pub struct App {
    config: Config,
    vertex_spirv: Vec<u8>,
    fragment_spirv: Vec<u8>,

    active: Option<ActiveApp>,
    pub error: Option<Error>,
}

impl App {
    pub fn new(config: Config, vertex_spirv: Vec<u8>, fragment_spirv: Vec<u8>) -> Self {
        Self {
            config,
            vertex_spirv,
            fragment_spirv,

            active: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: Error) {
        error!("{error}");
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.active.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("vk-triangle")
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => window,
            Err(e) => return self.fail(event_loop, Error::CreateWindow(e)),
        };

        let enable_validation = self.config.validation || crate::logger::should_debug();

        let renderer = match Renderer::new(
            &window,
            enable_validation,
            &self.vertex_spirv,
            &self.fragment_spirv,
        ) {
            Ok(renderer) => renderer,
            Err(e) => return self.fail(event_loop, Error::CreateRenderer(e)),
        };

        self.active = Some(ActiveApp { renderer, window });
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(active) = self.active.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested");
                event_loop.exit();
            }

            WindowEvent::Resized(_) => {
                active.renderer.surface_resized();
            }

            WindowEvent::RedrawRequested => {
                let size = active.window.inner_size();

                match active.renderer.render([size.width, size.height]) {
                    Ok(FrameOutcome::Drawn | FrameOutcome::SkippedZeroSize) => {}
                    Ok(FrameOutcome::SkippedOutOfDate) => {
                        warn!("Skipped a frame, the swapchain was out of date");
                        active.window.request_redraw();
                    }
                    Err(e) => self.fail(event_loop, Error::Render(e)),
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(active) = &self.active {
            active.window.request_redraw();
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to create the window:\n{0}")]
    CreateWindow(#[source] winit::error::OsError),

    #[error("Failed to create the renderer:\n{0}")]
    CreateRenderer(#[source] renderer::Error),

    #[error("Failed to render a frame:\n{0}")]
    Render(#[source] renderer::Error),
}
