mod app;
mod config;
mod logger;
mod shaders;

use std::process::ExitCode;

use app::App;
use config::Config;
use tracing::error;
use winit::event_loop::{ControlFlow, EventLoop};

fn main() -> ExitCode {
    let _logger_guard = logger::init_logger(logger::should_debug());

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let vertex_spirv = match shaders::load_spirv(&config.vertex_shader) {
        Ok(spirv) => spirv,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let fragment_spirv = match shaders::load_spirv(&config.fragment_shader) {
        Ok(spirv) => spirv,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            error!("Failed to create the event loop:\n{e}");
            return ExitCode::FAILURE;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, vertex_spirv, fragment_spirv);

    if let Err(e) = event_loop.run_app(&mut app) {
        error!("The event loop failed:\n{e}");
        return ExitCode::FAILURE;
    }

    if app.error.is_some() {
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
