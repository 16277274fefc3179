use tracing::error;

use super::Renderer;

impl Drop for Renderer {
    fn drop(&mut self) {
        // Field drops destroy live objects, so nothing may still be in flight.
        if let Err(e) = unsafe { self.context.device.device_wait_idle() } {
            error!("Failed to wait for the device while shutting down:\n{e}");
        }
    }
}
