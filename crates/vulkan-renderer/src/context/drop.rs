use super::Context;

impl Drop for Context {
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_device(None);

            self.surface_loader.destroy_surface(self.surface, None);

            if let Some((loader, messenger)) = self.debug_utils.take() {
                loader.destroy_debug_utils_messenger(messenger, None);
            }

            self.instance.destroy_instance(None);
        }
    }
}
