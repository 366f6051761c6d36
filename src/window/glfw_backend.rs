use glfw::{ClientApiHint, Glfw, GlfwReceiver, PWindow, WindowEvent, WindowHint, WindowMode};
use tracing::{debug, error};

use super::{DisplayMode, WindowSystem};

pub struct GlfwWindow {
    window: PWindow,
    // events are not consumed, but the receiver has to live as long as the window
    _events: GlfwReceiver<(f64, WindowEvent)>,
}

#[derive(Default)]
pub struct GlfwWindowSystem {
    glfw: Option<Glfw>,
}

impl GlfwWindowSystem {
    fn glfw(&mut self) -> Result<&mut Glfw, String> {
        self.glfw
            .as_mut()
            .ok_or_else(|| "GLFW is not initialized".to_owned())
    }
}

impl WindowSystem for GlfwWindowSystem {
    type Window = GlfwWindow;

    fn init(&mut self) -> Result<(), String> {
        let glfw = glfw::init(|err, description| error!("GLFW error {:?}: {}", err, description))
            .map_err(|err| format!("{:?}", err))?;
        if !glfw.vulkan_supported() {
            debug!("GLFW did not find a Vulkan loader");
        }
        self.glfw = Some(glfw);
        Ok(())
    }

    fn create_window(&mut self, width: u32, height: u32, title: &str) -> Result<GlfwWindow, String> {
        let glfw = self.glfw()?;
        glfw.window_hint(WindowHint::ClientApi(ClientApiHint::NoApi));
        glfw.window_hint(WindowHint::Visible(true));
        let (window, events) = glfw
            .create_window(width, height, title, WindowMode::Windowed)
            .ok_or_else(|| "Failed to create GLFW window".to_owned())?;
        Ok(GlfwWindow {
            window,
            _events: events,
        })
    }

    fn current_display_mode(&mut self) -> Option<DisplayMode> {
        let glfw = self.glfw.as_mut()?;
        let mode = glfw.with_primary_monitor(|_, monitor| {
            monitor.and_then(|monitor| monitor.get_video_mode())
        })?;
        Some(DisplayMode {
            width: mode.width,
            height: mode.height,
            refresh_rate: mode.refresh_rate,
            bits_per_pixel: mode.red_bits + mode.green_bits + mode.blue_bits,
        })
    }

    fn drawable_size(&self, window: &GlfwWindow) -> (u32, u32) {
        let (width, height) = window.window.get_framebuffer_size();
        (
            u32::try_from(width).unwrap_or(0),
            u32::try_from(height).unwrap_or(0),
        )
    }

    fn required_instance_extensions(&self, _window: &GlfwWindow) -> Result<Vec<String>, String> {
        self.glfw
            .as_ref()
            .ok_or_else(|| "GLFW is not initialized".to_owned())?
            .get_required_instance_extensions()
            .ok_or_else(|| "GLFW reports no Vulkan surface support".to_owned())
    }

    fn destroy_window(&mut self, window: GlfwWindow) {
        drop(window);
    }

    fn shutdown(&mut self) {
        self.glfw = None;
    }
}
