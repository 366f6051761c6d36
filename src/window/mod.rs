mod glfw_backend;

pub use self::glfw_backend::{GlfwWindow, GlfwWindowSystem};

/// Primary monitor mode as reported after window creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMode {
    pub width: u32,
    pub height: u32,
    pub refresh_rate: u32,
    pub bits_per_pixel: u32,
}

/// The native windowing subsystem. Failures carry the platform's message.
pub trait WindowSystem {
    type Window;

    fn init(&mut self) -> Result<(), String>;

    /// Creates a visible window without a client API so Vulkan can present to it.
    fn create_window(&mut self, width: u32, height: u32, title: &str)
        -> Result<Self::Window, String>;

    fn current_display_mode(&mut self) -> Option<DisplayMode>;

    /// Size of the window's framebuffer in pixels.
    fn drawable_size(&self, window: &Self::Window) -> (u32, u32);

    /// Instance extensions needed to create a surface for `window`.
    fn required_instance_extensions(&self, window: &Self::Window) -> Result<Vec<String>, String>;

    fn destroy_window(&mut self, window: Self::Window);

    fn shutdown(&mut self);
}
