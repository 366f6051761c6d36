use ash::{vk, Entry};

/// The platform's dynamic Vulkan loader library.
pub trait GraphicsLoader {
    fn load_library(&mut self) -> Result<(), String>;

    /// The exported `vkGetInstanceProcAddr`, if the library is loaded.
    fn instance_proc_addr(&self) -> Option<vk::PFN_vkGetInstanceProcAddr>;

    fn unload_library(&mut self);
}

/// Loads `libvulkan` at runtime through ash.
#[derive(Default)]
pub struct AshLoader {
    entry: Option<Entry>,
}

impl GraphicsLoader for AshLoader {
    fn load_library(&mut self) -> Result<(), String> {
        let entry = unsafe { Entry::load() }.map_err(|err| err.to_string())?;
        self.entry = Some(entry);
        Ok(())
    }

    fn instance_proc_addr(&self) -> Option<vk::PFN_vkGetInstanceProcAddr> {
        self.entry
            .as_ref()
            .map(|entry| entry.static_fn().get_instance_proc_addr)
    }

    fn unload_library(&mut self) {
        self.entry = None;
    }
}
