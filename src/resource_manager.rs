//! Ordered acquisition and reverse-order release of the window system, the
//! Vulkan loader, the window and the Vulkan instance.
//!
//! Every resource carries a stage that only moves forward while acquiring.
//! `release_all` walks the stages backwards, so only what was actually
//! acquired is released, and then returns everything to `Uninitialized`.

use ash::vk;
use tracing::{debug, info};

use crate::{
    config::{AppConfig, ApplicationDescriptor},
    error::{BootstrapError, BootstrapResult, Tier},
    vulkan::{
        extensions_registry::{self, install_debug_report, remove_debug_report},
        instance::{self, InstanceRequest},
        layers_registry::{self, VALIDATION_LAYERS},
        FunctionTable, GraphicsLoader,
    },
    window::{DisplayMode, WindowSystem},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum WindowStage {
    #[default]
    Uninitialized,
    WindowSystemReady,
    LoaderReady,
    WindowCreated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum GraphicsStage {
    #[default]
    Uninitialized,
    InstanceCreated,
    DebugCallbackInstalled,
}

pub struct WindowResource<H> {
    handle: Option<H>,
    display_mode: Option<DisplayMode>,
    drawable_size: (u32, u32),
    stage: WindowStage,
}

impl<H> Default for WindowResource<H> {
    fn default() -> Self {
        Self {
            handle: None,
            display_mode: None,
            drawable_size: (0, 0),
            stage: WindowStage::Uninitialized,
        }
    }
}

impl<H> WindowResource<H> {
    pub fn stage(&self) -> WindowStage {
        self.stage
    }

    pub fn is_window_system_ready(&self) -> bool {
        self.stage >= WindowStage::WindowSystemReady
    }

    pub fn is_loader_ready(&self) -> bool {
        self.stage >= WindowStage::LoaderReady
    }

    pub fn is_window_ready(&self) -> bool {
        self.stage >= WindowStage::WindowCreated
    }

    /// The window, only while `is_window_ready`.
    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    pub fn display_mode(&self) -> Option<DisplayMode> {
        self.display_mode
    }

    pub fn drawable_size(&self) -> (u32, u32) {
        self.drawable_size
    }
}

#[derive(Debug, Default)]
pub struct GraphicsResource {
    instance: vk::Instance,
    debug_callback: vk::DebugReportCallbackEXT,
    enabled_extensions: Vec<String>,
    enabled_layers: Vec<String>,
    stage: GraphicsStage,
}

impl GraphicsResource {
    pub fn stage(&self) -> GraphicsStage {
        self.stage
    }

    pub fn is_instance_ready(&self) -> bool {
        self.stage >= GraphicsStage::InstanceCreated
    }

    pub fn instance(&self) -> Option<vk::Instance> {
        self.is_instance_ready().then_some(self.instance)
    }

    pub fn enabled_extensions(&self) -> &[String] {
        &self.enabled_extensions
    }

    pub fn enabled_layers(&self) -> &[String] {
        &self.enabled_layers
    }
}

pub struct ResourceManager<W: WindowSystem, L: GraphicsLoader> {
    window_system: W,
    loader: L,
    functions: FunctionTable,
    window: WindowResource<W::Window>,
    graphics: GraphicsResource,
}

impl<W: WindowSystem, L: GraphicsLoader> ResourceManager<W, L> {
    pub fn new(window_system: W, loader: L) -> Self {
        Self {
            window_system,
            loader,
            functions: FunctionTable::new(),
            window: WindowResource::default(),
            graphics: GraphicsResource::default(),
        }
    }

    pub fn window(&self) -> &WindowResource<W::Window> {
        &self.window
    }

    pub fn graphics(&self) -> &GraphicsResource {
        &self.graphics
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    /// Used to add the device tier once a device exists.
    pub fn functions_mut(&mut self) -> &mut FunctionTable {
        &mut self.functions
    }

    /// Runs the whole acquisition chain, stopping at the first failure.
    /// The caller still has to `release_all` afterwards either way.
    pub fn bootstrap(&mut self, config: &AppConfig) -> BootstrapResult<()> {
        self.acquire_window_system()?;
        self.acquire_graphics_loader()?;
        self.create_window(
            config.window.width,
            config.window.height,
            &config.window.title,
        )?;
        self.create_graphics_instance(&config.application, config.validation)
    }

    fn expect_window_stage(&self, step: &'static str, expected: WindowStage) -> BootstrapResult<()> {
        if self.window.stage == expected {
            Ok(())
        } else {
            Err(BootstrapError::StageOrder {
                step,
                stage: format!("{:?}", self.window.stage),
            })
        }
    }

    pub fn acquire_window_system(&mut self) -> BootstrapResult<()> {
        self.expect_window_stage("initialize the window system", WindowStage::Uninitialized)?;
        self.window_system
            .init()
            .map_err(BootstrapError::WindowSystemInit)?;
        self.window.stage = WindowStage::WindowSystemReady;
        debug!("Window system initialized");
        Ok(())
    }

    pub fn acquire_graphics_loader(&mut self) -> BootstrapResult<()> {
        self.expect_window_stage("load the Vulkan loader", WindowStage::WindowSystemReady)?;
        self.loader
            .load_library()
            .map_err(BootstrapError::LoaderLibraryLoad)?;
        if let Err(err) = self
            .functions
            .resolve_exported(self.loader.instance_proc_addr())
        {
            self.loader.unload_library();
            return Err(err);
        }
        self.window.stage = WindowStage::LoaderReady;
        debug!("Vulkan loader library loaded");
        Ok(())
    }

    pub fn create_window(&mut self, width: u32, height: u32, title: &str) -> BootstrapResult<()> {
        self.expect_window_stage("create a window", WindowStage::LoaderReady)?;
        let handle = self
            .window_system
            .create_window(width, height, title)
            .map_err(BootstrapError::WindowCreation)?;
        self.window.stage = WindowStage::WindowCreated;

        self.window.display_mode = self.window_system.current_display_mode();
        self.window.drawable_size = self.window_system.drawable_size(&handle);
        self.window.handle = Some(handle);

        let (drawable_width, drawable_height) = self.window.drawable_size;
        info!("Drawable Size: {}, {}", drawable_width, drawable_height);
        if let Some(display_mode) = self.window.display_mode {
            info!("Screen BPP: {}", display_mode.bits_per_pixel);
        }
        Ok(())
    }

    /// Negotiates extensions and layers, creates the instance and resolves the
    /// instance tier against it. With `debug` set, also installs the debug
    /// report callback.
    pub fn create_graphics_instance(
        &mut self,
        application: &ApplicationDescriptor,
        debug: bool,
    ) -> BootstrapResult<()> {
        if self.graphics.stage != GraphicsStage::Uninitialized {
            return Err(BootstrapError::StageOrder {
                step: "create the graphics instance",
                stage: format!("{:?}", self.graphics.stage),
            });
        }
        let window = match (self.window.stage, self.window.handle.as_ref()) {
            (WindowStage::WindowCreated, Some(window)) => window,
            _ => {
                return Err(BootstrapError::StageOrder {
                    step: "create the graphics instance",
                    stage: format!("{:?}", self.window.stage),
                })
            }
        };

        if !self.functions.is_resolved(Tier::Global) {
            self.functions.resolve_global()?;
        }

        let required = self
            .window_system
            .required_instance_extensions(window)
            .map_err(BootstrapError::ExtensionQuery)?;
        let extensions = extensions_registry::instance_extensions(required, debug);
        let layers = if debug {
            let available = layers_registry::available_layers(&self.functions)?;
            layers_registry::negotiate(VALIDATION_LAYERS, &available)
        } else {
            vec![]
        };

        let request = InstanceRequest {
            application,
            extensions,
            layers,
            debug,
        };
        let handle = instance::create_instance(&self.functions, &request)?;
        self.graphics.instance = handle;
        self.graphics.enabled_extensions = request.extensions;
        self.graphics.enabled_layers = request.layers;
        self.graphics.stage = GraphicsStage::InstanceCreated;
        info!("Vulkan instance created");

        self.functions
            .resolve_instance(handle, &self.graphics.enabled_extensions)?;

        if debug {
            self.graphics.debug_callback = install_debug_report(&self.functions, handle)?;
            self.graphics.stage = GraphicsStage::DebugCallbackInstalled;
            debug!("Debug report callback installed");
        }
        Ok(())
    }

    /// Releases whatever was acquired, newest first. Never fails and is a no-op
    /// when nothing is held.
    pub fn release_all(&mut self) {
        let instance = self.graphics.instance;
        if self.graphics.stage >= GraphicsStage::DebugCallbackInstalled {
            debug!("Removing debug report callback");
            remove_debug_report(&self.functions, instance, self.graphics.debug_callback);
        }
        if self.graphics.stage >= GraphicsStage::InstanceCreated {
            debug!("Destroying Vulkan instance");
            instance::destroy_instance(&self.functions, instance);
            self.functions.forget_instance_scope();
        }
        self.graphics = GraphicsResource::default();

        if self.window.stage >= WindowStage::WindowCreated {
            if let Some(window) = self.window.handle.take() {
                debug!("Destroying window");
                self.window_system.destroy_window(window);
            }
        }
        if self.window.stage >= WindowStage::LoaderReady {
            debug!("Unloading Vulkan loader library");
            // every resolved pointer points into the library
            self.functions = FunctionTable::new();
            self.loader.unload_library();
        }
        if self.window.stage >= WindowStage::WindowSystemReady {
            debug!("Shutting down window system");
            self.window_system.shutdown();
        }
        self.window.stage = WindowStage::Uninitialized;
    }

    /// Releases everything and forgets the informational window data so the
    /// manager can run the pipeline again.
    pub fn reset(&mut self) {
        self.release_all();
        self.window = WindowResource::default();
    }
}

impl<W: WindowSystem, L: GraphicsLoader> Drop for ResourceManager<W, L> {
    fn drop(&mut self) {
        self.release_all();
    }
}
