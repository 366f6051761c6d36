pub mod config;
pub mod error;
pub mod logging;
pub mod resource_manager;
pub mod vulkan;
pub mod window;

#[cfg(test)]
mod testing;

pub use config::{AppConfig, ApplicationDescriptor, WindowConfig};
pub use error::{BootstrapError, BootstrapResult, Tier};
pub use logging::init as init_logging;
pub use resource_manager::{
    GraphicsResource, GraphicsStage, ResourceManager, WindowResource, WindowStage,
};
pub use vulkan::{AshLoader, FunctionTable, GraphicsLoader};
pub use window::{DisplayMode, GlfwWindowSystem, WindowSystem};
