use std::env;

use anyhow::{bail, Result};

/// Environment variable that overrides the compiled-in validation default.
pub const VALIDATIONS_ENV: &str = "ENABLE_VALIDATIONS";

#[cfg(feature = "enable_validations")]
const ENABLE_VALIDATIONS: bool = true;
#[cfg(not(feature = "enable_validations"))]
const ENABLE_VALIDATIONS: bool = false;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Hello Vulkan!".to_owned(),
        }
    }
}

/// Name and version reported to the driver at instance creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationDescriptor {
    pub application_name: String,
    pub engine_name: String,
    pub version: (u32, u32, u32),
}

impl ApplicationDescriptor {
    /// Describes this binary using its Cargo package metadata.
    pub fn from_package() -> Result<Self> {
        let version_major = env!("CARGO_PKG_VERSION_MAJOR").parse::<u32>()?;
        let version_minor = env!("CARGO_PKG_VERSION_MINOR").parse::<u32>()?;
        let version_patch = env!("CARGO_PKG_VERSION_PATCH").parse::<u32>()?;
        Ok(Self {
            application_name: env!("CARGO_PKG_NAME").to_owned(),
            engine_name: env!("CARGO_PKG_NAME").to_owned(),
            version: (version_major, version_minor, version_patch),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub application: ApplicationDescriptor,
    /// Enables the debug report extension and the validation layers.
    pub validation: bool,
}

impl AppConfig {
    /// Builds the configuration from package metadata, the `enable_validations`
    /// feature and the `ENABLE_VALIDATIONS` environment variable, in that order.
    pub fn from_env() -> Result<Self> {
        let mut config = Self {
            window: WindowConfig::default(),
            application: ApplicationDescriptor::from_package()?,
            validation: ENABLE_VALIDATIONS,
        };
        if let Ok(value) = env::var(VALIDATIONS_ENV) {
            config.validation = parse_flag(&value)?;
        }
        Ok(config)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("Invalid value for {}: {:?}", VALIDATIONS_ENV, other),
    }
}
