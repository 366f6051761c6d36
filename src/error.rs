use std::fmt;

use ash::vk;
use thiserror::Error;

/// The scope a graphics-API entry point is resolved at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Exported,
    Global,
    Instance,
    Device,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Exported => "exported",
            Tier::Global => "global",
            Tier::Instance => "instance",
            Tier::Device => "device",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Error while initializing window system: {0}")]
    WindowSystemInit(String),

    #[error("Error while loading the Vulkan loader library: {0}")]
    LoaderLibraryLoad(String),

    #[error("Error while creating window: {0}")]
    WindowCreation(String),

    #[error("Error while querying required instance extensions: {0}")]
    ExtensionQuery(String),

    #[error("Could not load {tier} level function: {symbol}")]
    FunctionResolution { tier: Tier, symbol: String },

    #[error("Error while creating Vulkan instance: {result:?}")]
    InstanceCreation { result: vk::Result },

    #[error("Error while installing debug report callback: {result:?}")]
    DebugCallbackCreation { result: vk::Result },

    #[error("Name {0:?} contains an interior NUL byte")]
    InvalidName(String),

    /// A pipeline step ran while its resource was not in the state it requires.
    #[error("Cannot {step} while resource is in stage {stage}")]
    StageOrder { step: &'static str, stage: String },
}

impl BootstrapError {
    pub(crate) fn unresolved(tier: Tier, symbol: &str) -> Self {
        Self::FunctionResolution {
            tier,
            symbol: symbol.to_owned(),
        }
    }
}

pub type BootstrapResult<T> = Result<T, BootstrapError>;

/// Renders a result code as `NAME (description)`.
pub fn describe_result(result: vk::Result) -> String {
    format!("{:?} ({})", result, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_resolution_names_tier_and_symbol() {
        let err = BootstrapError::unresolved(Tier::Instance, "vkDestroyInstance");
        assert_eq!(
            err.to_string(),
            "Could not load instance level function: vkDestroyInstance"
        );
    }

    #[test]
    fn instance_creation_message_carries_result_name() {
        let err = BootstrapError::InstanceCreation {
            result: vk::Result::ERROR_DEVICE_LOST,
        };
        assert!(err.to_string().contains("ERROR_DEVICE_LOST"));
    }
}
