//! Declarations of every Vulkan entry point the bootstrap resolves, grouped by tier.
//!
//! Resolution walks these lists in order, so the first symbol reported as
//! missing is always the same one for a given driver.

pub const KHR_SURFACE: &str = "VK_KHR_surface";
pub const EXT_DEBUG_REPORT: &str = "VK_EXT_debug_report";
pub const KHR_SWAPCHAIN: &str = "VK_KHR_swapchain";

/// A single entry point and, if it is not core, the extension providing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: &'static str,
    pub extension: Option<&'static str>,
}

impl FunctionDecl {
    pub const fn core(name: &'static str) -> Self {
        Self {
            name,
            extension: None,
        }
    }

    pub const fn from_extension(name: &'static str, extension: &'static str) -> Self {
        Self {
            name,
            extension: Some(extension),
        }
    }

    /// Whether this entry point should be resolved given the enabled extensions.
    pub fn is_enabled<S: AsRef<str>>(&self, enabled_extensions: &[S]) -> bool {
        match self.extension {
            None => true,
            Some(extension) => enabled_extensions
                .iter()
                .any(|enabled| enabled.as_ref() == extension),
        }
    }
}

pub const GET_INSTANCE_PROC_ADDR: &str = "vkGetInstanceProcAddr";

pub const EXPORTED_FUNCTIONS: &[FunctionDecl] = &[FunctionDecl::core(GET_INSTANCE_PROC_ADDR)];

pub const GLOBAL_FUNCTIONS: &[FunctionDecl] = &[
    FunctionDecl::core("vkEnumerateInstanceExtensionProperties"),
    FunctionDecl::core("vkEnumerateInstanceLayerProperties"),
    FunctionDecl::core("vkCreateInstance"),
];

pub const INSTANCE_FUNCTIONS: &[FunctionDecl] = &[
    FunctionDecl::core("vkEnumeratePhysicalDevices"),
    FunctionDecl::core("vkEnumerateDeviceExtensionProperties"),
    FunctionDecl::core("vkGetPhysicalDeviceProperties"),
    FunctionDecl::core("vkGetPhysicalDeviceFeatures"),
    FunctionDecl::core("vkGetPhysicalDeviceQueueFamilyProperties"),
    FunctionDecl::core("vkCreateDevice"),
    FunctionDecl::core("vkGetDeviceProcAddr"),
    FunctionDecl::core("vkDestroyInstance"),
    FunctionDecl::from_extension("vkGetPhysicalDeviceSurfaceSupportKHR", KHR_SURFACE),
    FunctionDecl::from_extension("vkGetPhysicalDeviceSurfaceCapabilitiesKHR", KHR_SURFACE),
    FunctionDecl::from_extension("vkGetPhysicalDeviceSurfaceFormatsKHR", KHR_SURFACE),
    FunctionDecl::from_extension("vkGetPhysicalDeviceSurfacePresentModesKHR", KHR_SURFACE),
    FunctionDecl::from_extension("vkDestroySurfaceKHR", KHR_SURFACE),
    FunctionDecl::from_extension("vkCreateDebugReportCallbackEXT", EXT_DEBUG_REPORT),
    FunctionDecl::from_extension("vkDestroyDebugReportCallbackEXT", EXT_DEBUG_REPORT),
];

pub const DEVICE_FUNCTIONS: &[FunctionDecl] = &[
    FunctionDecl::core("vkGetDeviceQueue"),
    FunctionDecl::core("vkDeviceWaitIdle"),
    FunctionDecl::core("vkDestroyDevice"),
    FunctionDecl::from_extension("vkCreateSwapchainKHR", KHR_SWAPCHAIN),
    FunctionDecl::from_extension("vkGetSwapchainImagesKHR", KHR_SWAPCHAIN),
    FunctionDecl::from_extension("vkAcquireNextImageKHR", KHR_SWAPCHAIN),
    FunctionDecl::from_extension("vkQueuePresentKHR", KHR_SWAPCHAIN),
    FunctionDecl::from_extension("vkDestroySwapchainKHR", KHR_SWAPCHAIN),
];
