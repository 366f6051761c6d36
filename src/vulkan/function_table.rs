use std::{
    collections::HashMap,
    ffi::{c_char, CString},
    mem,
};

use ash::vk;
use tracing::debug;

use crate::error::{BootstrapError, BootstrapResult, Tier};

use super::functions::{
    FunctionDecl, DEVICE_FUNCTIONS, GET_INSTANCE_PROC_ADDR, GLOBAL_FUNCTIONS, INSTANCE_FUNCTIONS,
};

/// Untyped entry point as returned by `vkGet*ProcAddr`.
pub type RawFunction = unsafe extern "system" fn();

const NO_EXTENSIONS: &[&str] = &[];

/// The entry points of one tier, keyed by symbol name. Only ever built complete.
#[derive(Debug, Clone)]
pub struct ResolvedTier {
    functions: HashMap<&'static str, RawFunction>,
}

impl ResolvedTier {
    pub fn get(&self, name: &str) -> Option<RawFunction> {
        self.functions.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// Owned table of every resolved Vulkan entry point, one slot per tier.
///
/// A tier slot is either `None` or holds every declared symbol that applied to
/// it; a failed resolution leaves the slot empty.
#[derive(Debug, Default)]
pub struct FunctionTable {
    get_instance_proc_addr: Option<vk::PFN_vkGetInstanceProcAddr>,
    global: Option<ResolvedTier>,
    instance: Option<ResolvedTier>,
    device: Option<ResolvedTier>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the bootstrap entry point handed out by the platform loader.
    pub fn resolve_exported(
        &mut self,
        entry_point: Option<vk::PFN_vkGetInstanceProcAddr>,
    ) -> BootstrapResult<()> {
        let entry_point = entry_point
            .ok_or_else(|| BootstrapError::unresolved(Tier::Exported, GET_INSTANCE_PROC_ADDR))?;
        self.get_instance_proc_addr = Some(entry_point);
        Ok(())
    }

    /// Resolves the functions callable before any instance exists.
    pub fn resolve_global(&mut self) -> BootstrapResult<()> {
        self.global = None;
        let get_instance_proc_addr = self.get_instance_proc_addr()?;
        let resolved = resolve_tier(Tier::Global, GLOBAL_FUNCTIONS, NO_EXTENSIONS, |name| unsafe {
            get_instance_proc_addr(vk::Instance::null(), name)
        })?;
        self.global = Some(resolved);
        Ok(())
    }

    /// Resolves the instance level functions, skipping those whose extension
    /// is not in `enabled_extensions`.
    pub fn resolve_instance<S: AsRef<str>>(
        &mut self,
        instance: vk::Instance,
        enabled_extensions: &[S],
    ) -> BootstrapResult<()> {
        self.instance = None;
        let get_instance_proc_addr = self.get_instance_proc_addr()?;
        let resolved = resolve_tier(
            Tier::Instance,
            INSTANCE_FUNCTIONS,
            enabled_extensions,
            |name| unsafe { get_instance_proc_addr(instance, name) },
        )?;
        self.instance = Some(resolved);
        Ok(())
    }

    /// Resolves the device level functions through the instance tier's
    /// `vkGetDeviceProcAddr`.
    pub fn resolve_device<S: AsRef<str>>(
        &mut self,
        device: vk::Device,
        enabled_extensions: &[S],
    ) -> BootstrapResult<()> {
        self.device = None;
        let get_device_proc_addr = self.get_device_proc_addr()?;
        let resolved = resolve_tier(
            Tier::Device,
            DEVICE_FUNCTIONS,
            enabled_extensions,
            |name| unsafe { get_device_proc_addr(device, name) },
        )?;
        self.device = Some(resolved);
        Ok(())
    }

    /// Drops the tiers bound to an instance that is about to go away.
    pub fn forget_instance_scope(&mut self) {
        self.instance = None;
        self.device = None;
    }

    pub fn is_resolved(&self, tier: Tier) -> bool {
        match tier {
            Tier::Exported => self.get_instance_proc_addr.is_some(),
            _ => self.tier(tier).is_some(),
        }
    }

    pub fn tier(&self, tier: Tier) -> Option<&ResolvedTier> {
        match tier {
            Tier::Exported => None,
            Tier::Global => self.global.as_ref(),
            Tier::Instance => self.instance.as_ref(),
            Tier::Device => self.device.as_ref(),
        }
    }

    pub fn get(&self, tier: Tier, name: &str) -> Option<RawFunction> {
        self.tier(tier).and_then(|resolved| resolved.get(name))
    }

    fn function(&self, tier: Tier, name: &'static str) -> BootstrapResult<RawFunction> {
        self.get(tier, name)
            .ok_or_else(|| BootstrapError::unresolved(tier, name))
    }

    pub fn get_instance_proc_addr(&self) -> BootstrapResult<vk::PFN_vkGetInstanceProcAddr> {
        self.get_instance_proc_addr
            .ok_or_else(|| BootstrapError::unresolved(Tier::Exported, GET_INSTANCE_PROC_ADDR))
    }

    pub fn enumerate_instance_extension_properties(
        &self,
    ) -> BootstrapResult<vk::PFN_vkEnumerateInstanceExtensionProperties> {
        let function = self.function(Tier::Global, "vkEnumerateInstanceExtensionProperties")?;
        Ok(unsafe {
            mem::transmute::<RawFunction, vk::PFN_vkEnumerateInstanceExtensionProperties>(function)
        })
    }

    pub fn enumerate_instance_layer_properties(
        &self,
    ) -> BootstrapResult<vk::PFN_vkEnumerateInstanceLayerProperties> {
        let function = self.function(Tier::Global, "vkEnumerateInstanceLayerProperties")?;
        Ok(unsafe {
            mem::transmute::<RawFunction, vk::PFN_vkEnumerateInstanceLayerProperties>(function)
        })
    }

    pub fn create_instance(&self) -> BootstrapResult<vk::PFN_vkCreateInstance> {
        let function = self.function(Tier::Global, "vkCreateInstance")?;
        Ok(unsafe { mem::transmute::<RawFunction, vk::PFN_vkCreateInstance>(function) })
    }

    /// Returns `vkDestroyInstance` for `instance`. Falls back to asking the
    /// exported entry point directly when the instance tier never resolved,
    /// so an instance can be destroyed even after a failed tier resolution.
    pub fn destroy_instance(
        &self,
        instance: vk::Instance,
    ) -> BootstrapResult<vk::PFN_vkDestroyInstance> {
        const NAME: &str = "vkDestroyInstance";
        let function = match self.get(Tier::Instance, NAME) {
            Some(function) => function,
            None => {
                let get_instance_proc_addr = self.get_instance_proc_addr()?;
                let name = CString::new(NAME)
                    .map_err(|_| BootstrapError::unresolved(Tier::Instance, NAME))?;
                unsafe { get_instance_proc_addr(instance, name.as_ptr()) }
                    .ok_or_else(|| BootstrapError::unresolved(Tier::Instance, NAME))?
            }
        };
        Ok(unsafe { mem::transmute::<RawFunction, vk::PFN_vkDestroyInstance>(function) })
    }

    pub fn get_device_proc_addr(&self) -> BootstrapResult<vk::PFN_vkGetDeviceProcAddr> {
        let function = self.function(Tier::Instance, "vkGetDeviceProcAddr")?;
        Ok(unsafe { mem::transmute::<RawFunction, vk::PFN_vkGetDeviceProcAddr>(function) })
    }

    pub fn create_debug_report_callback(
        &self,
    ) -> BootstrapResult<vk::PFN_vkCreateDebugReportCallbackEXT> {
        let function = self.function(Tier::Instance, "vkCreateDebugReportCallbackEXT")?;
        Ok(unsafe {
            mem::transmute::<RawFunction, vk::PFN_vkCreateDebugReportCallbackEXT>(function)
        })
    }

    pub fn destroy_debug_report_callback(
        &self,
    ) -> BootstrapResult<vk::PFN_vkDestroyDebugReportCallbackEXT> {
        let function = self.function(Tier::Instance, "vkDestroyDebugReportCallbackEXT")?;
        Ok(unsafe {
            mem::transmute::<RawFunction, vk::PFN_vkDestroyDebugReportCallbackEXT>(function)
        })
    }
}

/// Looks up every applicable declaration in order and only returns a tier if
/// all of them resolved.
fn resolve_tier<S, F>(
    tier: Tier,
    declarations: &[FunctionDecl],
    enabled_extensions: &[S],
    lookup: F,
) -> BootstrapResult<ResolvedTier>
where
    S: AsRef<str>,
    F: Fn(*const c_char) -> vk::PFN_vkVoidFunction,
{
    let mut functions = HashMap::with_capacity(declarations.len());
    for declaration in declarations
        .iter()
        .filter(|declaration| declaration.is_enabled(enabled_extensions))
    {
        let name = CString::new(declaration.name)
            .map_err(|_| BootstrapError::unresolved(tier, declaration.name))?;
        let function = lookup(name.as_ptr())
            .ok_or_else(|| BootstrapError::unresolved(tier, declaration.name))?;
        functions.insert(declaration.name, function);
    }
    debug!("Loaded {} {} level functions", functions.len(), tier);
    Ok(ResolvedTier { functions })
}
