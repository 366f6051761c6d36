use std::{ffi::CString, ptr};

use ash::vk::{self, make_api_version, ApplicationInfo, InstanceCreateInfo, API_VERSION_1_3};
use tracing::{debug, error};

use crate::{
    config::ApplicationDescriptor,
    error::{BootstrapError, BootstrapResult},
};

use super::{extensions_registry::debug_report_create_info, FunctionTable};

const API_VERSION: u32 = API_VERSION_1_3;

/// Everything negotiated before `vkCreateInstance` is called.
#[derive(Debug, Clone)]
pub struct InstanceRequest<'a> {
    pub application: &'a ApplicationDescriptor,
    pub extensions: Vec<String>,
    pub layers: Vec<String>,
    /// Chains the debug report callback into instance creation.
    pub debug: bool,
}

fn to_cstrings(names: &[String]) -> BootstrapResult<Vec<CString>> {
    names
        .iter()
        .map(|name| CString::new(name.as_str()).map_err(|_| BootstrapError::InvalidName(name.clone())))
        .collect()
}

/// Creates an Instance through the global tier's `vkCreateInstance`.
pub fn create_instance(
    functions: &FunctionTable,
    request: &InstanceRequest,
) -> BootstrapResult<vk::Instance> {
    let create = functions.create_instance()?;

    let application = request.application;
    let appname = CString::new(application.application_name.as_str())
        .map_err(|_| BootstrapError::InvalidName(application.application_name.clone()))?;
    let engine_name = CString::new(application.engine_name.as_str())
        .map_err(|_| BootstrapError::InvalidName(application.engine_name.clone()))?;
    let (major, minor, patch) = application.version;
    let app_version = make_api_version(0, major, minor, patch);

    let app_info = ApplicationInfo::builder()
        .application_name(&appname)
        .application_version(app_version)
        .api_version(API_VERSION)
        .engine_name(&engine_name)
        .engine_version(app_version);

    debug!("Extensions to enable: {}", request.extensions.join(", "));
    let extensions = to_cstrings(&request.extensions)?;
    let extension_name_ptrs = extensions
        .iter()
        .map(|extension| extension.as_ptr())
        .collect::<Vec<_>>();

    debug!("Layers to enable: {}", request.layers.join(", "));
    let layers = to_cstrings(&request.layers)?;
    let layer_name_ptrs = layers
        .iter()
        .map(|layer| layer.as_ptr())
        .collect::<Vec<_>>();

    let mut debug_create_info = debug_report_create_info();
    let mut create_info = InstanceCreateInfo::builder()
        .application_info(&app_info)
        .enabled_extension_names(&extension_name_ptrs)
        .enabled_layer_names(&layer_name_ptrs);
    if request.debug {
        create_info = create_info.push_next(&mut debug_create_info);
    }

    let mut instance = vk::Instance::null();
    let result = unsafe { create(&*create_info, ptr::null(), &mut instance) };
    if result != vk::Result::SUCCESS {
        return Err(BootstrapError::InstanceCreation { result });
    }
    Ok(instance)
}

/// Destroys `instance`; a missing `vkDestroyInstance` is logged and the handle leaked.
pub fn destroy_instance(functions: &FunctionTable, instance: vk::Instance) {
    match functions.destroy_instance(instance) {
        Ok(destroy) => unsafe { destroy(instance, ptr::null()) },
        Err(err) => error!("Leaking Vulkan instance: {}", err),
    }
}
