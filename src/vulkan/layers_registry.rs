use std::{ffi::CStr, ptr};

use ash::vk;
use tracing::{debug, error, warn};

use crate::error::{describe_result, BootstrapResult};

use super::FunctionTable;

/// Layers requested when validation is on.
pub const VALIDATION_LAYERS: &[&str] = &["VK_LAYER_KHRONOS_validation"];

/// Names of the layers the loader reports. An enumeration error is logged and
/// reported as no layers at all.
pub fn available_layers(functions: &FunctionTable) -> BootstrapResult<Vec<String>> {
    let enumerate = functions.enumerate_instance_layer_properties()?;
    match read_layer_properties(enumerate) {
        Ok(properties) => Ok(properties
            .iter()
            .map(|properties| {
                unsafe { CStr::from_ptr(properties.layer_name.as_ptr()) }
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()),
        Err(result) => {
            error!("Unable to get validation layers: {}", describe_result(result));
            Ok(vec![])
        }
    }
}

fn read_layer_properties(
    enumerate: vk::PFN_vkEnumerateInstanceLayerProperties,
) -> Result<Vec<vk::LayerProperties>, vk::Result> {
    loop {
        let mut count = 0;
        unsafe { enumerate(&mut count, ptr::null_mut()) }.result()?;
        let mut properties = vec![vk::LayerProperties::default(); count as usize];
        match unsafe { enumerate(&mut count, properties.as_mut_ptr()) } {
            vk::Result::SUCCESS => {
                properties.truncate(count as usize);
                return Ok(properties);
            }
            // the layer set changed between the two calls
            vk::Result::INCOMPLETE => continue,
            err => return Err(err),
        }
    }
}

/// Enables either every requested layer or none of them.
pub fn negotiate(requested: &[&str], available: &[String]) -> Vec<String> {
    let missing = requested
        .iter()
        .filter(|layer| !available.iter().any(|available| available == *layer))
        .copied()
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        warn!(
            "Validation layers not available, continuing without any: {}",
            missing.join(", ")
        );
        return vec![];
    }
    debug!("Validation layers available: {}", requested.join(", "));
    requested.iter().map(|layer| (*layer).to_owned()).collect()
}
