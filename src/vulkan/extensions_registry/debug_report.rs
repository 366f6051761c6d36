use std::{
    borrow::Cow,
    ffi::{c_char, c_void, CStr},
    ptr,
};

use ash::vk::{
    self, Bool32, DebugReportCallbackCreateInfoEXT, DebugReportCallbackCreateInfoEXTBuilder,
    DebugReportFlagsEXT, DebugReportObjectTypeEXT,
};
use tracing::{debug, error, info, warn};

use crate::{
    error::{BootstrapError, BootstrapResult},
    vulkan::FunctionTable,
};

pub fn debug_report_create_info<'a>() -> DebugReportCallbackCreateInfoEXTBuilder<'a> {
    DebugReportCallbackCreateInfoEXT::builder()
        .flags(
            DebugReportFlagsEXT::ERROR
                | DebugReportFlagsEXT::WARNING
                | DebugReportFlagsEXT::PERFORMANCE_WARNING,
        )
        .pfn_callback(Some(vulkan_debug_report_callback))
}

/// Registers the logging callback on `instance`.
pub fn install_debug_report(
    functions: &FunctionTable,
    instance: vk::Instance,
) -> BootstrapResult<vk::DebugReportCallbackEXT> {
    let create = functions.create_debug_report_callback()?;
    let create_info = debug_report_create_info();
    let mut callback = vk::DebugReportCallbackEXT::null();
    let result = unsafe { create(instance, &*create_info, ptr::null(), &mut callback) };
    if result != vk::Result::SUCCESS {
        return Err(BootstrapError::DebugCallbackCreation { result });
    }
    Ok(callback)
}

pub fn remove_debug_report(
    functions: &FunctionTable,
    instance: vk::Instance,
    callback: vk::DebugReportCallbackEXT,
) {
    match functions.destroy_debug_report_callback() {
        Ok(destroy) => unsafe { destroy(instance, callback, ptr::null()) },
        Err(err) => error!("Leaking debug report callback: {}", err),
    }
}

unsafe fn lossy<'a>(text: *const c_char) -> Cow<'a, str> {
    if text.is_null() {
        Cow::Borrowed("")
    } else {
        CStr::from_ptr(text).to_string_lossy()
    }
}

unsafe extern "system" fn vulkan_debug_report_callback(
    flags: DebugReportFlagsEXT,
    _object_type: DebugReportObjectTypeEXT,
    _object: u64,
    _location: usize,
    _message_code: i32,
    p_layer_prefix: *const c_char,
    p_message: *const c_char,
    _p_user_data: *mut c_void,
) -> Bool32 {
    let prefix = lossy(p_layer_prefix);
    let message = lossy(p_message);

    if flags.contains(DebugReportFlagsEXT::ERROR) {
        error!("VALIDATION LAYER {}: {}", prefix, message);
    } else if flags.intersects(DebugReportFlagsEXT::WARNING | DebugReportFlagsEXT::PERFORMANCE_WARNING)
    {
        warn!("VALIDATION LAYER {}: {}", prefix, message);
    } else if flags.contains(DebugReportFlagsEXT::INFORMATION) {
        info!("VALIDATION LAYER {}: {}", prefix, message);
    } else {
        debug!("VALIDATION LAYER {}: {}", prefix, message);
    }
    // dont skip driver
    vk::FALSE
}
