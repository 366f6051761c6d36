mod debug_report;

use ash::vk;

pub use self::debug_report::{debug_report_create_info, install_debug_report, remove_debug_report};

/// Name of the extension appended when validation is on.
pub fn debug_extension_name() -> String {
    vk::ExtDebugReportFn::name().to_string_lossy().into_owned()
}

/// Builds the instance extension list: exactly the window system's extensions,
/// plus the debug report extension in the last slot when `debug` is set.
pub fn instance_extensions(required: Vec<String>, debug: bool) -> Vec<String> {
    let mut extensions = Vec::with_capacity(required.len() + usize::from(debug));
    extensions.extend(required);
    if debug {
        extensions.push(debug_extension_name());
    }
    extensions
}
