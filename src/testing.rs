//! Recording fakes for the window system, the loader and the Vulkan driver.
//!
//! Driver behaviour lives in thread-local state so each test thread gets its
//! own fake; `extern "system"` entry points cannot capture anything.

use std::{
    cell::RefCell,
    ffi::{c_char, CStr},
    mem, ptr, slice,
};

use ash::vk::{self, Handle};

use crate::{
    vulkan::{GraphicsLoader, RawFunction},
    window::{DisplayMode, WindowSystem},
};

pub const FAKE_INSTANCE: u64 = 0x1000;
pub const FAKE_DEVICE: u64 = 0x2000;
pub const FAKE_DEBUG_CALLBACK: u64 = 0x3000;

#[derive(Debug, Default)]
pub struct FakeDriver {
    /// Every successful acquire and every release, in call order.
    pub calls: Vec<String>,
    /// Every symbol name passed to a `vkGet*ProcAddr`.
    pub lookups: Vec<String>,
    pub missing_symbols: Vec<String>,
    pub available_layers: Vec<String>,
    pub layer_enumeration_failure: Option<vk::Result>,
    pub create_instance_failure: Option<vk::Result>,
    pub debug_callback_failure: Option<vk::Result>,
    pub enabled_layers: Vec<String>,
    pub enabled_extensions: Vec<String>,
    pub application_name: Option<String>,
}

thread_local! {
    static DRIVER: RefCell<FakeDriver> = RefCell::new(FakeDriver::default());
}

pub fn with_driver<R>(f: impl FnOnce(&mut FakeDriver) -> R) -> R {
    DRIVER.with(|driver| f(&mut driver.borrow_mut()))
}

pub fn reset_driver() {
    with_driver(|driver| *driver = FakeDriver::default());
}

pub fn record(call: &str) {
    with_driver(|driver| driver.calls.push(call.to_owned()));
}

pub fn calls() -> Vec<String> {
    with_driver(|driver| driver.calls.clone())
}

unsafe fn read_names(names: *const *const c_char, count: u32) -> Vec<String> {
    if names.is_null() || count == 0 {
        return vec![];
    }
    slice::from_raw_parts(names, count as usize)
        .iter()
        .map(|name| CStr::from_ptr(*name).to_string_lossy().into_owned())
        .collect()
}

unsafe extern "system" fn noop() {}

fn lookup(name: &str) -> vk::PFN_vkVoidFunction {
    let missing = with_driver(|driver| {
        driver.lookups.push(name.to_owned());
        driver.missing_symbols.iter().any(|missing| missing == name)
    });
    if missing {
        return None;
    }
    let function: RawFunction = unsafe {
        match name {
            "vkCreateInstance" => mem::transmute::<vk::PFN_vkCreateInstance, RawFunction>(
                fake_create_instance,
            ),
            "vkEnumerateInstanceLayerProperties" => mem::transmute::<
                vk::PFN_vkEnumerateInstanceLayerProperties,
                RawFunction,
            >(fake_enumerate_instance_layer_properties),
            "vkDestroyInstance" => mem::transmute::<vk::PFN_vkDestroyInstance, RawFunction>(
                fake_destroy_instance,
            ),
            "vkGetDeviceProcAddr" => mem::transmute::<vk::PFN_vkGetDeviceProcAddr, RawFunction>(
                fake_get_device_proc_addr,
            ),
            "vkCreateDebugReportCallbackEXT" => mem::transmute::<
                vk::PFN_vkCreateDebugReportCallbackEXT,
                RawFunction,
            >(fake_create_debug_report_callback),
            "vkDestroyDebugReportCallbackEXT" => mem::transmute::<
                vk::PFN_vkDestroyDebugReportCallbackEXT,
                RawFunction,
            >(fake_destroy_debug_report_callback),
            _ => noop,
        }
    };
    Some(function)
}

pub unsafe extern "system" fn fake_get_instance_proc_addr(
    _instance: vk::Instance,
    p_name: *const c_char,
) -> vk::PFN_vkVoidFunction {
    lookup(&CStr::from_ptr(p_name).to_string_lossy())
}

pub unsafe extern "system" fn fake_get_device_proc_addr(
    _device: vk::Device,
    p_name: *const c_char,
) -> vk::PFN_vkVoidFunction {
    lookup(&CStr::from_ptr(p_name).to_string_lossy())
}

unsafe extern "system" fn fake_create_instance(
    p_create_info: *const vk::InstanceCreateInfo,
    _p_allocator: *const vk::AllocationCallbacks,
    p_instance: *mut vk::Instance,
) -> vk::Result {
    let create_info = &*p_create_info;
    let layers = read_names(
        create_info.pp_enabled_layer_names,
        create_info.enabled_layer_count,
    );
    let extensions = read_names(
        create_info.pp_enabled_extension_names,
        create_info.enabled_extension_count,
    );
    let application_name = if create_info.p_application_info.is_null() {
        None
    } else {
        let app_info = &*create_info.p_application_info;
        Some(
            CStr::from_ptr(app_info.p_application_name)
                .to_string_lossy()
                .into_owned(),
        )
    };

    let failure = with_driver(|driver| {
        driver.enabled_layers = layers;
        driver.enabled_extensions = extensions;
        driver.application_name = application_name;
        driver.create_instance_failure
    });
    if let Some(result) = failure {
        return result;
    }
    *p_instance = vk::Instance::from_raw(FAKE_INSTANCE);
    record("vkCreateInstance");
    vk::Result::SUCCESS
}

unsafe extern "system" fn fake_enumerate_instance_layer_properties(
    p_property_count: *mut u32,
    p_properties: *mut vk::LayerProperties,
) -> vk::Result {
    let (failure, layers) = with_driver(|driver| {
        (
            driver.layer_enumeration_failure,
            driver.available_layers.clone(),
        )
    });
    if let Some(result) = failure {
        return result;
    }
    if p_properties.is_null() {
        *p_property_count = layers.len() as u32;
        return vk::Result::SUCCESS;
    }
    let written = (*p_property_count as usize).min(layers.len());
    for (index, layer) in layers.iter().take(written).enumerate() {
        let mut properties = vk::LayerProperties::default();
        for (dst, src) in properties.layer_name.iter_mut().zip(layer.bytes()) {
            *dst = src as c_char;
        }
        ptr::write(p_properties.add(index), properties);
    }
    *p_property_count = written as u32;
    if written < layers.len() {
        vk::Result::INCOMPLETE
    } else {
        vk::Result::SUCCESS
    }
}

unsafe extern "system" fn fake_destroy_instance(
    _instance: vk::Instance,
    _p_allocator: *const vk::AllocationCallbacks,
) {
    record("vkDestroyInstance");
}

unsafe extern "system" fn fake_create_debug_report_callback(
    _instance: vk::Instance,
    _p_create_info: *const vk::DebugReportCallbackCreateInfoEXT,
    _p_allocator: *const vk::AllocationCallbacks,
    p_callback: *mut vk::DebugReportCallbackEXT,
) -> vk::Result {
    if let Some(result) = with_driver(|driver| driver.debug_callback_failure) {
        return result;
    }
    *p_callback = vk::DebugReportCallbackEXT::from_raw(FAKE_DEBUG_CALLBACK);
    record("vkCreateDebugReportCallbackEXT");
    vk::Result::SUCCESS
}

unsafe extern "system" fn fake_destroy_debug_report_callback(
    _instance: vk::Instance,
    _callback: vk::DebugReportCallbackEXT,
    _p_allocator: *const vk::AllocationCallbacks,
) {
    record("vkDestroyDebugReportCallbackEXT");
}

#[derive(Debug, PartialEq, Eq)]
pub struct FakeWindow {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

#[derive(Debug)]
pub struct FakeWindowSystem {
    pub init_failure: Option<String>,
    pub window_failure: Option<String>,
    pub required_extensions: Option<Vec<String>>,
}

impl Default for FakeWindowSystem {
    fn default() -> Self {
        Self {
            init_failure: None,
            window_failure: None,
            required_extensions: Some(vec![
                "VK_KHR_surface".to_owned(),
                "VK_KHR_xcb_surface".to_owned(),
            ]),
        }
    }
}

impl WindowSystem for FakeWindowSystem {
    type Window = FakeWindow;

    fn init(&mut self) -> Result<(), String> {
        if let Some(message) = &self.init_failure {
            return Err(message.clone());
        }
        record("init");
        Ok(())
    }

    fn create_window(&mut self, width: u32, height: u32, title: &str) -> Result<FakeWindow, String> {
        if let Some(message) = &self.window_failure {
            return Err(message.clone());
        }
        record("create_window");
        Ok(FakeWindow {
            width,
            height,
            title: title.to_owned(),
        })
    }

    fn current_display_mode(&mut self) -> Option<DisplayMode> {
        Some(DisplayMode {
            width: 1920,
            height: 1080,
            refresh_rate: 60,
            bits_per_pixel: 24,
        })
    }

    fn drawable_size(&self, window: &FakeWindow) -> (u32, u32) {
        (window.width, window.height)
    }

    fn required_instance_extensions(&self, _window: &FakeWindow) -> Result<Vec<String>, String> {
        self.required_extensions
            .clone()
            .ok_or_else(|| "no Vulkan support".to_owned())
    }

    fn destroy_window(&mut self, _window: FakeWindow) {
        record("destroy_window");
    }

    fn shutdown(&mut self) {
        record("shutdown");
    }
}

#[derive(Debug, Default)]
pub struct FakeLoader {
    pub load_failure: Option<String>,
    pub no_entry_point: bool,
    loaded: bool,
}

impl FakeLoader {
    pub fn failing(message: &str) -> Self {
        Self {
            load_failure: Some(message.to_owned()),
            ..Self::default()
        }
    }

    /// Loads fine but hands out no `vkGetInstanceProcAddr`.
    pub fn without_entry_point() -> Self {
        Self {
            no_entry_point: true,
            ..Self::default()
        }
    }
}

impl GraphicsLoader for FakeLoader {
    fn load_library(&mut self) -> Result<(), String> {
        if let Some(message) = &self.load_failure {
            return Err(message.clone());
        }
        self.loaded = true;
        record("load_library");
        Ok(())
    }

    fn instance_proc_addr(&self) -> Option<vk::PFN_vkGetInstanceProcAddr> {
        if self.loaded && !self.no_entry_point {
            Some(fake_get_instance_proc_addr)
        } else {
            None
        }
    }

    fn unload_library(&mut self) {
        self.loaded = false;
        record("unload_library");
    }
}
