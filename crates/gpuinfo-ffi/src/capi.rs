//! Exported C functions.
//!
//! Devices and errors are both returned as `u64` handles. Zero is the null
//! handle: every constructor returns it on failure, and every accessor
//! returns zero (or a null pointer) when handed a handle it does not know.

use std::ffi::c_char;
use std::ptr;

use gpuinfo_core::classify;

use crate::error::Result;
use crate::handle::{HandleTable, NULL_HANDLE};
use crate::marshal::{platform_facts, str_arg, DeviceEntry, ErrorEntry};

static DEVICES: HandleTable<DeviceEntry> = HandleTable::new();
static ERRORS: HandleTable<ErrorEntry> = HandleTable::new();

fn store_error(e: &crate::FfiError, out_error: *mut u64) {
    tracing::debug!(error = %e, "classification failed at the C boundary");
    if out_error.is_null() {
        return;
    }
    let handle = ERRORS.insert(ErrorEntry::from(e));
    // SAFETY: caller guarantees a non-null `out_error` is writable.
    unsafe { out_error.write(handle) };
}

// ── Errors ──────────────────────────────────────────────────────────────────

/// Create an error object carrying `description`.
///
/// Returns the null handle if `description` is null or not UTF-8.
///
/// # Safety
///
/// `description` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn gpuinfo_error_new(description: *const c_char) -> u64 {
    match str_arg(description, "description") {
        Ok(text) => ERRORS.insert(ErrorEntry::new(text)),
        Err(_) => NULL_HANDLE,
    }
}

/// The description of an error, valid until the error is released.
#[no_mangle]
pub extern "C" fn gpuinfo_error_description(error: u64) -> *const c_char {
    ERRORS
        .with(error, |entry| entry.description.as_ptr())
        .unwrap_or(ptr::null())
}

/// Release an error object. Unknown handles are ignored.
#[no_mangle]
pub extern "C" fn gpuinfo_error_release(error: u64) {
    ERRORS.remove(error);
}

// ── Devices ─────────────────────────────────────────────────────────────────

fn classify_device(
    name: *const c_char,
    measured_core_count: i64,
    memory_bytes: i64,
    variant: i32,
) -> Result<u64> {
    // SAFETY: forwarded from the caller of `gpuinfo_device_classify`.
    let name = unsafe { str_arg(name, "name") }?;
    let facts = platform_facts(measured_core_count, memory_bytes, variant)?;
    let record = classify(name, &facts)?;
    Ok(DEVICES.insert(DeviceEntry::new(record)?))
}

/// Classify a device name and return a device handle.
///
/// `measured_core_count` of zero or below means the OS did not report one.
/// `variant` is 0 (unspecified), 1 (binned die) or 2 (full die). On failure
/// the null handle is returned and, when `out_error` is non-null, an error
/// handle is written through it. On success `*out_error` is set to zero.
///
/// # Safety
///
/// `name` must be null or a valid NUL-terminated string. `out_error` must be
/// null or valid for a single `u64` write.
#[no_mangle]
pub unsafe extern "C" fn gpuinfo_device_classify(
    name: *const c_char,
    measured_core_count: i64,
    memory_bytes: i64,
    variant: i32,
    out_error: *mut u64,
) -> u64 {
    match classify_device(name, measured_core_count, memory_bytes, variant) {
        Ok(handle) => {
            if !out_error.is_null() {
                out_error.write(NULL_HANDLE);
            }
            handle
        }
        Err(e) => {
            store_error(&e, out_error);
            NULL_HANDLE
        }
    }
}

/// Release a device. Unknown handles are ignored.
#[no_mangle]
pub extern "C" fn gpuinfo_device_release(device: u64) {
    DEVICES.remove(device);
}

#[no_mangle]
pub extern "C" fn gpuinfo_device_name(device: u64) -> *const c_char {
    DEVICES
        .with(device, |entry| entry.c_name.as_ptr())
        .unwrap_or(ptr::null())
}

#[no_mangle]
pub extern "C" fn gpuinfo_device_vendor(device: u64) -> *const c_char {
    DEVICES
        .with(device, |entry| entry.c_vendor.as_ptr())
        .unwrap_or(ptr::null())
}

#[no_mangle]
pub extern "C" fn gpuinfo_device_core_count(device: u64) -> u32 {
    DEVICES.with(device, |e| e.record.core_count()).unwrap_or(0)
}

/// Clock speed in Hz.
#[no_mangle]
pub extern "C" fn gpuinfo_device_clock_frequency(device: u64) -> f64 {
    DEVICES
        .with(device, |e| e.record.clock_frequency_hz())
        .unwrap_or(0.0)
}

/// Memory bandwidth in bytes per second.
#[no_mangle]
pub extern "C" fn gpuinfo_device_bandwidth(device: u64) -> f64 {
    DEVICES
        .with(device, |e| e.record.bandwidth_bytes_per_second())
        .unwrap_or(0.0)
}

#[no_mangle]
pub extern "C" fn gpuinfo_device_flops(device: u64) -> f64 {
    DEVICES.with(device, |e| e.record.flops()).unwrap_or(0.0)
}

#[no_mangle]
pub extern "C" fn gpuinfo_device_ips(device: u64) -> f64 {
    DEVICES.with(device, |e| e.record.ips()).unwrap_or(0.0)
}

/// System-level cache in bytes.
#[no_mangle]
pub extern "C" fn gpuinfo_device_system_level_cache(device: u64) -> u64 {
    DEVICES
        .with(device, |e| e.record.system_level_cache_bytes())
        .unwrap_or(0)
}

/// Total memory in bytes, as supplied at classification.
#[no_mangle]
pub extern "C" fn gpuinfo_device_memory(device: u64) -> u64 {
    DEVICES.with(device, |e| e.record.memory_bytes()).unwrap_or(0)
}

/// Metal GPU family raw value (1001 = Apple 1).
#[no_mangle]
pub extern "C" fn gpuinfo_device_family(device: u64) -> u32 {
    DEVICES
        .with(device, |e| e.record.family_tier_rank())
        .unwrap_or(0)
}
