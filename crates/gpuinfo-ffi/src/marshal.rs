//! Conversions between C arguments and Rust values.

use std::ffi::{c_char, CStr, CString};

use gpuinfo_core::{PlatformFacts, SpecificationRecord, VariantHint};

use crate::error::{FfiError, Result};

/// A classified device held behind a handle.
///
/// The C strings live as long as the entry, so pointers handed out by the
/// accessors stay valid until the handle is released.
pub struct DeviceEntry {
    pub record: SpecificationRecord,
    pub c_name: CString,
    pub c_vendor: CString,
}

impl DeviceEntry {
    pub fn new(record: SpecificationRecord) -> Result<Self> {
        let c_name = CString::new(record.name())?;
        let c_vendor = CString::new(record.vendor())?;
        Ok(Self {
            record,
            c_name,
            c_vendor,
        })
    }
}

/// An error description held behind a handle.
pub struct ErrorEntry {
    pub description: CString,
}

impl ErrorEntry {
    /// Build an entry from any message. Interior NUL bytes are dropped.
    pub fn new(message: &str) -> Self {
        let bytes: Vec<u8> = message.bytes().filter(|b| *b != 0).collect();
        let description = CString::new(bytes).unwrap_or_default();
        Self { description }
    }
}

impl From<&FfiError> for ErrorEntry {
    fn from(e: &FfiError) -> Self {
        Self::new(&e.to_string())
    }
}

/// Borrow a NUL-terminated UTF-8 argument.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
pub unsafe fn str_arg<'a>(ptr: *const c_char, argument: &'static str) -> Result<&'a str> {
    if ptr.is_null() {
        return Err(FfiError::NullPointer { argument });
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|_| FfiError::InvalidUtf8 { argument })
}

/// Turn the raw numeric arguments of `gpuinfo_device_classify` into facts.
///
/// A measured core count of zero or below means "not measured".
pub fn platform_facts(
    measured_core_count: i64,
    memory_bytes: i64,
    variant: i32,
) -> Result<PlatformFacts> {
    let memory_bytes = u64::try_from(memory_bytes).map_err(|_| FfiError::InvalidArgument {
        detail: format!("memory size must not be negative, got {memory_bytes}"),
    })?;
    let variant = VariantHint::from_code(variant).ok_or_else(|| FfiError::InvalidArgument {
        detail: format!("unknown variant code {variant}"),
    })?;

    let mut facts = PlatformFacts::new(memory_bytes).with_variant(variant);
    if measured_core_count > 0 {
        let cores = u32::try_from(measured_core_count).map_err(|_| FfiError::InvalidArgument {
            detail: format!("core count {measured_core_count} is out of range"),
        })?;
        facts = facts.with_measured_core_count(cores);
    }
    Ok(facts)
}
