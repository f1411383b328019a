//! C ABI for the Apple GPU classification engine.
//!
//! Exposes [`gpuinfo_core::classify`] to C callers through opaque `u64`
//! handles. The matching header lives at `include/gpuinfo.h`.
//!
//! ## Modules
//!
//! - [`capi`]: the exported `gpuinfo_*` functions
//! - [`handle`]: mutex-guarded handle tables
//! - [`marshal`]: C argument conversion and the objects behind handles
//! - [`error`]: boundary errors

pub mod capi;
pub mod error;
pub mod handle;
pub mod marshal;

pub use error::{FfiError, Result};
pub use handle::{HandleTable, NULL_HANDLE};
