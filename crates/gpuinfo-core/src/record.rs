//! The derived specification record.

use serde::Serialize;

/// Hardware specification derived for one GPU.
///
/// Constructed once per classification; fields are read through accessors
/// and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SpecificationRecord {
    pub(crate) name: String,
    pub(crate) vendor: String,
    pub(crate) core_count: u32,
    pub(crate) clock_frequency_hz: f64,
    pub(crate) bandwidth_bytes_per_second: f64,
    pub(crate) flops: f64,
    pub(crate) ips: f64,
    pub(crate) system_level_cache_bytes: u64,
    pub(crate) memory_bytes: u64,
    pub(crate) family_tier_rank: u32,
}

impl SpecificationRecord {
    /// The full device name, as reported by the platform.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The GPU manufacturer.
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Number of GPU cores.
    pub fn core_count(&self) -> u32 {
        self.core_count
    }

    /// Shader clock in Hz.
    pub fn clock_frequency_hz(&self) -> f64 {
        self.clock_frequency_hz
    }

    /// Theoretical peak bandwidth to RAM, in bytes/second.
    pub fn bandwidth_bytes_per_second(&self) -> f64 {
        self.bandwidth_bytes_per_second
    }

    /// Theoretical peak FP32 operations per second, counting an FMA as two.
    pub fn flops(&self) -> f64 {
        self.flops
    }

    /// Theoretical peak Int32 add instructions per second.
    ///
    /// See the [Apple GPU ISA](https://github.com/dougallj/applegpu) for cases
    /// where several operations fuse into one instruction.
    pub fn ips(&self) -> f64 {
        self.ips
    }

    /// Size of the system-level cache in bytes.
    ///
    /// Zero on the A9X and A10X; callers that tune for SLC size need a
    /// fallback.
    pub fn system_level_cache_bytes(&self) -> u64 {
        self.system_level_cache_bytes
    }

    /// Size of the device's RAM in bytes.
    pub fn memory_bytes(&self) -> u64 {
        self.memory_bytes
    }

    /// Highest Metal GPU family supported (`1000 + n` for "Apple n").
    pub fn family_tier_rank(&self) -> u32 {
        self.family_tier_rank
    }
}
