//! Specification derivation.
//!
//! Combines a parsed identity, its resolved rule, and the facts the
//! platform layer measured into a [`SpecificationRecord`].

use serde::{Deserialize, Serialize};

use crate::identity::ChipIdentity;
use crate::record::SpecificationRecord;
use crate::table::ClassificationRule;

/// Every chip this engine classifies is Apple-designed.
pub const VENDOR: &str = "Apple";

/// Caller disambiguation between same-name chips with different core bins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariantHint {
    /// Nothing known; rules fall back to the full die.
    #[default]
    Unspecified,
    /// The reduced-core bin (e.g. iPhone 13's A15).
    BinnedDie,
    /// The fully enabled die (e.g. iPhone 13 Pro's A15).
    FullDie,
}

impl VariantHint {
    /// Parse a hint from a user-facing string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "unspecified" | "auto" => Some(Self::Unspecified),
            "binned-die" | "binned" => Some(Self::BinnedDie),
            "full-die" | "full" => Some(Self::FullDie),
            _ => None,
        }
    }

    /// Stable integer code used across the C boundary.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Unspecified),
            1 => Some(Self::BinnedDie),
            2 => Some(Self::FullDie),
            _ => None,
        }
    }
}

impl std::fmt::Display for VariantHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unspecified => write!(f, "unspecified"),
            Self::BinnedDie => write!(f, "binned-die"),
            Self::FullDie => write!(f, "full-die"),
        }
    }
}

/// Facts supplied by the platform layer alongside the device name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlatformFacts {
    /// Core count read directly from the OS, when available. Zero is
    /// treated as absent.
    pub measured_core_count: Option<u32>,
    /// Total system memory in bytes.
    pub memory_bytes: u64,
    pub variant: VariantHint,
}

impl PlatformFacts {
    pub fn new(memory_bytes: u64) -> Self {
        Self {
            memory_bytes,
            ..Self::default()
        }
    }

    pub fn with_measured_core_count(mut self, cores: u32) -> Self {
        self.measured_core_count = Some(cores);
        self
    }

    pub fn with_variant(mut self, variant: VariantHint) -> Self {
        self.variant = variant;
        self
    }
}

/// Derive the final specification. Pure and deterministic.
pub fn derive(
    identity: &ChipIdentity,
    rule: &ClassificationRule,
    facts: &PlatformFacts,
) -> SpecificationRecord {
    let core_count = match facts.measured_core_count.filter(|cores| *cores > 0) {
        Some(cores) => cores,
        None => rule.core_count.resolve(facts.variant),
    };
    let clock = rule.clock_frequency_hz;

    // Two floating-point operations per FMA.
    let fp32_per_clock = u64::from(core_count) * u64::from(rule.alus_per_core_fp32) * 2;
    let int32_per_clock = u64::from(core_count) * u64::from(rule.alus_per_core_int32);

    SpecificationRecord {
        name: identity.name.clone(),
        vendor: VENDOR.into(),
        core_count,
        clock_frequency_hz: clock,
        bandwidth_bytes_per_second: rule.memory_interface.bandwidth(),
        flops: fp32_per_clock as f64 * clock,
        ips: int32_per_clock as f64 * clock,
        system_level_cache_bytes: rule.system_level_cache_bytes,
        memory_bytes: facts.memory_bytes,
        family_tier_rank: rule.family_rank,
    }
}
