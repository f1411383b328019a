//! Apple GPU classification and specification derivation.
//!
//! Maps a Metal device name such as `"Apple M2 Max"` to a
//! [`SpecificationRecord`]: core count, clock, bandwidth, FLOPS, IPS,
//! system-level cache and Metal family. The pipeline is:
//!
//! - **[`parse`]:** device name → [`ChipIdentity`]
//! - **[`table`]:** identity → [`ClassificationRule`] (per-axis lookups over [`rules`])
//! - **[`derive`]:** identity + rule + [`PlatformFacts`] → record
//!
//! Every step is pure. Device enumeration, OS property queries and memory
//! size detection belong to the caller.

pub mod derive;
pub mod error;
pub mod identity;
pub mod parse;
pub mod record;
pub mod rules;
pub mod table;
pub mod validate;

pub use derive::{PlatformFacts, VariantHint, VENDOR};
pub use error::{Axis, ClassificationError, Result};
pub use identity::{ChipFamily, ChipIdentity, Modifier, Tier};
pub use parse::parse_device_name;
pub use record::SpecificationRecord;
pub use table::{ClassificationRule, CoreCountRule, MemoryInterface};
pub use validate::{validate_record, validate_table, ValidationIssue};

/// Classify a device name and derive its specification.
pub fn classify(name: &str, facts: &PlatformFacts) -> Result<SpecificationRecord> {
    let identity = parse::parse_device_name(name)?;
    tracing::debug!(%name, %identity, "parsed device name");
    let rule = table::lookup(&identity)?;
    Ok(derive::derive(&identity, &rule, facts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_end_to_end() {
        let record = classify("Apple M2 Pro", &PlatformFacts::new(16 << 30)).unwrap();
        assert_eq!(record.name(), "Apple M2 Pro");
        assert_eq!(record.core_count(), 19);
        assert_eq!(record.clock_frequency_hz(), 1.398e9);
        assert_eq!(record.bandwidth_bytes_per_second(), 2.0 * 3.2e9 * 32.0);
        assert_eq!(record.system_level_cache_bytes(), 24 * 1024 * 1024);
        assert_eq!(record.family_tier_rank(), 1008);
    }

    #[test]
    fn classify_propagates_parse_errors() {
        let err = classify("NVIDIA GeForce RTX 4090", &PlatformFacts::default()).unwrap_err();
        assert!(matches!(err, ClassificationError::UnrecognizedFamily { .. }));
    }

    #[test]
    fn record_serializes_to_json() {
        let record = classify("Apple A16", &PlatformFacts::new(6 << 30)).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["name"], "Apple A16");
        assert_eq!(json["core-count"], 5);
        assert_eq!(json["family-tier-rank"], 1008);
    }
}
