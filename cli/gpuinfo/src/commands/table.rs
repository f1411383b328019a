//! `gpuinfo table`: list every tabulated chip with its headline numbers.

use anyhow::{Context, Result};
use gpuinfo_core::rules::KNOWN_CHIPS;
use gpuinfo_core::{classify, parse_device_name, ChipFamily, PlatformFacts};

use crate::units;

/// Build the listing, optionally restricted to one family.
pub fn render(family: Option<ChipFamily>) -> Result<String> {
    let mut out = format!(
        "{:<18} {:>5} {:>11} {:>13} {:>14} {:>8} {:>8}\n",
        "Chip", "Cores", "Clock", "Bandwidth", "FP32", "SLC", "Family"
    );
    for name in KNOWN_CHIPS {
        let identity = parse_device_name(name)?;
        if family.is_some_and(|f| f != identity.family) {
            continue;
        }
        let record = classify(name, &PlatformFacts::default())
            .with_context(|| format!("classifying tabulated chip '{name}'"))?;
        out.push_str(&format!(
            "{:<18} {:>5} {:>11} {:>13} {:>14} {:>8} {:>8}\n",
            record.name(),
            record.core_count(),
            units::frequency(record.clock_frequency_hz()),
            units::bandwidth(record.bandwidth_bytes_per_second()),
            units::flops(record.flops()),
            units::bytes(record.system_level_cache_bytes()),
            units::family(record.family_tier_rank()),
        ));
    }
    Ok(out)
}

/// Print the listing. `family` accepts the spellings [`ChipFamily::parse`] does.
pub fn run(family: Option<&str>) -> Result<()> {
    let family = family
        .map(|f| {
            ChipFamily::parse(f)
                .with_context(|| format!("unknown family: '{f}' (expected mobile or desktop)"))
        })
        .transpose()?;
    print!("{}", render(family)?);
    Ok(())
}
