//! Consistency checks for derived records and the rule table.

use crate::error::Axis;
use crate::record::SpecificationRecord;
use crate::rules;
use crate::table::{CoreCountRule, Row};

/// Upper bound on a plausible GPU clock.
const MAX_CLOCK_HZ: f64 = 10e9;

/// A validation issue found in a record or in the table.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity: "error" or "warning".
    pub severity: &'static str,
    /// Human-readable description.
    pub message: String,
}

impl ValidationIssue {
    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: "error",
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: "warning",
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// Validate a derived record for physical plausibility.
///
/// Returns `Ok(())` if valid, or `Err(issues)` with a list of problems.
pub fn validate_record(record: &SpecificationRecord) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    if record.core_count() == 0 {
        issues.push(ValidationIssue::error("core count is zero"));
    }

    let clock = record.clock_frequency_hz();
    if !(clock > 0.0 && clock <= MAX_CLOCK_HZ) {
        issues.push(ValidationIssue::error(format!(
            "clock frequency {clock} Hz is outside (0, 10 GHz]"
        )));
    }

    for (label, value) in [
        ("bandwidth", record.bandwidth_bytes_per_second()),
        ("flops", record.flops()),
        ("ips", record.ips()),
    ] {
        if !(value.is_finite() && value > 0.0) {
            issues.push(ValidationIssue::error(format!("{label} {value} is not positive")));
        }
    }

    if record.memory_bytes() == 0 {
        issues.push(ValidationIssue::warning("memory size is zero (not measured?)"));
    }

    if record.family_tier_rank() < rules::MIN_FAMILY {
        issues.push(ValidationIssue::error(format!(
            "GPU family rank {} is below Apple 1 ({})",
            record.family_tier_rank(),
            rules::MIN_FAMILY
        )));
    }

    // flops = cores × ALUs × 2 × clock, with a power-of-two ALU count.
    if record.core_count() > 0 && clock > 0.0 {
        let alus = record.flops() / (f64::from(record.core_count()) * 2.0 * clock);
        let rounded = alus.round();
        let consistent = (alus - rounded).abs() < 1e-6
            && rounded >= 1.0
            && (rounded as u64).is_power_of_two();
        if !consistent {
            issues.push(ValidationIssue::error(format!(
                "flops imply {alus} FP32 ALUs per core, expected a power of two"
            )));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Validate the built-in rule table.
///
/// Checks that rows are well-formed and disjoint per axis, that constants
/// are positive where they must be, that the family ladder is contiguous,
/// and that every known chip resolves without carry-forward.
pub fn validate_table() -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    check_rows(Axis::CoreCount, rules::CORE_COUNT, &mut issues, |rule| match rule {
        CoreCountRule::Fixed(cores) => *cores > 0,
        CoreCountRule::ByVariant { binned, full } => *binned > 0 && *full >= *binned,
    });
    check_rows(Axis::ClockFrequency, rules::CLOCK_FREQUENCY, &mut issues, |hz| {
        *hz > 0.0 && *hz <= MAX_CLOCK_HZ
    });
    check_rows(Axis::Bandwidth, rules::MEMORY_INTERFACE, &mut issues, |mi| {
        mi.bandwidth() > 0.0 && mi.bus_width_bits % 8 == 0
    });
    // Zero is a legitimate cache size.
    check_rows(Axis::SystemLevelCache, rules::SYSTEM_LEVEL_CACHE, &mut issues, |_| true);
    check_rows(Axis::FloatAlus, rules::FP32_ALUS, &mut issues, |alus| {
        alus.is_power_of_two()
    });
    check_rows(Axis::IntegerAlus, rules::INT32_ALUS, &mut issues, |alus| {
        alus.is_power_of_two()
    });

    let ranks: Vec<u32> = rules::FAMILY_LADDER.iter().map(|rung| rung.rank).collect();
    let expected: Vec<u32> = (rules::MIN_FAMILY..=rules::PROVISIONAL_MAX_FAMILY).collect();
    if ranks != expected {
        issues.push(ValidationIssue::error(format!(
            "family ladder ranks {ranks:?} are not contiguous from {} to {}",
            rules::MIN_FAMILY,
            rules::PROVISIONAL_MAX_FAMILY
        )));
    }
    for pair in rules::FAMILY_LADDER.windows(2) {
        if pair[1].mobile_since < pair[0].mobile_since
            || pair[1].desktop_since < pair[0].desktop_since
        {
            issues.push(ValidationIssue::error(format!(
                "family rung {} requires an older chip than rung {}",
                pair[1].rank, pair[0].rank
            )));
        }
    }

    for name in rules::KNOWN_CHIPS {
        match crate::parse::parse_device_name(name).and_then(|id| crate::table::lookup(&id)) {
            Ok(rule) if !rule.carried_forward.is_empty() => {
                issues.push(ValidationIssue::warning(format!(
                    "known chip '{name}' relies on carry-forward for {:?}",
                    rule.carried_forward
                )));
            }
            Ok(_) => {}
            Err(e) => issues.push(ValidationIssue::error(format!("known chip '{name}': {e}"))),
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

fn check_rows<T>(
    axis: Axis,
    rows: &[Row<T>],
    issues: &mut Vec<ValidationIssue>,
    value_ok: impl Fn(&T) -> bool,
) {
    for (i, row) in rows.iter().enumerate() {
        if row.generations.first == 0 || row.generations.first > row.generations.last {
            issues.push(ValidationIssue::error(format!(
                "{axis} row {i} has an empty generation range {}..={}",
                row.generations.first, row.generations.last
            )));
        }
        if !value_ok(&row.value) {
            issues.push(ValidationIssue::error(format!(
                "{axis} row {i} has an invalid value"
            )));
        }
    }

    for i in 0..rows.len() {
        for j in (i + 1)..rows.len() {
            let a = &rows[i];
            let b = &rows[j];
            if a.family == b.family
                && a.generations.overlaps(&b.generations)
                && a.tiers.intersects(&b.tiers)
            {
                issues.push(ValidationIssue::error(format!(
                    "{axis} rows {i} and {j} overlap for {} generations {}..={}",
                    a.family,
                    a.generations.first.max(b.generations.first),
                    a.generations.last.min(b.generations.last),
                )));
            }
        }
    }
}
