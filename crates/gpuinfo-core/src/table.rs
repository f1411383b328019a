//! Classification table lookup.
//!
//! Each axis (clock, bandwidth, cache, ...) is an ordered slice of [`Row`]s
//! keyed by `(family, generation range, tiers)`. Lookup is uniform across
//! axes:
//!
//! 1. Exact match on family, tier and generation.
//! 2. Otherwise, if the generation is newer than every row for that family
//!    and tier, carry the newest row forward.
//! 3. Otherwise fail. A tier with no rows at all is `UnrecognizedTier`;
//!    an older or in-between generation is `UnrecognizedRule`.

use tracing::{debug, warn};

use crate::derive::VariantHint;
use crate::error::{Axis, ClassificationError, Result};
use crate::identity::{ChipFamily, ChipIdentity, Modifier, Tier};
use crate::rules;

/// Inclusive range of generations a row covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generations {
    pub first: u32,
    pub last: u32,
}

impl Generations {
    pub fn contains(&self, generation: u32) -> bool {
        (self.first..=self.last).contains(&generation)
    }

    pub fn overlaps(&self, other: &Generations) -> bool {
        self.first <= other.last && other.first <= self.last
    }
}

/// The identities a row applies to within its family.
///
/// Desktop rows select on tier. Mobile die variants are told apart by the
/// suffix letters alone, so mobile rows select on modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tiers {
    /// Every tier of the family.
    Any,
    Only(&'static [Tier]),
    /// Names carrying at least one of these modifiers.
    With(&'static [Modifier]),
    /// Names carrying none of these modifiers.
    Without(&'static [Modifier]),
}

impl Tiers {
    pub fn matches(&self, identity: &ChipIdentity) -> bool {
        match self {
            Self::Any => true,
            Self::Only(tiers) => tiers.contains(&identity.tier),
            Self::With(modifiers) => identity.has_any_modifier(modifiers),
            Self::Without(modifiers) => !identity.has_any_modifier(modifiers),
        }
    }

    /// Whether some identity could match both selectors. Mixed tier and
    /// modifier selectors are assumed to overlap.
    pub fn intersects(&self, other: &Tiers) -> bool {
        match (self, other) {
            (Self::Any, _) | (_, Self::Any) => true,
            (Self::Only(a), Self::Only(b)) => a.iter().any(|t| b.contains(t)),
            (Self::With(with), Self::Without(without))
            | (Self::Without(without), Self::With(with)) => {
                !with.iter().all(|m| without.contains(m))
            }
            _ => true,
        }
    }
}

/// One row of an axis table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row<T> {
    pub family: ChipFamily,
    pub generations: Generations,
    pub tiers: Tiers,
    pub value: T,
}

impl<T> Row<T> {
    pub const fn new(family: ChipFamily, first: u32, last: u32, tiers: Tiers, value: T) -> Self {
        Self {
            family,
            generations: Generations { first, last },
            tiers,
            value,
        }
    }
}

/// How the core count is chosen when the platform does not report one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreCountRule {
    Fixed(u32),
    /// Same name ships as a binned and a full die; the caller says which.
    /// An unspecified hint resolves to the full die.
    ByVariant { binned: u32, full: u32 },
}

impl CoreCountRule {
    /// Resolve the rule for a caller hint.
    pub fn resolve(&self, variant: VariantHint) -> u32 {
        match *self {
            Self::Fixed(cores) => cores,
            Self::ByVariant { binned, full } => match variant {
                VariantHint::BinnedDie => binned,
                VariantHint::FullDie | VariantHint::Unspecified => full,
            },
        }
    }
}

/// LPDDR memory interface of a chip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryInterface {
    /// Half the per-pin transfer rate (transfers are double-pumped).
    pub pin_data_rate_hz: f64,
    /// Number of data pins in the interface.
    pub bus_width_bits: u32,
}

impl MemoryInterface {
    pub const fn new(pin_data_rate_hz: f64, bus_width_bits: u32) -> Self {
        Self {
            pin_data_rate_hz,
            bus_width_bits,
        }
    }

    /// Peak bandwidth in bytes/second: `2 × rate × (bits / 8)`.
    pub fn bandwidth(&self) -> f64 {
        2.0 * self.pin_data_rate_hz * f64::from(self.bus_width_bits / 8)
    }
}

/// One rung of the Metal capability ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyRung {
    /// Metal family raw value (`1000 + n` for "Apple n").
    pub rank: u32,
    /// First A-series generation supporting this rung.
    pub mobile_since: u32,
    /// First M-series generation supporting this rung.
    pub desktop_since: Option<u32>,
}

impl FamilyRung {
    pub fn supported_by(&self, identity: &ChipIdentity) -> bool {
        let since = match identity.family {
            ChipFamily::MobileSoc => Some(self.mobile_since),
            ChipFamily::DesktopSoc => self.desktop_since,
        };
        since.is_some_and(|since| identity.generation >= since)
    }
}

/// Raw constants resolved for one chip identity.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRule {
    pub core_count: CoreCountRule,
    pub clock_frequency_hz: f64,
    pub memory_interface: MemoryInterface,
    pub alus_per_core_fp32: u32,
    pub alus_per_core_int32: u32,
    pub system_level_cache_bytes: u64,
    /// Highest Metal family rank the chip satisfies.
    pub family_rank: u32,
    /// Axes resolved by carrying a newer-generation row forward.
    pub carried_forward: Vec<Axis>,
}

/// Resolve every axis for `identity`.
///
/// Each axis is looked up independently; the first failing axis is returned.
/// Clock, bandwidth and cache go first so a bad name is reported against
/// them rather than against the core count, which callers may measure.
pub fn lookup(identity: &ChipIdentity) -> Result<ClassificationRule> {
    let mut carried_forward = Vec::new();
    let carried = &mut carried_forward;

    let clock_frequency_hz =
        resolve_tracked(rules::CLOCK_FREQUENCY, identity, Axis::ClockFrequency, carried)?;
    let memory_interface =
        resolve_tracked(rules::MEMORY_INTERFACE, identity, Axis::Bandwidth, carried)?;
    let system_level_cache_bytes = resolve_tracked(
        rules::SYSTEM_LEVEL_CACHE,
        identity,
        Axis::SystemLevelCache,
        carried,
    )?;
    let core_count = resolve_tracked(rules::CORE_COUNT, identity, Axis::CoreCount, carried)?;
    let alus_per_core_fp32 = resolve_tracked(rules::FP32_ALUS, identity, Axis::FloatAlus, carried)?;
    let alus_per_core_int32 =
        resolve_tracked(rules::INT32_ALUS, identity, Axis::IntegerAlus, carried)?;
    let family_rank = probe_family(identity)?;

    let rule = ClassificationRule {
        core_count,
        clock_frequency_hz,
        memory_interface,
        alus_per_core_fp32,
        alus_per_core_int32,
        system_level_cache_bytes,
        family_rank,
        carried_forward,
    };
    debug!(name = %identity.name, ?rule, "resolved classification rule");
    Ok(rule)
}

fn resolve_tracked<T: Copy>(
    rows: &[Row<T>],
    identity: &ChipIdentity,
    axis: Axis,
    carried_forward: &mut Vec<Axis>,
) -> Result<T> {
    let (value, carried) = resolve(rows, identity, axis)?;
    if carried {
        carried_forward.push(axis);
    }
    Ok(value)
}

/// Resolve a single axis. The flag is `true` when the value was carried
/// forward from an older generation.
pub fn resolve<T: Copy>(rows: &[Row<T>], identity: &ChipIdentity, axis: Axis) -> Result<(T, bool)> {
    let candidates: Vec<&Row<T>> = rows
        .iter()
        .filter(|row| row.family == identity.family && row.tiers.matches(identity))
        .collect();

    if let Some(row) = candidates
        .iter()
        .find(|row| row.generations.contains(identity.generation))
    {
        return Ok((row.value, false));
    }

    let Some(newest) = candidates.iter().max_by_key(|row| row.generations.last) else {
        return Err(ClassificationError::UnrecognizedTier {
            name: identity.name.clone(),
            axis,
        });
    };

    if identity.generation > newest.generations.last {
        warn!(
            name = %identity.name,
            %axis,
            from_generation = newest.generations.last,
            "no rule for generation {}, assuming it resembles the newest known chip",
            identity.generation
        );
        return Ok((newest.value, true));
    }

    Err(ClassificationError::UnrecognizedRule {
        name: identity.name.clone(),
        axis,
    })
}

/// Walk the capability ladder top-down and return the first rung the
/// identity supports.
pub fn probe_family(identity: &ChipIdentity) -> Result<u32> {
    let mut rank = rules::PROVISIONAL_MAX_FAMILY;
    while rank >= rules::MIN_FAMILY {
        let supported = rules::FAMILY_LADDER
            .iter()
            .find(|rung| rung.rank == rank)
            .is_some_and(|rung| rung.supported_by(identity));
        if supported {
            return Ok(rank);
        }
        rank -= 1;
    }
    Err(ClassificationError::UnrecognizedRule {
        name: identity.name.clone(),
        axis: Axis::Family,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_device_name;

    const MB: u64 = 1024 * 1024;

    fn rule(name: &str) -> ClassificationRule {
        lookup(&parse_device_name(name).unwrap()).unwrap()
    }

    #[test]
    fn exact_match_mobile() {
        let r = rule("Apple A14");
        assert_eq!(r.core_count, CoreCountRule::Fixed(4));
        assert_eq!(r.clock_frequency_hz, 1.278e9);
        assert_eq!(r.memory_interface, MemoryInterface::new(2.133e9, 64));
        assert_eq!(r.alus_per_core_fp32, 64);
        assert_eq!(r.alus_per_core_int32, 128);
        assert_eq!(r.system_level_cache_bytes, 16 * MB);
        assert_eq!(r.family_rank, 1007);
        assert!(r.carried_forward.is_empty());
    }

    #[test]
    fn tablet_die_differs_from_phone_die() {
        let phone = rule("Apple A10");
        let tablet = rule("Apple A10X");
        assert_eq!(phone.clock_frequency_hz, 0.900e9);
        assert_eq!(tablet.clock_frequency_hz, 1.000e9);
        assert_eq!(phone.memory_interface.bus_width_bits, 64);
        assert_eq!(tablet.memory_interface.bus_width_bits, 128);
        assert_eq!(phone.system_level_cache_bytes, 4 * MB);
        assert_eq!(tablet.system_level_cache_bytes, 0);
    }

    #[test]
    fn plain_suffix_keeps_phone_die() {
        let suffixed = rule("Apple A10 GPU");
        let phone = rule("Apple A10");
        assert_eq!(suffixed.clock_frequency_hz, 0.900e9);
        assert_eq!(suffixed.system_level_cache_bytes, 4 * MB);
        assert_eq!(suffixed.memory_interface, phone.memory_interface);
        assert_eq!(suffixed.core_count, CoreCountRule::Fixed(6));

        assert_eq!(rule("Apple A14 GPU").memory_interface.bus_width_bits, 64);
        assert_eq!(rule("Apple A15 Bionic").memory_interface.bus_width_bits, 64);
        assert_eq!(rule("Apple A12Z").memory_interface.bus_width_bits, 128);
    }

    #[test]
    fn desktop_tiers_scale_memory_bus() {
        assert_eq!(rule("Apple M1 Pro").memory_interface.bus_width_bits, 256);
        assert_eq!(rule("Apple M1 Max").memory_interface.bus_width_bits, 512);
        assert_eq!(rule("Apple M1 Ultra").memory_interface.bus_width_bits, 1024);
        assert_eq!(rule("Apple M2").memory_interface, MemoryInterface::new(3.2e9, 128));
    }

    #[test]
    fn unknown_desktop_tier_fails() {
        let id = parse_device_name("Apple M2 Extreme").unwrap();
        let err = lookup(&id).unwrap_err();
        assert!(matches!(err, ClassificationError::UnrecognizedTier { .. }));
        assert_eq!(err.name(), "Apple M2 Extreme");
    }

    #[test]
    fn unknown_tier_fails_on_clock_axis() {
        let id = parse_device_name("Apple M1 Extreme").unwrap();
        let err = resolve(rules::CLOCK_FREQUENCY, &id, Axis::ClockFrequency).unwrap_err();
        assert_eq!(err.axis(), Some(Axis::ClockFrequency));
        assert!(matches!(err, ClassificationError::UnrecognizedTier { .. }));
    }

    #[test]
    fn older_generation_fails() {
        let id = parse_device_name("Apple A6").unwrap();
        let err = lookup(&id).unwrap_err();
        assert!(matches!(err, ClassificationError::UnrecognizedRule { .. }));
        assert!(err.axis().is_some());
    }

    #[test]
    fn newer_generation_carries_forward() {
        let newest = rule("Apple M2 Max");
        let future = rule("Apple M3 Max");
        assert_eq!(future.clock_frequency_hz, newest.clock_frequency_hz);
        assert_eq!(future.memory_interface, newest.memory_interface);
        assert_eq!(future.system_level_cache_bytes, newest.system_level_cache_bytes);
        assert!(future.carried_forward.contains(&Axis::ClockFrequency));
        assert!(future.carried_forward.contains(&Axis::Bandwidth));
        assert!(newest.carried_forward.is_empty());
    }

    #[test]
    fn modifier_selects_core_count() {
        assert_eq!(rule("Apple A12X").core_count, CoreCountRule::Fixed(8));
        assert_eq!(rule("Apple A12Z").core_count, CoreCountRule::Fixed(8));
        assert_eq!(rule("Apple A12").core_count, CoreCountRule::Fixed(4));
        assert_eq!(rule("Apple A12 GPU").core_count, CoreCountRule::Fixed(4));
    }

    #[test]
    fn variant_selects_core_count() {
        let r = rule("Apple A15");
        assert_eq!(r.core_count.resolve(VariantHint::BinnedDie), 4);
        assert_eq!(r.core_count.resolve(VariantHint::FullDie), 5);
        assert_eq!(r.core_count.resolve(VariantHint::Unspecified), 5);
    }

    #[test]
    fn unknown_tier_reports_clock_axis_first() {
        let err = lookup(&parse_device_name("Apple M2 Hyper").unwrap()).unwrap_err();
        assert_eq!(err.axis(), Some(Axis::ClockFrequency));
    }

    #[test]
    fn family_ladder_probe() {
        let probe = |name: &str| probe_family(&parse_device_name(name).unwrap()).unwrap();
        assert_eq!(probe("Apple A7"), 1001);
        assert_eq!(probe("Apple A10X"), 1003);
        assert_eq!(probe("Apple A12Z"), 1005);
        assert_eq!(probe("Apple M1 Ultra"), 1007);
        assert_eq!(probe("Apple A16"), 1008);
        assert_eq!(probe("Apple M2"), 1008);
        assert_eq!(probe("Apple A17 Pro"), 1009);
        assert_eq!(probe("Apple M9"), 1009);
    }

    #[test]
    fn family_probe_below_ladder_fails() {
        let err = probe_family(&parse_device_name("Apple A4").unwrap()).unwrap_err();
        assert_eq!(err.axis(), Some(Axis::Family));
    }

    #[test]
    fn bandwidth_formula() {
        assert_eq!(MemoryInterface::new(4.266e9, 128).bandwidth(), 1.36512e11);
        assert_eq!(MemoryInterface::new(3.2e9, 1024).bandwidth(), 2.0 * 3.2e9 * 128.0);
    }

    #[test]
    fn tiers_intersection() {
        assert!(Tiers::Any.intersects(&Tiers::Only(&[Tier::Phone])));
        assert!(!Tiers::Only(&[Tier::Phone]).intersects(&Tiers::Only(&[Tier::Base])));
        assert!(Tiers::Only(&[Tier::Pro, Tier::Max]).intersects(&Tiers::Only(&[Tier::Max])));

        const XZ: &[Modifier] = &[Modifier::Extended, Modifier::FullyEnabled];
        assert!(!Tiers::With(XZ).intersects(&Tiers::Without(XZ)));
        assert!(!Tiers::Without(XZ).intersects(&Tiers::With(&[Modifier::Extended])));
        assert!(Tiers::With(XZ).intersects(&Tiers::Without(&[Modifier::Extended])));
        assert!(Tiers::With(XZ).intersects(&Tiers::With(&[Modifier::FullyEnabled])));
    }

    #[test]
    fn modifier_selectors_match_suffix_letters() {
        let xz = Tiers::With(&[Modifier::Extended, Modifier::FullyEnabled]);
        let id = |name: &str| parse_device_name(name).unwrap();
        assert!(xz.matches(&id("Apple A12Z")));
        assert!(xz.matches(&id("Apple A9X")));
        assert!(!xz.matches(&id("Apple A14 GPU")));
        assert!(!xz.matches(&id("Apple A14")));
    }
}
