//! Property-based tests for parsing, lookup and derivation.

use gpuinfo_core::rules::KNOWN_CHIPS;
use gpuinfo_core::table::lookup;
use gpuinfo_core::{classify, parse_device_name, ChipFamily, PlatformFacts, Tier, VariantHint};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────────

fn arb_known_chip() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(KNOWN_CHIPS)
}

fn arb_desktop_suffix() -> impl Strategy<Value = (&'static str, Tier)> {
    prop_oneof![
        Just(("", Tier::Base)),
        Just((" Pro", Tier::Pro)),
        Just((" Max", Tier::Max)),
        Just((" Ultra", Tier::Ultra)),
    ]
}

fn arb_variant() -> impl Strategy<Value = VariantHint> {
    prop_oneof![
        Just(VariantHint::Unspecified),
        Just(VariantHint::BinnedDie),
        Just(VariantHint::FullDie),
    ]
}

fn arb_facts() -> impl Strategy<Value = PlatformFacts> {
    (proptest::option::of(0u32..512), 0u64..(1 << 40), arb_variant()).prop_map(
        |(cores, memory_bytes, variant)| PlatformFacts {
            measured_core_count: cores,
            memory_bytes,
            variant,
        },
    )
}

// ── Property tests ───────────────────────────────────────────────────────────

proptest! {
    /// `Apple A<digits>` always parses as a phone chip of that generation.
    #[test]
    fn mobile_digits_are_phone_tier(generation in 1u32..1_000_000) {
        let id = parse_device_name(&format!("Apple A{generation}")).unwrap();
        prop_assert_eq!(id.family, ChipFamily::MobileSoc);
        prop_assert_eq!(id.generation, generation);
        prop_assert_eq!(id.tier, Tier::Phone);
        prop_assert!(id.modifiers.is_empty());
    }

    /// Desktop keywords map to tiers; bare digits are the base tier.
    #[test]
    fn desktop_keywords_select_tier(
        generation in 1u32..1_000_000,
        (suffix, tier) in arb_desktop_suffix(),
    ) {
        let id = parse_device_name(&format!("Apple M{generation}{suffix}")).unwrap();
        prop_assert_eq!(id.family, ChipFamily::DesktopSoc);
        prop_assert_eq!(id.generation, generation);
        prop_assert_eq!(id.tier, tier);
    }

    /// Arbitrary input never panics; it either classifies or fails with the name attached.
    #[test]
    fn arbitrary_names_never_panic(name in ".{0,32}") {
        match classify(&name, &PlatformFacts::default()) {
            Ok(record) => prop_assert_eq!(record.name(), name.as_str()),
            Err(e) => prop_assert_eq!(e.name(), name.as_str()),
        }
    }

    /// Every tabulated chip has positive bandwidth and satisfies the FLOPS identity.
    #[test]
    fn known_chips_satisfy_throughput_identities(name in arb_known_chip(), facts in arb_facts()) {
        let identity = parse_device_name(name).unwrap();
        let rule = lookup(&identity).unwrap();
        let record = classify(name, &facts).unwrap();

        prop_assert!(record.bandwidth_bytes_per_second() > 0.0);
        prop_assert!(record.core_count() > 0);

        let cores = f64::from(record.core_count());
        let expected_flops =
            cores * f64::from(rule.alus_per_core_fp32) * 2.0 * rule.clock_frequency_hz;
        let expected_ips = cores * f64::from(rule.alus_per_core_int32) * rule.clock_frequency_hz;
        prop_assert!((record.flops() - expected_flops).abs() <= expected_flops * 1e-12);
        prop_assert!((record.ips() - expected_ips).abs() <= expected_ips * 1e-12);
    }

    /// Generations beyond the table reuse the newest tabulated constants.
    #[test]
    fn carry_forward_matches_newest_generation(
        beyond in 1u32..50,
        (suffix, _tier) in arb_desktop_suffix(),
        mobile_suffix in prop_oneof![Just(""), Just("X")],
    ) {
        for (newest, future) in [
            (format!("Apple M2{suffix}"), format!("Apple M{}{suffix}", 2 + beyond)),
            (format!("Apple A16{mobile_suffix}"), format!("Apple A{}{mobile_suffix}", 16 + beyond)),
        ] {
            let newest = lookup(&parse_device_name(&newest).unwrap()).unwrap();
            let future = lookup(&parse_device_name(&future).unwrap()).unwrap();
            prop_assert_eq!(future.core_count, newest.core_count);
            prop_assert_eq!(future.clock_frequency_hz, newest.clock_frequency_hz);
            prop_assert_eq!(future.memory_interface, newest.memory_interface);
            prop_assert_eq!(future.system_level_cache_bytes, newest.system_level_cache_bytes);
            prop_assert_eq!(future.alus_per_core_fp32, newest.alus_per_core_fp32);
            prop_assert_eq!(future.alus_per_core_int32, newest.alus_per_core_int32);
        }
    }

    /// Mobile memory bus width follows the X/Z letters, not mere suffix presence.
    #[test]
    fn mobile_bus_width_follows_modifiers(generation in 11u32..=15, suffix in "[A-Za-z ]{0,8}") {
        let identity = parse_device_name(&format!("Apple A{generation}{suffix}")).unwrap();
        let rule = lookup(&identity).unwrap();
        let extended = suffix.contains(['X', 'Z']);
        prop_assert_eq!(rule.memory_interface.bus_width_bits == 128, extended);
        prop_assert!(rule.carried_forward.is_empty());
    }

    /// Classification is pure: identical inputs give bit-identical records.
    #[test]
    fn classification_is_deterministic(name in arb_known_chip(), facts in arb_facts()) {
        let a = classify(name, &facts).unwrap();
        let b = classify(name, &facts).unwrap();
        prop_assert_eq!(a.core_count(), b.core_count());
        prop_assert_eq!(a.clock_frequency_hz().to_bits(), b.clock_frequency_hz().to_bits());
        prop_assert_eq!(
            a.bandwidth_bytes_per_second().to_bits(),
            b.bandwidth_bytes_per_second().to_bits()
        );
        prop_assert_eq!(a.flops().to_bits(), b.flops().to_bits());
        prop_assert_eq!(a.ips().to_bits(), b.ips().to_bits());
        prop_assert_eq!(a, b);
    }
}
