//! Device name parsing.
//!
//! Metal reports Apple GPUs as `"Apple A<gen>[suffix]"` or
//! `"Apple M<gen>[ Pro| Max| Ultra]"`. Parsing is exact-prefix and
//! case-sensitive.

use std::collections::BTreeSet;

use crate::error::{ClassificationError, Result};
use crate::identity::{ChipFamily, ChipIdentity, Modifier, Tier};

/// Parse a raw device name into a [`ChipIdentity`].
pub fn parse_device_name(raw: &str) -> Result<ChipIdentity> {
    let (family, rest) = ChipFamily::ALL
        .iter()
        .find_map(|family| raw.strip_prefix(family.prefix()).map(|rest| (*family, rest)))
        .ok_or_else(|| ClassificationError::UnrecognizedFamily { name: raw.into() })?;

    let digit_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    let generation = rest[..digit_len]
        .parse::<u32>()
        .ok()
        .filter(|g| *g > 0)
        .ok_or_else(|| ClassificationError::MalformedGeneration { name: raw.into() })?;
    let suffix = &rest[digit_len..];

    let (tier, modifiers) = match family {
        ChipFamily::MobileSoc => mobile_tier(suffix),
        ChipFamily::DesktopSoc => (desktop_tier(suffix), BTreeSet::new()),
    };

    Ok(ChipIdentity {
        name: raw.into(),
        family,
        tier,
        generation,
        modifiers,
    })
}

/// A-series tier comes from suffix presence, never from keywords.
fn mobile_tier(suffix: &str) -> (Tier, BTreeSet<Modifier>) {
    if suffix.is_empty() {
        return (Tier::Phone, BTreeSet::new());
    }
    let modifiers = suffix.chars().filter_map(Modifier::from_letter).collect();
    (Tier::Base, modifiers)
}

fn desktop_tier(suffix: &str) -> Tier {
    if suffix.is_empty() {
        Tier::Base
    } else if suffix.contains("Pro") {
        Tier::Pro
    } else if suffix.contains("Max") {
        Tier::Max
    } else if suffix.contains("Ultra") {
        Tier::Ultra
    } else {
        Tier::Unknown
    }
}
