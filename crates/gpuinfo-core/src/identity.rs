//! Chip identity model.
//!
//! A [`ChipIdentity`] is the parsed form of a device name: which product
//! line the chip belongs to, its generation number, and the die
//! configuration within that generation.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

/// Apple SoC product line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChipFamily {
    /// A-series chips (iPhone, iPad).
    MobileSoc,
    /// M-series chips (Mac, iPad Pro).
    DesktopSoc,
}

impl ChipFamily {
    /// Both families, mobile first.
    pub const ALL: [ChipFamily; 2] = [ChipFamily::MobileSoc, ChipFamily::DesktopSoc];

    /// The exact name prefix reported by Metal for this family.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::MobileSoc => "Apple A",
            Self::DesktopSoc => "Apple M",
        }
    }

    /// Parse a family from a user-facing string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mobile" | "mobile-soc" | "a" | "a-series" => Some(Self::MobileSoc),
            "desktop" | "desktop-soc" | "m" | "m-series" => Some(Self::DesktopSoc),
            _ => None,
        }
    }
}

impl fmt::Display for ChipFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MobileSoc => write!(f, "A-series"),
            Self::DesktopSoc => write!(f, "M-series"),
        }
    }
}

/// Die configuration within one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    /// Mobile chip whose name ends on its generation number (e.g. A14).
    Phone,
    /// Mobile tablet die (A12X) or the plain desktop chip (M2).
    Base,
    Pro,
    Max,
    Ultra,
    /// Desktop name with an unrecognized suffix.
    Unknown,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Phone => write!(f, "phone"),
            Self::Base => write!(f, "base"),
            Self::Pro => write!(f, "pro"),
            Self::Max => write!(f, "max"),
            Self::Ultra => write!(f, "ultra"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A flag parsed from trailing letters in a mobile chip name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Modifier {
    /// `X` suffix: extended tablet die with a wider memory bus.
    Extended,
    /// `Z` suffix: the fully enabled bin of an extended die.
    FullyEnabled,
}

impl Modifier {
    /// Map a suffix letter to its modifier.
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'X' => Some(Self::Extended),
            'Z' => Some(Self::FullyEnabled),
            _ => None,
        }
    }

    /// The suffix letter for this modifier.
    pub fn letter(&self) -> char {
        match self {
            Self::Extended => 'X',
            Self::FullyEnabled => 'Z',
        }
    }
}

/// The parsed identity of a GPU.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChipIdentity {
    /// The raw device name this identity was parsed from.
    pub name: String,
    pub family: ChipFamily,
    pub tier: Tier,
    /// Sequential product generation (14 for A14, 2 for M2).
    pub generation: u32,
    /// Suffix flags; always empty for desktop chips.
    pub modifiers: BTreeSet<Modifier>,
}

impl ChipIdentity {
    /// Whether the given suffix flag was present in the name.
    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Whether any of the given suffix flags was present in the name.
    pub fn has_any_modifier(&self, modifiers: &[Modifier]) -> bool {
        modifiers.iter().any(|m| self.has_modifier(*m))
    }
}

impl fmt::Display for ChipIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} gen {} ({})", self.family, self.generation, self.tier)?;
        if !self.modifiers.is_empty() {
            let letters: String = self.modifiers.iter().map(Modifier::letter).collect();
            write!(f, " [{letters}]")?;
        }
        Ok(())
    }
}
