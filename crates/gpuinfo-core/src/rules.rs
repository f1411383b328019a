//! Tabulated chip constants.
//!
//! Rows are append-only: a new generation gets new rows and never edits
//! older ones. Clock and ALU numbers cross-reference
//! [philipturner/metal-benchmarks](https://github.com/philipturner/metal-benchmarks).

use crate::identity::ChipFamily::{DesktopSoc, MobileSoc};
use crate::identity::Modifier::{Extended, FullyEnabled};
use crate::identity::Tier::{Base, Max, Pro, Ultra};
use crate::table::{CoreCountRule, FamilyRung, MemoryInterface, Row, Tiers};

const MB: u64 = 1024 * 1024;

const ANY: Tiers = Tiers::Any;
/// Phone dies, and any mobile name without an X or Z suffix letter.
const STANDARD: Tiers = Tiers::Without(&[Extended, FullyEnabled]);
/// Tablet dies: "X" and its fully enabled "Z" respin.
const EXTENDED: Tiers = Tiers::With(&[Extended, FullyEnabled]);
const BASE: Tiers = Tiers::Only(&[Base]);
const PRO: Tiers = Tiers::Only(&[Pro]);
const MAX: Tiers = Tiers::Only(&[Max]);
const ULTRA: Tiers = Tiers::Only(&[Ultra]);
const SCALED: Tiers = Tiers::Only(&[Pro, Max, Ultra]);
const KNOWN_DESKTOP: Tiers = Tiers::Only(&[Base, Pro, Max, Ultra]);

pub static CORE_COUNT: &[Row<CoreCountRule>] = &[
    Row::new(MobileSoc, 7, 8, ANY, CoreCountRule::Fixed(4)),
    Row::new(MobileSoc, 9, 10, STANDARD, CoreCountRule::Fixed(6)),
    Row::new(MobileSoc, 9, 10, EXTENDED, CoreCountRule::Fixed(12)),
    Row::new(MobileSoc, 11, 11, ANY, CoreCountRule::Fixed(3)),
    Row::new(MobileSoc, 12, 12, STANDARD, CoreCountRule::Fixed(4)),
    Row::new(MobileSoc, 12, 12, EXTENDED, CoreCountRule::Fixed(8)),
    Row::new(MobileSoc, 13, 14, ANY, CoreCountRule::Fixed(4)),
    // iPhone 13 mini / 13 / SE 3 ship a 4-core bin of the A15.
    Row::new(MobileSoc, 15, 15, ANY, CoreCountRule::ByVariant { binned: 4, full: 5 }),
    Row::new(MobileSoc, 16, 16, ANY, CoreCountRule::Fixed(5)),
    Row::new(DesktopSoc, 1, 1, BASE, CoreCountRule::Fixed(8)),
    Row::new(DesktopSoc, 1, 1, PRO, CoreCountRule::Fixed(16)),
    Row::new(DesktopSoc, 1, 1, MAX, CoreCountRule::Fixed(32)),
    Row::new(DesktopSoc, 1, 1, ULTRA, CoreCountRule::Fixed(64)),
    Row::new(DesktopSoc, 2, 2, BASE, CoreCountRule::Fixed(10)),
    Row::new(DesktopSoc, 2, 2, PRO, CoreCountRule::Fixed(19)),
    Row::new(DesktopSoc, 2, 2, MAX, CoreCountRule::Fixed(38)),
    Row::new(DesktopSoc, 2, 2, ULTRA, CoreCountRule::Fixed(76)),
];

pub static CLOCK_FREQUENCY: &[Row<f64>] = &[
    Row::new(MobileSoc, 7, 7, ANY, 0.450e9),
    Row::new(MobileSoc, 8, 8, ANY, 0.533e9),
    Row::new(MobileSoc, 9, 9, ANY, 0.650e9),
    Row::new(MobileSoc, 10, 10, STANDARD, 0.900e9),
    Row::new(MobileSoc, 10, 10, EXTENDED, 1.000e9),
    Row::new(MobileSoc, 11, 11, ANY, 1.066e9),
    Row::new(MobileSoc, 12, 12, ANY, 1.128e9),
    Row::new(MobileSoc, 13, 13, ANY, 1.230e9),
    Row::new(MobileSoc, 14, 14, ANY, 1.278e9),
    Row::new(MobileSoc, 15, 15, ANY, 1.338e9),
    Row::new(MobileSoc, 16, 16, ANY, 1.398e9),
    Row::new(DesktopSoc, 1, 1, BASE, 1.278e9),
    Row::new(DesktopSoc, 1, 1, SCALED, 1.296e9),
    Row::new(DesktopSoc, 2, 2, KNOWN_DESKTOP, 1.398e9),
];

pub static MEMORY_INTERFACE: &[Row<MemoryInterface>] = &[
    Row::new(MobileSoc, 7, 8, STANDARD, MemoryInterface::new(0.800e9, 64)),
    Row::new(MobileSoc, 7, 8, EXTENDED, MemoryInterface::new(0.800e9, 128)),
    Row::new(MobileSoc, 9, 10, STANDARD, MemoryInterface::new(1.600e9, 64)),
    Row::new(MobileSoc, 9, 10, EXTENDED, MemoryInterface::new(1.600e9, 128)),
    Row::new(MobileSoc, 11, 15, STANDARD, MemoryInterface::new(2.133e9, 64)),
    Row::new(MobileSoc, 11, 15, EXTENDED, MemoryInterface::new(2.133e9, 128)),
    Row::new(MobileSoc, 16, 16, ANY, MemoryInterface::new(3.200e9, 64)),
    Row::new(DesktopSoc, 1, 1, BASE, MemoryInterface::new(4.266e9, 128)),
    Row::new(DesktopSoc, 1, 1, PRO, MemoryInterface::new(3.200e9, 256)),
    Row::new(DesktopSoc, 1, 1, MAX, MemoryInterface::new(3.200e9, 512)),
    Row::new(DesktopSoc, 1, 1, ULTRA, MemoryInterface::new(3.200e9, 1024)),
    Row::new(DesktopSoc, 2, 2, BASE, MemoryInterface::new(3.200e9, 128)),
    Row::new(DesktopSoc, 2, 2, PRO, MemoryInterface::new(3.200e9, 256)),
    Row::new(DesktopSoc, 2, 2, MAX, MemoryInterface::new(3.200e9, 512)),
    Row::new(DesktopSoc, 2, 2, ULTRA, MemoryInterface::new(3.200e9, 1024)),
];

pub static SYSTEM_LEVEL_CACHE: &[Row<u64>] = &[
    Row::new(MobileSoc, 7, 8, ANY, 4 * MB),
    Row::new(MobileSoc, 9, 10, STANDARD, 4 * MB),
    // A9X and A10X have no system-level cache.
    Row::new(MobileSoc, 9, 10, EXTENDED, 0),
    Row::new(MobileSoc, 11, 11, ANY, 4 * MB),
    Row::new(MobileSoc, 12, 12, ANY, 8 * MB),
    Row::new(MobileSoc, 13, 14, ANY, 16 * MB),
    Row::new(MobileSoc, 15, 15, ANY, 32 * MB),
    Row::new(MobileSoc, 16, 16, ANY, 24 * MB),
    Row::new(DesktopSoc, 1, 2, BASE, 8 * MB),
    Row::new(DesktopSoc, 1, 2, PRO, 24 * MB),
    Row::new(DesktopSoc, 1, 2, MAX, 48 * MB),
    Row::new(DesktopSoc, 1, 2, ULTRA, 96 * MB),
];

pub static FP32_ALUS: &[Row<u32>] = &[
    Row::new(MobileSoc, 7, 10, ANY, 32),
    Row::new(MobileSoc, 11, 14, ANY, 64),
    Row::new(MobileSoc, 15, 16, ANY, 128),
    Row::new(DesktopSoc, 1, 2, ANY, 128),
];

pub static INT32_ALUS: &[Row<u32>] = &[
    Row::new(MobileSoc, 7, 10, ANY, 64),
    Row::new(MobileSoc, 11, 16, ANY, 128),
    Row::new(DesktopSoc, 1, 2, ANY, 128),
];

/// Metal family probing starts here and walks down.
pub const PROVISIONAL_MAX_FAMILY: u32 = 1009;

/// Apple 1, the lowest Metal family for Apple GPUs.
pub const MIN_FAMILY: u32 = 1001;

const fn rung(rank: u32, mobile_since: u32, desktop_since: u32) -> FamilyRung {
    FamilyRung {
        rank,
        mobile_since,
        desktop_since: Some(desktop_since),
    }
}

pub static FAMILY_LADDER: &[FamilyRung] = &[
    rung(1001, 7, 1),
    rung(1002, 8, 1),
    rung(1003, 9, 1),
    rung(1004, 11, 1),
    rung(1005, 12, 1),
    rung(1006, 13, 1),
    rung(1007, 14, 1),
    rung(1008, 15, 2),
    rung(1009, 17, 3),
];

/// Every chip name the table covers without carry-forward.
pub static KNOWN_CHIPS: &[&str] = &[
    "Apple A7",
    "Apple A8",
    "Apple A8X",
    "Apple A9",
    "Apple A9X",
    "Apple A10",
    "Apple A10X",
    "Apple A11",
    "Apple A12",
    "Apple A12X",
    "Apple A12Z",
    "Apple A13",
    "Apple A14",
    "Apple A15",
    "Apple A16",
    "Apple M1",
    "Apple M1 Pro",
    "Apple M1 Max",
    "Apple M1 Ultra",
    "Apple M2",
    "Apple M2 Pro",
    "Apple M2 Max",
    "Apple M2 Ultra",
];
