//! Human-readable formatting of record quantities.

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;

/// Scale a rate by powers of 1000 and attach an SI prefix.
fn si(value: f64, unit: &str) -> String {
    const PREFIXES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "G"), (1e6, "M"), (1e3, "k")];
    for (scale, prefix) in PREFIXES {
        if value >= scale {
            return format!("{} {prefix}{unit}", trim(value / scale));
        }
    }
    format!("{} {unit}", trim(value))
}

/// Up to three decimals, trailing zeros removed.
fn trim(value: f64) -> String {
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

pub fn frequency(hz: f64) -> String {
    si(hz, "Hz")
}

pub fn bandwidth(bytes_per_second: f64) -> String {
    si(bytes_per_second, "B/s")
}

pub fn flops(ops: f64) -> String {
    si(ops, "FLOPS")
}

pub fn ips(ops: f64) -> String {
    si(ops, "IPS")
}

/// Byte sizes use binary multiples, matching how cache and RAM are sold.
pub fn bytes(n: u64) -> String {
    match n {
        0 => "none".to_string(),
        n if n >= GIB && n % GIB == 0 => format!("{} GB", n / GIB),
        n if n >= GIB => format!("{} GB", trim(n as f64 / GIB as f64)),
        n if n >= MIB && n % MIB == 0 => format!("{} MB", n / MIB),
        n if n >= MIB => format!("{} MB", trim(n as f64 / MIB as f64)),
        n => format!("{n} bytes"),
    }
}

/// Metal family raw values start at 1001 for "Apple 1".
pub fn family(rank: u32) -> String {
    match rank.checked_sub(1000) {
        Some(n) if n > 0 => format!("Apple {n}"),
        _ => format!("unknown ({rank})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rates() {
        assert_eq!(frequency(1.398e9), "1.398 GHz");
        assert_eq!(frequency(450e6), "450 MHz");
        assert_eq!(bandwidth(409.6e9), "409.6 GB/s");
        assert_eq!(bandwidth(2.0 * 0.8e9 * 8.0), "12.8 GB/s");
        assert_eq!(flops(13.6e12), "13.6 TFLOPS");
        assert_eq!(ips(999.0), "999 IPS");
    }

    #[test]
    fn sizes() {
        assert_eq!(bytes(0), "none");
        assert_eq!(bytes(512), "512 bytes");
        assert_eq!(bytes(48 * MIB), "48 MB");
        assert_eq!(bytes(32 * GIB), "32 GB");
        assert_eq!(bytes(8_000_000_000), "7.451 GB");
    }

    #[test]
    fn family_labels() {
        assert_eq!(family(1001), "Apple 1");
        assert_eq!(family(1009), "Apple 9");
        assert_eq!(family(1000), "unknown (1000)");
        assert_eq!(family(0), "unknown (0)");
    }
}
