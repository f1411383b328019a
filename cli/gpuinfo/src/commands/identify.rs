//! `gpuinfo identify`: show how a device name parses.

use anyhow::Result;
use gpuinfo_core::{parse_device_name, ChipIdentity};

pub fn render(identity: &ChipIdentity) -> String {
    let modifiers = if identity.modifiers.is_empty() {
        "none".to_string()
    } else {
        identity
            .modifiers
            .iter()
            .map(|m| format!("{m:?} ({})", m.letter()))
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "{}\n  Family:     {}\n  Generation: {}\n  Tier:       {}\n  Modifiers:  {modifiers}\n",
        identity.name, identity.family, identity.generation, identity.tier
    )
}

/// Parse and print the identity of `name`.
pub fn run(name: &str) -> Result<()> {
    let identity = parse_device_name(name)?;
    print!("{}", render(&identity));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_desktop_identity() {
        let identity = parse_device_name("Apple M1 Pro").unwrap();
        let text = render(&identity);
        assert!(text.starts_with("Apple M1 Pro\n"));
        assert!(text.contains("Family:     M-series"));
        assert!(text.contains("Generation: 1\n"));
        assert!(text.contains("Tier:       pro"));
        assert!(text.contains("Modifiers:  none"));
    }

    #[test]
    fn renders_modifiers() {
        let identity = parse_device_name("Apple A12Z").unwrap();
        let text = render(&identity);
        assert!(text.contains("FullyEnabled (Z)"));
    }

    #[test]
    fn run_rejects_foreign_names() {
        assert!(run("AMD Radeon Pro 5500M").is_err());
    }
}
