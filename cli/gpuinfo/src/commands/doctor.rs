//! `gpuinfo doctor`: configuration and table diagnostics.

use anyhow::{bail, Result};
use gpuinfo_core::rules::{KNOWN_CHIPS, MIN_FAMILY, PROVISIONAL_MAX_FAMILY};
use gpuinfo_core::validate_table;

use crate::config::{Settings, CONFIG_FILE};
use crate::units;

/// Build the diagnostic report. Returns the text and the number of
/// error-severity table issues.
pub fn report(settings: &Settings) -> (String, usize) {
    let mut out = String::new();
    out.push_str("=== gpuinfo doctor ===\n\n");
    out.push_str(&format!("gpuinfo version: {}\n\n", env!("CARGO_PKG_VERSION")));

    out.push_str("--- Configuration ---\n");
    match &settings.source {
        Some(path) => out.push_str(&format!("  {CONFIG_FILE}: {}\n", path.display())),
        None => out.push_str(&format!("  {CONFIG_FILE}: not found\n")),
    }
    out.push_str(&format!("  Log filter: {}\n", settings.log_filter));
    if let Some(device) = settings.device() {
        let name = device.name.as_deref().unwrap_or("(unset)");
        out.push_str(&format!("  Device:     {name}\n"));
    }
    out.push('\n');

    out.push_str("--- Classification table ---\n");
    out.push_str(&format!("  Known chips: {}\n", KNOWN_CHIPS.len()));
    out.push_str(&format!(
        "  Families:    {} to {}\n",
        units::family(MIN_FAMILY),
        units::family(PROVISIONAL_MAX_FAMILY)
    ));
    let mut errors = 0;
    match validate_table() {
        Ok(()) => out.push_str("  Self-check:  ok\n"),
        Err(issues) => {
            out.push_str(&format!("  Self-check:  {} issue(s)\n", issues.len()));
            for issue in &issues {
                if issue.severity == "error" {
                    errors += 1;
                }
                out.push_str(&format!("    {issue}\n"));
            }
        }
    }
    (out, errors)
}

pub fn run(settings: &Settings) -> Result<()> {
    let (text, errors) = report(settings);
    print!("{text}");
    if errors > 0 {
        bail!("classification table has {errors} error(s)");
    }
    Ok(())
}
