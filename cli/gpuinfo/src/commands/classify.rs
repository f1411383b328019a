//! `gpuinfo classify`: derive the full specification of one device.

use anyhow::{bail, Context, Result};
use gpuinfo_core::{classify, validate_record, PlatformFacts, SpecificationRecord, VariantHint};

use crate::config::Settings;
use crate::units;

/// Output formats shared by the commands that print records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Toml,
}

impl OutputFormat {
    pub fn parse(s: Option<&str>) -> Result<Self> {
        match s.map(str::to_lowercase).as_deref() {
            None | Some("text") => Ok(Self::Text),
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            Some(other) => bail!("unknown format: '{other}' (expected text, json, or toml)"),
        }
    }
}

/// Command-line inputs to `classify`, before merging with configuration.
#[derive(Debug, Clone, Default)]
pub struct ClassifyArgs {
    pub name: Option<String>,
    pub cores: Option<u32>,
    pub memory: Option<u64>,
    pub variant: Option<String>,
    pub format: Option<String>,
}

/// Merge flags with the `[device]` section.
///
/// The configured facts describe the configured device only; they are
/// ignored when a different name is given on the command line.
pub fn resolve_request(args: &ClassifyArgs, settings: &Settings) -> Result<(String, PlatformFacts)> {
    let device = settings.device();
    let configured_name = device.and_then(|d| d.name.as_deref());

    let name = match (args.name.as_deref(), configured_name) {
        (Some(name), _) => name.to_string(),
        (None, Some(name)) => name.to_string(),
        (None, None) => bail!(
            "no device name given; pass one (e.g. \"Apple M1\") or set [device] name in {}",
            crate::config::CONFIG_FILE
        ),
    };
    let device = device.filter(|d| d.name.is_none() || d.name.as_deref() == Some(name.as_str()));

    let variant = match args.variant.as_deref() {
        Some(v) => VariantHint::parse(v)
            .with_context(|| format!("unknown variant: '{v}' (expected unspecified, binned-die, or full-die)"))?,
        None => device.and_then(|d| d.variant).unwrap_or_default(),
    };
    let memory = args
        .memory
        .or_else(|| device.and_then(|d| d.memory_bytes))
        .unwrap_or(0);
    let cores = args.cores.or_else(|| device.and_then(|d| d.core_count));

    let mut facts = PlatformFacts::new(memory).with_variant(variant);
    if let Some(cores) = cores {
        facts = facts.with_measured_core_count(cores);
    }
    Ok((name, facts))
}

/// Render a record in the requested format.
pub fn render(record: &SpecificationRecord, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(record)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(record).context("serializing record to JSON")
        }
        OutputFormat::Toml => toml::to_string(record).context("serializing record to TOML"),
    }
}

fn render_text(record: &SpecificationRecord) -> String {
    let rows = [
        ("GPU cores", record.core_count().to_string()),
        ("Clock frequency", units::frequency(record.clock_frequency_hz())),
        ("Bandwidth", units::bandwidth(record.bandwidth_bytes_per_second())),
        ("FP32 throughput", units::flops(record.flops())),
        ("INT32 throughput", units::ips(record.ips())),
        ("System-level cache", units::bytes(record.system_level_cache_bytes())),
        ("Memory", units::bytes(record.memory_bytes())),
        ("Metal family", units::family(record.family_tier_rank())),
    ];
    let mut out = format!("{} ({})\n", record.name(), record.vendor());
    for (label, value) in rows {
        out.push_str(&format!("  {label:<20}{value}\n"));
    }
    out
}

/// Classify and print.
pub fn run(args: &ClassifyArgs, settings: &Settings) -> Result<()> {
    let format = OutputFormat::parse(args.format.as_deref())?;
    let (name, facts) = resolve_request(args, settings)?;
    tracing::info!(%name, ?facts, "classifying");

    let record = classify(&name, &facts)?;
    if let Err(issues) = validate_record(&record) {
        for issue in issues {
            tracing::warn!(severity = issue.severity, "{}", issue.message);
        }
    }
    print!("{}", render(&record, format)?);
    Ok(())
}
