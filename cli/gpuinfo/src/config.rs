//! `gpuinfo.toml` configuration and settings resolution.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gpuinfo_core::VariantHint;
use serde::Deserialize;

/// File name searched for in the working directory and its ancestors.
pub const CONFIG_FILE: &str = "gpuinfo.toml";

/// Environment variable holding a log filter directive.
pub const LOG_ENV: &str = "GPUINFO_LOG";

/// Filter used when nothing else is configured.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// The top-level configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GpuinfoConfig {
    /// Log filter directive, e.g. `"info"` or `"gpuinfo_core=debug"`.
    #[serde(default)]
    pub log_level: Option<String>,
    /// Facts about the local device.
    #[serde(default)]
    pub device: Option<DeviceConfig>,
}

/// The `[device]` section: what the platform layer would otherwise report.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DeviceConfig {
    #[serde(default)]
    pub name: Option<String>,
    /// Core count as reported by the OS.
    #[serde(default)]
    pub core_count: Option<u32>,
    #[serde(default)]
    pub memory_bytes: Option<u64>,
    #[serde(default)]
    pub variant: Option<VariantHint>,
}

impl GpuinfoConfig {
    /// Search upward from `start_dir` for a `gpuinfo.toml` file, parse and
    /// return it along with the path it was read from.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let config = Self::parse(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((config, candidate)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

/// Everything the commands need from the environment, resolved once.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub config: GpuinfoConfig,
    /// Where `config` came from; `None` when no file was found.
    pub source: Option<PathBuf>,
    pub log_filter: String,
}

impl Settings {
    /// Load the configuration and resolve the log filter.
    ///
    /// Filter precedence: `flag_filter`, then `env_filter`, then the file's
    /// `log-level`, then [`DEFAULT_LOG_FILTER`].
    pub fn load(
        start_dir: &Path,
        flag_filter: Option<&str>,
        env_filter: Option<&str>,
    ) -> Result<Self> {
        let (config, source) = match GpuinfoConfig::find_and_load(start_dir)? {
            Some((config, path)) => (config, Some(path)),
            None => (GpuinfoConfig::default(), None),
        };

        let log_filter = [flag_filter, env_filter, config.log_level.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(DEFAULT_LOG_FILTER)
            .to_string();

        Ok(Self {
            config,
            source,
            log_filter,
        })
    }

    /// The configured device section, if any.
    pub fn device(&self) -> Option<&DeviceConfig> {
        self.config.device.as_ref()
    }
}
