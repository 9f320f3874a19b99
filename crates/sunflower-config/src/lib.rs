#![forbid(unsafe_code)]
#![deny(unreachable_pub)]

//! Process configuration: CLI flags, environment variables (`SUNFLOWER_*`),
//! and an optional JSON config file layered on top, matching the source's
//! `SunflowerConfig.update_with_args` / `load_config_with_config_json`
//! precedence (CLI/env first, then JSON file overrides on top).

use std::fs;
use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

fn default_index_files() -> Vec<String> {
    vec!["index-english.nozomi".to_string()]
}

#[derive(Debug, Clone, Parser)]
#[command(name = "sunflower", version, about = "Hitomi.la gallery mirroring service")]
pub struct Cli {
    /// Path to a JSON file whose keys override any CLI/env value set above it.
    #[arg(long, env = "SUNFLOWER_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "SUNFLOWER_REMOTE_BASE_URL", default_value = "https://ltn.hitomi.la")]
    pub remote_base_url: String,

    #[arg(long, env = "SUNFLOWER_INDEX_FILES", value_delimiter = ',', default_values_t = default_index_files())]
    pub index_files: Vec<String>,

    #[arg(long, env = "MIRRORING_REMOTE_CONCURRENT_SIZE", default_value_t = 50)]
    pub mirroring_remote_concurrent_size: usize,

    #[arg(long, env = "MIRRORING_LOCAL_CONCURRENT_SIZE", default_value_t = 25)]
    pub mirroring_local_concurrent_size: usize,

    #[arg(long, env = "INTEGRITY_PARTIAL_CHECK_RANGE_SIZE", default_value_t = 100)]
    pub integrity_partial_check_range_size: usize,

    #[arg(long, env = "MIRRORING_DELAY", default_value_t = 3600)]
    pub mirroring_delay_secs: u64,

    #[arg(long, env = "INTEGRITY_PARTIAL_CHECK_DELAY", default_value_t = 21600)]
    pub integrity_partial_check_delay_secs: u64,

    #[arg(long, env = "INTEGRITY_FULL_CHECK_DELAY", default_value_t = 432_000)]
    pub integrity_full_check_delay_secs: u64,

    #[arg(long, env = "RUN_AS_ONCE", default_value_t = false)]
    pub run_as_once: bool,

    #[arg(long, env = "DISABLE_MIRRORING", default_value_t = false)]
    pub disable_mirroring: bool,

    #[arg(long, env = "DISABLE_INTEGRITY_CHECK", default_value_t = false)]
    pub disable_integrity_check: bool,

    #[arg(long, env = "DISABLE_INTEGRITY_PARTIAL_CHECK", default_value_t = false)]
    pub disable_integrity_partial_check: bool,

    #[arg(long, env = "DISABLE_INTEGRITY_FULL_CHECK", default_value_t = false)]
    pub disable_integrity_full_check: bool,

    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub http_host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub http_port: u16,

    #[arg(long, env = "SUNFLOWER_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Sparse JSON overlay. Every field optional; only keys present in the file
/// override what the CLI/env layer already resolved.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct ConfigFileOverrides {
    remote_base_url: Option<String>,
    index_files: Option<Vec<String>>,
    mirroring_remote_concurrent_size: Option<usize>,
    mirroring_local_concurrent_size: Option<usize>,
    integrity_partial_check_range_size: Option<usize>,
    mirroring_delay: Option<u64>,
    integrity_partial_check_delay: Option<u64>,
    integrity_full_check_delay: Option<u64>,
    run_as_once: Option<bool>,
    disable_mirroring: Option<bool>,
    disable_integrity_check: Option<bool>,
    disable_integrity_partial_check: Option<bool>,
    disable_integrity_full_check: Option<bool>,
    host: Option<IpAddr>,
    port: Option<u16>,
}

/// Fully resolved process configuration: CLI/env merged with an optional
/// JSON file layered on top.
#[derive(Debug, Clone)]
pub struct Config {
    pub remote_base_url: String,
    pub index_files: Vec<String>,
    pub mirroring_remote_concurrent_size: usize,
    pub mirroring_local_concurrent_size: usize,
    pub integrity_partial_check_range_size: usize,
    pub mirroring_delay_secs: u64,
    pub integrity_partial_check_delay_secs: u64,
    pub integrity_full_check_delay_secs: u64,
    pub run_as_once: bool,
    pub disable_mirroring: bool,
    pub disable_integrity_check: bool,
    pub disable_integrity_partial_check: bool,
    pub disable_integrity_full_check: bool,
    pub http_host: IpAddr,
    pub http_port: u16,
    pub log_level: String,
}

impl Config {
    /// Parses CLI arguments and environment, then applies the JSON config
    /// file (`--config`/`SUNFLOWER_CONFIG`) on top if one was given.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let mut config = Self {
            remote_base_url: cli.remote_base_url,
            index_files: cli.index_files,
            mirroring_remote_concurrent_size: cli.mirroring_remote_concurrent_size,
            mirroring_local_concurrent_size: cli.mirroring_local_concurrent_size,
            integrity_partial_check_range_size: cli.integrity_partial_check_range_size,
            mirroring_delay_secs: cli.mirroring_delay_secs,
            integrity_partial_check_delay_secs: cli.integrity_partial_check_delay_secs,
            integrity_full_check_delay_secs: cli.integrity_full_check_delay_secs,
            run_as_once: cli.run_as_once,
            disable_mirroring: cli.disable_mirroring,
            disable_integrity_check: cli.disable_integrity_check,
            disable_integrity_partial_check: cli.disable_integrity_partial_check,
            disable_integrity_full_check: cli.disable_integrity_full_check,
            http_host: cli.http_host,
            http_port: cli.http_port,
            log_level: cli.log_level,
        };

        if let Some(path) = cli.config {
            let raw = fs::read_to_string(&path)
                .map_err(|err| anyhow::anyhow!("reading config file {}: {err}", path.display()))?;
            let overrides: ConfigFileOverrides = serde_json::from_str(&raw)
                .map_err(|err| anyhow::anyhow!("parsing config file {}: {err}", path.display()))?;
            config.apply(overrides);
        }

        Ok(config)
    }

    fn apply(&mut self, overrides: ConfigFileOverrides) {
        if let Some(v) = overrides.remote_base_url {
            self.remote_base_url = v;
        }
        if let Some(v) = overrides.index_files {
            self.index_files = v;
        }
        if let Some(v) = overrides.mirroring_remote_concurrent_size {
            self.mirroring_remote_concurrent_size = v;
        }
        if let Some(v) = overrides.mirroring_local_concurrent_size {
            self.mirroring_local_concurrent_size = v;
        }
        if let Some(v) = overrides.integrity_partial_check_range_size {
            self.integrity_partial_check_range_size = v;
        }
        if let Some(v) = overrides.mirroring_delay {
            self.mirroring_delay_secs = v;
        }
        if let Some(v) = overrides.integrity_partial_check_delay {
            self.integrity_partial_check_delay_secs = v;
        }
        if let Some(v) = overrides.integrity_full_check_delay {
            self.integrity_full_check_delay_secs = v;
        }
        if let Some(v) = overrides.run_as_once {
            self.run_as_once = v;
        }
        if let Some(v) = overrides.disable_mirroring {
            self.disable_mirroring = v;
        }
        if let Some(v) = overrides.disable_integrity_check {
            self.disable_integrity_check = v;
        }
        if let Some(v) = overrides.disable_integrity_partial_check {
            self.disable_integrity_partial_check = v;
        }
        if let Some(v) = overrides.disable_integrity_full_check {
            self.disable_integrity_full_check = v;
        }
        if let Some(v) = overrides.host {
            self.http_host = v;
        }
        if let Some(v) = overrides.port {
            self.http_port = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn base_cli() -> Cli {
        Cli::parse_from(["sunflower"])
    }

    #[test]
    fn defaults_match_source_config_defaults() {
        let config = Config::from_cli(base_cli()).unwrap();
        assert_eq!(config.mirroring_remote_concurrent_size, 50);
        assert_eq!(config.mirroring_local_concurrent_size, 25);
        assert_eq!(config.integrity_partial_check_range_size, 100);
        assert_eq!(config.mirroring_delay_secs, 3600);
        assert_eq!(config.integrity_partial_check_delay_secs, 21600);
        assert_eq!(config.integrity_full_check_delay_secs, 432_000);
        assert!(!config.run_as_once);
        assert_eq!(config.index_files, vec!["index-english.nozomi".to_string()]);
    }

    #[test]
    fn config_file_overrides_only_present_keys() {
        let path = std::env::temp_dir().join(format!(
            "sunflower-config-test-{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{"RUN_AS_ONCE": true, "MIRRORING_DELAY": 60}"#).unwrap();

        let mut cli = base_cli();
        cli.config = Some(path.clone());
        let config = Config::from_cli(cli).unwrap();

        assert!(config.run_as_once);
        assert_eq!(config.mirroring_delay_secs, 60);
        // untouched keys keep their CLI/env-resolved value
        assert_eq!(config.mirroring_remote_concurrent_size, 50);

        fs::remove_file(&path).ok();
    }
}
