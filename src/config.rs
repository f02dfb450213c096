//! Run configuration.
//!
//! A [`Config`] is built once at startup and passed by reference into the
//! pipeline; nothing reads the environment after that.

use crate::error::{Error, Result};
use crate::models::Carrier;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Reports with fewer IPs than this are never written.
pub const MIN_TOTAL_IPS: usize = 5;

/// Default report location, relative to the working directory.
pub const TARGET_FILE: &str = "cloudflare优选ip";

pub const ROW_SELECTOR: &str = "table tbody tr";

/// Environment variable prefix for all overrides.
const ENV_PREFIX: &str = "CF_IPS_";

/// One page publishing a table of carrier/IP rows.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Short name used in logs and env overrides (`CF_IPS_<NAME>_URL`).
    pub name: String,
    pub url: String,
    /// Upper bound for loading the page.
    pub timeout_secs: u64,
    /// Selector that must match before the page counts as loaded.
    pub ready_selector: String,
    #[serde(default = "default_row_selector")]
    pub row_selector: String,
}

fn default_row_selector() -> String {
    ROW_SELECTOR.to_string()
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn wetest() -> Self {
        SourceConfig {
            name: "wetest".to_string(),
            url: "https://www.wetest.vip/page/cloudflare/address_v4.html".to_string(),
            timeout_secs: 60,
            ready_selector: "table".to_string(),
            row_selector: default_row_selector(),
        }
    }

    pub fn hostmonit() -> Self {
        SourceConfig {
            name: "hostmonit".to_string(),
            url: "https://stock.hostmonit.com/CloudFlareYes".to_string(),
            timeout_secs: 120,
            ready_selector: ROW_SELECTOR.to_string(),
            row_selector: default_row_selector(),
        }
    }
}

/// Immutable settings for one run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Sources in merge order.
    pub sources: Vec<SourceConfig>,
    pub target_file: PathBuf,
    /// Section order of the report.
    pub carriers_order: Vec<Carrier>,
    /// Keep at most N IPs per carrier, 0 = unlimited.
    pub top_n_per_carrier: usize,
    pub min_total_ips: usize,
    /// Print the report to stdout instead of writing `target_file`.
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            sources: vec![SourceConfig::wetest(), SourceConfig::hostmonit()],
            target_file: PathBuf::from(TARGET_FILE),
            carriers_order: Carrier::ALL.to_vec(),
            top_n_per_carrier: 0,
            min_total_ips: MIN_TOTAL_IPS,
            dry_run: false,
        }
    }
}

impl Config {
    /// Build the config from `.env`, an optional JSON file and `CF_IPS_*` variables.
    ///
    /// `CF_IPS_CONFIG` names the JSON file; variables override the file.
    pub fn from_env() -> Result<Config> {
        if let Ok(path) = dotenv::dotenv() {
            log::debug!("Loaded env file {}", path.display());
        }
        let base = match std::env::var(format!("{ENV_PREFIX}CONFIG")) {
            Ok(file) => Config::from_file(&file)?,
            Err(_) => Config::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("cannot read {}: {e}", path.display())))?;
        log::info!("Reading config file: {}", path.display());

        let mut deserializer = serde_json::Deserializer::from_str(&json);
        let config: Config = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
            Error::config(format!(
                "error parsing {}: path={} error={}",
                path.display(),
                e.path(),
                e.inner()
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `CF_IPS_*` overrides looked up through `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(&format!("{ENV_PREFIX}{name}"))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(target) = var("TARGET_FILE") {
            self.target_file = PathBuf::from(target);
        }
        if let Some(top_n) = var("TOP_N") {
            self.top_n_per_carrier = parse_number("TOP_N", &top_n)?;
        }
        if let Some(min) = var("MIN_TOTAL") {
            self.min_total_ips = parse_number("MIN_TOTAL", &min)?;
        }
        if let Some(order) = var("CARRIER_ORDER") {
            self.carriers_order = order
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.parse::<Carrier>().map_err(Error::config))
                .collect::<Result<Vec<_>>>()?;
        }
        if let Some(dry_run) = var("DRY_RUN") {
            self.dry_run = matches!(dry_run.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        for source in self.sources.iter_mut() {
            if let Some(url) = var(&format!("{}_URL", source.name.to_ascii_uppercase())) {
                log::info!("Override {} url: {url}", source.name);
                source.url = url;
            }
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(Error::config("no sources configured"));
        }
        if let Some(source) = self
            .sources
            .iter()
            .find(|s| !(s.url.starts_with("http://") || s.url.starts_with("https://")))
        {
            return Err(Error::config(format!(
                "source '{}' has invalid url '{}'",
                source.name, source.url
            )));
        }
        if self.carriers_order.is_empty() {
            return Err(Error::config("carriers_order is empty"));
        }
        if !self.carriers_order.iter().all_unique() {
            return Err(Error::config(format!(
                "carriers_order has duplicates: {:?}",
                self.carriers_order
            )));
        }
        if self.target_file.as_os_str().is_empty() {
            return Err(Error::config("target_file is empty"));
        }
        Ok(())
    }

    /// Source URLs in merge order, for the provenance header.
    pub fn source_urls(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.url.clone()).collect()
    }
}

fn parse_number(name: &str, value: &str) -> Result<usize> {
    value
        .parse::<usize>()
        .map_err(|e| Error::config(format!("{ENV_PREFIX}{name}='{value}': {e}")))
}
