//! Merge the Cloudflare edge IPs recommended per Chinese carrier by several
//! monitoring pages into one plain text report.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod processing;
pub mod sources;

pub use config::{Config, SourceConfig};
pub use error::{Error, Result};
pub use pipeline::{fetch_all, run, run_with_providers, RunSummary};
