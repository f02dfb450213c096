//! Row providers for the source pages.
//!
//! This module handles everything that talks to the outside world on the input side:
//! - [`html_table`] - HTTP fetch and HTML table parsing of a source page
//! - [`fixed`] - In-memory provider for tests and offline runs

mod fixed;
mod html_table;

use crate::config::Config;
use crate::error::Result;
use crate::models::Row;
use async_trait::async_trait;

// Re-export public types and functions
pub use fixed::StaticRowProvider;
pub use html_table::{parse_table_rows, HtmlTableProvider};

/// A source yielding the body rows of one published table.
#[async_trait]
pub trait RowProvider: Send + Sync {
    /// Short name for logs and errors.
    fn name(&self) -> &str;

    /// Page URL, recorded in the report header.
    fn url(&self) -> &str;

    /// Load the page and return its rows, cell texts trimmed.
    ///
    /// Fails with [`crate::Error::Fetch`] if the page does not load or the
    /// expected table never shows up within the source timeout.
    async fn fetch_rows(&self) -> Result<Vec<Row>>;
}

/// One [`HtmlTableProvider`] per configured source, in config order.
pub fn providers_from_config(config: &Config) -> Result<Vec<Box<dyn RowProvider>>> {
    config
        .sources
        .iter()
        .map(|source| {
            HtmlTableProvider::new(source.clone()).map(|p| Box::new(p) as Box<dyn RowProvider>)
        })
        .collect()
}
