//! In-memory row provider.

use super::RowProvider;
use crate::error::{Error, Result};
use crate::models::Row;
use async_trait::async_trait;

/// Provider returning preset rows, or a preset fetch failure.
#[derive(Debug, Clone)]
pub struct StaticRowProvider {
    name: String,
    url: String,
    rows: std::result::Result<Vec<Row>, String>,
}

impl StaticRowProvider {
    pub fn new(name: &str, url: &str, rows: Vec<Row>) -> Self {
        StaticRowProvider {
            name: name.to_string(),
            url: url.to_string(),
            rows: Ok(rows),
        }
    }

    /// Build from string slices, one inner slice per row.
    pub fn from_cells(name: &str, url: &str, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|r| r.iter().map(|c| c.trim().to_string()).collect())
            .collect();
        Self::new(name, url, rows)
    }

    /// A provider whose fetch always fails with `message`.
    pub fn failing(name: &str, url: &str, message: &str) -> Self {
        StaticRowProvider {
            name: name.to_string(),
            url: url.to_string(),
            rows: Err(message.to_string()),
        }
    }
}

#[async_trait]
impl RowProvider for StaticRowProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_rows(&self) -> Result<Vec<Row>> {
        self.rows.clone().map_err(|message| Error::Fetch {
            name: self.name.clone(),
            url: self.url.clone(),
            message,
        })
    }
}
