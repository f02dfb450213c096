//! HTTP fetch and HTML table parsing of a source page.
//!
//! Uses reqwest for the request and scraper for the table. Pages are read as
//! served, no JavaScript is run.

use super::RowProvider;
use crate::config::SourceConfig;
use crate::error::{Error, Result};
use crate::models::Row;
use async_trait::async_trait;
use colored::Colorize;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use scraper::{Html, Selector};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Bodies larger than this are refused.
const MAX_BODY_BYTES: usize = 5_000_000;

/// Provider for a page publishing a plain HTML table.
pub struct HtmlTableProvider {
    source: SourceConfig,
    client: reqwest::Client,
}

impl HtmlTableProvider {
    pub fn new(source: SourceConfig) -> Result<Self> {
        // Fail early on bad selectors, before any request goes out.
        parse_selector(&source, &source.ready_selector)?;
        parse_selector(&source, &source.row_selector)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("zh-CN,zh;q=0.9,en;q=0.8"),
        );

        let client = reqwest::Client::builder()
            .timeout(source.timeout())
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| fetch_error(&source, format!("cannot build HTTP client: {e}")))?;

        Ok(HtmlTableProvider { source, client })
    }

    async fn fetch_html(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.source.url)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(&self.source, format!("HTTP {status}")));
        }

        let body = response.text().await.map_err(|e| self.request_error(e))?;
        if body.len() > MAX_BODY_BYTES {
            return Err(fetch_error(
                &self.source,
                format!("response too large: {} bytes", body.len()),
            ));
        }
        Ok(body)
    }

    fn request_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            fetch_error(
                &self.source,
                format!("timeout after {}s", self.source.timeout_secs),
            )
        } else {
            fetch_error(&self.source, e.to_string())
        }
    }
}

#[async_trait]
impl RowProvider for HtmlTableProvider {
    fn name(&self) -> &str {
        &self.source.name
    }

    fn url(&self) -> &str {
        &self.source.url
    }

    async fn fetch_rows(&self) -> Result<Vec<Row>> {
        log::info!(
            "fetch {name} {url}",
            name = self.source.name.on_blue(),
            url = self.source.url
        );
        let html = self.fetch_html().await?;
        log::debug!("{}: got {} bytes", self.source.name, html.len());

        let rows = parse_table_rows(
            &html,
            &self.source.ready_selector,
            &self.source.row_selector,
        )
        .map_err(|message| fetch_error(&self.source, message))?;

        log::info!("{}: {} table rows", self.source.name, rows.len());
        Ok(rows)
    }
}

/// Extract the cell texts of every row matching `row_selector`.
///
/// Returns an error message if either selector is invalid or `ready_selector`
/// matches nothing. Cells are the `td` children of a row, trimmed.
pub fn parse_table_rows(
    html: &str,
    ready_selector: &str,
    row_selector: &str,
) -> std::result::Result<Vec<Row>, String> {
    let ready = Selector::parse(ready_selector)
        .map_err(|e| format!("invalid selector '{ready_selector}': {e}"))?;
    let row_sel =
        Selector::parse(row_selector).map_err(|e| format!("invalid selector '{row_selector}': {e}"))?;
    let cell_sel = Selector::parse("td").map_err(|e| format!("invalid selector 'td': {e}"))?;

    let document = Html::parse_document(html);
    if document.select(&ready).next().is_none() {
        return Err(format!("expected element '{ready_selector}' not found"));
    }

    let rows = document
        .select(&row_sel)
        .map(|tr| {
            tr.select(&cell_sel)
                .map(|td| td.text().collect::<String>().trim().to_string())
                .collect::<Row>()
        })
        .collect();
    Ok(rows)
}

fn parse_selector(source: &SourceConfig, selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| {
        Error::config(format!(
            "source '{}' has invalid selector '{selector}': {e}",
            source.name
        ))
    })
}

fn fetch_error(source: &SourceConfig, message: String) -> Error {
    Error::Fetch {
        name: source.name.clone(),
        url: source.url.clone(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ROW_SELECTOR;

    fn read_fixture(name: &str) -> String {
        std::fs::read_to_string(format!("src/tests/test_data/{name}"))
            .expect("Error reading test fixture")
    }

    #[test]
    fn test_parse_wetest_sample() {
        let html = read_fixture("wetest_sample.html");
        let rows = parse_table_rows(&html, "table", ROW_SELECTOR).expect("Error parsing table");
        assert_eq!(rows.len(), 6, "header row lives in thead and is skipped");
        assert_eq!(rows[0][0], "移动");
        assert_eq!(rows[0][1], "172.64.229.10");
        assert_eq!(rows[0].len(), 7);
    }

    #[test]
    fn test_parse_trims_cell_text() {
        let html = read_fixture("hostmonit_sample.html");
        let rows =
            parse_table_rows(&html, ROW_SELECTOR, ROW_SELECTOR).expect("Error parsing table");
        assert_eq!(rows[0][0], "CM");
        assert_eq!(rows[0][1], "104.19.33.7");
        assert!(rows.iter().flatten().all(|c| c.trim() == c));
    }

    #[test]
    fn test_parse_missing_ready_selector() {
        let html = "<html><body><p>loading...</p></body></html>";
        let err = parse_table_rows(html, "table tbody tr", ROW_SELECTOR)
            .expect_err("page without table should fail");
        assert!(err.contains("table tbody tr"), "unexpected message: {err}");
    }

    #[test]
    fn test_parse_invalid_selector() {
        assert!(parse_table_rows("<table></table>", "table[", ROW_SELECTOR).is_err());
    }

    #[test]
    fn test_parse_empty_table_is_ok() {
        let rows = parse_table_rows("<table><tbody></tbody></table>", "table", ROW_SELECTOR)
            .expect("empty table still loads");
        assert!(rows.is_empty());
    }

    #[test]
    fn test_new_rejects_invalid_selector() {
        let source = SourceConfig {
            row_selector: "tr[".to_string(),
            ..SourceConfig::wetest()
        };
        assert!(matches!(
            HtmlTableProvider::new(source),
            Err(Error::Config { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_is_fetch_error() {
        let source = SourceConfig {
            url: "http://127.0.0.1:9/none".to_string(),
            timeout_secs: 2,
            ..SourceConfig::wetest()
        };
        let provider = HtmlTableProvider::new(source).expect("Error building provider");
        let result = provider.fetch_rows().await;
        assert!(
            matches!(result, Err(Error::Fetch { ref name, .. }) if name == "wetest"),
            "expected fetch error, got {result:?}"
        );
    }
}
