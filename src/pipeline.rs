//! Fetch, merge and report for one run.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{Carrier, CarrierIpMap};
use crate::output::{check_total, print_summary, write_report, Report};
use crate::processing::{extract_carrier_ips, merge_carrier_ips};
use crate::sources::{providers_from_config, RowProvider};
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use std::path::PathBuf;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// IP count per carrier, in display order.
    pub counts: Vec<(Carrier, usize)>,
    pub total: usize,
    /// `None` for a dry run.
    pub target: Option<PathBuf>,
}

/// Fetch every provider concurrently and extract its rows.
///
/// Results keep provider order. The first failure aborts the whole fetch.
pub async fn fetch_all(providers: &[Box<dyn RowProvider>]) -> Result<Vec<CarrierIpMap>> {
    let fetches = providers.iter().map(|provider| async move {
        let rows = provider.fetch_rows().await?;
        let map = extract_carrier_ips(&rows);
        log::info!(
            "{name}: {ips} usable IPs from {rows} rows",
            name = provider.name(),
            ips = map.total(),
            rows = rows.len()
        );
        Ok::<_, Error>(map)
    });
    try_join_all(fetches).await
}

/// Run against the sources named in `config`.
pub async fn run(config: &Config) -> Result<RunSummary> {
    let providers = providers_from_config(config)?;
    run_with_providers(config, &providers, Utc::now()).await
}

/// Run against explicit providers, stamping the report with `generated_at`.
///
/// Nothing is written unless every provider succeeds and the report holds at
/// least `config.min_total_ips` IPs.
pub async fn run_with_providers(
    config: &Config,
    providers: &[Box<dyn RowProvider>],
    generated_at: DateTime<Utc>,
) -> Result<RunSummary> {
    log::info!("#Start run() with {} sources", providers.len());

    let per_source = fetch_all(providers).await?;
    let merged = merge_carrier_ips(per_source);

    let report = Report::build(
        &merged,
        providers.iter().map(|p| p.url().to_string()).collect(),
        &config.carriers_order,
        config.top_n_per_carrier,
        generated_at,
    );

    let target = if config.dry_run {
        check_total(&report, config.min_total_ips)?;
        print!("{}", report.render());
        print_summary(&report, None);
        None
    } else {
        write_report(&report, &config.target_file, config.min_total_ips)?;
        print_summary(&report, Some(config.target_file.as_path()));
        Some(config.target_file.clone())
    };

    Ok(RunSummary {
        counts: report
            .sections
            .iter()
            .map(|s| (s.carrier, s.ips.len()))
            .collect(),
        total: report.total(),
        target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::StaticRowProvider;

    fn provider(name: &str, rows: &[&[&str]]) -> Box<dyn RowProvider> {
        Box::new(StaticRowProvider::from_cells(
            name,
            &format!("https://{name}.test"),
            rows,
        ))
    }

    #[tokio::test]
    async fn test_fetch_all_keeps_provider_order() {
        let providers = vec![
            provider("a", &[&["移动", "1.1.1.1"]]),
            provider("b", &[&["移动", "2.2.2.2"], &["多线", "3.3.3.3"]]),
        ];
        let maps = fetch_all(&providers).await.expect("Error fetching");
        assert_eq!(maps.len(), 2);
        assert_eq!(maps[0].get(Carrier::Mobile), ["1.1.1.1"]);
        assert_eq!(maps[1].get(Carrier::Mobile), ["2.2.2.2"]);
    }

    #[tokio::test]
    async fn test_fetch_all_fails_if_any_provider_fails() {
        let providers: Vec<Box<dyn RowProvider>> = vec![
            provider("a", &[&["移动", "1.1.1.1"]]),
            Box::new(StaticRowProvider::failing("b", "https://b.test", "timeout")),
        ];
        let result = fetch_all(&providers).await;
        assert!(matches!(result, Err(Error::Fetch { ref name, .. }) if name == "b"));
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let target = std::env::temp_dir().join(format!(
            "cf_carrier_ips_dry_run_{}/ips.txt",
            std::process::id()
        ));
        let config = Config {
            target_file: target.clone(),
            dry_run: true,
            ..Config::default()
        };
        let providers = vec![provider(
            "a",
            &[
                &["移动", "1.0.0.1"],
                &["移动", "1.0.0.2"],
                &["联通", "2.0.0.1"],
                &["电信", "3.0.0.1"],
                &["电信", "3.0.0.2"],
            ],
        )];
        let summary = run_with_providers(&config, &providers, Utc::now())
            .await
            .expect("dry run should succeed");
        assert_eq!(summary.total, 5);
        assert_eq!(summary.target, None);
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_dry_run_still_checks_minimum() {
        let config = Config {
            dry_run: true,
            ..Config::default()
        };
        let providers = vec![provider("a", &[&["移动", "1.0.0.1"]])];
        let result = run_with_providers(&config, &providers, Utc::now()).await;
        assert!(matches!(result, Err(Error::InsufficientData { total: 1, .. })));
    }
}
