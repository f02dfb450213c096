//! The plain text report document.

use crate::models::{Carrier, CarrierIpMap};
use chrono::{DateTime, SecondsFormat, Utc};

/// One carrier block of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub carrier: Carrier,
    pub ips: Vec<String>,
}

/// Rendered form of a merged [`CarrierIpMap`] with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Source URLs, in merge order.
    pub sources: Vec<String>,
    pub generated_at: DateTime<Utc>,
    /// One section per carrier, in display order.
    pub sections: Vec<Section>,
}

impl Report {
    /// Lay out `merged` in `order`, keeping at most `top_n` IPs per carrier.
    ///
    /// `top_n == 0` keeps everything. Carriers without IPs still get a section.
    pub fn build(
        merged: &CarrierIpMap,
        sources: Vec<String>,
        order: &[Carrier],
        top_n: usize,
        generated_at: DateTime<Utc>,
    ) -> Report {
        let sections = order
            .iter()
            .map(|carrier| {
                let ips = merged.get(*carrier);
                let picked = if top_n > 0 && ips.len() > top_n {
                    log::debug!("{carrier}: cap {} IPs to {top_n}", ips.len());
                    &ips[..top_n]
                } else {
                    ips
                };
                Section {
                    carrier: *carrier,
                    ips: picked.to_vec(),
                }
            })
            .collect();

        Report {
            sources,
            generated_at,
            sections,
        }
    }

    /// Number of IPs over all sections, after capping.
    pub fn total(&self) -> usize {
        self.sections.iter().map(|s| s.ips.len()).sum()
    }

    /// Render the document. Every section is followed by an empty line.
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        lines.push("# Sources:".to_string());
        lines.extend(self.sources.iter().map(|url| format!("# - {url}")));
        lines.push(format!(
            "# Updated (UTC): {}",
            self.generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
        ));
        lines.push(String::new());

        for section in &self.sections {
            lines.push(format!("## {} ({})", section.carrier, section.ips.len()));
            lines.extend(section.ips.iter().cloned());
            lines.push(String::new());
        }
        lines.join("\n")
    }
}
