//! Terminal output utilities.
//!
//! Provides the run summary printed after a report is written.

use super::Report;
use colored::Colorize;
use std::path::Path;

/// Format a value as a right-aligned field of at least `width` chars.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    format!("{value_str:>width$}")
}

/// Print the per-carrier counts and the destination of `report`.
///
/// `target` is `None` for a dry run.
pub fn print_summary(report: &Report, target: Option<&Path>) {
    for section in &report.sections {
        let count = format_field(section.ips.len(), 5);
        let count = if section.ips.is_empty() {
            count.red()
        } else {
            count.green()
        };
        println!("{carrier} {count}", carrier = section.carrier);
    }
    match target {
        Some(path) => println!(
            "Wrote {total} IPs -> {path}",
            total = report.total().to_string().bold(),
            path = path.display()
        ),
        None => println!(
            "{} {total} IPs not written",
            "DRY RUN".on_yellow(),
            total = report.total()
        ),
    }
}
