//! Output of the merged carrier IPs.
//!
//! This module handles rendering and persisting the report:
//! - [`report`] - The plain text report document
//! - [`file`] - Threshold check and file write
//! - [`terminal`] - Run summary on the terminal

mod file;
mod report;
mod terminal;

pub use file::{check_total, write_report};
pub use report::{Report, Section};
pub use terminal::{format_field, print_summary};
