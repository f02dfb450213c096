//! Domain models for the carrier IP report.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Carrier`] - The three recognised mobile carriers and label classification
//! - [`ipv4`] - Syntactic IPv4 validation of scraped cells
//! - [`CarrierIpMap`] - Ordered IP lists grouped by carrier

mod carrier;
mod carrier_ip_map;
mod ipv4;

// Re-export public types
pub use carrier::Carrier;
pub use carrier_ip_map::CarrierIpMap;
pub use ipv4::{find_ip_candidate, is_ipv4, looks_like_ipv4};

/// One table body row of a source page, cell texts in column order.
pub type Row = Vec<String>;
