//! Row processing logic.
//!
//! This module contains the transformation from scraped rows to the merged result:
//! - [`extract`] - Per-source extraction of carrier/IP pairs
//! - [`dedup`] - Merging and de-duplication of per-source results

mod dedup;
mod extract;

// Re-export public functions
pub use dedup::merge_carrier_ips;
pub use extract::extract_carrier_ips;
