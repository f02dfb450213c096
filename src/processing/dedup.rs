//! Merging of per-source results.
//!
//! Handles concatenation of source lists and removal of repeated IPs.

use crate::models::CarrierIpMap;
use itertools::Itertools;

/// Merge per-source maps in the order given.
///
/// Each carrier list is the concatenation of the source lists, de-duplicated
/// keeping the first occurrence. Every [`crate::models::Carrier`] is present in the result,
/// with an empty list if no source had it.
///
/// # Arguments
/// * `sources` - Per-source maps, in source processing order
pub fn merge_carrier_ips<I>(sources: I) -> CarrierIpMap
where
    I: IntoIterator<Item = CarrierIpMap>,
{
    let mut merged = CarrierIpMap::with_all_carriers();
    for source in sources {
        merged.extend_from(source);
    }
    let before = merged.total();
    merged.dedup();

    log::info!(
        "merged {before} IPs into {after} unique ({counts})",
        after = merged.total(),
        counts = merged
            .iter()
            .map(|(carrier, ips)| format!("{carrier}={}", ips.len()))
            .join(", ")
    );
    merged
}
