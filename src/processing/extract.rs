//! Per-source extraction of carrier/IP pairs from table rows.

use crate::models::{find_ip_candidate, is_ipv4, Carrier, CarrierIpMap, Row};

/// Turn the rows of one source into a [`CarrierIpMap`].
///
/// Cell 0 is the carrier label. A row is kept only if the label is recognised
/// and its address candidate passes [`is_ipv4`]; every other row is dropped
/// without error. Duplicates inside the source are kept, they are removed when
/// sources are merged.
pub fn extract_carrier_ips(rows: &[Row]) -> CarrierIpMap {
    let mut out = CarrierIpMap::new();
    let mut dropped = 0usize;

    for row in rows {
        let carrier = row.first().and_then(|label| Carrier::classify(label));
        let ip = find_ip_candidate(row).filter(|ip| is_ipv4(ip));
        match (carrier, ip) {
            (Some(carrier), Some(ip)) => out.push(carrier, ip),
            _ => {
                log::trace!("drop row {row:?}");
                dropped += 1;
            }
        }
    }

    log::debug!(
        "extracted {kept} of {rows} rows, dropped {dropped}",
        kept = out.total(),
        rows = rows.len()
    );
    out
}
