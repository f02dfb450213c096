//! Ordered IP lists grouped by carrier.

use super::Carrier;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from [`Carrier`] to the IP strings seen for it, in first-seen order.
///
/// Lists are compared as strings, so `1.1.1.1` and `1.1.1.001` are distinct.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct CarrierIpMap {
    ips: BTreeMap<Carrier, Vec<String>>,
}

impl CarrierIpMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding an empty list for every carrier.
    pub fn with_all_carriers() -> Self {
        CarrierIpMap {
            ips: Carrier::ALL.iter().map(|c| (*c, Vec::new())).collect(),
        }
    }

    /// Append `ip` to the list of `carrier`. Duplicates are kept.
    pub fn push(&mut self, carrier: Carrier, ip: impl Into<String>) {
        self.ips.entry(carrier).or_default().push(ip.into());
    }

    /// Append every list of `other` after the matching list of `self`.
    pub fn extend_from(&mut self, other: CarrierIpMap) {
        for (carrier, ips) in other.ips {
            self.ips.entry(carrier).or_default().extend(ips);
        }
    }

    /// Drop repeated IPs in every list, keeping the first occurrence.
    pub fn dedup(&mut self) {
        for ips in self.ips.values_mut() {
            let unique = std::mem::take(ips).into_iter().unique().collect();
            *ips = unique;
        }
    }

    /// IPs of `carrier`; empty if the carrier was never seen.
    pub fn get(&self, carrier: Carrier) -> &[String] {
        self.ips.get(&carrier).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_carrier(&self, carrier: Carrier) -> bool {
        self.ips.contains_key(&carrier)
    }

    /// Number of IPs over all carriers.
    pub fn total(&self) -> usize {
        self.ips.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Carrier, &[String])> {
        self.ips.iter().map(|(c, ips)| (*c, ips.as_slice()))
    }
}
