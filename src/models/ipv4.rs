//! IPv4 detection for scraped table cells.
//!
//! Validation is purely syntactic: four dot separated groups of 1-3 ASCII
//! digits, each in `0..=255`. Leading zeros are accepted, so `192.168.001.001`
//! is valid and kept as a distinct string from `192.168.1.1`.

use crate::models::Row;
use regex::Regex;
use std::sync::OnceLock;

/// Dotted quad shape without range checking.
static IPV4_SHAPE: OnceLock<Regex> = OnceLock::new();

fn get_ipv4_shape() -> &'static Regex {
    IPV4_SHAPE.get_or_init(|| Regex::new(r"^([0-9]{1,3}\.){3}[0-9]{1,3}$").expect("Invalid Regex"))
}

/// True if `token` has the dotted quad shape, whatever the group values.
pub fn looks_like_ipv4(token: &str) -> bool {
    get_ipv4_shape().is_match(token)
}

/// True if `token` is a dotted quad with every group in `0..=255`.
///
/// # Examples
/// ```
/// use cf_carrier_ips::models::is_ipv4;
/// assert!(is_ipv4("104.16.1.1"));
/// assert!(is_ipv4("192.168.001.001"));
/// assert!(!is_ipv4("256.1.1.1"));
/// ```
pub fn is_ipv4(token: &str) -> bool {
    looks_like_ipv4(token)
        && token
            .split('.')
            .all(|group| group.parse::<u16>().map_or(false, |n| n <= 255))
}

/// Pick the address candidate of a row.
///
/// The first cell with the dotted quad shape wins, even if it is out of range.
/// Without one, cell 1 is returned as is so the caller's validation rejects
/// the row.
pub fn find_ip_candidate(row: &Row) -> Option<&str> {
    row.iter()
        .map(String::as_str)
        .find(|cell| looks_like_ipv4(cell))
        .or_else(|| row.get(1).map(String::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_is_ipv4_valid() {
        assert!(is_ipv4("0.0.0.0"));
        assert!(is_ipv4("255.255.255.255"));
        assert!(is_ipv4("172.64.33.1"));
    }

    #[test]
    fn test_is_ipv4_leading_zeros_accepted() {
        assert!(is_ipv4("192.168.001.1"));
        assert!(is_ipv4("192.168.001.001"));
        assert!(is_ipv4("000.000.000.000"));
    }

    #[test]
    fn test_is_ipv4_out_of_range() {
        assert!(!is_ipv4("256.0.0.1"));
        assert!(!is_ipv4("1.2.3.999"));
        assert!(looks_like_ipv4("1.2.3.999"), "shape alone does not check range");
    }

    #[test]
    fn test_is_ipv4_wrong_group_count() {
        assert!(!is_ipv4("1.2.3"));
        assert!(!is_ipv4("1.2.3.4.5"));
        assert!(!is_ipv4(""));
        assert!(!is_ipv4("1.2.3."));
        assert!(!is_ipv4("1..2.3"));
    }

    #[test]
    fn test_is_ipv4_rejects_noise() {
        assert!(!is_ipv4(" 1.2.3.4"));
        assert!(!is_ipv4("1.2.3.4/24"));
        assert!(!is_ipv4("1.2.3.1234"));
        assert!(!is_ipv4("a.b.c.d"));
        assert!(!is_ipv4("2606:4700::1"));
        assert!(!is_ipv4("١.٢.٣.٤"), "only ASCII digits count");
    }

    #[test]
    fn test_find_ip_candidate_scans_all_cells() {
        let r = row(&["电信", "12ms", "0.00%", "104.16.5.5", "SJC"]);
        assert_eq!(find_ip_candidate(&r), Some("104.16.5.5"));
    }

    #[test]
    fn test_find_ip_candidate_first_shape_wins() {
        let r = row(&["移动", "300.1.1.1", "1.1.1.1"]);
        assert_eq!(find_ip_candidate(&r), Some("300.1.1.1"));
    }

    #[test]
    fn test_find_ip_candidate_fallback_to_cell_one() {
        let r = row(&["联通", "n/a", "fast"]);
        assert_eq!(find_ip_candidate(&r), Some("n/a"));
        assert_eq!(find_ip_candidate(&row(&["联通"])), None);
    }
}
