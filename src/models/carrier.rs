//! Carrier identifiers and label classification.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// One of the three recognised mobile carriers.
///
/// The derived ordering follows the default report order.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Carrier {
    Mobile,
    Unicom,
    Telecom,
}

/// Label patterns in priority order. Latin codes are case-insensitive.
static CARRIER_PATTERNS: OnceLock<Vec<(Carrier, Regex)>> = OnceLock::new();

fn get_carrier_patterns() -> &'static [(Carrier, Regex)] {
    CARRIER_PATTERNS.get_or_init(|| {
        vec![
            (
                Carrier::Mobile,
                Regex::new(r"移动|(?i:CMCC)").expect("Invalid Regex"),
            ),
            (
                Carrier::Unicom,
                Regex::new(r"联通|(?i:CUCC|UNICOM)").expect("Invalid Regex"),
            ),
            (
                Carrier::Telecom,
                Regex::new(r"电信|(?i:CTCC|TELECOM)").expect("Invalid Regex"),
            ),
        ]
    })
}

impl Carrier {
    /// All carriers in the default display order.
    pub const ALL: [Carrier; 3] = [Carrier::Mobile, Carrier::Unicom, Carrier::Telecom];

    /// Classify a raw label cell.
    ///
    /// Returns `None` for anything outside the three carriers; callers drop such
    /// rows silently. When several patterns match, the first in
    /// {Mobile, Unicom, Telecom} wins.
    ///
    /// # Examples
    /// ```
    /// use cf_carrier_ips::models::Carrier;
    /// assert_eq!(Carrier::classify(" 移动 "), Some(Carrier::Mobile));
    /// assert_eq!(Carrier::classify("ctcc"), Some(Carrier::Telecom));
    /// assert_eq!(Carrier::classify("多线"), None);
    /// ```
    pub fn classify(label: &str) -> Option<Carrier> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        get_carrier_patterns()
            .iter()
            .find(|(_, re)| re.is_match(label))
            .map(|(carrier, _)| *carrier)
    }

    /// Section title used in the report.
    pub fn label(&self) -> &'static str {
        match self {
            Carrier::Mobile => "移动",
            Carrier::Unicom => "联通",
            Carrier::Telecom => "电信",
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Accepts the English names plus anything [`Carrier::classify`] recognises.
impl FromStr for Carrier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mobile" => Ok(Carrier::Mobile),
            "unicom" => Ok(Carrier::Unicom),
            "telecom" => Ok(Carrier::Telecom),
            _ => Carrier::classify(s).ok_or_else(|| format!("unknown carrier '{}'", s.trim())),
        }
    }
}
