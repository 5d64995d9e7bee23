//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - held in-memory for filtering and lookup
//! - round-tripped through the JSON dataset document
//! - emitted directly for `--output json`

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Geographic region grouping.
///
/// The JSON spellings are the canonical ones used by the dataset document
/// (`"Americas"`, `"EMEA"`, `"APJ"`, `"LATAM"`); user input is accepted
/// case-insensitively via [`Region::parse`] and the CLI value enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Region {
    Americas,
    #[serde(rename = "EMEA")]
    Emea,
    #[serde(rename = "APJ")]
    Apj,
    #[serde(rename = "LATAM")]
    Latam,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Americas, Region::Emea, Region::Apj, Region::Latam];

    /// Canonical label for display and search matching.
    pub fn display_name(self) -> &'static str {
        match self {
            Region::Americas => "Americas",
            Region::Emea => "EMEA",
            Region::Apj => "APJ",
            Region::Latam => "LATAM",
        }
    }

    /// Parse a user- or dataset-supplied spelling (case-insensitive).
    pub fn parse(label: &str) -> Option<Region> {
        Region::ALL
            .into_iter()
            .find(|region| region.display_name().eq_ignore_ascii_case(label.trim()))
    }

    pub fn next(self) -> Region {
        match self {
            Region::Americas => Region::Emea,
            Region::Emea => Region::Apj,
            Region::Apj => Region::Latam,
            Region::Latam => Region::Americas,
        }
    }

    pub fn prev(self) -> Region {
        match self {
            Region::Americas => Region::Latam,
            Region::Emea => Region::Americas,
            Region::Apj => Region::Emea,
            Region::Latam => Region::Apj,
        }
    }
}

/// Implementation-complexity tier assigned to a country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    pub const ALL: [Complexity; 3] = [Complexity::Low, Complexity::Medium, Complexity::High];

    pub fn display_name(self) -> &'static str {
        match self {
            Complexity::Low => "Low",
            Complexity::Medium => "Medium",
            Complexity::High => "High",
        }
    }

    /// Parse a user- or dataset-supplied spelling (case-insensitive).
    pub fn parse(label: &str) -> Option<Complexity> {
        Complexity::ALL
            .into_iter()
            .find(|tier| tier.display_name().eq_ignore_ascii_case(label.trim()))
    }

    pub fn next(self) -> Complexity {
        match self {
            Complexity::Low => Complexity::Medium,
            Complexity::Medium => Complexity::High,
            Complexity::High => Complexity::Low,
        }
    }
}

/// A validated withholding-tax country record.
///
/// `code` and `name` are unique within a loaded dataset (enforced by the
/// loader) and both serve as detail-view lookup keys. The collection a
/// record belongs to is immutable after load; reloading replaces it
/// wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub flag: String,
    pub region: Region,
    pub complexity: Complexity,
    /// Estimated implementation effort as a display range, e.g. "80-120".
    pub hours: String,
    pub implementations: u32,
    pub tax_types: Vec<String>,
    pub overview: String,
    pub considerations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_parse_is_case_insensitive() {
        assert_eq!(Region::parse("apj"), Some(Region::Apj));
        assert_eq!(Region::parse("APJ"), Some(Region::Apj));
        assert_eq!(Region::parse(" emea "), Some(Region::Emea));
        assert_eq!(Region::parse("Americas"), Some(Region::Americas));
        assert_eq!(Region::parse("Atlantis"), None);
    }

    #[test]
    fn complexity_parse_is_case_insensitive() {
        assert_eq!(Complexity::parse("high"), Some(Complexity::High));
        assert_eq!(Complexity::parse("HIGH"), Some(Complexity::High));
        assert_eq!(Complexity::parse("Medium"), Some(Complexity::Medium));
        assert_eq!(Complexity::parse("extreme"), None);
    }

    #[test]
    fn region_cycle_covers_all_variants() {
        let mut region = Region::Americas;
        let mut seen = Vec::new();
        for _ in 0..Region::ALL.len() {
            seen.push(region);
            region = region.next();
        }
        assert_eq!(region, Region::Americas);
        assert_eq!(seen, Region::ALL.to_vec());

        for region in Region::ALL {
            assert_eq!(region.next().prev(), region);
        }
    }

    #[test]
    fn region_serde_uses_canonical_spellings() {
        let json = serde_json::to_string(&Region::Latam).unwrap();
        assert_eq!(json, "\"LATAM\"");
        let region: Region = serde_json::from_str("\"EMEA\"").unwrap();
        assert_eq!(region, Region::Emea);
    }
}
