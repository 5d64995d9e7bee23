//! Country filtering and lookup.
//!
//! The three criteria (region, complexity, search term) compose as a
//! conjunction. Filtering never reorders records: the result is always a
//! subsequence of the dataset in its original order.

use crate::domain::{Complexity, Country, Region};

/// The active selection criteria. `None`/empty means "all".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryFilter {
    pub region: Option<Region>,
    pub complexity: Option<Complexity>,
    /// Free-text term, matched case-insensitively as a substring of the
    /// name, the region label, or any tax-type entry.
    pub search: String,
}

impl CountryFilter {
    pub fn is_empty(&self) -> bool {
        self.region.is_none() && self.complexity.is_none() && self.search.trim().is_empty()
    }

    /// Indices of the records satisfying every active criterion, in
    /// dataset order.
    pub fn apply_indices(&self, countries: &[Country]) -> Vec<usize> {
        let term = self.search.trim().to_lowercase();
        countries
            .iter()
            .enumerate()
            .filter(|(_, country)| self.matches(country, &term))
            .map(|(index, _)| index)
            .collect()
    }

    /// References to the records satisfying every active criterion.
    pub fn apply<'a>(&self, countries: &'a [Country]) -> Vec<&'a Country> {
        self.apply_indices(countries)
            .into_iter()
            .map(|index| &countries[index])
            .collect()
    }

    fn matches(&self, country: &Country, term: &str) -> bool {
        if let Some(region) = self.region {
            if country.region != region {
                return false;
            }
        }

        if let Some(tier) = self.complexity {
            if country.complexity != tier {
                return false;
            }
        }

        if !term.is_empty() {
            let in_name = country.name.to_lowercase().contains(term);
            let in_region = country.region.display_name().to_lowercase().contains(term);
            let in_tax_types = country
                .tax_types
                .iter()
                .any(|tax| tax.to_lowercase().contains(term));
            if !(in_name || in_region || in_tax_types) {
                return false;
            }
        }

        true
    }

    /// One-line summary of the active criteria for headers and status lines.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(region) = self.region {
            parts.push(format!("region={}", region.display_name()));
        }
        if let Some(tier) = self.complexity {
            parts.push(format!("complexity={}", tier.display_name()));
        }
        let term = self.search.trim();
        if !term.is_empty() {
            parts.push(format!("search=\"{term}\""));
        }
        if parts.is_empty() {
            "none".to_string()
        } else {
            parts.join("  ")
        }
    }
}

/// Look up a record by its detail-view key (country code or name).
///
/// An exact code match wins, then a case-insensitive code match, then a
/// case-insensitive name match. A miss returns `None`; callers render a
/// visible "not found" state.
pub fn find<'a>(countries: &'a [Country], key: &str) -> Option<&'a Country> {
    let key = key.trim();
    countries
        .iter()
        .find(|country| country.code == key)
        .or_else(|| {
            countries
                .iter()
                .find(|country| country.code.eq_ignore_ascii_case(key))
        })
        .or_else(|| {
            countries
                .iter()
                .find(|country| country.name.eq_ignore_ascii_case(key))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fallback::embedded_countries;

    fn names(matched: &[&Country]) -> Vec<String> {
        matched.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn empty_filter_passes_everything_in_order() {
        let countries = embedded_countries();
        let filter = CountryFilter::default();
        let matched = filter.apply(&countries);
        assert_eq!(matched.len(), countries.len());
        for (got, want) in matched.iter().zip(countries.iter()) {
            assert_eq!(got.code, want.code);
        }
    }

    #[test]
    fn region_apj_yields_india_china_australia() {
        let countries = embedded_countries();
        let filter = CountryFilter {
            region: Some(Region::Apj),
            ..CountryFilter::default()
        };
        assert_eq!(names(&filter.apply(&countries)), vec!["India", "China", "Australia"]);
    }

    #[test]
    fn complexity_high_yields_india_brazil_china() {
        let countries = embedded_countries();
        let filter = CountryFilter {
            complexity: Complexity::parse("high"),
            ..CountryFilter::default()
        };
        assert_eq!(names(&filter.apply(&countries)), vec!["India", "Brazil", "China"]);
    }

    #[test]
    fn search_tds_matches_tax_type_substring() {
        let countries = embedded_countries();
        let filter = CountryFilter {
            search: "TDS".to_string(),
            ..CountryFilter::default()
        };
        assert_eq!(names(&filter.apply(&countries)), vec!["India"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let countries = embedded_countries();
        let lower = CountryFilter {
            search: "india".to_string(),
            ..CountryFilter::default()
        };
        let upper = CountryFilter {
            search: "INDIA".to_string(),
            ..CountryFilter::default()
        };
        assert_eq!(
            names(&lower.apply(&countries)),
            names(&upper.apply(&countries))
        );
        assert_eq!(names(&lower.apply(&countries)), vec!["India"]);
    }

    #[test]
    fn search_matches_region_label() {
        let countries = embedded_countries();
        let filter = CountryFilter {
            search: "latam".to_string(),
            ..CountryFilter::default()
        };
        assert_eq!(names(&filter.apply(&countries)), vec!["Brazil", "Mexico"]);
    }

    #[test]
    fn criteria_compose_as_a_conjunction() {
        let countries = embedded_countries();
        let filter = CountryFilter {
            region: Some(Region::Apj),
            complexity: Some(Complexity::High),
            search: "tds".to_string(),
        };
        let matched = filter.apply(&countries);
        assert_eq!(names(&matched), vec!["India"]);
        for country in matched {
            assert_eq!(country.region, Region::Apj);
            assert_eq!(country.complexity, Complexity::High);
            assert!(country.tax_types.iter().any(|t| t.to_lowercase().contains("tds")));
        }

        // Tightening one criterion can only shrink the result.
        let loose = CountryFilter {
            region: Some(Region::Apj),
            ..CountryFilter::default()
        };
        assert!(loose.apply(&countries).len() >= 1);
    }

    #[test]
    fn conjunction_with_disjoint_criteria_is_empty() {
        let countries = embedded_countries();
        let filter = CountryFilter {
            region: Some(Region::Emea),
            search: "TDS".to_string(),
            ..CountryFilter::default()
        };
        assert!(filter.apply(&countries).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let countries = embedded_countries();
        let filter = CountryFilter {
            region: Some(Region::Apj),
            complexity: Some(Complexity::High),
            ..CountryFilter::default()
        };
        let first = filter.apply_indices(&countries);
        let second = filter.apply_indices(&countries);
        assert_eq!(first, second);
    }

    #[test]
    fn find_matches_code_then_name() {
        let countries = embedded_countries();
        assert_eq!(find(&countries, "IN").map(|c| c.name.as_str()), Some("India"));
        assert_eq!(find(&countries, "in").map(|c| c.name.as_str()), Some("India"));
        assert_eq!(find(&countries, "india").map(|c| c.name.as_str()), Some("India"));
        assert_eq!(
            find(&countries, "United Kingdom").map(|c| c.code.as_str()),
            Some("GB")
        );
    }

    #[test]
    fn find_miss_is_none_not_a_panic() {
        let countries = embedded_countries();
        assert!(find(&countries, "ZZ").is_none());
        assert!(find(&countries, "").is_none());
    }

    #[test]
    fn describe_summarizes_active_criteria() {
        let filter = CountryFilter {
            region: Some(Region::Apj),
            complexity: Some(Complexity::High),
            search: " tds ".to_string(),
        };
        let summary = filter.describe();
        assert!(summary.contains("region=APJ"));
        assert!(summary.contains("complexity=High"));
        assert!(summary.contains("search=\"tds\""));
        assert_eq!(CountryFilter::default().describe(), "none");
    }
}
