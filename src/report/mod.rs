//! Report building: view-model rows and formatted terminal output.
//!
//! Data transformation (records → display rows) is kept separate from the
//! string formatting so the mapping stays a pure, testable function.

pub mod format;

pub use format::{
    format_countries_json, format_country_detail, format_country_table, format_dataset_summary,
    format_region_roster, format_rows_csv,
};

use crate::domain::Country;

/// Flat display row derived from a [`Country`] for list surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRow {
    pub code: String,
    pub name: String,
    pub flag: String,
    pub region: &'static str,
    pub complexity: &'static str,
    pub hours: String,
    pub implementations: u32,
}

impl CountryRow {
    pub fn from_country(country: &Country) -> Self {
        Self {
            code: country.code.clone(),
            name: country.name.clone(),
            flag: country.flag.clone(),
            region: country.region.display_name(),
            complexity: country.complexity.display_name(),
            hours: country.hours.clone(),
            implementations: country.implementations,
        }
    }
}

/// Map filtered records to display rows, preserving order.
pub fn rows<'a>(countries: impl IntoIterator<Item = &'a Country>) -> Vec<CountryRow> {
    countries.into_iter().map(CountryRow::from_country).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fallback::embedded_countries;

    #[test]
    fn rows_preserve_order_and_fields() {
        let countries = embedded_countries();
        let rows = rows(&countries);
        assert_eq!(rows.len(), countries.len());
        assert_eq!(rows[0].code, "US");
        assert_eq!(rows[1].name, "India");
        assert_eq!(rows[1].region, "APJ");
        assert_eq!(rows[1].complexity, "High");
        assert_eq!(rows[1].implementations, 15);
    }
}
