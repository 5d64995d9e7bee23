//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the loading/filtering code stays clean and testable
//! - output changes are localized

use crate::data::Dataset;
use crate::domain::{Country, Region};
use crate::error::AppError;
use crate::query::CountryFilter;
use crate::report::CountryRow;

/// Shown whenever a filter combination matches nothing.
pub const NO_MATCHES: &str = "No countries match the current filters.";

/// Format the dataset summary header (provenance + counts + active filters).
pub fn format_dataset_summary(dataset: &Dataset, filter: &CountryFilter, shown: usize) -> String {
    let mut out = String::new();

    out.push_str("=== wht - WHT Country Atlas ===\n");
    out.push_str(&format!("Source: {}\n", dataset.source.describe()));
    out.push_str(&format!(
        "As-of: {}\n",
        dataset.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!(
        "Countries: {} loaded | {} shown | filters: {}\n",
        dataset.countries.len(),
        shown,
        filter.describe()
    ));

    if !dataset.row_errors.is_empty() {
        out.push_str(&format!(
            "Skipped {} invalid record(s) during load:\n",
            dataset.row_errors.len()
        ));
        for row_error in &dataset.row_errors {
            out.push_str(&format!(
                "  record {}: {}\n",
                row_error.index, row_error.message
            ));
        }
    }

    if let Some(reason) = &dataset.degraded {
        out.push_str(&format!(
            "DEGRADED: {reason} Showing the embedded fallback collection instead.\n"
        ));
    }

    out
}

/// Format the filtered country table.
pub fn format_country_table(rows: &[CountryRow]) -> String {
    if rows.is_empty() {
        return format!("{NO_MATCHES}\n");
    }

    let headers = ["CODE", "COUNTRY", "REGION", "COMPLEXITY", "HOURS", "IMPLS"];
    let data: Vec<[String; 6]> = rows
        .iter()
        .map(|row| {
            [
                row.code.clone(),
                row.name.clone(),
                row.region.to_string(),
                row.complexity.to_string(),
                row.hours.clone(),
                row.implementations.to_string(),
            ]
        })
        .collect();

    // Column widths for alignment.
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            data.iter()
                .map(|row| row[idx].len())
                .max()
                .unwrap_or(0)
                .max(header.len())
        })
        .collect();

    let mut out = String::new();
    for (header, width) in headers.iter().zip(&widths) {
        out.push_str(&format!("{header:<width$}  "));
    }
    out.push('\n');
    for width in &widths {
        out.push_str(&format!("{:-<width$}  ", ""));
    }
    out.push('\n');

    for row in &data {
        for (value, width) in row.iter().zip(&widths) {
            out.push_str(&format!("{value:<width$}  "));
        }
        out.push('\n');
    }

    out
}

/// Format the full detail view for one country.
pub fn format_country_detail(country: &Country) -> String {
    let mut out = String::new();

    let flag = if country.flag.is_empty() {
        String::new()
    } else {
        format!("{} ", country.flag)
    };
    out.push_str(&format!("=== {flag}{} ({}) ===\n", country.name, country.code));
    out.push_str(&format!(
        "Region: {} | Complexity: {}\n",
        country.region.display_name(),
        country.complexity.display_name()
    ));
    out.push_str(&format!(
        "Estimated hours: {} | Implementations: {}\n",
        country.hours, country.implementations
    ));

    out.push_str("\nOverview:\n");
    out.push_str(&format!("{}\n", country.overview));

    out.push_str("\nPrimary withholding tax types:\n");
    for tax in &country.tax_types {
        out.push_str(&format!("- {tax}\n"));
    }

    out.push_str("\nKey implementation considerations:\n");
    for item in &country.considerations {
        out.push_str(&format!("- {item}\n"));
    }

    out
}

/// Format the per-region roster (region label + record count).
pub fn format_region_roster(countries: &[Country]) -> String {
    let mut out = String::new();
    for region in Region::ALL {
        let count = countries
            .iter()
            .filter(|country| country.region == region)
            .count();
        let plural = if count == 1 { "country" } else { "countries" };
        out.push_str(&format!("{:<10} {count} {plural}\n", region.display_name()));
    }
    out
}

/// Serialize filtered records as pretty JSON for scripting.
pub fn format_countries_json(countries: &[&Country]) -> Result<String, AppError> {
    serde_json::to_string_pretty(countries)
        .map_err(|e| AppError::data(format!("Failed to render JSON output: {e}")))
}

/// Format display rows as CSV for scripting.
pub fn format_rows_csv(rows: &[CountryRow]) -> String {
    let mut out = String::new();
    out.push_str("code,name,region,complexity,hours,implementations\n");
    for row in rows {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            csv_escape(&row.code),
            csv_escape(&row.name),
            csv_escape(row.region),
            csv_escape(row.complexity),
            csv_escape(&row.hours),
            row.implementations
        ));
    }
    out
}

fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fallback::embedded_countries;
    use crate::data::{DataSource, Dataset};
    use crate::report::rows;

    fn dataset() -> Dataset {
        Dataset {
            countries: embedded_countries(),
            source: DataSource::Embedded,
            fetched_at: chrono::Utc::now(),
            row_errors: Vec::new(),
            degraded: None,
        }
    }

    #[test]
    fn summary_includes_counts_and_filters() {
        let dataset = dataset();
        let filter = CountryFilter {
            region: Some(Region::Apj),
            ..CountryFilter::default()
        };
        let summary = format_dataset_summary(&dataset, &filter, 3);
        assert!(summary.contains("10 loaded"));
        assert!(summary.contains("3 shown"));
        assert!(summary.contains("region=APJ"));
        assert!(summary.contains("embedded fallback data"));
        assert!(!summary.contains("DEGRADED"));
    }

    #[test]
    fn summary_surfaces_degraded_state() {
        let mut dataset = dataset();
        dataset.degraded = Some("Dataset request failed: connection refused.".to_string());
        let summary = format_dataset_summary(&dataset, &CountryFilter::default(), 10);
        assert!(summary.contains("DEGRADED: Dataset request failed"));
    }

    #[test]
    fn empty_table_renders_no_matches_line() {
        let table = format_country_table(&[]);
        assert_eq!(table, format!("{NO_MATCHES}\n"));
    }

    #[test]
    fn table_aligns_headers_and_rows() {
        let countries = embedded_countries();
        let table = format_country_table(&rows(&countries));
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("CODE"));
        assert!(lines[0].contains("COMPLEXITY"));
        assert_eq!(lines.len(), 2 + countries.len());
        assert!(lines.iter().any(|line| line.contains("United States")));
    }

    #[test]
    fn detail_lists_tax_types_and_considerations() {
        let countries = embedded_countries();
        let india = countries.iter().find(|c| c.code == "IN").unwrap();
        let detail = format_country_detail(india);
        assert!(detail.contains("India (IN)"));
        assert!(detail.contains("Region: APJ | Complexity: High"));
        assert!(detail.contains("- TDS Section 194J (10%)"));
        assert!(detail.contains("- PAN validation requirements"));
    }

    #[test]
    fn region_roster_counts_fallback_collection() {
        let countries = embedded_countries();
        let roster = format_region_roster(&countries);
        assert!(roster.contains("Americas"));
        assert!(roster.lines().any(|l| l.starts_with("APJ") && l.contains("3 countries")));
        assert!(roster.lines().any(|l| l.starts_with("LATAM") && l.contains("2 countries")));
    }

    #[test]
    fn csv_output_has_header_and_one_line_per_row() {
        let countries = embedded_countries();
        let csv = format_rows_csv(&rows(&countries));
        assert!(csv.starts_with("code,name,region,complexity"));
        assert_eq!(csv.lines().count(), 1 + countries.len());
    }

    #[test]
    fn csv_escape_quotes_values_with_commas() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a, b"), "\"a, b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn json_output_round_trips() {
        let countries = embedded_countries();
        let selected: Vec<&Country> = countries.iter().take(2).collect();
        let json = format_countries_json(&selected).unwrap();
        let parsed: Vec<Country> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].code, "US");
    }
}
