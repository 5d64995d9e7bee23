//! Country dataset loading.
//!
//! This module is responsible for turning the JSON dataset document into a
//! clean collection of [`Country`] records that are safe to filter and
//! render.
//!
//! Design goals:
//! - **One canonical document shape**: `{ "countries": [...] }`
//! - **Record-level validation** (skip bad records, but report what happened)
//! - **One fetch per load** — no retry, no cache, no background refresh
//! - **Total fallback path**: a failed load substitutes the embedded
//!   collection and carries the failure reason as a degraded notice

use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::data::fallback;
use crate::domain::{Complexity, Country, Region};
use crate::error::AppError;

/// Default dataset location, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/countries.json";

/// Environment variable overriding the default dataset location.
pub const DATA_URL_ENV: &str = "WHT_DATA_URL";

/// Where the dataset should be loaded from, before any fallback.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// A file path or an `http(s)` URL.
    pub location: String,
}

impl SourceConfig {
    /// Resolve the dataset location.
    ///
    /// Precedence: explicit flag, then `WHT_DATA_URL` (a `.env` file is
    /// honored), then [`DEFAULT_DATA_PATH`].
    pub fn resolve(flag: Option<String>) -> Self {
        dotenvy::dotenv().ok();
        let location = flag
            .or_else(|| std::env::var(DATA_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
        Self { location }
    }
}

/// Provenance of a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Remote(String),
    Embedded,
}

impl DataSource {
    pub fn describe(&self) -> String {
        match self {
            DataSource::File(path) => format!("{} (file)", path.display()),
            DataSource::Remote(url) => format!("{url} (remote)"),
            DataSource::Embedded => "embedded fallback data".to_string(),
        }
    }
}

/// A record-level error encountered during validation.
#[derive(Debug, Clone)]
pub struct RowError {
    /// Zero-based position of the record in the document.
    pub index: usize,
    pub id: Option<String>,
    pub message: String,
}

/// A loaded, validated country collection plus its provenance.
///
/// The collection is write-once: it is only ever replaced wholesale by
/// another load.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub countries: Vec<Country>,
    pub source: DataSource,
    pub fetched_at: DateTime<Utc>,
    pub row_errors: Vec<RowError>,
    /// Set when loading failed and the embedded collection was substituted.
    /// Carries the failure reason so every surface can render a visible
    /// degraded-state notice.
    pub degraded: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CountriesFile {
    countries: Vec<RawCountry>,
}

/// An unvalidated record as it appears in the document.
///
/// Region and complexity stay strings here so one bad record can be
/// skipped and reported without failing the whole document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCountry {
    #[serde(default)]
    code: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    flag: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    complexity: String,
    #[serde(default)]
    hours: String,
    #[serde(default)]
    implementations: u32,
    #[serde(default)]
    tax_types: Vec<String>,
    #[serde(default)]
    overview: String,
    #[serde(default)]
    considerations: Vec<String>,
}

/// Load and validate the dataset from the configured source.
pub fn load(config: &SourceConfig) -> Result<Dataset, AppError> {
    let (document, source) = if is_url(&config.location) {
        (
            fetch_document(&config.location)?,
            DataSource::Remote(config.location.clone()),
        )
    } else {
        let path = Path::new(&config.location);
        (read_document(path)?, DataSource::File(path.to_path_buf()))
    };

    let (countries, row_errors) = validate_records(document.countries);
    if countries.is_empty() {
        return Err(AppError::data(format!(
            "Dataset at {} contains no valid country records.",
            config.location
        )));
    }

    Ok(Dataset {
        countries,
        source,
        fetched_at: Utc::now(),
        row_errors,
        degraded: None,
    })
}

/// Load the dataset, substituting the embedded collection on any failure.
///
/// The failure reason is preserved in [`Dataset::degraded`]; callers must
/// render it, never swallow it.
pub fn load_or_fallback(config: &SourceConfig) -> Dataset {
    match load(config) {
        Ok(dataset) => dataset,
        Err(err) => Dataset {
            countries: fallback::embedded_countries(),
            source: DataSource::Embedded,
            fetched_at: Utc::now(),
            row_errors: Vec::new(),
            degraded: Some(err.to_string()),
        },
    }
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

fn fetch_document(url: &str) -> Result<CountriesFile, AppError> {
    let resp = Client::new()
        .get(url)
        .send()
        .map_err(|e| AppError::data(format!("Dataset request failed: {e}")))?;

    if !resp.status().is_success() {
        return Err(AppError::data(format!(
            "Dataset request failed with status {}.",
            resp.status()
        )));
    }

    resp.json()
        .map_err(|e| AppError::data(format!("Failed to parse dataset response: {e}")))
}

fn read_document(path: &Path) -> Result<CountriesFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open dataset '{}': {e}", path.display())))?;
    serde_json::from_reader(file)
        .map_err(|e| AppError::data(format!("Invalid dataset JSON '{}': {e}", path.display())))
}

/// Convert raw records into validated ones, skipping and reporting records
/// that are malformed or duplicate an earlier key.
fn validate_records(raw: Vec<RawCountry>) -> (Vec<Country>, Vec<RowError>) {
    let mut countries = Vec::with_capacity(raw.len());
    let mut row_errors = Vec::new();
    let mut seen_codes: HashSet<String> = HashSet::new();
    let mut seen_names: HashSet<String> = HashSet::new();

    for (index, record) in raw.into_iter().enumerate() {
        let id = (!record.code.is_empty()).then(|| record.code.clone());
        match convert_record(record, &mut seen_codes, &mut seen_names) {
            Ok(country) => countries.push(country),
            Err(message) => row_errors.push(RowError { index, id, message }),
        }
    }

    (countries, row_errors)
}

fn convert_record(
    record: RawCountry,
    seen_codes: &mut HashSet<String>,
    seen_names: &mut HashSet<String>,
) -> Result<Country, String> {
    let code = record.code.trim().to_string();
    if code.is_empty() {
        return Err("missing country code".to_string());
    }
    let name = record.name.trim().to_string();
    if name.is_empty() {
        return Err(format!("{code}: missing country name"));
    }

    let region = Region::parse(&record.region)
        .ok_or_else(|| format!("{code}: unknown region '{}'", record.region))?;
    let complexity = Complexity::parse(&record.complexity)
        .ok_or_else(|| format!("{code}: unknown complexity '{}'", record.complexity))?;

    if !seen_codes.insert(code.to_ascii_lowercase()) {
        return Err(format!("duplicate country code '{code}'"));
    }
    if !seen_names.insert(name.to_ascii_lowercase()) {
        return Err(format!("{code}: duplicate country name '{name}'"));
    }

    Ok(Country {
        code,
        name,
        flag: record.flag,
        region,
        complexity,
        hours: record.hours,
        implementations: record.implementations,
        tax_types: record.tax_types,
        overview: record.overview,
        considerations: record.considerations,
    })
}
