//! Command-line parsing for the WHT country atlas.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the loading/filtering code.

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::{Complexity, Region};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "wht", version, about = "Withholding-tax country compliance atlas")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List countries matching the active filters.
    List(ListArgs),
    /// Show the full compliance detail for one country.
    Show(ShowArgs),
    /// Summarize the dataset by region.
    Regions(SourceArgs),
    /// Launch the interactive browser.
    ///
    /// This uses the same loading and filtering as `wht list`, but renders
    /// the collection in a terminal UI using Ratatui.
    Tui(ListArgs),
}

/// Dataset source options shared by every subcommand.
#[derive(Debug, Parser, Clone, Default)]
pub struct SourceArgs {
    /// Dataset location: a JSON file path or an http(s) URL
    /// (default: $WHT_DATA_URL, then data/countries.json).
    #[arg(long, value_name = "PATH_OR_URL")]
    pub data: Option<String>,
}

/// Common options for listing and browsing.
#[derive(Debug, Parser, Clone, Default)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Keep only countries in this region.
    #[arg(short = 'r', long, value_enum, ignore_case = true)]
    pub region: Option<Region>,

    /// Keep only countries in this complexity tier.
    #[arg(short = 'c', long, value_enum, ignore_case = true)]
    pub complexity: Option<Complexity>,

    /// Case-insensitive substring match on name, region, or tax types.
    #[arg(short = 's', long, default_value = "")]
    pub search: String,

    /// Show at most N rows (0 = unlimited).
    #[arg(long, default_value_t = 0, value_name = "N")]
    pub limit: usize,

    /// Output format (table for humans, json/csv for scripting).
    #[arg(long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

/// Options for the detail view.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Country code or name.
    pub country: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Supported list output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
        })
    }
}
