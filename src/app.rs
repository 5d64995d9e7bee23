//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the country dataset (with the embedded fallback)
//! - applies filters and prints reports
//! - launches the interactive browser

use clap::Parser;

use crate::cli::{Command, ListArgs, OutputFormat, ShowArgs, SourceArgs};
use crate::error::AppError;
use crate::query;
use crate::report;

pub mod pipeline;

/// Entry point for the `wht` binary.
pub fn run() -> Result<(), AppError> {
    // We want `wht` and `wht -r apj` to behave like `wht tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::List(args) => handle_list(args),
        Command::Show(args) => handle_show(args),
        Command::Regions(args) => handle_regions(args),
        Command::Tui(args) => crate::tui::run(args),
    }
}

fn handle_list(args: ListArgs) -> Result<(), AppError> {
    let dataset = pipeline::load_dataset(&args.source);
    let filter = pipeline::filter_from_args(&args);

    let mut matched = filter.apply(&dataset.countries);
    if args.limit > 0 {
        matched.truncate(args.limit);
    }

    match args.output {
        OutputFormat::Table => {
            println!("{}", report::format_dataset_summary(&dataset, &filter, matched.len()));
            print!("{}", report::format_country_table(&report::rows(matched)));
        }
        OutputFormat::Json => {
            degraded_to_stderr(&dataset.degraded);
            println!("{}", report::format_countries_json(&matched)?);
        }
        OutputFormat::Csv => {
            degraded_to_stderr(&dataset.degraded);
            print!("{}", report::format_rows_csv(&report::rows(matched)));
        }
    }

    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let dataset = pipeline::load_dataset(&args.source);
    degraded_to_stderr(&dataset.degraded);

    let Some(country) = query::find(&dataset.countries, &args.country) else {
        return Err(AppError::data(format!(
            "Country '{}' not found in the loaded dataset ({}).",
            args.country,
            dataset.source.describe()
        )));
    };

    print!("{}", report::format_country_detail(country));
    Ok(())
}

fn handle_regions(args: SourceArgs) -> Result<(), AppError> {
    let dataset = pipeline::load_dataset(&args);
    let filter = crate::query::CountryFilter::default();

    println!(
        "{}",
        report::format_dataset_summary(&dataset, &filter, dataset.countries.len())
    );
    print!("{}", report::format_region_roster(&dataset.countries));
    Ok(())
}

/// Keep machine-readable stdout clean; the degraded notice still has to be
/// visible somewhere.
fn degraded_to_stderr(degraded: &Option<String>) {
    if let Some(reason) = degraded {
        eprintln!("DEGRADED: {reason} Showing the embedded fallback collection instead.");
    }
}

/// Rewrite argv so `wht` defaults to `wht tui`.
///
/// Rules:
/// - `wht`                     -> `wht tui`
/// - `wht -r apj ...`          -> `wht tui -r apj ...`
/// - `wht --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "list" | "show" | "regions" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(args: &[&str]) -> Vec<String> {
        let mut argv = vec!["wht".to_string()];
        argv.extend(args.iter().map(|s| s.to_string()));
        rewrite_args(argv)
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite(&[]), vec!["wht", "tui"]);
    }

    #[test]
    fn leading_flag_is_treated_as_tui_flags() {
        assert_eq!(rewrite(&["-r", "apj"]), vec!["wht", "tui", "-r", "apj"]);
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(rewrite(&["list"]), vec!["wht", "list"]);
        assert_eq!(rewrite(&["show", "IN"]), vec!["wht", "show", "IN"]);
        assert_eq!(rewrite(&["--help"]), vec!["wht", "--help"]);
    }
}
