//! Shared "load and filter" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! source resolution -> load (with fallback) -> filter construction
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::cli::{ListArgs, SourceArgs};
use crate::data::{Dataset, SourceConfig, load_or_fallback};
use crate::query::CountryFilter;

/// Resolve the dataset source from CLI flags and environment.
pub fn source_config(source: &SourceArgs) -> SourceConfig {
    SourceConfig::resolve(source.data.clone())
}

/// Load the dataset, substituting the embedded collection on failure.
pub fn load_dataset(source: &SourceArgs) -> Dataset {
    load_or_fallback(&source_config(source))
}

/// Build the initial filter from CLI flags.
pub fn filter_from_args(args: &ListArgs) -> CountryFilter {
    CountryFilter {
        region: args.region,
        complexity: args.complexity,
        search: args.search.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Complexity, Region};

    #[test]
    fn filter_from_args_copies_all_criteria() {
        let args = ListArgs {
            region: Some(Region::Apj),
            complexity: Some(Complexity::High),
            search: "tds".to_string(),
            ..ListArgs::default()
        };
        let filter = filter_from_args(&args);
        assert_eq!(filter.region, Some(Region::Apj));
        assert_eq!(filter.complexity, Some(Complexity::High));
        assert_eq!(filter.search, "tds");
    }
}
