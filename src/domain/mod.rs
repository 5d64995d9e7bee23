//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - the categorical enums (`Region`, `Complexity`)
//! - the validated country record (`Country`)

pub mod types;

pub use types::*;
