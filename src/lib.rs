//! l10nlint - validator for localized `.properties` resource bundles
//!
//! l10nlint is a CLI tool and library that catches localization defects
//! before release: malformed markup in html resources, broken positional
//! placeholders, quotes that break JS strings, invalid URLs, and structural
//! drift between the locale translations of the same key.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Validation engine (model, loading, classification, orchestration)
//! - `issues`: Report item types
//! - `rules`: Per-property and cross-locale validation rules
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
pub mod utils;
