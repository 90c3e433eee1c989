//! Core validation engine.
//!
//! ## Module Structure
//!
//! - `model`: Resource files, locales and bundle families
//! - `parsers`: `.properties` parsing
//! - `loader`: File discovery and grouping into families
//! - `classify`: Key to category classification
//! - `format`: Positional placeholder parsing and default formatting
//! - `markup`: XHTML template wrapping and tag signatures
//! - `schema`: Structural validation of wrapped documents
//! - `spellcheck`: Word-list spellchecking of visible text
//! - `consensus`: Majority vote across locales
//! - `sink`: Observers of produced report items
//! - `orchestrator`: Per-property and per-family validation pipeline

pub mod classify;
pub mod consensus;
pub mod format;
pub mod loader;
pub mod markup;
pub mod model;
pub mod orchestrator;
pub mod parsers;
pub mod schema;
pub mod sink;
pub mod spellcheck;

pub use classify::{Category, KeyClassifier, KeyMatcher, KeyPattern, PatternError};
pub use loader::{LoadResult, load_families};
pub use model::{Locale, ModelError, Property, ResourceEntry, ResourceFamily, ResourceFile};
pub use orchestrator::Orchestrator;
pub use schema::{ProfileSchema, ReportingHandler, SchemaEngine, SchemaError, load_schema};
pub use sink::{CollectingSink, NullSink, ReportSink, TracingSink};
pub use spellcheck::{NoSpellcheck, Spellchecker, WordListSpellchecker};
