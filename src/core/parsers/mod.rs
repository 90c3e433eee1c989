//! File parsers for resource files.
//!
//! - `properties`: `.properties` key/value parser with line tracking

pub mod properties;

pub use properties::{Entries, PropertiesError, parse_properties, parse_properties_file};
