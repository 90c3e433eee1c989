//! Structural validation of wrapped resource documents.
//!
//! A [`SchemaEngine`] checks a parsed document and reports each violation to a
//! [`ReportingHandler`] created for that single call. The built-in engine is
//! [`ProfileSchema`], driven by an element/attribute content model.

mod profile;
mod profiles;

use std::path::{Path, PathBuf};

use roxmltree::Document;
use thiserror::Error;

pub use profile::{ElementDefinition, ProfileDefinition, ProfileSchema};
pub use profiles::{PREDEFINED_PROFILES, XHTML1_STRICT, XHTML1_TRANSITIONAL, XHTML5};

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read schema profile {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse schema profile {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown schema profile \"{0}\"")]
    UnknownProfile(String),
    #[error("unknown content group \"%{group}\" in \"{context}\"")]
    UnknownGroup { group: String, context: String },
    #[error("content group \"%{0}\" refers to itself")]
    RecursiveGroup(String),
    #[error("element \"{child}\" allowed in \"{parent}\" is not defined")]
    UndefinedElement { parent: String, child: String },
    #[error("profile must define the \"{0}\" element")]
    MissingTemplateElement(String),
}

/// Validates a parsed document, reporting violations to the handler.
pub trait SchemaEngine: Send + Sync {
    fn name(&self) -> &str;

    fn validate(&self, document: &Document<'_>, handler: &mut ReportingHandler);
}

/// Per-call collector of schema violations.
#[derive(Debug, Default)]
pub struct ReportingHandler {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ReportingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error. Identical messages are kept once.
    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.errors.contains(&message) {
            self.errors.push(message);
        }
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.warnings.contains(&message) {
            self.warnings.push(message);
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// Resolve the configured schema name.
///
/// Predefined profile names are built in. Anything else is read as a JSON
/// profile relative to `base_dir`; if that file does not exist the default
/// transitional profile is used and an error is logged.
pub fn load_schema(name: &str, base_dir: &Path) -> Result<ProfileSchema, SchemaError> {
    if PREDEFINED_PROFILES.contains(&name) {
        return ProfileSchema::predefined(name);
    }

    let path = base_dir.join(name);
    if path.is_file() {
        return ProfileSchema::from_file(&path);
    }

    tracing::error!(
        schema = name,
        fallback = XHTML1_TRANSITIONAL,
        "Schema not found, falling back to default profile"
    );
    ProfileSchema::predefined(XHTML1_TRANSITIONAL)
}

#[cfg(test)]
mod tests {
    use crate::core::schema::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_handler_deduplicates() {
        let mut handler = ReportingHandler::new();
        handler.error("a");
        handler.error("a");
        handler.error("b");
        handler.warning("w");
        assert_eq!(handler.error_count(), 2);
        assert_eq!(handler.warning_count(), 1);
        assert_eq!(handler.errors(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_load_predefined() {
        let dir = tempdir().unwrap();
        for name in PREDEFINED_PROFILES {
            assert_eq!(load_schema(name, dir.path()).unwrap().name(), *name);
        }
    }

    #[test]
    fn test_load_missing_falls_back() {
        let dir = tempdir().unwrap();
        let schema = load_schema("schemas/missing.json", dir.path()).unwrap();
        assert_eq!(schema.name(), XHTML1_TRANSITIONAL);
    }

    #[test]
    fn test_load_custom_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("strict-plus.json"),
            r#"{
                "name": "strict-plus",
                "extends": "xhtml1-strict",
                "elements": { "mark": { "content": ["%phrasing"] } },
                "groups": { "inline": ["mark"] }
            }"#,
        )
        .unwrap();

        let schema = load_schema("strict-plus.json", dir.path()).unwrap();
        assert_eq!(schema.name(), "strict-plus");
    }

    #[test]
    fn test_load_invalid_custom_file_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        assert!(matches!(
            load_schema("broken.json", dir.path()),
            Err(SchemaError::Parse { .. })
        ));
    }
}
