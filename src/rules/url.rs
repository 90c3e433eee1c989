use std::sync::LazyLock;

use regex::Regex;

use crate::core::{KeyMatcher, Property};
use crate::issues::{ReportItem, ReportType};
use crate::rules::{PropertyCheck, ValidationEnv};

/// Absolute URLs with a scheme, `mailto:`, protocol-relative and relative references.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[a-zA-Z][a-zA-Z0-9+.-]*://[^\s/?#]+[^\s]*|mailto:[^\s@]+@[^\s@]+|//[^\s/?#]+[^\s]*|(?:/|\./|\.\./|#|\?)[^\s]*)$",
    )
    .unwrap()
});

#[derive(Debug, Clone)]
pub struct UrlValidator {
    matcher: KeyMatcher,
}

impl UrlValidator {
    pub fn new(matcher: KeyMatcher) -> Self {
        Self { matcher }
    }
}

pub fn is_valid_url(value: &str) -> bool {
    URL_REGEX.is_match(value.trim())
}

impl PropertyCheck for UrlValidator {
    fn matches(&self, key: &str) -> bool {
        self.matcher.matches(key)
    }

    fn validate(&self, property: &Property<'_>, env: &ValidationEnv<'_>) -> Vec<ReportItem> {
        // malformed placeholders are reported by the parametric check
        let Ok(formatted) = env.format_value(property) else {
            return Vec::new();
        };
        if is_valid_url(&formatted) {
            return Vec::new();
        }
        vec![
            ReportItem::new(
                ReportType::UrlValidation,
                format!("Invalid URL: \"{}\"", formatted.trim()),
                property.location(),
            )
            .with_value(property.value)
            .with_formatted_value(formatted),
        ]
    }
}
