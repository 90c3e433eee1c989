use std::sync::LazyLock;

use regex::Regex;

use crate::core::{KeyMatcher, Property};
use crate::issues::{ReportItem, ReportType};
use crate::rules::{PropertyCheck, ValidationEnv};

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[a-zA-Z/][^>]*>").unwrap());

/// Plain text: must not contain markup, and its words are spellchecked.
#[derive(Debug, Clone, Default)]
pub struct TextValidator {
    matcher: KeyMatcher,
}

impl TextValidator {
    pub fn new(matcher: KeyMatcher) -> Self {
        Self { matcher }
    }
}

impl PropertyCheck for TextValidator {
    fn matches(&self, key: &str) -> bool {
        self.matcher.matches(key)
    }

    fn validate(&self, property: &Property<'_>, env: &ValidationEnv<'_>) -> Vec<ReportItem> {
        let formatted = env
            .format_value(property)
            .unwrap_or_else(|_| property.value.to_string());

        if let Some(tag) = TAG_REGEX.find(&formatted) {
            return vec![
                ReportItem::new(
                    ReportType::TextValidation,
                    format!("Markup {} is not allowed in plain text", tag.as_str()),
                    property.location(),
                )
                .with_value(property.value)
                .with_formatted_value(formatted.as_str()),
            ];
        }

        env.spellchecker.check(&formatted, property)
    }
}
