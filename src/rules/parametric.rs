//! Placeholder checks for parametric values.

use crate::config::Config;
use crate::core::{
    KeyMatcher, PatternError, Property,
    format::{self, FormatError},
};
use crate::issues::{ReportItem, ReportType};

/// Decides which values are message patterns and renders them.
#[derive(Debug, Clone, Default)]
pub struct ParametricValidator {
    keys: KeyMatcher,
}

impl ParametricValidator {
    pub fn new(keys: KeyMatcher) -> Self {
        Self { keys }
    }

    pub fn from_config(config: &Config) -> Result<Self, PatternError> {
        Ok(Self::new(KeyMatcher::new(&config.parametric_keys)?))
    }

    /// A key following the parametric naming convention, or a value using
    /// positional placeholders.
    pub fn is_parametric(&self, key: &str, value: &str) -> bool {
        self.keys.matches(key) || format::has_placeholder_syntax(value)
    }

    /// Text as displayed: placeholders substituted for parametric values,
    /// doubled quotes unescaped otherwise.
    pub fn format_value(&self, key: &str, value: &str) -> Result<String, FormatError> {
        if self.is_parametric(key, value) {
            format::default_format(value)
        } else {
            Ok(format::unescape_quotes(value))
        }
    }

    pub fn validate(&self, property: &Property<'_>) -> Vec<ReportItem> {
        if !self.is_parametric(property.key, property.value) {
            return Vec::new();
        }

        let item = match format::parse(property.value) {
            Err(err) => ReportItem::new(
                ReportType::MalformedParameter,
                format!("Malformed parameter: {}", err),
                property.location(),
            ),
            Ok(_) if format::has_lone_quote(property.value) => ReportItem::new(
                ReportType::UnescapedQuote,
                "Unescaped single quote, following text is not formatted (use '' for a literal quote)",
                property.location(),
            ),
            Ok(_) => return Vec::new(),
        };
        vec![item.with_value(property.value)]
    }
}
