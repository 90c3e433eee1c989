use crate::core::{KeyMatcher, Property};
use crate::issues::{ReportItem, ReportType};
use crate::rules::{PropertyCheck, ValidationEnv};

/// Values embedded in a JS string literal must not contain the delimiting
/// quote unless it is backslash-escaped.
#[derive(Debug, Clone)]
pub struct JsValidator {
    matcher: KeyMatcher,
    double_quoted: bool,
}

impl JsValidator {
    pub fn new(matcher: KeyMatcher, double_quoted: bool) -> Self {
        Self {
            matcher,
            double_quoted,
        }
    }

    fn quote(&self) -> char {
        if self.double_quoted { '"' } else { '\'' }
    }
}

/// True if `text` contains `quote` not preceded by a backslash.
pub fn has_unescaped_quote(text: &str, quote: char) -> bool {
    let mut escaped = false;
    for ch in text.chars() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            return true;
        }
    }
    false
}

impl PropertyCheck for JsValidator {
    fn matches(&self, key: &str) -> bool {
        self.matcher.matches(key)
    }

    fn validate(&self, property: &Property<'_>, env: &ValidationEnv<'_>) -> Vec<ReportItem> {
        let formatted = env
            .format_value(property)
            .unwrap_or_else(|_| property.value.to_string());
        let quote = self.quote();
        if !has_unescaped_quote(&formatted, quote) {
            return Vec::new();
        }

        let (kind, description) = if self.double_quoted {
            (
                ReportType::JsDoubleQuoted,
                "Unescaped double quote in a JS double-quoted string",
            )
        } else {
            (
                ReportType::JsSingleQuoted,
                "Unescaped single quote in a JS single-quoted string",
            )
        };
        vec![
            ReportItem::new(kind, description, property.location())
                .with_value(property.value)
                .with_formatted_value(formatted),
        ]
    }
}
