use regex::Regex;

use crate::core::{KeyMatcher, Property};
use crate::issues::{ReportItem, ReportType};
use crate::rules::{PropertyCheck, ValidationEnv};

/// Custom key group. Without a value regex, matching keys are only classified.
#[derive(Debug, Clone)]
pub struct PatternValidator {
    name: String,
    matcher: KeyMatcher,
    value_regex: Option<Regex>,
}

impl PatternValidator {
    pub fn new(name: String, matcher: KeyMatcher, value_regex: Option<Regex>) -> Self {
        Self {
            name,
            matcher,
            value_regex,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PropertyCheck for PatternValidator {
    fn matches(&self, key: &str) -> bool {
        self.matcher.matches(key)
    }

    fn validate(&self, property: &Property<'_>, _env: &ValidationEnv<'_>) -> Vec<ReportItem> {
        match &self.value_regex {
            Some(regex) if !regex.is_match(property.value) => vec![
                ReportItem::new(
                    ReportType::CustomPattern,
                    format!(
                        "Value does not match pattern {} ({})",
                        self.name,
                        regex.as_str()
                    ),
                    property.location(),
                )
                .with_value(property.value),
            ],
            _ => Vec::new(),
        }
    }
}
