//! Key-based classification of properties into semantic categories.
//!
//! Categories are tested in a fixed precedence: html, js, url, text, then each
//! custom pattern group in declared order. A key matching none of them is
//! [`Category::Unclassified`].

use std::fmt;

use regex::Regex;
use thiserror::Error;

use crate::config::{Config, CustomPatternConfig};

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid key pattern \"{pattern}\": {source}")]
    InvalidKeyPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid value regex for custom pattern \"{name}\": {source}")]
    InvalidValueRegex {
        name: String,
        #[source]
        source: regex::Error,
    },
}

/// Semantic category of a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Html,
    Js,
    Url,
    Text,
    /// Custom pattern group, by declared name.
    Custom(String),
    Unclassified,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Html => write!(f, "html"),
            Category::Js => write!(f, "js"),
            Category::Url => write!(f, "url"),
            Category::Text => write!(f, "text"),
            Category::Custom(name) => write!(f, "{}", name),
            Category::Unclassified => write!(f, "unclassified"),
        }
    }
}

// ============================================================
// Key Matcher
// ============================================================

#[derive(Debug, Clone)]
enum KeyRule {
    Substring(String),
    Regex(Regex),
}

/// Matches keys against a list of substrings and `/regex/` patterns.
#[derive(Debug, Clone, Default)]
pub struct KeyMatcher {
    rules: Vec<KeyRule>,
}

impl KeyMatcher {
    /// A pattern wrapped in slashes (`/\.html$/`) is a regex, anything else a
    /// literal substring. Matching is case-sensitive.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, PatternError> {
        let rules = patterns
            .iter()
            .map(|pattern| parse_rule(pattern.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    pub fn matches(&self, key: &str) -> bool {
        self.rules.iter().any(|rule| match rule {
            KeyRule::Substring(s) => key.contains(s.as_str()),
            KeyRule::Regex(re) => re.is_match(key),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn parse_rule(pattern: &str) -> Result<KeyRule, PatternError> {
    match pattern
        .strip_prefix('/')
        .and_then(|rest| rest.strip_suffix('/'))
    {
        Some(expr) if !expr.is_empty() => Regex::new(expr)
            .map(KeyRule::Regex)
            .map_err(|source| PatternError::InvalidKeyPattern {
                pattern: pattern.to_string(),
                source,
            }),
        _ => Ok(KeyRule::Substring(pattern.to_string())),
    }
}

// ============================================================
// Key Pattern
// ============================================================

/// One classification group: category, key matcher and optional value constraint.
#[derive(Debug, Clone)]
pub struct KeyPattern {
    pub category: Category,
    pub matcher: KeyMatcher,
    /// Whole-value regex a matching property must satisfy (custom groups only).
    pub value_regex: Option<Regex>,
}

impl KeyPattern {
    pub fn new<S: AsRef<str>>(category: Category, keys: &[S]) -> Result<Self, PatternError> {
        Ok(Self {
            category,
            matcher: KeyMatcher::new(keys)?,
            value_regex: None,
        })
    }

    pub fn custom(config: &CustomPatternConfig) -> Result<Self, PatternError> {
        let value_regex = config
            .regex
            .as_deref()
            .map(|expr| {
                // Anchor so the whole value must match.
                Regex::new(&format!("^(?:{})$", expr)).map_err(|source| {
                    PatternError::InvalidValueRegex {
                        name: config.name.clone(),
                        source,
                    }
                })
            })
            .transpose()?;

        Ok(Self {
            category: Category::Custom(config.name.clone()),
            matcher: KeyMatcher::new(&config.keys)?,
            value_regex,
        })
    }

    pub fn matches(&self, key: &str) -> bool {
        self.matcher.matches(key)
    }
}

// ============================================================
// Key Classifier
// ============================================================

/// Ordered list of key patterns; first match wins.
#[derive(Debug, Clone)]
pub struct KeyClassifier {
    patterns: Vec<KeyPattern>,
}

impl KeyClassifier {
    pub fn new(patterns: Vec<KeyPattern>) -> Self {
        Self { patterns }
    }

    pub fn from_config(config: &Config) -> Result<Self, PatternError> {
        let mut patterns = vec![
            KeyPattern::new(Category::Html, &config.html_keys)?,
            KeyPattern::new(Category::Js, &config.js_keys)?,
            KeyPattern::new(Category::Url, &config.url_keys)?,
            KeyPattern::new(Category::Text, &config.text_keys)?,
        ];
        for custom in &config.custom_patterns {
            patterns.push(KeyPattern::custom(custom)?);
        }
        Ok(Self::new(patterns))
    }

    pub fn classify(&self, key: &str) -> Category {
        self.patterns
            .iter()
            .find(|p| p.matches(key))
            .map(|p| p.category.clone())
            .unwrap_or(Category::Unclassified)
    }

    pub fn is_html(&self, key: &str) -> bool {
        self.classify(key) == Category::Html
    }

    pub fn patterns(&self) -> &[KeyPattern] {
        &self.patterns
    }

    /// The pattern for a built-in or custom category.
    pub fn pattern(&self, category: &Category) -> Option<&KeyPattern> {
        self.patterns.iter().find(|p| &p.category == category)
    }
}
