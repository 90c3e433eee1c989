//! Validation rules for localized properties.
//!
//! Per-property validators implement [`PropertyCheck`] and are dispatched
//! through [`TypeValidator`]. Family-wide rules take a whole
//! [`ResourceFamily`](crate::core::ResourceFamily) and one key.
//!
//! ## Module Structure
//!
//! - `parametric`: Placeholder syntax and unescaped quotes
//! - `whitespace`: Trailing whitespace
//! - `html`: Markup validation against the schema, with spellcheck of text runs
//! - `js`: Quotes that would break an enclosing JS string literal
//! - `url`: URL shape
//! - `text`: Markup in plain text, spellcheck
//! - `pattern`: Custom whole-value regexes
//! - `coherence`: Tag structure agreement across locales
//! - `parameters`: Placeholder agreement across locales
//! - `missing`: Keys absent from locale files

pub mod coherence;
pub mod html;
pub mod js;
pub mod missing;
pub mod parameters;
pub mod parametric;
pub mod pattern;
pub mod text;
pub mod url;
pub mod whitespace;

use enum_dispatch::enum_dispatch;

use crate::config::Config;
use crate::core::{
    Category, KeyPattern, Property, SchemaEngine, Spellchecker, format::FormatError,
};
use crate::issues::ReportItem;

pub use coherence::check_tag_coherence;
pub use html::HtmlValidator;
pub use js::JsValidator;
pub use missing::check_missing_translations;
pub use parameters::check_parameter_coherence;
pub use parametric::ParametricValidator;
pub use pattern::PatternValidator;
pub use text::TextValidator;
pub use url::UrlValidator;
pub use whitespace::check_trailing_whitespace;

/// Shared collaborators handed to every check.
#[derive(Clone, Copy)]
pub struct ValidationEnv<'a> {
    pub schema: &'a dyn SchemaEngine,
    pub spellchecker: &'a dyn Spellchecker,
    pub parametric: &'a ParametricValidator,
}

impl ValidationEnv<'_> {
    pub fn format_value(&self, property: &Property<'_>) -> Result<String, FormatError> {
        self.parametric.format_value(property.key, property.value)
    }
}

/// A type-specific validator.
#[enum_dispatch]
pub trait PropertyCheck {
    /// Whether this validator is responsible for `key`.
    fn matches(&self, key: &str) -> bool;

    fn validate(&self, property: &Property<'_>, env: &ValidationEnv<'_>) -> Vec<ReportItem>;
}

#[enum_dispatch(PropertyCheck)]
#[derive(Debug, Clone)]
pub enum TypeValidator {
    Html(HtmlValidator),
    Js(JsValidator),
    Url(UrlValidator),
    Text(TextValidator),
    Pattern(PatternValidator),
}

impl TypeValidator {
    /// Validator for one classification group.
    ///
    /// Returns `None` for [`Category::Unclassified`], which has no validator.
    pub fn for_pattern(pattern: &KeyPattern, config: &Config) -> Option<Self> {
        let matcher = pattern.matcher.clone();
        let validator = match &pattern.category {
            Category::Html => HtmlValidator::new(matcher).into(),
            Category::Js => JsValidator::new(matcher, config.js_double_quoted).into(),
            Category::Url => UrlValidator::new(matcher).into(),
            Category::Text => TextValidator::new(matcher).into(),
            Category::Custom(name) => {
                PatternValidator::new(name.clone(), matcher, pattern.value_regex.clone()).into()
            }
            Category::Unclassified => return None,
        };
        Some(validator)
    }
}
