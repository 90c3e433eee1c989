//! Markup validation of html resources.
//!
//! The value is prepared (list-item workaround, placeholder formatting,
//! `data-*` attributes stripped), wrapped in the XHTML template, parsed and
//! checked against the configured schema. Visible text runs are then handed
//! to the spellchecker.

use crate::core::{
    KeyMatcher, Property, ReportingHandler,
    markup::{
        apply_list_workaround, fragment_root, parse_document, strip_data_attributes, text_runs,
        wrap_in_template,
    },
};
use crate::issues::{ReportItem, ReportType};
use crate::rules::{PropertyCheck, ValidationEnv};
use crate::utils::abbreviate;

const MAX_MESSAGE_CHARS: usize = 140;

#[derive(Debug, Clone)]
pub struct HtmlValidator {
    matcher: KeyMatcher,
    list_workaround: bool,
}

impl HtmlValidator {
    pub fn new(matcher: KeyMatcher) -> Self {
        Self {
            matcher,
            list_workaround: true,
        }
    }

    /// Disable wrapping bare `<li>` sequences in a `<ul>`.
    pub fn without_list_workaround(mut self) -> Self {
        self.list_workaround = false;
        self
    }

    /// The fragment as it is placed into the template, or `None` if
    /// placeholders cannot be formatted.
    fn prepare(&self, property: &Property<'_>, env: &ValidationEnv<'_>) -> Option<String> {
        let value = if self.list_workaround {
            apply_list_workaround(property.value)
        } else {
            property.value.to_string()
        };
        let formatted = env.parametric.format_value(property.key, &value).ok()?;
        Some(strip_data_attributes(&formatted))
    }
}

impl PropertyCheck for HtmlValidator {
    fn matches(&self, key: &str) -> bool {
        self.matcher.matches(key)
    }

    fn validate(&self, property: &Property<'_>, env: &ValidationEnv<'_>) -> Vec<ReportItem> {
        // malformed placeholders are reported by the parametric check
        let Some(fragment) = self.prepare(property, env) else {
            return Vec::new();
        };

        let item = |message: &str| {
            ReportItem::new(
                ReportType::HtmlValidation,
                abbreviate(&format!("XHTML validation error: {}", message), MAX_MESSAGE_CHARS),
                property.location(),
            )
            .with_value(property.value)
            .with_formatted_value(fragment.as_str())
        };

        let text = wrap_in_template(&fragment);
        let document = match parse_document(&text) {
            Ok(document) => document,
            Err(err) => return vec![item(&err.to_string())],
        };

        let mut handler = ReportingHandler::new();
        env.schema.validate(&document, &mut handler);
        for warning in handler.warnings() {
            tracing::debug!(key = property.key, "Schema warning: {}", warning);
        }
        let mut items: Vec<ReportItem> = handler.errors().iter().map(|m| item(m)).collect();

        if let Some(root) = fragment_root(&document) {
            for run in text_runs(root) {
                items.extend(env.spellchecker.check(&run, property));
            }
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{
        NoSpellcheck, ProfileSchema, ResourceFile, Spellchecker, WordListSpellchecker,
        schema::{XHTML1_STRICT, XHTML1_TRANSITIONAL, XHTML5},
    };
    use crate::rules::ParametricValidator;
    use crate::rules::html::*;
    use pretty_assertions::assert_eq;

    fn run_with(
        validator: &HtmlValidator,
        schema_name: &str,
        spellchecker: &dyn Spellchecker,
        value: &str,
    ) -> Vec<ReportItem> {
        let schema = ProfileSchema::predefined(schema_name).unwrap();
        let parametric = ParametricValidator::new(KeyMatcher::new(&[".param."]).unwrap());
        let env = ValidationEnv {
            schema: &schema,
            spellchecker,
            parametric: &parametric,
        };
        let file = ResourceFile::from_pairs("Bundle.properties", [("a.text.b", value)]);
        let property = file.properties().next().unwrap();
        validator.validate(&property, &env)
    }

    fn run(value: &str) -> Vec<ReportItem> {
        run_with(&validator(), XHTML1_TRANSITIONAL, &NoSpellcheck, value)
    }

    fn validator() -> HtmlValidator {
        HtmlValidator::new(KeyMatcher::new(&[".text."]).unwrap())
    }

    #[test]
    fn test_valid_markup() {
        assert!(run(r#"<div>Some Text on<a href="x">Google</a></div>"#).is_empty());
        assert!(run("Plain text &nbsp;&euro; 5").is_empty());
        assert!(run(r#"<img src="a.png" alt="" /> <br/>"#).is_empty());
    }

    #[test]
    fn test_list_workaround() {
        let value = "<li>item</li><li>item</li><li>item</li>";
        assert!(run(value).is_empty());

        let items = run_with(
            &validator().without_list_workaround(),
            XHTML1_TRANSITIONAL,
            &NoSpellcheck,
            value,
        );
        assert!(!items.is_empty());
        assert!(items.iter().all(|i| i.kind() == ReportType::HtmlValidation));
    }

    #[test]
    fn test_fatal_parse_error() {
        let items = run("<b>unclosed");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind(), ReportType::HtmlValidation);
        assert!(items[0].description().starts_with("XHTML validation error: "));
        assert!(items[0].description().chars().count() <= 140);
    }

    #[test]
    fn test_deeply_nested_markup() {
        let value = format!("{}x{}", "<span>".repeat(1000), "</span>".repeat(1000));
        let items = run(&value);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind(), ReportType::HtmlValidation);
        assert_eq!(
            items[0].description(),
            "XHTML validation error: element nesting deeper than 128 levels"
        );
    }

    #[test]
    fn test_each_violation_reported() {
        let items = run(r#"<b foo="1">x</b><blink>y</blink><img src="a"/>"#);
        let descriptions: Vec<&str> = items.iter().map(|i| i.description()).collect();
        assert_eq!(
            descriptions,
            vec![
                "XHTML validation error: Attribute \"foo\" is not allowed on element \"b\"",
                "XHTML validation error: Element \"blink\" is not defined in schema xhtml1-transitional",
                "XHTML validation error: Element \"img\" is missing required attribute \"alt\"",
            ]
        );
    }

    #[test]
    fn test_profiles_differ() {
        let value = "<center>x</center>";
        assert!(run(value).is_empty());
        assert_eq!(
            run_with(&validator(), XHTML1_STRICT, &NoSpellcheck, value).len(),
            1
        );
        assert_eq!(run_with(&validator(), XHTML5, &NoSpellcheck, value).len(), 1);
    }

    #[test]
    fn test_data_attributes_stripped() {
        assert!(run(r#"<a data-track="nav" href="x">y</a>"#).is_empty());
    }

    #[test]
    fn test_malformed_parameter_skips_markup() {
        assert!(run("Hello {0").is_empty());
    }

    #[test]
    fn test_placeholders_are_formatted() {
        let items = run("<b>{0}</b> items <span>");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].value(), Some("<b>{0}</b> items <span>"));
        assert_eq!(items[0].formatted_value(), Some("<b>0</b> items <span>"));
    }

    #[test]
    fn test_text_runs_spellchecked() {
        let checker = WordListSpellchecker::new(["some", "text", "on"]);
        let items = run_with(
            &validator(),
            XHTML1_TRANSITIONAL,
            &checker,
            r#"<div>Some Text on<a href="x">Gogole</a></div>"#,
        );
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind(), ReportType::Spellcheck);
        assert_eq!(items[0].description(), "Unknown word \"Gogole\"");
    }
}
