//! Validation pipeline for single properties and whole families.
//!
//! Every property runs the trailing-whitespace and placeholder checks, then
//! exactly one type-specific validator picked by key classification (or the
//! configured default). Family validation adds the cross-locale passes once
//! all files are checked.

use rayon::prelude::*;

use crate::config::{Config, DefaultValidatorKind};
use crate::core::{
    KeyClassifier, KeyMatcher, NoSpellcheck, NullSink, PatternError, Property, ReportSink,
    ResourceFamily, SchemaEngine, Spellchecker,
};
use crate::issues::{ReportItem, ReportType, count_errors, sort_items};
use crate::rules::{
    ParametricValidator, PropertyCheck, TextValidator, TypeValidator, ValidationEnv,
    check_missing_translations, check_parameter_coherence, check_tag_coherence,
    check_trailing_whitespace,
};

/// Owns the schema engine, spellchecker and sink for one run.
pub struct Orchestrator {
    classifier: KeyClassifier,
    excluded: KeyMatcher,
    parametric: ParametricValidator,
    validators: Vec<TypeValidator>,
    default_validator: Option<TypeValidator>,
    schema: Box<dyn SchemaEngine>,
    spellchecker: Box<dyn Spellchecker>,
    sink: Box<dyn ReportSink>,
}

impl Orchestrator {
    pub fn new(config: &Config, schema: Box<dyn SchemaEngine>) -> Result<Self, PatternError> {
        let classifier = KeyClassifier::from_config(config)?;
        let validators = classifier
            .patterns()
            .iter()
            .filter_map(|pattern| TypeValidator::for_pattern(pattern, config))
            .collect();
        let default_validator = match config.default_validator {
            DefaultValidatorKind::None => None,
            DefaultValidatorKind::Text => Some(TextValidator::default().into()),
        };

        Ok(Self {
            excluded: KeyMatcher::new(&config.excluded_keys)?,
            parametric: ParametricValidator::from_config(config)?,
            classifier,
            validators,
            default_validator,
            schema,
            spellchecker: Box::new(NoSpellcheck),
            sink: Box::new(NullSink),
        })
    }

    pub fn with_spellchecker(mut self, spellchecker: Box<dyn Spellchecker>) -> Self {
        self.spellchecker = spellchecker;
        self
    }

    pub fn with_sink(mut self, sink: Box<dyn ReportSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn classifier(&self) -> &KeyClassifier {
        &self.classifier
    }

    pub fn schema_name(&self) -> &str {
        self.schema.name()
    }

    fn env(&self) -> ValidationEnv<'_> {
        ValidationEnv {
            schema: self.schema.as_ref(),
            spellchecker: self.spellchecker.as_ref(),
            parametric: &self.parametric,
        }
    }

    /// Findings for one property, without forwarding them anywhere.
    fn check_property(&self, property: &Property<'_>) -> Vec<ReportItem> {
        if self.excluded.matches(property.key) {
            return vec![
                ReportItem::new(ReportType::Excluded, "Excluded key", property.location())
                    .with_value(property.value),
            ];
        }
        if property.value.is_empty() {
            return Vec::new();
        }

        let mut found: Vec<ReportItem> = check_trailing_whitespace(property).into_iter().collect();
        found.extend(self.parametric.validate(property));

        let env = self.env();
        let validator = self
            .validators
            .iter()
            .find(|v| v.matches(property.key))
            .or(self.default_validator.as_ref());
        if let Some(validator) = validator {
            found.extend(validator.validate(property, &env));
        }

        tracing::debug!(
            file = property.file.file_name(),
            key = property.key,
            category = %self.classifier.classify(property.key),
            findings = found.len(),
            "Validated property"
        );
        found
    }

    fn forward(&self, found: &[ReportItem]) {
        for item in found {
            self.sink.report(item);
        }
    }

    fn emit(&self, found: Vec<ReportItem>, items: &mut Vec<ReportItem>) -> usize {
        self.forward(&found);
        let errors = count_errors(&found);
        items.extend(found);
        errors
    }

    /// Validate one property, appending findings to `items`.
    ///
    /// Returns the number of ERROR findings.
    pub fn validate_property(&self, property: &Property<'_>, items: &mut Vec<ReportItem>) -> usize {
        let found = self.check_property(property);
        self.emit(found, items)
    }

    /// Cross-locale findings for one key.
    fn check_key(&self, family: &ResourceFamily, key: &str) -> Vec<ReportItem> {
        if self.excluded.matches(key) {
            return Vec::new();
        }
        let mut found = Vec::new();
        if self.classifier.is_html(key) {
            found.extend(check_tag_coherence(family, key));
        }
        found.extend(check_parameter_coherence(family, key, &self.parametric));
        found.extend(check_missing_translations(family, key));
        found
    }

    /// Validate every property of every file, then run the cross-locale
    /// passes. Findings are appended to `items` sorted by file and key.
    ///
    /// The sink receives each file's findings as soon as that file is done,
    /// then the findings of each key's cross-locale pass.
    ///
    /// Returns the number of ERROR findings.
    pub fn validate_family(&self, family: &ResourceFamily, items: &mut Vec<ReportItem>) -> usize {
        let per_file: Vec<Vec<ReportItem>> = family
            .files()
            .par_iter()
            .map(|file| {
                let found: Vec<ReportItem> = file
                    .properties()
                    .flat_map(|property| self.check_property(&property))
                    .collect();
                self.forward(&found);
                found
            })
            .collect();

        let mut found: Vec<ReportItem> = per_file.into_iter().flatten().collect();
        for key in family.keys() {
            let key_items = self.check_key(family, key);
            self.forward(&key_items);
            found.extend(key_items);
        }
        sort_items(&mut found);

        let findings = found.len();
        let errors = count_errors(&found);
        items.extend(found);
        tracing::info!(
            family = family.base_name(),
            files = family.len(),
            findings,
            errors,
            "Validated resource family"
        );
        errors
    }
}
