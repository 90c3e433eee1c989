//! Report item types for localization validation results.
//!
//! Every finding produced by a validator is a [`ReportItem`]: an immutable
//! record carrying its [`ReportType`], a human readable description, the
//! file/key it was found in, and the raw and formatted values that were
//! evaluated. The severity of an item is derived from its type and never
//! stored separately.

use std::fmt;

// ============================================================
// Severity and Type
// ============================================================

/// Severity level of a report item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warn => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Kind of finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReportType {
    /// Schema violation or fatal parse error in an html resource.
    HtmlValidation,
    /// Placeholder syntax that cannot be formatted.
    MalformedParameter,
    /// Lone single quote swallowing text in a parametric resource.
    UnescapedQuote,
    /// Unescaped `"` in a resource embedded in a double-quoted JS string.
    JsDoubleQuoted,
    /// Unescaped `'` in a resource embedded in a single-quoted JS string.
    JsSingleQuoted,
    UrlValidation,
    /// Markup found in a plain text resource.
    TextValidation,
    /// Value rejected by a custom pattern.
    CustomPattern,
    TrailingWhitespace,
    Spellcheck,
    IncoherentTags,
    IncoherentParameters,
    MissingTranslation,
    Excluded,
}

impl ReportType {
    /// Severity is a pure function of the type.
    pub fn severity(self) -> Severity {
        match self {
            ReportType::HtmlValidation
            | ReportType::MalformedParameter
            | ReportType::JsDoubleQuoted
            | ReportType::JsSingleQuoted
            | ReportType::UrlValidation
            | ReportType::CustomPattern => Severity::Error,
            ReportType::UnescapedQuote
            | ReportType::TextValidation
            | ReportType::TrailingWhitespace
            | ReportType::Spellcheck
            | ReportType::IncoherentTags
            | ReportType::IncoherentParameters
            | ReportType::MissingTranslation => Severity::Warn,
            ReportType::Excluded => Severity::Info,
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportType::HtmlValidation => "html-validation",
            ReportType::MalformedParameter => "malformed-parameter",
            ReportType::UnescapedQuote => "unescaped-quote",
            ReportType::JsDoubleQuoted => "js-double-quoted",
            ReportType::JsSingleQuoted => "js-single-quoted",
            ReportType::UrlValidation => "url-validation",
            ReportType::TextValidation => "text-validation",
            ReportType::CustomPattern => "custom-pattern",
            ReportType::TrailingWhitespace => "trailing-whitespace",
            ReportType::Spellcheck => "spellcheck",
            ReportType::IncoherentTags => "incoherent-tags",
            ReportType::IncoherentParameters => "incoherent-parameters",
            ReportType::MissingTranslation => "missing-translation",
            ReportType::Excluded => "excluded",
        };
        write!(f, "{}", name)
    }
}

// ============================================================
// Report Item
// ============================================================

/// Where a report item was found.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemLocation {
    /// Name of the properties file (e.g., "Bundle_fr.properties").
    pub file_name: String,
    /// The resource key.
    pub key: String,
    /// 1-based line of the key in the file, when known.
    pub line: Option<usize>,
}

impl ItemLocation {
    pub fn new(file_name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            key: key.into(),
            line: None,
        }
    }

    pub fn with_line(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }
}

/// A single validation finding.
///
/// Items are built once with the `with_*` builders and then only read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportItem {
    kind: ReportType,
    description: String,
    location: ItemLocation,
    value: Option<String>,
    formatted_value: Option<String>,
}

impl ReportItem {
    pub fn new(kind: ReportType, description: impl Into<String>, location: ItemLocation) -> Self {
        Self {
            kind,
            description: description.into(),
            location,
            value: None,
            formatted_value: None,
        }
    }

    /// Attach the raw value that was evaluated.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Attach the value as rendered before evaluation (placeholders substituted,
    /// wrapping applied, ...). Skipped when identical to the raw value.
    pub fn with_formatted_value(mut self, formatted: impl Into<String>) -> Self {
        let formatted = formatted.into();
        if self.value.as_deref() != Some(formatted.as_str()) {
            self.formatted_value = Some(formatted);
        }
        self
    }

    pub fn kind(&self) -> ReportType {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> &ItemLocation {
        &self.location
    }

    pub fn file_name(&self) -> &str {
        &self.location.file_name
    }

    pub fn key(&self) -> &str {
        &self.location.key
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn formatted_value(&self) -> Option<&str> {
        self.formatted_value.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

/// Count ERROR-severity items.
pub fn count_errors(items: &[ReportItem]) -> usize {
    items.iter().filter(|item| item.is_error()).count()
}

/// Stable sort by (file, key).
///
/// Items for the same property keep their production order.
pub fn sort_items(items: &mut [ReportItem]) {
    items.sort_by(|a, b| {
        a.file_name()
            .cmp(b.file_name())
            .then_with(|| a.key().cmp(b.key()))
    });
}

/// Per-severity and per-type totals, used for the summary line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub by_type: Vec<(ReportType, usize)>,
}

impl ReportSummary {
    pub fn from_items(items: &[ReportItem]) -> Self {
        let mut summary = ReportSummary::default();
        let mut by_type: std::collections::BTreeMap<ReportType, usize> =
            std::collections::BTreeMap::new();

        for item in items {
            match item.severity() {
                Severity::Error => summary.errors += 1,
                Severity::Warn => summary.warnings += 1,
                Severity::Info => summary.infos += 1,
            }
            *by_type.entry(item.kind()).or_default() += 1;
        }

        summary.by_type = by_type.into_iter().collect();
        summary
    }

    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.infos
    }
}

// ============================================================
// Tests
// ============================================================
