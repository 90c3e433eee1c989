//! Spellchecking of visible text.

use std::{
    collections::{BTreeSet, HashSet},
    fs,
    path::Path,
    sync::LazyLock,
};

use anyhow::{Context, Result};
use regex::Regex;

use crate::core::Property;
use crate::issues::{ReportItem, ReportType};

/// Letters, optionally joined by apostrophes or hyphens (`don't`, `e-mail`).
static WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{M}]+(?:['\u{2019}-][\p{L}\p{M}]+)*").unwrap()
});

pub trait Spellchecker: Send + Sync {
    /// Check one run of text belonging to `property`.
    fn check(&self, text: &str, property: &Property<'_>) -> Vec<ReportItem>;
}

/// Accepts everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSpellcheck;

impl Spellchecker for NoSpellcheck {
    fn check(&self, _text: &str, _property: &Property<'_>) -> Vec<ReportItem> {
        Vec::new()
    }
}

/// Flags words absent from a set of word lists.
#[derive(Debug, Default, Clone)]
pub struct WordListSpellchecker {
    words: HashSet<String>,
}

impl WordListSpellchecker {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Load word lists, one word per line.
    ///
    /// Lines starting with `#` are ignored, as are pure numbers (the count
    /// header of hunspell `.dic` files). A `/FLAGS` suffix is stripped.
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut words = HashSet::new();
        for path in paths {
            let path = path.as_ref();
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read dictionary: {:?}", path))?;
            words.extend(parse_word_list(&content));
        }
        Ok(Self { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Distinct unknown words in `text`, sorted.
    pub fn unknown_words<'t>(&self, text: &'t str) -> BTreeSet<&'t str> {
        WORD_REGEX
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|word| word.chars().count() > 1 && !self.contains(word))
            .collect()
    }
}

fn parse_word_list(content: &str) -> impl Iterator<Item = String> + '_ {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| !line.chars().all(|c| c.is_ascii_digit()))
        .map(|line| line.split('/').next().unwrap_or(line).to_lowercase())
}

impl Spellchecker for WordListSpellchecker {
    fn check(&self, text: &str, property: &Property<'_>) -> Vec<ReportItem> {
        self.unknown_words(text)
            .into_iter()
            .map(|word| {
                ReportItem::new(
                    ReportType::Spellcheck,
                    format!("Unknown word \"{}\"", word),
                    property.location(),
                )
                .with_value(property.value)
                .with_formatted_value(text)
            })
            .collect()
    }
}
