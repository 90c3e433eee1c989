//! Resource data model: properties files, locales and bundle families.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    sync::LazyLock,
};

use regex::Regex;
use thiserror::Error;

use crate::issues::ItemLocation;

/// Splits a file stem into bundle base name and locale suffix.
///
/// `Bundle_zh_CN_var` -> base `Bundle`, language `zh`, country `CN`, variant `var`.
static BUNDLE_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<base>.+?)(?:_(?P<lang>[A-Za-z]{2})(?:_(?P<country>[A-Za-z]{2}|[0-9]{3}))?(?:_(?P<variant>[A-Za-z0-9]+))?)?$",
    )
    .unwrap()
});

/// ISO 639-1 language codes, sorted.
const LANGUAGE_CODES: &[&str] = &[
    "aa", "ab", "ae", "af", "ak", "am", "an", "ar", "as", "av", "ay", "az", "ba", "be", "bg", "bh",
    "bi", "bm", "bn", "bo", "br", "bs", "ca", "ce", "ch", "co", "cr", "cs", "cu", "cv", "cy", "da",
    "de", "dv", "dz", "ee", "el", "en", "eo", "es", "et", "eu", "fa", "ff", "fi", "fj", "fo", "fr",
    "fy", "ga", "gd", "gl", "gn", "gu", "gv", "ha", "he", "hi", "ho", "hr", "ht", "hu", "hy", "hz",
    "ia", "id", "ie", "ig", "ii", "ik", "in", "io", "is", "it", "iu", "iw", "ja", "ji", "jv", "ka",
    "kg", "ki", "kj", "kk", "kl", "km", "kn", "ko", "kr", "ks", "ku", "kv", "kw", "ky", "la", "lb",
    "lg", "li", "ln", "lo", "lt", "lu", "lv", "mg", "mh", "mi", "mk", "ml", "mn", "mr", "ms", "mt",
    "my", "na", "nb", "nd", "ne", "ng", "nl", "nn", "no", "nr", "nv", "ny", "oc", "oj", "om", "or",
    "os", "pa", "pi", "pl", "ps", "pt", "qu", "rm", "rn", "ro", "ru", "rw", "sa", "sc", "sd", "se",
    "sg", "si", "sk", "sl", "sm", "sn", "so", "sq", "sr", "ss", "st", "su", "sv", "sw", "ta", "te",
    "tg", "th", "ti", "tk", "tl", "tn", "to", "tr", "ts", "tt", "tw", "ty", "ug", "uk", "ur", "uz",
    "ve", "vi", "vo", "wa", "wo", "xh", "yi", "yo", "za", "zh", "zu",
];

/// True for a known ISO 639-1 code, including the legacy `in`, `iw` and `ji`.
pub fn is_language_code(code: &str) -> bool {
    LANGUAGE_CODES
        .binary_search(&code.to_ascii_lowercase().as_str())
        .is_ok()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("resource family is empty")]
    EmptyFamily,
    #[error("file '{file_name}' has base name '{actual}', expected '{expected}'")]
    MixedBaseNames {
        file_name: String,
        expected: String,
        actual: String,
    },
    #[error("file '{0}' appears twice in the same family")]
    DuplicateFile(String),
}

// ============================================================
// Locale
// ============================================================

/// Locale parsed from a properties file suffix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Locale {
    pub language: String,
    pub country: Option<String>,
    pub variant: Option<String>,
}

impl Locale {
    pub fn new(language: &str, country: Option<&str>, variant: Option<&str>) -> Self {
        Self {
            language: language.to_lowercase(),
            country: country.map(str::to_uppercase),
            variant: variant.map(str::to_string),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.language)?;
        if let Some(country) = &self.country {
            write!(f, "_{}", country)?;
        }
        if let Some(variant) = &self.variant {
            write!(f, "_{}", variant)?;
        }
        Ok(())
    }
}

// ============================================================
// Resource File
// ============================================================

/// One key/value entry of a properties file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub value: String,
    /// 1-based line where the key starts.
    pub line: usize,
}

/// A single locale variant of a bundle, e.g. `Bundle_fr.properties`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    file_name: String,
    bundle_name: String,
    locale: Option<Locale>,
    entries: BTreeMap<String, ResourceEntry>,
}

impl ResourceFile {
    pub fn new(file_name: impl Into<String>, entries: BTreeMap<String, ResourceEntry>) -> Self {
        let file_name = file_name.into();
        let (bundle_name, locale) = parse_bundle_name(&file_name);
        Self {
            file_name,
            bundle_name,
            locale,
            entries,
        }
    }

    /// Build a file from key/value pairs, numbering lines in iteration order.
    pub fn from_pairs<K, V>(file_name: impl Into<String>, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .enumerate()
            .map(|(i, (key, value))| {
                (
                    key.into(),
                    ResourceEntry {
                        value: value.into(),
                        line: i + 1,
                    },
                )
            })
            .collect();
        Self::new(file_name, entries)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Base name with the locale suffix and extension stripped.
    pub fn bundle_name(&self) -> &str {
        &self.bundle_name
    }

    /// `None` for the locale-less root file.
    pub fn locale(&self) -> Option<&Locale> {
        self.locale.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.locale.is_none()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|e| e.value.as_str())
    }

    pub fn entry(&self, key: &str) -> Option<&ResourceEntry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn properties(&self) -> impl Iterator<Item = Property<'_>> {
        self.entries
            .iter()
            .map(move |(key, entry)| Property::new(key, &entry.value, self))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for ResourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name)
    }
}

/// Derive `(bundle_name, locale)` from a file name such as `Bundle_en_GB.properties`.
pub fn parse_bundle_name(file_name: &str) -> (String, Option<Locale>) {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let stem = base.strip_suffix(".properties").unwrap_or(base);

    match BUNDLE_NAME_REGEX.captures(stem) {
        Some(caps) if caps.name("lang").is_none_or(|lang| is_language_code(lang.as_str())) => {
            let bundle_name = caps["base"].to_string();
            let locale = caps.name("lang").map(|lang| {
                Locale::new(
                    lang.as_str(),
                    caps.name("country").map(|m| m.as_str()),
                    caps.name("variant").map(|m| m.as_str()),
                )
            });
            (bundle_name, locale)
        }
        _ => (stem.to_string(), None),
    }
}

// ============================================================
// Property
// ============================================================

/// Transient view of one key/value pair inside its owning file.
#[derive(Debug, Clone, Copy)]
pub struct Property<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub file: &'a ResourceFile,
}

impl<'a> Property<'a> {
    pub fn new(key: &'a str, value: &'a str, file: &'a ResourceFile) -> Self {
        Self { key, value, file }
    }

    /// Same key and file, different value (e.g. a text run extracted from markup).
    pub fn with_value(&self, value: &'a str) -> Self {
        Self {
            key: self.key,
            value,
            file: self.file,
        }
    }

    pub fn location(&self) -> ItemLocation {
        ItemLocation::new(self.file.file_name(), self.key)
            .with_line(self.file.entry(self.key).map(|e| e.line))
    }
}

// ============================================================
// Resource Family
// ============================================================

/// All locale variants of one bundle.
#[derive(Debug, Clone)]
pub struct ResourceFamily {
    base_name: String,
    files: Vec<ResourceFile>,
}

impl ResourceFamily {
    /// Files are ordered by file name. Fails if the files do not share a base name.
    pub fn new(mut files: Vec<ResourceFile>) -> Result<Self, ModelError> {
        let Some(first) = files.first() else {
            return Err(ModelError::EmptyFamily);
        };
        let base_name = first.bundle_name().to_string();

        for file in &files {
            if file.bundle_name() != base_name {
                return Err(ModelError::MixedBaseNames {
                    file_name: file.file_name().to_string(),
                    expected: base_name,
                    actual: file.bundle_name().to_string(),
                });
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(b.file_name()));
        if let Some(pair) = files
            .windows(2)
            .find(|pair| pair[0].file_name() == pair[1].file_name())
        {
            return Err(ModelError::DuplicateFile(pair[0].file_name().to_string()));
        }

        Ok(Self { base_name, files })
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn files(&self) -> &[ResourceFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// The locale-less file, e.g. `Bundle.properties`.
    pub fn root_file(&self) -> Option<&ResourceFile> {
        self.files.iter().find(|f| f.is_root())
    }

    pub fn files_defining<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a ResourceFile> {
        self.files.iter().filter(move |f| f.contains_key(key))
    }

    /// Union of keys across all files, sorted.
    pub fn keys(&self) -> BTreeSet<&str> {
        self.files.iter().flat_map(|f| f.keys()).collect()
    }
}
