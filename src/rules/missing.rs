//! Keys present in the reference file but absent from a locale file.
//!
//! The reference is the root file when the family has one, otherwise the
//! union of all files.

use crate::core::ResourceFamily;
use crate::issues::{ItemLocation, ReportItem, ReportType};

/// Report every locale file lacking `key`, if `key` is a reference key.
pub fn check_missing_translations(family: &ResourceFamily, key: &str) -> Vec<ReportItem> {
    let reference = match family.root_file() {
        Some(root) => root.get(key),
        None => family.files_defining(key).next().and_then(|f| f.get(key)),
    };
    let Some(reference_value) = reference else {
        return Vec::new();
    };

    family
        .files()
        .iter()
        .filter(|file| !file.is_root() && !file.contains_key(key))
        .map(|file| {
            let locale = file
                .locale()
                .map(|l| l.to_string())
                .unwrap_or_default();
            ReportItem::new(
                ReportType::MissingTranslation,
                format!("Missing translation for key {} in locale {}", key, locale),
                ItemLocation::new(file.file_name(), key),
            )
            .with_value(reference_value)
        })
        .collect()
}
