//! Placeholder agreement of one key across the locales of a family.

use std::collections::BTreeSet;

use crate::core::{Property, ResourceFamily, consensus::find_consensus, format};
use crate::issues::{ReportItem, ReportType};
use crate::rules::ParametricValidator;

fn format_indexes(indexes: &BTreeSet<usize>) -> String {
    if indexes.is_empty() {
        "(none)".to_string()
    } else {
        indexes
            .iter()
            .map(|i| format!("{{{}}}", i))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Compare the placeholder indexes used by `key` in every file defining it.
///
/// Runs only when at least one value is parametric. Values with malformed
/// placeholders are skipped.
pub fn check_parameter_coherence(
    family: &ResourceFamily,
    key: &str,
    parametric: &ParametricValidator,
) -> Vec<ReportItem> {
    let defined: Vec<_> = family
        .files_defining(key)
        .filter_map(|file| file.get(key).map(|value| (file, value)))
        .filter(|(_, value)| !value.is_empty())
        .collect();

    if !defined
        .iter()
        .any(|(_, value)| parametric.is_parametric(key, value))
    {
        return Vec::new();
    }

    let votes = defined
        .iter()
        .filter_map(|(file, value)| {
            format::placeholder_indexes(value)
                .ok()
                .map(|indexes| (*file, indexes))
        })
        .collect();

    let Some(consensus) = find_consensus(votes) else {
        return Vec::new();
    };

    let majority = format_indexes(&consensus.majority);
    let majority_files = consensus
        .majority_files
        .iter()
        .map(|f| f.file_name())
        .collect::<Vec<_>>()
        .join(", ");

    consensus
        .dissenters
        .into_iter()
        .filter_map(|(file, indexes)| {
            let value = file.get(key)?;
            Some(
                ReportItem::new(
                    ReportType::IncoherentParameters,
                    format!(
                        "Incoherent placeholders: {} versus {} in {}",
                        format_indexes(&indexes),
                        majority,
                        majority_files
                    ),
                    Property::new(key, value, file).location(),
                )
                .with_value(value),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::core::{KeyMatcher, ResourceFamily, ResourceFile};
    use crate::rules::parameters::*;
    use pretty_assertions::assert_eq;

    fn family(key: &str, files: &[(&str, &str)]) -> ResourceFamily {
        ResourceFamily::new(
            files
                .iter()
                .map(|(name, value)| ResourceFile::from_pairs(*name, [(key, *value)]))
                .collect(),
        )
        .unwrap()
    }

    fn check(family: &ResourceFamily, key: &str) -> Vec<ReportItem> {
        let parametric = ParametricValidator::new(KeyMatcher::new(&[".param."]).unwrap());
        check_parameter_coherence(family, key, &parametric)
    }

    #[test]
    fn test_missing_placeholder() {
        let family = family(
            "k",
            &[
                ("Bundle.properties", "{0} of {1}"),
                ("Bundle_fr.properties", "{0} sur {1}"),
                ("Bundle_de.properties", "{0} von"),
            ],
        );
        let items = check(&family, "k");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].file_name(), "Bundle_de.properties");
        assert_eq!(
            items[0].description(),
            "Incoherent placeholders: {0} versus {0} {1} in Bundle.properties, Bundle_fr.properties"
        );
    }

    #[test]
    fn test_reordering_is_coherent() {
        let family = family(
            "k",
            &[
                ("Bundle_en.properties", "{0} of {1}"),
                ("Bundle_ja.properties", "{1}の{0}"),
            ],
        );
        assert!(check(&family, "k").is_empty());
    }

    #[test]
    fn test_plain_values_not_compared() {
        let family = family(
            "k",
            &[
                ("Bundle_en.properties", "Hello"),
                ("Bundle_fr.properties", "Bonjour"),
            ],
        );
        assert!(check(&family, "k").is_empty());
    }

    #[test]
    fn test_malformed_values_skipped() {
        let family = family(
            "k",
            &[
                ("Bundle_en.properties", "{0} items"),
                ("Bundle_fr.properties", "{0 articles"),
            ],
        );
        assert!(check(&family, "k").is_empty());
    }

    #[test]
    fn test_parametric_key_without_placeholders() {
        let family = family(
            "a.param.k",
            &[
                ("Bundle.properties", "No items"),
                ("Bundle_fr.properties", "{0} articles"),
            ],
        );
        let items = check(&family, "a.param.k");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].file_name(), "Bundle_fr.properties");
        assert!(items[0].description().starts_with("Incoherent placeholders: {0} versus (none)"));
    }
}
