//! Tag structure agreement of one html key across the locales of a family.

use crate::core::{
    Property, ResourceFamily,
    consensus::find_consensus,
    markup::{format_signature, value_signature},
};
use crate::issues::{ReportItem, ReportType};

/// Compare the tag signature of `key` in every file defining it.
///
/// Values that do not parse are skipped. Each file outside the majority
/// signature gets one INCOHERENT_TAGS warning.
pub fn check_tag_coherence(family: &ResourceFamily, key: &str) -> Vec<ReportItem> {
    let votes = family
        .files_defining(key)
        .filter_map(|file| {
            let value = file.get(key)?;
            if value.is_empty() {
                return None;
            }
            value_signature(value).map(|signature| (file, signature))
        })
        .collect();

    let Some(consensus) = find_consensus(votes) else {
        return Vec::new();
    };

    let majority = format_signature(&consensus.majority);
    let majority_files = consensus
        .majority_files
        .iter()
        .map(|f| f.file_name())
        .collect::<Vec<_>>()
        .join(", ");

    consensus
        .dissenters
        .into_iter()
        .filter_map(|(file, signature)| {
            let value = file.get(key)?;
            let property = Property::new(key, value, file);
            Some(
                ReportItem::new(
                    ReportType::IncoherentTags,
                    format!(
                        "Incoherent usage of html tags: {} versus {} in {}",
                        format_signature(&signature),
                        majority,
                        majority_files
                    ),
                    property.location(),
                )
                .with_value(value),
            )
        })
        .collect()
}
