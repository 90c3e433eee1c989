use crate::core::Property;
use crate::issues::{ReportItem, ReportType};

/// Flags values ending in whitespace, which translators rarely intend.
pub fn check_trailing_whitespace(property: &Property<'_>) -> Option<ReportItem> {
    if property.value.trim_end() == property.value {
        return None;
    }
    Some(
        ReportItem::new(
            ReportType::TrailingWhitespace,
            "Trailing whitespace",
            property.location(),
        )
        .with_value(property.value),
    )
}
