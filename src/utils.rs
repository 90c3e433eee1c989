//! Common utility functions shared across the codebase.

/// Checks if the text contains at least one Unicode alphabetic character.
///
/// Returns false for empty strings, pure numbers, or pure symbols.
///
/// # Examples
///
/// ```
/// use l10nlint::utils::contains_alphabetic;
///
/// assert!(contains_alphabetic("Hello"));
/// assert!(contains_alphabetic("你好"));
/// assert!(!contains_alphabetic("123"));
/// assert!(!contains_alphabetic(""));
/// ```
pub fn contains_alphabetic(text: &str) -> bool {
    text.chars().any(|c| c.is_alphabetic())
}

/// Shortens `text` to at most `max_chars` characters, ending with "..." when cut.
///
/// # Examples
///
/// ```
/// use l10nlint::utils::abbreviate;
///
/// assert_eq!(abbreviate("short", 10), "short");
/// assert_eq!(abbreviate("a rather long message", 10), "a rathe...");
/// ```
pub fn abbreviate(text: &str, max_chars: usize) -> String {
    const ELLIPSIS: &str = "...";

    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut result: String = text.chars().take(keep).collect();
    result.push_str(ELLIPSIS);
    result
}

#[cfg(test)]
mod tests {
    use crate::utils::*;

    #[test]
    fn test_contains_alphabetic() {
        assert!(contains_alphabetic("Hello"));
        assert!(contains_alphabetic("Hello123"));
        assert!(contains_alphabetic("  abc  "));

        assert!(!contains_alphabetic("123"));
        assert!(!contains_alphabetic("---"));
        assert!(!contains_alphabetic("   "));
        assert!(!contains_alphabetic(""));
    }

    #[test]
    fn test_abbreviate() {
        assert_eq!(abbreviate("", 5), "");
        assert_eq!(abbreviate("exactly10!", 10), "exactly10!");
        assert_eq!(abbreviate("exactly 11!", 10), "exactly...");
        assert_eq!(abbreviate("日本語のメッセージです", 6), "日本語...");
        assert_eq!(abbreviate(&"x".repeat(500), 140).chars().count(), 140);
    }
}
