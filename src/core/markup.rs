//! Wrapping resource values into a parseable XHTML document.
//!
//! A value is validated as a fragment placed inside `<body><div>...</div></body>`
//! of a fixed template. The template declares the usual HTML named entities so
//! `&nbsp;` and friends resolve under a plain XML parser.

use std::sync::LazyLock;

use regex::Regex;
use roxmltree::{Document, Node, ParsingOptions};
use thiserror::Error;

/// Deepest element nesting accepted in a wrapped document, template included.
pub const MAX_NESTING_DEPTH: usize = 128;

/// One or more `<li>` elements and nothing else.
static LIST_ITEMS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:<li>.*</li>\s*)+$").unwrap());

/// Non-standard `data-*` attributes, double or single quoted.
static DATA_ATTRIBUTE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"data-[-a-z0-9_:.]+=("[^"]*"|'[^']*')"#).unwrap());

const TEMPLATE_PREFIX: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    "\n<!DOCTYPE html [\n",
    "<!ENTITY nbsp \"&#160;\">\n",
    "<!ENTITY copy \"&#169;\">\n",
    "<!ENTITY cent \"&#162;\">\n",
    "<!ENTITY pound \"&#163;\">\n",
    "<!ENTITY yen \"&#165;\">\n",
    "<!ENTITY euro \"&#8364;\">\n",
    "<!ENTITY sect \"&#167;\">\n",
    "<!ENTITY reg \"&#174;\">\n",
    "<!ENTITY trade \"&#8482;\">\n",
    "<!ENTITY ndash \"&#8211;\">\n",
    "<!ENTITY mdash \"&#8212;\">\n",
    "<!ENTITY laquo \"&#171;\">\n",
    "<!ENTITY raquo \"&#187;\">\n",
    "<!ENTITY hellip \"&#8230;\">\n",
    "]>\n",
    r#"<html xmlns="http://www.w3.org/1999/xhtml"><head><title>l10n</title></head><body><div>"#,
);

const TEMPLATE_SUFFIX: &str = "</div></body></html>";

/// Elements the template itself relies on. Every schema profile must define them.
pub const TEMPLATE_ELEMENTS: &[&str] = &["html", "head", "title", "body", "div"];

/// True if the trimmed value is a bare sequence of `<li>` elements.
pub fn is_list_items(value: &str) -> bool {
    LIST_ITEMS_REGEX.is_match(value.trim())
}

/// Apply the list-item workaround: bare `<li>` sequences get a synthetic `<ul>`.
pub fn apply_list_workaround(value: &str) -> String {
    if is_list_items(value) {
        format!("<ul>{}</ul>", value.trim())
    } else {
        value.to_string()
    }
}

pub fn strip_data_attributes(value: &str) -> String {
    DATA_ATTRIBUTE_REGEX.replace_all(value, "").into_owned()
}

pub fn wrap_in_template(fragment: &str) -> String {
    let mut document = String::with_capacity(TEMPLATE_PREFIX.len() + fragment.len() + TEMPLATE_SUFFIX.len());
    document.push_str(TEMPLATE_PREFIX);
    document.push_str(fragment);
    document.push_str(TEMPLATE_SUFFIX);
    document
}

#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("element nesting deeper than {max} levels")]
    TooDeep { max: usize },
    #[error(transparent)]
    Parse(#[from] roxmltree::Error),
}

/// Upper bound of the element nesting in `text`, from a scan of its tags.
///
/// Declarations, processing instructions and self-closing tags do not nest.
pub fn nesting_depth(text: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0;
    let mut rest = text;
    while let Some(start) = rest.find('<') {
        rest = &rest[start + 1..];
        let end = rest.find('>').unwrap_or(rest.len());
        let tag = &rest[..end];
        rest = &rest[end..];

        if tag.starts_with('/') {
            depth = depth.saturating_sub(1);
        } else if !tag.starts_with(['!', '?']) && !tag.ends_with('/') {
            depth += 1;
            deepest = deepest.max(depth);
        }
    }
    deepest
}

/// Parse a full document produced by [`wrap_in_template`].
///
/// Documents nested deeper than [`MAX_NESTING_DEPTH`] are rejected unparsed.
pub fn parse_document(text: &str) -> Result<Document<'_>, MarkupError> {
    if nesting_depth(text) > MAX_NESTING_DEPTH {
        return Err(MarkupError::TooDeep {
            max: MAX_NESTING_DEPTH,
        });
    }
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(text, options)?)
}

/// The `<div>` the fragment was placed in.
pub fn fragment_root<'a, 'input>(document: &'a Document<'input>) -> Option<Node<'a, 'input>> {
    let body = document
        .root_element()
        .children()
        .find(|n| n.has_tag_name("body"))?;
    body.children().find(|n| n.has_tag_name("div"))
}

/// Visible text runs under `node`, trimmed, in document order.
pub fn text_runs(node: Node<'_, '_>) -> Vec<String> {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Structural signature of a node: child tag names sorted at each level,
/// each followed by its own signature.
pub fn tag_signature(node: Node<'_, '_>) -> Vec<String> {
    let mut signature = Vec::new();
    collect_signature(node, &mut signature);
    signature
}

fn collect_signature(node: Node<'_, '_>, signature: &mut Vec<String>) {
    let mut children: Vec<Node<'_, '_>> = node.children().filter(|n| n.is_element()).collect();
    children.sort_by(|a, b| a.tag_name().name().cmp(b.tag_name().name()));
    for child in children {
        signature.push(child.tag_name().name().to_string());
        collect_signature(child, signature);
    }
}

/// Signature of a raw value wrapped in the template, `None` if it does not parse.
pub fn value_signature(value: &str) -> Option<Vec<String>> {
    let text = wrap_in_template(value);
    let document = parse_document(&text).ok()?;
    fragment_root(&document).map(tag_signature)
}

/// Render a signature for messages, e.g. `<b><i>`.
pub fn format_signature(signature: &[String]) -> String {
    if signature.is_empty() {
        "(no tags)".to_string()
    } else {
        signature.iter().map(|tag| format!("<{}>", tag)).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::markup::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_items_detection() {
        assert!(is_list_items("<li>one</li>"));
        assert!(is_list_items("  <li>one</li><li>two</li>\n"));
        assert!(is_list_items("<li>a</li> <li>b</li> <li>c</li>"));
        assert!(!is_list_items("<ul><li>a</li></ul>"));
        assert!(!is_list_items("text <li>a</li>"));
        assert!(!is_list_items(""));
    }

    #[test]
    fn test_list_workaround() {
        assert_eq!(
            apply_list_workaround(" <li>a</li><li>b</li> "),
            "<ul><li>a</li><li>b</li></ul>"
        );
        assert_eq!(apply_list_workaround("<p>x</p>"), "<p>x</p>");
    }

    #[test]
    fn test_strip_data_attributes() {
        assert_eq!(
            strip_data_attributes(r#"<a data-track="nav" href="x">y</a>"#),
            r#"<a  href="x">y</a>"#
        );
        assert_eq!(
            strip_data_attributes("<span data-x.y:z='1'>t</span>"),
            "<span >t</span>"
        );
        assert_eq!(strip_data_attributes("data is fine"), "data is fine");
    }

    #[test]
    fn test_entities_resolve() {
        let text = wrap_in_template("a&nbsp;b &euro; &hellip;");
        let doc = parse_document(&text).unwrap();
        let runs = text_runs(fragment_root(&doc).unwrap());
        assert_eq!(runs, vec!["a\u{a0}b \u{20ac} \u{2026}"]);
    }

    #[test]
    fn test_unknown_entity_fails() {
        let text = wrap_in_template("&bogus;");
        assert!(parse_document(&text).is_err());
    }

    #[test]
    fn test_nesting_depth() {
        assert_eq!(nesting_depth("plain"), 0);
        assert_eq!(nesting_depth("<b>x</b><i><br/>y</i>"), 1);
        assert_eq!(nesting_depth("<ul><li><b>x</b></li></ul>"), 3);
        // html, body, div
        assert_eq!(nesting_depth(&wrap_in_template("")), 3);
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let deep = format!("{}x{}", "<span>".repeat(1000), "</span>".repeat(1000));
        let text = wrap_in_template(&deep);
        assert!(matches!(
            parse_document(&text),
            Err(MarkupError::TooDeep { max: MAX_NESTING_DEPTH })
        ));
        assert!(value_signature(&deep).is_none());

        let shallow = format!("{}x{}", "<span>".repeat(100), "</span>".repeat(100));
        assert!(parse_document(&wrap_in_template(&shallow)).is_ok());
    }

    #[test]
    fn test_malformed_markup_fails() {
        let text = wrap_in_template("<b>unclosed");
        assert!(parse_document(&text).is_err());
    }

    #[test]
    fn test_signature_sorted_per_level() {
        assert_eq!(
            value_signature("<i>x</i> and <b>y <span>z</span></b>").unwrap(),
            vec!["b", "span", "i"]
        );
        assert_eq!(value_signature("plain").unwrap(), Vec::<String>::new());
        assert!(value_signature("<b>broken").is_none());
    }

    #[test]
    fn test_signature_ignores_attributes_and_text() {
        assert_eq!(
            value_signature(r#"<a href="x">Google</a>"#),
            value_signature(r#"<a href="y" title="t">Gogole</a>"#)
        );
    }

    #[test]
    fn test_format_signature() {
        assert_eq!(format_signature(&["b".to_string(), "i".to_string()]), "<b><i>");
        assert_eq!(format_signature(&[]), "(no tags)");
    }
}
