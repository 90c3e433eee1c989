//! `.properties` parsing with the usual resource bundle semantics.
//!
//! - `#` and `!` start comment lines
//! - a line ending with an odd number of backslashes continues on the next
//!   line, whose leading whitespace is dropped
//! - the key ends at the first unescaped `=`, `:` or whitespace
//! - escapes: `\t`, `\n`, `\r`, `\f`, `\uXXXX`, and `\x` for any other `x`
//! - a later duplicate key replaces an earlier one

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::core::ResourceEntry;

const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropertiesError {
    #[error("malformed \\uXXXX escape on line {line}")]
    MalformedUnicodeEscape { line: usize },
}

pub type Entries = BTreeMap<String, ResourceEntry>;

/// Read and parse a properties file. Content that is not valid UTF-8 is
/// decoded as ISO-8859-1.
pub fn parse_properties_file(path: &Path) -> Result<Entries> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read properties file: {:?}", path))?;
    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(err) => err.into_bytes().iter().map(|&b| b as char).collect(),
    };
    parse_properties(&content)
        .with_context(|| format!("Failed to parse properties file: {:?}", path))
}

pub fn parse_properties(content: &str) -> Result<Entries, PropertiesError> {
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();
    let mut entries = Entries::new();

    let mut index = 0;
    while index < lines.len() {
        let line_number = index + 1;
        let first = lines[index].trim_start_matches(WHITESPACE);
        index += 1;

        if first.is_empty() || first.starts_with('#') || first.starts_with('!') {
            continue;
        }

        let mut logical = first.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            let Some(next) = lines.get(index) else {
                break;
            };
            logical.push_str(next.trim_start_matches(WHITESPACE));
            index += 1;
        }

        let (raw_key, raw_value) = split_key_value(&logical);
        let key = unescape(raw_key, line_number)?;
        let value = unescape(raw_value, line_number)?;
        entries.insert(
            key,
            ResourceEntry {
                value,
                line: line_number,
            },
        );
    }

    Ok(entries)
}

fn ends_with_continuation(line: &str) -> bool {
    let trailing = line.chars().rev().take_while(|&c| c == '\\').count();
    trailing % 2 == 1
}

fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (idx, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\x0c' => {
                key_end = idx;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches(WHITESPACE);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches(WHITESPACE);
    }
    (key, rest)
}

fn unescape(raw: &str, line: usize) -> Result<String, PropertiesError> {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    let mut pending_high: Option<u16> = None;

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            flush_surrogate(&mut result, &mut pending_high);
            result.push(ch);
            continue;
        }
        let Some(escaped) = chars.next() else {
            break;
        };
        if escaped != 'u' {
            flush_surrogate(&mut result, &mut pending_high);
            result.push(match escaped {
                't' => '\t',
                'n' => '\n',
                'r' => '\r',
                'f' => '\x0c',
                other => other,
            });
            continue;
        }

        let hex: String = chars.by_ref().take(4).collect();
        if hex.len() != 4 {
            return Err(PropertiesError::MalformedUnicodeEscape { line });
        }
        let unit = u16::from_str_radix(&hex, 16)
            .map_err(|_| PropertiesError::MalformedUnicodeEscape { line })?;

        match (pending_high.take(), unit) {
            (Some(high), 0xDC00..=0xDFFF) => {
                let code = 0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                result.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            (previous, 0xD800..=0xDBFF) => {
                if previous.is_some() {
                    result.push(char::REPLACEMENT_CHARACTER);
                }
                pending_high = Some(unit);
            }
            (previous, _) => {
                if previous.is_some() {
                    result.push(char::REPLACEMENT_CHARACTER);
                }
                result.push(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
        }
    }
    flush_surrogate(&mut result, &mut pending_high);

    Ok(result)
}

fn flush_surrogate(result: &mut String, pending_high: &mut Option<u16>) {
    if pending_high.take().is_some() {
        result.push(char::REPLACEMENT_CHARACTER);
    }
}
