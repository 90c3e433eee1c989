//! Positional placeholder syntax (`{0}`, `{1,number}`, `{2,choice,0#none|1#one}`).
//!
//! Parsing follows the message-format convention used by resource bundles:
//!
//! - `''` is a literal single quote
//! - a lone `'` opens/closes a quoted section in which `{` and `}` are literal
//! - a placeholder is `{index[,type[,style]]}` with a numeric index and a type
//!   among `number`, `date`, `time`, `choice`
//!
//! [`default_format`] renders a pattern with a representative literal for each
//! placeholder, so markup and spelling checks see realistic text.

use std::{collections::BTreeSet, sync::LazyLock};

use regex::Regex;
use thiserror::Error;

/// Positional placeholder anywhere in a value: `{0`, `{ 12`, ...
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\s*\d").unwrap());

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("Unmatched braces in the pattern.")]
    UnmatchedBraces,
    #[error("can't parse argument number: {0}")]
    InvalidArgumentIndex(String),
    #[error("unknown format type: {0}")]
    UnknownFormatType(String),
    #[error("invalid choice format: {0}")]
    InvalidChoice(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    None,
    Number,
    Date,
    Time,
    Choice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub index: usize,
    pub format_type: FormatType,
    pub style: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Argument(Argument),
}

/// True if the value contains something that looks like a positional placeholder.
pub fn has_placeholder_syntax(value: &str) -> bool {
    PLACEHOLDER_REGEX.is_match(value)
}

/// Replace doubled single quotes with a single one, without interpreting braces.
pub fn unescape_quotes(value: &str) -> String {
    value.replace("''", "'")
}

/// True if the value contains a single quote that is not part of a `''` pair.
pub fn has_lone_quote(value: &str) -> bool {
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\'' {
            if chars.peek() == Some(&'\'') {
                chars.next();
            } else {
                return true;
            }
        }
    }
    false
}

/// Split a pattern into literal text and placeholders.
pub fn parse(pattern: &str) -> Result<Vec<Segment>, FormatError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    // index, type, style
    let mut parts: [String; 3] = Default::default();
    // 0 = literal text, 1..=3 = placeholder part
    let mut part = 0usize;
    let mut in_quote = false;
    let mut brace_depth = 0usize;
    let mut chars = pattern.chars().peekable();

    while let Some(ch) = chars.next() {
        if part == 0 {
            match ch {
                '\'' if chars.peek() == Some(&'\'') => {
                    chars.next();
                    literal.push('\'');
                }
                '\'' => in_quote = !in_quote,
                '{' if !in_quote => part = 1,
                _ => literal.push(ch),
            }
            continue;
        }

        let buf = &mut parts[part - 1];
        if in_quote {
            buf.push(ch);
            if ch == '\'' {
                in_quote = false;
            }
            continue;
        }

        match ch {
            ',' if part < 3 => part += 1,
            '{' => {
                brace_depth += 1;
                buf.push(ch);
            }
            '}' if brace_depth == 0 => {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Argument(make_argument(&parts)?));
                parts = Default::default();
                part = 0;
            }
            '}' => {
                brace_depth -= 1;
                buf.push(ch);
            }
            // leading spaces of the type are skipped
            ' ' if part == 2 && buf.is_empty() => {}
            '\'' => {
                in_quote = true;
                buf.push(ch);
            }
            _ => buf.push(ch),
        }
    }

    if part != 0 {
        return Err(FormatError::UnmatchedBraces);
    }
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

fn make_argument(parts: &[String; 3]) -> Result<Argument, FormatError> {
    let [index, format_type, style] = parts;

    if index.is_empty() || !index.chars().all(|c| c.is_ascii_digit()) {
        return Err(FormatError::InvalidArgumentIndex(index.clone()));
    }
    let index: usize = index
        .parse()
        .map_err(|_| FormatError::InvalidArgumentIndex(index.clone()))?;

    let format_type = match format_type.trim().to_lowercase().as_str() {
        "" => FormatType::None,
        "number" => FormatType::Number,
        "date" => FormatType::Date,
        "time" => FormatType::Time,
        "choice" => FormatType::Choice,
        _ => return Err(FormatError::UnknownFormatType(format_type.clone())),
    };

    let style = (!style.is_empty()).then(|| style.clone());
    if format_type == FormatType::Choice {
        first_choice(style.as_deref().unwrap_or_default())?;
    }

    Ok(Argument {
        index,
        format_type,
        style,
    })
}

/// Text of the first interval of a choice style, e.g. `none` in `0#none|1#one`.
fn first_choice(style: &str) -> Result<&str, FormatError> {
    let mut first = None;
    for interval in style.split('|') {
        let Some(pos) = interval.find(['#', '<', '\u{2264}']) else {
            return Err(FormatError::InvalidChoice(style.to_string()));
        };
        let limit = interval[..pos].trim();
        let valid_limit = limit.parse::<f64>().is_ok() || limit.trim_start_matches('-') == "\u{221E}";
        if !valid_limit {
            return Err(FormatError::InvalidChoice(style.to_string()));
        }
        let separator_len = interval[pos..].chars().next().map_or(1, char::len_utf8);
        first.get_or_insert(&interval[pos + separator_len..]);
    }
    first.ok_or_else(|| FormatError::InvalidChoice(style.to_string()))
}

fn representative(argument: &Argument) -> Result<String, FormatError> {
    match argument.format_type {
        FormatType::None | FormatType::Number => Ok(argument.index.to_string()),
        FormatType::Date => Ok("01/01/1970".to_string()),
        FormatType::Time => Ok("00:00".to_string()),
        FormatType::Choice => {
            let text = first_choice(argument.style.as_deref().unwrap_or_default())?;
            if text.contains('{') {
                default_format(text)
            } else {
                Ok(text.to_string())
            }
        }
    }
}

/// Render `pattern` substituting a representative literal for each placeholder.
///
/// Plain placeholders become their index (`{0}` -> `0`), dates and times a
/// fixed sample, and choices their first interval.
pub fn default_format(pattern: &str) -> Result<String, FormatError> {
    let mut rendered = String::with_capacity(pattern.len());
    for segment in parse(pattern)? {
        match segment {
            Segment::Literal(text) => rendered.push_str(&text),
            Segment::Argument(argument) => rendered.push_str(&representative(&argument)?),
        }
    }
    Ok(rendered)
}

/// Distinct top-level placeholder indexes used by `pattern`.
pub fn placeholder_indexes(pattern: &str) -> Result<BTreeSet<usize>, FormatError> {
    Ok(parse(pattern)?
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Argument(argument) => Some(argument.index),
            Segment::Literal(_) => None,
        })
        .collect())
}
