//! Report formatting and printing utilities.
//!
//! Findings are displayed in cargo-style format. Kept separate from the
//! engine so l10nlint can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::commands::{CheckSummary, CommandResult, CommandSummary, InitSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{ReportItem, ReportSummary, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Maximum display width of a value excerpt.
const MAX_VALUE_WIDTH: usize = 80;

/// Print findings in cargo-style format to stdout.
///
/// INFO findings (excluded keys) are only shown when `verbose` is set.
pub fn report(items: &[ReportItem], verbose: bool) {
    report_to(items, verbose, &mut io::stdout().lock());
}

/// Print findings to a custom writer.
pub fn report_to<W: Write>(items: &[ReportItem], verbose: bool, writer: &mut W) {
    let shown: Vec<&ReportItem> = items
        .iter()
        .filter(|item| verbose || item.severity() != Severity::Info)
        .collect();
    if shown.is_empty() {
        return;
    }

    for item in shown {
        print_item(item, writer);
    }

    print_summary(items, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(files: usize) {
    print_success_to(files, &mut io::stdout().lock());
}

pub fn print_success_to<W: Write>(files: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} properties {} - no issues found",
            files,
            if files == 1 { "file" } else { "files" }
        )
        .green()
    );
}

/// Print a warning about directory entries that could not be read.
pub fn print_skipped_warning_to<W: Write>(count: usize, writer: &mut W) {
    if count > 0 {
        let _ = writeln!(
            writer,
            "{} {} path(s) could not be read",
            "warning:".bold().yellow(),
            count
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_item<W: Write>(item: &ReportItem, writer: &mut W) {
    let severity_str = match item.severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warn => "warning".bold().yellow(),
        Severity::Info => "info".bold().blue(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        item.description(),
        item.kind().to_string().dimmed().cyan()
    );

    let location = item.location();
    match location.line {
        Some(line) => {
            let _ = writeln!(writer, "  {} {}:{}", "-->".blue(), location.file_name, line);
        }
        None => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), location.file_name);
        }
    }

    let _ = writeln!(writer, "   {} {} {}", "=".blue(), "key:".bold(), location.key);
    if let Some(value) = item.value() {
        let _ = writeln!(
            writer,
            "   {} {} \"{}\"",
            "=".blue(),
            "value:".bold(),
            excerpt(value, MAX_VALUE_WIDTH)
        );
    }
    if let Some(formatted) = item.formatted_value() {
        let _ = writeln!(
            writer,
            "   {} {} \"{}\"",
            "=".blue(),
            "rendered:".bold(),
            excerpt(formatted, MAX_VALUE_WIDTH)
        );
    }

    let _ = writeln!(writer); // Empty line between items
}

/// Single-line excerpt of `text` no wider than `max_width` columns.
fn excerpt(text: &str, max_width: usize) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t");
    if UnicodeWidthStr::width(escaped.as_str()) <= max_width {
        return escaped;
    }

    const ELLIPSIS: &str = "...";
    let budget = max_width.saturating_sub(ELLIPSIS.len());
    let mut width = 0;
    let mut result = String::new();
    for ch in escaped.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > budget {
            break;
        }
        width += ch_width;
        result.push(ch);
    }
    result.push_str(ELLIPSIS);
    result
}

fn print_summary<W: Write>(items: &[ReportItem], writer: &mut W) {
    let summary = ReportSummary::from_items(items);
    let total_problems = summary.errors + summary.warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} problems ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            summary.errors,
            if summary.errors == 1 { "error" } else { "errors" }.red(),
            summary.warnings,
            if summary.warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Check(summary) => print_check(result, summary, verbose),
        CommandSummary::Init(summary) => print_init(summary),
    }
}

fn print_check(result: &CommandResult, summary: &CheckSummary, verbose: bool) {
    report(&result.items, verbose);

    let totals = ReportSummary::from_items(&result.items);
    if totals.errors + totals.warnings == 0 {
        print_success(summary.files_checked);
    } else if result.error_count > 0 && !result.exit_on_errors {
        println!("{} errors ignored (ignoreFailure)", "note:".bold());
    }

    print_skipped_warning_to(summary.skipped_count, &mut io::stderr().lock());
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
    }
}

// ============================================================
// Tests
// ============================================================
