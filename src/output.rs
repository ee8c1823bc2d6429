//! Output formatting helpers.
//!
//! The formatting matrix is colon-separated and fixed in order: filename
//! (only when the caller decides more than one source is in play), line
//! number (when `-n` is set), then line content. Count-only and
//! files-with-matches/files-without-match modes bypass this entirely and
//! are rendered by their own small helpers below.

use std::fmt::Write as _;

use colored::Colorize;

use crate::matcher;
use crate::pattern::ParsedPattern;

/// Append one line to `buf`, honoring the filename/line-number prefix rules.
/// `filename` is `None` whenever the caller has decided this source's name
/// should not be shown (single-source runs, stdin).
pub fn format_line(buf: &mut String, filename: Option<&str>, show_line_number: bool, line_no: usize, text: &str) {
    if let Some(name) = filename {
        let _ = write!(buf, "{}:", name);
    }
    if show_line_number {
        let _ = write!(buf, "{}:", line_no);
    }
    let _ = writeln!(buf, "{}", text);
}

/// Render the `-c` per-source count line: `filename:N`, or bare `N` for a
/// single source.
pub fn format_count(buf: &mut String, filename: Option<&str>, count: usize) {
    match filename {
        Some(name) => {
            let _ = writeln!(buf, "{}:{}", name, count);
        }
        None => {
            let _ = writeln!(buf, "{}", count);
        }
    }
}

/// Render a single `-l`/`-L` source-name line.
pub fn format_source_name(buf: &mut String, filename: &str) {
    let _ = writeln!(buf, "{}", filename);
}

/// Highlight the leftmost match of whichever pattern first hits `line`,
/// bolding it in red. Falls back to the plain line when none of the
/// patterns actually has a locatable span (shouldn't happen for a line
/// already known to hit, but `find_first` is defensive regardless).
pub fn highlight_line(line: &str, patterns: &[ParsedPattern], ignore_case: bool) -> String {
    for p in patterns {
        if let Some((start, end)) = matcher::find_first(p, line, ignore_case) {
            let mut out = String::with_capacity(line.len() + 16);
            out.push_str(&line[..start]);
            out.push_str(&line[start..end].red().bold().to_string());
            out.push_str(&line[end..]);
            return out;
        }
    }
    line.to_string()
}
