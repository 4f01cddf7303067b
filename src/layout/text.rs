//! Cell label cleanup.
//!
//! Sheets laid out as diagrams tend to number their labels ("12Review") and
//! pad them with ASCII or full-width spaces. Labels are normalized before
//! they are placed in a region.

use crate::common::xml::escape_markup;

const IDEOGRAPHIC_SPACE: char = '\u{3000}';

/// Normalize a cell value for display.
///
/// In order:
/// 1. the first run of ASCII or full-width (U+3000) spaces becomes one space;
/// 2. the first line-leading digit run followed by a character other than
///    `-` is removed, so `"12Review"` becomes `"Review"` but `"2024-01"` is
///    kept;
/// 3. leading and trailing whitespace is trimmed.
///
/// Only the first occurrence is touched by steps 1 and 2.
pub fn clean_cell_text(value: &str) -> String {
    let collapsed = collapse_first_space_run(value);
    let unnumbered = strip_number_prefix(&collapsed);
    unnumbered
        .trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r' | '\0'))
        .to_string()
}

/// Escape cleaned text for markup and turn its first newline into `<br />`.
///
/// Later newlines are left as they are.
pub fn cell_text_markup(text: &str) -> String {
    escape_markup(text).replacen('\n', "<br />", 1)
}

fn collapse_first_space_run(value: &str) -> String {
    let is_space = |c: char| c == ' ' || c == IDEOGRAPHIC_SPACE;

    let Some(start) = value.find(is_space) else {
        return value.to_string();
    };
    let rest = &value[start..];
    let run_len = rest
        .find(|c: char| !is_space(c))
        .unwrap_or(rest.len());

    let mut out = String::with_capacity(value.len());
    out.push_str(&value[..start]);
    out.push(' ');
    out.push_str(&rest[run_len..]);
    out
}

fn strip_number_prefix(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut line_start = 0;

    loop {
        let digits = bytes[line_start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        let end = line_start + digits;
        // The digit run must be followed by something that is not a `-`
        if digits > 0 && end < bytes.len() && bytes[end] != b'-' {
            let mut out = String::with_capacity(value.len());
            out.push_str(&value[..line_start]);
            out.push_str(&value[end..]);
            return out;
        }

        match memchr::memchr(b'\n', &bytes[line_start..]) {
            Some(nl) => line_start += nl + 1,
            None => return value.to_string(),
        }
    }
}
