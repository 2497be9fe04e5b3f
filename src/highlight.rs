use std::ops::Range;

use log::debug;

use crate::error::HighlightError;
use crate::markup::{Markup, Style};
use crate::regex::{Matcher, classify};

/// Marks every match of `pattern` in `text`.
///
/// Falls back to the unhighlighted text when the pattern is empty, has
/// syntax errors, or is rejected by the regex engine.
pub fn highlight_matches(pattern: &str, text: &str) -> Markup {
    try_highlight_matches(pattern, text).unwrap_or_else(|err| {
        debug!("not highlighting matches: {err}");
        Markup::from_text(text)
    })
}

pub fn try_highlight_matches(pattern: &str, text: &str) -> Result<Markup, HighlightError> {
    if pattern.is_empty() {
        return Err(HighlightError::EmptyPattern);
    }
    let classification = classify(pattern);
    if !classification.is_valid() {
        return Err(HighlightError::InvalidSyntax(classification.diagnostics));
    }

    let matcher = Matcher::new(sans_trailing_alternator(pattern))?;
    let ranges = matcher.find_all(text)?;
    debug!("{} match(es) for {pattern:?}", ranges.len());
    Ok(mark_ranges(text, &ranges))
}

/// Drops a single unescaped `|` at the very end of `pattern`, which would
/// otherwise match the empty string everywhere while the user is still
/// typing the next alternative.
pub fn sans_trailing_alternator(pattern: &str) -> &str {
    let mut chars = pattern.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '|' if i + 1 == pattern.len() => return &pattern[..i],
            _ => {}
        }
    }
    pattern
}

// Matches alternate between the two matched styles so that adjacent matches
// stay apart. Empty matches become empty spans and still take their turn.
fn mark_ranges(text: &str, ranges: &[Range<usize>]) -> Markup {
    let mut out = Markup::new();
    let mut last_end = 0;

    for (n, range) in ranges.iter().enumerate() {
        let style = if n % 2 == 0 {
            Style::Matched
        } else {
            Style::MatchedAlt
        };
        out.push_text(&text[last_end..range.start]);
        out.push_span(style, &text[range.clone()]);
        last_end = range.end;
    }

    out.push_text(&text[last_end..]);
    out
}
