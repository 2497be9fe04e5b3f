//! Regex syntax highlighting and match highlighting for regex testers.
//!
//! [`render_syntax`] annotates a (possibly invalid) pattern with markup that
//! shows group nesting, escapes, character-class ranges and errors.
//! [`render_matches`] shows which parts of a sample text the pattern matches.
//! Both are pure functions of their inputs.

pub mod error;
pub mod highlight;
pub mod markup;
pub mod output;
pub mod regex;
pub mod session;

pub use error::{HighlightError, SyntaxError};
pub use markup::{Markup, Style};
pub use session::{MarkupSink, Tester};

/// Syntax markup for `pattern`.
pub fn render_syntax(pattern: &str) -> String {
    regex::classify(pattern).markup.to_string()
}

/// Match markup for `text`, or `text` with only the markup-unsafe
/// substitution applied when `pattern` cannot be used.
pub fn render_matches(pattern: &str, text: &str) -> String {
    highlight::highlight_matches(pattern, text).to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{render_matches, render_syntax};

    #[test]
    fn backreference_needs_an_earlier_group() {
        assert_eq!(render_syntax(r"\1"), r"<b>\1</b>");
        assert_eq!(
            render_syntax(r"(a)\1"),
            r#"<b class="g1">(</b>a<b class="g1">)</b><b>\1</b>"#
        );
    }

    #[test]
    fn output_is_deterministic() {
        let pattern = r"(\w+)\s\1|[^a-f-]{2,3}?";
        assert_eq!(render_syntax(pattern), render_syntax(pattern));
        assert_eq!(
            render_matches(pattern, "the the cat"),
            render_matches(pattern, "the the cat")
        );
    }

    #[test]
    fn matches_use_backreferences() {
        assert_eq!(render_matches(r"(\w+) \1", "a the the b"), "a <b>the the</b> b");
    }

    #[test]
    fn both_panes_read_escapes_alike() {
        // Octal when no group precedes, as the syntax pane shows it
        assert_eq!(render_syntax(r"\101"), r"<b>\101</b>");
        assert_eq!(render_matches(r"\101", "zAz"), "z<b>A</b>z");

        assert_eq!(render_syntax("a{,2}"), "a{,2}");
        assert_eq!(render_matches("a{,2}", "aa{,2}"), "a<b>a{,2}</b>");

        assert_eq!(render_matches(r"\d+", "\u{663}42"), "\u{663}<b>42</b>");
    }
}
