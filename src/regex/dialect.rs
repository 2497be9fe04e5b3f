//! Rewrites a pattern into the syntax of the host regex engine.
//!
//! Patterns are classified with browser-style rules, which the engine reads
//! differently in a few places. Those constructs are spelled out before
//! compiling: octal, control and identity escapes become code points, stray
//! braces become literals, and shorthand classes, word boundaries and `.`
//! keep their browser meaning.

use crate::regex::class::{char_code, is_metaclass, next_sub_token};
use crate::regex::classifier::backreference_len;
use crate::regex::scanner::{class_body, class_opening_len, octal_len, scan};
use crate::regex::token::TokenKind;

const WORD_BOUNDARY: &str =
    r"(?:(?<=[[:word:]])(?![[:word:]])|(?<![[:word:]])(?=[[:word:]]))";
const NOT_WORD_BOUNDARY: &str =
    r"(?:(?<=[[:word:]])(?=[[:word:]])|(?<![[:word:]])(?![[:word:]]))";
// `.` stops at every line terminator, not just `\n`
const DOT: &str = r"[^\n\r\x{2028}\x{2029}]";

/// Translates `pattern` for the host engine.
///
/// Meant for patterns that classify without errors; anything the classifier
/// would flag is copied through as written.
pub fn to_host_syntax(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut groups = 0;

    for token in scan(pattern) {
        match token.kind {
            TokenKind::CharacterClass => push_class(&mut out, token.text),
            TokenKind::Escape => push_escape(&mut out, token.text, groups),
            TokenKind::Literal => out.push_str(&fancy_regex::escape(token.text)),
            TokenKind::Dot => out.push_str(DOT),
            TokenKind::GroupOpen => {
                if token.text == "(" {
                    groups += 1;
                }
                out.push_str(token.text);
            }
            TokenKind::GroupClose
            | TokenKind::Quantifier
            | TokenKind::Anchor
            | TokenKind::Alternator => out.push_str(token.text),
        }
    }
    out
}

fn push_escape(out: &mut String, text: &str, groups: usize) {
    let sequence = &text[1..];
    match sequence.as_bytes().first() {
        Some(b'1'..=b'9') => {
            let mut end = backreference_len(sequence, groups);
            if end > 0 {
                // Grouped so trailing literal digits stay out of the number
                out.push_str("(?:\\");
                out.push_str(&sequence[..end]);
                out.push(')');
            } else {
                end = octal_len(sequence).max(1);
                push_code(out, &text[..1 + end]);
            }
            out.push_str(&sequence[end..]);
        }
        _ if sequence == "b" => out.push_str(WORD_BOUNDARY),
        _ if sequence == "B" => out.push_str(NOT_WORD_BOUNDARY),
        _ if is_metaclass(text) => {
            out.push('[');
            out.push_str(metaclass_items(sequence));
            out.push(']');
        }
        _ => push_code(out, text),
    }
}

fn push_class(out: &mut String, text: &str) {
    let opening = &text[..class_opening_len(text)];
    let (len, closed) = class_body(&text[opening.len()..]);
    if !closed {
        out.push_str(text);
        return;
    }
    let contents = &text[opening.len()..opening.len() + len];
    out.push_str(opening);

    // Mirrors the class parser: a hyphen is a range operator only between
    // two endpoints, and the right endpoint cannot open another range unless
    // it is a longer literal run.
    let mut rangeable = false;
    let mut after_range = false;
    let mut pos = 0;
    while let Some(sub) = next_sub_token(contents, pos) {
        pos += sub.len();
        if sub == "-" && rangeable && pos < contents.len() {
            out.push('-');
            rangeable = false;
            after_range = true;
            continue;
        }

        let run = !sub.starts_with('\\');
        if !run && is_metaclass(sub) {
            out.push_str(metaclass_items(&sub[1..]));
        } else if !run {
            push_code(out, sub);
        } else {
            for c in sub.chars() {
                if matches!(c, '\\' | '[' | ']' | '^' | '-' | '&' | '~') {
                    out.push('\\');
                }
                out.push(c);
            }
        }
        rangeable = !after_range || (run && sub.chars().nth(1).is_some());
        after_range = false;
    }
    out.push(']');
}

// Bracket items for a shorthand class. Digits and word characters are ASCII
// only; whitespace keeps its Unicode meaning.
fn metaclass_items(sequence: &str) -> &'static str {
    match sequence {
        "d" => "[:digit:]",
        "D" => "[:^digit:]",
        "w" => "[:word:]",
        "W" => "[:^word:]",
        "S" => r"\S",
        _ => r"\s",
    }
}

// An escape that denotes one character, written as its code point.
fn push_code(out: &mut String, escape: &str) {
    match char_code(escape) {
        Some(code) => out.push_str(&format!(r"\x{{{code:X}}}")),
        None => out.push_str(escape),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::to_host_syntax;

    #[test]
    fn plain_syntax_is_unchanged() {
        assert_eq!(to_host_syntax("(a|bc)+?x{2,3}$"), "(a|bc)+?x{2,3}$");
        assert_eq!(to_host_syntax("(?:a)(?=b)(?!c)"), "(?:a)(?=b)(?!c)");
    }

    #[test]
    fn stray_braces_are_literal() {
        assert_eq!(to_host_syntax("a{,2}"), r"a\{,2\}");
        assert_eq!(to_host_syntax("{"), r"\{");
        assert_eq!(to_host_syntax("a]#"), r"a\]\#");
    }

    #[test]
    fn octal_and_control_escapes_become_code_points() {
        assert_eq!(to_host_syntax(r"\101"), r"\x{41}");
        assert_eq!(to_host_syntax(r"\0"), r"\x{0}");
        assert_eq!(to_host_syntax(r"\cJ\cj"), r"\x{A}\x{A}");
        assert_eq!(to_host_syntax(r"\x41é\t"), r"\x{41}é\x{9}");
    }

    #[test]
    fn numbered_escape_without_group_is_octal() {
        assert_eq!(to_host_syntax(r"\1"), r"\x{1}");
        assert_eq!(to_host_syntax(r"\18"), r"\x{1}8");
        assert_eq!(to_host_syntax(r"\8"), r"\x{38}");
    }

    #[test]
    fn backreference_keeps_trailing_digits_apart() {
        assert_eq!(to_host_syntax(r"(a)\1"), r"(a)(?:\1)");
        assert_eq!(to_host_syntax(r"(a)\12"), r"(a)(?:\1)2");
        assert_eq!(to_host_syntax(r"(?:a)\1"), r"(?:a)\x{1}");
    }

    #[test]
    fn identity_escapes_become_literals() {
        assert_eq!(to_host_syntax(r"\y\é\<"), r"\x{79}\x{E9}\x{3C}");
        assert_eq!(to_host_syntax(r"\.\\"), r"\x{2E}\x{5C}");
    }

    #[test]
    fn shorthand_classes_are_ascii() {
        assert_eq!(
            to_host_syntax(r"\d\D\w\W\s"),
            r"[[:digit:]][[:^digit:]][[:word:]][[:^word:]][\s]"
        );
        assert_eq!(to_host_syntax(r"[^\d_]"), r"[^[:digit:]_]");
    }

    #[test]
    fn word_boundaries_and_dot() {
        assert_eq!(to_host_syntax(r"\b"), super::WORD_BOUNDARY);
        assert_eq!(to_host_syntax(r"\B"), super::NOT_WORD_BOUNDARY);
        assert_eq!(to_host_syntax("a.b"), format!("a{}b", super::DOT));
    }

    #[test]
    fn class_contents() {
        assert_eq!(to_host_syntax("[a-z]"), "[a-z]");
        assert_eq!(to_host_syntax("[a-zA-Z]"), "[a-zA-Z]");
        assert_eq!(to_host_syntax("[-a-]"), r"[\-a\-]");
        assert_eq!(to_host_syntax("[a-z-9]"), r"[a-z\-9]");
        assert_eq!(to_host_syntax("[[&&~]"), r"[\[\&\&\~]");
        assert_eq!(to_host_syntax("[]a]"), r"[\]a]");
        assert_eq!(to_host_syntax(r"[\b\101-\x5A]"), r"[\x{8}\x{41}-\x{5A}]");
    }
}
