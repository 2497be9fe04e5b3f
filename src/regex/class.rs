//! Character classes follow their own rules (ranges, no groups or
//! quantifiers), so each `[...]` token is re-tokenized here on its own.

use crate::error::SyntaxError;
use crate::markup::{Markup, Style};
use crate::regex::scanner::{class_body, class_opening_len, octal_len, sequence_len};
use crate::regex::token::TokenTag;

#[derive(Debug, Clone, Copy)]
struct LastSubToken {
    rangeable: bool,
    tag: TokenTag,
    char_code: Option<u32>,
}

impl LastSubToken {
    fn after(previous: LastSubToken, tag: TokenTag, char_code: Option<u32>) -> Self {
        Self {
            rangeable: previous.tag != TokenTag::RangeHyphen,
            tag,
            char_code,
        }
    }
}

/// Annotates the character class `text`, found at byte `offset` of the
/// pattern. Errors are rendered inline and also appended to `diagnostics`.
///
/// The returned markup is the class body only; callers wrap it in the
/// character-class style.
pub fn parse_class(text: &str, offset: usize, diagnostics: &mut Vec<SyntaxError>) -> Markup {
    let opening = &text[..class_opening_len(text)];
    let (contents_len, closed) = class_body(&text[opening.len()..]);
    let contents = &text[opening.len()..opening.len() + contents_len];
    let contents_offset = offset + opening.len();

    let mut out = Markup::new();
    if closed {
        out.push_text(opening);
    } else {
        out.push_span(Style::Error, opening);
        diagnostics.push(SyntaxError::Lex {
            offset,
            text: opening.to_string(),
            reason: "unterminated character class",
        });
    }

    let mut last = LastSubToken {
        rangeable: false,
        tag: TokenTag::Initial,
        char_code: None,
    };
    let mut pos = 0;

    while let Some(sub) = next_sub_token(contents, pos) {
        let sub_offset = contents_offset + pos;
        pos += sub.len();

        if sub == "-" {
            if !last.rangeable {
                out.push_text(sub);
                last = LastSubToken::after(last, TokenTag::Other, char_code(sub));
                continue;
            }

            // Peek at the right endpoint without moving `pos`; it is
            // classified on its own in the next iteration.
            match next_sub_token(contents, pos) {
                Some(next) => {
                    let reversed = matches!(
                        (last.char_code, char_code(next)),
                        (Some(from), Some(to)) if from > to
                    );
                    if reversed || last.tag == TokenTag::Metaclass || is_metaclass(next) {
                        out.push_span(Style::Error, sub);
                        diagnostics.push(SyntaxError::Range {
                            offset: sub_offset,
                            text: sub.to_string(),
                            reason: if reversed {
                                "character range out of order"
                            } else {
                                "metaclass used as a range endpoint"
                            },
                        });
                    } else {
                        out.push_span(Style::Range, sub);
                    }
                    last = LastSubToken {
                        rangeable: false,
                        tag: TokenTag::RangeHyphen,
                        char_code: None,
                    };
                }
                None if closed => out.push_text(sub),
                None => {
                    out.push_span(Style::Range, sub);
                    break;
                }
            }
        } else if let Some(sequence) = sub.strip_prefix('\\') {
            match sequence {
                // Differs between engines inside a class, so always flagged
                "c" | "u" | "x" => {
                    out.push_span(Style::Error, sub);
                    diagnostics.push(SyntaxError::Lex {
                        offset: sub_offset,
                        text: sub.to_string(),
                        reason: "incomplete escape sequence",
                    });
                    last = LastSubToken::after(last, TokenTag::Other, None);
                }
                "" => {
                    out.push_span(Style::Error, sub);
                    diagnostics.push(SyntaxError::Lex {
                        offset: sub_offset,
                        text: sub.to_string(),
                        reason: "dangling backslash",
                    });
                }
                _ if is_metaclass(sub) => {
                    out.push_span(Style::Metaclass, sub);
                    last = LastSubToken::after(last, TokenTag::Metaclass, None);
                }
                _ => {
                    out.push_span(Style::Special, sub);
                    last = LastSubToken::after(last, TokenTag::Other, char_code(sub));
                }
            }
        } else {
            out.push_text(sub);
            // A run's last character can start a new range even right after one
            let multiple = sub.chars().nth(1).is_some();
            last = LastSubToken {
                rangeable: multiple || last.tag != TokenTag::RangeHyphen,
                tag: TokenTag::Other,
                char_code: sub.chars().next_back().map(u32::from),
            };
        }
    }

    if closed {
        out.push_text("]");
    }
    out
}

// A run of literal characters, a hyphen, or one escape sequence.
pub(crate) fn next_sub_token(contents: &str, pos: usize) -> Option<&str> {
    let rest = &contents[pos..];
    let len = match rest.chars().next()? {
        '-' => 1,
        '\\' => {
            let sequence = &rest[1..];
            let len = match octal_len(sequence) {
                0 => sequence_len(sequence),
                octal => octal,
            };
            1 + len
        }
        _ => rest.find(['\\', '-']).unwrap_or(rest.len()),
    };
    Some(&rest[..len])
}

pub(crate) fn is_metaclass(token: &str) -> bool {
    matches!(token, r"\d" | r"\D" | r"\s" | r"\S" | r"\w" | r"\W")
}

/// The character code a sub-token denotes when used as a range endpoint.
///
/// For a literal run this is its first character. Metaclasses, incomplete
/// sequences and a dangling backslash have none.
pub(crate) fn char_code(token: &str) -> Option<u32> {
    let Some(sequence) = token.strip_prefix('\\') else {
        return token.chars().next().map(u32::from);
    };
    let bytes = sequence.as_bytes();
    match bytes.first()? {
        b'c' if bytes.len() == 2 && bytes[1].is_ascii_alphabetic() => {
            Some(u32::from(bytes[1].to_ascii_uppercase() - b'A' + 1))
        }
        b'x' | b'u' if bytes.len() > 1 => u32::from_str_radix(&sequence[1..], 16).ok(),
        b'0'..=b'7' => u32::from_str_radix(sequence, 8).ok(),
        b'c' | b'u' | b'x' | b'd' | b'D' | b's' | b'S' | b'w' | b'W' => None,
        b'b' => Some(0x08),
        b'f' => Some(0x0c),
        b'n' => Some(0x0a),
        b'r' => Some(0x0d),
        b't' => Some(0x09),
        b'v' => Some(0x0b),
        _ => sequence.chars().next().map(u32::from),
    }
}
