use log::trace;

use crate::error::SyntaxError;
use crate::markup::{Markup, Style};
use crate::regex::class::parse_class;
use crate::regex::scanner::{octal_len, scan};
use crate::regex::token::{Token, TokenKind, TokenTag};

// Largest repetition count accepted in an interval quantifier.
const MAX_INTERVAL: u32 = 65535;

const GROUP_STYLES: u8 = 5;

/// Result of classifying one pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub markup: Markup,
    /// One entry per error span in `markup`, ordered by offset.
    pub diagnostics: Vec<SyntaxError>,
    pub capturing_groups: usize,
    /// Group numbers of the escapes resolved as backreferences, in order.
    pub backreferences: Vec<usize>,
}

impl Classification {
    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Annotates `pattern` with syntax markup.
///
/// Every construct is classified even when the pattern is invalid; problems
/// become error spans rather than failures.
pub fn classify(pattern: &str) -> Classification {
    let mut classifier = Classifier::new();
    for token in scan(pattern) {
        trace!("classifying {:?} {:?} at {}", token.kind, token.text, token.start);
        classifier.push(token);
    }
    classifier.finish()
}

#[derive(Debug, Clone, Copy)]
struct LastToken {
    quantifiable: bool,
    tag: TokenTag,
    /// Set after a group closes so a quantifier takes the group's style.
    style: Option<Style>,
}

impl LastToken {
    fn new(quantifiable: bool) -> Self {
        Self {
            quantifiable,
            tag: TokenTag::Other,
            style: None,
        }
    }
}

#[derive(Debug)]
struct OpenGroup<'a> {
    // Index of the opening span in the output, for the unterminated-group pass
    output_index: usize,
    opening: &'a str,
    offset: usize,
}

struct Classifier<'a> {
    out: Markup,
    diagnostics: Vec<SyntaxError>,
    last: LastToken,
    capturing_group_count: usize,
    group_style_depth: u8,
    open_groups: Vec<OpenGroup<'a>>,
    backreferences: Vec<usize>,
}

impl<'a> Classifier<'a> {
    fn new() -> Self {
        Self {
            out: Markup::new(),
            diagnostics: Vec::new(),
            last: LastToken {
                quantifiable: false,
                tag: TokenTag::Initial,
                style: None,
            },
            capturing_group_count: 0,
            // The first group advances this to 1
            group_style_depth: GROUP_STYLES,
            open_groups: Vec::new(),
            backreferences: Vec::new(),
        }
    }

    fn push(&mut self, token: Token<'a>) {
        match token.kind {
            TokenKind::CharacterClass => {
                let inner = parse_class(token.text, token.start, &mut self.diagnostics);
                self.out.push_nested(Style::CharacterClass, inner);
                self.last = LastToken::new(true);
            }
            TokenKind::GroupOpen => self.group_open(token),
            TokenKind::GroupClose => self.group_close(token),
            TokenKind::Escape => self.escape(token),
            TokenKind::Quantifier => self.quantifier(token),
            TokenKind::Alternator => self.alternator(token),
            TokenKind::Anchor => {
                self.out.push_span(Style::Special, token.text);
                self.last = LastToken::new(false);
            }
            TokenKind::Dot => {
                self.out.push_span(Style::Special, token.text);
                self.last = LastToken::new(true);
            }
            TokenKind::Literal => {
                self.out.push_text(token.text);
                self.last = LastToken::new(true);
            }
        }
    }

    fn flag(&mut self, text: &str, error: SyntaxError) {
        self.out.push_span(Style::Error, text);
        self.diagnostics.push(error);
    }

    fn group_open(&mut self, token: Token<'a>) {
        self.last = LastToken::new(false);

        // A bare `(?` counts neither towards depth nor towards captures
        if token.text == "(?" {
            self.flag(
                token.text,
                SyntaxError::Lex {
                    offset: token.start,
                    text: token.text.to_string(),
                    reason: "invalid group type",
                },
            );
            return;
        }

        if token.text == "(" {
            self.capturing_group_count += 1;
        }
        self.group_style_depth = self.group_style_depth % GROUP_STYLES + 1;
        self.open_groups.push(OpenGroup {
            output_index: self.out.len(),
            opening: token.text,
            offset: token.start,
        });
        self.out.push_span(Style::Group(self.group_style_depth), token.text);
    }

    fn group_close(&mut self, token: Token<'a>) {
        let Some(group) = self.open_groups.pop() else {
            self.flag(
                token.text,
                SyntaxError::Structural {
                    offset: token.start,
                    text: token.text.to_string(),
                    reason: "unmatched closing parenthesis",
                },
            );
            self.last = LastToken::new(false);
            return;
        };

        let style = Style::Group(self.group_style_depth);
        self.out.push_span(style, token.text);
        // Quantified lookaheads add nothing and are rejected by some flavors
        let lookahead = group.opening.starts_with("(?=") || group.opening.starts_with("(?!");
        self.last = LastToken {
            quantifiable: !lookahead,
            tag: TokenTag::Other,
            style: Some(style),
        };
        self.group_style_depth = match self.group_style_depth {
            1 => GROUP_STYLES,
            depth => depth - 1,
        };
    }

    fn escape(&mut self, token: Token<'a>) {
        let sequence = &token.text[1..];
        match sequence.as_bytes().first() {
            Some(b'1'..=b'9') => self.numbered_escape(token),
            Some(
                b'0' | b'b' | b'B' | b'c' | b'd' | b'D' | b'f' | b'n' | b'r' | b's' | b'S' | b't'
                | b'u' | b'v' | b'w' | b'W' | b'x',
            ) => {
                if matches!(sequence, "c" | "u" | "x") {
                    self.flag(
                        token.text,
                        SyntaxError::Lex {
                            offset: token.start,
                            text: token.text.to_string(),
                            reason: "incomplete escape sequence",
                        },
                    );
                    self.last = LastToken::new(false);
                    return;
                }
                self.out.push_span(Style::Special, token.text);
                // Word boundaries are zero-width
                self.last = LastToken::new(!matches!(sequence, "b" | "B"));
            }
            None => {
                self.flag(
                    token.text,
                    SyntaxError::Lex {
                        offset: token.start,
                        text: token.text.to_string(),
                        reason: "dangling backslash",
                    },
                );
                self.last = LastToken::new(false);
            }
            Some(_) => {
                // Escaped literal character
                self.out.push_text(token.text);
                self.last = LastToken::new(true);
            }
        }
    }

    /// `\N...` is a backreference to the longest digit prefix that names a
    /// group opened so far, followed by literal digits. With no such prefix
    /// it is an octal escape.
    fn numbered_escape(&mut self, token: Token<'a>) {
        let digits = &token.text[1..];
        let mut end = backreference_len(digits, self.capturing_group_count);
        if end > 0 {
            self.backreferences.push(group_number(&digits[..end]));
        } else {
            // 1-3 take up to two more octal digits, 4-7 one more, 8 and 9 none
            end = octal_len(digits).max(1);
        }
        self.out.push_span(Style::Special, &token.text[..1 + end]);
        self.out.push_text(&digits[end..]);
        self.last = LastToken::new(true);
    }

    fn quantifier(&mut self, token: Token<'a>) {
        if !self.last.quantifiable {
            self.flag(
                token.text,
                SyntaxError::Structural {
                    offset: token.start,
                    text: token.text.to_string(),
                    reason: "quantifier follows nothing quantifiable",
                },
            );
        } else if let Some(reason) = interval_error(token.text) {
            self.flag(
                token.text,
                SyntaxError::Range {
                    offset: token.start,
                    text: token.text.to_string(),
                    reason,
                },
            );
        } else {
            let style = self.last.style.unwrap_or(Style::Special);
            self.out.push_span(style, token.text);
        }
        self.last = LastToken::new(false);
    }

    fn alternator(&mut self, token: Token<'a>) {
        let leading = self.last.tag == TokenTag::Initial;
        let doubled = self.last.tag == TokenTag::Alternator && self.open_groups.is_empty();
        if leading || doubled {
            self.flag(
                token.text,
                SyntaxError::Structural {
                    offset: token.start,
                    text: token.text.to_string(),
                    reason: "empty alternative truncates the pattern",
                },
            );
        } else if self.open_groups.is_empty() {
            self.out.push_span(Style::Special, token.text);
        } else {
            self.out.push_span(Style::Group(self.group_style_depth), token.text);
        }
        self.last = LastToken {
            quantifiable: false,
            tag: TokenTag::Alternator,
            style: None,
        };
    }

    fn finish(mut self) -> Classification {
        for group in self.open_groups.drain(..) {
            self.out.restyle(group.output_index, Style::Error);
            self.diagnostics.push(SyntaxError::Structural {
                offset: group.offset,
                text: group.opening.to_string(),
                reason: "unterminated group",
            });
        }
        self.diagnostics.sort_by_key(SyntaxError::offset);

        Classification {
            markup: self.out,
            diagnostics: self.diagnostics,
            capturing_groups: self.capturing_group_count,
            backreferences: self.backreferences,
        }
    }
}

/// Length of the longest prefix of `digits` naming one of the first `groups`
/// capturing groups, or 0 when there is none.
pub(crate) fn backreference_len(digits: &str, groups: usize) -> usize {
    let mut end = digits.len();
    while end > 0 && group_number(&digits[..end]) > groups {
        end -= 1;
    }
    end
}

// Digit strings too long for usize can never name a group.
fn group_number(digits: &str) -> usize {
    digits.parse().unwrap_or(usize::MAX)
}

fn interval_error(quantifier: &str) -> Option<&'static str> {
    let body = quantifier.strip_prefix('{')?;
    let body = &body[..body.find('}')?];
    let bound = |value: &str| value.parse::<u32>().ok().filter(|v| *v <= MAX_INTERVAL);

    let (min, max) = match body.split_once(',') {
        Some((min, max)) => (min, (!max.is_empty()).then_some(max)),
        None => (body, None),
    };
    let Some(min) = bound(min) else {
        return Some("interval bound above 65535");
    };
    match max.map(bound) {
        Some(None) => Some("interval bound above 65535"),
        Some(Some(max)) if min > max => Some("interval bounds out of order"),
        _ => None,
    }
}
