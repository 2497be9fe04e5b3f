use std::iter::FusedIterator;

use crate::regex::token::{Token, TokenKind};

// Characters that end a literal run. `]` and `}` are ordinary outside a class.
const SPECIAL: &[char] = &['.', '?', '*', '+', '^', '$', '{', '[', '(', ')', '|', '\\'];

type Rule = fn(&str) -> Option<(usize, TokenKind)>;

// Tried in order at every position; the first rule that matches wins.
const RULES: &[Rule] = &[
    character_class,
    escape,
    group_open,
    quantifier,
    literal_run,
    single,
];

/// Splits `pattern` into tokens covering it with no gaps and no overlaps.
pub fn scan(pattern: &str) -> Scanner<'_> {
    Scanner { pattern, pos: 0 }
}

/// Lazy token stream over a pattern. Cloning it restarts from the clone point.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    pattern: &'a str,
    pos: usize,
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let rest = &self.pattern[self.pos..];
        if rest.is_empty() {
            return None;
        }

        // `single` accepts any character, so some rule always matches
        let (len, kind) = RULES.iter().find_map(|rule| rule(rest))?;
        let token = Token {
            text: &rest[..len],
            kind,
            start: self.pos,
        };
        self.pos += len;
        Some(token)
    }
}

impl FusedIterator for Scanner<'_> {}

fn character_class(s: &str) -> Option<(usize, TokenKind)> {
    if !s.starts_with('[') {
        return None;
    }
    let opening = class_opening_len(s);
    let (contents, closed) = class_body(&s[opening..]);
    Some((
        opening + contents + usize::from(closed),
        TokenKind::CharacterClass,
    ))
}

fn escape(s: &str) -> Option<(usize, TokenKind)> {
    let rest = s.strip_prefix('\\')?;
    let len = match rest.as_bytes().first() {
        Some(b'0') => 1 + octal_len(&rest[1..]),
        Some(b'1'..=b'9') => digit_run(rest),
        _ => sequence_len(rest),
    };
    Some((1 + len, TokenKind::Escape))
}

fn group_open(s: &str) -> Option<(usize, TokenKind)> {
    let rest = s.strip_prefix('(')?;
    let len = match rest.strip_prefix('?') {
        Some(after) if after.starts_with([':', '=', '!']) => 3,
        Some(_) => 2,
        None => 1,
    };
    Some((len, TokenKind::GroupOpen))
}

fn quantifier(s: &str) -> Option<(usize, TokenKind)> {
    let len = match s.as_bytes().first()? {
        b'?' | b'*' | b'+' => 1,
        b'{' => interval_len(s)?,
        _ => return None,
    };
    let lazy = usize::from(s[len..].starts_with('?'));
    Some((len + lazy, TokenKind::Quantifier))
}

fn literal_run(s: &str) -> Option<(usize, TokenKind)> {
    let len = s.find(SPECIAL).unwrap_or(s.len());
    (len > 0).then_some((len, TokenKind::Literal))
}

fn single(s: &str) -> Option<(usize, TokenKind)> {
    let c = s.chars().next()?;
    let kind = match c {
        '.' => TokenKind::Dot,
        ')' => TokenKind::GroupClose,
        '|' => TokenKind::Alternator,
        '^' | '$' => TokenKind::Anchor,
        _ => TokenKind::Literal,
    };
    Some((c.len_utf8(), kind))
}

// {m}, {m,} or {m,n}
fn interval_len(s: &str) -> Option<usize> {
    let mut pos = 1;
    let min = digit_run(&s[pos..]);
    if min == 0 {
        return None;
    }
    pos += min;
    if s[pos..].starts_with(',') {
        pos += 1;
        pos += digit_run(&s[pos..]);
    }
    s[pos..].starts_with('}').then_some(pos + 1)
}

pub(crate) fn digit_run(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Length of an octal code at the start of `s`: `[0-3][0-7]{0,2}` or `[4-7][0-7]?`.
pub(crate) fn octal_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let max = match bytes.first() {
        Some(b'0'..=b'3') => 3,
        Some(b'4'..=b'7') => 2,
        _ => return 0,
    };
    1 + bytes[1..]
        .iter()
        .take(max - 1)
        .take_while(|b| matches!(b, b'0'..=b'7'))
        .count()
}

/// Length of what follows a backslash when it is not a digit sequence:
/// `xHH`, `uHHHH`, `cX`, any single character, or nothing at end of input.
pub(crate) fn sequence_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    match bytes.first() {
        Some(b'x') if hex_digits(&bytes[1..], 2) => 3,
        Some(b'u') if hex_digits(&bytes[1..], 4) => 5,
        Some(b'c') if bytes.get(1).is_some_and(u8::is_ascii_alphabetic) => 2,
        _ => rest.chars().next().map_or(0, char::len_utf8),
    }
}

fn hex_digits(bytes: &[u8], count: usize) -> bool {
    bytes.len() >= count && bytes[..count].iter().all(u8::is_ascii_hexdigit)
}

pub(crate) fn class_opening_len(s: &str) -> usize {
    if s.starts_with("[^") { 2 } else { 1 }
}

/// Scans the interior of a character class (after `[` or `[^`).
///
/// Returns the byte length of the contents and whether a closing `]` follows.
/// A `]` right after the opening is a literal, as is anything escaped.
pub(crate) fn class_body(body: &str) -> (usize, bool) {
    let mut pos = usize::from(body.starts_with(']'));
    while let Some(c) = body[pos..].chars().next() {
        match c {
            ']' => return (pos, true),
            '\\' => pos += 1 + body[pos + 1..].chars().next().map_or(0, char::len_utf8),
            _ => pos += c.len_utf8(),
        }
    }
    (pos, false)
}
