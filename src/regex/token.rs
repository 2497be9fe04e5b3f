#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    CharacterClass, // [abc], [^abc], possibly unterminated
    GroupOpen,      // (, (?:, (?=, (?!, or the malformed (?
    GroupClose,     // )
    Escape,         // \d, \x41, \1, a lone trailing \
    Quantifier,     // ?, *, +, {n}, {n,}, {n,m}, each optionally lazy
    Anchor,         // ^ $
    Dot,            // .
    Alternator,     // |
    Literal,        // run of non-special characters, or a lone {
}

/// A slice of the pattern classified as one syntactic unit.
///
/// `start` is the byte offset of `text` within the scanned pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
    pub start: usize,
}

/// What the previously classified token was, as far as the next token cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenTag {
    /// Nothing has been classified yet.
    Initial,
    Other,
    /// A hyphen that formed (or tried to form) a character-class range.
    RangeHyphen,
    Metaclass,
    Alternator,
}
