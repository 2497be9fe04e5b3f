use thiserror::Error;

/// A malformed construct found while classifying a pattern.
///
/// These never abort classification; each one corresponds to an error span
/// in the syntax markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// A token that is malformed on its own: an unterminated character
    /// class, an incomplete escape or a bare `(?`.
    #[error("{reason}: `{text}` at offset {offset}")]
    Lex {
        offset: usize,
        text: String,
        reason: &'static str,
    },

    /// A well-formed token in a place where it is not allowed: unmatched
    /// parentheses, misplaced alternators and quantifiers.
    #[error("{reason}: `{text}` at offset {offset}")]
    Structural {
        offset: usize,
        text: String,
        reason: &'static str,
    },

    /// A reversed or metaclass character-class range, or an interval
    /// quantifier with out-of-order or out-of-bounds values.
    #[error("{reason}: `{text}` at offset {offset}")]
    Range {
        offset: usize,
        text: String,
        reason: &'static str,
    },
}

impl SyntaxError {
    pub fn offset(&self) -> usize {
        match self {
            SyntaxError::Lex { offset, .. }
            | SyntaxError::Structural { offset, .. }
            | SyntaxError::Range { offset, .. } => *offset,
        }
    }
}

/// Why a match highlight could not be produced.
#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("empty pattern")]
    EmptyPattern,

    #[error("pattern has {} syntax error(s)", .0.len())]
    InvalidSyntax(Vec<SyntaxError>),

    #[error("pattern rejected by the regex engine: {0}")]
    Compile(#[source] fancy_regex::Error),

    #[error("regex engine failed while matching: {0}")]
    Execution(#[source] fancy_regex::Error),
}
