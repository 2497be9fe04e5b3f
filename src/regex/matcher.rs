use std::ops::Range;

use log::trace;

use crate::error::HighlightError;
use crate::regex::dialect::to_host_syntax;

/// Thin adapter over the host regex engine. Matching is the engine's; this
/// only translates the pattern and collects match spans.
#[derive(Debug, Clone)]
pub struct Matcher {
    backend: fancy_regex::Regex,
}

impl Matcher {
    /// Compiles a pattern written in the syntax the classifier reads.
    pub fn new(pattern: &str) -> Result<Self, HighlightError> {
        let translated = to_host_syntax(pattern);
        trace!("compiling {pattern:?} as {translated:?}");
        let backend = fancy_regex::Regex::new(&translated).map_err(HighlightError::Compile)?;
        Ok(Self { backend })
    }

    /// Byte ranges of every non-overlapping match in `text`, left to right.
    pub fn find_all(&self, text: &str) -> Result<Vec<Range<usize>>, HighlightError> {
        let mut out = Vec::new();
        for matched in self.backend.find_iter(text) {
            let matched = matched.map_err(HighlightError::Execution)?;
            out.push(matched.start()..matched.end());
        }
        Ok(out)
    }
}
