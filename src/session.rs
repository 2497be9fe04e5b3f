use crate::highlight::highlight_matches;
use crate::markup::Markup;
use crate::regex::classify;

/// Receives rendered output for the two panes of a regex tester: the
/// pattern itself and the sample text.
pub trait MarkupSink {
    fn set_syntax_markup(&mut self, markup: &Markup);
    fn set_match_markup(&mut self, markup: &Markup);
}

/// Drives a [`MarkupSink`] from pattern and sample text.
///
/// Holds no state between calls apart from its settings; every call
/// re-classifies and re-matches from scratch.
#[derive(Debug, Clone)]
pub struct Tester {
    syntax_highlighting: bool,
}

impl Default for Tester {
    fn default() -> Self {
        Self {
            syntax_highlighting: true,
        }
    }
}

impl Tester {
    pub fn new() -> Self {
        Self::default()
    }

    /// With syntax highlighting off the pattern pane gets the bare pattern.
    /// Match highlighting still refuses patterns with syntax errors.
    pub fn with_syntax_highlighting(mut self, enabled: bool) -> Self {
        self.syntax_highlighting = enabled;
        self
    }

    pub fn highlight_syntax(&self, pattern: &str, sink: &mut impl MarkupSink) {
        let markup = if self.syntax_highlighting {
            classify(pattern).markup
        } else {
            Markup::from_text(pattern)
        };
        sink.set_syntax_markup(&markup);
    }

    pub fn highlight_matches(&self, pattern: &str, text: &str, sink: &mut impl MarkupSink) {
        sink.set_match_markup(&highlight_matches(pattern, text));
    }

    pub fn refresh(&self, pattern: &str, text: &str, sink: &mut impl MarkupSink) {
        self.highlight_syntax(pattern, sink);
        self.highlight_matches(pattern, text, sink);
    }
}
