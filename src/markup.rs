//! Styled output tree shared by the syntax classifier and the match
//! highlighter, and its rendering to markup text.

use std::borrow::Cow;
use std::fmt;

/// Replaces `<`, `&` and `>` so text cannot be mistaken for markup.
pub const PLACEHOLDER: char = '_';

/// The fixed style vocabulary a rendering surface has to map to visuals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Error,
    /// Nesting level of a group, cycling through 1..=5.
    Group(u8),
    /// Escapes, anchors, dots, quantifiers and top-level alternators.
    Special,
    /// `\d`, `\s`, `\w` and their negations inside a character class.
    Metaclass,
    CharacterClass,
    /// A hyphen forming a valid range inside a character class.
    Range,
    Matched,
    /// Every second match, so adjacent matches stay distinguishable.
    MatchedAlt,
}

impl Style {
    fn open_tag(self) -> Cow<'static, str> {
        match self {
            Style::Error => Cow::Borrowed(r#"<b class="err">"#),
            Style::Group(depth) => Cow::Owned(format!(r#"<b class="g{depth}">"#)),
            Style::Special | Style::Matched => Cow::Borrowed("<b>"),
            Style::Metaclass => Cow::Borrowed(r#"<b class="mc">"#),
            Style::CharacterClass | Style::MatchedAlt => Cow::Borrowed("<i>"),
            Style::Range => Cow::Borrowed("<u>"),
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            Style::CharacterClass | Style::MatchedAlt => "</i>",
            Style::Range => "</u>",
            _ => "</b>",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Span { style: Style, children: Vec<Node> },
}

impl Node {
    fn has_style(&self, wanted: Style) -> bool {
        match self {
            Node::Text(_) => false,
            Node::Span { style, children } => {
                *style == wanted || children.iter().any(|child| child.has_style(wanted))
            }
        }
    }

    fn push_plain_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Span { children, .. } => {
                children.iter().for_each(|child| child.push_plain_text(out));
            }
        }
    }
}

/// An ordered sequence of text and styled spans.
///
/// Text is stored raw; markup-unsafe characters are only substituted when the
/// tree is rendered through [`fmt::Display`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    nodes: Vec<Node>,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        let mut markup = Self::new();
        markup.push_text(text);
        markup
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of top-level nodes; indices below this stay valid for
    /// [`Markup::restyle`].
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.nodes.last_mut() {
            Some(Node::Text(last)) => last.push_str(text),
            _ => self.nodes.push(Node::Text(text.to_string())),
        }
    }

    pub fn push_span(&mut self, style: Style, text: &str) {
        self.nodes.push(Node::Span {
            style,
            children: vec![Node::Text(text.to_string())],
        });
    }

    pub fn push_nested(&mut self, style: Style, inner: Markup) {
        self.nodes.push(Node::Span {
            style,
            children: inner.nodes,
        });
    }

    /// Changes the style of the top-level span at `index`. Text nodes and
    /// out-of-range indices are left untouched.
    pub fn restyle(&mut self, index: usize, new_style: Style) {
        if let Some(Node::Span { style, .. }) = self.nodes.get_mut(index) {
            *style = new_style;
        }
    }

    pub fn has_style(&self, style: Style) -> bool {
        self.nodes.iter().any(|node| node.has_style(style))
    }

    pub fn has_error(&self) -> bool {
        self.has_style(Style::Error)
    }

    /// Counts top-level spans carrying any of `styles`.
    pub fn count_spans(&self, styles: &[Style]) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Span { style, .. } if styles.contains(style)))
            .count()
    }

    /// The concatenated raw text with all styling dropped.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.nodes.iter().for_each(|node| node.push_plain_text(&mut out));
        out
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_nodes(f: &mut fmt::Formatter<'_>, nodes: &[Node]) -> fmt::Result {
            for node in nodes {
                match node {
                    Node::Text(text) => f.write_str(&escape(text))?,
                    Node::Span { style, children } => {
                        f.write_str(&style.open_tag())?;
                        write_nodes(f, children)?;
                        f.write_str(style.close_tag())?;
                    }
                }
            }
            Ok(())
        }
        write_nodes(f, &self.nodes)
    }
}

fn is_markup_unsafe(c: char) -> bool {
    matches!(c, '<' | '&' | '>')
}

/// Replaces every markup-significant character with [`PLACEHOLDER`].
///
/// The substitution keeps character positions intact and is idempotent.
pub fn escape(text: &str) -> Cow<'_, str> {
    if text.contains(is_markup_unsafe) {
        Cow::Owned(text.replace(is_markup_unsafe, "_"))
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
pub(crate) fn strip_tags(rendered: &str) -> String {
    let mut out = String::new();
    let mut in_tag = false;
    for c in rendered.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Markup, Style, escape, strip_tags};

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape("a<b>&c"), "a_b__c");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn renders_nested_spans() {
        let mut class = Markup::new();
        class.push_text("[a");
        class.push_span(Style::Range, "-");
        class.push_text("z]");

        let mut markup = Markup::new();
        markup.push_span(Style::Group(2), "(");
        markup.push_nested(Style::CharacterClass, class);
        markup.push_text("<");

        assert_eq!(
            markup.to_string(),
            r#"<b class="g2">(</b><i>[a<u>-</u>z]</i>_"#
        );
        assert_eq!(markup.plain_text(), "([a-z]<");
        assert_eq!(strip_tags(&markup.to_string()), "([a-z]_");
    }

    #[test]
    fn adjacent_text_is_merged() {
        let mut markup = Markup::new();
        markup.push_text("ab");
        markup.push_text("");
        markup.push_text("c");
        assert_eq!(markup.len(), 1);
    }

    #[test]
    fn restyle_marks_error() {
        let mut markup = Markup::new();
        markup.push_span(Style::Group(1), "(");
        markup.push_text("a");
        assert!(!markup.has_error());

        markup.restyle(0, Style::Error);
        markup.restyle(1, Style::Error);
        assert!(markup.has_error());
        assert_eq!(markup.to_string(), r#"<b class="err">(</b>a"#);
    }

    proptest::proptest! {
        #[test]
        fn escape_is_idempotent(text in r"[a-z<>&_ ]{0,32}") {
            let once = escape(&text).into_owned();
            proptest::prop_assert_eq!(escape(&once).into_owned(), once);
        }
    }
}
