use crate::markup::{Markup, Node, Style};

const COLOR_RESET: &str = "\x1b[m";

fn color_start(style: Style) -> &'static str {
    match style {
        Style::Error => "\x1b[01;37;41m",
        Style::Group(1) => "\x1b[01;34m",
        Style::Group(2) => "\x1b[01;32m",
        Style::Group(3) => "\x1b[01;35m",
        Style::Group(4) => "\x1b[01;33m",
        Style::Group(_) => "\x1b[01;36m",
        Style::Special => "\x1b[01m",
        Style::Metaclass => "\x1b[36m",
        Style::CharacterClass => "\x1b[32m",
        Style::Range => "\x1b[04;32m",
        Style::Matched => "\x1b[01;31m",
        Style::MatchedAlt => "\x1b[01;35m",
    }
}

/// Renders `markup` with ANSI colours when `use_color` is set, otherwise as
/// markup text. Coloured text is written raw since a terminal has no markup
/// to break.
pub fn render(markup: &Markup, use_color: bool) -> String {
    if !use_color {
        return markup.to_string();
    }
    let mut out = String::new();
    write_nodes(markup.nodes(), &mut Vec::new(), &mut out);
    out
}

// `active` holds the styles of the enclosing spans, restored after each
// nested span resets the terminal.
fn write_nodes(nodes: &[Node], active: &mut Vec<Style>, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Span { style, children } => {
                out.push_str(color_start(*style));
                active.push(*style);
                write_nodes(children, active, out);
                active.pop();
                out.push_str(COLOR_RESET);
                for style in active.iter() {
                    out.push_str(color_start(*style));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::render;
    use crate::highlight::highlight_matches;
    use crate::regex::classify;

    #[test]
    fn markup_without_color() {
        let markup = highlight_matches("a", "<a>");
        assert_eq!(render(&markup, false), "_<b>a</b>_");
    }

    #[test]
    fn colors_matches() {
        let markup = highlight_matches("b", "abc");
        assert_eq!(render(&markup, true), "a\x1b[01;31mb\x1b[mc");
    }

    #[test]
    fn restores_enclosing_style() {
        let markup = classify("[a-z]").markup;
        assert_eq!(
            render(&markup, true),
            "\x1b[32m[a\x1b[04;32m-\x1b[m\x1b[32mz]\x1b[m"
        );
    }
}
