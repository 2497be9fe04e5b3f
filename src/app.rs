use anyhow::{Context, Result};
use log::{debug, warn};
use regex_highlight::output::render;
use regex_highlight::regex::classify;
use regex_highlight::{Markup, MarkupSink, Style, Tester};

use crate::cli::{Config, Show, resolve_use_color};
use crate::input::{Input, resolve_inputs};

/// Prints each pane it is handed to stdout.
struct TerminalSink {
    use_color: bool,
    header: Option<String>,
    matched: bool,
}

impl MarkupSink for TerminalSink {
    fn set_syntax_markup(&mut self, markup: &Markup) {
        println!("{}", render(markup, self.use_color));
    }

    fn set_match_markup(&mut self, markup: &Markup) {
        if markup.count_spans(&[Style::Matched, Style::MatchedAlt]) > 0 {
            self.matched = true;
        }
        if let Some(header) = &self.header {
            println!("{header}:");
        }
        let rendered = render(markup, self.use_color);
        if rendered.ends_with('\n') {
            print!("{rendered}");
        } else {
            println!("{rendered}");
        }
    }
}

/// Runs the tester over the configured inputs. Returns the exit status:
/// 0 when something was highlighted as a match (or, with `--syntax`, when
/// the pattern is valid), 1 otherwise.
pub fn run(cfg: Config) -> Result<i32> {
    let tester = Tester::new().with_syntax_highlighting(cfg.syntax_highlighting);
    let mut sink = TerminalSink {
        use_color: resolve_use_color(&cfg.color),
        header: None,
        matched: false,
    };

    let classification = classify(&cfg.pattern);
    if cfg.explain {
        for diagnostic in &classification.diagnostics {
            eprintln!("{}: {diagnostic}", cfg.pattern);
        }
    }

    if cfg.show != Show::Matches {
        tester.highlight_syntax(&cfg.pattern, &mut sink);
    }
    if cfg.show == Show::Syntax {
        return Ok(if classification.is_valid() { 0 } else { 1 });
    }

    let inputs = resolve_inputs(&cfg.paths, cfg.recursive);
    let show_header = inputs.len() > 1 || (cfg.recursive && !cfg.paths.is_empty());

    for input in inputs {
        let text = match (&input, input.read()) {
            (_, Ok(text)) => text,
            (Input::Stdin, Err(err)) => {
                return Err(err).context("failed to read sample text from stdin");
            }
            (Input::File(path), Err(err)) => {
                warn!("cannot read {}: {err}", path.display());
                continue;
            }
        };
        let name = input.name();
        debug!("highlighting {} bytes from {name}", text.len());
        sink.header = show_header.then_some(name);
        tester.highlight_matches(&cfg.pattern, &text, &mut sink);
    }

    Ok(if sink.matched { 0 } else { 1 })
}
