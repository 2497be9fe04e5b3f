use std::io;
use std::io::IsTerminal;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Always,
    Never,
    Auto,
}

/// Which panes to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Show {
    Both,
    Syntax,
    Matches,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub pattern: String,
    pub show: Show,
    pub syntax_highlighting: bool,
    pub explain: bool,
    pub recursive: bool,
    pub color: ColorWhen,
    pub paths: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("missing pattern, expected -E <pattern>")]
    MissingPattern,
    #[error("invalid --color value `{0}`, expected always, never or auto")]
    InvalidColor(String),
    #[error("unknown option `{0}`")]
    UnknownOption(String),
}

pub const USAGE: &str = "usage: regex-highlight [--syntax | --matches] [--no-syntax-highlighting] \
                         [--explain] [-r] [--color=always|never|auto] -E <pattern> [path...]";

/// Parses `args` as returned by `std::env::args`, program name first.
pub fn parse_args(args: Vec<String>) -> Result<Config, CliError> {
    let mut pattern = None;
    let mut show = Show::Both;
    let mut syntax_highlighting = true;
    let mut explain = false;
    let mut recursive = false;
    let mut color = ColorWhen::Never;
    let mut paths = Vec::new();

    let mut args = args.into_iter().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-E" => pattern = Some(args.next().ok_or(CliError::MissingPattern)?),
            "--syntax" => show = Show::Syntax,
            "--matches" => show = Show::Matches,
            "--no-syntax-highlighting" => syntax_highlighting = false,
            "--explain" => explain = true,
            "-r" => recursive = true,
            _ => {
                if let Some(when) = arg.strip_prefix("--color=") {
                    color = match when {
                        "always" => ColorWhen::Always,
                        "never" => ColorWhen::Never,
                        "auto" => ColorWhen::Auto,
                        _ => return Err(CliError::InvalidColor(when.to_string())),
                    };
                } else if arg.starts_with('-') && arg.len() > 1 {
                    return Err(CliError::UnknownOption(arg));
                } else {
                    paths.push(arg);
                }
            }
        }
    }

    Ok(Config {
        pattern: pattern.ok_or(CliError::MissingPattern)?,
        show,
        syntax_highlighting,
        explain,
        recursive,
        color,
        paths,
    })
}

pub fn resolve_use_color(color: &ColorWhen) -> bool {
    match color {
        ColorWhen::Always => true,
        ColorWhen::Never => false,
        ColorWhen::Auto => io::stdout().is_terminal(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{CliError, ColorWhen, Config, Show, parse_args};

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("regex-highlight")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn defaults() {
        assert_eq!(
            parse_args(args(&["-E", "a+"])),
            Ok(Config {
                pattern: "a+".into(),
                show: Show::Both,
                syntax_highlighting: true,
                explain: false,
                recursive: false,
                color: ColorWhen::Never,
                paths: vec![],
            })
        );
    }

    #[test]
    fn options_and_paths() {
        let cfg = parse_args(args(&[
            "--syntax",
            "-r",
            "--color=always",
            "-E",
            "-x",
            "dir",
            "file.txt",
        ]))
        .unwrap();
        assert_eq!(cfg.pattern, "-x");
        assert_eq!(cfg.show, Show::Syntax);
        assert!(cfg.recursive);
        assert_eq!(cfg.color, ColorWhen::Always);
        assert_eq!(cfg.paths, vec!["dir", "file.txt"]);
    }

    #[test]
    fn stdin_dash_is_a_path() {
        assert_eq!(parse_args(args(&["-E", "a", "-"])).unwrap().paths, vec!["-"]);
    }

    #[test]
    fn errors() {
        assert_eq!(parse_args(args(&[])), Err(CliError::MissingPattern));
        assert_eq!(parse_args(args(&["-E"])), Err(CliError::MissingPattern));
        assert_eq!(
            parse_args(args(&["--color=red", "-E", "a"])),
            Err(CliError::InvalidColor("red".into()))
        );
        assert_eq!(
            parse_args(args(&["-o", "-E", "a"])),
            Err(CliError::UnknownOption("-o".into()))
        );
    }
}
