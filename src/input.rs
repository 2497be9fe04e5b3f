use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use log::warn;

/// One source of sample text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// Name shown above the input's match pane.
    pub fn name(&self) -> String {
        match self {
            Input::Stdin => "(standard input)".to_string(),
            Input::File(path) => path.to_string_lossy().into_owned(),
        }
    }

    pub fn read(&self) -> io::Result<String> {
        match self {
            Input::Stdin => {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                Ok(buffer)
            }
            Input::File(path) => fs::read_to_string(path),
        }
    }
}

/// Expands command-line operands into inputs, in order.
///
/// No operands, or an operand of `-`, means standard input. With `recursive`
/// a directory stands for every file below it, sorted by path; otherwise
/// anything that is not a regular file is skipped.
pub fn resolve_inputs(operands: &[String], recursive: bool) -> Vec<Input> {
    if operands.is_empty() {
        return vec![Input::Stdin];
    }

    let mut inputs = Vec::new();
    for operand in operands {
        let root = Path::new(operand);
        if operand == "-" {
            inputs.push(Input::Stdin);
        } else if recursive && root.is_dir() {
            let mut files = Vec::new();
            walk(root, &mut files);
            files.sort();
            inputs.extend(files.into_iter().map(Input::File));
        } else if root.is_file() {
            inputs.push(Input::File(root.to_path_buf()));
        } else {
            warn!("skipping {operand}: not a file");
        }
    }
    inputs
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("cannot read directory {}: {err}", dir.display());
            return;
        }
    };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            walk(&path, files);
        } else if path.is_file() {
            files.push(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::{Input, resolve_inputs};

    fn operands(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("regex-highlight-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("b.txt"), "b").unwrap();
        fs::write(dir.join("nested").join("a.txt"), "a").unwrap();
        dir
    }

    #[test]
    fn no_operands_reads_stdin() {
        assert_eq!(resolve_inputs(&[], false), vec![Input::Stdin]);
        assert_eq!(resolve_inputs(&[], true), vec![Input::Stdin]);
    }

    #[test]
    fn dash_is_stdin_in_place() {
        let dir = scratch_dir("dash");
        let file = dir.join("b.txt");
        let inputs = resolve_inputs(&operands(&["-", file.to_str().unwrap(), "-"]), false);
        assert_eq!(inputs, vec![Input::Stdin, Input::File(file), Input::Stdin]);
    }

    #[test]
    fn directories_need_recursion() {
        let dir = scratch_dir("walk");
        let root = operands(&[dir.to_str().unwrap()]);

        assert_eq!(resolve_inputs(&root, false), vec![]);
        assert_eq!(
            resolve_inputs(&root, true),
            vec![
                Input::File(dir.join("b.txt")),
                Input::File(dir.join("nested").join("a.txt")),
            ]
        );
    }

    #[test]
    fn missing_paths_are_skipped() {
        let inputs = resolve_inputs(&operands(&["/nonexistent/regex-highlight"]), true);
        assert_eq!(inputs, vec![]);
    }

    #[test]
    fn reads_files_and_names_inputs() {
        let dir = scratch_dir("read");
        let file = Input::File(dir.join("b.txt"));
        assert_eq!(file.read().unwrap(), "b");
        assert_eq!(file.name(), dir.join("b.txt").to_string_lossy());
        assert_eq!(Input::Stdin.name(), "(standard input)");
    }
}
