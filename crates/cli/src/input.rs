//! Reading formulas from the command line, files, or stdin.

use std::io::Read;
use std::path::Path;

use crate::FormulaSource;

/// One formula and where it came from, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    pub origin: String,
    pub text: String,
}

/// Formula files hold one formula per line; blank lines and lines starting
/// with `#` are skipped.
fn split_lines(name: &str, content: &str) -> Vec<Entry> {
    content
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let text = line.trim();
            if text.is_empty() || text.starts_with('#') {
                None
            } else {
                Some(Entry {
                    origin: format!("{}:{}", name, i + 1),
                    text: text.to_owned(),
                })
            }
        })
        .collect()
}

fn read_stdin() -> Result<String, String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("cannot read stdin: {}", e))?;
    Ok(buf)
}

fn read_file(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path.display(), e))
}

/// Collect the formulas named by `source`. `single` is true when exactly one
/// formula was given inline.
pub(crate) fn read(source: &FormulaSource) -> Result<(Vec<Entry>, bool), String> {
    match (&source.formula, &source.file) {
        (Some(text), None) if text != "-" => Ok((
            vec![Entry {
                origin: "<arg>".to_owned(),
                text: text.clone(),
            }],
            true,
        )),
        (Some(_), None) => Ok((split_lines("<stdin>", &read_stdin()?), false)),
        (None, Some(path)) if path.as_os_str() == "-" => {
            Ok((split_lines("<stdin>", &read_stdin()?), false))
        }
        (None, Some(path)) => {
            let content = read_file(path)?;
            Ok((split_lines(&path.display().to_string(), &content), false))
        }
        _ => Err("give either a formula or --file".to_owned()),
    }
}
