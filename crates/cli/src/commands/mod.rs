pub(crate) mod dialects;
pub(crate) mod parse;
pub(crate) mod translate;

use serde_json::Value;
use tl_core::TlError;

use crate::input::{self, Entry};
use crate::{report_error, FormulaSource, OutputFormat};

/// Per-formula results of one command run.
pub(crate) struct Outcome<T> {
    pub results: Vec<(Entry, T)>,
    pub failed: usize,
    /// Exactly one formula was given inline.
    pub single: bool,
}

/// Apply `f` to every formula of `source`, reporting failures as they occur.
/// Returns `None` when the input itself cannot be read.
pub(crate) fn run<T>(
    source: &FormulaSource,
    output: OutputFormat,
    quiet: bool,
    mut f: impl FnMut(&str) -> Result<T, TlError>,
) -> Option<Outcome<T>> {
    let (entries, single) = match input::read(source) {
        Ok(read) => read,
        Err(msg) => {
            report_error(&msg, output, quiet);
            return None;
        }
    };
    let mut outcome = Outcome {
        results: Vec::with_capacity(entries.len()),
        failed: 0,
        single,
    };
    for entry in entries {
        match f(&entry.text) {
            Ok(v) => outcome.results.push((entry, v)),
            Err(e) => {
                report_formula_error(&entry, &e, output, quiet);
                outcome.failed += 1;
            }
        }
    }
    Some(outcome)
}

fn report_formula_error(entry: &Entry, err: &TlError, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => {
            let mut v = err.to_json_value();
            v["source"] = Value::String(entry.origin.clone());
            v["formula"] = Value::String(entry.text.clone());
            eprintln!("{}", v);
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("{}: {}", entry.origin, err);
            }
        }
    }
}

/// A lone inline formula prints as one object, anything else as an array.
pub(crate) fn print_json(values: Vec<Value>, single: bool) {
    let value = match (single, values.len()) {
        (true, 1) => values.into_iter().next().unwrap_or(Value::Null),
        _ => Value::Array(values),
    };
    let pretty = serde_json::to_string_pretty(&value)
        .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
    println!("{}", pretty);
}
