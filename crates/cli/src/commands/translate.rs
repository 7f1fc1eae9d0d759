use serde_json::{json, Value};
use tl_core::{Dialect, Profile, TlError, Translation};

use super::{print_json, run};
use crate::{FormulaSource, OutputFormat};

fn translate_one(text: &str, dialect: Dialect, profile: &Profile) -> Result<Translation, TlError> {
    let formula = tl_core::parse(text)?;
    tl_core::translate(&formula, dialect, profile)
}

pub(crate) fn cmd_translate(
    source: &FormulaSource,
    dialect: Dialect,
    profile: &Profile,
    output: OutputFormat,
    quiet: bool,
) -> bool {
    let Some(outcome) = run(source, output, quiet, |text| {
        translate_one(text, dialect, profile)
    }) else {
        return false;
    };
    match output {
        OutputFormat::Text => {
            for (_, translation) in &outcome.results {
                println!("{}", translation);
            }
        }
        OutputFormat::Json => {
            let values = outcome
                .results
                .iter()
                .map(|(entry, translation)| {
                    let result = match translation {
                        Translation::Tree(f) => tl_core::to_json(f),
                        Translation::Text(s) => Value::String(s.clone()),
                    };
                    json!({
                        "dialect": dialect.name(),
                        "formula": entry.text,
                        "result": result,
                    })
                })
                .collect();
            print_json(values, outcome.single);
        }
    }
    outcome.failed == 0
}

pub(crate) fn cmd_check(
    source: &FormulaSource,
    dialect: Dialect,
    profile: &Profile,
    output: OutputFormat,
    quiet: bool,
) -> bool {
    let Some(outcome) = run(source, output, quiet, |text| {
        translate_one(text, dialect, profile)
    }) else {
        return false;
    };
    let valid = outcome.results.len();
    let total = valid + outcome.failed;
    match output {
        OutputFormat::Text => {
            if !quiet {
                println!("{} of {} formula(s) valid for {}", valid, total, dialect);
            }
        }
        OutputFormat::Json => {
            let summary = json!({
                "checked": total,
                "dialect": dialect.name(),
                "failed": outcome.failed,
            });
            println!("{}", summary);
        }
    }
    outcome.failed == 0
}
