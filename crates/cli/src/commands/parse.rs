use serde_json::json;

use super::{print_json, run};
use crate::{FormulaSource, OutputFormat};

pub(crate) fn cmd_parse(source: &FormulaSource, output: OutputFormat, quiet: bool) -> bool {
    let Some(outcome) = run(source, output, quiet, tl_core::parse) else {
        return false;
    };
    match output {
        OutputFormat::Text => {
            for (_, formula) in &outcome.results {
                println!("{}", formula);
            }
        }
        OutputFormat::Json => {
            let values = outcome
                .results
                .iter()
                .map(|(entry, formula)| {
                    json!({
                        "formula": entry.text,
                        "tree": tl_core::to_json(formula),
                    })
                })
                .collect();
            print_json(values, outcome.single);
        }
    }
    outcome.failed == 0
}
