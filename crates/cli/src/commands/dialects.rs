use serde_json::{json, Value};
use tl_core::{Config, Dialect, TopQuantifier};

use crate::OutputFormat;

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

pub(crate) fn cmd_dialects(config: &Config, output: OutputFormat) {
    match output {
        OutputFormat::Text => {
            for dialect in Dialect::ALL {
                let p = config.profile(dialect);
                let top = match p.top_quantifier {
                    TopQuantifier::Keep => "keep",
                    TopQuantifier::Elide => "elide",
                };
                println!(
                    "{:<8} {:<5} operators={} quantifier_actions={} modality_actions={} fairness={} top_quantifier={}",
                    dialect.name(),
                    if dialect.is_tree() { "tree" } else { "text" },
                    p.operator_letters(),
                    yes_no(p.quantifier_actions),
                    yes_no(p.modality_actions),
                    yes_no(p.fairness),
                    top,
                );
            }
        }
        OutputFormat::Json => {
            let values: Vec<Value> = Dialect::ALL
                .into_iter()
                .map(|dialect| {
                    let profile = serde_json::to_value(config.profile(dialect))
                        .unwrap_or(Value::Null);
                    json!({
                        "name": dialect.name(),
                        "output": if dialect.is_tree() { "tree" } else { "text" },
                        "profile": profile,
                    })
                })
                .collect();
            let pretty = serde_json::to_string_pretty(&values)
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
            println!("{}", pretty);
        }
    }
}
