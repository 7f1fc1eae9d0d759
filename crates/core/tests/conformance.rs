//! Runs the translation cases in conformance/translations.txt.

use std::path::Path;
use tl_core::{parse, translate, Dialect};

struct Case {
    formula: String,
    line: usize,
    expectations: Vec<(String, String)>,
}

fn load_cases(src: &str) -> Vec<Case> {
    let mut cases: Vec<Case> = Vec::new();
    for (i, line) in src.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = line
            .split_once(": ")
            .unwrap_or_else(|| panic!("line {}: expected `key: value`", i + 1));
        if key == "formula" {
            cases.push(Case {
                formula: value.to_owned(),
                line: i + 1,
                expectations: Vec::new(),
            });
        } else {
            let case = cases
                .last_mut()
                .unwrap_or_else(|| panic!("line {}: expectation before any formula", i + 1));
            case.expectations.push((key.to_owned(), value.to_owned()));
        }
    }
    cases
}

fn render<T: std::fmt::Display>(res: Result<T, tl_core::TlError>) -> String {
    match res {
        Ok(v) => v.to_string(),
        Err(e) => format!("error: {}", e),
    }
}

#[test]
fn translation_conformance_cases() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../conformance/translations.txt");
    let src = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    let cases = load_cases(&src);
    assert!(!cases.is_empty(), "no conformance cases found");

    let mut failures = Vec::new();
    let mut checked = 0usize;
    for case in &cases {
        let parsed = parse(&case.formula);
        for (key, expected) in &case.expectations {
            let actual = if key == "parse" {
                render(parsed.clone())
            } else {
                let dialect: Dialect = key
                    .parse()
                    .unwrap_or_else(|e| panic!("line {}: {}", case.line, e));
                match &parsed {
                    Ok(f) => render(translate(f, dialect, &dialect.default_profile())),
                    Err(e) => format!("error: {}", e),
                }
            };
            checked += 1;
            if &actual != expected {
                failures.push(format!(
                    "line {}: {} [{}]\n  expected: {}\n  actual:   {}",
                    case.line, case.formula, key, expected, actual
                ));
            }
        }
    }

    eprintln!("{} expectations checked", checked);
    assert!(
        failures.is_empty(),
        "{} conformance failure(s):\n{}",
        failures.len(),
        failures.join("\n")
    );
}
