use tl_core::{
    arctl, ctl, its_ctl, its_ltl, parse, parse_raw, to_json, translate_str, Config, Dialect,
    Formula, Pos, ProfileOverride, TlError, TopQuantifier,
};

#[test]
fn unquoted_and_quoted_names() {
    assert_eq!(its_ltl(&parse("p").unwrap()).unwrap(), "\"p=1\"");
    assert_eq!(its_ltl(&parse("\"p\"").unwrap()).unwrap(), "\"p\"");
}

#[test]
fn reserved_words_need_quotes() {
    for src in ["A", "EF", "p & U"] {
        let err = parse(src).unwrap_err();
        assert_eq!(err.kind(), "naming", "{}", src);
    }
    assert_eq!(parse("\"A\"").unwrap(), Formula::prop("A"));
}

#[test]
fn nested_temporal_operators_fail_every_tree_dialect() {
    let f = parse("AXFp").unwrap();
    assert!(matches!(ctl(&f), Err(TlError::Dialect { dialect: Dialect::Ctl, .. })));
    assert!(matches!(arctl(&f), Err(TlError::Dialect { dialect: Dialect::Arctl, .. })));

    let ag = ctl(&parse("AG(p)").unwrap()).unwrap();
    assert_eq!(ag.kind(), "AG");
    assert_eq!(ag.children(), vec![&Formula::var("p")]);
}

#[test]
fn global_action_conflict_is_a_restriction_error() {
    let err = parse("A{a} F p & E G q [b]").unwrap_err();
    assert_eq!(err.kind(), "restriction");
    assert_eq!(err.pos(), Some(Pos::new(1, 1)));
    assert!(err
        .to_string()
        .contains("cannot propagate global action restriction to an already restricted modality"));
}

#[test]
fn end_to_end_tool_syntax() {
    let f = parse("A(X p) & E F \"q\"").unwrap();
    assert_eq!(its_ctl(&f).unwrap(), "(AX(\"p=1\"))&&(EF(\"q\"));");
    let g = parse("X p & F \"q\"").unwrap();
    assert_eq!(its_ltl(&g).unwrap(), "(X(\"p=1\"))&&(F(\"q\"))");
}

/// ITS syntax has no place for an action label, so the labeled form fails
/// instead of silently dropping `{a}`.
#[test]
fn quantifier_actions_are_rejected_by_text_dialects() {
    let f = parse("A{a}(X p) & E F \"q\"").unwrap();
    assert_eq!(
        its_ctl(&f).unwrap_err().to_string(),
        "invalid its-ctl formula (actions not allowed)"
    );
}

#[test]
fn raw_tree_keeps_clauses_in_place() {
    let raw = parse_raw("A G p [a]").unwrap();
    assert_eq!(raw.global.len(), 1);
    assert_eq!(raw.global_pos, Pos::new(1, 7));
}

#[test]
fn config_changes_translation() {
    let mut config = Config::default();
    config.dialect.insert(
        Dialect::ItsLtl,
        ProfileOverride {
            top_quantifier: Some(TopQuantifier::Elide),
            ..ProfileOverride::default()
        },
    );
    let out = translate_str("A (p U q)", Dialect::ItsLtl, &config).unwrap();
    assert_eq!(out.as_text(), Some("((\"p=1\")U(\"q=1\"))"));
}

#[test]
fn json_tree_of_normalized_formula() {
    let f = arctl(&parse("E{a} (p U 'q')").unwrap()).unwrap();
    let v = to_json(&f);
    assert_eq!(v["kind"], "EU");
    assert_eq!(v["actions"]["value"], "a");
    assert_eq!(v["children"][1]["escaped"], true);
}

#[test]
fn public_types_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Formula>();
    assert_send_sync::<Config>();
    assert_send_sync::<tl_core::Profile>();
    assert_send_sync::<TlError>();
}
