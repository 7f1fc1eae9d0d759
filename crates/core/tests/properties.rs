use proptest::prelude::*;
use tl_core::{
    ctl, its_ctl, parse, Action, BinaryOp, FairEntry, FairTarget, Formula, Quantifier,
    Restriction, UnaryOp,
};

fn leaf() -> impl Strategy<Value = Formula> {
    prop_oneof![
        any::<bool>().prop_map(Formula::Bool),
        "[a-z][a-z0-9_]{0,4}".prop_map(Formula::var),
        "[a-zA-Z0-9_ .=<>]{1,6}".prop_map(Formula::prop),
    ]
}

/// Same-connective children are merged the way the parser chains them.
fn flatten(items: Vec<Formula>, and: bool) -> Formula {
    let mut flat = Vec::new();
    for f in items {
        match f {
            Formula::And(nested) if and => flat.extend(nested),
            Formula::Or(nested) if !and => flat.extend(nested),
            other => flat.push(other),
        }
    }
    if and {
        Formula::And(flat)
    } else {
        Formula::Or(flat)
    }
}

fn quantifier() -> impl Strategy<Value = Quantifier> {
    prop_oneof![Just(Quantifier::A), Just(Quantifier::E)]
}

fn action_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9_]{0,3}",
        "[a-zA-Z0-9_ .=-]{1,5}",
        Just("True".to_owned()),
    ]
}

fn flatten_actions(items: Vec<Action>, and: bool) -> Action {
    let mut flat = Vec::new();
    for a in items {
        match a {
            Action::And(nested) if and => flat.extend(nested),
            Action::Or(nested) if !and => flat.extend(nested),
            other => flat.push(other),
        }
    }
    if and {
        Action::And(flat)
    } else {
        Action::Or(flat)
    }
}

fn action() -> impl Strategy<Value = Action> {
    action_name()
        .prop_map(Action::Name)
        .prop_recursive(2, 8, 3, |inner| {
            prop_oneof![
                inner.clone().prop_map(|a| Action::Not(Box::new(a))),
                prop::collection::vec(inner.clone(), 2..4)
                    .prop_map(|v| flatten_actions(v, true)),
                prop::collection::vec(inner.clone(), 2..4)
                    .prop_map(|v| flatten_actions(v, false)),
                (inner.clone(), inner.clone())
                    .prop_map(|(l, r)| Action::Imply(Box::new(l), Box::new(r))),
                (inner.clone(), inner)
                    .prop_map(|(l, r)| Action::Iff(Box::new(l), Box::new(r))),
            ]
        })
}

fn fair_target(inner: BoxedStrategy<Formula>) -> impl Strategy<Value = FairTarget> {
    prop_oneof![
        action().prop_map(FairTarget::Actions),
        inner.prop_map(|f| FairTarget::Formula(Box::new(f))),
    ]
}

fn conditioned_entry(inner: BoxedStrategy<Formula>) -> impl Strategy<Value = FairEntry> {
    (inner.clone(), fair_target(inner)).prop_map(|(c, then)| FairEntry {
        condition: Some(c),
        then,
    })
}

/// Resolved fairness: `ufair` never has a condition, `wfair`/`sfair` always do.
fn restriction(inner: BoxedStrategy<Formula>) -> impl Strategy<Value = Restriction> {
    let ufair = fair_target(inner.clone()).prop_map(|then| FairEntry {
        condition: None,
        then,
    });
    (
        prop::option::of(action()),
        prop::collection::vec(ufair, 0..2),
        prop::collection::vec(conditioned_entry(inner.clone()), 0..2),
        prop::collection::vec(conditioned_entry(inner), 0..2),
    )
        .prop_map(|(actions, ufair, wfair, sfair)| Restriction {
            actions,
            ufair,
            wfair,
            sfair,
        })
}

/// Resolved state formulas: every temporal operator sits directly under a
/// quantifier. `labeled` adds action labels and fairness to the quantifiers.
fn formulas(labeled: bool) -> impl Strategy<Value = Formula> {
    leaf().prop_recursive(5, 48, 3, move |inner| {
        let unary = prop_oneof![Just(UnaryOp::X), Just(UnaryOp::F), Just(UnaryOp::G)];
        let binary = prop_oneof![Just(BinaryOp::U), Just(BinaryOp::R)];
        let restrictions = if labeled {
            restriction(inner.clone()).boxed()
        } else {
            Just(Restriction::default()).boxed()
        };
        prop_oneof![
            inner.clone().prop_map(Formula::not),
            prop::collection::vec(inner.clone(), 2..4).prop_map(|v| flatten(v, true)),
            prop::collection::vec(inner.clone(), 2..4).prop_map(|v| flatten(v, false)),
            (inner.clone(), inner.clone())
                .prop_map(|(l, r)| Formula::Imply(Box::new(l), Box::new(r))),
            (inner.clone(), inner.clone())
                .prop_map(|(l, r)| Formula::Iff(Box::new(l), Box::new(r))),
            (quantifier(), restrictions.clone(), unary, inner.clone()).prop_map(
                |(quantifier, restriction, op, arg)| Formula::Quantified {
                    quantifier,
                    restriction,
                    path: Box::new(Formula::unary(op, arg)),
                }
            ),
            (quantifier(), restrictions, binary, inner.clone(), inner).prop_map(
                |(quantifier, restriction, op, l, r)| Formula::Quantified {
                    quantifier,
                    restriction,
                    path: Box::new(Formula::binary(op, l, r)),
                }
            ),
        ]
    })
}

fn state_formula() -> impl Strategy<Value = Formula> {
    formulas(false)
}

fn labeled_state_formula() -> impl Strategy<Value = Formula> {
    formulas(true)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn display_parses_back_to_the_same_tree(f in labeled_state_formula()) {
        let text = f.to_string();
        let reparsed = parse(&text);
        prop_assert_eq!(reparsed, Ok(f), "{}", text);
    }

    #[test]
    fn ctl_normalization_is_idempotent(f in state_formula()) {
        let once = ctl(&f).expect("generated formulas are valid CTL");
        let twice = ctl(&once).expect("normalized formulas stay valid");
        prop_assert_eq!(&once, &twice);

        // surface syntax of a normalized tree normalizes back to it
        let reparsed = parse(&once.to_string()).expect("normalized display parses");
        prop_assert_eq!(ctl(&reparsed).unwrap(), once);
    }

    #[test]
    fn its_ctl_output_is_deterministic(f in state_formula()) {
        let first = its_ctl(&f).unwrap();
        prop_assert_eq!(&first, &its_ctl(&f).unwrap());
        prop_assert_eq!(&first, &its_ctl(&ctl(&f).unwrap()).unwrap());
        prop_assert!(first.ends_with(';'));
    }
}
