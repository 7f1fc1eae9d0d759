//! JSON form of a formula tree: one object per node with its `kind`, its
//! `children` (omitted for leaves) and whatever attributes the node carries.
//! Keys come out sorted.

use crate::ast::{Action, FairKind};
use crate::formula::{FairEntry, FairTarget, Formula, Restriction, Temporal};
use serde_json::{Map, Value};

pub fn to_json(formula: &Formula) -> Value {
    let mut obj = Map::new();
    obj.insert("kind".to_owned(), Value::String(formula.kind().to_owned()));

    let children: Vec<Value> = formula.children().into_iter().map(to_json).collect();
    if !children.is_empty() {
        obj.insert("children".to_owned(), Value::Array(children));
    }

    match formula {
        Formula::Bool(b) => {
            obj.insert("value".to_owned(), Value::Bool(*b));
        }
        Formula::Name { value, escaped } => {
            obj.insert("value".to_owned(), Value::String(value.clone()));
            obj.insert("escaped".to_owned(), Value::Bool(*escaped));
        }
        Formula::Quantified { restriction, .. } => {
            insert_restriction(&mut obj, restriction);
        }
        Formula::Temporal(t) => insert_labels(&mut obj, t, "actions"),
        Formula::Path {
            restriction,
            temporal,
            ..
        } => {
            insert_restriction(&mut obj, restriction);
            insert_labels(&mut obj, temporal, "operator_actions");
        }
        Formula::Not(_)
        | Formula::And(_)
        | Formula::Or(_)
        | Formula::Imply(..)
        | Formula::Iff(..) => {}
    }
    Value::Object(obj)
}

pub fn action_to_json(action: &Action) -> Value {
    let mut obj = Map::new();
    obj.insert("kind".to_owned(), Value::String(action.kind().to_owned()));
    let children: Vec<Value> = match action {
        Action::Name(n) => {
            obj.insert("value".to_owned(), Value::String(n.clone()));
            Vec::new()
        }
        Action::Not(a) => vec![action_to_json(a)],
        Action::And(items) | Action::Or(items) => items.iter().map(action_to_json).collect(),
        Action::Imply(l, r) | Action::Iff(l, r) => vec![action_to_json(l), action_to_json(r)],
    };
    if !children.is_empty() {
        obj.insert("children".to_owned(), Value::Array(children));
    }
    Value::Object(obj)
}

fn insert_action(obj: &mut Map<String, Value>, key: &str, action: &Option<Action>) {
    if let Some(a) = action {
        obj.insert(key.to_owned(), action_to_json(a));
    }
}

/// `unary_key` names a unary operator's label: `actions` on a bare operator,
/// `operator_actions` on a `Path` node where `actions` is the quantifier's.
fn insert_labels(obj: &mut Map<String, Value>, t: &Temporal, unary_key: &str) {
    match t {
        Temporal::Unary { actions, .. } => insert_action(obj, unary_key, actions),
        Temporal::Binary {
            left_actions,
            right_actions,
            ..
        } => {
            insert_action(obj, "left_actions", left_actions);
            insert_action(obj, "right_actions", right_actions);
        }
    }
}

fn insert_restriction(obj: &mut Map<String, Value>, r: &Restriction) {
    insert_action(obj, "actions", &r.actions);
    for kind in [FairKind::Ufair, FairKind::Wfair, FairKind::Sfair] {
        let entries = r.fairness(kind);
        if !entries.is_empty() {
            obj.insert(
                kind.keyword().to_owned(),
                Value::Array(entries.iter().map(fair_entry_to_json).collect()),
            );
        }
    }
}

fn fair_entry_to_json(entry: &FairEntry) -> Value {
    let mut obj = Map::new();
    obj.insert(
        "condition".to_owned(),
        entry.condition.as_ref().map(to_json).unwrap_or(Value::Null),
    );
    let then = match &entry.then {
        FairTarget::Actions(a) => action_to_json(a),
        FairTarget::Formula(f) => to_json(f),
    };
    obj.insert("then".to_owned(), then);
    Value::Object(obj)
}
