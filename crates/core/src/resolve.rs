//! Restriction resolution: turns the raw tree into a [`Formula`].
//!
//! Brace clauses are moved onto the node they govern in one top-down walk.
//! Action clauses on temporal operators become their labels; fairness is
//! only accepted on path quantifiers; the trailing global clause is copied
//! onto every top-level quantifier (those reachable from the root through
//! boolean connectives only). Weak and strong fairness entries written as
//! `{actions}` get the enabling condition `E{actions} X True`.

use crate::ast::{
    Action, Connective, FairKind, Pos, Quantifier, RawClause, RawFairEntry, RawFairTarget,
    RawFormula, RawRoot, UnaryOp,
};
use crate::error::TlError;
use crate::formula::{FairEntry, FairTarget, Formula, Restriction, Temporal};
use tracing::{debug, trace};

/// The trailing `[ ... ]` clause, already resolved.
#[derive(Debug, Default)]
struct Global {
    actions: Option<Action>,
    fair: Vec<(FairKind, FairEntry)>,
}

impl Global {
    fn is_empty(&self) -> bool {
        self.actions.is_none() && self.fair.is_empty()
    }
}

pub fn resolve(root: RawRoot) -> Result<Formula, TlError> {
    let mut global = Global::default();
    for clause in root.global {
        match clause {
            RawClause::Actions { action, pos } => {
                if global.actions.is_some() {
                    return Err(TlError::restriction(
                        pos,
                        "global restriction declares actions twice",
                    ));
                }
                global.actions = Some(action);
            }
            RawClause::Fair(entry) => {
                let kind = entry.kind;
                global.fair.push((kind, resolve_fair_entry(entry)?));
            }
        }
    }

    let mut applied = 0usize;
    let scope = if global.is_empty() {
        None
    } else {
        Some(&global)
    };
    let formula = resolve_formula(root.formula, scope, &mut applied)?;

    if !global.is_empty() {
        if applied == 0 {
            return Err(TlError::restriction(
                root.global_pos,
                "global restriction has no path quantifier to apply to",
            ));
        }
        debug!(quantifiers = applied, "propagated global restriction");
    }
    Ok(formula)
}

/// `global` is `Some` only while the walk is still at top level.
fn resolve_formula(
    raw: RawFormula,
    global: Option<&Global>,
    applied: &mut usize,
) -> Result<Formula, TlError> {
    match raw {
        RawFormula::Bool(b) => Ok(Formula::Bool(b)),
        RawFormula::Name { value, escaped } => Ok(Formula::Name { value, escaped }),
        RawFormula::Not(inner) => Ok(Formula::Not(Box::new(resolve_formula(
            *inner, global, applied,
        )?))),
        RawFormula::Connective { op, operands } => {
            let mut resolved = Vec::with_capacity(operands.len());
            for f in operands {
                resolved.push(resolve_formula(f, global, applied)?);
            }
            Ok(match op {
                Connective::And => Formula::And(resolved),
                Connective::Or => Formula::Or(resolved),
                Connective::Imply | Connective::Iff => {
                    let mut it = resolved.into_iter();
                    match (it.next(), it.next()) {
                        (Some(l), Some(r)) if op == Connective::Imply => {
                            Formula::Imply(Box::new(l), Box::new(r))
                        }
                        (Some(l), Some(r)) => Formula::Iff(Box::new(l), Box::new(r)),
                        // the parser always builds these with two operands
                        (Some(only), None) => only,
                        _ => Formula::Bool(true),
                    }
                }
            })
        }
        RawFormula::Quantified {
            quantifier,
            clauses,
            body,
            pos,
        } => {
            let mut restriction = Restriction::default();
            for clause in clauses {
                match clause {
                    RawClause::Actions { action, pos } => {
                        if restriction.actions.is_some() {
                            return Err(TlError::restriction(
                                pos,
                                "cannot restrict a modality twice",
                            ));
                        }
                        restriction.actions = Some(action);
                    }
                    RawClause::Fair(entry) => {
                        let kind = entry.kind;
                        let resolved = resolve_fair_entry(entry)?;
                        restriction.fairness_mut(kind).push(resolved);
                    }
                }
            }
            if let Some(g) = global {
                apply_global(&mut restriction, g, pos)?;
                *applied += 1;
            }
            let path = resolve_formula(*body, None, applied)?;
            Ok(Formula::Quantified {
                quantifier,
                restriction,
                path: Box::new(path),
            })
        }
        RawFormula::Unary {
            op,
            clauses,
            body,
            ..
        } => {
            let actions = label_from_clauses(clauses, op.op().letter())?;
            let arg = resolve_formula(*body, None, applied)?;
            Ok(Formula::Temporal(Temporal::Unary {
                op,
                actions,
                arg: Box::new(arg),
            }))
        }
        RawFormula::Binary {
            op,
            left_clauses,
            right_clauses,
            left,
            right,
            ..
        } => {
            let letter = op.op().letter();
            let left_actions = label_from_clauses(left_clauses, letter)?;
            let right_actions = label_from_clauses(right_clauses, letter)?;
            let left = resolve_formula(*left, None, applied)?;
            let right = resolve_formula(*right, None, applied)?;
            Ok(Formula::Temporal(Temporal::Binary {
                op,
                left_actions,
                right_actions,
                left: Box::new(left),
                right: Box::new(right),
            }))
        }
    }
}

fn apply_global(restriction: &mut Restriction, global: &Global, pos: Pos) -> Result<(), TlError> {
    if let Some(actions) = &global.actions {
        if restriction.actions.is_some() {
            return Err(TlError::restriction(
                pos,
                "cannot propagate global action restriction to an already restricted modality",
            ));
        }
        restriction.actions = Some(actions.clone());
    }
    for (kind, entry) in &global.fair {
        restriction.fairness_mut(*kind).push(entry.clone());
    }
    Ok(())
}

/// Brace clauses on a temporal operator: one action label, no fairness.
fn label_from_clauses(clauses: Vec<RawClause>, letter: char) -> Result<Option<Action>, TlError> {
    let mut label = None;
    for clause in clauses {
        match clause {
            RawClause::Actions { action, pos } => {
                if label.is_some() {
                    return Err(TlError::restriction(
                        pos,
                        "cannot restrict a modality twice",
                    ));
                }
                label = Some(action);
            }
            RawClause::Fair(entry) => {
                return Err(TlError::restriction(
                    entry.pos,
                    format!("fairness can only be attached to A or E, not {}", letter),
                ));
            }
        }
    }
    Ok(label)
}

fn resolve_fair_entry(entry: RawFairEntry) -> Result<FairEntry, TlError> {
    let RawFairEntry {
        kind,
        condition,
        then,
        pos,
    } = entry;
    let mut scratch = 0usize;
    let condition = match condition {
        Some(c) => Some(resolve_formula(*c, None, &mut scratch)?),
        None => None,
    };
    let then = match then {
        RawFairTarget::Actions(a) => FairTarget::Actions(a),
        RawFairTarget::Formula(f) => {
            FairTarget::Formula(Box::new(resolve_formula(*f, None, &mut scratch)?))
        }
    };

    let condition = match (kind, condition, &then) {
        (FairKind::Ufair, Some(_), _) => {
            return Err(TlError::restriction(pos, "ufair does not take a condition"));
        }
        (FairKind::Ufair, None, _) => None,
        (_, Some(c), _) => Some(c),
        (_, None, FairTarget::Actions(a)) => {
            trace!(kind = kind.keyword(), "synthesizing enabling condition");
            Some(enabled(a))
        }
        (_, None, FairTarget::Formula(_)) => {
            return Err(TlError::restriction(
                pos,
                format!(
                    "{} must have a condition or apply on an action",
                    kind.keyword()
                ),
            ));
        }
    };
    Ok(FairEntry { condition, then })
}

/// `E{actions} X True`: some successor is reachable through `actions`.
pub fn enabled(actions: &Action) -> Formula {
    Formula::Quantified {
        quantifier: Quantifier::E,
        restriction: Restriction {
            actions: Some(actions.clone()),
            ..Restriction::default()
        },
        path: Box::new(Formula::unary(UnaryOp::X, Formula::Bool(true))),
    }
}
