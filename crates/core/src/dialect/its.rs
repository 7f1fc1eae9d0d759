//! Text dialects (`its-ctl`, `its-ltl`): render a formula in the input
//! syntax of the ITS model checkers.
//!
//! Every sub-expression is parenthesized. Unquoted names are boolean state
//! variables and render as `"v=1"`; quoted names are passed through as
//! `"v"`. Neither syntax has a place for action labels or fairness.

use super::{Dialect, Profile, TopQuantifier};
use crate::ast::Quantifier;
use crate::error::TlError;
use crate::formula::{Formula, Restriction, Temporal};
use tracing::debug;

pub fn emit(formula: &Formula, dialect: Dialect, profile: &Profile) -> Result<String, TlError> {
    let emitter = Emitter {
        dialect,
        profile,
        ltl: dialect == Dialect::ItsLtl,
    };
    let text = emitter.root(formula)?;
    Ok(if emitter.ltl { text } else { text + ";" })
}

struct Emitter<'a> {
    dialect: Dialect,
    profile: &'a Profile,
    ltl: bool,
}

impl Emitter<'_> {
    fn err(&self, message: impl Into<String>) -> TlError {
        TlError::dialect(self.dialect, message)
    }

    fn root(&self, f: &Formula) -> Result<String, TlError> {
        if self.ltl && self.profile.top_quantifier == TopQuantifier::Elide {
            match f {
                Formula::Quantified {
                    quantifier: Quantifier::A,
                    restriction,
                    path,
                } if restriction.is_empty() && matches!(path.as_ref(), Formula::Temporal(_)) => {
                    debug!("eliding top-level A");
                    return self.formula(path);
                }
                Formula::Path {
                    quantifier: Quantifier::A,
                    restriction,
                    temporal,
                } if restriction.is_empty() => {
                    debug!("eliding top-level A");
                    return self.temporal(temporal);
                }
                _ => {}
            }
        }
        self.formula(f)
    }

    /// `and`/`or` chains fold pairwise from the left.
    fn fold(&self, items: &[Formula], symbol: &str) -> Result<String, TlError> {
        let mut acc: Option<String> = None;
        for item in items {
            let text = self.formula(item)?;
            acc = Some(match acc {
                None => text,
                Some(left) => format!("({}){}({})", left, symbol, text),
            });
        }
        Ok(acc.unwrap_or_default())
    }

    fn formula(&self, f: &Formula) -> Result<String, TlError> {
        match f {
            Formula::Bool(b) => Ok(b.to_string()),
            Formula::Name { value, .. } if value.contains('"') => Err(self.err(format!(
                "proposition '{}' cannot contain '\"'",
                value
            ))),
            Formula::Name { value, escaped } => Ok(if *escaped {
                format!("\"{}\"", value)
            } else {
                format!("\"{}=1\"", value)
            }),
            Formula::Not(inner) => Ok(format!("!({})", self.formula(inner)?)),
            Formula::And(items) => self.fold(items, "&&"),
            Formula::Or(items) => self.fold(items, "||"),
            Formula::Imply(l, r) => Ok(format!("({})->({})", self.formula(l)?, self.formula(r)?)),
            Formula::Iff(l, r) => Ok(format!("({})<->({})", self.formula(l)?, self.formula(r)?)),
            Formula::Quantified {
                quantifier,
                restriction,
                path,
            } => match path.as_ref() {
                Formula::Temporal(t) if !self.ltl => self.quantified(*quantifier, restriction, t),
                _ if self.ltl => Err(self.err("path quantifiers not allowed")),
                _ => Err(self.err(self.profile.successor_message(*quantifier))),
            },
            Formula::Path {
                quantifier,
                restriction,
                temporal,
            } => {
                if self.ltl {
                    return Err(self.err("path quantifiers not allowed"));
                }
                self.quantified(*quantifier, restriction, temporal)
            }
            Formula::Temporal(t) => {
                if !self.ltl {
                    return Err(self.err(format!(
                        "{} must be preceded by a path quantifier",
                        t.kind()
                    )));
                }
                self.temporal(t)
            }
        }
    }

    /// CTL only: a quantifier directly followed by one temporal operator.
    fn quantified(
        &self,
        quantifier: Quantifier,
        restriction: &Restriction,
        temporal: &Temporal,
    ) -> Result<String, TlError> {
        if !self.profile.allows(temporal.op()) {
            return Err(self.err(self.profile.successor_message(quantifier)));
        }
        if restriction.actions.is_some() {
            return Err(self.err("actions not allowed"));
        }
        if restriction.has_fairness() {
            return Err(self.err("fairness not allowed"));
        }
        for operand in temporal.operands() {
            if let Formula::Temporal(inner) = operand {
                return Err(self.err(format!(
                    "cannot nest {} in {}{}",
                    inner.kind(),
                    quantifier.letter(),
                    temporal.kind()
                )));
            }
        }
        Ok(format!("{}{}", quantifier.letter(), self.temporal(temporal)?))
    }

    fn temporal(&self, t: &Temporal) -> Result<String, TlError> {
        if !self.profile.allows(t.op()) {
            return Err(self.err(format!("operator {} not allowed", t.op())));
        }
        if t.has_actions() {
            return Err(self.err("actions not allowed"));
        }
        match t {
            Temporal::Unary { op, arg, .. } => Ok(format!("{}({})", op.op(), self.formula(arg)?)),
            Temporal::Binary {
                op, left, right, ..
            } => Ok(format!(
                "(({}){}({}))",
                self.formula(left)?,
                op.op(),
                self.formula(right)?
            )),
        }
    }
}
