//! Tree dialects (`ctl`, `arctl`): validate nesting and merge every
//! quantifier with its temporal operator into one [`Formula::Path`] node.

use super::{Dialect, Profile};
use crate::ast::{FairKind, Quantifier};
use crate::error::TlError;
use crate::formula::{FairEntry, FairTarget, Formula, Restriction, Temporal};
use tracing::trace;

/// Normalize `formula` for a tree dialect. Already normalized nodes are
/// validated again and come back unchanged.
pub fn normalize(formula: &Formula, dialect: Dialect, profile: &Profile) -> Result<Formula, TlError> {
    Normalizer { dialect, profile }.formula(formula)
}

struct Normalizer<'a> {
    dialect: Dialect,
    profile: &'a Profile,
}

impl Normalizer<'_> {
    fn err(&self, message: impl Into<String>) -> TlError {
        TlError::dialect(self.dialect, message)
    }

    fn all(&self, items: &[Formula]) -> Result<Vec<Formula>, TlError> {
        items.iter().map(|f| self.formula(f)).collect()
    }

    fn formula(&self, f: &Formula) -> Result<Formula, TlError> {
        match f {
            Formula::Bool(_) | Formula::Name { .. } => Ok(f.clone()),
            Formula::Not(inner) => Ok(Formula::Not(Box::new(self.formula(inner)?))),
            Formula::And(items) => Ok(Formula::And(self.all(items)?)),
            Formula::Or(items) => Ok(Formula::Or(self.all(items)?)),
            Formula::Imply(l, r) => Ok(Formula::Imply(
                Box::new(self.formula(l)?),
                Box::new(self.formula(r)?),
            )),
            Formula::Iff(l, r) => Ok(Formula::Iff(
                Box::new(self.formula(l)?),
                Box::new(self.formula(r)?),
            )),
            Formula::Quantified {
                quantifier,
                restriction,
                path,
            } => match path.as_ref() {
                Formula::Temporal(t) => self.path(*quantifier, restriction, t),
                _ => Err(self.err(self.profile.successor_message(*quantifier))),
            },
            Formula::Path {
                quantifier,
                restriction,
                temporal,
            } => self.path(*quantifier, restriction, temporal),
            Formula::Temporal(t) => Err(self.err(format!(
                "{} must be preceded by a path quantifier",
                t.kind()
            ))),
        }
    }

    fn path(
        &self,
        quantifier: Quantifier,
        restriction: &Restriction,
        temporal: &Temporal,
    ) -> Result<Formula, TlError> {
        if !self.profile.allows(temporal.op()) {
            return Err(self.err(self.profile.successor_message(quantifier)));
        }
        let restriction = self.restriction(restriction)?;
        if temporal.has_actions() && !self.profile.modality_actions {
            return Err(self.err(if self.profile.quantifier_actions {
                "actions not allowed on temporal operators"
            } else {
                "actions not allowed"
            }));
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
        let temporal = temporal.try_map(|f| self.formula(f))?;
        trace!(
            quantifier = %quantifier.letter(),
            op = %temporal.op(),
            "merged path operator"
        );
        Ok(Formula::Path {
            quantifier,
            restriction,
            temporal,
        })
    }

    fn restriction(&self, r: &Restriction) -> Result<Restriction, TlError> {
        if r.actions.is_some() && !self.profile.quantifier_actions {
            return Err(self.err("actions not allowed"));
        }
        if r.has_fairness() && !self.profile.fairness {
            return Err(self.err("fairness not allowed"));
        }
        let mut out = Restriction {
            actions: r.actions.clone(),
            ..Restriction::default()
        };
        for kind in [FairKind::Ufair, FairKind::Wfair, FairKind::Sfair] {
            for entry in r.fairness(kind) {
                out.fairness_mut(kind).push(self.fair_entry(entry)?);
            }
        }
        Ok(out)
    }

    fn fair_entry(&self, entry: &FairEntry) -> Result<FairEntry, TlError> {
        let condition = match &entry.condition {
            Some(c) => Some(self.formula(c)?),
            None => None,
        };
        let then = match &entry.then {
            FairTarget::Actions(a) => {
                if !self.profile.quantifier_actions {
                    return Err(self.err("actions not allowed"));
                }
                FairTarget::Actions(a.clone())
            }
            FairTarget::Formula(phi) => FairTarget::Formula(Box::new(self.formula(phi)?)),
        };
        Ok(FairEntry { condition, then })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TemporalOp;
    use crate::parse;

    fn run(src: &str, dialect: Dialect) -> Result<Formula, TlError> {
        normalize(&parse(src)?, dialect, &dialect.default_profile())
    }

    fn message(src: &str, dialect: Dialect) -> String {
        run(src, dialect)
            .expect_err("formula should be rejected")
            .to_string()
    }

    #[test]
    fn quantifier_and_operator_merge() {
        let f = run("AG(p)", Dialect::Ctl).unwrap();
        assert_eq!(f.kind(), "AG");
        assert_eq!(f.children(), vec![&Formula::var("p")]);

        let f = run("E p U (A X q)", Dialect::Ctl).unwrap();
        assert_eq!(f.kind(), "EU");
        assert_eq!(f.children()[1].kind(), "AX");
    }

    #[test]
    fn stacked_temporal_operators_fail() {
        for d in [Dialect::Ctl, Dialect::Arctl] {
            assert_eq!(
                message("AXFp", d),
                format!("invalid {} formula (cannot nest F in AX)", d)
            );
        }
        assert_eq!(
            message("E (F p U q)", Dialect::Ctl),
            "invalid ctl formula (cannot nest F in EU)"
        );
    }

    #[test]
    fn quantifier_needs_a_temporal_operator() {
        assert_eq!(
            message("A p", Dialect::Ctl),
            "invalid ctl formula (A must be followed by X, F, G, U, or R)"
        );
        assert_eq!(
            message("E ~X p", Dialect::Arctl),
            "invalid arctl formula (E must be followed by X, F, G, U, or R)"
        );
    }

    #[test]
    fn bare_temporal_operator_fails() {
        assert_eq!(
            message("p & X q", Dialect::Ctl),
            "invalid ctl formula (X must be preceded by a path quantifier)"
        );
        assert_eq!(
            message("A X ~F p", Dialect::Ctl),
            "invalid ctl formula (F must be preceded by a path quantifier)"
        );
    }

    #[test]
    fn action_rules_differ_between_ctl_and_arctl() {
        assert_eq!(
            message("A{a} G p", Dialect::Ctl),
            "invalid ctl formula (actions not allowed)"
        );
        assert!(run("A{a} G p", Dialect::Arctl).is_ok());
        assert_eq!(
            message("A G{a} p", Dialect::Arctl),
            "invalid arctl formula (actions not allowed on temporal operators)"
        );
        assert_eq!(
            message("E (p {a}U q)", Dialect::Ctl),
            "invalid ctl formula (actions not allowed)"
        );
    }

    #[test]
    fn weak_until_is_enabled_by_the_profile() {
        let f = parse("A p W q").unwrap();
        let mut profile = Dialect::Ctl.default_profile();
        assert!(normalize(&f, Dialect::Ctl, &profile).is_err());
        profile.operators.insert(TemporalOp::W);
        assert_eq!(normalize(&f, Dialect::Ctl, &profile).unwrap().kind(), "AW");
    }

    #[test]
    fn fairness_conditions_are_normalized() {
        let f = run("A{wfair: {go}} F done", Dialect::Arctl).unwrap();
        let Formula::Path { restriction, .. } = &f else {
            panic!("expected path node, got {:?}", f);
        };
        let condition = restriction.wfair[0].condition.as_ref().unwrap();
        assert_eq!(condition.kind(), "EX");

        // the synthesized condition carries the action set
        assert_eq!(
            message("A{wfair: {go}} F done", Dialect::Ctl),
            "invalid ctl formula (actions not allowed)"
        );
        assert!(run("A{sfair: (p) => (q)} G r", Dialect::Ctl).is_ok());
        assert_eq!(
            message("A{sfair: (X p) => (q)} G r", Dialect::Ctl),
            "invalid ctl formula (X must be preceded by a path quantifier)"
        );
    }

    #[test]
    fn normalizing_twice_is_a_no_op() {
        for src in [
            "AG(p)",
            "A{a, ufair: (E F q)} (p U q) [wfair: (r) => {c}]",
            "~(E X p) | A p R (E G q)",
        ] {
            let once = run(src, Dialect::Arctl).unwrap();
            let twice = normalize(&once, Dialect::Arctl, &Dialect::Arctl.default_profile()).unwrap();
            assert_eq!(once, twice, "{}", src);
        }
        let once = run("E p U (A X q)", Dialect::Ctl).unwrap();
        assert_eq!(
            normalize(&once, Dialect::Ctl, &Dialect::Ctl.default_profile()).unwrap(),
            once
        );
    }
}
