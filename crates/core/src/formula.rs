//! The formula node model.
//!
//! One variant per kind family; each variant carries only the attributes
//! that are meaningful for it. Restrictions (actions and fairness lists)
//! can only live on path quantifiers, so a misplaced fairness entry cannot
//! be represented once the resolver has run.

use crate::ast::{Action, BinaryOp, FairKind, Quantifier, TemporalOp, UnaryOp};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Formula {
    Bool(bool),
    Name {
        value: String,
        /// Written quoted: a raw proposition rather than a boolean variable.
        escaped: bool,
    },
    Not(Box<Formula>),
    And(Vec<Formula>),
    Or(Vec<Formula>),
    Imply(Box<Formula>, Box<Formula>),
    Iff(Box<Formula>, Box<Formula>),
    /// A path quantifier as written, before dialect normalization.
    Quantified {
        quantifier: Quantifier,
        restriction: Restriction,
        path: Box<Formula>,
    },
    /// A temporal operator not (yet) merged with a quantifier.
    Temporal(Temporal),
    /// Quantifier and temporal operator merged by a tree dialect (`AX`, `EU`, ...).
    Path {
        quantifier: Quantifier,
        restriction: Restriction,
        temporal: Temporal,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Temporal {
    Unary {
        op: UnaryOp,
        actions: Option<Action>,
        arg: Box<Formula>,
    },
    Binary {
        op: BinaryOp,
        left_actions: Option<Action>,
        right_actions: Option<Action>,
        left: Box<Formula>,
        right: Box<Formula>,
    },
}

/// Restrictions carried by a path quantifier.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Restriction {
    pub actions: Option<Action>,
    pub ufair: Vec<FairEntry>,
    pub wfair: Vec<FairEntry>,
    pub sfair: Vec<FairEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FairEntry {
    pub condition: Option<Formula>,
    pub then: FairTarget,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FairTarget {
    Actions(Action),
    Formula(Box<Formula>),
}

// ──────────────────────────────────────────────
// Construction helpers
// ──────────────────────────────────────────────

impl Formula {
    /// An unquoted name: a boolean state variable.
    pub fn var(value: impl Into<String>) -> Self {
        Formula::Name {
            value: value.into(),
            escaped: false,
        }
    }

    /// A quoted name: a verbatim atomic proposition.
    pub fn prop(value: impl Into<String>) -> Self {
        Formula::Name {
            value: value.into(),
            escaped: true,
        }
    }

    pub fn not(self) -> Self {
        Formula::Not(Box::new(self))
    }

    pub fn unary(op: UnaryOp, arg: Formula) -> Self {
        Formula::Temporal(Temporal::Unary {
            op,
            actions: None,
            arg: Box::new(arg),
        })
    }

    pub fn binary(op: BinaryOp, left: Formula, right: Formula) -> Self {
        Formula::Temporal(Temporal::Binary {
            op,
            left_actions: None,
            right_actions: None,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn quantified(quantifier: Quantifier, path: Formula) -> Self {
        Formula::Quantified {
            quantifier,
            restriction: Restriction::default(),
            path: Box::new(path),
        }
    }

    /// The kind tag of this node.
    pub fn kind(&self) -> &'static str {
        match self {
            Formula::Bool(_) => "bool",
            Formula::Name { .. } => "name",
            Formula::Not(_) => "not",
            Formula::And(_) => "and",
            Formula::Or(_) => "or",
            Formula::Imply(..) => "imply",
            Formula::Iff(..) => "iff",
            Formula::Quantified { quantifier, .. } => match quantifier {
                Quantifier::A => "A",
                Quantifier::E => "E",
            },
            Formula::Temporal(t) => t.kind(),
            Formula::Path {
                quantifier,
                temporal,
                ..
            } => path_kind(*quantifier, temporal.op()),
        }
    }

    /// Direct children in order. Fairness entries are attributes, not children.
    pub fn children(&self) -> Vec<&Formula> {
        match self {
            Formula::Bool(_) | Formula::Name { .. } => Vec::new(),
            Formula::Not(f) => vec![f.as_ref()],
            Formula::And(items) | Formula::Or(items) => items.iter().collect(),
            Formula::Imply(l, r) | Formula::Iff(l, r) => vec![l.as_ref(), r.as_ref()],
            Formula::Quantified { path, .. } => vec![path.as_ref()],
            Formula::Temporal(t) | Formula::Path { temporal: t, .. } => t.operands(),
        }
    }

    fn is_atomic(&self) -> bool {
        matches!(self, Formula::Bool(_) | Formula::Name { .. })
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_atomic() {
            write!(f, "{}", self)
        } else {
            write!(f, "({})", self)
        }
    }
}

fn path_kind(q: Quantifier, op: TemporalOp) -> &'static str {
    match (q, op) {
        (Quantifier::A, TemporalOp::X) => "AX",
        (Quantifier::A, TemporalOp::F) => "AF",
        (Quantifier::A, TemporalOp::G) => "AG",
        (Quantifier::A, TemporalOp::U) => "AU",
        (Quantifier::A, TemporalOp::R) => "AR",
        (Quantifier::A, TemporalOp::W) => "AW",
        (Quantifier::A, TemporalOp::M) => "AM",
        (Quantifier::E, TemporalOp::X) => "EX",
        (Quantifier::E, TemporalOp::F) => "EF",
        (Quantifier::E, TemporalOp::G) => "EG",
        (Quantifier::E, TemporalOp::U) => "EU",
        (Quantifier::E, TemporalOp::R) => "ER",
        (Quantifier::E, TemporalOp::W) => "EW",
        (Quantifier::E, TemporalOp::M) => "EM",
    }
}

impl Temporal {
    pub fn op(&self) -> TemporalOp {
        match self {
            Temporal::Unary { op, .. } => op.op(),
            Temporal::Binary { op, .. } => op.op(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self.op() {
            TemporalOp::X => "X",
            TemporalOp::F => "F",
            TemporalOp::G => "G",
            TemporalOp::U => "U",
            TemporalOp::R => "R",
            TemporalOp::W => "W",
            TemporalOp::M => "M",
        }
    }

    pub fn operands(&self) -> Vec<&Formula> {
        match self {
            Temporal::Unary { arg, .. } => vec![arg.as_ref()],
            Temporal::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
        }
    }

    /// True when any action label is attached to the operator itself.
    pub fn has_actions(&self) -> bool {
        match self {
            Temporal::Unary { actions, .. } => actions.is_some(),
            Temporal::Binary {
                left_actions,
                right_actions,
                ..
            } => left_actions.is_some() || right_actions.is_some(),
        }
    }

    /// Rebuild with every operand passed through `f`, keeping labels.
    pub fn try_map<E>(
        &self,
        mut f: impl FnMut(&Formula) -> Result<Formula, E>,
    ) -> Result<Temporal, E> {
        Ok(match self {
            Temporal::Unary { op, actions, arg } => Temporal::Unary {
                op: *op,
                actions: actions.clone(),
                arg: Box::new(f(arg)?),
            },
            Temporal::Binary {
                op,
                left_actions,
                right_actions,
                left,
                right,
            } => Temporal::Binary {
                op: *op,
                left_actions: left_actions.clone(),
                right_actions: right_actions.clone(),
                left: Box::new(f(left)?),
                right: Box::new(f(right)?),
            },
        })
    }
}

impl Restriction {
    pub fn is_empty(&self) -> bool {
        self.actions.is_none() && !self.has_fairness()
    }

    pub fn has_fairness(&self) -> bool {
        !(self.ufair.is_empty() && self.wfair.is_empty() && self.sfair.is_empty())
    }

    pub fn fairness(&self, kind: FairKind) -> &[FairEntry] {
        match kind {
            FairKind::Ufair => &self.ufair,
            FairKind::Wfair => &self.wfair,
            FairKind::Sfair => &self.sfair,
        }
    }

    pub fn fairness_mut(&mut self, kind: FairKind) -> &mut Vec<FairEntry> {
        match kind {
            FairKind::Ufair => &mut self.ufair,
            FairKind::Wfair => &mut self.wfair,
            FairKind::Sfair => &mut self.sfair,
        }
    }
}

// ──────────────────────────────────────────────
// Display: surface syntax that parses back to the same tree
// ──────────────────────────────────────────────

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Bool(true) => write!(f, "True"),
            Formula::Bool(false) => write!(f, "False"),
            Formula::Name { value, escaped } => {
                if !*escaped {
                    write!(f, "{}", value)
                } else if value.contains('"') {
                    write!(f, "'{}'", value)
                } else {
                    write!(f, "\"{}\"", value)
                }
            }
            Formula::Not(inner) => {
                write!(f, "~")?;
                inner.fmt_operand(f)
            }
            Formula::And(items) | Formula::Or(items) => {
                let sep = if matches!(self, Formula::And(_)) {
                    " & "
                } else {
                    " | "
                };
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{}", sep)?;
                    }
                    item.fmt_operand(f)?;
                }
                Ok(())
            }
            Formula::Imply(l, r) | Formula::Iff(l, r) => {
                let sep = if matches!(self, Formula::Imply(..)) {
                    " => "
                } else {
                    " <=> "
                };
                l.fmt_operand(f)?;
                write!(f, "{}", sep)?;
                r.fmt_operand(f)
            }
            Formula::Quantified {
                quantifier,
                restriction,
                path,
            } => {
                write!(f, "{}{}", quantifier.letter(), restriction)?;
                write!(f, "({})", path)
            }
            Formula::Temporal(t) => write!(f, "{}", t),
            Formula::Path {
                quantifier,
                restriction,
                temporal,
            } => {
                write!(f, "{}{}", quantifier.letter(), restriction)?;
                write!(f, "({})", temporal)
            }
        }
    }
}

fn fmt_label(f: &mut fmt::Formatter<'_>, actions: &Option<Action>) -> fmt::Result {
    match actions {
        Some(a) => write!(f, "{{{}}}", a),
        None => Ok(()),
    }
}

impl fmt::Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temporal::Unary { op, actions, arg } => {
                write!(f, "{}", op.op())?;
                fmt_label(f, actions)?;
                write!(f, " ")?;
                arg.fmt_operand(f)
            }
            Temporal::Binary {
                op,
                left_actions,
                right_actions,
                left,
                right,
            } => {
                left.fmt_operand(f)?;
                write!(f, " ")?;
                fmt_label(f, left_actions)?;
                write!(f, "{}", op.op())?;
                fmt_label(f, right_actions)?;
                write!(f, " ")?;
                right.fmt_operand(f)
            }
        }
    }
}

impl fmt::Display for FairEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(c) = &self.condition {
            write!(f, "({}) => ", c)?;
        }
        match &self.then {
            FairTarget::Actions(a) => write!(f, "{{{}}}", a),
            FairTarget::Formula(phi) => write!(f, "({})", phi),
        }
    }
}

/// Renders as the brace block written after a quantifier, or nothing.
impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        let mut items: Vec<String> = Vec::new();
        if let Some(a) = &self.actions {
            items.push(a.to_string());
        }
        for kind in [FairKind::Ufair, FairKind::Wfair, FairKind::Sfair] {
            for entry in self.fairness(kind) {
                items.push(format!("{}: {}", kind.keyword(), entry));
            }
        }
        write!(f, "{{{}}}", items.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_kinds_join_quantifier_and_operator() {
        let f = Formula::Path {
            quantifier: Quantifier::E,
            restriction: Restriction::default(),
            temporal: Temporal::Binary {
                op: BinaryOp::U,
                left_actions: None,
                right_actions: None,
                left: Box::new(Formula::var("p")),
                right: Box::new(Formula::var("q")),
            },
        };
        assert_eq!(f.kind(), "EU");
        assert_eq!(f.children().len(), 2);
    }

    #[test]
    fn display_quotes_escaped_names_only() {
        let f = Formula::And(vec![Formula::var("p"), Formula::prop("q")]);
        assert_eq!(f.to_string(), "p & \"q\"");
    }

    #[test]
    fn display_restriction_block() {
        let mut r = Restriction {
            actions: Some(Action::name("a")),
            ..Restriction::default()
        };
        r.wfair.push(FairEntry {
            condition: Some(Formula::var("c")),
            then: FairTarget::Actions(Action::name("b")),
        });
        let f = Formula::Quantified {
            quantifier: Quantifier::A,
            restriction: r,
            path: Box::new(Formula::unary(UnaryOp::G, Formula::var("p"))),
        };
        assert_eq!(f.to_string(), "A{a, wfair: (c) => {b}}(G p)");
    }

    #[test]
    fn action_names_that_are_not_words_are_quoted() {
        let cases = [
            (Action::name("x y"), "\"x y\""),
            (Action::name("True"), "\"True\""),
            (Action::name("a-b"), "\"a-b\""),
            (Action::name("say\"hi"), "'say\"hi'"),
            (Action::name("go_2"), "go_2"),
        ];
        for (action, expected) in cases {
            assert_eq!(action.to_string(), expected);
        }

        for src in ["A{'x y'} X p", "E{'True'}(F p)", "A{~'a-b', wfair: {'c d'}} G p"] {
            let f = crate::parse(src).unwrap();
            assert_eq!(crate::parse(&f.to_string()).unwrap(), f, "{}", f);
        }
    }
}
