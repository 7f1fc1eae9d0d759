//! Shared syntax types: source positions, operator alphabets, action
//! formulas and the raw tree produced by the parser.
//!
//! The raw tree mirrors the surface syntax. Brace clauses stay attached to
//! the modality they were written on; the resolver decides what they mean.

use serde::{Deserialize, Serialize};
use std::fmt;

// ──────────────────────────────────────────────
// Positions
// ──────────────────────────────────────────────

/// 1-based line and column of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    pub line: u32,
    pub column: u32,
}

impl Pos {
    pub fn new(line: u32, column: u32) -> Self {
        Pos { line, column }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

// ──────────────────────────────────────────────
// Operator alphabets
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    /// All paths.
    A,
    /// Some path.
    E,
}

impl Quantifier {
    pub fn letter(self) -> char {
        match self {
            Quantifier::A => 'A',
            Quantifier::E => 'E',
        }
    }
}

/// Every temporal operator letter the grammar knows. Which of them a dialect
/// accepts is decided by its [`crate::dialect::Profile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TemporalOp {
    X,
    F,
    G,
    U,
    R,
    /// Weak until.
    W,
    /// Strong release.
    M,
}

impl TemporalOp {
    pub const ALL: [TemporalOp; 7] = [
        TemporalOp::X,
        TemporalOp::F,
        TemporalOp::G,
        TemporalOp::U,
        TemporalOp::R,
        TemporalOp::W,
        TemporalOp::M,
    ];

    pub fn letter(self) -> char {
        match self {
            TemporalOp::X => 'X',
            TemporalOp::F => 'F',
            TemporalOp::G => 'G',
            TemporalOp::U => 'U',
            TemporalOp::R => 'R',
            TemporalOp::W => 'W',
            TemporalOp::M => 'M',
        }
    }

    pub fn is_unary(self) -> bool {
        matches!(self, TemporalOp::X | TemporalOp::F | TemporalOp::G)
    }
}

impl fmt::Display for TemporalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    X,
    F,
    G,
}

impl UnaryOp {
    pub fn op(self) -> TemporalOp {
        match self {
            UnaryOp::X => TemporalOp::X,
            UnaryOp::F => TemporalOp::F,
            UnaryOp::G => TemporalOp::G,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    U,
    R,
    W,
    M,
}

impl BinaryOp {
    pub fn op(self) -> TemporalOp {
        match self {
            BinaryOp::U => TemporalOp::U,
            BinaryOp::R => TemporalOp::R,
            BinaryOp::W => TemporalOp::W,
            BinaryOp::M => TemporalOp::M,
        }
    }
}

/// Binary boolean connectives of the surface syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
    Imply,
    Iff,
}

impl Connective {
    pub fn symbol(self) -> &'static str {
        match self {
            Connective::And => "&",
            Connective::Or => "|",
            Connective::Imply => "=>",
            Connective::Iff => "<=>",
        }
    }

    pub fn kind(self) -> &'static str {
        match self {
            Connective::And => "and",
            Connective::Or => "or",
            Connective::Imply => "imply",
            Connective::Iff => "iff",
        }
    }
}

// ──────────────────────────────────────────────
// Action formulas
// ──────────────────────────────────────────────

/// A boolean formula over action labels. Restricts which transitions a
/// modality may traverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Name(String),
    Not(Box<Action>),
    And(Vec<Action>),
    Or(Vec<Action>),
    Imply(Box<Action>, Box<Action>),
    Iff(Box<Action>, Box<Action>),
}

impl Action {
    pub fn name(s: impl Into<String>) -> Self {
        Action::Name(s.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Action::Name(_) => "name",
            Action::Not(_) => "not",
            Action::And(_) => "and",
            Action::Or(_) => "or",
            Action::Imply(..) => "imply",
            Action::Iff(..) => "iff",
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Name(_) | Action::Not(_) => write!(f, "{}", self),
            _ => write!(f, "({})", self),
        }
    }
}

/// A name that lexes back as a single word and is not a boolean constant.
fn is_bare_action_name(n: &str) -> bool {
    !n.is_empty()
        && n.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && n != "True"
        && n != "False"
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Name(n) if is_bare_action_name(n) => write!(f, "{}", n),
            Action::Name(n) if n.contains('"') => write!(f, "'{}'", n),
            Action::Name(n) => write!(f, "\"{}\"", n),
            Action::Not(a) => {
                write!(f, "~")?;
                a.fmt_operand(f)
            }
            Action::And(items) | Action::Or(items) => {
                let sep = if matches!(self, Action::And(_)) {
                    " & "
                } else {
                    " | "
                };
                for (i, a) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{}", sep)?;
                    }
                    a.fmt_operand(f)?;
                }
                Ok(())
            }
            Action::Imply(l, r) | Action::Iff(l, r) => {
                let sep = if matches!(self, Action::Imply(..)) {
                    " => "
                } else {
                    " <=> "
                };
                l.fmt_operand(f)?;
                write!(f, "{}", sep)?;
                r.fmt_operand(f)
            }
        }
    }
}

// ──────────────────────────────────────────────
// Raw formulas (parser output)
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FairKind {
    /// Unconditional.
    Ufair,
    /// Weak.
    Wfair,
    /// Strong.
    Sfair,
}

impl FairKind {
    pub fn keyword(self) -> &'static str {
        match self {
            FairKind::Ufair => "ufair",
            FairKind::Wfair => "wfair",
            FairKind::Sfair => "sfair",
        }
    }

    pub fn from_keyword(w: &str) -> Option<Self> {
        match w {
            "ufair" => Some(FairKind::Ufair),
            "wfair" => Some(FairKind::Wfair),
            "sfair" => Some(FairKind::Sfair),
            _ => None,
        }
    }
}

/// The `then` part of a fairness entry as written.
#[derive(Debug, Clone, PartialEq)]
pub enum RawFairTarget {
    Actions(Action),
    Formula(Box<RawFormula>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawFairEntry {
    pub kind: FairKind,
    pub condition: Option<Box<RawFormula>>,
    pub then: RawFairTarget,
    pub pos: Pos,
}

/// One comma-separated item between braces (or the global brackets).
#[derive(Debug, Clone, PartialEq)]
pub enum RawClause {
    Actions { action: Action, pos: Pos },
    Fair(RawFairEntry),
}

impl RawClause {
    pub fn pos(&self) -> Pos {
        match self {
            RawClause::Actions { pos, .. } => *pos,
            RawClause::Fair(e) => e.pos,
        }
    }
}

/// A raw formula as produced by the parser, before restriction resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum RawFormula {
    Bool(bool),
    Name {
        value: String,
        escaped: bool,
    },
    Not(Box<RawFormula>),
    /// n-ary for `and`/`or`, exactly two operands for `imply`/`iff`.
    Connective {
        op: Connective,
        operands: Vec<RawFormula>,
    },
    Quantified {
        quantifier: Quantifier,
        clauses: Vec<RawClause>,
        body: Box<RawFormula>,
        pos: Pos,
    },
    Unary {
        op: UnaryOp,
        clauses: Vec<RawClause>,
        body: Box<RawFormula>,
        pos: Pos,
    },
    Binary {
        op: BinaryOp,
        left_clauses: Vec<RawClause>,
        right_clauses: Vec<RawClause>,
        left: Box<RawFormula>,
        right: Box<RawFormula>,
        pos: Pos,
    },
}

/// A whole parsed formula: the root plus its trailing global restriction.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRoot {
    pub formula: RawFormula,
    pub global: Vec<RawClause>,
    pub global_pos: Pos,
}
