//! Target dialects and the per-dialect profile table.
//!
//! A [`Profile`] says which temporal operators a dialect accepts and where
//! action labels and fairness may appear. The walkers in [`ctl`] and [`its`]
//! never hard-code an operator alphabet; they ask the profile.

use crate::ast::{Quantifier, TemporalOp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub mod ctl;
pub mod its;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// Plain CTL tree.
    Ctl,
    /// Action-restricted CTL tree.
    Arctl,
    /// ITS tool CTL syntax.
    ItsCtl,
    /// ITS tool LTL syntax.
    ItsLtl,
}

impl Dialect {
    pub const ALL: [Dialect; 4] = [Dialect::Ctl, Dialect::Arctl, Dialect::ItsCtl, Dialect::ItsLtl];

    pub fn name(self) -> &'static str {
        match self {
            Dialect::Ctl => "ctl",
            Dialect::Arctl => "arctl",
            Dialect::ItsCtl => "its-ctl",
            Dialect::ItsLtl => "its-ltl",
        }
    }

    /// Tree dialects return a normalized [`crate::Formula`]; the others return text.
    pub fn is_tree(self) -> bool {
        matches!(self, Dialect::Ctl | Dialect::Arctl)
    }

    pub fn default_profile(self) -> Profile {
        let base = Profile {
            operators: [
                TemporalOp::X,
                TemporalOp::F,
                TemporalOp::G,
                TemporalOp::U,
                TemporalOp::R,
            ]
            .into_iter()
            .collect(),
            quantifier_actions: false,
            modality_actions: false,
            fairness: false,
            top_quantifier: TopQuantifier::Keep,
        };
        match self {
            Dialect::Ctl => Profile {
                fairness: true,
                ..base
            },
            Dialect::Arctl => Profile {
                quantifier_actions: true,
                fairness: true,
                ..base
            },
            Dialect::ItsCtl | Dialect::ItsLtl => base,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::ALL
            .into_iter()
            .find(|d| d.name() == s || d.name().replace('-', "_") == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Dialect::ALL.iter().map(|d| d.name()).collect();
                format!("unknown dialect '{}' (expected one of {})", s, names.join(", "))
            })
    }
}

// ──────────────────────────────────────────────
// Profiles
// ──────────────────────────────────────────────

/// What an LTL emitter does with an outermost `A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopQuantifier {
    /// Reject it like any other quantifier.
    #[default]
    Keep,
    /// Drop it when it carries no restriction.
    Elide,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Temporal operators the dialect accepts.
    pub operators: BTreeSet<TemporalOp>,
    /// Action labels on `A`/`E`.
    pub quantifier_actions: bool,
    /// Action labels on `X`/`F`/`G`/`U`/`R`/`W`/`M`.
    pub modality_actions: bool,
    /// `ufair`/`wfair`/`sfair` lists on quantifiers.
    pub fairness: bool,
    pub top_quantifier: TopQuantifier,
}

impl Profile {
    pub fn allows(&self, op: TemporalOp) -> bool {
        self.operators.contains(&op)
    }

    /// Operators in their canonical `XFGURWM` order.
    pub fn operator_letters(&self) -> String {
        TemporalOp::ALL
            .into_iter()
            .filter(|op| self.allows(*op))
            .map(TemporalOp::letter)
            .collect()
    }

    /// "A must be followed by X, F, G, U, or R"
    pub(crate) fn successor_message(&self, quantifier: Quantifier) -> String {
        let letters: Vec<String> = TemporalOp::ALL
            .into_iter()
            .filter(|op| self.allows(*op))
            .map(|op| op.letter().to_string())
            .collect();
        let list = match letters.split_last() {
            None => "a temporal operator".to_owned(),
            Some((only, [])) => only.clone(),
            Some((last, init)) => format!("{}, or {}", init.join(", "), last),
        };
        format!("{} must be followed by {}", quantifier.letter(), list)
    }
}
