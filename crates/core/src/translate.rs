//! Entry points: text to [`Formula`], and [`Formula`] to a dialect.

use crate::ast::RawRoot;
use crate::config::Config;
use crate::dialect::{ctl as tree, its, Dialect, Profile};
use crate::error::TlError;
use crate::formula::Formula;
use crate::{lexer, parser, resolve};
use std::fmt;
use tracing::debug;

/// Result of translating into a dialect.
#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    /// Normalized tree (`ctl`, `arctl`).
    Tree(Formula),
    /// Tool syntax (`its-ctl`, `its-ltl`).
    Text(String),
}

impl Translation {
    pub fn as_tree(&self) -> Option<&Formula> {
        match self {
            Translation::Tree(f) => Some(f),
            Translation::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Translation::Tree(_) => None,
            Translation::Text(s) => Some(s),
        }
    }
}

/// Trees print in surface syntax, text as is.
impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Translation::Tree(tree) => write!(f, "{}", tree),
            Translation::Text(text) => write!(f, "{}", text),
        }
    }
}

/// Lex and parse without resolving restrictions.
pub fn parse_raw(text: &str) -> Result<RawRoot, TlError> {
    let tokens = lexer::lex(text)?;
    parser::parse(tokens)
}

/// Parse a formula and resolve its action and fairness clauses.
pub fn parse(text: &str) -> Result<Formula, TlError> {
    let raw = parse_raw(text)?;
    let formula = resolve::resolve(raw)?;
    debug!(kind = formula.kind(), "parsed formula");
    Ok(formula)
}

pub fn translate(
    formula: &Formula,
    dialect: Dialect,
    profile: &Profile,
) -> Result<Translation, TlError> {
    debug!(%dialect, operators = %profile.operator_letters(), "translating");
    if dialect.is_tree() {
        tree::normalize(formula, dialect, profile).map(Translation::Tree)
    } else {
        its::emit(formula, dialect, profile).map(Translation::Text)
    }
}

/// Parse `text` and translate it with the profile `config` gives `dialect`.
pub fn translate_str(
    text: &str,
    dialect: Dialect,
    config: &Config,
) -> Result<Translation, TlError> {
    let formula = parse(text)?;
    translate(&formula, dialect, &config.profile(dialect))
}

// ── Per-dialect shortcuts (default profiles) ─────────────────────────

pub fn ctl(formula: &Formula) -> Result<Formula, TlError> {
    tree::normalize(formula, Dialect::Ctl, &Dialect::Ctl.default_profile())
}

pub fn arctl(formula: &Formula) -> Result<Formula, TlError> {
    tree::normalize(formula, Dialect::Arctl, &Dialect::Arctl.default_profile())
}

pub fn its_ctl(formula: &Formula) -> Result<String, TlError> {
    its::emit(formula, Dialect::ItsCtl, &Dialect::ItsCtl.default_profile())
}

pub fn its_ltl(formula: &Formula) -> Result<String, TlError> {
    its::emit(formula, Dialect::ItsLtl, &Dialect::ItsLtl.default_profile())
}
