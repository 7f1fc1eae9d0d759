//! tl-core: temporal logic formula front-end.
//!
//! Parses formulas written in a CTL/LTL surface syntax (with optional action
//! labels and fairness annotations) and translates them into one of the
//! supported dialects.
//!
//! # Public API
//!
//! - [`parse()`] -- text to a resolved [`Formula`]
//! - [`translate()`] -- [`Formula`] to a [`Translation`] under a [`Profile`]
//! - [`ctl()`], [`arctl()`], [`its_ctl()`], [`its_ltl()`] -- one shortcut per
//!   dialect with its default profile
//! - [`Config`] -- per-dialect profile overrides
//! - [`TlError`] -- the single error type
//!
//! Pipeline: [`lexer`] -> [`parser`] -> [`resolve`] -> [`dialect`].

pub mod ast;
pub mod config;
pub mod dialect;
pub mod error;
pub mod formula;
pub mod lexer;
pub mod parser;
pub mod resolve;
pub mod serialize;
pub mod translate;

// ── Convenience re-exports ───────────────────────────────────────────

pub use ast::{Action, BinaryOp, FairKind, Pos, Quantifier, TemporalOp, UnaryOp};
pub use config::{Config, ProfileOverride};
pub use dialect::{Dialect, Profile, TopQuantifier};
pub use error::TlError;
pub use formula::{FairEntry, FairTarget, Formula, Restriction, Temporal};
pub use serialize::to_json;
pub use translate::{
    arctl, ctl, its_ctl, its_ltl, parse, parse_raw, translate, translate_str, Translation,
};
