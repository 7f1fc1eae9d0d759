//! Per-dialect profile overrides.
//!
//! A [`Config`] is plain data: callers deserialize it from whatever format
//! they like (the `tl` binary reads TOML) and ask it for the effective
//! [`Profile`] of a dialect.

use crate::ast::TemporalOp;
use crate::dialect::{Dialect, Profile, TopQuantifier};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub dialect: BTreeMap<Dialect, ProfileOverride>,
}

/// Fields left out keep the dialect's default. The text dialects have no
/// syntax for action labels or fairness, so enabling those flags for them
/// changes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileOverride {
    pub operators: Option<BTreeSet<TemporalOp>>,
    pub quantifier_actions: Option<bool>,
    pub modality_actions: Option<bool>,
    pub fairness: Option<bool>,
    pub top_quantifier: Option<TopQuantifier>,
}

impl ProfileOverride {
    pub fn apply(&self, profile: &mut Profile) {
        if let Some(ops) = &self.operators {
            profile.operators = ops.clone();
        }
        if let Some(v) = self.quantifier_actions {
            profile.quantifier_actions = v;
        }
        if let Some(v) = self.modality_actions {
            profile.modality_actions = v;
        }
        if let Some(v) = self.fairness {
            profile.fairness = v;
        }
        if let Some(v) = self.top_quantifier {
            profile.top_quantifier = v;
        }
    }
}

impl Config {
    /// The dialect's default profile with this config's overrides applied.
    pub fn profile(&self, dialect: Dialect) -> Profile {
        let mut profile = dialect.default_profile();
        if let Some(over) = self.dialect.get(&dialect) {
            over.apply(&mut profile);
        }
        profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_config_yields_defaults() {
        let config = Config::default();
        for d in Dialect::ALL {
            assert_eq!(config.profile(d), d.default_profile());
        }
    }

    #[test]
    fn overrides_touch_only_named_fields() {
        let config: Config = serde_json::from_value(json!({
            "dialect": {
                "its-ltl": {"top_quantifier": "elide"},
                "ctl": {"operators": ["X", "F", "G", "U", "R", "W", "M"]}
            }
        }))
        .unwrap();
        let ltl = config.profile(Dialect::ItsLtl);
        assert_eq!(ltl.top_quantifier, TopQuantifier::Elide);
        assert_eq!(ltl.operators, Dialect::ItsLtl.default_profile().operators);
        let ctl = config.profile(Dialect::Ctl);
        assert_eq!(ctl.operator_letters(), "XFGURWM");
        assert!(ctl.fairness);
        assert_eq!(config.profile(Dialect::Arctl), Dialect::Arctl.default_profile());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let res: Result<Config, _> = serde_json::from_value(json!({
            "dialect": {"ctl": {"operator": ["X"]}}
        }));
        assert!(res.is_err());
        let res: Result<Config, _> = serde_json::from_value(json!({
            "dialect": {"smv": {}}
        }));
        assert!(res.is_err());
    }
}
