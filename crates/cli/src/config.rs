//! Loading `--config` TOML files.

use std::path::{Path, PathBuf};

use tl_core::Config;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// No path means the built-in profiles.
pub(crate) fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_owned(),
        source,
    })?;
    let config = parse(&text).map_err(|source| ConfigError::Parse {
        path: path.to_owned(),
        source,
    })?;
    debug!(path = %path.display(), dialects = config.dialect.len(), "loaded config");
    Ok(config)
}

fn parse(text: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tl_core::{Dialect, TopQuantifier};

    #[test]
    fn toml_overrides_per_dialect() {
        let config = parse(
            r#"
[dialect.its-ltl]
top_quantifier = "elide"

[dialect.ctl]
operators = ["X", "F", "G", "U", "R", "W", "M"]
"#,
        )
        .unwrap();
        assert_eq!(
            config.profile(Dialect::ItsLtl).top_quantifier,
            TopQuantifier::Elide
        );
        assert_eq!(config.profile(Dialect::Ctl).operator_letters(), "XFGURWM");
    }

    #[test]
    fn unknown_fields_fail() {
        assert!(parse("[dialect.ctl]\nfairnes = false\n").is_err());
        assert!(parse("[dialect.ltl]\n").is_err());
    }

    #[test]
    fn missing_path_uses_defaults() {
        assert_eq!(load(None).unwrap(), Config::default());
        let err = load(Some(Path::new("/nonexistent/tl.toml"))).unwrap_err();
        assert!(err.to_string().starts_with("cannot read config /nonexistent/tl.toml"));
    }
}
