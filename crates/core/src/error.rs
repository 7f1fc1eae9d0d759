use crate::ast::Pos;
use crate::dialect::Dialect;

/// A formula error. Every failure aborts the whole call; there is never a
/// partial tree or a partial translation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TlError {
    /// Malformed token stream.
    #[error("syntax error at {pos}: {message}")]
    Syntax { pos: Pos, message: String },

    /// A reserved operator word used as an unquoted atom.
    #[error("syntax error at {pos}: variable {name} should be quoted")]
    Naming { pos: Pos, name: String },

    /// Structural or action-usage violation for the selected dialect.
    #[error("invalid {dialect} formula ({message})")]
    Dialect { dialect: Dialect, message: String },

    /// Illegal or conflicting action/fairness attachment.
    #[error("invalid restriction at {pos}: {message}")]
    Restriction { pos: Pos, message: String },
}

impl TlError {
    pub fn syntax(pos: Pos, message: impl Into<String>) -> Self {
        TlError::Syntax {
            pos,
            message: message.into(),
        }
    }

    pub fn naming(pos: Pos, name: impl Into<String>) -> Self {
        TlError::Naming {
            pos,
            name: name.into(),
        }
    }

    pub fn dialect(dialect: Dialect, message: impl Into<String>) -> Self {
        TlError::Dialect {
            dialect,
            message: message.into(),
        }
    }

    pub fn restriction(pos: Pos, message: impl Into<String>) -> Self {
        TlError::Restriction {
            pos,
            message: message.into(),
        }
    }

    /// Short tag naming the error family.
    pub fn kind(&self) -> &'static str {
        match self {
            TlError::Syntax { .. } => "syntax",
            TlError::Naming { .. } => "naming",
            TlError::Dialect { .. } => "dialect",
            TlError::Restriction { .. } => "restriction",
        }
    }

    pub fn pos(&self) -> Option<Pos> {
        match self {
            TlError::Syntax { pos, .. }
            | TlError::Naming { pos, .. }
            | TlError::Restriction { pos, .. } => Some(*pos),
            TlError::Dialect { .. } => None,
        }
    }

    /// Serialize to JSON. All keys are always present (null when missing).
    pub fn to_json_value(&self) -> serde_json::Value {
        let (line, column) = match self.pos() {
            Some(p) => (Some(p.line), Some(p.column)),
            None => (None, None),
        };
        let dialect = match self {
            TlError::Dialect { dialect, .. } => Some(dialect.name()),
            _ => None,
        };
        serde_json::json!({
            "column":  column,
            "dialect": dialect,
            "kind":    self.kind(),
            "line":    line,
            "message": self.to_string(),
        })
    }
}
