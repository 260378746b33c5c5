//! Structured error types shared across PMST crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code, message and structured context carried by every [`PmstError`].
///
/// Codes are kebab-case and stable; tests and the CLI match on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable error code, e.g. `state-index-overflow`.
    pub code: String,
    /// Diagnostic message.
    pub message: String,
    /// Offending values keyed by name (node, edge, limit...).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Suggested fix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with empty context and no hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records `value` under `key`, replacing an earlier entry.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Attaches a suggested fix.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Context value recorded under `key`.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context.get(key).map(String::as_str)
    }
}

/// Error type shared by every crate of the workspace, grouped by the layer that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum PmstError {
    /// Graph construction and preprocessing errors.
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Invariant violations detected inside a search.
    #[error("search error: {0}")]
    Search(ErrorInfo),
    /// The instance does not fit the implicit state space or memory could not be reserved.
    #[error("capacity error: {0}")]
    Capacity(ErrorInfo),
    /// Invalid run configuration.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
    /// Randomness and seeding errors.
    #[error("rng error: {0}")]
    Rng(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            write!(f, " | context: [{}]", pairs.join(", "))?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl PmstError {
    /// Payload of any variant.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            PmstError::Graph(info)
            | PmstError::Search(info)
            | PmstError::Capacity(info)
            | PmstError::Config(info)
            | PmstError::Serde(info)
            | PmstError::Rng(info) => info,
        }
    }

    /// Stable error code.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Builds a search invariant violation.
    pub fn invariant(code: &str, message: impl Into<String>) -> Self {
        PmstError::Search(ErrorInfo::new(code, message))
    }
}
