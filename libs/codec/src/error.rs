//! Layout errors for pool script processing.
//!
//! Every variant carries the structured context a caller needs to branch on
//! the failure category or surface a precise diagnostic. Malformed scripts
//! are always reported, never silently repaired.

use thiserror::Error;

/// Result type for codec operations.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// Pool script layout errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// No state separator byte anywhere in the script.
    #[error("missing state separator {separator:#04x} in {script_len}-byte script")]
    MissingSeparator { separator: u8, script_len: usize },

    /// Fewer than the fixed state width follows the separator.
    #[error("state portion too short: need {need} bytes after separator, got {got}")]
    StateTooShort { need: usize, got: usize },

    /// The withdraw-branch byte pattern is absent from the code portion.
    #[error("owner hash pattern not found in {code_len}-byte code portion")]
    OwnerHashNotFound { code_len: usize },

    /// The script bytes cannot form a valid pool contract layout.
    #[error("invalid script layout: {context}")]
    InvalidLayout { context: String },
}

impl ScriptError {
    /// Create a `StateTooShort` error for a truncated state suffix.
    pub fn state_too_short(need: usize, got: usize) -> Self {
        Self::StateTooShort { need, got }
    }

    /// Create an `InvalidLayout` error with diagnostic context.
    pub fn invalid_layout(context: impl Into<String>) -> Self {
        Self::InvalidLayout {
            context: context.into(),
        }
    }
}
