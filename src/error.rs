//! Unified error types for raven-iq.
//!
//! The scoring core has a single recoverable failure class, invalid input.
//! Everything around it (config, JSON inputs, file IO) gets its own variant so
//! the calling layer can map errors onto user-facing responses.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for raven-iq operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum IqError {
    /// Scoring input rejected before reaching the arithmetic
    #[error("Invalid input in {context}: {source}")]
    InvalidInput {
        context: String,
        #[source]
        source: InputErrorKind,
    },

    /// Errors while decoding a submission, history or config document
    #[error("Failed to parse {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Why a scoring input was rejected
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum InputErrorKind {
    #[error("total question count must be greater than zero")]
    NoQuestions,

    #[error("correct answers ({correct}) exceed total questions ({total})")]
    CorrectExceedsTotal { correct: u32, total: u32 },

    #[error("average difficulty {0} is outside 0-10")]
    DifficultyOutOfRange(f64),

    #[error("submission contains no answers")]
    EmptySubmission,
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML: {0}")]
    InvalidYaml(String),
}

/// Convenient Result type for raven-iq operations
pub type Result<T> = std::result::Result<T, IqError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl IqError {
    /// Create an invalid-input error with context
    pub fn invalid_input(context: impl Into<String>, source: InputErrorKind) -> Self {
        Self::InvalidInput {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether the caller sent something the scorer cannot accept.
    ///
    /// HTTP layers map this to a 400 response.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// The rejection reason, for invalid-input errors
    #[must_use]
    pub const fn input_kind(&self) -> Option<&InputErrorKind> {
        match self {
            Self::InvalidInput { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for IqError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for IqError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse("JSON document", ParseErrorKind::InvalidJson(err.to_string()))
    }
}

impl From<serde_yaml::Error> for IqError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::parse("YAML document", ParseErrorKind::InvalidYaml(err.to_string()))
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context is prepended to whatever the error already carries, so a failure
/// deep in a history file reads `"history.json: entry 3: ..."`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on the error path.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<IqError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: IqError, new_ctx: &str) -> IqError {
    match err {
        IqError::InvalidInput {
            context: existing,
            source,
        } => IqError::InvalidInput {
            context: chain_context(new_ctx, &existing),
            source,
        },
        IqError::Parse {
            context: existing,
            source,
        } => IqError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        IqError::Io {
            path,
            message,
            source,
        } => IqError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        IqError::Config(msg) => IqError::Config(chain_context(new_ctx, &msg)),
        IqError::Validation(msg) => IqError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
