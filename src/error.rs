//! Error taxonomy for script generation.
//!
//! Every variant is a deterministic user-input error: the same input always
//! produces the same failure, so nothing here is retried.

/// Errors raised while validating input or generating a script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpoolError {
    #[error("Invalid environment variable: {0}. Format: NAME=VALUE")]
    InvalidFormat(String),

    #[error("Invalid environment variable name: {0:?}. Use only A-Z, a-z, 0-9 and _")]
    InvalidName(String),

    #[error("Invalid environment variable value for {name}: {value:?} contains non-printable characters")]
    InvalidValue { name: String, value: String },

    #[error("Direct mode requires a single command line, got {0} (use --shell to run a script)")]
    TooManyLines(usize),

    #[error("No command specified")]
    EmptyCommand,

    #[error("Could not parse command line: {0}")]
    UnparsableCommand(String),

    #[error("Executable not found on PATH: {0}")]
    ExecutableNotFound(String),

    #[error("Executable must be an absolute path in remote mode: {0}")]
    NotAbsolutePath(String),

    #[error("Heredoc sentinel {0} occurs in the embedded content")]
    SentinelCollision(String),

    #[error("{0}")]
    ConflictingOptions(String),

    #[error("Invalid {field} {value:?}: {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Failed to render {template}: {message}")]
    Template { template: String, message: String },
}

impl SpoolError {
    pub(crate) fn invalid_field(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SpoolError::InvalidField {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = SpoolError> = std::result::Result<T, E>;
