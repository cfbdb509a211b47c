//! `NAME=VALUE` environment assignment validation.
//!
//! Validation is lazy: [`validate_assignments`] returns an iterator that only
//! checks element *i* when element *i* is requested, so valid leading entries
//! stay usable even if a later one is broken.

use std::fmt;

use crate::error::{Result, SpoolError};
use crate::validation::is_printable;

/// A validated environment assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvAssignment {
    name: String,
    value: String,
}

impl EnvAssignment {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for EnvAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

impl std::str::FromStr for EnvAssignment {
    type Err = SpoolError;

    fn from_str(s: &str) -> Result<Self> {
        parse_assignment(s)
    }
}

/// Parse and validate one `NAME=VALUE` string.
///
/// The first `=` separates name from value, so values may contain `=`.
///
/// ```
/// use spool::environment::parse_assignment;
///
/// let assignment = parse_assignment("DATABASE_URL=postgres://db?sslmode=require").unwrap();
/// assert_eq!(assignment.name(), "DATABASE_URL");
/// assert_eq!(assignment.value(), "postgres://db?sslmode=require");
/// assert!(parse_assignment("NOEQUALS").is_err());
/// ```
pub fn parse_assignment(raw: &str) -> Result<EnvAssignment> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| SpoolError::InvalidFormat(raw.to_string()))?;

    let valid_name = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid_name {
        return Err(SpoolError::InvalidName(name.to_string()));
    }

    if !value.chars().all(is_printable) {
        return Err(SpoolError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    Ok(EnvAssignment {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// Lazily validate a sequence of assignments, preserving input order.
pub fn validate_assignments<I>(raw: I) -> impl Iterator<Item = Result<EnvAssignment>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    raw.into_iter().map(|item| parse_assignment(item.as_ref()))
}

/// Clap value parser for `-E NAME=VALUE` arguments.
pub fn clap_env_validator(s: &str) -> Result<String, String> {
    parse_assignment(s)
        .map(|assignment| assignment.to_string())
        .map_err(|e| e.to_string())
}
