//! Input validation for values that end up inside a unit file or a script.
//!
//! Unit files are line oriented: a newline smuggled into a description or a
//! user name would add arbitrary directives. Everything that is interpolated
//! into the unit template is checked here first.

use crate::error::{Result, SpoolError};

/// Maximum unit name length, including the `.service` suffix (systemd limit).
pub const MAX_UNIT_NAME_LENGTH: usize = 255;

/// Maximum allowed length for descriptions.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Maximum length of a user or group name.
pub const MAX_ACCOUNT_NAME_LENGTH: usize = 32;

/// Whether `c` is printable: not a control, format or separator character,
/// with the ASCII space as the one allowed separator.
///
/// ```
/// use spool::validation::is_printable;
///
/// assert!(is_printable('a'));
/// assert!(is_printable(' '));
/// assert!(!is_printable('\n'));
/// assert!(!is_printable('\u{2028}'));
/// assert!(!is_printable('\u{feff}'));
/// ```
pub fn is_printable(c: char) -> bool {
    !(c.is_control() || is_format(c) || is_separator(c))
}

// Unicode category Cf
fn is_format(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}'
            | '\u{0600}'..='\u{0605}'
            | '\u{061C}'
            | '\u{06DD}'
            | '\u{070F}'
            | '\u{0890}'..='\u{0891}'
            | '\u{08E2}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
            | '\u{110BD}'
            | '\u{110CD}'
            | '\u{13430}'..='\u{1343F}'
            | '\u{1BCA0}'..='\u{1BCA3}'
            | '\u{1D173}'..='\u{1D17A}'
            | '\u{E0001}'
            | '\u{E0020}'..='\u{E007F}'
    )
}

// Unicode categories Zs, Zl and Zp, minus the ASCII space
fn is_separator(c: char) -> bool {
    matches!(
        c,
        '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

/// A trailing backslash continues a unit file line onto the next one.
fn ends_with_line_continuation(value: &str) -> bool {
    value.ends_with('\\')
}

/// Validates a unit name (without the `.service` suffix).
///
/// A name is valid if:
/// - It is not empty
/// - It fits systemd's length limit once `.service` is appended
/// - It contains only alphanumeric characters and `:`, `-`, `_`, `.`, `@`
/// - It does not start with `-` (it would read as an option to `systemctl`)
///
/// # Examples
///
/// ```
/// use spool::validation::validate_unit_name;
///
/// assert!(validate_unit_name("web-server").is_ok());
/// assert!(validate_unit_name("getty@tty1").is_ok());
/// assert!(validate_unit_name("").is_err());
/// assert!(validate_unit_name("../etc/passwd").is_err());
/// ```
pub fn validate_unit_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(SpoolError::invalid_field(
            "unit name",
            name,
            "cannot be empty",
        ));
    }

    if name.len() + ".service".len() > MAX_UNIT_NAME_LENGTH {
        return Err(SpoolError::invalid_field(
            "unit name",
            name,
            format!("too long (max {} characters)", MAX_UNIT_NAME_LENGTH - ".service".len()),
        ));
    }

    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, ':' | '-' | '_' | '.' | '@'));
    if !valid_chars {
        return Err(SpoolError::invalid_field(
            "unit name",
            name,
            "use only alphanumeric characters and : - _ . @",
        ));
    }

    if name.starts_with('-') || name.starts_with('.') {
        return Err(SpoolError::invalid_field(
            "unit name",
            name,
            "must not start with '-' or '.'",
        ));
    }

    Ok(())
}

/// Validates a unit description: bounded length and a single printable line.
pub fn validate_description(description: &str) -> Result<()> {
    if description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(SpoolError::invalid_field(
            "description",
            description,
            format!("too long (max {MAX_DESCRIPTION_LENGTH} characters)"),
        ));
    }

    if !description.chars().all(is_printable) {
        return Err(SpoolError::invalid_field(
            "description",
            description,
            "contains non-printable characters",
        ));
    }

    if ends_with_line_continuation(description) {
        return Err(SpoolError::invalid_field(
            "description",
            description,
            "must not end with a backslash",
        ));
    }

    Ok(())
}

/// Validates a user or group name (POSIX portable names).
///
/// Numeric ids are accepted as well, since systemd takes them in `User=`.
pub fn validate_account_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let first_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if !first_ok || !rest_ok || name.len() > MAX_ACCOUNT_NAME_LENGTH {
        return Err(SpoolError::invalid_field(
            "user or group",
            name,
            "expected a POSIX user/group name",
        ));
    }

    Ok(())
}

/// Validates a working directory: a single printable line.
pub fn validate_working_directory(path: &str) -> Result<()> {
    if !path.chars().all(is_printable) {
        return Err(SpoolError::invalid_field(
            "working directory",
            path,
            "contains non-printable characters",
        ));
    }

    if ends_with_line_continuation(path) {
        return Err(SpoolError::invalid_field(
            "working directory",
            path,
            "must not end with a backslash",
        ));
    }

    Ok(())
}

/// Clap value parser for unit names; accepts an optional `.service` suffix.
pub fn clap_unit_validator(s: &str) -> Result<String, String> {
    crate::models::normalize_unit_name(s).map_err(|e| e.to_string())
}

/// Clap value parser for description arguments.
pub fn clap_description_validator(s: &str) -> Result<String, String> {
    validate_description(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

/// Clap value parser for user and group arguments.
pub fn clap_account_validator(s: &str) -> Result<String, String> {
    validate_account_name(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

/// Clap value parser for working directory arguments.
pub fn clap_working_directory_validator(s: &str) -> Result<String, String> {
    validate_working_directory(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}
