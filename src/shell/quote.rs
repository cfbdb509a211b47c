//! POSIX shell quoting.
//!
//! Every token is wrapped in single quotes, whatever it contains. Inside single
//! quotes a POSIX shell interprets nothing, so the only character that needs
//! care is the single quote itself, which is written as `'\''` (close the
//! quote, emit an escaped quote, reopen).

/// Quote a single token so that a POSIX shell reads it back as exactly one
/// word equal to `token`.
///
/// ```
/// use spool::shell::quote;
///
/// assert_eq!(quote("hello world"), "'hello world'");
/// assert_eq!(quote("it's"), r"'it'\''s'");
/// assert_eq!(quote(""), "''");
/// ```
pub fn quote(token: &str) -> String {
    let mut quoted = String::with_capacity(token.len() + 2);
    quoted.push('\'');
    for ch in token.chars() {
        if ch == '\'' {
            quoted.push_str(r"'\''");
        } else {
            quoted.push(ch);
        }
    }
    quoted.push('\'');
    quoted
}

/// Quote every token and join them with single spaces into one command line.
pub fn quote_join<I, S>(tokens: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|token| quote(token.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a line into words using POSIX shell rules.
///
/// Quotes and backslash escapes are honored; no variable or glob expansion
/// happens. Returns `None` when the line is malformed (for example an
/// unterminated quote).
pub fn split(line: &str) -> Option<Vec<String>> {
    shlex::split(line)
}
