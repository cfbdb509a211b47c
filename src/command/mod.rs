//! Command normalization.
//!
//! Raw command text (an editor buffer, piped stdin or CLI arguments) becomes
//! a [`NormalizedCommand`]: an argv whose first token is an absolute path.
//! Quoting happens once, at the very end, through [`crate::shell::quote_join`].

mod resolve;


pub use resolve::{resolve_program, resolve_program_in};

use crate::error::{Result, SpoolError};
use crate::shell;

/// Interpreter used for shell mode unless configured otherwise.
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Separator placed between lines in shell mode.
pub const STATEMENT_SEPARATOR: &str = " ; ";

/// How the command is executed by the service manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Exactly one invocation, argv passed directly.
    #[default]
    Direct,
    /// Lines joined and run through `<shell> -c`.
    Shell,
}

/// Where the first token gets resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    /// Look the executable up on this machine's `PATH`.
    #[default]
    Local,
    /// Target machine may differ; require an absolute path, skip lookup.
    Remote,
}

/// Options controlling normalization.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    pub mode: ExecutionMode,
    pub resolution: Resolution,
    /// Shell interpreter for [`ExecutionMode::Shell`].
    pub shell: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::Direct,
            resolution: Resolution::Local,
            shell: DEFAULT_SHELL.to_string(),
        }
    }
}

/// An argv whose first token is an absolute executable path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedCommand {
    argv: Vec<String>,
}

impl NormalizedCommand {
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }
}

/// Normalize raw multi-line command text.
///
/// Blank lines are dropped. Direct mode needs exactly one remaining line,
/// which is word-split with POSIX rules. Shell mode drops comment-only lines,
/// joins the rest with `" ; "` and wraps them as `[shell, "-c", text]`.
pub fn normalize(input: &str, options: &NormalizeOptions) -> Result<NormalizedCommand> {
    let lines: Vec<&str> = input.lines().filter(|line| !line.trim().is_empty()).collect();
    if lines.is_empty() {
        return Err(SpoolError::EmptyCommand);
    }

    let argv = match options.mode {
        ExecutionMode::Direct => {
            if lines.len() > 1 {
                return Err(SpoolError::TooManyLines(lines.len()));
            }
            let line = lines[0];
            shell::split(line).ok_or_else(|| SpoolError::UnparsableCommand(line.to_string()))?
        }
        ExecutionMode::Shell => {
            let statements = shell_statements(&lines)?;
            if statements.is_empty() {
                return Err(SpoolError::EmptyCommand);
            }
            shell_argv(&options.shell, statements.join(STATEMENT_SEPARATOR))
        }
    };

    finish(argv, options)
}

/// Normalize a command given as already-split arguments.
///
/// Direct mode uses the arguments verbatim as argv. Shell mode joins them
/// with spaces into the `-c` script.
pub fn normalize_argv<I, S>(args: I, options: &NormalizeOptions) -> Result<NormalizedCommand>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    if args.iter().all(|arg| arg.trim().is_empty()) {
        return Err(SpoolError::EmptyCommand);
    }

    let argv = match options.mode {
        ExecutionMode::Direct => args,
        ExecutionMode::Shell => shell_argv(&options.shell, args.join(" ")),
    };

    finish(argv, options)
}

/// Lines that stay intact when joined with [`STATEMENT_SEPARATOR`].
///
/// Once joined, a trailing comment would swallow every later statement and a
/// trailing `&`, `|` or `;` would sit next to the separator, so such lines
/// are rejected rather than changing meaning.
fn shell_statements<'a>(lines: &[&'a str]) -> Result<Vec<&'a str>> {
    let mut statements = Vec::with_capacity(lines.len());

    for line in lines {
        let unparsable = || SpoolError::UnparsableCommand(line.to_string());
        let words = shell::split(line).ok_or_else(unparsable)?;

        if words.is_empty() {
            // comment only
            continue;
        }
        if has_trailing_comment(line, &words) || ends_with_operator(line) {
            return Err(unparsable());
        }

        statements.push(line.trim());
    }

    Ok(statements)
}

// An unquoted comment also swallows anything appended after it.
fn has_trailing_comment(line: &str, words: &[String]) -> bool {
    shell::split(&format!("{line} x")).as_deref() == Some(words)
}

fn ends_with_operator(line: &str) -> bool {
    let trimmed = line.trim_end();
    match trimmed.chars().next_back() {
        Some('&' | '|' | ';') => {
            let escapes = trimmed[..trimmed.len() - 1]
                .chars()
                .rev()
                .take_while(|&c| c == '\\')
                .count();
            escapes % 2 == 0
        }
        _ => false,
    }
}

fn shell_argv(shell: &str, script: String) -> Vec<String> {
    vec![shell.to_string(), "-c".to_string(), script]
}

fn finish(mut argv: Vec<String>, options: &NormalizeOptions) -> Result<NormalizedCommand> {
    // A line of only comments splits to nothing
    if argv.is_empty() || argv[0].is_empty() {
        return Err(SpoolError::EmptyCommand);
    }

    argv[0] = resolve_program(&argv[0], options.resolution)?;
    Ok(NormalizedCommand { argv })
}
