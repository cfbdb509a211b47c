//! Executable path resolution for the first command token.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::Resolution;
use crate::error::{Result, SpoolError};

/// Resolve `program` to an absolute path according to `resolution`.
///
/// - `Local`: looked up on the current `PATH` (paths containing a separator
///   are checked in place). Missing or non-executable is an error.
/// - `Remote`: no lookup, since the script may be installed on another
///   machine, but the program must already be an absolute path.
pub fn resolve_program(program: &str, resolution: Resolution) -> Result<String> {
    match resolution {
        Resolution::Local => {
            let found = which::which(program)
                .map_err(|_| SpoolError::ExecutableNotFound(program.to_string()))?;
            finish_local(program, found)
        }
        Resolution::Remote => require_absolute(program),
    }
}

/// Local resolution against an explicit search path and working directory.
pub fn resolve_program_in<P, C>(program: &str, paths: Option<P>, cwd: C) -> Result<String>
where
    P: AsRef<OsStr>,
    C: AsRef<Path>,
{
    let found = which::which_in(program, paths, cwd)
        .map_err(|_| SpoolError::ExecutableNotFound(program.to_string()))?;
    finish_local(program, found)
}

fn finish_local(program: &str, found: PathBuf) -> Result<String> {
    let resolved = found.into_os_string().into_string().map_err(|raw| {
        SpoolError::invalid_field(
            "executable path",
            raw.to_string_lossy(),
            "path is not valid UTF-8",
        )
    })?;

    if !Path::new(&resolved).is_absolute() {
        return Err(SpoolError::NotAbsolutePath(resolved));
    }

    debug!(program, resolved = %resolved, "resolved executable");
    Ok(resolved)
}

fn require_absolute(program: &str) -> Result<String> {
    if Path::new(program).is_absolute() {
        Ok(program.to_string())
    } else {
        Err(SpoolError::NotAbsolutePath(program.to_string()))
    }
}
