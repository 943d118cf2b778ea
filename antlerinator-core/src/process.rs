// antlerinator-core/src/process.rs
//! Running external tools (the Java launcher, mostly).
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use antlerinator_common::error::{AntlrError, Result};
use tracing::{debug, error};

/// Runs an external command with inherited stdout/stderr and returns its
/// exit status, whatever it is.
pub fn run_command<P, S>(program: P, args: &[S], cwd: Option<&Path>) -> Result<ExitStatus>
where
    P: AsRef<OsStr>,
    S: AsRef<OsStr>,
{
    let program = program.as_ref();
    let args: Vec<&OsStr> = args.iter().map(AsRef::as_ref).collect();
    debug!("Running command: {:?} {:?} (cwd: {:?})", program, args, cwd);

    let mut cmd = Command::new(program);
    cmd.args(&args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    cmd.stdin(Stdio::null());

    match cmd.status() {
        Ok(status) => {
            if status.success() {
                debug!("Command finished successfully.");
            } else {
                debug!("Command failed with status: {}", status);
            }
            Ok(status)
        }
        Err(e) => {
            error!("Failed to execute command {:?}: {}", program, e);
            Err(AntlrError::CommandExecError(format!(
                "{}: {e}",
                program.to_string_lossy()
            )))
        }
    }
}

/// Like [`run_command`], but a non-zero exit is an error carrying the code.
pub fn spawn<P, S>(program: P, args: &[S], cwd: Option<&Path>) -> Result<()>
where
    P: AsRef<OsStr>,
    S: AsRef<OsStr>,
{
    let program = program.as_ref();
    let status = run_command(program, args, cwd)?;
    if status.success() {
        return Ok(());
    }
    let command_line = std::iter::once(program)
        .chain(args.iter().map(AsRef::as_ref))
        .map(OsStr::to_string_lossy)
        .collect::<Vec<_>>()
        .join(" ");
    Err(AntlrError::CommandExecError(match status.code() {
        Some(code) => format!("command '{command_line}' failed with exit code {code}"),
        None => format!("command '{command_line}' was terminated by a signal"),
    }))
}
