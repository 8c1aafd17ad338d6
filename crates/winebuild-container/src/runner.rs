//! External process runner.
//!
//! Every external command the tool issues goes through [`run_checked`]: the
//! full command line is logged and audited, the child inherits stdio so
//! build output streams straight to the terminal, and a non-zero exit
//! status aborts the invocation. Commands run strictly one after another;
//! the first failure wins and nothing is retried or rolled back.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use thiserror::Error;
use winebuild_core::observability;

/// Errors from external command execution. All are terminal.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("`{0}` not found in PATH")]
    ProgramNotFound(String),

    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with status {code}")]
    ExternalProcessFailure { command: String, code: i32 },
}

/// Locate `program` in `PATH` up front, so a missing binary is a clear
/// diagnostic instead of a spawn error halfway through the pipeline.
pub fn find_program(program: &str) -> Result<PathBuf, RunnerError> {
    which::which(program).map_err(|_| RunnerError::ProgramNotFound(program.to_string()))
}

/// Run a command to completion, inheriting stdio, and fail on non-zero
/// exit. A child killed by a signal reports exit code `-1`.
pub fn run_checked(program: &Path, args: &[String]) -> Result<(), RunnerError> {
    let cmdline = display_command(program, args);
    tracing::info!(command = %cmdline, "running external command");
    observability::audit_command_invoked(&program.to_string_lossy(), args);

    let start = Instant::now();
    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|source| RunnerError::Spawn {
            command: cmdline.clone(),
            source,
        })?;

    let code = status.code().unwrap_or(-1);
    observability::audit_execution_completed(
        &program.to_string_lossy(),
        code,
        start.elapsed().as_millis() as u64,
    );

    if !status.success() {
        return Err(RunnerError::ExternalProcessFailure {
            command: cmdline,
            code,
        });
    }
    Ok(())
}

fn display_command(program: &Path, args: &[String]) -> String {
    let mut parts = vec![program.to_string_lossy().into_owned()];
    parts.extend(args.iter().cloned());
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_exit_succeeds() {
        assert!(run_checked(Path::new("true"), &[]).is_ok());
    }

    #[test]
    fn nonzero_exit_fails_with_code() {
        let err = run_checked(Path::new("false"), &[]).unwrap_err();
        match err {
            RunnerError::ExternalProcessFailure { code, .. } => assert_eq!(code, 1),
            other => panic!("expected ExternalProcessFailure, got {other:?}"),
        }
    }

    #[test]
    fn missing_binary_fails_to_spawn() {
        let err = run_checked(Path::new("/nonexistent/winebuild-no-such-binary"), &[]).unwrap_err();
        assert!(matches!(err, RunnerError::Spawn { .. }));
    }

    #[test]
    fn find_program_reports_missing() {
        let err = find_program("winebuild-no-such-binary").unwrap_err();
        assert!(matches!(err, RunnerError::ProgramNotFound(_)));
    }

    #[test]
    fn display_includes_all_arguments() {
        let args = vec!["run".to_string(), "--rm".to_string()];
        assert_eq!(display_command(Path::new("docker"), &args), "docker run --rm");
    }
}
