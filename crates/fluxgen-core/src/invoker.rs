//! Generator subprocess launch.
//!
//! The child inherits the console: stdin and stdout are the parent's own, and
//! stderr is pointed at the parent's stdout so both streams arrive as one.
//! Nothing is captured or buffered here. There is no timeout; a hung
//! generator blocks the invocation until it exits.

use std::fmt;
use std::process::{Command, ExitStatus, Stdio};

use tracing::info;

use crate::command::GeneratorCommand;
use crate::error::{GeneratorError, GeneratorResult};

/// How the generator process terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOutcome {
    code: Option<i32>,
}

impl ProcessOutcome {
    /// Outcome of a process that exited with `code`.
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Outcome of a process killed by a signal.
    pub fn terminated_by_signal() -> Self {
        Self { code: None }
    }

    /// Exit code, or `None` when terminated by a signal.
    pub fn code(&self) -> Option<i32> {
        self.code
    }

    /// Returns true for a zero exit code.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for ProcessOutcome {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for ProcessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit status {}", code),
            None => f.write_str("terminated by signal"),
        }
    }
}

/// Launches the generator and waits for it.
pub fn run(command: &GeneratorCommand) -> GeneratorResult<ProcessOutcome> {
    let mut cmd = Command::new(command.program());
    cmd.args(command.args())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(merged_stderr());

    info!("{}", command.display_line());

    let mut child = cmd
        .spawn()
        .map_err(|e| GeneratorError::launch(command.program(), e))?;

    let status = child.wait().map_err(GeneratorError::Interrupted)?;
    Ok(ProcessOutcome::from(status))
}

/// Stdio for the child's stderr that writes into the parent's stdout.
///
/// Falls back to inheriting stderr when stdout cannot be duplicated.
fn merged_stderr() -> Stdio {
    duplicate_stdout().unwrap_or_else(|_| Stdio::inherit())
}

#[cfg(unix)]
fn duplicate_stdout() -> std::io::Result<Stdio> {
    use std::os::fd::AsFd;
    let fd = std::io::stdout().as_fd().try_clone_to_owned()?;
    Ok(Stdio::from(fd))
}

#[cfg(windows)]
fn duplicate_stdout() -> std::io::Result<Stdio> {
    use std::os::windows::io::AsHandle;
    let handle = std::io::stdout().as_handle().try_clone_to_owned()?;
    Ok(Stdio::from(handle))
}

#[cfg(not(any(unix, windows)))]
fn duplicate_stdout() -> std::io::Result<Stdio> {
    Ok(Stdio::inherit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        assert_eq!(ProcessOutcome::from_code(3).to_string(), "exit status 3");
        assert_eq!(
            ProcessOutcome::terminated_by_signal().to_string(),
            "terminated by signal"
        );
    }

    #[test]
    fn test_outcome_success() {
        assert!(ProcessOutcome::from_code(0).success());
        assert!(!ProcessOutcome::from_code(1).success());
        assert!(!ProcessOutcome::terminated_by_signal().success());
    }

    #[test]
    fn test_missing_executable_is_launch_error() {
        let command = GeneratorCommand::from_tokens(vec![
            "/this/does/not/exist/fluxtion".to_string(),
            "-cp".to_string(),
            "/a.jar".to_string(),
        ]);

        let err = run(&command).unwrap_err();
        assert!(matches!(err, GeneratorError::Launch { .. }));
    }

    #[test]
    #[cfg(unix)]
    fn test_exit_code_is_reported() {
        let command = GeneratorCommand::from_tokens(vec![
            "sh".to_string(),
            "-c".to_string(),
            "echo to-stderr 1>&2; exit 7".to_string(),
        ]);

        let outcome = run(&command).unwrap();
        assert_eq!(outcome.code(), Some(7));
    }
}
