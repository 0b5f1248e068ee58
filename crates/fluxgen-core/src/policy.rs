//! Interpretation of the generator's termination.
//!
//! Two knobs decide whether an invocation fails:
//!
//! - [`ExitStatusPolicy`] says which exit statuses count as failures.
//! - [`ErrorDisposition`] says whether a launch error or an interrupted wait
//!   stops the build or is only logged.
//!
//! `ignoreErrors` overrides both: with it set nothing after command
//! composition is ever reported as a failure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::config::Configuration;
use crate::error::{ConfigError, GeneratorError};
use crate::invoker::ProcessOutcome;

/// Which exit statuses are failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExitStatusPolicy {
    /// Any non-zero exit code, or termination by a signal.
    #[default]
    NonZero,
    /// Only a negative exit code. Compatible with older build plugins,
    /// which in practice never fail on ordinary exit codes.
    Negative,
}

impl ExitStatusPolicy {
    /// Returns true when `outcome` is a failure under this policy.
    pub fn is_failure(&self, outcome: ProcessOutcome) -> bool {
        match self {
            ExitStatusPolicy::NonZero => !outcome.success(),
            ExitStatusPolicy::Negative => matches!(outcome.code(), Some(code) if code < 0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExitStatusPolicy::NonZero => "nonZero",
            ExitStatusPolicy::Negative => "negative",
        }
    }
}

impl FromStr for ExitStatusPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nonZero" | "non-zero" => Ok(ExitStatusPolicy::NonZero),
            "negative" => Ok(ExitStatusPolicy::Negative),
            _ => Err(ConfigError::InvalidValue {
                key: "exitStatusPolicy",
                value: s.to_string(),
                expected: "nonZero or negative",
            }),
        }
    }
}

impl fmt::Display for ExitStatusPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with a launch error or an interrupted wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorDisposition {
    /// Surface the error to the caller.
    Fail,
    /// Log the error and treat the invocation as complete.
    Warn,
}

impl ErrorDisposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorDisposition::Fail => "fail",
            ErrorDisposition::Warn => "warn",
        }
    }
}

impl FromStr for ErrorDisposition {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail" => Ok(ErrorDisposition::Fail),
            "warn" => Ok(ErrorDisposition::Warn),
            _ => Err(ConfigError::InvalidValue {
                key: "errorDisposition",
                value: s.to_string(),
                expected: "fail or warn",
            }),
        }
    }
}

impl fmt::Display for ErrorDisposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of applying the policy to an invocation.
#[derive(Debug)]
pub enum Verdict {
    /// The invocation succeeded.
    Success,
    /// The invocation failed but the failure was absorbed and logged.
    Suppressed(GeneratorError),
    /// The invocation failed.
    Failed(GeneratorError),
}

impl Verdict {
    /// Converts into a `Result`, keeping any suppressed error.
    pub fn into_result(self) -> Result<Option<GeneratorError>, GeneratorError> {
        match self {
            Verdict::Success => Ok(None),
            Verdict::Suppressed(err) => Ok(Some(err)),
            Verdict::Failed(err) => Err(err),
        }
    }
}

/// Combined failure policy for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultPolicy {
    pub exit_status: ExitStatusPolicy,
    pub ignore_errors: bool,
    pub on_launch_error: ErrorDisposition,
    pub on_interrupted: ErrorDisposition,
}

impl Default for ResultPolicy {
    fn default() -> Self {
        Self {
            exit_status: ExitStatusPolicy::default(),
            ignore_errors: false,
            on_launch_error: ErrorDisposition::Fail,
            on_interrupted: ErrorDisposition::Warn,
        }
    }
}

impl ResultPolicy {
    /// Policy described by a resolved configuration.
    pub fn from_config(config: &Configuration) -> Self {
        Self {
            exit_status: config.exit_status_policy,
            ignore_errors: config.ignore_errors,
            on_launch_error: config.on_launch_error,
            on_interrupted: config.on_interrupted,
        }
    }

    /// Judges a process that ran to completion.
    pub fn judge_outcome(&self, outcome: ProcessOutcome) -> Verdict {
        if !self.exit_status.is_failure(outcome) {
            return Verdict::Success;
        }

        let err = GeneratorError::generation_failed(outcome);
        if self.ignore_errors {
            warn!("{} ({}), continuing because ignoreErrors is set", err, outcome);
            Verdict::Suppressed(err)
        } else {
            error!("{} ({})", err, outcome);
            Verdict::Failed(err)
        }
    }

    /// Judges an error raised while launching or waiting for the process.
    ///
    /// Hard-stop errors are always failures.
    pub fn judge_error(&self, err: GeneratorError) -> Verdict {
        let Some(disposition) = self.disposition_for(&err) else {
            return Verdict::Failed(err);
        };

        if self.ignore_errors || disposition == ErrorDisposition::Warn {
            error!("error while invoking Fluxtion generator: {}", err);
            Verdict::Suppressed(err)
        } else {
            Verdict::Failed(err)
        }
    }

    fn disposition_for(&self, err: &GeneratorError) -> Option<ErrorDisposition> {
        match err {
            GeneratorError::Launch { .. } => Some(self.on_launch_error),
            GeneratorError::Interrupted(_) => Some(self.on_interrupted),
            GeneratorError::GenerationFailed { .. } => Some(ErrorDisposition::Fail),
            GeneratorError::Config(_) | GeneratorError::Classpath(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClasspathError;

    fn not_found() -> GeneratorError {
        GeneratorError::launch(
            "/missing/fluxtion",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        )
    }

    fn interrupted() -> GeneratorError {
        GeneratorError::Interrupted(std::io::Error::from(std::io::ErrorKind::Interrupted))
    }

    #[test]
    fn test_non_zero_policy() {
        let policy = ExitStatusPolicy::NonZero;
        assert!(!policy.is_failure(ProcessOutcome::from_code(0)));
        assert!(policy.is_failure(ProcessOutcome::from_code(1)));
        assert!(policy.is_failure(ProcessOutcome::from_code(-1)));
        assert!(policy.is_failure(ProcessOutcome::terminated_by_signal()));
    }

    #[test]
    fn test_negative_policy() {
        let policy = ExitStatusPolicy::Negative;
        assert!(!policy.is_failure(ProcessOutcome::from_code(0)));
        assert!(!policy.is_failure(ProcessOutcome::from_code(1)));
        assert!(!policy.is_failure(ProcessOutcome::from_code(255)));
        assert!(!policy.is_failure(ProcessOutcome::terminated_by_signal()));
        assert!(policy.is_failure(ProcessOutcome::from_code(-1)));
    }

    #[test]
    fn test_generation_failure_signaled() {
        let policy = ResultPolicy::default();
        let verdict = policy.judge_outcome(ProcessOutcome::from_code(2));
        assert!(matches!(
            verdict,
            Verdict::Failed(GeneratorError::GenerationFailed { .. })
        ));
        assert!(matches!(
            policy.judge_outcome(ProcessOutcome::from_code(0)),
            Verdict::Success
        ));
    }

    #[test]
    fn test_ignore_errors_never_fails() {
        for exit_status in [ExitStatusPolicy::NonZero, ExitStatusPolicy::Negative] {
            let policy = ResultPolicy {
                exit_status,
                ignore_errors: true,
                on_launch_error: ErrorDisposition::Fail,
                on_interrupted: ErrorDisposition::Fail,
            };

            for code in [i32::MIN, -1, 0, 1, 2, 127, 255, i32::MAX] {
                let verdict = policy.judge_outcome(ProcessOutcome::from_code(code));
                assert!(!matches!(verdict, Verdict::Failed(_)), "code {}", code);
            }
            assert!(!matches!(
                policy.judge_outcome(ProcessOutcome::terminated_by_signal()),
                Verdict::Failed(_)
            ));
            assert!(!matches!(policy.judge_error(not_found()), Verdict::Failed(_)));
            assert!(!matches!(policy.judge_error(interrupted()), Verdict::Failed(_)));
        }
    }

    #[test]
    fn test_dispositions() {
        let policy = ResultPolicy::default();
        assert!(matches!(policy.judge_error(not_found()), Verdict::Failed(_)));
        assert!(matches!(policy.judge_error(interrupted()), Verdict::Suppressed(_)));

        let lenient = ResultPolicy {
            on_launch_error: ErrorDisposition::Warn,
            ..ResultPolicy::default()
        };
        assert!(matches!(lenient.judge_error(not_found()), Verdict::Suppressed(_)));

        let strict = ResultPolicy {
            on_interrupted: ErrorDisposition::Fail,
            ..ResultPolicy::default()
        };
        assert!(matches!(
            strict.judge_error(interrupted()),
            Verdict::Failed(GeneratorError::Interrupted(_))
        ));
    }

    #[test]
    fn test_hard_stops_ignore_policy() {
        let policy = ResultPolicy {
            ignore_errors: true,
            ..ResultPolicy::default()
        };
        let verdict = policy.judge_error(GeneratorError::from(ClasspathError::Empty));
        assert!(matches!(verdict, Verdict::Failed(GeneratorError::Classpath(_))));
    }

    #[test]
    fn test_parse_policies() {
        assert_eq!(
            "nonZero".parse::<ExitStatusPolicy>().unwrap(),
            ExitStatusPolicy::NonZero
        );
        assert_eq!(
            "negative".parse::<ExitStatusPolicy>().unwrap(),
            ExitStatusPolicy::Negative
        );
        assert!("zero".parse::<ExitStatusPolicy>().is_err());
        assert_eq!("warn".parse::<ErrorDisposition>().unwrap(), ErrorDisposition::Warn);
        assert!("ignore".parse::<ErrorDisposition>().is_err());
    }

    #[test]
    fn test_verdict_into_result() {
        assert!(Verdict::Success.into_result().unwrap().is_none());
        assert!(Verdict::Suppressed(interrupted()).into_result().unwrap().is_some());
        assert!(Verdict::Failed(interrupted()).into_result().is_err());
    }
}
