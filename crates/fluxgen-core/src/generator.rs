//! Generator invocation entry point.
//!
//! One invocation walks a fixed sequence of states and never revisits one:
//!
//! ```text
//! Idle -> PathsResolved -> ClasspathBuilt -> CommandComposed
//!      -> ProcessRunning -> Terminated -> Success | Failed
//! ```
//!
//! Nothing is retried. A failed invocation is rerun from scratch by the
//! caller.

use std::path::PathBuf;

use tracing::debug;

use crate::classpath::{ClasspathBuilder, JoinedClasspath};
use crate::command::GeneratorCommand;
use crate::config::{Configuration, GeneratorSettings};
use crate::error::{GeneratorError, GeneratorResult};
use crate::invoker::{self, ProcessOutcome};
use crate::policy::ResultPolicy;

/// Progress of a single invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum InvocationState {
    Idle,
    PathsResolved,
    ClasspathBuilt,
    CommandComposed,
    ProcessRunning,
    Terminated,
    Success,
    Failed,
}

impl InvocationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvocationState::Idle => "idle",
            InvocationState::PathsResolved => "paths_resolved",
            InvocationState::ClasspathBuilt => "classpath_built",
            InvocationState::CommandComposed => "command_composed",
            InvocationState::ProcessRunning => "process_running",
            InvocationState::Terminated => "terminated",
            InvocationState::Success => "success",
            InvocationState::Failed => "failed",
        }
    }

    /// Returns true for `Success` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, InvocationState::Success | InvocationState::Failed)
    }
}

/// What the host supplies for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostProject {
    /// Resolved runtime classpath entries in precedence order.
    pub classpath: Vec<PathBuf>,
}

impl HostProject {
    pub fn new(classpath: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            classpath: classpath.into_iter().map(Into::into).collect(),
        }
    }
}

/// Summary of a completed invocation.
#[derive(Debug)]
pub struct InvocationReport {
    /// The command that was launched (or attempted).
    pub command: GeneratorCommand,
    /// How the process terminated; `None` when it never ran to completion.
    pub outcome: Option<ProcessOutcome>,
    /// Terminal state.
    pub state: InvocationState,
    /// A failure absorbed by `ignoreErrors` or a `warn` disposition.
    pub suppressed: Option<GeneratorError>,
}

struct Progress {
    state: InvocationState,
}

impl Progress {
    fn at(state: InvocationState) -> Self {
        Self { state }
    }

    fn advance(&mut self, next: InvocationState) {
        debug_assert!(next > self.state, "{:?} -> {:?}", self.state, next);
        debug!("invocation {} -> {}", self.state.as_str(), next.as_str());
        self.state = next;
    }
}

/// Runs the Fluxtion generator for a resolved configuration.
#[derive(Debug, Clone)]
pub struct Generator {
    config: Configuration,
}

impl Generator {
    /// Creates a generator for a fully-populated configuration.
    pub fn new(config: Configuration) -> Self {
        Self { config }
    }

    /// Resolves `settings` and creates a generator.
    pub fn from_settings(settings: &GeneratorSettings) -> GeneratorResult<Self> {
        Ok(Self::new(settings.resolve()?))
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Joins the host classpath with the configured separator.
    pub fn build_classpath(&self, project: &HostProject) -> GeneratorResult<JoinedClasspath> {
        let classpath = ClasspathBuilder::with_separator(self.config.path_separator)
            .build(project.classpath.as_slice())?;
        Ok(classpath)
    }

    /// Composes the command without launching it.
    pub fn compose(&self, project: &HostProject) -> GeneratorResult<GeneratorCommand> {
        let classpath = self.build_classpath(project)?;
        Ok(GeneratorCommand::compose(&self.config, &classpath))
    }

    /// Builds the classpath, launches the generator and applies the result
    /// policy.
    pub fn run(&self, project: &HostProject) -> GeneratorResult<InvocationReport> {
        let mut progress = Progress::at(InvocationState::PathsResolved);
        let policy = ResultPolicy::from_config(&self.config);

        let classpath = self.build_classpath(project)?;
        progress.advance(InvocationState::ClasspathBuilt);

        let command = GeneratorCommand::compose(&self.config, &classpath);
        progress.advance(InvocationState::CommandComposed);

        progress.advance(InvocationState::ProcessRunning);
        let (outcome, verdict) = match invoker::run(&command) {
            Ok(outcome) => {
                progress.advance(InvocationState::Terminated);
                debug!("generator finished with {}", outcome);
                (Some(outcome), policy.judge_outcome(outcome))
            }
            Err(err) => (None, policy.judge_error(err)),
        };

        match verdict.into_result() {
            Ok(suppressed) => {
                progress.advance(InvocationState::Success);
                Ok(InvocationReport {
                    command,
                    outcome,
                    state: progress.state,
                    suppressed,
                })
            }
            Err(err) => {
                progress.advance(InvocationState::Failed);
                Err(err)
            }
        }
    }
}

/// Resolves `settings` and runs the generator once.
pub fn generate(
    settings: &GeneratorSettings,
    project: &HostProject,
) -> GeneratorResult<InvocationReport> {
    let generator = Generator::from_settings(settings)?;
    generator.run(project)
}
