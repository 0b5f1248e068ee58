//! Error types for the generator invoker.

use std::path::PathBuf;
use thiserror::Error;

use crate::invoker::ProcessOutcome;

/// Fixed message reported when the generator step fails.
pub const GENERATION_FAILURE_MESSAGE: &str = "unable to execute fluxtion-statemachine generator";

/// Result type for generator operations.
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Errors raised while resolving the configuration surface.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required value was absent or empty after defaulting.
    #[error("Missing required configuration value '{key}'")]
    MissingRequired { key: &'static str },

    /// The project base directory could not be canonicalized.
    #[error("Project base directory {path} cannot be resolved: {source}")]
    UnresolvableBaseDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value was present but not one of the accepted spellings.
    #[error("Invalid value '{value}' for '{key}': expected {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Failed to read a settings file.
    #[error("Failed to read settings from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse settings JSON.
    #[error("Failed to parse settings: {0}")]
    ParseFailed(#[source] serde_json::Error),
}

/// Errors raised while joining the host classpath.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClasspathError {
    /// The host supplied no entries at all.
    #[error("Classpath is empty: the host build supplied no runtime classpath entries")]
    Empty,

    /// An entry was the empty string.
    #[error("Classpath entry {index} is empty")]
    EmptyEntry { index: usize },

    /// An entry contains the separator and would split into two entries.
    #[error("Classpath entry {index} ('{entry}') contains the path separator '{separator}'")]
    ContainsSeparator {
        index: usize,
        entry: String,
        separator: char,
    },
}

/// Errors that can occur during a generator invocation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Configuration could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Classpath could not be built.
    #[error(transparent)]
    Classpath(#[from] ClasspathError),

    /// The generator process could not be started.
    #[error("Failed to launch generator {executable}: {source}")]
    Launch {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Waiting for the generator process was interrupted.
    #[error("Interrupted while waiting for the generator: {0}")]
    Interrupted(#[source] std::io::Error),

    /// The generator ran and its exit status was interpreted as a failure.
    #[error("{}", GENERATION_FAILURE_MESSAGE)]
    GenerationFailed { outcome: ProcessOutcome },
}

impl GeneratorError {
    /// Creates a new launch error.
    pub fn launch(executable: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Launch {
            executable: executable.into(),
            source,
        }
    }

    /// Creates a new generation failure for the given outcome.
    pub fn generation_failed(outcome: ProcessOutcome) -> Self {
        Self::GenerationFailed { outcome }
    }

    /// Returns true for errors raised before any subprocess is launched.
    pub fn is_hard_stop(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Classpath(_))
    }

    /// Stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            GeneratorError::Config(ConfigError::MissingRequired { .. }) => "FLUXGEN_001",
            GeneratorError::Config(ConfigError::UnresolvableBaseDir { .. }) => "FLUXGEN_002",
            GeneratorError::Config(ConfigError::InvalidValue { .. }) => "FLUXGEN_003",
            GeneratorError::Config(ConfigError::ReadFailed { .. }) => "FLUXGEN_004",
            GeneratorError::Config(ConfigError::ParseFailed(_)) => "FLUXGEN_005",
            GeneratorError::Classpath(ClasspathError::Empty) => "FLUXGEN_006",
            GeneratorError::Classpath(ClasspathError::EmptyEntry { .. }) => "FLUXGEN_007",
            GeneratorError::Classpath(ClasspathError::ContainsSeparator { .. }) => "FLUXGEN_008",
            GeneratorError::Launch { .. } => "FLUXGEN_009",
            GeneratorError::Interrupted(_) => "FLUXGEN_010",
            GeneratorError::GenerationFailed { .. } => "FLUXGEN_011",
        }
    }

    /// Error category for grouping related errors.
    pub fn category(&self) -> &'static str {
        match self {
            GeneratorError::Config(_) => "config",
            GeneratorError::Classpath(_) => "classpath",
            GeneratorError::Launch { .. } => "launch",
            GeneratorError::Interrupted(_) => "process",
            GeneratorError::GenerationFailed { .. } => "generation",
        }
    }
}
