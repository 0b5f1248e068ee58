//! Generator configuration.
//!
//! [`GeneratorSettings`] is the configuration surface as the host writes it
//! (every field optional, camelCase keys). [`GeneratorSettings::resolve`]
//! fills in defaults and checks required values, producing the immutable
//! [`Configuration`] used for one invocation.
//!
//! ```json
//! {
//!   "fluxtionExe": "/opt/fluxtion/bin/fluxtion",
//!   "packageName": "com.acme.fx",
//!   "className": "BiasMonitor",
//!   "biasConfig": "com.acme.fx.BiasConfig",
//!   "logDebug": true
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classpath::PATH_LIST_SEPARATOR;
use crate::error::ConfigError;
use crate::paths::{canonical_base_dir, resolve_directories, OutputDirectories};
use crate::policy::{ErrorDisposition, ExitStatusPolicy};

/// Environment variable consulted when no executable is configured.
pub const FLUXTION_EXE_ENV: &str = "FLUXTION_EXE";

/// Unresolved generator settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GeneratorSettings {
    /// Project base directory (default: current directory).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_base_dir: Option<PathBuf>,
    /// Path or program name of the Fluxtion generator executable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fluxtion_exe: Option<PathBuf>,
    /// Opaque bias configuration identifier passed to the generator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bias_config: Option<String>,
    /// Output package of the generated processor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    /// Simple class name of the generated processor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources_output_directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_debug: Option<bool>,
    /// Continue the build even if the generator fails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_errors: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_status_policy: Option<ExitStatusPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_launch_error: Option<ErrorDisposition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_interrupted: Option<ErrorDisposition>,
    /// Single-character override for the classpath separator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_separator: Option<String>,
}

impl GeneratorSettings {
    /// Creates empty settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::ParseFailed)
    }

    /// Reads settings from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Sets the project base directory.
    pub fn project_base_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_base_dir = Some(path.into());
        self
    }

    /// Sets the generator executable.
    pub fn fluxtion_exe(mut self, path: impl Into<PathBuf>) -> Self {
        self.fluxtion_exe = Some(path.into());
        self
    }

    /// Sets the bias config identifier.
    pub fn bias_config(mut self, value: impl Into<String>) -> Self {
        self.bias_config = Some(value.into());
        self
    }

    /// Sets the output package.
    pub fn package_name(mut self, value: impl Into<String>) -> Self {
        self.package_name = Some(value.into());
        self
    }

    /// Sets the output class name.
    pub fn class_name(mut self, value: impl Into<String>) -> Self {
        self.class_name = Some(value.into());
        self
    }

    pub fn output_directory(mut self, value: impl Into<String>) -> Self {
        self.output_directory = Some(value.into());
        self
    }

    pub fn build_directory(mut self, value: impl Into<String>) -> Self {
        self.build_directory = Some(value.into());
        self
    }

    pub fn resources_output_directory(mut self, value: impl Into<String>) -> Self {
        self.resources_output_directory = Some(value.into());
        self
    }

    pub fn log_debug(mut self, enabled: bool) -> Self {
        self.log_debug = Some(enabled);
        self
    }

    pub fn ignore_errors(mut self, enabled: bool) -> Self {
        self.ignore_errors = Some(enabled);
        self
    }

    pub fn exit_status_policy(mut self, policy: ExitStatusPolicy) -> Self {
        self.exit_status_policy = Some(policy);
        self
    }

    pub fn on_launch_error(mut self, disposition: ErrorDisposition) -> Self {
        self.on_launch_error = Some(disposition);
        self
    }

    pub fn on_interrupted(mut self, disposition: ErrorDisposition) -> Self {
        self.on_interrupted = Some(disposition);
        self
    }

    pub fn path_separator(mut self, separator: char) -> Self {
        self.path_separator = Some(separator.to_string());
        self
    }

    /// Layers `overrides` on top of `self`; any value set in `overrides` wins.
    pub fn merge(self, overrides: GeneratorSettings) -> Self {
        Self {
            project_base_dir: overrides.project_base_dir.or(self.project_base_dir),
            fluxtion_exe: overrides.fluxtion_exe.or(self.fluxtion_exe),
            bias_config: overrides.bias_config.or(self.bias_config),
            package_name: overrides.package_name.or(self.package_name),
            class_name: overrides.class_name.or(self.class_name),
            output_directory: overrides.output_directory.or(self.output_directory),
            build_directory: overrides.build_directory.or(self.build_directory),
            resources_output_directory: overrides
                .resources_output_directory
                .or(self.resources_output_directory),
            log_debug: overrides.log_debug.or(self.log_debug),
            ignore_errors: overrides.ignore_errors.or(self.ignore_errors),
            exit_status_policy: overrides.exit_status_policy.or(self.exit_status_policy),
            on_launch_error: overrides.on_launch_error.or(self.on_launch_error),
            on_interrupted: overrides.on_interrupted.or(self.on_interrupted),
            path_separator: overrides.path_separator.or(self.path_separator),
        }
    }

    /// Resolves into a [`Configuration`].
    ///
    /// Consults `FLUXTION_EXE` when no executable is set, and the current
    /// directory when no base directory is set.
    pub fn resolve(&self) -> Result<Configuration, ConfigError> {
        let env_exe = std::env::var_os(FLUXTION_EXE_ENV).map(PathBuf::from);
        self.resolve_with(env_exe)
    }

    pub(crate) fn resolve_with(
        &self,
        fallback_exe: Option<PathBuf>,
    ) -> Result<Configuration, ConfigError> {
        let base = match &self.project_base_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().map_err(|source| ConfigError::UnresolvableBaseDir {
                path: PathBuf::from("."),
                source,
            })?,
        };
        let project_base_dir = canonical_base_dir(&base)?;

        let exe = self
            .fluxtion_exe
            .clone()
            .or(fallback_exe)
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ConfigError::MissingRequired { key: "fluxtionExe" })?;
        let executable_path = locate_executable(&anchor_executable(&project_base_dir, exe));

        let package_name = required(&self.package_name, "packageName")?;
        let class_name = required(&self.class_name, "className")?;

        let directories = resolve_directories(
            &project_base_dir,
            self.output_directory.as_deref(),
            self.build_directory.as_deref(),
            self.resources_output_directory.as_deref(),
        );

        let path_separator = match &self.path_separator {
            Some(value) => parse_separator(value)?,
            None => PATH_LIST_SEPARATOR,
        };

        let config = Configuration {
            project_base_dir,
            executable_path,
            bias_config: self.bias_config.clone(),
            package_name,
            class_name,
            directories,
            log_debug: self.log_debug.unwrap_or(false),
            ignore_errors: self.ignore_errors.unwrap_or(false),
            exit_status_policy: self.exit_status_policy.unwrap_or_default(),
            on_launch_error: self.on_launch_error.unwrap_or(ErrorDisposition::Fail),
            on_interrupted: self.on_interrupted.unwrap_or(ErrorDisposition::Warn),
            path_separator,
        };
        debug!("resolved configuration: {:?}", config);
        Ok(config)
    }
}

/// Resolved, immutable configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Canonical project base directory.
    pub project_base_dir: PathBuf,
    pub executable_path: PathBuf,
    pub bias_config: Option<String>,
    pub package_name: String,
    pub class_name: String,
    /// Absolute output, build and resource directories.
    pub directories: OutputDirectories,
    pub log_debug: bool,
    pub ignore_errors: bool,
    pub exit_status_policy: ExitStatusPolicy,
    pub on_launch_error: ErrorDisposition,
    pub on_interrupted: ErrorDisposition,
    pub path_separator: char,
}

fn required(value: &Option<String>, key: &'static str) -> Result<String, ConfigError> {
    value
        .as_ref()
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .ok_or(ConfigError::MissingRequired { key })
}

/// Anchors a relative multi-component executable path at the project base.
/// Bare program names are left for the `PATH` lookup.
fn anchor_executable(base: &Path, exe: PathBuf) -> PathBuf {
    if exe.is_relative() && exe.components().count() > 1 {
        base.join(exe)
    } else {
        exe
    }
}

fn parse_separator(value: &str) -> Result<char, ConfigError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigError::InvalidValue {
            key: "pathSeparator",
            value: value.to_string(),
            expected: "a single character",
        }),
    }
}

/// Resolves the configured executable.
///
/// Existing paths are canonicalized. A bare program name is looked up on
/// `PATH`. Anything else is returned unchanged and fails at launch.
pub fn locate_executable(exe: &Path) -> PathBuf {
    if exe.exists() {
        return exe.canonicalize().unwrap_or_else(|_| exe.to_path_buf());
    }

    if exe.components().count() == 1 {
        if let Ok(found) = which::which(exe) {
            return found;
        }
    }

    exe.to_path_buf()
}
