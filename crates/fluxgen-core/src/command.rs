//! Generator command line composition.
//!
//! The generator parses flag/value pairs in a fixed order:
//!
//! ```text
//! <exe> [--debug] -outDirectory <dir> -buildDirectory <dir> -outResDirectory <dir>
//!       -outPackage <pkg> -outClass <class> -biasConfig <config> -cp <classpath>
//! ```
//!
//! `-cp` must stay the final pair.

use std::path::Path;

use crate::classpath::JoinedClasspath;
use crate::config::Configuration;

/// Enables debug logging inside the generator.
pub const DEBUG_FLAG: &str = "--debug";
pub const OUT_DIRECTORY_FLAG: &str = "-outDirectory";
pub const BUILD_DIRECTORY_FLAG: &str = "-buildDirectory";
pub const OUT_RES_DIRECTORY_FLAG: &str = "-outResDirectory";
pub const OUT_PACKAGE_FLAG: &str = "-outPackage";
pub const OUT_CLASS_FLAG: &str = "-outClass";
pub const BIAS_CONFIG_FLAG: &str = "-biasConfig";
pub const CLASSPATH_FLAG: &str = "-cp";

/// Ordered argument list for the generator process, program first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorCommand {
    tokens: Vec<String>,
}

impl GeneratorCommand {
    /// Composes the command for a resolved configuration and classpath.
    pub fn compose(config: &Configuration, classpath: &JoinedClasspath) -> Self {
        let mut tokens = vec![path_token(&config.executable_path)];
        if config.log_debug {
            tokens.push(DEBUG_FLAG.to_string());
        }

        let dirs = &config.directories;
        let pairs = [
            (OUT_DIRECTORY_FLAG, path_token(&dirs.output)),
            (BUILD_DIRECTORY_FLAG, path_token(&dirs.build)),
            (OUT_RES_DIRECTORY_FLAG, path_token(&dirs.resources_output)),
            (OUT_PACKAGE_FLAG, config.package_name.clone()),
            (OUT_CLASS_FLAG, config.class_name.clone()),
            (BIAS_CONFIG_FLAG, config.bias_config.clone().unwrap_or_default()),
        ];
        for (flag, value) in pairs {
            tokens.push(flag.to_string());
            tokens.push(value);
        }

        // must be at end
        tokens.push(CLASSPATH_FLAG.to_string());
        tokens.push(classpath.as_str().to_string());

        Self { tokens }
    }

    /// Wraps an already ordered token list.
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// The executable.
    pub fn program(&self) -> &str {
        self.tokens.first().map(String::as_str).unwrap_or_default()
    }

    /// Arguments after the executable.
    pub fn args(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or_default()
    }

    /// Every token, executable included.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Value following `flag`, if present.
    pub fn value_of(&self, flag: &str) -> Option<&str> {
        self.tokens
            .iter()
            .position(|t| t == flag)
            .and_then(|i| self.tokens.get(i + 1))
            .map(String::as_str)
    }

    /// Space-joined form used in the log line.
    pub fn display_line(&self) -> String {
        self.tokens.join(" ")
    }
}

fn path_token(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
