//! CLI argument definitions for the Fluxgen command-line interface.
//!
//! All `#[derive(Parser)]`, `#[derive(Args)]` and `#[derive(Subcommand)]`
//! types are defined here, keeping `main.rs` focused on dispatch logic.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fluxgen_core::{ErrorDisposition, ExitStatusPolicy, GeneratorSettings};

/// Fluxgen - run the Fluxtion generator as a build step
#[derive(Parser)]
#[command(name = "fluxgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the generator with the resolved configuration and classpath
    Generate {
        #[command(flatten)]
        generator: GeneratorArgs,

        #[command(flatten)]
        classpath: ClasspathArgs,
    },

    /// Print the composed generator command without launching it
    Command {
        #[command(flatten)]
        generator: GeneratorArgs,

        #[command(flatten)]
        classpath: ClasspathArgs,

        /// Print the argument list as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Check that the generator executable can be found and run
    Doctor {
        /// Path or program name of the Fluxtion generator executable
        #[arg(long)]
        fluxtion_exe: Option<PathBuf>,

        /// Settings file (JSON) to read `fluxtionExe` from
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Generator settings; command-line values override the settings file.
#[derive(Args, Debug, Clone, Default)]
pub struct GeneratorArgs {
    /// Settings file (JSON, camelCase keys)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Project base directory (default: current directory)
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Path or program name of the Fluxtion generator executable
    #[arg(long)]
    pub fluxtion_exe: Option<PathBuf>,

    /// Output package of the generated processor
    #[arg(long)]
    pub package_name: Option<String>,

    /// Simple class name of the generated processor
    #[arg(long)]
    pub class_name: Option<String>,

    /// Bias configuration passed through to the generator
    #[arg(long)]
    pub bias_config: Option<String>,

    /// Output directory for generated sources
    #[arg(long)]
    pub output_directory: Option<String>,

    /// Output directory for build artifacts
    #[arg(long)]
    pub build_directory: Option<String>,

    /// Output directory for generated resources
    #[arg(long)]
    pub resources_output_directory: Option<String>,

    /// Pass --debug to the generator
    #[arg(long)]
    pub log_debug: bool,

    /// Continue even if the generator fails
    #[arg(long)]
    pub ignore_errors: bool,

    /// Which exit statuses count as failures
    #[arg(long, value_parser = ["nonZero", "negative"])]
    pub exit_status_policy: Option<String>,

    /// What to do when the generator cannot be launched
    #[arg(long, value_parser = ["fail", "warn"])]
    pub on_launch_error: Option<String>,

    /// What to do when waiting for the generator is interrupted
    #[arg(long, value_parser = ["fail", "warn"])]
    pub on_interrupted: Option<String>,

    /// Classpath separator (default: platform separator)
    #[arg(long)]
    pub path_separator: Option<char>,
}

impl GeneratorArgs {
    /// Settings given on the command line, to be layered over the file.
    pub fn overrides(&self) -> anyhow::Result<GeneratorSettings> {
        let mut settings = GeneratorSettings {
            project_base_dir: self.base_dir.clone(),
            fluxtion_exe: self.fluxtion_exe.clone(),
            bias_config: self.bias_config.clone(),
            package_name: self.package_name.clone(),
            class_name: self.class_name.clone(),
            output_directory: self.output_directory.clone(),
            build_directory: self.build_directory.clone(),
            resources_output_directory: self.resources_output_directory.clone(),
            path_separator: self.path_separator.map(String::from),
            ..GeneratorSettings::default()
        };

        // Flags only ever switch these on; leave the file's value otherwise.
        if self.log_debug {
            settings.log_debug = Some(true);
        }
        if self.ignore_errors {
            settings.ignore_errors = Some(true);
        }

        if let Some(policy) = &self.exit_status_policy {
            settings.exit_status_policy = Some(policy.parse::<ExitStatusPolicy>()?);
        }
        if let Some(disposition) = &self.on_launch_error {
            settings.on_launch_error = Some(disposition.parse::<ErrorDisposition>()?);
        }
        if let Some(disposition) = &self.on_interrupted {
            settings.on_interrupted = Some(disposition.parse::<ErrorDisposition>()?);
        }

        Ok(settings)
    }
}

/// Where the host's runtime classpath comes from.
///
/// Sources are concatenated in the order `--classpath`, `--classpath-file`,
/// `--classpath-entry`.
#[derive(Args, Debug, Clone, Default)]
pub struct ClasspathArgs {
    /// Classpath entry (repeatable, order is precedence)
    #[arg(short = 'c', long = "classpath-entry", value_name = "PATH")]
    pub entries: Vec<PathBuf>,

    /// Separator-joined classpath, e.g. from a dependency resolver
    #[arg(long)]
    pub classpath: Option<String>,

    /// File with one classpath entry per line (# comments allowed)
    #[arg(long)]
    pub classpath_file: Option<PathBuf>,
}
