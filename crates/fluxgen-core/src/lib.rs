//! Fluxgen Core
//!
//! This crate invokes the Fluxtion generator executable as a build step. It
//! assembles the runtime classpath and output-directory conventions from the
//! project's build configuration, composes the generator command line, and
//! launches the generator as a subprocess that shares the build's console.
//!
//! # Overview
//!
//! An invocation runs five components in order, each feeding the next:
//!
//! 1. **Path resolution** ([`paths`]) - default output, build and resource
//!    directories under `{base}/target`
//! 2. **Classpath** ([`classpath`]) - join the host's runtime classpath
//!    entries with the platform separator
//! 3. **Command** ([`command`]) - fixed-order flag/value pairs, `-cp` last
//! 4. **Invoker** ([`invoker`]) - spawn, merge stderr into stdout, wait
//! 5. **Policy** ([`policy`]) - decide whether the outcome fails the build
//!
//! The generator itself is opaque: only its command line is known here.
//!
//! # Example
//!
//! ```ignore
//! use fluxgen_core::{generate, GeneratorSettings, HostProject};
//!
//! let settings = GeneratorSettings::new()
//!     .project_base_dir("/work/pricing")
//!     .fluxtion_exe("/opt/fluxtion/bin/fluxtion")
//!     .package_name("com.acme.fx")
//!     .class_name("BiasMonitor");
//!
//! let project = HostProject::new(["/work/pricing/target/classes", "/m2/fluxtion-api.jar"]);
//! let report = generate(&settings, &project)?;
//! println!("{:?}", report.outcome);
//! ```
//!
//! # Crate Structure
//!
//! - [`config`] - Settings surface and resolved configuration
//! - [`generator`] - Invocation entry point and state machine
//! - [`error`] - Error types

pub mod classpath;
pub mod command;
pub mod config;
pub mod error;
pub mod generator;
pub mod invoker;
pub mod paths;
pub mod policy;

// Re-export main types at crate root
pub use classpath::{ClasspathBuilder, JoinedClasspath, PATH_LIST_SEPARATOR};
pub use command::GeneratorCommand;
pub use config::{Configuration, GeneratorSettings, FLUXTION_EXE_ENV};
pub use error::{
    ClasspathError, ConfigError, GeneratorError, GeneratorResult, GENERATION_FAILURE_MESSAGE,
};
pub use generator::{generate, Generator, HostProject, InvocationReport, InvocationState};
pub use invoker::ProcessOutcome;
pub use paths::{OutputDirectories, GENERATOR_NAME};
pub use policy::{ErrorDisposition, ExitStatusPolicy, ResultPolicy, Verdict};
