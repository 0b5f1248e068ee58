//! Command command implementation
//!
//! Prints the generator command line that `generate` would launch.

use anyhow::Result;
use fluxgen_core::Generator;
use std::process::ExitCode;

use super::reporting;
use crate::cli_args::{ClasspathArgs, GeneratorArgs};
use crate::input::{load_classpath, load_settings, separator_for};

/// Run the command command
///
/// # Arguments
/// * `json_output` - Print the argument list as a JSON array instead of one line
pub fn run(
    generator_args: &GeneratorArgs,
    classpath_args: &ClasspathArgs,
    json_output: bool,
) -> Result<ExitCode> {
    let settings = load_settings(generator_args)?;
    let project = load_classpath(classpath_args, separator_for(&settings))?;

    let command = match Generator::from_settings(&settings).and_then(|g| g.compose(&project)) {
        Ok(command) => command,
        Err(err) => return Ok(reporting::fail(&err)),
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(command.tokens())?);
    } else {
        println!("{}", command.display_line());
    }

    Ok(ExitCode::SUCCESS)
}
