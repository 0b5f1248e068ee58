//! Generate command implementation
//!
//! Resolves the settings, builds the classpath and launches the generator.

use anyhow::Result;
use colored::Colorize;
use fluxgen_core::Generator;
use std::process::ExitCode;
use std::time::Instant;

use super::reporting;
use crate::cli_args::{ClasspathArgs, GeneratorArgs};
use crate::input::{load_classpath, load_settings, separator_for};

/// Run the generate command
///
/// # Returns
/// Exit code: 0 success, 1 configuration or classpath error, 2 generator failure
pub fn run(generator_args: &GeneratorArgs, classpath_args: &ClasspathArgs) -> Result<ExitCode> {
    let start = Instant::now();

    let settings = load_settings(generator_args)?;
    let project = load_classpath(classpath_args, separator_for(&settings))?;

    let generator = match Generator::from_settings(&settings) {
        Ok(generator) => generator,
        Err(err) => return Ok(reporting::fail(&err)),
    };
    reporting::print_configuration(generator.config());
    println!(
        "{} {} entries",
        "Classpath:".dimmed(),
        project.classpath.len()
    );

    let report = match generator.run(&project) {
        Ok(report) => report,
        Err(err) => return Ok(reporting::fail(&err)),
    };

    if let Some(err) = &report.suppressed {
        println!(
            "{} [{}] {} (ignored)",
            "WARNING".yellow().bold(),
            err.code().dimmed(),
            err
        );
    }

    let outcome = report
        .outcome
        .map(|o| o.to_string())
        .unwrap_or_else(|| "not run".to_string());
    println!(
        "{} {} in {:.2}s ({})",
        "SUCCESS".green().bold(),
        generator.config().class_name,
        start.elapsed().as_secs_f64(),
        outcome
    );

    Ok(ExitCode::SUCCESS)
}
