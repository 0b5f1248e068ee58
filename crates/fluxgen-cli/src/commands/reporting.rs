use colored::Colorize;
use fluxgen_core::{Configuration, GeneratorError};
use std::process::ExitCode;

/// Exit code for configuration and classpath errors.
pub(crate) const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code for a failed (or escalated) generator run.
pub(crate) const EXIT_GENERATION_ERROR: u8 = 2;

/// Maps an invocation error to the process exit status.
pub(crate) fn exit_status_for(err: &GeneratorError) -> u8 {
    if err.is_hard_stop() {
        EXIT_CONFIG_ERROR
    } else {
        EXIT_GENERATION_ERROR
    }
}

/// Prints `err` and returns the matching exit code.
pub(crate) fn fail(err: &GeneratorError) -> ExitCode {
    print_error(err);
    ExitCode::from(exit_status_for(err))
}

/// Print an invocation error with its code.
fn print_error(err: &GeneratorError) {
    eprintln!(
        "{} [{}] {}",
        "FAILED".red().bold(),
        err.code().dimmed(),
        err
    );
}

/// Print the resolved configuration in human-readable form.
pub(crate) fn print_configuration(config: &Configuration) {
    println!("{} {}", "Base directory:".cyan().bold(), config.project_base_dir.display());
    println!("{} {}", "Generator:".cyan().bold(), config.executable_path.display());
    println!(
        "{} {}.{}",
        "Target:".cyan().bold(),
        config.package_name,
        config.class_name
    );
    println!(
        "{} {}",
        "Sources:".dimmed(),
        config.directories.output.display()
    );
    println!("{} {}", "Classes:".dimmed(), config.directories.build.display());
    println!(
        "{} {}",
        "Resources:".dimmed(),
        config.directories.resources_output.display()
    );
    if config.ignore_errors {
        println!("{} {}", "Ignore errors:".dimmed(), "enabled".yellow());
    }
}
