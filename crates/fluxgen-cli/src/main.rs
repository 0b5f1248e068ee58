//! Fluxgen CLI - run the Fluxtion generator as a build step
//!
//! The host build resolves the runtime classpath and calls this binary at the
//! point in its lifecycle where generated sources are needed.

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

use fluxgen_cli::cli_args::{Cli, Commands};
use fluxgen_cli::{commands, logging};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            generator,
            classpath,
        } => commands::generate::run(&generator, &classpath),
        Commands::Command {
            generator,
            classpath,
            json,
        } => commands::compose::run(&generator, &classpath, json),
        Commands::Doctor {
            fluxtion_exe,
            config,
        } => commands::doctor::run(fluxtion_exe.as_deref(), config.as_deref()),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::from(1)
        }
    }
}
