//! Fluxgen CLI library.
//!
//! This crate provides the command implementations behind the `fluxgen`
//! binary: settings and classpath loading, log setup, and the `generate`,
//! `command` and `doctor` commands.

pub mod cli_args;
pub mod commands;
pub mod input;
pub mod logging;
