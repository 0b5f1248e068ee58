//! Loading of settings and host classpath from command-line inputs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fluxgen_core::{GeneratorSettings, HostProject, PATH_LIST_SEPARATOR};

use crate::cli_args::{ClasspathArgs, GeneratorArgs};

/// Reads the settings file (if any) and layers command-line overrides on top.
pub fn load_settings(args: &GeneratorArgs) -> Result<GeneratorSettings> {
    let base = match &args.config {
        Some(path) => GeneratorSettings::from_path(path)
            .with_context(|| format!("Failed to load settings file: {}", path.display()))?,
        None => GeneratorSettings::default(),
    };
    Ok(base.merge(args.overrides()?))
}

/// Collects the host classpath in precedence order.
///
/// `--classpath` is split on `separator` (the configured or platform one).
pub fn load_classpath(args: &ClasspathArgs, separator: char) -> Result<HostProject> {
    let mut entries: Vec<PathBuf> = Vec::new();

    if let Some(joined) = &args.classpath {
        entries.extend(split_classpath(joined, separator));
    }

    if let Some(path) = &args.classpath_file {
        entries.extend(read_classpath_file(path)?);
    }

    entries.extend(args.entries.iter().cloned());

    Ok(HostProject { classpath: entries })
}

/// Separator the settings ask for, falling back to the platform one.
pub fn separator_for(settings: &GeneratorSettings) -> char {
    settings
        .path_separator
        .as_deref()
        .and_then(|s| s.chars().next())
        .unwrap_or(PATH_LIST_SEPARATOR)
}

fn split_classpath(joined: &str, separator: char) -> Vec<PathBuf> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined.split(separator).map(PathBuf::from).collect()
}

fn read_classpath_file(path: &Path) -> Result<Vec<PathBuf>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read classpath file: {}", path.display()))?;
    Ok(parse_classpath_lines(&content))
}

fn parse_classpath_lines(content: &str) -> Vec<PathBuf> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect()
}
