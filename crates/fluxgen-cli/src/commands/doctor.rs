//! Doctor command implementation
//!
//! Checks that the generator executable can be found and run.

use anyhow::{Context, Result};
use colored::Colorize;
use fluxgen_core::config::locate_executable;
use fluxgen_core::{GeneratorSettings, FLUXTION_EXE_ENV, PATH_LIST_SEPARATOR};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Run the doctor command
///
/// Checks:
/// - Generator executable (flag, settings file, `FLUXTION_EXE`, `PATH`)
/// - Platform classpath separator
///
/// # Returns
/// Exit code: 0 if all checks pass, 1 if any fail
pub fn run(fluxtion_exe: Option<&Path>, config: Option<&Path>) -> Result<ExitCode> {
    println!("{}", "Fluxgen Doctor".cyan().bold());
    println!("{}", "==============".cyan());
    println!();

    let mut all_ok = true;

    println!("{}", "Versions:".bold());
    println!(
        "  {} fluxgen-cli v{}",
        "->".green(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("{}", "Generator:".bold());
    let configured = match config {
        Some(path) => GeneratorSettings::from_path(path)
            .with_context(|| format!("Failed to load settings file: {}", path.display()))?
            .fluxtion_exe,
        None => None,
    };
    let candidate = fluxtion_exe
        .map(Path::to_path_buf)
        .or(configured)
        .or_else(|| std::env::var_os(FLUXTION_EXE_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("fluxtion"));

    match check_executable(&candidate) {
        ExecutableStatus::Ready(path) => {
            println!("  {} {}", "ok".green(), path.display());
        }
        ExecutableStatus::NotExecutable(path) => {
            println!("  {} {} is not executable", "!!".red(), path.display());
            all_ok = false;
        }
        ExecutableStatus::NotFound => {
            println!("  {} {} not found", "!!".red(), candidate.display());
            println!(
                "     {}",
                format!("Pass --fluxtion-exe or set {}.", FLUXTION_EXE_ENV).dimmed()
            );
            all_ok = false;
        }
    }
    println!();

    println!("{}", "Platform:".bold());
    println!(
        "  {} classpath separator '{}'",
        "->".green(),
        PATH_LIST_SEPARATOR
    );
    println!();

    if all_ok {
        println!("{} All checks passed!", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} Some checks failed. See above for details.",
            "WARNING".yellow().bold()
        );
        Ok(ExitCode::from(1))
    }
}

/// Status of the generator executable check
#[derive(Debug, PartialEq, Eq)]
enum ExecutableStatus {
    Ready(PathBuf),
    NotExecutable(PathBuf),
    NotFound,
}

fn check_executable(candidate: &Path) -> ExecutableStatus {
    let path = locate_executable(candidate);
    if !path.is_file() {
        return ExecutableStatus::NotFound;
    }
    if is_executable(&path) {
        ExecutableStatus::Ready(path)
    } else {
        ExecutableStatus::NotExecutable(path)
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_executable() {
        let status = check_executable(Path::new("/no/such/dir/fluxtion"));
        assert_eq!(status, ExecutableStatus::NotFound);
    }

    #[test]
    #[cfg(unix)]
    fn test_executable_bits() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("fluxtion");
        std::fs::write(&exe, "#!/bin/sh\nexit 0\n").unwrap();

        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o644)).unwrap();
        assert!(matches!(
            check_executable(&exe),
            ExecutableStatus::NotExecutable(_)
        ));

        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert!(matches!(check_executable(&exe), ExecutableStatus::Ready(_)));
    }
}
