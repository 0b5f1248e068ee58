//! Output directory conventions.
//!
//! Unset directories are derived from the canonical project base directory:
//!
//! | Setting | Default |
//! |---------|---------|
//! | `outputDirectory` | `{base}/target/generated-sources/fluxtionFx` |
//! | `resourcesOutputDirectory` | `{base}/target/generated-sources/fluxtionFx-meta` |
//! | `buildDirectory` | `{base}/target/classes` |
//!
//! Nothing here touches the filesystem except [`canonical_base_dir`]; the
//! generator (or the host) creates the directories.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Generator name used in the default source and resource directories.
pub const GENERATOR_NAME: &str = "fluxtionFx";

/// Resolved output directories handed to the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirectories {
    /// Destination for generated sources.
    pub output: PathBuf,
    /// Destination for compiled build artifacts.
    pub build: PathBuf,
    /// Destination for generated resources and meta-data.
    pub resources_output: PathBuf,
}

/// Canonicalizes the project base directory.
pub fn canonical_base_dir(base: &Path) -> Result<PathBuf, ConfigError> {
    base.canonicalize()
        .map_err(|source| ConfigError::UnresolvableBaseDir {
            path: base.to_path_buf(),
            source,
        })
}

/// Default source output directory for a base directory.
pub fn default_output_dir(base: &Path) -> PathBuf {
    generated_sources(base).join(GENERATOR_NAME)
}

/// Default resources output directory for a base directory.
pub fn default_resources_dir(base: &Path) -> PathBuf {
    generated_sources(base).join(format!("{}-meta", GENERATOR_NAME))
}

/// Default build directory for a base directory.
pub fn default_build_dir(base: &Path) -> PathBuf {
    base.join("target").join("classes")
}

fn generated_sources(base: &Path) -> PathBuf {
    base.join("target").join("generated-sources")
}

/// Fills in unset directories from an already canonical base directory.
///
/// Empty strings count as unset. Absolute values are kept as given; relative
/// values are anchored at `base`.
pub fn resolve_directories(
    base: &Path,
    output: Option<&str>,
    build: Option<&str>,
    resources_output: Option<&str>,
) -> OutputDirectories {
    OutputDirectories {
        output: anchored(base, output).unwrap_or_else(|| default_output_dir(base)),
        build: anchored(base, build).unwrap_or_else(|| default_build_dir(base)),
        resources_output: anchored(base, resources_output)
            .unwrap_or_else(|| default_resources_dir(base)),
    }
}

fn anchored(base: &Path, value: Option<&str>) -> Option<PathBuf> {
    let value = value.filter(|v| !v.is_empty())?;
    let path = Path::new(value);
    if path.is_absolute() {
        Some(path.to_path_buf())
    } else {
        Some(base.join(path))
    }
}
