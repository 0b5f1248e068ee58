//! Runtime classpath assembly.

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::error::ClasspathError;

/// Path-list separator of the running platform.
pub const PATH_LIST_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// Classpath entries joined into the single string passed after `-cp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedClasspath {
    value: String,
    separator: char,
}

impl JoinedClasspath {
    /// Returns the joined string.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the separator the entries were joined with.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Iterates the entries in precedence order.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.value.split(self.separator)
    }
}

impl fmt::Display for JoinedClasspath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Joins host-supplied classpath entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClasspathBuilder {
    separator: char,
}

impl Default for ClasspathBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClasspathBuilder {
    /// Creates a builder using the platform separator.
    pub fn new() -> Self {
        Self {
            separator: PATH_LIST_SEPARATOR,
        }
    }

    /// Creates a builder with an explicit separator.
    pub fn with_separator(separator: char) -> Self {
        Self { separator }
    }

    /// Returns the separator in use.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Joins `entries` in the order given.
    pub fn build<P: AsRef<Path>>(&self, entries: &[P]) -> Result<JoinedClasspath, ClasspathError> {
        if entries.is_empty() {
            return Err(ClasspathError::Empty);
        }

        let mut parts = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let entry = entry.as_ref().to_string_lossy();
            if entry.is_empty() {
                return Err(ClasspathError::EmptyEntry { index });
            }
            if entry.contains(self.separator) {
                return Err(ClasspathError::ContainsSeparator {
                    index,
                    entry: entry.into_owned(),
                    separator: self.separator,
                });
            }
            debug!("Adding element from runtime to classpath: {}", entry);
            parts.push(entry);
        }

        let value = parts.join(&self.separator.to_string());
        debug!("classpath: {}", value);

        Ok(JoinedClasspath {
            value,
            separator: self.separator,
        })
    }
}
