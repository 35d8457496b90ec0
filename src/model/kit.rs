use std::fmt;
use std::path::{Path, PathBuf};

/// Version reported for kits the host has disabled.
pub const NOT_APPLICABLE: &str = "n/a";

/// State of an installed kit as reported by the host's UI hints.
///
/// Built through [`KitStatusRecord::enabled`] or [`KitStatusRecord::disabled`],
/// so a disabled record always carries [`NOT_APPLICABLE`] and an enabled one
/// always carries a real version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitStatusRecord {
    name: String,
    enabled: bool,
    version: String,
    install_path: Option<PathBuf>,
}

impl KitStatusRecord {
    pub fn enabled(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            version: version.into(),
            install_path: None,
        }
    }

    pub fn disabled(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: false,
            version: NOT_APPLICABLE.to_string(),
            install_path: None,
        }
    }

    /// Returns a copy of this record located at `path`.
    pub fn with_install_path(self, path: impl Into<PathBuf>) -> Self {
        Self {
            install_path: Some(path.into()),
            ..self
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn install_path(&self) -> Option<&Path> {
        self.install_path.as_deref()
    }
}

impl fmt::Display for KitStatusRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.enabled { "enabled" } else { "disabled" };
        write!(f, "{} [{state}] version {}", self.name, self.version)?;
        if let Some(path) = self.install_path() {
            write!(f, " ({})", path.display())?;
        }
        Ok(())
    }
}
