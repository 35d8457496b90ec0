use std::collections::HashMap;
use std::fmt;

use crate::error::KitResult;
use crate::hint::classify_hint;
use crate::kit::catalog::KitEntry;
use crate::model::kit::KitStatusRecord;

/// Installed kits keyed by name, as reported by the host.
#[derive(Debug, Default)]
pub struct KitRegistry {
    installed: HashMap<String, KitStatusRecord>,
}

/// How a catalog kit relates to what the host has installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallState {
    NotInstallable,
    NotInstalled,
    UpdateAvailable { installed: String, available: String },
    Installed,
}

impl KitRegistry {
    /// Builds the registry from host hint strings. Blank lines are skipped.
    pub fn from_hints<'a>(hints: impl IntoIterator<Item = &'a str>) -> KitResult<Self> {
        let mut registry = Self::default();
        for hint in hints {
            if hint.trim().is_empty() {
                continue;
            }
            registry.insert(classify_hint(hint)?);
        }
        let enabled = registry
            .installed
            .values()
            .filter(|record| record.is_enabled())
            .count();
        tracing::debug!(
            "registry holds {} installed kits ({enabled} enabled)",
            registry.len()
        );
        Ok(registry)
    }

    pub fn insert(&mut self, record: KitStatusRecord) {
        self.installed.insert(record.name().to_string(), record);
    }

    pub fn get(&self, name: &str) -> Option<&KitStatusRecord> {
        self.installed.get(name)
    }

    pub fn len(&self) -> usize {
        self.installed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installed.is_empty()
    }

    pub fn install_state(&self, kit: &KitEntry) -> InstallState {
        if !kit.installable {
            return InstallState::NotInstallable;
        }

        match self.get(&kit.name) {
            None => InstallState::NotInstalled,
            Some(record) if record.version() != kit.version => InstallState::UpdateAvailable {
                installed: record.version().to_string(),
                available: kit.version.clone(),
            },
            Some(_) => InstallState::Installed,
        }
    }
}

impl fmt::Display for InstallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallState::NotInstallable => write!(f, "not installable"),
            InstallState::NotInstalled => write!(f, "install"),
            InstallState::UpdateAvailable {
                installed,
                available,
            } => write!(f, "update! v{installed} -> {available}"),
            InstallState::Installed => write!(f, "installed"),
        }
    }
}
