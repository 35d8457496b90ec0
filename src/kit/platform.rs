use std::path::{Path, PathBuf};

use crate::error::{KitError, KitResult};

/// Operating-system families the host application ships kits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPlatform {
    Windows,
    MacOs,
}

impl HostPlatform {
    /// Maps an OS identifier as reported by `std::env::consts::OS`.
    pub fn from_os(os: &str) -> KitResult<Self> {
        match os {
            "windows" => Ok(Self::Windows),
            "macos" => Ok(Self::MacOs),
            other => Err(KitError::UnsupportedPlatform(other.to_string())),
        }
    }

    /// The host's kits directory under `home`.
    pub fn kits_dir(self, home: &Path) -> PathBuf {
        match self {
            Self::Windows => home
                .join("AppData")
                .join("Roaming")
                .join("Luxology")
                .join("Kits"),
            Self::MacOs => home
                .join("Library")
                .join("Application Support")
                .join("Luxology")
                .join("Kits"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_platforms_resolve() {
        let home = Path::new("home");
        assert_eq!(
            HostPlatform::from_os("macos").unwrap().kits_dir(home),
            home.join("Library/Application Support/Luxology/Kits")
        );
        assert_eq!(
            HostPlatform::from_os("windows").unwrap().kits_dir(home),
            home.join("AppData").join("Roaming").join("Luxology").join("Kits")
        );
    }

    #[test]
    fn other_platforms_are_rejected() {
        for os in ["linux", "freebsd", "", "Windows"] {
            let err = HostPlatform::from_os(os).unwrap_err();
            assert!(matches!(err, KitError::UnsupportedPlatform(ref name) if name == os));
        }
    }
}
