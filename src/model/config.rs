use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub install: InstallConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize)]
pub struct InstallConfig {
    pub project_file: String,
    #[serde(default)]
    pub kits_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub path: Option<String>,
}

const DEFAULTS: &str = include_str!("../../config/default.toml");

impl AppConfig {
    /// Load configuration with layering: defaults → user config.
    pub fn load() -> Result<Self> {
        let mut config = Self::defaults()?;

        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "kitctl") {
            let config_path = proj_dirs.config_dir().join("config.toml");
            if config_path.exists() {
                config = Self::from_file(&config_path)?;
                tracing::info!("loaded user config from {}", config_path.display());
            }
        }

        Ok(config)
    }

    pub fn defaults() -> Result<Self> {
        toml::from_str(DEFAULTS).context("built-in default config is invalid")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Path of the project-description file relative to `cwd`.
    pub fn project_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.install.project_file)
    }

    pub fn kits_dir_override(&self) -> Option<PathBuf> {
        self.install
            .kits_dir
            .as_deref()
            .filter(|dir| !dir.trim().is_empty())
            .map(expand_tilde)
    }

    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog
            .path
            .as_deref()
            .filter(|path| !path.trim().is_empty())
            .map(expand_tilde)
    }
}

pub fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}

fn expand_tilde(path: &str) -> PathBuf {
    if !path.starts_with('~') {
        return PathBuf::from(path);
    }

    match home_dir() {
        Some(home) => PathBuf::from(path.replacen('~', &home.to_string_lossy(), 1)),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse() {
        let config = AppConfig::defaults().unwrap();
        assert_eq!(config.install.project_file, "pyproject.toml");
        assert!(config.kits_dir_override().is_none());
        assert!(config.catalog_path().is_none());
        assert_eq!(
            config.project_path(Path::new("repo")),
            Path::new("repo").join("pyproject.toml")
        );
    }

    #[test]
    fn user_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[install]\nproject_file = \"kit.toml\"\nkits_dir = \"/opt/kits\"\n\n[catalog]\npath = \"\"\n",
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.install.project_file, "kit.toml");
        assert_eq!(config.kits_dir_override(), Some(PathBuf::from("/opt/kits")));
        assert!(config.catalog_path().is_none());
    }

    #[test]
    fn missing_install_table_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[catalog]\n").unwrap();
        assert!(AppConfig::from_file(&path).is_err());
    }
}
