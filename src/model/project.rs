use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{KitError, KitResult};

/// The `[project]` table of a project-description file.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectFile {
    pub project: ProjectTable,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectTable {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl ProjectFile {
    pub fn load(path: &Path) -> KitResult<Self> {
        let raw = fs::read_to_string(path).map_err(|err| KitError::Project {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        Self::parse(&raw).map_err(|reason| KitError::Project {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn parse(raw: &str) -> Result<Self, String> {
        let file: ProjectFile = toml::from_str(raw).map_err(|err| err.to_string())?;
        if file.project.name.trim().is_empty() {
            return Err("`project.name` is empty".to_string());
        }
        Ok(file)
    }

    pub fn kit_name(&self) -> &str {
        self.project.name.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_project_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pyproject.toml");
        fs::write(
            &path,
            "[project]\nname = \"modo_kit_central\"\nversion = \"2.0\"\n\n[tool.poetry]\nfoo = 1\n",
        )
        .unwrap();

        let project = ProjectFile::load(&path).unwrap();
        assert_eq!(project.kit_name(), "modo_kit_central");
        assert_eq!(project.project.version.as_deref(), Some("2.0"));
    }

    #[test]
    fn missing_name_is_an_error() {
        assert!(ProjectFile::parse("[project]\nversion = \"1\"\n").is_err());
        assert!(ProjectFile::parse("[project]\nname = \"  \"\n").is_err());
        assert!(ProjectFile::parse("[tool]\nname = \"x\"\n").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProjectFile::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, KitError::Project { .. }));
        assert!(err.to_string().contains("nope.toml"));
    }
}
