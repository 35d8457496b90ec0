use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{KitError, KitResult};

/// A kit published in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KitEntry {
    pub name: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
    pub version: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub help: Option<String>,
    #[serde(default = "default_installable")]
    pub installable: bool,
}

fn default_installable() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KitCatalog {
    #[serde(default, rename = "kit")]
    kits: Vec<KitEntry>,
}

impl KitCatalog {
    pub fn load(path: &Path) -> KitResult<Self> {
        let raw = fs::read_to_string(path).map_err(|err| KitError::Catalog {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        let catalog: KitCatalog = toml::from_str(&raw).map_err(|err| KitError::Catalog {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        tracing::info!("loaded {} kits from {}", catalog.kits().len(), path.display());
        Ok(catalog)
    }

    pub fn kits(&self) -> &[KitEntry] {
        &self.kits
    }

    /// Kits whose name, author or description contains `text`, ignoring case.
    /// Blank text matches every kit.
    pub fn search(&self, text: &str) -> Vec<&KitEntry> {
        let needle = text.trim().to_lowercase();
        self.kits
            .iter()
            .filter(|kit| {
                needle.is_empty()
                    || [&kit.name, &kit.author, &kit.description]
                        .iter()
                        .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn by_author(&self, author: &str) -> Vec<&KitEntry> {
        self.kits
            .iter()
            .filter(|kit| kit.author.eq_ignore_ascii_case(author))
            .collect()
    }
}
