//! Unit template loader.

use std::path::Path;

use isle_core::{Unit, UnitTemplate};
use serde::{Deserialize, Serialize};

use crate::catalog::UnitCatalog;
use crate::loaders::{LoadResult, read_file};

/// Unit file structure for RON files: `(units: [("id", (template)), ...])`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UnitFileRon {
    units: Vec<(String, UnitTemplate)>,
}

/// Loader for unit templates from RON files.
pub struct UnitLoader;

impl UnitLoader {
    pub fn load(path: &Path) -> LoadResult<UnitCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse `(id, template)` pairs. Ids must be unique and names valid.
    pub fn parse(content: &str) -> LoadResult<UnitCatalog> {
        let data: UnitFileRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse unit RON: {}", e))?;

        let mut catalog = UnitCatalog::new();
        for (id, template) in data.units {
            if !Unit::is_valid_name(&template.name) {
                anyhow::bail!("Unit '{}' has invalid name {:?}", id, template.name);
            }
            if template.size.0 == 0 || template.size.1 == 0 {
                anyhow::bail!("Unit '{}' has an empty size {:?}", id, template.size);
            }
            if catalog.insert(id.clone(), template).is_some() {
                anyhow::bail!("Unit id '{}' is defined twice", id);
            }
        }
        Ok(catalog)
    }
}
