use std::collections::BTreeMap;

use isle_core::{UnitOracle, UnitTemplate};

/// Unit templates keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnitCatalog {
    templates: BTreeMap<String, UnitTemplate>,
}

impl UnitCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `template` under `id`; returns the template it replaced.
    pub fn insert(&mut self, id: impl Into<String>, template: UnitTemplate) -> Option<UnitTemplate> {
        self.templates.insert(id.into(), template)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl FromIterator<UnitTemplate> for UnitCatalog {
    /// Keys every template by its unit name.
    fn from_iter<I: IntoIterator<Item = UnitTemplate>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for template in iter {
            catalog.insert(template.name.clone(), template);
        }
        catalog
    }
}

impl UnitOracle for UnitCatalog {
    fn template(&self, id: &str) -> Option<UnitTemplate> {
        self.templates.get(id).cloned()
    }
}
