//! In-memory SnapshotRepository implementation for tests and headless runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use isle_core::SessionSnapshot;

use super::error::{RepositoryError, Result};
use super::traits::SnapshotRepository;

#[derive(Debug, Default)]
pub struct InMemorySnapshotRepo {
    slots: RwLock<BTreeMap<u32, SessionSnapshot>>,
}

impl InMemorySnapshotRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotRepository for InMemorySnapshotRepo {
    fn save(&self, slot: u32, snapshot: &SessionSnapshot) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.insert(slot, snapshot.clone());
        Ok(())
    }

    fn load(&self, slot: u32) -> Result<Option<SessionSnapshot>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slots.get(&slot).cloned())
    }

    fn exists(&self, slot: u32) -> bool {
        self.slots
            .read()
            .map(|slots| slots.contains_key(&slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: u32) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        slots.remove(&slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<u32>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slots.keys().copied().collect())
    }
}
