//! Repository contract for saving and loading session snapshots.

use isle_core::SessionSnapshot;

use super::error::Result;

/// Persistence for [`SessionSnapshot`]s, one per numbered save slot.
///
/// Static content (maps, quests, unit templates) never goes through a
/// repository; it is reloaded from the content directory and reached through
/// the oracles.
pub trait SnapshotRepository: Send + Sync {
    /// Save a snapshot into `slot`, replacing what was there.
    fn save(&self, slot: u32, snapshot: &SessionSnapshot) -> Result<()>;

    /// Load the snapshot in `slot`, or `None` when the slot is empty.
    fn load(&self, slot: u32) -> Result<Option<SessionSnapshot>>;

    fn exists(&self, slot: u32) -> bool;

    /// Empty a slot. Deleting an empty slot is not an error.
    fn delete(&self, slot: u32) -> Result<()>;

    /// Occupied slots in ascending order.
    fn list_slots(&self) -> Result<Vec<u32>> {
        Ok(vec![])
    }
}
