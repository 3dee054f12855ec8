//! File-based SnapshotRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use isle_core::SessionSnapshot;

use super::error::{RepositoryError, Result};
use super::traits::SnapshotRepository;

/// On-disk encoding of a save file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// Compact binary, `save_{slot}.bin`.
    #[default]
    Bincode,
    /// Human-readable export, `save_{slot}.json`.
    Json,
}

impl SnapshotFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            SnapshotFormat::Bincode => "bin",
            SnapshotFormat::Json => "json",
        }
    }

    fn encode(self, snapshot: &SessionSnapshot) -> Result<Vec<u8>> {
        match self {
            SnapshotFormat::Bincode => bincode::serialize(snapshot)
                .map_err(|e| RepositoryError::Serialization(e.to_string())),
            SnapshotFormat::Json => serde_json::to_vec_pretty(snapshot)
                .map_err(|e| RepositoryError::Json(e.to_string())),
        }
    }

    fn decode(self, bytes: &[u8]) -> Result<SessionSnapshot> {
        match self {
            SnapshotFormat::Bincode => bincode::deserialize(bytes)
                .map_err(|e| RepositoryError::Serialization(e.to_string())),
            SnapshotFormat::Json => {
                serde_json::from_slice(bytes).map_err(|e| RepositoryError::Json(e.to_string()))
            }
        }
    }
}

/// Stores each slot as its own file under `base_dir`.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-save never leaves a truncated save behind.
pub struct FileSnapshotRepository {
    base_dir: PathBuf,
    format: SnapshotFormat,
}

impl FileSnapshotRepository {
    /// Create a bincode repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self {
            base_dir,
            format: SnapshotFormat::default(),
        })
    }

    pub fn with_format(mut self, format: SnapshotFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format(&self) -> SnapshotFormat {
        self.format
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn slot_path(&self, slot: u32) -> PathBuf {
        self.base_dir
            .join(format!("save_{}.{}", slot, self.format.extension()))
    }

    /// Write `snapshot` as pretty JSON to an arbitrary path, whatever the
    /// repository's own format.
    pub fn export_json(snapshot: &SessionSnapshot, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = SnapshotFormat::Json.encode(snapshot)?;
        write_atomic(path, &bytes)?;
        tracing::info!("Exported snapshot to {}", path.display());
        Ok(())
    }

    fn parse_slot(&self, filename: &str) -> Option<u32> {
        filename
            .strip_prefix("save_")?
            .strip_suffix(self.format.extension())?
            .strip_suffix('.')?
            .parse()
            .ok()
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
    if let Err(e) = fs::rename(&temp_path, path) {
        if let Err(cleanup) = fs::remove_file(&temp_path) {
            tracing::warn!("Failed to remove {}: {}", temp_path.display(), cleanup);
        }
        return Err(RepositoryError::Io(e));
    }
    Ok(())
}

impl SnapshotRepository for FileSnapshotRepository {
    fn save(&self, slot: u32, snapshot: &SessionSnapshot) -> Result<()> {
        let path = self.slot_path(slot);
        let bytes = self.format.encode(snapshot)?;
        write_atomic(&path, &bytes)?;

        tracing::debug!("Saved slot[{}] to {}", slot, path.display());

        Ok(())
    }

    fn load(&self, slot: u32) -> Result<Option<SessionSnapshot>> {
        let path = self.slot_path(slot);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let snapshot = self.format.decode(&bytes)?;

        tracing::debug!("Loaded slot[{}] from {}", slot, path.display());

        Ok(Some(snapshot))
    }

    fn exists(&self, slot: u32) -> bool {
        self.slot_path(slot).exists()
    }

    fn delete(&self, slot: u32) -> Result<()> {
        let path = self.slot_path(slot);

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted slot[{}]", slot);
        }

        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<u32>> {
        let mut slots = Vec::new();

        for entry in fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)? {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();
            if let Some(slot) = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| self.parse_slot(name))
            {
                slots.push(slot);
            }
        }

        slots.sort_unstable();
        Ok(slots)
    }
}
