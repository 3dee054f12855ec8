//! Serializable session snapshots.
//!
//! A snapshot records what a reload cannot rebuild: the roster, the map
//! location, quest progress, registered dialog lines, the audio cues and the
//! random-draw position. Map images are not stored; restoring looks the map
//! up again through the map oracle.

use std::collections::{BTreeMap, BTreeSet};

use tracing::info;

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::map::{MapError, MapView};
use crate::mode::Mode;
use crate::state::{ObjectId, QuestProgress, Roster, Unit, UnitId, WorldObject};

use super::{AudioCue, GameSession};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSnapshot {
    pub version: u32,
    pub map: String,
    pub zone: u32,
    pub interior: u8,
    /// The player unit, inventory included.
    pub player: Option<Unit>,
    pub units: Vec<Unit>,
    pub objects: Vec<WorldObject>,
    pub quest: QuestProgress,
    pub sound: String,
    pub music: String,
    pub dialogs: BTreeMap<String, String>,
    pub game_seed: u64,
    pub nonce: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("no game is in progress")]
    NoGame,

    #[error("unit name {0:?} appears more than once")]
    DuplicateUnit(String),

    #[error("unit id {0} appears more than once")]
    DuplicateId(UnitId),

    #[error("object id {0} appears more than once")]
    DuplicateObject(ObjectId),

    #[error("{0} lies outside the viewport")]
    OffScreen(String),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SnapshotError::UnsupportedVersion { .. }
            | SnapshotError::NoGame
            | SnapshotError::DuplicateUnit(_)
            | SnapshotError::DuplicateId(_)
            | SnapshotError::DuplicateObject(_)
            | SnapshotError::OffScreen(_) => ErrorSeverity::Validation,
            SnapshotError::Map(error) => error.severity(),
            SnapshotError::Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SnapshotError::UnsupportedVersion { .. } => "SNAPSHOT_UNSUPPORTED_VERSION",
            SnapshotError::NoGame => "SNAPSHOT_NO_GAME",
            SnapshotError::DuplicateUnit(_) => "SNAPSHOT_DUPLICATE_UNIT",
            SnapshotError::DuplicateId(_) => "SNAPSHOT_DUPLICATE_ID",
            SnapshotError::DuplicateObject(_) => "SNAPSHOT_DUPLICATE_OBJECT",
            SnapshotError::OffScreen(_) => "SNAPSHOT_OFF_SCREEN",
            SnapshotError::Map(error) => error.error_code(),
            SnapshotError::Oracle(error) => error.error_code(),
        }
    }
}

impl GameSession<'_> {
    /// Captures the running game. Pending moves and queued commands are not kept.
    pub fn snapshot(&self) -> Result<SessionSnapshot, SnapshotError> {
        let map = self.map.as_ref().ok_or(SnapshotError::NoGame)?;
        Ok(SessionSnapshot {
            version: SNAPSHOT_VERSION,
            map: map.name().to_owned(),
            zone: map.zone(),
            interior: map.interior(),
            player: self.roster.player().cloned(),
            units: self.roster.npcs().to_vec(),
            objects: self.roster.objects().to_vec(),
            quest: self.quest.clone(),
            sound: self.sound.name.clone(),
            music: self.music.name.clone(),
            dialogs: self.dialogs.clone(),
            game_seed: self.game_seed,
            nonce: self.nonce,
        })
    }

    /// Unit names and ids are unique, object ids are unique, and everything
    /// lies inside the viewport.
    fn check_roster(&self, snapshot: &SessionSnapshot) -> Result<(), SnapshotError> {
        let (width, height) = (self.config.viewport_width, self.config.viewport_height);
        let mut names = BTreeSet::new();
        let mut ids = BTreeSet::new();
        for unit in snapshot.player.iter().chain(&snapshot.units) {
            if !names.insert(unit.name.as_str()) {
                return Err(SnapshotError::DuplicateUnit(unit.name.clone()));
            }
            if !ids.insert(unit.id) {
                return Err(SnapshotError::DuplicateId(unit.id));
            }
            if !unit.rect.fits_within(width, height) {
                return Err(SnapshotError::OffScreen(unit.name.clone()));
            }
        }

        let mut objects = BTreeSet::new();
        for object in &snapshot.objects {
            if !objects.insert(object.id) {
                return Err(SnapshotError::DuplicateObject(object.id));
            }
            if !object.rect.fits_within(width, height) {
                return Err(SnapshotError::OffScreen(format!("object {}", object.id)));
            }
        }
        Ok(())
    }

    /// Replaces the session with `snapshot` and resumes free movement.
    ///
    /// The map view is rebuilt and validated before anything is touched, so a
    /// failed restore leaves the session as it was.
    pub fn restore(&mut self, snapshot: SessionSnapshot) -> Result<(), SnapshotError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        self.check_roster(&snapshot)?;

        let blueprint = self.env.maps()?.blueprint(&snapshot.map)?;
        let mut view = MapView::new(blueprint, &self.config)?;
        view.set_zone(snapshot.zone)?;
        if snapshot.interior != 0 {
            view.set_interior(snapshot.interior)?;
        }

        self.clear();
        self.map = Some(view);
        self.roster = Roster::from_parts(snapshot.player, snapshot.units, snapshot.objects);
        self.quest = snapshot.quest;
        self.dialogs = snapshot.dialogs;
        self.sound = AudioCue::named(snapshot.sound);
        self.music = AudioCue::named(snapshot.music);
        self.game_seed = snapshot.game_seed;
        self.nonce = snapshot.nonce;
        self.set_mode(Mode::Normal);
        info!(
            map = %snapshot.map,
            zone = snapshot.zone,
            interior = snapshot.interior,
            "session restored"
        );
        Ok(())
    }
}
