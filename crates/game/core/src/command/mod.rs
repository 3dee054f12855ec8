//! The closed set of commands that mutate a session.
//!
//! Quest scripts are lists of [`Command`]s; menu controls carry one as their
//! bound action. The session interprets them through a fixed dispatcher.

mod error;
mod queue;

pub use error::{CommandError, CommandFailure};
pub use queue::CommandQueue;

use crate::env::UnitTemplate;
use crate::geometry::Direction;
use crate::state::ItemKind;

/// Version of the command set; scripts declaring another version are rejected.
pub const COMMAND_SET_VERSION: u32 = 1;

/// A state mutation, addressed by unit name or object tag.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    // ===== script-facing =====
    /// Places a unit built from an inline template.
    SpawnUnit {
        template: UnitTemplate,
        x: i32,
        y: i32,
    },
    /// Places a unit built from a template of the unit oracle.
    SpawnTemplate {
        template: String,
        x: i32,
        y: i32,
    },
    RemoveUnit {
        unit: String,
    },
    /// Moves a placed unit into the player slot.
    SetPlayer {
        unit: String,
    },
    SpawnItem {
        kind: ItemKind,
        x: i32,
        y: i32,
        /// Collected tags are never respawned.
        #[cfg_attr(feature = "serde", serde(default))]
        tag: Option<String>,
        #[cfg_attr(feature = "serde", serde(default))]
        fixed: bool,
    },
    RemoveObject {
        tag: String,
    },
    SetMap {
        map: String,
    },
    SetZone {
        zone: u32,
    },
    SetSound {
        name: String,
    },
    SetMusic {
        name: String,
    },
    RegisterDialog {
        id: String,
        line: String,
    },
    /// Runs `command` on the next command-queue pass.
    QueueEvent {
        command: Box<Command>,
    },
    MoveUnit {
        unit: String,
        direction: Direction,
        distance: i32,
    },
    /// Moves `steps` times the unit's speed.
    MoveUnitSteps {
        unit: String,
        direction: Direction,
        steps: u32,
    },
    TurnUnit {
        unit: String,
        direction: Direction,
    },
    StartEncounter {
        opponent: String,
    },

    // ===== control-bound =====
    NewGame,
    ResumeGame,
    ExitToMenu,
    QuitGame,
    CancelMenu,
    MeleeAttack,
    RangedAttack,
    OpenFightInventory,
    Flee,
    UseSelectedItem,
    DiscardSelectedItem,
}

impl Command {
    /// Variant name, for logs and failure reports.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn queue_event(command: Command) -> Self {
        Command::QueueEvent {
            command: Box::new(command),
        }
    }
}
