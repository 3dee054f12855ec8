//! Deterministic game logic for a zoned 2-D action RPG.
//!
//! `isle-core` owns the rules: pixel-mask collision and zone transitions, the
//! multi-tick movement scheduler, turn-based combat, the interaction modes and
//! the command interpreter. Everything runs synchronously inside a
//! [`session::GameSession`]; loaders and the frame loop live in other crates
//! and reach the core through the oracle traits in [`env`].
pub mod combat;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
pub mod geometry;
pub mod input;
pub mod interface;
pub mod map;
pub mod mode;
pub mod movement;
pub mod scheduler;
pub mod session;
pub mod state;

pub use combat::{AttackKind, AttackResult, CombatAction, CombatError, CombatState, Side};
pub use command::{COMMAND_SET_VERSION, Command, CommandError, CommandFailure, CommandQueue};
pub use config::{FrameRates, GameConfig, KeyRepeat, ObstructionOffset};
pub use env::{
    Dice, Env, GameEnv, MapOracle, OracleError, PcgRng, QuestKey, QuestOracle, RngOracle,
    ScriptedRng, UnitOracle, UnitTemplate,
};
pub use error::{ErrorSeverity, GameError};
pub use geometry::{Direction, Edge, Rect};
pub use input::{InputAction, InputEvent};
pub use interface::{ActionDialog, DialogPanel, InventoryWindow, Menu, MenuKind, WindowKind};
pub use map::{Bitmap, InteriorBlueprint, MapBlueprint, MapError, MapView, MaskPalette, Rgb};
pub use mode::{Mode, ModeKind, Pacing};
pub use movement::{Collision, MoveError, WalkOutcome};
pub use scheduler::{MoveScheduler, PendingMove};
pub use session::{
    AudioCue, FrameView, GameSession, SNAPSHOT_VERSION, SessionSnapshot, SnapshotError,
};
pub use state::{
    Attitude, Capabilities, Item, ItemKind, ObjectId, QuestProgress, Roster, Unit, UnitId,
    UnitKind, Weapon, WorldObject,
};
