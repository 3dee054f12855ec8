//! Interaction modes and their pacing.
//!
//! Exactly one [`Mode`] is active; it carries the interface state it owns.
//! Input routing per mode lives with the session
//! ([`GameSession::handle_input`](crate::session::GameSession::handle_input)).

use std::time::Duration;

use strum::{Display, EnumDiscriminants};

use crate::config::{GameConfig, KeyRepeat};
use crate::interface::{ActionDialog, DialogPanel, InventoryWindow, Menu};

#[derive(Clone, Debug, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(name(ModeKind), derive(Display, Hash))]
pub enum Mode {
    /// Free movement.
    Normal,
    Fighting(ActionDialog),
    Menu(Menu),
    Panel(DialogPanel),
    Window(InventoryWindow),
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        ModeKind::from(self)
    }
}

/// Frame rate and key repeat, switched together at mode transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pacing {
    pub fps: u32,
    /// `None` disables key repeat.
    pub key_repeat: Option<KeyRepeat>,
}

impl Pacing {
    pub fn for_mode(kind: ModeKind, config: &GameConfig) -> Pacing {
        let rates = config.frame_rates;
        match kind {
            ModeKind::Normal => Pacing {
                fps: rates.normal,
                key_repeat: Some(config.key_repeat),
            },
            ModeKind::Fighting => Pacing {
                fps: rates.normal,
                key_repeat: None,
            },
            ModeKind::Menu | ModeKind::Panel | ModeKind::Window => Pacing {
                fps: rates.slow,
                key_repeat: None,
            },
        }
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}
