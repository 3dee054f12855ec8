use arrayvec::ArrayVec;
use strum::Display;

use crate::command::Command;
use crate::config::GameConfig;
use crate::state::{ItemAction, ItemKind};

use super::Selection;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum MenuKind {
    Main,
    InGame,
    /// Item actions overlaid on an inventory window.
    Context,
}

/// A selectable entry. Controls without a command are inert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Control {
    pub label: String,
    pub command: Option<Command>,
    pub locked: bool,
}

impl Control {
    pub fn new(label: impl Into<String>, command: Command) -> Self {
        Self {
            label: label.into(),
            command: Some(command),
            locked: false,
        }
    }

    pub fn inert(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            command: None,
            locked: false,
        }
    }
}

/// Vertical list of controls navigated with Up/Down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Menu {
    kind: MenuKind,
    controls: ArrayVec<Control, { GameConfig::MAX_MENU_CONTROLS }>,
    selection: Selection,
}

impl Menu {
    /// Builds a menu; controls beyond the capacity are dropped.
    pub fn new(kind: MenuKind, controls: impl IntoIterator<Item = Control>) -> Self {
        let controls: ArrayVec<Control, { GameConfig::MAX_MENU_CONTROLS }> = controls
            .into_iter()
            .take(GameConfig::MAX_MENU_CONTROLS)
            .collect();
        let selection = Selection::new(controls.len());
        Self {
            kind,
            controls,
            selection,
        }
    }

    pub fn main() -> Self {
        Self::new(
            MenuKind::Main,
            [
                Control::new("New Game", Command::NewGame),
                Control::inert("Load"),
                Control::inert("Options"),
                Control::new("Quit", Command::QuitGame),
            ],
        )
    }

    pub fn in_game() -> Self {
        Self::new(
            MenuKind::InGame,
            [
                Control::new("Resume", Command::ResumeGame),
                Control::inert("Load"),
                Control::inert("Options"),
                Control::new("Exit", Command::ExitToMenu),
            ],
        )
    }

    /// Context menu of an inventory item.
    pub fn context(kind: ItemKind) -> Self {
        Self::new(
            MenuKind::Context,
            kind.context_actions().iter().map(|action| {
                let command = match action {
                    ItemAction::Use => Command::UseSelectedItem,
                    ItemAction::Remove => Command::DiscardSelectedItem,
                    ItemAction::Cancel => Command::CancelMenu,
                };
                Control::new(action.to_string(), command)
            }),
        )
    }

    pub fn kind(&self) -> MenuKind {
        self.kind
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn up(&mut self) -> bool {
        self.selection.previous()
    }

    pub fn down(&mut self) -> bool {
        self.selection.next()
    }

    /// Clicks the selected control and returns its bound command.
    pub fn confirm(&mut self) -> Option<Command> {
        let index = self.selection.click()?;
        let control = self.controls.get(index - 1)?;
        if control.locked {
            return None;
        }
        control.command.clone()
    }
}
