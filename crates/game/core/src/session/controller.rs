//! Input routing: every event goes to the handler of the active mode.

use tracing::{debug, error, warn};

use crate::command::Command;
use crate::error::{ErrorSeverity, GameError};
use crate::geometry::Direction;
use crate::input::{InputAction, InputEvent};
use crate::interface::{DialogPanel, InventoryWindow, Menu, MenuKind, WindowKind};
use crate::movement::walk_player;
use crate::mode::{Mode, ModeKind};
use crate::state::{Capabilities, ObjectId};

use super::GameSession;

/// What the player reaches with Interact.
enum Reach {
    Object(ObjectId),
    Blocked,
    Speaker(DialogPanel),
    Nothing,
}

impl GameSession<'_> {
    /// Routes one input event to the active mode.
    ///
    /// A confirmed control runs its bound command before this returns.
    pub fn handle_input(&mut self, event: InputEvent) {
        let command = match event {
            InputEvent::KeyDown(action) => match self.mode.kind() {
                ModeKind::Normal => {
                    self.normal_key(action);
                    None
                }
                ModeKind::Fighting => self.fighting_key(action),
                ModeKind::Menu => self.menu_key(action),
                ModeKind::Panel => {
                    if action == InputAction::Confirm {
                        self.set_mode(Mode::Normal);
                    }
                    None
                }
                ModeKind::Window => self.window_key(action),
            },
            InputEvent::KeyUp(action) => {
                if self.mode.kind() == ModeKind::Normal && action.direction().is_some() {
                    if let Some(player) = self.roster.player_mut() {
                        player.stop();
                    }
                }
                None
            }
        };
        if let Some(command) = command {
            debug!(command = command.name(), "control confirmed");
            self.run_command(command);
        }
    }

    fn normal_key(&mut self, action: InputAction) {
        if let Some(direction) = action.direction() {
            self.walk(direction);
            return;
        }
        match action {
            InputAction::Cancel => self.set_mode(Mode::Menu(Menu::in_game())),
            InputAction::OpenInventory => {
                let items = self.roster.player().map_or(0, |player| player.inventory.len());
                self.set_mode(Mode::Window(InventoryWindow::new(WindowKind::Inventory, items)));
            }
            InputAction::Interact => self.interact(),
            _ => {}
        }
    }

    fn walk(&mut self, direction: Direction) {
        let Some(map) = self.map.as_mut() else {
            return;
        };
        match walk_player(map, &mut self.roster, &self.config, direction) {
            Ok(outcome) if outcome.changes_location() => {
                debug!(?outcome, "location changed");
                self.sound.name.clear();
                self.sound.request_refresh();
                self.reload_location();
            }
            Ok(_) => {}
            Err(err) if err.severity() == ErrorSeverity::Fatal => {
                error!(code = err.error_code(), %err, "location switch failed");
            }
            Err(err) => warn!(code = err.error_code(), %err, "walk rejected"),
        }
    }

    /// Picks up the object ahead, or talks to the unit ahead.
    fn interact(&mut self) {
        match self.reach() {
            Reach::Object(id) => self.pick_up(id),
            Reach::Speaker(panel) => self.set_mode(Mode::Panel(panel)),
            Reach::Blocked | Reach::Nothing => {}
        }
    }

    fn reach(&self) -> Reach {
        let Some(player) = self.roster.player() else {
            return Reach::Nothing;
        };
        let reach = player.rect.translated(player.facing, self.config.pickup_reach);

        if let Some(object) = self
            .roster
            .objects()
            .iter()
            .find(|object| object.rect.intersects(&reach))
        {
            return if object.is_pickable() && player.can(Capabilities::CARRIER) {
                Reach::Object(object.id)
            } else {
                Reach::Blocked
            };
        }

        self.roster
            .npcs()
            .iter()
            .filter(|unit| unit.rect.intersects(&reach))
            .find_map(|unit| {
                let line = self.dialogs.get(unit.first_dialog()?)?;
                Some(Reach::Speaker(DialogPanel::new(unit.name.clone(), line)))
            })
            .unwrap_or(Reach::Nothing)
    }

    fn pick_up(&mut self, id: ObjectId) {
        let object = match self.roster.remove_object(id) {
            Ok(object) => object,
            Err(err) => {
                warn!(%err, "pickup failed");
                return;
            }
        };
        if let Some(tag) = &object.item.tag {
            self.quest.mark_collected(tag.clone());
        }
        debug!(item = %object.item.kind, "item picked up");
        if let Some(player) = self.roster.player_mut() {
            player.inventory.push(object.item);
        }
    }

    fn fighting_key(&mut self, action: InputAction) -> Option<Command> {
        let Mode::Fighting(dialog) = &mut self.mode else {
            return None;
        };
        match action {
            InputAction::MoveUp => {
                dialog.up();
            }
            InputAction::MoveDown => {
                dialog.down();
            }
            InputAction::MoveLeft => {
                dialog.left();
            }
            InputAction::MoveRight => {
                dialog.right();
            }
            InputAction::Confirm => return dialog.confirm(),
            InputAction::Cancel => return Some(Command::ResumeGame),
            InputAction::OpenInventory | InputAction::Interact => {}
        }
        None
    }

    fn menu_key(&mut self, action: InputAction) -> Option<Command> {
        let Mode::Menu(menu) = &mut self.mode else {
            return None;
        };
        match action {
            InputAction::MoveUp => {
                menu.up();
            }
            InputAction::MoveDown => {
                menu.down();
            }
            InputAction::Confirm => return menu.confirm(),
            InputAction::Cancel if menu.kind() == MenuKind::InGame => {
                return Some(Command::ResumeGame);
            }
            _ => {}
        }
        None
    }

    fn window_key(&mut self, action: InputAction) -> Option<Command> {
        let Mode::Window(window) = &mut self.mode else {
            return None;
        };

        if let Some(menu) = window.context_mut() {
            match action {
                InputAction::MoveUp => {
                    menu.up();
                }
                InputAction::MoveDown => {
                    menu.down();
                }
                InputAction::Confirm => return menu.confirm(),
                _ => {}
            }
            return None;
        }

        match action {
            InputAction::MoveLeft => {
                window.left();
            }
            InputAction::MoveRight => {
                window.right();
            }
            InputAction::Confirm => {
                let item = window.selected_item().and_then(|index| {
                    self.roster
                        .player()
                        .and_then(|player| player.inventory.get(index))
                        .map(|item| item.kind)
                });
                if let Some(kind) = item {
                    window.open_context(kind);
                }
            }
            InputAction::OpenInventory if window.kind() == WindowKind::Inventory => {
                self.set_mode(Mode::Normal);
            }
            InputAction::Cancel if window.kind() == WindowKind::FightInventory => {
                self.set_mode(self.restore_action_dialog());
            }
            _ => {}
        }
        None
    }
}
