//! The fixed interpreter of [`Command`]s.
//!
//! Quest scripts and menu controls reach session state only through
//! [`GameSession::execute`]. A rejected command leaves the state as it was.

use tracing::{debug, info};

use crate::combat::AttackKind;
use crate::command::{Command, CommandError};
use crate::env::{OracleError, UnitTemplate};
use crate::geometry::{Direction, Rect};
use crate::map::MapView;
use crate::mode::{Mode, ModeKind};
use crate::movement::MoveError;
use crate::state::{Item, ItemKind, Unit, UnitId};

use super::GameSession;

impl GameSession<'_> {
    /// Applies one command.
    pub fn execute(&mut self, command: Command) -> Result<(), CommandError> {
        match command {
            Command::SpawnUnit { template, x, y } => self.spawn_unit(&template, x, y),
            Command::SpawnTemplate { template, x, y } => {
                let template = self
                    .env
                    .units()?
                    .template(&template)
                    .ok_or(OracleError::UnitTemplateNotFound(template))?;
                self.spawn_unit(&template, x, y)
            }
            Command::RemoveUnit { unit } => {
                let id = self.npc_id(&unit)?;
                self.scheduler.cancel(id);
                self.roster.remove_unit(id)?;
                debug!(unit, "unit removed");
                Ok(())
            }
            Command::SetPlayer { unit } => {
                let id = self.npc_id(&unit)?;
                self.scheduler.cancel(id);
                self.roster.promote_to_player(id)?;
                debug!(unit, "player unit set");
                Ok(())
            }
            Command::SpawnItem {
                kind,
                x,
                y,
                tag,
                fixed,
            } => self.spawn_item(kind, x, y, tag, fixed),
            Command::RemoveObject { tag } => {
                let id = self
                    .roster
                    .find_object_by_tag(&tag)
                    .map(|object| object.id)
                    .ok_or(CommandError::ObjectNotFound(tag))?;
                self.roster.remove_object(id)?;
                Ok(())
            }
            Command::SetMap { map } => {
                let blueprint = self.env.maps()?.blueprint(&map)?;
                let view = MapView::new(blueprint, &self.config)?;
                info!(map, zones = view.zones(), zone = view.zone(), "map loaded");
                self.map = Some(view);
                Ok(())
            }
            Command::SetZone { zone } => {
                let map = self.map.as_mut().ok_or(CommandError::NoMap)?;
                map.set_zone(zone)?;
                self.reload_pending = true;
                Ok(())
            }
            Command::SetSound { name } => {
                self.sound.set(&name);
                Ok(())
            }
            Command::SetMusic { name } => {
                self.music.set(&name);
                Ok(())
            }
            Command::RegisterDialog { id, line } => {
                self.dialogs.insert(id, line);
                Ok(())
            }
            Command::QueueEvent { command } => {
                self.commands.push(*command);
                Ok(())
            }
            Command::MoveUnit {
                unit,
                direction,
                distance,
            } => {
                let id = self.unit_id(&unit)?;
                self.schedule_move(id, direction, distance)
            }
            Command::MoveUnitSteps {
                unit,
                direction,
                steps,
            } => {
                if steps == 0 {
                    return Err(CommandError::ZeroSteps);
                }
                let id = self.unit_id(&unit)?;
                let stride = self.roster.unit(id).map_or(0, |unit| unit.stride());
                let distance = i32::try_from(steps)
                    .unwrap_or(i32::MAX)
                    .saturating_mul(stride);
                self.schedule_move(id, direction, distance)
            }
            Command::TurnUnit { unit, direction } => {
                if !direction.is_cardinal() {
                    return Err(MoveError::InvalidDirection(direction).into());
                }
                let id = self.unit_id(&unit)?;
                if let Some(unit) = self.roster.unit_mut(id) {
                    unit.turn(direction);
                }
                Ok(())
            }
            Command::StartEncounter { opponent } => self.start_encounter(&opponent),

            Command::NewGame => self.new_game(),
            Command::ResumeGame => {
                if self.map.is_none() {
                    return Err(CommandError::NoMap);
                }
                self.set_mode(Mode::Normal);
                Ok(())
            }
            Command::ExitToMenu => {
                self.exit_to_menu();
                Ok(())
            }
            Command::QuitGame => {
                info!("quit requested");
                self.quit_requested = true;
                Ok(())
            }
            Command::CancelMenu => match &mut self.mode {
                Mode::Window(window) if window.context().is_some() => {
                    window.close_context();
                    Ok(())
                }
                mode => Err(CommandError::WrongMode {
                    command: "CancelMenu",
                    mode: mode.kind(),
                }),
            },
            Command::MeleeAttack => self.player_attack(AttackKind::Melee),
            Command::RangedAttack => self.player_attack(AttackKind::Ranged),
            Command::OpenFightInventory => self.open_fight_inventory(),
            Command::Flee => self.player_flee(),
            Command::UseSelectedItem => self.use_selected_item(),
            Command::DiscardSelectedItem => self.discard_selected_item(),
        }
    }

    fn spawn_unit(&mut self, template: &UnitTemplate, x: i32, y: i32) -> Result<(), CommandError> {
        if !Unit::is_valid_name(&template.name) {
            return Err(CommandError::InvalidName(template.name.clone()));
        }
        let (width, height) = template.size;
        self.check_placement(x, y, width, height)?;
        let id = self.roster.allocate_unit_id()?;
        self.roster.insert_unit(template.to_unit(id, x, y))?;
        debug!(unit = %template.name, %id, x, y, "unit placed");
        Ok(())
    }

    fn spawn_item(
        &mut self,
        kind: ItemKind,
        x: i32,
        y: i32,
        tag: Option<String>,
        fixed: bool,
    ) -> Result<(), CommandError> {
        if tag.as_deref().is_some_and(|tag| self.quest.is_collected(tag)) {
            debug!(?tag, "collected item not respawned");
            return Ok(());
        }
        let (width, height) = kind.footprint();
        self.check_placement(x, y, width, height)?;
        let item = Item { kind, tag };
        self.roster
            .insert_object(Rect::new(x, y, width, height), item, fixed)?;
        Ok(())
    }

    /// The footprint must lie entirely inside the viewport.
    fn check_placement(&self, x: i32, y: i32, width: u32, height: u32) -> Result<(), CommandError> {
        let max_x = self.config.viewport_width as i64 - width as i64;
        let max_y = self.config.viewport_height as i64 - height as i64;
        if x < 0 || y < 0 || x as i64 > max_x || y as i64 > max_y {
            return Err(CommandError::OutOfBounds {
                x,
                y,
                width,
                height,
            });
        }
        Ok(())
    }

    fn schedule_move(
        &mut self,
        id: UnitId,
        direction: Direction,
        distance: i32,
    ) -> Result<(), CommandError> {
        let map = self.map.as_ref().ok_or(CommandError::NoMap)?;
        let pending = self
            .scheduler
            .schedule(map, &self.roster, &self.config, id, direction, distance)?;
        debug!(unit = %id, %direction, distance, target = pending.target, "move scheduled");
        Ok(())
    }

    /// Any unit on the map, the player included.
    fn unit_id(&self, name: &str) -> Result<UnitId, CommandError> {
        self.roster
            .find_by_name(name)
            .map(|unit| unit.id)
            .ok_or_else(|| CommandError::UnitNotFound(name.to_owned()))
    }

    /// A unit on the map other than the player.
    fn npc_id(&self, name: &str) -> Result<UnitId, CommandError> {
        self.roster
            .npcs()
            .iter()
            .find(|unit| unit.name == name)
            .map(|unit| unit.id)
            .ok_or_else(|| CommandError::UnitNotFound(name.to_owned()))
    }

    pub(super) fn require_mode(
        &self,
        command: &'static str,
        kind: ModeKind,
    ) -> Result<(), CommandError> {
        let mode = self.mode.kind();
        if mode != kind {
            return Err(CommandError::WrongMode { command, mode });
        }
        Ok(())
    }
}
