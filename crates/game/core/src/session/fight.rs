//! Fight flow around the stateless combat resolver, plus inventory item actions.

use tracing::{debug, info, warn};

use crate::combat::{
    AttackKind, CombatAction, CombatError, CombatState, Side, flee, melee_attack,
    opponent_action, ranged_attack, use_item,
};
use crate::command::CommandError;
use crate::env::Dice;
use crate::interface::{ActionDialog, InventoryWindow, WindowKind};
use crate::mode::{Mode, ModeKind};
use crate::state::{Capabilities, ItemEffect, UnitId};

use super::GameSession;

/// How a fight ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FightEnd {
    Victory,
    Defeat,
}

impl GameSession<'_> {
    /// Starts a fight against the unit named `name`.
    ///
    /// The opponent is healed to full, its pending move dropped, and a fresh
    /// combat state hands the first turn to the player.
    pub(super) fn start_encounter(&mut self, name: &str) -> Result<(), CommandError> {
        let player = self.roster.player().ok_or(CommandError::NoPlayer)?;
        let armed = player.has_weapon();
        let opponent = self
            .roster
            .npcs()
            .iter()
            .find(|unit| unit.name == name)
            .ok_or_else(|| CommandError::UnitNotFound(name.to_owned()))?;
        if !opponent.can(Capabilities::COMBATANT) {
            return Err(CommandError::NotCombatant(name.to_owned()));
        }

        let id = opponent.id;
        self.scheduler.cancel(id);
        if let Some(opponent) = self.roster.unit_mut(id) {
            opponent.restore_health();
            opponent.stop();
        }
        if let Some(player) = self.roster.player_mut() {
            player.stop();
        }
        self.combat = Some(CombatState::new(id));
        self.set_mode(Mode::Fighting(ActionDialog::new(CombatAction::Melee, armed)));
        info!(opponent = name, "encounter started");
        Ok(())
    }

    /// Opponent id of a fight in which the player may act now.
    fn players_turn(&self, command: &'static str) -> Result<UnitId, CommandError> {
        self.require_mode(command, ModeKind::Fighting)?;
        let combat = self.combat.as_ref().ok_or(CombatError::NotFighting)?;
        if !combat.is_players_turn() {
            return Err(CombatError::OutOfTurn(combat.turn).into());
        }
        Ok(combat.opponent)
    }

    pub(super) fn player_attack(&mut self, kind: AttackKind) -> Result<(), CommandError> {
        let command = match kind {
            AttackKind::Melee => "MeleeAttack",
            AttackKind::Ranged => "RangedAttack",
        };
        let opponent = self.players_turn(command)?;
        let attacker = self.roster.player().cloned().ok_or(CommandError::NoPlayer)?;
        let rng = self.env.rng()?;
        let defender = self
            .roster
            .unit_mut(opponent)
            .ok_or(CombatError::UnitNotFound(opponent))?;

        let mut dice = Dice::new(rng, self.game_seed, &mut self.nonce);
        let (action, result) = match kind {
            AttackKind::Melee => (
                CombatAction::Melee,
                Some(melee_attack(&mut dice, &attacker, defender)),
            ),
            AttackKind::Ranged => (
                CombatAction::Ranged,
                ranged_attack(&mut dice, &attacker, defender),
            ),
        };

        let combat = self.combat.as_mut().ok_or(CombatError::NotFighting)?;
        combat.record(action);
        if let Some(result) = &result {
            combat.record_attack(result);
        }
        self.finish_player_action();
        Ok(())
    }

    pub(super) fn player_flee(&mut self) -> Result<(), CommandError> {
        self.players_turn("Flee")?;
        let rng = self.env.rng()?;
        let escaped = flee(&mut Dice::new(rng, self.game_seed, &mut self.nonce));

        let combat = self.combat.as_mut().ok_or(CombatError::NotFighting)?;
        combat.record(CombatAction::Flee);
        if escaped {
            combat.fled = true;
            info!("fled from fight");
            self.set_mode(Mode::Normal);
        } else {
            combat.push_message("Flee Attempt Failed!".to_owned());
            self.finish_player_action();
        }
        Ok(())
    }

    pub(super) fn open_fight_inventory(&mut self) -> Result<(), CommandError> {
        self.players_turn("OpenFightInventory")?;
        let items = self.roster.player().map_or(0, |player| player.inventory.len());
        if let Some(combat) = self.combat.as_mut() {
            combat.record(CombatAction::UseItem);
        }
        self.set_mode(Mode::Window(InventoryWindow::new(
            WindowKind::FightInventory,
            items,
        )));
        Ok(())
    }

    /// Action dialog showing the player's previous choice.
    pub(crate) fn restore_action_dialog(&self) -> Mode {
        let armed = self.roster.player().is_some_and(|player| player.has_weapon());
        let previous = self
            .combat
            .as_ref()
            .map(|combat| combat.previous_player_action)
            .unwrap_or_default();
        Mode::Fighting(ActionDialog::new(previous, armed))
    }

    pub(super) fn use_selected_item(&mut self) -> Result<(), CommandError> {
        self.require_mode("UseSelectedItem", ModeKind::Window)?;
        let Mode::Window(window) = &self.mode else {
            return Err(CommandError::NoItemSelected);
        };
        let kind = window.kind();
        let index = window.selected_item().ok_or(CommandError::NoItemSelected)?;
        if kind == WindowKind::FightInventory {
            self.players_turn_in_window()?;
        }

        let player = self.roster.player_mut().ok_or(CommandError::NoPlayer)?;
        let effect = use_item(player, index)?;
        let remaining = player.inventory.len();
        debug!(?effect, "item used");

        match kind {
            WindowKind::Inventory => self.close_item_context(remaining),
            WindowKind::FightInventory => {
                if let (Some(combat), ItemEffect::Healed { health }) = (self.combat.as_mut(), effect) {
                    combat.push_message(format!("Healed to {health} Health!"));
                }
                self.set_mode(self.restore_action_dialog());
                self.finish_player_action();
            }
        }
        Ok(())
    }

    pub(super) fn discard_selected_item(&mut self) -> Result<(), CommandError> {
        self.require_mode("DiscardSelectedItem", ModeKind::Window)?;
        let Mode::Window(window) = &self.mode else {
            return Err(CommandError::NoItemSelected);
        };
        let index = window.selected_item().ok_or(CommandError::NoItemSelected)?;
        let player = self.roster.player_mut().ok_or(CommandError::NoPlayer)?;
        if index >= player.inventory.len() {
            return Err(CombatError::ItemMissing(index).into());
        }
        let item = player.inventory.remove(index);
        let remaining = player.inventory.len();
        debug!(item = %item.kind, "item discarded");
        self.close_item_context(remaining);
        Ok(())
    }

    fn players_turn_in_window(&self) -> Result<(), CommandError> {
        let combat = self.combat.as_ref().ok_or(CombatError::NotFighting)?;
        if !combat.is_players_turn() {
            return Err(CombatError::OutOfTurn(combat.turn).into());
        }
        Ok(())
    }

    fn close_item_context(&mut self, items: usize) {
        if let Mode::Window(window) = &mut self.mode {
            window.close_context();
            window.sync(items);
        }
    }

    /// Hands the turn to the opponent unless the fight is already decided.
    fn finish_player_action(&mut self) {
        if let Some(end) = self.fight_end() {
            self.conclude_fight(end);
            return;
        }
        let delay = self.config.opponent_delay_frames;
        if let Some(combat) = self.combat.as_mut() {
            combat.end_turn(delay);
        }
        if let Mode::Fighting(dialog) = &mut self.mode {
            dialog.set_locked(true);
        }
    }

    /// Counts down the opponent's reaction and lets it act once the delay elapsed.
    pub(super) fn tick_fight(&mut self) {
        let Some(combat) = self.combat.as_mut() else {
            return;
        };
        if combat.turn != Side::Opponent {
            return;
        }
        if combat.reaction_timer > 0 {
            combat.reaction_timer -= 1;
            return;
        }
        if let Err(error) = self.opponent_turn() {
            warn!(%error, "opponent could not act; fight abandoned");
            self.set_mode(Mode::Normal);
        }
    }

    fn opponent_turn(&mut self) -> Result<(), CommandError> {
        let id = self
            .combat
            .as_ref()
            .map(|combat| combat.opponent)
            .ok_or(CombatError::NotFighting)?;
        let opponent = self
            .roster
            .unit(id)
            .cloned()
            .ok_or(CombatError::UnitNotFound(id))?;
        let rng = self.env.rng()?;
        let player = self.roster.player_mut().ok_or(CommandError::NoPlayer)?;

        let mut dice = Dice::new(rng, self.game_seed, &mut self.nonce);
        let action = opponent_action(&mut dice, &opponent);
        let result = match action {
            CombatAction::Ranged => ranged_attack(&mut dice, &opponent, player),
            _ => Some(melee_attack(&mut dice, &opponent, player)),
        };

        let combat = self.combat.as_mut().ok_or(CombatError::NotFighting)?;
        combat.record(action);
        if let Some(result) = &result {
            combat.record_attack(result);
        }

        if let Some(end) = self.fight_end() {
            self.conclude_fight(end);
            return Ok(());
        }
        if let Some(combat) = self.combat.as_mut() {
            combat.end_turn(0);
        }
        if let Mode::Fighting(dialog) = &mut self.mode {
            dialog.set_locked(false);
        }
        Ok(())
    }

    fn fight_end(&self) -> Option<FightEnd> {
        let combat = self.combat.as_ref()?;
        if self.roster.player().is_some_and(|player| !player.is_alive()) {
            return Some(FightEnd::Defeat);
        }
        let opponent_down = self
            .roster
            .unit(combat.opponent)
            .is_none_or(|opponent| !opponent.is_alive());
        opponent_down.then_some(FightEnd::Victory)
    }

    fn conclude_fight(&mut self, end: FightEnd) {
        match end {
            FightEnd::Victory => {
                if let Some(combat) = self.combat.as_ref() {
                    let opponent = combat.opponent;
                    if let Ok(unit) = self.roster.remove_unit(opponent) {
                        info!(opponent = %unit.name, "fight won");
                    }
                }
                self.set_mode(Mode::Normal);
            }
            FightEnd::Defeat => {
                info!("player defeated");
                self.exit_to_menu();
            }
        }
    }
}
