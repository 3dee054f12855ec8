//! Per-call combat rules. Every random draw goes through [`Dice`].

use crate::env::Dice;
use crate::state::{ItemEffect, Unit};

use super::{AttackKind, AttackProfile, AttackResult, CombatAction, CombatError, apply_damage};

fn attack(dice: &mut Dice<'_>, kind: AttackKind, attacker: &Unit, defender: &mut Unit) -> AttackResult {
    let profile = AttackProfile::of(kind);
    let result = if profile.check_hit(dice) {
        let damage = profile.roll_damage(dice);
        apply_damage(defender, damage);
        AttackResult::hit(kind, damage)
    } else {
        AttackResult::miss(kind)
    };
    tracing::debug!(
        attacker = %attacker.name,
        defender = %defender.name,
        %kind,
        damage = ?result.damage,
        "attack resolved"
    );
    result
}

/// d10: a 1 misses, anything else deals 10–15.
pub fn melee_attack(dice: &mut Dice<'_>, attacker: &Unit, defender: &mut Unit) -> AttackResult {
    attack(dice, AttackKind::Melee, attacker, defender)
}

/// d6: a 1 misses, anything else deals 25–35.
///
/// Without a weapon nothing happens: no roll, no message, no damage.
pub fn ranged_attack(
    dice: &mut Dice<'_>,
    attacker: &Unit,
    defender: &mut Unit,
) -> Option<AttackResult> {
    attacker
        .has_weapon()
        .then(|| attack(dice, AttackKind::Ranged, attacker, defender))
}

/// d10: anything above 2 escapes.
pub fn flee(dice: &mut Dice<'_>) -> bool {
    dice.roll(1, 10) > 2
}

/// The opponent picks melee or ranged with equal odds; unarmed it always melees.
pub fn opponent_action(dice: &mut Dice<'_>, opponent: &Unit) -> CombatAction {
    match dice.roll(1, 2) {
        2 if opponent.has_weapon() => CombatAction::Ranged,
        _ => CombatAction::Melee,
    }
}

/// Uses the inventory item at `index` (0-based) on `unit`, consuming it.
pub fn use_item(unit: &mut Unit, index: usize) -> Result<ItemEffect, CombatError> {
    let item = unit
        .inventory
        .get(index)
        .ok_or(CombatError::ItemMissing(index))?;
    if !item.is_usable() {
        return Err(CombatError::ItemNotUsable(item.kind));
    }
    let item = unit.inventory.remove(index);
    Ok(item.apply(unit))
}
