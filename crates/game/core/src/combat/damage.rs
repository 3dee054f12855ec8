//! Hit and damage tables, and damage application.

use crate::env::Dice;
use crate::state::Unit;

use super::AttackKind;

/// Dice of one attack kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackProfile {
    /// Sides of the to-hit die.
    pub hit_die: u32,
    /// To-hit rolls at or below this value miss.
    pub miss_at_most: u32,
    pub min_damage: u32,
    pub max_damage: u32,
}

impl AttackProfile {
    pub const MELEE: AttackProfile = AttackProfile {
        hit_die: 10,
        miss_at_most: 1,
        min_damage: 10,
        max_damage: 15,
    };

    pub const RANGED: AttackProfile = AttackProfile {
        hit_die: 6,
        miss_at_most: 1,
        min_damage: 25,
        max_damage: 35,
    };

    pub const fn of(kind: AttackKind) -> AttackProfile {
        match kind {
            AttackKind::Melee => Self::MELEE,
            AttackKind::Ranged => Self::RANGED,
        }
    }

    pub fn check_hit(&self, dice: &mut Dice<'_>) -> bool {
        dice.roll(1, self.hit_die) > self.miss_at_most
    }

    pub fn roll_damage(&self, dice: &mut Dice<'_>) -> u32 {
        dice.roll(self.min_damage, self.max_damage)
    }
}

/// Apply damage to the defender's health (clamped to 0).
///
/// Returns the damage actually taken.
pub fn apply_damage(defender: &mut Unit, damage: u32) -> u32 {
    defender.take_damage(damage)
}
