//! Attack outcomes and their combat-log messages.

use strum::Display;

/// Which attack produced a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackKind {
    Melee,
    Ranged,
}

/// Outcome of an attack attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    Miss,
    Hit,
}

/// Result of a resolved attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub kind: AttackKind,
    pub outcome: AttackOutcome,
    /// Damage dealt (None if miss).
    pub damage: Option<u32>,
}

impl AttackResult {
    pub fn miss(kind: AttackKind) -> Self {
        Self {
            kind,
            outcome: AttackOutcome::Miss,
            damage: None,
        }
    }

    pub fn hit(kind: AttackKind, damage: u32) -> Self {
        Self {
            kind,
            outcome: AttackOutcome::Hit,
            damage: Some(damage),
        }
    }

    /// Line shown in the combat log.
    pub fn message(&self) -> String {
        match self.damage {
            Some(damage) => format!("{} Attack hits for {damage} Damage!", self.kind),
            None => format!("{} Attack Missed!", self.kind),
        }
    }
}
