//! Turn-based combat resolution.
//!
//! The resolver functions are stateless and draw from a [`Dice`](crate::env::Dice);
//! [`CombatState`] carries the per-fight bookkeeping (turn owner, log, the
//! player's last choice) that the session updates around them.

mod damage;
mod error;
mod resolver;
mod result;
mod state;

pub use damage::{AttackProfile, apply_damage};
pub use error::CombatError;
pub use resolver::{flee, melee_attack, opponent_action, ranged_attack, use_item};
pub use result::{AttackKind, AttackOutcome, AttackResult};
pub use state::{CombatAction, CombatState, Side};
