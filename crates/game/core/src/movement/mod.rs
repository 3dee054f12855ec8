//! Axis-aligned unit movement over the materialized map view.
//!
//! [`Collision`] answers whether a move is admissible; the engine functions
//! apply steps, building entry/exit and zone crossings.

mod collision;
mod engine;
mod error;

pub use collision::Collision;
pub use engine::{
    StepOutcome, WalkOutcome, ZoneCrossing, cross_zone_edge, enter_building, leave_building,
    move_unit, walk_player,
};
pub use error::MoveError;
