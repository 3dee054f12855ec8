//! Read-only per-frame view handed to the renderer.

use crate::combat::CombatState;
use crate::geometry::Rect;
use crate::map::Bitmap;
use crate::mode::{Mode, ModeKind, Pacing};
use crate::state::{UnitId, WorldObject};

use super::{AudioCue, GameSession};

/// The materialized zone or interior.
#[derive(Clone, Copy, Debug)]
pub struct MapFrame<'s> {
    pub name: &'s str,
    pub zone: u32,
    pub interior: u8,
    pub mask: &'s Bitmap,
    pub texture: &'s Bitmap,
    /// Pixel origin of the zone inside the full map image; `(0, 0)` inside a building.
    pub offset: (u32, u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitSprite<'s> {
    pub id: UnitId,
    pub name: &'s str,
    pub rect: Rect,
    /// `(row, column)` in the unit's spritesheet.
    pub frame: (u8, u8),
    pub is_player: bool,
}

#[derive(Clone, Debug)]
pub struct FrameView<'s> {
    pub frame: u64,
    pub mode: &'s Mode,
    pub pacing: Pacing,
    pub map: Option<MapFrame<'s>>,
    pub units: Vec<UnitSprite<'s>>,
    pub objects: &'s [WorldObject],
    /// Present while fighting.
    pub combat: Option<&'s CombatState>,
    pub sound: &'s AudioCue,
    pub music: &'s AudioCue,
}

impl GameSession<'_> {
    pub fn frame_view(&self) -> FrameView<'_> {
        let map = self.map.as_ref().map(|map| MapFrame {
            name: map.name(),
            zone: map.zone(),
            interior: map.interior(),
            mask: map.mask(),
            texture: map.texture(),
            offset: if map.interior() == 0 {
                map.layout()
                    .origin(map.zone(), map.viewport())
                    .unwrap_or_default()
            } else {
                (0, 0)
            },
        });
        let player = self.roster.player_id();
        let units = self
            .roster
            .units()
            .map(|unit| UnitSprite {
                id: unit.id,
                name: &unit.name,
                rect: unit.rect,
                frame: unit.sprite_frame(),
                is_player: Some(unit.id) == player,
            })
            .collect();

        FrameView {
            frame: self.frame,
            mode: &self.mode,
            pacing: self.pacing(),
            map,
            units,
            objects: self.roster.objects(),
            combat: self
                .combat
                .as_ref()
                .filter(|_| self.mode.kind() == ModeKind::Fighting),
            sound: &self.sound,
            music: &self.music,
        }
    }
}
