//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use isle_content::{Content, MapCatalog, QuestBook, UnitCatalog};
use isle_core::{
    Bitmap, Command, FrameView, GameConfig, ItemKind, MapBlueprint, ModeKind, Rgb, UnitTemplate,
};
use isle_runtime::{FrameSink, GameData};

pub const SEED: u64 = 7;

/// One map of four 128x96 zones with the hero in zone 1, a talking
/// neighbour and a herb to pick up.
pub fn content() -> Content {
    let map = MapBlueprint::new(
        "isle",
        Bitmap::filled(256, 192, Rgb::BLACK),
        Bitmap::filled(256, 192, Rgb::GREEN),
        1,
    );

    let mut quests = QuestBook::new();
    quests.insert(
        "isle_0",
        vec![
            Command::SetMap { map: "isle".into() },
            Command::SpawnUnit {
                template: UnitTemplate::builder("Hero").size(8, 12).build(),
                x: 60,
                y: 40,
            },
            Command::SetPlayer { unit: "Hero".into() },
            Command::SetMusic {
                name: "waves.ogg".into(),
            },
            Command::RegisterDialog {
                id: "greet".into(),
                line: "Hi!".into(),
            },
        ],
    );
    quests.insert(
        "isle_0_1",
        vec![
            Command::SpawnTemplate {
                template: "Nestor".into(),
                x: 60,
                y: 28,
            },
            Command::SpawnItem {
                kind: ItemKind::Medicine,
                x: 68,
                y: 40,
                tag: Some("herb".into()),
                fixed: false,
            },
            Command::SetSound {
                name: "birds.ogg".into(),
            },
        ],
    );

    let units: UnitCatalog = [UnitTemplate::builder("Nestor")
        .size(8, 12)
        .dialog("greet")
        .build()]
    .into_iter()
    .collect();

    Content {
        config: GameConfig::default()
            .with_viewport(128, 96)
            .with_opponent_delay(0),
        maps: MapCatalog::new().with_map(map).with_start("isle"),
        quests,
        units,
    }
}

pub fn game_data() -> GameData {
    GameData::from_content(content(), SEED)
}

/// What the renderer would have seen, one entry per frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seen {
    pub frame: u64,
    pub mode: ModeKind,
    pub zone: Option<u32>,
    pub units: Vec<String>,
    pub sound: (String, bool),
    pub music: (String, bool),
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub frames: Vec<Seen>,
}

impl RecordingSink {
    pub fn last(&self) -> &Seen {
        self.frames.last().expect("no frame presented")
    }
}

impl FrameSink for RecordingSink {
    fn present(&mut self, view: &FrameView<'_>) {
        self.frames.push(Seen {
            frame: view.frame,
            mode: view.mode.kind(),
            zone: view.map.map(|map| map.zone),
            units: view.units.iter().map(|unit| unit.name.to_owned()).collect(),
            sound: (view.sound.name.clone(), view.sound.refresh),
            music: (view.music.name.clone(), view.music.refresh),
        });
    }
}
