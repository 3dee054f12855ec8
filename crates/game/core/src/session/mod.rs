//! The game session: every piece of mutable state plus the lifecycle around it.
//!
//! A [`GameSession`] is the single writer of its state. Per frame the runtime
//! feeds input through [`GameSession::handle_input`] and then calls
//! [`GameSession::tick`] once, which runs the scheduler pass, the command-queue
//! pass and the mode timers in that order.

mod audio;
mod controller;
mod dispatch;
mod fight;
mod snapshot;
mod view;

pub use audio::AudioCue;
pub use snapshot::{SNAPSHOT_VERSION, SessionSnapshot, SnapshotError};
pub use view::{FrameView, MapFrame, UnitSprite};

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::combat::CombatState;
use crate::command::{Command, CommandError, CommandFailure, CommandQueue};
use crate::config::GameConfig;
use crate::env::{GameEnv, QuestKey};
use crate::error::GameError;
use crate::interface::Menu;
use crate::map::MapView;
use crate::mode::{Mode, ModeKind, Pacing};
use crate::scheduler::{MoveEnd, MoveScheduler};
use crate::state::{QuestProgress, Roster};

/// Music played while the main menu is shown.
pub const MENU_MUSIC: &str = "menu.ogg";

pub struct GameSession<'a> {
    env: GameEnv<'a>,
    config: GameConfig,
    game_seed: u64,
    nonce: u64,
    mode: Mode,
    map: Option<MapView>,
    roster: Roster,
    scheduler: MoveScheduler,
    commands: CommandQueue,
    quest: QuestProgress,
    /// The current fight, or the last one until the next starts.
    combat: Option<CombatState>,
    dialogs: BTreeMap<String, String>,
    sound: AudioCue,
    music: AudioCue,
    failures: Vec<CommandFailure>,
    /// Set by `SetZone`; the location reloads after the current command pass.
    reload_pending: bool,
    quit_requested: bool,
    frame: u64,
    start_map: Option<String>,
}

impl<'a> GameSession<'a> {
    /// A session showing the main menu.
    pub fn new(env: GameEnv<'a>, config: GameConfig, game_seed: u64) -> Self {
        Self {
            env,
            config,
            game_seed,
            nonce: 0,
            mode: Mode::Menu(Menu::main()),
            map: None,
            roster: Roster::new(),
            scheduler: MoveScheduler::new(),
            commands: CommandQueue::new(),
            quest: QuestProgress::default(),
            combat: None,
            dialogs: BTreeMap::new(),
            sound: AudioCue::default(),
            music: AudioCue::named(MENU_MUSIC),
            failures: Vec::new(),
            reload_pending: false,
            quit_requested: false,
            frame: 0,
            start_map: None,
        }
    }

    /// Overrides the map a new game starts on.
    pub fn with_start_map(mut self, map: impl Into<String>) -> Self {
        self.start_map = Some(map.into());
        self
    }

    // ===== accessors =====

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn game_seed(&self) -> u64 {
        self.game_seed
    }

    /// Number of random draws made so far.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn mode_kind(&self) -> ModeKind {
        self.mode.kind()
    }

    /// Frame rate and key repeat of the active mode.
    pub fn pacing(&self) -> Pacing {
        Pacing::for_mode(self.mode.kind(), &self.config)
    }

    pub fn map(&self) -> Option<&MapView> {
        self.map.as_ref()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn scheduler(&self) -> &MoveScheduler {
        &self.scheduler
    }

    pub fn queued_commands(&self) -> &CommandQueue {
        &self.commands
    }

    pub fn quest(&self) -> &QuestProgress {
        &self.quest
    }

    pub fn combat(&self) -> Option<&CombatState> {
        self.combat.as_ref()
    }

    pub fn dialog(&self, id: &str) -> Option<&str> {
        self.dialogs.get(id).map(String::as_str)
    }

    pub fn sound(&self) -> &AudioCue {
        &self.sound
    }

    pub fn music(&self) -> &AudioCue {
        &self.music
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn failures(&self) -> &[CommandFailure] {
        &self.failures
    }

    /// Hands pending command failures to the caller.
    pub fn drain_failures(&mut self) -> Vec<CommandFailure> {
        std::mem::take(&mut self.failures)
    }

    /// Lowers both refresh flags once the audio collaborator has (re)started the tracks.
    pub fn acknowledge_audio(&mut self) {
        self.sound.acknowledge();
        self.music.acknowledge();
    }

    /// Whether the unit named `second` stands within `range` pixels of `first`.
    pub fn units_in_range(&self, first: &str, second: &str, range: Option<i32>) -> bool {
        match (self.roster.find_by_name(first), self.roster.find_by_name(second)) {
            (Some(first), Some(second)) => {
                first.in_range(second, range.unwrap_or(GameConfig::DEFAULT_UNIT_RANGE))
            }
            _ => false,
        }
    }

    // ===== lifecycle =====

    /// Starts a fresh game on the start map.
    ///
    /// The map-wide script of quest 0 runs synchronously and must load a map;
    /// the zone script is queued for the first tick. On failure the session
    /// falls back to the main menu.
    pub fn new_game(&mut self) -> Result<(), CommandError> {
        info!(seed = self.game_seed, "starting new game");
        self.clear();
        self.set_mode(Mode::Normal);
        if let Err(error) = self.run_start_script() {
            warn!(%error, "new game could not start");
            self.exit_to_menu();
            return Err(error);
        }
        self.reload_location();
        Ok(())
    }

    fn run_start_script(&mut self) -> Result<(), CommandError> {
        let start = match self.start_map.clone() {
            Some(map) => map,
            None => self.env.maps()?.start_map().ok_or(CommandError::NoMap)?,
        };
        let script = self.env.quests()?.commands(&QuestKey::new(start, 0, 0, 0));
        for command in script {
            self.run_command(command);
        }
        if self.map.is_none() {
            return Err(CommandError::NoMap);
        }
        Ok(())
    }

    /// Drops the game and shows the main menu.
    pub fn exit_to_menu(&mut self) {
        info!("exiting to main menu");
        self.clear();
        self.set_mode(Mode::Menu(Menu::main()));
        self.music.set(MENU_MUSIC);
        self.sound.request_refresh();
        self.music.request_refresh();
    }

    fn clear(&mut self) {
        self.map = None;
        self.roster.clear();
        self.scheduler.clear();
        self.commands.clear();
        self.quest = QuestProgress::default();
        self.combat = None;
        self.dialogs.clear();
        self.sound = AudioCue::default();
        self.music = AudioCue::default();
        self.reload_pending = false;
    }

    /// Switches mode; pacing follows the mode, so frame rate and key repeat change together.
    pub(crate) fn set_mode(&mut self, mode: Mode) {
        let (from, to) = (self.mode.kind(), mode.kind());
        if from != to {
            debug!(%from, %to, "mode transition");
        }
        self.mode = mode;
    }

    /// Clears location-scoped state and queues the script of the current zone or interior.
    pub(crate) fn reload_location(&mut self) {
        self.reload_pending = false;
        let Some(map) = &self.map else {
            return;
        };
        let key = QuestKey::new(map.name(), self.quest.quest, map.zone(), map.interior());

        self.roster.clear_location();
        self.scheduler.clear();
        self.commands.clear();
        match self.env.quests() {
            Ok(quests) => self.commands.extend(quests.commands(&key)),
            Err(error) => warn!(%error, "no quest scripts available"),
        }
        debug!(%key, queued = self.commands.len(), "location reloaded");
    }

    // ===== frame =====

    /// Advances the session by one frame.
    ///
    /// The world (pending moves and queued commands) only advances in free
    /// movement; the other modes keep their own timers.
    pub fn tick(&mut self) {
        self.frame += 1;
        match self.mode.kind() {
            ModeKind::Normal => {
                self.advance_moves();
                self.run_command_pass();
            }
            ModeKind::Fighting => self.tick_fight(),
            ModeKind::Panel => {
                if let Mode::Panel(panel) = &mut self.mode {
                    panel.tick(self.config.dialog_reveal_frames);
                }
            }
            ModeKind::Menu | ModeKind::Window => {}
        }
    }

    fn advance_moves(&mut self) {
        let Some(map) = &self.map else {
            return;
        };
        let report = self.scheduler.tick(map, &mut self.roster, &self.config);
        for (unit, end) in report.finished {
            match end {
                MoveEnd::Arrived => debug!(%unit, "move arrived"),
                MoveEnd::Blocked => debug!(%unit, "move blocked"),
                MoveEnd::Vanished => debug!(%unit, "moving unit left the map"),
            }
        }
    }

    /// Runs every command queued before this pass; commands queued during it wait a tick.
    fn run_command_pass(&mut self) {
        for command in self.commands.take_batch() {
            // an exit to the menu drops the rest of the batch with the game
            if self.map.is_none() {
                break;
            }
            self.run_command(command);
        }
        if self.reload_pending {
            self.reload_location();
        }
    }

    /// Executes one command, recording a failure instead of propagating it.
    pub(crate) fn run_command(&mut self, command: Command) {
        if let Err(error) = self.execute(command.clone()) {
            warn!(
                command = command.name(),
                code = error.error_code(),
                severity = error.severity().as_str(),
                %error,
                "command rejected"
            );
            self.failures.push(CommandFailure { command, error });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{CombatAction, Side};
    use crate::env::{Env, MapOracle, OracleError, QuestOracle, ScriptedRng, UnitOracle, UnitTemplate};
    use crate::geometry::Direction;
    use crate::input::{InputAction, InputEvent};
    use crate::interface::{MenuKind, WindowKind};
    use crate::map::{Bitmap, MapBlueprint, Rgb};
    use crate::movement::MoveError;
    use crate::state::{Attitude, Item, ItemKind, UnitKind, Weapon};

    struct Maps(Vec<MapBlueprint>);

    impl MapOracle for Maps {
        fn blueprint(&self, name: &str) -> Result<MapBlueprint, OracleError> {
            self.0
                .iter()
                .find(|blueprint| blueprint.name == name)
                .cloned()
                .ok_or_else(|| OracleError::MapNotFound(name.to_owned()))
        }

        fn start_map(&self) -> Option<String> {
            Some("isle".to_owned())
        }
    }

    struct Scripts(BTreeMap<String, Vec<Command>>);

    impl QuestOracle for Scripts {
        fn commands(&self, key: &QuestKey) -> Vec<Command> {
            self.0.get(&key.stem()).cloned().unwrap_or_default()
        }
    }

    struct Templates(Vec<UnitTemplate>);

    impl UnitOracle for Templates {
        fn template(&self, id: &str) -> Option<UnitTemplate> {
            self.0.iter().find(|template| template.name == id).cloned()
        }
    }

    struct Fixture {
        maps: Maps,
        scripts: Scripts,
        templates: Templates,
        rng: ScriptedRng,
    }

    fn config() -> GameConfig {
        GameConfig::default()
            .with_viewport(128, 96)
            .with_opponent_delay(0)
    }

    fn small(name: &str) -> UnitTemplate {
        UnitTemplate::builder(name).size(8, 12).build()
    }

    fn cyclops() -> UnitTemplate {
        UnitTemplate::builder("Cyclops")
            .kind(UnitKind::Titan)
            .size(8, 12)
            .attitude(Attitude::Enemy)
            .build()
    }

    impl Fixture {
        fn new(rolls: &[u32]) -> Self {
            let blueprint = MapBlueprint::new(
                "isle",
                Bitmap::filled(256, 192, Rgb::BLACK),
                Bitmap::filled(256, 192, Rgb::GREEN),
                1,
            );
            let nestor = UnitTemplate::builder("Nestor")
                .size(8, 12)
                .dialog("greet")
                .build();

            let mut scripts = BTreeMap::new();
            scripts.insert(
                "isle_0".to_owned(),
                vec![
                    Command::SetMap { map: "isle".into() },
                    Command::SpawnUnit {
                        template: small("Hero"),
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
            scripts.insert(
                "isle_0_1".to_owned(),
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

            Self {
                maps: Maps(vec![blueprint]),
                scripts: Scripts(scripts),
                templates: Templates(vec![nestor]),
                rng: ScriptedRng::new(rolls.iter().copied()),
            }
        }

        fn session(&self) -> GameSession<'_> {
            let env = Env::with_all(&self.maps, &self.scripts, &self.templates, &self.rng);
            GameSession::new(env.as_game_env(), config(), 7)
        }

        /// New game with the first zone script already run.
        fn started(&self) -> GameSession<'_> {
            let mut session = self.session();
            session.new_game().unwrap();
            session.tick();
            session
        }
    }

    fn press(session: &mut GameSession<'_>, action: InputAction) {
        session.handle_input(InputEvent::KeyDown(action));
    }

    fn fight(session: &mut GameSession<'_>, template: UnitTemplate) {
        session
            .execute(Command::SpawnUnit {
                template,
                x: 100,
                y: 40,
            })
            .unwrap();
        session
            .execute(Command::StartEncounter {
                opponent: "Cyclops".into(),
            })
            .unwrap();
    }

    fn opponent_health(session: &GameSession<'_>) -> u32 {
        session.roster.find_by_name("Cyclops").map_or(0, |unit| unit.health)
    }

    #[test]
    fn fresh_session_shows_the_main_menu() {
        let fixture = Fixture::new(&[]);
        let session = fixture.session();
        assert!(matches!(session.mode(), Mode::Menu(menu) if menu.kind() == MenuKind::Main));
        assert_eq!(session.pacing().fps, 5);
        assert_eq!(session.pacing().key_repeat, None);
        assert_eq!(session.music(), &AudioCue::named(MENU_MUSIC));
    }

    #[test]
    fn new_game_runs_start_script_then_queues_zone_script() {
        let fixture = Fixture::new(&[]);
        let mut session = fixture.session();
        press(&mut session, InputAction::Confirm);

        assert_eq!(session.mode_kind(), ModeKind::Normal);
        assert_eq!(session.roster().player().map(|unit| unit.name.as_str()), Some("Hero"));
        assert!(session.roster().npcs().is_empty());
        assert_eq!(session.queued_commands().len(), 3);
        assert_eq!(session.music().name, "waves.ogg");

        session.tick();
        assert!(session.queued_commands().is_empty());
        assert!(session.roster().find_by_name("Nestor").is_some());
        assert_eq!(session.roster().objects().len(), 1);
        assert_eq!(session.sound().name, "birds.ogg");
        assert!(session.failures().is_empty());
    }

    #[test]
    fn new_game_without_a_map_returns_to_the_menu() {
        let mut fixture = Fixture::new(&[]);
        fixture.scripts.0.remove("isle_0");
        let mut session = fixture.session();

        assert_eq!(session.new_game(), Err(CommandError::NoMap));
        assert_eq!(session.mode_kind(), ModeKind::Menu);
        assert!(session.map().is_none());
    }

    #[test]
    fn picked_items_are_remembered_across_reloads() {
        let fixture = Fixture::new(&[]);
        let mut session = fixture.started();

        // the item touches the player's right side, so the step bumps
        press(&mut session, InputAction::MoveRight);
        assert_eq!(session.roster().player().unwrap().rect.x, 60);
        press(&mut session, InputAction::Interact);

        let player = session.roster().player().unwrap();
        assert_eq!(player.inventory, vec![Item::tagged(ItemKind::Medicine, "herb")]);
        assert!(session.roster().objects().is_empty());
        assert!(session.quest().is_collected("herb"));

        session.execute(Command::SetZone { zone: 1 }).unwrap();
        session.tick();
        session.tick();
        assert!(session.roster().find_by_name("Nestor").is_some());
        assert!(session.roster().objects().is_empty());
    }

    #[test]
    fn fixed_objects_block_pickups() {
        let fixture = Fixture::new(&[]);
        let mut session = fixture.started();
        session
            .execute(Command::RemoveObject { tag: "herb".into() })
            .unwrap();
        session
            .execute(Command::SpawnItem {
                kind: ItemKind::Jewel,
                x: 68,
                y: 40,
                tag: None,
                fixed: true,
            })
            .unwrap();

        press(&mut session, InputAction::MoveRight);
        press(&mut session, InputAction::Interact);
        assert!(session.roster().player().unwrap().inventory.is_empty());
        assert_eq!(session.roster().objects().len(), 1);
    }

    #[test]
    fn talking_types_out_the_first_dialog_line() {
        let fixture = Fixture::new(&[]);
        let mut session = fixture.started();

        press(&mut session, InputAction::MoveUp);
        press(&mut session, InputAction::Interact);
        let Mode::Panel(panel) = session.mode() else {
            panic!("expected the dialog panel, got {:?}", session.mode_kind());
        };
        assert_eq!(panel.content(), "Nestor: ");
        assert_eq!(session.pacing().fps, 5);

        for _ in 0..3 {
            session.tick();
        }
        let Mode::Panel(panel) = session.mode() else {
            panic!("panel closed early");
        };
        assert_eq!(panel.content(), "Nestor: Hi!");

        press(&mut session, InputAction::Confirm);
        assert_eq!(session.mode_kind(), ModeKind::Normal);
    }

    #[test]
    fn inventory_window_uses_items_through_the_context_menu() {
        let fixture = Fixture::new(&[]);
        let mut session = fixture.started();
        press(&mut session, InputAction::MoveRight);
        press(&mut session, InputAction::Interact);
        session.roster.player_mut().unwrap().health = 40;

        press(&mut session, InputAction::OpenInventory);
        assert!(matches!(session.mode(), Mode::Window(window) if window.kind() == WindowKind::Inventory));
        press(&mut session, InputAction::Confirm);
        press(&mut session, InputAction::Confirm);

        let player = session.roster().player().unwrap();
        assert_eq!(player.health, 100);
        assert!(player.inventory.is_empty());
        let Mode::Window(window) = session.mode() else {
            panic!("window closed");
        };
        assert!(window.context().is_none());
        assert_eq!(window.selected_item(), None);

        press(&mut session, InputAction::OpenInventory);
        assert_eq!(session.mode_kind(), ModeKind::Normal);
    }

    #[test]
    fn confirm_on_an_empty_inventory_does_nothing() {
        let fixture = Fixture::new(&[]);
        let mut session = fixture.started();
        press(&mut session, InputAction::OpenInventory);
        press(&mut session, InputAction::Confirm);
        let Mode::Window(window) = session.mode() else {
            panic!("window closed");
        };
        assert!(window.context().is_none());
    }

    #[test]
    fn escape_toggles_the_in_game_menu() {
        let fixture = Fixture::new(&[]);
        let mut session = fixture.started();
        press(&mut session, InputAction::Cancel);
        assert!(matches!(session.mode(), Mode::Menu(menu) if menu.kind() == MenuKind::InGame));
        assert_eq!(session.pacing().fps, 5);

        press(&mut session, InputAction::Cancel);
        assert_eq!(session.mode_kind(), ModeKind::Normal);
        assert_eq!(session.pacing().fps, 25);
        assert!(session.pacing().key_repeat.is_some());
    }

    #[test]
    fn exit_from_the_in_game_menu_clears_the_game() {
        let fixture = Fixture::new(&[]);
        let mut session = fixture.started();
        press(&mut session, InputAction::Cancel);
        for _ in 0..5 {
            press(&mut session, InputAction::MoveDown);
        }
        press(&mut session, InputAction::Confirm);

        assert!(matches!(session.mode(), Mode::Menu(menu) if menu.kind() == MenuKind::Main));
        assert!(session.map().is_none());
        assert!(session.roster().player().is_none());
        assert!(session.sound().refresh);
        assert_eq!(session.music(), &AudioCue::named(MENU_MUSIC));
    }

    #[test]
    fn reaching_the_bottom_edge_switches_zone_once() {
        let fixture = Fixture::new(&[]);
        let mut session = fixture.started();
        session.roster.player_mut().unwrap().place(20, 66);
        session.acknowledge_audio();

        press(&mut session, InputAction::MoveDown);
        assert_eq!(session.map().unwrap().zone(), 1);
        press(&mut session, InputAction::MoveDown);

        assert_eq!(session.map().unwrap().zone(), 3);
        assert_eq!(session.roster().player().unwrap().rect.y, 2 + 16);
        assert!(session.sound().refresh);
        assert!(session.roster().npcs().is_empty());

        press(&mut session, InputAction::MoveDown);
        assert_eq!(session.map().unwrap().zone(), 3);
    }

    #[test]
    fn queued_events_run_on_the_next_pass() {
        let fixture = Fixture::new(&[]);
        let mut session = fixture.started();
        session
            .execute(Command::queue_event(Command::queue_event(Command::SetSound {
                name: "bells.ogg".into(),
            })))
            .unwrap();

        session.tick();
        assert_eq!(session.sound().name, "birds.ogg");
        session.tick();
        assert_eq!(session.sound().name, "bells.ogg");
    }

    #[test]
    fn failing_commands_are_recorded_without_stopping_the_pass() {
        let fixture = Fixture::new(&[]);
        let mut session = fixture.started();
        session.commands.extend([
            Command::SpawnUnit {
                template: small("Giant"),
                x: 125,
                y: 0,
            },
            Command::RemoveUnit {
                unit: "Nobody".into(),
            },
            Command::SetSound {
                name: "rain.ogg".into(),
            },
        ]);
        session.tick();

        let failures = session.drain_failures();
        let codes: Vec<_> = failures.iter().map(|failure| failure.error.error_code()).collect();
        assert_eq!(codes, ["COMMAND_OUT_OF_BOUNDS", "COMMAND_UNIT_NOT_FOUND"]);
        assert_eq!(session.sound().name, "rain.ogg");
        assert!(session.roster().find_by_name("Giant").is_none());
        assert!(session.failures().is_empty());
    }

    #[test]
    fn placement_rejects_duplicates_and_bad_names() {
        let fixture = Fixture::new(&[]);
        let mut session = fixture.started();
        assert_eq!(
            session.execute(Command::SpawnUnit {
                template: small("Nestor"),
                x: 0,
                y: 0,
            }),
            Err(CommandError::State(crate::state::StateError::UnitAlreadyPresent(
                "Nestor".into()
            )))
        );
        assert_eq!(
            session.execute(Command::SpawnUnit {
                template: small("ABCDEFGHIJKLMNOP"),
                x: 0,
                y: 0,
            }),
            Err(CommandError::InvalidName("ABCDEFGHIJKLMNOP".into()))
        );
        assert_eq!(
            session.execute(Command::SpawnUnit {
                template: small("Edge"),
                x: 120,
                y: 84,
            }),
            Ok(())
        );
    }

    #[test]
    fn scripted_moves_arrive_over_several_ticks() {
        let fixture = Fixture::new(&[]);
        let mut session = fixture.started();
        session
            .execute(Command::MoveUnitSteps {
                unit: "Nestor".into(),
                direction: Direction::Left,
                steps: 3,
            })
            .unwrap();
        assert!(session.scheduler().is_moving(session.roster().find_by_name("Nestor").unwrap().id));

        for _ in 0..3 {
            session.tick();
        }
        assert_eq!(session.roster().find_by_name("Nestor").unwrap().rect.x, 54);
        assert!(session.scheduler().is_empty());

        assert_eq!(
            session.execute(Command::MoveUnitSteps {
                unit: "Nestor".into(),
                direction: Direction::Left,
                steps: 0,
            }),
            Err(CommandError::ZeroSteps)
        );
    }

    #[test]
    fn scripted_moves_beyond_the_viewport_are_rejected() {
        let fixture = Fixture::new(&[]);
        let mut session = fixture.started();
        let hero = session.roster().player().unwrap().rect;

        let err = session
            .execute(Command::MoveUnitSteps {
                unit: "Hero".into(),
                direction: Direction::Down,
                steps: u32::MAX,
            })
            .unwrap_err();
        assert_eq!(err.error_code(), "MOVE_OUT_OF_RANGE");

        let err = session
            .execute(Command::MoveUnit {
                unit: "Nestor".into(),
                direction: Direction::Right,
                distance: i32::MAX,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            CommandError::Move(MoveError::OutOfRange {
                distance: i32::MAX,
                direction: Direction::Right,
                ..
            })
        ));

        session.tick();
        assert!(session.scheduler().is_empty());
        assert_eq!(session.roster().player().unwrap().rect, hero);
        assert!(session.failures().is_empty());
    }

    #[test]
    fn encounter_resets_the_fight() {
        let fixture = Fixture::new(&[]);
        let mut session = fixture.started();
        fight(&mut session, cyclops());

        let Mode::Fighting(dialog) = session.mode() else {
            panic!("not fighting");
        };
        assert_eq!(dialog.selected_action(), CombatAction::Melee);
        assert!(dialog.is_ranged_locked());
        assert_eq!(session.pacing().fps, 25);
        assert_eq!(session.pacing().key_repeat, None);

        let combat = session.combat().unwrap();
        assert_eq!(combat.turn, Side::Player);
        assert!(combat.log.is_empty());
        assert_eq!(opponent_health(&session), 100);
    }

    #[test]
    fn opponent_answers_after_the_player_acts() {
        // player: hit roll 2, damage 12; opponent: action 1, hit roll 1 (miss)
        let fixture = Fixture::new(&[2, 12, 1, 1]);
        let mut session = fixture.started();
        fight(&mut session, cyclops());

        press(&mut session, InputAction::Confirm);
        assert_eq!(opponent_health(&session), 88);
        let combat = session.combat().unwrap();
        assert_eq!(combat.turn, Side::Opponent);
        assert_eq!(combat.pending_damage, Some(12));
        assert!(matches!(session.mode(), Mode::Fighting(dialog) if dialog.is_locked()));

        // locked controls ignore input
        press(&mut session, InputAction::Confirm);
        assert_eq!(opponent_health(&session), 88);

        session.tick();
        let combat = session.combat().unwrap();
        assert_eq!(combat.turn, Side::Player);
        assert_eq!(combat.last_action, Some((Side::Opponent, CombatAction::Melee)));
        assert_eq!(
            combat.log,
            ["Melee Attack hits for 12 Damage!", "Melee Attack Missed!"]
        );
        assert!(matches!(session.mode(), Mode::Fighting(dialog) if !dialog.is_locked()));
    }

    #[test]
    fn unarmed_ranged_attack_only_passes_the_turn() {
        let fixture = Fixture::new(&[6, 30]);
        let mut session = fixture.started();
        fight(&mut session, cyclops());

        press(&mut session, InputAction::MoveRight);
        press(&mut session, InputAction::Confirm);

        let combat = session.combat().unwrap();
        assert!(combat.log.is_empty());
        assert_eq!(combat.message, None);
        assert_eq!(combat.turn, Side::Opponent);
        assert_eq!(opponent_health(&session), 100);
        assert_eq!(session.nonce(), 0);
    }

    #[test]
    fn armed_ranged_attack_rolls_ranged_damage() {
        let fixture = Fixture::new(&[6, 30]);
        let mut session = fixture.started();
        session.roster.player_mut().unwrap().weapon = Some(Weapon::named("Bow"));
        fight(&mut session, cyclops());

        press(&mut session, InputAction::MoveRight);
        press(&mut session, InputAction::Confirm);
        assert_eq!(opponent_health(&session), 70);
        assert_eq!(
            session.combat().unwrap().message.as_deref(),
            Some("Ranged Attack hits for 30 Damage!")
        );
    }

    #[test]
    fn successful_flee_resumes_free_movement() {
        let fixture = Fixture::new(&[3]);
        let mut session = fixture.started();
        fight(&mut session, cyclops());

        press(&mut session, InputAction::MoveDown);
        press(&mut session, InputAction::MoveRight);
        press(&mut session, InputAction::Confirm);

        assert_eq!(session.mode_kind(), ModeKind::Normal);
        assert_eq!(session.pacing().fps, 25);
        assert!(session.pacing().key_repeat.is_some());
        assert!(session.combat().unwrap().fled);
        assert!(session.roster().find_by_name("Cyclops").is_some());
    }

    #[test]
    fn failed_flee_keeps_fighting() {
        let fixture = Fixture::new(&[2]);
        let mut session = fixture.started();
        fight(&mut session, cyclops());

        press(&mut session, InputAction::MoveDown);
        press(&mut session, InputAction::MoveRight);
        press(&mut session, InputAction::Confirm);

        assert_eq!(session.mode_kind(), ModeKind::Fighting);
        let combat = session.combat().unwrap();
        assert!(!combat.fled);
        assert_eq!(combat.message.as_deref(), Some("Flee Attempt Failed!"));
        assert_eq!(combat.turn, Side::Opponent);
    }

    #[test]
    fn victory_removes_the_opponent() {
        let fixture = Fixture::new(&[2, 10]);
        let mut session = fixture.started();
        fight(&mut session, cyclops());
        let opponent = session.combat().unwrap().opponent;
        session.roster.unit_mut(opponent).unwrap().health = 5;

        press(&mut session, InputAction::Confirm);
        assert_eq!(session.mode_kind(), ModeKind::Normal);
        assert!(session.roster().find_by_name("Cyclops").is_none());
    }

    #[test]
    fn defeat_returns_to_the_main_menu() {
        // player misses; opponent melees, hits and deals 10
        let fixture = Fixture::new(&[1, 1, 2, 10]);
        let mut session = fixture.started();
        fight(&mut session, cyclops());
        session.roster.player_mut().unwrap().health = 5;

        press(&mut session, InputAction::Confirm);
        session.tick();
        assert!(matches!(session.mode(), Mode::Menu(menu) if menu.kind() == MenuKind::Main));
        assert!(session.map().is_none());
    }

    #[test]
    fn fight_inventory_restores_the_previous_action() {
        let fixture = Fixture::new(&[]);
        let mut session = fixture.started();
        press(&mut session, InputAction::MoveRight);
        press(&mut session, InputAction::Interact);
        fight(&mut session, cyclops());
        session.roster.player_mut().unwrap().health = 30;

        press(&mut session, InputAction::MoveDown);
        press(&mut session, InputAction::Confirm);
        assert!(matches!(session.mode(), Mode::Window(window) if window.kind() == WindowKind::FightInventory));

        press(&mut session, InputAction::Cancel);
        let Mode::Fighting(dialog) = session.mode() else {
            panic!("expected the action dialog");
        };
        assert_eq!(dialog.selected_action(), CombatAction::UseItem);
        assert_eq!(session.combat().unwrap().turn, Side::Player);

        // using an item consumes the turn
        press(&mut session, InputAction::Confirm);
        press(&mut session, InputAction::Confirm);
        press(&mut session, InputAction::Confirm);
        assert_eq!(session.mode_kind(), ModeKind::Fighting);
        assert_eq!(session.roster().player().unwrap().health, 100);
        assert_eq!(session.combat().unwrap().turn, Side::Opponent);
    }

    #[test]
    fn fight_commands_need_a_fight() {
        let fixture = Fixture::new(&[]);
        let mut session = fixture.started();
        assert_eq!(
            session.execute(Command::MeleeAttack),
            Err(CommandError::WrongMode {
                command: "MeleeAttack",
                mode: ModeKind::Normal,
            })
        );
        assert_eq!(
            session.execute(Command::StartEncounter {
                opponent: "Hero".into()
            }),
            Err(CommandError::UnitNotFound("Hero".into()))
        );
    }

    #[test]
    fn snapshot_restores_the_game() {
        let fixture = Fixture::new(&[]);
        let mut session = fixture.started();
        session.roster.player_mut().unwrap().place(20, 60);
        let snapshot = session.snapshot().unwrap();

        session.exit_to_menu();
        assert_eq!(session.snapshot(), Err(SnapshotError::NoGame));

        session.restore(snapshot.clone()).unwrap();
        assert_eq!(session.mode_kind(), ModeKind::Normal);
        assert_eq!(session.map().unwrap().zone(), 1);
        assert_eq!(session.roster().player().unwrap().rect.x, 20);
        assert!(session.roster().find_by_name("Nestor").is_some());
        assert_eq!(session.dialog("greet"), Some("Hi!"));
        assert!(session.sound().refresh);
        assert_eq!(session.snapshot().unwrap(), snapshot);
    }

    #[test]
    fn failed_restore_leaves_the_session_untouched() {
        let fixture = Fixture::new(&[]);
        let mut session = fixture.started();
        let good = session.snapshot().unwrap();

        let mut unknown_map = good.clone();
        unknown_map.map = "atlantis".into();
        assert!(matches!(
            session.restore(unknown_map),
            Err(SnapshotError::Oracle(OracleError::MapNotFound(_)))
        ));

        let mut bad_zone = good.clone();
        bad_zone.zone = 9;
        assert!(matches!(session.restore(bad_zone), Err(SnapshotError::Map(_))));

        let mut old = good.clone();
        old.version = 0;
        assert!(matches!(
            session.restore(old),
            Err(SnapshotError::UnsupportedVersion { found: 0, .. })
        ));

        assert_eq!(session.snapshot().unwrap(), good);
    }

    #[test]
    fn restore_rejects_shared_ids_and_off_screen_rects() {
        let fixture = Fixture::new(&[]);
        let mut session = fixture.started();
        let good = session.snapshot().unwrap();
        let player = good.player.clone().unwrap();

        let mut shared_id = good.clone();
        shared_id.units[0].id = player.id;
        assert_eq!(
            session.restore(shared_id),
            Err(SnapshotError::DuplicateId(player.id))
        );

        let mut shared_object = good.clone();
        let object = shared_object.objects[0].clone();
        shared_object.objects.push(object.clone());
        assert_eq!(
            session.restore(shared_object),
            Err(SnapshotError::DuplicateObject(object.id))
        );

        let mut off_screen = good.clone();
        off_screen.units[0].place(124, 40);
        let err = session.restore(off_screen).unwrap_err();
        assert_eq!(err, SnapshotError::OffScreen("Nestor".into()));
        assert_eq!(err.error_code(), "SNAPSHOT_OFF_SCREEN");

        // Ids still resolve to the right units.
        session
            .execute(Command::MoveUnit {
                unit: "Nestor".into(),
                direction: Direction::Left,
                distance: 4,
            })
            .unwrap();
        for _ in 0..3 {
            session.tick();
        }
        assert_eq!(session.roster().player().unwrap().rect, player.rect);
        assert_eq!(session.roster().find_by_name("Nestor").unwrap().rect.x, 56);
    }

    #[test]
    fn frame_view_exposes_what_the_renderer_draws() {
        let fixture = Fixture::new(&[]);
        let mut session = fixture.started();
        session.execute(Command::SetZone { zone: 4 }).unwrap();

        let view = session.frame_view();
        let map = view.map.unwrap();
        assert_eq!((map.zone, map.offset), (4, (128, 96)));
        assert_eq!(map.mask.size(), (128, 96));
        assert_eq!(view.units.iter().filter(|unit| unit.is_player).count(), 1);
        assert!(view.combat.is_none());
        assert_eq!(view.pacing.fps, 25);
    }

    #[test]
    fn range_checks_use_the_default_reach() {
        let fixture = Fixture::new(&[]);
        let session = fixture.started();
        assert!(session.units_in_range("Hero", "Nestor", None));
        assert!(!session.units_in_range("Hero", "Nobody", None));
    }
}
