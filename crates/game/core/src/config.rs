/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Width of the viewport (and of every zone) in pixels.
    pub viewport_width: u32,
    /// Height of the viewport (and of every zone) in pixels.
    pub viewport_height: u32,
    /// Distance from a viewport edge at which the player crosses into the next zone.
    pub edge_margin: i32,
    /// Frame rates for the two pacing levels.
    pub frame_rates: FrameRates,
    /// Key-repeat cadence used while moving freely.
    pub key_repeat: KeyRepeat,
    /// Offset of the second solid-mask sample, as a fraction of the unit height.
    pub obstruction_offset: ObstructionOffset,
    /// Cell size of the entry-strip scan.
    pub entry_cell: u32,
    /// Frames the opponent waits before answering the player's combat action.
    pub opponent_delay_frames: u32,
    /// Frames between two revealed characters of a dialog line.
    pub dialog_reveal_frames: u32,
    /// Distance probed in front of the player when picking items up.
    pub pickup_reach: i32,
}

impl GameConfig {
    // ===== compile-time constants =====
    pub const MAX_ZONES: u32 = 16;
    pub const MAX_HEALTH: u32 = 100;
    pub const MAX_NAME_LEN: usize = 15;
    /// Upper bound on a unit's per-step speed in pixels.
    pub const MAX_UNIT_SPEED: u32 = 32;
    pub const MAX_MENU_CONTROLS: usize = 8;
    pub const DEFAULT_UNIT_RANGE: i32 = 48;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1024;
    pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 768;
    pub const DEFAULT_EDGE_MARGIN: i32 = 16;
    pub const DEFAULT_ENTRY_CELL: u32 = 16;
    pub const DEFAULT_OPPONENT_DELAY_FRAMES: u32 = 25;

    pub fn new() -> Self {
        Self {
            viewport_width: Self::DEFAULT_VIEWPORT_WIDTH,
            viewport_height: Self::DEFAULT_VIEWPORT_HEIGHT,
            edge_margin: Self::DEFAULT_EDGE_MARGIN,
            frame_rates: FrameRates::default(),
            key_repeat: KeyRepeat::default(),
            obstruction_offset: ObstructionOffset::default(),
            entry_cell: Self::DEFAULT_ENTRY_CELL,
            opponent_delay_frames: Self::DEFAULT_OPPONENT_DELAY_FRAMES,
            dialog_reveal_frames: 1,
            pickup_reach: 1,
        }
    }

    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    pub fn with_opponent_delay(mut self, frames: u32) -> Self {
        self.opponent_delay_frames = frames;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameRates {
    pub normal: u32,
    pub slow: u32,
}

impl Default for FrameRates {
    fn default() -> Self {
        Self { normal: 25, slow: 5 }
    }
}

/// Key-repeat cadence handed to the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyRepeat {
    pub delay_ms: u32,
    pub interval_ms: u32,
}

impl Default for KeyRepeat {
    fn default() -> Self {
        Self {
            delay_ms: 1,
            interval_ms: 5,
        }
    }
}

/// Rational offset used by the two-point obstruction sample.
///
/// The default of 2/3 reproduces `height // 1.5` exactly for integer heights.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstructionOffset {
    pub numerator: u32,
    pub denominator: u32,
}

impl ObstructionOffset {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Offset in pixels for a unit of the given height.
    pub fn of(&self, height: u32) -> i32 {
        if self.denominator == 0 {
            return 0;
        }
        ((height as u64 * self.numerator as u64) / self.denominator as u64) as i32
    }
}

impl Default for ObstructionOffset {
    fn default() -> Self {
        Self::new(2, 3)
    }
}
