/// Foot currently forward in the walk cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum Stride {
    #[default]
    Idle,
    Left,
    Right,
}

/// Frame counter driving a unit's walk cycle.
///
/// The spritesheet holds three columns per facing row: neutral, left foot,
/// right foot. Feet alternate at counts 0, 10, 20 and 30, the neutral column
/// shows at 5, 15 and 25, and the counter wraps once it passes 30.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkAnimation {
    counter: u32,
    stride: Stride,
    column: u8,
}

impl WalkAnimation {
    pub const NEUTRAL: u8 = 0;
    const WRAP: u32 = 30;

    /// Spritesheet column of the current frame.
    pub fn column(&self) -> u8 {
        self.column
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn advance(&mut self) {
        match self.counter {
            0 | 10 | 20 | 30 => {
                (self.column, self.stride) = match self.stride {
                    Stride::Idle | Stride::Right => (1, Stride::Left),
                    Stride::Left => (2, Stride::Right),
                };
            }
            5 | 15 | 25 => self.column = Self::NEUTRAL,
            n if n > Self::WRAP => self.counter = 0,
            _ => {}
        }
        self.counter += 1;
    }

    /// Shows the neutral column and restarts the cycle.
    pub fn stop(&mut self) {
        self.column = Self::NEUTRAL;
        self.counter = 0;
        self.stride = Stride::Idle;
    }
}
