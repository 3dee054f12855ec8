//! RNG oracle for deterministic random number generation.
//!
//! Combat rolls draw from an [`RngOracle`] through [`Dice`], which derives a
//! fresh seed for every roll from the game seed and a running nonce. Given the
//! same game seed and the same sequence of rolls, a session replays exactly.

use std::collections::VecDeque;
use std::sync::Mutex;

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a die with N sides (1-N inclusive).
    fn roll_die(&self, seed: u64, sides: u32) -> u32 {
        self.range(seed, 1, sides)
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Compute a deterministic seed for one roll.
///
/// * `game_seed` - Base seed set at game start
/// * `nonce` - Roll sequence number (increments every roll)
/// * `context` - Distinguishes independent rolls sharing a nonce
pub fn compute_seed(game_seed: u64, nonce: u64, context: u32) -> u64 {
    // SplitMix64 / FxHash style mixing
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Sequence of rolls against an oracle, advancing a caller-owned nonce.
pub struct Dice<'a> {
    oracle: &'a dyn RngOracle,
    game_seed: u64,
    nonce: &'a mut u64,
}

impl<'a> Dice<'a> {
    pub fn new(oracle: &'a dyn RngOracle, game_seed: u64, nonce: &'a mut u64) -> Self {
        Self {
            oracle,
            game_seed,
            nonce,
        }
    }

    /// Uniform integer in `[min, max]`.
    pub fn roll(&mut self, min: u32, max: u32) -> u32 {
        let seed = compute_seed(self.game_seed, *self.nonce, 0);
        *self.nonce = self.nonce.wrapping_add(1);
        self.oracle.range(seed, min, max)
    }
}

/// Oracle replaying fixed roll results, clamped into the requested range.
///
/// Once the script runs out every roll returns the range minimum. Used by
/// tests and by replays that need exact combat outcomes.
#[derive(Debug, Default)]
pub struct ScriptedRng {
    rolls: Mutex<VecDeque<u32>>,
}

impl ScriptedRng {
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rolls: Mutex::new(rolls.into_iter().collect()),
        }
    }

    pub fn push(&self, roll: u32) {
        if let Ok(mut rolls) = self.rolls.lock() {
            rolls.push_back(roll);
        }
    }

    pub fn remaining(&self) -> usize {
        self.rolls.lock().map(|rolls| rolls.len()).unwrap_or(0)
    }
}

impl RngOracle for ScriptedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        0
    }

    fn range(&self, _seed: u64, min: u32, max: u32) -> u32 {
        let next = self
            .rolls
            .lock()
            .ok()
            .and_then(|mut rolls| rolls.pop_front())
            .unwrap_or(min);
        next.clamp(min, max.max(min))
    }
}
