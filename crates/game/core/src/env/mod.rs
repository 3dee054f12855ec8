//! Traits describing read-only game data.
//!
//! Oracles expose map images, quest command scripts, unit templates and the
//! random source. The [`Env`] aggregate bundles them so the session can reach
//! everything it needs without hard coupling to concrete loaders.
mod error;
mod map;
mod quest;
mod rng;
mod units;

pub use error::OracleError;
pub use map::MapOracle;
pub use quest::{QuestKey, QuestOracle};
pub use rng::{Dice, PcgRng, RngOracle, ScriptedRng, compute_seed};
pub use units::{UnitOracle, UnitTemplate, UnitTemplateBuilder};

/// Aggregates read-only oracles required by the session.
pub struct Env<'a, M, Q, U, R>
where
    M: MapOracle + ?Sized,
    Q: QuestOracle + ?Sized,
    U: UnitOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    maps: Option<&'a M>,
    quests: Option<&'a Q>,
    units: Option<&'a U>,
    rng: Option<&'a R>,
}

// Copy for any oracle type, trait objects included.
impl<M, Q, U, R> Clone for Env<'_, M, Q, U, R>
where
    M: MapOracle + ?Sized,
    Q: QuestOracle + ?Sized,
    U: UnitOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, Q, U, R> Copy for Env<'_, M, Q, U, R>
where
    M: MapOracle + ?Sized,
    Q: QuestOracle + ?Sized,
    U: UnitOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type GameEnv<'a> =
    Env<'a, dyn MapOracle + 'a, dyn QuestOracle + 'a, dyn UnitOracle + 'a, dyn RngOracle + 'a>;

impl<'a, M, Q, U, R> Env<'a, M, Q, U, R>
where
    M: MapOracle + ?Sized,
    Q: QuestOracle + ?Sized,
    U: UnitOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        maps: Option<&'a M>,
        quests: Option<&'a Q>,
        units: Option<&'a U>,
        rng: Option<&'a R>,
    ) -> Self {
        Self {
            maps,
            quests,
            units,
            rng,
        }
    }

    pub fn with_all(maps: &'a M, quests: &'a Q, units: &'a U, rng: &'a R) -> Self {
        Self::new(Some(maps), Some(quests), Some(units), Some(rng))
    }

    pub fn empty() -> Self {
        Self {
            maps: None,
            quests: None,
            units: None,
            rng: None,
        }
    }

    /// Returns the MapOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::MapsNotAvailable` if no map oracle was provided.
    pub fn maps(&self) -> Result<&'a M, OracleError> {
        self.maps.ok_or(OracleError::MapsNotAvailable)
    }

    /// Returns the QuestOracle, or an error if not available.
    pub fn quests(&self) -> Result<&'a Q, OracleError> {
        self.quests.ok_or(OracleError::QuestsNotAvailable)
    }

    /// Returns the UnitOracle, or an error if not available.
    pub fn units(&self) -> Result<&'a U, OracleError> {
        self.units.ok_or(OracleError::UnitsNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, M, Q, U, R> Env<'a, M, Q, U, R>
where
    M: MapOracle + 'a,
    Q: QuestOracle + 'a,
    U: UnitOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv`.
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let maps: Option<&'a dyn MapOracle> = self.maps.map(|maps| maps as _);
        let quests: Option<&'a dyn QuestOracle> = self.quests.map(|quests| quests as _);
        let units: Option<&'a dyn UnitOracle> = self.units.map(|units| units as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(maps, quests, units, rng)
    }
}
