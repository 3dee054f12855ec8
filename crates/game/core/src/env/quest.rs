use std::fmt;

use crate::command::Command;

/// Identifies the command script for one map location.
///
/// `zone == 0` addresses the map-wide script; `interior == 0` the exterior of
/// the zone.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestKey {
    pub map: String,
    pub quest: u32,
    pub zone: u32,
    pub interior: u8,
}

impl QuestKey {
    pub fn new(map: impl Into<String>, quest: u32, zone: u32, interior: u8) -> Self {
        Self {
            map: map.into(),
            quest,
            zone,
            interior,
        }
    }

    /// Script stem: `MAP_quest`, `MAP_quest_zone` or `MAP_quest_zone_interior`.
    ///
    /// An interior is only encoded together with a zone.
    pub fn stem(&self) -> String {
        let mut stem = format!("{}_{}", self.map, self.quest);
        if self.zone != 0 {
            stem.push_str(&format!("_{}", self.zone));
            if self.interior != 0 {
                stem.push_str(&format!("_{}", self.interior));
            }
        }
        stem
    }
}

impl fmt::Display for QuestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stem())
    }
}

/// Source of quest command scripts.
pub trait QuestOracle: Send + Sync {
    /// Commands for `key`; an absent script yields no commands.
    fn commands(&self, key: &QuestKey) -> Vec<Command>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_encodes_zone_and_interior() {
        assert_eq!(QuestKey::new("Island", 0, 0, 0).stem(), "Island_0");
        assert_eq!(QuestKey::new("Island", 0, 3, 0).stem(), "Island_0_3");
        assert_eq!(QuestKey::new("Island", 1, 3, 2).stem(), "Island_1_3_2");
        assert_eq!(QuestKey::new("Island", 1, 0, 2).stem(), "Island_1");
    }
}
