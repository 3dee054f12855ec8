use std::collections::BTreeSet;

/// Progress through the current map's quest line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestProgress {
    /// Quest number used to select command scripts.
    pub quest: u32,
    /// Tags of items already picked up; they are not spawned again.
    pub collected: BTreeSet<String>,
}

impl QuestProgress {
    pub fn new(quest: u32) -> Self {
        Self {
            quest,
            collected: BTreeSet::new(),
        }
    }

    pub fn mark_collected(&mut self, tag: impl Into<String>) {
        self.collected.insert(tag.into());
    }

    pub fn is_collected(&self, tag: &str) -> bool {
        self.collected.contains(tag)
    }
}
