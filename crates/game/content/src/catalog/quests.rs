use std::collections::BTreeMap;

use isle_core::{Command, QuestKey, QuestOracle};

/// Quest command scripts keyed by their stem (`MAP_quest[_zone[_interior]]`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestBook {
    scripts: BTreeMap<String, Vec<Command>>,
}

impl QuestBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, stem: impl Into<String>, commands: Vec<Command>) {
        self.scripts.insert(stem.into(), commands);
    }

    pub fn with_script(mut self, key: &QuestKey, commands: Vec<Command>) -> Self {
        self.insert(key.stem(), commands);
        self
    }

    pub fn script(&self, stem: &str) -> Option<&[Command]> {
        self.scripts.get(stem).map(Vec::as_slice)
    }

    pub fn stems(&self) -> impl Iterator<Item = &str> {
        self.scripts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}

impl QuestOracle for QuestBook {
    fn commands(&self, key: &QuestKey) -> Vec<Command> {
        self.scripts.get(&key.stem()).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_scripts_are_empty() {
        let zone = QuestKey::new("isle", 0, 2, 0);
        let book = QuestBook::new().with_script(
            &zone,
            vec![Command::SetSound {
                name: "birds.ogg".into(),
            }],
        );

        assert_eq!(book.commands(&zone).len(), 1);
        assert!(book.commands(&QuestKey::new("isle", 0, 2, 1)).is_empty());
        assert!(book.commands(&QuestKey::new("isle", 1, 2, 0)).is_empty());
        assert_eq!(book.stems().collect::<Vec<_>>(), ["isle_0_2"]);
    }
}
