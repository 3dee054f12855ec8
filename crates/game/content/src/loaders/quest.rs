//! Quest script loader.
//!
//! A quest file `quests/{MAP}_{quest}[_{zone}[_{interior}]].ron` holds one
//! [`QuestScript`]. Its optional dialog file is read from the texts directory
//! and registered before the script's own commands.

use std::path::Path;

use isle_core::{COMMAND_SET_VERSION, Command};
use serde::{Deserialize, Serialize};

use crate::catalog::QuestBook;
use crate::loaders::{DialogLoader, LoadResult, read_file};

/// Quest file structure for RON files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestScript {
    /// Command-set version the script was written against.
    pub version: u32,
    /// Dialog text file registered ahead of the commands.
    #[serde(default)]
    pub dialogs: Option<String>,
    #[serde(default)]
    pub commands: Vec<Command>,
}

/// Loader for quest command scripts.
pub struct QuestLoader;

impl QuestLoader {
    /// Parse a quest script and check its command-set version.
    pub fn parse(content: &str) -> LoadResult<QuestScript> {
        let script: QuestScript = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse quest RON: {}", e))?;

        if script.version != COMMAND_SET_VERSION {
            anyhow::bail!(
                "Quest script targets command set version {}, expected {}",
                script.version,
                COMMAND_SET_VERSION
            );
        }
        Ok(script)
    }

    /// Load one quest file, resolving its dialog file against `texts_dir`.
    pub fn load(path: &Path, texts_dir: &Path) -> LoadResult<Vec<Command>> {
        let content = read_file(path)?;
        let script = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Quest {}: {}", path.display(), e))?;

        let mut commands = match &script.dialogs {
            Some(file) => DialogLoader::commands(&texts_dir.join(file))?,
            None => Vec::new(),
        };
        commands.extend(script.commands);
        Ok(commands)
    }

    /// Load every `*.ron` file of `quests_dir` into a quest book keyed by file stem.
    pub fn load_dir(quests_dir: &Path, texts_dir: &Path) -> LoadResult<QuestBook> {
        let entries = std::fs::read_dir(quests_dir).map_err(|e| {
            anyhow::anyhow!("Failed to read quest directory {}: {}", quests_dir.display(), e)
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "ron") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut book = QuestBook::new();
        for path in paths {
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                anyhow::bail!("Quest file name {} is not valid UTF-8", path.display());
            };
            let commands = Self::load(&path, texts_dir)?;
            book.insert(stem, commands);
        }
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use isle_core::{Direction, ItemKind, QuestKey, QuestOracle};

    use super::*;

    const START: &str = r#"(
        version: 1,
        dialogs: Some("isle.txt"),
        commands: [
            SetMap(map: "isle"),
            SpawnUnit(template: (name: "Hero", size: (32, 48)), x: 40, y: 60),
            SetPlayer(unit: "Hero"),
            SpawnItem(kind: Medicine, x: 100, y: 60, tag: Some("herb")),
            MoveUnitSteps(unit: "Hero", direction: Right, steps: 2),
        ],
    )"#;

    #[test]
    fn scripts_parse_into_commands() {
        let script = QuestLoader::parse(START).unwrap();
        assert_eq!(script.dialogs.as_deref(), Some("isle.txt"));
        assert_eq!(script.commands.len(), 5);
        assert_eq!(
            script.commands[3],
            Command::SpawnItem {
                kind: ItemKind::Medicine,
                x: 100,
                y: 60,
                tag: Some("herb".into()),
                fixed: false,
            }
        );
        assert_eq!(
            script.commands[4],
            Command::MoveUnitSteps {
                unit: "Hero".into(),
                direction: Direction::Right,
                steps: 2,
            }
        );
    }

    #[test]
    fn other_versions_are_rejected() {
        let error = QuestLoader::parse("(version: 2, commands: [])").unwrap_err();
        assert!(error.to_string().contains("version 2"));
    }

    #[test]
    fn directory_scripts_register_their_dialogs_first() {
        let dir = tempfile::tempdir().unwrap();
        let quests = dir.path().join("quests");
        let texts = dir.path().join("texts");
        fs::create_dir_all(&quests).unwrap();
        fs::create_dir_all(&texts).unwrap();
        fs::write(quests.join("isle_0.ron"), START).unwrap();
        fs::write(
            quests.join("isle_0_1.ron"),
            r#"(version: 1, commands: [SetSound(name: "birds.ogg")])"#,
        )
        .unwrap();
        fs::write(quests.join("notes.txt"), "not a script").unwrap();
        fs::write(texts.join("isle.txt"), "# greet\n> Hello!\n").unwrap();

        let book = QuestLoader::load_dir(&quests, &texts).unwrap();
        assert_eq!(book.len(), 2);

        let start = book.commands(&QuestKey::new("isle", 0, 0, 0));
        assert_eq!(
            start[0],
            Command::RegisterDialog {
                id: "greet".into(),
                line: "Hello!".into(),
            }
        );
        assert_eq!(start[1], Command::SetMap { map: "isle".into() });
        assert_eq!(book.commands(&QuestKey::new("isle", 0, 1, 0)).len(), 1);
    }

    #[test]
    fn missing_dialog_files_fail_the_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("isle_0.ron"), START).unwrap();
        assert!(QuestLoader::load_dir(dir.path(), dir.path()).is_err());
    }
}
