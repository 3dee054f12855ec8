//! Dialog text loader.
//!
//! A dialog file holds `(id, line)` pairs on two consecutive lines:
//!
//! ```text
//! # greet
//! > Welcome to the island, stranger.
//! # warn
//! > The cyclops sleeps in the cave to the north.
//! ```
//!
//! Blank lines between entries are ignored.

use std::path::Path;

use isle_core::Command;

use crate::loaders::{LoadResult, read_file};

const ID_MARKER: &str = "# ";
const LINE_MARKER: &str = "> ";

/// Loader for dialog text files.
pub struct DialogLoader;

impl DialogLoader {
    /// Load `(id, line)` pairs in file order.
    pub fn load(path: &Path) -> LoadResult<Vec<(String, String)>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse dialog file {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<(String, String)>> {
        let mut dialogs = Vec::new();
        let mut lines = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        while let Some((number, id_line)) = lines.next() {
            let id = id_line
                .strip_prefix(ID_MARKER)
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .ok_or_else(|| anyhow::anyhow!("line {}: expected '# <id>'", number + 1))?;
            let (number, text_line) = lines
                .next()
                .ok_or_else(|| anyhow::anyhow!("line {}: dialog '{}' has no text", number + 1, id))?;
            let text = text_line
                .strip_prefix(LINE_MARKER)
                .ok_or_else(|| anyhow::anyhow!("line {}: expected '> <text>'", number + 1))?;
            dialogs.push((id.to_owned(), text.trim_end().to_owned()));
        }

        Ok(dialogs)
    }

    /// `RegisterDialog` commands for every entry of the file.
    pub fn commands(path: &Path) -> LoadResult<Vec<Command>> {
        Ok(Self::load(path)?
            .into_iter()
            .map(|(id, line)| Command::RegisterDialog { id, line })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_keep_file_order() {
        let dialogs = DialogLoader::parse(
            "# greet\n> Welcome, stranger.\n\n# warn\n> Beware the cave.  \n",
        )
        .unwrap();
        assert_eq!(
            dialogs,
            [
                ("greet".to_owned(), "Welcome, stranger.".to_owned()),
                ("warn".to_owned(), "Beware the cave.".to_owned()),
            ]
        );
    }

    #[test]
    fn malformed_entries_name_the_line() {
        let missing_text = DialogLoader::parse("# greet\n").unwrap_err();
        assert!(missing_text.to_string().contains("line 1"));

        let bad_marker = DialogLoader::parse("# greet\nWelcome\n").unwrap_err();
        assert!(bad_marker.to_string().contains("line 2"));

        assert!(DialogLoader::parse("#\n> text\n").is_err());
    }
}
