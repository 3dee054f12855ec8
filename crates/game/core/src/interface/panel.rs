/// Dialog line typed out one character per reveal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogPanel {
    speaker: String,
    line: Vec<char>,
    revealed: usize,
    frames: u32,
}

impl DialogPanel {
    pub fn new(speaker: impl Into<String>, line: &str) -> Self {
        Self {
            speaker: speaker.into(),
            line: line.chars().collect(),
            revealed: 0,
            frames: 0,
        }
    }

    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    /// `"<speaker>: "` followed by the revealed part of the line.
    pub fn content(&self) -> String {
        let mut content = format!("{}: ", self.speaker);
        content.extend(&self.line[..self.revealed]);
        content
    }

    pub fn is_complete(&self) -> bool {
        self.revealed >= self.line.len()
    }

    pub fn reveal_next(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.revealed += 1;
        true
    }

    /// Advances one frame; a character is revealed every `reveal_frames` frames.
    pub fn tick(&mut self, reveal_frames: u32) {
        self.frames += 1;
        if self.frames >= reveal_frames.max(1) {
            self.frames = 0;
            self.reveal_next();
        }
    }
}
