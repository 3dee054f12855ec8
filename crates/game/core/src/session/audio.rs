/// Named ambient track plus a flag asking the renderer to (re)start it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AudioCue {
    pub name: String,
    pub refresh: bool,
}

impl AudioCue {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            refresh: true,
        }
    }

    /// Switches to `name`; the refresh flag is raised only when the name changes.
    pub fn set(&mut self, name: &str) -> bool {
        if self.name == name {
            return false;
        }
        self.name = name.to_owned();
        self.refresh = true;
        true
    }

    /// Forces a restart of the current track.
    pub fn request_refresh(&mut self) {
        self.refresh = true;
    }

    pub fn acknowledge(&mut self) {
        self.refresh = false;
    }
}
