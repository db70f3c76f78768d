/// How an activity is presented next to the bot's name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Playing,
    Listening,
    Watching,
}

/// A displayed status entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub name: String,
    pub kind: ActivityKind,
}

impl Activity {
    pub fn playing(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: ActivityKind::Playing }
    }

    pub fn listening(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: ActivityKind::Listening }
    }

    pub fn watching(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: ActivityKind::Watching }
    }

    /// The activities the bot cycles through
    pub fn defaults() -> Vec<Activity> {
        vec![
            Activity::playing("Krydder the game"),
            Activity::listening("the sound of oregano"),
            Activity::watching("Svømmer i Oregano"),
            Activity::watching("You"),
        ]
    }
}
