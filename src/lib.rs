pub mod calendar;
pub mod settings;
pub mod vocab;

pub use calendar::{Clock, DueDate, FixedClock, LocalClock};
pub use settings::{Settings, SettingsError};
pub use vocab::{
    Entry, EntryStore, JsonFileStore, MemoryStore, Outcome, ReviewSession, VocabError, Vocabulary,
};
