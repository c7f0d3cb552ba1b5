//! Durable entry storage
//!
//! The collection only needs keyed insert/update/delete and a full scan.
//! `JsonFileStore` keeps every entry in one document:
//! ```text
//! {data-dir}/
//! └── words.json    # Array of all entries, collection order
//! ```

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

use super::models::Entry;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate entry id: {0}")]
    DuplicateId(Uuid),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Keyed entry storage with last-write-wins semantics.
///
/// `update` and `delete` on an absent id succeed without doing anything;
/// callers check existence beforehand.
pub trait EntryStore {
    fn get_all(&self) -> Result<Vec<Entry>>;
    fn insert(&mut self, entry: &Entry) -> Result<()>;
    /// All or nothing: an id already stored, or repeated within `entries`,
    /// fails with `DuplicateId` and nothing is written
    fn insert_many(&mut self, entries: &[Entry]) -> Result<()>;
    fn update(&mut self, id: Uuid, entry: &Entry) -> Result<()>;
    fn delete(&mut self, id: Uuid) -> Result<()>;
}

/// Store backed by a single `words.json` file
pub struct JsonFileStore {
    /// Base path for app data (e.g., ~/.local/share/wordbox)
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Get the words.json path
    pub fn words_path(&self) -> PathBuf {
        self.data_dir.join("words.json")
    }

    /// Create the data directory and an empty words.json if needed
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;

        let words_path = self.words_path();
        if !words_path.exists() {
            self.write_all(&[])?;
            log::info!("Created empty word store at {:?}", words_path);
        }

        Ok(())
    }

    /// Replace words.json atomically (write to .tmp then rename)
    fn write_all(&self, entries: &[Entry]) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        let path = self.words_path();
        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

impl EntryStore for JsonFileStore {
    fn get_all(&self) -> Result<Vec<Entry>> {
        let words_path = self.words_path();
        if !words_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&words_path)?;
        let entries: Vec<Entry> = serde_json::from_str(&content)?;
        Ok(entries)
    }

    fn insert(&mut self, entry: &Entry) -> Result<()> {
        self.insert_many(std::slice::from_ref(entry))
    }

    fn insert_many(&mut self, new_entries: &[Entry]) -> Result<()> {
        let mut entries = self.get_all()?;

        for entry in new_entries {
            if entries.iter().any(|e| e.id == entry.id) {
                return Err(StoreError::DuplicateId(entry.id));
            }
            entries.push(entry.clone());
        }

        self.write_all(&entries)
    }

    fn update(&mut self, id: Uuid, entry: &Entry) -> Result<()> {
        let mut entries = self.get_all()?;
        match entries.iter_mut().find(|e| e.id == id) {
            Some(existing) => *existing = entry.clone(),
            None => return Ok(()),
        }
        self.write_all(&entries)
    }

    fn delete(&mut self, id: Uuid) -> Result<()> {
        let mut entries = self.get_all()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Ok(());
        }
        self.write_all(&entries)
    }
}

/// Non-durable store, useful for embedding and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Vec<Entry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntryStore for MemoryStore {
    fn get_all(&self) -> Result<Vec<Entry>> {
        Ok(self.entries.clone())
    }

    fn insert(&mut self, entry: &Entry) -> Result<()> {
        self.insert_many(std::slice::from_ref(entry))
    }

    fn insert_many(&mut self, new_entries: &[Entry]) -> Result<()> {
        // Validate the whole batch first so a rejected batch writes nothing
        for (i, entry) in new_entries.iter().enumerate() {
            let clashes = self.entries.iter().any(|e| e.id == entry.id)
                || new_entries[..i].iter().any(|e| e.id == entry.id);
            if clashes {
                return Err(StoreError::DuplicateId(entry.id));
            }
        }
        self.entries.extend_from_slice(new_entries);
        Ok(())
    }

    fn update(&mut self, id: Uuid, entry: &Entry) -> Result<()> {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.id == id) {
            *existing = entry.clone();
        }
        Ok(())
    }

    fn delete(&mut self, id: Uuid) -> Result<()> {
        self.entries.retain(|e| e.id != id);
        Ok(())
    }
}
