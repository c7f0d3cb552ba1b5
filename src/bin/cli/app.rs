use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use wordbox_lib::settings::Settings;
use wordbox_lib::vocab::{Entry, JsonFileStore, VocabError, Vocabulary};

/// Shared application state for CLI commands
pub struct App {
    pub data_dir: PathBuf,
    pub settings: Settings,
    pub vocab: Vocabulary<JsonFileStore>,
}

impl App {
    /// Initialize from the given or default data directory
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => Settings::default_data_dir().context("Failed to get data directory")?,
        };

        let store = JsonFileStore::new(data_dir.clone());
        store.init().context("Failed to initialize word store")?;

        let settings = Settings::load(&data_dir).context("Failed to load settings")?;
        let vocab = Vocabulary::load(store).context("Failed to load words")?;

        Ok(Self {
            data_dir,
            settings,
            vocab,
        })
    }

    /// Find an entry by word (case-insensitive), then by id prefix
    pub fn find_entry(&self, query: &str) -> Result<Entry> {
        if let Some(entry) = self.vocab.find_word(query) {
            return Ok(entry.clone());
        }

        let prefix = query.trim().to_lowercase();
        let matches: Vec<&Entry> = self
            .vocab
            .entries()
            .iter()
            .filter(|e| !prefix.is_empty() && e.id.to_string().starts_with(&prefix))
            .collect();

        match matches.len() {
            0 => bail!("No word matching '{}'", query),
            1 => Ok(matches[0].clone()),
            _ => bail!("Ambiguous id prefix '{}'. Matches:\n{}", query,
                matches.iter().map(|e| format!("  - {} ({})", e.word, e.id)).collect::<Vec<_>>().join("\n")),
        }
    }

    pub fn save_settings(&self) -> Result<()> {
        self.settings.save(&self.data_dir).context("Failed to save settings")
    }
}

/// Turn a benign "not found" into a message, everything else into an error
pub fn report_not_found<T>(result: std::result::Result<T, VocabError>, what: &str) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => {
            eprintln!("Nothing to do: {} is not available", what);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_entry_reports_query_as_typed() {
        let temp = TempDir::new().unwrap();
        let mut app = App::new(Some(temp.path().to_path_buf())).unwrap();
        let fig = app.vocab.add("fig", "a ripe fig").unwrap();

        assert_eq!(app.find_entry("  FIG ").unwrap().id, fig.id);
        assert_eq!(app.find_entry(&fig.id.to_string()[..8]).unwrap().id, fig.id);

        let err = app.find_entry("  Quince ").unwrap_err();
        assert_eq!(err.to_string(), "No word matching '  Quince '");
    }
}
