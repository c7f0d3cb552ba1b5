//! In-memory mirror of the entry store
//!
//! `Vocabulary` holds the whole collection in memory, loaded from the store
//! once and kept in step with it afterwards. Every mutation writes to the
//! store first and touches the mirror only after the write succeeded, so a
//! failed write leaves the mirror unchanged.
//!
//! Operations run one at a time; callers serialize user actions.

use chrono::NaiveDate;
use uuid::Uuid;

use super::error::{ValidationError, VocabError, VocabResult};
use super::exchange;
use super::models::*;
use super::scheduler;
use super::store::EntryStore;
use crate::calendar::{Clock, LocalClock};

pub struct Vocabulary<S: EntryStore> {
    store: S,
    entries: Vec<Entry>,
    clock: Box<dyn Clock>,
}

impl<S: EntryStore> Vocabulary<S> {
    /// Load the collection from `store`, using the local calendar
    pub fn load(store: S) -> VocabResult<Self> {
        Self::load_with_clock(store, Box::new(LocalClock))
    }

    pub fn load_with_clock(store: S, clock: Box<dyn Clock>) -> VocabResult<Self> {
        let entries = store.get_all()?;
        log::info!("Loaded {} vocabulary entries", entries.len());
        Ok(Self {
            store,
            entries,
            clock,
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// All entries in collection order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Case-insensitive lookup by word
    pub fn find_word(&self, word: &str) -> Option<&Entry> {
        let key = normalize_word(word);
        self.entries.iter().find(|e| e.normalized_word() == key)
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.find_word(word).is_some()
    }

    fn position(&self, id: Uuid) -> VocabResult<usize> {
        self.entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(VocabError::NotFound(id))
    }

    /// Trim and check word/context; `exclude` is the entry being edited
    fn validate(&self, word: &str, context: &str, exclude: Option<Uuid>) -> Result<(String, String), ValidationError> {
        let word = word.trim();
        let context = context.trim();

        if word.is_empty() {
            return Err(ValidationError::EmptyWord);
        }
        if context.is_empty() {
            return Err(ValidationError::EmptyContext);
        }

        let key = normalize_word(word);
        let collides = self
            .entries
            .iter()
            .any(|e| Some(e.id) != exclude && e.normalized_word() == key);
        if collides {
            return Err(ValidationError::DuplicateWord(word.to_string()));
        }

        Ok((word.to_string(), context.to_string()))
    }

    // ==================== Editing ====================

    /// Add a new word in box 1, due today
    pub fn add(&mut self, word: &str, context: &str) -> VocabResult<Entry> {
        let (word, context) = self.validate(word, context, None)?;
        let entry = Entry::new(word, context, self.today());

        if let Err(e) = self.store.insert(&entry) {
            log::warn!("Failed to add word {:?}: {}", entry.word, e);
            return Err(e.into());
        }

        self.entries.push(entry.clone());
        Ok(entry)
    }

    /// Change the word and context of an entry; learning state is untouched
    pub fn update_word(&mut self, id: Uuid, word: &str, context: &str) -> VocabResult<Entry> {
        let pos = self.position(id)?;
        let (word, context) = self.validate(word, context, Some(id))?;

        let updated = Entry {
            word,
            context,
            ..self.entries[pos].clone()
        };

        if let Err(e) = self.store.update(id, &updated) {
            log::warn!("Failed to update word {}: {}", id, e);
            return Err(e.into());
        }

        self.entries[pos] = updated.clone();
        Ok(updated)
    }

    pub fn delete(&mut self, id: Uuid) -> VocabResult<Entry> {
        let pos = self.position(id)?;

        if let Err(e) = self.store.delete(id) {
            log::warn!("Failed to delete word {}: {}", id, e);
            return Err(e.into());
        }

        Ok(self.entries.remove(pos))
    }

    // ==================== Review ====================

    /// Apply a review outcome.
    ///
    /// An unknown id, or any outcome on a mastered entry, is `NotFound`.
    pub fn record_outcome(&mut self, id: Uuid, outcome: Outcome) -> VocabResult<Entry> {
        let pos = self.position(id)?;
        let today = self.today();

        let updated = scheduler::apply_outcome(&self.entries[pos], outcome, today)
            .ok_or(VocabError::NotFound(id))?;

        if let Err(e) = self.store.update(id, &updated) {
            log::warn!("Failed to record {:?} for {}: {}", outcome, id, e);
            return Err(e.into());
        }

        log::debug!(
            "{:?}: {:?} box {} -> {}, next review {}",
            outcome,
            updated.word,
            self.entries[pos].box_number,
            updated.box_number,
            updated.next_review
        );
        self.entries[pos] = updated.clone();
        Ok(updated)
    }

    pub fn recall_success(&mut self, id: Uuid) -> VocabResult<Entry> {
        self.record_outcome(id, Outcome::Recalled)
    }

    pub fn recall_failure(&mut self, id: Uuid) -> VocabResult<Entry> {
        self.record_outcome(id, Outcome::Forgotten)
    }

    pub fn mark_mastered(&mut self, id: Uuid) -> VocabResult<Entry> {
        self.record_outcome(id, Outcome::Mastered)
    }

    /// Snapshot of entries due today
    pub fn due_session(&self, daily_limit: Option<usize>) -> ReviewSession {
        let day = self.today();
        ReviewSession {
            day,
            entries: scheduler::select_due(&self.entries, day, daily_limit),
        }
    }

    // ==================== Queries ====================

    /// Case-insensitive substring search over word and context
    pub fn search(&self, query: &str) -> Vec<&Entry> {
        let query = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                e.word.to_lowercase().contains(&query) || e.context.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn stats(&self) -> VocabStats {
        let today = self.today();
        let mut stats = VocabStats {
            total_entries: self.entries.len(),
            ..VocabStats::default()
        };

        for entry in &self.entries {
            if (FIRST_BOX..=MASTERED_BOX).contains(&entry.box_number) {
                stats.per_box[(entry.box_number - 1) as usize] += 1;
            }
            if entry.is_mastered() {
                stats.mastered += 1;
            }
            if entry.is_due(today) {
                stats.due_today += 1;
            }
            match entry.last_reviewed {
                None => stats.never_reviewed += 1,
                Some(day) if day == today => stats.reviewed_today += 1,
                Some(_) => {}
            }
        }

        stats
    }

    // ==================== Exchange ====================

    pub fn export_full(&self) -> VocabResult<String> {
        exchange::export_full(&self.entries)
    }

    pub fn export_words_only(&self) -> VocabResult<String> {
        exchange::export_words_only(&self.entries)
    }

    /// Merge an exported batch into the collection.
    ///
    /// A malformed payload or a failed store write adds nothing. Zero new
    /// entries (all duplicates) is still a success.
    pub fn import_batch(&mut self, raw: &str) -> VocabResult<ImportReport> {
        let candidates = exchange::parse_batch(raw)?;
        let (added, skipped) = exchange::merge_candidates(&self.entries, candidates, self.today());

        if !added.is_empty() {
            if let Err(e) = self.store.insert_many(&added) {
                log::warn!("Failed to import {} words: {}", added.len(), e);
                return Err(e.into());
            }
        }

        log::info!("Imported {} words, skipped {} duplicates", added.len(), skipped);
        let report = ImportReport {
            added: added.len(),
            skipped,
        };
        self.entries.extend(added);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{add_days, parse_day, DueDate, FixedClock};
    use crate::vocab::store::{JsonFileStore, MemoryStore, Result as StoreResult, StoreError};
    use tempfile::TempDir;

    fn day(s: &str) -> NaiveDate {
        parse_day(s).unwrap()
    }

    fn vocab_on(today: &str) -> Vocabulary<MemoryStore> {
        Vocabulary::load_with_clock(MemoryStore::new(), Box::new(FixedClock(day(today)))).unwrap()
    }

    /// Store whose writes can be switched off
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        failing: bool,
    }

    impl FlakyStore {
        fn check(&self) -> StoreResult<()> {
            if self.failing {
                return Err(StoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full")));
            }
            Ok(())
        }
    }

    impl EntryStore for FlakyStore {
        fn get_all(&self) -> StoreResult<Vec<Entry>> {
            self.inner.get_all()
        }

        fn insert(&mut self, entry: &Entry) -> StoreResult<()> {
            self.check()?;
            self.inner.insert(entry)
        }

        fn insert_many(&mut self, entries: &[Entry]) -> StoreResult<()> {
            self.check()?;
            self.inner.insert_many(entries)
        }

        fn update(&mut self, id: Uuid, entry: &Entry) -> StoreResult<()> {
            self.check()?;
            self.inner.update(id, entry)
        }

        fn delete(&mut self, id: Uuid) -> StoreResult<()> {
            self.check()?;
            self.inner.delete(id)
        }
    }

    #[test]
    fn test_add_validates_input() {
        let mut vocab = vocab_on("2024-03-10");

        let entry = vocab.add("  Apricot ", " a ripe apricot ").unwrap();
        assert_eq!(entry.word, "Apricot");
        assert_eq!(entry.context, "a ripe apricot");

        assert!(matches!(
            vocab.add("   ", "ctx"),
            Err(VocabError::Validation(ValidationError::EmptyWord))
        ));
        assert!(matches!(
            vocab.add("plum", ""),
            Err(VocabError::Validation(ValidationError::EmptyContext))
        ));
        assert!(matches!(
            vocab.add("APRICOT", "again"),
            Err(VocabError::Validation(ValidationError::DuplicateWord(_)))
        ));
        assert_eq!(vocab.len(), 1);
        assert!(vocab.contains_word("apricot"));
    }

    #[test]
    fn test_update_word_keeps_learning_state() {
        let mut vocab = vocab_on("2024-03-10");
        let fig = vocab.add("fig", "a fig").unwrap();
        vocab.add("date", "a date").unwrap();
        let reviewed = vocab.recall_success(fig.id).unwrap();

        let renamed = vocab.update_word(fig.id, "Fig", "a green fig").unwrap();
        assert_eq!(renamed.word, "Fig");
        assert_eq!(renamed.box_number, reviewed.box_number);
        assert_eq!(renamed.next_review, reviewed.next_review);
        assert_eq!(renamed.last_reviewed, reviewed.last_reviewed);

        assert!(matches!(
            vocab.update_word(fig.id, "DATE", "clash"),
            Err(VocabError::Validation(ValidationError::DuplicateWord(_)))
        ));
        assert!(vocab.update_word(Uuid::new_v4(), "kiwi", "x").unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete() {
        let mut vocab = vocab_on("2024-03-10");
        let fig = vocab.add("fig", "a fig").unwrap();

        vocab.delete(fig.id).unwrap();
        assert!(vocab.is_empty());
        assert!(vocab.delete(fig.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_transitions_update_mirror_and_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().to_path_buf());
        let clock = FixedClock(day("2024-03-10"));
        let mut vocab = Vocabulary::load_with_clock(store, Box::new(clock)).unwrap();

        let plum = vocab.add("plum", "a plum").unwrap();
        let after = vocab.recall_success(plum.id).unwrap();
        assert_eq!(after.box_number, 2);
        assert_eq!(after.next_review, DueDate::On(day("2024-03-12")));
        assert_eq!(after.last_reviewed, Some(day("2024-03-10")));

        let reset = vocab.recall_failure(plum.id).unwrap();
        assert_eq!(reset.box_number, 1);
        assert_eq!(reset.next_review, DueDate::On(day("2024-03-11")));

        let reloaded = Vocabulary::load_with_clock(
            JsonFileStore::new(temp_dir.path().to_path_buf()),
            Box::new(clock),
        )
        .unwrap();
        assert_eq!(reloaded.entries(), vocab.entries());
    }

    #[test]
    fn test_mastered_entry_is_retired() {
        let mut vocab = vocab_on("2024-03-10");
        let kiwi = vocab.add("kiwi", "a kiwi").unwrap();

        let mastered = vocab.mark_mastered(kiwi.id).unwrap();
        assert_eq!(mastered.box_number, MASTERED_BOX);
        assert_eq!(mastered.next_review, DueDate::Never);
        assert!(vocab.due_session(None).is_empty());

        assert!(vocab.recall_success(kiwi.id).unwrap_err().is_not_found());
        assert!(vocab.recall_failure(kiwi.id).unwrap_err().is_not_found());
        assert!(vocab.mark_mastered(kiwi.id).unwrap_err().is_not_found());
        assert_eq!(vocab.get(kiwi.id), Some(&mastered));
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let mut vocab = vocab_on("2024-03-10");
        let err = vocab.recall_success(Uuid::new_v4()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_failed_write_leaves_mirror_unchanged() {
        let store = FlakyStore::default();
        let clock = FixedClock(day("2024-03-10"));
        let mut vocab = Vocabulary::load_with_clock(store, Box::new(clock)).unwrap();
        let fig = vocab.add("fig", "a fig").unwrap();
        let before = vocab.entries().to_vec();

        vocab.store.failing = true;

        assert!(matches!(vocab.add("plum", "a plum"), Err(VocabError::Storage(_))));
        assert!(matches!(vocab.recall_success(fig.id), Err(VocabError::Storage(_))));
        assert!(matches!(vocab.update_word(fig.id, "figs", "x"), Err(VocabError::Storage(_))));
        assert!(matches!(vocab.delete(fig.id), Err(VocabError::Storage(_))));
        assert!(matches!(
            vocab.import_batch(r#"[{"word": "lime", "context": "a lime"}]"#),
            Err(VocabError::Storage(_))
        ));

        assert_eq!(vocab.entries(), before.as_slice());
        assert_eq!(vocab.store.get_all().unwrap(), before);
    }

    #[test]
    fn test_due_session_is_a_snapshot() {
        let mut vocab = vocab_on("2024-03-10");
        let fig = vocab.add("fig", "a fig").unwrap();
        vocab.add("date", "a date").unwrap();

        let session = vocab.due_session(None);
        assert_eq!(session.len(), 2);
        assert_eq!(session.entries, vocab.due_session(None).entries);

        vocab.recall_success(fig.id).unwrap();
        assert_eq!(session.len(), 2);
        assert_eq!(session.entries[0].box_number, 1);
        assert_eq!(vocab.due_session(None).len(), 1);
    }

    #[test]
    fn test_due_session_applies_daily_limit() {
        let mut vocab = vocab_on("2024-03-10");
        for word in ["a", "b", "c", "d"] {
            vocab.add(word, "ctx").unwrap();
        }

        let session = vocab.due_session(Some(3));
        assert_eq!(session.new_count(), 3);
        assert_eq!(session.review_count(), 0);
        assert_eq!(session.day, day("2024-03-10"));
    }

    #[test]
    fn test_full_export_round_trip() {
        let mut source = vocab_on("2024-03-10");
        let apricot = source.add("apricot", "an apricot").unwrap();
        let kiwi = source.add("kiwi", "a kiwi").unwrap();
        source.add("plum", "a plum").unwrap();
        source.recall_success(apricot.id).unwrap();
        source.recall_success(apricot.id).unwrap();
        source.mark_mastered(kiwi.id).unwrap();

        let exported = source.export_full().unwrap();
        let mut target = vocab_on("2024-04-01");
        let report = target.import_batch(&exported).unwrap();
        assert_eq!(report, ImportReport { added: 3, skipped: 0 });

        for (original, restored) in source.entries().iter().zip(target.entries()) {
            assert_eq!(original.word, restored.word);
            assert_eq!(original.context, restored.context);
            assert_eq!(original.box_number, restored.box_number);
            assert_eq!(original.next_review, restored.next_review);
            assert_eq!(original.last_reviewed, restored.last_reviewed);
            assert_ne!(original.id, restored.id);
        }
    }

    #[test]
    fn test_words_only_import_starts_fresh() {
        let mut source = vocab_on("2024-03-10");
        let fig = source.add("fig", "a fig").unwrap();
        source.recall_success(fig.id).unwrap();

        let exported = source.export_words_only().unwrap();
        let mut target = vocab_on("2024-04-01");
        target.import_batch(&exported).unwrap();

        let imported = &target.entries()[0];
        assert_eq!(imported.word, "fig");
        assert_eq!(imported.box_number, 1);
        assert_eq!(imported.next_review, DueDate::On(day("2024-04-01")));
        assert_eq!(imported.last_reviewed, None);
    }

    #[test]
    fn test_import_never_overwrites_existing() {
        let mut vocab = vocab_on("2024-03-10");
        let fig = vocab.add("fig", "a fig").unwrap();
        let fig = vocab.recall_success(fig.id).unwrap();

        let report = vocab
            .import_batch(r#"[{"word": "FIG", "context": "other", "box": 5}]"#)
            .unwrap();
        assert_eq!(report, ImportReport { added: 0, skipped: 1 });
        assert_eq!(vocab.len(), 1);
        assert_eq!(vocab.get(fig.id), Some(&fig));
    }

    #[test]
    fn test_malformed_import_adds_nothing() {
        let mut vocab = vocab_on("2024-03-10");
        let result = vocab.import_batch(r#"[{"word": "fig", "context": "a fig"}, {"context": "no word"}]"#);

        assert!(matches!(result, Err(VocabError::MalformedInput(_))));
        assert!(vocab.is_empty());
    }

    #[test]
    fn test_search_and_stats() {
        let mut vocab = vocab_on("2024-03-10");
        let fig = vocab.add("fig", "a sweet fruit").unwrap();
        let kiwi = vocab.add("kiwi", "a fuzzy fruit").unwrap();
        vocab.add("oak", "a tree").unwrap();
        vocab.recall_success(fig.id).unwrap();
        vocab.mark_mastered(kiwi.id).unwrap();

        let fruits: Vec<&str> = vocab.search("FRUIT").iter().map(|e| e.word.as_str()).collect();
        assert_eq!(fruits, vec!["fig", "kiwi"]);

        let stats = vocab.stats();
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.per_box, [1, 1, 0, 0, 0, 1]);
        assert_eq!(stats.mastered, 1);
        assert_eq!(stats.due_today, 1);
        assert_eq!(stats.never_reviewed, 1);
        assert_eq!(stats.reviewed_today, 2);
    }

    #[test]
    fn test_box_invariant_holds_across_operations() {
        let mut vocab = vocab_on("2024-03-10");
        let ids: Vec<Uuid> = ["a", "b", "c"]
            .iter()
            .map(|w| vocab.add(w, "ctx").unwrap().id)
            .collect();

        for _ in 0..6 {
            vocab.recall_success(ids[0]).unwrap();
        }
        vocab.recall_failure(ids[1]).unwrap();
        vocab.mark_mastered(ids[2]).unwrap();

        assert_eq!(vocab.get(ids[0]).unwrap().box_number, 5);
        assert_eq!(
            vocab.get(ids[0]).unwrap().next_review,
            DueDate::On(add_days(day("2024-03-10"), 14))
        );
        for entry in vocab.entries() {
            assert!((1..=6).contains(&entry.box_number));
            assert_eq!(entry.box_number == 6, entry.next_review == DueDate::Never);
        }
    }
}
