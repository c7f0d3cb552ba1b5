//! Data models for the vocabulary collection

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::{self, DueDate};

/// Box for newly added and just-failed entries
pub const FIRST_BOX: u8 = 1;

/// Highest box ordinary recall can reach
pub const CEILING_BOX: u8 = 5;

/// Terminal box for mastered entries, retired from scheduling
pub const MASTERED_BOX: u8 = 6;

/// A single vocabulary item under study.
///
/// This is also the full exchange record: field names and date renderings
/// match the export format exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: Uuid,
    pub word: String,
    pub context: String,
    #[serde(rename = "box")]
    pub box_number: u8,
    pub next_review: DueDate,
    #[serde(with = "calendar::last_reviewed")]
    pub last_reviewed: Option<NaiveDate>,
}

impl Entry {
    /// New entry in box 1, due immediately, never reviewed
    pub fn new(word: String, context: String, today: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            word,
            context,
            box_number: FIRST_BOX,
            next_review: DueDate::On(today),
            last_reviewed: None,
        }
    }

    pub fn is_mastered(&self) -> bool {
        self.box_number >= MASTERED_BOX
    }

    /// Not mastered and `next_review` has arrived
    pub fn is_due(&self, today: NaiveDate) -> bool {
        !self.is_mastered() && self.next_review.is_due_by(today)
    }

    /// Key used for case-insensitive uniqueness
    pub fn normalized_word(&self) -> String {
        normalize_word(&self.word)
    }
}

/// Trimmed, lowercased form of a word
pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Feedback recorded against an entry during review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    /// Remembered: up one box, capped at box 5
    Recalled,
    /// Not remembered: back to box 1
    Forgotten,
    /// Known for good: box 6, never scheduled again
    Mastered,
}

/// Word-only exchange record (learning state deliberately dropped)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPair {
    pub word: String,
    pub context: String,
}

impl From<&Entry> for WordPair {
    fn from(entry: &Entry) -> Self {
        Self {
            word: entry.word.clone(),
            context: entry.context.clone(),
        }
    }
}

/// One review session, computed once and not affected by later edits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSession {
    pub day: NaiveDate,
    pub entries: Vec<Entry>,
}

impl ReviewSession {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in box 1 (new or reset)
    pub fn new_count(&self) -> usize {
        self.entries.iter().filter(|e| e.box_number == FIRST_BOX).count()
    }

    /// Entries in boxes 2-5
    pub fn review_count(&self) -> usize {
        self.len() - self.new_count()
    }
}

/// Statistics over the whole collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabStats {
    pub total_entries: usize,
    /// Index 0 is box 1, index 5 is box 6
    pub per_box: [usize; 6],
    pub due_today: usize,
    pub mastered: usize,
    pub never_reviewed: usize,
    pub reviewed_today: usize,
}

/// Result of merging an imported batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub added: usize,
    /// Candidates dropped because their word already existed
    pub skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::parse_day;

    #[test]
    fn test_new_entry_is_due_immediately() {
        let today = parse_day("2024-03-10").unwrap();
        let entry = Entry::new("apricot".to_string(), "an apricot tree".to_string(), today);

        assert_eq!(entry.box_number, FIRST_BOX);
        assert_eq!(entry.next_review, DueDate::On(today));
        assert_eq!(entry.last_reviewed, None);
        assert!(entry.is_due(today));
    }

    #[test]
    fn test_entry_serializes_to_exchange_shape() {
        let today = parse_day("2024-03-10").unwrap();
        let entry = Entry::new("Apricot".to_string(), "ripe".to_string(), today);
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["word"], "Apricot");
        assert_eq!(value["box"], 1);
        assert_eq!(value["nextReview"], "2024-03-10");
        assert_eq!(value["lastReviewed"], "1970-01-01");
        assert_eq!(value["id"], entry.id.to_string());
    }

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("  Apricot "), "apricot");
    }
}
