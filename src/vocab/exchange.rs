//! Export and import of the collection
//!
//! Two export shapes:
//! - full: every `Entry` field, for backups that keep learning progress
//! - words-only: `{word, context}` pairs, for sharing a deck
//!
//! Import accepts either shape. Only `word` and `context` are required;
//! `box`, `nextReview` and `lastReviewed` are used when present and
//! well-typed, otherwise a fresh box-1 entry is created.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::error::{VocabError, VocabResult};
use super::models::{normalize_word, Entry, WordPair, FIRST_BOX, MASTERED_BOX};
use crate::calendar::{parse_last_reviewed, DueDate};

/// Full export, collection order
pub fn export_full(entries: &[Entry]) -> VocabResult<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Word and context only, collection order
pub fn export_words_only(entries: &[Entry]) -> VocabResult<String> {
    let pairs: Vec<WordPair> = entries.iter().map(WordPair::from).collect();
    Ok(serde_json::to_string_pretty(&pairs)?)
}

/// A parsed import record before it becomes an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportCandidate {
    pub word: String,
    pub context: String,
    pub box_number: Option<u8>,
    pub next_review: Option<DueDate>,
    pub last_reviewed: Option<Option<NaiveDate>>,
}

impl ImportCandidate {
    /// Build an entry with a fresh id, filling missing state with defaults.
    ///
    /// Keeps `box == 6` exactly when `next_review` is `Never`.
    pub fn into_entry(self, today: NaiveDate) -> Entry {
        let box_number = self.box_number.unwrap_or(FIRST_BOX);

        let next_review = if box_number == MASTERED_BOX {
            DueDate::Never
        } else {
            match self.next_review {
                Some(DueDate::On(day)) => DueDate::On(day),
                Some(DueDate::Never) | None => DueDate::On(today),
            }
        };

        Entry {
            id: Uuid::new_v4(),
            word: self.word,
            context: self.context,
            box_number,
            next_review,
            last_reviewed: self.last_reviewed.flatten(),
        }
    }

    fn from_object(index: usize, object: &Map<String, Value>) -> VocabResult<Self> {
        let word = required_text(index, object, "word")?;
        let context = required_text(index, object, "context")?;

        let box_number = object.get("box").and_then(parse_box);

        let next_review = object
            .get("nextReview")
            .and_then(Value::as_str)
            .and_then(DueDate::parse);

        let last_reviewed = object
            .get("lastReviewed")
            .and_then(Value::as_str)
            .and_then(parse_last_reviewed);

        Ok(Self {
            word,
            context,
            box_number,
            next_review,
            last_reviewed,
        })
    }
}

/// A box number in 1..=6, given as an integer or a whole float like `3.0`
fn parse_box(value: &Value) -> Option<u8> {
    let number = match value.as_u64() {
        Some(n) => n as f64,
        None => value.as_f64().filter(|n| n.fract() == 0.0)?,
    };
    (FIRST_BOX as f64..=MASTERED_BOX as f64)
        .contains(&number)
        .then_some(number as u8)
}

fn required_text(index: usize, object: &Map<String, Value>, field: &str) -> VocabResult<String> {
    object
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            VocabError::MalformedInput(format!("element {} has no non-empty \"{}\"", index, field))
        })
}

/// Parse an import payload.
///
/// Fails with `MalformedInput` if the top level is not an array or any
/// element lacks a non-empty `word` or `context`; nothing is partially
/// accepted.
pub fn parse_batch(raw: &str) -> VocabResult<Vec<ImportCandidate>> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| VocabError::MalformedInput(format!("invalid JSON: {}", e)))?;

    let items = value
        .as_array()
        .ok_or_else(|| VocabError::MalformedInput("top level is not an array".to_string()))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let object = item.as_object().ok_or_else(|| {
                VocabError::MalformedInput(format!("element {} is not an object", index))
            })?;
            ImportCandidate::from_object(index, object)
        })
        .collect()
}

/// Entries to add for `candidates`, given the existing collection.
///
/// Existing words always win, and within the batch the first occurrence of
/// a word wins. Returns the new entries and the number of skipped
/// candidates.
pub fn merge_candidates(
    existing: &[Entry],
    candidates: Vec<ImportCandidate>,
    today: NaiveDate,
) -> (Vec<Entry>, usize) {
    let mut seen: HashSet<String> = existing.iter().map(Entry::normalized_word).collect();
    let mut skipped = 0;
    let mut added = Vec::new();

    for candidate in candidates {
        if !seen.insert(normalize_word(&candidate.word)) {
            skipped += 1;
            continue;
        }
        added.push(candidate.into_entry(today));
    }

    (added, skipped)
}
