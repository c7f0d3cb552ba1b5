//! Leitner box scheduler
//!
//! Six boxes with a fixed interval table, indexed by the box entered:
//! - Box 1: 1 day (new or just failed)
//! - Box 2: 2 days
//! - Box 3: 4 days
//! - Box 4: 7 days
//! - Box 5: 14 days (ceiling for ordinary recall)
//! - Box 6: never (mastered)
//!
//! Everything here is a pure function of the entries and "today".

use chrono::NaiveDate;

use super::models::{Entry, Outcome, CEILING_BOX, FIRST_BOX, MASTERED_BOX};
use crate::calendar::{add_days, DueDate};

/// Days until next review for boxes 1 through 5
const BOX_INTERVALS: [i64; 5] = [1, 2, 4, 7, 14];

/// Interval for entering `box_number`; `None` for the mastered box
pub fn interval_days(box_number: u8) -> Option<i64> {
    match box_number {
        FIRST_BOX..=CEILING_BOX => Some(BOX_INTERVALS[(box_number - 1) as usize]),
        _ => None,
    }
}

/// Due date for an entry that enters `box_number` on `today`
pub fn due_date_for(box_number: u8, today: NaiveDate) -> DueDate {
    match interval_days(box_number) {
        Some(days) => DueDate::On(add_days(today, days)),
        None => DueDate::Never,
    }
}

/// Box reached from `current` after `outcome`.
///
/// Returns `None` when no transition is defined: the entry is mastered
/// (box 6 is terminal) or the box is out of range.
pub fn next_box(current: u8, outcome: Outcome) -> Option<u8> {
    if !(FIRST_BOX..=CEILING_BOX).contains(&current) {
        return None;
    }

    let next = match outcome {
        Outcome::Recalled => (current + 1).min(CEILING_BOX),
        Outcome::Forgotten => FIRST_BOX,
        Outcome::Mastered => MASTERED_BOX,
    };
    Some(next)
}

/// The entry after recording `outcome` on `today`.
///
/// This is the only place `box`, `next_review` and `last_reviewed` change.
pub fn apply_outcome(entry: &Entry, outcome: Outcome, today: NaiveDate) -> Option<Entry> {
    let box_number = next_box(entry.box_number, outcome)?;

    Some(Entry {
        box_number,
        next_review: due_date_for(box_number, today),
        last_reviewed: Some(today),
        ..entry.clone()
    })
}

/// Compute the due set for `today`.
///
/// Candidates are unmastered entries whose review date has arrived, ordered
/// by ascending box (stable for ties). With a daily limit, only the box-1
/// part is truncated; boxes 2-5 are always included in full after it.
/// A limit of `Some(0)` is treated as no limit.
pub fn select_due(entries: &[Entry], today: NaiveDate, daily_limit: Option<usize>) -> Vec<Entry> {
    let mut due: Vec<&Entry> = entries.iter().filter(|e| e.is_due(today)).collect();
    // sort_by_key is stable, so collection order survives within a box
    due.sort_by_key(|e| e.box_number);

    let limit = match daily_limit {
        Some(limit) if limit > 0 => limit,
        _ => return due.into_iter().cloned().collect(),
    };

    let (new_words, reviews): (Vec<&Entry>, Vec<&Entry>) =
        due.into_iter().partition(|e| e.box_number == FIRST_BOX);

    new_words
        .into_iter()
        .take(limit)
        .chain(reviews)
        .cloned()
        .collect()
}

/// Due dates each outcome would produce, in the order
/// recalled, forgotten, mastered. `None` for a mastered entry.
pub fn preview_due_dates(entry: &Entry, today: NaiveDate) -> Option<[DueDate; 3]> {
    let preview = |outcome| next_box(entry.box_number, outcome).map(|b| due_date_for(b, today));

    Some([
        preview(Outcome::Recalled)?,
        preview(Outcome::Forgotten)?,
        preview(Outcome::Mastered)?,
    ])
}

/// Format an interval in days to a compact string
pub fn format_interval(days: i64) -> String {
    match days {
        0 => "now".to_string(),
        1..=6 => format!("{}d", days),
        7..=29 => format!("{}w", days / 7),
        30..=364 => format!("{}mo", days / 30),
        _ => format!("{}y", days / 365),
    }
}
