//! Vocabulary memorization with a Leitner box scheduler
//!
//! This module provides:
//! - Entry CRUD with case-insensitive word uniqueness
//! - A fixed six-box Leitner schedule
//! - Due-set selection with a daily new-word limit
//! - Full and words-only export, and merging imports

pub mod collection;
pub mod error;
pub mod exchange;
pub mod models;
pub mod scheduler;
pub mod store;

pub use collection::Vocabulary;
pub use error::{ValidationError, VocabError, VocabResult};
pub use models::*;
pub use store::{EntryStore, JsonFileStore, MemoryStore, StoreError};
