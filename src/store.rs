//! Aggregate stores mapping distinct words to occurrence counts.
//!
//! Two shapes share one contract: [`WordStore`] for a single logical owner,
//! and [`SharedWordStore`] for concurrent writers behind one coarse lock.
//! Both hold at most one record per distinct word, and a word's count equals
//! the number of times it has been folded in, directly or via merge.

use std::collections::HashMap;
use std::sync::Mutex;

/// A single (word, count) pair, the atomic unit stored and transmitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRecord {
    pub word: String,
    pub count: u64,
}

impl WordRecord {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Unsynchronized store. Valid only while a single logical owner accesses
/// it: the sequential driver, or a worker-private instance in fork mode.
#[derive(Debug, Default)]
pub struct WordStore {
    words: HashMap<String, u64>,
}

impl WordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count for `word`, if present. Never mutates.
    pub fn lookup(&self, word: &str) -> Option<u64> {
        self.words.get(word).copied()
    }

    /// Insert-or-increment: adds `by` to the existing count, or inserts a
    /// new record with count `by`. Returns the record's count afterwards.
    pub fn increment(&mut self, word: &str, by: u64) -> u64 {
        debug_assert!(by >= 1);
        match self.words.get_mut(word) {
            Some(count) => {
                *count += by;
                *count
            }
            None => {
                self.words.insert(word.to_string(), by);
                by
            }
        }
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// One-shot export in unspecified order. Consuming `self` keeps the
    /// export strictly after the owner's last write.
    pub fn into_records(self) -> impl Iterator<Item = WordRecord> {
        self.words
            .into_iter()
            .map(|(word, count)| WordRecord { word, count })
    }
}

/// The same logical collection behind a single mutex. Every membership read
/// and write, and every count update, happens with the lock held, so an
/// insert-or-increment is atomic per key: two racing increments of the same
/// word can never both observe "absent" and insert twice.
#[derive(Debug, Default)]
pub struct SharedWordStore {
    inner: Mutex<WordStore>,
}

impl SharedWordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, word: &str) -> Option<u64> {
        self.lock().lookup(word)
    }

    /// Insert-or-increment under the store lock. The lock is held across
    /// the full lookup-then-insert-or-add sequence; callers do their I/O
    /// outside this call, so the lock never covers a read from disk.
    pub fn increment(&self, word: &str, by: u64) -> u64 {
        self.lock().increment(word, by)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Reclaims the inner store. Requires ownership, so this cannot be
    /// called while any worker still holds a reference: the join happens
    /// first or the program does not compile.
    pub fn into_inner(self) -> WordStore {
        self.inner.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, WordStore> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
