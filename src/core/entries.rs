// src/core/entries.rs

use std::collections::HashMap;

use crate::models::Entry;

/// The entries of one menu.
///
/// Regular entries live in a map keyed by what the user types. The break entry
/// is kept apart so no typed input can ever collide with an internal key.
/// Occurrence counters remember how often each key was registered since the
/// last validation, which is how duplicate registrations are reported.
#[derive(Debug, Default)]
pub struct EntryRegistry {
    entries: HashMap<String, Entry>,
    break_entry: Option<Entry>,
    occurrences: HashMap<String, usize>,
}

impl EntryRegistry {
    /// Inserts or overwrites an entry and counts the registration.
    pub fn insert(&mut self, entry: Entry) {
        *self.occurrences.entry(entry.key.clone()).or_default() += 1;
        self.entries.insert(entry.key.clone(), entry);
    }

    /// Removes an entry, un-counting one registration of its key.
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        let removed = self.entries.remove(key)?;
        if let Some(count) = self.occurrences.get_mut(key) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.occurrences.remove(key);
            }
        }
        Some(removed)
    }

    /// The regular entry under `key`.
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Mutable access to the regular entry under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.entries.get_mut(key)
    }

    /// True if a regular entry uses `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys of the regular entries, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The regular entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// The entry that quits the menu.
    pub fn break_entry(&self) -> Option<&Entry> {
        self.break_entry.as_ref()
    }

    /// Installs the break entry, returning the one it replaced.
    pub fn set_break_entry(&mut self, entry: Entry) -> Option<Entry> {
        self.break_entry.replace(entry)
    }

    /// The key that quits the menu, once a break entry exists.
    pub fn quit_value(&self) -> Option<&str> {
        self.break_entry.as_ref().map(|entry| entry.key.as_str())
    }

    /// Number of entries, the break entry included.
    pub fn len(&self) -> usize {
        self.entries.len() + usize::from(self.break_entry.is_some())
    }

    /// True when not even a break entry exists.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys registered more than once since the last reset, with their counts.
    pub fn duplicates(&self) -> Vec<(String, usize)> {
        let mut duplicates: Vec<(String, usize)> = self
            .occurrences
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(key, count)| (key.clone(), *count))
            .collect();
        duplicates.sort();
        duplicates
    }

    /// Forgets how often each key was registered.
    pub fn reset_occurrences(&mut self) {
        self.occurrences.clear();
    }
}
