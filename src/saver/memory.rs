/*
memory.rs

Copyright 2026 The Jigdraw Developers

This file is part of Jigdraw.

Jigdraw is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Jigdraw is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Jigdraw. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! In-memory implementation of the history store contract.
//!
//! Nothing survives the process: this store backs hosts without durable
//! storage, and the pipeline tests.

use std::sync::Mutex;

use crate::history::{HistoryEntry, HistoryStore, PuzzleSet, StorageError, StoredId};

/// History store that keeps every saved set in memory.
#[derive(Default)]
pub struct MemoryHistoryStore {
    /// Saved sets in insertion order. The mutex serializes writers, like
    /// the file store's.
    sets: Mutex<Vec<(StoredId, PuzzleSet)>>,
}

impl MemoryHistoryStore {
    /// Create an empty [`MemoryHistoryStore`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of stored sets.
    pub fn len(&self) -> usize {
        self.sets.lock().map(|s| s.len()).unwrap_or(0)
    }

    /// Return whether the store holds no sets.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn save(&self, set: &PuzzleSet) -> Result<StoredId, StorageError> {
        let mut sets = self.sets.lock().map_err(StorageError::unavailable)?;
        let id: StoredId = StoredId(sets.len() as u64);
        sets.push((id, set.clone()));
        Ok(id)
    }

    fn load_all(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        let sets = self.sets.lock().map_err(StorageError::unavailable)?;
        let mut entries: Vec<HistoryEntry> = sets
            .iter()
            .map(|(id, set)| HistoryEntry {
                id: *id,
                created_at: set.created_at,
                difficulty: set.difficulty,
                thumbnail: set.thumbnail(),
            })
            .collect();
        entries.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(entries)
    }

    fn load(&self, id: StoredId) -> Result<PuzzleSet, StorageError> {
        let sets = self.sets.lock().map_err(StorageError::unavailable)?;
        match sets.iter().find(|(stored, _)| *stored == id) {
            Some((_, set)) => Ok(set.clone()),
            None => Err(StorageError::unavailable(format!("no stored set {id}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::difficulty::Difficulty;
    use chrono::{TimeDelta, Utc};

    fn empty_set(seed: u64, offset_seconds: i64) -> PuzzleSet {
        PuzzleSet {
            pieces: Vec::new(),
            difficulty: Difficulty::Easy,
            seed,
            created_at: Utc::now() + TimeDelta::seconds(offset_seconds),
        }
    }

    #[test]
    fn save_then_load_roundtrip() {
        let store: MemoryHistoryStore = MemoryHistoryStore::new();
        let set: PuzzleSet = empty_set(9, 0);
        let id: StoredId = store.save(&set).unwrap();
        assert_eq!(store.load(id).unwrap(), set);
    }

    #[test]
    fn load_all_orders_most_recent_first() {
        let store: MemoryHistoryStore = MemoryHistoryStore::new();
        let first: StoredId = store.save(&empty_set(1, 0)).unwrap();
        let second: StoredId = store.save(&empty_set(2, 60)).unwrap();

        let entries: Vec<HistoryEntry> = store.load_all().unwrap();
        assert_eq!(entries[0].id, second);
        assert_eq!(entries[1].id, first);
    }

    #[test]
    fn unknown_identifier_is_unavailable() {
        let store: MemoryHistoryStore = MemoryHistoryStore::new();
        assert!(matches!(
            store.load(StoredId(3)),
            Err(StorageError::Unavailable(_))
        ));
    }
}
