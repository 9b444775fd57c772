/*
adapter.rs

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

//! Present an ordered list of items with stable per-item identities.
//!
//! A UI list that animates, recycles rows, or tracks selection needs every
//! displayed item to keep one identity for as long as it is known, no
//! matter how often the list is reordered or reloaded.
//! The [`ListAdapter`] object assigns each new item the next value of a
//! per-adapter counter the first time the item appears, and returns the
//! same value on every later appearance.
//! Identities are never reused, and the mapping survives empty reloads, so
//! removing an item and adding it back does not corrupt row-level state in
//! the consuming view.
//!
//! The adapter belongs to the interactive thread. Background tasks hand
//! their results over first; only then is [`ListAdapter::set_items`]
//! called.

use log::debug;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::hash::Hash;

/// Type of errors raised at the display boundary.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// The position does not index the currently displayed sequence.
    /// This is a contract violation by the caller, not a user condition:
    /// positions are only valid in `0..count`.
    PositionOutOfRange { position: usize, count: usize },
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AdapterError::PositionOutOfRange { position, count } => {
                write!(
                    f,
                    "position {position} is out of range for a list of {count} items"
                )
            }
        }
    }
}

impl Error for AdapterError {}

/// Ordered display list that keeps one stable identity per item.
///
/// Items are tracked by equality: two equal items are the same logical item
/// and share one identity, whatever their positions.
pub struct ListAdapter<T> {
    /// The currently displayed sequence.
    items: Vec<T>,

    /// Identity of every item ever displayed, by value.
    identities: HashMap<T, u64>,

    /// Next identity to assign. Monotonically increasing for the lifetime
    /// of the adapter, never decremented, never reused.
    next_identity: u64,
}

impl<T> Default for ListAdapter<T>
where
    T: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListAdapter<T>
where
    T: Eq + Hash + Clone,
{
    /// Create an empty [`ListAdapter`] object.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            identities: HashMap::new(),
            next_identity: 0,
        }
    }

    /// Replace the displayed sequence.
    ///
    /// Items seen for the first time are assigned the next identity in
    /// first-seen order. Items already known keep the identity they were
    /// first assigned, even when their position changed or they were absent
    /// from intermediate sequences.
    pub fn set_items(&mut self, items: Vec<T>) {
        for item in &items {
            if !self.identities.contains_key(item) {
                debug!("Assigning identity {} to a new list item", self.next_identity);
                self.identities.insert(item.clone(), self.next_identity);
                self.next_identity += 1;
            }
        }
        self.items = items;
    }

    /// Return the item displayed at the given position.
    ///
    /// # Errors
    ///
    /// Return [`AdapterError::PositionOutOfRange`] when `position` is not
    /// in `0..count`, whatever the identity mapping contains.
    pub fn item_at(&self, position: usize) -> Result<&T, AdapterError> {
        self.items.get(position).ok_or(AdapterError::PositionOutOfRange {
            position,
            count: self.items.len(),
        })
    }

    /// Return the stable identity of the item at the given position.
    ///
    /// # Errors
    ///
    /// Return [`AdapterError::PositionOutOfRange`] when `position` is not
    /// in `0..count`.
    pub fn identity_of(&self, position: usize) -> Result<u64, AdapterError> {
        let item: &T = self.item_at(position)?;
        Ok(*self
            .identities
            .get(item)
            .expect("displayed items are always registered"))
    }

    /// Return the number of displayed items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Return whether the displayed sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Return the displayed sequence.
    pub fn items(&self) -> &[T] {
        &self.items
    }
}
