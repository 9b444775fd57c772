/*
history.rs

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

//! Puzzle sets and their durable history.
//!
//! A [`PuzzleSet`] is the complete outcome of one generation run: the
//! ordered pieces, the difficulty, the seed, and a creation timestamp.
//! The [`HistoryStore`] trait is the narrow read/write contract that the
//! generation pipeline persists through; the [`crate::saver`] module
//! provides the implementations.
//! A [`HistoryEntry`] is the lightweight representation of a stored set
//! shown in the history list: an identifier, a timestamp, and a composed
//! thumbnail.

use chrono::{DateTime, Utc};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::generator::difficulty::Difficulty;
use crate::raster::Piece;

/// Longest edge of a history thumbnail, in pixels.
const THUMBNAIL_MAX_EDGE: u32 = 128;

/// Opaque identifier of a stored puzzle set.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct StoredId(pub u64);

impl fmt::Display for StoredId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type of errors raised by a history store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The store cannot read or write its backing medium. The description
    /// carries the underlying cause. Callers must not assume the store
    /// retries on their behalf.
    Unavailable(String),
}

impl StorageError {
    /// Wrap an underlying failure into [`StorageError::Unavailable`].
    pub fn unavailable(cause: impl fmt::Display) -> Self {
        StorageError::Unavailable(cause.to_string())
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StorageError::Unavailable(cause) => write!(f, "history storage unavailable: {cause}"),
        }
    }
}

impl Error for StorageError {}

/// The complete collection of pieces produced by one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleSet {
    /// Pieces in row-major grid order.
    pub pieces: Vec<Piece>,

    /// Difficulty level the set was generated at.
    pub difficulty: Difficulty,

    /// Seed the edge profiles were drawn from. The same seed and source
    /// image reproduce the set.
    pub seed: u64,

    /// Creation time, used to order the history most recent first.
    pub created_at: DateTime<Utc>,
}

impl PuzzleSet {
    /// Reassemble the source image from the piece buffers.
    ///
    /// The silhouettes tile the source exactly, so pasting every piece at
    /// its origin reproduces the snapshot the set was cut from.
    pub fn compose(&self) -> RgbaImage {
        let width: u32 = self
            .pieces
            .iter()
            .map(|p| p.origin.0 + p.image.width())
            .max()
            .unwrap_or(0);
        let height: u32 = self
            .pieces
            .iter()
            .map(|p| p.origin.1 + p.image.height())
            .max()
            .unwrap_or(0);

        let mut canvas: RgbaImage = RgbaImage::new(width, height);
        for piece in &self.pieces {
            for (x, y, value) in piece.mask.enumerate_pixels() {
                if value.0[0] == 255 {
                    canvas.put_pixel(piece.origin.0 + x, piece.origin.1 + y, *piece.image.get_pixel(x, y));
                }
            }
        }
        canvas
    }

    /// Compose a preview of the set scaled down for the history list.
    pub fn thumbnail(&self) -> RgbaImage {
        let composed: RgbaImage = self.compose();
        let (width, height) = composed.dimensions();
        let longest: u32 = width.max(height);
        if longest <= THUMBNAIL_MAX_EDGE || longest == 0 {
            return composed;
        }
        let thumb_width: u32 = (width * THUMBNAIL_MAX_EDGE / longest).max(1);
        let thumb_height: u32 = (height * THUMBNAIL_MAX_EDGE / longest).max(1);
        imageops::resize(&composed, thumb_width, thumb_height, FilterType::Triangle)
    }
}

/// A stored puzzle set as displayed in the history list.
///
/// Entries compare and hash by their stored identifier only, so the display
/// adapter tracks the persisted record rather than pixel contents.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub id: StoredId,
    pub created_at: DateTime<Utc>,
    pub difficulty: Difficulty,
    pub thumbnail: RgbaImage,
}

impl PartialEq for HistoryEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for HistoryEntry {}

impl Hash for HistoryEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Durable storage of past puzzle sets.
///
/// Implementations serialize their own writes: two finished generations
/// saving concurrently must never interleave into a corrupted record.
pub trait HistoryStore: Send + Sync {
    /// Persist a complete puzzle set and return its identifier.
    fn save(&self, set: &PuzzleSet) -> Result<StoredId, StorageError>;

    /// Return every stored set as a history entry, most recent first.
    fn load_all(&self) -> Result<Vec<HistoryEntry>, StorageError>;

    /// Reload one stored set by identifier.
    fn load(&self, id: StoredId) -> Result<PuzzleSet, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::edges::EdgeMap;
    use crate::generator::pieces::piece_specs;
    use crate::raster::cut_pieces;
    use image::Rgba;

    fn sample_set(width: u32, height: u32) -> (RgbaImage, PuzzleSet) {
        let source: RgbaImage = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([x as u8, y as u8, (x + y) as u8, 255])
        });
        let map: EdgeMap = EdgeMap::generate(3, 3, 21).unwrap();
        let specs = piece_specs(&map, width, height);
        let pieces = cut_pieces(&source, 3, 3, &specs).unwrap();
        let set: PuzzleSet = PuzzleSet {
            pieces,
            difficulty: Difficulty::Easy,
            seed: 21,
            created_at: Utc::now(),
        };
        (source, set)
    }

    #[test]
    fn compose_reassembles_the_source() {
        let (source, set) = sample_set(120, 90);
        assert_eq!(set.compose(), source);
    }

    #[test]
    fn thumbnail_fits_the_maximum_edge() {
        let (_, set) = sample_set(300, 150);
        let thumbnail: RgbaImage = set.thumbnail();
        assert_eq!(thumbnail.dimensions(), (128, 64));
    }

    #[test]
    fn small_sets_are_not_upscaled() {
        let (source, set) = sample_set(60, 60);
        assert_eq!(set.thumbnail(), source);
    }

    #[test]
    fn entries_compare_by_stored_id() {
        let (_, set) = sample_set(60, 60);
        let first: HistoryEntry = HistoryEntry {
            id: StoredId(4),
            created_at: set.created_at,
            difficulty: Difficulty::Easy,
            thumbnail: set.thumbnail(),
        };
        let mut second: HistoryEntry = first.clone();
        second.difficulty = Difficulty::Hard;
        second.thumbnail = RgbaImage::new(1, 1);
        assert_eq!(first, second);

        let other: HistoryEntry = HistoryEntry {
            id: StoredId(5),
            ..first.clone()
        };
        assert_ne!(first, other);
    }
}
