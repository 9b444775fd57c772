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

//! Save and restore puzzle sets on disk.
//!
//! Every stored set lives in its own `set-<id>` subdirectory of the data
//! directory: one PNG per piece buffer, one PNG per silhouette mask, a
//! composed `thumbnail.png`, and a `meta.json` file serialized with
//! [`serde`].
//! The metadata is written last: a directory without `meta.json` is an
//! abandoned write and is skipped when the history is listed.

use chrono::{DateTime, Utc};
use image::{GrayImage, RgbaImage};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use crate::generator::difficulty::Difficulty;
use crate::generator::pieces::PieceSpec;
use crate::history::{HistoryEntry, HistoryStore, PuzzleSet, StorageError, StoredId};
use crate::raster::Piece;

/// Serialized description of one stored piece.
#[derive(Serialize, Deserialize, Debug)]
struct PieceMeta {
    spec: PieceSpec,
    origin: (u32, u32),

    /// Piece buffer PNG filename, relative to the set directory.
    image: String,

    /// Silhouette mask PNG filename, relative to the set directory.
    mask: String,
}

/// Serialized description of one stored puzzle set.
#[derive(Serialize, Deserialize, Debug)]
struct SetMeta {
    id: u64,
    created_at: DateTime<Utc>,
    difficulty: Difficulty,
    seed: u64,
    pieces: Vec<PieceMeta>,
}

/// Object to save and restore puzzle sets under a data directory.
pub struct FileHistoryStore {
    /// Absolute path to the data directory.
    data_dir: PathBuf,

    /// Next identifier to allocate. The mutex also serializes writers, so
    /// two finished generations cannot interleave their files.
    next_id: Mutex<u64>,
}

impl FileHistoryStore {
    /// Open a [`FileHistoryStore`] rooted at the provided data directory.
    ///
    /// The directory is created if needed, and identifier allocation
    /// resumes after the highest stored set.
    ///
    /// # Errors
    ///
    /// Return [`StorageError::Unavailable`] when the directory cannot be
    /// created or scanned.
    pub fn open(data_dir: PathBuf) -> Result<Self, StorageError> {
        debug!("History directory: {data_dir:?}");
        fs::create_dir_all(&data_dir).map_err(StorageError::unavailable)?;

        let mut next: u64 = 0;
        for entry in fs::read_dir(&data_dir).map_err(StorageError::unavailable)? {
            let entry = entry.map_err(StorageError::unavailable)?;
            if let Some(id) = Self::id_of_dir(&entry.file_name().to_string_lossy()) {
                next = next.max(id + 1);
            }
        }

        Ok(Self {
            data_dir,
            next_id: Mutex::new(next),
        })
    }

    /// Parse a set directory name back into its identifier.
    fn id_of_dir(name: &str) -> Option<u64> {
        name.strip_prefix("set-")?.parse().ok()
    }

    /// Return the directory of the set with the given identifier.
    fn set_dir(&self, id: u64) -> PathBuf {
        self.data_dir.join(format!("set-{id:08}"))
    }

    /// Read the metadata file of one set directory.
    fn read_meta(dir: &PathBuf) -> Result<SetMeta, StorageError> {
        let file: File = File::open(dir.join("meta.json")).map_err(StorageError::unavailable)?;
        let reader: BufReader<File> = BufReader::new(file);
        serde_json::from_reader(reader).map_err(StorageError::unavailable)
    }

    /// Load a PNG file as an RGBA buffer.
    fn read_rgba(path: PathBuf) -> Result<RgbaImage, StorageError> {
        Ok(image::open(path).map_err(StorageError::unavailable)?.to_rgba8())
    }

    /// Load a PNG file as a grayscale mask.
    fn read_mask(path: PathBuf) -> Result<GrayImage, StorageError> {
        Ok(image::open(path).map_err(StorageError::unavailable)?.to_luma8())
    }
}

impl HistoryStore for FileHistoryStore {
    fn save(&self, set: &PuzzleSet) -> Result<StoredId, StorageError> {
        let mut next = self.next_id.lock().map_err(StorageError::unavailable)?;
        let id: u64 = *next;
        let dir: PathBuf = self.set_dir(id);

        let result: Result<(), StorageError> = (|| {
            fs::create_dir_all(&dir).map_err(StorageError::unavailable)?;

            let mut pieces: Vec<PieceMeta> = Vec::with_capacity(set.pieces.len());
            for piece in &set.pieces {
                let image_name: String =
                    format!("piece_{}_{}.png", piece.spec.row, piece.spec.column);
                let mask_name: String =
                    format!("mask_{}_{}.png", piece.spec.row, piece.spec.column);
                piece
                    .image
                    .save(dir.join(&image_name))
                    .map_err(StorageError::unavailable)?;
                piece
                    .mask
                    .save(dir.join(&mask_name))
                    .map_err(StorageError::unavailable)?;
                pieces.push(PieceMeta {
                    spec: piece.spec,
                    origin: piece.origin,
                    image: image_name,
                    mask: mask_name,
                });
            }

            set.thumbnail()
                .save(dir.join("thumbnail.png"))
                .map_err(StorageError::unavailable)?;

            // The metadata marks the record as complete, so it goes last.
            let meta: SetMeta = SetMeta {
                id,
                created_at: set.created_at,
                difficulty: set.difficulty,
                seed: set.seed,
                pieces,
            };
            let file: File =
                File::create(dir.join("meta.json")).map_err(StorageError::unavailable)?;
            let mut writer: BufWriter<File> = BufWriter::new(file);
            serde_json::to_writer(&mut writer, &meta).map_err(StorageError::unavailable)?;
            writer.flush().map_err(StorageError::unavailable)?;
            Ok(())
        })();

        match result {
            Ok(()) => {
                *next = id + 1;
                debug!("Saved puzzle set {id} to {dir:?}");
                Ok(StoredId(id))
            }
            Err(error) => {
                // Leave no abandoned record behind.
                let _ = fs::remove_dir_all(&dir);
                Err(error)
            }
        }
    }

    fn load_all(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        let dir_entries = match fs::read_dir(&self.data_dir) {
            Ok(e) => e,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(Vec::new()),
                _ => return Err(StorageError::unavailable(error)),
            },
        };

        let mut entries: Vec<HistoryEntry> = Vec::new();
        for dir_entry in dir_entries {
            let dir_entry = dir_entry.map_err(StorageError::unavailable)?;
            if Self::id_of_dir(&dir_entry.file_name().to_string_lossy()).is_none() {
                continue;
            }
            let dir: PathBuf = dir_entry.path();
            let meta: SetMeta = match Self::read_meta(&dir) {
                Ok(m) => m,
                Err(_) => {
                    // No readable metadata: an abandoned or foreign
                    // directory, not a stored set.
                    debug!("Skipping incomplete history record {dir:?}");
                    continue;
                }
            };
            let thumbnail: RgbaImage = Self::read_rgba(dir.join("thumbnail.png"))?;
            entries.push(HistoryEntry {
                id: StoredId(meta.id),
                created_at: meta.created_at,
                difficulty: meta.difficulty,
                thumbnail,
            });
        }

        entries.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(entries)
    }

    fn load(&self, id: StoredId) -> Result<PuzzleSet, StorageError> {
        let dir: PathBuf = self.set_dir(id.0);
        let meta: SetMeta = Self::read_meta(&dir)?;

        let mut pieces: Vec<Piece> = Vec::with_capacity(meta.pieces.len());
        for piece_meta in meta.pieces {
            pieces.push(Piece {
                spec: piece_meta.spec,
                origin: piece_meta.origin,
                image: Self::read_rgba(dir.join(&piece_meta.image))?,
                mask: Self::read_mask(dir.join(&piece_meta.mask))?,
            });
        }

        Ok(PuzzleSet {
            pieces,
            difficulty: meta.difficulty,
            seed: meta.seed,
            created_at: meta.created_at,
        })
    }
}
