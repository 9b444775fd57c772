/*
jigsaw.rs

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

//! Run puzzle generation off the interactive path.
//!
//! The [`JigsawGenerator`] object owns the history store and spawns one
//! background thread per generation run: grid resolution, edge profiles,
//! rasterization, and persistence all happen on that thread.
//! The caller receives a [`GenerationTask`] handle and suspends on
//! [`GenerationTask::completed`] (or blocks on [`GenerationTask::wait`])
//! until the outcome crosses back over a bounded channel.
//! Dropping the handle abandons the run silently: the thread finishes on
//! its own and nothing partial is ever exposed.
//!
//! History retrieval follows the same pattern through
//! [`JigsawGenerator::load_history`], so a host list can be filled without
//! blocking the interactive thread.

use async_channel::{Receiver, Sender};
use chrono::Utc;
use image::RgbaImage;
use log::{debug, warn};
use rand::Rng;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::thread;

use crate::generator::difficulty::Difficulty;
use crate::generator::edges::{EdgeMap, GeometryError};
use crate::generator::pieces::{piece_specs, PieceSpec};
use crate::history::{HistoryEntry, HistoryStore, PuzzleSet, StorageError, StoredId};
use crate::raster::{cut_pieces, Piece, RasterError};

/// Type of errors that abort a generation run.
///
/// A failed run is all-or-nothing: no partial puzzle set crosses the task
/// boundary and nothing is persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateError {
    /// The difficulty table produced a degenerate grid.
    Geometry(GeometryError),

    /// The source image cannot hold the requested grid.
    Raster(RasterError),

    /// The background task ended without delivering a result.
    Interrupted,
}

impl From<GeometryError> for GenerateError {
    fn from(error: GeometryError) -> Self {
        GenerateError::Geometry(error)
    }
}

impl From<RasterError> for GenerateError {
    fn from(error: RasterError) -> Self {
        GenerateError::Raster(error)
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GenerateError::Geometry(error) => error.fmt(f),
            GenerateError::Raster(error) => error.fmt(f),
            GenerateError::Interrupted => {
                write!(f, "the generation task ended before delivering a result")
            }
        }
    }
}

impl Error for GenerateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GenerateError::Geometry(error) => Some(error),
            GenerateError::Raster(error) => Some(error),
            GenerateError::Interrupted => None,
        }
    }
}

/// Outcome of a successful generation run.
///
/// The puzzle set is complete and usable even when persistence failed;
/// `stored` reports that outcome separately so the caller can still display
/// the puzzle and inform the user that it was not saved.
#[derive(Debug)]
pub struct Generated {
    pub set: PuzzleSet,
    pub stored: Result<StoredId, StorageError>,
}

/// Handle on one background generation run.
pub struct GenerationTask {
    receiver: Receiver<Result<Generated, GenerateError>>,
}

impl GenerationTask {
    /// Suspend until the run completes and return its outcome.
    pub async fn completed(self) -> Result<Generated, GenerateError> {
        match self.receiver.recv().await {
            Ok(outcome) => outcome,
            Err(_) => Err(GenerateError::Interrupted),
        }
    }

    /// Block the calling thread until the run completes.
    pub fn wait(self) -> Result<Generated, GenerateError> {
        match self.receiver.recv_blocking() {
            Ok(outcome) => outcome,
            Err(_) => Err(GenerateError::Interrupted),
        }
    }
}

/// Handle on one background history retrieval.
pub struct HistoryLoadTask {
    receiver: Receiver<Result<Vec<HistoryEntry>, StorageError>>,
}

impl HistoryLoadTask {
    /// Suspend until the history is loaded.
    pub async fn completed(self) -> Result<Vec<HistoryEntry>, StorageError> {
        match self.receiver.recv().await {
            Ok(outcome) => outcome,
            Err(_) => Err(StorageError::unavailable(
                "the history task ended before delivering a result",
            )),
        }
    }

    /// Block the calling thread until the history is loaded.
    pub fn wait(self) -> Result<Vec<HistoryEntry>, StorageError> {
        match self.receiver.recv_blocking() {
            Ok(outcome) => outcome,
            Err(_) => Err(StorageError::unavailable(
                "the history task ended before delivering a result",
            )),
        }
    }
}

/// Orchestrate puzzle generation and history retrieval on background
/// threads.
pub struct JigsawGenerator {
    store: Arc<dyn HistoryStore>,

    /// Fire-and-forget notification raised when a generation starts, for
    /// hosts that show a transient "Loading..." message. No acknowledgment
    /// is expected.
    feedback: Option<Arc<dyn Fn(&str) + Send + Sync>>,
}

impl JigsawGenerator {
    /// Create a [`JigsawGenerator`] that persists through the given store.
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self {
            store,
            feedback: None,
        }
    }

    /// Install the user-visible feedback channel.
    pub fn set_feedback(&mut self, feedback: impl Fn(&str) + Send + Sync + 'static) {
        self.feedback = Some(Arc::new(feedback));
    }

    /// Start generating a puzzle from a snapshot of the drawing.
    ///
    /// The snapshot is owned by the run, so later edits to the drawing
    /// cannot touch a generation in flight. When `seed` is not provided, a
    /// random one is drawn; either way the seed ends up in the produced
    /// [`PuzzleSet`] so the same puzzle can be regenerated later.
    pub fn generate(
        &self,
        snapshot: RgbaImage,
        difficulty: Difficulty,
        seed: Option<u64>,
    ) -> GenerationTask {
        if let Some(feedback) = &self.feedback {
            feedback("Loading...");
        }
        let seed: u64 = seed.unwrap_or_else(|| rand::rng().random());
        let store: Arc<dyn HistoryStore> = Arc::clone(&self.store);
        let (sender, receiver): (Sender<_>, Receiver<_>) = async_channel::bounded(1);

        thread::spawn(move || {
            let outcome: Result<Generated, GenerateError> =
                run_generation(&snapshot, difficulty, seed, store.as_ref());
            // The receiver may be gone when the host was torn down; the
            // run is then abandoned silently.
            let _ = sender.send_blocking(outcome);
        });

        GenerationTask { receiver }
    }

    /// Start loading the puzzle history, most recent first.
    pub fn load_history(&self) -> HistoryLoadTask {
        let store: Arc<dyn HistoryStore> = Arc::clone(&self.store);
        let (sender, receiver): (Sender<_>, Receiver<_>) = async_channel::bounded(1);

        thread::spawn(move || {
            let _ = sender.send_blocking(store.load_all());
        });

        HistoryLoadTask { receiver }
    }
}

/// Run one complete generation: geometry, then rasterization, then
/// persistence. Geometry always completes before rasterization starts,
/// because the rasterizer consumes its full output.
fn run_generation(
    snapshot: &RgbaImage,
    difficulty: Difficulty,
    seed: u64,
    store: &dyn HistoryStore,
) -> Result<Generated, GenerateError> {
    let (rows, columns) = difficulty.grid();
    let (width, height) = snapshot.dimensions();
    debug!(
        "Generating a {difficulty} ({rows}x{columns}) puzzle from a {width}x{height} snapshot, \
         seed {seed}"
    );

    let edge_map: EdgeMap = EdgeMap::generate(rows, columns, seed)?;
    let specs: Vec<PieceSpec> = piece_specs(&edge_map, width, height);
    let pieces: Vec<Piece> = cut_pieces(snapshot, rows, columns, &specs)?;

    let set: PuzzleSet = PuzzleSet {
        pieces,
        difficulty,
        seed,
        created_at: Utc::now(),
    };

    let stored: Result<StoredId, StorageError> = store.save(&set);
    match &stored {
        Ok(id) => debug!("Puzzle set persisted as {id}"),
        Err(error) => warn!("The puzzle set could not be persisted: {error}"),
    }

    Ok(Generated { set, stored })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saver::memory::MemoryHistoryStore;
    use image::Rgba;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn snapshot(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([x as u8, y as u8, 128, 255])
        })
    }

    /// Store whose backing medium is always down.
    struct BrokenStore;

    impl HistoryStore for BrokenStore {
        fn save(&self, _set: &PuzzleSet) -> Result<StoredId, StorageError> {
            Err(StorageError::unavailable("disk full"))
        }

        fn load_all(&self) -> Result<Vec<HistoryEntry>, StorageError> {
            Err(StorageError::unavailable("disk full"))
        }

        fn load(&self, _id: StoredId) -> Result<PuzzleSet, StorageError> {
            Err(StorageError::unavailable("disk full"))
        }
    }

    #[test]
    fn generation_produces_and_persists_a_full_set() {
        let store: Arc<MemoryHistoryStore> = Arc::new(MemoryHistoryStore::new());
        let generator: JigsawGenerator = JigsawGenerator::new(store.clone());

        let generated: Generated = generator
            .generate(snapshot(300, 300), Difficulty::Easy, Some(42))
            .wait()
            .unwrap();

        assert_eq!(generated.set.pieces.len(), 9);
        assert_eq!(generated.set.difficulty, Difficulty::Easy);
        assert_eq!(generated.set.seed, 42);
        assert_eq!(generated.stored, Ok(StoredId(0)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn too_small_snapshot_fails_without_persisting() {
        let store: Arc<MemoryHistoryStore> = Arc::new(MemoryHistoryStore::new());
        let generator: JigsawGenerator = JigsawGenerator::new(store.clone());

        let outcome = generator
            .generate(snapshot(50, 50), Difficulty::Medium, Some(1))
            .wait();

        assert_eq!(
            outcome.unwrap_err(),
            GenerateError::Raster(RasterError::SourceImageTooSmall {
                width: 50,
                height: 50,
                rows: 6,
                columns: 6,
            })
        );
        assert!(store.is_empty(), "a failed run must not write to the store");
    }

    #[test]
    fn same_seed_reproduces_the_same_cut() {
        let store: Arc<MemoryHistoryStore> = Arc::new(MemoryHistoryStore::new());
        let generator: JigsawGenerator = JigsawGenerator::new(store);

        let first: Generated = generator
            .generate(snapshot(120, 120), Difficulty::Easy, Some(7))
            .wait()
            .unwrap();
        let second: Generated = generator
            .generate(snapshot(120, 120), Difficulty::Easy, Some(7))
            .wait()
            .unwrap();

        let first_specs: Vec<PieceSpec> = first.set.pieces.iter().map(|p| p.spec).collect();
        let second_specs: Vec<PieceSpec> = second.set.pieces.iter().map(|p| p.spec).collect();
        assert_eq!(first_specs, second_specs);
    }

    #[test]
    fn storage_failure_keeps_the_set_usable() {
        let generator: JigsawGenerator = JigsawGenerator::new(Arc::new(BrokenStore));

        let generated: Generated = generator
            .generate(snapshot(120, 120), Difficulty::Easy, Some(3))
            .wait()
            .unwrap();

        assert!(matches!(generated.stored, Err(StorageError::Unavailable(_))));
        assert_eq!(generated.set.pieces.len(), 9);
    }

    #[test]
    fn feedback_fires_when_generation_starts() {
        let notified: Arc<AtomicBool> = Arc::new(AtomicBool::new(false));
        let flag: Arc<AtomicBool> = notified.clone();

        let mut generator: JigsawGenerator =
            JigsawGenerator::new(Arc::new(MemoryHistoryStore::new()));
        generator.set_feedback(move |_| flag.store(true, Ordering::SeqCst));

        generator
            .generate(snapshot(60, 60), Difficulty::Easy, Some(5))
            .wait()
            .unwrap();
        assert!(notified.load(Ordering::SeqCst));
    }

    #[test]
    fn history_loads_most_recent_first() {
        let store: Arc<MemoryHistoryStore> = Arc::new(MemoryHistoryStore::new());
        let generator: JigsawGenerator = JigsawGenerator::new(store);

        let first: Generated = generator
            .generate(snapshot(60, 60), Difficulty::Easy, Some(1))
            .wait()
            .unwrap();
        let second: Generated = generator
            .generate(snapshot(60, 60), Difficulty::Easy, Some(2))
            .wait()
            .unwrap();

        let entries: Vec<HistoryEntry> = generator.load_history().wait().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(Ok(entries[0].id), second.stored);
        assert_eq!(Ok(entries[1].id), first.stored);
    }
}
