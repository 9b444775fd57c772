/*
cli_options.rs

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

//! Process command-line options.
//!
//! The command line stands in for the host drawing surface: instead of a
//! canvas snapshot, the puzzle source is a PNG file.
//!
//! # Examples
//!
//! Cut a drawing into a hard puzzle and export the pieces:
//!
//! ```text
//! $ jigdraw drawing.png -f hard --export pieces/
//! Loading...
//! Generated a Hard puzzle with 81 pieces (seed 2882400018).
//! Saved to the history as set 3.
//! Exported 81 pieces to pieces/.
//! ```
//!
//! List the stored puzzles, most recent first:
//!
//! ```text
//! $ jigdraw --ls
//!    0  set 3  2026-02-11 19:04:27  Hard
//!    1  set 2  2026-02-10 08:12:51  Easy
//!    2  set 1  2026-02-10 08:11:02  Easy
//! ```

use clap::Parser;
use image::RgbaImage;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::adapter::ListAdapter;
use crate::generator::difficulty::Difficulty;
use crate::history::{HistoryEntry, HistoryStore, PuzzleSet, StoredId};
use crate::jigsaw::{Generated, JigsawGenerator};
use crate::saver::history::FileHistoryStore;

/// Cut a drawing into a jigsaw puzzle.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    /// PNG image to cut into a puzzle
    #[arg(required_unless_present_any = ["ls", "info"])]
    image: Option<PathBuf>,

    /// Difficulty level for the puzzle
    #[arg(value_enum, short = 'f', long, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Seed for the edge profiles; a random one is drawn when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Export the piece images to this directory after generating
    #[arg(long)]
    export: Option<PathBuf>,

    /// Directory where the puzzle history is stored
    #[arg(long, default_value = "jigdraw-history")]
    data_dir: PathBuf,

    /// List the stored puzzles
    #[arg(short, long, default_value_t = false)]
    ls: bool,

    /// Print the details of the stored puzzle with this identifier
    #[arg(long)]
    info: Option<u64>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options. Return the process exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let store: Arc<FileHistoryStore> = match FileHistoryStore::open(args.data_dir.clone()) {
        Ok(s) => Arc::new(s),
        Err(error) => {
            eprintln!("Error: {error}");
            return 1;
        }
    };

    if args.ls {
        return list_history(&JigsawGenerator::new(store));
    }
    if let Some(id) = args.info {
        return show_set(store.as_ref(), StoredId(id));
    }

    let image_path: PathBuf = args.image.expect("Cannot retrieve the image path");
    let snapshot: RgbaImage = match image::open(&image_path) {
        Ok(i) => i.to_rgba8(),
        Err(error) => {
            eprintln!("Error: cannot read {}: {error}", image_path.display());
            return 1;
        }
    };

    let mut generator: JigsawGenerator = JigsawGenerator::new(store);
    generator.set_feedback(|message| println!("{message}"));

    match generator.generate(snapshot, args.difficulty, args.seed).wait() {
        Ok(generated) => {
            println!(
                "Generated a {} puzzle with {} pieces (seed {}).",
                generated.set.difficulty,
                generated.set.pieces.len(),
                generated.set.seed
            );
            match &generated.stored {
                Ok(id) => println!("Saved to the history as set {id}."),
                Err(error) => eprintln!("Warning: the puzzle was not persisted: {error}"),
            }
            match args.export {
                Some(dir) => export_pieces(&generated, &dir),
                None => 0,
            }
        }
        Err(error) => {
            eprintln!("Error: {error}");
            1
        }
    }
}

/// Load the history in the background and print it through the display
/// adapter, one line per entry with its stable identity.
fn list_history(generator: &JigsawGenerator) -> u8 {
    let entries: Vec<HistoryEntry> = match generator.load_history().wait() {
        Ok(e) => e,
        Err(error) => {
            eprintln!("Error: {error}");
            return 1;
        }
    };

    let mut list: ListAdapter<HistoryEntry> = ListAdapter::new();
    list.set_items(entries);
    for position in 0..list.len() {
        let entry: &HistoryEntry = list
            .item_at(position)
            .expect("Cannot retrieve the history entry");
        let identity: u64 = list
            .identity_of(position)
            .expect("Cannot retrieve the entry identity");
        println!(
            "{identity:>4}  set {}  {}  {}",
            entry.id,
            entry.created_at.format("%Y-%m-%d %H:%M:%S"),
            entry.difficulty
        );
    }
    0
}

/// Reload one stored puzzle set and print its shape.
fn show_set(store: &dyn HistoryStore, id: StoredId) -> u8 {
    let set: PuzzleSet = match store.load(id) {
        Ok(s) => s,
        Err(error) => {
            eprintln!("Error: {error}");
            return 1;
        }
    };

    let (rows, columns) = set.difficulty.grid();
    println!(
        "Set {id}: {} ({rows}x{columns}), {} pieces, seed {}, created {}",
        set.difficulty,
        set.pieces.len(),
        set.seed,
        set.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    0
}

/// Write every piece buffer of the generated set as a PNG file.
fn export_pieces(generated: &Generated, dir: &PathBuf) -> u8 {
    if let Err(error) = fs::create_dir_all(dir) {
        eprintln!("Error: cannot create {}: {error}", dir.display());
        return 1;
    }
    for piece in &generated.set.pieces {
        let path: PathBuf = dir.join(format!(
            "piece_{}_{}.png",
            piece.spec.row, piece.spec.column
        ));
        if let Err(error) = piece.image.save(&path) {
            eprintln!("Error: cannot write {}: {error}", path.display());
            return 1;
        }
    }
    println!(
        "Exported {} pieces to {}.",
        generated.set.pieces.len(),
        dir.display()
    );
    0
}
