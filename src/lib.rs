/*
lib.rs

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

//! Turn a drawing into a jigsaw puzzle.
//!
//! The pipeline starts from a snapshot of the user's drawing (an RGBA pixel
//! buffer) and a [`generator::difficulty::Difficulty`] level:
//!
//! * The [`generator`] module maps the difficulty to a grid shape and draws a
//!   random, seeded set of interlocking edge profiles for the grid.
//! * The [`raster`] module cuts the snapshot into one masked image per piece,
//!   following those profiles.
//! * The [`jigsaw`] module runs the two previous steps on a background thread
//!   and hands the finished [`history::PuzzleSet`] both to the caller and to a
//!   [`history::HistoryStore`] for persistence.
//! * The [`adapter`] module presents stored puzzles to a UI list while keeping
//!   one stable identity per displayed item.
//!
//! The [`cli_options`] module exposes the pipeline as a small command-line
//! tool, standing in for the drawing surface that a host application would
//! provide.

pub mod adapter;
pub mod cli_options;
pub mod generator;
pub mod history;
pub mod jigsaw;
pub mod raster;
pub mod saver;
