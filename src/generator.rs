/*
generator.rs

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

//! Compute the geometry of a jigsaw puzzle.
//!
//! The [`difficulty::Difficulty`] level selects the grid shape (rows and
//! columns) of the puzzle.
//!
//! The [`edges::EdgeMap`] object assigns an interlocking profile (tab or
//! blank) to every internal edge of the grid.
//! You create it with the [`edges::EdgeMap::generate`] method, which draws
//! the profiles from a seeded random number generator so that the same seed
//! and grid shape always produce the same puzzle.
//!
//! The [`pieces::piece_specs`] function combines an edge map with the source
//! image dimensions and returns one [`pieces::PieceSpec`] per grid cell.
//! Each spec carries the cell's pixel region and its four edge profiles, and
//! is consumed by the [`crate::raster`] module to cut the actual piece
//! images.

pub mod difficulty;
pub mod edges;
pub mod pieces;
