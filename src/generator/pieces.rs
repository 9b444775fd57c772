/*
pieces.rs

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

//! Per-piece cutting specifications.
//!
//! The [`piece_specs`] function combines an [`EdgeMap`] with the source
//! image dimensions and produces one [`PieceSpec`] per grid cell: the cell's
//! base pixel region plus its four edge profiles.
//! The base regions partition the source image exactly; division remainders
//! go to the last row and column.

use serde::{Deserialize, Serialize};

use super::edges::{CellProfiles, EdgeMap, EdgeProfile};

/// A rectangular pixel region of the source image.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CellRect {
    /// Return whether the pixel at (x, y) lies inside the region.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Cutting specification for one puzzle piece: its grid coordinate, the
/// four edge profiles bounding it, and the base pixel region it claims.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct PieceSpec {
    /// Grid row of the piece, starting at 0 for the top row.
    pub row: usize,

    /// Grid column of the piece, starting at 0 for the left column.
    pub column: usize,

    pub top: EdgeProfile,
    pub right: EdgeProfile,
    pub bottom: EdgeProfile,
    pub left: EdgeProfile,

    /// Base pixel region of the piece, before tabs and blanks reshape the
    /// silhouette.
    pub region: CellRect,
}

/// Build the cutting specification of every grid cell.
///
/// Cells are emitted in row-major order. Each base region is
/// `width / columns` by `height / rows` pixels, except that the last column
/// and the last row absorb the division remainder, so the union of all
/// regions covers the source exactly with no gaps and no overlaps.
pub fn piece_specs(edge_map: &EdgeMap, width: u32, height: u32) -> Vec<PieceSpec> {
    let (rows, columns) = edge_map.grid();
    let cell_width: u32 = width / columns as u32;
    let cell_height: u32 = height / rows as u32;

    let mut specs: Vec<PieceSpec> = Vec::with_capacity(rows * columns);
    for row in 0..rows {
        for column in 0..columns {
            let x: u32 = column as u32 * cell_width;
            let y: u32 = row as u32 * cell_height;
            let region: CellRect = CellRect {
                x,
                y,
                width: if column + 1 == columns {
                    width - x
                } else {
                    cell_width
                },
                height: if row + 1 == rows { height - y } else { cell_height },
            };
            let profiles: CellProfiles = edge_map.profiles(row, column);
            specs.push(PieceSpec {
                row,
                column,
                top: profiles.top,
                right: profiles.right,
                bottom: profiles.bottom,
                left: profiles.left,
                region,
            });
        }
    }
    specs
}
