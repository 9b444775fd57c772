/*
edges.rs

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

//! Interlocking edge profiles for the puzzle grid.
//!
//! The [`EdgeMap`] object stores one profile per internal edge of the grid.
//! A profile is recorded from the point of view of one of the two adjoining
//! cells; the other cell always reports the complementary profile, so two
//! neighboring pieces mesh by construction.
//! Edges on the outer grid perimeter are always [`EdgeProfile::Flat`].

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// Profile of one edge of a puzzle piece.
///
/// - a `Tab` is an outward bulge that interlocks into the adjoining piece,
/// - a `Blank` is an inward notch that receives the adjoining piece's tab,
/// - a `Flat` edge is a straight edge on the outer puzzle boundary.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EdgeProfile {
    Tab,
    Blank,
    Flat,
}

impl EdgeProfile {
    /// Return the profile seen from the other side of the same edge.
    ///
    /// A tab on one piece is a blank on its neighbor. Flat edges have no
    /// other side; they complement to themselves.
    pub fn complement(&self) -> Self {
        match self {
            EdgeProfile::Tab => EdgeProfile::Blank,
            EdgeProfile::Blank => EdgeProfile::Tab,
            EdgeProfile::Flat => EdgeProfile::Flat,
        }
    }
}

/// Type of errors when generating the puzzle geometry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// The grid shape has no rows or no columns. This is a configuration
    /// bug: the difficulty table produced a degenerate grid.
    InvalidGrid { rows: usize, columns: usize },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GeometryError::InvalidGrid { rows, columns } => {
                write!(f, "invalid puzzle grid shape {rows}x{columns}")
            }
        }
    }
}

impl Error for GeometryError {}

/// The four edge profiles of one grid cell, in display order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CellProfiles {
    pub top: EdgeProfile,
    pub right: EdgeProfile,
    pub bottom: EdgeProfile,
    pub left: EdgeProfile,
}

/// Edge profiles for every internal edge of an R x C puzzle grid.
///
/// Horizontal edges are stored from the point of view of the upper cell
/// (its bottom side), vertical edges from the point of view of the left
/// cell (its right side).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EdgeMap {
    rows: usize,
    columns: usize,

    /// Profile of the edge below cell (r, c), for r in 0..rows-1.
    /// Indexed by r * columns + c.
    horizontal: Vec<EdgeProfile>,

    /// Profile of the edge right of cell (r, c), for c in 0..columns-1.
    /// Indexed by r * (columns - 1) + c.
    vertical: Vec<EdgeProfile>,
}

impl EdgeMap {
    /// Draw a complete set of edge profiles for the given grid shape.
    ///
    /// Internal edges are visited in row-major cell order (each cell draws
    /// its right edge, then its bottom edge) so that the same seed and grid
    /// shape always produce bit-identical output. This makes puzzles
    /// reproducible from a persisted seed instead of persisted pixels.
    ///
    /// # Errors
    ///
    /// Return [`GeometryError::InvalidGrid`] when `rows` or `columns` is
    /// zero.
    pub fn generate(rows: usize, columns: usize, seed: u64) -> Result<Self, GeometryError> {
        if rows < 1 || columns < 1 {
            return Err(GeometryError::InvalidGrid { rows, columns });
        }

        debug!("Generating edge profiles for a {rows}x{columns} grid, seed {seed}");

        let mut rng: StdRng = StdRng::seed_from_u64(seed);
        let mut horizontal: Vec<EdgeProfile> = Vec::with_capacity((rows - 1) * columns);
        let mut vertical: Vec<EdgeProfile> = Vec::with_capacity(rows * (columns - 1));

        // The two vectors are filled in the same cell order that the loop
        // visits, so indexing in profiles() stays row-major.
        for row in 0..rows {
            for column in 0..columns {
                if column + 1 < columns {
                    vertical.push(Self::draw(&mut rng));
                }
                if row + 1 < rows {
                    horizontal.push(Self::draw(&mut rng));
                }
            }
        }

        // horizontal was filled cell by cell within each row except the
        // last, which matches the r * columns + c indexing. vertical skips
        // the last column, hence r * (columns - 1) + c.
        Ok(Self {
            rows,
            columns,
            horizontal,
            vertical,
        })
    }

    /// Draw a tab or a blank with equal probability.
    fn draw(rng: &mut StdRng) -> EdgeProfile {
        if rng.random_bool(0.5) {
            EdgeProfile::Tab
        } else {
            EdgeProfile::Blank
        }
    }

    /// Return the grid shape as (rows, columns).
    pub fn grid(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// Return the four edge profiles of the given cell.
    ///
    /// Perimeter sides are [`EdgeProfile::Flat`]; internal sides report the
    /// stored profile, or its complement when the cell is on the far side
    /// of the stored edge.
    pub fn profiles(&self, row: usize, column: usize) -> CellProfiles {
        let top: EdgeProfile = if row == 0 {
            EdgeProfile::Flat
        } else {
            self.horizontal[(row - 1) * self.columns + column].complement()
        };
        let bottom: EdgeProfile = if row + 1 == self.rows {
            EdgeProfile::Flat
        } else {
            self.horizontal[row * self.columns + column]
        };
        let left: EdgeProfile = if column == 0 {
            EdgeProfile::Flat
        } else {
            self.vertical[row * (self.columns - 1) + column - 1].complement()
        };
        let right: EdgeProfile = if column + 1 == self.columns {
            EdgeProfile::Flat
        } else {
            self.vertical[row * (self.columns - 1) + column]
        };

        CellProfiles {
            top,
            right,
            bottom,
            left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_grids() {
        assert_eq!(
            EdgeMap::generate(0, 3, 1),
            Err(GeometryError::InvalidGrid { rows: 0, columns: 3 })
        );
        assert_eq!(
            EdgeMap::generate(4, 0, 1),
            Err(GeometryError::InvalidGrid { rows: 4, columns: 0 })
        );
    }

    #[test]
    fn same_seed_same_profiles() {
        for seed in [0, 1, 42, u64::MAX] {
            let first: EdgeMap = EdgeMap::generate(5, 4, seed).unwrap();
            let second: EdgeMap = EdgeMap::generate(5, 4, seed).unwrap();
            assert_eq!(first, second, "seed {seed} is not reproducible");
        }
    }

    #[test]
    fn neighbors_report_complementary_profiles() {
        for (rows, columns) in [(1, 1), (1, 5), (5, 1), (3, 3), (2, 5), (6, 4)] {
            for seed in [0, 7, 42] {
                let map: EdgeMap = EdgeMap::generate(rows, columns, seed).unwrap();
                for row in 0..rows {
                    for column in 0..columns {
                        let cell: CellProfiles = map.profiles(row, column);
                        if column + 1 < columns {
                            let neighbor: CellProfiles = map.profiles(row, column + 1);
                            assert_eq!(cell.right, neighbor.left.complement());
                            assert_ne!(cell.right, EdgeProfile::Flat);
                        }
                        if row + 1 < rows {
                            let neighbor: CellProfiles = map.profiles(row + 1, column);
                            assert_eq!(cell.bottom, neighbor.top.complement());
                            assert_ne!(cell.bottom, EdgeProfile::Flat);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn perimeter_is_flat() {
        let map: EdgeMap = EdgeMap::generate(3, 3, 11).unwrap();
        for i in 0..3 {
            assert_eq!(map.profiles(0, i).top, EdgeProfile::Flat);
            assert_eq!(map.profiles(2, i).bottom, EdgeProfile::Flat);
            assert_eq!(map.profiles(i, 0).left, EdgeProfile::Flat);
            assert_eq!(map.profiles(i, 2).right, EdgeProfile::Flat);
        }
    }

    #[test]
    fn three_by_three_has_twelve_internal_edges() {
        let map: EdgeMap = EdgeMap::generate(3, 3, 5).unwrap();
        let mut internal: usize = 0;
        let mut flat: usize = 0;
        for row in 0..3 {
            for column in 0..3 {
                let cell: CellProfiles = map.profiles(row, column);
                for profile in [cell.top, cell.right, cell.bottom, cell.left] {
                    if profile == EdgeProfile::Flat {
                        flat += 1;
                    } else {
                        internal += 1;
                    }
                }
            }
        }
        // Internal edges are seen from both sides, boundary edges from one.
        assert_eq!(internal, 24);
        assert_eq!(flat, 12);
    }

    #[test]
    fn single_cell_is_all_flat() {
        let map: EdgeMap = EdgeMap::generate(1, 1, 3).unwrap();
        let cell: CellProfiles = map.profiles(0, 0);
        assert_eq!(cell.top, EdgeProfile::Flat);
        assert_eq!(cell.right, EdgeProfile::Flat);
        assert_eq!(cell.bottom, EdgeProfile::Flat);
        assert_eq!(cell.left, EdgeProfile::Flat);
    }
}
