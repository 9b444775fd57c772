/*
difficulty.rs

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

//! Map a difficulty level to a puzzle grid shape.
//!
//! The table in [`Difficulty::grid`] is the single source of truth for the
//! puzzle coarseness: changing how many pieces a level produces means
//! changing only that table.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::FromRepr;

/// Puzzle difficulty level.
///
/// Host dialogs report the selected level as an index; use
/// [`Difficulty::from_repr`] to map the index back to a variant.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialOrd,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    FromRepr,
    Default,
)]
#[repr(i32)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl Difficulty {
    /// Return the puzzle grid shape as (rows, columns) for this level.
    ///
    /// The mapping is total: every level has a grid, and a higher level
    /// always produces strictly more pieces.
    pub fn grid(&self) -> (usize, usize) {
        match self {
            Difficulty::Easy => (3, 3),
            Difficulty::Medium => (6, 6),
            Difficulty::Hard => (9, 9),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_shapes_are_valid() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let (rows, columns) = difficulty.grid();
            assert!(rows >= 1, "{difficulty} has no rows");
            assert!(columns >= 1, "{difficulty} has no columns");
        }
    }

    #[test]
    fn higher_level_means_strictly_more_pieces() {
        let (easy_rows, easy_columns) = Difficulty::Easy.grid();
        let (medium_rows, medium_columns) = Difficulty::Medium.grid();
        let (hard_rows, hard_columns) = Difficulty::Hard.grid();

        assert!(easy_rows * easy_columns < medium_rows * medium_columns);
        assert!(medium_rows * medium_columns < hard_rows * hard_columns);
    }

    #[test]
    fn from_dialog_index() {
        assert_eq!(Difficulty::from_repr(0), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_repr(1), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_repr(2), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_repr(3), None);
    }
}
