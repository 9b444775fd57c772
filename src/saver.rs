/*
saver.rs

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

//! Implementations of the [`crate::history::HistoryStore`] contract.
//!
//! The [`history::FileHistoryStore`] object persists puzzle sets under a
//! data directory, one subdirectory per set with the piece images as PNG
//! files and the set metadata as JSON.
//! The [`memory::MemoryHistoryStore`] object keeps sets in memory for hosts
//! without durable storage and for tests.

pub mod history;
pub mod memory;
