/*
raster.rs

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

//! Cut the source image into per-piece pixel buffers.
//!
//! The silhouette of a piece is its base cell rectangle, reshaped by one
//! circular lobe per interlocking edge: a tab adds the lobe disc centered on
//! the shared-edge midpoint, a blank removes the neighbor's disc from the
//! cell.
//! Pixel ownership under a lobe is unambiguous: every pixel of the disc
//! belongs to the piece that owns the tab, never to the neighbor the tab
//! bulges into.
//! Because the same disc is added on one side and subtracted on the other,
//! the piece silhouettes tile the source image exactly.

use image::{GrayImage, Luma, RgbaImage};
use log::debug;
use std::error::Error;
use std::fmt;

use crate::generator::edges::EdgeProfile;
use crate::generator::pieces::PieceSpec;

/// Smallest usable cell dimension in pixels. Below this, tabs and blanks
/// degenerate and pieces become unusable slivers.
pub const MIN_CELL_SIZE: u32 = 16;

/// Lobe radius as a fraction of the shorter base cell dimension, so pieces
/// scale consistently across image sizes.
const LOBE_FRACTION: f32 = 0.2;

/// Type of errors when cutting the source image.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// The source image does not have enough pixels for the requested grid.
    /// The user can retry with a larger canvas or a lower difficulty.
    SourceImageTooSmall {
        width: u32,
        height: u32,
        rows: usize,
        columns: usize,
    },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RasterError::SourceImageTooSmall {
                width,
                height,
                rows,
                columns,
            } => {
                write!(
                    f,
                    "source image {width}x{height} is too small for a {rows}x{columns} puzzle \
                     (every cell needs at least {MIN_CELL_SIZE}x{MIN_CELL_SIZE} pixels)"
                )
            }
        }
    }
}

impl Error for RasterError {}

/// One cut-out puzzle piece: its specification, the rendered RGBA buffer,
/// and the alpha mask of its silhouette.
///
/// The buffer covers the base cell expanded by the lobe extent on every
/// side, clamped to the source image; `origin` locates the buffer's top-left
/// corner within the source. Pixels outside the silhouette are fully
/// transparent and zero in the mask. A piece is immutable once cut.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub spec: PieceSpec,

    /// Top-left corner of the buffer within the source image.
    pub origin: (u32, u32),

    /// Rendered piece pixels, transparent outside the silhouette.
    pub image: RgbaImage,

    /// Silhouette mask: 255 inside the piece, 0 outside.
    pub mask: GrayImage,
}

/// Midpoints of the four cell edges, paired with their profiles.
/// Neighboring cells compute the same midpoint for their shared edge, so
/// both sides agree on the lobe disc.
fn edge_lobes(spec: &PieceSpec) -> [(EdgeProfile, f32, f32); 4] {
    let x: f32 = spec.region.x as f32;
    let y: f32 = spec.region.y as f32;
    let w: f32 = spec.region.width as f32;
    let h: f32 = spec.region.height as f32;
    [
        (spec.top, x + w / 2.0, y),
        (spec.right, x + w, y + h / 2.0),
        (spec.bottom, x + w / 2.0, y + h),
        (spec.left, x, y + h / 2.0),
    ]
}

/// Return whether the center of pixel (x, y) lies inside the lobe disc
/// centered at (cx, cy).
fn in_lobe(x: u32, y: u32, cx: f32, cy: f32, radius: f32) -> bool {
    let dx: f32 = x as f32 + 0.5 - cx;
    let dy: f32 = y as f32 + 0.5 - cy;
    dx * dx + dy * dy <= radius * radius
}

/// Return whether the piece owns the source pixel at (x, y).
///
/// Tab discs claim their pixels outright, including the half that bulges
/// into the neighbor's cell; blank discs give the matching half of the base
/// cell away. Flat edges carry no disc, so boundary pieces never reach past
/// the source edge.
fn owns_pixel(spec: &PieceSpec, radius: f32, x: u32, y: u32) -> bool {
    let lobes: [(EdgeProfile, f32, f32); 4] = edge_lobes(spec);

    for (profile, cx, cy) in lobes {
        if profile == EdgeProfile::Tab && in_lobe(x, y, cx, cy, radius) {
            return true;
        }
    }
    if !spec.region.contains(x, y) {
        return false;
    }
    for (profile, cx, cy) in lobes {
        if profile == EdgeProfile::Blank && in_lobe(x, y, cx, cy, radius) {
            return false;
        }
    }
    true
}

/// Cut one [`Piece`] per specification out of the source image.
///
/// The grid shape must match the one the specifications were built for; it
/// is used to size the lobes and to validate that the source has enough
/// pixels.
///
/// # Errors
///
/// Return [`RasterError::SourceImageTooSmall`] when the source cannot hold
/// `columns` x `rows` cells of at least [`MIN_CELL_SIZE`] pixels each.
pub fn cut_pieces(
    source: &RgbaImage,
    rows: usize,
    columns: usize,
    specs: &[PieceSpec],
) -> Result<Vec<Piece>, RasterError> {
    let (width, height) = source.dimensions();
    if width < columns as u32 * MIN_CELL_SIZE || height < rows as u32 * MIN_CELL_SIZE {
        return Err(RasterError::SourceImageTooSmall {
            width,
            height,
            rows,
            columns,
        });
    }

    let cell_width: u32 = width / columns as u32;
    let cell_height: u32 = height / rows as u32;
    let radius: f32 = LOBE_FRACTION * cell_width.min(cell_height) as f32;
    let extent: u32 = radius.ceil() as u32;
    debug!(
        "Cutting {} pieces, cell {cell_width}x{cell_height}, lobe radius {radius}",
        specs.len()
    );

    let mut pieces: Vec<Piece> = Vec::with_capacity(specs.len());
    for spec in specs {
        let x0: u32 = spec.region.x.saturating_sub(extent);
        let y0: u32 = spec.region.y.saturating_sub(extent);
        let x1: u32 = (spec.region.x + spec.region.width + extent).min(width);
        let y1: u32 = (spec.region.y + spec.region.height + extent).min(height);

        let mut image: RgbaImage = RgbaImage::new(x1 - x0, y1 - y0);
        let mut mask: GrayImage = GrayImage::new(x1 - x0, y1 - y0);
        for y in y0..y1 {
            for x in x0..x1 {
                if owns_pixel(spec, radius, x, y) {
                    image.put_pixel(x - x0, y - y0, *source.get_pixel(x, y));
                    mask.put_pixel(x - x0, y - y0, Luma([255]));
                }
            }
        }

        pieces.push(Piece {
            spec: *spec,
            origin: (x0, y0),
            image,
            mask,
        });
    }
    Ok(pieces)
}
