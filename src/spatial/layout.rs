//! Atlas conventions and the mirrored placements used to build seam composites
//!
//! Source tiles are seamless across their own center lines. Swapping the halves of
//! a tile moves those center lines onto the tile boundary, which is exactly where
//! the repeated tile needs continuous content.

use crate::io::error::{Result, TilingError};
use crate::spatial::geometry::{Point, Rect, Size};
use clap::ValueEnum;

/// How the oversized capture is divided into tile-role regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AtlasConvention {
    /// 2×2 grid: base, corner source, top/bottom edge source, left/right edge source
    #[default]
    Quad,
    /// 3×1 strip: base, corner source, shared edge source
    Strip,
}

/// Top-left corners of every source region in the atlas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePlacements {
    /// Region holding the base tile
    pub base: Point,
    /// Region supplying the corner composite
    pub corner: Point,
    /// Region supplying the top/bottom edge composite
    pub top_bottom_edge: Point,
    /// Region supplying the left/right edge composite, `None` when it shares the top/bottom source
    pub left_right_edge: Option<Point>,
}

impl AtlasConvention {
    /// Number of tile columns and rows in the atlas
    pub const fn grid(self) -> (usize, usize) {
        match self {
            Self::Quad => (2, 2),
            Self::Strip => (3, 1),
        }
    }

    /// Working tile resolution for an atlas of `atlas` pixels
    ///
    /// # Errors
    ///
    /// Returns an error if the atlas is too small to hold one pixel per tile
    pub fn tile_size(self, atlas: Size) -> Result<Size> {
        let (cols, rows) = self.grid();
        let tile = Size::new(atlas.width / cols, atlas.height / rows);
        if tile.is_empty() {
            return Err(TilingError::InvalidSourceData {
                reason: format!("atlas {atlas} is too small for a {cols}x{rows} layout"),
            });
        }
        Ok(tile)
    }

    /// Where each source region starts, for tiles of `tile` pixels
    pub const fn placements(self, tile: Size) -> SourcePlacements {
        match self {
            Self::Quad => SourcePlacements {
                base: Point::new(0, 0),
                corner: Point::new(tile.width, 0),
                top_bottom_edge: Point::new(0, tile.height),
                left_right_edge: Some(Point::new(tile.width, tile.height)),
            },
            Self::Strip => SourcePlacements {
                base: Point::new(0, 0),
                corner: Point::new(tile.width, 0),
                top_bottom_edge: Point::new(tile.width * 2, 0),
                left_right_edge: None,
            },
        }
    }

    /// Number of source regions extracted from the atlas
    pub const fn source_count(self) -> usize {
        match self {
            Self::Quad => 4,
            Self::Strip => 3,
        }
    }
}

/// One rectangle copy from a source tile into a destination tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    /// Region read from the source tile
    pub from: Rect,
    /// Top-left corner of the destination region
    pub to: Point,
}

impl Transfer {
    const fn new(from: Rect, to: Point) -> Self {
        Self { from, to }
    }
}

// Splits an axis of `len` into the part before the center line and the part after it
const fn halves(len: usize) -> (usize, usize) {
    let head = len / 2;
    (head, len - head)
}

/// Swap all four quadrants diagonally so the source center lands on the tile corners
pub const fn corner_swaps(size: Size) -> [Transfer; 4] {
    let (left, right) = halves(size.width);
    let (top, bottom) = halves(size.height);
    [
        Transfer::new(Rect::new(left, top, right, bottom), Point::new(0, 0)),
        Transfer::new(Rect::new(0, top, left, bottom), Point::new(right, 0)),
        Transfer::new(Rect::new(left, 0, right, top), Point::new(0, bottom)),
        Transfer::new(Rect::new(0, 0, left, top), Point::new(right, bottom)),
    ]
}

/// Swap the top and bottom halves so the horizontal center line lands on the top/bottom seam
pub const fn top_bottom_swaps(size: Size) -> [Transfer; 2] {
    let (top, bottom) = halves(size.height);
    [
        Transfer::new(Rect::new(0, top, size.width, bottom), Point::new(0, 0)),
        Transfer::new(Rect::new(0, 0, size.width, top), Point::new(0, bottom)),
    ]
}

/// Swap the left and right halves so the vertical center line lands on the left/right seam
pub const fn left_right_swaps(size: Size) -> [Transfer; 2] {
    let (left, right) = halves(size.width);
    [
        Transfer::new(Rect::new(left, 0, right, size.height), Point::new(0, 0)),
        Transfer::new(Rect::new(0, 0, left, size.height), Point::new(right, 0)),
    ]
}
