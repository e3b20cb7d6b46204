//! Geometry primitives shared by extraction and placement

use std::fmt;
use std::ops::Range;

/// Width and height of a pixel grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
}

impl Size {
    /// Create a size from width and height
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Check for a zero-area grid
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Shape in `ndarray` order (rows, cols)
    pub const fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Build from an `ndarray` shape (rows, cols)
    pub const fn from_shape(shape: (usize, usize)) -> Self {
        Self {
            width: shape.1,
            height: shape.0,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Integer pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    /// Column
    pub x: usize,
    /// Row
    pub y: usize,
}

impl Point {
    /// Create a point
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left column
    pub x: usize,
    /// Top row
    pub y: usize,
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
}

impl Rect {
    /// Create a rectangle
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of `size` placed at `origin`
    pub const fn at(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Size of the rectangle
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Row span
    pub const fn rows(&self) -> Range<usize> {
        self.y..self.y + self.height
    }

    /// Column span
    pub const fn cols(&self) -> Range<usize> {
        self.x..self.x + self.width
    }

    /// Check whether the rectangle lies entirely inside a grid of `bounds`
    pub const fn fits_within(&self, bounds: Size) -> bool {
        self.x + self.width <= bounds.width && self.y + self.height <= bounds.height
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] {}x{}",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Maps tile-local coordinates to flat indices in the tile and in a wider source
///
/// Row-major layout in both strides: `i = y * stride + x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexMapping {
    /// Row stride of the working tile
    pub local_stride: usize,
    /// Row stride of the wide source the tile is cut from
    pub wide_stride: usize,
}

impl IndexMapping {
    /// Mapping between a tile of `local_stride` and a source of `wide_stride`
    pub const fn new(local_stride: usize, wide_stride: usize) -> Self {
        Self {
            local_stride,
            wide_stride,
        }
    }

    /// Flat index of `(x, y)` in the tile
    pub const fn local(&self, x: usize, y: usize) -> usize {
        y * self.local_stride + x
    }

    /// Flat index in the wide source of tile pixel `(x, y)` shifted by `offset`
    pub const fn wide(&self, x: usize, y: usize, offset: Point) -> usize {
        (y + offset.y) * self.wide_stride + (x + offset.x)
    }
}
