//! PBR map storage
//!
//! All channels of one pixel live in a single [`Texel`], so every channel buffer of a
//! map shares the same `width × height` grid by construction. Pixel `(x, y)` sits at
//! `(y, x)` in the underlying row-major array.

use crate::spatial::geometry::Size;
use crate::texture::texel::Texel;
use ndarray::Array2;

/// A full PBR texture set over one pixel grid
#[derive(Debug, Clone, PartialEq)]
pub struct PbrMap {
    texels: Array2<Texel>,
}

impl PbrMap {
    /// Allocate a map of `size` filled with default texels
    pub fn new(size: Size) -> Self {
        Self {
            texels: Array2::from_elem(size.shape(), Texel::default()),
        }
    }

    /// Allocate a map where every pixel holds `texel`
    pub fn filled(size: Size, texel: Texel) -> Self {
        Self {
            texels: Array2::from_elem(size.shape(), texel),
        }
    }

    /// Wrap an existing texel grid indexed `(y, x)`
    ///
    /// The grid is copied into standard row-major layout if it is not already.
    pub fn from_texels(texels: Array2<Texel>) -> Self {
        let texels = if texels.is_standard_layout() {
            texels
        } else {
            texels.as_standard_layout().into_owned()
        };
        Self { texels }
    }

    /// Grid size
    pub fn size(&self) -> Size {
        Size::from_shape(self.texels.dim())
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.texels.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.texels.nrows()
    }

    /// Texel at `(x, y)`
    pub fn get(&self, x: usize, y: usize) -> Option<&Texel> {
        self.texels.get((y, x))
    }

    /// Mutable texel at `(x, y)`
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Texel> {
        self.texels.get_mut((y, x))
    }

    /// Underlying texel grid indexed `(y, x)`
    pub const fn texels(&self) -> &Array2<Texel> {
        &self.texels
    }

    /// Mutable texel grid; the shape cannot change through this view
    pub fn texels_mut(&mut self) -> ndarray::ArrayViewMut2<'_, Texel> {
        self.texels.view_mut()
    }
}
