//! Radial influence fields
//!
//! A tile claims the pixels near its center most strongly: influence is 1 inside an
//! inner radius, ramps linearly to 0 at half the tile width, and is then shaped by a
//! sharpness exponent.

use crate::math::interpolation::clamp;
use crate::spatial::geometry::Size;
use clap::ValueEnum;
use ndarray::{Array2, Zip};

/// Inner radius choice for the radial falloff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FalloffProfile {
    /// Plateau of one eighth of the tile width
    #[default]
    Soft,
    /// Plateau of one thirty-second of the tile width
    Sharp,
}

impl FalloffProfile {
    /// Radius below which influence stays saturated
    pub const fn inner_radius(self, width: usize) -> usize {
        match self {
            Self::Soft => width / 8,
            Self::Sharp => width / 32,
        }
    }
}

/// Role a tile plays in the seam composite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileRole {
    /// The tile whose center content survives
    Base,
    /// Source of the content relocated to the tile corners
    Corner,
    /// Source of the content relocated to the tile edges
    Edge,
}

/// Per-pixel claim strength of a tile, in `[0, 1]` after construction
#[derive(Debug, Clone, PartialEq)]
pub struct InfluenceField {
    values: Array2<f32>,
}

impl InfluenceField {
    /// Field with no claim anywhere
    pub fn empty(size: Size) -> Self {
        Self {
            values: Array2::zeros(size.shape()),
        }
    }

    /// Field with the same claim everywhere
    pub fn uniform(size: Size, value: f32) -> Self {
        Self {
            values: Array2::from_elem(size.shape(), value),
        }
    }

    /// Wrap existing values indexed `(y, x)`
    pub const fn from_values(values: Array2<f32>) -> Self {
        Self { values }
    }

    /// Radial falloff from the tile center raised to `exponent`
    ///
    /// The ramp runs from the profile's inner radius to `width / 2`, so influence
    /// reaches zero at half the tile width rather than at `3 * width / 8`.
    pub fn radial(size: Size, profile: FalloffProfile, exponent: f32) -> Self {
        let center_x = (size.width / 2) as f32;
        let center_y = (size.height / 2) as f32;
        let inner = profile.inner_radius(size.width) as f32;
        let outer = (size.width / 2) as f32;
        let span = (outer - inner).max(1.0);

        let mut values = Array2::zeros(size.shape());
        Zip::indexed(&mut values).par_for_each(|(y, x), value| {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let distance = dx.hypot(dy);
            let ramp = clamp((distance - inner) / span, 0.0, 1.0);
            *value = clamp((1.0 - ramp).powf(exponent), 0.0, 1.0);
        });

        Self { values }
    }

    /// Field for a tile of the given role
    ///
    /// All roles currently share the radial formula; they stay separate so each role
    /// can be tuned on its own.
    pub fn for_role(role: TileRole, size: Size, profile: FalloffProfile, exponent: f32) -> Self {
        match role {
            TileRole::Base | TileRole::Corner | TileRole::Edge => {
                Self::radial(size, profile, exponent)
            }
        }
    }

    /// Grid size
    pub fn size(&self) -> Size {
        Size::from_shape(self.values.dim())
    }

    /// Influence at `(x, y)`
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        self.values.get((y, x)).copied()
    }

    /// Underlying values indexed `(y, x)`
    pub const fn values(&self) -> &Array2<f32> {
        &self.values
    }

    /// Mutable values; the shape cannot change through this view
    pub fn values_mut(&mut self) -> ndarray::ArrayViewMut2<'_, f32> {
        self.values.view_mut()
    }

    /// Clamp every value back into `[0, 1]`
    pub fn clamp_unit(&mut self) {
        self.values.par_mapv_inplace(|v| clamp(v, 0.0, 1.0));
    }
}
