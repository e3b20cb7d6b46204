//! Working tiles

use crate::field::influence::InfluenceField;
use crate::spatial::geometry::Size;
use crate::texture::pbr::PbrMap;

/// A working-resolution PBR map together with its influence field
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    /// Channel content
    pub map: PbrMap,
    /// Per-pixel claim strength of this tile
    pub influence: InfluenceField,
}

impl Tile {
    /// Allocate a tile of `size` with default texels and no influence anywhere
    pub fn new(size: Size) -> Self {
        Self {
            map: PbrMap::new(size),
            influence: InfluenceField::empty(size),
        }
    }

    /// Pair an existing map with an influence field
    ///
    /// # Errors
    ///
    /// Returns an error if the field and map sizes differ
    pub fn from_parts(map: PbrMap, influence: InfluenceField) -> crate::io::error::Result<Self> {
        if map.size() != influence.size() {
            return Err(crate::io::error::TilingError::DimensionMismatch {
                what: "influence field",
                expected: map.size(),
                found: influence.size(),
            });
        }
        Ok(Self { map, influence })
    }

    /// Grid size shared by the map and the field
    pub fn size(&self) -> Size {
        self.map.size()
    }
}
