//! PBR texture data model and the per-pixel blend primitive

/// Tiles pairing a PBR map with its influence field
pub mod tile;
/// Whole-map channel storage
pub mod pbr;
/// Single-pixel copy, mix and blend factor decisions
pub mod pixel;
/// Per-pixel channel bundle
pub mod texel;

pub use pbr::PbrMap;
pub use texel::Texel;
pub use tile::Tile;
