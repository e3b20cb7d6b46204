//! Spatial data structures and atlas region handling
//!
//! This module contains spatial-related functionality including:
//! - Rectangles, points and index mappings between strides
//! - Atlas conventions and the half-swap placements that move seamless content to the seams
//! - Region extraction from the atlas and between tiles

/// Rectangles, points, sizes and stride mappings
pub mod geometry;
/// Atlas conventions and mirrored placements
pub mod layout;
/// Region extraction and chunk copies
pub mod region;

pub use geometry::{IndexMapping, Point, Rect, Size};
pub use layout::AtlasConvention;
