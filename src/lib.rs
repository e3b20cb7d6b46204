//! Seamless tiling of oversized PBR texture captures
//!
//! A capture holds more material than one tile: a base tile plus separately rendered
//! corner and edge regions that are seamless across their own center lines. The
//! engine relocates that seamless content onto the tile boundary and blends it with
//! the base using influence fields, height comparisons and coherent noise, producing
//! one texture set that repeats without visible seams.

#![forbid(unsafe_code)]

/// Seam blends and the fixed tiling pipeline
pub mod algorithm;
/// Influence fields, blur and noise perturbation
pub mod field;
/// Input/output operations and error handling
pub mod io;
/// Interpolation and kernel utilities
pub mod math;
/// Geometry, atlas layouts and region extraction
pub mod spatial;
/// PBR map data model and pixel blending
pub mod texture;

pub use algorithm::executor::{SeamPipeline, Stage, TilingConfig};
pub use io::error::{Result, TilingError};
