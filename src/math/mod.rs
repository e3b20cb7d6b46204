//! Mathematical utilities for the blending engine

/// Linear interpolation and epsilon-banded comparisons
pub mod interpolation;
/// Gaussian kernel weights and toroidal coordinate wrapping
pub mod kernel;
