//! Scalar weight fields: influence generation, smoothing and noise perturbation

/// Toroidal Gaussian smoothing
pub mod blur;
/// Radial influence fields per tile role
pub mod influence;
/// Coherent fractal noise perturbation
pub mod noise;

pub use influence::{FalloffProfile, InfluenceField, TileRole};
