//! Per-pixel channel bundle

use crate::math::interpolation::{mix, mix_array};

/// Every channel of one PBR pixel
///
/// Colors and scalars live in `0..1`, normals in the signed `-1..1` range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Texel {
    /// Diffuse color, RGBA
    pub diffuse: [f32; 4],
    /// Surface normal, XYZ
    pub normal: [f32; 3],
    /// Raw height
    pub height: f32,
    /// Height after noise perturbation, used for layering comparisons
    pub height_noise: f32,
    /// Roughness
    pub roughness: f32,
    /// Metalness
    pub metalness: f32,
}

impl Default for Texel {
    fn default() -> Self {
        Self {
            diffuse: [0.0, 0.0, 0.0, 1.0],
            normal: [0.0, 0.0, 0.0],
            height: 0.0,
            height_noise: 0.0,
            roughness: 0.0,
            metalness: 0.0,
        }
    }
}

impl Texel {
    /// Build a texel whose noise-perturbed height starts at the raw height
    pub const fn new(
        diffuse: [f32; 4],
        normal: [f32; 3],
        height: f32,
        roughness: f32,
        metalness: f32,
    ) -> Self {
        Self {
            diffuse,
            normal,
            height,
            height_noise: height,
            roughness,
            metalness,
        }
    }

    /// Interpolate every channel independently toward `other` by `f`
    pub fn mix(&self, other: &Self, f: f32) -> Self {
        Self {
            diffuse: mix_array(self.diffuse, other.diffuse, f),
            normal: mix_array(self.normal, other.normal, f),
            height: mix(self.height, other.height, f),
            height_noise: mix(self.height_noise, other.height_noise, f),
            roughness: mix(self.roughness, other.roughness, f),
            metalness: mix(self.metalness, other.metalness, f),
        }
    }
}
