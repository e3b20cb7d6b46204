//! Gaussian kernel weights on an integer lattice with toroidal addressing

use crate::math::interpolation::clamp;
use std::f32::consts::PI;

/// Weight of a 2D Gaussian with standard deviation `sigma` at integer offset `(x, y)`
///
/// The value is clamped to `[0, 1]` before use.
pub fn gaussian_weight(x: i32, y: i32, sigma: f32) -> f32 {
    let variance = sigma * sigma;
    let a = 1.0 / (2.0 * PI * variance);
    let b = (x * x + y * y) as f32 / (2.0 * variance);
    clamp(a * (-b).exp(), 0.0, 1.0)
}

/// Square kernel of side `2 * radius + 1`, stored row-major with the center at `radius`
#[derive(Debug, Clone)]
pub struct GaussianKernel {
    radius: i32,
    weights: Vec<f32>,
}

impl GaussianKernel {
    /// Sample [`gaussian_weight`] at every offset in `-radius..=radius` on both axes
    pub fn new(radius: usize, sigma: f32) -> Self {
        let radius = radius as i32;
        let mut weights = Vec::with_capacity(((2 * radius + 1) * (2 * radius + 1)) as usize);
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                weights.push(gaussian_weight(dx, dy, sigma));
            }
        }
        Self { radius, weights }
    }

    /// Kernel radius in pixels
    pub const fn radius(&self) -> i32 {
        self.radius
    }

    /// Iterate `(dx, dy, weight)` over every kernel tap
    pub fn taps(&self) -> impl Iterator<Item = (i32, i32, f32)> + '_ {
        let side = 2 * self.radius + 1;
        self.weights.iter().enumerate().map(move |(i, w)| {
            let i = i as i32;
            (i % side - self.radius, i / side - self.radius, *w)
        })
    }
}

/// Euclidean remainder that always lands in `0..n`
///
/// `n` must be non-zero.
#[inline]
pub const fn wrap(value: i64, n: usize) -> usize {
    value.rem_euclid(n as i64) as usize
}
