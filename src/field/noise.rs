//! Coherent fractal noise perturbation of influence and height
//!
//! Each tile gets its own noise instance. Sharing one pattern between tiles would
//! stamp the same structure onto every seam and bring back visible repetition.

use crate::field::influence::InfluenceField;
use crate::io::configuration::{
    NOISE_FREQUENCY_SCALE, NOISE_GAIN, NOISE_LACUNARITY, NOISE_OCTAVES,
};
use crate::math::interpolation::{clamp, mix};
use crate::texture::pbr::PbrMap;
use ndarray::Zip;
use ::noise::{Fbm, MultiFractal, NoiseFn, OpenSimplex};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Fractal parameters shared by every noise instance of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseSettings {
    /// Number of octaves summed
    pub octaves: usize,
    /// Amplitude multiplier between octaves
    pub gain: f64,
    /// Frequency multiplier between octaves
    pub lacunarity: f64,
    /// Base frequency times tile width
    pub frequency_scale: f64,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            octaves: NOISE_OCTAVES,
            gain: NOISE_GAIN,
            lacunarity: NOISE_LACUNARITY,
            frequency_scale: NOISE_FREQUENCY_SCALE,
        }
    }
}

/// Seeded fractal noise sampled at integer pixel coordinates
pub struct FractalNoise {
    fbm: Fbm<OpenSimplex>,
}

impl FractalNoise {
    /// Noise for a tile `tile_width` pixels wide; frequency scales inversely with width
    pub fn new(seed: u32, tile_width: usize, settings: &NoiseSettings) -> Self {
        let frequency = settings.frequency_scale / tile_width.max(1) as f64;
        let fbm = Fbm::<OpenSimplex>::new(seed)
            .set_octaves(settings.octaves)
            .set_frequency(frequency)
            .set_lacunarity(settings.lacunarity)
            .set_persistence(settings.gain);
        Self { fbm }
    }

    /// Noise at pixel `(x, y)` mapped from `[-1, 1]` into `[0, 1]`
    pub fn sample_unit(&self, x: usize, y: usize) -> f32 {
        let value = self.fbm.get([x as f64, y as f64]) as f32;
        clamp(value.mul_add(0.5, 0.5), 0.0, 1.0)
    }
}

/// Hands out an independent seed for every noise instance of a run
#[derive(Debug, Clone)]
pub struct NoiseSeeds {
    rng: StdRng,
}

impl NoiseSeeds {
    /// Deterministic seed stream for a run seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Next per-instance seed
    pub fn next_seed(&mut self) -> u32 {
        self.rng.random()
    }
}

// Mix toward noise, then pull back toward the original value weighted by itself
fn perturb_unclamped(value: f32, noise: f32, strength: f32) -> f32 {
    let noisy = clamp(mix(value, noise, strength), 0.0, 1.0);
    (1.0 - value).mul_add(noisy, value)
}

/// Mix noise into an influence field at `strength`
///
/// The noise effect is itself weighted by the existing influence, so saturated
/// pixels stay saturated.
pub fn perturb_influence(field: &mut InfluenceField, noise: &FractalNoise, strength: f32) {
    Zip::indexed(field.values_mut()).par_for_each(|(y, x), value| {
        *value = perturb_unclamped(*value, noise.sample_unit(x, y), strength);
    });
    field.clamp_unit();
}

/// Write the noise-perturbed height channel from the raw height
///
/// The raw height channel is left untouched.
pub fn perturb_height(map: &mut PbrMap, noise: &FractalNoise, strength: f32) {
    Zip::indexed(map.texels_mut()).par_for_each(|(y, x), texel| {
        let height = perturb_unclamped(texel.height, noise.sample_unit(x, y), strength);
        texel.height_noise = clamp(height, 0.0, 1.0);
    });
}
