//! Tests for fractal noise sampling and influence/height perturbation

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use seamtile::field::influence::{FalloffProfile, InfluenceField};
    use seamtile::field::noise::{
        FractalNoise, NoiseSeeds, NoiseSettings, perturb_height, perturb_influence,
    };
    use seamtile::spatial::geometry::Size;
    use seamtile::texture::{PbrMap, Texel};

    fn noise(seed: u32) -> FractalNoise {
        FractalNoise::new(seed, 32, &NoiseSettings::default())
    }

    // Tests samples are mapped into the unit interval
    // Verified by returning the raw fractal value
    #[test]
    fn test_samples_in_unit_range() {
        let noise = noise(3);
        for y in 0..32 {
            for x in 0..32 {
                let v = noise.sample_unit(x, y);
                assert!((0.0..=1.0).contains(&v), "sample {v} at ({x}, {y})");
            }
        }
    }

    // Tests equal seeds give equal patterns and different seeds differ
    // Verified by seeding every instance with zero
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_seeded_patterns() {
        let a = noise(11);
        let b = noise(11);
        let c = noise(12);

        let sample = |n: &FractalNoise| -> Vec<f32> {
            (0..16).flat_map(|y| (0..16).map(move |x| (x, y))).map(|(x, y)| n.sample_unit(x, y)).collect()
        };
        assert_eq!(sample(&a), sample(&b));
        assert_ne!(sample(&a), sample(&c));
    }

    // Tests the seed stream is reproducible and yields distinct seeds
    // Verified by reseeding on every call
    #[test]
    fn test_noise_seeds() {
        let mut first = NoiseSeeds::new(42);
        let mut second = NoiseSeeds::new(42);
        let run: Vec<u32> = (0..8).map(|_| first.next_seed()).collect();
        let again: Vec<u32> = (0..8).map(|_| second.next_seed()).collect();
        assert_eq!(run, again);
        assert!(run.windows(2).any(|w| w.first() != w.get(1)));

        let mut other = NoiseSeeds::new(43);
        assert_ne!(other.next_seed(), run.first().copied().unwrap_or_default());
    }

    // Tests saturated influence stays saturated and no value decreases
    // Verified by mixing toward noise without the self-weighted pull
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_perturb_influence_keeps_saturation() {
        let size = Size::new(32, 32);
        let original = InfluenceField::radial(size, FalloffProfile::Soft, 0.125);
        let mut field = original.clone();
        perturb_influence(&mut field, &noise(5), 0.8);

        assert_eq!(field.get(16, 16), Some(1.0));
        for (after, before) in field.values().iter().zip(original.values()) {
            assert!((0.0..=1.0).contains(after));
            assert!(after >= before, "{before} decreased to {after}");
        }
    }

    // Tests values pushed outside the unit interval are clamped back after perturbation
    // Verified by skipping the final clamp
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_perturb_influence_reclamps() {
        let values = Array2::from_shape_fn((32, 32), |(y, _)| if y < 16 { 1.4 } else { -0.3 });
        let mut field = InfluenceField::from_values(values);
        perturb_influence(&mut field, &noise(7), 0.8);

        assert!(field.values().iter().all(|v| (0.0..=1.0).contains(v)));
        assert!(field.values().rows().into_iter().take(16).flatten().all(|&v| v == 1.0));
    }

    // Tests only the noise height channel is written
    // Verified by perturbing the raw height in place
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_perturb_height_writes_noise_channel() {
        let texel = Texel::new([0.5, 0.5, 0.5, 1.0], [0.0, 0.0, 1.0], 0.3, 0.5, 0.0);
        let mut map = PbrMap::filled(Size::new(32, 32), texel);
        perturb_height(&mut map, &noise(9), 0.8);

        assert!(map.texels().iter().all(|t| t.height == 0.3));
        assert!(map.texels().iter().all(|t| t.height_noise >= 0.3 && t.height_noise <= 1.0));
        assert!(map.texels().iter().any(|t| t.height_noise != 0.3));
    }
}
