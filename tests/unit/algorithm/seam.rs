//! Tests for the pairwise seam blend

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use seamtile::TilingError;
    use seamtile::algorithm::seam::{SeamOptions, blend_pair, pairwise_weights};
    use seamtile::field::influence::{FalloffProfile, InfluenceField};
    use seamtile::field::noise::{FractalNoise, NoiseSettings, perturb_height, perturb_influence};
    use seamtile::spatial::geometry::Size;
    use seamtile::texture::{PbrMap, Texel, Tile};

    const SIZE: Size = Size::new(16, 16);

    fn solid(color: [f32; 4], height: f32, influence: InfluenceField) -> Tile {
        let texel = Texel::new(color, [0.0, 0.0, 1.0], height, 0.5, 0.0);
        Tile::from_parts(PbrMap::filled(SIZE, texel), influence).expect("matching sizes")
    }

    fn options(blur: bool, carry_influence: bool) -> SeamOptions {
        SeamOptions {
            epsilon: 0.03,
            blur,
            carry_influence,
        }
    }

    // Tests blending a tile onto an identical copy changes nothing
    // Verified by mixing with the complementary weight on one channel
    #[test]
    fn test_blend_with_self_is_identity() {
        let mut tile = solid([0.3, 0.6, 0.9, 1.0], 0.4, InfluenceField::radial(SIZE, FalloffProfile::Soft, 0.5));
        perturb_influence(&mut tile.influence, &FractalNoise::new(1, 16, &NoiseSettings::default()), 0.8);
        perturb_height(&mut tile.map, &FractalNoise::new(2, 16, &NoiseSettings::default()), 0.8);

        for blur in [false, true] {
            let mut dst = tile.clone();
            blend_pair(&tile, &mut dst, &options(blur, true)).expect("same size");
            for (after, before) in dst.map.texels().iter().zip(tile.map.texels()) {
                for (a, b) in after.diffuse.iter().zip(before.diffuse) {
                    assert_abs_diff_eq!(*a, b, epsilon = 1e-6);
                }
                assert_abs_diff_eq!(after.height, before.height, epsilon = 1e-6);
            }
            for (after, before) in dst.influence.values().iter().zip(tile.influence.values()) {
                assert_abs_diff_eq!(*after, *before, epsilon = 1e-6);
            }
        }
    }

    // Tests a fully saturated source replaces the destination exactly
    // Verified by blending saturated pixels at half weight
    #[test]
    fn test_saturated_source_overwrites() {
        let src = solid([1.0, 0.0, 0.0, 1.0], 0.1, InfluenceField::uniform(SIZE, 1.0));
        let mut dst = solid([0.0, 0.0, 1.0, 1.0], 0.9, InfluenceField::uniform(SIZE, 1.0));
        blend_pair(&src, &mut dst, &options(false, false)).expect("same size");
        assert_eq!(dst.map, src.map);
        assert!(dst.influence.values().iter().all(|&v| (v - 1.0).abs() < f32::EPSILON));
    }

    // Tests a source without influence leaves the destination untouched, even blurred
    // Verified by letting zero influence fall through to the height comparison
    #[test]
    fn test_zero_source_is_noop() {
        let src = solid([1.0, 0.0, 0.0, 1.0], 1.0, InfluenceField::empty(SIZE));
        let original = solid([0.0, 0.0, 1.0, 1.0], 0.0, InfluenceField::uniform(SIZE, 0.5));
        let mut dst = original.clone();
        blend_pair(&src, &mut dst, &options(true, true)).expect("same size");
        assert_eq!(dst, original);
    }

    // Tests carrying influence moves the source claim into the destination
    // Verified by leaving destination influence untouched
    #[test]
    fn test_carry_influence() {
        let src = solid([1.0, 1.0, 1.0, 1.0], 0.5, InfluenceField::uniform(SIZE, 1.0));
        let mut carried = solid([0.0, 0.0, 0.0, 1.0], 0.5, InfluenceField::empty(SIZE));
        let mut kept = carried.clone();

        blend_pair(&src, &mut carried, &options(false, true)).expect("same size");
        blend_pair(&src, &mut kept, &options(false, false)).expect("same size");

        assert_eq!(carried.influence, src.influence);
        assert_eq!(kept.influence, InfluenceField::empty(SIZE));
        assert_eq!(kept.map, src.map);
    }

    // Tests partial claims are decided by the noise-perturbed heights
    // Verified by comparing raw heights
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_weights_follow_noise_height() {
        let mut src = solid([1.0, 0.0, 0.0, 1.0], 0.2, InfluenceField::uniform(SIZE, 0.5));
        let dst = solid([0.0, 0.0, 1.0, 1.0], 0.6, InfluenceField::uniform(SIZE, 0.5));
        for texel in src.map.texels_mut().iter_mut() {
            texel.height_noise = 1.0;
        }

        let weights = pairwise_weights(&src, &dst, 0.03).expect("same size");
        assert!(weights.iter().all(|&w| w == 1.0));

        let reversed = pairwise_weights(&dst, &src, 0.03).expect("same size");
        assert!(reversed.iter().all(|&w| w == 0.0));
    }

    // Tests tiles of different sizes are rejected
    // Verified by zipping only the overlap
    #[test]
    fn test_size_mismatch() {
        let src = Tile::new(Size::new(8, 8));
        let mut dst = Tile::new(SIZE);
        assert!(matches!(
            blend_pair(&src, &mut dst, &options(false, false)),
            Err(TilingError::DimensionMismatch { .. })
        ));
    }
}
