//! Tests for the per-pixel channel bundle

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use seamtile::texture::Texel;

    // Tests new texels start with the noise height equal to the raw height
    // Verified by zeroing the noise height on construction
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_new_copies_height_into_noise_height() {
        let texel = Texel::new([0.1, 0.2, 0.3, 1.0], [0.0, 0.0, 1.0], 0.6, 0.4, 0.2);
        assert_eq!(texel.height_noise, 0.6);
        assert_eq!(Texel::default().diffuse, [0.0, 0.0, 0.0, 1.0]);
    }

    // Tests mixing interpolates every channel with the same factor
    // Verified by leaving metalness unmixed
    #[test]
    fn test_mix_all_channels() {
        let a = Texel::new([0.0, 0.0, 0.0, 0.0], [-1.0, 0.0, 0.0], 0.0, 0.0, 0.0);
        let mut b = Texel::new([1.0, 1.0, 1.0, 1.0], [1.0, 0.0, 0.0], 1.0, 1.0, 1.0);
        b.height_noise = 0.5;

        let mid = a.mix(&b, 0.5);
        for channel in mid.diffuse {
            assert_abs_diff_eq!(channel, 0.5, epsilon = 1e-6);
        }
        assert_abs_diff_eq!(mid.normal[0], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(mid.height, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(mid.height_noise, 0.25, epsilon = 1e-6);
        assert_abs_diff_eq!(mid.roughness, 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(mid.metalness, 0.5, epsilon = 1e-6);

        assert_eq!(a.mix(&b, 0.0), a);
        assert_eq!(a.mix(&b, 1.0), b);
    }
}
