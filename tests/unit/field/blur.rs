//! Tests for the toroidal Gaussian blur

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::Array2;
    use seamtile::field::blur::{blur_field, gaussian_blur};
    use seamtile::math::kernel::GaussianKernel;

    // Tests a constant field stays constant up to the kernel normalization
    // Verified by clamping at the borders instead of wrapping
    #[test]
    fn test_constant_field_preserved() {
        let field = Array2::from_elem((9, 13), 0.6_f32);
        let blurred = gaussian_blur(&field);
        for &value in &blurred {
            assert_abs_diff_eq!(value, 0.6, epsilon = 0.005);
        }
    }

    // Tests sampling wraps around both axes
    // Verified by skipping out-of-range taps
    #[test]
    fn test_blur_wraps_toroidally() {
        let mut field = Array2::zeros((8, 8));
        if let Some(v) = field.get_mut((0, 0)) {
            *v = 1.0_f32;
        }
        let blurred = gaussian_blur(&field);

        let right = blurred.get((0, 1)).copied().unwrap_or(0.0);
        let left = blurred.get((0, 7)).copied().unwrap_or(0.0);
        let up = blurred.get((7, 0)).copied().unwrap_or(0.0);
        let diagonal = blurred.get((7, 7)).copied().unwrap_or(0.0);
        let inner_diagonal = blurred.get((1, 1)).copied().unwrap_or(0.0);

        assert!(left > 0.0);
        assert_abs_diff_eq!(left, right, epsilon = 1e-7);
        assert_abs_diff_eq!(up, right, epsilon = 1e-7);
        assert_abs_diff_eq!(diagonal, inner_diagonal, epsilon = 1e-7);
        assert_abs_diff_eq!(blurred.sum(), field.sum(), epsilon = 0.01);
    }

    // Tests the input is left untouched and a fresh field is returned
    // Verified by blurring in place
    #[test]
    fn test_blur_is_non_destructive() {
        let field = Array2::from_shape_fn((5, 5), |(y, x)| if x == y { 1.0_f32 } else { 0.0 });
        let copy = field.clone();
        let blurred = blur_field(&field, &GaussianKernel::new(1, 1.0));
        assert_eq!(field, copy);
        assert_ne!(blurred, field);
    }

    // Tests empty fields pass through
    // Verified by wrapping modulo zero
    #[test]
    fn test_empty_field() {
        let field = Array2::<f32>::zeros((0, 4));
        assert_eq!(gaussian_blur(&field).dim(), (0, 4));
    }
}
