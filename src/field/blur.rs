//! Toroidal Gaussian blur of scalar weight fields
//!
//! Sampling wraps around both axes because the working tile repeats: the left
//! neighbor of column 0 is the last column.

use crate::io::configuration::{BLUR_RADIUS, BLUR_SIGMA};
use crate::math::kernel::{GaussianKernel, wrap};
use ndarray::{Array2, Zip};

/// Blur `field` with `kernel`, returning a new field
pub fn blur_field(field: &Array2<f32>, kernel: &GaussianKernel) -> Array2<f32> {
    let (rows, cols) = field.dim();
    let mut out = Array2::zeros((rows, cols));
    if rows == 0 || cols == 0 {
        return out;
    }

    Zip::indexed(&mut out).par_for_each(|(y, x), value| {
        *value = kernel
            .taps()
            .map(|(dx, dy, weight)| {
                let sy = wrap(y as i64 + i64::from(dy), rows);
                let sx = wrap(x as i64 + i64::from(dx), cols);
                field.get((sy, sx)).copied().unwrap_or(0.0) * weight
            })
            .sum();
    });

    out
}

/// Blur with the fixed 5×5 kernel
pub fn gaussian_blur(field: &Array2<f32>) -> Array2<f32> {
    blur_field(field, &GaussianKernel::new(BLUR_RADIUS, BLUR_SIGMA))
}
