//! Single-pixel blend primitive
//!
//! Every extraction, composite and seam blend funnels through [`copy_pixel`], so the
//! full-replace and no-op boundaries are handled in exactly one place.

use crate::math::interpolation::{adjusted_height, factor_eps, mix};
use crate::texture::texel::Texel;

/// Blend `src` onto `dst` by `blend`, optionally carrying an influence value along
///
/// - `blend <= 0` leaves `dst` untouched
/// - `blend == 1` overwrites every channel exactly
/// - otherwise every channel is interpolated with the same factor
///
/// When `influence` is `Some((src_value, dst_value))` the destination influence is
/// updated with the same rule.
#[allow(clippy::float_cmp)]
pub fn copy_pixel(src: &Texel, dst: &mut Texel, influence: Option<(f32, &mut f32)>, blend: f32) {
    if blend <= 0.0 {
        return;
    }

    if blend == 1.0 {
        if let Some((src_value, dst_value)) = influence {
            *dst_value = src_value;
        }
        *dst = *src;
    } else {
        if let Some((src_value, dst_value)) = influence {
            *dst_value = mix(*dst_value, src_value, blend);
        }
        *dst = dst.mix(src, blend);
    }
}

/// Weight with which the first tile should replace the second at one pixel
///
/// A saturated first influence always wins and a zero first influence never does.
/// In between, the adjusted heights of both tiles are compared with an
/// epsilon-banded ramp, so height differences decide close calls.
#[allow(clippy::float_cmp)]
pub fn blend_factor(f1: f32, f2: f32, h1: f32, h2: f32, epsilon: f32) -> f32 {
    if f1 == 1.0 {
        return 1.0;
    }

    if f1 == 0.0 {
        return 0.0;
    }

    factor_eps(adjusted_height(f1, h1), adjusted_height(f2, h2), epsilon)
}
