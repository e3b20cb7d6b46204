//! Linear interpolation and epsilon-banded comparison primitives
//!
//! These are the scalar building blocks of every blend decision: `mix` moves a value
//! toward another, and the `factor_eps` family turns the difference between two
//! competing values into a 0..1 weight that is hard where one value clearly wins
//! and smooth where they are close.

use num_traits::Float;

/// Linear interpolation `b * f + a * (1 - f)` without gamma correction
///
/// `f == 0` yields `a` and `f == 1` yields `b` exactly for finite inputs.
#[inline]
pub fn mix<T: Float>(a: T, b: T, f: T) -> T {
    b * f + a * (T::one() - f)
}

/// Component-wise [`mix`] over fixed-size vectors
#[inline]
pub fn mix_array<T: Float, const N: usize>(a: [T; N], b: [T; N], f: T) -> [T; N] {
    let mut out = a;
    for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b.iter())) {
        *o = mix(*x, *y, f);
    }
    out
}

/// Clamp a value into `[min, max]`
#[inline]
pub fn clamp<T: Float>(value: T, min: T, max: T) -> T {
    value.max(min).min(max)
}

/// Symmetric epsilon-banded comparison of `a` against `b`
///
/// Returns 1 when `a - b > eps`, 0 when `a - b < -eps`, and interpolates linearly
/// across `[-eps, eps]` otherwise, so `factor_eps(b, b, eps) == 0.5`.
#[inline]
pub fn factor_eps<T: Float>(a: T, b: T, eps: T) -> T {
    let dist = a - b;
    if dist > eps {
        T::one()
    } else if dist < -eps {
        T::zero()
    } else {
        (dist + eps) / (eps + eps)
    }
}

/// One-sided epsilon-banded comparison
///
/// Any `a` below `b` is a hard 0; the linear ramp only spans `[0, eps]`.
#[inline]
pub fn factor_eps_top<T: Float>(a: T, b: T, eps: T) -> T {
    let dist = a - b;
    if dist > eps {
        T::one()
    } else if dist < T::zero() {
        T::zero()
    } else {
        dist / eps
    }
}

/// Height pre-combined with its tile's own influence
///
/// `h * f + (1 - f) * (f * h)`: a self-weighted blend that favors tiles with a
/// strong claim at this pixel, used as the layering comparison metric.
#[inline]
pub fn adjusted_height<T: Float>(influence: T, height: T) -> T {
    height * influence + (T::one() - influence) * (influence * height)
}
