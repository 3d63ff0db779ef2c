//! Numerically stable helpers shared by transform implementations.

use vf_core::Scalar;

/// Stable `ln(1 + exp(x))`.
///
/// Uses the identity `ln(1 + exp(x)) = max(x, 0) + ln(1 + exp(-|x|))`, which
/// never exponentiates a positive argument.
#[inline]
pub fn log1pexp<A: Scalar>(x: A) -> A {
    x.max_s(A::from_f64(0.0)) + (-x.abs()).exp().ln_1p()
}

/// Softplus: `ln(1 + exp(x))`.
#[inline]
pub fn softplus<A: Scalar>(x: A) -> A {
    log1pexp(x)
}

/// Inverse hyperbolic tangent on `(-1, 1)`.
///
/// Computed as `(ln_1p(y) - ln_1p(-y)) / 2` to stay accurate near zero.
/// Outside the open interval the result is infinite or NaN.
#[inline]
pub fn atanh<A: Scalar>(y: A) -> A {
    (y.ln_1p() - (-y).ln_1p()) * A::from_f64(0.5)
}
