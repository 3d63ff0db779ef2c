//! Generic scalar abstraction.
//!
//! Bijectors are written against the [`Scalar`] trait rather than `f64`
//! directly, so the same transform code runs at single or double precision
//! (and leaves room for dual-number types later). The trait covers exactly
//! the operations the transforms need: arithmetic via the standard operator
//! traits, plus the handful of elementary functions used by log-determinant
//! computations.

use num_traits::Zero;
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Trait for numeric element types flowing through transforms.
///
/// Implementations must be cheap to copy; arrays of `Scalar` values are the
/// unit of data movement, not individual scalars.
pub trait Scalar:
    Copy
    + Debug
    + Send
    + Sync
    + PartialOrd
    + Zero
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// Lift a constant into this scalar type.
    fn from_f64(v: f64) -> Self;

    /// Extract the primal value as `f64` (used by diagnostics and tests).
    fn value(&self) -> f64;

    /// Natural logarithm.
    fn ln(self) -> Self;

    /// `ln(1 + self)`, accurate for small `self`.
    fn ln_1p(self) -> Self;

    /// Exponential function.
    fn exp(self) -> Self;

    /// Absolute value.
    fn abs(self) -> Self;

    /// Hyperbolic tangent.
    fn tanh(self) -> Self;

    /// Maximum of `self` and `other`.
    ///
    /// Named `max_s` to avoid colliding with the inherent `f64::max`.
    fn max_s(self, other: Self) -> Self;

    /// True if the value is neither NaN nor infinite.
    fn is_finite_s(&self) -> bool;
}

impl Scalar for f64 {
    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn value(&self) -> f64 {
        *self
    }

    #[inline]
    fn ln(self) -> Self {
        f64::ln(self)
    }

    #[inline]
    fn ln_1p(self) -> Self {
        f64::ln_1p(self)
    }

    #[inline]
    fn exp(self) -> Self {
        f64::exp(self)
    }

    #[inline]
    fn abs(self) -> Self {
        f64::abs(self)
    }

    #[inline]
    fn tanh(self) -> Self {
        f64::tanh(self)
    }

    #[inline]
    fn max_s(self, other: Self) -> Self {
        f64::max(self, other)
    }

    #[inline]
    fn is_finite_s(&self) -> bool {
        f64::is_finite(*self)
    }
}

impl Scalar for f32 {
    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn value(&self) -> f64 {
        *self as f64
    }

    #[inline]
    fn ln(self) -> Self {
        f32::ln(self)
    }

    #[inline]
    fn ln_1p(self) -> Self {
        f32::ln_1p(self)
    }

    #[inline]
    fn exp(self) -> Self {
        f32::exp(self)
    }

    #[inline]
    fn abs(self) -> Self {
        f32::abs(self)
    }

    #[inline]
    fn tanh(self) -> Self {
        f32::tanh(self)
    }

    #[inline]
    fn max_s(self, other: Self) -> Self {
        f32::max(self, other)
    }

    #[inline]
    fn is_finite_s(&self) -> bool {
        f32::is_finite(*self)
    }
}
