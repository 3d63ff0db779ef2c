//! The [`Bijector`] trait: invertible, differentiable transforms that track
//! the log-absolute-determinant of their Jacobian.
//!
//! A bijector maps points of one space to another and back. Carrying the
//! Jacobian log-determinant alongside is what makes the change-of-variables
//! formula work: if `y = f(x)` and `x` has log-density `log p(x)`, then
//! `log p(y) = log p(x) - log|det J(f)(x)|`.
//!
//! Input arrays are split into *batch* axes (leading) and *event* axes
//! (trailing): a bijector with `event_ndims() == k` consumes the last `k`
//! axes of its input as a single point and maps over everything in front.
//! Log-determinant outputs carry the batch shape only, one value per event;
//! for an unbatched input that is a zero-dimensional array.

use ndarray::ArrayD;
use std::any::Any;
use vf_core::Scalar;

/// An invertible, differentiable transform.
///
/// Implementors provide the fused [`forward_and_log_det`] and
/// [`inverse_and_log_det`]; the single-output methods default to calling the
/// fused pair and discarding half, which keeps the two views consistent by
/// construction. Implementors overriding the single-output methods must
/// preserve that agreement.
///
/// # Numeric errors
///
/// Transforms do not validate their inputs element-by-element. Evaluating a
/// bijector outside its domain (the log of a negative number, division by a
/// zero scale) produces NaN or infinity in the output, exactly as the
/// underlying float operations do. Mismatched shapes panic, matching
/// `ndarray`'s own behavior.
///
/// [`forward_and_log_det`]: Bijector::forward_and_log_det
/// [`inverse_and_log_det`]: Bijector::inverse_and_log_det
pub trait Bijector: Send + Sync {
    /// Element type of the arrays this bijector transforms.
    type Elem: Scalar;

    /// Short name used in debug output and error messages.
    fn name(&self) -> &'static str;

    /// Number of trailing input axes consumed as one event.
    fn event_ndims(&self) -> usize;

    /// True if the Jacobian does not depend on the input value.
    ///
    /// Affine-style transforms report `true`; their log-determinant is fixed
    /// at construction. The default is the conservative `false`.
    fn is_constant_jacobian(&self) -> bool {
        false
    }

    /// True if on top of a constant Jacobian, every batch member shares the
    /// same log-determinant value.
    ///
    /// Implies [`is_constant_jacobian`](Self::is_constant_jacobian).
    fn is_constant_log_det(&self) -> bool {
        false
    }

    /// Computes `y = f(x)`.
    fn forward(&self, x: &ArrayD<Self::Elem>) -> ArrayD<Self::Elem> {
        self.forward_and_log_det(x).0
    }

    /// Computes `x = f^{-1}(y)`.
    fn inverse(&self, y: &ArrayD<Self::Elem>) -> ArrayD<Self::Elem> {
        self.inverse_and_log_det(y).0
    }

    /// Computes `log|det J(f)(x)|`, one value per batch member.
    fn forward_log_det_jacobian(&self, x: &ArrayD<Self::Elem>) -> ArrayD<Self::Elem> {
        self.forward_and_log_det(x).1
    }

    /// Computes `log|det J(f^{-1})(y)|`, one value per batch member.
    ///
    /// Always the negation of the forward log-determinant evaluated at the
    /// pre-image: `-forward_log_det_jacobian(inverse(y))`.
    fn inverse_log_det_jacobian(&self, y: &ArrayD<Self::Elem>) -> ArrayD<Self::Elem> {
        self.inverse_and_log_det(y).1
    }

    /// Computes `f(x)` together with `log|det J(f)(x)|`.
    ///
    /// The pair shares whatever intermediate work the two quantities have in
    /// common; it is never cheaper to call the single-output methods twice.
    fn forward_and_log_det(
        &self,
        x: &ArrayD<Self::Elem>,
    ) -> (ArrayD<Self::Elem>, ArrayD<Self::Elem>);

    /// Computes `f^{-1}(y)` together with `log|det J(f^{-1})(y)|`.
    fn inverse_and_log_det(
        &self,
        y: &ArrayD<Self::Elem>,
    ) -> (ArrayD<Self::Elem>, ArrayD<Self::Elem>);

    /// Best-effort check that `self` and `other` are guaranteed to behave
    /// identically.
    ///
    /// `true` is a guarantee; `false` means "unable to tell" and is always a
    /// safe answer. Parameterized bijectors compare by parameter *view
    /// identity*, not by value: two transforms holding the same view of the
    /// same shared array compare equal, while numerically identical copies
    /// do not, and neither does a slice of another transform's storage.
    fn same_as(&self, _other: &dyn Bijector<Elem = Self::Elem>) -> bool {
        false
    }

    /// Upcast used by [`same_as`](Self::same_as) implementations to recover
    /// the concrete type of the other bijector.
    fn as_any(&self) -> &dyn Any;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    /// Minimal implementor: doubles its input, overriding nothing optional.
    struct Doubling;

    impl Bijector for Doubling {
        type Elem = f64;

        fn name(&self) -> &'static str {
            "Doubling"
        }

        fn event_ndims(&self) -> usize {
            0
        }

        fn forward_and_log_det(&self, x: &ArrayD<f64>) -> (ArrayD<f64>, ArrayD<f64>) {
            (x.mapv(|v| 2.0 * v), x.mapv(|_| 2.0_f64.ln()))
        }

        fn inverse_and_log_det(&self, y: &ArrayD<f64>) -> (ArrayD<f64>, ArrayD<f64>) {
            (y.mapv(|v| v / 2.0), y.mapv(|_| -(2.0_f64.ln())))
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_defaults_derive_from_fused_pair() {
        let b = Doubling;
        let x = arr1(&[1.0, -2.0, 0.5]).into_dyn();

        assert_eq!(b.forward(&x), b.forward_and_log_det(&x).0);
        assert_eq!(b.forward_log_det_jacobian(&x), b.forward_and_log_det(&x).1);

        let y = b.forward(&x);
        assert_eq!(b.inverse(&y), b.inverse_and_log_det(&y).0);
        assert_eq!(b.inverse_log_det_jacobian(&y), b.inverse_and_log_det(&y).1);
    }

    #[test]
    fn test_default_flags_are_conservative() {
        let b = Doubling;
        assert!(!b.is_constant_jacobian());
        assert!(!b.is_constant_log_det());
        assert!(!b.same_as(&Doubling));
    }
}
