//! Linear transform with a diagonal weight matrix.

use crate::bijector::Bijector;
use crate::block::Block;
use crate::scalar_affine::ScalarAffine;
use ndarray::{ArcArray, ArcArray1, Array2, ArrayD, Ix1, IxDyn};
use std::any::Any;
use vf_core::tensor::same_view;
use vf_core::{Error, Result, Scalar};

/// Linear bijector `f(x) = A x` where `A = diag(d)` for a length-`D`
/// parameter vector `d`.
///
/// Built by composition rather than matrix algebra: a diagonal matrix acts
/// independently per coordinate, so this is [`ScalarAffine`] with zero shift
/// and scale `d`, wrapped in a [`Block`] that makes the trailing axis the
/// event. Forward multiplies, inverse divides, and the log-determinant is
/// `sum_i ln|d_i|`, one value per batch member. The dense matrix is never
/// materialized on the evaluation path.
///
/// Invertibility requires every `d_i` to be nonzero. Zero entries are not
/// rejected: the forward map still works, while inverses and
/// log-determinants at such coordinates come out infinite or NaN.
#[derive(Debug, Clone)]
pub struct DiagLinear<A: Scalar = f64> {
    diag: ArcArray1<A>,
    inner: Block<ScalarAffine<A>>,
}

impl<A: Scalar> DiagLinear<A> {
    /// Creates the bijector from the diagonal of `A`.
    ///
    /// The parameter array is shared, not copied; [`diag`](Self::diag)
    /// returns a handle to the same storage, and
    /// [`same_as`](Bijector::same_as) compares that view by identity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] unless `diag` has exactly one
    /// dimension.
    pub fn new(diag: ArcArray<A, IxDyn>) -> Result<Self> {
        let ndim = diag.ndim();
        let diag = diag.into_dimensionality::<Ix1>().map_err(|_| {
            Error::Validation(format!(
                "`diag` must have exactly one dimension, got {}",
                ndim
            ))
        })?;
        let shift: ArrayD<A> = ArrayD::zeros(IxDyn(&[diag.len()]));
        let affine = ScalarAffine::new(shift.into_shared(), diag.clone().into_dyn())?;
        let inner = Block::new(affine, 1)?;
        Ok(Self { diag, inner })
    }

    /// The diagonal of `A`, exactly as passed to [`new`](Self::new).
    pub fn diag(&self) -> &ArcArray1<A> {
        &self.diag
    }

    /// Dimensionality `D` of the event space.
    pub fn event_dims(&self) -> usize {
        self.diag.len()
    }

    /// Materializes `A` as a dense `D`-by-`D` matrix.
    ///
    /// Rebuilt on every call; intended for inspection and interop, not for
    /// the evaluation path.
    pub fn matrix(&self) -> Array2<A> {
        Array2::from_diag(&self.diag)
    }
}

impl<A: Scalar> Bijector for DiagLinear<A> {
    type Elem = A;

    fn name(&self) -> &'static str {
        "DiagLinear"
    }

    fn event_ndims(&self) -> usize {
        1
    }

    fn is_constant_jacobian(&self) -> bool {
        true
    }

    fn is_constant_log_det(&self) -> bool {
        true
    }

    fn forward(&self, x: &ArrayD<A>) -> ArrayD<A> {
        self.inner.forward(x)
    }

    fn inverse(&self, y: &ArrayD<A>) -> ArrayD<A> {
        self.inner.inverse(y)
    }

    fn forward_log_det_jacobian(&self, x: &ArrayD<A>) -> ArrayD<A> {
        self.inner.forward_log_det_jacobian(x)
    }

    fn inverse_log_det_jacobian(&self, y: &ArrayD<A>) -> ArrayD<A> {
        self.inner.inverse_log_det_jacobian(y)
    }

    fn forward_and_log_det(&self, x: &ArrayD<A>) -> (ArrayD<A>, ArrayD<A>) {
        self.inner.forward_and_log_det(x)
    }

    fn inverse_and_log_det(&self, y: &ArrayD<A>) -> (ArrayD<A>, ArrayD<A>) {
        self.inner.inverse_and_log_det(y)
    }

    fn same_as(&self, other: &dyn Bijector<Elem = A>) -> bool {
        match other.as_any().downcast_ref::<Self>() {
            Some(other) => same_view(&self.diag, &other.diag),
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{arr1, arr2, Array, s};

    fn diag_of(values: &[f64]) -> DiagLinear {
        DiagLinear::new(arr1(values).into_dyn().into_shared()).expect("1-d diag")
    }

    #[test]
    fn test_forward_scales_coordinates() {
        let b = diag_of(&[2.0, -3.0, 0.5]);
        let x = arr1(&[1.0, 1.0, 1.0]).into_dyn();
        let y = b.forward(&x);
        assert_eq!(y, arr1(&[2.0, -3.0, 0.5]).into_dyn());
    }

    #[test]
    fn test_inverse_roundtrip() {
        let b = diag_of(&[2.0, -3.0, 0.5]);
        let x = arr1(&[0.7, -1.3, 9.0]).into_dyn();
        let back = b.inverse(&b.forward(&x));
        for (a, e) in back.iter().zip(x.iter()) {
            assert_relative_eq!(*a, *e, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_log_det_is_sum_of_log_abs_diag() {
        let b = diag_of(&[2.0, -3.0, 0.5]);
        let x = arr1(&[1.0, 1.0, 1.0]).into_dyn();

        // ln|2| + ln|-3| + ln|0.5| = ln 3.
        let expected = 2.0_f64.ln() + 3.0_f64.ln() + 0.5_f64.ln();
        let fldj = b.forward_log_det_jacobian(&x);
        assert_eq!(fldj.ndim(), 0, "one event in, zero-dimensional log-det out");
        assert_relative_eq!(fldj[IxDyn(&[])], expected, epsilon = 1e-12);
        assert_relative_eq!(fldj[IxDyn(&[])], 3.0_f64.ln(), epsilon = 1e-12);

        let ildj = b.inverse_log_det_jacobian(&x);
        assert_relative_eq!(ildj[IxDyn(&[])], -expected, epsilon = 1e-12);
    }

    #[test]
    fn test_log_det_ignores_input_values() {
        let b = diag_of(&[4.0, 0.25]);
        let a = b.forward_log_det_jacobian(&arr1(&[0.0, 0.0]).into_dyn());
        let c = b.forward_log_det_jacobian(&arr1(&[100.0, -100.0]).into_dyn());
        assert_eq!(a, c);
        assert!(b.is_constant_jacobian());
        assert!(b.is_constant_log_det());
    }

    #[test]
    fn test_batched_inputs_share_the_diag() {
        let b = diag_of(&[2.0, 0.5]);
        let x = arr2(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).into_dyn();

        let y = b.forward(&x);
        assert_eq!(y.shape(), &[3, 2]);
        assert_eq!(
            y,
            arr2(&[[2.0, 1.0], [6.0, 2.0], [10.0, 3.0]]).into_dyn()
        );

        let fldj = b.forward_log_det_jacobian(&x);
        assert_eq!(fldj.shape(), &[3], "one log-det per batch member");
        for i in 0..3 {
            assert_relative_eq!(fldj[[i]], 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_fused_matches_separate() {
        let b = diag_of(&[1.5, -2.5, 3.5]);
        let x = arr1(&[0.1, 0.2, 0.3]).into_dyn();

        let (y, fldj) = b.forward_and_log_det(&x);
        assert_eq!(y, b.forward(&x));
        assert_eq!(fldj, b.forward_log_det_jacobian(&x));

        let (back, ildj) = b.inverse_and_log_det(&y);
        assert_eq!(back, b.inverse(&y));
        assert_eq!(ildj, b.inverse_log_det_jacobian(&y));
    }

    #[test]
    fn test_matrix_materialization() {
        let b = diag_of(&[2.0, -3.0]);
        let m = b.matrix();
        assert_eq!(m, arr2(&[[2.0, 0.0], [0.0, -3.0]]));
        assert_eq!(b.event_dims(), 2);
        assert_eq!(b.event_ndims(), 1);
        assert_eq!(b.diag(), &arr1(&[2.0, -3.0]).into_shared());
    }

    #[test]
    fn test_non_vector_diag_rejected() {
        let matrix = Array::from_shape_vec(IxDyn(&[2, 2]), vec![1.0, 0.0, 0.0, 1.0])
            .expect("shape matches data");
        let result = DiagLinear::new(matrix.into_shared());
        assert!(result.is_err());

        let message = result.err().map(|e| e.to_string()).unwrap_or_default();
        assert!(
            message.contains("exactly one dimension"),
            "unexpected message: {}",
            message
        );

        let scalar = Array::from_shape_vec(IxDyn(&[]), vec![3.0]).expect("0-d array");
        assert!(DiagLinear::new(scalar.into_shared()).is_err());
    }

    #[test]
    fn test_zero_diag_entry_is_silent_until_inverted() {
        let b = diag_of(&[0.0, 2.0]);

        // Forward still works.
        let y = b.forward(&arr1(&[5.0, 5.0]).into_dyn());
        assert_eq!(y, arr1(&[0.0, 10.0]).into_dyn());

        // Inverse and log-det are non-finite, with no panic or error.
        let x = b.inverse(&arr1(&[1.0, 1.0]).into_dyn());
        assert!(!x[[0]].is_finite());

        let fldj = b.forward_log_det_jacobian(&arr1(&[0.0, 0.0]).into_dyn());
        assert!(fldj[IxDyn(&[])].is_infinite() && fldj[IxDyn(&[])] < 0.0);
    }

    #[test]
    fn test_same_as_is_storage_identity() {
        let storage = arr1(&[2.0, 3.0]).into_dyn().into_shared();

        let a = DiagLinear::new(storage.clone()).expect("1-d diag");
        let b = DiagLinear::new(storage).expect("1-d diag");
        assert!(a.same_as(&b), "bijectors sharing diag storage");
        assert!(a.same_as(&a), "a bijector and itself");

        // Fresh storage with equal values: unable to tell, so false.
        let c = diag_of(&[2.0, 3.0]);
        assert!(!a.same_as(&c));

        // A different bijector type: false.
        let e = crate::exp::Exp::<f64>::new();
        assert!(!a.same_as(&e));
    }

    #[test]
    fn test_same_as_distinguishes_slices_of_shared_storage() {
        let storage = arr1(&[2.0, 3.0, 4.0]).into_shared();
        let full = DiagLinear::new(storage.clone().into_dyn()).expect("1-d diag");
        let short = DiagLinear::new(storage.slice_move(s![..2]).into_dyn()).expect("1-d diag");

        // Same allocation, different transforms: the prefix view scales a
        // two-dimensional event, the full view a three-dimensional one.
        assert!(std::ptr::eq(full.diag().as_ptr(), short.diag().as_ptr()));
        assert_eq!(full.event_dims(), 3);
        assert_eq!(short.event_dims(), 2);
        assert!(!full.same_as(&short));
        assert!(!short.same_as(&full));
    }

    #[test]
    fn test_diag_handle_shares_storage() {
        let storage = arr1(&[1.0, 2.0]).into_dyn().into_shared();
        let b = DiagLinear::new(storage.clone()).expect("1-d diag");
        assert!(std::ptr::eq(b.diag().as_ptr(), storage.as_ptr()));
    }
}
