//! Elementwise exponential `y = exp(x)`.

use crate::bijector::Bijector;
use ndarray::ArrayD;
use std::any::Any;
use std::marker::PhantomData;
use vf_core::Scalar;

/// Maps the real line onto the positive reals, coordinate by coordinate.
///
/// `d/dx exp(x) = exp(x)`, so the elementwise log-determinant of the forward
/// map is the input itself. The inverse takes logs; feeding it non-positive
/// values yields `-inf` or NaN, as the substrate's `ln` does.
#[derive(Debug, Clone)]
pub struct Exp<A = f64> {
    _elem: PhantomData<fn() -> A>,
}

impl<A> Exp<A> {
    /// Creates the bijector.
    pub fn new() -> Self {
        Self { _elem: PhantomData }
    }
}

impl<A> Default for Exp<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Scalar> Bijector for Exp<A> {
    type Elem = A;

    fn name(&self) -> &'static str {
        "Exp"
    }

    fn event_ndims(&self) -> usize {
        0
    }

    fn forward(&self, x: &ArrayD<A>) -> ArrayD<A> {
        x.mapv(A::exp)
    }

    fn inverse(&self, y: &ArrayD<A>) -> ArrayD<A> {
        y.mapv(A::ln)
    }

    fn forward_log_det_jacobian(&self, x: &ArrayD<A>) -> ArrayD<A> {
        x.clone()
    }

    fn inverse_log_det_jacobian(&self, y: &ArrayD<A>) -> ArrayD<A> {
        y.mapv(|y| -y.ln())
    }

    fn forward_and_log_det(&self, x: &ArrayD<A>) -> (ArrayD<A>, ArrayD<A>) {
        (x.mapv(A::exp), x.clone())
    }

    fn inverse_and_log_det(&self, y: &ArrayD<A>) -> (ArrayD<A>, ArrayD<A>) {
        let x = y.mapv(A::ln);
        let log_det = x.mapv(|x| -x);
        (x, log_det)
    }

    fn same_as(&self, other: &dyn Bijector<Elem = A>) -> bool {
        // Stateless: any two instances behave identically.
        other.as_any().downcast_ref::<Self>().is_some()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
