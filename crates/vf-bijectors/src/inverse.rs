//! Direction-swapping wrapper: the inverse of a bijector, as a bijector.

use crate::bijector::Bijector;
use ndarray::ArrayD;
use std::any::Any;

/// The inverse of the wrapped bijector.
///
/// Every operation delegates to the opposite direction of the inner
/// transform, so `Inverse` costs nothing beyond the delegation. Wrapping
/// twice restores the original behavior;
/// `Inverse::new(b).inverse_of_same(&b)` recognizes that case for chains
/// that want to cancel adjacent pairs.
#[derive(Debug, Clone)]
pub struct Inverse<B> {
    inner: B,
}

impl<B: Bijector> Inverse<B> {
    /// Wraps `inner`, swapping its forward and inverse directions.
    pub fn new(inner: B) -> Self {
        Self { inner }
    }

    /// The wrapped bijector.
    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// True if this wrapper provably undoes `other`: the wrapped bijector
    /// and `other` are [`same_as`](Bijector::same_as). `false` when unsure.
    pub fn inverse_of_same(&self, other: &dyn Bijector<Elem = B::Elem>) -> bool {
        self.inner.same_as(other)
    }
}

impl<B: Bijector + 'static> Bijector for Inverse<B> {
    type Elem = B::Elem;

    fn name(&self) -> &'static str {
        "Inverse"
    }

    fn event_ndims(&self) -> usize {
        self.inner.event_ndims()
    }

    fn is_constant_jacobian(&self) -> bool {
        self.inner.is_constant_jacobian()
    }

    fn is_constant_log_det(&self) -> bool {
        self.inner.is_constant_log_det()
    }

    fn forward(&self, x: &ArrayD<B::Elem>) -> ArrayD<B::Elem> {
        self.inner.inverse(x)
    }

    fn inverse(&self, y: &ArrayD<B::Elem>) -> ArrayD<B::Elem> {
        self.inner.forward(y)
    }

    fn forward_log_det_jacobian(&self, x: &ArrayD<B::Elem>) -> ArrayD<B::Elem> {
        self.inner.inverse_log_det_jacobian(x)
    }

    fn inverse_log_det_jacobian(&self, y: &ArrayD<B::Elem>) -> ArrayD<B::Elem> {
        self.inner.forward_log_det_jacobian(y)
    }

    fn forward_and_log_det(&self, x: &ArrayD<B::Elem>) -> (ArrayD<B::Elem>, ArrayD<B::Elem>) {
        self.inner.inverse_and_log_det(x)
    }

    fn inverse_and_log_det(&self, y: &ArrayD<B::Elem>) -> (ArrayD<B::Elem>, ArrayD<B::Elem>) {
        self.inner.forward_and_log_det(y)
    }

    fn same_as(&self, other: &dyn Bijector<Elem = B::Elem>) -> bool {
        match other.as_any().downcast_ref::<Self>() {
            Some(other) => self.inner.same_as(&other.inner),
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
