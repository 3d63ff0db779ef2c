//! Event-reinterpretation wrapper: promotes batch axes to event axes.

use crate::bijector::Bijector;
use ndarray::ArrayD;
use std::any::Any;
use vf_core::tensor::sum_trailing;
use vf_core::{Error, Result};

/// Wraps a bijector so that `ndims` trailing input axes count as a single
/// event.
///
/// The wrapped bijector still transforms values coordinate-by-coordinate
/// (or over its own, smaller event); `Block` only changes the bookkeeping.
/// Because the coordinates within an event transform independently, the
/// joint Jacobian is block-diagonal and its log-determinant is the *sum* of
/// the inner log-determinants over the promoted axes. Forward and inverse
/// values pass through untouched.
#[derive(Debug, Clone)]
pub struct Block<B> {
    inner: B,
    ndims: usize,
}

impl<B: Bijector> Block<B> {
    /// Wraps `inner`, treating the last `ndims` input axes as one event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `ndims` is smaller than the event
    /// rank the wrapped bijector already consumes.
    pub fn new(inner: B, ndims: usize) -> Result<Self> {
        if ndims < inner.event_ndims() {
            return Err(Error::Validation(format!(
                "`ndims` must be at least the event rank of the wrapped bijector; \
                 {} consumes {} trailing axes, got ndims {}",
                inner.name(),
                inner.event_ndims(),
                ndims
            )));
        }
        Ok(Self { inner, ndims })
    }

    /// The wrapped bijector.
    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// Number of trailing axes treated as one event.
    pub fn ndims(&self) -> usize {
        self.ndims
    }

    /// Axes to reduce beyond what the wrapped bijector already reduced.
    fn promoted_ndims(&self) -> usize {
        self.ndims - self.inner.event_ndims()
    }
}

impl<B: Bijector + 'static> Bijector for Block<B> {
    type Elem = B::Elem;

    fn name(&self) -> &'static str {
        "Block"
    }

    fn event_ndims(&self) -> usize {
        self.ndims
    }

    fn is_constant_jacobian(&self) -> bool {
        self.inner.is_constant_jacobian()
    }

    fn is_constant_log_det(&self) -> bool {
        self.inner.is_constant_log_det()
    }

    fn forward(&self, x: &ArrayD<B::Elem>) -> ArrayD<B::Elem> {
        self.inner.forward(x)
    }

    fn inverse(&self, y: &ArrayD<B::Elem>) -> ArrayD<B::Elem> {
        self.inner.inverse(y)
    }

    fn forward_log_det_jacobian(&self, x: &ArrayD<B::Elem>) -> ArrayD<B::Elem> {
        sum_trailing(self.inner.forward_log_det_jacobian(x), self.promoted_ndims())
    }

    fn inverse_log_det_jacobian(&self, y: &ArrayD<B::Elem>) -> ArrayD<B::Elem> {
        sum_trailing(self.inner.inverse_log_det_jacobian(y), self.promoted_ndims())
    }

    fn forward_and_log_det(&self, x: &ArrayD<B::Elem>) -> (ArrayD<B::Elem>, ArrayD<B::Elem>) {
        let (y, log_det) = self.inner.forward_and_log_det(x);
        (y, sum_trailing(log_det, self.promoted_ndims()))
    }

    fn inverse_and_log_det(&self, y: &ArrayD<B::Elem>) -> (ArrayD<B::Elem>, ArrayD<B::Elem>) {
        let (x, log_det) = self.inner.inverse_and_log_det(y);
        (x, sum_trailing(log_det, self.promoted_ndims()))
    }

    fn same_as(&self, other: &dyn Bijector<Elem = B::Elem>) -> bool {
        match other.as_any().downcast_ref::<Self>() {
            Some(other) => self.ndims == other.ndims && self.inner.same_as(&other.inner),
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
