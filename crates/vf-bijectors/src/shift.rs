//! Elementwise translation `y = x + shift`.

use crate::bijector::Bijector;
use ndarray::{ArcArray, ArrayD, IxDyn, Zip};
use std::any::Any;
use vf_core::tensor::{broadcast_shape, broadcast_to, same_view};
use vf_core::Scalar;

/// Adds a broadcastable constant to its input.
///
/// A pure translation has a unit Jacobian, so both log-determinants are
/// identically zero. Any `shift` shape is accepted; it broadcasts against
/// the input under NumPy rules.
#[derive(Debug, Clone)]
pub struct Shift<A: Scalar = f64> {
    shift: ArcArray<A, IxDyn>,
}

impl<A: Scalar> Shift<A> {
    /// Creates the bijector. Never fails: any parameter shape is valid.
    pub fn new(shift: ArcArray<A, IxDyn>) -> Self {
        Self { shift }
    }

    /// The additive parameter.
    pub fn shift(&self) -> &ArcArray<A, IxDyn> {
        &self.shift
    }

    fn zero_log_det(&self, input_shape: &[usize]) -> ArrayD<A> {
        ArrayD::zeros(IxDyn(&broadcast_shape(input_shape, self.shift.shape())))
    }
}

impl<A: Scalar> Bijector for Shift<A> {
    type Elem = A;

    fn name(&self) -> &'static str {
        "Shift"
    }

    fn event_ndims(&self) -> usize {
        0
    }

    fn is_constant_jacobian(&self) -> bool {
        true
    }

    fn is_constant_log_det(&self) -> bool {
        true
    }

    fn forward(&self, x: &ArrayD<A>) -> ArrayD<A> {
        let shape = broadcast_shape(x.shape(), self.shift.shape());
        Zip::from(broadcast_to(x, &shape))
            .and(broadcast_to(&self.shift, &shape))
            .map_collect(|&x, &b| x + b)
    }

    fn inverse(&self, y: &ArrayD<A>) -> ArrayD<A> {
        let shape = broadcast_shape(y.shape(), self.shift.shape());
        Zip::from(broadcast_to(y, &shape))
            .and(broadcast_to(&self.shift, &shape))
            .map_collect(|&y, &b| y - b)
    }

    fn forward_log_det_jacobian(&self, x: &ArrayD<A>) -> ArrayD<A> {
        self.zero_log_det(x.shape())
    }

    fn inverse_log_det_jacobian(&self, y: &ArrayD<A>) -> ArrayD<A> {
        self.zero_log_det(y.shape())
    }

    fn forward_and_log_det(&self, x: &ArrayD<A>) -> (ArrayD<A>, ArrayD<A>) {
        (self.forward(x), self.zero_log_det(x.shape()))
    }

    fn inverse_and_log_det(&self, y: &ArrayD<A>) -> (ArrayD<A>, ArrayD<A>) {
        (self.inverse(y), self.zero_log_det(y.shape()))
    }

    fn same_as(&self, other: &dyn Bijector<Elem = A>) -> bool {
        match other.as_any().downcast_ref::<Self>() {
            Some(other) => same_view(&self.shift, &other.shift),
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
