//! Elementwise affine transform `y = x * scale + shift`.

use crate::bijector::Bijector;
use ndarray::{ArcArray, ArrayD, IxDyn, Zip};
use std::any::Any;
use vf_core::tensor::{broadcast_shape, broadcast_to, same_view, try_broadcast_shape};
use vf_core::{Error, Result, Scalar};

/// Affine bijector applied independently per coordinate.
///
/// Parameters broadcast against the input under NumPy rules, so a scalar
/// `scale` rescales every coordinate while a full-shape `scale` acts
/// per-coordinate. The Jacobian is diagonal with entries `scale`, giving a
/// per-coordinate log-determinant of `ln|scale|`, fixed at construction.
///
/// The inverse divides by `scale`. Construction does not reject zero
/// entries: a zero scale is not invertible there, and inverse outputs at
/// such coordinates are infinite or NaN.
#[derive(Debug, Clone)]
pub struct ScalarAffine<A: Scalar = f64> {
    shift: ArcArray<A, IxDyn>,
    scale: ArcArray<A, IxDyn>,
    log_scale: ArcArray<A, IxDyn>,
    batch_shape: Vec<usize>,
}

impl<A: Scalar> ScalarAffine<A> {
    /// Creates the bijector from `shift` and `scale`.
    ///
    /// `ln|scale|` is computed once here and reused by every
    /// log-determinant query.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the parameter shapes do not
    /// broadcast against each other.
    pub fn new(shift: ArcArray<A, IxDyn>, scale: ArcArray<A, IxDyn>) -> Result<Self> {
        let batch_shape = joint_param_shape(shift.shape(), scale.shape())?;
        let log_scale = scale.mapv(|s| s.abs().ln()).into_shared();
        Ok(Self {
            shift,
            scale,
            log_scale,
            batch_shape,
        })
    }

    /// Creates the bijector from `shift` and the *logarithm* of the scale.
    ///
    /// The scale is `exp(log_scale)`, always strictly positive, which makes
    /// this the usual parameterization when the scale itself is being
    /// optimized.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the parameter shapes do not
    /// broadcast against each other.
    pub fn with_log_scale(
        shift: ArcArray<A, IxDyn>,
        log_scale: ArcArray<A, IxDyn>,
    ) -> Result<Self> {
        let batch_shape = joint_param_shape(shift.shape(), log_scale.shape())?;
        let scale = log_scale.mapv(A::exp).into_shared();
        Ok(Self {
            shift,
            scale,
            log_scale,
            batch_shape,
        })
    }

    /// The additive parameter.
    pub fn shift(&self) -> &ArcArray<A, IxDyn> {
        &self.shift
    }

    /// The multiplicative parameter.
    pub fn scale(&self) -> &ArcArray<A, IxDyn> {
        &self.scale
    }

    /// `ln|scale|`, fixed at construction.
    pub fn log_scale(&self) -> &ArcArray<A, IxDyn> {
        &self.log_scale
    }

    /// Broadcast of the two parameter shapes; inputs broadcast against this.
    pub fn batch_shape(&self) -> &[usize] {
        &self.batch_shape
    }
}

fn joint_param_shape(shift: &[usize], scale: &[usize]) -> Result<Vec<usize>> {
    try_broadcast_shape(shift, scale).ok_or_else(|| {
        Error::Validation(format!(
            "`shift` and `scale` must have broadcastable shapes, got {:?} and {:?}",
            shift, scale
        ))
    })
}

impl<A: Scalar> Bijector for ScalarAffine<A> {
    type Elem = A;

    fn name(&self) -> &'static str {
        "ScalarAffine"
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
        let shape = broadcast_shape(x.shape(), &self.batch_shape);
        Zip::from(broadcast_to(x, &shape))
            .and(broadcast_to(&self.scale, &shape))
            .and(broadcast_to(&self.shift, &shape))
            .map_collect(|&x, &s, &b| x * s + b)
    }

    fn inverse(&self, y: &ArrayD<A>) -> ArrayD<A> {
        let shape = broadcast_shape(y.shape(), &self.batch_shape);
        Zip::from(broadcast_to(y, &shape))
            .and(broadcast_to(&self.scale, &shape))
            .and(broadcast_to(&self.shift, &shape))
            .map_collect(|&y, &s, &b| (y - b) / s)
    }

    fn forward_log_det_jacobian(&self, x: &ArrayD<A>) -> ArrayD<A> {
        let shape = broadcast_shape(x.shape(), &self.batch_shape);
        broadcast_to(&self.log_scale, &shape).to_owned()
    }

    fn inverse_log_det_jacobian(&self, y: &ArrayD<A>) -> ArrayD<A> {
        let shape = broadcast_shape(y.shape(), &self.batch_shape);
        broadcast_to(&self.log_scale, &shape).mapv(|v| -v)
    }

    fn forward_and_log_det(&self, x: &ArrayD<A>) -> (ArrayD<A>, ArrayD<A>) {
        (self.forward(x), self.forward_log_det_jacobian(x))
    }

    fn inverse_and_log_det(&self, y: &ArrayD<A>) -> (ArrayD<A>, ArrayD<A>) {
        (self.inverse(y), self.inverse_log_det_jacobian(y))
    }

    fn same_as(&self, other: &dyn Bijector<Elem = A>) -> bool {
        match other.as_any().downcast_ref::<Self>() {
            Some(other) => {
                same_view(&self.shift, &other.shift) && same_view(&self.scale, &other.scale)
            }
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
