//! Sequential composition of bijectors.

use crate::bijector::Bijector;
use ndarray::{ArrayD, IxDyn, Zip};
use std::any::Any;
use std::fmt;
use vf_core::tensor::{broadcast_shape, broadcast_to};
use vf_core::{Error, Result, Scalar};

/// Composition `f = b_1 ∘ b_2 ∘ … ∘ b_n`.
///
/// Components are listed outermost-first: `forward` applies the *last*
/// bijector to the input first, matching how the composition is written
/// mathematically. `inverse` runs the components in listed order, each
/// inverted.
///
/// The chain's log-determinant is the sum of the component
/// log-determinants, each evaluated at the intermediate value flowing
/// through it; terms with different batch shapes broadcast against each
/// other before summing.
///
/// Composition is the one seam in this crate where the component set is
/// genuinely open, so `Chain` stores trait objects; everything else stays
/// statically dispatched.
pub struct Chain<A: Scalar = f64> {
    bijectors: Vec<Box<dyn Bijector<Elem = A>>>,
    event_ndims: usize,
    constant_jacobian: bool,
    constant_log_det: bool,
}

impl<A: Scalar> Chain<A> {
    /// Composes `bijectors`, outermost first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the list is empty, or if the
    /// components disagree on `event_ndims` (mixed-rank composition would
    /// make the summed log-determinant shapes ambiguous).
    pub fn new(bijectors: Vec<Box<dyn Bijector<Elem = A>>>) -> Result<Self> {
        let first = bijectors
            .first()
            .ok_or_else(|| Error::Validation("`Chain` requires at least one bijector".to_string()))?;

        let event_ndims = first.event_ndims();
        for b in &bijectors {
            if b.event_ndims() != event_ndims {
                return Err(Error::Validation(format!(
                    "all chained bijectors must share one event rank; {} has {}, {} has {}",
                    first.name(),
                    event_ndims,
                    b.name(),
                    b.event_ndims()
                )));
            }
        }

        let constant_jacobian = bijectors.iter().all(|b| b.is_constant_jacobian());
        let constant_log_det = bijectors.iter().all(|b| b.is_constant_log_det());
        Ok(Self {
            bijectors,
            event_ndims,
            constant_jacobian,
            constant_log_det,
        })
    }

    /// The composed bijectors, outermost first.
    pub fn bijectors(&self) -> &[Box<dyn Bijector<Elem = A>>] {
        &self.bijectors
    }
}

/// Sum of two log-determinant arrays under NumPy broadcasting.
fn add_log_dets<A: Scalar>(acc: &ArrayD<A>, term: &ArrayD<A>) -> ArrayD<A> {
    let shape = broadcast_shape(acc.shape(), term.shape());
    Zip::from(broadcast_to(acc, &shape))
        .and(broadcast_to(term, &shape))
        .map_collect(|&a, &t| a + t)
}

impl<A: Scalar> Bijector for Chain<A> {
    type Elem = A;

    fn name(&self) -> &'static str {
        "Chain"
    }

    fn event_ndims(&self) -> usize {
        self.event_ndims
    }

    fn is_constant_jacobian(&self) -> bool {
        self.constant_jacobian
    }

    fn is_constant_log_det(&self) -> bool {
        self.constant_log_det
    }

    fn forward(&self, x: &ArrayD<A>) -> ArrayD<A> {
        let mut value = x.clone();
        for b in self.bijectors.iter().rev() {
            value = b.forward(&value);
        }
        value
    }

    fn inverse(&self, y: &ArrayD<A>) -> ArrayD<A> {
        let mut value = y.clone();
        for b in &self.bijectors {
            value = b.inverse(&value);
        }
        value
    }

    fn forward_and_log_det(&self, x: &ArrayD<A>) -> (ArrayD<A>, ArrayD<A>) {
        let mut value = x.clone();
        let mut log_det: Option<ArrayD<A>> = None;
        for b in self.bijectors.iter().rev() {
            let (next, term) = b.forward_and_log_det(&value);
            value = next;
            log_det = Some(match log_det {
                None => term,
                Some(acc) => add_log_dets(&acc, &term),
            });
        }
        // The constructor guarantees at least one component.
        let log_det = log_det.unwrap_or_else(|| ArrayD::zeros(IxDyn(&[])));
        (value, log_det)
    }

    fn inverse_and_log_det(&self, y: &ArrayD<A>) -> (ArrayD<A>, ArrayD<A>) {
        let mut value = y.clone();
        let mut log_det: Option<ArrayD<A>> = None;
        for b in &self.bijectors {
            let (next, term) = b.inverse_and_log_det(&value);
            value = next;
            log_det = Some(match log_det {
                None => term,
                Some(acc) => add_log_dets(&acc, &term),
            });
        }
        let log_det = log_det.unwrap_or_else(|| ArrayD::zeros(IxDyn(&[])));
        (value, log_det)
    }

    fn same_as(&self, other: &dyn Bijector<Elem = A>) -> bool {
        match other.as_any().downcast_ref::<Self>() {
            Some(other) => {
                self.bijectors.len() == other.bijectors.len()
                    && self
                        .bijectors
                        .iter()
                        .zip(other.bijectors.iter())
                        .all(|(a, b)| a.same_as(b.as_ref()))
            }
            None => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<A: Scalar> fmt::Debug for Chain<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.bijectors.iter().map(|b| b.name()).collect();
        f.debug_struct("Chain")
            .field("bijectors", &names)
            .field("event_ndims", &self.event_ndims)
            .finish()
    }
}
