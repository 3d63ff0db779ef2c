//! Composable invertible transforms with tracked Jacobian log-determinants.
//!
//! A [`Bijector`] pairs a transform with its inverse and with the
//! log-absolute-determinant of its Jacobian, which is what the
//! change-of-variables formula needs to push probability densities through
//! the transform. Bijectors here operate on [`ndarray`] dynamic-rank
//! arrays, generic over the element type via [`Scalar`].
//!
//! The building blocks compose instead of specializing: [`DiagLinear`] is
//! nothing but a [`ScalarAffine`] wrapped in a [`Block`], and arbitrary
//! pipelines are built with [`Chain`] and [`Inverse`]. Construction
//! validates shapes and ranks eagerly and returns [`Result`]; evaluation
//! never checks domains element-by-element, letting NaN and infinity
//! propagate the way the underlying float math does.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bijector;
pub mod block;
pub mod chain;
pub mod diag_linear;
pub mod exp;
pub mod inverse;
pub mod math;
pub mod scalar_affine;
pub mod shift;
pub mod tanh;

pub use bijector::Bijector;
pub use block::Block;
pub use chain::Chain;
pub use diag_linear::DiagLinear;
pub use exp::Exp;
pub use inverse::Inverse;
pub use scalar_affine::ScalarAffine;
pub use shift::Shift;
pub use tanh::Tanh;

pub use vf_core::{Error, Result, Scalar};
