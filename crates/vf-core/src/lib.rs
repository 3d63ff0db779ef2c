//! Core types for VarFlow.
//!
//! This crate holds the pieces every other VarFlow crate builds on:
//!
//! - [`Error`] / [`Result`]: the shared error vocabulary.
//! - [`Scalar`]: the element-type abstraction transforms are generic over.
//! - [`tensor`]: broadcasting and trailing-axis reduction over `ndarray`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod scalar;
pub mod tensor;

pub use error::{Error, Result};
pub use scalar::Scalar;
