//! Shape and storage utilities over the `ndarray` substrate.
//!
//! Transforms follow NumPy-style broadcasting between inputs and their
//! parameters, and event handling reduces log-determinants over trailing
//! axes. `ndarray` panics on incompatible shapes, and these helpers keep
//! that convention: shape mismatches are programming errors, reported
//! loudly at the call site rather than threaded through `Result`.

use crate::Scalar;
use ndarray::{ArcArray, ArrayBase, ArrayD, ArrayViewD, Axis, Data, Dimension, IxDyn};

/// Computes the NumPy-rule broadcast of two shapes, or `None` if they are
/// incompatible.
///
/// Shapes are aligned at their trailing axes; each pair of dimensions must
/// be equal or contain a 1.
pub fn try_broadcast_shape(a: &[usize], b: &[usize]) -> Option<Vec<usize>> {
    let ndim = a.len().max(b.len());
    let mut shape = vec![0usize; ndim];
    for i in 0..ndim {
        // Right-aligned: axis `ndim - 1 - i` of the output.
        let da = if i < a.len() { a[a.len() - 1 - i] } else { 1 };
        let db = if i < b.len() { b[b.len() - 1 - i] } else { 1 };
        shape[ndim - 1 - i] = match (da, db) {
            (x, y) if x == y => x,
            (1, y) => y,
            (x, 1) => x,
            _ => return None,
        };
    }
    Some(shape)
}

/// Computes the NumPy-rule broadcast of two shapes.
///
/// # Panics
///
/// Panics if the shapes are incompatible.
pub fn broadcast_shape(a: &[usize], b: &[usize]) -> Vec<usize> {
    match try_broadcast_shape(a, b) {
        Some(shape) => shape,
        None => panic!("shapes {:?} and {:?} cannot be broadcast together", a, b),
    }
}

/// Returns a view of `array` broadcast to `shape`.
///
/// # Panics
///
/// Panics if `array` does not broadcast to `shape`.
pub fn broadcast_to<'a, A, S>(
    array: &'a ArrayBase<S, IxDyn>,
    shape: &[usize],
) -> ArrayViewD<'a, A>
where
    S: Data<Elem = A>,
{
    match array.broadcast(shape) {
        Some(view) => view,
        None => panic!(
            "cannot broadcast array of shape {:?} to {:?}",
            array.shape(),
            shape
        ),
    }
}

/// True when two shared arrays are the same view of the same storage.
///
/// Identity means the data pointer, the shape, and the strides all match.
/// A slice of a shared array can keep the data pointer while describing
/// different contents, and compares unequal; so do separate allocations
/// holding equal values.
pub fn same_view<A, D: Dimension>(a: &ArcArray<A, D>, b: &ArcArray<A, D>) -> bool {
    std::ptr::eq(a.as_ptr(), b.as_ptr()) && a.shape() == b.shape() && a.strides() == b.strides()
}

/// Sums an array over its `ndims` trailing axes.
///
/// With `ndims == 0` the array is returned unchanged; summing all axes
/// yields a zero-dimensional array.
///
/// # Panics
///
/// Panics if `ndims` exceeds the rank of `values`.
pub fn sum_trailing<A: Scalar>(values: ArrayD<A>, ndims: usize) -> ArrayD<A> {
    if ndims > values.ndim() {
        panic!(
            "cannot sum over {} trailing axes of a rank-{} array",
            ndims,
            values.ndim()
        );
    }
    let mut out = values;
    for _ in 0..ndims {
        out = out.sum_axis(Axis(out.ndim() - 1));
    }
    out
}
