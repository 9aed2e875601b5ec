mod euclideandistance;
mod manhattandistance;
mod chebyshevdistance;

pub use euclideandistance::EuclideanDistance;
pub use manhattandistance::ManhattanDistance;
pub use chebyshevdistance::ChebyshevDistance;

use crate::{memory::*, point::Vector, Error, Result};

/// Distance metric used for seeding, assignment, residual and silhouette calculations.
///
/// Implementations have to satisfy the metric axioms (identity, symmetry, triangle inequality),
/// and must return non-negative values.
pub trait DistanceFunction<T: Primitive>: Sync + Send {
    /// Distance between two coordinate slices of equal length.
    ///
    /// The clusterizer validates dimensions once at construction and afterwards calls this
    /// directly. Use [`DistanceFunction::checked_distance`] for unvalidated input.
    fn distance(&self, a: &[T], b: &[T]) -> T;

    /// Distance between two points, failing with [`Error::DimensionMismatch`] if their
    /// dimensions differ.
    fn checked_distance<V: Vector<T> + ?Sized>(&self, a: &V, b: &V) -> Result<T> where Self: Sized {
        if a.dimension() != b.dimension() {
            return Err(Error::DimensionMismatch { expected: a.dimension(), found: b.dimension() });
        }
        Ok(self.distance(a.coordinates(), b.coordinates()))
    }
}

/// Adapter turning a plain function or closure into a [`DistanceFunction`].
///
/// ## Example
/// ```rust
/// use kmeanspp::*;
/// let squared = DistanceFn(|a: &[f64], b: &[f64]| a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum::<f64>());
/// let (a, b): (&[f64], &[f64]) = (&[0.0, 0.0], &[3.0, 4.0]);
/// assert_eq!(squared.distance(a, b), 25.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DistanceFn<F>(pub F);

impl<T, F> DistanceFunction<T> for DistanceFn<F>
where
    T: Primitive,
    F: Fn(&[T], &[T]) -> T + Sync + Send,
{
    #[inline(always)]
    fn distance(&self, a: &[T], b: &[T]) -> T {
        (self.0)(a, b)
    }
}

/// Lane-chunked reduction shared by the built-in metrics.
///
/// The coordinates are walked in chunks of [`Primitive::LANES`], every lane keeping its own partial
/// accumulator (folded with **lane_op**). The remainder dimensions are folded sequentially into
/// one further partial, then all partials are merged with **combine**.
/// **init** has to be the neutral element of **combine**.
#[inline(always)]
pub(crate) fn lane_reduce<T, L, C>(a: &[T], b: &[T], init: T, lane_op: L, combine: C) -> T
where
    T: Primitive,
    L: Fn(T, T, T) -> T,
    C: Fn(T, T) -> T,
{
    debug_assert_eq!(a.len(), b.len());
    let (a_chunks, b_chunks) = (a.chunks_exact(T::LANES), b.chunks_exact(T::LANES));
    let (a_rem, b_rem) = (a_chunks.remainder(), b_chunks.remainder());

    // only the first T::LANES partials are used
    let mut buffer = [init; MAX_LANES];
    let partials = &mut buffer[..T::LANES];
    a_chunks.zip(b_chunks).for_each(|(ac, bc)| {
        partials.iter_mut()
            .zip(ac.iter().zip(bc.iter()))
            .for_each(|(acc, (&x, &y))| *acc = lane_op(*acc, x, y));
    });
    let tail = a_rem.iter().zip(b_rem.iter())
        .fold(init, |acc, (&x, &y)| lane_op(acc, x, y));

    partials.iter().fold(tail, |acc, &p| combine(acc, p))
}
