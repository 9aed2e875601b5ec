use super::{lane_reduce, DistanceFunction};
use crate::memory::*;

/// Euclidean distance: `sqrt(sum((a_i - b_i)^2))`
pub struct EuclideanDistance;

impl<T: Primitive> DistanceFunction<T> for EuclideanDistance {
    #[inline(always)]
    fn distance(&self, a: &[T], b: &[T]) -> T {
        lane_reduce(a, b, T::zero(),
            |acc, x, y| { let d = x - y; acc + d * d },    // <vec_components> ^2
            |p, q| p + q)
            .sqrt()
    }
}
