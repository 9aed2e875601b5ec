use super::{lane_reduce, DistanceFunction};
use crate::memory::*;

/// Chebyshev (maximum) distance: `max(|a_i - b_i|)`
///
/// Zero-dimensional points have a distance of `0`.
pub struct ChebyshevDistance;

impl<T: Primitive> DistanceFunction<T> for ChebyshevDistance {
    #[inline(always)]
    fn distance(&self, a: &[T], b: &[T]) -> T {
        // |x - y| >= 0, so zero is neutral for max here
        lane_reduce(a, b, T::zero(), |acc, x, y| acc.max((x - y).abs()), |p, q| p.max(q))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing::*;

    #[test]
    fn one_dimensional() {
        let (d12, d23, d13) = fixture_distances_1d(&ChebyshevDistance);
        assert_approx_eq!(d12, 1.618033987, 1e-9);
        assert_approx_eq!(d23, 0.000000001, 1e-9);
        assert_approx_eq!(d13, 1.618033988, 1e-9);
    }

    #[test]
    fn three_dimensional() {
        let (d12, d23, d13) = fixture_distances_3d(&ChebyshevDistance);
        assert_approx_eq!(d12, 2004.232692653, 1e-8);
        assert_approx_eq!(d23, 1024.102410238, 1e-8);
        assert_approx_eq!(d13, 2001.091099999, 1e-8);
    }

    #[test]
    fn axioms() { assert_metric_axioms(&ChebyshevDistance); }

    #[test]
    fn maximum_in_tail_and_in_lanes() {
        let mut a = vec![0.0f64; 4 * f64::LANES + 1];
        let b = vec![0.0f64; 4 * f64::LANES + 1];
        let last = a.len() - 1;
        a[last] = -7.0;
        assert_eq!(ChebyshevDistance.distance(&a[..], &b[..]), 7.0);
        a[1] = 9.0;
        assert_eq!(ChebyshevDistance.distance(&a[..], &b[..]), 9.0);
        let empty: &[f64] = &[];
        assert_eq!(ChebyshevDistance.distance(empty, empty), 0.0);
    }
}
