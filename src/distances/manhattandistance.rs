use super::{lane_reduce, DistanceFunction};
use crate::memory::*;

/// Manhattan (taxicab) distance: `sum(|a_i - b_i|)`
pub struct ManhattanDistance;

impl<T: Primitive> DistanceFunction<T> for ManhattanDistance {
    #[inline(always)]
    fn distance(&self, a: &[T], b: &[T]) -> T {
        lane_reduce(a, b, T::zero(), |acc, x, y| acc + (x - y).abs(), |p, q| p + q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing::*;

    #[test]
    fn one_dimensional() {
        let (d12, d23, d13) = fixture_distances_1d(&ManhattanDistance);
        assert_approx_eq!(d12, 1.618033987, 1e-9);
        assert_approx_eq!(d23, 0.000000001, 1e-9);
        assert_approx_eq!(d13, 1.618033988, 1e-9);
    }

    #[test]
    fn three_dimensional() {
        let (d12, d23, d13) = fixture_distances_3d(&ManhattanDistance);
        assert_approx_eq!(d12, 3032.671418708, 1e-8);
        assert_approx_eq!(d23, 1027.244002893, 1e-8);
        assert_approx_eq!(d13, 2005.427415817, 1e-8);
    }

    #[test]
    fn axioms() { assert_metric_axioms(&ManhattanDistance); }
}
