use crate::api::{Dataset, Partition};
use crate::memory::*;
use crate::point::Vector;
use crate::DistanceFunction;
use rayon::prelude::*;

/// Silhouette coefficient of every point (input order) for the given partition.
///
/// For a point `p` within cluster `C`:
/// - `a(p)`: mean distance from `p` to all members of `C` (`p` itself included in the count)
/// - `b(p)`: smallest mean distance from `p` to the members of any other non-empty cluster
/// - `s(p) = (b(p) - a(p)) / max(a(p), b(p))`
///
/// `s(p)` is `0` if `max(a(p), b(p)) == 0`, or if there is no other non-empty cluster.
pub(crate) fn coefficients<T, P, D>(data: &Dataset<T, P, D>, partition: &Partition, assignments: &[usize]) -> Vec<T>
where
    T: Primitive,
    P: Vector<T>,
    D: DistanceFunction<T>,
{
    data.points.par_iter()
        .zip(assignments.par_iter().cloned())
        .map(|(p, own)| {
            let mean_distance = |members: &[usize]| {
                let sum = members.iter()
                    .map(|&idx| data.distance(p, &data.points[idx]))
                    .fold(T::zero(), |acc, d| acc + d);
                sum / from_count::<T>(members.len())
            };
            let a = mean_distance(partition.members(own));
            let b = partition.clusters()
                .filter(|(slot, _)| *slot != own)
                .map(|(_, members)| mean_distance(members))
                .fold(None, |best: Option<T>, d| Some(best.map_or(d, |b| b.min(d))));
            match b {
                Some(b) if a.max(b) > T::zero() => (b - a) / a.max(b),
                _ => T::zero()
            }
        })
        .collect()
}

/// Arithmetic mean of the given silhouette coefficients (`0` for none).
pub(crate) fn mean<T: Primitive>(coefficients: &[T]) -> T {
    if coefficients.is_empty() {
        return T::zero();
    }
    partitioned_sum(coefficients) / from_count::<T>(coefficients.len())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{helpers::testing::*, EuclideanDistance};

    fn dataset_1d(values: &[f64]) -> Dataset<f64, crate::ClusterableVector<f64>, EuclideanDistance> {
        Dataset { points: points_1d(values), dims: 1, metric: EuclideanDistance, intervals: Vec::new() }
    }

    #[test]
    fn hand_calculated() {
        let data = dataset_1d(&[0.0, 1.0, 5.0]);
        let assignments = [0, 0, 1];
        let coeffs = coefficients(&data, &Partition::from_assignments(&assignments, 2), &assignments);
        assert_approx_eq!(coeffs[0], 0.9, 1e-12);
        assert_approx_eq!(coeffs[1], 0.875, 1e-12);
        assert_approx_eq!(coeffs[2], 1.0, 1e-12);
        assert_approx_eq!(mean(&coeffs), (0.9 + 0.875 + 1.0) / 3.0, 1e-12);
    }

    #[test]
    fn misplaced_point_is_negative() {
        let data = dataset_1d(&[0.0, 1.0, 5.0]);
        let assignments = [0, 1, 0];
        let coeffs = coefficients(&data, &Partition::from_assignments(&assignments, 2), &assignments);
        assert_approx_eq!(coeffs[0], -0.6, 1e-12);
        assert!(coeffs[1] < 0.0);
    }

    #[test]
    fn empty_and_single_clusters() {
        let data = dataset_1d(&[3.0, 3.0, 3.0]);
        let assignments = [0, 0, 0];
        let coeffs = coefficients(&data, &Partition::from_assignments(&assignments, 3), &assignments);
        assert_eq!(coeffs, vec![0.0; 3]);
        assert_eq!(mean::<f64>(&[]), 0.0);
    }

    #[test]
    fn identical_points_degenerate_to_zero() {
        for k in 1..=4 {
            let mut kmean = seeded_clusterizer(k, points_1d(&[7.0; 4]), EuclideanDistance, k as u64);
            assert!(kmean.get_clusters().is_some());
            assert_eq!(kmean.state().iterations, 1);
            let coeffs = kmean.get_silhouette_coeffs().unwrap();
            assert_eq!(coeffs, vec![0.0; 4]);
            assert_eq!(kmean.perform_silhouette_analysis(), (true, 0.0));
        }
    }

    #[test]
    fn coefficients_within_bounds() {
        let p = blobs(&[&[0.0, 0.0, 0.0], &[3.0, 1.0, 0.0], &[1.0, 4.0, 2.0]], 60, 2.0, 53);
        let mut kmean = seeded_clusterizer(5, p, EuclideanDistance, 53);
        let coeffs = kmean.get_silhouette_coeffs().unwrap();
        assert_eq!(coeffs.len(), 180);
        assert!(coeffs.iter().all(|s| (-1.0..=1.0).contains(s)));
        let (ok, score) = kmean.perform_silhouette_analysis();
        assert!(ok);
        assert!((-1.0..=1.0).contains(&score));
    }

    #[test]
    fn separated_blobs_score_high() {
        let p = blobs(&[&[0.0, 0.0], &[50.0, 0.0], &[0.0, 50.0]], 100, 1.0, 61);
        let mut kmean = seeded_clusterizer(3, p, EuclideanDistance, 61);
        let (ok, score) = kmean.perform_silhouette_analysis();
        assert!(ok);
        assert!(score > 0.9, "score {}", score);
    }
}
