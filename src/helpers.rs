#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		match ($left, $right, $tol) {
			(left_val , right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				if !(delta < tol_val) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed ∆={:e})",
						left_val , right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-15))
}

#[cfg(test)]
pub(crate) mod testing {
	use rand::prelude::*;
	use crate::{ClusterableVector, DistanceFunction, KMeansPP, KMeansConfig, Vector};

	pub fn points(coordinates: &[&[f64]]) -> Vec<ClusterableVector<f64>> {
		coordinates.iter().map(|c| ClusterableVector::new(c.to_vec())).collect()
	}

	pub fn points_1d(values: &[f64]) -> Vec<ClusterableVector<f64>> {
		values.iter().map(|&v| ClusterableVector::new(vec![v])).collect()
	}

	/// Gaussian-free blobs: `per_blob` points uniformly scattered within `radius` around each center.
	pub fn blobs(centers: &[&[f64]], per_blob: usize, radius: f64, seed: u64) -> Vec<ClusterableVector<f64>> {
		let mut rnd = StdRng::seed_from_u64(seed);
		centers.iter()
			.flat_map(|c| (0..per_blob).map(|_| c.iter().map(|v| v + rnd.gen_range(-radius..radius)).collect::<Vec<_>>()).collect::<Vec<_>>())
			.map(ClusterableVector::new)
			.collect()
	}

	pub fn seeded_config<'a>(seed: u64) -> KMeansConfig<'a, f64> {
		KMeansConfig::build().random_generator(StdRng::seed_from_u64(seed)).build()
	}

	pub fn seeded_clusterizer<'a, D: DistanceFunction<f64>>(k: usize, points: Vec<ClusterableVector<f64>>, metric: D, seed: u64)
			-> KMeansPP<'a, f64, ClusterableVector<f64>, D> {
		KMeansPP::with_config(k, points, metric, seeded_config(seed)).unwrap()
	}

	const FIXTURE_1D: [[f64;1];3] = [[0.000000001], [1.618033988], [1.618033989]];
	const FIXTURE_3D: [[f64;3];3] = [
		[0.000000001, -1024.102410240, 3.141592653],
		[1.618033988, 2.718281828, -2001.091100000],
		[1.618033989, -1021.384128410, -1997.949507346],
	];

	/// Distances (1->2, 2->3, 1->3) between the fixture vectors, after checking the metric axioms on them.
	fn fixture_distances<D: DistanceFunction<f64>>(metric: &D, fixture: &[&[f64]]) -> (f64, f64, f64) {
		let v = points(fixture);
		for p in &v {
			assert_eq!(metric.checked_distance(p, p).unwrap(), 0.0);
		}
		let d = |i: usize, j: usize| metric.checked_distance(&v[i], &v[j]).unwrap();
		assert_eq!(d(0, 1), d(1, 0));
		assert_eq!(d(1, 2), d(2, 1));
		assert_eq!(d(0, 2), d(2, 0));
		assert!(d(0, 2) <= d(0, 1) + d(1, 2));
		(d(0, 1), d(1, 2), d(0, 2))
	}
	pub fn fixture_distances_1d<D: DistanceFunction<f64>>(metric: &D) -> (f64, f64, f64) {
		fixture_distances(metric, &[&FIXTURE_1D[0], &FIXTURE_1D[1], &FIXTURE_1D[2]])
	}
	pub fn fixture_distances_3d<D: DistanceFunction<f64>>(metric: &D) -> (f64, f64, f64) {
		fixture_distances(metric, &[&FIXTURE_3D[0], &FIXTURE_3D[1], &FIXTURE_3D[2]])
	}

	/// Check identity, symmetry and triangle inequality on random triples of differing dimensions.
	pub fn assert_metric_axioms<D: DistanceFunction<f64>>(metric: &D) {
		let mut rnd = StdRng::seed_from_u64(1337);
		for dims in [1, 2, 3, 7, 8, 9, 31, 64, 129] {
			for _ in 0..50 {
				let mut random_point = || ClusterableVector::new((0..dims).map(|_| rnd.gen_range(-100.0..100.0)).collect());
				let (x, y, z) = (random_point(), random_point(), random_point());
				let d = |a: &ClusterableVector<f64>, b: &ClusterableVector<f64>| metric.distance(a.coordinates(), b.coordinates());
				assert_eq!(d(&x, &x), 0.0);
				assert!(d(&x, &y) >= 0.0);
				assert_eq!(d(&x, &y), d(&y, &x));
				assert!(d(&x, &z) <= d(&x, &y) + d(&y, &z) + 1e-9);
			}
		}
	}
}
