use crate::api::{update_cluster_frequencies, Dataset};
use crate::memory::*;
use crate::point::Vector;
use crate::{DistanceFunction, KMeansState};
use rand::distributions::{WeightedError, WeightedIndex};
use rand::prelude::*;
use rayon::prelude::*;

/// K-Means++ seeding.
///
/// - **k == 1**: The only centroid is the mean of all points.
/// - **k > 1**: The first centroid is drawn uniformly from the points' bounding box. Each following
/// centroid is a point drawn with a probability proportional to its distance to the currently
/// nearest centroid. After every draw, points that are strictly closer to the new centroid move to it.
///
/// Fills **centroids** (k slots) and the assignments / frequencies of **state**.
pub(crate) fn calculate<T, P, D>(data: &Dataset<T, P, D>, centroids: &mut Vec<P>, state: &mut KMeansState<T>, rnd: &mut dyn RngCore)
where
    T: Primitive,
    P: Vector<T>,
    D: DistanceFunction<T>,
{
    centroids.clear();
    state.assignments.iter_mut().for_each(|a| *a = 0);

    if state.k == 1 {
        let all: Vec<usize> = (0..data.points.len()).collect();
        centroids.push(P::from_coordinates(data.mean_of(&all)));
        update_cluster_frequencies(&state.assignments, &mut state.centroid_frequency);
        tracing::debug!("seeded single centroid at the global mean");
        return;
    }

    // Synthetic first centroid, somewhere within the bounding box
    let mut first = P::empty();
    first.replace_coordinates(data.intervals.iter()
        .map(|interval| interval.min + interval.extent() * rnd.gen_range(T::zero()..T::one()))
        .collect());
    centroids.push(first);

    for k in 1..state.k {
        let centroid_distances = data.centroid_distances(centroids, &state.assignments);
        let sampled_idx = draw_weighted(&centroid_distances, rnd);
        tracing::trace!(slot = k, point = sampled_idx, "sampled centroid");

        let centroid = P::from_coordinates(data.points[sampled_idx].coordinates().to_vec());
        let metric = &data.metric;
        data.points.par_iter()
            .zip(state.assignments.par_iter_mut())
            .zip(centroid_distances.par_iter().cloned())
            .for_each(|((p, assignment), old_dist)| {
                if metric.distance(p.coordinates(), centroid.coordinates()) < old_dist {
                    *assignment = k;
                }
            });
        centroids.push(centroid);
    }
    let used = update_cluster_frequencies(&state.assignments, &mut state.centroid_frequency);
    tracing::debug!(k = state.k, used, "seeded centroids");
}

/// Draw a point index with a probability proportional to its **weight** (distance to the nearest centroid).
///
/// Zero weights are never drawn. If all weights are zero (every point coincides with a centroid),
/// index `0` is returned.
fn draw_weighted<T: Primitive>(weights: &[T], rnd: &mut dyn RngCore) -> usize {
    match WeightedIndex::new(weights) {
        Ok(index) => index.sample(rnd),
        Err(WeightedError::AllWeightsZero) => 0,
        Err(e) => {
            tracing::warn!(error = %e, "weighted draw impossible, using the first point");
            0
        }
    }
}
