use crate::api::{update_cluster_frequencies, Dataset, EmptyClusterEvent, KMeansConfig, Partition};
use crate::convergence::EmptyClusterPolicy;
use crate::memory::*;
use crate::point::Vector;
use crate::{DistanceFunction, Error, KMeansState, Result};
use rayon::prelude::*;

/// Outcome of recomputing one centroid slot.
enum SlotUpdate<P, T> {
    Moved { centroid: P, distance: T },
    Empty
}

/// Recompute every centroid as the mean of its members and return the residual (sum of the distances
/// all centroids moved). Slots are processed in parallel, the residual is summed up afterwards.
fn update_centroids<T, P, D>(data: &Dataset<T, P, D>, centroids: &mut [P], state: &mut KMeansState<T>, policy: EmptyClusterPolicy) -> Result<T>
where
    T: Primitive,
    P: Vector<T>,
    D: DistanceFunction<T>,
{
    let used_centroids_cnt = update_cluster_frequencies(&state.assignments, &mut state.centroid_frequency);
    let partition = Partition::from_assignments(&state.assignments, state.k);
    let old_centroids: &[P] = centroids;

    let updates: Vec<SlotUpdate<P, T>> = (0..state.k).into_par_iter()
        .map(|slot| {
            let members = partition.members(slot);
            if members.is_empty() {
                return SlotUpdate::Empty;
            }
            let centroid = P::from_coordinates(data.mean_of(members));
            let distance = data.distance(&centroid, &old_centroids[slot]);
            SlotUpdate::Moved { centroid, distance }
        })
        .collect();

    if used_centroids_cnt != state.k {
        let iteration = state.iterations;
        for (slot, _) in updates.iter().enumerate().filter(|(_, u)| matches!(u, SlotUpdate::Empty)) {
            tracing::warn!(iteration, centroid = slot, "centroid without members, keeping its previous position");
            if policy == EmptyClusterPolicy::Fail {
                return Err(Error::EmptyCluster { iteration, centroid: slot });
            }
            state.empty_clusters.push(EmptyClusterEvent { iteration, centroid: slot });
        }
    }

    let mut residual = T::zero();
    centroids.iter_mut().zip(updates).for_each(|(old, update)| {
        if let SlotUpdate::Moved { centroid, distance } = update {
            *old = centroid;
            residual += distance;
        }
    });
    Ok(residual)
}

/// Lloyd's algorithm: alternate assignment and update steps until the configured convergence
/// criterion is reached or **max_iterations** iterations were done.
///
/// On convergence, the points are assigned once more, so that the assignments reflect the
/// final centroid positions.
///
/// ## Errors
/// - [`Error::NonConvergence`] when the iteration cap was exhausted
/// - [`Error::EmptyCluster`] when a centroid ran empty and [`EmptyClusterPolicy::Fail`] is set
pub(crate) fn calculate<T, P, D>(data: &Dataset<T, P, D>, centroids: &mut [P], state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>) -> Result<()>
where
    T: Primitive,
    P: Vector<T>,
    D: DistanceFunction<T>,
{
    state.converged = false;
    for _ in 0..config.max_iterations {
        state.iterations += 1;
        data.update_cluster_assignments(centroids, &mut state.assignments);
        let residual = update_centroids(data, centroids, state, config.empty_cluster)?;
        state.residual = residual;

        // Notify subscriber about finished iteration
        (config.iteration_done)(state, state.iterations, residual);
        tracing::debug!(iteration = state.iterations, %residual, "lloyd iteration");

        if config.convergence.is_reached(residual) {
            data.update_cluster_assignments(centroids, &mut state.assignments);
            update_cluster_frequencies(&state.assignments, &mut state.centroid_frequency);
            state.converged = true;
            tracing::info!(iterations = state.iterations, "clustering converged");
            return Ok(());
        }
    }
    tracing::warn!(max_iterations = config.max_iterations, residual = %state.residual, "clustering did not converge");
    Err(Error::NonConvergence { iterations: config.max_iterations })
}
