use crate::{
    bounds::{self, DimensionInterval},
    convergence::{Convergence, EmptyClusterPolicy},
    memory::*,
    point::{Clusterable, Vector},
    DistanceFunction, Error, Result,
};
use rand::prelude::*;
use rayon::prelude::*;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>, usize, T);

/// Iteration cap used by [`KMeansConfig::default`].
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// This is a structure holding various configuration options for a k-means++ run, such as
/// the random number generator to use, the convergence criterion, or a couple of callbacks, that can be set
/// to get status information from a running calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Callback that is called, when the seeding phase finished
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after seeding
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each Lloyd iteration
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the iteration
    /// - **iteration_id**: Number of the current iteration (1-based, counted over the clusterizer's lifetime)
    /// - **residual**: Summed distance all centroids moved in this iteration
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Random number generator, owned for the whole lifetime of the clusterizer
    pub(crate) rnd: Box<dyn RngCore>,
    pub(crate) max_iterations: usize,
    pub(crate) convergence: Convergence<T>,
    pub(crate) empty_cluster: EmptyClusterPolicy
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_,_,_| {},
            rnd: Box::new(rand::thread_rng()),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            convergence: Convergence::ExactZero,
            empty_cluster: EmptyClusterPolicy::RetainCentroid
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig")
            .field("max_iterations", &self.max_iterations)
            .field("convergence", &self.convergence)
            .field("empty_cluster", &self.empty_cluster)
            .finish_non_exhaustive()
    }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after seeding, before the first Lloyd iteration.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each Lloyd iteration.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the random number generator that should be used for seeding.
    /// Use a seeded generator for deterministically repeatable results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(rnd); self
    }
    /// Limit the amount of Lloyd iterations per clustering attempt. Has to be positive.
    /// ## Default
    /// `1000`
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations; self
    }
    /// Set the criterion that decides, when the centroids stopped moving.
    /// ## Default
    /// [`Convergence::ExactZero`]
    pub fn convergence(mut self, convergence: Convergence<T>) -> Self {
        self.config.convergence = convergence; self
    }
    /// Set how update steps treat centroids without any members.
    /// ## Default
    /// [`EmptyClusterPolicy::RetainCentroid`]
    pub fn empty_cluster(mut self, policy: EmptyClusterPolicy) -> Self {
        self.config.empty_cluster = policy; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}


/// A centroid slot that was found without members during an update step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyClusterEvent {
    pub iteration: usize,
    pub centroid: usize
}

/// Bookkeeping of a k-means++ run.
///
/// ## Fields
/// - **k**: The amount of centroids
/// - **iterations**: Lloyd iterations performed so far
/// - **residual**: Residual of the last iteration (sum of the distances every centroid moved)
/// - **converged**: Whether the last clustering attempt reached the convergence criterion
/// - **assignments**: Vector mapping each point (input order) to its centroid slot
/// - **centroid_frequency**: Amount of points assigned to each centroid slot
/// - **empty_clusters**: Every time an update step found a centroid without members
#[derive(Clone, Debug)]
pub struct KMeansState<T: Primitive> {
    pub k: usize,
    pub iterations: usize,
    pub residual: T,
    pub converged: bool,
    pub assignments: Vec<usize>,
    pub centroid_frequency: Vec<usize>,
    pub empty_clusters: Vec<EmptyClusterEvent>
}
impl<T: Primitive> KMeansState<T> {
    pub(crate) fn new(point_cnt: usize, k: usize) -> Self {
        Self {
            k,
            iterations: 0,
            residual: T::infinity(),
            converged: false,
            assignments: vec![0usize;point_cnt],
            centroid_frequency: vec![0usize;k],
            empty_clusters: Vec::new()
        }
    }
}


/// Member lists of all centroid slots (point indices in input order). Slots without members
/// are kept as empty lists.
#[derive(Clone, Debug, PartialEq)]
pub struct Partition {
    members: Vec<Vec<usize>>
}
impl Partition {
    pub(crate) fn from_assignments(assignments: &[usize], k: usize) -> Self {
        let mut members = vec![Vec::new(); k];
        assignments.iter().enumerate().for_each(|(idx, &slot)| members[slot].push(idx));
        Self { members }
    }
    /// Member indices of centroid slot **slot**.
    pub fn members(&self, slot: usize) -> &[usize] {
        &self.members[slot]
    }
    /// Amount of centroid slots (including empty ones).
    pub fn slot_count(&self) -> usize {
        self.members.len()
    }
    /// Iterate all non-empty slots as `(slot, members)`.
    pub fn clusters(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.members.iter().enumerate()
            .filter(|(_, m)| !m.is_empty())
            .map(|(slot, m)| (slot, m.as_slice()))
    }
}

/// One cluster of a converged partition.
#[derive(Debug)]
pub struct Cluster<'p, P> {
    /// Slot index of the centroid within [`KMeansPP::centroids`]
    pub slot: usize,
    pub centroid: &'p P,
    /// Member points, in input order
    pub members: Vec<&'p P>
}


/// Immutable part of a run: the points, their dimensionality, the metric and the bounding box.
pub(crate) struct Dataset<T: Primitive, P, D> {
    pub(crate) points: Vec<P>,
    pub(crate) dims: usize,
    pub(crate) metric: D,
    pub(crate) intervals: Vec<DimensionInterval<T>>
}
impl<T, P, D> Dataset<T, P, D> where T: Primitive, P: Vector<T>, D: DistanceFunction<T> {
    #[inline(always)]
    pub(crate) fn distance(&self, a: &P, b: &P) -> T {
        self.metric.distance(a.coordinates(), b.coordinates())
    }

    /// Assign every point to its nearest centroid. Ties go to the lowest slot index.
    pub(crate) fn update_cluster_assignments(&self, centroids: &[P], assignments: &mut [usize]) {
        let metric = &self.metric;
        self.points.par_iter()
            .zip(assignments.par_iter_mut())
            .for_each(|(p, assignment)| {
                let mut best = (0, T::infinity());
                for (idx, c) in centroids.iter().enumerate() {
                    let dist = metric.distance(p.coordinates(), c.coordinates());
                    if dist < best.1 {
                        best = (idx, dist);
                    }
                }
                *assignment = best.0;
            });
    }

    /// Distance of every point to its currently assigned centroid.
    pub(crate) fn centroid_distances(&self, centroids: &[P], assignments: &[usize]) -> Vec<T> {
        self.points.par_iter()
            .zip(assignments.par_iter().cloned())
            .map(|(p, a)| self.distance(p, &centroids[a]))
            .collect()
    }

    /// Coordinate-wise mean of the given members. Summation runs sequentially in member order,
    /// so equal member lists always produce bit-identical means.
    pub(crate) fn mean_of(&self, members: &[usize]) -> Vec<T> {
        let mut sum = vec![T::zero(); self.dims];
        members.iter().for_each(|&idx| {
            sum.iter_mut()
                .zip(self.points[idx].coordinates().iter())
                .for_each(|(s, v)| *s += v);
        });
        let cnt = from_count::<T>(members.len());
        sum.into_iter().map(|s| s / cnt).collect()
    }
}


pub(crate) fn update_cluster_frequencies(assignments: &[usize], centroid_frequency: &mut [usize]) -> usize {
    centroid_frequency.iter_mut().for_each(|v| *v = 0);
    let mut used_centroids_cnt = 0;
    assignments.iter().cloned()
        .for_each(|centroid_id| {
            if centroid_frequency[centroid_id] == 0 {
                used_centroids_cnt += 1; // Count the amount of centroids with more than 0 points
            }
            centroid_frequency[centroid_id] += 1;
        });
    used_centroids_cnt
}


/// Entrypoint of this crate's API-Surface.
///
/// Create an instance of this struct, giving the amount of centroids, the points and the metric.
/// The point set's bounding box and the k-means++ seeding are calculated eagerly within the constructor.
/// Lloyd's algorithm runs lazily, on the first request for clusters or silhouette coefficients, and its
/// partition is memoized afterwards.
///
/// ## Generics
/// - **T**: Underlying primitive type used for coordinates and distances
/// - **P**: Point type (see [`Vector`] and [`Clusterable`])
/// - **D**: Distance metric (see [`DistanceFunction`])
///
/// ## Example
/// ```rust
/// use kmeanspp::*;
///
/// let points: Vec<ClusterableVector<f64>> = [0.0, 0.0, 0.0, 10.0, 10.0, 10.0].iter()
///     .map(|&v| ClusterableVector::new(vec![v]))
///     .collect();
/// let mut clusterizer = KMeansPP::new(2, points, EuclideanDistance, 1000).unwrap();
///
/// let clusters = clusterizer.get_clusters().expect("converges");
/// assert_eq!(clusters.len(), 2);
/// let (converged, mean_silhouette) = clusterizer.perform_silhouette_analysis();
/// assert!(converged && mean_silhouette > 0.99);
/// ```
pub struct KMeansPP<'a, T: Primitive, P, D> {
    pub(crate) data: Dataset<T, P, D>,
    pub(crate) centroids: Vec<P>,
    pub(crate) state: KMeansState<T>,
    pub(crate) config: KMeansConfig<'a, T>,
    partition: Option<Partition>
}
impl<'a, T, P, D> KMeansPP<'a, T, P, D>
where
    T: Primitive,
    P: Vector<T> + Clusterable,
    D: DistanceFunction<T>,
{
    /// Create a new clusterizer with default configuration and the given iteration cap.
    ///
    /// ## Arguments
    /// - **k**: Amount of centroids (clusters), has to be positive
    /// - **points**: Points to cluster, at least **k** of them, all of equal dimension
    /// - **metric**: Distance metric to use
    /// - **max_iterations**: Upper limit of Lloyd iterations per clustering attempt, has to be positive
    ///
    /// ## Errors
    /// - [`Error::InvalidArgument`] for a zero **k** or **max_iterations**, or less than **k** points
    /// - [`Error::DimensionMismatch`] if the points differ in dimension
    pub fn new(k: usize, points: Vec<P>, metric: D, max_iterations: usize) -> Result<Self> {
        Self::with_config(k, points, metric, KMeansConfig::build().max_iterations(max_iterations).build())
    }

    /// Create a new clusterizer using the given [`KMeansConfig`].
    /// See [`KMeansPP::new`] for the arguments and error conditions.
    pub fn with_config(k: usize, points: Vec<P>, metric: D, config: KMeansConfig<'a, T>) -> Result<Self> {
        if k == 0 {
            return Err(Error::InvalidArgument { name: "k", message: "centroid count has to be positive" });
        }
        if config.max_iterations == 0 {
            return Err(Error::InvalidArgument { name: "max_iterations", message: "iteration cap has to be positive" });
        }
        if points.len() < k {
            return Err(Error::InvalidArgument { name: "points", message: "point count has to be at least the centroid count" });
        }
        let dims = points[0].dimension();
        if let Some(p) = points.iter().find(|p| p.dimension() != dims) {
            return Err(Error::DimensionMismatch { expected: dims, found: p.dimension() });
        }

        let intervals = bounds::calculate(&points, dims);
        tracing::debug!(k, points = points.len(), dims, "calculated dimension intervals");

        let point_cnt = points.len();
        let mut kmean = Self {
            data: Dataset { points, dims, metric, intervals },
            centroids: Vec::with_capacity(k),
            state: KMeansState::new(point_cnt, k),
            config,
            partition: None
        };
        crate::inits::kmeanplusplus::calculate(&kmean.data, &mut kmean.centroids, &mut kmean.state, kmean.config.rnd.as_mut());
        (kmean.config.init_done)(&kmean.state);
        Ok(kmean)
    }

    /// Run Lloyd's algorithm (unless a converged partition is memoized already) and return the partition.
    ///
    /// A failed attempt leaves no partition behind; calling this again continues iterating from the
    /// current centroids, with a fresh iteration budget.
    ///
    /// ## Errors
    /// - [`Error::NonConvergence`] if the iteration cap was exhausted
    /// - [`Error::EmptyCluster`] if a centroid ran empty while [`EmptyClusterPolicy::Fail`] is configured
    pub fn cluster(&mut self) -> Result<&Partition> {
        let partition = match self.partition.take() {
            Some(partition) => partition,
            None => {
                crate::variants::lloyd::calculate(&self.data, &mut self.centroids, &mut self.state, &self.config)?;
                self.data.points.iter_mut()
                    .zip(self.state.assignments.iter().cloned())
                    .for_each(|(p, a)| p.set_cluster(Some(a)));
                Partition::from_assignments(&self.state.assignments, self.state.k)
            }
        };
        Ok(self.partition.insert(partition))
    }

    /// Clusters of the converged partition: one entry per non-empty centroid slot, holding the centroid
    /// and its members. Every point is member of exactly one cluster.
    ///
    /// ## Returns
    /// `None` if clustering failed (see [`KMeansPP::cluster`] for the reasons)
    pub fn get_clusters(&mut self) -> Option<Vec<Cluster<'_, P>>> {
        if let Err(e) = self.cluster() {
            tracing::warn!(error = %e, "clustering produced no result");
            return None;
        }
        let partition = self.partition.as_ref()?;
        let (points, centroids) = (&self.data.points, &self.centroids);
        Some(partition.clusters()
            .map(|(slot, members)| Cluster {
                slot,
                centroid: &centroids[slot],
                members: members.iter().map(|&idx| &points[idx]).collect()
            })
            .collect())
    }

    /// Silhouette coefficient of every point, in input order. Triggers clustering if necessary.
    pub fn silhouette_coefficients(&mut self) -> Result<Vec<T>> {
        self.cluster()?;
        let partition = self.partition.as_ref().ok_or(Error::NonConvergence { iterations: self.state.iterations })?;
        Ok(crate::silhouette::coefficients(&self.data, partition, &self.state.assignments))
    }

    /// Silhouette coefficient of every point, in input order.
    ///
    /// ## Returns
    /// `None` if clustering failed
    pub fn get_silhouette_coeffs(&mut self) -> Option<Vec<T>> {
        self.silhouette_coefficients()
            .map_err(|e| tracing::warn!(error = %e, "silhouette analysis produced no result"))
            .ok()
    }

    /// Aggregate silhouette analysis.
    ///
    /// ## Returns
    /// `(true, mean)`, where **mean** is the arithmetic mean of all silhouette coefficients,
    /// or `(false, -1)` if clustering failed.
    pub fn perform_silhouette_analysis(&mut self) -> (bool, T) {
        match self.get_silhouette_coeffs() {
            Some(coeffs) => (true, crate::silhouette::mean(&coeffs)),
            None => (false, -T::one())
        }
    }

    /// The current run state.
    pub fn state(&self) -> &KMeansState<T> { &self.state }

    /// The current centroids, indexed by slot.
    pub fn centroids(&self) -> &[P] { &self.centroids }

    /// The clustered points, in input order. Their [`Clusterable::cluster`] is set once a partition was computed.
    pub fn points(&self) -> &[P] { &self.data.points }

    /// Per-dimension value ranges of the input points.
    pub fn dimension_intervals(&self) -> &[DimensionInterval<T>] { &self.data.intervals }

    /// Dimension shared by all points.
    pub fn dimension(&self) -> usize { self.data.dims }

    /// Give up the clusterizer, returning its points.
    pub fn into_points(self) -> Vec<P> { self.data.points }
}
