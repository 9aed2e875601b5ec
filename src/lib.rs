//! # kmeanspp - API documentation
//!
//! kmeanspp is a small rust library for k-means clustering with k-means++ seeding, Lloyd iterations
//! and silhouette analysis of the resulting partition.
//!
//! ## Design target
//! The library works on an abstract point type ([`Vector`] + [`Clusterable`]) and an exchangeable
//! distance metric ([`DistanceFunction`]), so it can be used directly on the application's own
//! data structures. All data-parallel loops (per point, per centroid) are executed on the rayon
//! thread-pool, the built-in metrics reduce their coordinates in chunks of [`Primitive::LANES`] values to
//! allow for vectorization.
//!
//! ## Algorithm
//! 1. **Bounds**: The per-dimension value ranges of all points are calculated
//! 2. **Seeding** (k-means++): The first centroid is drawn uniformly from the bounding box (or is the mean
//!    of all points for a single centroid). Every following centroid is an input point, drawn with a
//!    probability proportional to its distance to the currently nearest centroid.
//! 3. **Lloyd**: Points are assigned to their nearest centroid, then every centroid is moved to the mean of
//!    its members, until no centroid moves anymore ([`Convergence`]) or the iteration cap is reached.
//! 4. **Silhouette analysis**: Every point is scored by how much better it fits its own cluster than the
//!    nearest other cluster.
//!
//! Steps 1 and 2 run eagerly within [`KMeansPP::new`], steps 3 and 4 run on demand.
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Supported metrics
//! - [`EuclideanDistance`]
//! - [`ManhattanDistance`]
//! - [`ChebyshevDistance`]
//! - any function / closure, wrapped into [`DistanceFn`]
//!
//! ## Example
//! ```rust
//! use kmeanspp::*;
//! use rand::prelude::*;
//!
//! let mut rnd = StdRng::seed_from_u64(1337);
//! let points: Vec<ClusterableVector<f64>> = (0..300)
//!     .map(|i| {
//!         let center = (i % 3) as f64 * 10.0;
//!         ClusterableVector::new(vec![center + rnd.gen_range(-1.0..1.0), center + rnd.gen_range(-1.0..1.0)])
//!     })
//!     .collect();
//!
//! let conf = KMeansConfig::build()
//!     .random_generator(StdRng::seed_from_u64(42))
//!     .max_iterations(500)
//!     .build();
//! let mut kmean = KMeansPP::with_config(3, points, EuclideanDistance, conf).unwrap();
//!
//! for cluster in kmean.get_clusters().expect("did not converge") {
//!     println!("Centroid {:?}: {} members", cluster.centroid.coordinates(), cluster.members.len());
//! }
//! let (converged, mean_silhouette) = kmean.perform_silhouette_analysis();
//! println!("Converged: {} - Mean silhouette: {:.3}", converged, mean_silhouette);
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeansPP`] struct. It takes over the points into its ownership, and keeps
//! the centroids as well as the run's bookkeeping ([`KMeansState`]). Options like the random number generator,
//! the convergence criterion or status callbacks are passed through a [`KMeansConfig`].
//!
//! Operations that can fail because clustering did not converge come in two flavours: a `Result` returning one
//! ([`KMeansPP::cluster`], [`KMeansPP::silhouette_coefficients`]) and an `Option` returning one
//! ([`KMeansPP::get_clusters`], [`KMeansPP::get_silhouette_coeffs`]).

#[macro_use] mod helpers;
mod memory;
mod error;
mod point;
mod bounds;
mod distances;
mod convergence;
mod api;
mod inits;
mod variants;
mod silhouette;

pub use api::{Cluster, EmptyClusterEvent, KMeansConfig, KMeansConfigBuilder, KMeansPP, KMeansState, Partition, DEFAULT_MAX_ITERATIONS};
pub use bounds::DimensionInterval;
pub use convergence::{Convergence, EmptyClusterPolicy};
pub use distances::{ChebyshevDistance, DistanceFn, DistanceFunction, EuclideanDistance, ManhattanDistance};
pub use error::{Error, Result};
pub use memory::Primitive;
pub use point::{Clusterable, ClusterableVector, Vector};
