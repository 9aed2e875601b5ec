use crate::memory::*;

/// Criteria deciding when Lloyd's algorithm has converged.
/// They are evaluated on the residual of each iteration, which is the sum of the distances every
/// centroid moved during that iteration's update step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Convergence<T: Primitive> {
	/// Converged once no centroid moved at all (`residual == 0`).
	///
	/// Centroid means are computed deterministically, so a stable partition reproduces its
	/// centroids bit for bit. On continuous data where points keep flipping between two nearly
	/// equidistant centroids this may never trigger; the iteration cap bounds the run then.
	ExactZero,
	/// Converged once the centroids moved at most **threshold** in total (`residual <= threshold`).
	/// ## Fields:
	/// - **threshold**: Largest residual still considered converged
	Epsilon { threshold: T }
}
impl<T: Primitive> Convergence<T> {
	/// Returns **true** if an iteration with the given **residual** completes the run.
	pub(crate) fn is_reached(&self, residual: T) -> bool {
		match *self {
			Convergence::ExactZero => residual == T::zero(),
			Convergence::Epsilon { threshold } => residual <= threshold
		}
	}
}

/// Handling of centroids that end up without members in an update step.
/// The mean of zero points is undefined, so such a slot can not be recomputed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyClusterPolicy {
	/// Keep the previous centroid for the slot. It does not contribute to the residual. The event is
	/// logged and recorded in [`KMeansState::empty_clusters`](crate::KMeansState::empty_clusters).
	RetainCentroid,
	/// Abort the clustering attempt with [`Error::EmptyCluster`](crate::Error::EmptyCluster).
	Fail
}
