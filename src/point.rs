use crate::{memory::*, Error, Result};

/// Capability set the clusterizer requires from a point type.
///
/// The clusterizer never default-constructs points. Whenever it has to fabricate a new
/// centroid (the synthetic first centroid, or a recomputed mean), it goes through
/// [`Vector::from_coordinates`].
pub trait Vector<T: Primitive>: Send + Sync {
    /// Create a new point from the given coordinates.
    fn from_coordinates(coordinates: Vec<T>) -> Self where Self: Sized;

    /// Create a point without any coordinates (dimension 0).
    fn empty() -> Self where Self: Sized {
        Self::from_coordinates(Vec::new())
    }

    /// All coordinates of this point, in dimension order.
    fn coordinates(&self) -> &[T];

    /// Overwrite all coordinates at once. The dimension becomes the length of **coordinates**.
    fn replace_coordinates(&mut self, coordinates: Vec<T>);

    fn dimension(&self) -> usize {
        self.coordinates().len()
    }

    /// Coordinate **index** of this point.
    /// ## Errors
    /// [`Error::IndexOutOfRange`] if `index >= dimension()`
    fn coordinate(&self, index: usize) -> Result<T> {
        self.coordinates().get(index).copied()
            .ok_or(Error::IndexOutOfRange { index, dimension: self.dimension() })
    }
}

/// Points that remember the cluster they were assigned to.
///
/// The assignment is the slot index of the centroid within the clusterizer's centroid array.
/// It is `None` until a partition was computed.
pub trait Clusterable {
    fn cluster(&self) -> Option<usize>;
    fn set_cluster(&mut self, cluster: Option<usize>);
}

/// Default point implementation: a plain coordinate vector plus its cluster assignment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClusterableVector<T: Primitive> {
    coordinates: Vec<T>,
    cluster: Option<usize>
}
impl<T: Primitive> ClusterableVector<T> {
    pub fn new(coordinates: Vec<T>) -> Self {
        Self { coordinates, cluster: None }
    }
}
impl<T: Primitive> Vector<T> for ClusterableVector<T> {
    fn from_coordinates(coordinates: Vec<T>) -> Self { Self::new(coordinates) }
    fn coordinates(&self) -> &[T] { &self.coordinates }
    fn replace_coordinates(&mut self, coordinates: Vec<T>) { self.coordinates = coordinates; }
}
impl<T: Primitive> Clusterable for ClusterableVector<T> {
    fn cluster(&self) -> Option<usize> { self.cluster }
    fn set_cluster(&mut self, cluster: Option<usize>) { self.cluster = cluster; }
}
impl<T: Primitive> From<Vec<T>> for ClusterableVector<T> {
    fn from(coordinates: Vec<T>) -> Self { Self::new(coordinates) }
}
impl<T: Primitive> FromIterator<T> for ClusterableVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
