use crate::{memory::*, point::Vector};
use rayon::prelude::*;

/// Closed value range `[min, max]` of one dimension over all points of a dataset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DimensionInterval<T: Primitive> {
    pub min: T,
    pub max: T
}
impl<T: Primitive> DimensionInterval<T> {
    fn unbounded() -> Self {
        Self { min: T::infinity(), max: T::neg_infinity() }
    }
    fn include(&mut self, value: T) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }
    fn merge(self, other: Self) -> Self {
        Self { min: self.min.min(other.min), max: self.max.max(other.max) }
    }
    /// Width of the interval (`max - min`).
    pub fn extent(&self) -> T {
        self.max - self.min
    }
}

/// Calculate the per-dimension bounding box of **points**.
///
/// Every rayon worker folds its share of points into a private set of intervals, the partial
/// sets are merged pairwise afterwards. All points are expected to have **dims** dimensions.
pub(crate) fn calculate<T, P>(points: &[P], dims: usize) -> Vec<DimensionInterval<T>>
where
    T: Primitive,
    P: Vector<T>,
{
    points.par_iter()
        .fold(|| vec![DimensionInterval::unbounded(); dims], |mut intervals, p| {
            intervals.iter_mut()
                .zip(p.coordinates().iter().cloned())
                .for_each(|(interval, v)| interval.include(v));
            intervals
        })
        .reduce(|| vec![DimensionInterval::unbounded(); dims], |a, b| {
            a.into_iter().zip(b).map(|(a, b)| a.merge(b)).collect()
        })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing::*;
    use rand::prelude::*;

    #[test]
    fn bounding_box() {
        let p = points(&[&[1.0, -2.0, 5.0], &[0.5, 3.0, 5.0], &[2.0, 0.0, 5.0]]);
        let intervals = calculate(&p, 3);
        assert_eq!(intervals, vec![
            DimensionInterval { min: 0.5, max: 2.0 },
            DimensionInterval { min: -2.0, max: 3.0 },
            DimensionInterval { min: 5.0, max: 5.0 },
        ]);
        assert_eq!(intervals[1].extent(), 5.0);
        assert_eq!(intervals[2].extent(), 0.0);
    }

    #[test]
    fn matches_sequential_scan() {
        let mut rnd = StdRng::seed_from_u64(42);
        let dims = 13;
        let p: Vec<_> = (0..5000)
            .map(|_| crate::ClusterableVector::new((0..dims).map(|_| rnd.gen_range(-1e3..1e3)).collect::<Vec<f64>>()))
            .collect();
        let intervals = calculate(&p, dims);
        for d in 0..dims {
            let min = p.iter().map(|v| v.coordinates()[d]).fold(f64::INFINITY, f64::min);
            let max = p.iter().map(|v| v.coordinates()[d]).fold(f64::NEG_INFINITY, f64::max);
            assert_eq!(intervals[d], DimensionInterval { min, max });
        }
    }
}
