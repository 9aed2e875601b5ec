use num::{Float, NumCast, Zero};
use rand::distributions::uniform::SampleUniform;
use std::{
    fmt::{Debug, Display, LowerExp},
    iter::Sum,
    ops::{Add, AddAssign, Sub, SubAssign},
};

pub trait Primitive: Add + AddAssign + Sum + Sub + SubAssign + Zero + Float + NumCast + SampleUniform
                + PartialOrd + Copy + Default + Display + Debug + Sync + Send + LowerExp + 'static
                + for<'a> AddAssign<&'a Self> + for<'a> Sub<&'a Self> {
    /// Amount of values of this type, that are processed side by side within one distance reduction.
    /// Fills one of the widest vector registers the crate is compiled for.
    const LANES: usize;
}
impl Primitive for f32 { const LANES: usize = REGISTER_BYTES / std::mem::size_of::<f32>(); }
impl Primitive for f64 { const LANES: usize = REGISTER_BYTES / std::mem::size_of::<f64>(); }

#[cfg(target_feature = "avx512f")]
const REGISTER_BYTES: usize = 64;
#[cfg(all(target_feature = "avx", not(target_feature = "avx512f")))]
const REGISTER_BYTES: usize = 32;
#[cfg(not(any(target_feature = "avx", target_feature = "avx512f")))]
const REGISTER_BYTES: usize = 16;

/// Upper bound of [`Primitive::LANES`] over all primitives.
pub(crate) const MAX_LANES: usize = 16;

/// Convert a count into the primitive type.
#[inline(always)]
pub(crate) fn from_count<T: Primitive>(cnt: usize) -> T {
    // every float type can represent (possibly rounded) any usize
    T::from(cnt).unwrap_or_else(T::infinity)
}

/// Amount of values each worker sums up in [`partitioned_sum`].
const SUM_PARTITION: usize = 1024;

/// Race-free parallel sum. Values are split into fixed-size partitions, summed up by the workers
/// and the partial sums are combined sequentially, so the result does not depend on scheduling.
pub(crate) fn partitioned_sum<T: Primitive>(values: &[T]) -> T {
    use rayon::prelude::*;
    let partials: Vec<T> = values.par_chunks(SUM_PARTITION)
        .map(|chunk| chunk.iter().cloned().sum::<T>())
        .collect();
    partials.into_iter().sum()
}
