use num_traits::Float;

use crate::Kbn;

/// Converts a sample count into the float type of the statistics
///
/// Counts of primitive floats are always representable, `NaN` is only
/// produced for exotic `Float` types that can't hold the value.
#[inline]
pub fn count<T: Float>(len: usize) -> T {
    T::from(len).unwrap_or_else(T::nan)
}

/// Returns the compensated sum of a slice
///
/// # Arguments
///
/// * `values` - The values to sum
///
/// # Returns
///
/// * `T` - The Kahan-Babuska-Neumaier sum of the values
#[inline]
pub fn sum<T: Float + Default>(values: &[T]) -> T {
    let mut sum = Kbn::<T>::default();
    values.iter().for_each(|v| sum += *v);
    sum.total()
}
