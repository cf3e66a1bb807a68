use num_traits::Float;

use crate::{Kbn, align, mean};

/// Returns the Pearson correlation coefficient of two price series
///
/// Both series are first aligned to their common leading length. The
/// deviations from each series' mean are then accumulated in a single pass:
///
/// `r = Σ(a - mean_a)(b - mean_b) / sqrt(Σ(a - mean_a)² · Σ(b - mean_b)²)`
///
/// The result is not clamped, so rounding may leave it a hair outside
/// `[-1, 1]` for near-deterministic inputs. Deviations are normalised by
/// their largest magnitude before squaring, so very large prices don't
/// overflow to an undefined result.
///
/// # Arguments
///
/// * `a` - The first price series
/// * `b` - The second price series
///
/// # Returns
///
/// * `Option<T>` - The correlation coefficient, or `None` if fewer than two
///   aligned prices remain or either aligned series has zero variance
///
/// # Examples
///
/// ```
/// use price_correlation::pearson;
/// use assert_approx_eq::assert_approx_eq;
///
/// let x: [f64; 5] = [10.0, 20.0, 30.0, 40.0, 50.0];
/// let y: [f64; 5] = [50.0, 40.0, 30.0, 20.0, 10.0];
/// assert_approx_eq!(pearson(&x, &y).unwrap(), -1.0);
///
/// assert_eq!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), None);
/// assert_eq!(pearson(&[1.0], &[1.0, 2.0, 3.0]), None);
/// ```
pub fn pearson<T: Float + Default>(a: &[T], b: &[T]) -> Option<T> {
    let (a, b) = align(a, b);
    if a.len() < 2 {
        return None;
    }

    let mean_a = mean(a)?;
    let mean_b = mean(b)?;

    // Deviations are scaled by their largest magnitude so squares can't overflow.
    let scale_a = max_deviation(a, mean_a);
    let scale_b = max_deviation(b, mean_b);
    if scale_a.is_zero() || scale_b.is_zero() {
        return None;
    }

    let mut sum_prod = Kbn::<T>::default();
    let mut sum_sq_a = Kbn::<T>::default();
    let mut sum_sq_b = Kbn::<T>::default();
    a.iter().zip(b).for_each(|(x, y)| {
        let dx = (*x - mean_a) / scale_a;
        let dy = (*y - mean_b) / scale_b;
        sum_prod += dx * dy;
        sum_sq_a += dx * dx;
        sum_sq_b += dy * dy;
    });

    let denominator = sum_sq_a.total().sqrt() * sum_sq_b.total().sqrt();
    if denominator.is_zero() {
        None
    } else {
        Some(sum_prod.total() / denominator)
    }
}

fn max_deviation<T: Float>(values: &[T], mean: T) -> T {
    values
        .iter()
        .fold(T::zero(), |acc, v| acc.max((*v - mean).abs()))
}

/// Returns the Pearson correlation coefficient of two price series, `0` when undefined
///
/// Insufficient data (fewer than two aligned prices) and zero variance both
/// resolve to `0`, which keeps matrix construction total. Use [`pearson`] to
/// tell those cases apart from a genuinely uncorrelated pair.
///
/// # Examples
///
/// ```
/// use price_correlation::correlation;
///
/// assert_eq!(correlation(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), 0.0);
/// assert_eq!(correlation::<f64>(&[], &[]), 0.0);
/// ```
pub fn correlation<T: Float + Default>(a: &[T], b: &[T]) -> T {
    pearson(a, b).unwrap_or_else(T::zero)
}
