use num_traits::Float;

use alloc::string::String;

use crate::{Kbn, helper};

/// Summary statistics of a single instrument's price series
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct InstrumentStats<T> {
    /// Instrument identifier
    pub id: String,
    /// Display name of the instrument, if known
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    /// Arithmetic mean of the prices, zero for an empty series
    pub average: T,
    /// Sample standard deviation of the prices, zero below two samples
    pub std_dev: T,
    /// Number of prices the statistics were computed over
    pub samples: usize,
}

impl<T: Float + Default> InstrumentStats<T> {
    /// Computes the statistics of a price series
    ///
    /// # Arguments
    ///
    /// * `id` - The instrument identifier
    /// * `prices` - The prices of the instrument
    ///
    /// # Returns
    ///
    /// * `Self` - The instrument statistics
    pub fn from_prices(id: impl Into<String>, prices: &[T]) -> Self {
        Self {
            id: id.into(),
            name: None,
            average: average(prices),
            std_dev: standard_deviation(prices),
            samples: prices.len(),
        }
    }

    /// Sets the display name
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }
}

/// Returns the arithmetic mean of the prices
///
/// # Arguments
///
/// * `prices` - The prices
///
/// # Returns
///
/// * `Option<T>` - The mean, or `None` if there are no prices
///
/// # Examples
///
/// ```
/// use price_correlation::mean;
///
/// assert_eq!(mean(&[10.0, 20.0, 30.0, 40.0, 50.0]), Some(30.0));
/// assert_eq!(mean::<f64>(&[]), None);
/// ```
pub fn mean<T: Float + Default>(prices: &[T]) -> Option<T> {
    if prices.is_empty() {
        return None;
    }
    Some(helper::sum(prices) / helper::count(prices.len()))
}

/// Returns the arithmetic mean of the prices, `0` for an empty slice
pub fn average<T: Float + Default>(prices: &[T]) -> T {
    mean(prices).unwrap_or_else(T::zero)
}

/// Returns the sample standard deviation of the prices
///
/// Squared deviations from the mean are summed and divided by `n - 1`
/// (Bessel's correction).
///
/// # Arguments
///
/// * `prices` - The prices
///
/// # Returns
///
/// * `Option<T>` - The standard deviation, or `None` with fewer than two prices
///
/// # Examples
///
/// ```
/// use price_correlation::stddev;
/// use assert_approx_eq::assert_approx_eq;
///
/// let sd = stddev(&[10.0, 20.0, 30.0, 40.0, 50.0]).unwrap();
/// assert_approx_eq!(sd, 250.0_f64.sqrt());
/// assert_eq!(stddev(&[42.0]), None);
/// ```
pub fn stddev<T: Float + Default>(prices: &[T]) -> Option<T> {
    if prices.len() < 2 {
        return None;
    }
    let mean = mean(prices)?;
    let mut sum_sq = Kbn::<T>::default();
    prices.iter().for_each(|price| {
        let diff = *price - mean;
        sum_sq += diff * diff;
    });
    let n = helper::count::<T>(prices.len());
    Some((sum_sq.total() / (n - T::one())).sqrt())
}

/// Returns the sample standard deviation of the prices, `0` with fewer than two prices
pub fn standard_deviation<T: Float + Default>(prices: &[T]) -> T {
    stddev(prices).unwrap_or_else(T::zero)
}
