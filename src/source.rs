use num_traits::Float;

use alloc::vec::Vec;

use core::fmt::Display;

use crate::{AnalysisConfig, CorrelationReport, Instrument, Listing, Lookback, PriceSample, build};

/// A provider of instrument listings and price histories
///
/// Implementations wrap whatever transport delivers the data. Retrieval is
/// resolved before any statistics are computed; the statistics never see a
/// failed fetch.
pub trait PriceSource<T> {
    /// Timestamp attached to each price sample
    type Timestamp;
    /// Retrieval failure
    type Error: Display;

    /// Returns the available instruments with their display names, in listing order
    fn listing(&self) -> Result<Vec<Listing>, Self::Error>;

    /// Returns the price history of an instrument over the lookback, oldest first
    ///
    /// # Arguments
    ///
    /// * `id` - The instrument id
    /// * `lookback` - How much history to return
    fn series(
        &self,
        id: &str,
        lookback: Lookback,
    ) -> Result<Vec<PriceSample<T, Self::Timestamp>>, Self::Error>;
}

/// Retrieves the instruments to analyse from a price source
///
/// The listing is bounded by `config.max_instruments` and every remaining
/// instrument's series is fetched over `config.lookback`. A failed series
/// fetch does not abort the collection: the instrument is kept with an empty
/// series, which degrades its statistics and correlations to `0`.
///
/// # Arguments
///
/// * `source` - The price source
/// * `config` - The analysis settings
///
/// # Returns
///
/// * `Result<Vec<Instrument<T, S::Timestamp>>, S::Error>` - The instruments in listing order,
///   or the error of a failed listing
pub fn collect<T, S>(
    source: &S,
    config: &AnalysisConfig,
) -> Result<Vec<Instrument<T, S::Timestamp>>, S::Error>
where
    T: Copy,
    S: PriceSource<T> + ?Sized,
{
    let listing = source.listing()?;
    let selected = config.select(&listing);
    log::debug!(
        "collecting {} of {} listed instruments over {}",
        selected.len(),
        listing.len(),
        config.lookback
    );

    let instruments = selected
        .iter()
        .map(|Listing { id, name }| {
            let instrument = match source.series(id, config.lookback) {
                Ok(series) => Instrument::new(id.as_str(), series),
                Err(err) => {
                    log::warn!("{id}: price series unavailable, analysing it as empty: {err}");
                    Instrument::empty(id.as_str())
                }
            };
            instrument.with_name(name.as_str())
        })
        .collect();

    Ok(instruments)
}

/// Retrieves instruments from a price source and builds their correlation report
///
/// # Examples
///
/// ```
/// use price_correlation::{AnalysisConfig, Listing, Lookback, PriceSample, PriceSource, analyze};
/// use assert_approx_eq::assert_approx_eq;
///
/// struct Fixed;
///
/// impl PriceSource<f64> for Fixed {
///     type Timestamp = u32;
///     type Error = String;
///
///     fn listing(&self) -> Result<Vec<Listing>, String> {
///         Ok(vec![Listing::new("UP", "Up Corp."), Listing::new("DOWN", "Down Corp.")])
///     }
///
///     fn series(&self, id: &str, lookback: Lookback) -> Result<Vec<PriceSample<f64, u32>>, String> {
///         let step = if id == "UP" { 1.0 } else { -1.0 };
///         Ok((0..lookback.minutes()).map(|t| PriceSample::new(step * t as f64, t)).collect())
///     }
/// }
///
/// let report = analyze::<f64, _>(&Fixed, &AnalysisConfig::default()).unwrap();
/// assert_eq!(report.stats()[0].samples, 60);
/// assert_eq!(report.stats()[1].name.as_deref(), Some("Down Corp."));
/// assert_approx_eq!(report.correlation_between("UP", "DOWN").unwrap(), -1.0);
/// ```
pub fn analyze<T, S>(source: &S, config: &AnalysisConfig) -> Result<CorrelationReport<T>, S::Error>
where
    T: Float + Default,
    S: PriceSource<T> + ?Sized,
{
    collect(source, config).map(|instruments| build(&instruments))
}
