use alloc::{string::String, vec::Vec};

/// A single observed price of an instrument
///
/// The timestamp type is opaque to the statistics: samples are consumed
/// positionally, in the order the data source delivered them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct PriceSample<T, Ts> {
    /// Observed price
    pub price: T,
    /// When the price was observed
    pub observed_at: Ts,
}

impl<T, Ts> PriceSample<T, Ts> {
    /// Creates a new price sample
    pub const fn new(price: T, observed_at: Ts) -> Self {
        Self { price, observed_at }
    }
}

/// An entry of a data source's instrument listing
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Listing {
    /// Instrument identifier, usually a ticker
    pub id: String,
    /// Display name, usually the company name
    pub name: String,
}

impl Listing {
    /// Creates a new listing entry
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// An instrument together with its price series, ordered by observation time
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Instrument<T, Ts> {
    /// Instrument identifier, usually a ticker
    pub id: String,
    /// Display name, if the data source provides one
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    /// Price samples, oldest first. May be empty.
    pub series: Vec<PriceSample<T, Ts>>,
}

impl<T: Copy, Ts> Instrument<T, Ts> {
    /// Creates a new instrument
    ///
    /// # Arguments
    ///
    /// * `id` - The instrument identifier
    /// * `series` - The ordered price samples
    ///
    /// # Returns
    ///
    /// * `Self` - The instrument
    pub fn new(id: impl Into<String>, series: Vec<PriceSample<T, Ts>>) -> Self {
        Self {
            id: id.into(),
            name: None,
            series,
        }
    }

    /// Sets the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Creates an instrument without a price history
    ///
    /// Used in place of an instrument whose series could not be retrieved.
    pub fn empty(id: impl Into<String>) -> Self {
        Self::new(id, Vec::new())
    }

    /// Returns the plain prices of the series, timestamps dropped, order kept
    ///
    /// # Examples
    ///
    /// ```
    /// use price_correlation::{Instrument, PriceSample};
    ///
    /// let nvda = Instrument::new(
    ///     "NVDA",
    ///     vec![PriceSample::new(101.5, 1), PriceSample::new(99.0, 2)],
    /// );
    /// assert_eq!(nvda.prices(), vec![101.5, 99.0]);
    /// ```
    pub fn prices(&self) -> Vec<T> {
        self.series.iter().map(|sample| sample.price).collect()
    }

    /// Returns the number of price samples
    pub fn len(&self) -> usize {
        self.series.len()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn prices_preserve_series_order() {
        let instrument = Instrument::new(
            "AMD",
            vec![
                PriceSample::new(3.0, "10:02"),
                PriceSample::new(1.0, "10:00"),
                PriceSample::new(2.0, "10:01"),
            ],
        );
        assert_eq!(instrument.prices(), vec![3.0, 1.0, 2.0]);
        assert_eq!(instrument.len(), 3);
        assert_eq!(instrument.id, "AMD");
        assert_eq!(instrument.name, None);
    }

    #[test]
    fn instrument_carries_listing_name() {
        let listing = Listing::new("AMD", "Advanced Micro Devices, Inc.");
        let instrument: Instrument<f64, u64> =
            Instrument::empty(listing.id.as_str()).with_name(listing.name.as_str());
        assert_eq!(instrument.id, "AMD");
        assert_eq!(instrument.name.as_deref(), Some("Advanced Micro Devices, Inc."));
    }

    #[test]
    fn empty_instrument_has_no_prices() {
        let instrument: Instrument<f64, u64> = Instrument::empty("PYPL");
        assert!(instrument.prices().is_empty());
        assert_eq!(instrument.len(), 0);
    }
}
