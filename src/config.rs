use alloc::string::{String, ToString};

use core::{fmt, str::FromStr};

use crate::ConfigError;

/// How much price history the data source is asked for, in whole minutes
///
/// The lookback is a pass-through parameter: it shapes what a
/// [`PriceSource`](crate::PriceSource) returns and is never read by the
/// statistics themselves. It is always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u32", into = "u32")
)]
pub struct Lookback {
    minutes: u32,
}

impl Lookback {
    /// The lookback used when none is configured
    pub const DEFAULT: Self = Self { minutes: 60 };

    /// The commonly offered lookbacks
    pub const PRESETS: [Self; 5] = [
        Self { minutes: 15 },
        Self { minutes: 30 },
        Self { minutes: 60 },
        Self { minutes: 120 },
        Self { minutes: 240 },
    ];

    /// Creates a lookback spanning the given number of minutes
    ///
    /// # Arguments
    ///
    /// * `minutes` - The number of minutes, must be greater than zero
    ///
    /// # Returns
    ///
    /// * `Result<Self, ConfigError>` - The lookback, or `ConfigError::InvalidLookback` for zero
    ///
    /// # Examples
    ///
    /// ```
    /// use price_correlation::Lookback;
    ///
    /// assert_eq!(Lookback::from_minutes(90).map(|l| l.minutes()), Ok(90));
    /// assert!(Lookback::from_minutes(0).is_err());
    /// ```
    pub fn from_minutes(minutes: u32) -> Result<Self, ConfigError> {
        if minutes == 0 {
            return Err(ConfigError::InvalidLookback(minutes.to_string()));
        }
        Ok(Self { minutes })
    }

    /// Returns the number of minutes covered by the lookback
    #[inline]
    pub const fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Returns `true` if the lookback is one of [`Lookback::PRESETS`]
    pub fn is_preset(&self) -> bool {
        Self::PRESETS.contains(self)
    }
}

impl Default for Lookback {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.minutes)
    }
}

/// Parses a custom lookback typed in as a number of minutes
///
/// Surrounding whitespace is ignored; anything else that is not a positive
/// integer is rejected.
///
/// # Examples
///
/// ```
/// use price_correlation::Lookback;
///
/// let lookback: Lookback = " 45 ".parse().unwrap();
/// assert_eq!(lookback.minutes(), 45);
/// assert!("-5".parse::<Lookback>().is_err());
/// assert!("15m".parse::<Lookback>().is_err());
/// ```
impl FromStr for Lookback {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<u32>()
            .ok()
            .filter(|minutes| *minutes > 0)
            .map(|minutes| Self { minutes })
            .ok_or_else(|| ConfigError::InvalidLookback(String::from(trimmed)))
    }
}

impl TryFrom<u32> for Lookback {
    type Error = ConfigError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Self::from_minutes(minutes)
    }
}

impl From<Lookback> for u32 {
    fn from(lookback: Lookback) -> Self {
        lookback.minutes
    }
}

/// Caller-side settings for a correlation analysis
///
/// Neither field affects how statistics are computed: `lookback` is handed to
/// the data source and `max_instruments` bounds how many listed instruments
/// are fetched at all. [`build`](crate::build) is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct AnalysisConfig {
    /// History requested per instrument
    pub lookback: Lookback,
    /// Upper bound on analysed instruments, `None` for all of them
    pub max_instruments: Option<usize>,
}

impl AnalysisConfig {
    /// Number of instruments analysed by default
    pub const DEFAULT_MAX_INSTRUMENTS: usize = 10;

    /// Sets the lookback
    pub fn with_lookback(mut self, lookback: Lookback) -> Self {
        self.lookback = lookback;
        self
    }

    /// Sets the instrument bound, `None` lifts it
    pub fn with_max_instruments(mut self, max_instruments: Option<usize>) -> Self {
        self.max_instruments = max_instruments;
        self
    }

    /// Returns the leading instruments of a listing that fall within the bound
    ///
    /// # Arguments
    ///
    /// * `listing` - The instrument listing, in the order it should be analysed
    ///
    /// # Returns
    ///
    /// * `&[L]` - At most `max_instruments` leading entries
    ///
    /// # Examples
    ///
    /// ```
    /// use price_correlation::AnalysisConfig;
    ///
    /// let ids: Vec<String> = ["AAPL", "MSFT", "NVDA"].map(String::from).to_vec();
    /// let config = AnalysisConfig::default().with_max_instruments(Some(2));
    /// assert_eq!(config.select(&ids), &ids[..2]);
    /// ```
    pub fn select<'a, L>(&self, listing: &'a [L]) -> &'a [L] {
        match self.max_instruments {
            Some(max) => &listing[..listing.len().min(max)],
            None => listing,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            lookback: Lookback::DEFAULT,
            max_instruments: Some(Self::DEFAULT_MAX_INSTRUMENTS),
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn lookback_serializes_as_minutes() {
        let json = serde_json::to_string(&Lookback::PRESETS[1]).unwrap();
        assert_eq!(json, "30");
        assert!(serde_json::from_str::<Lookback>("0").is_err());
    }

    #[test]
    fn config_fills_missing_fields() {
        let config: AnalysisConfig = serde_json::from_str(r#"{"lookback":120}"#).unwrap();
        assert_eq!(config.lookback.minutes(), 120);
        assert_eq!(config.max_instruments, Some(10));

        let config: AnalysisConfig = serde_json::from_str(r#"{"maxInstruments":null}"#).unwrap();
        assert_eq!(config.max_instruments, None);
    }
}
