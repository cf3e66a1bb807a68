use ahash::RandomState;
use hashbrown::HashMap;
use num_traits::Float;

use alloc::{string::String, vec::Vec};

use crate::{CorrelationMatrix, Instrument, InstrumentStats, pearson};

/// Per-instrument statistics and the correlation matrix of a set of instruments
///
/// `stats[i]` and row/column `i` of `matrix` describe the same instrument: the
/// one at position `i` of the input handed to [`build`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CorrelationReport<T> {
    /// Statistics in input order
    stats: Vec<InstrumentStats<T>>,
    /// Pairwise correlations in input order
    matrix: CorrelationMatrix<T>,
    /// First position of every instrument id
    #[cfg_attr(feature = "serde", serde(skip))]
    index: HashMap<String, usize, RandomState>,
}

impl<T> CorrelationReport<T> {
    /// Returns the statistics, in input order
    pub fn stats(&self) -> &[InstrumentStats<T>] {
        &self.stats
    }

    /// Returns the correlation matrix, in input order
    pub fn matrix(&self) -> &CorrelationMatrix<T> {
        &self.matrix
    }

    /// Returns the instrument ids, in input order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.stats.iter().map(|stats| stats.id.as_str())
    }

    /// Returns the number of instruments
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// Returns `true` if the report covers no instruments
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Returns the position of an instrument, the first one if the id is repeated
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Returns the statistics of an instrument
    pub fn stats_for(&self, id: &str) -> Option<&InstrumentStats<T>> {
        self.position(id).map(|i| &self.stats[i])
    }

    /// Splits the report into its statistics and matrix
    pub fn into_parts(self) -> (Vec<InstrumentStats<T>>, CorrelationMatrix<T>) {
        (self.stats, self.matrix)
    }
}

impl<T: Copy> CorrelationReport<T> {
    /// Returns the correlation between two instruments
    ///
    /// # Arguments
    ///
    /// * `a` - The row instrument id
    /// * `b` - The column instrument id
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The coefficient, or `None` if either id is unknown
    pub fn correlation_between(&self, a: &str, b: &str) -> Option<T> {
        self.matrix.get(self.position(a)?, self.position(b)?)
    }
}

/// Computes per-instrument statistics and the pairwise correlation matrix
///
/// Each instrument's series is reduced to its plain prices once. Statistics
/// are computed per instrument in input order. Every off-diagonal cell
/// `(i, j)` is the Pearson correlation of series `i` and `j` over their common
/// leading length, computed independently of `(j, i)`; the diagonal is fixed
/// to `1`. Empty, single-sample and constant series never fail, their
/// statistics and correlations resolve to `0`.
///
/// # Arguments
///
/// * `instruments` - The instruments in the order the outputs should follow
///
/// # Returns
///
/// * `CorrelationReport<T>` - The statistics and matrix, positionally aligned with the input
///
/// # Examples
///
/// ```
/// use price_correlation::{Instrument, PriceSample, build};
/// use assert_approx_eq::assert_approx_eq;
///
/// let series = |prices: &[f64]| {
///     prices
///         .iter()
///         .enumerate()
///         .map(|(t, p)| PriceSample::new(*p, t))
///         .collect::<Vec<_>>()
/// };
/// let instruments = vec![
///     Instrument::new("X", series(&[10.0, 20.0, 30.0, 40.0, 50.0])),
///     Instrument::new("Y", series(&[50.0, 40.0, 30.0, 20.0, 10.0])),
/// ];
///
/// let report = build(&instruments);
/// assert_approx_eq!(report.stats()[0].average, 30.0);
/// assert_approx_eq!(report.stats()[0].std_dev, 250.0_f64.sqrt());
/// assert_eq!(report.matrix().get(0, 0), Some(1.0));
/// assert_approx_eq!(report.correlation_between("X", "Y").unwrap(), -1.0);
/// ```
pub fn build<T, Ts>(instruments: &[Instrument<T, Ts>]) -> CorrelationReport<T>
where
    T: Float + Default,
{
    let prices: Vec<Vec<T>> = instruments.iter().map(Instrument::prices).collect();

    let stats: Vec<InstrumentStats<T>> = instruments
        .iter()
        .zip(&prices)
        .map(|(instrument, prices)| {
            if prices.len() < 2 {
                log::debug!(
                    "{}: {} price sample(s), statistics are degenerate",
                    instrument.id,
                    prices.len()
                );
            }
            InstrumentStats::from_prices(instrument.id.as_str(), prices)
                .with_name(instrument.name.clone())
        })
        .collect();

    let matrix = CorrelationMatrix::from_fn(instruments.len(), |i, j| {
        if i == j {
            return T::one();
        }
        pearson(&prices[i], &prices[j]).unwrap_or_else(|| {
            log::trace!(
                "{} vs {}: correlation undefined, using 0",
                instruments[i].id,
                instruments[j].id
            );
            T::zero()
        })
    });

    let mut index = HashMap::with_capacity_and_hasher(instruments.len(), RandomState::default());
    for (i, instrument) in instruments.iter().enumerate() {
        index.entry(instrument.id.clone()).or_insert(i);
    }

    log::debug!("built correlation report for {} instruments", instruments.len());

    CorrelationReport {
        stats,
        matrix,
        index,
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use alloc::vec;

    use super::*;
    use crate::{PriceSample, correlation};

    fn instrument(id: &str, prices: &[f64]) -> Instrument<f64, usize> {
        Instrument::new(
            id,
            prices
                .iter()
                .enumerate()
                .map(|(t, p)| PriceSample::new(*p, t))
                .collect(),
        )
    }

    #[test]
    fn stats_and_matrix_follow_input_order() {
        let instruments = [
            instrument("X", &[10.0, 20.0, 30.0, 40.0, 50.0]),
            instrument("Y", &[50.0, 40.0, 30.0, 20.0, 10.0]),
        ];
        let report = build(&instruments);

        assert_eq!(report.ids().collect::<Vec<_>>(), vec!["X", "Y"]);
        assert_approx_eq!(report.stats()[0].average, 30.0);
        assert_approx_eq!(report.stats()[0].std_dev, 15.811388300841896);
        assert_eq!(report.stats()[1].samples, 5);

        let matrix = report.matrix();
        assert_eq!(matrix.dim(), 2);
        assert_eq!(matrix[(0, 0)], 1.0);
        assert_eq!(matrix[(1, 1)], 1.0);
        assert_approx_eq!(matrix[(0, 1)], -1.0);
        assert_approx_eq!(matrix[(1, 0)], -1.0);
    }

    #[test]
    fn identical_instruments_correlate_fully() {
        let instruments = [
            instrument("A", &[3.0, 1.0, 4.0, 1.0, 5.0, 9.0]),
            instrument("B", &[3.0, 1.0, 4.0, 1.0, 5.0, 9.0]),
            instrument("C", &[2.0, 7.0, 1.0, 8.0, 2.0, 8.0]),
        ];
        let report = build(&instruments);
        let matrix = report.matrix();

        assert_eq!(matrix.dim(), 3);
        assert_eq!(matrix.rows().count(), 3);
        for i in 0..3 {
            assert_eq!(matrix[(i, i)], 1.0);
        }
        assert_approx_eq!(matrix[(0, 1)], 1.0);
        assert_approx_eq!(matrix[(1, 0)], 1.0);
        assert_eq!(matrix[(0, 2)], matrix[(1, 2)]);
    }

    #[test]
    fn matrix_is_symmetric() {
        let instruments = [
            instrument("P", &[0.496714, -0.138264, 0.647689, 1.523030, -0.234153]),
            instrument("Q", &[0.115991, -0.329650, 0.574363, 0.109481]),
            instrument("R", &[1.579213, 0.767435, -0.469474, 0.542560, 0.241962, -1.913280]),
            instrument("S", &[-0.234137, -0.445040, 0.599033]),
        ];
        let matrix = build(&instruments).into_parts().1;
        assert!(matrix.is_symmetric(1e-12));
        assert_eq!(
            matrix[(1, 2)],
            correlation(&instruments[1].prices(), &instruments[2].prices())
        );
    }

    #[test]
    fn degenerate_instruments_resolve_to_zero() {
        let instruments = [
            instrument("EMPTY", &[]),
            instrument("ONE", &[42.0]),
            instrument("FLAT", &[1.0, 1.0, 1.0]),
            instrument("RAMP", &[1.0, 2.0, 3.0]),
        ];
        let report = build(&instruments);

        let empty = report.stats_for("EMPTY").unwrap();
        assert_eq!((empty.average, empty.std_dev, empty.samples), (0.0, 0.0, 0));
        let one = report.stats_for("ONE").unwrap();
        assert_eq!((one.average, one.std_dev, one.samples), (42.0, 0.0, 1));
        assert_eq!(report.stats_for("FLAT").unwrap().std_dev, 0.0);

        let matrix = report.matrix();
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(matrix[(i, j)], expected, "cell ({i}, {j})");
            }
        }
    }

    #[test]
    fn ragged_series_are_aligned_to_shortest() {
        let instruments = [
            instrument("LONG", &[1.0, 2.0, 3.0, 10.0, -7.0]),
            instrument("SHORT", &[2.0, 4.0, 6.0]),
        ];
        let report = build(&instruments);
        assert_approx_eq!(report.correlation_between("LONG", "SHORT").unwrap(), 1.0);
        assert_eq!(report.stats_for("LONG").unwrap().samples, 5);
    }

    #[test]
    fn empty_input_builds_empty_report() {
        let instruments: [Instrument<f64, usize>; 0] = [];
        let report = build(&instruments);
        assert!(report.is_empty());
        assert_eq!(report.len(), 0);
        assert!(report.matrix().is_empty());
        assert_eq!(report.position("X"), None);
    }

    #[test]
    fn lookups_by_id() {
        let instruments = [
            instrument("NVDA", &[1.0, 2.0, 3.0]),
            instrument("AMD", &[3.0, 2.0, 1.0]),
        ];
        let report = build(&instruments);
        assert_eq!(report.position("AMD"), Some(1));
        assert_eq!(report.stats_for("MSFT"), None);
        assert_eq!(report.correlation_between("NVDA", "NVDA"), Some(1.0));
        assert_eq!(report.correlation_between("NVDA", "MSFT"), None);
        assert_approx_eq!(report.correlation_between("AMD", "NVDA").unwrap(), -1.0);
    }

    #[test]
    fn stats_carry_instrument_names() {
        let instruments = [
            instrument("NVDA", &[1.0, 2.0]).with_name("NVIDIA Corporation"),
            instrument("AMD", &[2.0, 1.0]),
        ];
        let report = build(&instruments);
        assert_eq!(
            report.stats_for("NVDA").unwrap().name.as_deref(),
            Some("NVIDIA Corporation")
        );
        assert_eq!(report.stats_for("AMD").unwrap().name, None);
    }

    #[test]
    fn repeated_ids_resolve_to_first_position() {
        let instruments = [
            instrument("DUP", &[1.0, 2.0, 3.0]),
            instrument("OTHER", &[1.0, 5.0, 2.0]),
            instrument("DUP", &[9.0, 9.0]),
        ];
        let report = build(&instruments);
        assert_eq!(report.len(), 3);
        assert_eq!(report.position("DUP"), Some(0));
        assert_eq!(report.stats_for("DUP").unwrap().samples, 3);
        assert_eq!(report.stats()[2].samples, 2);
    }

    #[test]
    fn works_with_f32() {
        let instruments = [
            Instrument::new("A", vec![PriceSample::new(1.0_f32, ()), PriceSample::new(2.0, ())]),
            Instrument::new("B", vec![PriceSample::new(4.0_f32, ()), PriceSample::new(2.0, ())]),
        ];
        let report = build(&instruments);
        assert_approx_eq!(report.matrix()[(0, 1)], -1.0_f32);
    }
}
