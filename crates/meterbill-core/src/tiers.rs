//! Range pricing: progressive volume pricing over ordered rate bands.
//!
//! A [`RateSchedule`] prices a consumed quantity progressively: the part
//! of the quantity falling into each band is billed at that band's unit
//! price, so the effective rate drops as consumption crosses successive
//! thresholds. The last band of a schedule has no upper bound.

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};

/// One band of a rate schedule.
///
/// Quantities from `start` up to the next band's `start` are billed at
/// `unit_price` per unit; the last band extends without an upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateBand {
    /// Quantity at which this band begins.
    pub start: f64,

    /// Price per unit within this band.
    pub unit_price: f64,
}

/// An ordered schedule of rate bands, ascending by `start` with the first
/// band starting at 0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RateSchedule {
    bands: Vec<RateBand>,
}

impl RateSchedule {
    /// Create a schedule from bands ordered ascending by `start`.
    #[must_use]
    pub fn new(bands: Vec<RateBand>) -> Self {
        Self { bands }
    }

    /// Create a schedule from parallel tables of band starts and unit
    /// prices.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Configuration`] if the tables differ in
    /// length. This is a table-setup mistake, checked before any quantity
    /// is consumed.
    pub fn from_tables(starts: &[f64], unit_prices: &[f64]) -> Result<Self> {
        if starts.len() != unit_prices.len() {
            return Err(PricingError::Configuration {
                thresholds: starts.len(),
                unit_prices: unit_prices.len(),
            });
        }
        Ok(Self::new(
            starts
                .iter()
                .zip(unit_prices)
                .map(|(&start, &unit_price)| RateBand { start, unit_price })
                .collect(),
        ))
    }

    /// The bands of this schedule.
    #[must_use]
    pub fn bands(&self) -> &[RateBand] {
        &self.bands
    }

    /// Price a consumed quantity progressively across the bands.
    ///
    /// Walks the bands in ascending order, billing the part of the
    /// quantity that falls within each band at that band's unit price.
    /// Residual quantity beyond the last band's start is billed at the
    /// last band's rate. Quantities of zero or below consume nothing and
    /// cost nothing.
    #[must_use]
    pub fn cost(&self, quantity: f64) -> f64 {
        let mut remaining = quantity;
        let mut total = 0.0;
        for (i, band) in self.bands.iter().enumerate() {
            if remaining <= 0.0 {
                break;
            }
            // Span to the next band's start; the last band has none and
            // absorbs all remaining quantity.
            let span = self.bands.get(i + 1).map(|next| next.start - band.start);
            let consumed = match span {
                Some(width) if remaining > width => width,
                _ => remaining,
            };
            total += consumed * band.unit_price;
            remaining -= consumed;
        }
        total
    }

    /// Price a per-period quantity with a minimum charge, over a number of
    /// periods.
    ///
    /// The per-period cost is computed once and floored at `minimum`
    /// before being multiplied by `day_count`, so even zero usage is
    /// billed the minimum for every day.
    #[must_use]
    pub fn cost_with_floor(&self, quantity: f64, day_count: u32, minimum: f64) -> f64 {
        let per_day = self.cost(quantity).max(minimum);
        per_day * f64::from(day_count)
    }
}
