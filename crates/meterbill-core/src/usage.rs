//! Daily usage records and consumption rating.
//!
//! Usage arrives from the external reporting collaborator as one record
//! per calendar day. Absent or NaN metric values contribute zero to every
//! sum, but the record itself still counts as one metered day when the
//! per-day minimum charge applies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::tiers::{RateBand, RateSchedule};

/// Usage measured for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyUsage {
    /// The day the usage was measured.
    pub day: NaiveDate,

    /// Data volume transferred that day, in GB.
    pub data_volume_gb: Option<f64>,

    /// Number of queries served that day.
    pub query_count: Option<f64>,
}

impl DailyUsage {
    /// Create a fully populated record.
    #[must_use]
    pub const fn new(day: NaiveDate, data_volume_gb: f64, query_count: f64) -> Self {
        Self {
            day,
            data_volume_gb: Some(data_volume_gb),
            query_count: Some(query_count),
        }
    }
}

/// Treat absent or NaN metric values as zero.
fn value_or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}

/// Total queries across all records.
#[must_use]
pub fn total_queries(records: &[DailyUsage]) -> f64 {
    records.iter().map(|r| value_or_zero(r.query_count)).sum()
}

/// Average queries per day; 0 for an empty window.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_queries(records: &[DailyUsage]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    total_queries(records) / records.len() as f64
}

/// Largest single-day data volume in GB; 0 for an empty window.
#[must_use]
pub fn max_data_volume(records: &[DailyUsage]) -> f64 {
    records
        .iter()
        .map(|r| value_or_zero(r.data_volume_gb))
        .fold(0.0, f64::max)
}

/// Average data volume per day in GB; 0 for an empty window.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_data_volume(records: &[DailyUsage]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let total: f64 = records.iter().map(|r| value_or_zero(r.data_volume_gb)).sum();
    total / records.len() as f64
}

/// Descriptive statistics and the priced total for one reporting window.
///
/// Consumed by the external invoice/report renderer; the statistics are
/// reporting-only and do not feed back into the priced total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageSummary {
    /// Total queries across the window.
    pub total_queries: f64,

    /// Average queries per day.
    pub average_queries: f64,

    /// Largest single-day data volume in GB.
    pub max_data_gb: f64,

    /// Average data volume per day in GB.
    pub average_data_gb: f64,

    /// Total price for the window, rounded to cents.
    pub total_price: f64,
}

/// Consumption rate configuration: the query and data schedules plus the
/// per-day minimum data charge.
///
/// Injected into callers as configuration so rates can change without
/// touching the rating code. `Default` is the stock table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRates {
    /// Schedule for queries, billed cumulatively across the window.
    pub queries: RateSchedule,

    /// Schedule for data volume, billed per day.
    pub data: RateSchedule,

    /// Minimum data charge per metered day.
    pub data_daily_minimum: f64,
}

impl Default for UsageRates {
    fn default() -> Self {
        Self {
            queries: RateSchedule::new(vec![
                RateBand { start: 0.0, unit_price: 0.0004 }, // 0.40 per 1k queries
                RateBand { start: 50_000.0, unit_price: 0.0003 },
                RateBand { start: 500_000.0, unit_price: 0.0002 },
                RateBand { start: 5_000_000.0, unit_price: 0.0001 },
            ]),
            data: RateSchedule::new(vec![
                RateBand { start: 0.0, unit_price: 1.50 }, // per GB-day
                RateBand { start: 1.0, unit_price: 1.00 },
                RateBand { start: 10.0, unit_price: 0.60 },
                RateBand { start: 100.0, unit_price: 0.30 },
            ]),
            data_daily_minimum: 0.25,
        }
    }
}

impl UsageRates {
    /// Price one reporting window.
    ///
    /// Queries are billed once, cumulatively across the whole window.
    /// Data volume is billed per day: each day re-enters the data schedule
    /// from zero and is floored at the per-day minimum. Both terms are
    /// summed before the combined total is rounded half-up to 2 decimals.
    /// An empty window prices to exactly 0 and no floor applies.
    #[must_use]
    pub fn total_price(&self, records: &[DailyUsage]) -> f64 {
        let query_cost = self.queries.cost(total_queries(records));
        let data_cost: f64 = records
            .iter()
            .map(|r| {
                self.data
                    .cost_with_floor(value_or_zero(r.data_volume_gb), 1, self.data_daily_minimum)
            })
            .sum();
        let total = round_to_cents(query_cost + data_cost);
        tracing::debug!(
            days = records.len(),
            query_cost,
            data_cost,
            total,
            "rated usage window"
        );
        total
    }

    /// Summarize one reporting window for the invoice renderer.
    #[must_use]
    pub fn summarize(&self, records: &[DailyUsage]) -> UsageSummary {
        UsageSummary {
            total_queries: total_queries(records),
            average_queries: average_queries(records),
            max_data_gb: max_data_volume(records),
            average_data_gb: average_data_volume(records),
            total_price: self.total_price(records),
        }
    }
}

/// Round to 2 decimal places, half-up.
fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, n).unwrap()
    }

    #[test]
    fn absent_and_nan_values_sum_as_zero() {
        let records = [
            DailyUsage::new(day(1), 2.0, 1_000.0),
            DailyUsage {
                day: day(2),
                data_volume_gb: None,
                query_count: Some(f64::NAN),
            },
            DailyUsage::new(day(3), 4.0, 500.0),
        ];
        assert_eq!(total_queries(&records), 1_500.0);
        assert_eq!(average_data_volume(&records), 2.0);
        assert!(!total_queries(&records).is_nan());
    }

    #[test]
    fn statistics_of_an_empty_window_are_zero() {
        assert_eq!(total_queries(&[]), 0.0);
        assert_eq!(average_queries(&[]), 0.0);
        assert_eq!(max_data_volume(&[]), 0.0);
        assert_eq!(average_data_volume(&[]), 0.0);
    }

    #[test]
    fn max_data_volume_skips_absent_days() {
        let records = [
            DailyUsage::new(day(1), 3.5, 0.0),
            DailyUsage {
                day: day(2),
                data_volume_gb: None,
                query_count: None,
            },
            DailyUsage::new(day(3), 1.0, 0.0),
        ];
        assert_eq!(max_data_volume(&records), 3.5);
    }

    #[test]
    fn empty_window_prices_to_zero_without_the_floor() {
        assert_eq!(UsageRates::default().total_price(&[]), 0.0);
    }

    #[test]
    fn a_day_with_no_data_still_bills_the_minimum() {
        let rates = UsageRates::default();
        let records = [DailyUsage {
            day: day(1),
            data_volume_gb: None,
            query_count: None,
        }];
        assert!((rates.total_price(&records) - rates.data_daily_minimum).abs() < 1e-9);
    }

    #[test]
    fn queries_are_billed_across_the_window_and_data_per_day() {
        let rates = UsageRates::default();
        let records = [
            DailyUsage::new(day(1), 2.0, 30_000.0),
            DailyUsage {
                day: day(2),
                data_volume_gb: Some(0.5),
                query_count: None,
            },
            DailyUsage::new(day(3), 12.0, 40_000.0),
        ];
        // Queries: 70k total, 50k at 0.0004 plus 20k at 0.0003 = 26.00.
        // Data: 2.50 on day 1, 0.75 on day 2, 11.70 on day 3 = 14.95.
        assert!((rates.total_price(&records) - 40.95).abs() < 1e-9);
    }

    #[test]
    fn summary_reports_statistics_and_price() {
        let rates = UsageRates::default();
        let records = [
            DailyUsage::new(day(1), 1.0, 100.0),
            DailyUsage::new(day(2), 3.0, 300.0),
        ];
        let summary = rates.summarize(&records);
        assert_eq!(summary.total_queries, 400.0);
        assert_eq!(summary.average_queries, 200.0);
        assert_eq!(summary.max_data_gb, 3.0);
        assert_eq!(summary.average_data_gb, 2.0);
        // 400 queries at 0.0004 plus 1.50 and 3.50 of daily data.
        assert!((summary.total_price - 5.16).abs() < 1e-9);
    }
}
