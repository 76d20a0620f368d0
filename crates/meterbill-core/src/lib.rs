//! Pricing core for meterbill.
//!
//! This crate computes billing amounts for a metered cloud service from
//! two independent pricing models, combined into one customer invoice by
//! an external caller:
//!
//! - **Range pricing**: [`RateSchedule`] prices consumed quantities
//!   progressively across ordered rate bands — the unit price drops as
//!   consumption crosses successive thresholds. Used for query counts and
//!   for daily data volume.
//! - **Usage aggregation**: [`DailyUsage`] records reduce to the totals
//!   the schedules need and to descriptive statistics, via [`UsageRates`].
//! - **Subscription pricing**: [`SubscriptionCalculator`] validates a
//!   product selection and produces an exact-money [`PricingResult`] with
//!   VAT.
//!
//! # Monetary exactness
//!
//! Subscription amounts are stored as `i64` integer cents tagged with a
//! currency ([`Money`]) and never touch binary floating point; fractional
//! factors go through `rust_decimal` with half-up rounding. Consumption
//! pricing stays in `f64` — its inputs (fractional GB, fractional unit
//! prices) are inherently non-integral — and is rounded to cents only at
//! the window boundary.
//!
//! Everything here is pure and synchronous: no I/O, no shared state, no
//! async.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod money;
pub mod product;
pub mod subscription;
pub mod tiers;
pub mod usage;

pub use error::{PricingError, Result};
pub use money::{Currency, Money};
pub use product::{
    Product, ProductPricing, DEVELOPER_PRICE_CENTS, PLUS_ONE_GB_PRICE_CENTS,
    PRODUCTION_PRICE_CENTS, SANDBOX_PRICE_CENTS,
};
pub use subscription::{PricingResult, SubscriptionCalculator};
pub use tiers::{RateBand, RateSchedule};
pub use usage::{
    average_data_volume, average_queries, max_data_volume, total_queries, DailyUsage, UsageRates,
    UsageSummary,
};
