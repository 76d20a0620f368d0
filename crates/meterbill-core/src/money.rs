//! Exact monetary amounts for meterbill.
//!
//! Amounts are stored as `i64` integer minor units (cents) tagged with a
//! currency code, so monetary totals never drift from exact cent values.
//! Fractional factors (month counts, VAT percentages) are applied through
//! `rust_decimal` with half-up rounding to the nearest minor unit.

use std::fmt;
use std::ops::{Add, AddAssign};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Currency of a monetary amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Euro.
    Eur,
    /// US dollar.
    Usd,
}

impl Currency {
    /// ISO 4217 code for this currency.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Eur => "EUR",
            Self::Usd => "USD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An exact monetary amount: integer minor units plus a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount_minor: i64,
    currency: Currency,
}

impl Money {
    /// Create an amount from integer minor units (cents).
    #[must_use]
    pub const fn from_minor(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// The zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self::from_minor(0, currency)
    }

    /// Amount in minor units.
    #[must_use]
    pub const fn amount_minor(&self) -> i64 {
        self.amount_minor
    }

    /// Currency of this amount.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Multiply by an exact decimal factor, rounding half-up to the
    /// nearest minor unit.
    #[must_use]
    pub fn scale_round(self, factor: Decimal) -> Self {
        Self {
            amount_minor: round_to_minor(Decimal::from(self.amount_minor) * factor),
            currency: self.currency,
        }
    }

    /// Take a percentage of this amount.
    ///
    /// Multiplies by `percent` and divides by 100, rounding half-up to the
    /// nearest minor unit after each of the two steps. 24% of 24900 cents
    /// is 5976 cents; 1.5% of 3900 cents is 59 cents (58.5 rounded up).
    #[must_use]
    pub fn percentage(self, percent: Decimal) -> Self {
        let scaled = round_to_minor(Decimal::from(self.amount_minor) * percent);
        Self {
            amount_minor: round_to_minor(Decimal::from(scaled) / Decimal::ONE_HUNDRED),
            currency: self.currency,
        }
    }
}

/// Round a decimal to a whole number of minor units, half-up.
fn round_to_minor(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(i64::MAX)
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        assert_eq!(
            self.currency, rhs.currency,
            "cannot add amounts of different currencies"
        );
        Self {
            amount_minor: self.amount_minor + rhs.amount_minor,
            currency: self.currency,
        }
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount_minor < 0 { "-" } else { "" };
        let abs = self.amount_minor.unsigned_abs();
        write!(f, "{sign}{}.{:02} {}", abs / 100, abs % 100, self.currency)
    }
}
