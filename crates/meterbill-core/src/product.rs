//! Subscription products and their monthly price table.
//!
//! Prices are given in cents per month.

use serde::{Deserialize, Serialize};

use crate::money::{Currency, Money};

// ============================================================================
// Constants
// ============================================================================

/// Sandbox monthly price in cents.
pub const SANDBOX_PRICE_CENTS: i64 = 0;

/// Developer monthly price in cents (39 EUR).
pub const DEVELOPER_PRICE_CENTS: i64 = 3_900;

/// Production monthly price in cents (249 EUR).
pub const PRODUCTION_PRICE_CENTS: i64 = 24_900;

/// Extra-gigabyte add-on monthly price in cents (49 EUR).
pub const PLUS_ONE_GB_PRICE_CENTS: i64 = 4_900;

/// A subscription product.
///
/// `PlusOneGigabyte` is an add-on: it is only valid in a selection that
/// also contains `Production`. Selections may contain duplicates (multiple
/// developer seats, say) and order is irrelevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    /// Free sandbox environment.
    Sandbox,

    /// Developer seat.
    Developer,

    /// Production environment.
    Production,

    /// One additional gigabyte of data for a production subscription.
    PlusOneGigabyte,
}

impl Product {
    /// Get the product name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Developer => "developer",
            Self::Production => "production",
            Self::PlusOneGigabyte => "plus_one_gigabyte",
        }
    }

    /// Whether this product is an add-on rather than a standalone
    /// subscription.
    #[must_use]
    pub const fn is_addon(&self) -> bool {
        matches!(self, Self::PlusOneGigabyte)
    }
}

/// Monthly price table for subscription products.
///
/// The table is injected into [`crate::SubscriptionCalculator`] so pricing
/// can change without touching the calculation code. `Default` is the
/// stock table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPricing {
    /// Currency every price in this table is denominated in.
    pub currency: Currency,

    /// Sandbox price in cents per month.
    pub sandbox_cents: i64,

    /// Developer price in cents per month.
    pub developer_cents: i64,

    /// Production price in cents per month.
    pub production_cents: i64,

    /// Extra-gigabyte add-on price in cents per month.
    pub plus_one_gb_cents: i64,
}

impl Default for ProductPricing {
    fn default() -> Self {
        Self {
            currency: Currency::Eur,
            sandbox_cents: SANDBOX_PRICE_CENTS,
            developer_cents: DEVELOPER_PRICE_CENTS,
            production_cents: PRODUCTION_PRICE_CENTS,
            plus_one_gb_cents: PLUS_ONE_GB_PRICE_CENTS,
        }
    }
}

impl ProductPricing {
    /// Monthly price of a single product.
    #[must_use]
    pub const fn monthly_price(&self, product: Product) -> Money {
        let cents = match product {
            Product::Sandbox => self.sandbox_cents,
            Product::Developer => self.developer_cents,
            Product::Production => self.production_cents,
            Product::PlusOneGigabyte => self.plus_one_gb_cents,
        };
        Money::from_minor(cents, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_table_prices() {
        let pricing = ProductPricing::default();
        assert_eq!(pricing.monthly_price(Product::Sandbox).amount_minor(), 0);
        assert_eq!(pricing.monthly_price(Product::Developer).amount_minor(), 3_900);
        assert_eq!(pricing.monthly_price(Product::Production).amount_minor(), 24_900);
        assert_eq!(pricing.monthly_price(Product::PlusOneGigabyte).amount_minor(), 4_900);
        assert_eq!(pricing.currency, Currency::Eur);
    }

    #[test]
    fn only_the_extra_gigabyte_is_an_addon() {
        assert!(Product::PlusOneGigabyte.is_addon());
        assert!(!Product::Sandbox.is_addon());
        assert!(!Product::Developer.is_addon());
        assert!(!Product::Production.is_addon());
    }

    #[test]
    fn product_serde_uses_snake_case() {
        let json = serde_json::to_string(&Product::PlusOneGigabyte).unwrap();
        assert_eq!(json, "\"plus_one_gigabyte\"");
        let parsed: Product = serde_json::from_str("\"production\"").unwrap();
        assert_eq!(parsed, Product::Production);
    }
}
