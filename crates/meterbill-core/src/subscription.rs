//! Flat monthly subscription pricing with VAT.
//!
//! The calculator validates a product selection, sums the monthly prices
//! as exact monetary values, multiplies by the usage duration in months,
//! and adds VAT with half-up rounding at every step.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};
use crate::money::Money;
use crate::product::{Product, ProductPricing};

/// The priced result of a subscription selection.
///
/// Constructed fresh per call and immutable; nothing is shared between
/// calls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Net price of the selected products over the duration.
    pub product_amount: Money,

    /// VAT on the product amount.
    pub vat_amount: Money,

    /// The VAT percentage that was applied.
    pub vat_percentage: Decimal,

    /// Product amount plus VAT.
    pub total_amount: Money,
}

/// Calculator for flat monthly subscription pricing.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionCalculator {
    pricing: ProductPricing,
}

impl SubscriptionCalculator {
    /// Create a calculator over a price table.
    #[must_use]
    pub const fn new(pricing: ProductPricing) -> Self {
        Self { pricing }
    }

    /// The price table this calculator uses.
    #[must_use]
    pub const fn pricing(&self) -> &ProductPricing {
        &self.pricing
    }

    /// Price a selection without VAT.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::ProductCombination`] for an add-on without
    /// its prerequisite and [`PricingError::Duration`] for a negative
    /// month count.
    pub fn price(&self, products: &[Product], months: Decimal) -> Result<PricingResult> {
        self.compute(products, months, Decimal::ZERO, true)
    }

    /// Price a selection and add VAT at the given percentage.
    ///
    /// `vat_percent` is a percentage: pass 24 for 24% VAT, not 0.24.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::ProductCombination`] for an add-on without
    /// its prerequisite, [`PricingError::Duration`] for a negative month
    /// count, and [`PricingError::VatFormat`] when `vat_percent` looks
    /// like a fraction rather than a percentage.
    pub fn price_with_vat(
        &self,
        products: &[Product],
        months: Decimal,
        vat_percent: Decimal,
    ) -> Result<PricingResult> {
        self.compute(products, months, vat_percent, true)
    }

    /// Price a selection without enforcing business rules.
    ///
    /// The product-combination and VAT-format checks are skipped, so an
    /// otherwise invalid cart (an add-on on its own, say) still gets a raw
    /// quote. Negative durations are rejected regardless.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Duration`] for a negative month count.
    pub fn price_unchecked(
        &self,
        products: &[Product],
        months: Decimal,
        vat_percent: Decimal,
    ) -> Result<PricingResult> {
        self.compute(products, months, vat_percent, false)
    }

    fn compute(
        &self,
        products: &[Product],
        months: Decimal,
        vat_percent: Decimal,
        validate: bool,
    ) -> Result<PricingResult> {
        let currency = self.pricing.currency;

        // An empty cart is never invalid; it prices to zero for any
        // duration or VAT input.
        if products.is_empty() {
            let zero = Money::zero(currency);
            return Ok(PricingResult {
                product_amount: zero,
                vat_amount: zero,
                vat_percentage: vat_percent,
                total_amount: zero,
            });
        }

        if validate {
            Self::assert_product_setup(products)?;
        }
        Self::assert_usage_duration(months)?;
        if validate {
            Self::assert_vat_format(vat_percent)?;
        }

        let monthly = products
            .iter()
            .fold(Money::zero(currency), |sum, p| {
                sum + self.pricing.monthly_price(*p)
            });
        let product_amount = monthly.scale_round(months);
        let vat_amount = product_amount.percentage(vat_percent);
        let total_amount = product_amount + vat_amount;

        tracing::debug!(
            products = products.len(),
            %months,
            %vat_percent,
            product_cents = product_amount.amount_minor(),
            vat_cents = vat_amount.amount_minor(),
            "priced subscription selection"
        );

        Ok(PricingResult {
            product_amount,
            vat_amount,
            vat_percentage: vat_percent,
            total_amount,
        })
    }

    /// Additional data can only be bought alongside a production
    /// subscription.
    fn assert_product_setup(products: &[Product]) -> Result<()> {
        let has_addon = products.iter().any(Product::is_addon);
        if has_addon && !products.contains(&Product::Production) {
            return Err(PricingError::ProductCombination {
                products: products.to_vec(),
            });
        }
        Ok(())
    }

    fn assert_usage_duration(months: Decimal) -> Result<()> {
        if months < Decimal::ZERO {
            return Err(PricingError::Duration { months });
        }
        Ok(())
    }

    /// Guard against a fraction (0.2) passed where a percentage (20) was
    /// expected; both are syntactically valid numbers.
    fn assert_vat_format(vat_percent: Decimal) -> Result<()> {
        if vat_percent > Decimal::ZERO && vat_percent < Decimal::ONE {
            return Err(PricingError::VatFormat {
                percent: vat_percent,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_cart_skips_all_validation() {
        let calc = SubscriptionCalculator::default();
        let result = calc.price_with_vat(&[], dec!(-10), dec!(0.5)).unwrap();
        assert!(result.total_amount.is_zero());
        assert!(result.product_amount.is_zero());
        assert!(result.vat_amount.is_zero());
    }

    #[test]
    fn duration_is_checked_even_without_validation() {
        let calc = SubscriptionCalculator::default();
        let err = calc
            .price_unchecked(&[Product::Sandbox], dec!(-1), Decimal::ZERO)
            .unwrap_err();
        assert_eq!(err, PricingError::Duration { months: dec!(-1) });
    }

    #[test]
    fn vat_format_guard_only_rejects_the_open_unit_interval() {
        let calc = SubscriptionCalculator::default();
        assert!(calc
            .price_with_vat(&[Product::Production], dec!(1), dec!(0.5))
            .is_err());
        assert!(calc
            .price_with_vat(&[Product::Production], dec!(1), dec!(0))
            .is_ok());
        assert!(calc
            .price_with_vat(&[Product::Production], dec!(1), dec!(1))
            .is_ok());
    }

    #[test]
    fn a_custom_price_table_is_honored() {
        let pricing = ProductPricing {
            production_cents: 10_000,
            ..ProductPricing::default()
        };
        let calc = SubscriptionCalculator::new(pricing);
        let result = calc.price(&[Product::Production], dec!(2)).unwrap();
        assert_eq!(result.product_amount.amount_minor(), 20_000);
    }

    #[test]
    fn fractional_months_round_half_up() {
        let calc = SubscriptionCalculator::default();
        // Half a month of production: 12450 cents exactly.
        let result = calc.price(&[Product::Production], dec!(0.5)).unwrap();
        assert_eq!(result.product_amount.amount_minor(), 12_450);
    }
}
