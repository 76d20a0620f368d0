//! Error types for meterbill.

use rust_decimal::Decimal;

use crate::product::Product;

/// Result type for meterbill operations.
pub type Result<T> = std::result::Result<T, PricingError>;

/// Errors that can occur when validating pricing inputs.
///
/// All variants represent caller misuse detected synchronously; none are
/// transient or retryable. Malformed values inside individual usage
/// records are deliberately not errors — they are zeroed at aggregation
/// time instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    /// Tier tables were set up with mismatched lengths.
    #[error("tier table mismatch: {thresholds} thresholds but {unit_prices} unit prices")]
    Configuration {
        /// Number of band thresholds provided.
        thresholds: usize,
        /// Number of unit prices provided.
        unit_prices: usize,
    },

    /// An add-on product was selected without its prerequisite.
    #[error("additional data can only be bought for the production subscription ({products:?})")]
    ProductCombination {
        /// The offending product selection.
        products: Vec<Product>,
    },

    /// A negative usage duration was passed.
    #[error("cannot calculate prices for negative times (months provided '{months}')")]
    Duration {
        /// The month count that was rejected.
        months: Decimal,
    },

    /// VAT was given as a fraction where a percentage was expected.
    #[error("vat percentage '{percent}' looks like a fraction; pass 20 for 20%, not 0.2")]
    VatFormat {
        /// The VAT value that was rejected.
        percent: Decimal,
    },
}
