//! Quote pricing for laser-cut parts.
//!
//! A quote is priced from the geometry metrics of the uploaded cut file and
//! the selected material's rate table entry:
//!
//! | Step     | Description |
//! |----------|-------------|
//! | metric   | The metric matching the material unit (cut length, bounding-box area, or piece count) |
//! | unit cost| metric × rate per unit, rounded |
//! | subtotal | unit cost × quantity, rounded |
//! | tax      | subtotal × tax rate when tax is enabled, rounded; otherwise 0 |
//! | total    | subtotal + tax |
//!
//! All rounding is to the material currency's minor units, half-up.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use quote_core::calculations::{QuoteCalculator, QuoteInput};
//! use quote_core::models::{Currency, GeometryMetrics, Material, MaterialUnit};
//!
//! let material = Material {
//!     name: "steel-3mm".to_string(),
//!     unit: MaterialUnit::PerArea,
//!     rate_per_unit: dec!(0.01),
//!     currency: Currency::Eur,
//! };
//!
//! let input = QuoteInput {
//!     metrics: GeometryMetrics {
//!         cut_length_mm: 400.0,
//!         area_mm2: 10_000.0,
//!         piece_count: 1,
//!     },
//!     quantity: 5,
//!     tax_enabled: true,
//!     tax_rate: dec!(0.19),
//! };
//!
//! let breakdown = QuoteCalculator::new(&material).calculate(&input).unwrap();
//!
//! assert_eq!(breakdown.subtotal, dec!(500.00));
//! assert_eq!(breakdown.tax, dec!(95.00));
//! assert_eq!(breakdown.total, dec!(595.00));
//! ```

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::round_to_minor_units;
use crate::models::{Currency, GeometryMetrics, Material, MaterialUnit};

/// The tax rate applied when the caller does not pick one (19% VAT).
pub fn default_tax_rate() -> Decimal {
    Decimal::new(19, 2)
}

/// Errors that reject a pricing request before any arithmetic runs.
#[derive(Debug, Error, PartialEq)]
pub enum QuoteError {
    /// A geometry metric is negative, NaN, or infinite.
    #[error("metric '{field}' must be a finite, non-negative number, got {value}")]
    InvalidMetric { field: &'static str, value: f64 },

    /// Quantity must be at least one piece.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// The material rate must be non-negative.
    #[error("material rate must be non-negative, got {0}")]
    InvalidRate(Decimal),

    /// The tax rate must lie in [0, 1].
    #[error("tax rate must be between 0 and 1, got {0}")]
    InvalidTaxRate(Decimal),
}

/// Per-request pricing parameters.
///
/// A new input is built on every user interaction (file upload or parameter
/// change); nothing is retained between calculations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteInput {
    /// Metrics of the uploaded cut file.
    pub metrics: GeometryMetrics,

    /// Number of copies to cut. Must be at least 1.
    pub quantity: u32,

    /// Whether tax is added on top of the subtotal.
    pub tax_enabled: bool,

    /// Tax rate as a fraction in [0, 1]. See [`default_tax_rate`].
    pub tax_rate: Decimal,
}

/// The computed price breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteBreakdown {
    /// Price of a single piece, rounded.
    pub unit_cost: Decimal,

    /// Unit cost × quantity.
    pub subtotal: Decimal,

    /// Subtotal × tax rate when tax is enabled, otherwise zero.
    pub tax: Decimal,

    /// Subtotal + tax.
    pub total: Decimal,

    /// Currency of the material rate; all amounts are in this currency.
    pub currency: Currency,
}

/// Calculator for a single material's rate table entry.
#[derive(Debug, Clone)]
pub struct QuoteCalculator<'a> {
    material: &'a Material,
}

impl<'a> QuoteCalculator<'a> {
    pub fn new(material: &'a Material) -> Self {
        Self { material }
    }

    /// Prices one request against this calculator's material.
    ///
    /// Pure and synchronous; safe to re-run on every input change.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError`] if any metric is negative or non-finite, the
    /// quantity is zero, the material rate is negative, or the tax rate is
    /// outside [0, 1].
    pub fn calculate(
        &self,
        input: &QuoteInput,
    ) -> Result<QuoteBreakdown, QuoteError> {
        self.validate(input)?;

        let metric = self.metric_value(&input.metrics)?;
        let unit_cost = self.unit_cost(metric);
        let subtotal = self.subtotal(unit_cost, input.quantity);
        let tax = self.tax(subtotal, input);
        let total = subtotal + tax;

        Ok(QuoteBreakdown {
            unit_cost,
            subtotal,
            tax,
            total,
            currency: self.material.currency,
        })
    }

    fn validate(
        &self,
        input: &QuoteInput,
    ) -> Result<(), QuoteError> {
        let metric_fields = [
            ("cut_length_mm", input.metrics.cut_length_mm),
            ("area_mm2", input.metrics.area_mm2),
        ];
        for (field, value) in metric_fields {
            if !value.is_finite() || value < 0.0 {
                return Err(QuoteError::InvalidMetric { field, value });
            }
        }

        if input.quantity < 1 {
            return Err(QuoteError::InvalidQuantity);
        }

        if self.material.rate_per_unit < Decimal::ZERO {
            return Err(QuoteError::InvalidRate(self.material.rate_per_unit));
        }

        if input.tax_rate < Decimal::ZERO || input.tax_rate > Decimal::ONE {
            return Err(QuoteError::InvalidTaxRate(input.tax_rate));
        }

        Ok(())
    }

    /// Selects the metric the material's unit prices against.
    fn metric_value(
        &self,
        metrics: &GeometryMetrics,
    ) -> Result<Decimal, QuoteError> {
        match self.material.unit {
            MaterialUnit::PerLength => Decimal::from_f64(metrics.cut_length_mm).ok_or(
                QuoteError::InvalidMetric {
                    field: "cut_length_mm",
                    value: metrics.cut_length_mm,
                },
            ),
            MaterialUnit::PerArea => {
                Decimal::from_f64(metrics.area_mm2).ok_or(QuoteError::InvalidMetric {
                    field: "area_mm2",
                    value: metrics.area_mm2,
                })
            }
            MaterialUnit::PerPiece => Ok(Decimal::from(metrics.piece_count)),
        }
    }

    /// Price of a single piece.
    fn unit_cost(
        &self,
        metric: Decimal,
    ) -> Decimal {
        round_to_minor_units(metric * self.material.rate_per_unit, self.material.currency)
    }

    /// Unit cost scaled by quantity.
    fn subtotal(
        &self,
        unit_cost: Decimal,
        quantity: u32,
    ) -> Decimal {
        round_to_minor_units(unit_cost * Decimal::from(quantity), self.material.currency)
    }

    /// Tax on the subtotal, or zero when tax is disabled.
    fn tax(
        &self,
        subtotal: Decimal,
        input: &QuoteInput,
    ) -> Decimal {
        if input.tax_enabled {
            round_to_minor_units(subtotal * input.tax_rate, self.material.currency)
        } else {
            Decimal::ZERO
        }
    }
}
