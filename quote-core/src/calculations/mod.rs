//! Price calculations for laser-cut quotes.
//!
//! The only entry point is [`QuoteCalculator`], which turns geometry metrics
//! plus a material rate into an invoice-style breakdown. Everything here is
//! pure and synchronous.

pub mod common;
pub mod pricing;

pub use pricing::{QuoteBreakdown, QuoteCalculator, QuoteError, QuoteInput, default_tax_rate};
