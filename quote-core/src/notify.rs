//! Flat key-value view of a computed quote for the transactional mailer.
//!
//! The email service consumes plain string fields; this module flattens a
//! breakdown plus customer and order context into an ordered list of pairs,
//! with money formatted at the currency's minor-unit precision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::QuoteBreakdown;
use crate::models::Currency;

/// Everything the mailer needs to render a quote or order confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteNotification {
    /// Workshop inbox the notification is delivered to.
    pub recipient: String,

    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,

    pub file_name: String,
    pub material: String,
    pub quantity: u32,

    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub currency: Currency,

    /// Whether tax was applied on top of the subtotal.
    pub tax_included: bool,
    /// A binding order rather than a price enquiry.
    pub is_order: bool,
}

impl QuoteNotification {
    /// Flattens the notification to ordered key-value pairs, ready for the
    /// mailer's template variables.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("recipient", self.recipient.clone()),
            ("customer_name", self.customer_name.clone()),
            ("customer_phone", self.customer_phone.clone()),
            ("customer_email", self.customer_email.clone()),
            ("file_name", self.file_name.clone()),
            ("material", self.material.clone()),
            ("quantity", self.quantity.to_string()),
            ("subtotal", self.currency.format(self.subtotal)),
            ("tax", self.currency.format(self.tax)),
            ("total", self.currency.format(self.total)),
            ("tax_included", self.tax_included.to_string()),
            ("is_order", self.is_order.to_string()),
        ]
    }

    /// Builds a notification from a computed breakdown plus the order
    /// context the upload form collected.
    #[allow(clippy::too_many_arguments)]
    pub fn from_breakdown(
        breakdown: &QuoteBreakdown,
        recipient: &str,
        customer_name: &str,
        customer_phone: &str,
        customer_email: &str,
        file_name: &str,
        material: &str,
        quantity: u32,
        tax_included: bool,
        is_order: bool,
    ) -> Self {
        Self {
            recipient: recipient.to_string(),
            customer_name: customer_name.to_string(),
            customer_phone: customer_phone.to_string(),
            customer_email: customer_email.to_string(),
            file_name: file_name.to_string(),
            material: material.to_string(),
            quantity,
            subtotal: breakdown.subtotal,
            tax: breakdown.tax,
            total: breakdown.total,
            currency: breakdown.currency,
            tax_included,
            is_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn notification() -> QuoteNotification {
        QuoteNotification {
            recipient: "orders@workshop.example".to_string(),
            customer_name: "Ada Lovelace".to_string(),
            customer_phone: "+49 30 1234567".to_string(),
            customer_email: "ada@example.com".to_string(),
            file_name: "bracket.dxf".to_string(),
            material: "steel-3mm".to_string(),
            quantity: 5,
            subtotal: dec!(500),
            tax: dec!(95),
            total: dec!(595),
            currency: Currency::Eur,
            tax_included: true,
            is_order: true,
        }
    }

    #[test]
    fn fields_are_ordered_and_money_is_formatted() {
        let fields = notification().fields();

        let keys: Vec<&str> = fields.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec![
                "recipient",
                "customer_name",
                "customer_phone",
                "customer_email",
                "file_name",
                "material",
                "quantity",
                "subtotal",
                "tax",
                "total",
                "tax_included",
                "is_order",
            ]
        );

        assert_eq!(fields[7].1, "500.00 EUR");
        assert_eq!(fields[8].1, "95.00 EUR");
        assert_eq!(fields[9].1, "595.00 EUR");
        assert_eq!(fields[10].1, "true");
    }

    #[test]
    fn from_breakdown_copies_the_monetary_fields() {
        let breakdown = QuoteBreakdown {
            unit_cost: dec!(100),
            subtotal: dec!(500),
            tax: dec!(95),
            total: dec!(595),
            currency: Currency::Eur,
        };

        let n = QuoteNotification::from_breakdown(
            &breakdown,
            "orders@workshop.example",
            "Ada Lovelace",
            "+49 30 1234567",
            "ada@example.com",
            "bracket.dxf",
            "steel-3mm",
            5,
            true,
            true,
        );

        assert_eq!(n, notification());
    }
}
