use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A submitted quote or order, as persisted.
///
/// `is_order` distinguishes a binding order from a price enquiry; both carry
/// the same breakdown. Monetary fields are already rounded to the material
/// currency's minor units at calculation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: i64,
    pub workshop_id: i64,

    // Customer contact as entered in the upload form
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,

    // What was priced
    pub file_name: String,
    pub material_name: String,
    pub quantity: u32,

    // Computed breakdown
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub tax_enabled: bool,
    pub is_order: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// For creating new quotes (no id or timestamps)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuote {
    pub workshop_id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub file_name: String,
    pub material_name: String,
    pub quantity: u32,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub tax_enabled: bool,
    pub is_order: bool,
}
