use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currencies the material rate table may price in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Eur,
    Usd,
    Gbp,
    Jpy,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eur => "EUR",
            Self::Usd => "USD",
            Self::Gbp => "GBP",
            Self::Jpy => "JPY",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "EUR" => Some(Self::Eur),
            "USD" => Some(Self::Usd),
            "GBP" => Some(Self::Gbp),
            "JPY" => Some(Self::Jpy),
            _ => None,
        }
    }

    /// Number of minor-unit digits amounts are rounded and displayed with.
    /// Yen has no minor unit.
    pub fn minor_units(&self) -> u32 {
        match self {
            Self::Jpy => 0,
            _ => 2,
        }
    }

    /// Formats an amount at the currency's minor-unit precision,
    /// e.g. `595.00 EUR` or `595 JPY`.
    pub fn format(&self, amount: Decimal) -> String {
        format!(
            "{:.prec$} {}",
            amount,
            self.as_str(),
            prec = self.minor_units() as usize
        )
    }
}
