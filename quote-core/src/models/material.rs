use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Currency;

/// Which geometry metric a material's rate applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialUnit {
    /// Rate per millimetre of cut path.
    PerLength,
    /// Rate per square millimetre of bounding-box area.
    PerArea,
    /// Rate per closed contour (piece).
    PerPiece,
}

impl MaterialUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerLength => "per-length",
            Self::PerArea => "per-area",
            Self::PerPiece => "per-piece",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "per-length" => Some(Self::PerLength),
            "per-area" => Some(Self::PerArea),
            "per-piece" => Some(Self::PerPiece),
            _ => None,
        }
    }
}

/// One row of the material rate table. Immutable reference data, keyed by
/// name; supplied externally via the CSV loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub unit: MaterialUnit,
    pub rate_per_unit: Decimal,
    pub currency: Currency,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn unit_parse_roundtrips() {
        for unit in [
            MaterialUnit::PerLength,
            MaterialUnit::PerArea,
            MaterialUnit::PerPiece,
        ] {
            assert_eq!(MaterialUnit::parse(unit.as_str()), Some(unit));
        }
    }

    #[test]
    fn unit_parse_rejects_unknown() {
        assert_eq!(MaterialUnit::parse("per-kilogram"), None);
    }
}
