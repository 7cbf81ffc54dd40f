use std::io::Read;

use quote_core::{Currency, Material, MaterialUnit, QuoteRepository, RepositoryError};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading material rate data.
#[derive(Debug, Error)]
pub enum MaterialLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Unknown material unit '{0}' (expected per-length, per-area, or per-piece)")]
    InvalidUnit(String),

    #[error("Unknown currency '{0}'")]
    InvalidCurrency(String),

    #[error("Material '{0}' has a negative rate")]
    NegativeRate(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for MaterialLoaderError {
    fn from(err: csv::Error) -> Self {
        MaterialLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the material rates CSV file.
///
/// Columns:
/// - `name`: material identifier shown to customers (e.g. `steel-3mm`)
/// - `unit`: what the rate applies to (`per-length`, `per-area`, `per-piece`)
/// - `rate_per_unit`: price per unit as a decimal (e.g. `0.01` per mm²)
/// - `currency`: ISO code the rate is quoted in (e.g. `EUR`)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MaterialRecord {
    pub name: String,
    pub unit: String,
    pub rate_per_unit: Decimal,
    pub currency: String,
}

impl MaterialRecord {
    fn to_material(&self) -> Result<Material, MaterialLoaderError> {
        let unit = MaterialUnit::parse(&self.unit)
            .ok_or_else(|| MaterialLoaderError::InvalidUnit(self.unit.clone()))?;
        let currency = Currency::parse(&self.currency)
            .ok_or_else(|| MaterialLoaderError::InvalidCurrency(self.currency.clone()))?;
        if self.rate_per_unit < Decimal::ZERO {
            return Err(MaterialLoaderError::NegativeRate(self.name.clone()));
        }
        Ok(Material {
            name: self.name.clone(),
            unit,
            rate_per_unit: self.rate_per_unit,
            currency,
        })
    }
}

/// Loader for material rate data from CSV files.
///
/// The loader reads CSV data and inserts it into the database via the
/// `QuoteRepository` trait, allowing it to work with any database backend.
pub struct MaterialLoader;

impl MaterialLoader {
    /// Parse material records from a CSV reader.
    ///
    /// Returns a vector of parsed records. The reader can be any type that
    /// implements `Read`, such as a file or a string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<MaterialRecord>, MaterialLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: MaterialRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Load material records into the database.
    ///
    /// Each record is validated, any existing material of the same name is
    /// deleted, and the new row inserted. Loading is therefore idempotent —
    /// running the same load twice produces the same rate table.
    pub async fn load<R: QuoteRepository + ?Sized>(
        repo: &R,
        records: &[MaterialRecord],
    ) -> Result<usize, MaterialLoaderError> {
        let mut inserted = 0;

        for record in records {
            let material = record.to_material()?;

            repo.delete_material(&material.name).await?;
            repo.insert_material(&material).await?;
            inserted += 1;
        }

        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_CSV: &str = "\
name,unit,rate_per_unit,currency
steel-3mm,per-area,0.01,EUR
acrylic-5mm,per-length,0.05,EUR
washer-blank,per-piece,0.85,EUR
";

    #[test]
    fn parses_all_records() {
        let records = MaterialLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0],
            MaterialRecord {
                name: "steel-3mm".to_string(),
                unit: "per-area".to_string(),
                rate_per_unit: dec!(0.01),
                currency: "EUR".to_string(),
            }
        );
    }

    #[test]
    fn parse_rejects_malformed_rate() {
        let csv = "name,unit,rate_per_unit,currency\nsteel-3mm,per-area,cheap,EUR";

        let result = MaterialLoader::parse(csv.as_bytes());

        assert!(matches!(result, Err(MaterialLoaderError::CsvParse(_))));
    }

    #[test]
    fn record_with_unknown_unit_fails_conversion() {
        let record = MaterialRecord {
            name: "steel-3mm".to_string(),
            unit: "per-kilogram".to_string(),
            rate_per_unit: dec!(0.01),
            currency: "EUR".to_string(),
        };

        let result = record.to_material();

        assert!(matches!(
            result,
            Err(MaterialLoaderError::InvalidUnit(unit)) if unit == "per-kilogram"
        ));
    }

    #[test]
    fn record_with_unknown_currency_fails_conversion() {
        let record = MaterialRecord {
            name: "steel-3mm".to_string(),
            unit: "per-area".to_string(),
            rate_per_unit: dec!(0.01),
            currency: "CHF".to_string(),
        };

        let result = record.to_material();

        assert!(matches!(
            result,
            Err(MaterialLoaderError::InvalidCurrency(code)) if code == "CHF"
        ));
    }

    #[test]
    fn record_with_negative_rate_fails_conversion() {
        let record = MaterialRecord {
            name: "steel-3mm".to_string(),
            unit: "per-area".to_string(),
            rate_per_unit: dec!(-0.01),
            currency: "EUR".to_string(),
        };

        let result = record.to_material();

        assert!(matches!(result, Err(MaterialLoaderError::NegativeRate(_))));
    }

    #[test]
    fn parse_accepts_empty_file_with_header() {
        let csv = "name,unit,rate_per_unit,currency\n";

        let records = MaterialLoader::parse(csv.as_bytes()).unwrap();

        assert!(records.is_empty());
    }
}
