//! Integration tests for material rate loading using the actual SQLite backend.

use pretty_assertions::assert_eq;
use quote_core::{Currency, MaterialUnit, QuoteRepository};
use quote_data::MaterialLoader;
use quote_db_sqlite::SqliteRepository;
use rust_decimal_macros::dec;
use sqlx::sqlite::SqlitePoolOptions;

const TEST_CSV: &str = include_str!("../test-data/materials.csv");

/// Sets up a test database with migrations run but no seed data,
/// simulating a user running --migrate without --seeds.
async fn setup_test_db() -> SqliteRepository {
    let pool = SqlitePoolOptions::new()
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    let repo = SqliteRepository::new_with_pool(pool);
    repo.run_migrations()
        .await
        .expect("Failed to run migrations");

    repo
}

#[tokio::test]
async fn loads_every_record() {
    let repo = setup_test_db().await;

    let records = MaterialLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    let inserted = MaterialLoader::load(&repo, &records)
        .await
        .expect("Failed to load materials");

    assert_eq!(inserted, 8);
}

#[tokio::test]
async fn loaded_materials_are_retrievable_with_typed_fields() {
    let repo = setup_test_db().await;

    let records = MaterialLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
    MaterialLoader::load(&repo, &records)
        .await
        .expect("Failed to load materials");

    let steel = repo.get_material("steel-3mm").await.unwrap();
    assert_eq!(steel.unit, MaterialUnit::PerArea);
    assert_eq!(steel.rate_per_unit, dec!(0.01));
    assert_eq!(steel.currency, Currency::Eur);

    let acrylic = repo.get_material("acrylic-5mm").await.unwrap();
    assert_eq!(acrylic.unit, MaterialUnit::PerLength);
    assert_eq!(acrylic.rate_per_unit, dec!(0.05));

    let jp = repo.get_material("steel-jp").await.unwrap();
    assert_eq!(jp.currency, Currency::Jpy);
}

#[tokio::test]
async fn reloading_is_idempotent() {
    let repo = setup_test_db().await;
    let records = MaterialLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

    MaterialLoader::load(&repo, &records).await.unwrap();
    MaterialLoader::load(&repo, &records).await.unwrap();

    let materials = repo.list_materials().await.unwrap();
    assert_eq!(materials.len(), 8);
}

#[tokio::test]
async fn reloading_updates_changed_rates() {
    let repo = setup_test_db().await;
    let mut records = MaterialLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

    MaterialLoader::load(&repo, &records).await.unwrap();

    records[0].rate_per_unit = dec!(0.02);
    MaterialLoader::load(&repo, &records).await.unwrap();

    let steel = repo.get_material("steel-3mm").await.unwrap();
    assert_eq!(steel.rate_per_unit, dec!(0.02));
}
