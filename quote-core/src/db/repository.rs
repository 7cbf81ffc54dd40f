use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{Material, NewQuote, NewWorkshop, Quote, SubscriptionStatus, Workshop};

#[derive(Debug, Error, PartialEq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Storage behind the quote engine: the material rate table, tenant
/// workshops, and submitted quotes. Backend crates implement this trait and
/// expose their own constructors (the SQLite crate's `open`, for example).
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    // Material rate table
    async fn get_material(&self, name: &str) -> Result<Material, RepositoryError>;
    async fn list_materials(&self) -> Result<Vec<Material>, RepositoryError>;
    async fn insert_material(&self, material: &Material) -> Result<(), RepositoryError>;
    async fn delete_material(&self, name: &str) -> Result<(), RepositoryError>;

    // Workshops
    async fn create_workshop(&self, workshop: NewWorkshop) -> Result<Workshop, RepositoryError>;
    async fn get_workshop(&self, id: i64) -> Result<Workshop, RepositoryError>;
    async fn list_workshops(&self) -> Result<Vec<Workshop>, RepositoryError>;
    async fn update_subscription(
        &self,
        id: i64,
        status: SubscriptionStatus,
        until: Option<NaiveDate>,
    ) -> Result<(), RepositoryError>;

    // Quotes
    async fn create_quote(&self, quote: NewQuote) -> Result<Quote, RepositoryError>;
    async fn get_quote(&self, id: i64) -> Result<Quote, RepositoryError>;
    async fn list_quotes(&self, workshop_id: Option<i64>) -> Result<Vec<Quote>, RepositoryError>;
    async fn delete_quote(&self, id: i64) -> Result<(), RepositoryError>;
}
