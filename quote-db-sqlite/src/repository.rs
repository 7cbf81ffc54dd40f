use std::path::Path;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use quote_core::{
    Currency, Material, MaterialUnit, NewQuote, NewWorkshop, Quote, QuoteRepository,
    RepositoryError, SubscriptionStatus, Workshop,
};
use sqlx::{FromRow, sqlite::SqlitePool};
use tracing::debug;

use crate::decimal::{parse_datetime, parse_decimal, parse_optional_date};

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = SqlitePool::connect(database_url)
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;
        Ok(Self { pool })
    }

    pub fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    /// Executes every `.sql` file in `seeds_dir`, in file-name order. Seed
    /// files are expected to be idempotent (`INSERT OR IGNORE`).
    pub async fn run_seeds(
        &self,
        seeds_dir: &Path,
    ) -> Result<(), RepositoryError> {
        let mut entries: Vec<_> = std::fs::read_dir(seeds_dir)
            .map_err(|e| {
                RepositoryError::Database(format!(
                    "Failed to read seeds directory '{}': {e}",
                    seeds_dir.display()
                ))
            })?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "sql"))
            .collect();

        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            debug!(file = %path.display(), "running seed file");
            let sql = std::fs::read_to_string(&path).map_err(|e| {
                RepositoryError::Database(format!(
                    "Failed to read seed file '{}': {e}",
                    path.display()
                ))
            })?;

            sqlx::raw_sql(&sql).execute(&self.pool).await.map_err(|e| {
                RepositoryError::Database(format!(
                    "Failed to execute seed file '{}': {e}",
                    path.display()
                ))
            })?;
        }

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn db_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

// ── row conversions ──────────────────────────────────────────────────────

#[derive(FromRow)]
struct MaterialRow {
    name: String,
    unit: String,
    rate_per_unit: String,
    currency: String,
}

impl TryFrom<MaterialRow> for Material {
    type Error = RepositoryError;

    fn try_from(row: MaterialRow) -> Result<Self, Self::Error> {
        let unit = MaterialUnit::parse(&row.unit)
            .ok_or_else(|| RepositoryError::Database(format!("Invalid unit: {}", row.unit)))?;
        let currency = Currency::parse(&row.currency).ok_or_else(|| {
            RepositoryError::Database(format!("Invalid currency: {}", row.currency))
        })?;
        Ok(Material {
            name: row.name,
            unit,
            rate_per_unit: parse_decimal(&row.rate_per_unit)?,
            currency,
        })
    }
}

#[derive(FromRow)]
struct WorkshopRow {
    id: i64,
    name: String,
    contact_email: String,
    status: String,
    subscription_until: Option<String>,
    created_at: String,
}

impl TryFrom<WorkshopRow> for Workshop {
    type Error = RepositoryError;

    fn try_from(row: WorkshopRow) -> Result<Self, Self::Error> {
        let status = SubscriptionStatus::parse(&row.status).ok_or_else(|| {
            RepositoryError::Database(format!("Invalid subscription status: {}", row.status))
        })?;
        Ok(Workshop {
            id: row.id,
            name: row.name,
            contact_email: row.contact_email,
            status,
            subscription_until: parse_optional_date(&row.subscription_until)?,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

#[derive(FromRow)]
struct QuoteRow {
    id: i64,
    workshop_id: i64,
    customer_name: String,
    customer_phone: String,
    customer_email: String,
    file_name: String,
    material_name: String,
    quantity: i64,
    subtotal: String,
    tax: String,
    total: String,
    tax_enabled: i64,
    is_order: i64,
    created_at: String,
    updated_at: String,
}

impl TryFrom<QuoteRow> for Quote {
    type Error = RepositoryError;

    fn try_from(row: QuoteRow) -> Result<Self, Self::Error> {
        let quantity: u32 = row
            .quantity
            .try_into()
            .map_err(|_| RepositoryError::Database(format!("Invalid quantity: {}", row.quantity)))?;
        Ok(Quote {
            id: row.id,
            workshop_id: row.workshop_id,
            customer_name: row.customer_name,
            customer_phone: row.customer_phone,
            customer_email: row.customer_email,
            file_name: row.file_name,
            material_name: row.material_name,
            quantity,
            subtotal: parse_decimal(&row.subtotal)?,
            tax: parse_decimal(&row.tax)?,
            total: parse_decimal(&row.total)?,
            tax_enabled: row.tax_enabled != 0,
            is_order: row.is_order != 0,
            created_at: parse_datetime(&row.created_at)?,
            updated_at: parse_datetime(&row.updated_at)?,
        })
    }
}

// ── trait implementation ─────────────────────────────────────────────────

#[async_trait]
impl QuoteRepository for SqliteRepository {
    async fn get_material(
        &self,
        name: &str,
    ) -> Result<Material, RepositoryError> {
        let row = sqlx::query_as::<_, MaterialRow>(
            "SELECT name, unit, rate_per_unit, currency FROM materials WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    async fn list_materials(&self) -> Result<Vec<Material>, RepositoryError> {
        let rows = sqlx::query_as::<_, MaterialRow>(
            "SELECT name, unit, rate_per_unit, currency FROM materials ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(Material::try_from).collect()
    }

    async fn insert_material(
        &self,
        material: &Material,
    ) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO materials (name, unit, rate_per_unit, currency) VALUES (?, ?, ?, ?)")
            .bind(&material.name)
            .bind(material.unit.as_str())
            .bind(material.rate_per_unit.to_string())
            .bind(material.currency.as_str())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete_material(
        &self,
        name: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM materials WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn create_workshop(
        &self,
        workshop: NewWorkshop,
    ) -> Result<Workshop, RepositoryError> {
        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO workshops (name, contact_email, status, subscription_until, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&workshop.name)
        .bind(&workshop.contact_email)
        .bind(workshop.status.as_str())
        .bind(workshop.subscription_until.map(|d| d.to_string()))
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(Workshop {
            id: result.last_insert_rowid(),
            name: workshop.name,
            contact_email: workshop.contact_email,
            status: workshop.status,
            subscription_until: workshop.subscription_until,
            created_at,
        })
    }

    async fn get_workshop(
        &self,
        id: i64,
    ) -> Result<Workshop, RepositoryError> {
        let row = sqlx::query_as::<_, WorkshopRow>(
            "SELECT id, name, contact_email, status, subscription_until, created_at
             FROM workshops WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    async fn list_workshops(&self) -> Result<Vec<Workshop>, RepositoryError> {
        let rows = sqlx::query_as::<_, WorkshopRow>(
            "SELECT id, name, contact_email, status, subscription_until, created_at
             FROM workshops ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(Workshop::try_from).collect()
    }

    async fn update_subscription(
        &self,
        id: i64,
        status: SubscriptionStatus,
        until: Option<NaiveDate>,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE workshops SET status = ?, subscription_until = ? WHERE id = ?")
                .bind(status.as_str())
                .bind(until.map(|d| d.to_string()))
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn create_quote(
        &self,
        quote: NewQuote,
    ) -> Result<Quote, RepositoryError> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO quotes (
                workshop_id, customer_name, customer_phone, customer_email,
                file_name, material_name, quantity,
                subtotal, tax, total, tax_enabled, is_order,
                created_at, updated_at
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(quote.workshop_id)
        .bind(&quote.customer_name)
        .bind(&quote.customer_phone)
        .bind(&quote.customer_email)
        .bind(&quote.file_name)
        .bind(&quote.material_name)
        .bind(i64::from(quote.quantity))
        .bind(quote.subtotal.to_string())
        .bind(quote.tax.to_string())
        .bind(quote.total.to_string())
        .bind(i64::from(quote.tax_enabled))
        .bind(i64::from(quote.is_order))
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(Quote {
            id: result.last_insert_rowid(),
            workshop_id: quote.workshop_id,
            customer_name: quote.customer_name,
            customer_phone: quote.customer_phone,
            customer_email: quote.customer_email,
            file_name: quote.file_name,
            material_name: quote.material_name,
            quantity: quote.quantity,
            subtotal: quote.subtotal,
            tax: quote.tax,
            total: quote.total,
            tax_enabled: quote.tax_enabled,
            is_order: quote.is_order,
            created_at: now,
            updated_at: now,
        })
    }

    async fn get_quote(
        &self,
        id: i64,
    ) -> Result<Quote, RepositoryError> {
        let row = sqlx::query_as::<_, QuoteRow>("SELECT * FROM quotes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?
            .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    async fn list_quotes(
        &self,
        workshop_id: Option<i64>,
    ) -> Result<Vec<Quote>, RepositoryError> {
        let rows = match workshop_id {
            Some(workshop_id) => {
                sqlx::query_as::<_, QuoteRow>(
                    "SELECT * FROM quotes WHERE workshop_id = ? ORDER BY created_at DESC, id DESC",
                )
                .bind(workshop_id)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, QuoteRow>(
                    "SELECT * FROM quotes ORDER BY created_at DESC, id DESC",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(db_err)?;

        rows.into_iter().map(Quote::try_from).collect()
    }

    async fn delete_quote(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM quotes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
